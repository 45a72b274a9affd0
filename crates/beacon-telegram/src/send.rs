//! Message sending helpers for the Telegram adapter.
//!
//! Telegram caps messages at 4096 characters; we split at 4090 for safety.
//! Every send tries legacy Markdown first (the reply templates use `*bold*`
//! and `_italic_`) and falls back to plain text when Telegram rejects the
//! parse mode.

use std::path::Path;
use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::{InputFile, ParseMode};
use tracing::warn;

/// Maximum characters per Telegram message (hard limit 4096).
pub const CHUNK_MAX: usize = 4090;

/// Split `text` into chunks that fit a Telegram message, preferring line
/// boundaries. A single line longer than the limit is force-split.
pub fn split_chunks(text: &str) -> Vec<String> {
    if text.len() <= CHUNK_MAX {
        return vec![text.to_string()];
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();

    for line in text.split('\n') {
        let cost = if current.is_empty() {
            line.len()
        } else {
            1 + line.len()
        };
        if !current.is_empty() && current.len() + cost > CHUNK_MAX {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    // Force-split any chunk that is still too large (one huge line).
    let mut result = Vec::new();
    for chunk in chunks {
        if chunk.len() <= CHUNK_MAX {
            result.push(chunk);
            continue;
        }
        let mut remaining = chunk.as_str();
        while remaining.len() > CHUNK_MAX {
            let split_at = floor_char_boundary(remaining, CHUNK_MAX);
            result.push(remaining[..split_at].to_string());
            remaining = &remaining[split_at..];
        }
        if !remaining.is_empty() {
            result.push(remaining.to_string());
        }
    }
    result
}

/// Largest index `<= at` that lands on a UTF-8 character boundary.
fn floor_char_boundary(s: &str, at: usize) -> usize {
    let mut i = at.min(s.len());
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Send `text` to `chat_id` in chunks, Markdown first, plain fallback.
///
/// A 100 ms delay between consecutive chunks keeps us under Telegram's
/// per-chat rate limit.
pub async fn send_text(bot: &Bot, chat_id: ChatId, text: &str) {
    let chunks = split_chunks(text);
    for (i, chunk) in chunks.iter().enumerate() {
        let sent = bot
            .send_message(chat_id, chunk.as_str())
            .parse_mode(ParseMode::Markdown)
            .await;

        if sent.is_err() {
            if let Err(e) = bot.send_message(chat_id, chunk.as_str()).await {
                warn!(%chat_id, error = %e, "failed to send plain-text fallback");
            }
        }

        if i + 1 < chunks.len() {
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }
}

/// Send a photo with a Markdown caption; on any failure degrade to sending
/// the caption as a normal text message.
pub async fn send_photo(bot: &Bot, chat_id: ChatId, image: &Path, caption: &str) {
    let sent = bot
        .send_photo(chat_id, InputFile::file(image))
        .caption(caption)
        .parse_mode(ParseMode::Markdown)
        .await;

    if let Err(e) = sent {
        warn!(%chat_id, image = %image.display(), error = %e, "photo send failed; falling back to text");
        send_text(bot, chat_id, caption).await;
    }
}
