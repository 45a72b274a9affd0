//! The injected transport the reminder dispatcher delivers through.

use std::path::Path;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::InputFile;

use beacon_core::outbound::{DeliveryError, Outbound};

/// Telegram-backed [`Outbound`]. One raw send per call (no chunking, no
/// parse mode, no fallback) so the dispatcher's single-attempt contract
/// holds all the way to the wire.
pub struct TelegramOutbound {
    bot: Bot,
}

impl TelegramOutbound {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn chat_id(destination: &str) -> Result<ChatId, DeliveryError> {
        destination
            .parse::<i64>()
            .map(ChatId)
            .map_err(|_| DeliveryError::new(destination, "destination is not a chat id"))
    }
}

#[async_trait]
impl Outbound for TelegramOutbound {
    async fn send_text(&self, destination: &str, text: &str) -> Result<(), DeliveryError> {
        let chat_id = Self::chat_id(destination)?;
        self.bot
            .send_message(chat_id, text)
            .await
            .map(|_| ())
            .map_err(|e| DeliveryError::new(destination, e.to_string()))
    }

    async fn send_photo(
        &self,
        destination: &str,
        image: &Path,
        caption: &str,
    ) -> Result<(), DeliveryError> {
        let chat_id = Self::chat_id(destination)?;
        self.bot
            .send_photo(chat_id, InputFile::file(image))
            .caption(caption.to_string())
            .await
            .map(|_| ())
            .map_err(|e| DeliveryError::new(destination, e.to_string()))
    }
}
