//! Command router: maps inbound `/command` texts onto the scheduler, the
//! content store and the member registry, and renders replies.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use teloxide::prelude::*;
use tracing::{debug, warn};

use beacon_scheduler::{resolve, SchedulerError, SchedulerHandle};

use crate::context::BotContext;
use crate::replies;
use crate::send;

/// What a handler wants sent back. `/start` can produce more than one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    /// Photo with caption; the adapter degrades to text when the send fails.
    Photo { image: PathBuf, caption: String },
}

/// The identity behind an inbound message.
#[derive(Debug, Clone)]
pub struct Sender {
    pub id: i64,
    pub handle: String,
    pub first_name: String,
}

/// teloxide endpoint: filters noise, routes commands, sends replies.
pub async fn handle_message(bot: Bot, msg: Message, ctx: Arc<BotContext>) -> ResponseResult<()> {
    // Ignore messages from other bots.
    if msg.from.as_ref().map(|u| u.is_bot).unwrap_or(false) {
        return Ok(());
    }
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };
    if !text.trim_start().starts_with('/') {
        return Ok(());
    }

    let sender = Sender {
        id: from.id.0 as i64,
        handle: from.username.clone().unwrap_or_default(),
        first_name: from.first_name.clone(),
    };

    let Some(replies) = dispatch(&ctx, text, msg.chat.id.0, &sender) else {
        return Ok(()); // not one of ours
    };

    for reply in replies {
        match reply {
            Reply::Text(t) => send::send_text(&bot, msg.chat.id, &t).await,
            Reply::Photo { image, caption } => {
                send::send_photo(&bot, msg.chat.id, &image, &caption).await
            }
        }
    }
    Ok(())
}

/// Route a command text. `None` means "not a command we know"; the message
/// is silently ignored, exactly like a non-command message.
pub fn dispatch(ctx: &BotContext, text: &str, chat_id: i64, sender: &Sender) -> Option<Vec<Reply>> {
    let mut parts = text.trim().split_whitespace();
    let head = parts.next()?;
    let args: Vec<&str> = parts.collect();
    // Group chats address commands as "/cmd@BotName".
    let command = head.split('@').next().unwrap_or(head);

    let now = Utc::now().with_timezone(&ctx.tz);

    match command {
        "/start" => Some(on_start(ctx, sender)),
        "/help" => Some(vec![Reply::Text(replies::help_text(
            &ctx.config.club,
            &ctx.config.timezone,
        ))]),
        "/remind" => Some(vec![Reply::Text(handle_remind(
            &args,
            now,
            &chat_id.to_string(),
            &ctx.scheduler,
        ))]),
        "/events" => {
            let events = ctx.content.upcoming_events(now.date_naive());
            Some(vec![Reply::Text(replies::events_text(&events))])
        }
        "/resources" => Some(vec![Reply::Text(replies::resources_text(
            &ctx.content.resources(),
        ))]),
        "/tip" => Some(vec![Reply::Text(replies::tip_text(ctx.content.random_tip()))]),
        "/fact" => Some(vec![Reply::Text(replies::fact_text(
            ctx.content.random_fact(),
        ))]),
        "/links" => Some(vec![Reply::Text(replies::links_text(
            &ctx.config.club.links,
        ))]),
        "/about" => Some(vec![with_logo(ctx, replies::about_text(&ctx.config.club))]),
        _ => None,
    }
}

/// The `/remind HH:MM message` entry point.
///
/// Validation failures (too few tokens, malformed time) return the usage
/// reply and schedule nothing, so a retry is always safe.
/// On success the reply carries the resolved local date-time and
/// the payload, and the job is live in the scheduler.
pub fn handle_remind<Tz: TimeZone>(
    args: &[&str],
    now: DateTime<Tz>,
    destination: &str,
    scheduler: &SchedulerHandle,
) -> String
where
    Tz::Offset: std::fmt::Display,
{
    if args.len() < 2 {
        return replies::remind_usage();
    }

    let fire_local = match resolve::next_occurrence(args[0], now) {
        Ok(t) => t,
        Err(SchedulerError::MalformedTime(_)) => return replies::remind_usage(),
        Err(e) => {
            warn!(error = %e, "time resolution failed");
            return replies::remind_failed();
        }
    };

    let message = args[1..].join(" ");
    match scheduler.schedule(fire_local.with_timezone(&Utc), destination, &message) {
        Ok(id) => {
            debug!(job_id = %id, destination, "reminder accepted");
            replies::remind_confirmation(&fire_local.format("%Y-%m-%d %H:%M").to_string(), &message)
        }
        Err(e) => {
            // The resolver returns strictly-future instants, so this only
            // trips if the clock jumped between resolve and schedule.
            warn!(error = %e, "scheduler rejected a resolved reminder");
            replies::remind_failed()
        }
    }
}

fn on_start(ctx: &BotContext, sender: &Sender) -> Vec<Reply> {
    let is_new = ctx
        .users
        .register_if_new(sender.id, &sender.handle, Utc::now())
        .unwrap_or_else(|e| {
            warn!(member_id = sender.id, error = %e, "member registration failed");
            false
        });

    if is_new {
        vec![
            with_logo(
                ctx,
                replies::first_time_welcome(&ctx.config.club, &sender.first_name),
            ),
            Reply::Text(replies::quick_start()),
        ]
    } else {
        vec![with_logo(
            ctx,
            replies::welcome_back(&ctx.config.club, &sender.first_name),
        )]
    }
}

/// Attach the club logo when one is configured and present on disk.
fn with_logo(ctx: &BotContext, caption: String) -> Reply {
    match &ctx.config.content.logo {
        Some(path) => {
            let image = PathBuf::from(path);
            if image.exists() {
                Reply::Photo { image, caption }
            } else {
                Reply::Text(caption)
            }
        }
        None => Reply::Text(caption),
    }
}
