//! Telegram channel adapter.
//!
//! Wraps a teloxide `Bot` + `Dispatcher` and drives the long-polling event
//! loop until the process exits. No public URL required.

use std::sync::Arc;

use teloxide::prelude::*;
use tokio::sync::mpsc;
use tracing::info;

use beacon_scheduler::{Dispatcher as ReminderDispatcher, ScheduledJob};

use crate::commands::handle_message;
use crate::context::BotContext;
use crate::outbound::TelegramOutbound;

pub struct TelegramAdapter {
    ctx: Arc<BotContext>,
}

impl TelegramAdapter {
    pub fn new(ctx: Arc<BotContext>) -> Self {
        Self { ctx }
    }

    /// Connect to Telegram and drive the long-polling loop.
    ///
    /// Never returns: runs for the lifetime of the process. Fired
    /// reminders arriving on `delivery_rx` are delivered by a background
    /// task spawned here.
    pub async fn run(self, delivery_rx: mpsc::Receiver<ScheduledJob>) {
        let bot = Bot::new(&self.ctx.config.telegram.bot_token);

        let banner = format!("⏰ Reminder from {}", self.ctx.config.club.name);
        let reminders = ReminderDispatcher::new(TelegramOutbound::new(bot.clone()), banner);
        tokio::spawn(reminders.run(delivery_rx));

        info!("Telegram: starting long-polling dispatcher");

        let ctx = Arc::clone(&self.ctx);
        let handler = Update::filter_message().endpoint(handle_message);

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![ctx])
            .default_handler(|_upd| async {})
            .build()
            .dispatch()
            .await;
    }
}
