//! `beacon-telegram`: Telegram channel adapter.
//!
//! Long polling via teloxide; the command router maps `/…` messages onto the
//! scheduler, the content store and the member registry, and the outbound
//! impl is the transport the reminder dispatcher delivers through.

pub mod adapter;
pub mod commands;
pub mod context;
pub mod outbound;
pub mod replies;
pub mod send;

pub use adapter::TelegramAdapter;
pub use context::BotContext;
pub use outbound::TelegramOutbound;
