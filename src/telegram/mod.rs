//! Chat transport module
//!
//! This module holds the narrow contract the bot loop needs from a messaging
//! platform, plus a Telegram Bot API implementation of it:
//! - `types` - Bot API wire structures
//! - `api` - HTTP client for the Bot API

pub mod api;
pub mod types;

pub use api::BotApi;
pub use types::{CallbackQuery, Chat, InlineKeyboardMarkup, Message, Update, User};

use crate::{screens::Keyboard, Result};
use std::future::Future;

/// Request/response contract with the chat platform
pub trait ChatTransport {
    /// Fetch updates with `update_id >= offset`, waiting up to `timeout_secs`
    fn get_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> impl Future<Output = Result<Vec<Update>>> + Send;

    /// Send a new message, optionally with buttons
    fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Replace the text of an existing message; buttons are removed unless given
    fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Acknowledge a button press so the client stops its spinner
    fn answer_callback_query(&self, callback_query_id: &str) -> impl Future<Output = Result<()>> + Send;
}
