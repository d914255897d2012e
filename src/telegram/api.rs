//! Telegram Bot API client
//!
//! Calls are plain HTTPS POSTs with JSON bodies. Every response uses the
//! `{ ok, result, description }` envelope, including HTTP error statuses.

use super::{
    types::{ApiResponse, InlineKeyboardMarkup, Update},
    ChatTransport,
};
use crate::{config::Config, screens::Keyboard, Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Extra time allowed on top of the long-poll timeout before the HTTP call gives up
const REQUEST_GRACE_SECS: u64 = 10;

/// Update kinds the gate reacts to
const ALLOWED_UPDATES: &[&str] = &["message", "callback_query"];

#[derive(Serialize)]
struct GetUpdatesParams<'a> {
    offset: i64,
    timeout: u64,
    allowed_updates: &'a [&'a str],
}

#[derive(Serialize)]
struct SendMessageParams<'a> {
    chat_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<InlineKeyboardMarkup>,
}

#[derive(Serialize)]
struct EditMessageTextParams<'a> {
    chat_id: i64,
    message_id: i64,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<InlineKeyboardMarkup>,
}

#[derive(Serialize)]
struct AnswerCallbackQueryParams<'a> {
    callback_query_id: &'a str,
}

/// Bot API client
#[derive(Clone)]
pub struct BotApi {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

impl BotApi {
    /// Create a client for `token` against `api_url`
    pub fn new(api_url: &str, token: &str, poll_timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(poll_timeout_secs.saturating_add(REQUEST_GRACE_SECS)))
            .build()
            .map_err(|e| Error::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url, &config.bot_token, config.poll_timeout_secs)
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    async fn call<P, T>(&self, method: &str, params: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("Calling Bot API method {}", method);

        // The URL embeds the token, so it is stripped from any client error.
        let response = self
            .client
            .post(self.method_url(method))
            .json(params)
            .send()
            .await
            .map_err(|e| Error::Http(e.without_url()))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Http(e.without_url()))?;

        parse_response(method, &body)
    }
}

/// Decode a Bot API response body and unwrap its envelope
pub(crate) fn parse_response<T: DeserializeOwned>(method: &str, body: &[u8]) -> Result<T> {
    let envelope: ApiResponse<T> = serde_json::from_slice(body)?;
    envelope.into_result(method)
}

impl fmt::Debug for BotApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotApi")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl ChatTransport for BotApi {
    async fn get_updates(&self, offset: i64, timeout_secs: u64) -> Result<Vec<Update>> {
        let params = GetUpdatesParams {
            offset,
            timeout: timeout_secs,
            allowed_updates: ALLOWED_UPDATES,
        };
        self.call("getUpdates", &params).await
    }

    async fn send_message(&self, chat_id: i64, text: &str, keyboard: Option<&Keyboard>) -> Result<()> {
        let params = SendMessageParams {
            chat_id,
            text,
            reply_markup: keyboard.map(InlineKeyboardMarkup::from),
        };
        let _: serde_json::Value = self.call("sendMessage", &params).await?;
        Ok(())
    }

    async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<()> {
        let params = EditMessageTextParams {
            chat_id,
            message_id,
            text,
            reply_markup: keyboard.map(InlineKeyboardMarkup::from),
        };
        let _: serde_json::Value = self.call("editMessageText", &params).await?;
        Ok(())
    }

    async fn answer_callback_query(&self, callback_query_id: &str) -> Result<()> {
        let params = AnswerCallbackQueryParams { callback_query_id };
        let _: bool = self.call("answerCallbackQuery", &params).await?;
        Ok(())
    }
}
