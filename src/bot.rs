//! Bot event loop
//!
//! Long-polls the chat transport and handles each update to completion,
//! in arrival order, before fetching the next batch.

use crate::{
    dispatcher::{Dispatcher, Reply},
    storage::ChatUser,
    telegram::{CallbackQuery, ChatTransport, Message, Update},
    Result,
};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Pause between polls after `getUpdates` fails
pub const POLL_ERROR_PAUSE: Duration = Duration::from_secs(1);

/// Returns true if `text` is the start command
///
/// Accepts `/start`, `/start@botname` and either form followed by arguments.
pub fn is_start_command(text: &str) -> bool {
    let command = text.split_whitespace().next().unwrap_or("");
    let name = command.split('@').next().unwrap_or("");
    name == "/start"
}

/// Polling bot driving a [`Dispatcher`] through a [`ChatTransport`]
pub struct Bot<T: ChatTransport> {
    transport: T,
    dispatcher: Dispatcher,
    poll_timeout_secs: u64,
    offset: i64,
}

impl<T: ChatTransport> Bot<T> {
    /// Create a bot that starts from the oldest pending update
    pub fn new(transport: T, dispatcher: Dispatcher, poll_timeout_secs: u64) -> Self {
        Self {
            transport,
            dispatcher,
            poll_timeout_secs,
            offset: 0,
        }
    }

    /// Next `getUpdates` offset
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Poll until `shutdown` resolves
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        info!("Bot polling started");

        loop {
            // Only the fetch and the error pause are raced against shutdown;
            // fetched updates are always handled to completion.
            let fetched = tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping bot");
                    break;
                }
                result = self.transport.get_updates(self.offset, self.poll_timeout_secs) => result,
            };

            match fetched {
                Ok(updates) => self.handle_batch(&updates).await,
                Err(e) => {
                    warn!("Failed to fetch updates: {}", e);
                    tokio::select! {
                        _ = &mut shutdown => {
                            info!("Shutdown requested, stopping bot");
                            break;
                        }
                        _ = tokio::time::sleep(POLL_ERROR_PAUSE) => {}
                    }
                }
            }
        }
    }

    /// Fetch one batch of updates and handle each of them
    ///
    /// Returns the number of updates received. A failing update is logged and
    /// skipped; only a failed fetch is returned as an error.
    pub async fn poll_once(&mut self) -> Result<usize> {
        let updates = self
            .transport
            .get_updates(self.offset, self.poll_timeout_secs)
            .await?;
        self.handle_batch(&updates).await;
        Ok(updates.len())
    }

    async fn handle_batch(&mut self, updates: &[Update]) {
        for update in updates {
            self.offset = self.offset.max(update.update_id + 1);
            if let Err(e) = self.handle_update(update).await {
                error!("Failed to handle update {}: {}", update.update_id, e);
            }
        }
    }

    /// Handle a single update
    pub async fn handle_update(&self, update: &Update) -> Result<()> {
        if let Some(query) = &update.callback_query {
            return self.handle_callback(query).await;
        }

        if let Some(message) = &update.message {
            if message.text.as_deref().is_some_and(is_start_command) {
                return self.handle_start(message).await;
            }
        }

        debug!("Ignoring update {}", update.update_id);
        Ok(())
    }

    async fn handle_start(&self, message: &Message) -> Result<()> {
        info!("Start command in chat {}", message.chat.id);
        for reply in self.dispatcher.start() {
            self.transport
                .send_message(message.chat.id, reply.text(), reply.keyboard())
                .await?;
        }
        Ok(())
    }

    async fn handle_callback(&self, query: &CallbackQuery) -> Result<()> {
        self.transport.answer_callback_query(&query.id).await?;

        let user = ChatUser::from(&query.from);
        let data = query.data.as_deref().unwrap_or("");
        let replies = self.dispatcher.on_callback(&user, data)?;

        let Some(message) = &query.message else {
            warn!(
                "Callback {} from user {} has no message attached; dropping replies",
                query.id, user.id
            );
            return Ok(());
        };

        for reply in &replies {
            match reply {
                Reply::Edit { text, keyboard } => {
                    self.transport
                        .edit_message_text(message.chat.id, message.message_id, text, keyboard.as_ref())
                        .await?;
                }
                Reply::Send { text, keyboard } => {
                    self.transport
                        .send_message(message.chat.id, text, keyboard.as_ref())
                        .await?;
                }
            }
        }

        Ok(())
    }
}
