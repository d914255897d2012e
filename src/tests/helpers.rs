//! Shared test helpers

use crate::screens::Keyboard;
use crate::storage::{ChatUser, ConsentLog};
use crate::telegram::{CallbackQuery, Chat, ChatTransport, Message, Update, User};
use crate::{Error, Result};
use rusqlite::Connection;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;

/// Helper to create an initialized consent log in a temporary directory
/// Returns (ConsentLog, TempDir) - the TempDir must be kept alive for the test duration
pub fn create_test_log() -> (ConsentLog, TempDir) {
    let (log, temp_dir) = create_uninitialized_log();
    log.init().expect("Failed to init schema");
    (log, temp_dir)
}

/// Helper to create a consent log whose schema was never created
pub fn create_uninitialized_log() -> (ConsentLog, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log = ConsentLog::open(temp_dir.path().join("consent.db")).expect("Failed to open log");
    (log, temp_dir)
}

/// A user with every display field set
pub fn test_user(id: i64) -> ChatUser {
    ChatUser {
        id,
        username: Some(format!("user{}", id)),
        first_name: Some("Test".to_string()),
        last_name: Some("User".to_string()),
    }
}

/// Raw row of the `consent_log` table
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedRow {
    pub id: i64,
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub action: String,
    pub consent_flag: Option<i64>,
    pub ts_utc: String,
}

/// Read every row of the log in insertion order
pub fn read_rows(log: &ConsentLog) -> Vec<LoggedRow> {
    let conn = Connection::open(log.path()).expect("Failed to open database");
    let mut stmt = conn
        .prepare(
            "SELECT id, user_id, username, first_name, last_name, action, consent_flag, ts_utc
             FROM consent_log ORDER BY id ASC",
        )
        .expect("Failed to prepare query");

    stmt.query_map([], |row| {
        Ok(LoggedRow {
            id: row.get(0)?,
            user_id: row.get(1)?,
            username: row.get(2)?,
            first_name: row.get(3)?,
            last_name: row.get(4)?,
            action: row.get(5)?,
            consent_flag: row.get(6)?,
            ts_utc: row.get(7)?,
        })
    })
    .expect("Failed to query rows")
    .collect::<std::result::Result<Vec<_>, _>>()
    .expect("Failed to read rows")
}

fn telegram_user(id: i64) -> User {
    User {
        id,
        is_bot: false,
        first_name: "Test".to_string(),
        last_name: None,
        username: Some(format!("user{}", id)),
    }
}

/// Update carrying a text message from `user_id` in their private chat
pub fn text_update(update_id: i64, user_id: i64, text: &str) -> Update {
    Update {
        update_id,
        message: Some(Message {
            message_id: 100 + update_id,
            chat: Chat { id: user_id },
            from: Some(telegram_user(user_id)),
            text: Some(text.to_string()),
        }),
        callback_query: None,
    }
}

/// Update carrying a button press on message `message_id`
pub fn callback_update(update_id: i64, user_id: i64, message_id: i64, data: &str) -> Update {
    Update {
        update_id,
        message: None,
        callback_query: Some(CallbackQuery {
            id: format!("cbq-{}", update_id),
            from: telegram_user(user_id),
            message: Some(Message {
                message_id,
                chat: Chat { id: user_id },
                from: None,
                text: None,
            }),
            data: Some(data.to_string()),
        }),
    }
}

/// Call recorded by [`RecordingTransport`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetUpdates { offset: i64 },
    Answer { id: String },
    Send { chat_id: i64, text: String, callbacks: Option<Vec<String>> },
    Edit { chat_id: i64, message_id: i64, text: String, callbacks: Option<Vec<String>> },
}

fn callbacks_of(keyboard: Option<&Keyboard>) -> Option<Vec<String>> {
    keyboard.map(|k| k.callbacks().into_iter().map(str::to_string).collect())
}

/// In-memory transport that records every call
#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<Call>>,
    batches: Mutex<VecDeque<Result<Vec<Update>>>>,
    fail_sends: Mutex<bool>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a batch to be returned by the next `get_updates`
    pub fn push_batch(&self, updates: Vec<Update>) {
        self.batches.lock().unwrap().push_back(Ok(updates));
    }

    /// Queue a failed `get_updates`
    pub fn push_fetch_error(&self, message: &str) {
        self.batches
            .lock()
            .unwrap()
            .push_back(Err(Error::Transport(message.to_string())));
    }

    /// Make every `send_message` fail
    pub fn fail_sends(&self) {
        *self.fail_sends.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Recorded calls other than `GetUpdates`
    pub fn replies(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, Call::GetUpdates { .. }))
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ChatTransport for RecordingTransport {
    async fn get_updates(&self, offset: i64, _timeout_secs: u64) -> Result<Vec<Update>> {
        self.record(Call::GetUpdates { offset });
        let next = self.batches.lock().unwrap().pop_front();
        match next {
            Some(batch) => batch,
            None => {
                // Stand-in for an empty long poll
                tokio::time::sleep(Duration::from_millis(5)).await;
                Ok(Vec::new())
            }
        }
    }

    async fn send_message(&self, chat_id: i64, text: &str, keyboard: Option<&Keyboard>) -> Result<()> {
        if *self.fail_sends.lock().unwrap() {
            return Err(Error::Transport("sendMessage failed: Forbidden".to_string()));
        }
        self.record(Call::Send {
            chat_id,
            text: text.to_string(),
            callbacks: callbacks_of(keyboard),
        });
        Ok(())
    }

    async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<()> {
        self.record(Call::Edit {
            chat_id,
            message_id,
            text: text.to_string(),
            callbacks: callbacks_of(keyboard),
        });
        Ok(())
    }

    async fn answer_callback_query(&self, callback_query_id: &str) -> Result<()> {
        self.record(Call::Answer {
            id: callback_query_id.to_string(),
        });
        Ok(())
    }
}
