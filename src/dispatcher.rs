//! Screen dispatcher
//!
//! Maps the start command and button callbacks to fixed replies, writing one
//! consent log entry per recognized button press before replying.

use crate::{
    screens::{
        self, Keyboard, ACCESS_GRANTED_TEXT, EXIT_TEXT, LEAVE_TEXT, SESSION_ENDED_TEXT,
        STEP1_TEXT, STEP2_TEXT, STEP3_TEXT,
    },
    storage::{Action, ChatUser, ConsentLog, ConsentLogEntry},
    Result,
};
use tracing::{debug, info};

/// A reply to deliver through the chat transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Replace the text (and buttons) of the message that carried the pressed button
    Edit {
        /// New message text
        text: &'static str,
        /// Buttons to attach, if any
        keyboard: Option<Keyboard>,
    },
    /// Send a new message to the same chat
    Send {
        /// Message text
        text: &'static str,
        /// Buttons to attach, if any
        keyboard: Option<Keyboard>,
    },
}

impl Reply {
    /// Text carried by this reply
    pub fn text(&self) -> &'static str {
        match self {
            Reply::Edit { text, .. } | Reply::Send { text, .. } => text,
        }
    }

    /// Buttons carried by this reply
    pub fn keyboard(&self) -> Option<&Keyboard> {
        match self {
            Reply::Edit { keyboard, .. } | Reply::Send { keyboard, .. } => keyboard.as_ref(),
        }
    }
}

/// Replies for a recognized action
pub fn replies_for(action: Action) -> Vec<Reply> {
    match action {
        Action::Confirm18 => vec![
            Reply::Edit {
                text: STEP2_TEXT,
                keyboard: None,
            },
            Reply::Send {
                text: STEP3_TEXT,
                keyboard: Some(screens::step3_keyboard()),
            },
        ],
        Action::Exit => vec![Reply::Edit {
            text: EXIT_TEXT,
            keyboard: None,
        }],
        Action::Leave => vec![Reply::Edit {
            text: LEAVE_TEXT,
            keyboard: None,
        }],
        // Placeholder until real access-granting exists
        Action::Continue => vec![Reply::Edit {
            text: ACCESS_GRANTED_TEXT,
            keyboard: None,
        }],
    }
}

/// Routes user events to the consent log and the fixed screens
#[derive(Debug, Clone)]
pub struct Dispatcher {
    log: ConsentLog,
}

impl Dispatcher {
    /// Create a dispatcher writing to `log`
    pub fn new(log: ConsentLog) -> Self {
        Self { log }
    }

    /// Consent log this dispatcher writes to
    pub fn log(&self) -> &ConsentLog {
        &self.log
    }

    /// Replies for the start command
    ///
    /// Always the first screen, whatever the user did before.
    pub fn start(&self) -> Vec<Reply> {
        vec![Reply::Send {
            text: STEP1_TEXT,
            keyboard: Some(screens::step1_keyboard()),
        }]
    }

    /// Handle a button press carrying `data`
    ///
    /// Recognized tags are logged before any reply is produced, so a failed
    /// write yields an error and no replies. Unknown tags are not logged.
    pub fn on_callback(&self, user: &ChatUser, data: &str) -> Result<Vec<Reply>> {
        let action = match data.parse::<Action>() {
            Ok(action) => action,
            Err(_) => {
                debug!("Unrecognized callback '{}' from user {}", data, user.id);
                return Ok(vec![Reply::Edit {
                    text: SESSION_ENDED_TEXT,
                    keyboard: None,
                }]);
            }
        };

        self.log.append(&ConsentLogEntry::new(user.clone(), action))?;
        info!("Logged action {} for user {}", action, user.id);

        Ok(replies_for(action))
    }
}
