//! Consent log entry structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marker stored in `consent_flag` for the age/terms confirmation
pub const CONSENT_GIVEN: i64 = 1;

/// Action tag recorded for each interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// User confirmed they are 18+ and accept the terms
    #[serde(rename = "confirm_18")]
    Confirm18,
    /// User exited at the first screen
    Exit,
    /// User chose to continue after the reframing screen
    Continue,
    /// User chose to leave after the reframing screen
    Leave,
}

impl Action {
    /// All actions, in screen order
    pub const ALL: [Action; 4] = [Action::Confirm18, Action::Exit, Action::Continue, Action::Leave];

    /// Tag as stored in the log and carried by buttons
    pub const fn as_str(&self) -> &'static str {
        match self {
            Action::Confirm18 => "confirm_18",
            Action::Exit => "exit",
            Action::Continue => "continue",
            Action::Leave => "leave",
        }
    }

    /// Consent flag recorded alongside this action
    pub fn consent_flag(&self) -> Option<i64> {
        match self {
            Action::Confirm18 => Some(CONSENT_GIVEN),
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirm_18" => Ok(Action::Confirm18),
            "exit" => Ok(Action::Exit),
            "continue" => Ok(Action::Continue),
            "leave" => Ok(Action::Leave),
            other => Err(format!("Unknown action tag: {}", other)),
        }
    }
}

/// The chat user an interaction came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatUser {
    /// Platform user identifier
    pub id: i64,
    /// Public username, if set
    pub username: Option<String>,
    /// First name, if known
    pub first_name: Option<String>,
    /// Last name, if set
    pub last_name: Option<String>,
}

impl ChatUser {
    /// Create a user with only an identifier
    pub fn new(id: i64) -> Self {
        Self {
            id,
            username: None,
            first_name: None,
            last_name: None,
        }
    }
}

/// One row of the consent log
///
/// Entries are immutable once written; the store never updates or deletes them.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsentLogEntry {
    /// User who pressed the button
    pub user: ChatUser,
    /// Action tag
    pub action: Action,
    /// `Some(CONSENT_GIVEN)` for the confirmation, `None` otherwise
    pub consent_flag: Option<i64>,
    /// Time of the interaction
    pub timestamp: DateTime<Utc>,
}

impl ConsentLogEntry {
    /// Create an entry stamped with the current UTC time
    pub fn new(user: ChatUser, action: Action) -> Self {
        Self::at(user, action, Utc::now())
    }

    /// Create an entry with an explicit timestamp
    pub fn at(user: ChatUser, action: Action, timestamp: DateTime<Utc>) -> Self {
        Self {
            user,
            action,
            consent_flag: action.consent_flag(),
            timestamp,
        }
    }
}
