//! Local storage module
//!
//! This module handles the persisted consent log:
//! - `entry` - Log entry structures (user, action tag, consent flag)
//! - `consent_log` - Append-only SQLite table of user actions

pub mod consent_log;
pub mod entry;

pub use consent_log::ConsentLog;
pub use entry::{Action, ChatUser, ConsentLogEntry, CONSENT_GIVEN};
