//! Fixed screen texts and button sets

use crate::storage::Action;

/// First screen, shown on `/start`
pub const STEP1_TEXT: &str = "This is a private access hub.\n\n\
Before continuing, please confirm:\n\
• You are 18 or older\n\
• You understand this is invite-only\n\
• No illegal content is allowed";

/// Second screen, replaces the first after confirmation
pub const STEP2_TEXT: &str = "Thank you.\n\n\
Access here is limited and not indexed.\n\
Please read carefully before proceeding.";

/// Third screen, sent right after the second
pub const STEP3_TEXT: &str = "Important note:\n\n\
This hub does NOT host adult content.\n\n\
It exists to:\n\
• Connect adults to private communities\n\
• Share member-only perks\n\
• Provide access to non-public groups\n\n\
If this is not what you’re looking for, you may leave now.";

/// Terminal text after pressing Exit
pub const EXIT_TEXT: &str = "You have exited. No access was granted.";

/// Terminal text after pressing Leave
pub const LEAVE_TEXT: &str = "You may leave now. No access was granted.";

/// Placeholder text after pressing Continue
pub const ACCESS_GRANTED_TEXT: &str = "Access granted.\n\n\
Next steps:\n\
• You will receive member options shortly.\n\
• If you do not recognize this hub, you may leave at any time.";

/// Terminal text for unrecognized callback tags
pub const SESSION_ENDED_TEXT: &str = "Session ended.";

/// A single inline button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    /// Label shown to the user
    pub label: &'static str,
    /// Callback tag sent back when pressed
    pub callback: &'static str,
}

impl Button {
    /// Button that reports `action` when pressed
    pub const fn new(label: &'static str, action: Action) -> Self {
        Self {
            label,
            callback: action.as_str(),
        }
    }
}

/// Rows of inline buttons attached to a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyboard {
    /// Button rows, top to bottom
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    /// Keyboard with one button per row
    pub fn column(buttons: &[Button]) -> Self {
        Self {
            rows: buttons.iter().map(|button| vec![*button]).collect(),
        }
    }

    /// Callback tags in display order
    pub fn callbacks(&self) -> Vec<&'static str> {
        self.rows.iter().flatten().map(|button| button.callback).collect()
    }
}

/// Buttons under the first screen
pub fn step1_keyboard() -> Keyboard {
    Keyboard::column(&[
        Button::new("✅ I confirm (18+)", Action::Confirm18),
        Button::new("❌ Exit", Action::Exit),
    ])
}

/// Buttons under the third screen
pub fn step3_keyboard() -> Keyboard {
    Keyboard::column(&[
        Button::new("Continue", Action::Continue),
        Button::new("Leave", Action::Leave),
    ])
}
