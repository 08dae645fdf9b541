//! Suggestion buttons shown under the chat.

use std::fmt;

/// A predefined suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    /// Sends its label as a chat message.
    Prompt(&'static str),
    /// Opens the reminder modal.
    SetReminder,
    /// Lists the user's reminders.
    ShowReminders,
}

/// The fixed button row, left to right.
pub const QUICK_ACTIONS: [QuickAction; 4] = [
    QuickAction::Prompt("Check symptoms"),
    QuickAction::SetReminder,
    QuickAction::ShowReminders,
    QuickAction::Prompt("Health tips"),
];

impl QuickAction {
    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Prompt(text) => text,
            Self::SetReminder => "Set a reminder",
            Self::ShowReminders => "Show reminders",
        }
    }

    /// Look up a button by its label, ignoring case.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        QUICK_ACTIONS
            .into_iter()
            .find(|action| action.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for QuickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
