//! Wire types for the health assistant backend.

use serde::{Deserialize, Serialize};

// =============================================================================
// Chat API Types
// =============================================================================

/// Request body for the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The (unauthenticated) user identifier.
    pub user_id: u64,
    /// The user's message, already trimmed.
    pub message: String,
}

// =============================================================================
// Reminder API Types
// =============================================================================

/// A reminder as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// What to be reminded about.
    pub text: String,
    /// When, as an ISO-8601 datetime (`2024-01-01T09:00`, seconds optional).
    pub time: String,
    /// Backend row id, when the backend sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Whether the reminder has been marked done.
    #[serde(default)]
    pub completed: bool,
}

impl Reminder {
    /// Create a pending reminder without a backend id.
    pub fn new(text: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            time: time.into(),
            id: None,
            completed: false,
        }
    }
}

/// Response from the reminder listing endpoint.
///
/// `reminders` is optional because some backends omit the key entirely
/// when the user has none.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemindersResponse {
    #[serde(default)]
    pub reminders: Option<Vec<Reminder>>,
}

/// Request body for creating a reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetReminderRequest {
    pub user_id: u64,
    pub text: String,
    pub time: String,
}

/// Response from the reminder creation endpoint.
///
/// Backends disagree on the name of the success flag, so both `success`
/// and `ok` are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetReminderResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ok: Option<bool>,
    /// Human-readable detail, mostly present on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SetReminderResponse {
    /// `success` wins over `ok`; a missing flag counts as failure.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.success.or(self.ok).unwrap_or(false)
    }
}

// =============================================================================
// Status API Types
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}
