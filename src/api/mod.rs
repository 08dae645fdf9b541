//! Backend access for the chat widget.
//!
//! The widget talks to its backend through the [`ChatBackend`] trait so it
//! can run against the real HTTP [`Client`] or any in-memory stand-in.
//!
//! # Example
//!
//! ```rust,no_run
//! use health_chat_widget::api::{ChatBackend, ChatRequest, Client};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new("http://127.0.0.1:5000")?;
//! let reply = client
//!     .send_chat(&ChatRequest { user_id: 1, message: "Hello".into() })
//!     .await?;
//! println!("{reply}");
//! # Ok(())
//! # }
//! ```

mod client;
mod types;

pub use client::{Client, Endpoints};
pub use types::*;

use async_trait::async_trait;

use crate::error::Result;

/// The three calls the widget needs from a backend.
///
/// Any `Err` is a transport failure: the request did not produce a usable
/// 2xx response. Application-level failures travel inside `Ok` values.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Post a chat message and return the raw JSON body.
    ///
    /// The body is returned undecoded because backends disagree on where the
    /// reply text lives; see [`crate::reply::parse_reply`].
    async fn send_chat(&self, request: &ChatRequest) -> Result<serde_json::Value>;

    /// List the reminders stored for `user_id`.
    async fn list_reminders(&self, user_id: u64) -> Result<RemindersResponse>;

    /// Create a reminder.
    async fn create_reminder(&self, request: &SetReminderRequest) -> Result<SetReminderResponse>;
}
