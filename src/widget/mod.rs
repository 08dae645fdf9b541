//! The chat widget.
//!
//! [`ChatWidget`] owns everything the page shows: the transcript, the input
//! field, the request phase and the reminder modal. It is constructed once
//! per session and reports every state change to its [`Surface`].
//!
//! # Example
//!
//! ```rust,no_run
//! use health_chat_widget::api::Client;
//! use health_chat_widget::surface::RecordingSurface;
//! use health_chat_widget::widget::ChatWidget;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new("http://127.0.0.1:5000")?;
//! let mut widget = ChatWidget::new(client, RecordingSurface::new(), 1);
//! widget.send_message("I have a headache").await;
//! assert_eq!(widget.transcript().len(), 2);
//! # Ok(())
//! # }
//! ```

mod quick_actions;
mod reminders;
mod transcript;

pub use quick_actions::{QUICK_ACTIONS, QuickAction};
pub use reminders::{NO_REMINDERS, ReminderModal, format_reminder_list, format_reminder_time};
pub use transcript::{Author, Message, Transcript, escape_html};

use tracing::{debug, error, info, warn};

use crate::api::{ChatBackend, ChatRequest, SetReminderRequest};
use crate::reply::{ParsedReply, Unparseable, parse_reply};
use crate::surface::Surface;

/// Shown when a chat request fails for any transport reason.
pub const CHAT_ERROR: &str = "⚠️ Error connecting to server.";
/// Shown when the chat endpoint answers with `null`.
pub const NO_RESPONSE: &str = "⚠️ No response from server";
/// Shown when the reminder listing cannot be fetched.
pub const REMINDERS_ERROR: &str = "Sorry, there was an error fetching your reminders.";
/// Alert for an incomplete reminder form.
pub const REMINDER_INCOMPLETE: &str = "Please enter both reminder text and time";
/// Alert for a rejected reminder when the backend gives no reason.
pub const REMINDER_REJECTED: &str = "Failed to set reminder. Please try again.";

/// Whether a chat request is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// Controls enabled, no indicator.
    #[default]
    Idle,
    /// Controls disabled, typing indicator visible.
    Sending,
}

/// How a [`ChatWidget::send_message`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was blank; nothing happened.
    Ignored,
    /// A reply (or an unparseable body) was rendered.
    Replied,
    /// The request failed and the error message was rendered.
    Failed,
}

/// How a [`ChatWidget::set_reminder`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderOutcome {
    /// A field was blank; no request was made.
    Invalid,
    /// The backend stored the reminder.
    Created,
    /// The backend answered but refused.
    Rejected,
    /// The request itself failed.
    Failed,
}

/// A single chat widget bound to one backend and one surface.
#[derive(Debug)]
pub struct ChatWidget<B, S> {
    backend: B,
    surface: S,
    user_id: u64,
    transcript: Transcript,
    input: String,
    phase: Phase,
    modal: ReminderModal,
}

impl<B: ChatBackend, S: Surface> ChatWidget<B, S> {
    /// Create an idle widget with an empty transcript.
    pub fn new(backend: B, surface: S, user_id: u64) -> Self {
        Self {
            backend,
            surface,
            user_id,
            transcript: Transcript::new(),
            input: String::new(),
            phase: Phase::Idle,
            modal: ReminderModal::default(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Input field and send button are usable.
    pub fn controls_enabled(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn typing_visible(&self) -> bool {
        self.phase == Phase::Sending
    }

    pub fn modal(&self) -> &ReminderModal {
        &self.modal
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // ─────────────────────────────────────────────────────────────────────
    // Chat
    // ─────────────────────────────────────────────────────────────────────

    /// Replace the input field text (typing).
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.surface.input_changed(&self.input);
    }

    /// Send whatever is in the input field (Enter key / send button).
    pub async fn submit(&mut self) -> SendOutcome {
        let text = self.input.clone();
        self.send_message(&text).await
    }

    /// Send one chat message and render the outcome.
    ///
    /// Blank input is ignored. Transport failures are rendered as
    /// [`CHAT_ERROR`] and never returned to the caller.
    pub async fn send_message(&mut self, raw_input: &str) -> SendOutcome {
        let message = raw_input.trim();
        if message.is_empty() {
            return SendOutcome::Ignored;
        }
        let message = message.to_string();

        self.append(Message::user(message.as_str()));
        self.set_input("");
        self.enter(Phase::Sending);

        info!(
            name: "chat.send.started",
            user_id = self.user_id,
            chars = message.chars().count(),
            "Sending chat message"
        );

        let request = ChatRequest {
            user_id: self.user_id,
            message,
        };
        let outcome = match self.backend.send_chat(&request).await {
            Ok(body) => {
                let reply = self.render_reply(&body);
                self.enter(Phase::Idle);
                self.append(reply);
                SendOutcome::Replied
            }
            Err(err) => {
                error!(name: "chat.send.failed", error = %err, "Chat request failed");
                self.enter(Phase::Idle);
                self.append(Message::bot(CHAT_ERROR));
                SendOutcome::Failed
            }
        };
        self.surface.focus_input();
        outcome
    }

    fn render_reply(&self, body: &serde_json::Value) -> Message {
        match parse_reply(body) {
            Ok(ParsedReply::Text(text)) => {
                debug!(name: "chat.reply.parsed", chars = text.chars().count(), "Reply parsed");
                Message::bot_reply(&text)
            }
            Ok(ParsedReply::Reminders(list)) => {
                debug!(
                    name: "chat.reply.reminders",
                    count = list.len(),
                    "Chat endpoint returned a reminder listing"
                );
                Message::bot(format_reminder_list(Some(list.as_slice())))
            }
            Err(Unparseable(serde_json::Value::Null)) => {
                warn!(name: "chat.reply.empty", "Chat endpoint returned null");
                Message::bot(NO_RESPONSE)
            }
            Err(Unparseable(raw)) => {
                warn!(name: "chat.reply.unparseable", body = %raw, "Unrecognized reply shape");
                Message::bot(raw.to_string())
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Reminders
    // ─────────────────────────────────────────────────────────────────────

    /// Fetch and render the user's reminders as one bot message.
    pub async fn show_reminders(&mut self) {
        match self.backend.list_reminders(self.user_id).await {
            Ok(resp) => {
                let count = resp.reminders.as_ref().map_or(0, Vec::len);
                info!(name: "reminders.fetched", count, "Reminders fetched");
                self.append(Message::bot(format_reminder_list(
                    resp.reminders.as_deref(),
                )));
            }
            Err(err) => {
                error!(name: "reminders.fetch.failed", error = %err, "Reminder fetch failed");
                self.append(Message::bot(REMINDERS_ERROR));
            }
        }
    }

    pub fn open_reminder_modal(&mut self) {
        self.set_modal_open(true);
    }

    /// Hide the modal. Form contents are kept.
    pub fn close_reminder_modal(&mut self) {
        self.set_modal_open(false);
    }

    /// Fill the modal's form fields (typing).
    pub fn set_reminder_form(&mut self, text: impl Into<String>, time: impl Into<String>) {
        self.modal.text = text.into();
        self.modal.time = time.into();
        self.surface
            .reminder_form_changed(&self.modal.text, &self.modal.time);
    }

    /// Submit the modal with its current form fields.
    pub async fn submit_reminder_form(&mut self) -> ReminderOutcome {
        let text = self.modal.text.clone();
        let time = self.modal.time.clone();
        self.set_reminder(&text, &time).await
    }

    /// Create a reminder.
    ///
    /// Both fields must be non-blank; the time is not otherwise validated.
    /// On success the form is cleared and the modal closed. Failures are
    /// reported through [`Surface::alert`].
    pub async fn set_reminder(&mut self, text: &str, time: &str) -> ReminderOutcome {
        if !reminders::is_complete(text, time) {
            self.surface.alert(REMINDER_INCOMPLETE);
            return ReminderOutcome::Invalid;
        }

        let request = SetReminderRequest {
            user_id: self.user_id,
            text: text.trim().to_string(),
            time: time.trim().to_string(),
        };
        match self.backend.create_reminder(&request).await {
            Ok(resp) if resp.succeeded() => {
                info!(name: "reminder.set", time = %request.time, "Reminder created");
                self.append(Message::bot(format!(
                    "I've set a reminder: {} at {}",
                    request.text,
                    format_reminder_time(&request.time)
                )));
                self.set_reminder_form("", "");
                self.close_reminder_modal();
                ReminderOutcome::Created
            }
            Ok(resp) => {
                warn!(
                    name: "reminder.set.rejected",
                    reason = resp.message.as_deref().unwrap_or_default(),
                    "Backend rejected reminder"
                );
                let alert = match resp.message.as_deref() {
                    Some(msg) if !msg.trim().is_empty() => {
                        format!("Failed to set reminder: {msg}")
                    }
                    _ => REMINDER_REJECTED.to_string(),
                };
                self.surface.alert(&alert);
                ReminderOutcome::Rejected
            }
            Err(err) => {
                error!(name: "reminder.set.failed", error = %err, "Reminder request failed");
                self.surface.alert(&format!("Error setting reminder: {err}"));
                ReminderOutcome::Failed
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Quick actions
    // ─────────────────────────────────────────────────────────────────────

    /// Run a suggestion button.
    pub async fn quick_action(&mut self, action: QuickAction) {
        debug!(name: "quick_action", action = action.label(), "Quick action selected");
        match action {
            QuickAction::SetReminder => self.open_reminder_modal(),
            QuickAction::ShowReminders => self.show_reminders().await,
            QuickAction::Prompt(text) => {
                self.set_input(text);
                self.submit().await;
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Internal helpers
    // ─────────────────────────────────────────────────────────────────────

    fn append(&mut self, message: Message) {
        let message = self.transcript.push(message);
        self.surface.message_appended(message);
    }

    fn enter(&mut self, phase: Phase) {
        if self.phase == phase {
            return;
        }
        self.phase = phase;
        let sending = phase == Phase::Sending;
        self.surface.controls_changed(!sending);
        self.surface.typing_changed(sending);
    }

    fn set_modal_open(&mut self, open: bool) {
        if self.modal.open != open {
            self.modal.open = open;
            self.surface.modal_changed(open);
        }
    }
}
