use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use health_chat_widget::api::{
    ChatBackend, ChatRequest, Reminder, RemindersResponse, SetReminderRequest,
    SetReminderResponse,
};
use health_chat_widget::surface::{RecordingSurface, SurfaceEvent};
use health_chat_widget::widget::{
    Author, CHAT_ERROR, ChatWidget, NO_REMINDERS, NO_RESPONSE, QuickAction, REMINDER_INCOMPLETE,
    REMINDER_REJECTED, REMINDERS_ERROR, ReminderOutcome, SendOutcome,
};
use health_chat_widget::{Error, Result};
use serde_json::{Value, json};

/// Backend that replays canned responses and records every call.
#[derive(Default)]
struct ScriptedBackend {
    chat: Mutex<VecDeque<Result<Value>>>,
    reminders: Mutex<VecDeque<Result<RemindersResponse>>>,
    created: Mutex<VecDeque<Result<SetReminderResponse>>>,
    chat_calls: Mutex<Vec<ChatRequest>>,
    list_calls: Mutex<Vec<u64>>,
    create_calls: Mutex<Vec<SetReminderRequest>>,
}

impl ScriptedBackend {
    fn with_chat(self, response: Result<Value>) -> Self {
        self.chat.lock().unwrap().push_back(response);
        self
    }

    fn with_reminders(self, response: Result<RemindersResponse>) -> Self {
        self.reminders.lock().unwrap().push_back(response);
        self
    }

    fn with_created(self, response: Result<SetReminderResponse>) -> Self {
        self.created.lock().unwrap().push_back(response);
        self
    }

    fn call_count(&self) -> usize {
        self.chat_calls.lock().unwrap().len()
            + self.list_calls.lock().unwrap().len()
            + self.create_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn send_chat(&self, request: &ChatRequest) -> Result<Value> {
        self.chat_calls.lock().unwrap().push(request.clone());
        self.chat
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(server_error()))
    }

    async fn list_reminders(&self, user_id: u64) -> Result<RemindersResponse> {
        self.list_calls.lock().unwrap().push(user_id);
        self.reminders
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(server_error()))
    }

    async fn create_reminder(&self, request: &SetReminderRequest) -> Result<SetReminderResponse> {
        self.create_calls.lock().unwrap().push(request.clone());
        self.created
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(server_error()))
    }
}

fn server_error() -> Error {
    Error::Api {
        status: 500,
        message: "boom".to_string(),
    }
}

fn widget(backend: ScriptedBackend) -> ChatWidget<ScriptedBackend, RecordingSurface> {
    ChatWidget::new(backend, RecordingSurface::new(), 1)
}

fn created(success: bool, message: Option<&str>) -> SetReminderResponse {
    SetReminderResponse {
        success: Some(success),
        ok: None,
        message: message.map(str::to_string),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Chat
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_blank_input_is_ignored() {
    let mut widget = widget(ScriptedBackend::default());

    assert_eq!(widget.send_message("").await, SendOutcome::Ignored);
    assert_eq!(widget.send_message("   \n\t").await, SendOutcome::Ignored);

    assert!(widget.transcript().is_empty());
    assert_eq!(widget.backend().call_count(), 0);
    assert!(widget.surface().events().is_empty());
}

#[tokio::test]
async fn test_successful_reply() {
    let backend = ScriptedBackend::default().with_chat(Ok(json!({"bot_reply": "X"})));
    let mut widget = widget(backend);

    assert_eq!(widget.send_message("  Hello  ").await, SendOutcome::Replied);

    let messages = widget.transcript().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].author, Author::User);
    assert_eq!(messages[0].text, "Hello");
    assert_eq!(messages[1].author, Author::Bot);
    assert_eq!(messages[1].text, "X");
    assert!(messages[1].rendered_as_html);

    let calls = widget.backend().chat_calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![ChatRequest {
            user_id: 1,
            message: "Hello".to_string()
        }]
    );
}

#[tokio::test]
async fn test_send_lifecycle_events() {
    let backend = ScriptedBackend::default().with_chat(Ok(json!({"response": "ok"})));
    let mut widget = widget(backend);
    widget.set_input("Check symptoms");
    widget.surface_mut().clear();

    widget.submit().await;

    let events = widget.surface().events();
    assert!(matches!(events[0], SurfaceEvent::MessageAppended(ref m) if m.author == Author::User));
    assert_eq!(
        events[1..6],
        [
            SurfaceEvent::InputChanged(String::new()),
            SurfaceEvent::ControlsChanged(false),
            SurfaceEvent::TypingChanged(true),
            SurfaceEvent::ControlsChanged(true),
            SurfaceEvent::TypingChanged(false),
        ]
    );
    assert!(matches!(events[6], SurfaceEvent::MessageAppended(ref m) if m.author == Author::Bot));
    assert_eq!(events[7], SurfaceEvent::FocusInput);
    assert_eq!(events.len(), 8);

    assert!(widget.controls_enabled());
    assert!(!widget.typing_visible());
    assert_eq!(widget.input(), "");
}

#[tokio::test]
async fn test_transport_failure_renders_fixed_error() {
    let mut widget = widget(ScriptedBackend::default().with_chat(Err(server_error())));

    assert_eq!(widget.send_message("Hello").await, SendOutcome::Failed);

    assert_eq!(widget.transcript().len(), 2);
    let last = widget.transcript().last().unwrap();
    assert_eq!(last.author, Author::Bot);
    assert_eq!(last.text, CHAT_ERROR);
    assert!(widget.controls_enabled());
}

#[tokio::test]
async fn test_transcript_is_append_only() {
    let backend = ScriptedBackend::default()
        .with_chat(Ok(json!({"bot_reply": "one"})))
        .with_chat(Err(server_error()))
        .with_chat(Ok(json!({"reply": "three"})))
        .with_chat(Err(server_error()));
    let mut widget = widget(backend);

    for text in ["a", "b", "c", "d"] {
        widget.send_message(text).await;
    }

    let transcript = widget.transcript();
    assert_eq!(transcript.len(), 8);
    assert_eq!(transcript.count_by(Author::User), 4);
    assert_eq!(transcript.count_by(Author::Bot), 4);
    let texts: Vec<&str> = transcript.messages().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["a", "one", "b", CHAT_ERROR, "c", "three", "d", CHAT_ERROR]
    );
}

#[tokio::test]
async fn test_reply_shapes() {
    let backend = ScriptedBackend::default()
        .with_chat(Ok(Value::Null))
        .with_chat(Ok(json!({"status": "weird"})))
        .with_chat(Ok(json!({"reminders": []})))
        .with_chat(Ok(json!({"bot_reply": "Line 1\nLine <2>"})));
    let mut widget = widget(backend);

    for text in ["a", "b", "c", "d"] {
        assert_eq!(widget.send_message(text).await, SendOutcome::Replied);
    }

    let bot: Vec<&str> = widget
        .transcript()
        .messages()
        .iter()
        .filter(|m| m.author == Author::Bot)
        .map(|m| m.text.as_str())
        .collect();
    assert_eq!(
        bot,
        vec![
            NO_RESPONSE,
            r#"{"status":"weird"}"#,
            NO_REMINDERS,
            "Line 1<br>Line &lt;2&gt;"
        ]
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Reminders
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_set_reminder_success_clears_form_and_closes_modal() {
    let backend = ScriptedBackend::default().with_created(Ok(created(true, None)));
    let mut widget = widget(backend);
    widget.open_reminder_modal();
    widget.set_reminder_form("Take pill", "2024-01-01T09:00");

    assert_eq!(widget.submit_reminder_form().await, ReminderOutcome::Created);

    assert!(!widget.modal().is_open());
    assert_eq!(widget.modal().text(), "");
    assert_eq!(widget.modal().time(), "");
    assert_eq!(
        widget.transcript().last().unwrap().text,
        "I've set a reminder: Take pill at Jan 1, 2024, 9:00 AM"
    );
    assert_eq!(
        widget.backend().create_calls.lock().unwrap()[0],
        SetReminderRequest {
            user_id: 1,
            text: "Take pill".to_string(),
            time: "2024-01-01T09:00".to_string(),
        }
    );
    assert!(widget.surface().alerts().is_empty());
}

#[tokio::test]
async fn test_set_reminder_accepts_ok_flag() {
    let backend = ScriptedBackend::default().with_created(Ok(SetReminderResponse {
        success: None,
        ok: Some(true),
        message: None,
    }));
    let mut widget = widget(backend);

    assert_eq!(
        widget.set_reminder("Walk", "2024-03-02T18:30").await,
        ReminderOutcome::Created
    );
}

#[tokio::test]
async fn test_set_reminder_requires_both_fields() {
    let mut widget = widget(ScriptedBackend::default());
    widget.open_reminder_modal();

    assert_eq!(
        widget.set_reminder("", "2024-01-01T09:00").await,
        ReminderOutcome::Invalid
    );
    assert_eq!(
        widget.set_reminder("Take pill", " ").await,
        ReminderOutcome::Invalid
    );

    assert_eq!(
        widget.surface().alerts(),
        vec![REMINDER_INCOMPLETE, REMINDER_INCOMPLETE]
    );
    assert_eq!(widget.backend().call_count(), 0);
    assert!(widget.modal().is_open());
    assert!(widget.transcript().is_empty());
}

#[tokio::test]
async fn test_set_reminder_rejected() {
    let backend = ScriptedBackend::default()
        .with_created(Ok(created(false, Some("Time is in the past"))))
        .with_created(Ok(created(false, None)));
    let mut widget = widget(backend);
    widget.open_reminder_modal();
    widget.set_reminder_form("Take pill", "2020-01-01T09:00");

    assert_eq!(widget.submit_reminder_form().await, ReminderOutcome::Rejected);
    assert_eq!(widget.submit_reminder_form().await, ReminderOutcome::Rejected);

    assert_eq!(
        widget.surface().alerts(),
        vec!["Failed to set reminder: Time is in the past", REMINDER_REJECTED]
    );
    assert!(widget.modal().is_open());
    assert_eq!(widget.modal().text(), "Take pill");
    assert!(widget.transcript().is_empty());
}

#[tokio::test]
async fn test_set_reminder_transport_failure() {
    let mut widget = widget(ScriptedBackend::default());

    assert_eq!(
        widget.set_reminder("Take pill", "2024-01-01T09:00").await,
        ReminderOutcome::Failed
    );

    let alerts = widget.surface().alerts();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].starts_with("Error setting reminder:"));
    assert!(alerts[0].contains("boom"));
}

#[tokio::test]
async fn test_show_reminders() {
    let backend = ScriptedBackend::default()
        .with_reminders(Ok(RemindersResponse {
            reminders: Some(vec![]),
        }))
        .with_reminders(Ok(RemindersResponse::default()))
        .with_reminders(Ok(RemindersResponse {
            reminders: Some(vec![Reminder::new("Take pill", "2024-01-01T09:00")]),
        }))
        .with_reminders(Err(server_error()));
    let mut widget = widget(backend);

    for _ in 0..4 {
        widget.show_reminders().await;
    }

    let texts: Vec<&str> = widget
        .transcript()
        .messages()
        .iter()
        .map(|m| m.text.as_str())
        .collect();
    assert_eq!(texts[0], NO_REMINDERS);
    assert_eq!(texts[1], NO_REMINDERS);
    let lines: Vec<&str> = texts[2].lines().skip(1).collect();
    assert_eq!(lines, vec!["- Take pill at Jan 1, 2024, 9:00 AM"]);
    assert_eq!(texts[3], REMINDERS_ERROR);

    assert_eq!(*widget.backend().list_calls.lock().unwrap(), vec![1, 1, 1, 1]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Quick actions
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_quick_actions() {
    let backend = ScriptedBackend::default()
        .with_chat(Ok(json!({"bot_reply": "Tell me more"})))
        .with_reminders(Ok(RemindersResponse::default()));
    let mut widget = widget(backend);

    widget.quick_action(QuickAction::SetReminder).await;
    assert!(widget.modal().is_open());
    assert_eq!(widget.backend().call_count(), 0);
    widget.close_reminder_modal();

    widget.quick_action(QuickAction::ShowReminders).await;
    assert_eq!(widget.transcript().last().unwrap().text, NO_REMINDERS);

    widget
        .quick_action(QuickAction::Prompt("Check symptoms"))
        .await;
    let sent = widget.backend().chat_calls.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].message, "Check symptoms");
    assert_eq!(widget.transcript().len(), 3);
    assert_eq!(widget.input(), "");
}
