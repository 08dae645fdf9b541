//! Rendering targets for the chat widget.
//!
//! The widget owns all state; a [`Surface`] only mirrors it. Each method is a
//! notification that some piece of widget state changed.

use crate::widget::Message;

/// Something that displays the widget.
pub trait Surface {
    /// A message was appended to the transcript.
    fn message_appended(&mut self, message: &Message);

    /// The typing indicator was shown or hidden.
    fn typing_changed(&mut self, visible: bool);

    /// Input field and send button were enabled or disabled.
    fn controls_changed(&mut self, enabled: bool);

    /// The input field text changed programmatically.
    fn input_changed(&mut self, _text: &str) {}

    /// Keyboard focus should move back to the input field.
    fn focus_input(&mut self) {}

    /// The reminder modal was opened or closed.
    fn modal_changed(&mut self, open: bool);

    /// The reminder form fields changed programmatically.
    fn reminder_form_changed(&mut self, _text: &str, _time: &str) {}

    /// Show a blocking alert.
    fn alert(&mut self, text: &str);
}

/// A surface that ignores all notifications. Useful for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn message_appended(&mut self, _message: &Message) {}
    fn typing_changed(&mut self, _visible: bool) {}
    fn controls_changed(&mut self, _enabled: bool) {}
    fn modal_changed(&mut self, _open: bool) {}
    fn alert(&mut self, _text: &str) {}
}

/// One recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    MessageAppended(Message),
    TypingChanged(bool),
    ControlsChanged(bool),
    InputChanged(String),
    FocusInput,
    ModalChanged(bool),
    ReminderFormChanged { text: String, time: String },
    Alert(String),
}

/// A surface that keeps every notification in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events, oldest first.
    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    /// Texts of all alerts shown so far.
    pub fn alerts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SurfaceEvent::Alert(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Surface for RecordingSurface {
    fn message_appended(&mut self, message: &Message) {
        self.events
            .push(SurfaceEvent::MessageAppended(message.clone()));
    }

    fn typing_changed(&mut self, visible: bool) {
        self.events.push(SurfaceEvent::TypingChanged(visible));
    }

    fn controls_changed(&mut self, enabled: bool) {
        self.events.push(SurfaceEvent::ControlsChanged(enabled));
    }

    fn input_changed(&mut self, text: &str) {
        self.events.push(SurfaceEvent::InputChanged(text.to_string()));
    }

    fn focus_input(&mut self) {
        self.events.push(SurfaceEvent::FocusInput);
    }

    fn modal_changed(&mut self, open: bool) {
        self.events.push(SurfaceEvent::ModalChanged(open));
    }

    fn reminder_form_changed(&mut self, text: &str, time: &str) {
        self.events.push(SurfaceEvent::ReminderFormChanged {
            text: text.to_string(),
            time: time.to_string(),
        });
    }

    fn alert(&mut self, text: &str) {
        self.events.push(SurfaceEvent::Alert(text.to_string()));
    }
}
