//! Displayed messages.

use chrono::Local;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Bot,
}

/// A single displayed message. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub author: Author,
    /// Message body. Markup when `rendered_as_html` is set, plain text otherwise.
    pub text: String,
    pub rendered_as_html: bool,
    /// Local wall-clock time of creation, `HH:MM`.
    pub timestamp: String,
}

impl Message {
    fn new(author: Author, text: String, rendered_as_html: bool) -> Self {
        Self {
            author,
            text,
            rendered_as_html,
            timestamp: Local::now().format("%H:%M").to_string(),
        }
    }

    /// A plain-text message typed by the user.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Author::User, text.into(), false)
    }

    /// A plain-text bot message.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Author::Bot, text.into(), false)
    }

    /// A bot reply rendered as markup.
    ///
    /// The reply is escaped first; only its line breaks become `<br>`.
    pub fn bot_reply(reply: &str) -> Self {
        Self::new(Author::Bot, escape_html(reply), true)
    }

    /// Display markup for this message.
    pub fn html(&self) -> String {
        if self.rendered_as_html {
            self.text.clone()
        } else {
            escape_html(&self.text)
        }
    }
}

/// Escape text for HTML display, turning newlines into `<br>`.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
        .replace('\n', "<br>")
}

/// Append-only list of displayed messages, in creation order.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return a reference to it.
    pub fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Count messages from one author.
    pub fn count_by(&self, author: Author) -> usize {
        self.messages.iter().filter(|m| m.author == author).count()
    }
}
