//! Line-oriented terminal rendering.

use std::io::Write;

use tracing::warn;

use crate::surface::Surface;
use crate::widget::{Author, Message};

/// Renders the widget as plain text lines on any writer.
#[derive(Debug)]
pub struct TerminalSurface<W> {
    out: W,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}").and_then(|()| self.out.flush()) {
            warn!(name: "terminal.write.failed", error = %err, "Failed to write to terminal");
        }
    }
}

impl TerminalSurface<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn message_appended(&mut self, message: &Message) {
        let who = match message.author {
            Author::User => "you",
            Author::Bot => "bot",
        };
        let body = if message.rendered_as_html {
            html_to_plain(&message.text)
        } else {
            message.text.clone()
        };
        let mut lines = body.lines();
        let first = lines.next().unwrap_or_default();
        self.line(&format!("[{}] {who}: {first}", message.timestamp));
        for rest in lines {
            self.line(&format!("        {rest}"));
        }
    }

    fn typing_changed(&mut self, visible: bool) {
        if visible {
            self.line("bot is typing…");
        }
    }

    fn controls_changed(&mut self, _enabled: bool) {}

    fn modal_changed(&mut self, open: bool) {
        if open {
            self.line("── New reminder ──");
        }
    }

    fn alert(&mut self, text: &str) {
        self.line(&format!("! {text}"));
    }
}

/// Undo reply markup: `<br>` back to newlines and entities unescaped.
pub fn html_to_plain(html: &str) -> String {
    html.replace("<br>", "\n")
        .replace("<br/>", "\n")
        .replace("<br />", "\n")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
