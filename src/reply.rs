//! Chat reply parsing.
//!
//! Backends put the reply text under different keys, sometimes return an
//! array of such objects, and occasionally answer a chat request with a
//! reminder listing. [`parse_reply`] folds all of that into one tagged
//! result so rendering never has to look at raw JSON.

use serde_json::Value;
use thiserror::Error;

use crate::api::Reminder;

/// Keys checked for reply text, in priority order.
pub const REPLY_FIELDS: [&str; 5] = ["bot_reply", "response", "reply", "message", "text"];

/// A reply the widget knows how to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedReply {
    /// Plain reply text, possibly multi-line.
    Text(String),
    /// A reminder listing that came back from the chat endpoint.
    Reminders(Vec<Reminder>),
}

/// A reply body with no recognizable shape.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("unrecognized reply shape")]
pub struct Unparseable(pub Value);

/// Parse a chat response body.
pub fn parse_reply(body: &Value) -> Result<ParsedReply, Unparseable> {
    match body {
        Value::String(text) => Ok(ParsedReply::Text(text.clone())),
        Value::Object(_) => {
            if let Some(text) = reply_text(body) {
                return Ok(ParsedReply::Text(text.to_string()));
            }
            match body.get("reminders") {
                Some(Value::Array(items)) => Ok(ParsedReply::Reminders(
                    items
                        .iter()
                        .filter_map(|item| serde_json::from_value(item.clone()).ok())
                        .collect(),
                )),
                _ => Err(Unparseable(body.clone())),
            }
        }
        Value::Array(items) => {
            let lines: Vec<&str> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(text) if !text.is_empty() => Some(text.as_str()),
                    _ => reply_text(item),
                })
                .collect();
            if lines.is_empty() {
                Err(Unparseable(body.clone()))
            } else {
                Ok(ParsedReply::Text(lines.join("\n")))
            }
        }
        _ => Err(Unparseable(body.clone())),
    }
}

fn reply_text(value: &Value) -> Option<&str> {
    REPLY_FIELDS
        .iter()
        .filter_map(|key| value.get(*key)?.as_str())
        .find(|text| !text.is_empty())
}
