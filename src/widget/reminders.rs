//! Reminder modal state and reminder formatting.

use chrono::{DateTime, Local, NaiveDateTime};

use crate::api::Reminder;

/// Shown instead of a listing when the user has no reminders.
pub const NO_REMINDERS: &str = "You don't have any reminders set yet.";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Offset datetimes that RFC 3339 rejects because seconds are missing.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%dT%H:%M%z"];

const DISPLAY_FORMAT: &str = "%b %-d, %Y, %-I:%M %p";

/// The reminder modal: visibility plus its two form fields.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReminderModal {
    pub(crate) open: bool,
    pub(crate) text: String,
    pub(crate) time: String,
}

impl ReminderModal {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    /// Both fields hold something other than whitespace.
    pub fn is_complete(&self) -> bool {
        is_complete(&self.text, &self.time)
    }
}

pub(crate) fn is_complete(text: &str, time: &str) -> bool {
    !text.trim().is_empty() && !time.trim().is_empty()
}

/// Format a reminder time for display in local time.
///
/// Datetimes without an offset are taken as local wall-clock time. Anything
/// unparseable is shown as-is.
pub fn format_reminder_time(time: &str) -> String {
    let time = time.trim();
    let zulu = time
        .strip_suffix(['Z', 'z'])
        .map(|rest| format!("{rest}+00:00"));
    let with_offset = zulu.as_deref().unwrap_or(time);
    let offset = DateTime::parse_from_rfc3339(with_offset).ok().or_else(|| {
        OFFSET_FORMATS
            .iter()
            .find_map(|fmt| DateTime::parse_from_str(with_offset, fmt).ok())
    });
    if let Some(dt) = offset {
        return dt.with_timezone(&Local).format(DISPLAY_FORMAT).to_string();
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(time, fmt).ok())
        .map_or_else(
            || time.to_string(),
            |dt| dt.format(DISPLAY_FORMAT).to_string(),
        )
}

/// Render a reminder listing, one line per reminder in the given order.
pub fn format_reminder_list(reminders: Option<&[Reminder]>) -> String {
    let reminders = match reminders {
        Some(list) if !list.is_empty() => list,
        _ => return NO_REMINDERS.to_string(),
    };

    let mut out = String::from("Your reminders:");
    for reminder in reminders {
        out.push_str("\n- ");
        out.push_str(&reminder.text);
        out.push_str(" at ");
        out.push_str(&format_reminder_time(&reminder.time));
        if reminder.completed {
            out.push_str(" (done)");
        }
    }
    out
}
