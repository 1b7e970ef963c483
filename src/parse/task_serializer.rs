use crate::model::task::{TaskFields, TaskStatus};
use crate::parse::task_parser::{
    DETAILS_MARKER, KEY_CREATED_AT, KEY_LABELS, KEY_LAST_EDIT_AT, KEY_ORIGIN, KEY_STATUS,
    KEY_TITLE,
};

/// Serialize task fields to the `task.txt` format.
///
/// Always emits the six known header lines in fixed order, then `Details:`
/// and the body verbatim. Keys in `extra` are not written. Line breaks
/// inside header values are written as spaces.
pub fn serialize_task(fields: &TaskFields) -> String {
    let lines = [
        header(KEY_TITLE, &fields.title),
        header(KEY_STATUS, fields.status.as_str()),
        header(KEY_LABELS, &fields.labels),
        header(KEY_ORIGIN, &fields.origin),
        header(KEY_CREATED_AT, &fields.created_at),
        header(KEY_LAST_EDIT_AT, &fields.last_edit_at),
        DETAILS_MARKER.to_string(),
        fields.details.clone(),
    ];
    lines.join("\n")
}

/// A header value must stay on one line, so line breaks become spaces.
fn header(key: &str, value: &str) -> String {
    let value = value.replace("\r\n", " ").replace(['\r', '\n'], " ");
    format!("{}: {}", key, value)
}

/// Fields for a freshly created task, stamped with `now` (`YYYYMMDD_HHMM`).
///
/// The body is a single empty line so the file ends in `Details:\n\n`.
pub fn template(now: &str) -> TaskFields {
    TaskFields {
        status: TaskStatus::Todo,
        created_at: now.to_string(),
        last_edit_at: now.to_string(),
        details: "\n".to_string(),
        ..TaskFields::default()
    }
}
