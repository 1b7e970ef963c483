use crate::model::task::{TaskFields, TaskStatus};

/// Header keys as they appear in a task file
pub const KEY_TITLE: &str = "Title";
pub const KEY_STATUS: &str = "Status";
pub const KEY_LABELS: &str = "Labels";
pub const KEY_ORIGIN: &str = "Origin";
pub const KEY_CREATED_AT: &str = "Created at";
pub const KEY_LAST_EDIT_AT: &str = "Last edit at";
pub const DETAILS_MARKER: &str = "Details:";

/// Keys written by an older file layout, honoured when the current ones are missing
const LEGACY_CREATED_AT: &str = "Created_at";
const LEGACY_LAST_EDIT_AT: &str = "Edit_at";

/// Parse the contents of a `task.txt` file.
///
/// Header lines are `Key: value` pairs. A line reading `Details:` (trailing
/// whitespace allowed) ends the header; every line after it is body text,
/// kept verbatim. Lines without a colon in the header are ignored.
///
/// This never fails: anything missing comes back empty.
pub fn parse_task(source: &str) -> TaskFields {
    let mut fields = TaskFields::default();
    let mut details: Option<Vec<&str>> = None;

    for line in split_lines(source) {
        if let Some(body) = details.as_mut() {
            body.push(line);
            continue;
        }
        if is_details_marker(line) {
            details = Some(Vec::new());
            continue;
        }
        if let Some((key, value)) = parse_header_line(line) {
            apply_header(&mut fields, key, value);
        }
    }

    if let Some(body) = details {
        fields.details = body.join("\n");
    }

    if fields.created_at.is_empty()
        && let Some(v) = fields.extra.get(LEGACY_CREATED_AT)
    {
        fields.created_at = v.clone();
    }
    if fields.last_edit_at.is_empty()
        && let Some(v) = fields.extra.get(LEGACY_LAST_EDIT_AT)
    {
        fields.last_edit_at = v.clone();
    }

    fields
}

/// Split on `\n`, dropping one trailing `\r` from each line.
///
/// Unlike `str::lines`, a trailing newline yields a final empty line, so a
/// body ending in `\n` survives a serialize/parse cycle unchanged.
fn split_lines(source: &str) -> impl Iterator<Item = &str> {
    source
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
}

fn is_details_marker(line: &str) -> bool {
    line.strip_prefix(DETAILS_MARKER)
        .is_some_and(|rest| rest.trim().is_empty())
}

/// Split `Key: value` at the first colon. Returns trimmed key and value.
fn parse_header_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

fn apply_header(fields: &mut TaskFields, key: &str, value: &str) {
    match key {
        KEY_TITLE => fields.title = value.to_string(),
        KEY_STATUS => fields.status = TaskStatus::parse_lenient(value),
        KEY_LABELS => fields.labels = value.to_string(),
        KEY_ORIGIN => fields.origin = value.to_string(),
        KEY_CREATED_AT => fields.created_at = value.to_string(),
        KEY_LAST_EDIT_AT => fields.last_edit_at = value.to_string(),
        _ => {
            fields.extra.insert(key.to_string(), value.to_string());
        }
    }
}
