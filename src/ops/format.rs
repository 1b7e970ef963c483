use crate::model::task::{Task, TaskFields, TaskStatus};
use crate::util::unicode::pad_display_width;

/// Columns reserved for the origin field
pub const ORIGIN_WIDTH: usize = 8;

/// Shown when a task has neither a title nor any body text
pub const EMPTY_TITLE: &str = "(empty)";

/// Column header printed above the rows
pub const HEADER: &str = "     id          origin    edit_at        created_at     task";

/// Words of the first body line used when the title is blank
const DERIVED_TITLE_WORDS: usize = 3;

/// `[x]`, `[p]` or `[ ]`
pub fn status_glyph(status: TaskStatus) -> String {
    format!("[{}]", status.checkbox_char())
}

/// Title to show for a task.
///
/// Uses the title if it isn't blank. Otherwise falls back to the first
/// non-blank line of the details, cut to its first three words.
pub fn derive_title(fields: &TaskFields) -> String {
    let title = fields.title.trim();
    if !title.is_empty() {
        return title.to_string();
    }

    let Some(first) = fields
        .details
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
    else {
        return EMPTY_TITLE.to_string();
    };

    let words: Vec<&str> = first.split_whitespace().collect();
    if words.len() > DERIVED_TITLE_WORDS {
        words[..DERIVED_TITLE_WORDS].join(" ")
    } else {
        first.to_string()
    }
}

/// One list row: glyph, id, origin, last edit, created, title.
pub fn render_row(task: &Task) -> String {
    let f = &task.fields;
    format!(
        "{}  {}  {}  {}  {}  {}",
        status_glyph(f.status),
        task.id,
        pad_display_width(&f.origin, ORIGIN_WIDTH),
        f.last_edit_at,
        f.created_at,
        derive_title(f)
    )
}
