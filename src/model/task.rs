use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Task status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Todo,
    Done,
    Pending,
}

impl TaskStatus {
    /// Lenient parse of a `Status:` value. Case and surrounding whitespace
    /// are ignored; anything unrecognised (including blank) is `Todo`.
    pub fn parse_lenient(s: &str) -> TaskStatus {
        let s = s.trim();
        if s.eq_ignore_ascii_case("done") {
            TaskStatus::Done
        } else if s.eq_ignore_ascii_case("pending") {
            TaskStatus::Pending
        } else {
            TaskStatus::Todo
        }
    }

    /// Strict parse, used for command-line arguments
    pub fn from_name(s: &str) -> Option<TaskStatus> {
        match s.trim().to_ascii_lowercase().as_str() {
            "todo" => Some(TaskStatus::Todo),
            "done" => Some(TaskStatus::Done),
            "pending" => Some(TaskStatus::Pending),
            _ => None,
        }
    }

    /// The value written after `Status:` in a task file
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::Done => "done",
            TaskStatus::Pending => "pending",
        }
    }

    /// The character shown inside the row checkbox `[ ]`
    pub fn checkbox_char(self) -> char {
        match self {
            TaskStatus::Todo => ' ',
            TaskStatus::Done => 'x',
            TaskStatus::Pending => 'p',
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything stored inside a `task.txt` file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFields {
    pub title: String,
    pub status: TaskStatus,
    pub labels: String,
    pub origin: String,
    /// `YYYYMMDD_HHMM`, kept as written
    pub created_at: String,
    /// `YYYYMMDD_HHMM`, kept as written
    pub last_edit_at: String,
    /// Body text after the `Details:` marker, verbatim
    pub details: String,
    /// Header lines with keys we don't know, in file order.
    /// Read but never written back.
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub extra: IndexMap<String, String>,
}

/// A task loaded from disk: its directory name plus the parsed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Directory name (creation Unix timestamp in seconds)
    pub id: String,
    /// Absolute path of the backing `task.txt`
    pub path: PathBuf,
    pub fields: TaskFields,
}

impl Task {
    pub fn new(id: impl Into<String>, path: PathBuf, fields: TaskFields) -> Self {
        Task {
            id: id.into(),
            path,
            fields,
        }
    }

    pub fn status(&self) -> TaskStatus {
        self.fields.status
    }

    /// The id's leading digits read as a number, so `12abc` sorts as 12.
    /// 0 when the id doesn't start with a digit.
    pub fn numeric_id(&self) -> u64 {
        let id = self.id.trim_start();
        let end = id.find(|c: char| !c.is_ascii_digit()).unwrap_or(id.len());
        match &id[..end] {
            "" => 0,
            digits => digits.parse().unwrap_or(u64::MAX),
        }
    }
}
