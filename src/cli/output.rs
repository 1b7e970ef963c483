use serde::Serialize;

use crate::model::task::{Task, TaskStatus};
use crate::ops::format::derive_title;
use crate::ops::list_ops::StatusCounts;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: String,
    pub title: String,
    /// Title as shown in the list (falls back to the details)
    pub display_title: String,
    pub status: TaskStatus,
    pub labels: String,
    pub origin: String,
    pub created_at: String,
    pub last_edit_at: String,
    pub details: String,
    pub path: String,
}

#[derive(Serialize)]
pub struct TaskListJson {
    pub counts: StatusCounts,
    pub tasks: Vec<TaskJson>,
}

pub fn task_to_json(task: &Task) -> TaskJson {
    let f = &task.fields;
    TaskJson {
        id: task.id.clone(),
        title: f.title.clone(),
        display_title: derive_title(f),
        status: f.status,
        labels: f.labels.clone(),
        origin: f.origin.clone(),
        created_at: f.created_at.clone(),
        last_edit_at: f.last_edit_at.clone(),
        details: f.details.clone(),
        path: task.path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::TaskFields;
    use std::path::PathBuf;

    #[test]
    fn test_task_json_shape() {
        let task = Task::new(
            "1700000000",
            PathBuf::from("/tasks/1700000000/task.txt"),
            TaskFields {
                status: TaskStatus::Pending,
                details: "ask Bob about the invoice\n".into(),
                ..TaskFields::default()
            },
        );
        let value = serde_json::to_value(task_to_json(&task)).unwrap();
        assert_eq!(value["id"], "1700000000");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["title"], "");
        assert_eq!(value["display_title"], "ask Bob about");
        assert_eq!(value["path"], "/tasks/1700000000/task.txt");
    }
}
