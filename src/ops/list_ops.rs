use serde::Serialize;

use crate::model::task::{Task, TaskStatus};

/// Sort precedence of a status in the list: todo, then done, then pending.
pub fn status_rank(status: TaskStatus) -> u8 {
    match status {
        TaskStatus::Todo => 0,
        TaskStatus::Done => 1,
        TaskStatus::Pending => 2,
    }
}

/// Order tasks for display.
///
/// Ascending status rank first; within a rank, numeric id descending so the
/// newest task comes first. Ids that aren't numbers sort as 0. The sort is
/// stable, so tasks that tie on both keys keep their incoming order.
pub fn order(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by(|a, b| {
        status_rank(a.status())
            .cmp(&status_rank(b.status()))
            .then_with(|| b.numeric_id().cmp(&a.numeric_id()))
    });
    tasks
}

/// Index of the task with `id` in `tasks`
pub fn position_of(tasks: &[Task], id: &str) -> Option<usize> {
    tasks.iter().position(|t| t.id == id)
}

/// Per-status counts shown in the status bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub todo: usize,
    pub done: usize,
    pub pending: usize,
}

impl StatusCounts {
    pub fn tally(tasks: &[Task]) -> Self {
        let mut counts = StatusCounts::default();
        for task in tasks {
            match task.status() {
                TaskStatus::Todo => counts.todo += 1,
                TaskStatus::Done => counts.done += 1,
                TaskStatus::Pending => counts.pending += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.todo + self.done + self.pending
    }
}
