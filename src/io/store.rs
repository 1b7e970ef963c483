use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::io::clock::{self, Clock, SystemClock};
use crate::io::recovery;
use crate::model::task::{Task, TaskFields, TaskStatus};
use crate::parse::{parse_task, serialize_task, template};

/// Name of the file inside each task directory
pub const TASK_FILE: &str = "task.txt";

/// Error type for task store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task {id} already exists")]
    AlreadyExists { id: String },
    #[error("no task with id {id}")]
    NotFound { id: String },
    #[error("invalid task id {id:?}")]
    InvalidId { id: String },
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not delete {path}: {source}")]
    DeleteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The task root: one subdirectory per task, each holding `task.txt`.
pub struct TaskStore {
    root: PathBuf,
    clock: Box<dyn Clock>,
}

impl TaskStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_clock(root, Box::new(SystemClock))
    }

    pub fn with_clock(root: impl Into<PathBuf>, clock: Box<dyn Clock>) -> Self {
        TaskStore {
            root: root.into(),
            clock,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Current time as a task file stamp
    pub fn stamp_now(&self) -> String {
        clock::format_stamp(&self.clock.now())
    }

    /// Load every task under the root, newest id first.
    ///
    /// Subdirectories without a `task.txt` and plain files are skipped. A task
    /// file that can't be read fails the whole listing.
    pub fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let read_err = |e: std::io::Error| StoreError::ReadError {
            path: self.root.clone(),
            source: e,
        };

        let mut tasks = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            let dir = entry.path();
            if !dir.is_dir() {
                continue;
            }
            let Some(id) = entry.file_name().to_str().map(str::to_string) else {
                log::debug!("skipping non-UTF-8 directory {}", dir.display());
                continue;
            };

            let path = dir.join(TASK_FILE);
            if !path.is_file() {
                continue;
            }
            let text = read_task_file(&path)?;
            tasks.push(Task::new(id, path, parse_task(&text)));
        }

        tasks.sort_by(|a, b| b.id.cmp(&a.id));
        log::debug!("loaded {} tasks from {}", tasks.len(), self.root.display());
        Ok(tasks)
    }

    /// Load a single task by id.
    pub fn find_task(&self, id: &str) -> Result<Task, StoreError> {
        validate_id(id)?;
        let path = self.task_dir(id).join(TASK_FILE);
        let text = match read_task_file(&path) {
            Ok(text) => text,
            Err(StoreError::ReadError { source, .. }) if source.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound { id: id.to_string() });
            }
            Err(e) => return Err(e),
        };
        Ok(Task::new(id, path, parse_task(&text)))
    }

    /// Create a new task directory with a template file.
    ///
    /// The id is the current Unix time in seconds. Creating two tasks within
    /// the same second fails with `AlreadyExists`.
    pub fn create_task(&self) -> Result<Task, StoreError> {
        let now = self.clock.now();
        let id = clock::id_for(&now);
        let dir = self.task_dir(&id);

        if let Err(e) = fs::create_dir(&dir) {
            return Err(if e.kind() == ErrorKind::AlreadyExists {
                StoreError::AlreadyExists { id }
            } else {
                StoreError::WriteError {
                    path: dir,
                    source: e,
                }
            });
        }

        let task = Task::new(
            id,
            dir.join(TASK_FILE),
            template(&clock::format_stamp(&now)),
        );
        self.write_task(&task)?;
        log::debug!("created task {}", task.id);
        Ok(task)
    }

    /// Set the status, stamp `last_edit_at` and rewrite the whole file.
    pub fn set_status(&self, task: &mut Task, status: TaskStatus) -> Result<(), StoreError> {
        self.update_fields(task, |f| f.status = status)
    }

    /// `done` becomes `todo`; anything else becomes `done`.
    pub fn toggle_done(&self, task: &mut Task) -> Result<(), StoreError> {
        let next = match task.status() {
            TaskStatus::Done => TaskStatus::Todo,
            _ => TaskStatus::Done,
        };
        self.set_status(task, next)
    }

    /// `pending` becomes `todo`; anything else becomes `pending`.
    pub fn toggle_pending(&self, task: &mut Task) -> Result<(), StoreError> {
        let next = match task.status() {
            TaskStatus::Pending => TaskStatus::Todo,
            _ => TaskStatus::Pending,
        };
        self.set_status(task, next)
    }

    /// Apply `edit` to the fields, stamp `last_edit_at` and rewrite the file.
    pub fn update_fields<F>(&self, task: &mut Task, edit: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut TaskFields),
    {
        edit(&mut task.fields);
        task.fields.last_edit_at = self.stamp_now();
        self.write_task(task)
    }

    /// Remove the task's directory and everything in it.
    /// A directory that is already gone is not an error.
    pub fn delete_task(&self, task: &Task) -> Result<(), StoreError> {
        validate_id(&task.id)?;
        let dir = self.task_dir(&task.id);

        match fs::remove_dir_all(&dir) {
            Ok(()) => {
                log::debug!("deleted task {}", task.id);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::DeleteError {
                path: dir,
                source: e,
            }),
        }
    }

    fn task_dir(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }

    fn write_task(&self, task: &Task) -> Result<(), StoreError> {
        let content = serialize_task(&task.fields);
        if let Err(e) = recovery::atomic_write(&task.path, content.as_bytes()) {
            recovery::log_write_failure(&self.root, &task.path, &e, &content);
            return Err(StoreError::WriteError {
                path: task.path.clone(),
                source: e,
            });
        }
        Ok(())
    }
}

/// Read a task file. Bytes that aren't valid UTF-8 become U+FFFD rather
/// than hiding the task.
fn read_task_file(path: &Path) -> Result<String, StoreError> {
    let bytes = fs::read(path).map_err(|e| StoreError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// An id must name exactly one directory directly under the root.
fn validate_id(id: &str) -> Result<(), StoreError> {
    let bad = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(['/', '\\'])
        || Path::new(id).is_absolute();
    if bad {
        Err(StoreError::InvalidId { id: id.to_string() })
    } else {
        Ok(())
    }
}
