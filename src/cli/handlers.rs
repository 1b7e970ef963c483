use std::error::Error;
use std::fs;
use std::path::PathBuf;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::launcher::{CommandEditor, Editor, Opener, SystemOpener};
use crate::io::store::{TASK_FILE, TaskStore};
use crate::model::{Config, Task, TaskFields, TaskStatus};
use crate::ops::format::{self, HEADER};
use crate::ops::list_ops::{self, StatusCounts};

/// Canonical task root for the `-C` flag (default: current directory)
pub fn resolve_root(dir: Option<&str>) -> Result<PathBuf, Box<dyn Error>> {
    let dir = dir.unwrap_or(".");
    let abs =
        fs::canonicalize(dir).map_err(|e| format!("cannot resolve task root '{}': {}", dir, e))?;
    if !abs.is_dir() {
        return Err(format!("task root '{}' is not a directory", abs.display()).into());
    }
    Ok(abs)
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    let root = resolve_root(cli.dir.as_deref())?;
    let config = config_io::read_config(&root)?;
    let json = cli.json;

    let Some(command) = cli.command else {
        return crate::tui::run(&root, &config);
    };

    let store = TaskStore::new(&root);
    match command {
        Commands::List(args) => cmd_list(&store, args, json),
        Commands::Add(args) => cmd_add(&store, &config, args, json),
        Commands::Show(args) => cmd_show(&store, &args.id, json),
        Commands::Edit(args) => cmd_edit(&store, &config, &args.id),
        Commands::Done(args) => cmd_set_status(&store, &args.id, TaskStatus::Done, json),
        Commands::Todo(args) => cmd_set_status(&store, &args.id, TaskStatus::Todo, json),
        Commands::Pending(args) => cmd_set_status(&store, &args.id, TaskStatus::Pending, json),
        Commands::Toggle(args) => cmd_toggle(&store, &args.id, json),
        Commands::Delete(args) => cmd_delete(&store, &args.id),
        Commands::Open(args) => cmd_open(&store, &config, &args.id),
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(store: &TaskStore, args: ListArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let status_filter = args
        .status
        .as_deref()
        .map(parse_status_arg)
        .transpose()?;

    let tasks: Vec<Task> = list_ops::order(store.list_tasks()?)
        .into_iter()
        .filter(|t| status_filter.is_none_or(|s| t.status() == s))
        .collect();

    if json {
        let out = TaskListJson {
            counts: StatusCounts::tally(&tasks),
            tasks: tasks.iter().map(task_to_json).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", HEADER);
        for task in &tasks {
            println!("{}", format::render_row(task));
        }
    }
    Ok(())
}

fn cmd_show(store: &TaskStore, id: &str, json: bool) -> Result<(), Box<dyn Error>> {
    let task = store.find_task(id)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(&task))?);
        return Ok(());
    }
    let text = fs::read_to_string(&task.path)?;
    print!("{}", text);
    if !text.ends_with('\n') {
        println!();
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(
    store: &TaskStore,
    config: &Config,
    args: AddArgs,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let mut task = store.create_task()?;

    let has_fields = args.title.is_some()
        || args.origin.is_some()
        || args.labels.is_some()
        || args.details.is_some();
    if has_fields {
        store.update_fields(&mut task, |f| apply_add_args(f, &args))?;
    }

    if !args.no_edit {
        CommandEditor::resolve(config).edit(&task.path)?;
        task = store.find_task(&task.id)?;
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(&task))?);
    } else {
        println!("{}", task.id);
    }
    Ok(())
}

fn apply_add_args(fields: &mut TaskFields, args: &AddArgs) {
    if let Some(ref title) = args.title {
        fields.title = title.clone();
    }
    if let Some(ref origin) = args.origin {
        fields.origin = origin.clone();
    }
    if let Some(ref labels) = args.labels {
        fields.labels = labels.clone();
    }
    if let Some(ref details) = args.details {
        fields.details = details.clone();
    }
}

fn cmd_edit(store: &TaskStore, config: &Config, id: &str) -> Result<(), Box<dyn Error>> {
    let task = store.find_task(id)?;
    CommandEditor::resolve(config).edit(&task.path)?;
    Ok(())
}

fn cmd_set_status(
    store: &TaskStore,
    id: &str,
    status: TaskStatus,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let mut task = store.find_task(id)?;
    store.set_status(&mut task, status)?;
    print_status_change(&task, json)
}

fn cmd_toggle(store: &TaskStore, id: &str, json: bool) -> Result<(), Box<dyn Error>> {
    let mut task = store.find_task(id)?;
    store.toggle_done(&mut task)?;
    print_status_change(&task, json)
}

fn print_status_change(task: &Task, json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&task_to_json(task))?);
    } else {
        println!("{} {}", format::status_glyph(task.status()), task.id);
    }
    Ok(())
}

/// Deleting a task that is already gone succeeds.
fn cmd_delete(store: &TaskStore, id: &str) -> Result<(), Box<dyn Error>> {
    let path = store.root().join(id).join(TASK_FILE);
    let task = Task::new(id, path, TaskFields::default());
    store.delete_task(&task)?;
    println!("deleted {}", id);
    Ok(())
}

fn cmd_open(store: &TaskStore, config: &Config, id: &str) -> Result<(), Box<dyn Error>> {
    let task = store.find_task(id)?;
    let dir = task.path.parent().unwrap_or(&task.path);
    SystemOpener::resolve(config).open_dir(dir);
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_status_arg(s: &str) -> Result<TaskStatus, String> {
    TaskStatus::from_name(s)
        .ok_or_else(|| format!("unknown status '{}' (expected todo, done or pending)", s))
}
