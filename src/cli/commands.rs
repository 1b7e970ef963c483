use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "stask", about = concat!("[ ] stask v", env!("CARGO_PKG_VERSION"), " - one folder per task"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Task root directory (default: current directory)
    #[arg(short = 'C', long = "dir", global = true)]
    pub dir: Option<String>,

    /// Append log output to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks in display order
    List(ListArgs),
    /// Create a task (opens the editor unless --no-edit)
    Add(AddArgs),
    /// Print a task file
    Show(IdArgs),
    /// Open a task in the editor
    Edit(IdArgs),
    /// Mark a task done
    Done(IdArgs),
    /// Mark a task todo
    Todo(IdArgs),
    /// Mark a task pending
    Pending(IdArgs),
    /// Toggle a task between done and todo
    Toggle(IdArgs),
    /// Delete a task and its folder
    Delete(IdArgs),
    /// Open a task folder in the file browser
    Open(IdArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Only show tasks with this status (todo, done, pending)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    #[arg(long)]
    pub title: Option<String>,
    /// Where the task came from
    #[arg(long)]
    pub origin: Option<String>,
    /// Free-form labels
    #[arg(long)]
    pub labels: Option<String>,
    /// Details body
    #[arg(long)]
    pub details: Option<String>,
    /// Don't open the editor
    #[arg(long)]
    pub no_edit: bool,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task id (the folder name)
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_means_tui() {
        let cli = Cli::parse_from(["stask", "-C", "/tmp/tasks"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.dir.as_deref(), Some("/tmp/tasks"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["stask", "list", "--status", "done", "--json"]);
        assert!(cli.json);
        match cli.command {
            Some(Commands::List(args)) => assert_eq!(args.status.as_deref(), Some("done")),
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn test_add_flags() {
        let cli = Cli::parse_from(["stask", "add", "--title", "Call mom", "--no-edit"]);
        match cli.command {
            Some(Commands::Add(args)) => {
                assert_eq!(args.title.as_deref(), Some("Call mom"));
                assert!(args.no_edit);
                assert!(args.origin.is_none());
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
