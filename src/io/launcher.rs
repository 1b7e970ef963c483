use std::env;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::model::config::Config;

/// Opens a file for editing and returns once the user is done with it.
pub trait Editor {
    fn edit(&self, path: &Path) -> io::Result<()>;

    /// Command shown in the status bar
    fn name(&self) -> &str;
}

/// Opens a directory in a file browser without waiting for it.
pub trait Opener {
    fn open_dir(&self, dir: &Path);
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

/// Runs an editor command line with the file path appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEditor {
    command: String,
}

impl CommandEditor {
    pub fn new(command: impl Into<String>) -> Self {
        CommandEditor {
            command: command.into(),
        }
    }

    /// Pick the editor: config, then `$EDITOR`, then `$VISUAL`, then the
    /// platform default.
    pub fn resolve(config: &Config) -> Self {
        Self::from_sources(
            config.editor.as_deref(),
            env::var("EDITOR").ok(),
            env::var("VISUAL").ok(),
        )
    }

    fn from_sources(configured: Option<&str>, editor: Option<String>, visual: Option<String>) -> Self {
        let command = configured
            .map(str::to_string)
            .into_iter()
            .chain(editor)
            .chain(visual)
            .find(|c| !c.trim().is_empty())
            .unwrap_or_else(|| default_editor().to_string());
        Self::new(command)
    }
}

fn default_editor() -> &'static str {
    if cfg!(windows) { "notepad" } else { "vim" }
}

impl Editor for CommandEditor {
    fn edit(&self, path: &Path) -> io::Result<()> {
        let mut parts = shell_words::split(&self.command).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("cannot parse editor command {:?}: {}", self.command, e),
            )
        })?;
        if parts.is_empty() {
            parts.push(self.command.clone());
        }
        let program = parts.remove(0);

        log::debug!("running editor {} on {}", program, path.display());
        let status = Command::new(&program).args(&parts).arg(path).status()?;
        if !status.success() {
            return Err(io::Error::other(format!(
                "editor {} exited with {}",
                program, status
            )));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.command
    }
}

// ---------------------------------------------------------------------------
// Opener
// ---------------------------------------------------------------------------

/// Spawns the platform file browser (or a configured program) on a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemOpener {
    program: String,
}

impl SystemOpener {
    pub fn resolve(config: &Config) -> Self {
        let program = config
            .opener
            .clone()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| default_opener().to_string());
        SystemOpener { program }
    }
}

fn default_opener() -> &'static str {
    if cfg!(windows) {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

impl Opener for SystemOpener {
    fn open_dir(&self, dir: &Path) {
        let result = Command::new(&self.program)
            .arg(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        if let Err(e) = result {
            log::warn!("could not run {} on {}: {}", self.program, dir.display(), e);
        }
    }
}
