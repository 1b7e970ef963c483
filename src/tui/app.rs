use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::launcher::{CommandEditor, Editor, Opener, SystemOpener};
use crate::io::store::TaskStore;
use crate::model::{Config, Task};
use crate::ops::list_ops::{self, StatusCounts};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Details of the selected task shown in an overlay
    Preview,
    /// Waiting for y/n before deleting a task
    ConfirmDelete { task_id: String },
}

/// Where the cursor goes once the editor returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterEdit {
    Top,
    KeepIndex,
}

/// An editor launch requested by the input handler. The event loop runs it
/// with the terminal suspended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    pub path: PathBuf,
    pub after: AfterEdit,
}

/// Main application state
pub struct App {
    pub store: TaskStore,
    pub opener: Box<dyn Opener>,
    /// Editor command, shown in the status row
    pub editor_name: String,
    pub theme: Theme,
    /// Tasks in display order
    pub tasks: Vec<Task>,
    /// Index of the selected row
    pub cursor: usize,
    /// First visible row of the list
    pub scroll_offset: usize,
    pub mode: Mode,
    /// First visible line of the preview
    pub preview_scroll: usize,
    pub show_help: bool,
    pub should_quit: bool,
    /// One-shot message for the status row, cleared on the next key
    pub message: Option<String>,
    pub pending_edit: Option<EditRequest>,
}

impl App {
    pub fn new(store: TaskStore, opener: Box<dyn Opener>, editor_name: String, theme: Theme) -> Self {
        App {
            store,
            opener,
            editor_name,
            theme,
            tasks: Vec::new(),
            cursor: 0,
            scroll_offset: 0,
            mode: Mode::Navigate,
            preview_scroll: 0,
            show_help: false,
            should_quit: false,
            message: None,
            pending_edit: None,
        }
    }

    /// Re-read the task root and re-order. The cursor index is kept and clamped.
    pub fn reload(&mut self) {
        match self.store.list_tasks() {
            Ok(tasks) => self.tasks = list_ops::order(tasks),
            Err(e) => {
                log::warn!("reload failed: {}", e);
                self.message = Some(e.to_string());
            }
        }
        self.clamp_cursor();
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.cursor)
    }

    pub fn counts(&self) -> StatusCounts {
        StatusCounts::tally(&self.tasks)
    }

    /// Move the cursor by `delta` rows, clamped to the list
    pub fn move_cursor(&mut self, delta: isize) {
        if self.tasks.is_empty() {
            return;
        }
        let max = self.tasks.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
    }

    pub fn select_index(&mut self, index: usize) {
        self.cursor = index;
        self.clamp_cursor();
    }

    /// Select the task with `id`; falls back to `fallback` (clamped).
    pub fn select_id(&mut self, id: &str, fallback: usize) {
        self.cursor = list_ops::position_of(&self.tasks, id).unwrap_or(fallback);
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.tasks.len().saturating_sub(1));
    }

    /// Report a failed operation in the status row
    pub fn report(&mut self, what: &str, err: impl std::fmt::Display) {
        log::warn!("{}: {}", what, err);
        self.message = Some(format!("{}: {}", what, err));
    }

    /// Reload after the editor returns and place the cursor
    pub fn finish_edit(&mut self, after: AfterEdit) {
        let index = match after {
            AfterEdit::Top => 0,
            AfterEdit::KeepIndex => self.cursor,
        };
        self.reload();
        self.select_index(index);
    }
}

/// Build the app for a task root and run the TUI until the user quits
pub fn run(root: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let editor = CommandEditor::resolve(config);
    let mut app = App::new(
        TaskStore::new(root),
        Box::new(SystemOpener::resolve(config)),
        editor.name().to_string(),
        Theme::from_config(&config.ui),
    );
    app.reload();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, &editor);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    editor: &dyn Editor,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        if let Some(request) = app.pending_edit.take() {
            let outcome = with_terminal_suspended(terminal, || editor.edit(&request.path))?;
            if let Err(e) = outcome {
                app.report("editor", e);
            }
            app.finish_edit(request.after);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

/// Hand the terminal to a child process for the duration of `f`.
fn with_terminal_suspended<F, T>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    f: F,
) -> io::Result<T>
where
    F: FnOnce() -> T,
{
    terminal.show_cursor()?;
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;

    let result = f();

    execute!(
        terminal.backend_mut(),
        EnterAlternateScreen,
        EnableMouseCapture
    )?;
    enable_raw_mode()?;
    terminal.clear()?;
    terminal.hide_cursor()?;
    Ok(result)
}
