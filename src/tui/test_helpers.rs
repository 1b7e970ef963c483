use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::io::launcher::Opener;
use crate::io::store::{TASK_FILE, TaskStore};
use crate::tui::app::App;
use crate::tui::theme::Theme;

pub const TERM_W: u16 = 100;
pub const TERM_H: u16 = 12;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Opener that does nothing
pub struct NullOpener;

impl Opener for NullOpener {
    fn open_dir(&self, _dir: &Path) {}
}

/// Opener that remembers what it was asked to open
pub struct RecordingOpener(pub Rc<RefCell<Vec<PathBuf>>>);

impl Opener for RecordingOpener {
    fn open_dir(&self, dir: &Path) {
        self.0.borrow_mut().push(dir.to_path_buf());
    }
}

/// Swap in a [`RecordingOpener`] and return its log
pub fn recording_opener(app: &mut App) -> Rc<RefCell<Vec<PathBuf>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    app.opener = Box::new(RecordingOpener(Rc::clone(&log)));
    log
}

/// A task file with the given title and status and fixed stamps
pub fn task_file(title: &str, status: &str) -> String {
    format!(
        "Title: {}\nStatus: {}\nLabels: \nOrigin: \nCreated at: 20250101_0900\nLast edit at: 20250102_1000\nDetails:\n",
        title, status
    )
}

/// A temp task root holding `(id, file content)` tasks, and an app loaded from it.
/// Keep the `TempDir` alive for the duration of the test.
pub fn app_with_tasks<S: AsRef<str>>(tasks: &[(&str, S)]) -> (TempDir, App) {
    let tmp = TempDir::new().unwrap();
    for (id, content) in tasks {
        let dir = tmp.path().join(id);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(TASK_FILE), content.as_ref()).unwrap();
    }
    let mut app = App::new(
        TaskStore::new(tmp.path()),
        Box::new(NullOpener),
        "vim".to_string(),
        Theme::default(),
    );
    app.reload();
    (tmp, app)
}

/// An app over an empty temp task root
pub fn empty_app() -> (TempDir, App) {
    app_with_tasks::<&str>(&[])
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}
