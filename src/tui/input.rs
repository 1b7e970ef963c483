use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use super::app::{AfterEdit, App, EditRequest, Mode};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.message = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Help overlay: any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.mode.clone() {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Preview => handle_preview(app, key),
        Mode::ConfirmDelete { task_id } => handle_confirm_delete(app, key, &task_id),
    }
}

/// Mouse wheel moves the selection, or scrolls an open preview
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let delta = match mouse.kind {
        MouseEventKind::ScrollUp => -1,
        MouseEventKind::ScrollDown => 1,
        _ => return,
    };
    match app.mode {
        Mode::Navigate if !app.show_help => app.move_cursor(delta),
        Mode::Preview => scroll_preview(app, delta),
        _ => {}
    }
}

fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1),
        KeyCode::Char('g') | KeyCode::Home => app.select_index(0),
        KeyCode::Char('G') | KeyCode::End => app.select_index(app.tasks.len()),

        KeyCode::Char('l') | KeyCode::Char('r') => app.reload(),

        KeyCode::Char('a') => add_task(app),
        KeyCode::Char('e') => edit_selected(app),
        KeyCode::Char('x') => toggle_done(app),
        KeyCode::Char('p') => toggle_pending(app),
        KeyCode::Char(' ') => open_preview(app),
        KeyCode::Enter => open_folder(app),
        KeyCode::Char('d') => {
            if let Some(task) = app.selected_task() {
                app.mode = Mode::ConfirmDelete {
                    task_id: task.id.clone(),
                };
            }
        }
        _ => {}
    }
}

fn handle_preview(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => {
            app.mode = Mode::Navigate;
            app.preview_scroll = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => scroll_preview(app, 1),
        KeyCode::Char('k') | KeyCode::Up => scroll_preview(app, -1),
        KeyCode::Char('g') | KeyCode::Home => app.preview_scroll = 0,
        _ => {}
    }
}

fn handle_confirm_delete(app: &mut App, key: KeyEvent, task_id: &str) {
    match key.code {
        KeyCode::Char('y') => {
            app.mode = Mode::Navigate;
            delete_task(app, task_id);
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

fn add_task(app: &mut App) {
    match app.store.create_task() {
        Ok(task) => {
            app.pending_edit = Some(EditRequest {
                path: task.path,
                after: AfterEdit::Top,
            });
        }
        Err(e) => app.report("could not create task", e),
    }
}

fn edit_selected(app: &mut App) {
    if let Some(task) = app.selected_task() {
        app.pending_edit = Some(EditRequest {
            path: task.path.clone(),
            after: AfterEdit::KeepIndex,
        });
    }
}

fn toggle_done(app: &mut App) {
    let index = app.cursor;
    let Some(mut task) = app.selected_task().cloned() else {
        return;
    };
    if let Err(e) = app.store.toggle_done(&mut task) {
        app.report("could not update task", e);
        return;
    }
    app.reload();
    app.select_index(index);
}

/// Flip pending/todo and keep the same task selected after re-ordering
fn toggle_pending(app: &mut App) {
    let index = app.cursor;
    let Some(mut task) = app.selected_task().cloned() else {
        return;
    };
    if let Err(e) = app.store.toggle_pending(&mut task) {
        app.report("could not update task", e);
        return;
    }
    app.reload();
    app.select_id(&task.id, index);
}

fn delete_task(app: &mut App, task_id: &str) {
    let Some(task) = app.tasks.iter().find(|t| t.id == task_id).cloned() else {
        return;
    };
    if let Err(e) = app.store.delete_task(&task) {
        app.report("could not delete task", e);
        return;
    }
    let index = app.cursor.saturating_sub(1);
    app.reload();
    app.select_index(index);
}

fn open_preview(app: &mut App) {
    if app.selected_task().is_some() {
        app.mode = Mode::Preview;
        app.preview_scroll = 0;
    }
}

fn scroll_preview(app: &mut App, delta: isize) {
    let lines = app
        .selected_task()
        .map_or(0, |t| t.fields.details.lines().count());
    app.preview_scroll = app
        .preview_scroll
        .saturating_add_signed(delta)
        .min(lines.saturating_sub(1));
}

fn open_folder(app: &mut App) {
    if let Some(dir) = app.selected_task().and_then(|t| t.path.parent()) {
        app.opener.open_dir(dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskStatus;
    use crate::tui::test_helpers::{app_with_tasks, empty_app, key, task_file};
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn selected_id(app: &App) -> &str {
        app.selected_task().map(|t| t.id.as_str()).unwrap_or("")
    }

    #[test]
    fn test_quit_keys() {
        let (_tmp, mut app) = empty_app();
        handle_key(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);

        let (_tmp, mut app) = empty_app();
        app.mode = Mode::Preview;
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_navigation() {
        let (_tmp, mut app) = app_with_tasks(&[
            ("1", &task_file("a", "todo")),
            ("2", &task_file("b", "todo")),
            ("3", &task_file("c", "todo")),
        ]);
        handle_key(&mut app, key(KeyCode::Char('j')));
        handle_key(&mut app, key(KeyCode::Down));
        handle_key(&mut app, key(KeyCode::Down));
        assert_eq!(app.cursor, 2);
        handle_key(&mut app, key(KeyCode::Char('k')));
        assert_eq!(app.cursor, 1);
        handle_key(&mut app, key(KeyCode::Char('G')));
        assert_eq!(app.cursor, 2);
        handle_key(&mut app, key(KeyCode::Char('g')));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_mouse_wheel_moves_selection() {
        let (_tmp, mut app) = app_with_tasks(&[
            ("1", &task_file("a", "todo")),
            ("2", &task_file("b", "todo")),
        ]);
        let wheel = |kind| MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(&mut app, wheel(MouseEventKind::ScrollDown));
        handle_mouse(&mut app, wheel(MouseEventKind::ScrollDown));
        assert_eq!(app.cursor, 1);
        handle_mouse(&mut app, wheel(MouseEventKind::ScrollUp));
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_toggle_done_keeps_index() {
        let (_tmp, mut app) = app_with_tasks(&[
            ("1", &task_file("a", "todo")),
            ("2", &task_file("b", "todo")),
        ]);
        // "2" is first (newest todo)
        handle_key(&mut app, key(KeyCode::Char('x')));
        assert_eq!(app.store.find_task("2").unwrap().status(), TaskStatus::Done);
        // Done sinks below todo; the cursor stays on row 0, now task "1"
        assert_eq!(app.cursor, 0);
        assert_eq!(selected_id(&app), "1");
    }

    #[test]
    fn test_toggle_pending_follows_task() {
        let (_tmp, mut app) = app_with_tasks(&[
            ("1", &task_file("a", "todo")),
            ("2", &task_file("b", "todo")),
            ("3", &task_file("c", "done")),
        ]);
        assert_eq!(selected_id(&app), "2");
        handle_key(&mut app, key(KeyCode::Char('p')));
        assert_eq!(selected_id(&app), "2");
        assert_eq!(app.cursor, 2);
        assert_eq!(app.tasks[2].status(), TaskStatus::Pending);

        handle_key(&mut app, key(KeyCode::Char('p')));
        assert_eq!(selected_id(&app), "2");
        assert_eq!(app.selected_task().unwrap().status(), TaskStatus::Todo);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (tmp, mut app) = app_with_tasks(&[
            ("1", &task_file("a", "todo")),
            ("2", &task_file("b", "todo")),
        ]);
        app.cursor = 1;
        handle_key(&mut app, key(KeyCode::Char('d')));
        assert_eq!(
            app.mode,
            Mode::ConfirmDelete {
                task_id: "1".into()
            }
        );
        handle_key(&mut app, key(KeyCode::Char('n')));
        assert_eq!(app.mode, Mode::Navigate);
        assert!(tmp.path().join("1").exists());

        handle_key(&mut app, key(KeyCode::Char('d')));
        handle_key(&mut app, key(KeyCode::Char('y')));
        assert!(!tmp.path().join("1").exists());
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_delete_on_empty_list_does_nothing() {
        let (_tmp, mut app) = empty_app();
        handle_key(&mut app, key(KeyCode::Char('d')));
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn test_preview_toggle_and_scroll() {
        let (_tmp, mut app) = app_with_tasks(&[(
            "1",
            "Title: t\nDetails:\none\ntwo\nthree",
        )]);
        handle_key(&mut app, key(KeyCode::Char(' ')));
        assert_eq!(app.mode, Mode::Preview);

        handle_key(&mut app, key(KeyCode::Char('j')));
        handle_key(&mut app, key(KeyCode::Char('j')));
        handle_key(&mut app, key(KeyCode::Char('j')));
        assert_eq!(app.preview_scroll, 2);

        handle_key(&mut app, key(KeyCode::Char(' ')));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.preview_scroll, 0);
    }

    #[test]
    fn test_add_requests_editor() {
        let (_tmp, mut app) = empty_app();
        handle_key(&mut app, key(KeyCode::Char('a')));
        let request = app.pending_edit.clone().unwrap();
        assert_eq!(request.after, AfterEdit::Top);
        assert!(request.path.exists());
        assert!(request.path.ends_with("task.txt"));
    }

    #[test]
    fn test_edit_requests_editor_for_selected() {
        let (_tmp, mut app) = app_with_tasks(&[("7", &task_file("a", "todo"))]);
        handle_key(&mut app, key(KeyCode::Char('e')));
        let request = app.pending_edit.clone().unwrap();
        assert_eq!(request.path, app.tasks[0].path);
        assert_eq!(request.after, AfterEdit::KeepIndex);
    }

    #[test]
    fn test_enter_opens_task_folder() {
        let (tmp, mut app) = app_with_tasks(&[("7", &task_file("a", "todo"))]);
        let opened = crate::tui::test_helpers::recording_opener(&mut app);
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(opened.borrow().as_slice(), &[tmp.path().join("7")]);
    }

    #[test]
    fn test_help_overlay_closes_on_any_key() {
        let (_tmp, mut app) = app_with_tasks(&[("1", &task_file("a", "todo"))]);
        handle_key(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key(&mut app, key(KeyCode::Char('x')));
        assert!(!app.show_help);
        // The key that closed help did not toggle the task
        assert_eq!(app.tasks[0].status(), TaskStatus::Todo);
    }

    #[test]
    fn test_message_cleared_on_key() {
        let (_tmp, mut app) = empty_app();
        app.message = Some("boom".into());
        handle_key(&mut app, key(KeyCode::Char('j')));
        assert!(app.message.is_none());
    }
}
