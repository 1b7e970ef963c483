use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::truncate_to_width;

/// Counters, task root and editor
pub fn status_text(app: &App) -> String {
    let counts = app.counts();
    format!(
        "todo:{} done:{} pending:{} `{}` {}",
        counts.todo,
        counts.done,
        counts.pending,
        app.store.root().display(),
        app.editor_name
    )
}

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;
    let bar = Style::default()
        .fg(app.theme.status_bar_fg)
        .bg(app.theme.status_bar_bg);

    let line = match (&app.mode, &app.message) {
        (Mode::ConfirmDelete { task_id }, _) => Line::from(Span::styled(
            truncate_to_width(&format!("Delete task {}? (y/n)", task_id), width),
            bar.fg(app.theme.highlight).add_modifier(Modifier::BOLD),
        )),
        (_, Some(message)) => Line::from(Span::styled(
            truncate_to_width(message, width),
            bar.fg(app.theme.highlight),
        )),
        _ => Line::from(Span::styled(
            truncate_to_width(&status_text(app), width),
            bar,
        )),
    };

    let paragraph = Paragraph::new(line).style(bar);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_helpers::*;

    #[test]
    fn test_counts_root_and_editor() {
        let (tmp, app) = app_with_tasks(&[
            ("1", task_file("a", "todo")),
            ("2", task_file("b", "todo")),
            ("3", task_file("c", "pending")),
            ("4", task_file("d", "done")),
        ]);
        let expected = format!(
            "todo:2 done:1 pending:1 `{}` vim",
            tmp.path().display()
        );
        assert_eq!(status_text(&app), expected);
    }

    #[test]
    fn test_message_replaces_counts() {
        let (_tmp, mut app) = empty_app();
        app.message = Some("could not update task: boom".into());
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area)
        });
        assert_eq!(output, "could not update task: boom");
    }

    #[test]
    fn test_delete_prompt() {
        let (_tmp, mut app) = app_with_tasks(&[("42", task_file("a", "todo"))]);
        app.mode = Mode::ConfirmDelete {
            task_id: "42".into(),
        };
        let output = render_to_string(TERM_W, 1, |frame, area| {
            render_status_row(frame, &app, area)
        });
        assert_eq!(output, "Delete task 42? (y/n)");
    }
}
