use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::ops::format::{self, HEADER};
use crate::tui::app::App;
use crate::util::unicode::{terminal_width, truncate_to_width};

const EMPTY_MESSAGE: &str = "No tasks found. Press `a` to add a task, or `q` to quit.";

/// Render the column header and the visible task rows
pub fn render_list_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    // First line is the column header
    let visible_height = (area.height as usize).saturating_sub(1);

    adjust_scroll(app, visible_height);

    let mut lines: Vec<Line> = Vec::with_capacity(visible_height + 1);
    lines.push(Line::from(Span::styled(
        truncate_to_width(HEADER, width),
        Style::default()
            .fg(app.theme.text_bright)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )));

    for (i, task) in app
        .tasks
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(visible_height)
    {
        let text = truncate_to_width(&format::render_row(task), width);
        let line = if i == app.cursor {
            // Pad so the selection bar spans the full width
            let pad = width.saturating_sub(terminal_width(&text));
            Line::from(Span::styled(
                format!("{}{}", text, " ".repeat(pad)),
                Style::default()
                    .fg(app.theme.selection_fg)
                    .bg(app.theme.selection_bg)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from(Span::styled(
                text,
                Style::default().fg(app.theme.status_color(task.status())).bg(bg),
            ))
        };
        lines.push(line);
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Keep the cursor row inside the visible window
fn adjust_scroll(app: &mut App, visible_height: usize) {
    if visible_height == 0 {
        app.scroll_offset = app.cursor;
        return;
    }
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if app.cursor >= app.scroll_offset + visible_height {
        app.scroll_offset = app.cursor + 1 - visible_height;
    }
    // Don't leave blank rows at the bottom after the list shrinks
    let max_offset = app.tasks.len().saturating_sub(visible_height);
    app.scroll_offset = app.scroll_offset.min(max_offset);
}

/// Boxed hint shown when the task root has no tasks
pub fn render_empty(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(Line::from(Span::styled(
        EMPTY_MESSAGE,
        Style::default().fg(app.theme.text).bg(bg),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(block);

    frame.render_widget(paragraph, area);
}
