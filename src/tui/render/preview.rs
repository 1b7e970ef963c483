use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::ops::format::derive_title;
use crate::tui::app::App;
use crate::util::unicode::truncate_to_width;

use super::centered_rect;

/// Render the details of the selected task in a centered box
pub fn render_preview(frame: &mut Frame, app: &App, area: Rect) {
    let Some(task) = app.selected_task() else {
        return;
    };
    let bg = app.theme.background;

    let popup_area = centered_rect(80, 70, area);
    frame.render_widget(Clear, popup_area);

    let title = format!(" {} ", derive_title(&task.fields));
    let block = Block::default()
        .title(Span::styled(
            truncate_to_width(&title, popup_area.width.saturating_sub(2) as usize),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border).bg(bg))
        .style(Style::default().bg(bg));

    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let lines: Vec<Line> = task
        .fields
        .details
        .lines()
        .skip(app.preview_scroll)
        .map(|l| Line::from(Span::styled(l.to_string(), text_style)))
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, popup_area);
}
