use std::collections::HashMap;

use ratatui::style::Color;

use crate::model::{TaskStatus, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    pub border: Color,
    /// Per-status row colors
    pub status_colors: HashMap<TaskStatus, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        let mut status_colors = HashMap::new();
        status_colors.insert(TaskStatus::Todo, Color::Rgb(0xB0, 0xAA, 0xFF));
        status_colors.insert(TaskStatus::Done, Color::Rgb(0x7D, 0x78, 0xBF));
        status_colors.insert(TaskStatus::Pending, Color::Rgb(0xFF, 0xD7, 0x00));

        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            selection_bg: Color::Rgb(0x44, 0x88, 0xFF),
            selection_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
            status_bar_bg: Color::Rgb(0x3D, 0x14, 0x38),
            status_bar_fg: Color::Rgb(0xDA, 0xB8, 0xF0),
            border: Color::Rgb(0x44, 0x88, 0xFF),
            status_colors,
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                log::warn!("ignoring color {} = {:?}: expected #RRGGBB", key, value);
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "selection_bg" => theme.selection_bg = color,
                "selection_fg" => theme.selection_fg = color,
                "status_bar_bg" => theme.status_bar_bg = color,
                "status_bar_fg" => theme.status_bar_fg = color,
                "border" => theme.border = color,
                _ => log::warn!("ignoring unknown color {}", key),
            }
        }

        for (status, value) in &ui.status_colors {
            if let (Some(status), Some(color)) =
                (TaskStatus::from_name(status), parse_hex_color(value))
            {
                theme.status_colors.insert(status, color);
            }
        }

        theme
    }

    /// Get the row color for a task status
    pub fn status_color(&self, status: TaskStatus) -> Color {
        self.status_colors.get(&status).copied().unwrap_or(self.text)
    }
}
