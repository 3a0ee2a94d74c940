use paginator_domain::PageHandle;
use ratatui::style::{Color, Modifier, Style};

pub const FOCUSED_BORDER: Color = Color::Cyan;
pub const UNFOCUSED_BORDER: Color = Color::White;
pub const SELECTED_BG: Color = Color::Blue;

pub const ACTIVE_ITEM: Color = Color::Green;
pub const DISABLED_TEXT: Color = Color::DarkGray;
pub const NORMAL_TEXT: Color = Color::White;
pub const LABEL_TEXT: Color = Color::DarkGray;
pub const HIGHLIGHT_TEXT: Color = Color::Yellow;
pub const ERROR_COLOR: Color = Color::Red;

pub fn focused_border() -> Style {
    Style::default().fg(FOCUSED_BORDER)
}

pub fn unfocused_border() -> Style {
    Style::default().fg(UNFOCUSED_BORDER)
}

pub fn normal_text() -> Style {
    Style::default().fg(NORMAL_TEXT)
}

pub fn label_text() -> Style {
    Style::default().fg(LABEL_TEXT)
}

pub fn bold_highlight() -> Style {
    Style::default()
        .fg(HIGHLIGHT_TEXT)
        .add_modifier(Modifier::BOLD)
}

pub fn error_text() -> Style {
    Style::default().fg(ERROR_COLOR)
}

/// Style for a page handle: active, disabled or plain, with the focus as background.
pub fn handle_style(handle: &PageHandle, focused: bool) -> Style {
    let style = if handle.is_active() {
        Style::default()
            .fg(ACTIVE_ITEM)
            .add_modifier(Modifier::BOLD)
    } else if handle.is_disabled() {
        Style::default().fg(DISABLED_TEXT)
    } else {
        normal_text()
    };

    if focused {
        style.bg(SELECTED_BG)
    } else {
        style
    }
}
