use ratatui::{
    style::{Color, Style},
    widgets::{Block, BorderType, Borders},
};
use tui_textarea::TextArea;

// Single-line input with a rounded border titled `title`.
pub fn new_textarea(title: impl Into<String>, placeholder: impl Into<String>) -> TextArea<'static> {
    let mut textarea = TextArea::default();
    textarea.set_placeholder_text(placeholder);
    textarea.set_cursor_line_style(Style::default());
    textarea.set_placeholder_style(Style::default().fg(Color::DarkGray));
    textarea.set_selection_style(Style::new().bg(Color::LightCyan));
    set_title(&mut textarea, title, false);
    textarea
}

pub fn set_title(textarea: &mut TextArea<'static>, title: impl Into<String>, focused: bool) {
    let color = if focused { Color::Yellow } else { Color::DarkGray };
    textarea.set_block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .title(title.into()),
    );
    let cursor = if focused {
        Style::default().bg(Color::White)
    } else {
        Style::default()
    };
    textarea.set_cursor_style(cursor);
}

pub fn text_of(textarea: &TextArea) -> String {
    textarea.lines().join("")
}
