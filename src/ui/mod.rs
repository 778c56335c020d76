// ui/mod.rs

pub mod admin;
pub mod constants;
pub mod dashboard;
pub mod textarea;
pub mod token_input;

pub use admin::Admin;
pub use dashboard::Dashboard;
pub use token_input::TokenInput;

use crossterm::event::KeyEvent;
use enum_dispatch::enum_dispatch;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Paragraph, Widget},
};

use crate::{app::Action, context::Context, message::MessageType};
use constants::{MIN_HEIGHT, MIN_WIDTH};

#[enum_dispatch]
pub trait Component {
    fn on_key(&mut self, key: KeyEvent, context: &Context) -> Option<Action>;
    fn render(&mut self, area: Rect, buffer: &mut Buffer, context: &Context);
}

#[enum_dispatch(Component)]
#[derive(Debug)]
pub enum ComponentEnum {
    Dashboard,
    Admin,
    TokenInput,
}

pub fn center_rect(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
    let [area] = Layout::horizontal([horizontal])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([vertical]).flex(Flex::Center).areas(area);
    area
}

// Returns false after drawing a warning when the area cannot hold a view.
pub fn ensure_minimum_size(area: Rect, buffer: &mut Buffer) -> bool {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        Paragraph::new("Terminal too small. Please resize.")
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center)
            .render(area, buffer);
        return false;
    }
    true
}

pub fn render_header(buffer: &mut Buffer, area: Rect, view_name: &str, context: &Context) {
    let party = context
        .session
        .map(|session| format!("{} adventurers", session.roster().len()))
        .unwrap_or_else(|| "no roster loaded".to_string());
    let busy = if context.in_flight > 0 {
        " · talking to the chronicles…"
    } else {
        ""
    };
    Paragraph::new(format!(
        "Tavern Ledger v{} · {view_name} · {party}{busy}",
        env!("CARGO_PKG_VERSION")
    ))
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center)
    .render(area, buffer);
}

// Last notification, colored by its type.
pub fn render_console(buffer: &mut Buffer, area: Rect, context: &Context) {
    let Some(message) = context.messages.last() else {
        return;
    };
    let color = match message.message_type {
        MessageType::Info => Color::Gray,
        MessageType::Success => Color::Green,
        MessageType::Error => Color::Red,
    };
    Paragraph::new(message.content.as_str())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .render(area, buffer);
}

pub fn render_status(buffer: &mut Buffer, area: Rect, hints: &str) {
    Paragraph::new(hints)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .render(area, buffer);
}

// Keep a list selection inside `len` items.
pub fn clamp_selection(selected: usize, len: usize) -> usize {
    selected.min(len.saturating_sub(1))
}
