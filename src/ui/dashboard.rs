// ui/dashboard.rs

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::*,
};
use tui_textarea::TextArea;

use super::{
    Component, clamp_selection,
    constants::{AWARD_KEYS, CARD_HEIGHT, CARD_WIDTH, DASHBOARD_KEYS, MAX_CARD_COLUMNS},
    ensure_minimum_size, render_console, render_header, render_status,
    textarea::{new_textarea, set_title, text_of},
};
use crate::{
    app::Action,
    character::CharacterId,
    context::Context,
    session::Mutation,
    view::{CharacterCard, dashboard_cards},
};

// Card grid of every character, with an inline input to award experience.
#[derive(Debug, Default)]
pub struct Dashboard {
    selected: usize,
    award: Option<AwardInput>,
}

#[derive(Debug)]
struct AwardInput {
    id: CharacterId,
    textarea: TextArea<'static>,
}

impl Component for Dashboard {
    fn on_key(&mut self, key: KeyEvent, context: &Context) -> Option<Action> {
        if let Some(award) = self.award.as_mut() {
            return match key.code {
                KeyCode::Enter => {
                    let amount = text_of(&award.textarea);
                    let id = award.id;
                    self.award = None;
                    Some(Action::Mutate(Mutation::AwardExperience { id, amount }))
                }
                KeyCode::Esc => {
                    self.award = None;
                    None
                }
                _ => {
                    award.textarea.input(key);
                    None
                }
            };
        }

        let cards = context
            .session
            .map(|session| session.roster().len())
            .unwrap_or(0);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = clamp_selection(self.selected.saturating_sub(1), cards);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = clamp_selection(self.selected + 1, cards);
                None
            }
            KeyCode::Enter | KeyCode::Char('a') => {
                self.open_award(context);
                None
            }
            KeyCode::Tab => Some(Action::SwitchView),
            KeyCode::Char('r') => Some(Action::Reload),
            KeyCode::Char('t') => Some(Action::OpenTokenInput),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }

    fn render(&mut self, area: Rect, buffer: &mut Buffer, context: &Context) {
        if !ensure_minimum_size(area, buffer) {
            return;
        }
        let input_height = if self.award.is_some() { 3 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(CARD_HEIGHT),
                Constraint::Length(input_height),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        render_header(buffer, chunks[0], "Dashboard", context);
        match context.session {
            Some(session) => {
                let cards = dashboard_cards(session.roster().characters());
                self.selected = clamp_selection(self.selected, cards.len());
                self.render_grid(buffer, chunks[1], &cards);
            }
            None => Paragraph::new("The chronicles are closed. Press r to reload or t to enter a token.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .render(chunks[1], buffer),
        }
        if let Some(award) = &self.award {
            award.textarea.render(chunks[2], buffer);
        }
        let hints = if self.award.is_some() {
            AWARD_KEYS
        } else {
            DASHBOARD_KEYS
        };
        render_status(buffer, chunks[3], hints);
        render_console(buffer, chunks[4], context);
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_awarding(&self) -> bool {
        self.award.is_some()
    }

    fn open_award(&mut self, context: &Context) {
        let Some(character) = context
            .session
            .and_then(|session| session.roster().characters().get(self.selected))
        else {
            return;
        };
        let title = format!(" Add XP to {} ", character.name);
        let mut textarea = new_textarea(title.clone(), "Add XP");
        set_title(&mut textarea, title, true);
        self.award = Some(AwardInput {
            id: character.id,
            textarea,
        });
    }

    fn render_grid(&self, buffer: &mut Buffer, area: Rect, cards: &[CharacterCard]) {
        if cards.is_empty() {
            Paragraph::new("No adventurers yet. Recruit some from the admin view (Tab).")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .render(area, buffer);
            return;
        }

        let columns = (area.width / CARD_WIDTH).clamp(1, MAX_CARD_COLUMNS) as usize;
        let visible_rows = ((area.height / CARD_HEIGHT) as usize).max(1);
        let selected_row = self.selected / columns;
        let first_row = selected_row.saturating_sub(visible_rows - 1);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
            .split(area);

        for (row_offset, row_area) in rows.iter().enumerate() {
            let columns_areas = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
                .split(*row_area);
            for (column, card_area) in columns_areas.iter().enumerate() {
                let index = (first_row + row_offset) * columns + column;
                if let Some(card) = cards.get(index) {
                    render_card(buffer, *card_area, card, index == self.selected);
                }
            }
        }
    }
}

fn render_card(buffer: &mut Buffer, area: Rect, card: &CharacterCard, selected: bool) {
    let border = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .title_top(Line::from(format!(" {} ", card.name)).style(Style::default().fg(Color::Yellow)))
        .title_top(Line::from(format!(" Lvl {} ", card.level)).right_aligned());
    let inner = block.inner(area);
    block.render(area, buffer);

    let lines = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    Paragraph::new(card.class.as_str())
        .style(
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        )
        .render(lines[0], buffer);

    let [xp_area, next_area] = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)])
        .areas(lines[1]);
    Paragraph::new(format!("XP: {}", card.exp)).render(xp_area, buffer);
    Paragraph::new(format!("Next: {}", card.next_threshold))
        .alignment(Alignment::Right)
        .render(next_area, buffer);

    Gauge::default()
        .gauge_style(Style::default().fg(Color::Yellow).bg(Color::DarkGray))
        .ratio(card.ratio())
        .label(format!("{:.0}%", card.progress_percent))
        .render(lines[2], buffer);
}
