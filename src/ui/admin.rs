// ui/admin.rs

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
    Component, center_rect, clamp_selection,
    constants::{ADMIN_KEYS, BANISH_PROMPT, FORM_KEYS},
    ensure_minimum_size, render_console, render_header, render_status,
    textarea::{new_textarea, set_title, text_of},
};
use crate::{
    app::Action,
    character::CharacterId,
    context::Context,
    session::Mutation,
    view::{AdminRow, admin_rows},
};

// Tabular listing with recruit and banish controls.
#[derive(Debug, Default)]
pub struct Admin {
    state: TableState,
    form: Option<RecruitForm>,
    pending_banish: Option<(CharacterId, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Class,
}

#[derive(Debug)]
struct RecruitForm {
    name: TextArea<'static>,
    class: TextArea<'static>,
    focus: Field,
}

impl RecruitForm {
    fn new() -> Self {
        let mut form = Self {
            name: new_textarea(" Name ", "Character name"),
            class: new_textarea(" Class ", "Class"),
            focus: Field::Name,
        };
        form.refresh_focus();
        form
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Field::Name => Field::Class,
            Field::Class => Field::Name,
        };
        self.refresh_focus();
    }

    fn refresh_focus(&mut self) {
        set_title(&mut self.name, " Name ", self.focus == Field::Name);
        set_title(&mut self.class, " Class ", self.focus == Field::Class);
    }

    fn focused(&mut self) -> &mut TextArea<'static> {
        match self.focus {
            Field::Name => &mut self.name,
            Field::Class => &mut self.class,
        }
    }
}

impl Component for Admin {
    fn on_key(&mut self, key: KeyEvent, context: &Context) -> Option<Action> {
        if let Some((id, _)) = self.pending_banish.take() {
            // Anything but an explicit yes cancels.
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    Some(Action::Mutate(Mutation::RemoveCharacter { id }))
                }
                _ => None,
            };
        }

        if let Some(form) = self.form.as_mut() {
            return match key.code {
                KeyCode::Enter => {
                    let name = text_of(&form.name);
                    let class = text_of(&form.class);
                    self.form = None;
                    Some(Action::Mutate(Mutation::CreateCharacter { name, class }))
                }
                KeyCode::Esc => {
                    self.form = None;
                    None
                }
                KeyCode::Tab | KeyCode::BackTab => {
                    form.toggle_focus();
                    None
                }
                _ => {
                    form.focused().input(key);
                    None
                }
            };
        }

        let rows = context
            .session
            .map(|session| session.roster().len())
            .unwrap_or(0);
        let selected = self.state.selected().unwrap_or(0);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.state
                    .select(Some(clamp_selection(selected.saturating_sub(1), rows)));
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.select(Some(clamp_selection(selected + 1, rows)));
                None
            }
            KeyCode::Char('n') => {
                self.form = Some(RecruitForm::new());
                None
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                self.pending_banish = context
                    .session
                    .and_then(|session| session.roster().characters().get(selected))
                    .map(|character| (character.id, character.name.clone()));
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
        let form_height = if self.form.is_some() { 3 } else { 0 };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(form_height),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);

        render_header(buffer, chunks[0], "Admin", context);
        match context.session {
            Some(session) => {
                let rows = admin_rows(session.roster().characters());
                self.render_table(buffer, chunks[1], &rows);
            }
            None => Paragraph::new("The chronicles are closed. Press r to reload or t to enter a token.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .render(chunks[1], buffer),
        }

        if let Some(form) = &self.form {
            let [name_area, class_area] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(chunks[2]);
            form.name.render(name_area, buffer);
            form.class.render(class_area, buffer);
        }

        let hints = if self.form.is_some() {
            FORM_KEYS
        } else {
            ADMIN_KEYS
        };
        render_status(buffer, chunks[3], hints);
        render_console(buffer, chunks[4], context);

        if let Some((_, name)) = &self.pending_banish {
            render_banish_prompt(buffer, area, name);
        }
    }
}

impl Admin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_recruiting(&self) -> bool {
        self.form.is_some()
    }

    pub fn is_confirming(&self) -> bool {
        self.pending_banish.is_some()
    }

    fn render_table(&mut self, buffer: &mut Buffer, area: Rect, rows: &[AdminRow]) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title_top(Line::from(" The Party ").style(Style::default().fg(Color::Yellow)));

        if rows.is_empty() {
            Paragraph::new("No adventurers yet. Press n to recruit one.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block)
                .render(area, buffer);
            return;
        }

        let selected = clamp_selection(self.state.selected().unwrap_or(0), rows.len());
        self.state.select(Some(selected));

        let header = Row::new(["Name", "Class", "Level"]).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
        let body = rows.iter().map(|row| {
            Row::new([
                Cell::from(row.name.clone()).style(Style::default().fg(Color::White)),
                Cell::from(row.class.clone()).style(Style::default().fg(Color::Gray)),
                Cell::from(row.level.to_string()).style(Style::default().fg(Color::Yellow)),
            ])
        });
        let table = Table::new(
            body,
            [
                Constraint::Percentage(45),
                Constraint::Percentage(45),
                Constraint::Length(6),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

        StatefulWidget::render(table, area, buffer, &mut self.state);
    }
}

fn render_banish_prompt(buffer: &mut Buffer, area: Rect, name: &str) {
    let popup = center_rect(area, Constraint::Length(56), Constraint::Length(5));
    Clear.render(popup, buffer);
    Paragraph::new(vec![
        Line::from(format!("Banish {name}?")).style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(BANISH_PROMPT),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red)),
    )
    .render(popup, buffer);
}
