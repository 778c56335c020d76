// ui/token_input.rs

use copypasta::{ClipboardContext, ClipboardProvider};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::*,
};
use tui_textarea::TextArea;

use super::{
    Component, center_rect,
    constants::TOKEN_KEYS,
    render_console,
    textarea::{new_textarea, set_title, text_of},
};
use crate::{app::Action, context::Context};

// Asks for the repository access token. The typed characters are masked.
#[derive(Debug)]
pub struct TokenInput {
    textarea: TextArea<'static>,
    has_token: bool,
}

impl Component for TokenInput {
    fn on_key(&mut self, key: KeyEvent, _context: &Context) -> Option<Action> {
        match key.code {
            KeyCode::Enter => {
                let token = text_of(&self.textarea);
                if token.trim().eq_ignore_ascii_case("reset") {
                    self.has_token = false;
                    self.textarea = masked_textarea();
                    return Some(Action::ResetCredential);
                }
                Some(Action::SubmitCredential(token))
            }
            KeyCode::Esc => Some(Action::RefuseCredential),
            KeyCode::Char('v') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.paste();
                None
            }
            _ => {
                self.textarea.input(key);
                None
            }
        }
    }

    fn render(&mut self, area: Rect, buffer: &mut Buffer, context: &Context) {
        let centered_area =
            center_rect(area, Constraint::Percentage(70), Constraint::Length(9));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .flex(Flex::Center)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(centered_area);

        let title = if self.has_token {
            Paragraph::new(" A token is stored. Enter a new one to replace it. ".bold())
                .style(Style::default().fg(Color::Green))
        } else {
            Paragraph::new(" Enter your GitHub PAT to access the Tavern: ")
                .style(Style::default().fg(Color::Yellow))
        };
        title.alignment(Alignment::Center).render(chunks[0], buffer);

        self.textarea.render(chunks[1], buffer);

        Paragraph::new(format!(
            "{}/{} · {}",
            context.settings.repository.owner,
            context.settings.repository.repo,
            context.settings.repository.path
        ))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .render(chunks[2], buffer);

        Paragraph::new(TOKEN_KEYS)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .render(chunks[3], buffer);

        render_console(buffer, chunks[4], context);
    }
}

impl TokenInput {
    pub fn new(has_token: bool) -> Self {
        Self {
            textarea: masked_textarea(),
            has_token,
        }
    }

    fn paste(&mut self) {
        let contents = ClipboardContext::new().and_then(|mut clipboard| clipboard.get_contents());
        match contents {
            Ok(text) => {
                self.textarea.insert_str(text.trim());
            }
            Err(e) => log::warn!("Clipboard unavailable: {e}"),
        }
    }
}

fn masked_textarea() -> TextArea<'static> {
    let mut textarea = new_textarea(" Token ", "ghp_…");
    set_title(&mut textarea, " Token ", true);
    textarea.set_mask_char('•');
    textarea
}
