//! PathPrompt: single-line path entry used to pick a station list file.

use std::path::{Path, PathBuf};

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{C_MUTED, C_PROMPT_BG, C_PROMPT_FG};

const LABEL: &str = "Open stations file: ";

#[derive(Debug, PartialEq)]
pub enum PromptAction {
    Submit(PathBuf),
    Cancelled,
    None,
}

#[derive(Default)]
pub struct PathPrompt {
    input: Input,
    active: bool,
}

impl PathPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the prompt pre-filled with `dir` and a trailing separator.
    pub fn open(&mut self, dir: &Path) {
        let mut value = dir.display().to_string();
        if !value.is_empty() && !value.ends_with(std::path::MAIN_SEPARATOR) {
            value.push(std::path::MAIN_SEPARATOR);
        }
        self.input = Input::new(value);
        self.active = true;
    }

    pub fn close(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    /// Enter submits a non-blank path, Esc cancels.  Everything else edits.
    pub fn handle_key(&mut self, key: KeyEvent) -> PromptAction {
        match key.code {
            KeyCode::Esc => {
                self.close();
                PromptAction::Cancelled
            }
            KeyCode::Enter => {
                let value = self.input.value().trim();
                if value.is_empty() {
                    return PromptAction::None;
                }
                let path = PathBuf::from(value);
                self.close();
                PromptAction::Submit(path)
            }
            _ => {
                self.input.handle_event(&Event::Key(key));
                PromptAction::None
            }
        }
    }

    /// Render as a boxed line centered vertically in `area`.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        if !self.active || area.height < 3 {
            return;
        }
        let width = area.width.saturating_sub(4).max(10).min(area.width);
        let popup = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + area.height / 2 - 1,
            width,
            height: 3,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(C_PROMPT_FG))
            .title(Span::styled(
                " Enter load · Esc cancel ",
                Style::default().fg(C_MUTED),
            ))
            .style(Style::default().bg(C_PROMPT_BG));

        let label_w = LABEL.chars().count() as u16;
        let field_w = popup.width.saturating_sub(2 + label_w).max(1);
        let scroll = self.input.visual_scroll(field_w as usize);
        let visible: String = self.text().chars().skip(scroll).collect();

        let line = Line::from(vec![
            Span::styled(
                LABEL,
                Style::default().fg(C_PROMPT_FG).add_modifier(Modifier::BOLD),
            ),
            Span::styled(visible, Style::default().fg(C_PROMPT_FG)),
        ]);

        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(line).block(block), popup);

        let cursor_x = popup.x + 1 + label_w + (self.input.visual_cursor() - scroll) as u16;
        frame.set_cursor_position((cursor_x.min(popup.right().saturating_sub(2)), popup.y + 1));
    }
}
