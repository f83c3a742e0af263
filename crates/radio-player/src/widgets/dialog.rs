//! Modal message dialogs.  While one is showing it captures all input; the
//! next queued dialog appears when the current one is dismissed.

use std::collections::VecDeque;

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use radio_core::error::{ControllerError, Severity};

use crate::theme::{C_DIALOG_BG, C_DIALOG_FG, C_ERROR, C_WARNING};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Warning,
    Error,
}

impl DialogKind {
    fn title(self) -> &'static str {
        match self {
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

impl From<Severity> for DialogKind {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Warning => Self::Warning,
            Severity::Error => Self::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub message: String,
}

impl Dialog {
    pub fn from_error(err: &ControllerError) -> Self {
        Self {
            kind: err.severity().into(),
            message: err.to_string(),
        }
    }
}

#[derive(Default)]
pub struct DialogQueue {
    queue: VecDeque<Dialog>,
}

impl DialogQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, dialog: Dialog) {
        self.queue.push_back(dialog);
    }

    pub fn current(&self) -> Option<&Dialog> {
        self.queue.front()
    }

    pub fn is_open(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn dismiss(&mut self) -> Option<Dialog> {
        self.queue.pop_front()
    }

    /// Draw the front dialog centered in `area`.
    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let Some(dialog) = self.current() else {
            return;
        };

        let accent = match dialog.kind {
            DialogKind::Warning => C_WARNING,
            DialogKind::Error => C_ERROR,
        };

        let longest = dialog
            .message
            .lines()
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0) as u16;
        let width = (longest + 6).clamp(30, area.width.saturating_sub(4).max(30));
        let inner_w = width.saturating_sub(4).max(1);
        let wrapped_rows: u16 = dialog
            .message
            .lines()
            .map(|l| (l.width() as u16).div_ceil(inner_w).max(1))
            .sum();
        let height = (wrapped_rows + 4).min(area.height);

        let popup = Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width: width.min(area.width),
            height,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(Span::styled(
                format!(" {} ", dialog.kind.title()),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ))
            .style(Style::default().bg(C_DIALOG_BG).fg(C_DIALOG_FG));

        let mut lines: Vec<Line> = dialog.message.lines().map(Line::from).collect();
        lines.push(Line::from(""));
        lines.push(
            Line::from(Span::styled(
                "[ OK ]",
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
        );

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false }),
            popup,
        );
    }
}
