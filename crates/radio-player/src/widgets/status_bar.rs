//! Bottom rows: sunken status label, latest log line, key hints.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::{C_MUTED, C_PRIMARY, C_SECONDARY, C_STATUS_BG, C_STATUS_FG, C_WARNING};

/// Which key set the hints row should describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Prompt,
    Dialog,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "RADIO",
            Self::Prompt => "OPEN",
            Self::Dialog => "DIALOG",
        }
    }
}

/// The status text on a light, full-width strip.
pub fn draw_status_line(frame: &mut Frame, area: Rect, status: &str) {
    let line = Line::from(Span::styled(
        format!(" {}", status),
        Style::default().fg(C_STATUS_FG),
    ));
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(C_STATUS_BG)),
        area,
    );
}

/// The latest WARN/ERROR line, if any.
pub fn draw_log_bar(frame: &mut Frame, area: Rect, last_log: Option<&str>) {
    let Some(text) = last_log else {
        return;
    };
    let line = Line::from(vec![
        Span::styled("! ", Style::default().fg(C_WARNING).add_modifier(Modifier::BOLD)),
        Span::styled(text, Style::default().fg(C_SECONDARY)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// The keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode) {
    let keys = match mode {
        InputMode::Normal => {
            " ↑↓/jk move  Enter select  p play  s stop  ←→ vol  o open  y copy url  Tab focus  q quit"
        }
        InputMode::Prompt => " type a path  Enter load  Esc cancel",
        InputMode::Dialog => " Enter/Esc dismiss",
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", mode.label()),
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(keys, Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
