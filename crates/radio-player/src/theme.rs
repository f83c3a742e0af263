//! Color palette and style constants.  Panels draw without a background so
//! the gradient backdrop shows through; foregrounds are chosen to read on
//! both ends of it.

use ratatui::style::{Color, Modifier, Style};

// ── Color palette ─────────────────────────────────────────────────────────────

pub const C_ACCENT: Color = Color::Rgb(26, 115, 232); // button blue
pub const C_PLAYING: Color = Color::Rgb(120, 230, 150);
pub const C_MUTED: Color = Color::Rgb(150, 160, 200);
pub const C_SECONDARY: Color = Color::Rgb(200, 210, 235);
pub const C_PRIMARY: Color = Color::Rgb(245, 245, 250);
pub const C_SELECTION_BG: Color = Color::Rgb(15, 30, 90);
pub const C_PANEL_BORDER: Color = Color::Rgb(110, 130, 200);
pub const C_PANEL_BORDER_FOCUSED: Color = Color::Rgb(255, 255, 255);
pub const C_DISABLED: Color = Color::Rgb(95, 105, 150);
pub const C_STATUS_BG: Color = Color::Rgb(240, 240, 240); // sunken status label
pub const C_STATUS_FG: Color = Color::Rgb(30, 30, 30);
pub const C_DIALOG_BG: Color = Color::Rgb(240, 240, 240);
pub const C_DIALOG_FG: Color = Color::Rgb(25, 25, 25);
pub const C_WARNING: Color = Color::Rgb(230, 140, 0);
pub const C_ERROR: Color = Color::Rgb(210, 40, 40);
pub const C_TOAST_INFO: Color = Color::Rgb(170, 220, 255);
pub const C_TOAST_SUCCESS: Color = Color::Rgb(120, 230, 150);
pub const C_PROMPT_BG: Color = Color::Rgb(20, 20, 32);
pub const C_PROMPT_FG: Color = Color::Rgb(255, 200, 80);

// ── Predefined styles ─────────────────────────────────────────────────────────

pub fn style_default() -> Style {
    Style::default().fg(C_PRIMARY)
}

pub fn style_playing() -> Style {
    Style::default().fg(C_PLAYING).add_modifier(Modifier::BOLD)
}

pub fn style_selected_focused() -> Style {
    Style::default()
        .bg(C_SELECTION_BG)
        .fg(C_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn style_selected() -> Style {
    Style::default().bg(C_SELECTION_BG).fg(C_SECONDARY)
}

pub fn style_button() -> Style {
    Style::default()
        .bg(C_ACCENT)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn style_button_disabled() -> Style {
    Style::default().fg(C_DISABLED)
}

pub fn style_focused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER_FOCUSED)
}

pub fn style_unfocused_border() -> Style {
    Style::default().fg(C_PANEL_BORDER)
}

pub fn style_muted() -> Style {
    Style::default().fg(C_MUTED)
}
