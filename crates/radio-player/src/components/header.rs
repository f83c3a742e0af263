//! Header component: now-playing banner.
//!
//! Row 1: client name and the station on air (or the one `play` would start),
//! with a LIVE badge while playing.
//! Row 2: logo file, format and size, or "no logo" when none could be read.
//!
//! Not focusable.

use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use radio_core::logo::LogoInfo;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{style_muted, C_MUTED, C_PLAYING, C_PRIMARY, C_SECONDARY},
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }
}

fn logo_line(logo: Option<&LogoInfo>) -> Line<'static> {
    match logo {
        Some(info) => {
            let mut spans = vec![
                Span::styled("logo ", style_muted()),
                Span::styled(info.file_name(), Style::default().fg(C_SECONDARY)),
                Span::styled(format!("  {}", info.format), style_muted()),
            ];
            if let Some((w, h)) = info.dimensions {
                spans.push(Span::styled(format!(" {}×{}", w, h), style_muted()));
            }
            Line::from(spans)
        }
        None => Line::from(Span::styled("no logo", style_muted())),
    }
}

impl Component for Header {
    fn id(&self) -> ComponentId {
        ComponentId::Header
    }

    fn handle_key(&mut self, _key: KeyEvent, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn handle_mouse(&mut self, _event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let badge = state.is_playing().then_some(Badge {
            text: "LIVE",
            color: C_PLAYING,
        });
        let block = pane_chrome(&state.client_name, false, badge);

        let (marker, name_style) = if state.is_playing() {
            (
                "▶ ",
                Style::default().fg(C_PLAYING).add_modifier(Modifier::BOLD),
            )
        } else {
            ("■ ", Style::default().fg(C_PRIMARY))
        };

        let now = Line::from(match state.now_playing() {
            Some(station) => vec![
                Span::styled(marker, name_style),
                Span::styled(station.name.clone(), name_style),
                Span::styled(format!("  {}", station.url), Style::default().fg(C_MUTED)),
            ],
            None => vec![Span::styled("No station selected", style_muted())],
        });

        frame.render_widget(
            Paragraph::new(vec![now, logo_line(state.logo.as_ref())]).block(block),
            area,
        );
    }
}
