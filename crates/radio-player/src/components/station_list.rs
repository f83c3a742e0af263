//! StationList component: the registry as a scrollable list.
//!
//! The highlight follows the keyboard; a station only changes when it is
//! activated with Enter or clicked.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{
        style_default, style_muted, style_playing, style_selected, style_selected_focused,
        C_PLAYING,
    },
    widgets::pane_chrome::pane_chrome,
};

pub struct StationList {
    list_state: ListState,
    /// Index the highlight was last moved to by a current-station change.
    followed: Option<usize>,
}

impl StationList {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default(),
            followed: None,
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        self.list_state.selected()
    }

    fn move_by(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let cur = self.list_state.selected().unwrap_or(0) as isize;
        let next = (cur + delta).clamp(0, len as isize - 1) as usize;
        self.list_state.select(Some(next));
    }

    /// Row index under a click, accounting for the border and scroll offset.
    fn row_at(&self, event: &MouseEvent, area: Rect, len: usize) -> Option<usize> {
        let inner_top = area.y + 1;
        let inner_bottom = area.bottom().saturating_sub(1);
        if event.row < inner_top || event.row >= inner_bottom {
            return None;
        }
        let idx = self.list_state.offset() + usize::from(event.row - inner_top);
        (idx < len).then_some(idx)
    }
}

impl Component for StationList {
    fn id(&self) -> ComponentId {
        ComponentId::StationList
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        let len = state.stations.len();
        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            5
        } else {
            1
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_by(-step, len),
            KeyCode::Down | KeyCode::Char('j') => self.move_by(step, len),
            KeyCode::PageUp => self.move_by(-10, len),
            KeyCode::PageDown => self.move_by(10, len),
            KeyCode::Home | KeyCode::Char('g') => self.move_by(isize::MIN / 2, len),
            KeyCode::End | KeyCode::Char('G') => self.move_by(isize::MAX / 2, len),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(idx) = self.cursor() {
                    return vec![Action::Select(idx)];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        let len = state.stations.len();
        match event.kind {
            MouseEventKind::ScrollUp => self.move_by(-1, len),
            MouseEventKind::ScrollDown => self.move_by(1, len),
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(idx) = self.row_at(&event, area, len) {
                    self.list_state.select(Some(idx));
                    return vec![Action::Select(idx)];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn sync(&mut self, state: &AppState) {
        let len = state.stations.len();
        if len == 0 {
            self.list_state.select(None);
            self.followed = None;
            return;
        }
        // Jump to the current station whenever it changes (load, select).
        if state.current_index != self.followed {
            self.followed = state.current_index;
            if let Some(idx) = state.current_index {
                self.list_state.select(Some(idx));
            }
        }
        match self.list_state.selected() {
            Some(idx) if idx >= len => self.list_state.select(Some(len - 1)),
            None => self.list_state.select(Some(0)),
            _ => {}
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let title = format!("Stations ({})", state.stations.len());
        let block = pane_chrome(&title, focused, None);

        if state.stations.is_empty() {
            let empty = ratatui::widgets::Paragraph::new(Span::styled(
                "No stations. Press o to open a station list.",
                style_muted(),
            ))
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = state
            .stations
            .iter()
            .enumerate()
            .map(|(i, station)| {
                let is_current = state.current_index == Some(i);
                let (marker, style) = match (is_current, state.is_playing()) {
                    (true, true) => ("▶ ", style_playing()),
                    (true, false) => ("· ", Style::default().fg(C_PLAYING)),
                    _ => ("  ", style_default()),
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(station.name.clone(), style),
                ]))
            })
            .collect();

        let highlight = if focused {
            style_selected_focused()
        } else {
            style_selected()
        };

        let list = List::new(items).block(block).highlight_style(highlight);
        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radio_core::station::Station;

    fn state(n: usize, current: Option<usize>) -> AppState {
        let mut state = AppState::new("test");
        state.stations = (0..n)
            .map(|i| Station::new(format!("S{}", i), format!("http://s{}", i), None))
            .collect();
        state.current_index = current;
        state
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_cursor_moves_and_enter_selects() {
        let s = state(3, Some(0));
        let mut list = StationList::new();
        list.sync(&s);
        assert_eq!(list.cursor(), Some(0));

        assert!(list.handle_key(key(KeyCode::Down), &s).is_empty());
        assert!(list.handle_key(key(KeyCode::Char('j')), &s).is_empty());
        list.handle_key(key(KeyCode::Down), &s);
        assert_eq!(list.cursor(), Some(2));

        assert_eq!(list.handle_key(key(KeyCode::Enter), &s), vec![Action::Select(2)]);
        list.handle_key(key(KeyCode::Home), &s);
        assert_eq!(list.cursor(), Some(0));
    }

    #[test]
    fn test_sync_follows_current_and_clamps() {
        let mut list = StationList::new();
        list.sync(&state(5, Some(4)));
        assert_eq!(list.cursor(), Some(4));

        // Registry replaced with fewer entries, current back at 0.
        list.sync(&state(2, Some(0)));
        assert_eq!(list.cursor(), Some(0));

        list.sync(&state(0, None));
        assert_eq!(list.cursor(), None);
    }

    #[test]
    fn test_click_selects_row() {
        let s = state(3, Some(0));
        let mut list = StationList::new();
        list.sync(&s);
        let area = Rect::new(0, 5, 30, 10);

        // Border row and rows past the end are ignored.
        assert!(list.handle_mouse(click(2, 5), area, &s).is_empty());
        assert!(list.handle_mouse(click(2, 9), area, &s).is_empty());
        assert_eq!(list.handle_mouse(click(2, 7), area, &s), vec![Action::Select(1)]);
        assert_eq!(list.cursor(), Some(1));
    }
}
