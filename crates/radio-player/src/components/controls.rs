//! Controls component: Play and Stop buttons plus the volume slider.
//!
//! Play is disabled while playing and Stop while idle.  Activating a
//! disabled button produces no action.

use ratatui::crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    theme::{style_button, style_button_disabled},
    widgets::{pane_chrome::pane_chrome, volume_bar},
};

const PLAY_LABEL: &str = "[ ▶ Play ]";
const STOP_LABEL: &str = "[ ■ Stop ]";
const GAP: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Play,
    Stop,
    Volume,
}

impl Control {
    fn next(self) -> Self {
        match self {
            Self::Play => Self::Stop,
            Self::Stop => Self::Volume,
            Self::Volume => Self::Play,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Play => Self::Volume,
            Self::Stop => Self::Play,
            Self::Volume => Self::Stop,
        }
    }
}

/// Hit areas of one controls row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slots {
    play: Rect,
    stop: Rect,
    volume: Rect,
}

fn slots(area: Rect) -> Slots {
    // inside the pane border
    let row = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2).min(1),
    };
    let play_w = PLAY_LABEL.chars().count() as u16;
    let stop_w = STOP_LABEL.chars().count() as u16;
    let play = Rect { width: play_w.min(row.width), ..row };
    let stop = Rect {
        x: play.right() + GAP,
        width: stop_w.min(row.width.saturating_sub(play_w + GAP)),
        ..row
    };
    let vol_x = stop.right() + GAP * 2;
    let volume = Rect {
        x: vol_x,
        width: row.right().saturating_sub(vol_x),
        ..row
    };
    Slots { play, stop, volume }
}

fn contains(r: Rect, col: u16, row: u16) -> bool {
    r.width > 0 && col >= r.x && col < r.right() && row >= r.y && row < r.bottom()
}

pub struct Controls {
    focus: Control,
}

impl Controls {
    pub fn new() -> Self {
        Self {
            focus: Control::Play,
        }
    }

    pub fn focused_control(&self) -> Control {
        self.focus
    }

    fn activate(&self, control: Control, state: &AppState) -> Vec<Action> {
        match control {
            Control::Play if !state.is_playing() => vec![Action::Play],
            Control::Stop if state.is_playing() => vec![Action::Stop],
            _ => vec![],
        }
    }
}

impl Component for Controls {
    fn id(&self) -> ComponentId {
        ComponentId::Controls
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        match key.code {
            KeyCode::Char('l') | KeyCode::Down | KeyCode::Char('j') => {
                self.focus = self.focus.next();
                vec![]
            }
            KeyCode::Char('h') | KeyCode::Up | KeyCode::Char('k') => {
                self.focus = self.focus.prev();
                vec![]
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(self.focus, state),
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        if !matches!(event.kind, MouseEventKind::Down(MouseButton::Left)) {
            return vec![];
        }
        let slots = slots(area);
        let (col, row) = (event.column, event.row);
        if contains(slots.play, col, row) {
            self.focus = Control::Play;
            return self.activate(Control::Play, state);
        }
        if contains(slots.stop, col, row) {
            self.focus = Control::Stop;
            return self.activate(Control::Stop, state);
        }
        if contains(slots.volume, col, row) {
            self.focus = Control::Volume;
            if let Some(v) = volume_bar::volume_at(slots.volume, col) {
                return vec![Action::Volume(v)];
            }
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        frame.render_widget(pane_chrome("Controls", focused, None), area);
        let slots = slots(area);

        let button = |label: &'static str, enabled: bool, control: Control| {
            let mut style = if enabled {
                style_button()
            } else {
                style_button_disabled()
            };
            if focused && self.focused_control() == control {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Paragraph::new(Line::from(Span::styled(label, style)))
        };

        frame.render_widget(button(PLAY_LABEL, !state.is_playing(), Control::Play), slots.play);
        frame.render_widget(button(STOP_LABEL, state.is_playing(), Control::Stop), slots.stop);
        volume_bar::draw_volume(
            frame,
            slots.volume,
            state.volume,
            focused && self.focused_control() == Control::Volume,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use radio_core::controller::PlaybackState;
    use ratatui::crossterm::event::KeyModifiers;

    fn state(playing: bool) -> AppState {
        let mut state = AppState::new("test");
        state.volume = 55.0;
        if playing {
            state.playback = PlaybackState::Playing;
        }
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
    fn test_play_disabled_while_playing() {
        let mut controls = Controls::new();
        assert_eq!(controls.handle_key(key(KeyCode::Enter), &state(false)), vec![Action::Play]);
        assert!(controls.handle_key(key(KeyCode::Enter), &state(true)).is_empty());
    }

    #[test]
    fn test_stop_disabled_while_idle() {
        let mut controls = Controls::new();
        controls.handle_key(key(KeyCode::Char('l')), &state(false));
        assert_eq!(controls.focused_control(), Control::Stop);
        assert!(controls.handle_key(key(KeyCode::Enter), &state(false)).is_empty());
        assert_eq!(controls.handle_key(key(KeyCode::Enter), &state(true)), vec![Action::Stop]);
    }

    #[test]
    fn test_focus_wraps() {
        let mut controls = Controls::new();
        controls.handle_key(key(KeyCode::Char('h')), &state(false));
        assert_eq!(controls.focused_control(), Control::Volume);
        controls.handle_key(key(KeyCode::Char('l')), &state(false));
        assert_eq!(controls.focused_control(), Control::Play);
    }

    #[test]
    fn test_clicks_hit_buttons_and_slider() {
        let area = Rect::new(0, 10, 80, 3);
        let s = slots(area);
        assert_eq!(s.play, Rect::new(1, 11, 10, 1));
        assert_eq!(s.stop, Rect::new(13, 11, 10, 1));
        assert_eq!(s.volume.x, 27);

        let mut controls = Controls::new();
        assert_eq!(controls.handle_mouse(click(3, 11), area, &state(false)), vec![Action::Play]);
        assert!(controls.handle_mouse(click(3, 11), area, &state(true)).is_empty());
        assert_eq!(controls.handle_mouse(click(15, 11), area, &state(true)), vec![Action::Stop]);
        // border row
        assert!(controls.handle_mouse(click(3, 10), area, &state(false)).is_empty());

        let actions = controls.handle_mouse(click(72, 11), area, &state(false));
        assert!(matches!(actions.as_slice(), [Action::Volume(v)] if *v > 90.0));
        assert_eq!(controls.focused_control(), Control::Volume);
    }
}
