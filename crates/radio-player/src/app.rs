//! App: component-based event loop around the controller.
//!
//! Architecture:
//! - `App` owns the `Controller`, all components, and `AppState` (a read-only
//!   snapshot handed to components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from the terminal
//!   reader and the log layer.
//! - Components return `Vec<Action>`; App dispatches each Action, awaiting the
//!   controller before the next one is handled.
//! - Controller errors become modal dialogs here, never inside the controller.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use radio_core::controller::Controller;
use radio_core::engine::EngineLauncher;
use radio_core::error::ControllerError;
use radio_core::logo::probe_logo;

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    components::{controls::Controls, header::Header, station_list::StationList},
    focus::FocusRing,
    widgets::{
        backdrop::Backdrop,
        dialog::{Dialog, DialogQueue},
        path_prompt::{PathPrompt, PromptAction},
        status_bar::{self, InputMode},
        toast::ToastManager,
    },
};

const VOLUME_STEP: f32 = 5.0;

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    Log(String),
}

// ── Pane area tracking ────────────────────────────────────────────────────────

/// Last-drawn rects of the clickable panes, for mouse hit-testing.
#[derive(Default, Clone, Copy)]
struct PaneAreas {
    station_list: Rect,
    controls: Rect,
}

fn hit(r: Rect, col: u16, row: u16) -> bool {
    r.width > 0 && r.height > 0 && col >= r.x && col < r.right() && row >= r.y && row < r.bottom()
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App<L: EngineLauncher> {
    controller: Controller<L>,

    // ── Shared state (passed read-only to components) ─────────────────────────
    pub state: AppState,

    // ── Components ────────────────────────────────────────────────────────────
    header: Header,
    station_list: StationList,
    controls: Controls,
    focus: FocusRing,

    // ── Overlays ──────────────────────────────────────────────────────────────
    dialogs: DialogQueue,
    prompt: PathPrompt,
    toast: ToastManager,

    should_quit: bool,
    pane_areas: PaneAreas,
}

impl<L: EngineLauncher> App<L> {
    pub fn new(controller: Controller<L>, client_name: impl Into<String>) -> Self {
        let mut app = Self {
            controller,
            state: AppState::new(client_name),
            header: Header::new(),
            station_list: StationList::new(),
            controls: Controls::new(),
            focus: FocusRing::new(vec![ComponentId::StationList, ComponentId::Controls]),
            dialogs: DialogQueue::new(),
            prompt: PathPrompt::new(),
            toast: ToastManager::new(),
            should_quit: false,
            pane_areas: PaneAreas::default(),
        };
        app.sync();
        app
    }

    /// Load `stations_file` if given, otherwise just show the default
    /// station's logo.  Errors end up as dialogs like any other load.
    pub async fn startup(&mut self, stations_file: Option<PathBuf>) {
        match stations_file {
            Some(path) => self.dispatch(Action::LoadFile(path)).await,
            None => {
                self.refresh_logo();
                self.sync();
            }
        }
    }

    /// Take over the terminal, run until quit, restore it, then release the
    /// playback engine.
    pub async fn run(mut self, log_rx: broadcast::Receiver<String>) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            SetTitle(self.state.client_name.as_str())
        )?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("terminal ready, size={:?}", terminal.size());

        let result = self.event_loop(&mut terminal, log_rx).await;
        let restored = restore_terminal(&mut terminal);
        self.finish(result, restored).await
    }

    /// Release the engine whatever happened to the loop or the terminal, then
    /// report the first failure.
    async fn finish(
        &mut self,
        result: anyhow::Result<()>,
        restored: io::Result<()>,
    ) -> anyhow::Result<()> {
        self.controller.shutdown().await;
        info!("radioplayer exiting");
        result?;
        restored?;
        Ok(())
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        mut log_rx: broadcast::Receiver<String>,
    ) -> anyhow::Result<()> {
        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        // Polls so the thread notices the loop has gone and lets the runtime exit.
        tokio::task::spawn_blocking(move || loop {
            if event_tx.is_closed() {
                break;
            }
            match event::poll(Duration::from_millis(100)) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                },
                Ok(false) => {}
                Err(_) => break,
            }
        });

        // ── Background task: log layer → log bar ──────────────────────────────
        let log_tx = tx.clone();
        tokio::spawn(async move {
            loop {
                match log_rx.recv().await {
                    Ok(line) => {
                        if log_tx.send(AppMessage::Log(line)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        let mut toast_tick = tokio::time::interval(Duration::from_millis(250));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg).await;
                }
                _ = toast_tick.tick() => {
                    needs_redraw = self.toast.tick();
                }
            }
        }
        Ok(())
    }

    async fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    return false;
                }
                self.on_key(key).await;
                true
            }
            AppMessage::Event(Event::Mouse(mouse)) => {
                let actions = self.handle_mouse(mouse);
                let redraw = !actions.is_empty()
                    || matches!(mouse.kind, MouseEventKind::ScrollUp | MouseEventKind::ScrollDown);
                for action in actions {
                    self.dispatch(action).await;
                }
                redraw
            }
            AppMessage::Event(Event::Resize(w, h)) => {
                self.dispatch(Action::Resize(w, h)).await;
                true
            }
            AppMessage::Event(_) => false,
            AppMessage::Log(line) => {
                self.state.last_log = Some(line);
                true
            }
        }
    }

    async fn on_key(&mut self, key: KeyEvent) {
        for action in self.handle_key(key) {
            self.dispatch(action).await;
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return vec![Action::Quit];
        }

        // A dialog swallows everything until dismissed.
        if self.dialogs.is_open() {
            return match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => vec![Action::DismissDialog],
                _ => vec![],
            };
        }

        if self.prompt.is_active() {
            let action = self.prompt.handle_key(key);
            return match action {
                PromptAction::Submit(path) => vec![Action::LoadFile(path)],
                PromptAction::Cancelled | PromptAction::None => vec![],
            };
        }

        match key.code {
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Tab => return vec![Action::FocusNext],
            KeyCode::BackTab => return vec![Action::FocusPrev],
            KeyCode::Char('p') => return vec![Action::Play],
            KeyCode::Char('s') => return vec![Action::Stop],
            KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => {
                return vec![Action::VolumeStep(VOLUME_STEP)]
            }
            KeyCode::Left | KeyCode::Char('-') => return vec![Action::VolumeStep(-VOLUME_STEP)],
            KeyCode::Char('o') => return vec![Action::OpenLoadPrompt],
            KeyCode::Char('y') => {
                return match self.state.now_playing() {
                    Some(station) => vec![Action::CopyToClipboard(station.url.clone())],
                    None => vec![],
                };
            }
            _ => {}
        }

        let s = &self.state;
        match self.focus.current() {
            Some(ComponentId::StationList) => self.station_list.handle_key(key, s),
            Some(ComponentId::Controls) => self.controls.handle_key(key, s),
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent) -> Vec<Action> {
        if self.dialogs.is_open() {
            return match event.kind {
                MouseEventKind::Down(MouseButton::Left) => vec![Action::DismissDialog],
                _ => vec![],
            };
        }
        if self.prompt.is_active() {
            return vec![];
        }

        let (col, row) = (event.column, event.row);
        let areas = self.pane_areas;
        let s = &self.state;

        macro_rules! click_pane {
            ($id:expr, $component:expr, $area:expr) => {{
                let mut actions = $component.handle_mouse(event, $area, s);
                if !self.focus.is_focused($id) && matches!(event.kind, MouseEventKind::Down(_)) {
                    actions.insert(0, Action::FocusPane($id));
                }
                return actions;
            }};
        }

        if hit(areas.station_list, col, row) {
            click_pane!(ComponentId::StationList, self.station_list, areas.station_list);
        }
        if hit(areas.controls, col, row) {
            click_pane!(ComponentId::Controls, self.controls, areas.controls);
        }
        vec![]
    }

    async fn dispatch(&mut self, action: Action) {
        match action {
            // ── Playback ─────────────────────────────────────────────────────
            Action::Select(idx) => {
                let in_range = idx < self.controller.registry().len();
                if let Err(e) = self.controller.select(idx).await {
                    self.report(e);
                }
                if in_range {
                    self.refresh_logo();
                }
            }
            Action::Play => {
                if self.controller.is_playing() {
                    debug!("play ignored: already playing");
                } else if let Err(e) = self.controller.play().await {
                    self.report(e);
                }
            }
            Action::Stop => {
                if self.controller.is_playing() {
                    self.controller.stop().await;
                } else {
                    debug!("stop ignored: nothing playing");
                }
            }
            Action::Volume(v) => self.controller.set_volume(v).await,
            Action::VolumeStep(delta) => {
                let v = self.controller.volume() + delta;
                self.controller.set_volume(v).await;
            }

            // ── Stations ─────────────────────────────────────────────────────
            Action::OpenLoadPrompt => {
                let dir = self
                    .controller
                    .source_dir()
                    .map(Path::to_path_buf)
                    .or_else(|| std::env::current_dir().ok())
                    .unwrap_or_default();
                self.prompt.open(&dir);
            }
            Action::LoadFile(path) => match self.controller.load_file(&path).await {
                Ok(count) => {
                    self.toast.info(format!("Loaded {} stations", count));
                    self.refresh_logo();
                }
                Err(e) => self.report(e),
            },

            // ── Navigation ───────────────────────────────────────────────────
            Action::FocusNext => {
                self.focus.next();
            }
            Action::FocusPrev => {
                self.focus.prev();
            }
            Action::FocusPane(id) => self.focus.set(id),

            // ── UI ───────────────────────────────────────────────────────────
            Action::DismissDialog => {
                self.dialogs.dismiss();
            }
            Action::CopyToClipboard(text) => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
                    Ok(()) => {
                        info!("Copied to clipboard: {}", text);
                        self.toast.success("Stream URL copied");
                    }
                    Err(e) => {
                        warn!("clipboard: {}", e);
                        self.toast.warning("Clipboard unavailable");
                    }
                }
            }

            // ── System ───────────────────────────────────────────────────────
            Action::Quit => self.should_quit = true,
            Action::Resize(w, h) => debug!("resize {}x{}", w, h),
        }
        self.sync();
    }

    fn report(&mut self, err: ControllerError) {
        debug!("dialog: {}", err);
        self.dialogs.push(Dialog::from_error(&err));
    }

    /// Probe the current station's logo.  A missing placeholder is only
    /// logged; any other failure raises a warning dialog.
    fn refresh_logo(&mut self) {
        let Some(station) = self.controller.current_station().cloned() else {
            self.state.logo = None;
            return;
        };
        match probe_logo(&station.logo, self.controller.source_dir()) {
            Ok(info) => {
                debug!("logo: {} ({})", info.path.display(), info.format);
                self.state.logo = Some(info);
            }
            Err(e) => {
                self.state.logo = None;
                if station.has_default_logo() {
                    debug!("placeholder logo unavailable: {}", e);
                } else {
                    warn!("{}", e);
                    self.report(e);
                }
            }
        }
    }

    fn sync(&mut self) {
        self.state.refresh(&self.controller);
        let s = &self.state;
        self.header.sync(s);
        self.station_list.sync(s);
        self.controls.sync(s);
    }

    fn input_mode(&self) -> InputMode {
        if self.dialogs.is_open() {
            InputMode::Dialog
        } else if self.prompt.is_active() {
            InputMode::Prompt
        } else {
            InputMode::Normal
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        frame.render_widget(Backdrop, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // header
                Constraint::Min(3),    // stations
                Constraint::Length(3), // controls
                Constraint::Length(1), // status
                Constraint::Length(1), // log
                Constraint::Length(1), // keys
            ])
            .split(area);

        let s = &self.state;
        self.header.draw(frame, rows[0], false, s);
        self.station_list.draw(
            frame,
            rows[1],
            self.focus.is_focused(ComponentId::StationList),
            s,
        );
        self.controls.draw(
            frame,
            rows[2],
            self.focus.is_focused(ComponentId::Controls),
            s,
        );
        status_bar::draw_status_line(frame, rows[3], &s.status);
        status_bar::draw_log_bar(frame, rows[4], s.last_log.as_deref());
        status_bar::draw_keys_bar(frame, rows[5], self.input_mode());

        self.pane_areas = PaneAreas {
            station_list: rows[1],
            controls: rows[2],
        };

        self.prompt.draw(frame, area);
        self.dialogs.draw(frame, area);
        self.toast.draw(frame, area);
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use radio_core::controller::PlaybackState;
    use radio_core::engine::EngineOptions;
    use radio_core::station::Station;
    use radio_core::testing::{EngineCall, RecordingLauncher};
    use ratatui::backend::TestBackend;

    use crate::widgets::dialog::DialogKind;

    fn new_app() -> (App<RecordingLauncher>, RecordingLauncher) {
        let launcher = RecordingLauncher::new();
        let journal = launcher.clone();
        let controller = Controller::new(
            launcher,
            EngineOptions::default(),
            Station::new("Derti Radio", "http://derti.live24.gr/derty1000", None),
        );
        (App::new(controller, "Your Personal Online Radio Player"), journal)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn stations_file(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("stations.txt");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_enter_plays_highlighted_station() {
        let (mut app, journal) = new_app();
        app.controller
            .replace_stations(vec![Station::new("FIP", "http://fip", None), Station::new("KEXP", "http://kexp", None)]);
        app.sync();

        app.on_key(key(KeyCode::Down)).await;
        app.on_key(key(KeyCode::Enter)).await;

        assert_eq!(app.state.status, "Playing: KEXP");
        assert_eq!(app.state.current_index, Some(1));
        assert_eq!(
            journal.calls(),
            vec![
                EngineCall::Launch(55.0),
                EngineCall::SetVolume(55.0),
                EngineCall::Play("http://kexp".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_play_ignored_while_playing_and_stop_while_idle() {
        let (mut app, journal) = new_app();

        app.on_key(key(KeyCode::Char('s'))).await;
        assert!(journal.calls().is_empty());

        app.on_key(key(KeyCode::Char('p'))).await;
        assert_eq!(app.state.playback, PlaybackState::Playing);
        let after_play = journal.calls().len();

        app.on_key(key(KeyCode::Char('p'))).await;
        assert_eq!(journal.calls().len(), after_play);

        app.on_key(key(KeyCode::Char('s'))).await;
        assert_eq!(journal.calls().last(), Some(&EngineCall::Stop));
        assert_eq!(app.state.status, "Stopped");
    }

    #[tokio::test]
    async fn test_engine_failure_opens_error_dialog_that_captures_keys() {
        let (mut app, journal) = new_app();
        journal.fail_launch(true);

        app.on_key(key(KeyCode::Char('p'))).await;
        let dialog = app.dialogs.current().cloned().unwrap();
        assert_eq!(dialog.kind, DialogKind::Error);
        assert_eq!(dialog.message, "Failed to play stream Derti Radio:\nmpv binary not found");
        assert_eq!(app.state.playback, PlaybackState::Idle);

        // Swallowed by the dialog.
        app.on_key(key(KeyCode::Char('p'))).await;
        app.on_key(key(KeyCode::Char('q'))).await;
        assert_eq!(journal.launches(), 1);
        assert!(!app.should_quit);

        app.on_key(key(KeyCode::Esc)).await;
        assert!(!app.dialogs.is_open());
    }

    #[tokio::test]
    async fn test_unreadable_file_opens_error_dialog() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = new_app();

        app.dispatch(Action::LoadFile(dir.path().join("missing.txt"))).await;

        let dialog = app.dialogs.current().unwrap();
        assert_eq!(dialog.kind, DialogKind::Error);
        assert!(dialog.message.starts_with("Failed to load stations:\n"));
        assert_eq!(app.state.stations.len(), 1);
        assert_eq!(app.state.status, "Ready");
    }

    #[tokio::test]
    async fn test_missing_explicit_logo_warns_but_placeholder_does_not() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _) = new_app();

        let plain = stations_file(dir.path(), "FIP, http://fip\n");
        app.startup(Some(plain)).await;
        assert!(!app.dialogs.is_open());
        assert_eq!(app.state.status, "Loaded 1 stations from file");

        let with_logo = stations_file(dir.path(), "FIP, http://fip, nope.png\n");
        app.dispatch(Action::LoadFile(with_logo)).await;
        let dialog = app.dialogs.current().unwrap();
        assert_eq!(dialog.kind, DialogKind::Warning);
        assert!(dialog.message.starts_with("Could not load logo: nope.png"));
        assert!(app.state.logo.is_none());
    }

    #[tokio::test]
    async fn test_logo_found_beside_station_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("fip.ppm"), b"P6\n64 32\n255\n").unwrap();
        let path = stations_file(dir.path(), "FIP, http://fip, fip.ppm\n");

        let (mut app, _) = new_app();
        app.dispatch(Action::LoadFile(path)).await;

        assert!(!app.dialogs.is_open());
        let logo = app.state.logo.as_ref().unwrap();
        assert_eq!(logo.dimensions, Some((64, 32)));
        assert_eq!(logo.path, dir.path().join("fip.ppm"));
    }

    #[tokio::test]
    async fn test_volume_keys_step_and_clamp() {
        let (mut app, journal) = new_app();
        assert_eq!(app.state.volume, 55.0);

        for _ in 0..20 {
            app.on_key(key(KeyCode::Right)).await;
        }
        assert_eq!(app.state.volume, 100.0);
        app.on_key(key(KeyCode::Char('-'))).await;
        assert_eq!(app.state.volume, 95.0);
        // No engine yet, so nothing reaches it.
        assert!(journal.calls().is_empty());

        app.on_key(key(KeyCode::Char('p'))).await;
        assert_eq!(journal.calls()[0], EngineCall::Launch(95.0));
    }

    #[tokio::test]
    async fn test_prompt_takes_keys_and_loads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pops.txt"), "KEXP, http://kexp\nFIP, http://fip\n").unwrap();
        let (mut app, journal) = new_app();

        app.prompt.open(dir.path());
        app.sync();
        for c in "pops.txt".chars() {
            app.on_key(key(KeyCode::Char(c))).await;
        }
        assert!(journal.calls().is_empty());
        app.on_key(key(KeyCode::Enter)).await;

        assert!(!app.prompt.is_active());
        assert_eq!(app.state.stations.len(), 2);
        assert_eq!(app.state.current.as_ref().map(|s| s.name.as_str()), Some("KEXP"));

        // Opening again starts in the loaded file's directory.
        app.on_key(key(KeyCode::Char('o'))).await;
        assert!(app.prompt.text().starts_with(&dir.path().display().to_string()));
        app.on_key(key(KeyCode::Esc)).await;
        assert!(!app.prompt.is_active());
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let (mut app, _) = new_app();
        app.on_key(key(KeyCode::Char('q'))).await;
        assert!(app.should_quit);

        let (mut app, _) = new_app();
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)).await;
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_click_on_controls_focuses_and_plays() {
        let (mut app, _) = new_app();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        let controls = app.pane_areas.controls;
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: controls.x + 3,
            row: controls.y + 1,
            modifiers: KeyModifiers::NONE,
        };
        let actions = app.handle_mouse(click);
        assert_eq!(actions, vec![Action::FocusPane(ComponentId::Controls), Action::Play]);
        for action in actions {
            app.dispatch(action).await;
        }
        assert!(app.focus.is_focused(ComponentId::Controls));
        assert_eq!(app.state.playback, PlaybackState::Playing);
    }

    #[tokio::test]
    async fn test_finish_releases_engine_when_restore_fails() {
        let (mut app, journal) = new_app();
        app.dispatch(Action::Play).await;

        let restored = Err(io::Error::other("terminal gone"));
        let err = app.finish(Ok(()), restored).await.unwrap_err();

        assert!(err.to_string().contains("terminal gone"));
        assert_eq!(journal.calls().last(), Some(&EngineCall::Shutdown));
    }

    #[tokio::test]
    async fn test_load_while_playing_keeps_live_station_in_header() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, journal) = new_app();
        app.dispatch(Action::Play).await;

        let path = stations_file(dir.path(), "FIP, http://fip\n");
        app.dispatch(Action::LoadFile(path)).await;
        assert_eq!(
            journal.calls().last(),
            Some(&EngineCall::Play("http://derti.live24.gr/derty1000".to_string()))
        );

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let buffer = terminal.backend().buffer();
        let header: String = (0..80).map(|x| buffer[(x, 1)].symbol()).collect();
        assert!(header.contains("▶ Derti Radio"), "header: {header}");
        assert!(!header.contains("FIP"), "header: {header}");

        assert_eq!(
            app.handle_key(key(KeyCode::Char('y'))),
            vec![Action::CopyToClipboard("http://derti.live24.gr/derty1000".to_string())]
        );

        // Playing again switches to the newly current station.
        app.dispatch(Action::Stop).await;
        app.dispatch(Action::Play).await;
        assert_eq!(
            app.handle_key(key(KeyCode::Char('y'))),
            vec![Action::CopyToClipboard("http://fip".to_string())]
        );
    }

    #[test]
    fn test_draw_shows_station_and_status() {
        let (mut app, _) = new_app();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Derti Radio"));
        assert!(text.contains("Ready"));
        assert!(text.contains("Stations (1)"));
    }
}
