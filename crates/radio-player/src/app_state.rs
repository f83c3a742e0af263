//! AppState: shared read-only data passed to all components during render/event.
//!
//! Components read this but never mutate it.  The App event loop is the only
//! thing that writes to AppState, by copying out of the controller after every
//! action.

use radio_core::controller::{Controller, PlaybackState};
use radio_core::engine::EngineLauncher;
use radio_core::logo::LogoInfo;
use radio_core::station::Station;

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub stations: Vec<Station>,
    pub current: Option<Station>,
    pub current_index: Option<usize>,
    /// What the engine is streaming.  Lags `current` after a load mid-playback.
    pub playing: Option<Station>,
    pub playback: PlaybackState,
    pub status: String,
    /// 0–100.
    pub volume: f32,
    /// Logo of the current station, when it could be probed.
    pub logo: Option<LogoInfo>,
    /// Latest WARN/ERROR line from the log layer.
    pub last_log: Option<String>,
    pub client_name: String,
}

impl AppState {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
            ..Self::default()
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playback == PlaybackState::Playing
    }

    /// The station the header and copy-URL describe: the live stream while
    /// one runs, otherwise the station `play` would start.
    pub fn now_playing(&self) -> Option<&Station> {
        self.playing.as_ref().or(self.current.as_ref())
    }

    /// Copy the controller's view of the world.  The logo and log line are
    /// owned by the App and left untouched.
    pub fn refresh<L: EngineLauncher>(&mut self, controller: &Controller<L>) {
        if self.stations.as_slice() != controller.registry().stations() {
            self.stations = controller.registry().stations().to_vec();
        }
        self.current = controller.current_station().cloned();
        self.current_index = controller.current_index();
        self.playing = controller.playing_station().cloned();
        self.playback = controller.state();
        self.status = controller.status().to_string();
        self.volume = controller.volume();
    }
}
