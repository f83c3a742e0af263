//! Controller: owns the station registry and the playback session.
//!
//! Every user action maps to exactly one method here.  Methods run to
//! completion before the next event is handled, so the controller is owned by
//! the app event loop and needs no locking.
//!
//! The engine is created on the first successful `play`, kept for the rest of
//! the process, and released in [`Controller::shutdown`].

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::engine::{Engine, EngineLauncher, EngineOptions};
use crate::error::ControllerError;
use crate::registry::StationRegistry;
use crate::station::{self, Station};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
}

/// Human-readable line describing the last significant transition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Ready,
    Loaded(usize),
    Playing(String),
    Stopped,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ready => write!(f, "Ready"),
            Status::Loaded(n) => write!(f, "Loaded {} stations from file", n),
            Status::Playing(name) => write!(f, "Playing: {}", name),
            Status::Stopped => write!(f, "Stopped"),
        }
    }
}

/// Playback session.  `state == Playing` implies `playing` and `engine` are
/// both set.  `current` is what the next `play` will start; `playing` is what
/// the engine is streaming, and the two differ after a load mid-playback.
pub struct Session<E> {
    engine: Option<E>,
    current: Option<Station>,
    current_index: Option<usize>,
    playing: Option<Station>,
    volume: f32,
    state: PlaybackState,
}

impl<E> Session<E> {
    fn new(volume: f32) -> Self {
        Self {
            engine: None,
            current: None,
            current_index: None,
            playing: None,
            volume: clamp_volume(volume),
            state: PlaybackState::Idle,
        }
    }

    fn point_at(&mut self, idx: usize, station: &Station) {
        self.current = Some(station.clone());
        self.current_index = Some(idx);
    }
}

pub struct Controller<L: EngineLauncher> {
    launcher: L,
    options: EngineOptions,
    registry: StationRegistry,
    session: Session<L::Engine>,
    status: Status,
    /// Directory of the last loaded station file, for resolving relative logos.
    source_dir: Option<PathBuf>,
}

impl<L: EngineLauncher> Controller<L> {
    /// Build a controller whose registry holds only `default_station`, which
    /// is also made current.
    pub fn new(launcher: L, options: EngineOptions, default_station: Station) -> Self {
        let mut session = Session::new(options.initial_volume);
        session.point_at(0, &default_station);
        Self {
            launcher,
            options,
            registry: StationRegistry::new(vec![default_station]),
            session,
            status: Status::Ready,
            source_dir: None,
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────────

    pub fn registry(&self) -> &StationRegistry {
        &self.registry
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn current_station(&self) -> Option<&Station> {
        self.session.current.as_ref()
    }

    /// The station the engine is streaming, if any.
    pub fn playing_station(&self) -> Option<&Station> {
        self.session.playing.as_ref()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.session.current_index
    }

    pub fn state(&self) -> PlaybackState {
        self.session.state
    }

    pub fn is_playing(&self) -> bool {
        self.session.state == PlaybackState::Playing
    }

    pub fn volume(&self) -> f32 {
        self.session.volume
    }

    pub fn has_engine(&self) -> bool {
        self.session.engine.is_some()
    }

    pub fn source_dir(&self) -> Option<&Path> {
        self.source_dir.as_deref()
    }

    // ── loading ───────────────────────────────────────────────────────────────

    /// Read a station list file and replace the registry with its contents.
    /// On I/O failure nothing changes.
    pub async fn load_file(&mut self, path: &Path) -> Result<usize, ControllerError> {
        let file = station::read_station_file(path)
            .await
            .map_err(|source| ControllerError::FileUnreadable {
                path: path.to_path_buf(),
                source,
            })?;

        if !file.skipped.is_empty() {
            debug!(
                "stations: {} malformed line(s) skipped in {}",
                file.skipped.len(),
                path.display()
            );
        }

        self.source_dir = path.parent().map(Path::to_path_buf);
        let count = self.replace_stations(file.stations);
        info!("Loaded {} stations from {}", count, path.display());
        Ok(count)
    }

    /// Replace the registry wholesale and point at its first entry.
    ///
    /// Playback is left alone, so `playing_station` keeps naming the old
    /// stream until the next `play`.  An empty list keeps the previous current
    /// station so a running stream still has something to describe.
    pub fn replace_stations(&mut self, stations: Vec<Station>) -> usize {
        self.registry.replace(stations);
        match self.registry.first().cloned() {
            Some(first) => self.session.point_at(0, &first),
            None => self.session.current_index = None,
        }
        let count = self.registry.len();
        self.status = Status::Loaded(count);
        count
    }

    // ── playback ──────────────────────────────────────────────────────────────

    /// Point at `idx`, stop whatever is playing, and play the new station.
    /// Out-of-range indices are ignored.
    pub async fn select(&mut self, idx: usize) -> Result<(), ControllerError> {
        let Some(station) = self.registry.get(idx).cloned() else {
            debug!(
                "select: index {} out of range ({} stations)",
                idx,
                self.registry.len()
            );
            return Ok(());
        };

        info!("Selected station: {}", station.name);
        self.session.point_at(idx, &station);
        self.stop().await;
        self.play().await
    }

    pub async fn play(&mut self) -> Result<(), ControllerError> {
        let Some(station) = self.session.current.clone() else {
            warn!("play: no station selected");
            return Err(ControllerError::NoStationSelected);
        };

        let result = match self.ensure_engine(&station.name).await {
            Ok(engine) => engine
                .play(&station.url)
                .await
                .map_err(|e| ControllerError::engine_failure(&station.name, &e)),
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                info!("Playing '{}': {}", station.name, station.url);
                self.session.state = PlaybackState::Playing;
                self.session.playing = Some(station.clone());
                self.status = Status::Playing(station.name);
                Ok(())
            }
            Err(e) => {
                warn!("play: {}", e);
                self.session.state = PlaybackState::Idle;
                self.session.playing = None;
                if matches!(self.status, Status::Playing(_)) {
                    self.status = Status::Stopped;
                }
                Err(e)
            }
        }
    }

    /// Halt playback.  Does nothing before the engine exists.
    pub async fn stop(&mut self) {
        let Some(engine) = self.session.engine.as_mut() else {
            return;
        };
        info!("Stopping playback");
        if let Err(e) = engine.stop().await {
            warn!("stop: engine error ignored: {}", e);
        }
        self.session.state = PlaybackState::Idle;
        self.session.playing = None;
        self.status = Status::Stopped;
    }

    /// Remember `volume` (clamped to 0–100) and apply it if an engine exists.
    pub async fn set_volume(&mut self, volume: f32) {
        let volume = clamp_volume(volume);
        self.session.volume = volume;
        if let Some(engine) = self.session.engine.as_mut() {
            if let Err(e) = engine.set_volume(volume).await {
                warn!("set_volume: engine error: {}", e);
            }
        }
    }

    /// Release the engine.  Call once, on the way out.
    pub async fn shutdown(&mut self) {
        if let Some(mut engine) = self.session.engine.take() {
            info!("Shutting down playback engine");
            engine.shutdown().await;
        }
        self.session.state = PlaybackState::Idle;
        self.session.playing = None;
    }

    // ── engine management ─────────────────────────────────────────────────────

    async fn ensure_engine(&mut self, station: &str) -> Result<&mut L::Engine, ControllerError> {
        if self.session.engine.is_none() {
            let mut options = self.options.clone();
            options.initial_volume = self.session.volume;

            info!("Starting playback engine");
            let mut engine = self
                .launcher
                .launch(&options)
                .await
                .map_err(|e| ControllerError::engine_failure(station, &e))?;

            if let Err(e) = engine.set_volume(self.session.volume).await {
                warn!("engine: initial volume not applied: {}", e);
            }
            self.session.engine = Some(engine);
        }

        self.session.engine.as_mut().ok_or_else(|| ControllerError::EngineStartFailure {
            station: station.to_string(),
            reason: "playback engine unavailable".to_string(),
        })
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        return 0.0;
    }
    volume.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{EngineCall, RecordingLauncher};

    fn default_station() -> Station {
        Station::new("Derti Radio", "http://derti.live24.gr/derty1000", None)
    }

    fn controller() -> (Controller<RecordingLauncher>, RecordingLauncher) {
        let launcher = RecordingLauncher::new();
        let journal = launcher.clone();
        let options = EngineOptions {
            initial_volume: 55.0,
            ..EngineOptions::default()
        };
        (Controller::new(launcher, options, default_station()), journal)
    }

    fn two_stations() -> Vec<Station> {
        vec![
            Station::new("FIP", "http://fip", Some("fip.png".to_string())),
            Station::new("KEXP", "http://kexp", None),
        ]
    }

    #[test]
    fn test_starts_ready_on_default_station() {
        let (ctl, journal) = controller();
        assert_eq!(ctl.status().to_string(), "Ready");
        assert_eq!(ctl.current_index(), Some(0));
        assert_eq!(
            ctl.current_station().map(|s| s.url.as_str()),
            Some("http://derti.live24.gr/derty1000")
        );
        assert_eq!(ctl.state(), PlaybackState::Idle);
        assert!(journal.calls().is_empty());
    }

    #[test]
    fn test_replace_points_at_first_entry() {
        let (mut ctl, _) = controller();
        let count = ctl.replace_stations(two_stations());
        assert_eq!(count, 2);
        assert_eq!(ctl.current_index(), Some(0));
        assert_eq!(ctl.current_station().map(|s| s.url.as_str()), Some("http://fip"));
        assert_eq!(ctl.status().to_string(), "Loaded 2 stations from file");
    }

    #[test]
    fn test_replace_with_empty_list_keeps_current() {
        let (mut ctl, _) = controller();
        ctl.replace_stations(Vec::new());
        assert!(ctl.registry().is_empty());
        assert_eq!(ctl.current_index(), None);
        assert_eq!(ctl.current_station().map(|s| s.name.as_str()), Some("Derti Radio"));
        assert_eq!(ctl.status().to_string(), "Loaded 0 stations from file");
    }

    #[tokio::test]
    async fn test_select_out_of_range_is_noop() {
        let (mut ctl, journal) = controller();
        ctl.replace_stations(two_stations());
        ctl.select(0).await.unwrap();
        let calls_before = journal.calls().len();

        ctl.select(2).await.unwrap();
        ctl.select(usize::MAX).await.unwrap();

        assert_eq!(ctl.current_index(), Some(0));
        assert_eq!(ctl.current_station().map(|s| s.url.as_str()), Some("http://fip"));
        assert!(ctl.is_playing());
        assert_eq!(journal.calls().len(), calls_before);
    }

    #[tokio::test]
    async fn test_play_without_station_never_launches() {
        let (mut ctl, journal) = controller();
        ctl.session.current = None;
        ctl.session.current_index = None;

        let err = ctl.play().await.unwrap_err();
        assert!(matches!(err, ControllerError::NoStationSelected));
        assert!(!ctl.has_engine());
        assert_eq!(journal.launches(), 0);
        assert_eq!(ctl.state(), PlaybackState::Idle);
        assert_eq!(ctl.status(), &Status::Ready);
    }

    #[tokio::test]
    async fn test_play_stop_play_ends_playing_same_station() {
        let (mut ctl, journal) = controller();
        ctl.play().await.unwrap();
        ctl.stop().await;
        assert_eq!(ctl.status().to_string(), "Stopped");
        ctl.play().await.unwrap();

        assert_eq!(ctl.state(), PlaybackState::Playing);
        assert_eq!(ctl.status().to_string(), "Playing: Derti Radio");
        assert_eq!(
            ctl.current_station().map(|s| s.url.as_str()),
            Some("http://derti.live24.gr/derty1000")
        );
        assert_eq!(journal.launches(), 1);
    }

    #[tokio::test]
    async fn test_select_while_playing_stops_then_plays() {
        let (mut ctl, journal) = controller();
        ctl.replace_stations(two_stations());
        ctl.play().await.unwrap();
        journal.clear();

        ctl.select(1).await.unwrap();

        assert_eq!(
            journal.calls(),
            vec![EngineCall::Stop, EngineCall::Play("http://kexp".to_string())]
        );
        assert_eq!(ctl.current_index(), Some(1));
        assert_eq!(ctl.status().to_string(), "Playing: KEXP");
    }

    #[tokio::test]
    async fn test_volume_before_first_play_is_applied_at_launch() {
        let (mut ctl, journal) = controller();
        ctl.set_volume(30.0).await;
        assert!(journal.calls().is_empty());

        ctl.play().await.unwrap();

        assert_eq!(
            journal.calls(),
            vec![
                EngineCall::Launch(30.0),
                EngineCall::SetVolume(30.0),
                EngineCall::Play("http://derti.live24.gr/derty1000".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_volume_applied_immediately_once_engine_exists() {
        let (mut ctl, journal) = controller();
        ctl.play().await.unwrap();
        journal.clear();
        ctl.set_volume(80.0).await;
        assert_eq!(journal.calls(), vec![EngineCall::SetVolume(80.0)]);
    }

    #[tokio::test]
    async fn test_volume_is_clamped() {
        let (mut ctl, _) = controller();
        ctl.set_volume(140.0).await;
        assert_eq!(ctl.volume(), 100.0);
        ctl.set_volume(-3.0).await;
        assert_eq!(ctl.volume(), 0.0);
    }

    #[tokio::test]
    async fn test_stop_before_engine_is_noop() {
        let (mut ctl, journal) = controller();
        ctl.stop().await;
        assert!(journal.calls().is_empty());
        assert_eq!(ctl.status(), &Status::Ready);
    }

    #[tokio::test]
    async fn test_stop_is_idempotent_and_swallows_engine_errors() {
        let (mut ctl, journal) = controller();
        ctl.play().await.unwrap();
        journal.fail_stop(true);
        ctl.stop().await;
        ctl.stop().await;
        assert_eq!(ctl.state(), PlaybackState::Idle);
        assert_eq!(ctl.status(), &Status::Stopped);
    }

    #[tokio::test]
    async fn test_launch_failure_leaves_idle_and_retries_later() {
        let (mut ctl, journal) = controller();
        journal.fail_launch(true);

        let err = ctl.play().await.unwrap_err();
        assert!(matches!(err, ControllerError::EngineStartFailure { .. }));
        assert!(!ctl.has_engine());
        assert_eq!(ctl.state(), PlaybackState::Idle);

        journal.fail_launch(false);
        ctl.play().await.unwrap();
        assert!(ctl.is_playing());
        assert_eq!(journal.launches(), 2);
    }

    #[tokio::test]
    async fn test_play_failure_does_not_claim_playing() {
        let (mut ctl, journal) = controller();
        ctl.replace_stations(two_stations());
        ctl.play().await.unwrap();
        journal.fail_play(true);

        let err = ctl.select(1).await.unwrap_err();
        assert!(matches!(err, ControllerError::EngineStartFailure { ref station, .. } if station == "KEXP"));
        assert_eq!(ctl.state(), PlaybackState::Idle);
        assert_eq!(ctl.status(), &Status::Stopped);
        // The pointer still moved.
        assert_eq!(ctl.current_index(), Some(1));
    }

    #[tokio::test]
    async fn test_replay_failure_reverts_status() {
        let (mut ctl, journal) = controller();
        ctl.play().await.unwrap();
        journal.fail_play(true);
        assert!(ctl.play().await.is_err());
        assert!(!ctl.is_playing());
        assert_eq!(ctl.status(), &Status::Stopped);
    }

    #[tokio::test]
    async fn test_load_keeps_playback_running() {
        let (mut ctl, journal) = controller();
        ctl.play().await.unwrap();
        journal.clear();
        ctl.replace_stations(two_stations());
        assert!(ctl.is_playing());
        assert!(journal.calls().is_empty());
        assert_eq!(ctl.current_station().map(|s| s.name.as_str()), Some("FIP"));
        assert_eq!(ctl.playing_station().map(|s| s.name.as_str()), Some("Derti Radio"));
    }

    #[tokio::test]
    async fn test_playing_station_follows_engine() {
        let (mut ctl, journal) = controller();
        assert!(ctl.playing_station().is_none());

        ctl.play().await.unwrap();
        ctl.replace_stations(two_stations());
        ctl.play().await.unwrap();
        assert_eq!(ctl.playing_station().map(|s| s.url.as_str()), Some("http://fip"));

        ctl.stop().await;
        assert!(ctl.playing_station().is_none());

        journal.fail_play(true);
        assert!(ctl.play().await.is_err());
        assert!(ctl.playing_station().is_none());
    }

    #[tokio::test]
    async fn test_shutdown_releases_engine() {
        let (mut ctl, journal) = controller();
        ctl.play().await.unwrap();
        ctl.shutdown().await;
        assert!(!ctl.has_engine());
        assert_eq!(journal.calls().last(), Some(&EngineCall::Shutdown));
    }
}
