//! Playback engine seam.
//!
//! The controller never talks to mpv directly.  It asks an [`EngineLauncher`]
//! for an [`Engine`] the first time something has to play, then keeps that
//! engine for the rest of the process and only ever stops it.  Streaming,
//! buffering and decoding all happen behind this trait.

/// Options handed to the launcher when the engine is first constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    /// Name the engine reports to the audio server (PulseAudio/PipeWire).
    pub client_name: String,
    /// Let the engine resolve page URLs through yt-dlp.
    pub ytdl: bool,
    /// Volume the engine starts at, 0–100.
    pub initial_volume: f32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            client_name: "Your Personal Online Radio Player".to_string(),
            ytdl: true,
            initial_volume: 55.0,
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait Engine {
    /// Start streaming `url`, replacing whatever was playing.
    async fn play(&mut self, url: &str) -> anyhow::Result<()>;

    /// Halt playback.  The engine stays alive for the next `play`.
    async fn stop(&mut self) -> anyhow::Result<()>;

    /// Volume in percent, 0–100.
    async fn set_volume(&mut self, volume: f32) -> anyhow::Result<()>;

    /// Release the engine at process shutdown.
    async fn shutdown(&mut self) {}
}

#[allow(async_fn_in_trait)]
pub trait EngineLauncher {
    type Engine: Engine;

    async fn launch(&mut self, options: &EngineOptions) -> anyhow::Result<Self::Engine>;
}
