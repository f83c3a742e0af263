use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::engine::EngineOptions;
use super::platform;
use super::station::Station;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub stations: StationsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Starting volume, 0–100.
    #[serde(default = "default_volume")]
    pub default_volume: f32,
    /// Name mpv reports to the audio server.
    #[serde(default = "default_client_name")]
    pub audio_client_name: String,
    /// Let mpv resolve page URLs through yt-dlp.
    #[serde(default = "default_ytdl")]
    pub ytdl: bool,
    /// Only look for mpv on PATH, skipping a copy beside the executable.
    #[serde(default)]
    pub use_system_mpv: bool,
}

/// The built-in station and an optional list to load at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationsConfig {
    #[serde(default = "default_station_name")]
    pub default_name: String,
    #[serde(default = "default_station_url")]
    pub default_url: String,
    /// Station list file loaded on startup, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stations_file: Option<PathBuf>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            default_volume: default_volume(),
            audio_client_name: default_client_name(),
            ytdl: default_ytdl(),
            use_system_mpv: false,
        }
    }
}

impl Default for StationsConfig {
    fn default() -> Self {
        Self {
            default_name: default_station_name(),
            default_url: default_station_url(),
            stations_file: None,
        }
    }
}

fn default_volume() -> f32 {
    55.0
}

fn default_client_name() -> String {
    "Your Personal Online Radio Player".to_string()
}

fn default_ytdl() -> bool {
    true
}

fn default_station_name() -> String {
    "Derti Radio".to_string()
}

fn default_station_url() -> String {
    "http://derti.live24.gr/derty1000".to_string()
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            client_name: self.player.audio_client_name.clone(),
            ytdl: self.player.ytdl,
            initial_volume: self.player.default_volume,
        }
    }

    pub fn default_station(&self) -> Station {
        Station::new(
            self.stations.default_name.clone(),
            self.stations.default_url.clone(),
            None,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::station::DEFAULT_LOGO;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.player.default_volume, 55.0);
        assert!(config.player.ytdl);
        assert!(!config.player.use_system_mpv);
        assert!(config.stations.stations_file.is_none());
        assert!(Config::config_path().ends_with("radioplayer/config.toml"));

        let station = config.default_station();
        assert_eq!(station.name, "Derti Radio");
        assert_eq!(station.url, "http://derti.live24.gr/derty1000");
        assert_eq!(station.logo, DEFAULT_LOGO);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
[player]
default_volume = 20.0

[stations]
stations_file = "/home/me/stations.txt"
"#,
        )
        .unwrap();
        assert_eq!(config.player.default_volume, 20.0);
        assert_eq!(
            config.player.audio_client_name,
            "Your Personal Online Radio Player"
        );
        assert_eq!(config.stations.default_name, "Derti Radio");
        assert_eq!(
            config.stations.stations_file,
            Some(PathBuf::from("/home/me/stations.txt"))
        );
        assert_eq!(config.engine_options().initial_volume, 20.0);
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.player.audio_client_name, config.player.audio_client_name);
        assert_eq!(back.stations.default_url, config.stations.default_url);
    }
}
