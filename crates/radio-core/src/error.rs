use std::path::PathBuf;

/// Failures a user action can end in.  Each one is terminal to the action
/// that caused it and never to the process.
///
/// Malformed station lines are not represented here: they are skipped while
/// parsing and only show up in [`crate::station::StationFile::skipped`].
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("Failed to load stations:\n{source}")]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No station selected")]
    NoStationSelected,

    #[error("Failed to play stream {station}:\n{reason}")]
    EngineStartFailure { station: String, reason: String },

    #[error("Could not load logo: {path} ({reason})")]
    LogoMissing { path: String, reason: String },
}

/// How loudly the UI should report an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl ControllerError {
    pub fn severity(&self) -> Severity {
        match self {
            Self::NoStationSelected | Self::LogoMissing { .. } => Severity::Warning,
            Self::FileUnreadable { .. } | Self::EngineStartFailure { .. } => Severity::Error,
        }
    }

    pub fn engine_failure(station: &str, err: &anyhow::Error) -> Self {
        Self::EngineStartFailure {
            station: station.to_string(),
            reason: format!("{:#}", err),
        }
    }
}
