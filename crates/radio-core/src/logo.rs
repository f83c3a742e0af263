//! Station logo probing.
//!
//! A logo is only ever displayed, never decoded here: the format is guessed
//! from the file's leading bytes and the dimensions come from its header.

use std::fmt;
use std::path::{Path, PathBuf};

use image::{ImageFormat, ImageReader};
use tracing::debug;

use crate::error::ControllerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoFormat {
    Png,
    Gif,
    Ppm,
}

impl LogoFormat {
    /// PBM/PGM/PPM all read as one family.
    fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Png => Some(LogoFormat::Png),
            ImageFormat::Gif => Some(LogoFormat::Gif),
            ImageFormat::Pnm => Some(LogoFormat::Ppm),
            _ => None,
        }
    }
}

impl fmt::Display for LogoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LogoFormat::Png => "PNG",
            LogoFormat::Gif => "GIF",
            LogoFormat::Ppm => "PPM",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoInfo {
    pub path: PathBuf,
    pub format: LogoFormat,
    pub dimensions: Option<(u32, u32)>,
}

impl LogoInfo {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Locate and identify a logo.  Relative paths are tried against `base_dir`
/// (the station file's directory) first, then as given.
pub fn probe_logo(logo: &str, base_dir: Option<&Path>) -> Result<LogoInfo, ControllerError> {
    let candidates = candidate_paths(logo, base_dir);

    let mut last_err = None;
    for path in candidates {
        let reader = match ImageReader::open(&path).and_then(|r| r.with_guessed_format()) {
            Ok(reader) => reader,
            Err(e) => {
                last_err = Some(e);
                continue;
            }
        };

        let Some(format) = reader.format().and_then(LogoFormat::from_image_format) else {
            return Err(ControllerError::LogoMissing {
                path: logo.to_string(),
                reason: "unsupported image format".to_string(),
            });
        };

        let dimensions = match reader.into_dimensions() {
            Ok(dims) => Some(dims),
            Err(e) => {
                debug!("logo: no dimensions for {}: {}", path.display(), e);
                None
            }
        };
        return Ok(LogoInfo {
            path,
            format,
            dimensions,
        });
    }

    Err(ControllerError::LogoMissing {
        path: logo.to_string(),
        reason: last_err
            .map(|e| e.to_string())
            .unwrap_or_else(|| "empty path".to_string()),
    })
}

fn candidate_paths(logo: &str, base_dir: Option<&Path>) -> Vec<PathBuf> {
    if logo.is_empty() {
        return Vec::new();
    }
    let path = PathBuf::from(logo);
    let mut candidates = Vec::with_capacity(2);
    if path.is_relative() {
        if let Some(dir) = base_dir {
            candidates.push(dir.join(&path));
        }
    }
    candidates.push(path);
    candidates
}
