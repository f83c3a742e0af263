use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Logo used for stations whose line carries no third field.
pub const DEFAULT_LOGO: &str = "default-logo.png";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub url: String,
    /// Logo path exactly as written in the station file, or [`DEFAULT_LOGO`].
    pub logo: String,
}

impl Station {
    pub fn new(name: impl Into<String>, url: impl Into<String>, logo: Option<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            logo: logo.unwrap_or_else(|| DEFAULT_LOGO.to_string()),
        }
    }

    pub fn has_default_logo(&self) -> bool {
        self.logo == DEFAULT_LOGO
    }
}

/// Result of parsing a station list: the usable stations plus the 1-based
/// line numbers that were skipped as malformed.
#[derive(Debug, Clone, Default)]
pub struct StationFile {
    pub stations: Vec<Station>,
    pub skipped: Vec<usize>,
}

/// Parse `name, url[, logo]` records, one per line.
///
/// Blank lines and lines starting with `#` are ignored.  Lines with fewer than
/// two comma-separated fields are skipped rather than rejected; there is no
/// quoting, so a comma always separates fields.
pub fn parse_station_list(content: &str) -> StationFile {
    let mut file = StationFile::default();

    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split(',').map(str::trim).collect();
        if parts.len() < 2 {
            debug!("stations: skipping malformed line {}: {:?}", lineno + 1, line);
            file.skipped.push(lineno + 1);
            continue;
        }

        // A trailing comma leaves an empty third field; treat it as omitted.
        let logo = parts
            .get(2)
            .filter(|logo| !logo.is_empty())
            .map(|logo| logo.to_string());

        file.stations.push(Station::new(parts[0], parts[1], logo));
    }

    file
}

/// Read and parse a station list file.  I/O errors are returned untouched so
/// the caller can decide how to surface them.
pub async fn read_station_file(path: &Path) -> std::io::Result<StationFile> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(parse_station_list(&content))
}
