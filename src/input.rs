//! Events files: TOML (`[[events]]`) or JSON (`{"events": [...]}`).

use std::path::Path;

use anyhow::{Context, Result};
use icsdrop_core::Event;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct EventsFile {
    #[serde(default)]
    events: Vec<Event>,
}

/// Read events from `path`, choosing the format by extension.
pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read events file at {}", path.display()))?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let file: EventsFile = match extension.as_deref() {
        Some("toml") => toml::from_str(&contents)
            .with_context(|| format!("Failed to parse TOML events file at {}", path.display()))?,
        Some("json") => serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse JSON events file at {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported events file {}: expected a .toml or .json extension",
            path.display()
        ),
    };

    Ok(file.events)
}
