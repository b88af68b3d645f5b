use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use icsdrop_core::FileSaver;
use owo_colors::OwoColorize;

use crate::config::Config;
use crate::input::load_events;

pub fn run(
    cfg: &Config,
    events_file: &Path,
    name: Option<String>,
    out_dir: Option<PathBuf>,
) -> Result<()> {
    let events = load_events(events_file)?;
    let calendar = super::build_calendar(&cfg.ics, &events)?;

    let name = match name {
        Some(n) => n,
        None => default_name(events_file)?,
    };
    let dir = resolve_out_dir(out_dir, cfg);

    let saver = FileSaver::new(&dir);
    calendar
        .download(&name, &saver)
        .with_context(|| format!("Failed to write {}.ics to {}", name, dir.display()))?;

    println!(
        "{}",
        format!(
            "  Exported {} event(s) to {}",
            calendar.len(),
            dir.join(format!("{}.ics", name)).display()
        )
        .green()
    );

    Ok(())
}

/// --out-dir, then output_dir from config, then the current directory.
pub fn resolve_out_dir(out_dir: Option<PathBuf>, cfg: &Config) -> PathBuf {
    out_dir
        .or_else(|| cfg.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_name(events_file: &Path) -> Result<String> {
    events_file
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .with_context(|| format!("Cannot derive a file name from {}", events_file.display()))
}
