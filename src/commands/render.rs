use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::input::load_events;

pub fn run(cfg: &Config, events_file: &Path) -> Result<()> {
    let events = load_events(events_file)?;
    let calendar = super::build_calendar(&cfg.ics, &events)?;

    println!("{}", calendar.calendar());

    Ok(())
}
