pub mod export;
pub mod new;
pub mod render;

use anyhow::{Context, Result};
use icsdrop_core::{Event, IcsCalendar, IcsOptions};

/// Feed `events` into a fresh calendar, failing on the first rejected event.
pub fn build_calendar(options: &IcsOptions, events: &[Event]) -> Result<IcsCalendar> {
    let mut calendar = IcsCalendar::new(options.clone());

    for (i, event) in events.iter().enumerate() {
        calendar
            .add_event(event)
            .with_context(|| format!("Event #{} (\"{}\") was rejected", i + 1, event.subject))?;
    }

    Ok(calendar)
}
