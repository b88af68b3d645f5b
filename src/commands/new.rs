use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use clap::Args;
use icsdrop_core::{Event, FileSaver, Organizer, RecurrenceRule};
use owo_colors::OwoColorize;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct NewArgs {
    /// Event title
    pub subject: String,

    /// Start (e.g. "2024-03-20T15:00", "2024-03-20 15:00" or "2024-03-20")
    #[arg(short, long)]
    pub begin: String,

    /// End, same formats as --begin (defaults to 1 hour later, or 1 day for dates)
    #[arg(short, long)]
    pub end: Option<String>,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(short, long)]
    pub location: Option<String>,

    #[arg(long)]
    pub url: Option<String>,

    /// Language tag for the SUMMARY line
    #[arg(long, default_value = "en-us")]
    pub language: String,

    #[arg(long, requires = "organizer_email")]
    pub organizer_name: Option<String>,

    #[arg(long, requires = "organizer_name")]
    pub organizer_email: Option<String>,

    /// Recurrence frequency: YEARLY, MONTHLY, WEEKLY or DAILY
    #[arg(long)]
    pub freq: Option<String>,

    /// Last recurrence date (YYYY-MM-DD or RFC 3339)
    #[arg(long, requires = "freq")]
    pub until: Option<String>,

    #[arg(long, requires = "freq")]
    pub interval: Option<u32>,

    #[arg(long, requires = "freq")]
    pub count: Option<u32>,

    /// Weekday codes, comma separated (e.g. MO,WE,FR)
    #[arg(long, requires = "freq", value_delimiter = ',')]
    pub byday: Vec<String>,

    /// Export to <name>.ics instead of printing
    #[arg(short, long)]
    pub out: Option<String>,

    /// Directory for --out (defaults to output_dir from config, then ".")
    #[arg(long, requires = "out")]
    pub out_dir: Option<PathBuf>,
}

pub fn run(cfg: &Config, args: NewArgs) -> Result<()> {
    let out = args.out.clone();
    let out_dir = args.out_dir.clone();
    let event = build_event(args)?;

    let calendar = super::build_calendar(&cfg.ics, std::slice::from_ref(&event))?;

    match out {
        Some(name) => {
            let dir = super::export::resolve_out_dir(out_dir, cfg);
            calendar
                .download(&name, &FileSaver::new(&dir))
                .with_context(|| format!("Failed to write {}.ics to {}", name, dir.display()))?;
            println!(
                "{}",
                format!("  Created: {} ({})", event.subject, dir.join(format!("{}.ics", name)).display())
                    .green()
            );
        }
        None => println!("{}", calendar.calendar()),
    }

    Ok(())
}

fn build_event(args: NewArgs) -> Result<Event> {
    let (begin, date_only) = parse_datetime(&args.begin)?;
    let stop = match &args.end {
        Some(end) => parse_datetime(end)?.0,
        None => default_end(begin, date_only),
    };

    let mut event = Event::new(args.language, args.subject, begin, stop);
    event.description = args.description;
    event.location = args.location;
    event.url = args.url;

    if let (Some(name), Some(email)) = (args.organizer_name, args.organizer_email) {
        event.organizer = Some(Organizer { name, email });
    }

    if let Some(freq) = args.freq {
        let mut rule = RecurrenceRule::new(freq);
        rule.until = args.until.as_deref().map(parse_until).transpose()?;
        rule.interval = args.interval;
        rule.count = args.count;
        if !args.byday.is_empty() {
            rule = rule.with_byday(args.byday);
        }
        event.recurrence_rule = Some(rule);
    }

    Ok(event)
}

/// Parse a local date or date-time. The flag reports a date-only input.
fn parse_datetime(input: &str) -> Result<(NaiveDateTime, bool)> {
    let input = input.trim();

    for fmt in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Ok((dt, false));
        }
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        anyhow::anyhow!(
            "Could not parse date/time: \"{}\". Expected YYYY-MM-DD or YYYY-MM-DDTHH:MM",
            input
        )
    })?;

    Ok((date.and_time(chrono::NaiveTime::MIN), true))
}

fn parse_until(input: &str) -> Result<DateTime<Utc>> {
    icsdrop_core::event::parse_until(input).ok_or_else(|| {
        anyhow::anyhow!(
            "Could not parse --until: \"{}\". Expected YYYY-MM-DD or RFC 3339",
            input
        )
    })
}

fn default_end(begin: NaiveDateTime, date_only: bool) -> NaiveDateTime {
    if date_only {
        begin + Duration::days(1)
    } else {
        begin + Duration::hours(1)
    }
}
