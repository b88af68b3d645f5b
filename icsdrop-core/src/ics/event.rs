//! VEVENT generation.

use chrono::{Datelike, NaiveDateTime, Timelike};

use super::calendar::join_lines;
use super::datetime::{format_date_time, format_span};
use super::escape::{escape_param_value, escape_text};
use crate::event::Event;
use crate::recurrence::ValidatedRule;

/// Build a UID from the generation instant and a per-calendar tick:
/// `<weekday><month><year>-<hour><minute><second><tick>@<domain>`.
///
/// Weekday counts from Sunday = 0, month from January = 0, and no field is
/// padded. The tick keeps events generated within the same second apart.
pub fn generate_uid(now: NaiveDateTime, tick: u64, uid_domain: &str) -> String {
    format!(
        "{}{}{}-{}{}{}{}@{}",
        now.weekday().num_days_from_sunday(),
        now.month0(),
        now.year(),
        now.hour(),
        now.minute(),
        now.second(),
        tick,
        uid_domain
    )
}

/// Generate one VEVENT block.
///
/// Properties are emitted in a fixed order and absent ones (URL, LOCATION,
/// ORGANIZER) are left out entirely. A recurrence rule is written as a second
/// line of the DESCRIPTION value.
pub fn generate_vevent(
    event: &Event,
    rrule: Option<&ValidatedRule>,
    uid: &str,
    now: NaiveDateTime,
    line_ending: &str,
) -> String {
    let span = format_span(event.begin, event.stop);

    let mut description = format!("DESCRIPTION:{}", escape_text(&event.description));
    if let Some(rule) = rrule {
        description.push('\n');
        description.push_str(&rule.to_rrule_line());
    }

    let url = non_empty(&event.url)
        .map(|url| format!("URL:{}", url))
        .unwrap_or_default();
    let location = non_empty(&event.location)
        .map(|loc| format!("LOCATION:{}", escape_text(loc)))
        .unwrap_or_default();
    let organizer = event
        .organizer
        .as_ref()
        .map(|org| {
            format!(
                "ORGANIZER;CN={}:MAILTO:{}",
                escape_param_value(&org.name),
                org.email
            )
        })
        .unwrap_or_default();

    join_lines::<&str>(
        &[
            "BEGIN:VEVENT",
            &format!("UID:{}", uid),
            &url,
            &description,
            &format!("DTSTAMP;VALUE=DATE-TIME:{}", format_date_time(now)),
            &format!("DTSTART;VALUE=DATE-TIME:{}", span.start),
            &format!("DTEND;VALUE=DATE-TIME:{}", span.end),
            &location,
            &organizer,
            &format!(
                "SUMMARY;LANGUAGE={}:{}",
                event.language,
                escape_text(&event.subject)
            ),
            "END:VEVENT",
        ],
        line_ending,
    )
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
