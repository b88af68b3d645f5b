//! Fixed-width date and date-time values.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

/// `YYYYMMDD`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// `YYYYMMDDTHHMMSS`, floating (no `Z`, no TZID)
pub fn format_date_time(dt: NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}

/// Start/end values formatted with one shared decision about time-of-day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedSpan {
    pub start: String,
    pub end: String,
    /// Both values carry `THHMMSS`
    pub has_time: bool,
}

/// Format a begin/stop pair.
///
/// Either both values get a time-of-day suffix or neither does: the suffix is
/// dropped only when every hour, minute and second of both endpoints is zero.
pub fn format_span(begin: NaiveDateTime, stop: NaiveDateTime) -> FormattedSpan {
    let has_time = !(is_midnight(begin) && is_midnight(stop));

    if has_time {
        FormattedSpan {
            start: format_date_time(begin),
            end: format_date_time(stop),
            has_time,
        }
    } else {
        FormattedSpan {
            start: format_date(begin.date()),
            end: format_date(stop.date()),
            has_time,
        }
    }
}

fn is_midnight(dt: NaiveDateTime) -> bool {
    dt.hour() == 0 && dt.minute() == 0 && dt.second() == 0
}
