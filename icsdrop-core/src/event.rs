//! Event input types.
//!
//! These mirror what callers submit: wall-clock begin/stop times with no
//! timezone, optional metadata, and a loosely-typed recurrence rule that is
//! checked by [`crate::recurrence::validate`] before serialization.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

/// A calendar event as submitted by a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Language tag used on the SUMMARY line (e.g. "en-us")
    pub language: String,
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: Option<String>,
    /// Local wall-clock start (no TZID is emitted)
    pub begin: NaiveDateTime,
    /// Local wall-clock end; not checked against `begin`
    pub stop: NaiveDateTime,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub organizer: Option<Organizer>,
    #[serde(default, alias = "rrule")]
    pub recurrence_rule: Option<RecurrenceRule>,
}

impl Event {
    pub fn new(
        language: impl Into<String>,
        subject: impl Into<String>,
        begin: NaiveDateTime,
        stop: NaiveDateTime,
    ) -> Self {
        Event {
            language: language.into(),
            subject: subject.into(),
            description: String::new(),
            location: None,
            begin,
            stop,
            url: None,
            organizer: None,
            recurrence_rule: None,
        }
    }
}

/// The event organizer (ORGANIZER;CN=name:MAILTO:email)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organizer {
    pub name: String,
    pub email: String,
}

/// A recurrence rule as submitted, before validation.
///
/// `freq` stays a string so unknown frequencies can be reported instead of
/// failing deserialization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecurrenceRule {
    #[serde(default)]
    pub freq: Option<String>,
    /// RFC 3339, a bare `YYYY-MM-DDTHH:MM:SS` (read as UTC) or `YYYY-MM-DD`
    #[serde(default, deserialize_with = "deserialize_until")]
    pub until: Option<DateTime<Utc>>,
    #[serde(default)]
    pub interval: Option<u32>,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub byday: Option<ByDay>,
}

impl RecurrenceRule {
    pub fn new(freq: impl Into<String>) -> Self {
        RecurrenceRule {
            freq: Some(freq.into()),
            ..Default::default()
        }
    }

    pub fn with_byday<I, S>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.byday = Some(ByDay::days(days));
        self
    }
}

/// Parse the date-like values accepted for `until`.
///
/// Offsets are converted to UTC; values without one are taken as UTC, and a
/// bare date means midnight.
pub fn parse_until(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

fn deserialize_until<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| {
        parse_until(&s).ok_or_else(|| {
            de::Error::custom(format!(
                "invalid until value \"{}\": expected YYYY-MM-DD or RFC 3339",
                s
            ))
        })
    })
    .transpose()
}

/// The `byday` field of a submitted rule.
///
/// Anything that is not a sequence lands in `Other` and is rejected by
/// validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ByDay {
    List(Vec<Value>),
    Other(Value),
}

impl ByDay {
    /// Build a list of weekday codes.
    pub fn days<I, S>(days: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ByDay::List(days.into_iter().map(|d| Value::String(d.into())).collect())
    }
}
