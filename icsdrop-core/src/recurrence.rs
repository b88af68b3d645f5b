//! Recurrence rule validation and RRULE formatting.
//!
//! A submitted [`RecurrenceRule`] is checked in a fixed order (frequency,
//! byday type, byday length, byday values) and the first failure wins. A
//! rule that passes becomes a [`ValidatedRule`], which is the only thing
//! that can be turned into an `RRULE:` line.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::event::{ByDay, RecurrenceRule};

const MAX_BYDAY_LEN: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Frequency {
    Yearly,
    Monthly,
    Weekly,
    Daily,
}

impl Frequency {
    pub fn as_ics_str(&self) -> &'static str {
        match self {
            Frequency::Yearly => "YEARLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Daily => "DAILY",
        }
    }

    /// Exact match only; "weekly" is not a frequency.
    pub fn from_ics_str(s: &str) -> Option<Self> {
        match s {
            "YEARLY" => Some(Frequency::Yearly),
            "MONTHLY" => Some(Frequency::Monthly),
            "WEEKLY" => Some(Frequency::Weekly),
            "DAILY" => Some(Frequency::Daily),
            _ => None,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ics_str())
    }
}

/// Two-letter weekday codes used in BYDAY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    SU,
    MO,
    TU,
    WE,
    TH,
    FR,
    SA,
}

impl Weekday {
    pub fn as_ics_str(&self) -> &'static str {
        match self {
            Weekday::SU => "SU",
            Weekday::MO => "MO",
            Weekday::TU => "TU",
            Weekday::WE => "WE",
            Weekday::TH => "TH",
            Weekday::FR => "FR",
            Weekday::SA => "SA",
        }
    }

    pub fn from_ics_str(s: &str) -> Option<Self> {
        match s {
            "SU" => Some(Weekday::SU),
            "MO" => Some(Weekday::MO),
            "TU" => Some(Weekday::TU),
            "WE" => Some(Weekday::WE),
            "TH" => Some(Weekday::TH),
            "FR" => Some(Weekday::FR),
            "SA" => Some(Weekday::SA),
            _ => None,
        }
    }
}

/// A recurrence rule that passed [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRule {
    pub freq: Frequency,
    pub until: Option<DateTime<Utc>>,
    pub interval: Option<u32>,
    pub count: Option<u32>,
    /// Deduplicated, first occurrence wins, submission order kept
    pub byday: Vec<Weekday>,
}

/// Validate a submitted rule.
///
/// The length limit applies to the list as submitted, before duplicates are
/// removed, so `["MO","MO","TU","TU","WE","WE","TH","FR"]` is rejected even
/// though it names only five days.
pub fn validate(rule: &RecurrenceRule) -> Result<ValidatedRule, ValidationError> {
    let freq = rule
        .freq
        .as_deref()
        .and_then(Frequency::from_ics_str)
        .ok_or(ValidationError::InvalidFrequency)?;

    let byday = match &rule.byday {
        None => Vec::new(),
        Some(ByDay::Other(_)) => return Err(ValidationError::InvalidByDayType),
        Some(ByDay::List(values)) => {
            if values.len() > MAX_BYDAY_LEN {
                return Err(ValidationError::InvalidByDayLength);
            }

            dedup_stable(values)
                .into_iter()
                .map(|v| match v {
                    Value::String(s) => {
                        Weekday::from_ics_str(s).ok_or(ValidationError::InvalidByDayValue)
                    }
                    _ => Err(ValidationError::InvalidByDayValue),
                })
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    Ok(ValidatedRule {
        freq,
        until: rule.until,
        interval: rule.interval,
        count: rule.count,
        byday,
    })
}

fn dedup_stable(values: &[Value]) -> Vec<&Value> {
    let mut seen: Vec<&Value> = Vec::with_capacity(values.len());
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

impl ValidatedRule {
    /// Render as a single `RRULE:` content line.
    ///
    /// Clause order is fixed: UNTIL, INTERVAL, COUNT, BYDAY. UNTIL keeps only
    /// the UTC date and always reads as midnight (`T000000Z`). Older exports
    /// wrote the same value without the `T` (`UNTIL=20240601000000Z`), so
    /// lines with an UNTIL clause are not byte-identical to those.
    pub fn to_rrule_line(&self) -> String {
        let mut line = format!("RRULE:FREQ={}", self.freq);

        if let Some(until) = self.until {
            line.push_str(&format!(";UNTIL={}T000000Z", until.format("%Y%m%d")));
        }

        if let Some(interval) = self.interval.filter(|n| *n != 0) {
            line.push_str(&format!(";INTERVAL={}", interval));
        }

        if let Some(count) = self.count.filter(|n| *n != 0) {
            line.push_str(&format!(";COUNT={}", count));
        }

        if !self.byday.is_empty() {
            let days: Vec<&str> = self.byday.iter().map(Weekday::as_ics_str).collect();
            line.push_str(&format!(";BYDAY={}", days.join(",")));
        }

        line
    }
}
