//! Core library for icsdrop.
//!
//! Accumulates calendar events in memory and serializes them to iCalendar
//! (RFC 5545) text:
//! - `calendar` holds the [`IcsCalendar`] context (event store, UID counter, options)
//! - `event` and `recurrence` define the input types and RRULE validation
//! - `ics` contains the line-level formatting (dates, escaping, VEVENT/VCALENDAR blocks)
//! - `export` hands finished calendars to a [`BlobSaver`]

pub mod calendar;
pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod ics;
pub mod recurrence;

pub use calendar::IcsCalendar;
pub use clock::{Clock, SystemClock};
pub use config::IcsOptions;
pub use error::{IcsError, IcsResult, ValidationError};
pub use event::{ByDay, Event, Organizer, RecurrenceRule};
pub use export::{Blob, BlobSaver, FileSaver, ICS_MIME_TYPE};
pub use recurrence::{Frequency, ValidatedRule, Weekday};

/// Library version, as published.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
