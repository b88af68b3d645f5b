//! Source of the "now" instant used for DTSTAMP and UIDs.

use chrono::{Local, NaiveDateTime};

/// Supplies the current local wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the operating system clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

impl<F> Clock for F
where
    F: Fn() -> NaiveDateTime,
{
    fn now(&self) -> NaiveDateTime {
        self()
    }
}
