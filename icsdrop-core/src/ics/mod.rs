//! iCalendar text generation.
//!
//! Lines are assembled by hand so property order is fixed and exactly what
//! callers see in the output.

mod calendar;
mod datetime;
mod escape;
mod event;

pub use calendar::{generate_calendar, join_lines};
pub use datetime::{format_date, format_date_time, format_span, FormattedSpan};
pub use escape::{escape_param_value, escape_text};
pub use event::{generate_uid, generate_vevent};
