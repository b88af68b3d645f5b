//! The calendar context: accumulated events plus the options and counter
//! used to generate them.

use std::fmt;

use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::config::IcsOptions;
use crate::error::{IcsResult, ValidationError};
use crate::event::Event;
use crate::export::{Blob, BlobSaver};
use crate::ics;
use crate::recurrence;

/// An in-memory calendar that serializes events as they are added.
///
/// Each consumer owns its own instance. Serialized VEVENT blocks are kept in
/// insertion order and are never modified once stored.
pub struct IcsCalendar {
    options: IcsOptions,
    clock: Box<dyn Clock>,
    events: Vec<String>,
    /// Next UID tick. Never reset, not even by `remove_all_events`.
    counter: u64,
}

impl fmt::Debug for IcsCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IcsCalendar")
            .field("options", &self.options)
            .field("events", &self.events.len())
            .field("counter", &self.counter)
            .finish_non_exhaustive()
    }
}

impl IcsCalendar {
    pub fn new(options: IcsOptions) -> Self {
        Self::with_clock(options, SystemClock)
    }

    pub fn with_clock(options: IcsOptions, clock: impl Clock + 'static) -> Self {
        IcsCalendar {
            options,
            clock: Box::new(clock),
            events: Vec::new(),
            counter: 0,
        }
    }

    pub fn options(&self) -> &IcsOptions {
        &self.options
    }

    /// Number of events currently stored.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop every stored event. The UID counter keeps counting.
    pub fn remove_all_events(&mut self) {
        debug!(removed = self.events.len(), "removing all events");
        self.events.clear();
    }

    /// Serialize an event, store it, and return its VEVENT text.
    ///
    /// The recurrence rule is validated before anything else happens, so a
    /// rejected event leaves both the store and the UID counter untouched.
    pub fn add_event(&mut self, event: &Event) -> Result<String, ValidationError> {
        let rrule = event
            .recurrence_rule
            .as_ref()
            .map(recurrence::validate)
            .transpose()?;

        let now = self.clock.now();
        let uid = ics::generate_uid(now, self.next_tick(), &self.options.uid_domain);

        let vevent = ics::generate_vevent(
            event,
            rrule.as_ref(),
            &uid,
            now,
            &self.options.line_ending,
        );

        debug!(uid = %uid, subject = %event.subject, recurring = rrule.is_some(), "added event");

        self.events.push(vevent.clone());
        Ok(vevent)
    }

    /// The full VCALENDAR text for the events stored so far.
    pub fn calendar(&self) -> String {
        let cal = ics::generate_calendar(
            &self.options.prod_id,
            &self.events,
            &self.options.line_ending,
        );
        trace!(events = self.events.len(), bytes = cal.len(), "assembled calendar");
        cal
    }

    /// Hand the calendar to `saver` as `<filename>.ics`.
    pub fn download(&self, filename: &str, saver: &dyn BlobSaver) -> IcsResult<()> {
        let filename = format!("{}.ics", filename);
        debug!(filename = %filename, events = self.events.len(), "exporting calendar");
        saver.save(&Blob::calendar(self.calendar()), &filename)
    }

    fn next_tick(&mut self) -> u64 {
        let tick = self.counter;
        self.counter += 1;
        tick
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
    use icalendar::parser::{read_calendar, unfold};

    use super::*;
    use crate::event::{ByDay, Organizer, RecurrenceRule};
    use crate::ICS_MIME_TYPE;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn fixed_now() -> NaiveDateTime {
        dt(2024, 3, 1, 12, 0, 0)
    }

    fn make_calendar() -> IcsCalendar {
        IcsCalendar::with_clock(IcsOptions::default(), fixed_now)
    }

    fn make_test_event() -> Event {
        let mut event = Event::new(
            "en-us",
            "Planning",
            dt(2024, 3, 5, 9, 0, 0),
            dt(2024, 3, 5, 10, 30, 0),
        );
        event.description = "Quarterly planning".to_string();
        event
    }

    fn recurring(rule: RecurrenceRule) -> Event {
        let mut event = make_test_event();
        event.recurrence_rule = Some(rule);
        event
    }

    fn uid_of(vevent: &str) -> &str {
        vevent
            .split("\r\n")
            .find_map(|l| l.strip_prefix("UID:"))
            .expect("VEVENT should have a UID line")
    }

    const EMPTY_CALENDAR: &str =
        "BEGIN:VCALENDAR\r\nPRODID:vueICS\r\nVERSION:2.0\r\nEND:VCALENDAR";

    #[test]
    fn test_debug_reports_state_without_clock() {
        let mut cal = make_calendar();
        cal.add_event(&make_test_event()).unwrap();

        let debug = format!("{:?}", cal);
        assert!(debug.starts_with("IcsCalendar {"), "{}", debug);
        assert!(debug.contains("events: 1"), "{}", debug);
        assert!(debug.contains("counter: 1"), "{}", debug);
        assert!(debug.contains("uid_domain: \"evildvl\""), "{}", debug);
    }

    #[test]
    fn test_result_of_calendar_can_be_unwrapped_as_error() {
        let built: Result<IcsCalendar, ValidationError> = Err(ValidationError::InvalidFrequency);
        assert_eq!(built.unwrap_err(), ValidationError::InvalidFrequency);
    }

    #[test]
    fn test_empty_calendar() {
        let cal = make_calendar();
        assert!(cal.is_empty());
        assert_eq!(cal.calendar(), EMPTY_CALENDAR);
    }

    #[test]
    fn test_add_event_stores_and_returns_vevent() {
        let mut cal = make_calendar();
        let vevent = cal.add_event(&make_test_event()).unwrap();

        assert_eq!(cal.len(), 1);
        assert!(vevent.starts_with("BEGIN:VEVENT\r\nUID:"));
        assert!(vevent.ends_with("\r\nEND:VEVENT"));
        assert!(vevent.contains("DTSTART;VALUE=DATE-TIME:20240305T090000\r\n"));
        assert!(vevent.contains("DTEND;VALUE=DATE-TIME:20240305T103000\r\n"));
        assert!(vevent.contains("@evildvl\r\n"));
        assert_eq!(
            cal.calendar(),
            format!(
                "BEGIN:VCALENDAR\r\nPRODID:vueICS\r\nVERSION:2.0\r\n{}\r\nEND:VCALENDAR",
                vevent
            )
        );
    }

    #[test]
    fn test_every_valid_frequency_is_emitted() {
        let mut cal = make_calendar();
        for freq in ["YEARLY", "MONTHLY", "WEEKLY", "DAILY"] {
            let vevent = cal.add_event(&recurring(RecurrenceRule::new(freq))).unwrap();
            assert!(
                vevent.contains(&format!("RRULE:FREQ={}", freq)),
                "missing RRULE for {}:\n{}",
                freq,
                vevent
            );
        }
        assert_eq!(cal.len(), 4);
    }

    #[test]
    fn test_invalid_frequency_leaves_store_unchanged() {
        let mut cal = make_calendar();
        cal.add_event(&make_test_event()).unwrap();
        let before = cal.calendar();

        for rule in [
            RecurrenceRule::default(),
            RecurrenceRule::new("HOURLY"),
            RecurrenceRule::new("daily"),
        ] {
            let err = cal.add_event(&recurring(rule)).unwrap_err();
            assert_eq!(err, ValidationError::InvalidFrequency);
        }

        assert_eq!(cal.len(), 1);
        assert_eq!(cal.calendar(), before);
    }

    #[test]
    fn test_byday_errors_propagate_without_append() {
        let mut cal = make_calendar();

        let err = cal
            .add_event(&recurring(RecurrenceRule {
                byday: Some(ByDay::Other(serde_json::json!("MO"))),
                ..RecurrenceRule::new("WEEKLY")
            }))
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidByDayType);

        let err = cal
            .add_event(&recurring(
                RecurrenceRule::new("WEEKLY").with_byday(["SU", "MO", "TU", "WE", "TH", "FR", "SA", "SU"]),
            ))
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidByDayLength);

        let err = cal
            .add_event(&recurring(RecurrenceRule::new("WEEKLY").with_byday(["XX"])))
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidByDayValue);

        assert!(cal.is_empty());
        assert_eq!(cal.calendar(), EMPTY_CALENDAR);
    }

    #[test]
    fn test_byday_dedup_in_output() {
        let mut cal = make_calendar();
        let vevent = cal
            .add_event(&recurring(RecurrenceRule::new("WEEKLY").with_byday(["MO", "MO", "TU"])))
            .unwrap();
        assert!(vevent.contains("RRULE:FREQ=WEEKLY;BYDAY=MO,TU\r\n"), "{}", vevent);
    }

    #[test]
    fn test_until_interval_count_in_output() {
        let mut cal = make_calendar();
        let vevent = cal
            .add_event(&recurring(RecurrenceRule {
                freq: Some("DAILY".into()),
                until: Some(Utc.with_ymd_and_hms(2024, 3, 20, 18, 30, 0).unwrap()),
                interval: Some(3),
                count: None,
                byday: None,
            }))
            .unwrap();
        assert!(
            vevent.contains("RRULE:FREQ=DAILY;UNTIL=20240320T000000Z;INTERVAL=3\r\n"),
            "{}",
            vevent
        );
    }

    #[test]
    fn test_midnight_to_midnight_is_all_day() {
        let mut cal = make_calendar();
        let mut event = make_test_event();
        event.begin = dt(2024, 3, 5, 0, 0, 0);
        event.stop = dt(2024, 3, 6, 0, 0, 0);

        let vevent = cal.add_event(&event).unwrap();
        assert!(vevent.contains("DTSTART;VALUE=DATE-TIME:20240305\r\n"), "{}", vevent);
        assert!(vevent.contains("DTEND;VALUE=DATE-TIME:20240306\r\n"), "{}", vevent);
    }

    #[test]
    fn test_uids_differ_within_the_same_second() {
        let mut cal = make_calendar();
        let first = cal.add_event(&make_test_event()).unwrap();
        let second = cal.add_event(&make_test_event()).unwrap();

        assert_ne!(uid_of(&first), uid_of(&second));
        assert_eq!(uid_of(&first), "522024-12000@evildvl");
        assert_eq!(uid_of(&second), "522024-12001@evildvl");
    }

    #[test]
    fn test_failed_add_does_not_consume_a_tick() {
        let mut cal = make_calendar();
        cal.add_event(&recurring(RecurrenceRule::new("NEVER"))).unwrap_err();
        let vevent = cal.add_event(&make_test_event()).unwrap();
        assert_eq!(uid_of(&vevent), "522024-12000@evildvl");
    }

    #[test]
    fn test_remove_all_events_keeps_counter() {
        let mut cal = make_calendar();
        for _ in 0..3 {
            cal.add_event(&make_test_event()).unwrap();
        }

        cal.remove_all_events();
        assert!(cal.is_empty());
        assert_eq!(cal.calendar(), EMPTY_CALENDAR);

        let vevent = cal.add_event(&make_test_event()).unwrap();
        assert_eq!(uid_of(&vevent), "522024-12003@evildvl");
    }

    #[test]
    fn test_calendar_is_idempotent() {
        let mut cal = make_calendar();
        cal.add_event(&make_test_event()).unwrap();
        cal.add_event(&recurring(RecurrenceRule::new("MONTHLY"))).unwrap();

        assert_eq!(cal.calendar(), cal.calendar());
    }

    #[test]
    fn test_custom_options_are_used() {
        let options = IcsOptions {
            uid_domain: "example.org".into(),
            prod_id: "-//Acme//Planner//EN".into(),
            ..IcsOptions::default()
        };
        let mut cal = IcsCalendar::with_clock(options, fixed_now);
        let vevent = cal.add_event(&make_test_event()).unwrap();

        assert!(uid_of(&vevent).ends_with("@example.org"));
        assert!(cal.calendar().contains("\r\nPRODID:-//Acme//Planner//EN\r\n"));
    }

    #[test]
    fn test_calendar_reads_back_with_icalendar_parser() {
        let mut cal = make_calendar();
        let mut event = make_test_event();
        event.location = Some("Room 4".into());
        event.organizer = Some(Organizer {
            name: "Ada".into(),
            email: "ada@example.org".into(),
        });
        cal.add_event(&event).unwrap();
        cal.add_event(&make_test_event()).unwrap();

        let content = format!("{}\r\n", cal.calendar());
        let unfolded = unfold(&content);
        let parsed = read_calendar(&unfolded).expect("calendar should parse");

        let vevents: Vec<_> = parsed
            .components
            .iter()
            .filter(|c| c.name == "VEVENT")
            .collect();
        assert_eq!(vevents.len(), 2);
        assert_eq!(
            vevents[0].find_prop("LOCATION").map(|p| p.val.to_string()),
            Some("Room 4".to_string())
        );
        assert_eq!(
            vevents[1].find_prop("SUMMARY").map(|p| p.val.to_string()),
            Some("Planning".to_string())
        );
    }

    struct RecordingSaver {
        saved: RefCell<Vec<(String, Blob)>>,
    }

    impl BlobSaver for RecordingSaver {
        fn save(&self, blob: &Blob, filename: &str) -> IcsResult<()> {
            self.saved
                .borrow_mut()
                .push((filename.to_string(), blob.clone()));
            Ok(())
        }
    }

    #[test]
    fn test_download_hands_calendar_to_saver() {
        let mut cal = make_calendar();
        cal.add_event(&make_test_event()).unwrap();

        let saver = RecordingSaver {
            saved: RefCell::new(Vec::new()),
        };
        cal.download("team-events", &saver).unwrap();

        let saved = saver.saved.borrow();
        assert_eq!(saved.len(), 1);
        let (filename, blob) = &saved[0];
        assert_eq!(filename, "team-events.ics");
        assert_eq!(blob.mime_type, ICS_MIME_TYPE);
        assert_eq!(blob.content, cal.calendar());
    }

    #[test]
    fn test_download_writes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut cal = make_calendar();
        cal.add_event(&make_test_event()).unwrap();

        cal.download("export", &crate::FileSaver::new(tmp.path()))
            .unwrap();

        let written = std::fs::read_to_string(tmp.path().join("export.ics")).unwrap();
        assert_eq!(written, cal.calendar());
    }
}
