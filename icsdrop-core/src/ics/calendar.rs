//! VCALENDAR assembly.

/// Join content lines with `line_ending`, skipping empty segments.
pub fn join_lines<S: AsRef<str>>(lines: &[S], line_ending: &str) -> String {
    lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(line_ending)
}

/// Wrap already-generated VEVENT blocks in a VCALENDAR.
pub fn generate_calendar<S: AsRef<str>>(prod_id: &str, events: &[S], line_ending: &str) -> String {
    let body = join_lines(events, line_ending);

    join_lines::<&str>(
        &[
            "BEGIN:VCALENDAR",
            &format!("PRODID:{}", prod_id),
            "VERSION:2.0",
            &body,
            "END:VCALENDAR",
        ],
        line_ending,
    )
}
