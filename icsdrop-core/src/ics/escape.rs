//! Escaping for the free-text parts of an event.

/// Escapes SUMMARY, DESCRIPTION and LOCATION values (RFC 5545 §3.3.11).
///
/// A CRLF pair from user input collapses into a single `\n` escape.
pub fn escape_text(s: &str) -> String {
    s.chars().fold(String::with_capacity(s.len()), |mut out, c| {
        match c {
            '\\' | ',' | ';' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
        out
    })
}

fn needs_quoting(value: &str) -> bool {
    value.contains([':', ';', ',', '"', '\n'])
}

/// Renders an organizer name for `ORGANIZER;CN=`.
///
/// Names that would end the parameter early are wrapped in quotes, with
/// quotes, carets and newlines inside caret-encoded (RFC 6868).
pub fn escape_param_value(s: &str) -> String {
    if !needs_quoting(s) {
        return s.to_string();
    }

    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '^' => quoted.push_str("^^"),
            '\n' => quoted.push_str("^n"),
            '"' => quoted.push_str("^'"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
