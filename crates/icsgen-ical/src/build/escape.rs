//! iCalendar text escaping utilities.

use crate::error::{IcalError, IcalResult};

/// Escapes text for iCalendar TEXT values (RFC 5545 §3.3.11).
///
/// Escapes: backslash, comma, semicolon, and newlines. A CR is dropped so
/// that CRLF input collapses to a single `\n` escape.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 10);
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            '\n' => result.push_str("\\n"),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}

/// Quotes a parameter value when it contains reserved characters.
///
/// Values containing `,`, `;` or `:` are wrapped in double quotes.
///
/// # Errors
///
/// A double quote or a raw line break inside a parameter value has no
/// escaped form in RFC 5545 and is rejected as [`IcalError::Encoding`].
pub fn escape_param_value(s: &str) -> IcalResult<String> {
    if s.contains('"') || s.contains('\r') || s.contains('\n') {
        return Err(IcalError::Encoding(format!(
            "parameter value contains an unescapable double quote or line break: {s:?}"
        )));
    }
    if needs_quoting(s) {
        Ok(format!("\"{s}\""))
    } else {
        Ok(s.to_string())
    }
}

/// Checks if a parameter value needs quoting.
fn needs_quoting(s: &str) -> bool {
    s.chars().any(|c| matches!(c, ':' | ';' | ','))
}
