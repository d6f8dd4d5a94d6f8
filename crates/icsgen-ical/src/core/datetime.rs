//! Date-property formatting (RFC 5545 §3.3.4, §3.3.5).

use chrono::DateTime;
use chrono_tz::Tz;

use super::{Parameter, Property};

/// Date+time form with the UTC marker, e.g. `20240102T100000Z`.
pub const UTC_DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Date+time form without the UTC marker, used with a `TZID` parameter.
pub const LOCAL_DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Date-only form, e.g. `20240102`, used with `VALUE=DATE`.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Returns the current wall-clock time in UTC.
#[must_use]
pub fn now_utc() -> DateTime<Tz> {
    chrono::Utc::now().with_timezone(&Tz::UTC)
}

/// Formats a datetime in one of the three wire forms.
///
/// The value is formatted in the datetime's own timezone; the `Z` suffix
/// of the default form is a literal, so callers pass UTC datetimes unless
/// `with_tzid` requests the `TZID`-qualified local form. `date_only` wins
/// over `with_tzid` for the format; the two must not be combined.
#[must_use]
pub fn format_date_time(dt: &DateTime<Tz>, date_only: bool, with_tzid: bool) -> String {
    let format = match (date_only, with_tzid) {
        (true, _) => DATE_FORMAT,
        (false, true) => LOCAL_DATE_TIME_FORMAT,
        (false, false) => UTC_DATE_TIME_FORMAT,
    };
    dt.format(format).to_string()
}

/// Builds a date property in the shared formatting rule.
///
/// `with_tzid` adds a `TZID` parameter carrying the datetime's timezone
/// name; `date_only` drops the time part and adds `VALUE=DATE`.
#[must_use]
pub fn date_time_property(
    name: &str,
    dt: &DateTime<Tz>,
    date_only: bool,
    with_tzid: bool,
) -> Property {
    let mut params = Vec::new();
    if with_tzid {
        params.push(Parameter::tzid(dt.timezone().name()));
    }
    if date_only {
        params.push(Parameter::value_type("DATE"));
    }
    Property::with_params(name, format_date_time(dt, date_only, with_tzid), params)
}
