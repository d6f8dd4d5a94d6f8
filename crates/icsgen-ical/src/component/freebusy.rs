//! VFREEBUSY component.

use std::collections::BTreeMap;
use std::fmt;

use chrono::DateTime;
use chrono_tz::Tz;
use icsgen_core::error::CoreError;
use icsgen_core::util::uid;

use crate::component::Component;
use crate::core::datetime::{date_time_property, format_date_time, now_utc};
use crate::core::{Parameter, Property, PropertyBag};
use crate::error::IcalResult;

/// Free/busy time classification carried on each `FREEBUSY` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreeBusyType {
    /// The interval is free.
    Free,
    /// The interval is busy.
    Busy,
    /// The interval is tentatively busy.
    BusyTentative,
    /// The interval is busy because the attendee is unavailable.
    BusyUnavailable,
}

impl FreeBusyType {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "FREE",
            Self::Busy => "BUSY",
            Self::BusyTentative => "BUSY-TENTATIVE",
            Self::BusyUnavailable => "BUSY-UNAVAILABLE",
        }
    }
}

impl fmt::Display for FreeBusyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A `VFREEBUSY` block publishing a set of classified time intervals.
///
/// Intervals are stored keyed by their rendered `start/end` period string:
/// duplicates collapse (the newest classification wins) and the rendered
/// `FREEBUSY` lines come out sorted ascending by that key.
///
/// With no intervals added, the block renders empty: nothing to report
/// means no mandatory fields are emitted either.
#[derive(Debug, Clone)]
pub struct FreeBusy {
    uid: String,
    dt_stamp: DateTime<Tz>,
    dt_start: Option<DateTime<Tz>>,
    dt_end: Option<DateTime<Tz>>,
    attendee: Option<String>,
    organizer: Option<String>,
    url: Option<String>,
    use_timezone: bool,
    free_busy_times: BTreeMap<String, FreeBusyType>,
}

impl FreeBusy {
    /// Creates a free/busy section with an explicit unique identifier.
    ///
    /// The stamp timestamp defaults to the current time;
    /// [`set_dt_stamp`](Self::set_dt_stamp) pins it for deterministic
    /// output.
    #[must_use]
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            dt_stamp: now_utc(),
            dt_start: None,
            dt_end: None,
            attendee: None,
            organizer: None,
            url: None,
            use_timezone: false,
            free_busy_times: BTreeMap::new(),
        }
    }

    /// Creates a free/busy section with a generated opaque identifier.
    #[must_use]
    pub fn with_generated_uid() -> Self {
        Self::new(uid::generate_uid())
    }

    /// Returns the unique identifier.
    #[must_use]
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Replaces the unique identifier.
    pub fn set_uid(&mut self, uid: impl Into<String>) {
        self.uid = uid.into();
    }

    /// Pins the stamp timestamp.
    pub fn set_dt_stamp(&mut self, dt_stamp: DateTime<Tz>) {
        self.dt_stamp = dt_stamp;
    }

    /// Sets the start bound explicitly.
    pub fn set_dt_start(&mut self, dt_start: DateTime<Tz>) {
        self.dt_start = Some(dt_start);
    }

    /// Sets the end bound explicitly.
    pub fn set_dt_end(&mut self, dt_end: DateTime<Tz>) {
        self.dt_end = Some(dt_end);
    }

    /// Sets the attendee (e.g. `MAILTO:jane@example.com`).
    pub fn set_attendee(&mut self, attendee: impl Into<String>) {
        self.attendee = Some(attendee.into());
    }

    /// Sets the organizer.
    pub fn set_organizer(&mut self, organizer: impl Into<String>) {
        self.organizer = Some(organizer.into());
    }

    /// Sets the URL.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = Some(url.into());
    }

    /// Emits date properties with a `TZID` parameter instead of the UTC
    /// suffix. Off by default; callers leaving it off pass UTC datetimes.
    pub fn set_use_timezone(&mut self, use_timezone: bool) {
        self.use_timezone = use_timezone;
    }

    /// Returns whether date properties carry a `TZID` parameter.
    #[must_use]
    pub fn use_timezone(&self) -> bool {
        self.use_timezone
    }

    /// Returns the number of distinct intervals.
    #[must_use]
    pub fn interval_count(&self) -> usize {
        self.free_busy_times.len()
    }

    /// Records a classified interval and widens the component bounds.
    ///
    /// The start bound moves to `start` when `start` is earlier than the
    /// current value. The end bound only ever moves to an *earlier* `end`;
    /// it does not track the latest interval end.
    pub fn add_free_busy_time(
        &mut self,
        kind: FreeBusyType,
        start: DateTime<Tz>,
        end: DateTime<Tz>,
    ) {
        if self.dt_start.as_ref().is_none_or(|current| start < *current) {
            self.dt_start = Some(start.clone());
        }
        if self.dt_end.as_ref().is_none_or(|current| end < *current) {
            self.dt_end = Some(end.clone());
        }

        let period = format!(
            "{}/{}",
            format_date_time(&start, false, false),
            format_date_time(&end, false, false)
        );
        self.free_busy_times.insert(period, kind);
    }
}

impl Component for FreeBusy {
    fn component_type(&self) -> &'static str {
        "VFREEBUSY"
    }

    fn assemble(&self) -> IcalResult<PropertyBag> {
        let mut properties = PropertyBag::new();

        if self.free_busy_times.is_empty() {
            return Ok(properties);
        }

        properties.set(Property::text("UID", self.uid.as_str()));
        if let Some(attendee) = &self.attendee {
            properties.set(Property::text("ATTENDEE", attendee.as_str()));
        }

        // Bounds are maintained by add_free_busy_time, so a non-empty
        // interval map implies both are present.
        let dt_start = self
            .dt_start
            .as_ref()
            .ok_or(CoreError::InvariantViolation("free/busy start bound missing"))?;
        let dt_end = self
            .dt_end
            .as_ref()
            .ok_or(CoreError::InvariantViolation("free/busy end bound missing"))?;

        properties.add(date_time_property(
            "DTSTAMP",
            &self.dt_stamp,
            false,
            self.use_timezone,
        ));
        properties.add(date_time_property(
            "DTSTART",
            dt_start,
            false,
            self.use_timezone,
        ));
        properties.add(date_time_property(
            "DTEND",
            dt_end,
            false,
            self.use_timezone,
        ));

        for (period, kind) in &self.free_busy_times {
            properties.add(Property::with_params(
                "FREEBUSY",
                period.as_str(),
                vec![Parameter::new("FSBTYPE", kind.as_str())],
            ));
        }

        if let Some(organizer) = &self.organizer {
            properties.set(Property::text("ORGANIZER", organizer.as_str()));
        }
        if let Some(url) = &self.url {
            properties.set(Property::text("URL", url.as_str()));
        }

        Ok(properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(day: u32, hour: u32) -> DateTime<Tz> {
        Tz::UTC.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    fn section() -> FreeBusy {
        let mut fb = FreeBusy::new("fb-1");
        fb.set_dt_stamp(utc(1, 0));
        fb
    }

    #[test]
    fn zero_intervals_renders_empty_block() {
        assert_eq!(
            section().render().unwrap(),
            "BEGIN:VFREEBUSY\r\nEND:VFREEBUSY\r\n"
        );
    }

    #[test]
    fn intervals_render_sorted_by_period_key() {
        let mut fb = section();
        fb.add_free_busy_time(FreeBusyType::Busy, utc(2, 10), utc(2, 11));
        fb.add_free_busy_time(FreeBusyType::Busy, utc(1, 8), utc(1, 9));

        let output = fb.render().unwrap();
        let first = output
            .find("FREEBUSY;FSBTYPE=BUSY:20240101T080000Z/20240101T090000Z")
            .unwrap();
        let second = output
            .find("FREEBUSY;FSBTYPE=BUSY:20240102T100000Z/20240102T110000Z")
            .unwrap();
        assert!(first < second);
    }

    #[test]
    fn duplicate_interval_collapses_to_newest_kind() {
        let mut fb = section();
        fb.add_free_busy_time(FreeBusyType::Busy, utc(2, 10), utc(2, 11));
        fb.add_free_busy_time(FreeBusyType::Free, utc(2, 10), utc(2, 11));

        assert_eq!(fb.interval_count(), 1);
        let output = fb.render().unwrap();
        assert!(output.contains("FREEBUSY;FSBTYPE=FREE:"));
        assert!(!output.contains("FSBTYPE=BUSY:"));
    }

    #[test]
    fn start_bound_widens_to_earliest() {
        let mut fb = section();
        fb.add_free_busy_time(FreeBusyType::Busy, utc(5, 10), utc(5, 11));
        fb.add_free_busy_time(FreeBusyType::Busy, utc(2, 8), utc(2, 9));

        let output = fb.render().unwrap();
        assert!(output.contains("DTSTART:20240102T080000Z\r\n"));
    }

    #[test]
    fn end_bound_only_moves_earlier() {
        let mut fb = section();
        fb.add_free_busy_time(FreeBusyType::Busy, utc(2, 10), utc(2, 11));
        fb.add_free_busy_time(FreeBusyType::Busy, utc(5, 10), utc(5, 11));

        // The later interval end does not replace the existing end bound.
        let output = fb.render().unwrap();
        assert!(output.contains("DTEND:20240102T110000Z\r\n"));
    }

    #[test]
    fn property_order_matches_assembly_sequence() {
        let mut fb = section();
        fb.set_attendee("MAILTO:jane@example.com");
        fb.set_organizer("MAILTO:boss@example.com");
        fb.set_url("http://example.com/fb.ics");
        fb.add_free_busy_time(FreeBusyType::Busy, utc(2, 10), utc(2, 11));

        let output = fb.render().unwrap();
        let order = [
            "UID:",
            "ATTENDEE:",
            "DTSTAMP:",
            "DTSTART:",
            "DTEND:",
            "FREEBUSY;",
            "ORGANIZER:",
            "URL:",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|needle| output.find(needle).unwrap_or_else(|| panic!("{needle} missing")))
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn generated_uids_are_distinct() {
        assert_ne!(
            FreeBusy::with_generated_uid().uid(),
            FreeBusy::with_generated_uid().uid()
        );
    }

    #[test]
    fn timezone_flag_adds_tzid_to_date_properties() {
        let berlin: Tz = "Europe/Berlin".parse().unwrap();
        let mut fb = FreeBusy::new("fb-tz");
        fb.set_dt_stamp(berlin.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        fb.set_use_timezone(true);
        fb.add_free_busy_time(
            FreeBusyType::Busy,
            berlin.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap(),
            berlin.with_ymd_and_hms(2024, 1, 2, 11, 0, 0).unwrap(),
        );

        let output = fb.render().unwrap();
        assert!(output.contains("DTSTART;TZID=Europe/Berlin:20240102T100000\r\n"));
        assert!(output.contains("DTSTAMP;TZID=Europe/Berlin:20240101T000000\r\n"));
    }
}
