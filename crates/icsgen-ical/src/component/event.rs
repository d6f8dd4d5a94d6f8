//! VEVENT component.

use chrono::DateTime;
use chrono_tz::Tz;
use icsgen_core::util::uid;

use crate::component::Component;
use crate::core::datetime::{date_time_property, now_utc};
use crate::core::{Property, PropertyBag};
use crate::error::IcalResult;

/// A `VEVENT` block.
///
/// Plain data assembly on top of the property pipeline: optional fields
/// are emitted only when set, date properties go through the shared
/// formatting rule.
#[derive(Debug, Clone)]
pub struct Event {
    uid: String,
    dt_stamp: DateTime<Tz>,
    dt_start: Option<DateTime<Tz>>,
    dt_end: Option<DateTime<Tz>>,
    summary: Option<String>,
    location: Option<String>,
    description: Option<String>,
    url: Option<String>,
    categories: Vec<String>,
    no_time: bool,
    use_timezone: bool,
}

impl Event {
    /// Creates an event with an explicit unique identifier.
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
            summary: None,
            location: None,
            description: None,
            url: None,
            categories: Vec::new(),
            no_time: false,
            use_timezone: false,
        }
    }

    /// Creates an event with a generated opaque identifier.
    #[must_use]
    pub fn with_generated_uid() -> Self {
        Self::new(uid::generate_uid())
    }

    /// Returns the unique identifier.
    #[must_use]
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Pins the stamp timestamp.
    pub fn set_dt_stamp(&mut self, dt_stamp: DateTime<Tz>) {
        self.dt_stamp = dt_stamp;
    }

    /// Sets the event start.
    pub fn set_dt_start(&mut self, dt_start: DateTime<Tz>) {
        self.dt_start = Some(dt_start);
    }

    /// Sets the event end.
    pub fn set_dt_end(&mut self, dt_end: DateTime<Tz>) {
        self.dt_end = Some(dt_end);
    }

    /// Sets the summary line.
    pub fn set_summary(&mut self, summary: impl Into<String>) {
        self.summary = Some(summary.into());
    }

    /// Sets the location.
    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = Some(location.into());
    }

    /// Sets the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    /// Sets the URL.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = Some(url.into());
    }

    /// Replaces the category list.
    pub fn set_categories(&mut self, categories: Vec<String>) {
        self.categories = categories;
    }

    /// Renders start/end as date-only values (all-day events).
    pub fn set_no_time(&mut self, no_time: bool) {
        self.no_time = no_time;
    }

    /// Emits date properties with a `TZID` parameter instead of the UTC
    /// suffix. Off by default; callers leaving it off pass UTC datetimes.
    /// Must not be combined with [`set_no_time`](Self::set_no_time).
    pub fn set_use_timezone(&mut self, use_timezone: bool) {
        self.use_timezone = use_timezone;
    }
}

impl Component for Event {
    fn component_type(&self) -> &'static str {
        "VEVENT"
    }

    fn assemble(&self) -> IcalResult<PropertyBag> {
        let mut properties = PropertyBag::new();

        properties.set(Property::text("UID", self.uid.as_str()));
        properties.add(date_time_property(
            "DTSTAMP",
            &self.dt_stamp,
            false,
            self.use_timezone,
        ));
        if let Some(dt_start) = &self.dt_start {
            properties.add(date_time_property(
                "DTSTART",
                dt_start,
                self.no_time,
                self.use_timezone,
            ));
        }
        if let Some(dt_end) = &self.dt_end {
            properties.add(date_time_property(
                "DTEND",
                dt_end,
                self.no_time,
                self.use_timezone,
            ));
        }
        if let Some(summary) = &self.summary {
            properties.set(Property::text("SUMMARY", summary.as_str()));
        }
        if let Some(location) = &self.location {
            properties.set(Property::text("LOCATION", location.as_str()));
        }
        if let Some(description) = &self.description {
            properties.set(Property::text("DESCRIPTION", description.as_str()));
        }
        if !self.categories.is_empty() {
            properties.set(Property::text_list("CATEGORIES", self.categories.clone()));
        }
        if let Some(url) = &self.url {
            properties.set(Property::text("URL", url.as_str()));
        }

        Ok(properties)
    }
}
