//! VCALENDAR component.

use chrono::DateTime;
use chrono_tz::Tz;
use icsgen_core::error::CoreError;

use crate::component::{Children, Component, ComponentNode, Event, FreeBusy, FreeBusyType, Timezone};
use crate::core::{Property, PropertyBag};
use crate::error::IcalResult;

const ICAL_VERSION: &str = "2.0";
const DEFAULT_METHOD: &str = "PUBLISH";

/// The root `VCALENDAR` component.
///
/// Owns its children exclusively; free/busy sections added with a key can
/// receive intervals later through
/// [`add_free_busy_time`](Self::add_free_busy_time).
#[derive(Debug, Clone)]
pub struct Calendar {
    prod_id: String,
    method: Option<String>,
    name: Option<String>,
    timezone: Option<String>,
    error_msg: Option<String>,
    success: Option<bool>,
    children: Children,
    timezone_child: Option<Timezone>,
    last_free_busy_key: Option<String>,
}

impl Calendar {
    /// Creates a calendar for the given product identifier.
    ///
    /// The method defaults to `PUBLISH`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidArgument`] when the product identifier
    /// is empty.
    pub fn new(prod_id: impl Into<String>) -> IcalResult<Self> {
        let prod_id = prod_id.into();
        if prod_id.is_empty() {
            return Err(CoreError::InvalidArgument("PRODID cannot be empty".to_string()).into());
        }

        Ok(Self {
            prod_id,
            method: Some(DEFAULT_METHOD.to_string()),
            name: None,
            timezone: None,
            error_msg: None,
            success: None,
            children: Children::default(),
            timezone_child: None,
            last_free_busy_key: None,
        })
    }

    /// Returns the product identifier.
    #[must_use]
    pub fn prod_id(&self) -> &str {
        &self.prod_id
    }

    /// Replaces the `METHOD` value.
    pub fn set_method(&mut self, method: impl Into<String>) {
        self.method = Some(method.into());
    }

    /// Sets the display name, emitted as `X-WR-CALNAME`.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Sets the vendor error annotation, emitted as `X-ERRORMSG`.
    pub fn set_error_msg(&mut self, message: impl Into<String>) {
        self.error_msg = Some(message.into());
    }

    /// Sets the vendor success marker, emitted as `X-SUCCESS`.
    pub fn set_success(&mut self, success: bool) {
        self.success = Some(success);
    }

    /// Sets the timezone identifier, emitted as `X-WR-TIMEZONE`.
    ///
    /// Also installs the matching `VTIMEZONE` child; setting a timezone
    /// again replaces it, so repeated renders emit exactly one.
    pub fn set_timezone(&mut self, timezone: impl Into<String>) {
        let timezone = timezone.into();
        self.timezone_child = Some(Timezone::new(timezone.as_str()));
        self.timezone = Some(timezone);
    }

    /// Appends a child component.
    pub fn add_component(&mut self, component: impl Into<ComponentNode>) {
        self.children.push(component);
    }

    /// Appends a child component retrievable by `key`.
    ///
    /// Re-using a key moves the lookup entry to the newest child; the
    /// render sequence keeps both.
    pub fn add_component_keyed(
        &mut self,
        key: impl Into<String>,
        component: impl Into<ComponentNode>,
    ) {
        self.children.push_keyed(key, component);
    }

    /// Returns the child a key points at.
    #[must_use]
    pub fn component_by_key(&self, key: &str) -> Option<&ComponentNode> {
        self.children.by_key(key)
    }

    /// Adds an event. Wrapper for [`add_component`](Self::add_component).
    pub fn add_event(&mut self, event: Event) {
        self.add_component(event);
    }

    /// Adds a free/busy section and remembers `key` as the last added.
    pub fn add_free_busy_section(&mut self, section: FreeBusy, key: impl Into<String>) {
        let key = key.into();
        self.children.push_keyed(key.as_str(), section);
        self.last_free_busy_key = Some(key);
    }

    /// Forwards a classified interval into a free/busy section.
    ///
    /// With no explicit `section_key` the last-added section key is used.
    /// Forwarding is best effort: a key that resolves to nothing (or to a
    /// component that is not a free/busy section) drops the interval
    /// silently.
    pub fn add_free_busy_time(
        &mut self,
        kind: FreeBusyType,
        start: DateTime<Tz>,
        end: DateTime<Tz>,
        section_key: Option<&str>,
    ) {
        let Some(key) = section_key
            .map(str::to_owned)
            .or_else(|| self.last_free_busy_key.clone())
        else {
            tracing::debug!("free/busy interval dropped, no section key to resolve");
            return;
        };

        match self
            .children
            .by_key_mut(&key)
            .and_then(ComponentNode::as_free_busy_mut)
        {
            Some(section) => section.add_free_busy_time(kind, start, end),
            None => {
                tracing::debug!(key = %key, "free/busy interval dropped, key resolves to no section");
            }
        }
    }
}

impl Component for Calendar {
    fn component_type(&self) -> &'static str {
        "VCALENDAR"
    }

    fn assemble(&self) -> IcalResult<PropertyBag> {
        let mut properties = PropertyBag::new();

        properties.set(Property::text("VERSION", ICAL_VERSION));
        properties.set(Property::text("PRODID", self.prod_id.as_str()));

        if let Some(method) = &self.method {
            properties.set(Property::text("METHOD", method.as_str()));
        }
        if let Some(error_msg) = &self.error_msg {
            properties.set(Property::text("X-ERRORMSG", error_msg.as_str()));
        }
        if let Some(success) = self.success {
            properties.set(Property::text(
                "X-SUCCESS",
                if success { "TRUE" } else { "FALSE" },
            ));
        }
        if let Some(name) = &self.name {
            properties.set(Property::text("X-WR-CALNAME", name.as_str()));
        }
        if let Some(timezone) = &self.timezone {
            properties.set(Property::text("X-WR-TIMEZONE", timezone.as_str()));
        }

        Ok(properties)
    }

    fn children(&self) -> Vec<&dyn Component> {
        let mut children: Vec<&dyn Component> = self
            .children
            .iter()
            .map(|node| node as &dyn Component)
            .collect();
        if let Some(timezone_child) = &self.timezone_child {
            children.push(timezone_child);
        }
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IcalError;
    use chrono::TimeZone;

    fn utc(day: u32, hour: u32) -> DateTime<Tz> {
        Tz::UTC.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    #[test]
    fn empty_prod_id_fails_construction() {
        let result = Calendar::new("");
        assert!(matches!(
            result,
            Err(IcalError::CoreError(CoreError::InvalidArgument(_)))
        ));
    }

    #[test]
    fn minimal_calendar() {
        let calendar = Calendar::new("-//test//EN").unwrap();
        let output = calendar.render().unwrap();
        assert!(output.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(output.contains("VERSION:2.0\r\n"));
        assert!(output.contains("PRODID:-//test//EN\r\n"));
        assert!(output.contains("METHOD:PUBLISH\r\n"));
        assert!(output.ends_with("END:VCALENDAR\r\n"));
    }

    #[test]
    fn vendor_markers_and_name() {
        let mut calendar = Calendar::new("-//test//EN").unwrap();
        calendar.set_name("Team availability");
        calendar.set_error_msg("backend unreachable");
        calendar.set_success(false);

        let output = calendar.render().unwrap();
        assert!(output.contains("X-ERRORMSG:backend unreachable\r\n"));
        assert!(output.contains("X-SUCCESS:FALSE\r\n"));
        assert!(output.contains("X-WR-CALNAME:Team availability\r\n"));
    }

    #[test]
    fn timezone_installs_single_child_across_renders() {
        let mut calendar = Calendar::new("-//test//EN").unwrap();
        calendar.set_timezone("Europe/Berlin");
        calendar.set_timezone("Europe/Berlin");

        let first = calendar.render().unwrap();
        let second = calendar.render().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.matches("BEGIN:VTIMEZONE").count(), 1);
        assert!(first.contains("X-WR-TIMEZONE:Europe/Berlin\r\n"));
        assert!(first.contains("TZID:Europe/Berlin\r\n"));
    }

    #[test]
    fn forwards_interval_to_last_added_section() {
        let mut calendar = Calendar::new("-//test//EN").unwrap();
        let mut section = FreeBusy::new("fb-1");
        section.set_dt_stamp(utc(1, 0));
        calendar.add_free_busy_section(section, "k1");

        calendar.add_free_busy_time(FreeBusyType::Busy, utc(2, 10), utc(2, 11), None);

        let node = calendar.component_by_key("k1").unwrap();
        assert_eq!(node.as_free_busy().unwrap().interval_count(), 1);
    }

    #[test]
    fn unknown_section_key_is_a_no_op() {
        let mut calendar = Calendar::new("-//test//EN").unwrap();
        let mut section = FreeBusy::new("fb-1");
        section.set_dt_stamp(utc(1, 0));
        calendar.add_free_busy_section(section, "k1");

        calendar.add_free_busy_time(FreeBusyType::Busy, utc(2, 10), utc(2, 11), Some("missing"));

        let node = calendar.component_by_key("k1").unwrap();
        assert_eq!(node.as_free_busy().unwrap().interval_count(), 0);
    }

    #[test]
    fn no_sections_at_all_is_a_no_op() {
        let mut calendar = Calendar::new("-//test//EN").unwrap();
        calendar.add_free_busy_time(FreeBusyType::Busy, utc(2, 10), utc(2, 11), None);
        assert!(calendar.render().is_ok());
    }
}
