//! VTIMEZONE component.

use crate::component::Component;
use crate::core::{Property, PropertyBag};
use crate::error::IcalResult;

/// A `VTIMEZONE` block carrying a timezone identifier.
///
/// Only transports the `TZID`; transition rules are out of scope. The
/// calendar installs one automatically when a timezone is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timezone {
    tzid: String,
}

impl Timezone {
    /// Creates a timezone component for the given identifier.
    #[must_use]
    pub fn new(tzid: impl Into<String>) -> Self {
        Self { tzid: tzid.into() }
    }

    /// Returns the timezone identifier.
    #[must_use]
    pub fn tzid(&self) -> &str {
        &self.tzid
    }
}

impl Component for Timezone {
    fn component_type(&self) -> &'static str {
        "VTIMEZONE"
    }

    fn assemble(&self) -> IcalResult<PropertyBag> {
        let mut properties = PropertyBag::new();
        properties.set(Property::text("TZID", self.tzid.as_str()));
        Ok(properties)
    }
}
