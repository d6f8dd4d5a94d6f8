//! iCalendar building and serialization (RFC 5545).
//!
//! This crate assembles calendar objects in memory and renders them to the
//! iCalendar text format:
//!
//! - `core`: the property model (parameters, properties, the ordered bag,
//!   date formatting)
//! - `component`: the component tree (calendar, event, free/busy,
//!   timezone)
//! - `build`: escaping, 75-octet line folding, and the serializer
//!
//! ## Example
//!
//! ```rust
//! use chrono::TimeZone;
//! use chrono_tz::Tz;
//! use icsgen_ical::{Calendar, Component, FreeBusy, FreeBusyType};
//!
//! # fn main() -> Result<(), icsgen_ical::IcalError> {
//! let mut calendar = Calendar::new("-//Example Corp//Scheduler//EN")?;
//!
//! let mut section = FreeBusy::new("availability-1");
//! section.set_dt_stamp(Tz::UTC.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
//! calendar.add_free_busy_section(section, "primary");
//! calendar.add_free_busy_time(
//!     FreeBusyType::Busy,
//!     Tz::UTC.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap(),
//!     Tz::UTC.with_ymd_and_hms(2024, 1, 2, 11, 0, 0).unwrap(),
//!     None,
//! );
//!
//! let text = calendar.render()?;
//! assert!(text.starts_with("BEGIN:VCALENDAR\r\n"));
//! assert!(text.contains("FREEBUSY;FSBTYPE=BUSY:20240102T100000Z/20240102T110000Z\r\n"));
//! # Ok(())
//! # }
//! ```

pub mod build;
pub mod component;
pub mod core;
pub mod error;

#[cfg(test)]
mod tests;

pub use crate::build::render;
pub use crate::component::{
    Calendar, Children, Component, ComponentNode, Event, FreeBusy, FreeBusyType, Timezone,
};
pub use crate::core::{Parameter, Property, PropertyBag, Value};
pub use crate::error::{IcalError, IcalResult};
