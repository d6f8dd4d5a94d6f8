//! iCalendar serializer (RFC 5545).
//!
//! Walks an assembled component tree depth-first and emits compliant text:
//! `BEGIN` marker, properties, nested components, `END` marker, with every
//! content line escaped and folded.

use super::escape::{escape_param_value, escape_text};
use super::fold::fold_line;
use crate::component::Component;
use crate::core::{Parameter, Property, PropertyBag, Value};
use crate::error::{IcalError, IcalResult};

/// Renders a component tree to a single CRLF-terminated text block.
///
/// # Errors
///
/// Returns the first encoding error raised by any property; no partial
/// output is produced.
pub fn render(component: &dyn Component) -> IcalResult<String> {
    tracing::debug!(
        component_type = component.component_type(),
        "rendering component tree"
    );
    let mut result = String::new();
    serialize_component(component, &mut result)?;
    Ok(result)
}

/// Serializes one component and its children, depth first.
///
/// # Errors
///
/// Propagates assembly and encoding errors from the component's properties
/// or any descendant's.
pub fn serialize_component(component: &dyn Component, out: &mut String) -> IcalResult<()> {
    let component_type = component.component_type();
    out.push_str(&fold_line(&format!("BEGIN:{component_type}")));

    let properties = component.assemble()?;
    serialize_bag(&properties, out)?;

    for child in component.children() {
        serialize_component(child, out)?;
    }

    out.push_str(&fold_line(&format!("END:{component_type}")));
    Ok(())
}

/// Serializes a property to a folded content line.
///
/// # Errors
///
/// Returns [`IcalError::Encoding`] for an empty property name or a
/// parameter value that cannot be represented.
pub fn serialize_property(property: &Property) -> IcalResult<String> {
    if property.name().is_empty() {
        return Err(IcalError::Encoding("property name is empty".to_string()));
    }

    let mut line = property.name().to_string();
    for param in property.params() {
        line.push(';');
        line.push_str(&serialize_parameter(param)?);
    }
    line.push(':');
    line.push_str(&serialize_value(property.value()));

    Ok(fold_line(&line))
}

fn serialize_bag(properties: &PropertyBag, out: &mut String) -> IcalResult<()> {
    for property in properties {
        out.push_str(&serialize_property(property)?);
    }
    Ok(())
}

fn serialize_parameter(param: &Parameter) -> IcalResult<String> {
    Ok(format!(
        "{}={}",
        param.name(),
        escape_param_value(param.value())?
    ))
}

fn serialize_value(value: &Value) -> String {
    match value {
        Value::Text(s) => escape_text(s),
        Value::TextList(list) => list
            .iter()
            .map(|s| escape_text(s))
            .collect::<Vec<_>>()
            .join(","),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_property_line() {
        let prop = Property::text("SUMMARY", "Team sync");
        assert_eq!(serialize_property(&prop).unwrap(), "SUMMARY:Team sync\r\n");
    }

    #[test]
    fn property_with_params() {
        let prop = Property::with_params(
            "DTSTART",
            "20240102T100000",
            vec![
                Parameter::tzid("Europe/Berlin"),
                Parameter::value_type("DATE-TIME"),
            ],
        );
        assert_eq!(
            serialize_property(&prop).unwrap(),
            "DTSTART;TZID=Europe/Berlin;VALUE=DATE-TIME:20240102T100000\r\n"
        );
    }

    #[test]
    fn value_is_escaped() {
        let prop = Property::text("DESCRIPTION", "Line 1\nLine 2, really; yes\\no");
        assert_eq!(
            serialize_property(&prop).unwrap(),
            "DESCRIPTION:Line 1\\nLine 2\\, really\\; yes\\\\no\r\n"
        );
    }

    #[test]
    fn list_value_joins_with_bare_commas() {
        let prop = Property::text_list(
            "CATEGORIES",
            vec!["WORK".to_string(), "A,B".to_string()],
        );
        assert_eq!(
            serialize_property(&prop).unwrap(),
            "CATEGORIES:WORK,A\\,B\r\n"
        );
    }

    #[test]
    fn param_with_comma_is_quoted() {
        let prop = Property::with_params(
            "DTSTART",
            "20240102T100000",
            vec![Parameter::tzid("Europe,Berlin")],
        );
        assert_eq!(
            serialize_property(&prop).unwrap(),
            "DTSTART;TZID=\"Europe,Berlin\":20240102T100000\r\n"
        );
    }

    #[test]
    fn param_with_quote_errors() {
        let prop = Property::with_params(
            "ATTENDEE",
            "MAILTO:a@example.com",
            vec![Parameter::new("CN", "Jane \"JD\" Doe")],
        );
        assert!(matches!(
            serialize_property(&prop),
            Err(IcalError::Encoding(_))
        ));
    }

    #[test]
    fn empty_name_errors() {
        let prop = Property::text("", "value");
        assert!(serialize_property(&prop).is_err());
    }

    #[test]
    fn long_property_line_is_folded() {
        let prop = Property::text("DESCRIPTION", "D".repeat(200));
        let line = serialize_property(&prop).unwrap();
        assert!(line.contains("\r\n "));
        assert_eq!(
            line.replace("\r\n ", ""),
            format!("DESCRIPTION:{}\r\n", "D".repeat(200))
        );
    }
}
