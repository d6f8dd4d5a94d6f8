//! iCalendar property types (RFC 5545 §3.1).

use super::Parameter;

/// A property value.
///
/// A list value renders as its elements escaped individually and joined
/// with unescaped commas (e.g. category lists).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A single text value.
    Text(String),
    /// An ordered list of text values.
    TextList(Vec<String>),
}

/// A single content line before serialization.
///
/// A property is immutable once constructed; replacing it in the owning
/// [`PropertyBag`](super::PropertyBag) is how a changed value is modeled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property name (normalized to uppercase).
    name: String,
    /// Property value; escaping happens at serialization.
    value: Value,
    /// Parameters in order of appearance.
    params: Vec<Parameter>,
}

impl Property {
    /// Creates a property from its parts.
    #[must_use]
    pub fn new(name: impl Into<String>, value: Value, params: Vec<Parameter>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            value,
            params,
        }
    }

    /// Creates a property with a text value and no parameters.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, Value::Text(value.into()), Vec::new())
    }

    /// Creates a property with a text value and parameters.
    #[must_use]
    pub fn with_params(
        name: impl Into<String>,
        value: impl Into<String>,
        params: Vec<Parameter>,
    ) -> Self {
        Self::new(name, Value::Text(value.into()), params)
    }

    /// Creates a property with a list value and no parameters.
    #[must_use]
    pub fn text_list(name: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(name, Value::TextList(values), Vec::new())
    }

    /// Returns the property name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the property value.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Returns the parameters in order of appearance.
    #[must_use]
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// Returns the parameter with the given name.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&Parameter> {
        let name_upper = name.to_ascii_uppercase();
        self.params.iter().find(|p| p.name() == name_upper)
    }

    /// Returns the value of a parameter.
    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.get_param(name).map(Parameter::value)
    }

    /// Returns whether this property has a parameter with the given name.
    #[must_use]
    pub fn has_param(&self, name: &str) -> bool {
        self.get_param(name).is_some()
    }
}
