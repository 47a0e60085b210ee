//! Frontmatter property values as seen by the mover.
//!
//! Frontmatter is free-form YAML, so a property can hold a string, a list or
//! any other scalar. The mover only ever needs one string out of it, picked
//! by [`PropertyValue::folder_value`].

use serde_yaml::{Mapping, Value};

/// A truthy frontmatter property value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// A plain string.
    Text(String),
    /// A list, each element rendered to a string.
    List(Vec<String>),
    /// Any other scalar, in its display form.
    Other(String),
}

impl PropertyValue {
    /// Classify a YAML value, returning `None` for falsy values
    /// (`null`, `false`, `0`, NaN, `""`).
    #[must_use]
    pub fn from_yaml(value: &Value) -> Option<Self> {
        match value {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Number(n) if n.as_f64().is_some_and(|f| f == 0.0 || f.is_nan()) => None,
            Value::Sequence(items) => Some(Self::List(items.iter().map(render).collect())),
            Value::Tagged(tagged) => Self::from_yaml(&tagged.value),
            other => Some(Self::Other(render(other))),
        }
    }

    /// The string used as a folder name: the text itself, the first list
    /// element, or the display form of anything else.
    #[must_use]
    pub fn folder_value(&self) -> String {
        match self {
            Self::Text(s) | Self::Other(s) => s.clone(),
            Self::List(items) => items.first().cloned().unwrap_or_default(),
        }
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Tagged(tagged) => render(&tagged.value),
        Value::Sequence(items) => items
            .iter()
            .map(render_element)
            .collect::<Vec<_>>()
            .join(","),
        Value::Mapping(_) => String::new(),
    }
}

/// Render a nested list element; null elements join as empty strings.
fn render_element(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => render(other),
    }
}

/// Parsed frontmatter of one note.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata(Mapping);

impl Metadata {
    #[must_use]
    pub fn new(mapping: Mapping) -> Self {
        Self(mapping)
    }

    /// Look up a property, applying the falsy rule.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<PropertyValue> {
        self.0.get(name).and_then(PropertyValue::from_yaml)
    }

    /// Look up a property and reduce it to its folder value, treating an
    /// empty result like a missing property.
    #[must_use]
    pub fn folder_value(&self, name: &str) -> Option<String> {
        self.property(name)
            .map(|value| value.folder_value())
            .filter(|value| !value.is_empty())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Mapping> for Metadata {
    fn from(mapping: Mapping) -> Self {
        Self(mapping)
    }
}
