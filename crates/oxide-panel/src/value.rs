//! Field values and the value source a form is rendered against.

use std::borrow::Cow;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single field value as stored in a record or submitted form data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    /// An explicitly unset value. Treated as missing during resolution.
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Multiple values, e.g. the selection of a multi-select.
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Returns whether this is [`FieldValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns whether the value carries no content.
    ///
    /// `0` and `"0"` are content: only null, `false`, the empty string and
    /// the empty list are blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null | Self::Bool(false) => true,
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Bool(true) | Self::Int(_) | Self::Float(_) => false,
        }
    }

    /// Returns the value the way it is written into markup.
    ///
    /// Booleans follow form-submission conventions (`"1"` / `""`), lists are
    /// joined with `", "`.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Null | Self::Bool(false) => Cow::Borrowed(""),
            Self::Bool(true) => Cow::Borrowed("1"),
            Self::Int(n) => Cow::Owned(n.to_string()),
            Self::Float(n) => Cow::Owned(n.to_string()),
            Self::Text(s) => Cow::Borrowed(s),
            Self::List(items) => Cow::Owned(
                items
                    .iter()
                    .map(|item| item.as_text().into_owned())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
        }
    }

    /// Returns whether `needle` is one of the values held.
    ///
    /// Scalars are treated as a one-element set, so this answers "is this
    /// option selected" for both single and multiple selects.
    pub fn contains(&self, needle: &str) -> bool {
        match self {
            Self::Null => false,
            Self::List(items) => items.iter().any(|item| item.as_text() == needle),
            scalar => scalar.as_text() == needle,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// Read-only store of field name to current value.
///
/// Typically a loaded record or the submitted form data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Values {
    entries: IndexMap<String, FieldValue>,
}

impl Values {
    /// Creates an empty value source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set a value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Returns the value stored for `name`, if it is set.
    ///
    /// Entries holding [`FieldValue::Null`] count as unset.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries.get(name).filter(|value| !value.is_null())
    }

    /// Returns whether the source holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Values {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
