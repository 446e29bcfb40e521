//! Select options.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One `<option>` of a select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Submitted value.
    pub value: String,
    /// Displayed title.
    pub title: String,
}

impl SelectOption {
    /// Creates an option.
    pub fn new(value: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            title: title.into(),
        }
    }

    /// Creates an option from a record-shaped entry.
    ///
    /// The title is the record's name, or its title when the name is empty.
    pub fn record(id: impl Into<String>, name: Option<&str>, title: Option<&str>) -> Self {
        let title = name.filter(|n| !n.is_empty()).or(title).unwrap_or_default();
        Self::new(id, title)
    }

    fn from_json(key: Option<&str>, entry: &Value) -> Result<Self, String> {
        match entry {
            Value::Object(record) => {
                let id = record
                    .get("id")
                    .map(scalar_text)
                    .or_else(|| key.map(str::to_string))
                    .ok_or_else(|| "select option record without `id`".to_string())?;
                let name = record.get("name").and_then(Value::as_str);
                let title = record.get("title").and_then(Value::as_str);
                Ok(Self::record(id, name, title))
            }
            Value::Array(_) => Err("nested arrays are not valid select options".to_string()),
            scalar => {
                let title = scalar_text(scalar);
                Ok(Self::new(key.map_or_else(|| title.clone(), str::to_string), title))
            }
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Ordered options of a select.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectOptions(Vec<SelectOption>);

impl SelectOptions {
    /// Creates an empty option list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to append an option.
    #[must_use]
    pub fn option(mut self, value: impl Into<String>, title: impl Into<String>) -> Self {
        self.0.push(SelectOption::new(value, title));
        self
    }

    /// Appends an option.
    pub fn push(&mut self, option: SelectOption) {
        self.0.push(option);
    }

    /// Iterates over options in order.
    pub fn iter(&self) -> std::slice::Iter<'_, SelectOption> {
        self.0.iter()
    }

    /// Returns the number of options.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether there are no options.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a SelectOptions {
    type Item = &'a SelectOption;
    type IntoIter = std::slice::Iter<'a, SelectOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<SelectOption> for SelectOptions {
    fn from_iter<I: IntoIterator<Item = SelectOption>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<V: Into<String>, T: Into<String>> From<Vec<(V, T)>> for SelectOptions {
    fn from(pairs: Vec<(V, T)>) -> Self {
        pairs
            .into_iter()
            .map(|(value, title)| SelectOption::new(value, title))
            .collect()
    }
}

/// Accepts `{value: title}`, `{key: {id, name|title}}` or an array of
/// `{id, name|title}` records.
impl<'de> Deserialize<'de> for SelectOptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Object(entries) => entries
                .iter()
                .map(|(key, entry)| SelectOption::from_json(Some(key), entry))
                .collect::<Result<_, _>>()
                .map_err(D::Error::custom),
            Value::Array(entries) => entries
                .iter()
                .map(|entry| SelectOption::from_json(None, entry))
                .collect::<Result<_, _>>()
                .map_err(D::Error::custom),
            Value::Null => Ok(Self::new()),
            other => Err(D::Error::custom(format!(
                "expected select options, found {other}"
            ))),
        }
    }
}
