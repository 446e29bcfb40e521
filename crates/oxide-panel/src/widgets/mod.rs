//! Per-type rendering strategies and the attribute layer they share.

mod controls;
mod display;

pub(crate) use controls::{button, checkbox, date, hidden, input, select};
pub(crate) use display::{comment, header, help, link, note};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Value of a single HTML attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// `true` renders as `name="name"`, `false` drops the attribute.
    Flag(bool),
    Int(i64),
    Text(String),
}

impl AttrValue {
    /// Returns whether the attribute is switched on.
    pub fn is_set(&self) -> bool {
        match self {
            Self::Flag(on) => *on,
            Self::Int(n) => *n != 0,
            Self::Text(s) => !s.is_empty(),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

/// Ordered set of HTML attributes.
///
/// Layers merge key by key: a later layer replaces the value of an earlier
/// key but the key keeps its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetAttrs {
    /// HTML attributes in insertion order.
    pub attrs: IndexMap<String, AttrValue>,
}

impl WidgetAttrs {
    /// Creates new empty widget attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Gets an attribute.
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    /// Returns whether `key` is present and switched on.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some_and(AttrValue::is_set)
    }

    /// Returns whether there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Builder method to set an attribute.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Lays `layer` over these attributes.
    pub fn merge(&mut self, layer: &Self) {
        for (key, value) in &layer.attrs {
            self.attrs.insert(key.clone(), value.clone());
        }
    }

    /// Builder method to lay `layer` over these attributes.
    #[must_use]
    pub fn merged(mut self, layer: &Self) -> Self {
        self.merge(layer);
        self
    }

    /// Renders attributes as an HTML attribute string.
    pub fn to_html(&self) -> String {
        self.attrs
            .iter()
            .filter_map(|(k, v)| match v {
                AttrValue::Flag(false) => None,
                AttrValue::Flag(true) => Some(format!(r#"{k}="{}""#, html_escape(k))),
                AttrValue::Int(n) => Some(format!(r#"{k}="{n}""#)),
                AttrValue::Text(s) => Some(format!(r#"{k}="{}""#, html_escape(s))),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for WidgetAttrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            attrs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
