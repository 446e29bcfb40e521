//! Field trees: flat field lists or tabs of field lists.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use super::{FieldKind, FieldSpec, FieldType};
use crate::resolve::Resolvable;

/// Key whose presence on the first entry marks a tab list.
const TAB_MARKER: &str = "tab";

/// The layout driving one form.
#[derive(Debug, Clone)]
pub enum FieldTree {
    /// Field name to descriptor, rendered as a field table.
    Fields(IndexMap<String, FieldSpec>),
    /// Tab id to tab, each holding its own tree.
    Tabs(IndexMap<String, TabSpec>),
}

impl Default for FieldTree {
    fn default() -> Self {
        Self::Fields(IndexMap::new())
    }
}

impl FieldTree {
    /// Creates an empty flat tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a flat tree from `(name, descriptor)` pairs.
    pub fn from_fields<K: Into<String>>(fields: impl IntoIterator<Item = (K, FieldSpec)>) -> Self {
        Self::Fields(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Creates a tabbed tree from `(tab id, tab)` pairs.
    pub fn from_tabs<K: Into<String>>(tabs: impl IntoIterator<Item = (K, TabSpec)>) -> Self {
        Self::Tabs(tabs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Builder method to append a field. A tabbed tree is left untouched and
    /// the field is dropped with a warning.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        let name = name.into();
        match &mut self {
            Self::Fields(fields) => {
                fields.insert(name, spec);
            }
            Self::Tabs(_) => warn!(field = %name, "field added to a tab list, dropping it"),
        }
        self
    }

    /// Builder method to append a tab. A flat tree is left untouched unless
    /// it is still empty; otherwise the tab is dropped with a warning.
    #[must_use]
    pub fn tab(mut self, id: impl Into<String>, tab: TabSpec) -> Self {
        if matches!(&self, Self::Fields(fields) if fields.is_empty()) {
            self = Self::Tabs(IndexMap::new());
        }
        let id = id.into();
        match &mut self {
            Self::Tabs(tabs) => {
                tabs.insert(id, tab);
            }
            Self::Fields(_) => warn!(tab = %id, "tab added to a field list, dropping it"),
        }
        self
    }

    /// Returns whether this tree renders as tabs.
    pub fn is_tabs(&self) -> bool {
        matches!(self, Self::Tabs(_))
    }

    /// Returns the number of top-level entries.
    pub fn len(&self) -> usize {
        match self {
            Self::Fields(fields) => fields.len(),
            Self::Tabs(tabs) => tabs.len(),
        }
    }

    /// Returns whether the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Collects `(field, tag)` for every unknown type tag in the static
    /// parts of the tree. Computed parts are only known at render time.
    pub fn unknown_types(&self) -> Vec<(String, String)> {
        let mut found = Vec::new();
        self.collect_unknown(&mut found);
        found
    }

    fn collect_unknown(&self, found: &mut Vec<(String, String)>) {
        match self {
            Self::Fields(fields) => {
                for (name, spec) in fields {
                    if let FieldType::Unknown(tag) = &spec.field_type {
                        found.push((name.clone(), tag.clone()));
                    }
                    if let Some(items) = spec.items.as_ref().and_then(Resolvable::as_static) {
                        items.collect_unknown(found);
                    }
                }
            }
            Self::Tabs(tabs) => {
                for tab in tabs.values() {
                    if let Some(controls) = tab.controls.as_static() {
                        controls.collect_unknown(found);
                    }
                }
            }
        }
    }
}

impl<'de> Deserialize<'de> for FieldTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = IndexMap::<String, Value>::deserialize(deserializer)?;

        let tabbed = entries
            .values()
            .next()
            .and_then(Value::as_object)
            .is_some_and(|first| first.contains_key(TAB_MARKER));

        if tabbed {
            entries
                .into_iter()
                .map(|(id, tab)| match serde_json::from_value::<TabSpec>(tab) {
                    Ok(tab) => Ok((id, tab)),
                    Err(e) => Err(D::Error::custom(format!("tab {id}: {e}"))),
                })
                .collect::<Result<IndexMap<_, _>, D::Error>>()
                .map(Self::Tabs)
        } else {
            entries
                .into_iter()
                .map(|(name, spec)| match serde_json::from_value::<FieldSpec>(spec) {
                    Ok(spec) => Ok((name, spec)),
                    Err(e) => Err(D::Error::custom(format!("field {name}: {e}"))),
                })
                .collect::<Result<IndexMap<_, _>, D::Error>>()
                .map(Self::Fields)
        }
    }
}

/// One tab of a tabbed tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabSpec {
    /// Caption on the tab handle.
    pub tab: String,
    /// Heading inside the tab body.
    #[serde(default)]
    pub title: Option<String>,
    /// Info text shown above the tab's fields.
    #[serde(default, alias = "help")]
    pub help_text: Option<String>,
    /// Fields of the tab.
    #[serde(default)]
    pub controls: Resolvable<FieldTree>,
}

impl TabSpec {
    /// Creates a tab with the given handle caption.
    pub fn new(tab: impl Into<String>) -> Self {
        Self {
            tab: tab.into(),
            title: None,
            help_text: None,
            controls: Resolvable::default(),
        }
    }

    /// Sets the heading inside the tab body.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the info text shown above the tab's fields.
    #[must_use]
    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    /// Sets the tab's fields.
    #[must_use]
    pub fn controls(mut self, controls: impl Into<Resolvable<FieldTree>>) -> Self {
        self.controls = controls.into();
        self
    }

    /// Returns the tab's info text as a descriptor, so it renders like a
    /// comment field.
    pub(crate) fn as_comment(&self) -> FieldSpec {
        let mut spec = FieldSpec::new(FieldKind::Comment);
        spec.help.clone_from(&self.help_text);
        spec
    }
}
