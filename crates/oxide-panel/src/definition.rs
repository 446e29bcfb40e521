//! Form definitions loaded from JSON.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::config::RendererConfig;
use crate::error::Result;
use crate::fields::FieldTree;
use crate::renderer::{ButtonSpec, FormRenderer};
use crate::validation::{Constraint, ValidatorSet};
use crate::value::Values;

/// A complete form described as data.
///
/// ```rust
/// use oxide_panel::FormDefinition;
///
/// let definition = FormDefinition::from_json_str(r#"{
///     "name": "user",
///     "action": "/admin/user.php",
///     "fields": {
///         "LOGIN": {"title": "Login"},
///         "ACTIVE": {"type": "checkbox", "title": "Active"}
///     },
///     "validators": {"LOGIN": ["required"]}
/// }"#).unwrap();
///
/// let html = definition.into_renderer(Default::default()).unwrap().render(None, None).unwrap();
/// assert!(html.contains("star_required"));
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinition {
    /// Form name, namespacing field ids and names.
    pub name: String,
    /// Submit URL.
    #[serde(default)]
    pub action: String,
    /// Field tree, flat or tabbed.
    pub fields: FieldTree,
    /// Initial values.
    #[serde(default)]
    pub values: Values,
    /// Constraints per field.
    #[serde(default)]
    pub validators: IndexMap<String, Vec<Constraint>>,
    /// Extra buttons under tabs.
    #[serde(default)]
    pub buttons: Vec<ButtonSpec>,
    /// Show the built-in save and apply buttons.
    #[serde(default)]
    pub show_buttons: bool,
}

impl FormDefinition {
    /// Parses a definition.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a definition file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Builds the validators. Fails on an invalid pattern.
    pub fn validator_set(&self) -> Result<ValidatorSet> {
        ValidatorSet::from_constraints(&self.validators)
    }

    /// Builds a renderer for this definition.
    pub fn into_renderer(self, config: RendererConfig) -> Result<FormRenderer> {
        let validators = self.validator_set()?;
        Ok(FormRenderer::new(self.name, self.action, self.fields)
            .values(self.values)
            .validators(validators)
            .buttons(self.buttons)
            .show_buttons(self.show_buttons)
            .config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABBED: &str = r#"{
        "name": "item",
        "action": "/save",
        "showButtons": true,
        "buttons": [{"id": "export", "title": "Export"}],
        "fields": {
            "main": {"tab": "Main", "controls": {"NAME": {"title": "Name"}}},
            "extra": {"tab": "Extra", "controls": {}}
        },
        "values": {"NAME": "Lamp"},
        "validators": {"NAME": ["required", {"max_length": 10}]}
    }"#;

    #[test]
    fn test_parse_tabbed() {
        let definition = FormDefinition::from_json_str(TABBED).unwrap();
        assert_eq!(definition.name, "item");
        assert!(definition.fields.is_tabs());
        assert_eq!(definition.fields.len(), 2);
        assert!(definition.show_buttons);
        assert_eq!(definition.buttons, vec![ButtonSpec::new("export", "Export")]);
        assert!(definition.validator_set().unwrap().is_required("NAME"));
    }

    #[test]
    fn test_minimal() {
        let definition =
            FormDefinition::from_json_str(r#"{"name": "f", "fields": {"A": {}}}"#).unwrap();
        assert_eq!(definition.action, "");
        assert!(definition.values.is_empty());
        assert!(!definition.show_buttons);
    }

    #[test]
    fn test_bad_pattern() {
        let definition = FormDefinition::from_json_str(
            r#"{"name": "f", "fields": {}, "validators": {"A": [{"pattern": {"regex": "(", "message": "bad"}}]}}"#,
        )
        .unwrap();
        assert!(definition.into_renderer(RendererConfig::default()).is_err());
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        std::fs::write(&path, TABBED).unwrap();

        let renderer = FormDefinition::from_path(&path)
            .unwrap()
            .into_renderer(RendererConfig::default())
            .unwrap();
        let html = renderer.render(None, None).unwrap();
        assert!(html.contains(r#"value="Lamp""#));
        assert!(html.contains(r#"id="export""#));
    }
}
