//! Renderer configuration.

use std::path::Path;

use serde::Deserialize;

use crate::error::Result;

/// Stylesheet the admin panel needs for the info-message and tab markup.
pub const ADMIN_PUBLIC_CSS: &str = "/bitrix/panel/main/admin-public.css";

/// Inline help icon.
pub const HINT_ICON: &str = "/bitrix/js/main/core/images/hint.gif";

/// Localized strings the renderer falls back on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Banner text for a successful save without its own message.
    pub save_ok: String,
    /// Caption of a link field without its own caption.
    pub link_label: String,
    /// Caption of the built-in save button.
    pub save: String,
    /// Caption of the built-in apply button.
    pub apply: String,
    /// Shown in place of an empty link.
    pub empty: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            save_ok: "Changes saved.".to_string(),
            link_label: "link".to_string(),
            save: "Save".to_string(),
            apply: "Apply".to_string(),
            empty: "(empty)".to_string(),
        }
    }
}

/// Configuration shared by every form a renderer draws.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Fallback localized strings.
    pub messages: Messages,
    /// URL of the inline help icon.
    pub hint_icon: String,
    /// Stylesheets the rendered markup needs on the page.
    pub stylesheets: Vec<String>,
    /// Fail on unknown type tags instead of rendering a text input.
    pub strict: bool,
    /// DOM name of the top-level tab control.
    pub tab_control: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            messages: Messages::default(),
            hint_icon: HINT_ICON.to_string(),
            stylesheets: vec![ADMIN_PUBLIC_CSS.to_string()],
            strict: false,
            tab_control: "tabControl".to_string(),
        }
    }
}

impl RendererConfig {
    /// Parses a JSON config. Missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Builder method to toggle strict mode.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
