//! Collaborators provided by the hosting platform.

use crate::widgets::WidgetAttrs;

/// Localized strings the renderer asks the host for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// Default banner text after a successful save.
    SaveOk,
    /// Default caption of a link field.
    LinkLabel,
    /// Caption of the built-in save button.
    Save,
    /// Caption of the built-in apply button.
    Apply,
}

/// Input handed to the host's date picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePicker<'a> {
    /// Submitted field name.
    pub input_name: &'a str,
    /// Current value.
    pub value: &'a str,
    /// Let the user pick a time as well.
    pub show_time: bool,
    /// Hide the picker's time bar.
    pub hide_timebar: bool,
}

/// Platform services a rendered form depends on.
pub trait Host: Send + Sync {
    /// Returns the anti-forgery token markup emitted once per form.
    ///
    /// The renderer does not interpret it.
    fn csrf_field(&self) -> String;

    /// Looks up a localized string. `None` falls back to the configured
    /// [`Messages`](crate::Messages).
    fn message(&self, _key: MessageKey) -> Option<String> {
        None
    }

    /// Renders a date picker widget.
    fn date_picker(&self, picker: &DatePicker<'_>) -> String;
}

/// A host with no platform behind it.
///
/// Emits a hidden `sessid` input when given a token and uses the browser's
/// native date input.
#[derive(Debug, Clone, Default)]
pub struct StaticHost {
    sessid: Option<String>,
}

impl StaticHost {
    /// Creates a host emitting no token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a host emitting the given session token.
    pub fn with_sessid(token: impl Into<String>) -> Self {
        Self {
            sessid: Some(token.into()),
        }
    }
}

impl Host for StaticHost {
    fn csrf_field(&self) -> String {
        self.sessid
            .as_ref()
            .map(|token| {
                let attrs = WidgetAttrs::new()
                    .with("type", "hidden")
                    .with("name", "sessid")
                    .with("id", "sessid")
                    .with("value", token);
                format!("<input {}>", attrs.to_html())
            })
            .unwrap_or_default()
    }

    fn date_picker(&self, picker: &DatePicker<'_>) -> String {
        let input_type = if picker.show_time {
            "datetime-local"
        } else {
            "date"
        };
        let attrs = WidgetAttrs::new()
            .with("type", input_type)
            .with("name", picker.input_name)
            .with("value", picker.value);
        format!("<input {}>", attrs.to_html())
    }
}
