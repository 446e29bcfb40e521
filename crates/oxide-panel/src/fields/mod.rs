//! Field descriptors.

mod select;
mod tree;

pub use select::{SelectOption, SelectOptions};
pub use tree::{FieldTree, TabSpec};

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::resolve::Resolvable;
use crate::value::FieldValue;
use crate::widgets::{AttrValue, WidgetAttrs};

/// Built-in rendering strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Nested tab group.
    Tabs,
    /// Section heading spanning the row.
    Header,
    /// Info block showing the help text.
    Comment,
    /// Read-only display of the value.
    Note,
    /// Several controls rendered into one row.
    ControlGroup,
    /// Text input or textarea.
    Input,
    Hidden,
    Checkbox,
    Select,
    /// Inline help icon.
    Help,
    Date,
    Button,
    Link,
}

impl FieldKind {
    /// Looks up a strategy by type tag.
    ///
    /// Tags match case-insensitively and ignore `_` and `-`, so
    /// `CONTROL_GROUP`, `control-group` and `controlGroup` are the same tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let normalized: String = tag
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let kind = match normalized.as_str() {
            "tabs" => Self::Tabs,
            "header" => Self::Header,
            "comment" => Self::Comment,
            "note" => Self::Note,
            "controlgroup" => Self::ControlGroup,
            "input" | "" => Self::Input,
            "hidden" => Self::Hidden,
            "checkbox" => Self::Checkbox,
            "select" => Self::Select,
            "help" => Self::Help,
            "date" => Self::Date,
            "button" => Self::Button,
            "link" => Self::Link,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns the canonical tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tabs => "tabs",
            Self::Header => "header",
            Self::Comment => "comment",
            Self::Note => "note",
            Self::ControlGroup => "control-group",
            Self::Input => "input",
            Self::Hidden => "hidden",
            Self::Checkbox => "checkbox",
            Self::Select => "select",
            Self::Help => "help",
            Self::Date => "date",
            Self::Button => "button",
            Self::Link => "link",
        }
    }

    /// Returns whether rows of this kind render without a caption cell.
    pub fn is_captionless(self) -> bool {
        matches!(self, Self::Tabs | Self::Header | Self::Comment)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied rendering function, given the field name and descriptor.
pub type CustomRender = Arc<dyn Fn(&str, &FieldSpec) -> String + Send + Sync>;

/// How a field is rendered.
#[derive(Clone)]
pub enum FieldType {
    /// One of the built-in strategies.
    Kind(FieldKind),
    /// A tag no strategy handles. Renders as [`FieldKind::Input`] unless the
    /// renderer is strict.
    Unknown(String),
    /// A caller-supplied function.
    Custom(CustomRender),
}

impl FieldType {
    /// Parses a type tag.
    pub fn from_tag(tag: &str) -> Self {
        FieldKind::from_tag(tag).map_or_else(|| Self::Unknown(tag.to_string()), Self::Kind)
    }

    /// Returns the built-in kind, if this is one.
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            Self::Kind(kind) => Some(*kind),
            Self::Unknown(_) | Self::Custom(_) => None,
        }
    }

    /// Returns whether this is the given built-in kind.
    pub fn is(&self, kind: FieldKind) -> bool {
        self.kind() == Some(kind)
    }
}

impl Default for FieldType {
    fn default() -> Self {
        Self::Kind(FieldKind::Input)
    }
}

impl From<FieldKind> for FieldType {
    fn from(kind: FieldKind) -> Self {
        Self::Kind(kind)
    }
}

impl fmt::Debug for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind(kind) => f.debug_tuple("Kind").field(kind).finish(),
            Self::Unknown(tag) => f.debug_tuple("Unknown").field(tag).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Declarative description of one field.
#[derive(Clone, Deserialize)]
#[serde(try_from = "RawFieldSpec")]
pub struct FieldSpec {
    /// Rendering strategy.
    pub field_type: FieldType,
    /// Caption text.
    pub title: Option<String>,
    /// Help text, shown as an icon tooltip or info block.
    pub help: Option<String>,
    /// Note rendered under the control.
    pub comment: Option<String>,
    /// Whether the row gets a caption cell.
    pub show_caption: bool,
    /// Declared HTML attributes.
    pub attrs: WidgetAttrs,
    /// Value used when the value source has none.
    pub default: Option<FieldValue>,
    /// Sub-fields of a control group, or tabs of a nested tab group.
    pub items: Option<Resolvable<FieldTree>>,
    /// Options of a select.
    pub options: Option<Resolvable<SelectOptions>>,
    /// Label of an empty leading select option.
    pub null_option: Option<String>,
    /// Render an input as a textarea.
    pub multiline: bool,
    /// Allow selecting several options.
    pub multiple: bool,
    /// Text placed right after a text input.
    pub prefix: Option<String>,
    /// Separator between the controls of a group.
    pub split: String,
    /// Value a checked checkbox submits (default `1`).
    pub check_value: Option<FieldValue>,
    /// Value an unchecked checkbox submits (default `0`).
    pub uncheck_value: Option<FieldValue>,
    /// Link caption.
    pub caption: Option<String>,
    /// Let the date picker choose a time.
    pub show_time: bool,
    /// Hide the date picker's time bar.
    pub hide_timebar: bool,
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("field_type", &self.field_type)
            .field("title", &self.title)
            .field("help", &self.help)
            .field("attrs", &self.attrs)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

impl Default for FieldSpec {
    fn default() -> Self {
        Self::new(FieldKind::Input)
    }
}

impl FieldSpec {
    /// Creates a descriptor rendered by the given strategy.
    pub fn new(field_type: impl Into<FieldType>) -> Self {
        Self {
            field_type: field_type.into(),
            title: None,
            help: None,
            comment: None,
            show_caption: true,
            attrs: WidgetAttrs::new(),
            default: None,
            items: None,
            options: None,
            null_option: None,
            multiline: false,
            multiple: false,
            prefix: None,
            split: String::new(),
            check_value: None,
            uncheck_value: None,
            caption: None,
            show_time: false,
            hide_timebar: false,
        }
    }

    /// Creates a descriptor from a type tag.
    pub fn tagged(tag: &str) -> Self {
        Self::new(FieldType::from_tag(tag))
    }

    /// Creates a descriptor rendered by a caller-supplied function.
    pub fn custom(render: impl Fn(&str, &FieldSpec) -> String + Send + Sync + 'static) -> Self {
        Self::new(FieldType::Custom(Arc::new(render)))
    }

    /// Creates a text input.
    pub fn input(title: impl Into<String>) -> Self {
        Self::new(FieldKind::Input).title(title)
    }

    /// Creates a hidden input.
    pub fn hidden() -> Self {
        Self::new(FieldKind::Hidden)
    }

    /// Creates a checkbox.
    pub fn checkbox(title: impl Into<String>) -> Self {
        Self::new(FieldKind::Checkbox).title(title)
    }

    /// Creates a select over the given options.
    pub fn select(title: impl Into<String>, options: impl Into<SelectOptions>) -> Self {
        Self::new(FieldKind::Select)
            .title(title)
            .options(options.into())
    }

    /// Creates a section heading.
    pub fn header(title: impl Into<String>) -> Self {
        Self::new(FieldKind::Header).title(title)
    }

    /// Creates a control group over the given sub-fields.
    pub fn group(title: impl Into<String>, items: FieldTree) -> Self {
        Self::new(FieldKind::ControlGroup).title(title).items(items)
    }

    /// Sets the caption text.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets help text.
    #[must_use]
    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help = Some(text.into());
        self
    }

    /// Sets the note rendered under the control.
    #[must_use]
    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.comment = Some(text.into());
        self
    }

    /// Renders the row without a caption cell.
    #[must_use]
    pub fn hide_caption(mut self) -> Self {
        self.show_caption = false;
        self
    }

    /// Sets a declared attribute.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.set(key, value);
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Sets the sub-fields of a group or the tabs of a nested tab group.
    #[must_use]
    pub fn items(mut self, items: impl Into<Resolvable<FieldTree>>) -> Self {
        self.items = Some(items.into());
        self
    }

    /// Sets the select options.
    #[must_use]
    pub fn options(mut self, options: impl Into<Resolvable<SelectOptions>>) -> Self {
        self.options = Some(options.into());
        self
    }

    /// Prepends an empty option with the given label.
    #[must_use]
    pub fn null_option(mut self, label: impl Into<String>) -> Self {
        self.null_option = Some(label.into());
        self
    }

    /// Renders as a textarea.
    #[must_use]
    pub fn multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    /// Allows multiple selection.
    #[must_use]
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Sets text placed right after the input.
    #[must_use]
    pub fn prefix(mut self, text: impl Into<String>) -> Self {
        self.prefix = Some(text.into());
        self
    }

    /// Sets the separator between group controls.
    #[must_use]
    pub fn split(mut self, separator: impl Into<String>) -> Self {
        self.split = separator.into();
        self
    }

    /// Sets the values a checkbox submits when checked and unchecked.
    #[must_use]
    pub fn check_values(
        mut self,
        checked: impl Into<FieldValue>,
        unchecked: impl Into<FieldValue>,
    ) -> Self {
        self.check_value = Some(checked.into());
        self.uncheck_value = Some(unchecked.into());
        self
    }

    /// Sets the link caption.
    #[must_use]
    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Lets the date picker choose a time.
    #[must_use]
    pub fn show_time(mut self) -> Self {
        self.show_time = true;
        self
    }

    /// Hides the date picker's time bar.
    #[must_use]
    pub fn hide_timebar(mut self) -> Self {
        self.hide_timebar = true;
        self
    }

    /// Returns the caption text, or `""`.
    pub fn title_text(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Returns the help text when it is non-empty.
    pub fn help_text(&self) -> Option<&str> {
        self.help.as_deref().filter(|h| !h.is_empty())
    }
}

/// Wire shape of [`FieldSpec`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFieldSpec {
    #[serde(rename = "type", default)]
    field_type: Option<String>,
    title: Option<String>,
    #[serde(alias = "help")]
    help_text: Option<String>,
    comment: Option<String>,
    #[serde(default = "default_true")]
    show_caption: bool,
    #[serde(default)]
    attrs: WidgetAttrs,
    default: Option<FieldValue>,
    items: Option<serde_json::Value>,
    #[serde(rename = "null")]
    null_option: Option<String>,
    #[serde(default)]
    multiline: bool,
    #[serde(default)]
    multiple: bool,
    prefix: Option<String>,
    #[serde(alias = "split")]
    split_separator: Option<String>,
    #[serde(alias = "value")]
    check_value: Option<FieldValue>,
    uncheck_value: Option<FieldValue>,
    caption: Option<String>,
    #[serde(default)]
    show_time: bool,
    #[serde(default)]
    hide_timebar: bool,
}

const fn default_true() -> bool {
    true
}

impl TryFrom<RawFieldSpec> for FieldSpec {
    type Error = serde_json::Error;

    fn try_from(raw: RawFieldSpec) -> Result<Self, Self::Error> {
        let field_type = raw
            .field_type
            .as_deref()
            .map_or_else(FieldType::default, FieldType::from_tag);

        // `items` is shaped by the strategy that consumes it.
        let (items, options) = match (field_type.kind(), raw.items) {
            (Some(FieldKind::Select), Some(items)) => {
                (None, Some(Resolvable::Static(serde_json::from_value(items)?)))
            }
            (Some(FieldKind::Tabs | FieldKind::ControlGroup), Some(items)) => {
                (Some(Resolvable::Static(serde_json::from_value(items)?)), None)
            }
            _ => (None, None),
        };

        Ok(Self {
            field_type,
            title: raw.title,
            help: raw.help_text,
            comment: raw.comment,
            show_caption: raw.show_caption,
            attrs: raw.attrs,
            default: raw.default,
            items,
            options,
            null_option: raw.null_option,
            multiline: raw.multiline,
            multiple: raw.multiple,
            prefix: raw.prefix,
            split: raw.split_separator.unwrap_or_default(),
            check_value: raw.check_value,
            uncheck_value: raw.uncheck_value,
            caption: raw.caption,
            show_time: raw.show_time,
            hide_timebar: raw.hide_timebar,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_normalization() {
        assert_eq!(
            FieldKind::from_tag("CONTROL_GROUP"),
            Some(FieldKind::ControlGroup)
        );
        assert_eq!(
            FieldKind::from_tag("control-group"),
            Some(FieldKind::ControlGroup)
        );
        assert_eq!(FieldKind::from_tag("HIDDEN"), Some(FieldKind::Hidden));
        assert_eq!(FieldKind::from_tag(""), Some(FieldKind::Input));
        assert_eq!(FieldKind::from_tag("not-a-real-type"), None);
    }

    #[test]
    fn test_unknown_tag_is_kept() {
        let field_type = FieldType::from_tag("colour");
        assert!(matches!(&field_type, FieldType::Unknown(tag) if tag == "colour"));
        assert_eq!(field_type.kind(), None);
    }

    #[test]
    fn test_builder() {
        let spec = FieldSpec::input("Name")
            .help("Shown in lists")
            .attr("size", 40)
            .default_value("untitled");

        assert!(spec.field_type.is(FieldKind::Input));
        assert_eq!(spec.title_text(), "Name");
        assert_eq!(spec.help_text(), Some("Shown in lists"));
        assert!(spec.show_caption);
        assert_eq!(spec.default, Some(FieldValue::from("untitled")));
    }

    #[test]
    fn test_deserialize_defaults() {
        let spec: FieldSpec = serde_json::from_str(r#"{"title": "Code"}"#).unwrap();
        assert!(spec.field_type.is(FieldKind::Input));
        assert!(spec.show_caption);
        assert!(spec.attrs.is_empty());
    }

    #[test]
    fn test_deserialize_select_items() {
        let spec: FieldSpec = serde_json::from_str(
            r#"{"type": "SELECT", "items": {"b": "Bee", "a": "Ay"}, "null": "-", "multiple": true}"#,
        )
        .unwrap();

        let options = spec.options.as_ref().and_then(Resolvable::as_static).unwrap();
        let values: Vec<_> = options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, ["b", "a"]);
        assert!(spec.items.is_none());
        assert_eq!(spec.null_option.as_deref(), Some("-"));
        assert!(spec.multiple);
    }

    #[test]
    fn test_deserialize_group_items() {
        let spec: FieldSpec = serde_json::from_str(
            r#"{"type": "control_group", "splitSeparator": " / ",
                "items": {"from": {"type": "input"}, "to": {"type": "input"}}}"#,
        )
        .unwrap();

        let items = spec.items.as_ref().and_then(Resolvable::as_static).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(spec.split, " / ");
    }

    #[test]
    fn test_deserialize_checkbox_sentinels() {
        let spec: FieldSpec =
            serde_json::from_str(r#"{"type": "checkbox", "value": "Y", "uncheckValue": "N"}"#)
                .unwrap();
        assert_eq!(spec.check_value, Some(FieldValue::from("Y")));
        assert_eq!(spec.uncheck_value, Some(FieldValue::from("N")));
    }
}
