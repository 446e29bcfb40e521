//! The form renderer.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::config::RendererConfig;
use crate::error::{PanelError, Result};
use crate::fields::{FieldKind, FieldSpec, FieldTree, FieldType};
use crate::host::{Host, MessageKey, StaticHost};
use crate::message::{render_result_message, OperationResult};
use crate::resolve::Resolvable;
use crate::validation::ValidatorSet;
use crate::value::{FieldValue, Values};
use crate::widgets::{self, html_escape, WidgetAttrs};

const TABLE_OPEN: &str = r#"<table width="100%" class="adm-detail-content-table edit-table">"#;
const REQUIRED_MARKER: &str = r#"<span class="star_required required">*</span>"#;

/// An extra submit button rendered under a tabbed form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ButtonSpec {
    /// DOM id of the button.
    pub id: String,
    /// Caption.
    pub title: String,
}

impl ButtonSpec {
    /// Creates a button.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Renders a back-office form from a field tree.
///
/// ```rust
/// use oxide_panel::{FieldSpec, FieldTree, FormRenderer, OperationResult, Values};
///
/// let fields = FieldTree::new()
///     .field("ID", FieldSpec::hidden())
///     .field("NAME", FieldSpec::input("Name"))
///     .field("ACTIVE", FieldSpec::checkbox("Active"));
///
/// let renderer = FormRenderer::new("product", "/admin/product.php", fields)
///     .values(Values::new().with("ID", 7).with("NAME", "Widget"));
///
/// let html = renderer
///     .render(Some(&OperationResult::success_with("Saved")), None)
///     .unwrap();
/// assert!(html.contains(r#"name="product[NAME]""#));
/// assert!(html.contains("Saved"));
/// ```
pub struct FormRenderer {
    form_name: String,
    action: String,
    fields: Resolvable<FieldTree>,
    values: Values,
    validators: ValidatorSet,
    buttons: Vec<ButtonSpec>,
    show_buttons: bool,
    config: RendererConfig,
    host: Arc<dyn Host>,
}

impl fmt::Debug for FormRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormRenderer")
            .field("form_name", &self.form_name)
            .field("action", &self.action)
            .field("fields", &self.fields)
            .field("validators", &self.validators)
            .field("buttons", &self.buttons)
            .field("show_buttons", &self.show_buttons)
            .finish_non_exhaustive()
    }
}

impl FormRenderer {
    /// Creates a renderer for the form `form_name` submitting to `action`.
    ///
    /// The form name namespaces every field id (`{form}_{field}`) and name
    /// (`{form}[{field}]`).
    pub fn new(
        form_name: impl Into<String>,
        action: impl Into<String>,
        fields: impl Into<Resolvable<FieldTree>>,
    ) -> Self {
        Self {
            form_name: form_name.into(),
            action: action.into(),
            fields: fields.into(),
            values: Values::new(),
            validators: ValidatorSet::new(),
            buttons: Vec::new(),
            show_buttons: false,
            config: RendererConfig::default(),
            host: Arc::new(StaticHost::new()),
        }
    }

    /// Sets the value source.
    #[must_use]
    pub fn values(mut self, values: Values) -> Self {
        self.values = values;
        self
    }

    /// Sets the validators consulted for required markers.
    #[must_use]
    pub fn validators(mut self, validators: ValidatorSet) -> Self {
        self.validators = validators;
        self
    }

    /// Sets the extra buttons rendered under tabs.
    #[must_use]
    pub fn buttons(mut self, buttons: Vec<ButtonSpec>) -> Self {
        self.buttons = buttons;
        self
    }

    /// Appends an extra button.
    #[must_use]
    pub fn button(mut self, id: impl Into<String>, title: impl Into<String>) -> Self {
        self.buttons.push(ButtonSpec::new(id, title));
        self
    }

    /// Shows the built-in save and apply buttons under top-level tabs.
    #[must_use]
    pub fn show_buttons(mut self, show: bool) -> Self {
        self.show_buttons = show;
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: RendererConfig) -> Self {
        self.config = config;
        self
    }

    /// Toggles strict mode, see [`RendererConfig::strict`].
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.config.strict = strict;
        self
    }

    /// Sets the platform collaborators.
    #[must_use]
    pub fn host(mut self, host: impl Host + 'static) -> Self {
        self.host = Arc::new(host);
        self
    }

    /// Returns the form name.
    pub fn form_name(&self) -> &str {
        &self.form_name
    }

    /// Returns the validators.
    pub fn validator_set(&self) -> &ValidatorSet {
        &self.validators
    }

    /// Returns the stylesheets the rendered markup needs on the page.
    ///
    /// Registering them is left to the caller.
    pub fn stylesheets(&self) -> &[String] {
        &self.config.stylesheets
    }

    /// Returns the DOM id of a field.
    pub fn field_id(&self, field: &str) -> String {
        format!("{}_{field}", self.form_name)
    }

    /// Returns the submitted name of a field.
    pub fn field_name(&self, field: &str) -> String {
        format!("{}[{field}]", self.form_name)
    }

    /// Renders the complete form.
    ///
    /// `values` replaces the configured value source for this call only.
    /// Fails only in strict mode, on an unknown type tag.
    pub fn render(
        &self,
        result: Option<&OperationResult>,
        values: Option<&Values>,
    ) -> Result<String> {
        let scope = Scope {
            renderer: self,
            values: values.unwrap_or(&self.values),
        };
        let fields = self.fields.resolve(scope.values);

        debug!(
            form = %self.form_name,
            tabs = fields.is_tabs(),
            entries = fields.len(),
            "rendering form"
        );

        let mut body = self.host.csrf_field();
        body.push_str(&self.render_result_message(result));
        body.push_str(&match fields.as_ref() {
            FieldTree::Tabs(_) => scope.render_tabs(&self.config.tab_control, &fields, false)?,
            FieldTree::Fields(_) => scope.render_fields(&fields, true)?,
        });

        let attrs = WidgetAttrs::new()
            .with("action", &self.action)
            .with("method", "POST")
            .with("name", &self.form_name);
        Ok(format!("<form {}>{body}</form>", attrs.to_html()))
    }

    /// Renders the banner for an operation result; no result renders nothing.
    pub fn render_result_message(&self, result: Option<&OperationResult>) -> String {
        render_result_message(result, &self.message(MessageKey::SaveOk))
    }

    /// Renders the configured extra buttons.
    pub fn render_buttons(&self) -> String {
        self.buttons
            .iter()
            .map(|button| {
                let attrs = WidgetAttrs::new()
                    .with("type", "submit")
                    .with("id", &button.id)
                    .with("value", &button.title);
                format!("<input {}>", attrs.to_html())
            })
            .collect()
    }

    fn render_builtin_buttons(&self) -> String {
        if !self.show_buttons {
            return String::new();
        }
        let save = self.message(MessageKey::Save);
        let apply = self.message(MessageKey::Apply);
        let save_attrs = WidgetAttrs::new()
            .with("type", "submit")
            .with("name", "save")
            .with("value", &save)
            .with("title", &save)
            .with("class", "adm-btn-save");
        let apply_attrs = WidgetAttrs::new()
            .with("type", "submit")
            .with("name", "apply")
            .with("value", &apply)
            .with("title", &apply);
        format!(
            "<input {}><input {}>",
            save_attrs.to_html(),
            apply_attrs.to_html()
        )
    }

    fn message(&self, key: MessageKey) -> String {
        self.host.message(key).unwrap_or_else(|| {
            let messages = &self.config.messages;
            match key {
                MessageKey::SaveOk => messages.save_ok.clone(),
                MessageKey::LinkLabel => messages.link_label.clone(),
                MessageKey::Save => messages.save.clone(),
                MessageKey::Apply => messages.apply.clone(),
            }
        })
    }
}

/// One render call: the renderer plus the value source in effect.
pub(crate) struct Scope<'a> {
    renderer: &'a FormRenderer,
    values: &'a Values,
}

impl<'a> Scope<'a> {
    pub(crate) fn values(&self) -> &'a Values {
        self.values
    }

    pub(crate) fn config(&self) -> &'a RendererConfig {
        &self.renderer.config
    }

    pub(crate) fn host(&self) -> &'a dyn Host {
        self.renderer.host.as_ref()
    }

    pub(crate) fn message(&self, key: MessageKey) -> String {
        self.renderer.message(key)
    }

    pub(crate) fn field_id(&self, field: &str) -> String {
        self.renderer.field_id(field)
    }

    pub(crate) fn field_name(&self, field: &str) -> String {
        self.renderer.field_name(field)
    }

    /// Resolves the value of a field.
    ///
    /// A set entry wins even when it is `""` or `0`; only a missing entry
    /// falls back to the declared default, then to `""`.
    pub(crate) fn value<'s>(&'s self, field: &str, spec: &'s FieldSpec) -> Cow<'s, FieldValue> {
        if let Some(value) = self.values.get(field) {
            return Cow::Borrowed(value);
        }
        match spec.default.as_ref().filter(|d| !d.is_null()) {
            Some(default) => Cow::Borrowed(default),
            None => Cow::Owned(FieldValue::Text(String::new())),
        }
    }

    /// Merges attribute layers into markup, lowest precedence first: the
    /// computed id and name (omitted without a field), the declared
    /// attributes, then `extra`.
    pub(crate) fn field_attrs(
        &self,
        field: Option<&str>,
        declared: Option<&WidgetAttrs>,
        extra: &WidgetAttrs,
    ) -> String {
        let mut attrs = match field {
            Some(field) => WidgetAttrs::new()
                .with("id", self.field_id(field))
                .with("name", self.field_name(field)),
            None => WidgetAttrs::new().with("id", false).with("name", false),
        };
        if let Some(declared) = declared {
            attrs.merge(declared);
        }
        attrs.merge(extra);
        attrs.to_html()
    }

    /// Renders a tab list. Top-level tabs get the built-in buttons.
    pub(crate) fn render_tabs(&self, name: &str, tree: &FieldTree, nested: bool) -> Result<String> {
        let FieldTree::Tabs(tabs) = tree else {
            return self.render_fields(tree, true);
        };

        let mut handles = String::new();
        let mut bodies = String::new();

        for (index, (id, tab)) in tabs.iter().enumerate() {
            let active = index == 0;
            let tab_id = html_escape(id);
            let comment = widgets::comment(self, id, &tab.as_comment());
            let controls = tab.controls.resolve(self.values);

            if nested {
                handles.push_str(&format!(
                    r#"<span class="adm-detail-subtab{}" id="view_tab_{tab_id}">{}</span>"#,
                    if active { " adm-detail-subtab-active" } else { "" },
                    tab.tab,
                ));
                bodies.push_str(&format!(
                    r#"<div class="adm-detail-subtab-content" id="{tab_id}"{}>{comment}{}</div>"#,
                    if active { "" } else { r#" style="display: none;""# },
                    self.render_fields(&controls, true)?,
                ));
            } else {
                handles.push_str(&format!(
                    r#"<span class="adm-detail-tab{}" id="tab_cont_{tab_id}" data-tab="{tab_id}">{}</span>"#,
                    if active { " adm-detail-tab-active" } else { "" },
                    tab.tab,
                ));
                let title = tab
                    .title
                    .as_deref()
                    .map(|t| format!(r#"<div class="adm-detail-title">{t}</div>"#))
                    .unwrap_or_default();
                bodies.push_str(&format!(
                    r#"<div class="adm-detail-content" id="{tab_id}"{}>{title}<div class="adm-detail-content-item-block">{comment}<table class="adm-detail-content-table edit-table" id="{tab_id}_edit_table">{}</table></div></div>"#,
                    if active { "" } else { r#" style="display: none;""# },
                    self.render_fields(&controls, false)?,
                ));
            }
        }

        let control = html_escape(name);
        let buttons = self.renderer.render_buttons();

        if nested {
            return Ok(format!(
                r#"<div class="adm-detail-subtabs-block" id="{control}">{handles}</div><div class="adm-detail-subtabs-content">{bodies}</div>{buttons}"#
            ));
        }

        Ok(format!(
            r#"<div class="adm-detail-block" id="{control}_layout"><div class="adm-detail-tabs-block" id="{control}_tabs">{handles}</div><div class="adm-detail-content-wrap">{bodies}<div class="adm-detail-content-btns-wrap" id="{control}_buttons_div"><div class="adm-detail-content-btns">{}{buttons}</div></div></div></div>"#,
            self.renderer.render_builtin_buttons(),
        ))
    }

    /// Renders a field table. Hidden fields come first, ahead of the table,
    /// in declaration order.
    pub(crate) fn render_fields(&self, tree: &FieldTree, wrapper: bool) -> Result<String> {
        let FieldTree::Fields(fields) = tree else {
            return self.render_tabs(&self.renderer.form_name, tree, true);
        };

        let mut hidden = String::new();
        let mut rows = String::new();

        for (name, spec) in fields {
            if spec.field_type.is(FieldKind::Hidden) {
                hidden.push_str(&widgets::hidden(self, name, spec));
            } else {
                rows.push_str(&self.render_row(name, spec)?);
            }
        }

        if wrapper {
            Ok(format!("{hidden}{TABLE_OPEN}{rows}</table>"))
        } else {
            Ok(format!("{hidden}{rows}"))
        }
    }

    fn render_row(&self, name: &str, spec: &FieldSpec) -> Result<String> {
        let kind = spec.field_type.kind();
        let cell_class = if kind == Some(FieldKind::Header) {
            "heading"
        } else {
            "adm-detail-content-cell-r"
        };
        let show_caption = spec.show_caption && !kind.is_some_and(FieldKind::is_captionless);

        let mut row = format!(r#"<tr class="{cell_class}">"#);

        if show_caption {
            let title = spec.title_text();
            let required = !title.is_empty() && self.renderer.validators.is_required(name);
            row.push_str(&format!(
                r#"<td width="40%" class="adm-detail-content-cell-l">{}{}{title}{}</td>"#,
                widgets::help(self, name, spec),
                if required { REQUIRED_MARKER } else { "" },
                if title.is_empty() { "" } else { ":" },
            ));
        }

        row.push_str(&format!(
            r#"<td{} class="{cell_class}">{}</td></tr>"#,
            if show_caption { "" } else { r#" colspan="2""# },
            self.render_field(name, spec)?,
        ));

        Ok(row)
    }

    /// Renders the control of one field followed by its comment.
    ///
    /// Unknown type tags render as text inputs unless the renderer is strict.
    pub(crate) fn render_field(&self, name: &str, spec: &FieldSpec) -> Result<String> {
        trace!(field = name, field_type = ?spec.field_type, "rendering field");

        let mut html = match &spec.field_type {
            FieldType::Custom(render) => render(name, spec),
            FieldType::Kind(kind) => self.render_kind(*kind, name, spec)?,
            FieldType::Unknown(tag) => {
                if self.config().strict {
                    return Err(PanelError::UnknownFieldType {
                        field: name.to_string(),
                        tag: tag.clone(),
                    });
                }
                warn!(field = name, tag = %tag, "unknown field type, rendering as input");
                widgets::input(self, name, spec)
            }
        };

        if let Some(comment) = spec.comment.as_deref().filter(|c| !c.is_empty()) {
            html.push_str(&format!("<br><small>{comment}</small>"));
        }

        Ok(html)
    }

    fn render_kind(&self, kind: FieldKind, name: &str, spec: &FieldSpec) -> Result<String> {
        Ok(match kind {
            FieldKind::Tabs => self.render_nested_tabs(name, spec)?,
            FieldKind::ControlGroup => self.render_group(name, spec)?,
            FieldKind::Header => widgets::header(spec),
            FieldKind::Comment => widgets::comment(self, name, spec),
            FieldKind::Note => widgets::note(self, name, spec),
            FieldKind::Input => widgets::input(self, name, spec),
            FieldKind::Hidden => widgets::hidden(self, name, spec),
            FieldKind::Checkbox => widgets::checkbox(self, name, spec),
            FieldKind::Select => widgets::select(self, name, spec),
            FieldKind::Help => widgets::help(self, name, spec),
            FieldKind::Date => widgets::date(self, name, spec),
            FieldKind::Button => widgets::button(self, name, spec),
            FieldKind::Link => widgets::link(self, name, spec),
        })
    }

    fn render_nested_tabs(&self, name: &str, spec: &FieldSpec) -> Result<String> {
        match &spec.items {
            Some(items) => self.render_tabs(name, &items.resolve(self.values), true),
            None => Ok(String::new()),
        }
    }

    /// Renders the sub-fields of a group joined by its separator. Group
    /// attributes sit under each sub-field's own attributes.
    fn render_group(&self, name: &str, spec: &FieldSpec) -> Result<String> {
        let Some(items) = &spec.items else {
            return Ok(String::new());
        };
        let items = items.resolve(self.values);
        let FieldTree::Fields(fields) = items.as_ref() else {
            if self.config().strict {
                return Err(PanelError::invalid_field(
                    name,
                    "control group items must be fields, not tabs",
                ));
            }
            warn!(field = name, "control group items are tabs, skipping");
            return Ok(String::new());
        };

        let parts = fields
            .iter()
            .map(|(sub_name, sub)| {
                let mut sub = sub.clone();
                sub.attrs = spec.attrs.clone().merged(&sub.attrs);
                self.render_field(sub_name, &sub)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(parts.join(&spec.split))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer(fields: FieldTree) -> FormRenderer {
        FormRenderer::new("f", "/save", fields)
    }

    #[test]
    fn test_field_naming() {
        let r = renderer(FieldTree::new());
        assert_eq!(r.field_id("NAME"), "f_NAME");
        assert_eq!(r.field_name("NAME"), "f[NAME]");
    }

    #[test]
    fn test_attr_layers() {
        let r = renderer(FieldTree::new());
        let values = Values::new();
        let scope = Scope {
            renderer: &r,
            values: &values,
        };
        let declared = WidgetAttrs::new().with("class", "wide").with("id", "custom");
        let extra = WidgetAttrs::new().with("type", "text").with("class", "narrow");

        assert_eq!(
            scope.field_attrs(Some("a"), Some(&declared), &extra),
            r#"id="custom" name="f[a]" class="narrow" type="text""#
        );
        assert_eq!(
            scope.field_attrs(None, None, &WidgetAttrs::new().with("value", "x")),
            r#"value="x""#
        );
    }

    #[test]
    fn test_value_precedence() {
        let r = renderer(FieldTree::new());
        let values = Values::new()
            .with("empty", "")
            .with("zero", 0)
            .with("unset", FieldValue::Null);
        let scope = Scope {
            renderer: &r,
            values: &values,
        };
        let spec = FieldSpec::input("X").default_value("fallback");

        assert_eq!(scope.value("empty", &spec).as_text(), "");
        assert_eq!(scope.value("zero", &spec).as_text(), "0");
        assert_eq!(scope.value("unset", &spec).as_text(), "fallback");
        assert_eq!(scope.value("missing", &spec).as_text(), "fallback");
        assert_eq!(scope.value("missing", &FieldSpec::input("X")).as_text(), "");
    }

    #[test]
    fn test_builtin_buttons_gated() {
        let r = renderer(FieldTree::new());
        assert_eq!(r.render_builtin_buttons(), "");

        let r = renderer(FieldTree::new()).show_buttons(true);
        let html = r.render_builtin_buttons();
        assert!(html.contains(r#"name="save""#));
        assert!(html.contains(r#"name="apply""#));
    }

    #[test]
    fn test_form_tag() {
        let html = FormRenderer::new("f", "/save?a=1&b=2", FieldTree::new())
            .render(None, None)
            .unwrap();
        assert!(html.starts_with(r#"<form action="/save?a=1&amp;b=2" method="POST" name="f"><table"#));
        assert!(html.ends_with("</table></form>"));
    }

    #[test]
    fn test_render_buttons() {
        let r = renderer(FieldTree::new()).button("export", "Export \"all\"");
        assert_eq!(
            r.render_buttons(),
            r#"<input type="submit" id="export" value="Export &quot;all&quot;">"#
        );
    }
}
