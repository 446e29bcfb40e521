//! Read-only and decorative widgets.

use crate::fields::FieldSpec;
use crate::host::MessageKey;
use crate::renderer::Scope;

use super::{html_escape, WidgetAttrs};

pub(crate) fn header(spec: &FieldSpec) -> String {
    spec.title_text().to_string()
}

/// Info block with the help text; nothing without help.
pub(crate) fn comment(scope: &Scope<'_>, name: &str, spec: &FieldSpec) -> String {
    spec.help_text()
        .map(|help| {
            format!(
                r#"<div id="{}" class="adm-info-message" style="width: 100%; box-sizing: border-box;">{help}</div>"#,
                html_escape(&scope.field_id(name))
            )
        })
        .unwrap_or_default()
}

pub(crate) fn note(scope: &Scope<'_>, name: &str, spec: &FieldSpec) -> String {
    format!(
        r#"<span id="{}">{}</span>"#,
        html_escape(&scope.field_id(name)),
        html_escape(&scope.value(name, spec).as_text())
    )
}

/// Hint icon carrying the help text as its tooltip.
pub(crate) fn help(scope: &Scope<'_>, _name: &str, spec: &FieldSpec) -> String {
    spec.help_text()
        .map(|help| {
            let attrs = WidgetAttrs::new()
                .with("src", &scope.config().hint_icon)
                .with("title", help)
                .with("style", "margin: 0 5px");
            format!("<img {}>", attrs.to_html())
        })
        .unwrap_or_default()
}

/// Anchor opening the value in a new window. A blank value or `0` renders
/// the empty placeholder.
pub(crate) fn link(scope: &Scope<'_>, name: &str, spec: &FieldSpec) -> String {
    let value = scope.value(name, spec);
    if value.is_blank() || value.as_text() == "0" {
        return html_escape(&scope.config().messages.empty);
    }

    let extra = WidgetAttrs::new()
        .with("href", value.as_text().into_owned())
        .with("target", "_blank");
    let caption = spec
        .caption
        .clone()
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| scope.message(MessageKey::LinkLabel));

    format!(
        "<a {}>{caption}</a>",
        scope.field_attrs(None, Some(&spec.attrs), &extra)
    )
}
