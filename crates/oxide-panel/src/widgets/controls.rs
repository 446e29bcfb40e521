//! Input controls.

use std::borrow::Cow;

use crate::fields::{FieldSpec, SelectOption};
use crate::host::DatePicker;
use crate::renderer::Scope;
use crate::value::FieldValue;

use super::{html_escape, WidgetAttrs};

const CHECKED_DEFAULT: &str = "1";
const UNCHECKED_DEFAULT: &str = "0";

/// Text input, or a textarea for multiline fields.
pub(crate) fn input(scope: &Scope<'_>, name: &str, spec: &FieldSpec) -> String {
    let value = scope.value(name, spec);

    if spec.multiline {
        let attrs = scope.field_attrs(Some(name), Some(&spec.attrs), &WidgetAttrs::new());
        return format!(
            "<textarea {attrs}>{}</textarea>",
            html_escape(&value.as_text())
        );
    }

    let extra = WidgetAttrs::new()
        .with("value", value.as_text().into_owned())
        .with("type", "text");
    format!(
        "<input {}>{}",
        scope.field_attrs(Some(name), Some(&spec.attrs), &extra),
        spec.prefix.as_deref().unwrap_or_default()
    )
}

pub(crate) fn hidden(scope: &Scope<'_>, name: &str, spec: &FieldSpec) -> String {
    let extra = WidgetAttrs::new()
        .with("value", scope.value(name, spec).as_text().into_owned())
        .with("type", "hidden");
    format!(
        "<input {}>",
        scope.field_attrs(Some(name), Some(&spec.attrs), &extra)
    )
}

fn sentinel<'a>(value: Option<&'a FieldValue>, fallback: &'static str) -> Cow<'a, str> {
    value
        .filter(|v| !v.is_blank())
        .map_or(Cow::Borrowed(fallback), FieldValue::as_text)
}

/// Checkbox preceded by a hidden input, so an unchecked box still submits
/// its unchecked value under the same name.
pub(crate) fn checkbox(scope: &Scope<'_>, name: &str, spec: &FieldSpec) -> String {
    let checked_value = sentinel(spec.check_value.as_ref(), CHECKED_DEFAULT);
    let unchecked_value = sentinel(spec.uncheck_value.as_ref(), UNCHECKED_DEFAULT);
    let checked = scope.value(name, spec).as_text() == checked_value;

    let fallback = WidgetAttrs::new()
        .with("type", "hidden")
        .with("value", unchecked_value.into_owned())
        .with("id", false);
    let control = WidgetAttrs::new()
        .with("type", "checkbox")
        .with("checked", checked)
        .with("value", checked_value.into_owned());

    format!(
        "<input {}><input {}>",
        scope.field_attrs(Some(name), Some(&spec.attrs), &fallback),
        scope.field_attrs(Some(name), Some(&spec.attrs), &control)
    )
}

/// Select with options from the declared source, led by the optional empty
/// option.
pub(crate) fn select(scope: &Scope<'_>, name: &str, spec: &FieldSpec) -> String {
    let value = scope.value(name, spec);

    let mut options: Vec<SelectOption> = Vec::new();
    if let Some(label) = &spec.null_option {
        options.push(SelectOption::new("", label));
    }
    if let Some(source) = &spec.options {
        options.extend(source.resolve(scope.values()).iter().cloned());
    }

    let options: String = options
        .iter()
        .map(|option| {
            let attrs = WidgetAttrs::new()
                .with("value", &option.value)
                .with("selected", value.contains(&option.value));
            format!(
                "<option {}>{}</option>",
                scope.field_attrs(None, None, &attrs),
                html_escape(&option.title)
            )
        })
        .collect();

    let field_name = if spec.multiple {
        format!("{}[]", scope.field_name(name))
    } else {
        scope.field_name(name)
    };
    let extra = WidgetAttrs::new()
        .with("multiple", spec.multiple)
        .with("name", field_name);

    format!(
        "<select {}>{options}</select>",
        scope.field_attrs(Some(name), Some(&spec.attrs), &extra)
    )
}

/// Host date picker; a disabled date renders as a plain input.
pub(crate) fn date(scope: &Scope<'_>, name: &str, spec: &FieldSpec) -> String {
    if spec.attrs.is_set("disabled") {
        return input(scope, name, spec);
    }

    let input_name = scope.field_name(name);
    let value = scope.value(name, spec);
    let value = value.as_text();

    scope.host().date_picker(&DatePicker {
        input_name: &input_name,
        value: &value,
        show_time: spec.show_time,
        hide_timebar: spec.hide_timebar,
    })
}

pub(crate) fn button(scope: &Scope<'_>, name: &str, spec: &FieldSpec) -> String {
    let title = spec.title_text();
    let extra = WidgetAttrs::new()
        .with("type", "button")
        .with("value", title)
        .with("title", title);
    format!(
        "<input {}>",
        scope.field_attrs(Some(name), Some(&spec.attrs), &extra)
    )
}
