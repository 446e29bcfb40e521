#![allow(dead_code)]

use oxide_panel::{FieldTree, FormRenderer, OperationResult, Values};

pub const FORM: &str = "f";

pub fn renderer(fields: FieldTree) -> FormRenderer {
    FormRenderer::new(FORM, "/admin/save.php", fields)
}

pub fn render(fields: FieldTree) -> String {
    render_values(fields, Values::new())
}

pub fn render_values(fields: FieldTree, values: Values) -> String {
    renderer(fields)
        .values(values)
        .render(None, None)
        .unwrap_or_else(|e| panic!("Failed to render: {e}"))
}

pub fn render_result(fields: FieldTree, result: &OperationResult) -> String {
    renderer(fields)
        .render(Some(result), None)
        .unwrap_or_else(|e| panic!("Failed to render: {e}"))
}

/// Byte offset of `needle` in `html`, panicking when absent.
pub fn position(html: &str, needle: &str) -> usize {
    html.find(needle)
        .unwrap_or_else(|| panic!("Expected `{needle}` in:\n{html}"))
}

pub fn assert_contains(html: &str, needle: &str) {
    assert!(html.contains(needle), "Expected `{needle}` in:\n{html}");
}

pub fn assert_not_contains(html: &str, needle: &str) {
    assert!(!html.contains(needle), "Unexpected `{needle}` in:\n{html}");
}
