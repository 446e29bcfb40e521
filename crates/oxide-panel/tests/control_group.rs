//! Tests for control groups.

mod common;
use common::*;

use oxide_panel::{FieldSpec, FieldTree, Resolvable, SelectOptions, Values};

fn range() -> FieldTree {
    FieldTree::new()
        .field("FROM", FieldSpec::input("From").attr("disabled", false))
        .field("TO", FieldSpec::input("To"))
}

#[test]
fn test_item_attrs_override_group_attrs() {
    let html = render(FieldTree::new().field(
        "PRICE",
        FieldSpec::group("Price", range())
            .attr("disabled", true)
            .split(" - "),
    ));

    assert_contains(
        &html,
        r#"<input id="f_FROM" name="f[FROM]" value="" type="text"> - <input id="f_TO" name="f[TO]" disabled="disabled" value="" type="text"></td>"#,
    );
}

#[test]
fn test_no_trailing_separator() {
    let html = render(FieldTree::new().field(
        "PRICE",
        FieldSpec::group("Price", range()).split("|"),
    ));
    assert_eq!(html.matches('|').count(), 1);
    assert_not_contains(&html, "|</td>");
}

#[test]
fn test_group_has_caption() {
    let html = render(FieldTree::new().field("PRICE", FieldSpec::group("Price", range())));
    assert_contains(
        &html,
        r#"<td width="40%" class="adm-detail-content-cell-l">Price:</td>"#,
    );
}

#[test]
fn test_sub_fields_read_their_own_values() {
    let html = render_values(
        FieldTree::new().field("PRICE", FieldSpec::group("Price", range())),
        Values::new().with("FROM", 10).with("TO", 20),
    );
    assert_contains(&html, r#"name="f[FROM]" value="10""#);
    assert_contains(&html, r#"name="f[TO]" value="20""#);
}

#[test]
fn test_sub_field_comments() {
    let items = FieldTree::new()
        .field("W", FieldSpec::input("W").comment("mm"))
        .field("H", FieldSpec::input("H").comment("mm"));
    let html = render(FieldTree::new().field("SIZE", FieldSpec::group("Size", items).split(" x ")));
    assert_contains(&html, r#"type="text"><br><small>mm</small> x <input"#);
}

#[test]
fn test_mixed_controls() {
    let items = FieldTree::new()
        .field("UNIT", FieldSpec::select("Unit", SelectOptions::new().option("kg", "kg").option("g", "g")))
        .field("EXACT", FieldSpec::checkbox("Exact"));
    let html = render_values(
        FieldTree::new().field("WEIGHT", FieldSpec::group("Weight", items)),
        Values::new().with("UNIT", "g").with("EXACT", "1"),
    );
    assert_contains(&html, r#"<option value="g" selected="selected">g</option></select><input name="f[EXACT]""#);
    assert_contains(&html, r#"type="checkbox" checked="checked" value="1">"#);
}

#[test]
fn test_computed_items() {
    let items = Resolvable::computed(|values: &Values| {
        let count = values
            .get("SLOTS")
            .and_then(|v| v.as_text().parse::<usize>().ok())
            .unwrap_or(1);
        (0..count).fold(FieldTree::new(), |tree, i| {
            tree.field(format!("SLOT_{i}"), FieldSpec::hidden())
        })
    });
    let html = render_values(
        FieldTree::new().field("SLOTS", FieldSpec::new(oxide_panel::FieldKind::ControlGroup).items(items)),
        Values::new().with("SLOTS", 3),
    );

    assert_contains(&html, r#"id="f_SLOT_0""#);
    assert_contains(&html, r#"id="f_SLOT_2""#);
    assert_not_contains(&html, r#"id="f_SLOT_3""#);
}

#[test]
fn test_group_without_items_is_empty() {
    let html = render(FieldTree::new().field(
        "EMPTY",
        FieldSpec::new(oxide_panel::FieldKind::ControlGroup).title("Empty"),
    ));
    assert_contains(
        &html,
        r#"<td class="adm-detail-content-cell-r"></td>"#,
    );
}
