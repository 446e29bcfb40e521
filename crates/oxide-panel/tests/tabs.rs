//! Tests for tabbed layouts.

mod common;
use common::*;

use oxide_panel::{FieldSpec, FieldTree, Resolvable, TabSpec, Values};

fn two_tabs() -> FieldTree {
    FieldTree::new()
        .tab(
            "main",
            TabSpec::new("Main").title("General settings").controls(
                FieldTree::new()
                    .field("NAME", FieldSpec::input("Name"))
                    .field("ID", FieldSpec::hidden()),
            ),
        )
        .tab(
            "seo",
            TabSpec::new("SEO")
                .help("Search engine settings")
                .controls(FieldTree::new().field("KEYWORDS", FieldSpec::input("Keywords"))),
        )
}

#[test]
fn test_tab_handles_in_order() {
    let html = render(two_tabs());

    assert_contains(
        &html,
        r#"<span class="adm-detail-tab adm-detail-tab-active" id="tab_cont_main" data-tab="main">Main</span>"#,
    );
    assert_contains(
        &html,
        r#"<span class="adm-detail-tab" id="tab_cont_seo" data-tab="seo">SEO</span>"#,
    );
    assert!(position(&html, "tab_cont_main") < position(&html, "tab_cont_seo"));
}

#[test]
fn test_only_first_tab_is_visible() {
    let html = render(two_tabs());
    assert_contains(&html, r#"<div class="adm-detail-content" id="main">"#);
    assert_contains(
        &html,
        r#"<div class="adm-detail-content" id="seo" style="display: none;">"#,
    );
}

#[test]
fn test_tab_body_uses_chrome_table() {
    let html = render(two_tabs());

    assert_contains(&html, r#"<div class="adm-detail-title">General settings</div>"#);
    assert_contains(
        &html,
        r#"<table class="adm-detail-content-table edit-table" id="main_edit_table"><input id="f_ID""#,
    );
    assert_not_contains(&html, r#"<table width="100%""#);
}

#[test]
fn test_tab_help_renders_comment_block() {
    let html = render(two_tabs());
    assert_contains(
        &html,
        r#"<div id="f_seo" class="adm-info-message" style="width: 100%; box-sizing: border-box;">Search engine settings</div>"#,
    );
    assert_not_contains(&html, r#"id="f_main""#);
}

#[test]
fn test_builtin_buttons_are_gated() {
    let html = render(two_tabs());
    assert_not_contains(&html, r#"name="save""#);

    let html = renderer(two_tabs()).show_buttons(true).render(None, None).unwrap();
    let save = position(&html, r#"name="save""#);
    let apply = position(&html, r#"name="apply""#);
    assert!(save < apply);
    assert!(position(&html, r#"id="tabControl_buttons_div""#) < save);
}

#[test]
fn test_configured_buttons_follow_builtin() {
    let html = renderer(two_tabs())
        .show_buttons(true)
        .button("export", "Export")
        .render(None, None)
        .unwrap();

    assert!(position(&html, r#"name="apply""#) < position(&html, r#"id="export""#));
    assert_contains(&html, r#"<input type="submit" id="export" value="Export">"#);
}

#[test]
fn test_tab_control_name_from_config() {
    let config = oxide_panel::RendererConfig {
        tab_control: "productTabs".to_string(),
        ..Default::default()
    };
    let html = renderer(two_tabs()).config(config).render(None, None).unwrap();
    assert_contains(&html, r#"id="productTabs_layout""#);
    assert_contains(&html, r#"id="productTabs_tabs""#);
}

#[test]
fn test_nested_tabs() {
    let languages = FieldTree::new()
        .tab(
            "en",
            TabSpec::new("English")
                .controls(FieldTree::new().field("TITLE_EN", FieldSpec::input("Title"))),
        )
        .tab(
            "de",
            TabSpec::new("Deutsch")
                .controls(FieldTree::new().field("TITLE_DE", FieldSpec::input("Titel"))),
        );
    let fields = FieldTree::new().field("LANG", FieldSpec::tagged("tabs").items(languages));
    let html = renderer(fields)
        .show_buttons(true)
        .render(None, None)
        .unwrap();

    assert_contains(
        &html,
        r#"<td colspan="2" class="adm-detail-content-cell-r"><div class="adm-detail-subtabs-block" id="LANG">"#,
    );
    assert_contains(
        &html,
        r#"<span class="adm-detail-subtab adm-detail-subtab-active" id="view_tab_en">English</span>"#,
    );
    assert_contains(
        &html,
        r#"<div class="adm-detail-subtab-content" id="de" style="display: none;"><table width="100%""#,
    );
    assert!(position(&html, "TITLE_EN") < position(&html, "TITLE_DE"));
    assert_not_contains(&html, r#"name="save""#);
}

#[test]
fn test_computed_tab_controls() {
    let controls = Resolvable::computed(|values: &Values| {
        let mut tree = FieldTree::new().field("TYPE", FieldSpec::input("Type"));
        if values.get("TYPE").is_some_and(|t| t.as_text() == "book") {
            tree = tree.field("ISBN", FieldSpec::input("ISBN"));
        }
        tree
    });
    let fields = FieldTree::new().tab("main", TabSpec::new("Main").controls(controls));

    let html = render_values(fields.clone(), Values::new().with("TYPE", "book"));
    assert_contains(&html, r#"id="f_ISBN""#);

    let html = render_values(fields, Values::new().with("TYPE", "lamp"));
    assert_not_contains(&html, "ISBN");
}

#[test]
fn test_computed_top_level_tree() {
    let fields = Resolvable::computed(|values: &Values| {
        values
            .iter()
            .fold(FieldTree::new(), |tree, (name, _)| {
                tree.field(name, FieldSpec::input(name))
            })
    });
    let html = oxide_panel::FormRenderer::new(FORM, "/save", fields)
        .render(None, Some(&Values::new().with("B", 1).with("A", 2)))
        .unwrap();

    assert!(position(&html, r#"id="f_B""#) < position(&html, r#"id="f_A""#));
}
