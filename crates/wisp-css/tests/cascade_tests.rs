//! Integration tests for stylesheets and the cascade.

use wisp_css::{
    ColorValue, Declaration, DisplayMode, RuleSheet, StyleAttributeSheet, Stylesheet, cascade,
    CascadedStyle,
};
use wisp_dom::{DomTree, ElementData, NodeId};

fn sample_tree() -> (DomTree, NodeId, NodeId) {
    let mut tree = DomTree::new();
    let div = tree.append_element(
        tree.root(),
        ElementData::new("div")
            .with_attr("class", "note")
            .with_attr("style", "color: green"),
    );
    let p = tree.append_element(div, ElementData::new("p").with_attr("id", "intro"));
    (tree, div, p)
}

#[test]
fn test_rules_sorted_by_specificity() {
    let (tree, _, p) = sample_tree();
    let sheet = RuleSheet::new()
        .rule("#intro", &[("color", "red")])
        .rule("p", &[("color", "blue")])
        .rule("*", &[("color", "white")]);

    let declarations = sheet.matching_declarations(&tree, p);
    let values: Vec<&str> = declarations.iter().map(|d| d.value.as_str()).collect();
    assert_eq!(values, vec!["white", "blue", "red"]);
}

#[test]
fn test_equal_specificity_keeps_source_order() {
    let (tree, div, _) = sample_tree();
    let sheet = RuleSheet::new()
        .rule(".note", &[("width", "1px")])
        .rule("div.note", &[("width", "3px")])
        .rule(".note", &[("width", "2px")]);
    let style = CascadedStyle::new(sheet.matching_declarations(&tree, div));
    assert_eq!(style.get("width"), Some("3px"));
}

#[test]
fn test_invalid_selector_rule_is_skipped() {
    let sheet = RuleSheet::new()
        .rule("div > p", &[("color", "red")])
        .rule("p", &[("color", "blue")]);
    assert_eq!(sheet.rules.len(), 1);
}

#[test]
fn test_later_stylesheets_win() {
    let (tree, div, _) = sample_tree();
    let sheets: Vec<Box<dyn Stylesheet>> = vec![
        Box::new(RuleSheet::new().rule("div", &[("color", "red"), ("display", "inline")])),
        Box::new(StyleAttributeSheet),
    ];
    let style = cascade(&sheets, &tree, div, &CascadedStyle::default());
    assert_eq!(style.get("color"), Some("green"));

    let box_style = style.box_style();
    assert_eq!(box_style.color, Some(ColorValue::rgb(0, 128, 0)));
    assert_eq!(box_style.display, Some(DisplayMode::InlineBlock));
}

#[test]
fn test_only_color_is_inherited() {
    let (tree, div, p) = sample_tree();
    let sheets: Vec<Box<dyn Stylesheet>> = vec![
        Box::new(RuleSheet::new().rule("div", &[("margin", "5px")])),
        Box::new(StyleAttributeSheet),
    ];
    let parent = cascade(&sheets, &tree, div, &CascadedStyle::default());
    let child = cascade(&sheets, &tree, p, &parent);

    assert_eq!(child.get("color"), Some("green"));
    assert_eq!(child.get("margin"), None);
    assert_eq!(child.declarations(), &[Declaration::new("color", "green")]);
}

#[test]
fn test_own_declaration_shadows_inherited() {
    let (tree, div, p) = sample_tree();
    let sheets: Vec<Box<dyn Stylesheet>> = vec![
        Box::new(StyleAttributeSheet),
        Box::new(RuleSheet::new().rule("p", &[("color", "#00f")])),
    ];
    let parent = cascade(&sheets, &tree, div, &CascadedStyle::default());
    let child = cascade(&sheets, &tree, p, &parent);
    assert_eq!(child.box_style().color, Some(ColorValue::BLUE));
}

#[test]
fn test_rule_sheet_from_json() {
    let sheet: RuleSheet = serde_json::from_str(
        r#"{ "rules": [
            { "selectors": "p, .note", "declarations": [["Margin", "0 auto"], ["width", "50%"]] }
        ] }"#,
    )
    .unwrap();
    let (tree, div, p) = sample_tree();
    assert_eq!(sheet.matching_declarations(&tree, div).len(), 2);
    assert_eq!(
        sheet.matching_declarations(&tree, p)[0],
        Declaration::new("margin", "0 auto")
    );

    let bad = serde_json::from_str::<RuleSheet>(
        r#"{ "rules": [{ "selectors": "a:hover", "declarations": [] }] }"#,
    );
    assert!(bad.is_err());
}

#[test]
fn test_text_nodes_match_nothing() {
    let mut tree = DomTree::new();
    let text = tree.append_text(tree.root(), "hi");
    let sheet = RuleSheet::new().rule("*", &[("color", "red")]);
    assert!(sheet.matching_declarations(&tree, text).is_empty());
    assert!(StyleAttributeSheet.matching_declarations(&tree, text).is_empty());
}
