//! Tests for DOM construction, text content, and JSON fixtures.

use wisp_dom::{DomTree, ElementData, NodeFixture, NodeId, NodeType};

#[test]
fn test_new_tree_has_document_root() {
    let tree = DomTree::new();
    assert_eq!(tree.len(), 1);
    assert!(matches!(
        tree.get(tree.root()).map(|n| &n.node_type),
        Some(NodeType::Document)
    ));
}

#[test]
fn test_append_element_links_parent() {
    let mut tree = DomTree::new();
    let div = tree.append_element(NodeId::ROOT, ElementData::new("DIV"));
    let text = tree.append_text(div, "hi");

    assert_eq!(tree.children(NodeId::ROOT), &[div]);
    assert_eq!(tree.parent(text), Some(div));
    assert_eq!(tree.as_element(div).map(|e| e.tag_name.as_str()), Some("div"));
    assert_eq!(tree.as_text(text), Some("hi"));
}

#[test]
fn test_element_classes_and_attrs() {
    let data = ElementData::new("p")
        .with_attr("class", "note  wide")
        .with_attr("id", "intro");
    assert_eq!(data.classes().collect::<Vec<_>>(), vec!["note", "wide"]);
    assert_eq!(data.id(), Some("intro"));
    assert!(data.is("P"));
}

#[test]
fn test_text_content_collapses_and_decodes() {
    let mut tree = DomTree::new();
    let button = tree.append_element(NodeId::ROOT, ElementData::new("button"));
    let _ = tree.append_text(button, "  Save\n ");
    let b = tree.append_element(button, ElementData::new("b"));
    let _ = tree.append_text(b, "&amp; quit ");
    let comment = tree.alloc(NodeType::Comment("skip me".to_string()));
    tree.append_child(button, comment);

    assert_eq!(tree.text_content(button), "Save & quit");
}

#[test]
fn test_fixture_builds_nested_tree() {
    let json = r#"[
        { "tag": "body", "children": [
            "Hello",
            { "comment": "note" },
            { "tag": "A", "attrs": { "href": "/x" }, "children": ["link"] }
        ] }
    ]"#;
    let nodes: Vec<NodeFixture> = serde_json::from_str(json).unwrap();
    let tree = DomTree::from_fixture(&nodes);

    let body = tree.children(NodeId::ROOT)[0];
    let kids = tree.children(body);
    assert_eq!(kids.len(), 3);
    assert_eq!(tree.as_text(kids[0]), Some("Hello"));
    assert!(matches!(
        tree.get(kids[1]).map(|n| &n.node_type),
        Some(NodeType::Comment(_))
    ));
    let anchor = tree.as_element(kids[2]).unwrap();
    assert_eq!(anchor.tag_name, "a");
    assert_eq!(anchor.attr("href"), Some("/x"));
}
