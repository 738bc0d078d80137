//! Warning deduplication across generation passes.
//!
//! Kept in its own test binary: the warning set is process-wide, and other
//! tests resetting generators in parallel would race with these assertions.

use wisp_browser::Generator;
use wisp_common::warning::warn_once;
use wisp_css::{ApproximateFontMetrics, LayoutConfig, NoImages, Rect};
use wisp_dom::{DomTree, ElementData};

const MESSAGE: &str = "unsupported tag <marquee>";

#[test]
fn test_each_pass_reports_its_warnings_again() {
    let mut tree = DomTree::new();
    let marquee = tree.append_element(tree.root(), ElementData::new("marquee"));
    let _ = tree.append_text(marquee, "scrolling");

    let mut generator = Generator::new(Vec::new(), Rect::new(0, 0, 320, 240), LayoutConfig::default());
    let _ = generator
        .generate_layout(&tree, &ApproximateFontMetrics, &NoImages)
        .unwrap();
    assert!(!warn_once("Generator", MESSAGE), "first pass reported the tag");

    generator.reset();
    assert!(warn_once("Generator", MESSAGE), "reset forgets reported warnings");

    let _ = generator
        .generate_layout(&tree, &ApproximateFontMetrics, &NoImages)
        .unwrap();
    assert!(!warn_once("Generator", MESSAGE), "second pass reported the tag again");
}
