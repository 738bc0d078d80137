//! Box Layout Engine
//!
//! Turns a DOM tree plus stylesheets into a tree of positioned, sized
//! [`LayoutBox`]es.
//!
//! # Relevant Specifications
//!
//! - [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//! - [CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html)
//! - [CSS 2.1 Tables](https://www.w3.org/TR/CSS2/tables.html)
//!
//! # Module Structure
//!
//! - [`box_model`] - Rectangles, edge sizes, and box dimensions
//! - [`values`] - Resolution of declared lengths to layout units
//! - [`inline`] - Text measurement and greedy line breaking
//! - [`intrinsic`] - Natural sizes of text, images, and form controls
//! - [`layout_box`] - Layout boxes, block and inline layout
//! - [`table`] - Two-pass table layout

pub mod box_model;
pub mod inline;
pub mod intrinsic;
pub mod layout_box;
pub mod table;
pub mod values;

// Re-exports for convenience
pub use box_model::{Dimensions, EdgeSizes, Point, Rect, Size};
pub use inline::{ApproximateFontMetrics, TextMeasurer, break_text};
pub use intrinsic::{
    ImageSizes, ImageTable, InputType, NoImages, SelectOption, select_min_width, select_options,
};
pub use layout_box::{BoxNode, LayoutBox, LayoutContext, layout_document};
pub use values::AutoOr;

use wisp_dom::{DomTree, NodeId, NodeType};

use crate::style::DisplayMode;

// [HTML Living Standard § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html)
// defines the default CSS styles for HTML elements.

/// [§ 15.3.1 Hidden elements](https://html.spec.whatwg.org/multipage/rendering.html#hidden-elements)
const HIDDEN_ELEMENTS: &[&str] = &[
    "head", "script", "style", "title", "meta", "link", "option", "optgroup",
];

/// Phrasing content and form controls that flow inside line boxes.
const INLINE_ELEMENTS: &[&str] = &[
    "span", "a", "b", "i", "u", "em", "strong", "img", "input", "button", "select", "label",
    "font", "code", "small",
];

/// The display mode of `node` when no stylesheet sets one.
///
/// Documents and unknown elements are blocks, text is inline, comments and
/// hidden elements generate no box. A node that does not exist is
/// [`DisplayMode::Undefined`].
#[must_use]
pub fn default_display_for_node(tree: &DomTree, node: NodeId) -> DisplayMode {
    let Some(node) = tree.get(node) else {
        return DisplayMode::Undefined;
    };
    match &node.node_type {
        NodeType::Document => DisplayMode::Block,
        NodeType::Text(_) => DisplayMode::InlineBlock,
        NodeType::Comment(_) => DisplayMode::None,
        NodeType::Element(data) => {
            let tag = data.tag_name.as_str();
            if HIDDEN_ELEMENTS.contains(&tag)
                || (tag == "input" && InputType::of(data) == Some(InputType::Hidden))
            {
                DisplayMode::None
            } else if tag == "table" {
                DisplayMode::Table
            } else if INLINE_ELEMENTS.contains(&tag) {
                DisplayMode::InlineBlock
            } else {
                DisplayMode::Block
            }
        }
    }
}

/// The display mode `node` is laid out with: its `display` declaration if
/// that names a known mode, else the default for the node.
#[must_use]
pub fn resolve_display(ctx: &LayoutContext<'_>, node: NodeId) -> DisplayMode {
    match ctx.box_style(&BoxNode::Node(node)).display {
        Some(display) if display != DisplayMode::Undefined => display,
        _ => default_display_for_node(ctx.tree, node),
    }
}
