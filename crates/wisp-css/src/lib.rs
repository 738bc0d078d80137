//! Stylesheet interface, cascade, and box layout for the wisp engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **Stylesheets** - the collaborator interface that yields matching
//!   declarations for a DOM node, plus two implementations: simple selector
//!   rule sheets and the `style` attribute
//! - **Cascade** - ordered merge of declarations with a fixed inheritance
//!   whitelist
//! - **Style values** - lengths (`px`, `%`, `em`), colors, display modes, and
//!   per-side shorthands
//! - **Layout Engine** - block width and margin resolution, inline line-box
//!   flow with greedy text wrapping, and two-pass table column sizing
//!
//! # Not Implemented
//!
//! - CSS text parsing and complex selectors (combinators, pseudo-classes)
//! - Floats, flexbox, grid, positioning, and stacking
//! - Incremental relayout; every call lays out the full tree

/// Ordered declaration merge per node.
pub mod cascade;
/// Engine tunables that were fixed constants in earlier designs.
pub mod config;
/// Error types for layout entry points and selector parsing.
pub mod error;
/// Box model and layout algorithms.
pub mod layout;
/// Simple and compound selector parsing and matching.
pub mod selector;
/// Computed style values and the box-relevant style subset.
pub mod style;
/// The stylesheet collaborator interface and its implementations.
pub mod stylesheet;

// Re-exports for convenience
pub use cascade::{CascadedStyle, INHERITED_PROPERTIES, cascade};
pub use config::{LayoutConfig, MAX_LENGTH};
pub use error::{LayoutError, SelectorError};
pub use layout::{
    ApproximateFontMetrics, AutoOr, BoxNode, Dimensions, EdgeSizes, ImageSizes, ImageTable,
    InputType, LayoutBox, LayoutContext, NoImages, Point, Rect, SelectOption, Size, TextMeasurer,
    break_text, default_display_for_node, layout_document, resolve_display, select_min_width,
    select_options,
};
pub use selector::{CompoundSelector, SelectorList, Specificity};
pub use style::{AutoLength, BoxStyle, ColorValue, DisplayMode, LengthValue, Sides};
pub use stylesheet::{
    Declaration, RuleSheet, StyleAttributeSheet, StyleRule, Stylesheet, parse_declaration_block,
};
