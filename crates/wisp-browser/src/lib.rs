//! Element generation for the wisp layout engine.
//!
//! # Scope
//!
//! This crate provides:
//! - **Generator** - lays out a document and walks the box tree, emitting a
//!   flat, ordered list of typed elements with stable identifiers
//! - **Element model** - labels, buttons, images, text fields, selects, and
//!   forms, each with a snapshot of its box geometry
//! - **Image registry** - one identifier per distinct image URL, with a
//!   pending flag for images whose size is still unknown
//!
//! Rasterization and input routing consume the element list; they are not
//! part of this crate.

/// Generated element types and identifiers.
pub mod element;
/// Generation errors.
pub mod error;
/// The layout-then-walk generator.
pub mod generator;
/// Deduplicated image requests.
pub mod images;

pub use wisp_css as css;
pub use wisp_dom as dom;

pub use element::{Element, ElementId, ElementKind, ImageId, LinkId};
pub use error::GenerateError;
pub use generator::Generator;
pub use images::{ImageRegistry, ImageRequest};
