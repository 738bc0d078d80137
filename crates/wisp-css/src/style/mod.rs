//! Computed style values.
//!
//! Declarations arrive as raw `(property, value)` strings. This module turns
//! the subset the layout engine understands into typed values; everything
//! else is ignored.

mod box_style;
mod color;
mod display;
mod length;

pub use box_style::{BoxStyle, Sides};
pub use color::ColorValue;
pub use display::DisplayMode;
pub use length::{AutoLength, LengthValue, parse_auto_length, parse_length};
