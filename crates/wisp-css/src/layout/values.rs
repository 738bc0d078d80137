//! Used-value resolution for box properties.
//!
//! [§ 6.1 Used Values](https://www.w3.org/TR/css-cascade-4/#used)
//!
//! "The used value is the result of taking the computed value and
//! completing any remaining calculations to make it the absolute
//! theoretical value used in the layout of the document."

use serde::Serialize;

use crate::config::LayoutConfig;
use crate::style::{AutoLength, LengthValue, Sides};

use super::box_model::EdgeSizes;

/// A resolved length that may still be `auto`.
///
/// Only width and margins can be `auto`; the block width algorithm decides
/// what an `auto` becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AutoOr {
    /// The keyword `auto`.
    Auto,
    /// A length in layout units.
    Length(i32),
}

impl AutoOr {
    /// Check if the value is 'auto'.
    #[must_use]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }

    /// The length, or `default` for `auto`.
    #[must_use]
    pub const fn to_px_or(&self, default: i32) -> i32 {
        match self {
            Self::Auto => default,
            Self::Length(px) => *px,
        }
    }

    /// Resolve an optional declared value. Undeclared counts as `undeclared`.
    #[must_use]
    pub fn resolve(
        value: Option<AutoLength>,
        undeclared: Self,
        containing: i32,
        config: &LayoutConfig,
    ) -> Self {
        match value {
            None => undeclared,
            Some(AutoLength::Auto) => Self::Auto,
            Some(AutoLength::Length(length)) => Self::Length(length.to_px(containing, config)),
        }
    }
}

impl Sides<Option<LengthValue>> {
    /// Resolve to layout units. Undeclared sides are zero.
    #[must_use]
    pub fn resolve(&self, containing: i32, config: &LayoutConfig) -> EdgeSizes {
        let px = |side: Option<LengthValue>| side.map_or(0, |l| l.to_px(containing, config));
        EdgeSizes {
            top: px(self.top),
            right: px(self.right),
            bottom: px(self.bottom),
            left: px(self.left),
        }
    }
}

impl Sides<Option<AutoLength>> {
    /// Resolve margins. Undeclared sides are zero, `auto` stays `auto`.
    #[must_use]
    pub fn resolve_auto(&self, containing: i32, config: &LayoutConfig) -> Sides<AutoOr> {
        let resolve = |side| AutoOr::resolve(side, AutoOr::Length(0), containing, config);
        Sides {
            top: resolve(self.top),
            right: resolve(self.right),
            bottom: resolve(self.bottom),
            left: resolve(self.left),
        }
    }
}

impl Sides<AutoOr> {
    /// Collapse every `auto` to zero.
    #[must_use]
    pub const fn zero_auto(&self) -> EdgeSizes {
        EdgeSizes {
            top: self.top.to_px_or(0),
            right: self.right.to_px_or(0),
            bottom: self.bottom.to_px_or(0),
            left: self.left.to_px_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_resolution_keeps_auto() {
        let margin = Sides {
            top: None,
            right: Some(AutoLength::Auto),
            bottom: Some(AutoLength::Length(LengthValue::Px(4.0))),
            left: Some(AutoLength::Length(LengthValue::Percent(10.0))),
        };
        let resolved = margin.resolve_auto(200, &LayoutConfig::default());
        assert_eq!(resolved.top, AutoOr::Length(0));
        assert_eq!(resolved.right, AutoOr::Auto);
        assert_eq!(resolved.bottom, AutoOr::Length(4));
        assert_eq!(resolved.left, AutoOr::Length(20));
        assert_eq!(resolved.zero_auto().horizontal(), 20);
    }

    #[test]
    fn test_padding_scaled() {
        let config = LayoutConfig {
            box_scale: 2.0,
            ..LayoutConfig::default()
        };
        let padding = Sides::uniform(Some(LengthValue::Px(3.0)));
        assert_eq!(padding.resolve(0, &config).vertical(), 12);
    }
}
