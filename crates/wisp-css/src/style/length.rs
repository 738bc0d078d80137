//! CSS length values and parsing.
//!
//! Supported units are `px` (scaled by the configured box scale), `%`
//! (against a containing width), and `em` (against the fixed base font
//! size). A bare `0` is accepted. Every other unit, and unitless non-zero
//! numbers, are reported once and the declaration is dropped.

use serde::Serialize;
use wisp_common::warning::warn_once;

use crate::config::{LayoutConfig, clamp_length};

/// A length as written in a declaration, before layout resolves it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LengthValue {
    /// Pixels, multiplied by [`LayoutConfig::box_scale`] on resolution.
    Px(f32),
    /// Percentage of the containing width.
    Percent(f32),
    /// Multiple of [`LayoutConfig::base_font_size`].
    Em(f32),
}

impl LengthValue {
    /// Resolve to layout units, clamped to [`crate::config::MAX_LENGTH`].
    /// `containing` is the width percentages refer to.
    #[must_use]
    pub fn to_px(&self, containing: i32, config: &LayoutConfig) -> i32 {
        match *self {
            Self::Px(px) => config.scale_px(px),
            Self::Percent(pct) => clamp_length(pct * containing as f32 / 100.0),
            Self::Em(em) => clamp_length(em * config.base_font_size as f32),
        }
    }
}

/// A length that may also be the keyword `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum AutoLength {
    /// The keyword `auto`; resolved by the layout algorithm.
    Auto,
    /// A specific length.
    Length(LengthValue),
}

impl AutoLength {
    /// Check if the value is 'auto'.
    #[must_use]
    pub const fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

/// Parse a single length token. `property` is only used in diagnostics.
#[must_use]
pub fn parse_length(value: &str, property: &str) -> Option<LengthValue> {
    let value = value.trim();
    let (number, unit) = split_number(value)?;

    if unit.is_empty() {
        if number == 0.0 {
            return Some(LengthValue::Px(0.0));
        }
        let _ = warn_once("CSS", &format!("unitless length in {property}: {value}"));
        return None;
    }

    match unit.to_ascii_lowercase().as_str() {
        "px" => Some(LengthValue::Px(number)),
        "%" => Some(LengthValue::Percent(number)),
        "em" => Some(LengthValue::Em(number)),
        other => {
            let _ = warn_once(
                "CSS",
                &format!("unsupported unit '{other}' in {property}: {value}"),
            );
            None
        }
    }
}

/// Parse a single token that may be `auto` or a length.
#[must_use]
pub fn parse_auto_length(value: &str, property: &str) -> Option<AutoLength> {
    if value.trim().eq_ignore_ascii_case("auto") {
        return Some(AutoLength::Auto);
    }
    parse_length(value, property).map(AutoLength::Length)
}

/// Split `"12.5px"` into `(12.5, "px")`. Returns `None` when the token does
/// not start with a number, so keywords like `solid` are rejected silently.
fn split_number(value: &str) -> Option<(f32, &str)> {
    let end = value
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
        .map_or(value.len(), |(i, _)| i);
    let number = value[..end].parse::<f32>().ok()?;
    Some((number, &value[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!(parse_length("10px", "width"), Some(LengthValue::Px(10.0)));
        assert_eq!(parse_length("50%", "width"), Some(LengthValue::Percent(50.0)));
        assert_eq!(parse_length("1.5em", "width"), Some(LengthValue::Em(1.5)));
        assert_eq!(parse_length("-4PX", "margin"), Some(LengthValue::Px(-4.0)));
    }

    #[test]
    fn test_zero_without_unit_is_valid() {
        assert_eq!(parse_length("0", "padding"), Some(LengthValue::Px(0.0)));
    }

    #[test]
    fn test_unitless_and_unknown_units_are_dropped() {
        assert_eq!(parse_length("12", "width"), None);
        assert_eq!(parse_length("3vw", "width"), None);
        assert_eq!(parse_length("solid", "border"), None);
    }

    #[test]
    fn test_auto_keyword() {
        assert_eq!(parse_auto_length("AUTO", "margin"), Some(AutoLength::Auto));
    }

    #[test]
    fn test_resolution() {
        let config = LayoutConfig {
            box_scale: 2.0,
            base_font_size: 10,
            ..LayoutConfig::default()
        };
        assert_eq!(LengthValue::Px(3.0).to_px(0, &config), 6);
        assert_eq!(LengthValue::Percent(25.0).to_px(200, &config), 50);
        assert_eq!(LengthValue::Em(1.5).to_px(0, &config), 15);
    }
}
