//! The box-relevant subset of a node's declarations.

use serde::Serialize;
use wisp_common::warning::warn_once;

use super::color::ColorValue;
use super::display::DisplayMode;
use super::length::{AutoLength, LengthValue, parse_auto_length, parse_length};
use crate::stylesheet::Declaration;

/// One value per box side.
///
/// Used for padding, border widths, and margins before layout resolves them
/// against a containing width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Sides<T> {
    /// Top side.
    pub top: T,
    /// Right side.
    pub right: T,
    /// Bottom side.
    pub bottom: T,
    /// Left side.
    pub left: T,
}

impl<T: Copy> Sides<T> {
    /// The same value on all four sides.
    #[must_use]
    pub const fn uniform(value: T) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Expand the one-to-four value shorthand form.
    ///
    /// ```text
    /// 1 value:  all sides
    /// 2 values: top/bottom, right/left
    /// 3 values: top, right/left, bottom
    /// 4 values: top, right, bottom, left
    /// ```
    #[must_use]
    pub fn from_values(values: &[T]) -> Option<Self> {
        match *values {
            [all] => Some(Self::uniform(all)),
            [vertical, horizontal] => Some(Self {
                top: vertical,
                right: horizontal,
                bottom: vertical,
                left: horizontal,
            }),
            [top, horizontal, bottom] => Some(Self {
                top,
                right: horizontal,
                bottom,
                left: horizontal,
            }),
            [top, right, bottom, left] => Some(Self {
                top,
                right,
                bottom,
                left,
            }),
            _ => None,
        }
    }

    /// Mutable access by side keyword (`top`, `right`, `bottom`, `left`).
    pub fn side_mut(&mut self, side: &str) -> Option<&mut T> {
        match side {
            "top" => Some(&mut self.top),
            "right" => Some(&mut self.right),
            "bottom" => Some(&mut self.bottom),
            "left" => Some(&mut self.left),
            _ => None,
        }
    }
}

/// Typed view of the declarations the layout engine understands.
///
/// `None` means the property was not declared (or every declaration for it
/// was invalid). Declarations apply in order, so a later valid value
/// replaces an earlier one and an invalid value leaves the previous one in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoxStyle {
    /// `display`
    pub display: Option<DisplayMode>,
    /// `width`
    pub width: Option<AutoLength>,
    /// `height`
    pub height: Option<AutoLength>,
    /// `padding` and `padding-<side>`
    pub padding: Sides<Option<LengthValue>>,
    /// `border`, `border-width`, and their per-side forms
    pub border: Sides<Option<LengthValue>>,
    /// `margin` and `margin-<side>`
    pub margin: Sides<Option<AutoLength>>,
    /// `color`
    pub color: Option<ColorValue>,
}

impl BoxStyle {
    /// Build a style by applying each declaration in order.
    #[must_use]
    pub fn from_declarations(declarations: &[Declaration]) -> Self {
        let mut style = Self::default();
        for declaration in declarations {
            style.apply(&declaration.property, &declaration.value);
        }
        style
    }

    /// Apply a single declaration. Unknown properties are ignored.
    pub fn apply(&mut self, property: &str, value: &str) {
        let property = property.trim().to_ascii_lowercase();
        let value = value.trim();

        match property.as_str() {
            "display" => match DisplayMode::parse(value) {
                DisplayMode::Undefined => {
                    let _ = warn_once("CSS", &format!("unrecognised display value: {value}"));
                }
                mode => self.display = Some(mode),
            },
            "width" => {
                if let Some(width) = parse_auto_length(value, "width") {
                    self.width = Some(width);
                }
            }
            "height" => {
                if let Some(height) = parse_auto_length(value, "height") {
                    self.height = Some(height);
                }
            }
            "padding" => {
                if let Some(sides) = parse_sides(value, |v| parse_length(v, "padding")) {
                    self.padding = sides;
                }
            }
            "margin" => {
                if let Some(sides) = parse_sides(value, |v| parse_auto_length(v, "margin")) {
                    self.margin = sides;
                }
            }
            "border-width" => {
                if let Some(sides) = parse_sides(value, |v| border_width_token(v, "border-width"))
                {
                    self.border = sides;
                }
            }
            "border" => {
                if let Some(width) = first_border_width(value, "border") {
                    self.border = Sides::uniform(Some(width));
                }
            }
            "color" => match ColorValue::parse(value) {
                Some(color) => self.color = Some(color),
                None => {
                    let _ = warn_once("CSS", &format!("unrecognised color: {value}"));
                }
            },
            other => self.apply_longhand(other, value),
        }
    }

    fn apply_longhand(&mut self, property: &str, value: &str) {
        if let Some(side) = property.strip_prefix("padding-") {
            if let (Some(slot), Some(length)) =
                (self.padding.side_mut(side), parse_length(value, property))
            {
                *slot = Some(length);
            }
        } else if let Some(side) = property.strip_prefix("margin-") {
            if let (Some(slot), Some(length)) =
                (self.margin.side_mut(side), parse_auto_length(value, property))
            {
                *slot = Some(length);
            }
        } else if let Some(rest) = property.strip_prefix("border-") {
            // border-<side>-width or border-<side>
            let (side, width) = match rest.strip_suffix("-width") {
                Some(side) => (side, border_width_token(value, property)),
                None => (rest, first_border_width(value, property)),
            };
            if let (Some(slot), Some(width)) = (self.border.side_mut(side), width) {
                *slot = Some(width);
            }
        }
    }
}

/// Parse a whitespace-separated shorthand. Every token must be valid.
fn parse_sides<T: Copy>(value: &str, parse: impl Fn(&str) -> Option<T>) -> Option<Sides<Option<T>>> {
    let values = value
        .split_whitespace()
        .map(|token| parse(token).map(Some))
        .collect::<Option<Vec<_>>>()?;
    Sides::from_values(&values)
}

/// A `border-width` token: a keyword or a length.
fn border_width_token(token: &str, property: &str) -> Option<LengthValue> {
    match token.to_ascii_lowercase().as_str() {
        "thin" => Some(LengthValue::Px(1.0)),
        "medium" => Some(LengthValue::Px(3.0)),
        "thick" => Some(LengthValue::Px(5.0)),
        "none" | "hidden" => Some(LengthValue::Px(0.0)),
        _ => parse_length(token, property),
    }
}

/// The width component of a `border` shorthand such as `1px solid red`.
fn first_border_width(value: &str, property: &str) -> Option<LengthValue> {
    value
        .split_whitespace()
        .find_map(|token| border_width_token(token, property))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(declarations: &[(&str, &str)]) -> BoxStyle {
        let mut style = BoxStyle::default();
        for (property, value) in declarations {
            style.apply(property, value);
        }
        style
    }

    #[test]
    fn test_padding_shorthand_expansion() {
        let s = style(&[("padding", "1px 2px 3px")]);
        assert_eq!(s.padding.top, Some(LengthValue::Px(1.0)));
        assert_eq!(s.padding.right, Some(LengthValue::Px(2.0)));
        assert_eq!(s.padding.bottom, Some(LengthValue::Px(3.0)));
        assert_eq!(s.padding.left, Some(LengthValue::Px(2.0)));
    }

    #[test]
    fn test_longhand_overrides_shorthand_in_order() {
        let s = style(&[("margin", "0 auto"), ("margin-left", "10px")]);
        assert_eq!(s.margin.left, Some(AutoLength::Length(LengthValue::Px(10.0))));
        assert_eq!(s.margin.right, Some(AutoLength::Auto));
    }

    #[test]
    fn test_invalid_value_keeps_previous() {
        let s = style(&[("width", "100px"), ("width", "12")]);
        assert_eq!(s.width, Some(AutoLength::Length(LengthValue::Px(100.0))));
    }

    #[test]
    fn test_border_shorthand_picks_width_token() {
        let s = style(&[("border", "solid thick red")]);
        assert_eq!(s.border.left, Some(LengthValue::Px(5.0)));

        let s = style(&[("border-top", "2px dashed"), ("border-right-width", "thin")]);
        assert_eq!(s.border.top, Some(LengthValue::Px(2.0)));
        assert_eq!(s.border.right, Some(LengthValue::Px(1.0)));
        assert_eq!(s.border.bottom, None);
    }

    #[test]
    fn test_shorthand_with_bad_token_is_ignored() {
        let s = style(&[("padding", "4px"), ("padding", "1px bogus")]);
        assert_eq!(s.padding, Sides::uniform(Some(LengthValue::Px(4.0))));
    }

    #[test]
    fn test_unrecognised_display_keeps_previous() {
        let s = style(&[("display", "block"), ("display", "flex")]);
        assert_eq!(s.display, Some(DisplayMode::Block));

        let s = style(&[("display", "flex")]);
        assert_eq!(s.display, None);
    }

    #[test]
    fn test_color_and_display() {
        let s = style(&[("display", "inline"), ("color", "#ff0000")]);
        assert_eq!(s.display, Some(DisplayMode::InlineBlock));
        assert_eq!(s.color, Some(ColorValue::rgb(255, 0, 0)));
    }
}
