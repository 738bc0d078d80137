//! CSS Box Model types.
//!
//! [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//!
//! All geometry is in integer layout units and arithmetic saturates at the
//! `i32` bounds. Only the content rectangle and the three inset sets are
//! stored; the padding, border, and margin rectangles are derived from them
//! on demand, so they always nest.

use std::ops::Add;

use serde::Serialize;

/// A position in layout units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Point {
    /// Horizontal position.
    pub x: i32,
    /// Vertical position.
    pub y: i32,
}

/// A width and height in layout units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl Size {
    /// Create a size.
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: i32,
    /// Vertical position of the top-left corner.
    pub y: i32,
    /// Width of the rectangle.
    pub width: i32,
    /// Height of the rectangle.
    pub height: i32,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Grow outward by `edges` on every side.
    #[must_use]
    pub const fn extend(self, edges: EdgeSizes) -> Self {
        Self {
            x: self.x.saturating_sub(edges.left),
            y: self.y.saturating_sub(edges.top),
            width: self.width.saturating_add(edges.horizontal()),
            height: self.height.saturating_add(edges.vertical()),
        }
    }

    /// Right edge.
    #[must_use]
    pub const fn x_max(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge.
    #[must_use]
    pub const fn y_max(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Top-left corner.
    #[must_use]
    pub const fn top_left(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    /// Width and height.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// Whether `other` lies entirely inside this rectangle (edges inclusive).
    #[must_use]
    pub const fn contains(&self, other: &Self) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x_max() <= self.x_max()
            && other.y_max() <= self.y_max()
    }
}

/// Edge sizes for padding, border, or margin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EdgeSizes {
    /// Top edge size.
    pub top: i32,
    /// Right edge size.
    pub right: i32,
    /// Bottom edge size.
    pub bottom: i32,
    /// Left edge size.
    pub left: i32,
}

impl EdgeSizes {
    /// Sum of left and right.
    #[must_use]
    pub const fn horizontal(&self) -> i32 {
        self.left.saturating_add(self.right)
    }

    /// Sum of top and bottom.
    #[must_use]
    pub const fn vertical(&self) -> i32 {
        self.top.saturating_add(self.bottom)
    }

    /// Take left and right from `other`, keeping top and bottom.
    pub const fn set_horizontal(&mut self, other: Self) {
        self.left = other.left;
        self.right = other.right;
    }

    /// Take top and bottom from `other`, keeping left and right.
    pub const fn set_vertical(&mut self, other: Self) {
        self.top = other.top;
        self.bottom = other.bottom;
    }
}

impl Add for EdgeSizes {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            top: self.top + rhs.top,
            right: self.right + rhs.right,
            bottom: self.bottom + rhs.bottom,
            left: self.left + rhs.left,
        }
    }
}

/// [§ 3. The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
///
/// "Each box has a content area and optional surrounding padding, border,
/// and margin areas."
///
/// `current_x` is the line cursor used while this box flows its inline
/// children. `max_width` is the width ceiling handed down by the parent when
/// the box was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    /// Content area.
    pub content: Rect,
    /// Padding insets.
    pub padding: EdgeSizes,
    /// Border widths.
    pub border: EdgeSizes,
    /// Margin insets.
    pub margin: EdgeSizes,
    /// Line cursor for inline children.
    pub current_x: i32,
    /// Available width inherited from the parent.
    pub max_width: i32,
}

impl Dimensions {
    // ┌───────────────────────────────┐
    // │ margin                        │
    // │   ┌───────────────────────┐   │
    // │   │ border                │   │
    // │   │   ┌───────────────┐   │   │
    // │   │   │ padding       │   │   │
    // │   │   │   ┌───────┐   │   │   │
    // │   │   │   │content│   │   │   │
    // │   │   │   └───────┘   │   │   │
    // │   │   └───────────────┘   │   │
    // │   └───────────────────────┘   │
    // └───────────────────────────────┘

    /// Content plus padding.
    #[must_use]
    pub const fn padding_rect(&self) -> Rect {
        self.content.extend(self.padding)
    }

    /// Padding rectangle plus border.
    #[must_use]
    pub const fn border_rect(&self) -> Rect {
        self.padding_rect().extend(self.border)
    }

    /// Border rectangle plus margin. The outermost box.
    #[must_use]
    pub const fn margin_rect(&self) -> Rect {
        self.border_rect().extend(self.margin)
    }

    /// Top-left of the padding rectangle.
    #[must_use]
    pub const fn padding_position(&self) -> Point {
        self.padding_rect().top_left()
    }

    /// Top-left of the border rectangle.
    #[must_use]
    pub const fn border_position(&self) -> Point {
        self.border_rect().top_left()
    }

    /// Top-left of the margin rectangle.
    #[must_use]
    pub const fn margin_position(&self) -> Point {
        self.margin_rect().top_left()
    }

    /// Distance from the margin edge to the content edge on the left and
    /// top sides.
    #[must_use]
    pub const fn content_inset(&self) -> Point {
        Point {
            x: self
                .margin
                .left
                .saturating_add(self.border.left)
                .saturating_add(self.padding.left),
            y: self
                .margin
                .top
                .saturating_add(self.border.top)
                .saturating_add(self.padding.top),
        }
    }

    /// Translate the box by `(dx, dy)`.
    pub const fn offset(&mut self, dx: i32, dy: i32) {
        self.content.x = self.content.x.saturating_add(dx);
        self.content.y = self.content.y.saturating_add(dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(v: i32) -> EdgeSizes {
        EdgeSizes {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    #[test]
    fn test_derived_rects() {
        let dims = Dimensions {
            content: Rect::new(10, 10, 100, 50),
            padding: edges(1),
            border: edges(2),
            margin: edges(3),
            ..Dimensions::default()
        };
        assert_eq!(dims.padding_rect(), Rect::new(9, 9, 102, 52));
        assert_eq!(dims.border_rect(), Rect::new(7, 7, 106, 56));
        assert_eq!(dims.margin_rect(), Rect::new(4, 4, 112, 62));
        assert_eq!(dims.margin_position(), Point { x: 4, y: 4 });
    }

    #[test]
    fn test_partial_assignment() {
        let mut e = edges(1);
        e.set_horizontal(edges(5));
        assert_eq!((e.top, e.right, e.bottom, e.left), (1, 5, 1, 5));
        e.set_vertical(edges(7));
        assert_eq!(e + edges(1), EdgeSizes { top: 8, right: 6, bottom: 8, left: 6 });
    }
}
