//! Layout boxes and the block and inline layout algorithms.
//!
//! [§ 9 Visual formatting model](https://www.w3.org/TR/CSS2/visuren.html)
//!
//! Every call lays out the whole tree from scratch. A box rebuilds its
//! children from the DOM each time it is laid out, so a box can be laid out
//! again (for example after wrapping to a new line) without stale state.

use std::fmt::Write;

use serde::Serialize;
use tracing::debug;
use wisp_common::warning::warn_once;
use wisp_dom::{DomTree, NodeId, NodeType, decode_entities};

use crate::cascade::{CascadedStyle, cascade};
use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::style::{AutoLength, BoxStyle, DisplayMode, LengthValue};
use crate::stylesheet::Stylesheet;

use super::box_model::{Dimensions, Rect, Size};
use super::inline::{TextMeasurer, break_text};
use super::intrinsic::{ImageSizes, intrinsic_size};
use super::resolve_display;
use super::table::layout_table;
use super::values::AutoOr;

/// What a layout box was generated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BoxNode {
    /// A DOM element or the document.
    Node(NodeId),
    /// One line of a text node after breaking.
    TextRun {
        /// The source text node.
        node: NodeId,
        /// Decoded text for this line.
        text: String,
    },
    /// An empty cell added to pad a short table row.
    AnonymousCell,
}

impl BoxNode {
    /// The DOM node this box came from, if any.
    #[must_use]
    pub const fn node_id(&self) -> Option<NodeId> {
        match self {
            Self::Node(id) | Self::TextRun { node: id, .. } => Some(*id),
            Self::AnonymousCell => None,
        }
    }
}

/// Everything a layout pass reads but never modifies.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    /// The document.
    pub tree: &'a DomTree,
    /// Stylesheets in increasing precedence.
    pub stylesheets: &'a [Box<dyn Stylesheet>],
    /// Glyph measurement.
    pub measurer: &'a dyn TextMeasurer,
    /// Image size lookup.
    pub images: &'a dyn ImageSizes,
    /// Tunables.
    pub config: &'a LayoutConfig,
}

impl LayoutContext<'_> {
    /// The box-relevant style of `node`. Only DOM nodes carry declarations.
    #[must_use]
    pub fn box_style(&self, node: &BoxNode) -> BoxStyle {
        match node {
            BoxNode::Node(id) => {
                cascade(self.stylesheets, self.tree, *id, &CascadedStyle::default()).box_style()
            }
            BoxNode::TextRun { .. } | BoxNode::AnonymousCell => BoxStyle::default(),
        }
    }
}

/// A node in the layout tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutBox {
    /// Source of this box.
    pub node: BoxNode,
    /// Resolved geometry.
    pub dimensions: Dimensions,
    /// Display mode used to lay this box out.
    pub display: DisplayMode,
    /// Child boxes in document order.
    pub children: Vec<LayoutBox>,
}

/// Lay out `tree` inside `viewport`.
///
/// The document is laid out as a block whose containing block spans the
/// viewport's width at zero height.
///
/// # Errors
///
/// Returns [`LayoutError`] when the tree has no document root.
pub fn layout_document(
    tree: &DomTree,
    stylesheets: &[Box<dyn Stylesheet>],
    viewport: Rect,
    measurer: &dyn TextMeasurer,
    images: &dyn ImageSizes,
    config: &LayoutConfig,
) -> Result<LayoutBox, LayoutError> {
    let root = tree.get(tree.root()).ok_or(LayoutError::MissingDocument)?;
    if !matches!(root.node_type, NodeType::Document) {
        return Err(LayoutError::NotADocument);
    }

    let ctx = LayoutContext {
        tree,
        stylesheets,
        measurer,
        images,
        config,
    };
    let containing = Dimensions {
        content: Rect::new(viewport.x, viewport.y, viewport.width, 0),
        max_width: viewport.width,
        ..Dimensions::default()
    };

    let mut root_box = LayoutBox::new(BoxNode::Node(tree.root()), DisplayMode::Block);
    root_box.dimensions.max_width = viewport.width;
    root_box.layout(&ctx, &containing);

    debug!(
        viewport_width = viewport.width,
        content_height = root_box.dimensions.content.height,
        "layout complete"
    );
    Ok(root_box)
}

impl LayoutBox {
    /// Create a box that has not been laid out yet.
    #[must_use]
    pub fn new(node: BoxNode, display: DisplayMode) -> Self {
        Self {
            node,
            dimensions: Dimensions::default(),
            display,
            children: Vec::new(),
        }
    }

    /// Lay out this box and its subtree against `parent`.
    ///
    /// Keeps only [`Dimensions::max_width`], which the parent sets before
    /// calling.
    ///
    /// # Panics
    ///
    /// Panics if the box's display is `None` or `Undefined`. Children with
    /// those modes are filtered out before they get here.
    pub fn layout(&mut self, ctx: &LayoutContext<'_>, parent: &Dimensions) {
        self.dimensions = Dimensions {
            max_width: self.dimensions.max_width,
            ..Dimensions::default()
        };
        self.children.clear();

        match self.display {
            DisplayMode::Block => self.layout_block(ctx, parent),
            DisplayMode::InlineBlock => self.layout_inline(ctx, parent),
            DisplayMode::Table => layout_table(self, ctx, parent),
            DisplayMode::Undefined | DisplayMode::None => {
                unreachable!("box with display {} reached layout", self.display)
            }
        }
    }

    /// [§ 10.3.3 Block-level, non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#blockwidth)
    fn layout_block(&mut self, ctx: &LayoutContext<'_>, parent: &Dimensions) {
        let style = ctx.box_style(&self.node);
        let intrinsic = intrinsic_size(ctx, &self.node);

        self.calculate_block_width(ctx, &style, intrinsic, parent);
        self.calculate_block_position(ctx, &style, parent);

        let extent = self.layout_children(ctx, self.dimensions.content.width);
        self.dimensions.content.width = self.dimensions.content.width.max(extent);

        self.calculate_height(ctx, &style, intrinsic);
    }

    /// Resolve content width and horizontal padding, border, and margins.
    ///
    /// ```text
    /// margin-left + border-left + padding-left + width +
    /// padding-right + border-right + margin-right = container width
    /// ```
    pub(crate) fn calculate_block_width(
        &mut self,
        ctx: &LayoutContext<'_>,
        style: &BoxStyle,
        intrinsic: Option<Size>,
        parent: &Dimensions,
    ) {
        let config = ctx.config;
        let container = parent.content.width;

        let padding = style.padding.resolve(container, config);
        let border = style.border.resolve(container, config);
        let margin = style.margin.resolve_auto(container, config);

        // An explicit width beats intrinsic content.
        let mut width = match style.width {
            Some(AutoLength::Length(length)) => AutoOr::Length(length.to_px(container, config)),
            _ => intrinsic.map_or(AutoOr::Auto, |size| AutoOr::Length(size.width)),
        };
        let mut margin_left = margin.left;
        let mut margin_right = margin.right;

        let total = width
            .to_px_or(0)
            .saturating_add(padding.horizontal())
            .saturating_add(border.horizontal())
            .saturating_add(margin_left.to_px_or(0))
            .saturating_add(margin_right.to_px_or(0));

        // Over-constrained: auto margins are treated as zero.
        if total > container {
            if margin_left.is_auto() {
                margin_left = AutoOr::Length(0);
            }
            if margin_right.is_auto() {
                margin_right = AutoOr::Length(0);
            }
        }

        let underflow = container.saturating_sub(total);

        match (width, margin_left, margin_right) {
            (AutoOr::Auto, _, _) => {
                margin_left = AutoOr::Length(margin_left.to_px_or(0));
                if underflow >= 0 {
                    width = AutoOr::Length(underflow);
                    margin_right = AutoOr::Length(margin_right.to_px_or(0));
                } else {
                    width = AutoOr::Length(0);
                    margin_right =
                        AutoOr::Length(margin_right.to_px_or(0).saturating_add(underflow));
                }
            }
            (_, AutoOr::Length(_), AutoOr::Length(right)) => {
                margin_right = AutoOr::Length(right.saturating_add(underflow));
            }
            (_, AutoOr::Length(_), AutoOr::Auto) => {
                margin_right = AutoOr::Length(underflow);
            }
            (_, AutoOr::Auto, AutoOr::Length(_)) => {
                margin_left = AutoOr::Length(underflow);
            }
            (_, AutoOr::Auto, AutoOr::Auto) => {
                // Odd underflow leaves the extra unit on the right.
                let left = underflow.div_euclid(2);
                margin_left = AutoOr::Length(left);
                margin_right = AutoOr::Length(underflow.saturating_sub(left));
            }
        }

        let d = &mut self.dimensions;
        d.content.width = width.to_px_or(0);
        d.padding.set_horizontal(padding);
        d.border.set_horizontal(border);
        d.margin.left = margin_left.to_px_or(0);
        d.margin.right = margin_right.to_px_or(0);
    }

    /// [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
    ///
    /// "In a block formatting context, boxes are laid out one after the
    /// other, vertically, beginning at the top of a containing block."
    pub(crate) fn calculate_block_position(
        &mut self,
        ctx: &LayoutContext<'_>,
        style: &BoxStyle,
        parent: &Dimensions,
    ) {
        let config = ctx.config;
        let container = parent.content.width;

        let d = &mut self.dimensions;
        d.padding.set_vertical(style.padding.resolve(container, config));
        d.border.set_vertical(style.border.resolve(container, config));
        d.margin
            .set_vertical(style.margin.resolve_auto(container, config).zero_auto());

        let inset = d.content_inset();
        d.content.x = parent.content.x.saturating_add(inset.x);
        d.content.y = parent.content.y_max().saturating_add(inset.y);
    }

    /// Content height: intrinsic height if any, then an explicit `height`.
    pub(crate) fn calculate_height(
        &mut self,
        ctx: &LayoutContext<'_>,
        style: &BoxStyle,
        intrinsic: Option<Size>,
    ) {
        if let Some(size) = intrinsic {
            self.dimensions.content.height = size.height;
        }
        match style.height {
            Some(AutoLength::Length(LengthValue::Percent(pct))) => {
                let _ = warn_once(
                    "Layout",
                    &format!("percentage height ignored: {pct}%"),
                );
            }
            Some(AutoLength::Length(length)) => {
                self.dimensions.content.height = length.to_px(0, ctx.config);
            }
            Some(AutoLength::Auto) | None => {}
        }
    }

    /// [§ 10.3.9 'Inline-block', non-replaced elements in normal flow](https://www.w3.org/TR/CSS2/visudet.html#inlineblock-width)
    ///
    /// Intrinsic width wins, then an explicit `width`. Otherwise the box
    /// shrinks to the widest line of its children, flowed against the
    /// width left over from `max_width`.
    fn layout_inline(&mut self, ctx: &LayoutContext<'_>, parent: &Dimensions) {
        let config = ctx.config;
        let style = ctx.box_style(&self.node);
        let intrinsic = intrinsic_size(ctx, &self.node);
        let max_width = self.dimensions.max_width;

        let d = &mut self.dimensions;
        d.padding = style.padding.resolve(max_width, config);
        d.border = style.border.resolve(max_width, config);
        d.margin = style.margin.resolve_auto(max_width, config).zero_auto();

        let explicit = intrinsic.map(|size| size.width).or(match style.width {
            Some(AutoLength::Length(length)) => Some(length.to_px(max_width, config)),
            _ => None,
        });

        let inset = d.content_inset();
        d.content.x = parent
            .content
            .x
            .saturating_add(parent.current_x)
            .saturating_add(inset.x);
        d.content.y = parent.content.y_max().saturating_add(inset.y);

        let edges = d
            .padding
            .horizontal()
            .saturating_add(d.border.horizontal())
            .saturating_add(d.margin.horizontal());
        let flow_width = explicit.unwrap_or(max_width.saturating_sub(edges).max(0));
        d.content.width = flow_width;

        let extent = self.layout_children(ctx, flow_width);
        self.dimensions.content.width = explicit.map_or(extent, |width| width.max(extent));

        self.calculate_height(ctx, &style, intrinsic);
    }

    /// [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
    ///
    /// Flow the children into line boxes `flow_width` wide. Block-level
    /// children break the line before and after themselves. Inline
    /// children advance the line cursor; one that would overflow a non-empty
    /// line moves to the start of the next line and is laid out again. The
    /// lines of one broken text node never share a line box.
    ///
    /// Returns the widest extent reached by any line or block child.
    fn layout_children(&mut self, ctx: &LayoutContext<'_>, flow_width: i32) -> i32 {
        let children = self.collect_children(ctx, flow_width);
        let mut line_height = 0;
        let mut extent = 0;
        let mut previous_text = None;

        for mut child in children {
            // Each further line of a broken text node starts a new line box.
            let text_node = match &child.node {
                BoxNode::TextRun { node, .. } => Some(*node),
                BoxNode::Node(_) | BoxNode::AnonymousCell => None,
            };
            if text_node.is_some() && text_node == previous_text {
                self.finish_line(&mut line_height);
            }
            previous_text = text_node;

            if child.display.is_block_level() {
                self.finish_line(&mut line_height);
                child.dimensions.max_width = flow_width.max(0);
                child.layout(ctx, &self.dimensions);
                let outer = child.dimensions.margin_rect();
                self.dimensions.content.height =
                    self.dimensions.content.height.saturating_add(outer.height);
                extent = extent.max(outer.width);
                self.children.push(child);
                continue;
            }

            child.dimensions.max_width = flow_width.saturating_sub(self.dimensions.current_x).max(0);
            child.layout(ctx, &self.dimensions);
            let mut outer = child.dimensions.margin_rect();

            if self.dimensions.current_x > 0
                && self.dimensions.current_x.saturating_add(outer.width) > flow_width
            {
                self.finish_line(&mut line_height);
                child.dimensions.max_width = flow_width.max(0);
                child.layout(ctx, &self.dimensions);
                outer = child.dimensions.margin_rect();
            }

            self.dimensions.current_x = self.dimensions.current_x.saturating_add(outer.width);
            line_height = line_height.max(outer.height);
            extent = extent.max(self.dimensions.current_x);
            self.children.push(child);
        }

        self.finish_line(&mut line_height);
        extent
    }

    /// Close the current line box: move below it and reset the cursor.
    fn finish_line(&mut self, line_height: &mut i32) {
        self.dimensions.content.height = self.dimensions.content.height.saturating_add(*line_height);
        self.dimensions.current_x = 0;
        *line_height = 0;
    }

    /// Build unlaid-out child boxes from the DOM. Text is decoded and broken
    /// into one run per line; comments and `display: none` are dropped.
    fn collect_children(&self, ctx: &LayoutContext<'_>, flow_width: i32) -> Vec<Self> {
        let BoxNode::Node(id) = self.node else {
            return Vec::new();
        };

        let mut boxes = Vec::new();
        for &child in ctx.tree.children(id) {
            let Some(node) = ctx.tree.get(child) else {
                continue;
            };
            match &node.node_type {
                NodeType::Comment(_) => {}
                NodeType::Text(raw) => {
                    let text = decode_entities(raw);
                    boxes.extend(
                        break_text(&text, flow_width, ctx.measurer, ctx.config)
                            .into_iter()
                            .map(|line| {
                                Self::new(
                                    BoxNode::TextRun {
                                        node: child,
                                        text: line,
                                    },
                                    DisplayMode::InlineBlock,
                                )
                            }),
                    );
                }
                NodeType::Element(_) | NodeType::Document => {
                    let display = match resolve_display(ctx, child) {
                        DisplayMode::None => continue,
                        DisplayMode::Undefined => {
                            let _ = warn_once(
                                "Layout",
                                &format!("undefined display for node {}, using block", child.0),
                            );
                            DisplayMode::Block
                        }
                        display => display,
                    };
                    boxes.push(Self::new(BoxNode::Node(child), display));
                }
            }
        }
        boxes
    }

    /// Render the subtree as indented text, one box per line.
    #[must_use]
    pub fn dump(&self, tree: &DomTree) -> String {
        let mut out = String::new();
        self.dump_into(tree, 0, &mut out);
        out
    }

    fn dump_into(&self, tree: &DomTree, depth: usize, out: &mut String) {
        let label = match &self.node {
            BoxNode::Node(id) => match tree.get(*id).map(|n| &n.node_type) {
                Some(NodeType::Element(data)) => format!("<{}>", data.tag_name),
                Some(NodeType::Document) => "#document".to_string(),
                Some(NodeType::Text(_)) => "#text".to_string(),
                Some(NodeType::Comment(_)) => "#comment".to_string(),
                None => format!("#missing({})", id.0),
            },
            BoxNode::TextRun { text, .. } => format!("{text:?}"),
            BoxNode::AnonymousCell => "(anonymous cell)".to_string(),
        };
        let c = self.dimensions.content;
        let _ = writeln!(
            out,
            "{:indent$}{label} {} ({}, {}) {}x{}",
            "",
            self.display,
            c.x,
            c.y,
            c.width,
            c.height,
            indent = depth * 2
        );
        for child in &self.children {
            child.dump_into(tree, depth + 1, out);
        }
    }
}
