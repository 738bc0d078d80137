//! Table layout.
//!
//! [§ 17 Tables](https://www.w3.org/TR/CSS2/tables.html)
//!
//! Rows come from `<tr>` children of the table and of `<thead>`, `<tbody>`,
//! and `<tfoot>`. Cells are `<td>` and `<th>`. Short rows are padded with
//! empty anonymous cells so every row has the same column count.
//!
//! Column widths are negotiated in two passes. The first lays out every
//! cell against an equal share of the table width to find each cell's
//! natural size; a column is as wide as its widest cell. The second pass
//! lays the cells out for real inside their column.
//!
//! Not implemented: `colspan`, `rowspan`, `<caption>`, collapsed borders.

use tracing::debug;
use wisp_common::warning::warn_once;
use wisp_dom::{DomTree, NodeId, NodeType};

use crate::style::{AutoLength, DisplayMode, LengthValue};

use super::box_model::{Dimensions, Rect};
use super::layout_box::{BoxNode, LayoutBox, LayoutContext};

/// A row element and its cell elements.
struct TableRow {
    row: NodeId,
    cells: Vec<NodeId>,
}

/// Lay out `table` as a block whose content is a grid of cells.
pub(crate) fn layout_table(table: &mut LayoutBox, ctx: &LayoutContext<'_>, parent: &Dimensions) {
    let config = ctx.config;
    let style = ctx.box_style(&table.node);

    // The table itself is a block-level box.
    table.calculate_block_width(ctx, &style, None, parent);
    table.calculate_block_position(ctx, &style, parent);

    let rows = match table.node {
        BoxNode::Node(id) => collect_rows(ctx.tree, id),
        BoxNode::TextRun { .. } | BoxNode::AnonymousCell => Vec::new(),
    };
    let columns = rows.iter().map(|r| r.cells.len()).max().unwrap_or(0);
    let column_count = i32::try_from(columns).unwrap_or(i32::MAX);
    let spacing = config.scaled_cell_spacing();
    let width = table.dimensions.content.width;

    // Pad short rows with anonymous cells.
    let mut grid: Vec<Vec<LayoutBox>> = rows
        .iter()
        .map(|r| {
            let mut cells: Vec<LayoutBox> = r
                .cells
                .iter()
                .map(|&cell| LayoutBox::new(BoxNode::Node(cell), DisplayMode::InlineBlock))
                .collect();
            cells.resize_with(columns, || {
                LayoutBox::new(BoxNode::AnonymousCell, DisplayMode::InlineBlock)
            });
            cells
        })
        .collect();

    let estimate = if columns == 0 {
        0
    } else {
        (width.saturating_sub(gutters(spacing, column_count)) / column_count).max(0)
    };

    // Pass 1: natural sizes against a scratch cursor.
    let mut column_widths = vec![0; columns];
    let mut scratch = table.dimensions;
    for row in &mut grid {
        scratch.current_x = 0;
        let mut row_height = 0;
        for (col, cell) in row.iter_mut().enumerate() {
            cell.dimensions.max_width = estimate;
            cell.layout(ctx, &scratch);
            let natural = cell.dimensions.margin_rect();
            column_widths[col] = column_widths[col].max(natural.width);
            row_height = row_height.max(natural.height);
            scratch.current_x = scratch
                .current_x
                .saturating_add(natural.width)
                .saturating_add(spacing);
        }
        scratch.content.height = scratch
            .content
            .height
            .saturating_add(row_height)
            .saturating_add(spacing);
    }

    // Pass 2: final placement inside the negotiated columns.
    let mut cursor = table.dimensions;
    cursor.content.height = spacing;
    let mut row_boxes = Vec::with_capacity(grid.len());

    for (row, cells) in rows.iter().zip(grid) {
        let row_y = cursor.content.y_max();
        let mut x = spacing;
        let mut row_height = 0;
        let mut placed = Vec::with_capacity(cells.len());

        for (col, mut cell) in cells.into_iter().enumerate() {
            let column_width = column_widths[col];
            cursor.current_x = x;
            cell.dimensions.max_width = column_width;
            cell.layout(ctx, &cursor);

            // Stretch narrow cells to fill their column.
            let outer = cell.dimensions.margin_rect();
            if outer.width < column_width {
                cell.dimensions.content.width += column_width.saturating_sub(outer.width);
            }

            row_height = row_height.max(cell.dimensions.margin_rect().height);
            x = x.saturating_add(column_width).saturating_add(spacing);
            placed.push(cell);
        }

        let mut row_box = LayoutBox::new(BoxNode::Node(row.row), DisplayMode::Block);
        row_box.dimensions.content = Rect::new(table.dimensions.content.x, row_y, 0, row_height);
        row_box.children = placed;
        row_boxes.push(row_box);

        cursor.content.height = cursor
            .content
            .height
            .saturating_add(row_height)
            .saturating_add(spacing);
    }

    let used_width = column_widths
        .iter()
        .fold(gutters(spacing, column_count), |sum, &w| sum.saturating_add(w));
    let d = &mut table.dimensions;
    d.content.width = d.content.width.max(used_width);
    d.content.height = if rows.is_empty() { 0 } else { cursor.content.height };
    for row_box in &mut row_boxes {
        row_box.dimensions.content.width = d.content.width;
    }
    table.children = row_boxes;

    match style.height {
        Some(AutoLength::Length(LengthValue::Percent(pct))) => {
            let _ = warn_once("Layout", &format!("percentage height ignored: {pct}%"));
        }
        Some(AutoLength::Length(length)) => {
            let height = length.to_px(0, config);
            table.dimensions.content.height = table.dimensions.content.height.max(height);
        }
        Some(AutoLength::Auto) | None => {}
    }

    debug!(
        rows = rows.len(),
        columns,
        ?column_widths,
        width = table.dimensions.content.width,
        "table laid out"
    );
}

/// Total spacing around and between `columns` columns.
const fn gutters(spacing: i32, columns: i32) -> i32 {
    spacing.saturating_mul(columns.saturating_add(1))
}

/// Rows of `table` in document order.
fn collect_rows(tree: &DomTree, table: NodeId) -> Vec<TableRow> {
    let mut rows = Vec::new();
    for &child in tree.children(table) {
        match tree.as_element(child).map(|e| e.tag_name.as_str()) {
            Some("tr") => rows.push(collect_row(tree, child)),
            Some("thead" | "tbody" | "tfoot") => {
                for &grandchild in tree.children(child) {
                    if tree.as_element(grandchild).is_some_and(|e| e.is("tr")) {
                        rows.push(collect_row(tree, grandchild));
                    } else {
                        report_stray(tree, grandchild, "row group");
                    }
                }
            }
            _ => report_stray(tree, child, "table"),
        }
    }
    rows
}

fn collect_row(tree: &DomTree, row: NodeId) -> TableRow {
    let cells = tree
        .children(row)
        .iter()
        .copied()
        .filter(|&child| {
            let is_cell = tree
                .as_element(child)
                .is_some_and(|e| e.is("td") || e.is("th"));
            if !is_cell {
                report_stray(tree, child, "row");
            }
            is_cell
        })
        .collect();
    TableRow { row, cells }
}

/// Warn about a child that does not fit the table structure. Whitespace
/// text and comments are expected between table elements and pass silently.
fn report_stray(tree: &DomTree, node: NodeId, parent: &str) {
    let description = match tree.get(node).map(|n| &n.node_type) {
        Some(NodeType::Element(data)) => format!("<{}>", data.tag_name),
        Some(NodeType::Text(text)) if !text.trim().is_empty() => "text".to_string(),
        _ => return,
    };
    let _ = warn_once(
        "Layout",
        &format!("skipping {description} inside {parent}: unsupported table structure"),
    );
}
