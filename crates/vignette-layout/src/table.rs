//! Table layout: rows and columns with individually sized cells.

use glam::DVec2;
use vignette_core::{repeat_last, LayoutNode, LayoutResult, Size, EPSILON};

use crate::fill::{cell_offsets, resolve_lengths};
use crate::manager::LayoutManager;

/// Lays out slots in rows of `column_count` cells, filling from the top-left.
///
/// Column widths and row heights use the fixed/fit/fill scheme: positive is a
/// fixed length, zero fits the widest (or tallest) node, negative shares the
/// space left in `constrained_size` in proportion to its magnitude. All
/// per-column and per-row lists repeat their last value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TableLayoutManager {
    /// Point of the table placed at `table_position`, in unit coordinates
    pub anchor_point: DVec2,
    pub table_position: DVec2,
    /// Cells per row; zero puts every slot in a single row
    pub column_count: usize,
    /// Size that fill columns and rows share out
    pub constrained_size: Size,
    pub column_widths: Vec<f64>,
    pub row_heights: Vec<f64>,
    /// Where a node sits in its cell, per column; defaults to the centre
    pub column_anchor_points: Vec<DVec2>,
    /// Y offset added to label nodes, per row
    pub row_label_offset_ys: Vec<f64>,
    pub table_border: f64,
    pub column_separator: f64,
    pub row_separator: f64,

    #[cfg_attr(feature = "serde", serde(skip))]
    last: TableMetrics,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct TableMetrics {
    size: Size,
    row_count: usize,
    column_widths: Vec<f64>,
    row_heights: Vec<f64>,
}

impl Default for TableLayoutManager {
    fn default() -> Self {
        Self {
            anchor_point: DVec2::splat(0.5),
            table_position: DVec2::ZERO,
            column_count: 0,
            constrained_size: Size::ZERO,
            column_widths: Vec::new(),
            row_heights: Vec::new(),
            column_anchor_points: Vec::new(),
            row_label_offset_ys: Vec::new(),
            table_border: 0.0,
            column_separator: 0.0,
            row_separator: 0.0,
            last: TableMetrics::default(),
        }
    }
}

impl TableLayoutManager {
    pub fn new(column_count: usize) -> Self {
        Self { column_count, ..Default::default() }
    }

    pub fn with_anchor_point(mut self, anchor_point: DVec2) -> Self {
        self.anchor_point = anchor_point;
        self
    }

    pub fn with_table_position(mut self, table_position: DVec2) -> Self {
        self.table_position = table_position;
        self
    }

    pub fn with_constrained_size(mut self, constrained_size: Size) -> Self {
        self.constrained_size = constrained_size;
        self
    }

    pub fn with_column_widths(mut self, column_widths: Vec<f64>) -> Self {
        self.column_widths = column_widths;
        self
    }

    pub fn with_row_heights(mut self, row_heights: Vec<f64>) -> Self {
        self.row_heights = row_heights;
        self
    }

    pub fn with_column_anchor_points(mut self, column_anchor_points: Vec<DVec2>) -> Self {
        self.column_anchor_points = column_anchor_points;
        self
    }

    pub fn with_row_label_offset_ys(mut self, row_label_offset_ys: Vec<f64>) -> Self {
        self.row_label_offset_ys = row_label_offset_ys;
        self
    }

    pub fn with_table_border(mut self, table_border: f64) -> Self {
        self.table_border = table_border;
        self
    }

    pub fn with_column_separator(mut self, column_separator: f64) -> Self {
        self.column_separator = column_separator;
        self
    }

    pub fn with_row_separator(mut self, row_separator: f64) -> Self {
        self.row_separator = row_separator;
        self
    }

    /// Total size from the last layout.
    pub fn size(&self) -> Size {
        self.last.size
    }

    /// Row count from the last layout.
    pub fn row_count(&self) -> usize {
        self.last.row_count
    }

    /// Resolved column widths from the last layout.
    pub fn column_widths_resolved(&self) -> &[f64] {
        &self.last.column_widths
    }

    /// Resolved row heights from the last layout.
    pub fn row_heights_resolved(&self) -> &[f64] {
        &self.last.row_heights
    }

    fn dimensions(&self, node_count: usize) -> (usize, usize) {
        let columns = if self.column_count == 0 { node_count } else { self.column_count };
        if columns == 0 {
            return (0, 0);
        }
        (columns, node_count.div_ceil(columns))
    }
}

impl LayoutManager for TableLayoutManager {
    fn layout<N: LayoutNode>(&mut self, nodes: &mut [Option<N>]) -> LayoutResult<()> {
        let (columns, rows) = self.dimensions(nodes.len());

        let mut fit_widths = vec![0.0_f64; columns];
        let mut fit_heights = vec![0.0_f64; rows];
        for (index, node) in nodes.iter().enumerate() {
            if let Some(node) = node {
                let size = node.size();
                let (column, row) = (index % columns, index / columns);
                fit_widths[column] = fit_widths[column].max(size.width);
                fit_heights[row] = fit_heights[row].max(size.height);
            }
        }

        let widths = resolve_lengths(
            &self.column_widths,
            &fit_widths,
            self.constrained_size.width,
            self.table_border,
            self.column_separator,
            EPSILON,
        );
        let heights = resolve_lengths(
            &self.row_heights,
            &fit_heights,
            self.constrained_size.height,
            self.table_border,
            self.row_separator,
            EPSILON,
        );

        let size = Size::new(widths.total, heights.total);
        let lower_left = self.table_position - self.anchor_point * size.to_vec();
        let top = lower_left.y + size.height;
        let column_lefts = cell_offsets(&widths.lengths, self.table_border, self.column_separator);
        let row_tops = cell_offsets(&heights.lengths, self.table_border, self.row_separator);

        for (index, slot) in nodes.iter_mut().enumerate() {
            let Some(node) = slot else { continue };
            let (column, row) = (index % columns, index / columns);
            let (width, height) = (widths.lengths[column], heights.lengths[row]);
            let anchor = repeat_last(&self.column_anchor_points, column, DVec2::splat(0.5));
            let mut position = DVec2::new(
                lower_left.x + column_lefts[column] + anchor.x * width,
                top - row_tops[row] - height + anchor.y * height,
            );
            if node.is_label() {
                position.y += repeat_last(&self.row_label_offset_ys, row, 0.0);
            }
            node.set_position(position);
        }

        log::debug!("table layout: {} slots in {columns}x{rows}, size {size:?}", nodes.len());
        self.last = TableMetrics {
            size,
            row_count: rows,
            column_widths: widths.lengths,
            row_heights: heights.lengths,
        };
        Ok(())
    }
}
