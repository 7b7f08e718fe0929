//! Grid layout: equal squares, bounded in one dimension.

use glam::DVec2;
use vignette_core::{LayoutError, LayoutNode, LayoutResult, Size};

use crate::fill_mode::{Axis, FillMode};
use crate::manager::LayoutManager;

/// Which grid dimension is bounded. The other grows to fit the slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GridLimit {
    Columns(usize),
    Rows(usize),
}

impl Default for GridLimit {
    fn default() -> Self {
        GridLimit::Columns(0)
    }
}

/// Lays out slots in a grid of equally sized squares.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridLayoutManager {
    /// Point of the grid placed at `grid_offset`, in unit coordinates
    pub anchor_point: DVec2,
    /// Position of the grid's anchor point
    pub grid_offset: DVec2,
    /// Bounded dimension; the most recently set count wins
    pub limit: GridLimit,
    pub square_size: Size,
    /// Where each node sits in its square, in unit coordinates
    pub square_anchor_point: DVec2,
    pub fill_mode: FillMode,
    /// Space between the outer squares and the grid edge
    pub grid_border: f64,
    /// Space between adjacent squares
    pub square_separator: f64,

    #[cfg_attr(feature = "serde", serde(skip))]
    last: GridMetrics,
}

/// Grid dimensions from the last layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct GridMetrics {
    columns: usize,
    rows: usize,
    /// Columns and rows holding at least one slot
    used: (usize, usize),
    node_count: usize,
    size: Size,
}

impl Default for GridLayoutManager {
    fn default() -> Self {
        Self {
            anchor_point: DVec2::splat(0.5),
            grid_offset: DVec2::ZERO,
            limit: GridLimit::default(),
            square_size: Size::ZERO,
            square_anchor_point: DVec2::splat(0.5),
            fill_mode: FillMode::default(),
            grid_border: 0.0,
            square_separator: 0.0,
            last: GridMetrics::default(),
        }
    }
}

impl GridLayoutManager {
    pub fn new(limit: GridLimit, square_size: Size) -> Self {
        Self { limit, square_size, ..Default::default() }
    }

    /// Bound the grid to `count` columns.
    pub fn set_column_count(&mut self, count: usize) {
        self.limit = GridLimit::Columns(count);
    }

    /// Bound the grid to `count` rows.
    pub fn set_row_count(&mut self, count: usize) {
        self.limit = GridLimit::Rows(count);
    }

    pub fn with_anchor_point(mut self, anchor_point: DVec2) -> Self {
        self.anchor_point = anchor_point;
        self
    }

    pub fn with_grid_offset(mut self, grid_offset: DVec2) -> Self {
        self.grid_offset = grid_offset;
        self
    }

    pub fn with_square_anchor_point(mut self, square_anchor_point: DVec2) -> Self {
        self.square_anchor_point = square_anchor_point;
        self
    }

    pub fn with_fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    pub fn with_grid_border(mut self, grid_border: f64) -> Self {
        self.grid_border = grid_border;
        self
    }

    pub fn with_square_separator(mut self, square_separator: f64) -> Self {
        self.square_separator = square_separator;
        self
    }

    /// Columns used by the slots of the last layout.
    ///
    /// This can be less than the configured limit: three slots in a grid
    /// limited to five columns use three. The grid's size still spans the
    /// configured dimensions.
    pub fn column_count(&self) -> usize {
        self.last.used.0
    }

    /// Rows used by the slots of the last layout.
    pub fn row_count(&self) -> usize {
        self.last.used.1
    }

    /// Total size from the last layout, borders included.
    pub fn size(&self) -> Size {
        self.last.size
    }

    /// Slot count from the last layout.
    pub fn node_count(&self) -> usize {
        self.last.node_count
    }

    /// Column and row counts for `node_count` slots.
    pub fn dimensions(&self, node_count: usize) -> LayoutResult<(usize, usize)> {
        match self.limit {
            GridLimit::Columns(0) | GridLimit::Rows(0) => Err(LayoutError::MissingDimension),
            GridLimit::Columns(columns) => Ok((columns, node_count.div_ceil(columns))),
            GridLimit::Rows(rows) => Ok((node_count.div_ceil(rows), rows)),
        }
    }

    /// Columns and rows that hold at least one of `node_count` slots in a
    /// `columns` by `rows` grid, given the fill order.
    fn used_dimensions(&self, node_count: usize, columns: usize, rows: usize) -> (usize, usize) {
        if node_count == 0 {
            return (0, 0);
        }
        match self.fill_mode.primary_axis() {
            Axis::Horizontal => (columns.min(node_count), node_count.div_ceil(columns)),
            Axis::Vertical => (node_count.div_ceil(rows), rows.min(node_count)),
        }
    }

    fn extent(&self, count: usize, square: f64) -> f64 {
        2.0 * self.grid_border
            + count as f64 * square
            + count.saturating_sub(1) as f64 * self.square_separator
    }

    fn lower_left(&self, size: Size) -> DVec2 {
        self.grid_offset - self.anchor_point * size.to_vec()
    }

    /// Slot index of the square containing `location`, using the last layout.
    ///
    /// Returns `None` for points in the border, between squares, outside the
    /// grid, or in a square past the last slot.
    pub fn square_at_location(&self, location: DVec2) -> Option<usize> {
        let GridMetrics { columns, rows, node_count, size, .. } = self.last;
        if columns == 0 || rows == 0 {
            return None;
        }
        let lower_left = self.lower_left(size);
        let from_left = location.x - lower_left.x - self.grid_border;
        let from_top = lower_left.y + size.height - self.grid_border - location.y;

        let column = axis_cell(from_left, self.square_size.width, self.square_separator, columns)?;
        let row = axis_cell(from_top, self.square_size.height, self.square_separator, rows)?;
        let index = self.fill_mode.index_for_cell(column, row, columns, rows);
        (index < node_count).then_some(index)
    }
}

/// Cell along one axis containing `offset`, measured from the first cell's edge.
fn axis_cell(offset: f64, square: f64, separator: f64, count: usize) -> Option<usize> {
    let pitch = square + separator;
    if offset < 0.0 || pitch <= 0.0 {
        return None;
    }
    let cell = (offset / pitch).floor();
    if cell >= count as f64 || offset - cell * pitch > square {
        return None;
    }
    Some(cell as usize)
}

impl LayoutManager for GridLayoutManager {
    fn layout<N: LayoutNode>(&mut self, nodes: &mut [Option<N>]) -> LayoutResult<()> {
        let (columns, rows) = self.dimensions(nodes.len()).map_err(|e| {
            log::warn!("grid layout skipped: {e}");
            e
        })?;

        let Size { width, height } = self.square_size;
        let size = Size::new(self.extent(columns, width), self.extent(rows, height));
        let lower_left = self.lower_left(size);
        let pitch = DVec2::new(width, height) + self.square_separator;

        for (index, slot) in nodes.iter_mut().enumerate() {
            let Some(node) = slot else { continue };
            let (column, row) = self.fill_mode.cell_for_index(index, columns, rows);
            let from_bottom = (rows - 1 - row) as f64;
            let corner = lower_left
                + self.grid_border
                + DVec2::new(column as f64 * pitch.x, from_bottom * pitch.y);
            node.set_position(corner + self.square_anchor_point * DVec2::new(width, height));
        }

        let used = self.used_dimensions(nodes.len(), columns, rows);
        self.last = GridMetrics { columns, rows, used, node_count: nodes.len(), size };
        log::debug!("grid layout: {} slots in {columns}x{rows}, size {size:?}", nodes.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use vignette_core::LayoutItem;

    fn slots(count: usize) -> Vec<Option<LayoutItem>> {
        vec![Some(LayoutItem::generic()); count]
    }

    fn pos(nodes: &[Option<LayoutItem>], i: usize) -> DVec2 {
        nodes[i].expect("real node").position
    }

    #[test]
    fn test_right_then_down_placement() {
        let mut grid = GridLayoutManager::new(GridLimit::Columns(3), Size::new(10.0, 10.0))
            .with_anchor_point(DVec2::ZERO);
        let mut nodes = slots(7);
        grid.layout(&mut nodes).unwrap();

        assert_eq!((grid.column_count(), grid.row_count()), (3, 3));
        assert_eq!(grid.size(), Size::new(30.0, 30.0));
        // column 0 of rows 0, 1 and 2, counting down from the top
        assert_eq!(pos(&nodes, 0), DVec2::new(5.0, 25.0));
        assert_eq!(pos(&nodes, 3), DVec2::new(5.0, 15.0));
        assert_eq!(pos(&nodes, 6), DVec2::new(5.0, 5.0));
        assert_eq!(pos(&nodes, 2), DVec2::new(25.0, 25.0));
    }

    #[test]
    fn test_border_separator_and_anchor() {
        let mut grid = GridLayoutManager::new(GridLimit::Rows(2), Size::new(10.0, 20.0))
            .with_grid_border(2.0)
            .with_square_separator(1.0)
            .with_fill_mode(FillMode::DownThenRight)
            .with_square_anchor_point(DVec2::new(0.0, 1.0));
        let mut nodes = slots(3);
        grid.layout(&mut nodes).unwrap();

        assert_eq!((grid.column_count(), grid.row_count()), (2, 2));
        assert_eq!(grid.size(), Size::new(25.0, 45.0));
        let lower_left = DVec2::new(-12.5, -22.5);
        // slot 1 is column 0, bottom row; anchored at its square's top-left
        assert!((pos(&nodes, 1) - (lower_left + DVec2::new(2.0, 22.0))).length() < 1e-9);
        // slot 2 starts the second column at the top
        assert!((pos(&nodes, 2) - (lower_left + DVec2::new(13.0, 43.0))).length() < 1e-9);
    }

    #[test]
    fn test_missing_dimension_is_noop() {
        let mut grid = GridLayoutManager::default();
        let mut nodes = slots(2);
        nodes[0].as_mut().unwrap().position = DVec2::new(7.0, 7.0);
        assert_eq!(grid.layout(&mut nodes), Err(LayoutError::MissingDimension));
        assert_eq!(pos(&nodes, 0), DVec2::new(7.0, 7.0));
        assert_eq!(pos(&nodes, 1), DVec2::ZERO);
    }

    #[test]
    fn test_counts_report_what_the_slots_use() {
        let mut grid = GridLayoutManager::new(GridLimit::Columns(5), Size::new(10.0, 10.0));
        let mut nodes = slots(3);
        grid.layout(&mut nodes).unwrap();
        assert_eq!((grid.column_count(), grid.row_count()), (3, 1));
        // the grid keeps its configured width
        assert_eq!(grid.size(), Size::new(50.0, 10.0));

        // filling down first, a row limit of 4 with 5 slots uses both columns
        // but only as many rows as the first column needs
        grid.set_row_count(4);
        grid.fill_mode = FillMode::DownThenRight;
        let mut nodes = slots(5);
        grid.layout(&mut nodes).unwrap();
        assert_eq!((grid.column_count(), grid.row_count()), (2, 4));

        // filling across first, the same grid is two wide and three tall
        grid.fill_mode = FillMode::RightThenDown;
        grid.layout(&mut nodes).unwrap();
        assert_eq!((grid.column_count(), grid.row_count()), (2, 3));

        grid.layout(&mut Vec::<Option<LayoutItem>>::new()).unwrap();
        assert_eq!((grid.column_count(), grid.row_count()), (0, 0));
    }

    #[test]
    fn test_last_set_count_wins() {
        let mut grid = GridLayoutManager::default();
        grid.set_column_count(4);
        grid.set_row_count(2);
        assert_eq!(grid.dimensions(7), Ok((4, 2)));
        grid.set_column_count(5);
        assert_eq!(grid.dimensions(7), Ok((5, 2)));
    }

    #[test]
    fn test_placeholders_keep_their_square() {
        let mut grid = GridLayoutManager::new(GridLimit::Columns(2), Size::new(10.0, 10.0));
        let mut nodes = slots(3);
        nodes[1] = None;
        grid.layout(&mut nodes).unwrap();
        assert_eq!(pos(&nodes, 2), DVec2::new(-5.0, -5.0));
    }

    #[test]
    fn test_square_at_location_gaps() {
        let mut grid = GridLayoutManager::new(GridLimit::Columns(2), Size::new(10.0, 10.0))
            .with_anchor_point(DVec2::ZERO)
            .with_grid_border(3.0)
            .with_square_separator(2.0);
        let mut nodes = slots(3);
        grid.layout(&mut nodes).unwrap();

        assert_eq!(grid.square_at_location(DVec2::new(1.0, 10.0)), None); // border
        assert_eq!(grid.square_at_location(DVec2::new(14.0, 20.0)), None); // separator
        assert_eq!(grid.square_at_location(DVec2::new(5.0, 20.0)), Some(0));
        // last square of the bottom row has no slot
        assert_eq!(grid.square_at_location(DVec2::new(20.0, 8.0)), None);
        assert_eq!(grid.square_at_location(DVec2::new(100.0, 8.0)), None);
    }

    proptest! {
        #[test]
        fn prop_square_at_node_center_is_inverse(
            count in 1usize..40,
            limit in 1usize..7,
            by_rows in any::<bool>(),
            mode in 0usize..8,
            border in 0.0f64..5.0,
            separator in 0.0f64..5.0,
        ) {
            let limit = if by_rows { GridLimit::Rows(limit) } else { GridLimit::Columns(limit) };
            let mut grid = GridLayoutManager::new(limit, Size::new(12.0, 8.0))
                .with_fill_mode(FillMode::ALL[mode])
                .with_grid_border(border)
                .with_square_separator(separator);
            let mut nodes = slots(count);
            grid.layout(&mut nodes).unwrap();
            for k in 0..count {
                prop_assert_eq!(grid.square_at_location(pos(&nodes, k)), Some(k));
            }
        }

        #[test]
        fn prop_layout_is_idempotent(count in 0usize..30, columns in 1usize..6) {
            let mut grid = GridLayoutManager::new(GridLimit::Columns(columns), Size::new(7.0, 3.0))
                .with_square_separator(1.5);
            let mut nodes = slots(count);
            grid.layout(&mut nodes).unwrap();
            let first = nodes.clone();
            grid.layout(&mut nodes).unwrap();
            prop_assert_eq!(first, nodes);
        }
    }
}
