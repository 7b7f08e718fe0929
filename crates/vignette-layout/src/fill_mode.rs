//! Fill order for grid and wrap layouts.

/// Order in which slots fill a two-dimensional arrangement.
///
/// The first direction is the primary one: slots advance that way until a
/// line is full, then the next line starts in the second direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FillMode {
    #[default]
    RightThenDown,
    RightThenUp,
    LeftThenDown,
    LeftThenUp,
    DownThenRight,
    DownThenLeft,
    UpThenRight,
    UpThenLeft,
}

/// Axis along which lines run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl FillMode {
    pub const ALL: [FillMode; 8] = [
        FillMode::RightThenDown,
        FillMode::RightThenUp,
        FillMode::LeftThenDown,
        FillMode::LeftThenUp,
        FillMode::DownThenRight,
        FillMode::DownThenLeft,
        FillMode::UpThenRight,
        FillMode::UpThenLeft,
    ];

    /// Axis of the primary direction.
    pub fn primary_axis(self) -> Axis {
        match self {
            FillMode::RightThenDown
            | FillMode::RightThenUp
            | FillMode::LeftThenDown
            | FillMode::LeftThenUp => Axis::Horizontal,
            _ => Axis::Vertical,
        }
    }

    /// Sign of the primary direction in scene coordinates (Y up).
    pub fn primary_sign(self) -> f64 {
        match self {
            FillMode::RightThenDown | FillMode::RightThenUp => 1.0,
            FillMode::LeftThenDown | FillMode::LeftThenUp => -1.0,
            FillMode::UpThenRight | FillMode::UpThenLeft => 1.0,
            FillMode::DownThenRight | FillMode::DownThenLeft => -1.0,
        }
    }

    /// Sign of the secondary direction in scene coordinates (Y up).
    pub fn secondary_sign(self) -> f64 {
        match self {
            FillMode::RightThenUp | FillMode::LeftThenUp => 1.0,
            FillMode::RightThenDown | FillMode::LeftThenDown => -1.0,
            FillMode::DownThenRight | FillMode::UpThenRight => 1.0,
            FillMode::DownThenLeft | FillMode::UpThenLeft => -1.0,
        }
    }

    /// Grid cell `(column, row)` of slot `index`. Rows count from the top.
    pub fn cell_for_index(self, index: usize, columns: usize, rows: usize) -> (usize, usize) {
        let flip_col = |c: usize| columns - 1 - c;
        let flip_row = |r: usize| rows - 1 - r;
        match self {
            FillMode::RightThenDown => (index % columns, index / columns),
            FillMode::RightThenUp => (index % columns, flip_row(index / columns)),
            FillMode::LeftThenDown => (flip_col(index % columns), index / columns),
            FillMode::LeftThenUp => (flip_col(index % columns), flip_row(index / columns)),
            FillMode::DownThenRight => (index / rows, index % rows),
            FillMode::DownThenLeft => (flip_col(index / rows), index % rows),
            FillMode::UpThenRight => (index / rows, flip_row(index % rows)),
            FillMode::UpThenLeft => (flip_col(index / rows), flip_row(index % rows)),
        }
    }

    /// Inverse of [`cell_for_index`](Self::cell_for_index).
    pub fn index_for_cell(self, column: usize, row: usize, columns: usize, rows: usize) -> usize {
        let flip_col = columns - 1 - column;
        let flip_row = rows - 1 - row;
        match self {
            FillMode::RightThenDown => row * columns + column,
            FillMode::RightThenUp => flip_row * columns + column,
            FillMode::LeftThenDown => row * columns + flip_col,
            FillMode::LeftThenUp => flip_row * columns + flip_col,
            FillMode::DownThenRight => column * rows + row,
            FillMode::DownThenLeft => flip_col * rows + row,
            FillMode::UpThenRight => column * rows + flip_row,
            FillMode::UpThenLeft => flip_col * rows + flip_row,
        }
    }
}
