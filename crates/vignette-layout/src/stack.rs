//! Stack layout: a single line of individually sized cells.

use glam::DVec2;
use vignette_core::{repeat_last, LayoutNode, LayoutResult, EPSILON};

use crate::fill::{cell_offsets, resolve_lengths};
use crate::manager::LayoutManager;

/// Direction in which a stack grows from its first cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StackDirection {
    #[default]
    Right,
    Left,
    Up,
    Down,
}

impl StackDirection {
    pub fn is_horizontal(self) -> bool {
        matches!(self, StackDirection::Right | StackDirection::Left)
    }

    /// Whether cell positions decrease with index.
    pub fn is_reversed(self) -> bool {
        matches!(self, StackDirection::Left | StackDirection::Down)
    }

    fn along(self, v: DVec2) -> f64 {
        if self.is_horizontal() { v.x } else { v.y }
    }
}

/// Lays out slots in a straight line, one cell per slot.
///
/// Cell lengths use the fixed/fit/fill scheme against `constrained_length`.
/// Nodes sit on the stack position in the other dimension; label nodes are
/// shifted vertically by `cell_label_offset_y`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StackLayoutManager {
    pub direction: StackDirection,
    /// Point along the stack placed at `stack_position`: 0 is the left (or bottom) end
    pub anchor_point: f64,
    pub stack_position: DVec2,
    /// Length that fill cells share out
    pub constrained_length: f64,
    pub cell_lengths: Vec<f64>,
    /// Where a node sits along its cell, per cell
    pub cell_anchor_points: Vec<f64>,
    pub cell_label_offset_y: f64,
    pub stack_border: f64,
    pub cell_separator: f64,

    #[cfg_attr(feature = "serde", serde(skip))]
    last: StackMetrics,
}

#[derive(Debug, Clone, PartialEq, Default)]
struct StackMetrics {
    length: f64,
    cell_lengths: Vec<f64>,
}

impl Default for StackLayoutManager {
    fn default() -> Self {
        Self {
            direction: StackDirection::default(),
            anchor_point: 0.5,
            stack_position: DVec2::ZERO,
            constrained_length: 0.0,
            cell_lengths: Vec::new(),
            cell_anchor_points: Vec::new(),
            cell_label_offset_y: 0.0,
            stack_border: 0.0,
            cell_separator: 0.0,
            last: StackMetrics::default(),
        }
    }
}

impl StackLayoutManager {
    pub fn new(direction: StackDirection) -> Self {
        Self { direction, ..Default::default() }
    }

    pub fn with_anchor_point(mut self, anchor_point: f64) -> Self {
        self.anchor_point = anchor_point;
        self
    }

    pub fn with_stack_position(mut self, stack_position: DVec2) -> Self {
        self.stack_position = stack_position;
        self
    }

    pub fn with_constrained_length(mut self, constrained_length: f64) -> Self {
        self.constrained_length = constrained_length;
        self
    }

    pub fn with_cell_lengths(mut self, cell_lengths: Vec<f64>) -> Self {
        self.cell_lengths = cell_lengths;
        self
    }

    pub fn with_cell_anchor_points(mut self, cell_anchor_points: Vec<f64>) -> Self {
        self.cell_anchor_points = cell_anchor_points;
        self
    }

    pub fn with_cell_label_offset_y(mut self, cell_label_offset_y: f64) -> Self {
        self.cell_label_offset_y = cell_label_offset_y;
        self
    }

    pub fn with_stack_border(mut self, stack_border: f64) -> Self {
        self.stack_border = stack_border;
        self
    }

    pub fn with_cell_separator(mut self, cell_separator: f64) -> Self {
        self.cell_separator = cell_separator;
        self
    }

    /// Total length from the last layout, borders included.
    pub fn length(&self) -> f64 {
        self.last.length
    }

    /// Resolved cell lengths from the last layout.
    pub fn cell_lengths_resolved(&self) -> &[f64] {
        &self.last.cell_lengths
    }

    /// Index of the cell containing `point`, using this stack's configuration
    /// and the cell lengths from its last layout.
    pub fn cell_at<N: LayoutNode>(&self, nodes: &[Option<N>], point: DVec2) -> Option<usize> {
        cell_containing_point(
            nodes,
            point,
            self.direction,
            &self.last.cell_lengths,
            &self.cell_anchor_points,
            self.cell_label_offset_y,
        )
    }
}

impl LayoutManager for StackLayoutManager {
    fn layout<N: LayoutNode>(&mut self, nodes: &mut [Option<N>]) -> LayoutResult<()> {
        let direction = self.direction;
        let fit_lengths: Vec<f64> = nodes
            .iter()
            .map(|slot| slot.as_ref().map_or(0.0, |node| direction.along(node.size().to_vec())))
            .collect();
        let resolved = resolve_lengths(
            &self.cell_lengths,
            &fit_lengths,
            self.constrained_length,
            self.stack_border,
            self.cell_separator,
            EPSILON,
        );

        let start = direction.along(self.stack_position) - self.anchor_point * resolved.total;
        let end = start + resolved.total;
        let offsets = cell_offsets(&resolved.lengths, self.stack_border, self.cell_separator);

        for (index, slot) in nodes.iter_mut().enumerate() {
            let Some(node) = slot else { continue };
            let length = resolved.lengths[index];
            let cell_start = if direction.is_reversed() {
                end - offsets[index] - length
            } else {
                start + offsets[index]
            };
            let along = cell_start + repeat_last(&self.cell_anchor_points, index, 0.5) * length;
            let mut position = if direction.is_horizontal() {
                DVec2::new(along, self.stack_position.y)
            } else {
                DVec2::new(self.stack_position.x, along)
            };
            if node.is_label() {
                position.y += self.cell_label_offset_y;
            }
            node.set_position(position);
        }

        log::debug!("stack layout: {} slots {direction:?}, length {}", nodes.len(), resolved.total);
        self.last = StackMetrics { length: resolved.total, cell_lengths: resolved.lengths };
        Ok(())
    }
}

/// Index of the stack cell containing `point`.
///
/// Reconstructs each cell from its node's position and the given resolved
/// `cell_lengths` and `cell_anchor_points` (both repeat their last value),
/// then binary searches along the stack direction. Nodes must be positioned
/// in stack order, as by a stack layout. Placeholders and separators belong
/// to no cell.
pub fn cell_containing_point<N: LayoutNode>(
    nodes: &[Option<N>],
    point: DVec2,
    direction: StackDirection,
    cell_lengths: &[f64],
    cell_anchor_points: &[f64],
    cell_label_offset_y: f64,
) -> Option<usize> {
    let target = direction.along(point);
    let real: Vec<usize> = (0..nodes.len()).filter(|&i| nodes[i].is_some()).collect();

    let span = |index: usize| -> Option<(f64, f64)> {
        let node = nodes[index].as_ref()?;
        let mut position = node.position();
        if node.is_label() {
            position.y -= cell_label_offset_y;
        }
        let length = repeat_last(cell_lengths, index, 0.0);
        let low = direction.along(position) - repeat_last(cell_anchor_points, index, 0.5) * length;
        Some((low, low + length))
    };

    let (mut lo, mut hi) = (0, real.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let index = real[mid];
        let (low, high) = span(index)?;
        let before = if direction.is_reversed() { target > high } else { target < low };
        let after = if direction.is_reversed() { target < low } else { target > high };
        if before {
            hi = mid;
        } else if after {
            lo = mid + 1;
        } else {
            return Some(index);
        }
    }
    None
}
