//! Wrap layout: fill lines greedily, then start a new one.

use glam::DVec2;
use vignette_core::{LayoutNode, LayoutResult, Size};

use crate::fill_mode::{Axis, FillMode};
use crate::manager::LayoutManager;

/// Placement of each line within the widest line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Justification {
    /// Against the edge where lines start.
    #[default]
    Near,
    Center,
    /// Against the edge where lines end.
    Far,
}

/// Lays out slots along lines no longer than `maximum_length`, wrapping as needed.
///
/// The fill mode picks the line direction and the direction in which new
/// lines are added. Line length counts the border at both ends and the
/// separators between cells; a node too long for any line sits alone on
/// its own line. Lines are `line_separator` apart.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WrapLayoutManager {
    pub fill_mode: FillMode,
    pub maximum_length: f64,
    pub justification: Justification,
    /// Distance between adjacent lines
    pub line_separator: f64,
    /// Point of the layout placed at `wrap_position`, in unit coordinates
    pub anchor_point: DVec2,
    pub wrap_position: DVec2,
    /// Where a node sits along its cell
    pub cell_anchor_point: f64,
    /// Space at both ends of every line
    pub wrap_border: f64,
    pub cell_separator: f64,

    #[cfg_attr(feature = "serde", serde(skip))]
    last: WrapMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct WrapMetrics {
    size: Size,
    line_count: usize,
}

impl Default for WrapLayoutManager {
    fn default() -> Self {
        Self {
            fill_mode: FillMode::default(),
            maximum_length: 0.0,
            justification: Justification::default(),
            line_separator: 0.0,
            anchor_point: DVec2::splat(0.5),
            wrap_position: DVec2::ZERO,
            cell_anchor_point: 0.5,
            wrap_border: 0.0,
            cell_separator: 0.0,
            last: WrapMetrics::default(),
        }
    }
}

/// A run of consecutive slots on one line.
#[derive(Debug, Clone, Copy)]
struct Line {
    first: usize,
    end: usize,
    length: f64,
    /// Slots with non-zero length
    cells: usize,
}

impl WrapLayoutManager {
    pub fn new(fill_mode: FillMode, maximum_length: f64) -> Self {
        Self { fill_mode, maximum_length, ..Default::default() }
    }

    pub fn with_justification(mut self, justification: Justification) -> Self {
        self.justification = justification;
        self
    }

    pub fn with_line_separator(mut self, line_separator: f64) -> Self {
        self.line_separator = line_separator;
        self
    }

    pub fn with_anchor_point(mut self, anchor_point: DVec2) -> Self {
        self.anchor_point = anchor_point;
        self
    }

    pub fn with_wrap_position(mut self, wrap_position: DVec2) -> Self {
        self.wrap_position = wrap_position;
        self
    }

    pub fn with_cell_anchor_point(mut self, cell_anchor_point: f64) -> Self {
        self.cell_anchor_point = cell_anchor_point;
        self
    }

    pub fn with_wrap_border(mut self, wrap_border: f64) -> Self {
        self.wrap_border = wrap_border;
        self
    }

    pub fn with_cell_separator(mut self, cell_separator: f64) -> Self {
        self.cell_separator = cell_separator;
        self
    }

    /// Total size from the last layout.
    pub fn size(&self) -> Size {
        self.last.size
    }

    /// Line count from the last layout.
    pub fn line_count(&self) -> usize {
        self.last.line_count
    }

    /// Greedy line breaks. Zero-length slots take no space and never start a
    /// line; separators only sit between slots with length.
    fn break_lines(&self, lengths: &[f64]) -> Vec<Line> {
        let mut lines: Vec<Line> = Vec::new();
        for (index, &length) in lengths.iter().enumerate() {
            let empty = length <= 0.0;
            match lines.last_mut() {
                Some(line) if empty => line.end = index + 1,
                Some(line) if line.cells == 0 => {
                    line.length += length;
                    line.end = index + 1;
                    line.cells = 1;
                }
                Some(line) if line.length + self.cell_separator + length <= self.maximum_length => {
                    line.length += self.cell_separator + length;
                    line.end = index + 1;
                    line.cells += 1;
                }
                _ => lines.push(Line {
                    first: index,
                    end: index + 1,
                    length: 2.0 * self.wrap_border + length.max(0.0),
                    cells: usize::from(!empty),
                }),
            }
        }
        lines
    }
}

impl LayoutManager for WrapLayoutManager {
    fn layout<N: LayoutNode>(&mut self, nodes: &mut [Option<N>]) -> LayoutResult<()> {
        let mode = self.fill_mode;
        let horizontal = mode.primary_axis() == Axis::Horizontal;
        let lengths: Vec<f64> = nodes
            .iter()
            .map(|slot| {
                slot.as_ref().map_or(0.0, |node| if horizontal { node.width() } else { node.height() })
            })
            .collect();
        let lines = self.break_lines(&lengths);

        let primary = lines.iter().fold(0.0_f64, |longest, line| longest.max(line.length));
        let secondary = lines.len().saturating_sub(1) as f64 * self.line_separator;
        let size = if horizontal { Size::new(primary, secondary) } else { Size::new(secondary, primary) };
        let lower_left = self.wrap_position - self.anchor_point * size.to_vec();
        let (primary_low, secondary_low) =
            if horizontal { (lower_left.x, lower_left.y) } else { (lower_left.y, lower_left.x) };

        let primary_sign = mode.primary_sign();
        let secondary_sign = mode.secondary_sign();
        let primary_origin = if primary_sign > 0.0 { primary_low } else { primary_low + primary };
        let secondary_origin = if secondary_sign > 0.0 { secondary_low } else { secondary_low + secondary };

        for (line_index, line) in lines.iter().enumerate() {
            let justify = match self.justification {
                Justification::Near => 0.0,
                Justification::Center => (primary - line.length) / 2.0,
                Justification::Far => primary - line.length,
            };
            let line_coord = secondary_origin + secondary_sign * line_index as f64 * self.line_separator;
            let mut cursor = justify + self.wrap_border;
            let mut placed = false;
            for index in line.first..line.end {
                let length = lengths[index].max(0.0);
                if length > 0.0 {
                    if placed {
                        cursor += self.cell_separator;
                    }
                    placed = true;
                }
                let cell_near = primary_origin + primary_sign * cursor;
                let cell_low = if primary_sign > 0.0 { cell_near } else { cell_near - length };
                cursor += length;

                let Some(node) = nodes[index].as_mut() else { continue };
                let along = cell_low + self.cell_anchor_point * length;
                node.set_position(if horizontal {
                    DVec2::new(along, line_coord)
                } else {
                    DVec2::new(line_coord, along)
                });
            }
        }

        log::debug!("wrap layout: {} slots on {} lines, size {size:?}", nodes.len(), lines.len());
        self.last = WrapMetrics { size, line_count: lines.len() };
        Ok(())
    }
}
