//! Outline layout: a vertical list of indented lines.

use glam::DVec2;
use vignette_core::{repeat_last, LayoutError, LayoutNode, LayoutResult, EPSILON};

use crate::manager::LayoutManager;

/// Lays out slots as lines of an outline, top to bottom.
///
/// Each line has a level. Every per-level list repeats its last value.
/// Indents are cumulative: a line at level 2 is indented by
/// `indent(0) + indent(1) + indent(2)`. Only as many slots as there are
/// entries in `node_levels` are laid out.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OutlineLayoutManager {
    /// Point of the outline's height placed at the position: 0 is the bottom
    pub anchor_point_y: f64,
    pub outline_position: DVec2,
    pub node_levels: Vec<usize>,
    /// Indent added at each level; must not be empty
    pub level_indents: Vec<f64>,
    /// Line height per level; zero or less fits the node
    pub level_line_heights: Vec<f64>,
    pub level_anchor_point_ys: Vec<f64>,
    /// Y offset added to label nodes, per level
    pub level_label_offset_ys: Vec<f64>,
    /// Space above a line, per level; ignored for the first line
    pub level_line_before_separators: Vec<f64>,
    /// Space below a line, per level; ignored for the last line
    pub level_line_after_separators: Vec<f64>,

    #[cfg_attr(feature = "serde", serde(skip))]
    last_height: f64,
}

impl Default for OutlineLayoutManager {
    fn default() -> Self {
        Self {
            anchor_point_y: 0.5,
            outline_position: DVec2::ZERO,
            node_levels: Vec::new(),
            level_indents: Vec::new(),
            level_line_heights: Vec::new(),
            level_anchor_point_ys: Vec::new(),
            level_label_offset_ys: Vec::new(),
            level_line_before_separators: Vec::new(),
            level_line_after_separators: Vec::new(),
            last_height: 0.0,
        }
    }
}

impl OutlineLayoutManager {
    pub fn new(node_levels: Vec<usize>, level_indents: Vec<f64>) -> Self {
        Self { node_levels, level_indents, ..Default::default() }
    }

    pub fn with_anchor_point_y(mut self, anchor_point_y: f64) -> Self {
        self.anchor_point_y = anchor_point_y;
        self
    }

    pub fn with_outline_position(mut self, outline_position: DVec2) -> Self {
        self.outline_position = outline_position;
        self
    }

    pub fn with_level_line_heights(mut self, level_line_heights: Vec<f64>) -> Self {
        self.level_line_heights = level_line_heights;
        self
    }

    pub fn with_level_anchor_point_ys(mut self, level_anchor_point_ys: Vec<f64>) -> Self {
        self.level_anchor_point_ys = level_anchor_point_ys;
        self
    }

    pub fn with_level_label_offset_ys(mut self, level_label_offset_ys: Vec<f64>) -> Self {
        self.level_label_offset_ys = level_label_offset_ys;
        self
    }

    pub fn with_level_line_separators(mut self, before: Vec<f64>, after: Vec<f64>) -> Self {
        self.level_line_before_separators = before;
        self.level_line_after_separators = after;
        self
    }

    /// Total height from the last layout.
    pub fn height(&self) -> f64 {
        self.last_height
    }

    /// Cumulative indent of `level`.
    pub fn indent_for_level(&self, level: usize) -> f64 {
        (0..=level).map(|l| repeat_last(&self.level_indents, l, 0.0)).sum()
    }

    /// Index of the line containing `y`, using this outline's configuration.
    pub fn line_at<N: LayoutNode>(&self, nodes: &[Option<N>], y: f64) -> Option<usize> {
        line_containing_point_y(
            nodes,
            y,
            &self.node_levels,
            &self.level_line_heights,
            &self.level_anchor_point_ys,
            &self.level_label_offset_ys,
        )
    }
}

/// Height of a line at `level` holding `node`.
fn line_height<N: LayoutNode>(line_heights: &[f64], level: usize, node: Option<&N>) -> f64 {
    let configured = repeat_last(line_heights, level, 0.0);
    if configured > EPSILON {
        configured
    } else {
        node.map_or(0.0, |n| n.height())
    }
}

impl LayoutManager for OutlineLayoutManager {
    fn layout<N: LayoutNode>(&mut self, nodes: &mut [Option<N>]) -> LayoutResult<()> {
        if self.level_indents.is_empty() {
            let error = LayoutError::EmptyParameter { name: "level_indents" };
            log::warn!("outline layout skipped: {error}");
            return Err(error);
        }

        let count = nodes.len().min(self.node_levels.len());
        let levels = &self.node_levels[..count];
        let heights: Vec<f64> = levels
            .iter()
            .zip(nodes.iter())
            .map(|(&level, slot)| line_height(&self.level_line_heights, level, slot.as_ref()))
            .collect();
        // gap above each line
        let gaps: Vec<f64> = (0..count)
            .map(|i| {
                if i == 0 {
                    return 0.0;
                }
                repeat_last(&self.level_line_after_separators, levels[i - 1], 0.0)
                    + repeat_last(&self.level_line_before_separators, levels[i], 0.0)
            })
            .collect();

        let height: f64 = heights.iter().sum::<f64>() + gaps.iter().sum::<f64>();
        let mut line_top = self.outline_position.y + (1.0 - self.anchor_point_y) * height;

        for (i, slot) in nodes.iter_mut().take(count).enumerate() {
            let level = levels[i];
            line_top -= gaps[i];
            let bottom = line_top - heights[i];
            line_top = bottom;
            let Some(node) = slot else { continue };

            let anchor_y = repeat_last(&self.level_anchor_point_ys, level, 0.5);
            let mut y = bottom + anchor_y * heights[i];
            if node.is_label() {
                y += repeat_last(&self.level_label_offset_ys, level, 0.0);
            }
            node.set_position(DVec2::new(self.outline_position.x + self.indent_for_level(level), y));
        }

        log::debug!("outline layout: {count} of {} slots, height {height}", nodes.len());
        self.last_height = height;
        Ok(())
    }
}

/// Index of the outline line containing `y`.
///
/// Reconstructs each line from its node's position and the per-level
/// parameters, then binary searches assuming lines run downward in slot
/// order. Placeholders and separator space belong to no line.
pub fn line_containing_point_y<N: LayoutNode>(
    nodes: &[Option<N>],
    y: f64,
    node_levels: &[usize],
    level_line_heights: &[f64],
    level_anchor_point_ys: &[f64],
    level_label_offset_ys: &[f64],
) -> Option<usize> {
    let count = nodes.len().min(node_levels.len());
    let real: Vec<usize> = (0..count).filter(|&i| nodes[i].is_some()).collect();

    let span = |index: usize| -> Option<(f64, f64)> {
        let node = nodes[index].as_ref()?;
        let level = node_levels[index];
        let height = line_height(level_line_heights, level, Some(node));
        let mut node_y = node.position().y;
        if node.is_label() {
            node_y -= repeat_last(level_label_offset_ys, level, 0.0);
        }
        let bottom = node_y - repeat_last(level_anchor_point_ys, level, 0.5) * height;
        Some((bottom, bottom + height))
    };

    let (mut lo, mut hi) = (0, real.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let (bottom, top) = span(real[mid])?;
        if y > top {
            hi = mid;
        } else if y < bottom {
            lo = mid + 1;
        } else {
            return Some(real[mid]);
        }
    }
    None
}
