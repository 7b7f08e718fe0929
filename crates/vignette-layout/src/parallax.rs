//! Parallax layout: per-node speeds scaling a shared offset.
//!
//! Speeds come from a simple viewing model:
//!
//! ```text
//!   \-------/  world plane
//!    \     /
//!     \---/    image plane
//!      \ /
//!      <o>     eye
//! ```
//!
//! A node's speed is the ratio of the eye-to-image-plane distance to the
//! eye-to-world-plane distance. Speed 1 is on the image plane, below 1 is
//! farther away, above 1 passes between the eye and the image plane. Because
//! speeds are plain ratios they also work as scale factors for distant nodes.

use std::f64::consts::PI;

use glam::DVec2;
use vignette_core::{repeat_last, LayoutError, LayoutNode, LayoutResult, EPSILON};

use crate::manager::LayoutManager;

/// Offsets each node from `parallax_position` by `offset` times its speed.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParallaxLayoutManager {
    pub parallax_position: DVec2,
    pub offset: DVec2,
    /// Speed per node, last value repeating; empty means 1 for every node
    pub speeds: Vec<f64>,
}

impl ParallaxLayoutManager {
    pub fn new(speeds: Vec<f64>) -> Self {
        Self { speeds, ..Default::default() }
    }

    pub fn with_parallax_position(mut self, parallax_position: DVec2) -> Self {
        self.parallax_position = parallax_position;
        self
    }

    pub fn with_offset(mut self, offset: DVec2) -> Self {
        self.offset = offset;
        self
    }

    /// Speed used for the node at `index`.
    pub fn speed_at(&self, index: usize) -> f64 {
        repeat_last(&self.speeds, index, 1.0)
    }

    /// Speeds from distances behind the image plane, in units of the
    /// eye-to-image-plane distance. Negative distances are in front.
    pub fn set_speeds_with_normal_distances(&mut self, distances: &[f64]) {
        self.speeds = distances.iter().map(|d| 1.0 / (1.0 + d)).collect();
    }

    /// Speeds from the eye-to-image-plane distance and each layer's distance
    /// behind the image plane, in any shared unit.
    pub fn set_speeds_with_viewing_distance(&mut self, viewing_distance: f64, distances: &[f64]) {
        self.speeds = distances.iter().map(|d| viewing_distance / (viewing_distance + d)).collect();
    }

    /// Speeds from a field of view across an image plane of the given size.
    ///
    /// The field of view and the size must measure the same dimension.
    pub fn set_speeds_with_field_of_view(
        &mut self,
        field_of_view: f64,
        image_plane_size: f64,
        distances: &[f64],
    ) -> LayoutResult<()> {
        if !(field_of_view > 0.0 && field_of_view < PI) {
            return Err(LayoutError::InvalidParameter {
                name: "field_of_view",
                reason: format!("{field_of_view} is not between 0 and pi"),
            });
        }
        let viewing_distance = (image_plane_size / 2.0) / (field_of_view / 2.0).tan();
        self.set_speeds_with_viewing_distance(viewing_distance, distances);
        Ok(())
    }

    /// Speeds for panning a viewport edge to edge across layers of the given
    /// sizes while the offset moves through `panning_range`.
    ///
    /// A layer the size of the viewport stays put; a smaller one moves backwards.
    pub fn set_speeds_for_panning(
        &mut self,
        viewport_size: f64,
        panning_range: f64,
        layer_sizes: &[f64],
    ) -> LayoutResult<()> {
        check_panning_range(panning_range)?;
        self.speeds = layer_sizes.iter().map(|size| (size - viewport_size) / panning_range).collect();
        Ok(())
    }

    /// Like [`set_speeds_for_panning`](Self::set_speeds_for_panning) with layer
    /// sizes interpolated linearly from `first_layer_size` to `last_layer_size`.
    pub fn set_speeds_for_panning_interpolated(
        &mut self,
        viewport_size: f64,
        panning_range: f64,
        layer_count: usize,
        first_layer_size: f64,
        last_layer_size: f64,
    ) -> LayoutResult<()> {
        if layer_count == 0 {
            return Err(LayoutError::InvalidParameter {
                name: "layer_count",
                reason: "at least one layer is needed".to_string(),
            });
        }
        let step = if layer_count > 1 {
            (last_layer_size - first_layer_size) / (layer_count - 1) as f64
        } else {
            0.0
        };
        let sizes: Vec<f64> = (0..layer_count).map(|i| first_layer_size + step * i as f64).collect();
        self.set_speeds_for_panning(viewport_size, panning_range, &sizes)
    }
}

fn check_panning_range(panning_range: f64) -> LayoutResult<()> {
    if panning_range.abs() <= EPSILON {
        return Err(LayoutError::InvalidParameter {
            name: "panning_range",
            reason: "must not be zero".to_string(),
        });
    }
    Ok(())
}

impl LayoutManager for ParallaxLayoutManager {
    fn layout<N: LayoutNode>(&mut self, nodes: &mut [Option<N>]) -> LayoutResult<()> {
        for (index, slot) in nodes.iter_mut().enumerate() {
            let Some(node) = slot else { continue };
            node.set_position(self.parallax_position + self.offset * self.speed_at(index));
        }
        log::trace!("parallax layout: {} slots at offset {}", nodes.len(), self.offset);
        Ok(())
    }
}
