//! Ring layout: nodes at angular positions around a centre.

use std::f64::consts::TAU;

use glam::DVec2;
use vignette_core::{repeat_last, LayoutError, LayoutNode, LayoutResult};

use crate::manager::LayoutManager;

/// How the angle of each slot is chosen.
///
/// Angles are radians, 0 pointing right, increasing counter-clockwise.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "snake_case"))]
pub enum RingThetas {
    /// Not configured; layout fails.
    #[default]
    Unset,
    /// One angle per slot. Slots beyond the list are not laid out.
    Explicit { thetas: Vec<f64> },
    /// Evenly spread around the full ring, starting at `initial`.
    Spread { initial: f64 },
    /// Starting at `initial`, each slot `increment` further on.
    Incremental { initial: f64, increment: f64 },
    /// `increment` apart, clustered symmetrically around `center`.
    Centered { center: f64, increment: f64 },
}

impl RingThetas {
    /// Angles for `node_count` slots; may be shorter than `node_count`.
    pub fn resolve(&self, node_count: usize) -> LayoutResult<Vec<f64>> {
        let incremental = |initial: f64, increment: f64| -> Vec<f64> {
            (0..node_count).map(|i| initial + i as f64 * increment).collect()
        };
        match *self {
            RingThetas::Unset => Err(LayoutError::EmptyParameter { name: "thetas" }),
            RingThetas::Explicit { ref thetas } if thetas.is_empty() => {
                Err(LayoutError::EmptyParameter { name: "thetas" })
            }
            RingThetas::Explicit { ref thetas } => Ok(thetas.iter().copied().take(node_count).collect()),
            RingThetas::Spread { initial } => {
                let increment = if node_count == 0 { 0.0 } else { TAU / node_count as f64 };
                Ok(incremental(initial, increment))
            }
            RingThetas::Incremental { initial, increment } => Ok(incremental(initial, increment)),
            RingThetas::Centered { center, increment } => {
                let initial = center - increment * node_count.saturating_sub(1) as f64 / 2.0;
                Ok(incremental(initial, increment))
            }
        }
    }
}

/// Lays out slots on a ring around `ring_position`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RingLayoutManager {
    /// Centre of the ring
    pub ring_position: DVec2,
    /// Radius per slot, last value repeating; must not be empty
    pub radii: Vec<f64>,
    pub thetas: RingThetas,

    #[cfg_attr(feature = "serde", serde(skip))]
    last_thetas: Vec<f64>,
}

impl RingLayoutManager {
    pub fn new(radii: Vec<f64>, thetas: RingThetas) -> Self {
        Self { radii, thetas, ..Default::default() }
    }

    pub fn with_ring_position(mut self, ring_position: DVec2) -> Self {
        self.ring_position = ring_position;
        self
    }

    pub fn set_thetas(&mut self, thetas: Vec<f64>) {
        self.thetas = RingThetas::Explicit { thetas };
    }

    pub fn set_thetas_with_initial_theta(&mut self, initial: f64) {
        self.thetas = RingThetas::Spread { initial };
    }

    pub fn set_thetas_with_increment(&mut self, initial: f64, increment: f64) {
        self.thetas = RingThetas::Incremental { initial, increment };
    }

    pub fn set_thetas_with_center(&mut self, center: f64, increment: f64) {
        self.thetas = RingThetas::Centered { center, increment };
    }

    /// Angles used by the last layout, one per laid-out slot.
    pub fn thetas(&self) -> &[f64] {
        &self.last_thetas
    }

    /// Lay out and return the angle of each laid-out slot.
    pub fn layout_with_thetas<N: LayoutNode>(&mut self, nodes: &mut [Option<N>]) -> LayoutResult<Vec<f64>> {
        self.layout(nodes)?;
        Ok(self.last_thetas.clone())
    }
}

impl LayoutManager for RingLayoutManager {
    fn layout<N: LayoutNode>(&mut self, nodes: &mut [Option<N>]) -> LayoutResult<()> {
        let resolved = if self.radii.is_empty() {
            Err(LayoutError::EmptyParameter { name: "radii" })
        } else {
            self.thetas.resolve(nodes.len())
        };
        let thetas = match resolved {
            Ok(thetas) => thetas,
            Err(e) => {
                log::warn!("ring layout skipped: {e}");
                return Err(e);
            }
        };

        for (index, (slot, &theta)) in nodes.iter_mut().zip(thetas.iter()).enumerate() {
            let Some(node) = slot else { continue };
            let radius = repeat_last(&self.radii, index, 0.0);
            let (sin, cos) = theta.sin_cos();
            node.set_position(self.ring_position + radius * DVec2::new(cos, sin));
        }

        log::debug!("ring layout: {} of {} slots", thetas.len(), nodes.len());
        self.last_thetas = thetas;
        Ok(())
    }
}
