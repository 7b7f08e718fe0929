//! The node capability actions animate.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Node properties that actions read and write.
///
/// Only position is required; the other properties default to an identity
/// value and ignore writes.
pub trait ActionNode {
    fn position(&self) -> DVec2;

    fn set_position(&mut self, position: DVec2);

    fn alpha(&self) -> f64 {
        1.0
    }

    fn set_alpha(&mut self, _alpha: f64) {}

    fn scale(&self) -> DVec2 {
        DVec2::ONE
    }

    fn set_scale(&mut self, _scale: DVec2) {}

    /// Rotation in radians, counter-clockwise.
    fn rotation(&self) -> f64 {
        0.0
    }

    fn set_rotation(&mut self, _rotation: f64) {}

    /// Drawing order; higher is in front.
    fn z_position(&self) -> f64 {
        0.0
    }

    fn set_z_position(&mut self, _z_position: f64) {}

    /// Detach the node from its parent. What that means is up to the host.
    fn remove_from_parent(&mut self) {}

    /// Multiplier the runner applies to incremental time; 0 pauses.
    fn speed(&self) -> f64 {
        1.0
    }
}

/// Plain node state, usable as a stand-in node or to model animation without one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeState {
    pub position: DVec2,
    pub alpha: f64,
    pub scale: DVec2,
    pub rotation: f64,
    pub z_position: f64,
    pub speed: f64,
    /// Set once a remove-from-parent action has run
    pub removed: bool,
}

impl Default for NodeState {
    fn default() -> Self {
        Self {
            position: DVec2::ZERO,
            alpha: 1.0,
            scale: DVec2::ONE,
            rotation: 0.0,
            z_position: 0.0,
            speed: 1.0,
            removed: false,
        }
    }
}

impl NodeState {
    pub fn at(position: DVec2) -> Self {
        Self { position, ..Default::default() }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }
}

impl ActionNode for NodeState {
    fn position(&self) -> DVec2 {
        self.position
    }

    fn set_position(&mut self, position: DVec2) {
        self.position = position;
    }

    fn alpha(&self) -> f64 {
        self.alpha
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    fn scale(&self) -> DVec2 {
        self.scale
    }

    fn set_scale(&mut self, scale: DVec2) {
        self.scale = scale;
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
    }

    fn z_position(&self) -> f64 {
        self.z_position
    }

    fn set_z_position(&mut self, z_position: f64) {
        self.z_position = z_position;
    }

    fn remove_from_parent(&mut self) {
        self.removed = true;
    }

    fn speed(&self) -> f64 {
        self.speed
    }
}
