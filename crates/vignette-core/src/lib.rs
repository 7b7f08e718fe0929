//! Core types and utilities for the vignette crates.
//!
//! This crate provides the foundations shared by layout and actions:
//! - Geometry primitives (sizes, rects, rotated bounds) and length classification
//! - The [`LayoutNode`] capability through which layout managers see host nodes
//! - Label baseline helpers for visually centring text
//! - Bezier, trajectory and piecewise-linear functions
//! - The ugly shuffler
//! - Error types

pub mod errors;
pub mod function;
pub mod geometry;
pub mod label;
pub mod node;
pub mod shuffle;

pub use errors::*;
pub use function::{CubicBezier, PiecewiseLinearFunction, TrajectoryBezier};
pub use geometry::{bounds_for_rotation, repeat_last, LengthSpec, Rect, Size, EPSILON};
pub use label::{baseline_offset_y_from_visual_center, label_height, FontMetrics, LabelHeightMode};
pub use node::{LayoutItem, LayoutNode, NodeKind};
pub use shuffle::{all_shuffles, UglyShuffler};

pub use glam::DVec2;
