//! Error types for the vignette crates.

use thiserror::Error;

/// Top-level error type for the vignette crates.
#[derive(Debug, Error)]
pub enum VignetteError {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Function(#[from] FunctionError),
}

/// Configuration errors reported by layout managers.
///
/// A layout that returns one of these has not touched any node.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("Grid needs a non-zero column or row count")]
    MissingDimension,

    #[error("Required parameter '{name}' is empty")]
    EmptyParameter { name: &'static str },

    #[error("Index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Errors raised while building or updating actions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    #[error("Inconsistent action state: {reason}")]
    InvalidState { reason: String },

    #[error("Action '{action}' needs a node or an explicit starting value")]
    MissingNode { action: &'static str },
}

/// Errors raised while constructing math utilities.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FunctionError {
    #[error("Knot arrays differ in length: {xs} x values, {ys} y values")]
    KnotMismatch { xs: usize, ys: usize },

    #[error("Piecewise-linear function needs at least one knot")]
    NoKnots,

    #[error("Knot x values must be strictly increasing (index {index})")]
    UnsortedKnots { index: usize },

    #[error("Shuffler needs at least one item")]
    EmptyShuffle,

    #[error("Shuffler state does not describe a full cycle")]
    InvalidShuffleState,
}

/// Result alias for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Result alias for action construction and decoding.
pub type ActionResult<T> = Result<T, ActionError>;
