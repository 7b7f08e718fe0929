//! Serializable, resumable actions for 2D scene nodes.
//!
//! Actions here are values rather than closures: an invoke names its target
//! and method, a timed custom action names a callback and carries user data,
//! and every durational action keeps its elapsed time. Saving an
//! [`ActionRunner`] mid-animation and restoring it later continues each action
//! from where it stopped. Completed steps of a sequence never run twice.
//!
//! The host drives time. Each frame it calls [`ActionRunner::advance`] with
//! the incremental time, the node being animated (optional), and a
//! [`TargetResolver`] that maps target ids to live objects.
//!
//! ```
//! use vignette_action::{Action, ActionRunner, NodeState, NoTargets};
//! use glam::DVec2;
//!
//! let mut node = NodeState::default();
//! let mut runner = ActionRunner::new();
//! runner.register("slide", Action::sequence(vec![
//!     Action::wait(0.5),
//!     Action::move_by(DVec2::new(100.0, 0.0), 1.0),
//! ]));
//!
//! runner.advance(1.0, Some(&mut node), &mut NoTargets);
//! assert_eq!(node.position.x, 50.0);
//!
//! let saved = serde_json::to_string(&runner).unwrap();
//! let mut restored: ActionRunner = serde_json::from_str(&saved).unwrap();
//! restored.advance(0.5, Some(&mut node), &mut NoTargets);
//! assert_eq!(node.position.x, 100.0);
//! assert!(!restored.has_actions());
//! ```

mod action;
mod animate;
mod chase;
mod collection;
mod motion;
mod node;
mod perform;
mod runner;
mod target;
mod timing;

#[cfg(test)]
mod test_support;

pub use action::{Action, ActionContext};
pub use animate::animated_layout;
pub use chase::{Chase, ChaseTarget};
pub use collection::{Group, Repeat, Sequence};
pub use motion::{
    ChangeZPositionBy, ChangeZPositionTo, FadeAlphaBy, FadeAlphaTo, MoveBy, MoveTo, RotateBy, RotateTo, ScaleBy,
    ScaleTo, Wait,
};
pub use node::{ActionNode, NodeState};
pub use perform::{Invoke, TimedCustom, MAX_INVOKE_ARGUMENTS};
pub use runner::ActionRunner;
pub use target::{NoTargets, Performer, Selector, TargetId, TargetRef, TargetRegistry, TargetResolver};
pub use timing::{Timer, TimingMode};

pub use vignette_core::{ActionError, ActionResult};
