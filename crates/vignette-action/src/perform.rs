//! Actions that call targets: one-shot invokes and timed custom callbacks.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use smallvec::SmallVec;
use vignette_core::ActionError;

use crate::action::ActionContext;
use crate::node::ActionNode;
use crate::target::{Selector, TargetId, TargetRef};
use crate::timing::{non_negative, Progress, Timer};

/// Maximum number of arguments an invoke passes.
pub const MAX_INVOKE_ARGUMENTS: usize = 2;

/// Calls `selector` on `target` with up to two arguments, once.
///
/// Completes on its first update without consuming time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "InvokeState")]
pub struct Invoke {
    pub target: TargetRef,
    pub selector: Selector,
    arguments: SmallVec<[Value; MAX_INVOKE_ARGUMENTS]>,
}

impl Invoke {
    pub fn new(target: TargetRef, selector: impl Into<String>) -> Self {
        Self { target, selector: Selector::new(selector), arguments: SmallVec::new() }
    }

    pub fn with_argument(target: TargetRef, selector: impl Into<String>, argument: Value) -> Self {
        let mut invoke = Self::new(target, selector);
        invoke.arguments.push(argument);
        invoke
    }

    pub fn with_arguments(target: TargetRef, selector: impl Into<String>, first: Value, second: Value) -> Self {
        let mut invoke = Self::new(target, selector);
        invoke.arguments.push(first);
        invoke.arguments.push(second);
        invoke
    }

    pub fn arguments(&self) -> &[Value] {
        &self.arguments
    }

    pub(crate) fn advance(&mut self, dt: f64, ctx: &mut ActionContext<'_>) -> Progress {
        match ctx.targets.resolve(self.target.id()) {
            Some(performer) => performer.perform(&self.selector, &self.arguments),
            None if self.target.is_weak() => {
                log::trace!("invoke '{}' skipped: target '{}' is gone", self.selector, self.target.id());
            }
            None => {
                log::warn!("invoke '{}' skipped: strong target '{}' not found", self.selector, self.target.id());
            }
        }
        Progress::Finished { leftover: non_negative(dt) }
    }
}

#[derive(Deserialize)]
struct InvokeState {
    target: TargetRef,
    selector: Selector,
    #[serde(default)]
    arguments: SmallVec<[Value; MAX_INVOKE_ARGUMENTS]>,
}

impl TryFrom<InvokeState> for Invoke {
    type Error = ActionError;

    fn try_from(state: InvokeState) -> Result<Self, Self::Error> {
        if state.arguments.len() > MAX_INVOKE_ARGUMENTS {
            return Err(ActionError::InvalidState {
                reason: format!(
                    "invoke '{}' has {} arguments, at most {MAX_INVOKE_ARGUMENTS} allowed",
                    state.selector,
                    state.arguments.len()
                ),
            });
        }
        Ok(Invoke { target: state.target, selector: state.selector, arguments: state.arguments })
    }
}

/// Calls `selector` on a weakly held target on every update over a duration.
///
/// The callback receives the node, the elapsed time, the duration and the
/// user data. It fires on the completing update with elapsed equal to the
/// duration, and never after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedCustom {
    pub target: TargetId,
    pub selector: Selector,
    pub timer: Timer,
    #[serde(default)]
    pub user_data: Value,
}

impl TimedCustom {
    pub fn new(target: TargetId, selector: Selector, duration: f64, user_data: Value) -> Self {
        Self { target, selector, timer: Timer::new(duration), user_data }
    }

    pub(crate) fn advance(&mut self, dt: f64, ctx: &mut ActionContext<'_>) -> Progress {
        let progress = self.timer.advance(dt);
        let ActionContext { node, targets } = ctx;
        match targets.resolve(&self.target) {
            Some(performer) => {
                let node: Option<&mut dyn ActionNode> = match node {
                    Some(node) => Some(&mut **node),
                    None => None,
                };
                performer.perform_custom(
                    &self.selector,
                    node,
                    self.timer.eased_elapsed(),
                    self.timer.duration(),
                    &self.user_data,
                );
            }
            None => log::trace!("custom '{}' skipped: target '{}' is gone", self.selector, self.target),
        }
        progress
    }
}
