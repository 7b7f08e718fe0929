//! Actions that run other actions: in sequence, in parallel, or repeatedly.
//!
//! Time a sub-action does not use when it completes flows into the next one
//! within the same update, so a sequence of timed actions keeps exact pace
//! regardless of frame boundaries.

use serde::{Deserialize, Serialize};
use vignette_core::{ActionError, ActionResult};

use crate::action::{Action, ActionContext};
use crate::timing::{non_negative, Progress};

/// Runs actions one at a time, in order.
///
/// `index` is the cursor of the running sub-action. Sub-actions before it
/// have completed and are never updated again, including after a decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SequenceState")]
pub struct Sequence {
    actions: Vec<Action>,
    index: usize,
}

impl Sequence {
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions, index: 0 }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Sub-actions not yet completed.
    pub fn remaining(&self) -> &[Action] {
        &self.actions[self.index..]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn duration(&self) -> f64 {
        self.actions.iter().map(Action::duration).sum()
    }

    pub fn elapsed_time(&self) -> f64 {
        self.actions.iter().take(self.index + 1).map(Action::elapsed_time).sum()
    }

    pub(crate) fn advance(&mut self, dt: f64, ctx: &mut ActionContext<'_>) -> ActionResult<Progress> {
        let mut dt = non_negative(dt);
        while let Some(current) = self.actions.get_mut(self.index) {
            match current.advance(dt, ctx)? {
                Progress::Running => return Ok(Progress::Running),
                Progress::Finished { leftover } => {
                    self.index += 1;
                    dt = leftover;
                }
            }
        }
        Ok(Progress::Finished { leftover: dt })
    }
}

#[derive(Deserialize)]
struct SequenceState {
    actions: Vec<Action>,
    #[serde(default)]
    index: usize,
}

impl TryFrom<SequenceState> for Sequence {
    type Error = ActionError;

    fn try_from(state: SequenceState) -> Result<Self, Self::Error> {
        if state.index > state.actions.len() {
            return Err(ActionError::InvalidState {
                reason: format!("sequence cursor {} beyond {} actions", state.index, state.actions.len()),
            });
        }
        Ok(Sequence { actions: state.actions, index: state.index })
    }
}

/// Runs actions in parallel; completes when all of them have.
///
/// Completed members are dropped and never updated again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    actions: Vec<Action>,
}

impl Group {
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    /// Members still running.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn duration(&self) -> f64 {
        self.actions.iter().map(Action::duration).fold(0.0, f64::max)
    }

    pub fn elapsed_time(&self) -> f64 {
        self.actions.iter().map(Action::elapsed_time).fold(0.0, f64::max)
    }

    pub(crate) fn advance(&mut self, dt: f64, ctx: &mut ActionContext<'_>) -> ActionResult<Progress> {
        let dt = non_negative(dt);
        let mut leftover = dt;
        let mut index = 0;
        while index < self.actions.len() {
            match self.actions[index].advance(dt, ctx)? {
                Progress::Running => index += 1,
                Progress::Finished { leftover: unused } => {
                    self.actions.remove(index);
                    leftover = leftover.min(unused);
                }
            }
        }
        if self.actions.is_empty() {
            Ok(Progress::Finished { leftover })
        } else {
            Ok(Progress::Running)
        }
    }
}

/// Repeats a prototype action `count` times, or forever when `count` is 0.
///
/// Each iteration runs a fresh clone of the prototype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RepeatState")]
pub struct Repeat {
    prototype: Box<Action>,
    current: Option<Box<Action>>,
    count: usize,
    index: usize,
}

impl Repeat {
    pub fn new(prototype: Action, count: usize) -> Self {
        Self { prototype: Box::new(prototype), current: None, count, index: 0 }
    }

    pub fn prototype(&self) -> &Action {
        &self.prototype
    }

    /// The clone currently running, if an iteration is in progress.
    pub fn current(&self) -> Option<&Action> {
        self.current.as_deref()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Iterations completed.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_forever(&self) -> bool {
        self.count == 0
    }

    pub fn duration(&self) -> f64 {
        if self.is_forever() {
            f64::INFINITY
        } else {
            self.prototype.duration() * self.count as f64
        }
    }

    pub fn elapsed_time(&self) -> f64 {
        let current = self.current.as_ref().map_or(0.0, |action| action.elapsed_time());
        self.prototype.duration() * self.index as f64 + current
    }

    pub(crate) fn advance(&mut self, dt: f64, ctx: &mut ActionContext<'_>) -> ActionResult<Progress> {
        let mut dt = non_negative(dt);
        loop {
            if !self.is_forever() && self.index >= self.count {
                return Ok(Progress::Finished { leftover: dt });
            }
            let prototype = &self.prototype;
            let current = self.current.get_or_insert_with(|| prototype.clone());
            match current.advance(dt, ctx)? {
                Progress::Running => return Ok(Progress::Running),
                Progress::Finished { leftover } => {
                    self.current = None;
                    self.index += 1;
                    // an endless repeat of an instant action runs once per update
                    if self.is_forever() && leftover >= dt {
                        return Ok(Progress::Running);
                    }
                    dt = leftover;
                }
            }
        }
    }
}

#[derive(Deserialize)]
struct RepeatState {
    prototype: Box<Action>,
    #[serde(default)]
    current: Option<Box<Action>>,
    count: usize,
    #[serde(default)]
    index: usize,
}

impl TryFrom<RepeatState> for Repeat {
    type Error = ActionError;

    fn try_from(state: RepeatState) -> Result<Self, Self::Error> {
        let finished = state.count != 0 && state.index >= state.count;
        if (state.count != 0 && state.index > state.count) || (finished && state.current.is_some()) {
            return Err(ActionError::InvalidState {
                reason: format!("repeat index {} inconsistent with count {}", state.index, state.count),
            });
        }
        Ok(Repeat { prototype: state.prototype, current: state.current, count: state.count, index: state.index })
    }
}
