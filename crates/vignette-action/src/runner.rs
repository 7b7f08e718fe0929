//! Keyed action runner.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::action::{Action, ActionContext};
use crate::node::ActionNode;
use crate::target::TargetResolver;
use crate::timing::non_negative;

/// Runs actions by key and advances them all with one call per frame.
///
/// The runner does not hold its node; the host passes it to each advance.
/// Actions run in registration order. The runner serializes as a map from key
/// to action, so saving and restoring it resumes every action where it stopped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionRunner {
    actions: IndexMap<String, Action>,
}

impl ActionRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `action` under `key` from the next advance.
    ///
    /// An action already under `key` is cancelled without completing.
    pub fn register(&mut self, key: impl Into<String>, action: Action) {
        let key = key.into();
        if let Some(previous) = self.actions.shift_remove(&key) {
            log::debug!("action '{key}' replaced ({} cancelled)", previous.kind());
        } else {
            log::debug!("action '{key}' registered ({})", action.kind());
        }
        self.actions.insert(key, action);
    }

    /// Advance every action by `dt`, scaled by the node's speed (1 without a node).
    pub fn advance<'a>(&mut self, dt: f64, node: Option<&'a mut dyn ActionNode>, targets: &'a mut dyn TargetResolver) {
        let speed = match &node {
            Some(node) => node.speed(),
            None => 1.0,
        };
        self.advance_with_speed(dt, speed, node, targets);
    }

    /// Advance every action by `dt * speed`. Negative time and speed count as zero.
    ///
    /// Completed actions are removed. An action that cannot update (a
    /// node-relative action with neither node nor starting value) is logged
    /// and removed.
    pub fn advance_with_speed<'a>(
        &mut self,
        dt: f64,
        speed: f64,
        node: Option<&'a mut dyn ActionNode>,
        targets: &'a mut dyn TargetResolver,
    ) {
        let dt = non_negative(dt) * non_negative(speed);
        let mut ctx = ActionContext::new(node, targets);
        self.actions.retain(|key, action| match action.update(dt, &mut ctx) {
            Ok(true) => true,
            Ok(false) => {
                log::debug!("action '{key}' completed");
                false
            }
            Err(e) => {
                log::warn!("action '{key}' dropped: {e}");
                false
            }
        });
    }

    pub fn action(&self, key: &str) -> Option<&Action> {
        self.actions.get(key)
    }

    pub fn action_mut(&mut self, key: &str) -> Option<&mut Action> {
        self.actions.get_mut(key)
    }

    pub fn has_actions(&self) -> bool {
        !self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Keys in the order their actions run.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    /// Remove the action under `key` without completing it.
    pub fn cancel(&mut self, key: &str) -> Option<Action> {
        let removed = self.actions.shift_remove(key);
        if removed.is_some() {
            log::debug!("action '{key}' cancelled");
        }
        removed
    }

    /// Remove every action without completing any.
    pub fn cancel_all(&mut self) {
        if !self.actions.is_empty() {
            log::debug!("{} actions cancelled", self.actions.len());
        }
        self.actions.clear();
    }
}
