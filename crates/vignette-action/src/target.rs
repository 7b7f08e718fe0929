//! Symbolic targets for invoke and custom actions.
//!
//! Actions never hold references to the objects they call. They hold a
//! [`TargetId`] and a [`Selector`], and the host resolves the id through a
//! [`TargetResolver`] at update time. This keeps actions serializable and
//! makes a released target an ordinary lookup miss.

use std::fmt;

use glam::DVec2;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::node::ActionNode;

/// Identifier of a target object in the host's registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(pub String);

impl TargetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TargetId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Symbolic name of a method on a target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selector(pub String);

impl Selector {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Selector {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How an action refers to its target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetRef {
    /// May have been released; a miss is skipped silently.
    Weak(TargetId),
    /// Expected to be alive; a miss is logged as a warning and skipped.
    Strong(TargetId),
}

impl TargetRef {
    pub fn weak(id: impl Into<String>) -> Self {
        TargetRef::Weak(TargetId::new(id))
    }

    pub fn strong(id: impl Into<String>) -> Self {
        TargetRef::Strong(TargetId::new(id))
    }

    pub fn id(&self) -> &TargetId {
        match self {
            TargetRef::Weak(id) | TargetRef::Strong(id) => id,
        }
    }

    pub fn is_weak(&self) -> bool {
        matches!(self, TargetRef::Weak(_))
    }
}

/// An object that actions can call by selector.
pub trait Performer {
    /// Called by invoke actions with zero to two arguments.
    fn perform(&mut self, selector: &Selector, arguments: &[Value]);

    /// Called by timed custom actions on every update until completion.
    fn perform_custom(
        &mut self,
        selector: &Selector,
        node: Option<&mut dyn ActionNode>,
        elapsed: f64,
        duration: f64,
        user_data: &Value,
    ) {
        let _ = (node, user_data);
        log::trace!("'{selector}' ignored custom update at {elapsed} of {duration}");
    }

    /// Called by chase actions that follow this target. `None` leaves the
    /// chase heading for the last point it was given.
    fn query_point(&mut self, selector: &Selector) -> Option<DVec2> {
        log::trace!("'{selector}' has no point to report");
        None
    }
}

/// Looks up live targets by id.
pub trait TargetResolver {
    fn resolve(&mut self, id: &TargetId) -> Option<&mut dyn Performer>;
}

/// Resolver with no targets; every lookup misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTargets;

impl TargetResolver for NoTargets {
    fn resolve(&mut self, _id: &TargetId) -> Option<&mut dyn Performer> {
        None
    }
}

/// A keyed collection of boxed performers.
///
/// Removing a performer is how a host releases a weakly referenced target.
#[derive(Default)]
pub struct TargetRegistry {
    targets: IndexMap<TargetId, Box<dyn Performer>>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a performer, returning the one it replaces.
    pub fn insert(&mut self, id: impl Into<String>, performer: impl Performer + 'static) -> Option<Box<dyn Performer>> {
        self.targets.insert(TargetId::new(id), Box::new(performer))
    }

    pub fn remove(&mut self, id: &TargetId) -> Option<Box<dyn Performer>> {
        self.targets.shift_remove(id)
    }

    pub fn contains(&self, id: &TargetId) -> bool {
        self.targets.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &TargetId> {
        self.targets.keys()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

impl fmt::Debug for TargetRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetRegistry").field("ids", &self.targets.keys().collect::<Vec<_>>()).finish()
    }
}

impl TargetResolver for TargetRegistry {
    fn resolve(&mut self, id: &TargetId) -> Option<&mut dyn Performer> {
        match self.targets.get_mut(id) {
            Some(performer) => Some(performer.as_mut()),
            None => None,
        }
    }
}
