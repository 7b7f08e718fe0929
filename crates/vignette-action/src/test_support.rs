//! Shared fixtures for unit tests.

use glam::DVec2;
use serde_json::Value;

use crate::node::ActionNode;
use crate::target::{Performer, Selector, TargetId, TargetResolver};

#[derive(Debug, Clone, PartialEq)]
pub struct CustomCall {
    pub selector: String,
    pub elapsed: f64,
    pub duration: f64,
    pub user_data: Value,
    pub node_position: Option<DVec2>,
}

/// Records every call it receives.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<(String, Vec<Value>)>,
    pub custom: Vec<CustomCall>,
    /// Reported to chase actions, when set
    pub point: Option<DVec2>,
    pub point_queries: Vec<String>,
}

impl Recorder {
    pub fn selectors(&self) -> Vec<&str> {
        self.calls.iter().map(|(selector, _)| selector.as_str()).collect()
    }
}

impl Performer for Recorder {
    fn perform(&mut self, selector: &Selector, arguments: &[Value]) {
        self.calls.push((selector.to_string(), arguments.to_vec()));
    }

    fn perform_custom(
        &mut self,
        selector: &Selector,
        node: Option<&mut dyn ActionNode>,
        elapsed: f64,
        duration: f64,
        user_data: &Value,
    ) {
        self.custom.push(CustomCall {
            selector: selector.to_string(),
            elapsed,
            duration,
            user_data: user_data.clone(),
            node_position: node.map(|node| node.position()),
        });
    }

    fn query_point(&mut self, selector: &Selector) -> Option<DVec2> {
        self.point_queries.push(selector.to_string());
        self.point
    }
}

/// Resolves one id to a recorder; `alive` false simulates a released target.
#[derive(Debug)]
pub struct OneTarget {
    pub id: TargetId,
    pub alive: bool,
    pub recorder: Recorder,
}

impl OneTarget {
    pub fn new(id: &str) -> Self {
        Self { id: TargetId::from(id), alive: true, recorder: Recorder::default() }
    }
}

impl TargetResolver for OneTarget {
    fn resolve(&mut self, id: &TargetId) -> Option<&mut dyn Performer> {
        if self.alive && *id == self.id {
            Some(&mut self.recorder)
        } else {
            None
        }
    }
}
