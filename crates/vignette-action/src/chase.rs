//! Moves toward a destination that can change while the action runs.
//!
//! A chase remembers the position it computed last. Each update covers the
//! share of the remaining distance that matches the share of remaining
//! (eased) time, so a changed destination bends the path from wherever the
//! chase has got to. A move-to would instead jump onto the line between its
//! origin and the new destination.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use vignette_core::ActionResult;

use crate::action::{capture_start, ActionContext};
use crate::target::{Selector, TargetId};
use crate::timing::{Progress, Timer};

fn chase_step(position: DVec2, destination: DVec2, applied: f64, eased: f64) -> DVec2 {
    if eased >= 1.0 || applied >= 1.0 {
        return destination;
    }
    position + (destination - position) * ((eased - applied) / (1.0 - applied))
}

/// Chases a destination the owner may move at any time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chase {
    /// Last computed position; taken from the node on the first update when not given
    position: Option<DVec2>,
    pub destination: DVec2,
    pub timer: Timer,
    #[serde(default)]
    applied: f64,
}

impl Chase {
    pub fn new(origin: Option<DVec2>, destination: DVec2, duration: f64) -> Self {
        Self { position: origin, destination, timer: Timer::new(duration), applied: 0.0 }
    }

    /// Position computed by the last update, or the origin before the first.
    pub fn position(&self) -> Option<DVec2> {
        self.position
    }

    /// Override the position the next update steps from.
    ///
    /// The node is not touched until that update.
    pub fn set_position(&mut self, position: DVec2) {
        self.position = Some(position);
    }

    pub(crate) fn advance(&mut self, dt: f64, ctx: &mut ActionContext<'_>) -> ActionResult<Progress> {
        let position = capture_start(&mut self.position, ctx, |node| node.position(), "chase")?;
        let progress = self.timer.advance(dt);
        let eased = self.timer.progress();
        let next = chase_step(position, self.destination, self.applied, eased);
        self.applied = eased;
        self.position = Some(next);
        ctx.with_node(|node| node.set_position(next));
        Ok(progress)
    }
}

/// Chases the point a weakly held target reports through `selector`.
///
/// The target is asked for its point on every update. When it is gone, or
/// reports nothing, the chase keeps heading for the last point it received;
/// before any point arrives it holds its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChaseTarget {
    pub target: TargetId,
    pub selector: Selector,
    position: Option<DVec2>,
    #[serde(default)]
    destination: Option<DVec2>,
    pub timer: Timer,
    #[serde(default)]
    applied: f64,
}

impl ChaseTarget {
    pub fn new(origin: Option<DVec2>, target: TargetId, selector: Selector, duration: f64) -> Self {
        Self {
            target,
            selector,
            position: origin,
            destination: None,
            timer: Timer::new(duration),
            applied: 0.0,
        }
    }

    pub fn position(&self) -> Option<DVec2> {
        self.position
    }

    pub fn set_position(&mut self, position: DVec2) {
        self.position = Some(position);
    }

    /// Last point reported by the target.
    pub fn destination(&self) -> Option<DVec2> {
        self.destination
    }

    pub(crate) fn advance(&mut self, dt: f64, ctx: &mut ActionContext<'_>) -> ActionResult<Progress> {
        let position = capture_start(&mut self.position, ctx, |node| node.position(), "chase_target")?;
        match ctx.targets.resolve(&self.target) {
            Some(performer) => {
                if let Some(point) = performer.query_point(&self.selector) {
                    self.destination = Some(point);
                }
            }
            None => log::trace!("chase '{}': target '{}' is gone", self.selector, self.target),
        }

        let progress = self.timer.advance(dt);
        let eased = self.timer.progress();
        let next = match self.destination {
            Some(destination) => chase_step(position, destination, self.applied, eased),
            None => position,
        };
        self.applied = eased;
        self.position = Some(next);
        ctx.with_node(|node| node.set_position(next));
        Ok(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::node::NodeState;
    use crate::target::NoTargets;
    use crate::test_support::OneTarget;

    fn close(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_chase_bends_toward_moved_destination() {
        let mut node = NodeState::default();
        let mut targets = NoTargets;
        let mut chase = Chase::new(None, DVec2::new(10.0, 0.0), 2.0);

        let mut ctx = ActionContext::new(Some(&mut node), &mut targets);
        assert_eq!(chase.advance(1.0, &mut ctx), Ok(Progress::Running));
        assert!(close(node.position, DVec2::new(5.0, 0.0)));

        // half the remaining time covers half the remaining way to the new point
        chase.destination = DVec2::new(5.0, 10.0);
        let mut ctx = ActionContext::new(Some(&mut node), &mut targets);
        chase.advance(0.5, &mut ctx).unwrap();
        assert!(close(node.position, DVec2::new(5.0, 5.0)));

        let mut ctx = ActionContext::new(Some(&mut node), &mut targets);
        assert_eq!(chase.advance(0.5, &mut ctx), Ok(Progress::Finished { leftover: 0.0 }));
        assert_eq!(node.position, DVec2::new(5.0, 10.0));
    }

    #[test]
    fn test_chase_resumes_mid_flight() {
        let mut node = NodeState::default();
        let mut action = Action::chase(DVec2::new(10.0, 0.0), 2.0);
        let mut targets = NoTargets;
        let mut ctx = ActionContext::new(Some(&mut node), &mut targets);
        action.update(1.0, &mut ctx).unwrap();

        let json = serde_json::to_string(&action).unwrap();
        let mut resumed: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(resumed, action);

        // the node's own position is not consulted again
        let mut elsewhere = NodeState::at(DVec2::new(-50.0, 3.0));
        let mut ctx = ActionContext::new(Some(&mut elsewhere), &mut targets);
        assert_eq!(resumed.update(0.5, &mut ctx), Ok(true));
        assert!(close(elsewhere.position, DVec2::new(7.5, 0.0)));
        let mut ctx = ActionContext::new(Some(&mut elsewhere), &mut targets);
        assert_eq!(resumed.update(0.5, &mut ctx), Ok(false));
        assert!(close(elsewhere.position, DVec2::new(10.0, 0.0)));
    }

    #[test]
    fn test_owner_can_reposition_chase() {
        let mut chase = Chase::new(Some(DVec2::ZERO), DVec2::new(8.0, 0.0), 4.0);
        let mut targets = NoTargets;
        let mut ctx = ActionContext::new(None, &mut targets);
        chase.advance(1.0, &mut ctx).unwrap();
        assert_eq!(chase.position(), Some(DVec2::new(2.0, 0.0)));

        chase.set_position(DVec2::new(8.0, 6.0));
        chase.advance(1.0, &mut ctx).unwrap();
        let expected = DVec2::new(8.0, 6.0) + DVec2::new(0.0, -6.0) / 3.0;
        assert!(close(chase.position().unwrap(), expected));
    }

    #[test]
    fn test_chase_target_follows_reported_point() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut node = NodeState::default();
        let mut targets = OneTarget::new("ship");
        targets.recorder.point = Some(DVec2::new(0.0, 8.0));
        let mut action = Action::chase_target("ship", "dock", 4.0);

        let mut step = |targets: &mut OneTarget, node: &mut NodeState| {
            let mut ctx = ActionContext::new(Some(node), targets);
            action.update(1.0, &mut ctx).unwrap()
        };
        assert!(step(&mut targets, &mut node));
        assert!(close(node.position, DVec2::new(0.0, 2.0)));

        targets.recorder.point = Some(DVec2::new(6.0, 8.0));
        assert!(step(&mut targets, &mut node));
        assert!(close(node.position, DVec2::new(2.0, 4.0)));

        // a released target leaves the chase on its last known point
        targets.alive = false;
        assert!(step(&mut targets, &mut node));
        assert!(close(node.position, DVec2::new(4.0, 6.0)));
        assert!(!step(&mut targets, &mut node));
        assert_eq!(node.position, DVec2::new(6.0, 8.0));
        assert_eq!(targets.recorder.point_queries, vec!["dock", "dock"]);
    }

    #[test]
    fn test_chase_target_without_point_holds_still() {
        let mut node = NodeState::at(DVec2::new(1.0, 1.0));
        let mut targets = OneTarget::new("ghost");
        let mut chase = ChaseTarget::new(None, TargetId::from("ghost"), Selector::from("where"), 1.0);
        let mut ctx = ActionContext::new(Some(&mut node), &mut targets);
        chase.advance(2.0, &mut ctx).unwrap();
        assert_eq!(chase.destination(), None);
        assert_eq!(node.position, DVec2::new(1.0, 1.0));
    }
}
