//! Durational actions that idle or animate node properties.
//!
//! "By" actions apply the change in eased progress since their last update,
//! so they compose with anything else moving the node. "To" actions capture a
//! starting value on their first update (from the node unless one was given)
//! and then set the interpolated value outright.

use std::f64::consts::{PI, TAU};

use glam::DVec2;
use serde::{Deserialize, Serialize};
use vignette_core::{ActionError, ActionResult};

use crate::action::{capture_start, ActionContext};
use crate::timing::{Progress, Timer};

/// Advance `timer` and return the eased progress gained since `applied`,
/// which is moved up to the new progress.
fn eased_step(timer: &mut Timer, applied: &mut f64, dt: f64) -> (Progress, f64) {
    let progress = timer.advance(dt);
    let eased = timer.progress();
    let step = eased - *applied;
    *applied = eased;
    (progress, step)
}

/// Idles for a duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wait {
    pub timer: Timer,
}

impl Wait {
    pub fn new(duration: f64) -> Self {
        Self { timer: Timer::new(duration) }
    }

    pub(crate) fn advance(&mut self, dt: f64) -> Progress {
        self.timer.advance(dt)
    }
}

/// Offsets the node's position by `delta` over the duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveBy {
    pub delta: DVec2,
    pub timer: Timer,
    /// Progress already applied to the node
    #[serde(default)]
    applied: f64,
    #[serde(skip)]
    instantaneous_delta: DVec2,
}

impl MoveBy {
    pub fn new(delta: DVec2, duration: f64) -> Self {
        Self { delta, timer: Timer::new(duration), applied: 0.0, instantaneous_delta: DVec2::ZERO }
    }

    /// Change in position caused by the last update.
    pub fn instantaneous_delta(&self) -> DVec2 {
        self.instantaneous_delta
    }

    pub(crate) fn advance(&mut self, dt: f64, ctx: &mut ActionContext<'_>) -> Progress {
        let (progress, fraction) = eased_step(&mut self.timer, &mut self.applied, dt);
        let step = self.delta * fraction;
        self.instantaneous_delta = step;
        ctx.with_node(|node| node.set_position(node.position() + step));
        progress
    }
}

/// Moves from an origin to `destination` over the duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveTo {
    /// Captured from the node on the first update when not given
    pub origin: Option<DVec2>,
    pub destination: DVec2,
    pub timer: Timer,
    #[serde(default)]
    position: DVec2,
}

impl MoveTo {
    pub fn new(origin: Option<DVec2>, destination: DVec2, duration: f64) -> Self {
        Self { origin, destination, timer: Timer::new(duration), position: origin.unwrap_or_default() }
    }

    /// Position computed by the last update.
    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub(crate) fn advance(&mut self, dt: f64, ctx: &mut ActionContext<'_>) -> ActionResult<Progress> {
        let origin = capture_start(&mut self.origin, ctx, |node| node.position(), "move_to")?;
        let progress = self.timer.advance(dt);
        self.position = origin.lerp(self.destination, self.timer.progress());
        let position = self.position;
        ctx.with_node(|node| node.set_position(position));
        Ok(progress)
    }
}

/// Fades alpha from a starting value to `to` over the duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FadeAlphaTo {
    pub from: Option<f64>,
    pub to: f64,
    pub timer: Timer,
    #[serde(default)]
    alpha: f64,
}

impl FadeAlphaTo {
    pub fn new(from: Option<f64>, to: f64, duration: f64) -> Self {
        Self { from, to, timer: Timer::new(duration), alpha: from.unwrap_or(1.0) }
    }

    /// Alpha computed by the last update.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub(crate) fn advance(&mut self, dt: f64, ctx: &mut ActionContext<'_>) -> ActionResult<Progress> {
        let from = capture_start(&mut self.from, ctx, |node| node.alpha(), "fade_alpha_to")?;
        let progress = self.timer.advance(dt);
        self.alpha = from + (self.to - from) * self.timer.progress();
        let alpha = self.alpha;
        ctx.with_node(|node| node.set_alpha(alpha));
        Ok(progress)
    }
}

/// Scales from a starting x and y scale to `to` over the duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleTo {
    pub from: Option<DVec2>,
    pub to: DVec2,
    pub timer: Timer,
    #[serde(default)]
    scale: DVec2,
}

impl ScaleTo {
    pub fn new(from: Option<DVec2>, to: DVec2, duration: f64) -> Self {
        Self { from, to, timer: Timer::new(duration), scale: from.unwrap_or(DVec2::ONE) }
    }

    pub fn scale(&self) -> DVec2 {
        self.scale
    }

    pub(crate) fn advance(&mut self, dt: f64, ctx: &mut ActionContext<'_>) -> ActionResult<Progress> {
        let from = capture_start(&mut self.from, ctx, |node| node.scale(), "scale_to")?;
        let progress = self.timer.advance(dt);
        self.scale = from.lerp(self.to, self.timer.progress());
        let scale = self.scale;
        ctx.with_node(|node| node.set_scale(scale));
        Ok(progress)
    }
}

/// Rotates the node by `angle` radians over the duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotateBy {
    pub angle: f64,
    pub timer: Timer,
    #[serde(default)]
    applied: f64,
}

impl RotateBy {
    pub fn new(angle: f64, duration: f64) -> Self {
        Self { angle, timer: Timer::new(duration), applied: 0.0 }
    }

    pub(crate) fn advance(&mut self, dt: f64, ctx: &mut ActionContext<'_>) -> Progress {
        let (progress, fraction) = eased_step(&mut self.timer, &mut self.applied, dt);
        let step = self.angle * fraction;
        ctx.with_node(|node| node.set_rotation(node.rotation() + step));
        progress
    }
}

/// Rotates from a starting angle to `to` radians over the duration.
///
/// With `shortest_unit_arc`, the starting angle is first moved by whole turns
/// to within half a turn of `to`, so the node turns the short way round.
/// Otherwise the angle is interpolated as given: 0 to 4π is two full
/// counter-clockwise turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotateTo {
    pub from: Option<f64>,
    pub to: f64,
    #[serde(default)]
    pub shortest_unit_arc: bool,
    pub timer: Timer,
    #[serde(default)]
    angle: f64,
}

impl RotateTo {
    pub fn new(from: Option<f64>, to: f64, duration: f64, shortest_unit_arc: bool) -> Self {
        let from = from.map(|from| if shortest_unit_arc { nearest_turn(from, to) } else { from });
        Self { from, to, shortest_unit_arc, timer: Timer::new(duration), angle: from.unwrap_or_default() }
    }

    /// Angle computed by the last update.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub(crate) fn advance(&mut self, dt: f64, ctx: &mut ActionContext<'_>) -> ActionResult<Progress> {
        let from = match self.from {
            Some(from) => from,
            None => {
                let rotation = ctx
                    .node_value(|node| node.rotation())
                    .ok_or(ActionError::MissingNode { action: "rotate_to" })?;
                let from = if self.shortest_unit_arc { nearest_turn(rotation, self.to) } else { rotation };
                self.from = Some(from);
                from
            }
        };
        let progress = self.timer.advance(dt);
        self.angle = from + (self.to - from) * self.timer.progress();
        let angle = self.angle;
        ctx.with_node(|node| node.set_rotation(angle));
        Ok(progress)
    }
}

/// `angle` shifted by whole turns into `(target - π, target + π]`.
fn nearest_turn(angle: f64, target: f64) -> f64 {
    if angle - target > -PI && angle - target <= PI {
        return angle;
    }
    let offset = (angle - target).rem_euclid(TAU);
    if offset > PI {
        target + offset - TAU
    } else {
        target + offset
    }
}

/// Adds `delta` to the node's x and y scale over the duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleBy {
    pub delta: DVec2,
    pub timer: Timer,
    #[serde(default)]
    applied: f64,
    #[serde(skip)]
    instantaneous_delta: DVec2,
}

impl ScaleBy {
    pub fn new(delta: DVec2, duration: f64) -> Self {
        Self { delta, timer: Timer::new(duration), applied: 0.0, instantaneous_delta: DVec2::ZERO }
    }

    /// Change in scale caused by the last update.
    pub fn instantaneous_delta(&self) -> DVec2 {
        self.instantaneous_delta
    }

    pub(crate) fn advance(&mut self, dt: f64, ctx: &mut ActionContext<'_>) -> Progress {
        let (progress, fraction) = eased_step(&mut self.timer, &mut self.applied, dt);
        let step = self.delta * fraction;
        self.instantaneous_delta = step;
        ctx.with_node(|node| node.set_scale(node.scale() + step));
        progress
    }
}

/// Adds `delta` to the node's alpha over the duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FadeAlphaBy {
    pub delta: f64,
    pub timer: Timer,
    #[serde(default)]
    applied: f64,
    #[serde(skip)]
    instantaneous_delta: f64,
}

impl FadeAlphaBy {
    pub fn new(delta: f64, duration: f64) -> Self {
        Self { delta, timer: Timer::new(duration), applied: 0.0, instantaneous_delta: 0.0 }
    }

    pub fn instantaneous_delta(&self) -> f64 {
        self.instantaneous_delta
    }

    pub(crate) fn advance(&mut self, dt: f64, ctx: &mut ActionContext<'_>) -> Progress {
        let (progress, fraction) = eased_step(&mut self.timer, &mut self.applied, dt);
        let step = self.delta * fraction;
        self.instantaneous_delta = step;
        ctx.with_node(|node| node.set_alpha(node.alpha() + step));
        progress
    }
}

/// Adds `delta` to the node's z-position over the duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeZPositionBy {
    pub delta: f64,
    pub timer: Timer,
    #[serde(default)]
    applied: f64,
    #[serde(skip)]
    instantaneous_delta: f64,
}

impl ChangeZPositionBy {
    pub fn new(delta: f64, duration: f64) -> Self {
        Self { delta, timer: Timer::new(duration), applied: 0.0, instantaneous_delta: 0.0 }
    }

    pub fn instantaneous_delta(&self) -> f64 {
        self.instantaneous_delta
    }

    pub(crate) fn advance(&mut self, dt: f64, ctx: &mut ActionContext<'_>) -> Progress {
        let (progress, fraction) = eased_step(&mut self.timer, &mut self.applied, dt);
        let step = self.delta * fraction;
        self.instantaneous_delta = step;
        ctx.with_node(|node| node.set_z_position(node.z_position() + step));
        progress
    }
}

/// Changes z-position from a starting value to `to` over the duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeZPositionTo {
    pub from: Option<f64>,
    pub to: f64,
    pub timer: Timer,
    #[serde(default)]
    z_position: f64,
}

impl ChangeZPositionTo {
    pub fn new(from: Option<f64>, to: f64, duration: f64) -> Self {
        Self { from, to, timer: Timer::new(duration), z_position: from.unwrap_or_default() }
    }

    /// Z-position computed by the last update.
    pub fn z_position(&self) -> f64 {
        self.z_position
    }

    pub(crate) fn advance(&mut self, dt: f64, ctx: &mut ActionContext<'_>) -> ActionResult<Progress> {
        let from = capture_start(&mut self.from, ctx, |node| node.z_position(), "change_z_position_to")?;
        let progress = self.timer.advance(dt);
        self.z_position = from + (self.to - from) * self.timer.progress();
        let z_position = self.z_position;
        ctx.with_node(|node| node.set_z_position(z_position));
        Ok(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::node::NodeState;
    use crate::target::NoTargets;
    use crate::timing::TimingMode;
    use std::f64::consts::PI;

    fn step(action: &mut Action, node: &mut NodeState, dt: f64) -> bool {
        let mut targets = NoTargets;
        let mut ctx = ActionContext::new(Some(node), &mut targets);
        action.update(dt, &mut ctx).unwrap()
    }

    fn close(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_move_by_composes_with_other_motion() {
        let mut node = NodeState::default();
        let mut action = Action::move_by(DVec2::new(10.0, -4.0), 2.0);
        assert!(step(&mut action, &mut node, 1.0));
        assert!(close(node.position, DVec2::new(5.0, -2.0)));

        node.position.y += 100.0;
        assert!(!step(&mut action, &mut node, 1.5));
        assert!(close(node.position, DVec2::new(10.0, 96.0)));
    }

    #[test]
    fn test_move_to_captures_origin_once() {
        let mut node = NodeState::at(DVec2::new(2.0, 2.0));
        let mut action = Action::move_to(DVec2::new(12.0, 2.0), 1.0);
        step(&mut action, &mut node, 0.5);
        assert!(close(node.position, DVec2::new(7.0, 2.0)));

        // a resumed action keeps its captured origin
        let json = serde_json::to_string(&action).unwrap();
        let mut resumed: Action = serde_json::from_str(&json).unwrap();
        let mut fresh_node = NodeState::default();
        assert!(!step(&mut resumed, &mut fresh_node, 0.5));
        assert!(close(fresh_node.position, DVec2::new(12.0, 2.0)));
    }

    #[test]
    fn test_eased_motion_ends_on_target() {
        let mut node = NodeState::default();
        let mut action = Action::move_to(DVec2::new(1.0, 0.0), 1.0).with_timing_mode(TimingMode::EaseIn);
        step(&mut action, &mut node, 0.5);
        assert!(node.position.x < 0.5);
        step(&mut action, &mut node, 0.5);
        assert!(close(node.position, DVec2::new(1.0, 0.0)));
    }

    #[test]
    fn test_fade_scale_rotate() {
        let mut node = NodeState::default();
        let mut fade = Action::fade_out(2.0);
        step(&mut fade, &mut node, 1.0);
        assert!((node.alpha - 0.5).abs() < 1e-9);

        let mut scale = Action::scale_from_to(DVec2::ONE, DVec2::new(3.0, 2.0), 1.0);
        step(&mut scale, &mut node, 0.5);
        assert!(close(node.scale, DVec2::new(2.0, 1.5)));

        let mut rotate = Action::rotate_by(PI, 4.0);
        node.rotation = 1.0;
        step(&mut rotate, &mut node, 1.0);
        step(&mut rotate, &mut node, 3.0);
        assert!((node.rotation - (1.0 + PI)).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_to_takes_shortest_arc() {
        let mut node = NodeState::default();
        let mut clockwise = Action::rotate_to(-PI / 2.0, 2.0, true);
        step(&mut clockwise, &mut node, 1.0);
        assert!((node.rotation + PI / 4.0).abs() < 1e-9);

        // the same heading written as 3π/2 still turns clockwise, from 2π
        let mut node = NodeState::default();
        let mut wrapped = Action::rotate_to(3.0 * PI / 2.0, 2.0, true);
        step(&mut wrapped, &mut node, 1.0);
        assert!((node.rotation - 7.0 * PI / 4.0).abs() < 1e-9);
        assert!(!step(&mut wrapped, &mut node, 1.0));
        assert!((node.rotation - 3.0 * PI / 2.0).abs() < 1e-9);

        // without the flag the long way round is taken
        let mut node = NodeState::default();
        let mut long_way = Action::rotate_to(3.0 * PI / 2.0, 2.0, false);
        step(&mut long_way, &mut node, 1.0);
        assert!((node.rotation - 3.0 * PI / 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotate_to_resumes_mid_flight() {
        let mut node = NodeState::default();
        node.rotation = 0.5;
        let mut action = Action::rotate_to(1.5, 2.0, true);
        step(&mut action, &mut node, 1.0);
        assert!((node.rotation - 1.0).abs() < 1e-9);

        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "rotate_to");
        assert_eq!(json["from"], 0.5);
        let mut resumed: Action = serde_json::from_value(json).unwrap();
        assert_eq!(resumed, action);

        let mut fresh_node = NodeState::default();
        assert!(!step(&mut resumed, &mut fresh_node, 1.0));
        assert!((fresh_node.rotation - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_turn_range() {
        assert!((nearest_turn(TAU + 0.25, 0.0) - 0.25).abs() < 1e-9);
        assert!((nearest_turn(0.0, 3.0 * PI / 2.0) - TAU).abs() < 1e-9);
        // exactly half a turn away stays on the far side of the target
        assert!((nearest_turn(PI, 0.0) - PI).abs() < 1e-9);
        assert!((nearest_turn(-PI, 0.0) - PI).abs() < 1e-9);
    }

    #[test]
    fn test_relative_scale_fade_and_z() {
        let mut node = NodeState::default();
        let mut grow = Action::scale_by(1.0, 2.0);
        step(&mut grow, &mut node, 1.0);
        assert!(close(node.scale, DVec2::new(1.5, 1.5)));
        node.scale.x = 3.0;
        step(&mut grow, &mut node, 1.0);
        assert!(close(node.scale, DVec2::new(3.5, 2.0)));

        let mut stretch = Action::scale_xy_by(DVec2::new(2.0, -0.5), 1.0);
        step(&mut stretch, &mut node, 1.0);
        assert!(close(node.scale, DVec2::new(5.5, 1.5)));

        let mut fade = Action::fade_alpha_by(-0.6, 3.0);
        step(&mut fade, &mut node, 1.0);
        assert!((node.alpha - 0.8).abs() < 1e-9);
        assert!(!step(&mut fade, &mut node, 5.0));
        assert!((node.alpha - 0.4).abs() < 1e-9);

        let mut raise = Action::change_z_position_by(4.0, 2.0);
        step(&mut raise, &mut node, 0.5);
        assert!((node.z_position - 1.0).abs() < 1e-9);
        let mut settle = Action::change_z_position_to(-2.0, 1.0);
        step(&mut settle, &mut node, 0.5);
        assert!((node.z_position + 0.5).abs() < 1e-9);
        step(&mut settle, &mut node, 0.5);
        assert_eq!(node.z_position, -2.0);
    }

    #[test]
    fn test_absolute_z_needs_a_node_or_origin() {
        let mut targets = NoTargets;
        let mut ctx = ActionContext::new(None, &mut targets);
        let mut captured = Action::change_z_position_to(3.0, 1.0);
        assert_eq!(
            captured.update(0.5, &mut ctx),
            Err(ActionError::MissingNode { action: "change_z_position_to" })
        );

        let mut explicit = ChangeZPositionTo::new(Some(1.0), 3.0, 1.0);
        explicit.advance(0.5, &mut ctx).unwrap();
        assert!((explicit.z_position() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_model_state_without_node() {
        let mut move_by = MoveBy::new(DVec2::new(4.0, 0.0), 1.0);
        let mut fade = FadeAlphaTo::new(Some(1.0), 0.0, 1.0);
        let mut targets = NoTargets;
        let mut ctx = ActionContext::new(None, &mut targets);
        move_by.advance(0.25, &mut ctx);
        fade.advance(0.25, &mut ctx).unwrap();
        assert!(close(move_by.instantaneous_delta(), DVec2::new(1.0, 0.0)));
        assert!((fade.alpha() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_node_speed_is_not_applied_by_actions() {
        // speed scaling belongs to the runner; an action uses its own timer speed
        let mut node = NodeState::default().with_speed(4.0);
        let mut wait = Action::wait(1.0).with_speed(2.0);
        assert!(step(&mut wait, &mut node, 0.25));
        assert_eq!(wait.elapsed_time(), 0.5);
    }
}
