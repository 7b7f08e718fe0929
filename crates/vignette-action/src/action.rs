//! The action sum type and its update context.
//!
//! An [`Action`] is a stateful value: it accumulates elapsed time, remembers
//! which sub-actions have completed, and captures starting values on its first
//! update. All of that state serializes, so an action decoded mid-flight
//! resumes exactly where it stopped.
//!
//! Actions are updated with incremental time in the caller's time frame and
//! report whether they are still running. Once an action reports completion it
//! must not be updated again.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use vignette_core::{ActionError, ActionResult};

use crate::chase::{Chase, ChaseTarget};
use crate::collection::{Group, Repeat, Sequence};
use crate::motion::{
    ChangeZPositionBy, ChangeZPositionTo, FadeAlphaBy, FadeAlphaTo, MoveBy, MoveTo, RotateBy, RotateTo, ScaleBy,
    ScaleTo, Wait,
};
use crate::node::ActionNode;
use crate::perform::{Invoke, TimedCustom};
use crate::target::{Selector, TargetId, TargetResolver};
use crate::timing::{non_negative, Progress, Timer, TimingMode};

/// Everything an action may touch while it updates.
///
/// Callbacks reached through the context cannot reach the runner that owns
/// the action.
pub struct ActionContext<'a> {
    /// The node being animated, if any
    pub node: Option<&'a mut dyn ActionNode>,
    pub targets: &'a mut dyn TargetResolver,
}

impl<'a> ActionContext<'a> {
    pub fn new(node: Option<&'a mut dyn ActionNode>, targets: &'a mut dyn TargetResolver) -> Self {
        Self { node, targets }
    }

    pub(crate) fn node_value<T>(&self, read: impl FnOnce(&dyn ActionNode) -> T) -> Option<T> {
        match &self.node {
            Some(node) => Some(read(&**node)),
            None => None,
        }
    }

    pub(crate) fn with_node(&mut self, write: impl FnOnce(&mut dyn ActionNode)) {
        if let Some(node) = &mut self.node {
            write(&mut **node);
        }
    }
}

/// A serializable unit of deferred work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Invoke(Invoke),
    Custom(TimedCustom),
    Sequence(Sequence),
    Group(Group),
    Repeat(Repeat),
    Wait(Wait),
    MoveBy(MoveBy),
    MoveTo(MoveTo),
    Chase(Chase),
    ChaseTarget(ChaseTarget),
    FadeAlphaBy(FadeAlphaBy),
    FadeAlphaTo(FadeAlphaTo),
    ScaleBy(ScaleBy),
    ScaleTo(ScaleTo),
    RotateBy(RotateBy),
    RotateTo(RotateTo),
    ChangeZPositionBy(ChangeZPositionBy),
    ChangeZPositionTo(ChangeZPositionTo),
    /// Detaches the node from its parent; completes at once.
    RemoveFromParent,
}

impl Action {
    /// Advance by `dt` seconds; returns `true` while the action is still running.
    ///
    /// Negative `dt` is treated as zero. Fails only when a node-relative action
    /// has neither a node nor an explicit starting value.
    pub fn update(&mut self, dt: f64, ctx: &mut ActionContext<'_>) -> ActionResult<bool> {
        Ok(self.advance(dt, ctx)?.is_running())
    }

    pub(crate) fn advance(&mut self, dt: f64, ctx: &mut ActionContext<'_>) -> ActionResult<Progress> {
        match self {
            Action::Invoke(action) => Ok(action.advance(dt, ctx)),
            Action::Custom(action) => Ok(action.advance(dt, ctx)),
            Action::Sequence(action) => action.advance(dt, ctx),
            Action::Group(action) => action.advance(dt, ctx),
            Action::Repeat(action) => action.advance(dt, ctx),
            Action::Wait(action) => Ok(action.advance(dt)),
            Action::MoveBy(action) => Ok(action.advance(dt, ctx)),
            Action::MoveTo(action) => action.advance(dt, ctx),
            Action::Chase(action) => action.advance(dt, ctx),
            Action::ChaseTarget(action) => action.advance(dt, ctx),
            Action::FadeAlphaBy(action) => Ok(action.advance(dt, ctx)),
            Action::FadeAlphaTo(action) => action.advance(dt, ctx),
            Action::ScaleBy(action) => Ok(action.advance(dt, ctx)),
            Action::ScaleTo(action) => action.advance(dt, ctx),
            Action::RotateBy(action) => Ok(action.advance(dt, ctx)),
            Action::RotateTo(action) => action.advance(dt, ctx),
            Action::ChangeZPositionBy(action) => Ok(action.advance(dt, ctx)),
            Action::ChangeZPositionTo(action) => action.advance(dt, ctx),
            Action::RemoveFromParent => {
                ctx.with_node(|node| node.remove_from_parent());
                Ok(Progress::Finished { leftover: non_negative(dt) })
            }
        }
    }

    /// Tag name, as used in serialized form.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Invoke(_) => "invoke",
            Action::Custom(_) => "custom",
            Action::Sequence(_) => "sequence",
            Action::Group(_) => "group",
            Action::Repeat(_) => "repeat",
            Action::Wait(_) => "wait",
            Action::MoveBy(_) => "move_by",
            Action::MoveTo(_) => "move_to",
            Action::Chase(_) => "chase",
            Action::ChaseTarget(_) => "chase_target",
            Action::FadeAlphaBy(_) => "fade_alpha_by",
            Action::FadeAlphaTo(_) => "fade_alpha_to",
            Action::ScaleBy(_) => "scale_by",
            Action::ScaleTo(_) => "scale_to",
            Action::RotateBy(_) => "rotate_by",
            Action::RotateTo(_) => "rotate_to",
            Action::ChangeZPositionBy(_) => "change_z_position_by",
            Action::ChangeZPositionTo(_) => "change_z_position_to",
            Action::RemoveFromParent => "remove_from_parent",
        }
    }

    /// Expected duration at normal speed; zero for instant actions, infinite
    /// for endless repeats.
    pub fn duration(&self) -> f64 {
        match self {
            Action::Invoke(_) | Action::RemoveFromParent => 0.0,
            Action::Sequence(action) => action.duration(),
            Action::Group(action) => action.duration(),
            Action::Repeat(action) => action.duration(),
            _ => self.timer().map_or(0.0, Timer::duration),
        }
    }

    /// Elapsed time in the action's own time frame.
    pub fn elapsed_time(&self) -> f64 {
        match self {
            Action::Invoke(_) | Action::RemoveFromParent => 0.0,
            Action::Sequence(action) => action.elapsed_time(),
            Action::Group(action) => action.elapsed_time(),
            Action::Repeat(action) => action.elapsed_time(),
            _ => self.timer().map_or(0.0, Timer::elapsed),
        }
    }

    /// The timer of a single durational action.
    pub fn timer(&self) -> Option<&Timer> {
        match self {
            Action::Custom(action) => Some(&action.timer),
            Action::Wait(action) => Some(&action.timer),
            Action::MoveBy(action) => Some(&action.timer),
            Action::MoveTo(action) => Some(&action.timer),
            Action::Chase(action) => Some(&action.timer),
            Action::ChaseTarget(action) => Some(&action.timer),
            Action::FadeAlphaBy(action) => Some(&action.timer),
            Action::FadeAlphaTo(action) => Some(&action.timer),
            Action::ScaleBy(action) => Some(&action.timer),
            Action::ScaleTo(action) => Some(&action.timer),
            Action::RotateBy(action) => Some(&action.timer),
            Action::RotateTo(action) => Some(&action.timer),
            Action::ChangeZPositionBy(action) => Some(&action.timer),
            Action::ChangeZPositionTo(action) => Some(&action.timer),
            Action::Invoke(_)
            | Action::Sequence(_)
            | Action::Group(_)
            | Action::Repeat(_)
            | Action::RemoveFromParent => None,
        }
    }

    pub fn timer_mut(&mut self) -> Option<&mut Timer> {
        match self {
            Action::Custom(action) => Some(&mut action.timer),
            Action::Wait(action) => Some(&mut action.timer),
            Action::MoveBy(action) => Some(&mut action.timer),
            Action::MoveTo(action) => Some(&mut action.timer),
            Action::Chase(action) => Some(&mut action.timer),
            Action::ChaseTarget(action) => Some(&mut action.timer),
            Action::FadeAlphaBy(action) => Some(&mut action.timer),
            Action::FadeAlphaTo(action) => Some(&mut action.timer),
            Action::ScaleBy(action) => Some(&mut action.timer),
            Action::ScaleTo(action) => Some(&mut action.timer),
            Action::RotateBy(action) => Some(&mut action.timer),
            Action::RotateTo(action) => Some(&mut action.timer),
            Action::ChangeZPositionBy(action) => Some(&mut action.timer),
            Action::ChangeZPositionTo(action) => Some(&mut action.timer),
            Action::Invoke(_)
            | Action::Sequence(_)
            | Action::Group(_)
            | Action::Repeat(_)
            | Action::RemoveFromParent => None,
        }
    }

    /// Set the timing mode of a durational action; other actions are unchanged.
    pub fn with_timing_mode(mut self, timing_mode: TimingMode) -> Self {
        if let Some(timer) = self.timer_mut() {
            timer.set_timing_mode(timing_mode);
        }
        self
    }

    /// Set the speed of a durational action; other actions are unchanged.
    pub fn with_speed(mut self, speed: f64) -> Self {
        if let Some(timer) = self.timer_mut() {
            timer.set_speed(speed);
        }
        self
    }

    pub fn sequence(actions: Vec<Action>) -> Self {
        Action::Sequence(Sequence::new(actions))
    }

    pub fn group(actions: Vec<Action>) -> Self {
        Action::Group(Group::new(actions))
    }

    /// Repeat `action` `count` times; 0 repeats forever.
    pub fn repeat(action: Action, count: usize) -> Self {
        Action::Repeat(Repeat::new(action, count))
    }

    pub fn repeat_forever(action: Action) -> Self {
        Action::Repeat(Repeat::new(action, 0))
    }

    pub fn wait(duration: f64) -> Self {
        Action::Wait(Wait::new(duration))
    }

    /// Timed custom action calling `selector` on a weakly held target every update.
    pub fn custom(weak_target: impl Into<String>, selector: impl Into<String>, duration: f64, user_data: Value) -> Self {
        Action::Custom(TimedCustom::new(
            TargetId::new(weak_target),
            Selector::new(selector),
            duration,
            user_data,
        ))
    }

    pub fn move_by(delta: DVec2, duration: f64) -> Self {
        Action::MoveBy(MoveBy::new(delta, duration))
    }

    /// Move to `destination`, starting from the node's position at the first update.
    pub fn move_to(destination: DVec2, duration: f64) -> Self {
        Action::MoveTo(MoveTo::new(None, destination, duration))
    }

    pub fn move_from_to(origin: DVec2, destination: DVec2, duration: f64) -> Self {
        Action::MoveTo(MoveTo::new(Some(origin), destination, duration))
    }

    /// Chase `destination` from the node's position at the first update.
    pub fn chase(destination: DVec2, duration: f64) -> Self {
        Action::Chase(Chase::new(None, destination, duration))
    }

    pub fn chase_from(origin: DVec2, destination: DVec2, duration: f64) -> Self {
        Action::Chase(Chase::new(Some(origin), destination, duration))
    }

    /// Chase the point a weakly held target reports through `selector`.
    pub fn chase_target(weak_target: impl Into<String>, selector: impl Into<String>, duration: f64) -> Self {
        Action::ChaseTarget(ChaseTarget::new(None, TargetId::new(weak_target), Selector::new(selector), duration))
    }

    pub fn chase_target_from(
        origin: DVec2,
        weak_target: impl Into<String>,
        selector: impl Into<String>,
        duration: f64,
    ) -> Self {
        Action::ChaseTarget(ChaseTarget::new(
            Some(origin),
            TargetId::new(weak_target),
            Selector::new(selector),
            duration,
        ))
    }

    pub fn fade_alpha_by(delta: f64, duration: f64) -> Self {
        Action::FadeAlphaBy(FadeAlphaBy::new(delta, duration))
    }

    pub fn fade_alpha_to(alpha: f64, duration: f64) -> Self {
        Action::FadeAlphaTo(FadeAlphaTo::new(None, alpha, duration))
    }

    pub fn fade_alpha_from_to(from: f64, to: f64, duration: f64) -> Self {
        Action::FadeAlphaTo(FadeAlphaTo::new(Some(from), to, duration))
    }

    pub fn fade_in(duration: f64) -> Self {
        Self::fade_alpha_to(1.0, duration)
    }

    pub fn fade_out(duration: f64) -> Self {
        Self::fade_alpha_to(0.0, duration)
    }

    /// Add `delta` to both x and y scale.
    pub fn scale_by(delta: f64, duration: f64) -> Self {
        Action::ScaleBy(ScaleBy::new(DVec2::splat(delta), duration))
    }

    pub fn scale_xy_by(delta: DVec2, duration: f64) -> Self {
        Action::ScaleBy(ScaleBy::new(delta, duration))
    }

    pub fn scale_to(scale: DVec2, duration: f64) -> Self {
        Action::ScaleTo(ScaleTo::new(None, scale, duration))
    }

    pub fn scale_from_to(from: DVec2, to: DVec2, duration: f64) -> Self {
        Action::ScaleTo(ScaleTo::new(Some(from), to, duration))
    }

    /// Rotate by `angle` radians, counter-clockwise.
    pub fn rotate_by(angle: f64, duration: f64) -> Self {
        Action::RotateBy(RotateBy::new(angle, duration))
    }

    /// Rotate to `angle` radians from the node's rotation at the first update.
    pub fn rotate_to(angle: f64, duration: f64, shortest_unit_arc: bool) -> Self {
        Action::RotateTo(RotateTo::new(None, angle, duration, shortest_unit_arc))
    }

    pub fn rotate_from_to(from: f64, to: f64, duration: f64, shortest_unit_arc: bool) -> Self {
        Action::RotateTo(RotateTo::new(Some(from), to, duration, shortest_unit_arc))
    }

    pub fn change_z_position_by(delta: f64, duration: f64) -> Self {
        Action::ChangeZPositionBy(ChangeZPositionBy::new(delta, duration))
    }

    pub fn change_z_position_to(z_position: f64, duration: f64) -> Self {
        Action::ChangeZPositionTo(ChangeZPositionTo::new(None, z_position, duration))
    }

    pub fn change_z_position_from_to(from: f64, to: f64, duration: f64) -> Self {
        Action::ChangeZPositionTo(ChangeZPositionTo::new(Some(from), to, duration))
    }

    pub fn remove_from_parent() -> Self {
        Action::RemoveFromParent
    }
}

/// Starting value of a node-relative action: the explicit one, else the node's
/// current value, captured once.
pub(crate) fn capture_start<T: Copy>(
    slot: &mut Option<T>,
    ctx: &ActionContext<'_>,
    read: impl FnOnce(&dyn ActionNode) -> T,
    action: &'static str,
) -> ActionResult<T> {
    if let Some(value) = *slot {
        return Ok(value);
    }
    let value = ctx.node_value(read).ok_or(ActionError::MissingNode { action })?;
    *slot = Some(value);
    Ok(value)
}

macro_rules! impl_from_action {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Action {
                fn from(action: $ty) -> Self {
                    Action::$variant(action)
                }
            }
        )*
    };
}

impl_from_action!(
    Invoke(Invoke),
    Custom(TimedCustom),
    Sequence(Sequence),
    Group(Group),
    Repeat(Repeat),
    Wait(Wait),
    MoveBy(MoveBy),
    MoveTo(MoveTo),
    Chase(Chase),
    ChaseTarget(ChaseTarget),
    FadeAlphaBy(FadeAlphaBy),
    FadeAlphaTo(FadeAlphaTo),
    ScaleBy(ScaleBy),
    ScaleTo(ScaleTo),
    RotateBy(RotateBy),
    RotateTo(RotateTo),
    ChangeZPositionBy(ChangeZPositionBy),
    ChangeZPositionTo(ChangeZPositionTo),
);
