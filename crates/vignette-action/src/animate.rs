//! Animated layout: run a layout manager, then move nodes there over time.

use glam::DVec2;
use vignette_core::{LayoutItem, LayoutNode, LayoutResult};
use vignette_layout::LayoutManager;

use crate::action::Action;

/// Lay out `nodes` with `manager` without moving them, returning per slot the
/// action that carries the node to its new position.
///
/// Each action waits `delay` seconds and then moves to the target over
/// `duration`; the move starts from wherever the node is when the wait ends.
/// Empty slots, and nodes the manager left where they were, get `None`. The
/// manager's inspected state (sizes, counts) is updated as by a plain layout.
pub fn animated_layout<M, N>(
    manager: &mut M,
    nodes: &[Option<N>],
    duration: f64,
    delay: f64,
) -> LayoutResult<Vec<Option<Action>>>
where
    M: LayoutManager,
    N: LayoutNode,
{
    let mut staged: Vec<Option<LayoutItem>> = nodes
        .iter()
        .map(|slot| slot.as_ref().map(|node| LayoutItem { kind: node.kind(), position: node.position() }))
        .collect();
    manager.layout(&mut staged)?;

    let actions: Vec<Option<Action>> = nodes
        .iter()
        .zip(&staged)
        .map(|(slot, target)| match (slot, target) {
            (Some(node), Some(target)) if node.position() != target.position => {
                Some(move_after(target.position, duration, delay))
            }
            _ => None,
        })
        .collect();
    log::debug!(
        "animated layout: {} of {} slots move over {duration}s after {delay}s",
        actions.iter().flatten().count(),
        nodes.len()
    );
    Ok(actions)
}

fn move_after(destination: DVec2, duration: f64, delay: f64) -> Action {
    let move_to = Action::move_to(destination, duration);
    if delay > 0.0 {
        Action::sequence(vec![Action::wait(delay), move_to])
    } else {
        move_to
    }
}
