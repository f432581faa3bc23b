//! Discrete action kinematics.
//!
//! Each action name maps to a fixed kinematic update of the agent's body
//! node: translations move along the body's own axes (forward is local −Z),
//! rotations turn about the body's own axes.  Translation amounts are in
//! metres, rotation amounts in degrees.
//!
//! # Movement filtering
//!
//! Body translations are routed through a [`MoveFilter`]: after the raw
//! move, the filter sees the absolute start and end positions and returns
//! the position the body is actually allowed to reach (e.g. clamped to a
//! navigation mesh).  The filter is an injected strategy — agents stay
//! mesh-agnostic, and the simulator decides what constraint to apply.
//! Rotations are never filtered.

use eb_core::{ActuationSpec, Vec3};
use eb_scene::{NodeHandle, SceneGraph};

use crate::error::{AgentError, AgentResult};

// ── MoveFilter strategy ───────────────────────────────────────────────────────

/// Post-move position constraint applied to body translations.
pub trait MoveFilter {
    /// Given the absolute positions before and after a proposed move,
    /// return the adjusted end position.
    fn filter(&self, start: Vec3, end: Vec3) -> Vec3;
}

/// A [`MoveFilter`] that allows every move unchanged.
pub struct NoopFilter;

impl MoveFilter for NoopFilter {
    fn filter(&self, _start: Vec3, end: Vec3) -> Vec3 {
        end
    }
}

// ── Control table ─────────────────────────────────────────────────────────────

/// The kinematic effect of one action.
enum Control {
    /// Translate along `direction` (unit vector in body space) by `amount` metres.
    Move(Vec3),
    /// Rotate about `axis` (body space) by `amount` degrees.
    Rotate(Vec3),
}

/// Resolve an action name to its kinematic effect.
///
/// `turn_*` and `look_*` are aliases for the same yaw/pitch rotations, kept
/// separate in action spaces because they mean different things to policies.
fn control_for(action: &str) -> Option<Control> {
    let control = match action {
        "move_forward" => Control::Move(Vec3::new(0.0, 0.0, -1.0)),
        "move_backward" => Control::Move(Vec3::UNIT_Z),
        "move_left" => Control::Move(Vec3::new(-1.0, 0.0, 0.0)),
        "move_right" => Control::Move(Vec3::UNIT_X),
        "move_up" => Control::Move(Vec3::UNIT_Y),
        "move_down" => Control::Move(Vec3::new(0.0, -1.0, 0.0)),
        "turn_left" | "look_left" => Control::Rotate(Vec3::UNIT_Y),
        "turn_right" | "look_right" => Control::Rotate(Vec3::new(0.0, -1.0, 0.0)),
        "look_up" => Control::Rotate(Vec3::UNIT_X),
        "look_down" => Control::Rotate(Vec3::new(-1.0, 0.0, 0.0)),
        _ => return None,
    };
    Some(control)
}

/// Apply `action` to `node`, filtering body translations through `filter`.
pub(crate) fn apply_action(
    graph: &mut SceneGraph,
    node: NodeHandle,
    action: &str,
    actuation: ActuationSpec,
    filter: &dyn MoveFilter,
) -> AgentResult<()> {
    match control_for(action).ok_or_else(|| AgentError::UnknownAction(action.to_owned()))? {
        Control::Move(direction) => {
            let start = graph.absolute_position(node)?;
            graph.translate_local(node, direction.scaled(actuation.amount))?;
            let end = graph.absolute_position(node)?;
            let allowed = filter.filter(start, end);
            graph.translate_world(node, allowed - end)?;
        }
        Control::Rotate(axis) => {
            graph.rotate_local(node, axis, actuation.amount.to_radians())?;
        }
    }
    Ok(())
}
