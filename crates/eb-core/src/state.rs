//! Kinematic agent state.

use crate::math::{Quat, Vec3};

/// The observable kinematic state of an agent: world-space position and
/// orientation of its body node.
///
/// `Default` is the origin with identity rotation — the state an agent has
/// before `initialize_agent` places it somewhere navigable.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentState {
    pub position: Vec3,
    pub rotation: Quat,
}

impl AgentState {
    #[inline]
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }
}
