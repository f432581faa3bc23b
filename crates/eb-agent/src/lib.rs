//! `eb-agent` — agent bodies on the scene graph and their discrete controls.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`agent`]    | `Agent` — body node, sensor nodes, state get/set, `act`   |
//! | [`controls`] | Discrete action kinematics, `MoveFilter` strategy trait   |
//! | [`roster`]   | `AgentRoster` — the ordered agent collection              |
//! | [`error`]    | `AgentError`, `AgentResult<T>`                            |
//!
//! # Attachment model
//!
//! An `Agent` never owns scene state.  `attach` creates a body node (plus
//! one child node per sensor spec) in the caller's [`SceneGraph`] and keeps
//! only the handles; `detach` removes that subtree and resets the handles to
//! the invalid sentinel.  The attach/detach sequence during reconfiguration
//! is strictly ordered by the simulator (detach all, rebuild, attach all) so
//! no two live agents ever share a node.
//!
//! [`SceneGraph`]: eb_scene::SceneGraph

pub mod agent;
pub mod controls;
pub mod error;
pub mod roster;


pub use agent::Agent;
pub use controls::{MoveFilter, NoopFilter};
pub use error::{AgentError, AgentResult};
pub use roster::AgentRoster;
