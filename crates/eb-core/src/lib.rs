//! `eb-core` — foundational types for the `rust_embody` simulation framework.
//!
//! This crate is a dependency of every other `eb-*` crate.  It intentionally
//! has no `eb-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`ids`]    | `AgentId`                                                  |
//! | [`math`]   | `Vec3`, `Quat` — the minimal 3D math the framework needs   |
//! | [`config`] | `SimulatorConfiguration`, `AgentConfig`, `SensorSpec`      |
//! | [`state`]  | `AgentState` (position + rotation)                         |
//! | [`rng`]    | `SimRng` — deterministic simulation-level RNG              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.       |

pub mod config;
pub mod ids;
pub mod math;
pub mod rng;
pub mod state;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ActuationSpec, AgentConfig, SensorSpec, SensorType, SimulatorConfiguration};
pub use ids::AgentId;
pub use math::{Quat, Vec3};
pub use rng::SimRng;
pub use state::AgentState;
