//! `eb-sim` — the simulator: lifecycle, stepping, and observation capture.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                |
//! |------------|---------------------------------------------------------|
//! | [`sim`]    | `Simulator<R, P>` (reconfigure/step/reset/seed/close)   |
//! | [`filter`] | `NavMeshFilter` (pathfinder-backed movement filter)     |
//! | [`error`]  | `SimError` (top of the error conversion chain)          |
//!
//! # Execution model
//!
//! One `Simulator` per backend, single-threaded and blocking: every call
//! runs to completion before the next begins.  Collaborators (renderer,
//! navigation mesh) plug in through the `eb-scene` traits at construction.

pub mod error;
pub mod filter;
pub mod sim;

#[cfg(test)]
mod tests;

pub use error::{SimError, SimResult};
pub use filter::NavMeshFilter;
pub use sim::{Observations, Simulator};
