//! `eb-scene` — scene-graph storage and the simulation backend seam.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`graph`]   | `SceneGraph` (generational node arena), `NodeHandle`          |
//! | [`backend`] | `Backend<R, P>`, `Renderer` trait, `CameraView`, `SceneKind`  |
//! | [`nav`]     | `Pathfinder` trait, `NoopPathfinder`                          |
//! | [`error`]   | `SceneError`, `BackendError`                                  |
//!
//! # Ownership model
//!
//! The scene graph exclusively owns every node.  Agents and sensors hold
//! [`NodeHandle`]s — generational indices that become invalid the moment
//! their node is removed — and must re-validate on every use via
//! [`SceneGraph::is_valid`].  This is what makes detachment safe: removing
//! an agent's subtree cannot leave a dangling reference, only a handle that
//! fails validation.
//!
//! The rendering and navigation engines are external collaborators behind
//! the [`Renderer`] and [`Pathfinder`] traits; this crate defines the
//! contract the simulator consumes and never implements rendering itself.

pub mod backend;
pub mod error;
pub mod graph;
pub mod nav;


pub use backend::{Backend, CameraView, Renderer, SceneInfo, SceneKind};
pub use error::{BackendError, BackendResult, SceneError, SceneResult};
pub use graph::{NodeHandle, SceneGraph};
pub use nav::{NoopPathfinder, Pathfinder};
