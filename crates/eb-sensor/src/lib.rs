//! `eb-sensor` — per-modality frame buffers and the observation pipeline.
//!
//! # Crate layout
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | [`sensor`] | `Sensor` (bound camera + render/read/flip pipeline)   |
//! | [`buffer`] | `SensorBuffer` (typed storage), `Observation`         |
//! | [`error`]  | `SensorError`                                         |
//!
//! # Frame protocol
//!
//! A read is draw → read-back → flip: the renderer draws the scene the
//! sensor observes from the sensor's world pose, the frame lands in a
//! preallocated buffer typed for the modality (`u8` color, `f32` depth,
//! `u32` semantic), and the caller gets a fresh top-left-origin copy.
//! Buffers are allocated once per sensor and reused across frames; the
//! returned [`Observation`] never aliases them.

pub mod buffer;
pub mod error;
pub mod sensor;

#[cfg(test)]
mod tests;

pub use buffer::{Observation, SensorBuffer};
pub use error::{SensorError, SensorResult};
pub use sensor::Sensor;
