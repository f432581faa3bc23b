//! Error types for eb-sensor.

use eb_scene::{BackendError, SceneError};
use thiserror::Error;

pub type SensorResult<T> = Result<T, SensorError>;

#[derive(Debug, Error)]
pub enum SensorError {
    /// The agent's configuration has no sensor spec with this uuid.
    #[error("agent has no sensor '{uuid}'")]
    UnknownSensor { uuid: String },

    /// The sensor's scene nodes are gone (agent detached or scene replaced).
    #[error("sensor '{uuid}' is no longer attached to a live scene node")]
    InvalidAttachedObject { uuid: String },

    /// A semantic sensor was read against a scene with no semantic annotations.
    #[error("scene has no semantic annotations")]
    NoSemanticScene,

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}
