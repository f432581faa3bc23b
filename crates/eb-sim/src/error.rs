//! Top-level error type; lower-crate errors convert upward via `#[from]`.

use eb_agent::AgentError;
use eb_scene::BackendError;
use eb_sensor::SensorError;
use thiserror::Error;

pub type SimResult<T> = Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    /// The configuration cannot describe a runnable simulation.
    #[error("invalid simulator configuration: {0}")]
    InvalidConfiguration(String),

    /// The simulator was closed; only `close` itself remains callable.
    #[error("simulator is closed")]
    Closed,

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Sensor(#[from] SensorError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}
