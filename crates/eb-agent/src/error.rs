use eb_core::AgentId;
use eb_scene::SceneError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent {0} not found in roster")]
    UnknownAgent(AgentId),

    #[error("action {0:?} is not in the agent's action space")]
    UnknownAction(String),

    #[error("agent is not attached to a scene graph")]
    NotAttached,

    #[error(transparent)]
    Scene(#[from] SceneError),
}

pub type AgentResult<T> = Result<T, AgentError>;
