use thiserror::Error;

/// Errors from scene-graph operations.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The handle's node was removed (or belongs to a different graph
    /// instance).  Stale handles are expected after detachment and
    /// reconfiguration; callers treat this as "re-validate your references".
    #[error("scene node handle is no longer valid")]
    StaleHandle,

    /// Roots anchor the graph and cannot be removed or re-parented.
    #[error("scene roots cannot be removed or re-parented")]
    RootNode,

    /// Re-parenting a node beneath one of its own descendants.
    #[error("cannot re-parent a node beneath its own subtree")]
    CyclicParent,
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Errors from the backend and its renderer collaborator.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("cannot load scene {scene_id:?}: {reason}")]
    SceneLoad { scene_id: String, reason: String },

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

pub type BackendResult<T> = Result<T, BackendError>;
