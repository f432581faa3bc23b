//! The sensor object: one mounted camera and its read-back pipeline.

use eb_agent::Agent;
use eb_core::{SensorSpec, SensorType};
use eb_scene::{Backend, CameraView, NodeHandle, Pathfinder, Renderer, SceneKind};

use crate::buffer::{Observation, SensorBuffer};
use crate::error::{SensorError, SensorResult};

/// One live sensor, bound to the scene nodes of the agent that mounts it.
///
/// The sensor keeps handles to its own node and to the agent's body node,
/// plus a buffer sized for its spec.  It never owns scene state: when the
/// agent detaches or the scene is replaced, both handles stop validating and
/// reads fail with [`SensorError::InvalidAttachedObject`].
#[derive(Debug)]
pub struct Sensor {
    uuid: String,
    spec: SensorSpec,
    agent_node: NodeHandle,
    node: NodeHandle,
    buffer: SensorBuffer,
}

impl Sensor {
    /// Bind the sensor `uuid` mounted on `agent`.
    ///
    /// The agent must already be attached, so its sensor nodes exist.
    pub fn new(agent: &Agent, uuid: &str) -> SensorResult<Self> {
        let missing = || SensorError::UnknownSensor {
            uuid: uuid.to_owned(),
        };
        let node = agent.sensor_node(uuid).ok_or_else(missing)?;
        let spec = agent
            .config()
            .sensor_specs
            .iter()
            .find(|spec| spec.uuid == uuid)
            .cloned()
            .ok_or_else(missing)?;
        Ok(Self {
            uuid: uuid.to_owned(),
            buffer: SensorBuffer::for_spec(&spec),
            spec,
            agent_node: agent.node(),
            node,
        })
    }

    #[inline]
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    #[inline]
    pub fn spec(&self) -> &SensorSpec {
        &self.spec
    }

    /// Which scene graph this sensor renders against.
    pub fn scene_kind(&self) -> SceneKind {
        match self.spec.sensor_type {
            SensorType::Semantic => SceneKind::Semantic,
            SensorType::Color | SensorType::Depth => SceneKind::Default,
        }
    }

    /// Render and return one frame from this sensor's point of view.
    ///
    /// Reparents the agent under the scene graph this sensor observes, draws
    /// the scene from the sensor's world pose, reads the frame into the
    /// preallocated buffer, and cuts a fresh top-left-origin observation.
    pub fn get_observation<R: Renderer, P: Pathfinder>(
        &mut self,
        backend: &mut Backend<R, P>,
    ) -> SensorResult<Observation> {
        if !backend.graph.is_valid(self.agent_node) || !backend.graph.is_valid(self.node) {
            return Err(SensorError::InvalidAttachedObject {
                uuid: self.uuid.clone(),
            });
        }
        let root = backend
            .scene_root(self.scene_kind())
            .ok_or(SensorError::NoSemanticScene)?;

        // The agent body migrates to whichever scene graph is being read;
        // its world pose is unchanged because roots carry the identity.
        backend.graph.set_parent(self.agent_node, root)?;

        let (position, rotation) = backend.graph.absolute_transform(self.node)?;
        let view = CameraView {
            position,
            rotation,
            width: self.spec.width(),
            height: self.spec.height(),
        };
        backend.renderer.draw(&view, &backend.graph, root)?;
        match &mut self.buffer {
            SensorBuffer::Color(pixels) => backend.renderer.read_frame_rgba(pixels)?,
            SensorBuffer::Depth(data) => backend.renderer.read_frame_depth(data)?,
            SensorBuffer::Semantic(data) => backend.renderer.read_frame_object_id(data)?,
        }
        Ok(self.buffer.to_observation(&self.spec))
    }
}
