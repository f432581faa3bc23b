//! The `Agent`: a configured body attached to the scene graph.

use eb_core::{AgentConfig, AgentState, Quat};
use eb_scene::{NodeHandle, SceneGraph};
use indexmap::IndexMap;

use crate::controls::{self, MoveFilter};
use crate::error::{AgentError, AgentResult};

/// One controllable body in the scene.
///
/// Holds its immutable [`AgentConfig`], a non-owning handle to its body
/// node, and one handle per mounted sensor (keyed by uuid, in sensor-spec
/// order).  All handles are `INVALID` while detached.
pub struct Agent {
    config: AgentConfig,
    node: NodeHandle,
    sensor_nodes: IndexMap<String, NodeHandle>,
}

impl Agent {
    /// Build a detached agent from its configuration.
    pub fn new(config: AgentConfig) -> Self {
        Self {
            config,
            node: NodeHandle::INVALID,
            sensor_nodes: IndexMap::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Handle of the body node; `INVALID` while detached.
    #[inline]
    pub fn node(&self) -> NodeHandle {
        self.node
    }

    /// `true` if the body node is live in `graph`.
    pub fn is_attached(&self, graph: &SceneGraph) -> bool {
        graph.is_valid(self.node)
    }

    /// Attached-object handle for the sensor `uuid`, if that sensor exists.
    pub fn sensor_node(&self, uuid: &str) -> Option<NodeHandle> {
        self.sensor_nodes.get(uuid).copied()
    }

    /// Sensor uuid → node handles in sensor-spec order.
    pub fn sensor_nodes(&self) -> impl Iterator<Item = (&str, NodeHandle)> {
        self.sensor_nodes.iter().map(|(uuid, &h)| (uuid.as_str(), h))
    }

    // ── Attachment ────────────────────────────────────────────────────────

    /// Create this agent's body node as a fresh child of `parent`, plus one
    /// child node per sensor spec posed at its mounting offset.
    ///
    /// Detaches first if already attached, so an agent is never bound to
    /// two nodes at once.
    pub fn attach(&mut self, graph: &mut SceneGraph, parent: NodeHandle) -> AgentResult<()> {
        self.detach(graph);
        self.node = graph.create_child(parent)?;
        for spec in &self.config.sensor_specs {
            let sensor = graph.create_child(self.node)?;
            graph.set_translation(sensor, spec.position)?;
            graph.set_rotation(sensor, Quat::from_euler(spec.orientation))?;
            self.sensor_nodes.insert(spec.uuid.clone(), sensor);
        }
        Ok(())
    }

    /// Remove this agent's subtree from `graph` and reset all handles.
    ///
    /// Safe to call when already detached, or when the graph that owned the
    /// nodes is already gone.
    pub fn detach(&mut self, graph: &mut SceneGraph) {
        if graph.is_valid(self.node) {
            // Subtree removal cannot fail for a validated non-root node.
            let _ = graph.remove_subtree(self.node);
        }
        self.node = NodeHandle::INVALID;
        self.sensor_nodes.clear();
    }

    // ── Kinematic state ───────────────────────────────────────────────────

    /// Place the body at `state` (world frame).
    pub fn set_state(&self, graph: &mut SceneGraph, state: AgentState) -> AgentResult<()> {
        if !graph.is_valid(self.node) {
            return Err(AgentError::NotAttached);
        }
        graph.set_translation(self.node, state.position)?;
        graph.set_rotation(self.node, state.rotation)?;
        Ok(())
    }

    /// The body's current world-frame state.
    pub fn get_state(&self, graph: &SceneGraph) -> AgentResult<AgentState> {
        if !graph.is_valid(self.node) {
            return Err(AgentError::NotAttached);
        }
        let (position, rotation) = graph.absolute_transform(self.node)?;
        Ok(AgentState { position, rotation })
    }

    // ── Actions ───────────────────────────────────────────────────────────

    /// Perform `action` against this agent's action space, routing body
    /// translations through `filter`.
    pub fn act(
        &self,
        graph: &mut SceneGraph,
        action: &str,
        filter: &dyn MoveFilter,
    ) -> AgentResult<()> {
        let actuation = *self
            .config
            .action_space
            .get(action)
            .ok_or_else(|| AgentError::UnknownAction(action.to_owned()))?;
        if !graph.is_valid(self.node) {
            return Err(AgentError::NotAttached);
        }
        controls::apply_action(graph, self.node, action, actuation, filter)
    }
}
