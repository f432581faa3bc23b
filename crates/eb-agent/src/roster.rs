//! The ordered collection of agents owned by one simulator.

use eb_core::{AgentConfig, AgentId};
use eb_scene::{NodeHandle, SceneGraph};

use crate::agent::Agent;
use crate::error::{AgentError, AgentResult};

/// Ordered agent collection; `AgentId(i)` addresses the agent built from the
/// i-th `AgentConfig`.
#[derive(Default)]
pub struct AgentRoster {
    agents: Vec<Agent>,
}

impl AgentRoster {
    /// Build a detached roster, one agent per configuration, in order.
    pub fn from_configs(configs: &[AgentConfig]) -> Self {
        Self {
            agents: configs.iter().cloned().map(Agent::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// All `AgentId`s in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.agents.len() as u32).map(AgentId)
    }

    pub fn get(&self, id: AgentId) -> AgentResult<&Agent> {
        self.agents
            .get(id.index())
            .ok_or(AgentError::UnknownAgent(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter()
    }

    /// Attach every agent to a fresh child node of `parent`, in order.
    ///
    /// Must only run after [`detach_all`](Self::detach_all) (or on a fresh
    /// graph) so that no node is ever shared between two live agents.
    pub fn attach_all(&mut self, graph: &mut SceneGraph, parent: NodeHandle) -> AgentResult<()> {
        for agent in &mut self.agents {
            agent.attach(graph, parent)?;
        }
        Ok(())
    }

    /// Detach every agent, releasing their scene-graph subtrees.
    pub fn detach_all(&mut self, graph: &mut SceneGraph) {
        for agent in &mut self.agents {
            agent.detach(graph);
        }
    }

    /// Drop all agents (used by simulator close).
    pub fn clear(&mut self) {
        self.agents.clear();
    }
}
