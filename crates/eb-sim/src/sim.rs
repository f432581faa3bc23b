//! The simulator: configuration lifecycle, stepping, and observation capture.
//!
//! # Reconfiguration protocol
//!
//! `reconfigure` is idempotent on structural equality: a configuration equal
//! to the committed one returns immediately without touching the backend or
//! the agents.  Any difference triggers the full sequence — detach all
//! agents from the old graph, rebuild the backend scene, re-attach to fresh
//! nodes, rebuild the sensor map, and re-initialize every agent.  The old
//! graph is dropped wholesale, so every pre-reconfigure `NodeHandle` stops
//! validating; nothing can observe the previous scene through a stale
//! handle.  A failure partway through is fatal for this simulator (no
//! rollback): the error propagates and the instance should be closed.
//!
//! # Determinism
//!
//! All built-in randomness (initial placement, random yaw) flows through one
//! `SimRng` seeded from the configuration; the pathfinder receives the same
//! seed through its own hook.  `seed` restores both streams.

use std::f32::consts::TAU;

use eb_agent::{Agent, AgentRoster};
use eb_core::{AgentId, AgentState, Quat, SimRng, SimulatorConfiguration, Vec3};
use eb_scene::{Backend, Pathfinder, Renderer};
use eb_sensor::{Observation, Sensor};
use indexmap::IndexMap;

use crate::error::{SimError, SimResult};
use crate::filter::NavMeshFilter;

/// One observation per sensor, keyed by uuid in sensor-spec order.
pub type Observations = IndexMap<String, Observation>;

/// The embodied simulator.
///
/// Owns at most one live [`Backend`], the agent roster, and the default
/// agent's sensors.  All methods take `&mut self`; the execution model is
/// single-threaded and blocking, so reentrancy cannot occur.
pub struct Simulator<R: Renderer, P: Pathfinder> {
    backend: Option<Backend<R, P>>,
    config: Option<SimulatorConfiguration>,
    agents: AgentRoster,
    sensors: IndexMap<String, Sensor>,
    frames: u64,
    last_state: AgentState,
    rng: SimRng,
}

impl<R: Renderer, P: Pathfinder> Simulator<R, P> {
    /// Build a simulator and run its first configuration pass.
    pub fn new(config: SimulatorConfiguration, renderer: R, pathfinder: P) -> SimResult<Self> {
        let mut sim = Self {
            backend: None,
            config: None,
            agents: AgentRoster::default(),
            sensors: IndexMap::new(),
            frames: 0,
            last_state: AgentState::default(),
            rng: SimRng::new(config.seed),
        };
        sim.apply(config, Some((renderer, pathfinder)))?;
        Ok(sim)
    }

    /// Apply `config`, rebuilding scene, attachments, and sensors as needed.
    ///
    /// A configuration structurally equal to the committed one is a no-op.
    pub fn reconfigure(&mut self, config: SimulatorConfiguration) -> SimResult<()> {
        self.apply(config, None)
    }

    fn apply(
        &mut self,
        mut config: SimulatorConfiguration,
        parts: Option<(R, P)>,
    ) -> SimResult<()> {
        Self::validate(&config)?;
        normalize(&mut config);
        if self.backend.is_some() && self.config.as_ref() == Some(&config) {
            return Ok(());
        }

        // Both random streams restart from the configuration seed: the
        // pathfinder through the backend, the yaw sampler here.
        self.rng = SimRng::new(config.seed);

        // Handles into the old graph must be cleared before it is replaced;
        // a recycled slot in the new graph could otherwise validate them.
        self.sensors.clear();
        if let Some(backend) = self.backend.as_mut() {
            self.agents.detach_all(&mut backend.graph);
        }

        let agents_changed = self
            .config
            .as_ref()
            .map_or(true, |committed| committed.agents != config.agents);
        if agents_changed {
            self.agents = AgentRoster::from_configs(&config.agents);
        }

        if let Some(backend) = self.backend.as_mut() {
            backend.reconfigure(&config)?;
        } else {
            let (renderer, pathfinder) = parts.ok_or(SimError::Closed)?;
            self.backend = Some(Backend::create(renderer, pathfinder, &config)?);
        }
        let backend = self.backend.as_mut().ok_or(SimError::Closed)?;

        let root = backend.graph.root();
        self.agents.attach_all(&mut backend.graph, root)?;

        // The sensor map is rebuilt from scratch on every reconfiguration.
        let default_agent = self.agents.get(AgentId(config.default_agent_id as u32))?;
        for spec in &default_agent.config().sensor_specs {
            let sensor = Sensor::new(default_agent, &spec.uuid)?;
            self.sensors.insert(spec.uuid.clone(), sensor);
        }

        self.config = Some(config);
        let ids: Vec<AgentId> = self.agents.ids().collect();
        for id in ids {
            self.initialize_agent(id, None)?;
        }
        Ok(())
    }

    fn validate(config: &SimulatorConfiguration) -> SimResult<()> {
        if config.agents.is_empty() {
            return Err(SimError::InvalidConfiguration(
                "at least one agent configuration is required".to_owned(),
            ));
        }
        if config.default_agent_id >= config.agents.len() {
            return Err(SimError::InvalidConfiguration(format!(
                "default_agent_id {} out of range for {} agent(s)",
                config.default_agent_id,
                config.agents.len()
            )));
        }
        if config.agents[0].sensor_specs.is_empty() {
            return Err(SimError::InvalidConfiguration(
                "the first agent must carry at least one sensor".to_owned(),
            ));
        }
        Ok(())
    }

    // ── Agents ────────────────────────────────────────────────────────────

    /// Place agent `id` at `initial`, or at a random navigable position with
    /// uniform random yaw when `None`.  Returns the applied state.
    pub fn initialize_agent(
        &mut self,
        id: AgentId,
        initial: Option<AgentState>,
    ) -> SimResult<AgentState> {
        let backend = self.backend.as_mut().ok_or(SimError::Closed)?;
        let state = match initial {
            Some(state) => state,
            None => AgentState {
                position: backend.pathfinder.random_navigable_point(),
                rotation: Quat::from_axis_angle(Vec3::UNIT_Y, self.rng.gen_range(0.0..TAU)),
            },
        };
        self.agents.get(id)?.set_state(&mut backend.graph, state)?;
        if self.config.as_ref().map(|c| c.default_agent_id) == Some(id.index()) {
            self.last_state = state;
        }
        Ok(state)
    }

    pub fn get_agent(&self, id: AgentId) -> SimResult<&Agent> {
        Ok(self.agents.get(id)?)
    }

    /// Current world-frame state of agent `id`.
    pub fn get_agent_state(&self, id: AgentId) -> SimResult<AgentState> {
        let backend = self.backend.as_ref().ok_or(SimError::Closed)?;
        Ok(self.agents.get(id)?.get_state(&backend.graph)?)
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Perform `action` with the default agent, then capture one observation
    /// per sensor.  The frame counter advances exactly once per call.
    pub fn step(&mut self, action: &str) -> SimResult<Observations> {
        let config = self.config.as_ref().ok_or(SimError::Closed)?;
        let default_id = AgentId(config.default_agent_id as u32);
        let backend = self.backend.as_mut().ok_or(SimError::Closed)?;
        self.frames += 1;

        let agent = self.agents.get(default_id)?;
        let filter = NavMeshFilter::new(&backend.pathfinder);
        agent.act(&mut backend.graph, action, &filter)?;
        self.last_state = agent.get_state(&backend.graph)?;

        self.get_sensor_observations()
    }

    /// One observation per sensor of the default agent, in spec order.
    pub fn get_sensor_observations(&mut self) -> SimResult<Observations> {
        let backend = self.backend.as_mut().ok_or(SimError::Closed)?;
        let mut observations = Observations::with_capacity(self.sensors.len());
        for (uuid, sensor) in self.sensors.iter_mut() {
            observations.insert(uuid.clone(), sensor.get_observation(&mut *backend)?);
        }
        Ok(observations)
    }

    /// Forward the renderer's reset hook and capture a fresh observation set.
    pub fn reset(&mut self) -> SimResult<Observations> {
        let backend = self.backend.as_mut().ok_or(SimError::Closed)?;
        backend.reset();
        self.get_sensor_observations()
    }

    /// Reseed the simulation RNG and the pathfinder.
    pub fn seed(&mut self, seed: u64) {
        self.rng = SimRng::new(seed);
        if let Some(backend) = self.backend.as_mut() {
            backend.seed(seed);
        }
    }

    // ── Introspection ─────────────────────────────────────────────────────

    /// The committed configuration; `None` once closed.
    pub fn configuration(&self) -> Option<&SimulatorConfiguration> {
        self.config.as_ref()
    }

    /// Total frames stepped over this simulator's lifetime.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// The default agent's state as of the last step or initialization.
    pub fn last_state(&self) -> AgentState {
        self.last_state
    }

    pub fn backend(&self) -> Option<&Backend<R, P>> {
        self.backend.as_ref()
    }

    pub fn is_closed(&self) -> bool {
        self.backend.is_none()
    }

    // ── Teardown ──────────────────────────────────────────────────────────

    /// Release all simulation state.  Safe to call repeatedly; every other
    /// operation fails with [`SimError::Closed`] afterwards.
    pub fn close(&mut self) {
        self.sensors.clear();
        if let Some(backend) = self.backend.as_mut() {
            self.agents.detach_all(&mut backend.graph);
        }
        self.agents.clear();
        self.backend = None;
        self.config = None;
    }
}

impl<R: Renderer, P: Pathfinder> Drop for Simulator<R, P> {
    fn drop(&mut self) {
        self.close();
    }
}

/// Pin the render target to the primary sensor's resolution.
fn normalize(config: &mut SimulatorConfiguration) {
    let primary = &config.agents[0].sensor_specs[0];
    config.height = primary.height();
    config.width = primary.width();
}
