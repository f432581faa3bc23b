//! Unit tests for eb-sim.

use eb_core::{
    AgentConfig, AgentId, AgentState, Quat, SensorSpec, SensorType, SimRng,
    SimulatorConfiguration, Vec3,
};
use eb_scene::{
    BackendResult, CameraView, NodeHandle, Pathfinder, Renderer, SceneGraph, SceneInfo,
};
use eb_sensor::Observation;

use crate::error::SimError;
use crate::sim::Simulator;

// ── Fixture collaborators ─────────────────────────────────────────────────────

/// Renderer fake that counts configuration work and fills constant frames.
#[derive(Default)]
struct CountingRenderer {
    scenes_loaded: Vec<String>,
    resolution: (u32, u32),
    resets: u32,
}

impl Renderer for CountingRenderer {
    fn set_resolution(&mut self, width: u32, height: u32) -> BackendResult<()> {
        self.resolution = (width, height);
        Ok(())
    }

    fn load_scene(
        &mut self,
        scene_id: &str,
        graph: &mut SceneGraph,
        root: NodeHandle,
    ) -> BackendResult<SceneInfo> {
        self.scenes_loaded.push(scene_id.to_owned());
        graph.create_child(root)?;
        Ok(SceneInfo::default())
    }

    fn load_semantic_scene(
        &mut self,
        _scene_id: &str,
        _graph: &mut SceneGraph,
        _root: NodeHandle,
    ) -> BackendResult<()> {
        Ok(())
    }

    fn draw(
        &mut self,
        _view: &CameraView,
        _graph: &SceneGraph,
        _root: NodeHandle,
    ) -> BackendResult<()> {
        Ok(())
    }

    fn read_frame_rgba(&mut self, out: &mut [u8]) -> BackendResult<()> {
        out.fill(0x7f);
        Ok(())
    }

    fn read_frame_depth(&mut self, out: &mut [f32]) -> BackendResult<()> {
        out.fill(1.0);
        Ok(())
    }

    fn read_frame_object_id(&mut self, out: &mut [u32]) -> BackendResult<()> {
        out.fill(0);
        Ok(())
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}

/// A flat square mesh: every point with |x|, |z| ≤ 5 at y = 0 is navigable.
struct GridPathfinder {
    rng: SimRng,
}

impl Default for GridPathfinder {
    fn default() -> Self {
        Self {
            rng: SimRng::new(0),
        }
    }
}

impl Pathfinder for GridPathfinder {
    fn is_loaded(&self) -> bool {
        true
    }

    fn seed(&mut self, seed: u64) {
        self.rng = SimRng::new(seed);
    }

    fn random_navigable_point(&mut self) -> Vec3 {
        Vec3::new(
            self.rng.gen_range(-5.0..5.0_f32),
            0.0,
            self.rng.gen_range(-5.0..5.0_f32),
        )
    }

    fn try_step(&self, _start: Vec3, end: Vec3) -> Vec3 {
        Vec3::new(end.x.clamp(-5.0, 5.0), 0.0, end.z.clamp(-5.0, 5.0))
    }
}

// ── Fixtures ──────────────────────────────────────────────────────────────────

fn spec(uuid: &str, sensor_type: SensorType, height: u32, width: u32, channels: u32) -> SensorSpec {
    SensorSpec {
        uuid: uuid.to_owned(),
        sensor_type,
        resolution: [height, width],
        channels,
        ..SensorSpec::default()
    }
}

fn one_agent_config(scene_id: &str) -> SimulatorConfiguration {
    SimulatorConfiguration {
        scene_id: scene_id.to_owned(),
        agents: vec![AgentConfig {
            sensor_specs: vec![
                spec("rgba", SensorType::Color, 4, 6, 4),
                spec("depth", SensorType::Depth, 4, 6, 1),
            ],
            ..AgentConfig::default()
        }],
        ..SimulatorConfiguration::default()
    }
}

fn new_sim(config: SimulatorConfiguration) -> Simulator<CountingRenderer, GridPathfinder> {
    Simulator::new(config, CountingRenderer::default(), GridPathfinder::default()).unwrap()
}

// ── Configuration lifecycle ───────────────────────────────────────────────────

#[cfg(test)]
mod reconfigure_tests {
    use super::*;

    #[test]
    fn construction_loads_scene_and_normalizes_resolution() {
        let sim = new_sim(one_agent_config("apartment_0"));
        let backend = sim.backend().unwrap();
        assert_eq!(backend.renderer.scenes_loaded, ["apartment_0"]);
        // width × height from the primary (first) sensor's 4×6 resolution.
        assert_eq!(backend.renderer.resolution, (6, 4));
        let committed = sim.configuration().unwrap();
        assert_eq!((committed.height, committed.width), (4, 6));
    }

    #[test]
    fn equal_config_short_circuits() {
        let mut sim = new_sim(one_agent_config("apartment_0"));
        let node_before = sim.get_agent(AgentId(0)).unwrap().node();

        // A fresh instance with the same values must be a no-op.
        sim.reconfigure(one_agent_config("apartment_0")).unwrap();

        assert_eq!(sim.backend().unwrap().renderer.scenes_loaded.len(), 1);
        assert_eq!(sim.get_agent(AgentId(0)).unwrap().node(), node_before);
    }

    #[test]
    fn changed_scene_reloads_and_invalidates_old_handles() {
        let mut sim = new_sim(one_agent_config("apartment_0"));
        let old_node = sim.get_agent(AgentId(0)).unwrap().node();

        sim.reconfigure(one_agent_config("office_3")).unwrap();

        let backend = sim.backend().unwrap();
        assert_eq!(backend.renderer.scenes_loaded, ["apartment_0", "office_3"]);
        assert!(!backend.graph.is_valid(old_node));
        assert!(backend.graph.is_valid(sim.get_agent(AgentId(0)).unwrap().node()));
    }

    #[test]
    fn growing_to_two_agents_attaches_both_on_fresh_nodes() {
        let mut sim = new_sim(one_agent_config("apartment_0"));

        let mut config = one_agent_config("apartment_0");
        config.agents.push(AgentConfig::default());
        sim.reconfigure(config).unwrap();

        assert_eq!(sim.agent_count(), 2);
        let a = sim.get_agent(AgentId(0)).unwrap().node();
        let b = sim.get_agent(AgentId(1)).unwrap().node();
        assert_ne!(a, b);
        let graph = &sim.backend().unwrap().graph;
        assert!(graph.is_valid(a));
        assert!(graph.is_valid(b));
    }

    #[test]
    fn empty_agent_list_rejected() {
        let mut config = one_agent_config("apartment_0");
        config.agents.clear();
        let err = Simulator::new(
            config,
            CountingRenderer::default(),
            GridPathfinder::default(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, SimError::InvalidConfiguration(_)));
    }

    #[test]
    fn default_agent_id_out_of_range_rejected() {
        let mut config = one_agent_config("apartment_0");
        config.default_agent_id = 1;
        let err = Simulator::new(
            config,
            CountingRenderer::default(),
            GridPathfinder::default(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, SimError::InvalidConfiguration(_)));
    }

    #[test]
    fn sensorless_primary_agent_rejected() {
        let mut config = one_agent_config("apartment_0");
        config.agents[0].sensor_specs.clear();
        let err = Simulator::new(
            config,
            CountingRenderer::default(),
            GridPathfinder::default(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, SimError::InvalidConfiguration(_)));
    }
}

// ── Stepping and observations ─────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use super::*;

    #[test]
    fn step_advances_frame_counter_by_exactly_one() {
        let mut sim = new_sim(one_agent_config("apartment_0"));
        assert_eq!(sim.frame_count(), 0);
        sim.step("move_forward").unwrap();
        assert_eq!(sim.frame_count(), 1);
        sim.step("turn_left").unwrap();
        assert_eq!(sim.frame_count(), 2);
    }

    #[test]
    fn step_returns_one_observation_per_sensor_in_spec_order() {
        let mut sim = new_sim(one_agent_config("apartment_0"));
        let observations = sim.step("move_forward").unwrap();
        let uuids: Vec<&str> = observations.keys().map(String::as_str).collect();
        assert_eq!(uuids, ["rgba", "depth"]);
        assert!(matches!(observations["rgba"], Observation::Color { .. }));
        assert!(matches!(observations["depth"], Observation::Depth { .. }));
    }

    #[test]
    fn unknown_action_propagates_agent_error() {
        let mut sim = new_sim(one_agent_config("apartment_0"));
        let frames_before = sim.frame_count();
        let err = sim.step("teleport").unwrap_err();
        assert!(matches!(err, SimError::Agent(_)));
        // The frame was consumed even though the action failed.
        assert_eq!(sim.frame_count(), frames_before + 1);
    }

    #[test]
    fn step_keeps_agent_on_navigation_mesh() {
        let mut sim = new_sim(one_agent_config("apartment_0"));
        // Facing −Z at the mesh edge; forward would leave the square.
        sim.initialize_agent(
            AgentId(0),
            Some(AgentState {
                position: Vec3::new(0.0, 0.0, -4.9),
                rotation: Quat::IDENTITY,
            }),
        )
        .unwrap();

        sim.step("move_forward").unwrap();
        let state = sim.last_state();
        assert!((state.position.z - -5.0).abs() < 1e-4);
    }

    #[test]
    fn last_state_tracks_default_agent() {
        let mut sim = new_sim(one_agent_config("apartment_0"));
        sim.initialize_agent(AgentId(0), Some(AgentState::default()))
            .unwrap();
        sim.step("move_forward").unwrap();
        let state = sim.last_state();
        assert!((state.position.z - -0.25).abs() < 1e-4);
        assert_eq!(
            sim.get_agent_state(AgentId(0)).unwrap().position,
            state.position
        );
    }

    #[test]
    fn reset_forwards_hook_and_returns_full_observation_set() {
        let config = SimulatorConfiguration {
            scene_id: "apartment_0".to_owned(),
            agents: vec![AgentConfig {
                sensor_specs: vec![spec("rgb", SensorType::Color, 128, 128, 3)],
                ..AgentConfig::default()
            }],
            ..SimulatorConfiguration::default()
        };
        let mut sim = new_sim(config);
        let observations = sim.reset().unwrap();

        assert_eq!(sim.backend().unwrap().renderer.resets, 1);
        let Observation::Color {
            height,
            width,
            channels,
            pixels,
        } = &observations["rgb"]
        else {
            panic!("expected a color observation");
        };
        assert_eq!((*height, *width, *channels), (128, 128, 3));
        assert_eq!(pixels.len(), 128 * 128 * 3);
    }
}

// ── Seeding and teardown ──────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle_tests {
    use super::*;

    #[test]
    fn same_seed_reproduces_initial_states() {
        let mut sim = new_sim(one_agent_config("apartment_0"));

        sim.seed(7);
        let first = sim.initialize_agent(AgentId(0), None).unwrap();
        sim.seed(7);
        let second = sim.initialize_agent(AgentId(0), None).unwrap();

        assert_eq!(first.position, second.position);
        assert_eq!(first.rotation, second.rotation);
    }

    #[test]
    fn reconfigure_reseeds_the_placement_streams() {
        let mut seeded = one_agent_config("apartment_0");
        seeded.seed = 42;
        let fresh = new_sim(seeded.clone());

        // Built under seed 0, then reconfigured into the seed-42 config:
        // position and rotation must both match the fresh simulator.
        let mut reconfigured = new_sim(one_agent_config("apartment_0"));
        reconfigured.reconfigure(seeded).unwrap();

        let a = fresh.last_state();
        let b = reconfigured.last_state();
        assert_eq!(a.position, b.position);
        assert_eq!(a.rotation, b.rotation);
    }

    #[test]
    fn initial_placement_lands_on_the_mesh() {
        let sim = new_sim(one_agent_config("apartment_0"));
        let state = sim.last_state();
        assert!(state.position.x.abs() <= 5.0);
        assert!(state.position.z.abs() <= 5.0);
        assert_eq!(state.position.y, 0.0);
    }

    #[test]
    fn close_is_idempotent_and_blocks_further_use() {
        let mut sim = new_sim(one_agent_config("apartment_0"));
        sim.close();
        sim.close();

        assert!(sim.is_closed());
        assert!(sim.configuration().is_none());
        assert!(matches!(sim.step("move_forward"), Err(SimError::Closed)));
        assert!(matches!(sim.reset(), Err(SimError::Closed)));
        assert!(matches!(
            sim.reconfigure(one_agent_config("apartment_0")),
            Err(SimError::Closed)
        ));
    }
}
