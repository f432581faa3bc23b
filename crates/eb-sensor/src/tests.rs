//! Unit tests for eb-sensor.

use eb_agent::Agent;
use eb_core::{AgentConfig, SensorSpec, SensorType, SimulatorConfiguration, Vec3};
use eb_scene::{
    Backend, BackendResult, CameraView, NodeHandle, NoopPathfinder, Renderer, SceneGraph,
    SceneInfo, SceneKind,
};

use crate::buffer::{Observation, SensorBuffer};
use crate::error::SensorError;
use crate::sensor::Sensor;

// ── Fixture renderer ──────────────────────────────────────────────────────────

/// Renderer fake producing index-pattern frames, bottom-left origin.
///
/// Element `i` reads back as `i + offset`, so row order (and any skew from a
/// stale buffer) is directly observable in the returned observation.
#[derive(Default)]
struct FrameRenderer {
    semantic: bool,
    offset: u32,
    resolution: (u32, u32),
    draw_roots: Vec<NodeHandle>,
    last_view: Option<CameraView>,
}

impl FrameRenderer {
    fn with_semantic() -> Self {
        Self {
            semantic: true,
            ..Self::default()
        }
    }
}

impl Renderer for FrameRenderer {
    fn set_resolution(&mut self, width: u32, height: u32) -> BackendResult<()> {
        self.resolution = (width, height);
        Ok(())
    }

    fn load_scene(
        &mut self,
        _scene_id: &str,
        graph: &mut SceneGraph,
        root: NodeHandle,
    ) -> BackendResult<SceneInfo> {
        graph.create_child(root)?;
        Ok(SceneInfo {
            has_semantic_scene: self.semantic,
        })
    }

    fn load_semantic_scene(
        &mut self,
        _scene_id: &str,
        graph: &mut SceneGraph,
        root: NodeHandle,
    ) -> BackendResult<()> {
        graph.create_child(root)?;
        Ok(())
    }

    fn draw(
        &mut self,
        view: &CameraView,
        _graph: &SceneGraph,
        root: NodeHandle,
    ) -> BackendResult<()> {
        self.draw_roots.push(root);
        self.last_view = Some(*view);
        Ok(())
    }

    fn read_frame_rgba(&mut self, out: &mut [u8]) -> BackendResult<()> {
        for (i, px) in out.iter_mut().enumerate() {
            *px = (i as u32 + self.offset) as u8;
        }
        Ok(())
    }

    fn read_frame_depth(&mut self, out: &mut [f32]) -> BackendResult<()> {
        for (i, d) in out.iter_mut().enumerate() {
            *d = (i as u32 + self.offset) as f32;
        }
        Ok(())
    }

    fn read_frame_object_id(&mut self, out: &mut [u32]) -> BackendResult<()> {
        for (i, id) in out.iter_mut().enumerate() {
            *id = i as u32 + self.offset;
        }
        Ok(())
    }
}

// ── Fixtures ──────────────────────────────────────────────────────────────────

/// 2×3 spec so the flip is observable with tiny buffers.
fn small_spec(sensor_type: SensorType) -> SensorSpec {
    SensorSpec {
        uuid: "cam".to_owned(),
        sensor_type,
        resolution: [2, 3],
        channels: 4,
        ..SensorSpec::default()
    }
}

fn setup(
    renderer: FrameRenderer,
    sensor_type: SensorType,
) -> (Backend<FrameRenderer, NoopPathfinder>, Agent) {
    let spec = small_spec(sensor_type);
    let config = AgentConfig {
        sensor_specs: vec![spec],
        ..AgentConfig::default()
    };
    let sim_config = SimulatorConfiguration {
        scene_id: "test_scene".to_owned(),
        height: 2,
        width: 3,
        agents: vec![config.clone()],
        ..SimulatorConfiguration::default()
    };
    let mut backend = Backend::create(renderer, NoopPathfinder, &sim_config).unwrap();
    let mut agent = Agent::new(config);
    let root = backend.graph.root();
    agent.attach(&mut backend.graph, root).unwrap();
    (backend, agent)
}

// ── Buffers ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod buffer_tests {
    use super::*;

    #[test]
    fn buffers_sized_per_modality() {
        let color = SensorBuffer::for_spec(&small_spec(SensorType::Color));
        let depth = SensorBuffer::for_spec(&small_spec(SensorType::Depth));
        let semantic = SensorBuffer::for_spec(&small_spec(SensorType::Semantic));
        // 2×3 pixels, 4 channels for color.
        assert_eq!(color.len(), 24);
        assert_eq!(depth.len(), 6);
        assert_eq!(semantic.len(), 6);
        assert!(matches!(color, SensorBuffer::Color(_)));
        assert!(matches!(depth, SensorBuffer::Depth(_)));
        assert!(matches!(semantic, SensorBuffer::Semantic(_)));
    }

    #[test]
    fn observation_carries_shape_metadata() {
        let spec = small_spec(SensorType::Color);
        let obs = SensorBuffer::for_spec(&spec).to_observation(&spec);
        assert_eq!(obs.height(), 2);
        assert_eq!(obs.width(), 3);
        assert_eq!(obs.channels(), Some(4));

        let spec = small_spec(SensorType::Depth);
        let obs = SensorBuffer::for_spec(&spec).to_observation(&spec);
        assert_eq!(obs.channels(), None);
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    #[test]
    fn unknown_sensor_uuid_rejected() {
        let (_backend, agent) = setup(FrameRenderer::default(), SensorType::Color);
        let err = Sensor::new(&agent, "lidar").unwrap_err();
        assert!(matches!(err, SensorError::UnknownSensor { uuid } if uuid == "lidar"));
    }

    #[test]
    fn color_observation_is_row_flipped() {
        let (mut backend, agent) = setup(FrameRenderer::default(), SensorType::Color);
        let mut sensor = Sensor::new(&agent, "cam").unwrap();
        let obs = sensor.get_observation(&mut backend).unwrap();

        let Observation::Color {
            height,
            width,
            channels,
            pixels,
        } = obs
        else {
            panic!("expected a color observation");
        };
        assert_eq!((height, width, channels), (2, 3, 4));
        // Source row 1 (values 12..24) must come first after the flip.
        let expected: Vec<u8> = (12..24).chain(0..12).map(|i| i as u8).collect();
        assert_eq!(pixels, expected);
    }

    #[test]
    fn depth_observation_is_row_flipped() {
        let (mut backend, agent) = setup(FrameRenderer::default(), SensorType::Depth);
        let mut sensor = Sensor::new(&agent, "cam").unwrap();
        let obs = sensor.get_observation(&mut backend).unwrap();

        let Observation::Depth { data, .. } = obs else {
            panic!("expected a depth observation");
        };
        assert_eq!(data, [3.0, 4.0, 5.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn observations_are_independent_copies() {
        let (mut backend, agent) = setup(FrameRenderer::with_semantic(), SensorType::Semantic);
        let mut sensor = Sensor::new(&agent, "cam").unwrap();
        let first = sensor.get_observation(&mut backend).unwrap();

        // A later frame with different content must not touch earlier copies.
        backend.renderer.offset = 100;
        let second = sensor.get_observation(&mut backend).unwrap();

        let Observation::Semantic { data, .. } = &first else {
            panic!("expected a semantic observation");
        };
        assert_eq!(data[..3], [3, 4, 5]);
        assert_ne!(first, second);
    }

    #[test]
    fn camera_view_uses_sensor_world_pose() {
        let (mut backend, agent) = setup(FrameRenderer::default(), SensorType::Color);
        let mut sensor = Sensor::new(&agent, "cam").unwrap();
        sensor.get_observation(&mut backend).unwrap();

        let view = backend.renderer.last_view.unwrap();
        // Default mounting offset is eye height above the body origin.
        assert!((view.position - Vec3::new(0.0, 1.5, 0.0)).length() < 1e-4);
        assert_eq!((view.width, view.height), (3, 2));
    }

    #[test]
    fn detached_agent_read_fails() {
        let (mut backend, mut agent) = setup(FrameRenderer::default(), SensorType::Color);
        let mut sensor = Sensor::new(&agent, "cam").unwrap();
        agent.detach(&mut backend.graph);

        let err = sensor.get_observation(&mut backend).unwrap_err();
        assert!(matches!(err, SensorError::InvalidAttachedObject { uuid } if uuid == "cam"));
    }
}

// ── Semantic scenes ───────────────────────────────────────────────────────────

#[cfg(test)]
mod semantic_tests {
    use super::*;

    #[test]
    fn semantic_read_requires_semantic_scene() {
        let (mut backend, agent) = setup(FrameRenderer::default(), SensorType::Semantic);
        let mut sensor = Sensor::new(&agent, "cam").unwrap();
        let err = sensor.get_observation(&mut backend).unwrap_err();
        assert!(matches!(err, SensorError::NoSemanticScene));
    }

    #[test]
    fn semantic_read_reparents_agent_under_semantic_root() {
        let (mut backend, agent) = setup(FrameRenderer::with_semantic(), SensorType::Semantic);
        let mut sensor = Sensor::new(&agent, "cam").unwrap();
        sensor.get_observation(&mut backend).unwrap();

        let semantic_root = backend.scene_root(SceneKind::Semantic).unwrap();
        assert_eq!(backend.graph.parent(agent.node()).unwrap(), semantic_root);
        assert_eq!(backend.renderer.draw_roots, [semantic_root]);
    }

    #[test]
    fn color_read_moves_agent_back_to_default_scene() {
        let (mut backend, agent) = setup(FrameRenderer::with_semantic(), SensorType::Semantic);
        let mut semantic = Sensor::new(&agent, "cam").unwrap();
        semantic.get_observation(&mut backend).unwrap();

        // A later read against the default scene restores the default parent.
        let config = AgentConfig {
            sensor_specs: vec![small_spec(SensorType::Color)],
            ..AgentConfig::default()
        };
        let mut color_agent = Agent::new(config);
        let root = backend.graph.root();
        color_agent.attach(&mut backend.graph, root).unwrap();
        let mut color = Sensor::new(&color_agent, "cam").unwrap();
        color.get_observation(&mut backend).unwrap();

        assert_eq!(
            backend.graph.parent(color_agent.node()).unwrap(),
            backend.graph.root()
        );
    }
}
