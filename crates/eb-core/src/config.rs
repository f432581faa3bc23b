//! Simulator, agent, and sensor configuration types.
//!
//! # Equality is the reconfiguration trigger
//!
//! `SimulatorConfiguration` derives `PartialEq`, and the simulator compares
//! the incoming configuration against the committed one by full structural
//! equality: an equal configuration makes `reconfigure` a no-op.  Every field
//! added here therefore participates in that diff — keep the types plain data
//! with derived equality and nothing hidden behind interior mutability.
//!
//! # Ordering
//!
//! `agents` and `sensor_specs` are ordered sequences; agent identity is
//! positional (`AgentId` indexes the list) and sensor-map iteration follows
//! `sensor_specs` order.  The action space uses a `BTreeMap` so equality and
//! iteration are independent of insertion order.

use std::collections::BTreeMap;

use crate::math::Vec3;

// ── Sensor specification ──────────────────────────────────────────────────────

/// Output modality of a sensor.  Drives buffer element type and the
/// renderer read path: `u32` object IDs for `Semantic`, `f32` metres for
/// `Depth`, `u8` channels for `Color`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensorType {
    Color,
    Depth,
    Semantic,
}

/// Static description of one sensor mounted on an agent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorSpec {
    /// Unique identifier within the owning agent; also the observation key.
    pub uuid: String,

    pub sensor_type: SensorType,

    /// Output resolution as `[height, width]`.
    pub resolution: [u32; 2],

    /// Channels per pixel.  Only meaningful for `Color` (4 for RGBA);
    /// `Depth`/`Semantic` always produce one value per pixel.
    pub channels: u32,

    /// Mounting position relative to the agent's body node.
    pub position: Vec3,

    /// Mounting orientation as euler angles in radians (pitch, yaw, roll).
    pub orientation: Vec3,
}

impl SensorSpec {
    #[inline]
    pub fn height(&self) -> u32 {
        self.resolution[0]
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.resolution[1]
    }
}

impl Default for SensorSpec {
    /// An RGBA color camera mounted at eye height looking straight ahead.
    fn default() -> Self {
        Self {
            uuid: "rgba_camera".to_owned(),
            sensor_type: SensorType::Color,
            resolution: [84, 84],
            channels: 4,
            position: Vec3::new(0.0, 1.5, 0.0),
            orientation: Vec3::ZERO,
        }
    }
}

// ── Agent configuration ───────────────────────────────────────────────────────

/// How far one discrete action moves or rotates the agent.  Rotation amounts
/// are in degrees, translations in metres.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActuationSpec {
    pub amount: f32,
}

/// Static description of one agent: its sensors, its discrete action space,
/// and its body parameters.  Immutable once consumed to build an `Agent`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentConfig {
    /// Sensors in declaration order; observation maps iterate in this order.
    pub sensor_specs: Vec<SensorSpec>,

    /// Action name → actuation parameters.
    pub action_space: BTreeMap<String, ActuationSpec>,

    /// Body height in metres.
    pub height: f32,

    /// Body (cylinder) radius in metres.
    pub radius: f32,

    /// Body mass in kilograms.
    pub mass: f32,
}

impl AgentConfig {
    /// The stock action space: 0.25 m steps, 10° turns and looks.
    pub fn default_action_space() -> BTreeMap<String, ActuationSpec> {
        let mut space = BTreeMap::new();
        space.insert("move_forward".to_owned(), ActuationSpec { amount: 0.25 });
        space.insert("turn_left".to_owned(), ActuationSpec { amount: 10.0 });
        space.insert("turn_right".to_owned(), ActuationSpec { amount: 10.0 });
        space.insert("look_up".to_owned(), ActuationSpec { amount: 10.0 });
        space.insert("look_down".to_owned(), ActuationSpec { amount: 10.0 });
        space
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            sensor_specs: vec![SensorSpec::default()],
            action_space: Self::default_action_space(),
            height: 1.5,
            radius: 0.1,
            mass: 32.0,
        }
    }
}

// ── Simulator configuration ───────────────────────────────────────────────────

/// Top-level simulator configuration.
///
/// `height`/`width` are derived fields: `reconfigure` overwrites them with
/// the first agent's first sensor resolution before diffing, because the
/// backend renders one implicit default viewport size.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulatorConfiguration {
    /// Identifier of the scene asset the backend should load.
    pub scene_id: String,

    /// Index into `agents` of the agent whose sensors feed `step`/`reset`.
    pub default_agent_id: usize,

    /// Master RNG seed.  The same seed always samples the same initial
    /// agent states.
    pub seed: u64,

    /// Render target height; normalized from the primary sensor.
    pub height: u32,

    /// Render target width; normalized from the primary sensor.
    pub width: u32,

    /// Ordered agent configurations; `AgentId(i)` refers to `agents[i]`.
    pub agents: Vec<AgentConfig>,
}

impl Default for SimulatorConfiguration {
    fn default() -> Self {
        Self {
            scene_id: String::new(),
            default_agent_id: 0,
            seed: 0,
            height: 0,
            width: 0,
            agents: vec![AgentConfig::default()],
        }
    }
}
