//! The simulation backend: scene graphs plus the renderer collaborator.
//!
//! # One live backend per simulator
//!
//! [`Backend`] owns the renderer, the pathfinder, and exactly one
//! [`SceneGraph`].  `create` builds the graph and loads the scene;
//! `reconfigure` replaces the graph *in place* — the old arena is dropped,
//! so every handle into it (agents, sensors) stops validating.  That drop
//! is the mechanism that prevents stale attachments across reconfiguration.
//!
//! # Pluggability
//!
//! `R: Renderer` and `P: Pathfinder` are compile-time strategy parameters in
//! the same spirit as a pluggable routing engine: swap implementations
//! without touching the simulator core.

use eb_core::{Quat, SimulatorConfiguration, Vec3};

use crate::error::BackendResult;
use crate::graph::{NodeHandle, SceneGraph};
use crate::nav::Pathfinder;

// ── Renderer collaborator ─────────────────────────────────────────────────────

/// What the renderer learned while loading a scene asset.
#[derive(Copy, Clone, Debug, Default)]
pub struct SceneInfo {
    /// `true` if the asset carries semantic annotations; the backend then
    /// loads a semantic scene graph alongside the visual one.
    pub has_semantic_scene: bool,
}

/// Camera pose handed to [`Renderer::draw`].
///
/// Composing view/projection matrices from this pose (and from whatever
/// intrinsics the renderer knows about) is the renderer's responsibility.
#[derive(Copy, Clone, Debug)]
pub struct CameraView {
    pub position: Vec3,
    pub rotation: Quat,
    pub width: u32,
    pub height: u32,
}

/// External rendering engine.
///
/// All calls are blocking; `draw` followed by one `read_frame_*` call is the
/// frame protocol.  Frames are delivered bottom-left origin, row-major —
/// the sensor pipeline flips them to top-left before returning observations.
pub trait Renderer {
    /// Size the default render target.  Called on every (re)configuration.
    fn set_resolution(&mut self, width: u32, height: u32) -> BackendResult<()>;

    /// Load the visual scene for `scene_id`, placing its content under
    /// `root` in `graph`.
    fn load_scene(
        &mut self,
        scene_id: &str,
        graph: &mut SceneGraph,
        root: NodeHandle,
    ) -> BackendResult<SceneInfo>;

    /// Load the semantic annotation mesh for `scene_id` under `root`.
    /// Only called when `load_scene` reported `has_semantic_scene`.
    fn load_semantic_scene(
        &mut self,
        scene_id: &str,
        graph: &mut SceneGraph,
        root: NodeHandle,
    ) -> BackendResult<()>;

    /// Render the subtree under `root` from `view`.
    fn draw(&mut self, view: &CameraView, graph: &SceneGraph, root: NodeHandle) -> BackendResult<()>;

    /// Read the last drawn frame as tightly packed RGBA8.
    fn read_frame_rgba(&mut self, out: &mut [u8]) -> BackendResult<()>;

    /// Read the last drawn frame's depth buffer in metres.
    fn read_frame_depth(&mut self, out: &mut [f32]) -> BackendResult<()>;

    /// Read the last drawn frame's per-pixel object IDs.
    fn read_frame_object_id(&mut self, out: &mut [u32]) -> BackendResult<()>;

    /// Reset hook, forwarded from `Simulator::reset`.
    fn reset(&mut self) {}
}

// ── Backend ───────────────────────────────────────────────────────────────────

/// Which scene graph a sensor renders against.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SceneKind {
    /// The visual scene every non-semantic sensor reads.
    Default,
    /// The semantic annotation scene; present only for annotated assets.
    Semantic,
}

/// The render/physics/navigation backend instance owned by one simulator.
///
/// `renderer`, `pathfinder`, and `graph` are public fields so callers can
/// split-borrow them (the sensor pipeline needs `&mut renderer` and
/// `&graph` simultaneously).
pub struct Backend<R: Renderer, P: Pathfinder> {
    pub renderer: R,
    pub pathfinder: P,
    pub graph: SceneGraph,
    semantic_root: Option<NodeHandle>,
}

impl<R: Renderer, P: Pathfinder> Backend<R, P> {
    /// Build a backend for `cfg`: size the render target, create a fresh
    /// scene graph, and load the visual (and, if present, semantic) scene.
    pub fn create(renderer: R, pathfinder: P, cfg: &SimulatorConfiguration) -> BackendResult<Self> {
        let mut backend = Self {
            renderer,
            pathfinder,
            graph: SceneGraph::new(),
            semantic_root: None,
        };
        backend.configure(cfg)?;
        Ok(backend)
    }

    /// Re-initialize this backend for `cfg` in place.
    ///
    /// The previous scene graph is dropped wholesale; handles into it become
    /// permanently invalid.  Callers must re-attach agents afterwards.
    pub fn reconfigure(&mut self, cfg: &SimulatorConfiguration) -> BackendResult<()> {
        self.configure(cfg)
    }

    fn configure(&mut self, cfg: &SimulatorConfiguration) -> BackendResult<()> {
        self.renderer.set_resolution(cfg.width, cfg.height)?;

        let mut graph = SceneGraph::new();
        let root = graph.root();
        let info = self.renderer.load_scene(&cfg.scene_id, &mut graph, root)?;

        let semantic_root = if info.has_semantic_scene {
            let semantic = graph.add_root();
            self.renderer
                .load_semantic_scene(&cfg.scene_id, &mut graph, semantic)?;
            Some(semantic)
        } else {
            None
        };

        // Commit only after every load succeeded, so a failed reconfigure
        // leaves the previous graph intact.
        self.graph = graph;
        self.semantic_root = semantic_root;
        self.pathfinder.seed(cfg.seed);
        Ok(())
    }

    /// Root of the requested scene graph; `None` if no semantic scene is
    /// loaded and `Semantic` was asked for.
    pub fn scene_root(&self, kind: SceneKind) -> Option<NodeHandle> {
        match kind {
            SceneKind::Default => Some(self.graph.root()),
            SceneKind::Semantic => self.semantic_root,
        }
    }

    pub fn has_semantic_scene(&self) -> bool {
        self.semantic_root.is_some()
    }

    /// Re-seed the navigation oracle.
    pub fn seed(&mut self, seed: u64) {
        self.pathfinder.seed(seed);
    }

    /// Forward a reset to the renderer.
    pub fn reset(&mut self) {
        self.renderer.reset();
    }
}
