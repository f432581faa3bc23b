//! Generational scene-graph arena.
//!
//! # Handles, not references
//!
//! Nodes live in a slot arena inside [`SceneGraph`]; the outside world only
//! ever holds [`NodeHandle`]s (index + generation).  Removing a node bumps
//! its slot's generation, so every handle that pointed at it fails
//! [`SceneGraph::is_valid`] from then on.  Dropping the whole graph (as the
//! backend does on reconfiguration) invalidates everything at once — there
//! is no way to reach freed scene state through an old handle.
//!
//! # Transforms
//!
//! Each node stores a translation and rotation relative to its parent.
//! Roots carry the identity transform and never move, so for nodes parented
//! directly under a root (agents), the parent frame *is* the world frame.
//! [`SceneGraph::absolute_transform`] composes the full parent chain for the
//! general case (sensor nodes mounted on agents).

use std::fmt;

use eb_core::{Quat, Vec3};

use crate::error::{SceneError, SceneResult};

// ── NodeHandle ────────────────────────────────────────────────────────────────

/// Non-owning reference to a scene node.
///
/// `Copy`, cheap to store, and safe to outlive the node: a handle whose node
/// is gone simply stops validating.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct NodeHandle {
    index: u32,
    generation: u32,
}

impl NodeHandle {
    /// Sentinel meaning "not attached to any node".
    pub const INVALID: NodeHandle = NodeHandle {
        index: u32::MAX,
        generation: u32::MAX,
    };
}

impl Default for NodeHandle {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeHandle({}v{})", self.index, self.generation)
    }
}

// ── Arena internals ───────────────────────────────────────────────────────────

struct Node {
    /// `NodeHandle::INVALID` for roots.
    parent: NodeHandle,
    translation: Vec3,
    rotation: Quat,
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

// ── SceneGraph ────────────────────────────────────────────────────────────────

/// Hierarchical spatial structure owning all scene nodes.
///
/// A fresh graph has exactly one root; additional roots (for semantic
/// scenes) come from [`SceneGraph::add_root`].
pub struct SceneGraph {
    slots: Vec<Slot>,
    free: Vec<u32>,
    root: NodeHandle,
}

impl SceneGraph {
    pub fn new() -> Self {
        let mut graph = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeHandle::INVALID,
        };
        graph.root = graph.insert(NodeHandle::INVALID);
        graph
    }

    /// The default root every fresh graph starts with.
    #[inline]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    /// Create an additional top-level root (e.g. for a semantic scene).
    pub fn add_root(&mut self) -> NodeHandle {
        self.insert(NodeHandle::INVALID)
    }

    /// Create a child of `parent` with the identity local transform.
    pub fn create_child(&mut self, parent: NodeHandle) -> SceneResult<NodeHandle> {
        if !self.is_valid(parent) {
            return Err(SceneError::StaleHandle);
        }
        Ok(self.insert(parent))
    }

    /// `true` if `handle` still refers to a live node in this graph.
    pub fn is_valid(&self, handle: NodeHandle) -> bool {
        self.slots
            .get(handle.index as usize)
            .is_some_and(|slot| slot.generation == handle.generation && slot.node.is_some())
    }

    /// Remove `handle` and every node beneath it, invalidating their handles.
    pub fn remove_subtree(&mut self, handle: NodeHandle) -> SceneResult<()> {
        let target = self.get(handle)?;
        if target.parent == NodeHandle::INVALID {
            return Err(SceneError::RootNode);
        }
        let doomed: Vec<u32> = (0..self.slots.len() as u32)
            .filter(|&i| {
                let h = NodeHandle {
                    index: i,
                    generation: self.slots[i as usize].generation,
                };
                self.is_valid(h) && self.is_in_subtree(h, handle)
            })
            .collect();
        for index in doomed {
            let slot = &mut self.slots[index as usize];
            slot.node = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(index);
        }
        Ok(())
    }

    /// Move `handle` (with its subtree) under `new_parent`.
    pub fn set_parent(&mut self, handle: NodeHandle, new_parent: NodeHandle) -> SceneResult<()> {
        if self.get(handle)?.parent == NodeHandle::INVALID {
            return Err(SceneError::RootNode);
        }
        if !self.is_valid(new_parent) {
            return Err(SceneError::StaleHandle);
        }
        if self.is_in_subtree(new_parent, handle) {
            return Err(SceneError::CyclicParent);
        }
        self.get_mut(handle)?.parent = new_parent;
        Ok(())
    }

    pub fn parent(&self, handle: NodeHandle) -> SceneResult<NodeHandle> {
        Ok(self.get(handle)?.parent)
    }

    // ── Local transforms ──────────────────────────────────────────────────

    pub fn translation(&self, handle: NodeHandle) -> SceneResult<Vec3> {
        Ok(self.get(handle)?.translation)
    }

    pub fn set_translation(&mut self, handle: NodeHandle, t: Vec3) -> SceneResult<()> {
        self.get_mut(handle)?.translation = t;
        Ok(())
    }

    pub fn rotation(&self, handle: NodeHandle) -> SceneResult<Quat> {
        Ok(self.get(handle)?.rotation)
    }

    pub fn set_rotation(&mut self, handle: NodeHandle, r: Quat) -> SceneResult<()> {
        self.get_mut(handle)?.rotation = r.normalized();
        Ok(())
    }

    /// Translate along the node's own axes (its rotation applied to `v`).
    pub fn translate_local(&mut self, handle: NodeHandle, v: Vec3) -> SceneResult<()> {
        let node = self.get_mut(handle)?;
        let delta = node.rotation.rotate(v);
        node.translation = node.translation + delta;
        Ok(())
    }

    /// Rotate about one of the node's own axes.
    pub fn rotate_local(&mut self, handle: NodeHandle, axis: Vec3, angle_rad: f32) -> SceneResult<()> {
        let node = self.get_mut(handle)?;
        node.rotation = (node.rotation * Quat::from_axis_angle(axis, angle_rad)).normalized();
        Ok(())
    }

    /// Translate by a world-space delta, converting into the parent frame.
    pub fn translate_world(&mut self, handle: NodeHandle, world_delta: Vec3) -> SceneResult<()> {
        let parent = self.get(handle)?.parent;
        let local_delta = if parent == NodeHandle::INVALID {
            world_delta
        } else {
            let (_, parent_rot) = self.absolute_transform(parent)?;
            parent_rot.inverse().rotate(world_delta)
        };
        let node = self.get_mut(handle)?;
        node.translation = node.translation + local_delta;
        Ok(())
    }

    /// World-space pose of `handle`, composed up the parent chain.
    pub fn absolute_transform(&self, handle: NodeHandle) -> SceneResult<(Vec3, Quat)> {
        let node = self.get(handle)?;
        let mut position = node.translation;
        let mut rotation = node.rotation;
        let mut current = node.parent;
        while current != NodeHandle::INVALID {
            let parent = self.get(current)?;
            position = parent.rotation.rotate(position) + parent.translation;
            rotation = (parent.rotation * rotation).normalized();
            current = parent.parent;
        }
        Ok((position, rotation))
    }

    /// World-space position of `handle`.
    pub fn absolute_position(&self, handle: NodeHandle) -> SceneResult<Vec3> {
        self.absolute_transform(handle).map(|(p, _)| p)
    }

    /// Number of live nodes (roots included).
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn insert(&mut self, parent: NodeHandle) -> NodeHandle {
        let node = Node {
            parent,
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        };
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeHandle {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeHandle {
                    index,
                    generation: 0,
                }
            }
        }
    }

    fn get(&self, handle: NodeHandle) -> SceneResult<&Node> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.node.as_ref())
            .ok_or(SceneError::StaleHandle)
    }

    fn get_mut(&mut self, handle: NodeHandle) -> SceneResult<&mut Node> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(SceneError::StaleHandle)
    }

    /// `true` if `handle` equals `ancestor` or lies beneath it.
    fn is_in_subtree(&self, handle: NodeHandle, ancestor: NodeHandle) -> bool {
        let mut current = handle;
        while current != NodeHandle::INVALID {
            if current == ancestor {
                return true;
            }
            current = match self.get(current) {
                Ok(node) => node.parent,
                Err(_) => return false,
            };
        }
        false
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
