//! The simulator's movement filter: steps constrained by the pathfinder.

use eb_agent::MoveFilter;
use eb_core::Vec3;
use eb_scene::Pathfinder;

/// Routes body translations through the navigation mesh.
///
/// While no mesh is loaded the filter passes every move through unchanged,
/// so a simulator without navigation data still steps freely.  Built fresh
/// per `step` call from a borrow of the backend's pathfinder.
pub struct NavMeshFilter<'a, P: Pathfinder> {
    pathfinder: &'a P,
}

impl<'a, P: Pathfinder> NavMeshFilter<'a, P> {
    pub fn new(pathfinder: &'a P) -> Self {
        Self { pathfinder }
    }
}

impl<P: Pathfinder> MoveFilter for NavMeshFilter<'_, P> {
    fn filter(&self, start: Vec3, end: Vec3) -> Vec3 {
        if self.pathfinder.is_loaded() {
            self.pathfinder.try_step(start, end)
        } else {
            end
        }
    }
}
