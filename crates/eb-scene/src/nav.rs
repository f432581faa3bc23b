//! Navigation-mesh collaborator trait.
//!
//! The pathfinder is the collision/navigability oracle: the simulator asks
//! it for random navigable points when initializing agents and routes every
//! proposed movement through `try_step` so agents slide along (rather than
//! through) obstacles.  The actual navigation-mesh implementation is an
//! external collaborator; this crate only fixes the contract.

use eb_core::Vec3;

/// External navigation-mesh oracle.
pub trait Pathfinder {
    /// `true` once a navigation mesh is available.  When `false`, the
    /// simulator's movement filter passes positions through unchanged.
    fn is_loaded(&self) -> bool;

    /// Re-seed any internal randomness deterministically.
    fn seed(&mut self, seed: u64);

    /// Sample a uniformly random navigable position.
    fn random_navigable_point(&mut self) -> Vec3;

    /// Clamp or slide a proposed move from `start` to `end` along the mesh,
    /// returning the adjusted end position.
    fn try_step(&self, start: Vec3, end: Vec3) -> Vec3;
}

/// A [`Pathfinder`] with no mesh: never loaded, every step allowed.
/// Use when running without navigation constraints.
pub struct NoopPathfinder;

impl Pathfinder for NoopPathfinder {
    fn is_loaded(&self) -> bool {
        false
    }

    fn seed(&mut self, _seed: u64) {}

    fn random_navigable_point(&mut self) -> Vec3 {
        Vec3::ZERO
    }

    fn try_step(&self, _start: Vec3, end: Vec3) -> Vec3 {
        end
    }
}
