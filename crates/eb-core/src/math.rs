//! Minimal 3D math: `Vec3` and unit quaternion `Quat`.
//!
//! The framework only needs enough linear algebra to pose scene nodes and
//! rotate local movement axes into world space, so these are hand-rolled
//! single-precision types rather than a dependency on a full math crate.
//! Rotations are stored as unit quaternions; the convention matches the
//! usual right-handed, Y-up camera space (forward is −Z).

use std::ops::{Add, Mul, Neg, Sub};

// ── Vec3 ──────────────────────────────────────────────────────────────────────

/// A 3-component single-precision vector.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const UNIT_X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    pub const UNIT_Y: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub const UNIT_Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn scaled(self, s: f32) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

// ── Quat ──────────────────────────────────────────────────────────────────────

/// A unit quaternion representing a 3D rotation.
///
/// Stored as `(x, y, z, w)` with `w` the scalar part.  All constructors
/// produce normalized quaternions; `mul` results may drift slightly and can
/// be re-normalized via [`Quat::normalized`] when chains get long.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quat {
    pub const IDENTITY: Quat = Quat { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Rotation of `angle_rad` radians about `axis` (must be normalized).
    pub fn from_axis_angle(axis: Vec3, angle_rad: f32) -> Quat {
        let (s, c) = (angle_rad * 0.5).sin_cos();
        Quat {
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
            w: c,
        }
    }

    /// Intrinsic pitch-then-yaw-then-roll rotation from euler angles in
    /// radians about the X, Y, and Z axes respectively.  This is the
    /// convention used by `SensorSpec::orientation`.
    pub fn from_euler(euler: Vec3) -> Quat {
        let qx = Quat::from_axis_angle(Vec3::UNIT_X, euler.x);
        let qy = Quat::from_axis_angle(Vec3::UNIT_Y, euler.y);
        let qz = Quat::from_axis_angle(Vec3::UNIT_Z, euler.z);
        (qy * qx * qz).normalized()
    }

    /// Rotate a vector by this quaternion.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        // v' = v + 2 * u × (u × v + w v), with u the vector part.
        let u = Vec3::new(self.x, self.y, self.z);
        let t = u.cross(v).scaled(2.0);
        v + t.scaled(self.w) + u.cross(t)
    }

    /// The inverse rotation (conjugate; valid because the quaternion is unit).
    #[inline]
    pub fn inverse(self) -> Quat {
        Quat { x: -self.x, y: -self.y, z: -self.z, w: self.w }
    }

    pub fn normalized(self) -> Quat {
        let n = (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt();
        if n == 0.0 {
            return Quat::IDENTITY;
        }
        Quat {
            x: self.x / n,
            y: self.y / n,
            z: self.z / n,
            w: self.w / n,
        }
    }
}

impl Default for Quat {
    fn default() -> Self {
        Quat::IDENTITY
    }
}

impl Mul for Quat {
    type Output = Quat;

    /// Hamilton product: `a * b` applies `b` first, then `a`.
    fn mul(self, rhs: Quat) -> Quat {
        Quat {
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        }
    }
}
