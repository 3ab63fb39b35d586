//! Spatial types

use glam::{EulerRot, Quat};
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A 3D vector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);
    /// Camera look direction at identity rotation
    pub const FORWARD: Self = Self::new(0.0, 0.0, -1.0);
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn from_array([x, y, z]: [f32; 3]) -> Self {
        Self::new(x, y, z)
    }

    pub fn length(&self) -> f32 {
        glam::Vec3::from(*self).length()
    }

    pub fn dot(&self, other: &Self) -> f32 {
        glam::Vec3::from(*self).dot((*other).into())
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self + -rhs
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        self * -1.0
    }
}

impl From<glam::Vec3> for Vec3 {
    fn from(v: glam::Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vec3> for glam::Vec3 {
    fn from(v: Vec3) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

/// Local axes of an oriented object, in world space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Basis {
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl Basis {
    fn of(q: Quat) -> Self {
        Self {
            right: (q * glam::Vec3::X).into(),
            up: (q * glam::Vec3::Y).into(),
            forward: (q * glam::Vec3::NEG_Z).into(),
        }
    }
}

/// Roll-free camera orientation in degrees, as driven by mouse look.
///
/// Positive yaw turns the view to the right, positive pitch tilts it
/// downward. Angles are never wrapped or clamped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub pitch: f32,
    pub yaw: f32,
}

impl Orientation {
    pub const IDENTITY: Self = Self {
        pitch: 0.0,
        yaw: 0.0,
    };

    pub const fn new(pitch: f32, yaw: f32) -> Self {
        Self { pitch, yaw }
    }

    fn to_glam(self) -> Quat {
        // Yaw about world up, then pitch about the local right axis
        Quat::from_euler(
            EulerRot::YXZ,
            (-self.yaw).to_radians(),
            (-self.pitch).to_radians(),
            0.0,
        )
    }

    /// Rotation as a quaternion `[x, y, z, w]`
    pub fn to_quat(&self) -> [f32; 4] {
        self.to_glam().to_array()
    }

    /// Recover yaw/pitch from a quaternion `[x, y, z, w]`. Roll is discarded.
    pub fn from_quat(q: [f32; 4]) -> Self {
        let (yaw, pitch, _roll) = Quat::from_array(q).normalize().to_euler(EulerRot::YXZ);
        Self {
            pitch: -pitch.to_degrees(),
            yaw: -yaw.to_degrees(),
        }
    }

    /// World-space right/up/forward axes for this orientation
    pub fn basis(&self) -> Basis {
        Basis::of(self.to_glam())
    }
}

/// Camera pose as the host stores it.
///
/// `rotation` is a full quaternion `[x, y, z, w]`, so a camera with roll
/// survives a read and write back unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: [f32; 4],
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: [0.0, 0.0, 0.0, 1.0],
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, q: [f32; 4]) -> Self {
        self.rotation = q;
        self
    }

    /// Replace the rotation with a roll-free one
    pub fn with_orientation(self, orientation: Orientation) -> Self {
        self.with_rotation(orientation.to_quat())
    }

    /// Yaw/pitch view of the rotation. Roll is dropped.
    pub fn orientation(&self) -> Orientation {
        Orientation::from_quat(self.rotation)
    }

    /// Local axes of the full rotation, roll included
    pub fn basis(&self) -> Basis {
        Basis::of(Quat::from_array(self.rotation).normalize())
    }
}
