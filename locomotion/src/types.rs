/*!
Math aliases and plain data exchanged between the controller and a physics backend.

This module intentionally contains no algorithms. It defines the values passed between:
- the pure tick step (`tick`)
- the body abstraction (`body`)
- the concrete Rapier backend (`rapier_world`)
*/

use nalgebra as na;

/// Common math aliases for clarity and consistency.
pub type Vec2 = na::Vector2<f32>;
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;

/// World up axis. The controller is Y-up.
#[inline]
pub fn up() -> Vec3 {
    Vec3::y()
}

/// A single surface contact returned by a ground or slope probe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceHit {
    /// World-space hit point.
    pub point: Vec3,
    /// World-space surface normal at the hit point.
    pub normal: Vec3,
    /// Distance along the probe direction (meters).
    pub distance: f32,
}

/// Kinematic readings taken from the body once, before a tick (or jump) is computed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodySnapshot {
    /// Body origin (world space).
    pub position: Vec3,
    /// Linear velocity (m/s).
    pub velocity: Vec3,
    pub orientation: Quat,
    /// Mass (kg).
    pub mass: f32,
    /// Gravity the engine applies to this body when native gravity is enabled.
    pub gravity: Vec3,
}

impl BodySnapshot {
    /// Body at rest at the origin with unit mass and standard gravity.
    pub fn at_rest() -> Self {
        Self {
            position: Vec3::zeros(),
            velocity: Vec3::zeros(),
            orientation: Quat::identity(),
            mass: 1.0,
            gravity: Vec3::new(0.0, -crate::constants::STANDARD_GRAVITY, 0.0),
        }
    }
}

/// How a vector passed to `apply_force` is integrated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForceMode {
    /// Continuous force, integrated over the next physics step.
    Force,
    /// Instantaneous change in momentum.
    Impulse,
}
