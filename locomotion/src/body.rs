//! Physics backend abstraction.
//!
//! The controller never talks to a physics engine directly. It reads the body
//! through [`CharacterBody`], asks the world about terrain through
//! [`SurfaceSensor`], and writes its decisions back as [`BodyCommand`]s.
//! `crate::rapier_world::RapierBody` is the Rapier implementation; tests use a
//! deterministic fake.

use crate::layers::LayerMask;
use crate::types::{BodySnapshot, ForceMode, Quat, SurfaceHit, Vec3};

/// Read-only terrain queries made during a tick.
pub trait SurfaceSensor {
    /// Cast a ray straight down from `origin` up to `max_distance`, accepting only
    /// colliders on `layers`.
    fn probe_ground(&self, origin: Vec3, max_distance: f32, layers: LayerMask)
    -> Option<SurfaceHit>;

    /// Cast a ray from `origin` along `direction` (need not be normalized) up to
    /// `max_distance`, against everything except the body itself.
    fn probe_slope(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<SurfaceHit>;
}

/// The rigid body one controller drives.
pub trait CharacterBody: SurfaceSensor {
    fn position(&self) -> Vec3;

    fn velocity(&self) -> Vec3;

    fn orientation(&self) -> Quat;

    fn mass(&self) -> f32;

    /// Gravity the engine applies to this body while native gravity is enabled.
    fn gravity(&self) -> Vec3;

    fn set_velocity(&mut self, velocity: Vec3);

    fn set_orientation(&mut self, orientation: Quat);

    fn apply_force(&mut self, force: Vec3, mode: ForceMode);

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.apply_force(impulse, ForceMode::Impulse);
    }

    fn set_linear_drag(&mut self, drag: f32);

    fn set_gravity_enabled(&mut self, enabled: bool);

    /// Read everything a tick needs in one go.
    fn snapshot(&self) -> BodySnapshot {
        BodySnapshot {
            position: self.position(),
            velocity: self.velocity(),
            orientation: self.orientation(),
            mass: self.mass(),
            gravity: self.gravity(),
        }
    }
}

/// A single side effect decided by the controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BodyCommand {
    SetLinearDrag(f32),
    SetGravityEnabled(bool),
    ApplyImpulse(Vec3),
    /// Continuous force for the coming physics step.
    ApplyForce(Vec3),
    SetOrientation(Quat),
    SetVelocity(Vec3),
}

impl BodyCommand {
    pub fn apply<B: CharacterBody + ?Sized>(self, body: &mut B) {
        match self {
            Self::SetLinearDrag(drag) => body.set_linear_drag(drag),
            Self::SetGravityEnabled(enabled) => body.set_gravity_enabled(enabled),
            Self::ApplyImpulse(impulse) => body.apply_impulse(impulse),
            Self::ApplyForce(force) => body.apply_force(force, ForceMode::Force),
            Self::SetOrientation(orientation) => body.set_orientation(orientation),
            Self::SetVelocity(velocity) => body.set_velocity(velocity),
        }
    }
}
