//! Deterministic stand-ins for a physics backend.

use std::cell::{Cell, RefCell};

use crate::body::{CharacterBody, SurfaceSensor};
use crate::layers::LayerMask;
use crate::settings::LocomotionSettings;
use crate::types::{ForceMode, Quat, SurfaceHit, Vec3};

pub fn test_settings() -> LocomotionSettings {
    LocomotionSettings::default().with_rotation_sensitivity(90.0)
}

pub fn flat_hit() -> SurfaceHit {
    SurfaceHit {
        point: Vec3::new(0.0, -0.5, 0.5),
        normal: Vec3::y(),
        distance: 0.7,
    }
}

/// A surface tilted `angle_deg` from horizontal, rising toward +Z.
pub fn slope_hit(angle_deg: f32) -> SurfaceHit {
    let a = angle_deg.to_radians();
    SurfaceHit {
        point: Vec3::new(0.0, -0.5, 0.5),
        normal: Vec3::new(0.0, a.cos(), -a.sin()),
        distance: 0.7,
    }
}

/// Canned probe results plus a record of what was asked.
#[derive(Default)]
pub struct FakeSensor {
    pub ground: Option<SurfaceHit>,
    pub slope: Option<SurfaceHit>,
    ground_probe: Cell<Option<(Vec3, f32, LayerMask)>>,
    slope_probe: Cell<Option<(Vec3, Vec3, f32)>>,
    slope_probe_count: Cell<usize>,
}

impl FakeSensor {
    pub fn grounded_flat() -> Self {
        Self {
            ground: Some(flat_hit()),
            slope: Some(flat_hit()),
            ..Self::default()
        }
    }

    pub fn airborne() -> Self {
        Self::default()
    }

    pub fn with_slope(mut self, hit: SurfaceHit) -> Self {
        self.slope = Some(hit);
        self
    }

    pub fn without_slope(mut self) -> Self {
        self.slope = None;
        self
    }

    pub fn slope_probes(&self) -> usize {
        self.slope_probe_count.get()
    }

    pub fn last_ground_probe(&self) -> Option<(Vec3, f32, LayerMask)> {
        self.ground_probe.get()
    }

    pub fn last_slope_probe(&self) -> Option<(Vec3, Vec3, f32)> {
        self.slope_probe.get()
    }
}

impl SurfaceSensor for FakeSensor {
    fn probe_ground(
        &self,
        origin: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<SurfaceHit> {
        self.ground_probe.set(Some((origin, max_distance, layers)));
        self.ground
    }

    fn probe_slope(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<SurfaceHit> {
        self.slope_probe.set(Some((origin, direction, max_distance)));
        self.slope_probe_count.set(self.slope_probe_count.get() + 1);
        self.slope
    }
}

/// What a [`FakeBody`] was told to do, in order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BodyCall {
    SetVelocity(Vec3),
    SetOrientation(Quat),
    Force(Vec3),
    Impulse(Vec3),
    SetLinearDrag(f32),
    SetGravityEnabled(bool),
}

/// A body that records every call and never integrates anything.
pub struct FakeBody {
    pub sensor: FakeSensor,
    pub position: Vec3,
    pub velocity: Vec3,
    pub orientation: Quat,
    pub mass: f32,
    pub gravity: Vec3,
    pub calls: RefCell<Vec<BodyCall>>,
}

impl FakeBody {
    pub fn new(sensor: FakeSensor) -> Self {
        Self {
            sensor,
            position: Vec3::zeros(),
            velocity: Vec3::zeros(),
            orientation: Quat::identity(),
            mass: 1.0,
            gravity: Vec3::new(0.0, -9.81, 0.0),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn take_calls(&self) -> Vec<BodyCall> {
        self.calls.take()
    }

    pub fn impulses(&self) -> Vec<Vec3> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                BodyCall::Impulse(i) => Some(*i),
                _ => None,
            })
            .collect()
    }

    pub fn forces(&self) -> Vec<Vec3> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                BodyCall::Force(f) => Some(*f),
                _ => None,
            })
            .collect()
    }
}

impl SurfaceSensor for FakeBody {
    fn probe_ground(
        &self,
        origin: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<SurfaceHit> {
        self.sensor.probe_ground(origin, max_distance, layers)
    }

    fn probe_slope(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<SurfaceHit> {
        self.sensor.probe_slope(origin, direction, max_distance)
    }
}

impl CharacterBody for FakeBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn orientation(&self) -> Quat {
        self.orientation
    }

    fn mass(&self) -> f32 {
        self.mass
    }

    fn gravity(&self) -> Vec3 {
        self.gravity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
        self.calls.borrow_mut().push(BodyCall::SetVelocity(velocity));
    }

    fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
        self.calls.borrow_mut().push(BodyCall::SetOrientation(orientation));
    }

    fn apply_force(&mut self, force: Vec3, mode: ForceMode) {
        let call = match mode {
            ForceMode::Force => BodyCall::Force(force),
            ForceMode::Impulse => BodyCall::Impulse(force),
        };
        self.calls.borrow_mut().push(call);
    }

    fn set_linear_drag(&mut self, drag: f32) {
        self.calls.borrow_mut().push(BodyCall::SetLinearDrag(drag));
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        self.calls.borrow_mut().push(BodyCall::SetGravityEnabled(enabled));
    }
}
