//! The per-physics-tick locomotion step.
//!
//! Everything here is a pure function of the previous [`LocomotionState`], the
//! settings, a [`BodySnapshot`] and a read-only [`SurfaceSensor`]. Side effects
//! come back as [`BodyCommand`]s for the caller to apply, in order.

use crate::body::{BodyCommand, SurfaceSensor};
use crate::constants::{FLAT_ANGLE_EPS_DEG, YAW_EPS};
use crate::request::MovementRequest;
use crate::settings::LocomotionSettings;
use crate::state::LocomotionState;
use crate::types::{BodySnapshot, Quat, SurfaceHit, Vec3, up};
use crate::utils::{
    angle_from_up_deg, horizontal, horizontal_speed, normalize_or_zero, project_on_plane,
    right_forward, yaw_rotation_deg,
};

/// Per-tick inputs that are not part of the controller's own state.
#[derive(Clone, Copy, Debug)]
pub struct TickInput {
    pub request: MovementRequest,
    /// Yaw degrees per second per unit of rotation input.
    pub rotation_sensitivity: f32,
    /// Fixed physics step (seconds).
    pub dt: f32,
    pub body: BodySnapshot,
}

/// Output of a single [`advance_tick`].
#[derive(Clone, Debug)]
pub struct TickOutcome {
    pub state: LocomotionState,
    /// Side effects in the order they must be applied.
    pub commands: Vec<BodyCommand>,
}

/// Perform one locomotion tick.
///
/// Behavior (strict order)
/// 1. Ground probe; latch a landing on the airborne -> grounded edge.
/// 2. Drag and native gravity for the new grounded/slope state.
/// 3. Pending brake impulse, if grounded.
/// 4. Yaw rotation from the current rotation input.
/// 5. Movement force toward the request, with slope probing and projection.
/// 6. Extra gravity while airborne or on an unclimbable slope.
///
/// The landing latch is cleared before returning whether or not step 5 ran.
pub fn advance_tick<S: SurfaceSensor + ?Sized>(
    mut state: LocomotionState,
    settings: &LocomotionSettings,
    input: TickInput,
    sensor: &S,
) -> TickOutcome {
    let body = &input.body;
    let mut commands = Vec::with_capacity(6);

    sense_ground(&mut state, settings, body, sensor);
    adjust_drag_and_gravity(&state, settings, &mut commands);
    apply_brake(&mut state, settings, body, &mut commands);
    rotate(
        &state,
        input.rotation_sensitivity,
        input.dt,
        body,
        &mut commands,
    );
    movement_force(
        &mut state,
        settings,
        &input.request,
        body,
        sensor,
        &mut commands,
    );
    extra_gravity(&state, settings, body, &mut commands);

    // The latch never outlives the tick that set it, even if step 5 was skipped.
    state.landed = false;

    TickOutcome { state, commands }
}

/// Probe for ground under the body and update `is_grounded`.
///
/// A miss always clears `is_grounded`. On the false -> true edge the current
/// horizontal velocity is captured for the landing latch and any jump ends.
pub fn sense_ground<S: SurfaceSensor + ?Sized>(
    state: &mut LocomotionState,
    settings: &LocomotionSettings,
    body: &BodySnapshot,
    sensor: &S,
) -> Option<SurfaceHit> {
    let was_grounded = state.is_grounded;
    let origin = body.position + settings.ground_probe_offset();
    let hit = sensor.probe_ground(
        origin,
        settings.ground_probe_distance,
        settings.ground_layers,
    );

    state.is_grounded = hit.is_some();

    if !was_grounded && state.is_grounded {
        state.landed = true;
        state.velocity_before_landing = horizontal(body.velocity);
        state.is_jumping = false;
        log::debug!(
            "landed with horizontal velocity {:?}",
            state.velocity_before_landing
        );
    }

    hit
}

/// Grounded bodies are damped; airborne ones are not. Native gravity is off only
/// while grounded on a climbable slope, where the movement force carries the body.
pub fn adjust_drag_and_gravity(
    state: &LocomotionState,
    settings: &LocomotionSettings,
    commands: &mut Vec<BodyCommand>,
) {
    let drag = if state.is_grounded {
        settings.grounded_drag
    } else {
        0.0
    };
    commands.push(BodyCommand::SetLinearDrag(drag));

    let gravity_off = state.is_grounded && state.is_on_climbable_slope();
    commands.push(BodyCommand::SetGravityEnabled(!gravity_off));
}

/// Service a pending brake with one impulse against the current velocity.
///
/// A brake requested while airborne stays pending until the body is grounded.
pub fn apply_brake(
    state: &mut LocomotionState,
    settings: &LocomotionSettings,
    body: &BodySnapshot,
    commands: &mut Vec<BodyCommand>,
) {
    if !(state.brake_requested && state.is_grounded) {
        return;
    }

    commands.push(BodyCommand::ApplyImpulse(
        -body.velocity * settings.brake_multiplier,
    ));
    state.brake_requested = false;
    log::debug!("brake");
}

/// Yaw the body in place by `input * dt * sensitivity` degrees.
///
/// Returns the new orientation (unchanged when the delta is negligible).
pub fn rotate(
    state: &LocomotionState,
    rotation_sensitivity: f32,
    dt: f32,
    body: &BodySnapshot,
    commands: &mut Vec<BodyCommand>,
) -> Quat {
    let yaw_deg = state.horizontal_rotation_input * dt.max(0.0) * rotation_sensitivity;
    if yaw_deg.abs() <= YAW_EPS {
        return body.orientation;
    }

    let orientation = body.orientation * yaw_rotation_deg(yaw_deg);
    commands.push(BodyCommand::SetOrientation(orientation));
    orientation
}

/// Classify a slope probe hit and record its geometry.
///
/// Exactly flat (angle 0) is not a slope; steeper than `max_slope_angle` is
/// unclimbable.
pub fn classify_slope(state: &mut LocomotionState, settings: &LocomotionSettings, hit: &SurfaceHit) {
    let angle = angle_from_up_deg(hit.normal);

    state.slope_angle = angle;
    state.slope_normal = normalize_or_zero(hit.normal);
    state.is_on_unclimbable_slope = angle > settings.max_slope_angle;
    state.is_on_slope = angle > FLAT_ANGLE_EPS_DEG || state.is_on_unclimbable_slope;
}

/// Push the body toward the requested direction.
///
/// Skipped entirely for an invalid request, or when horizontal speed already
/// reached the goal speed (a speed cap, not a force cap). Consumes the landing
/// latch, restoring the pre-landing horizontal velocity once; a skipped call
/// leaves the latch for [`advance_tick`] to drop.
pub fn movement_force<S: SurfaceSensor + ?Sized>(
    state: &mut LocomotionState,
    settings: &LocomotionSettings,
    request: &MovementRequest,
    body: &BodySnapshot,
    sensor: &S,
    commands: &mut Vec<BodyCommand>,
) {
    if !request.is_valid() || horizontal_speed(body.velocity) >= request.goal_speed() {
        return;
    }

    // 1) Restore the velocity the landing tick would otherwise have damped away.
    if state.landed {
        let restored = Vec3::new(
            state.velocity_before_landing.x,
            body.velocity.y,
            state.velocity_before_landing.z,
        );
        commands.push(BodyCommand::SetVelocity(restored));
        state.landed = false;
    }

    // 2) Body-local request direction to world space.
    let (right, forward) = right_forward(&body.orientation);
    let dir = request.direction();
    let heading = right * dir.x + forward * dir.y;

    let multiplier = if state.is_grounded {
        1.0
    } else {
        settings.air_control_multiplier
    };
    let mut force = heading * (request.acceleration() * multiplier);

    // 3) Look ahead and down for a slope. A miss keeps the previous slope state.
    let probe_dir = normalize_or_zero(heading) - up();
    if let Some(hit) = sensor.probe_slope(body.position, probe_dir, settings.max_floor_distance) {
        classify_slope(state, settings, &hit);
    }

    // 4) On a climbable slope, follow the surface instead of pushing into it.
    if state.is_on_climbable_slope() {
        force = project_on_plane(force, state.slope_normal);
    }
    force.y = 0.0;

    if !state.is_on_unclimbable_slope {
        commands.push(BodyCommand::ApplyForce(force));
    }
}

/// Add `(gravity_scale - 1) * mass * g` while airborne or on an unclimbable
/// slope, so the effective fall acceleration is `gravity_scale * g`.
pub fn extra_gravity(
    state: &LocomotionState,
    settings: &LocomotionSettings,
    body: &BodySnapshot,
    commands: &mut Vec<BodyCommand>,
) {
    if state.is_grounded && !state.is_on_unclimbable_slope {
        return;
    }

    let force = body.gravity * ((settings.gravity_scale - 1.0) * body.mass);
    commands.push(BodyCommand::ApplyForce(force));
}

/// Jump if grounded and not already jumping.
///
/// The current speed, clamped to `max_jump_assist_velocity`, is added to the
/// vertical impulse. Grounded is cleared immediately so a second call before the
/// next probe cannot jump again. Returns `None` (state untouched) otherwise.
pub fn jump(
    state: &mut LocomotionState,
    settings: &LocomotionSettings,
    body: &BodySnapshot,
) -> Option<BodyCommand> {
    if !state.is_grounded || state.is_jumping {
        return None;
    }

    let assist = body
        .velocity
        .norm()
        .clamp(0.0, settings.max_jump_assist_velocity);
    let impulse = up() * (settings.jump_height * settings.jump_speed_multiplier + assist);

    state.is_grounded = false;
    state.is_jumping = true;
    log::debug!("jump with impulse {impulse:?}");

    Some(BodyCommand::ApplyImpulse(impulse))
}
