//! Default tuning values for the locomotion controller.
//!
//! Distances are in meters, time in seconds, angles in degrees.
//! [`crate::settings::LocomotionSettings::default`] is built from these.

/// Upward offset (meters) applied to the body origin before the ground probe is cast.
///
/// Starting the ray slightly above the feet keeps it from beginning inside the floor.
pub const GROUND_PROBE_OFFSET_Y: f32 = 0.001;

/// Length of the downward ground probe (meters).
pub const GROUND_PROBE_DISTANCE: f32 = 0.1;

/// Effective fall acceleration as a multiple of the engine gravity.
pub const GRAVITY_SCALE: f32 = 2.0;

/// Base upward jump impulse before the speed multiplier is applied.
pub const JUMP_HEIGHT: f32 = 10.0;

/// Multiplier applied to [`JUMP_HEIGHT`] to get the jump impulse.
pub const JUMP_SPEED_MULTIPLIER: f32 = 0.75;

/// Upper bound (m/s) of the current speed carried into the jump impulse.
pub const MAX_JUMP_ASSIST_VELOCITY: f32 = 5.0;

/// Fraction of the current velocity removed by a single brake impulse.
pub const BRAKE_MULTIPLIER: f32 = 0.75;

/// Linear drag applied while grounded. Airborne drag is always zero.
pub const GROUNDED_DRAG: f32 = 3.5;

/// Air-control multiplier for movement force while airborne.
///
/// Convention:
/// - 1.0 = full ground control in air
/// - 0.0 = no air control
pub const AIR_CONTROL_MULTIPLIER: f32 = 0.1;

/// Reach of the forward slope probe (meters).
pub const MAX_FLOOR_DISTANCE: f32 = 1.0;

/// Steepest climbable slope, measured between world up and the surface normal (degrees).
pub const MAX_SLOPE_ANGLE_DEG: f32 = 45.0;

/// Vertical velocity (m/s) below which the character counts as sliding downhill.
pub const DOWNHILL_SLIDE_THRESHOLD: f32 = -3.0;

/// Default camera sensitivity used by the sandbox (degrees per unit of yaw input per second).
pub const DEFAULT_ROTATION_SENSITIVITY: f32 = 90.0;

/// Rate (units per second) at which displayed animation directions ease toward their target.
pub const ANIMATION_SPEED: f32 = 4.0;

/// Minimum yaw delta (degrees) worth writing back to the body.
pub const YAW_EPS: f32 = 1.0e-6;

/// Slope angles at or below this (degrees) count as flat ground.
pub const FLAT_ANGLE_EPS_DEG: f32 = 1.0e-3;

/// Horizontal speed (m/s) below which the body counts as standing still.
pub const REST_SPEED_EPS: f32 = 1.0e-3;

/// Fixed physics rate used when no other rate is configured.
pub const PHYSICS_TICK_HZ: u32 = 60;

/// Standard gravity magnitude (m/s^2, positive value).
pub const STANDARD_GRAVITY: f32 = 9.81;
