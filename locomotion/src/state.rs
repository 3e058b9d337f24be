use crate::types::{Vec3, up};

/// Everything the controller remembers between physics ticks.
///
/// Owned by one controller and threaded through [`crate::tick::advance_tick`].
///
/// Invariants
/// - `is_on_unclimbable_slope` implies `is_on_slope`.
/// - `landed` is true for at most one tick: the movement-force step consumes it
///   and the end of the tick clears it if that step was skipped.
/// - `slope_angle`/`slope_normal` keep their last value when the slope probe misses.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocomotionState {
    pub is_grounded: bool,
    pub is_on_slope: bool,
    pub is_on_unclimbable_slope: bool,
    /// Angle between world up and the last detected slope normal (degrees).
    pub slope_angle: f32,
    pub slope_normal: Vec3,
    /// One-shot latch set on the airborne -> grounded transition.
    pub landed: bool,
    /// Horizontal velocity captured when `landed` was latched.
    pub velocity_before_landing: Vec3,
    /// Airborne because of a jump; cleared on landing.
    pub is_jumping: bool,
    pub brake_requested: bool,
    /// Latest requested yaw rate; persists until overwritten.
    pub horizontal_rotation_input: f32,
}

impl Default for LocomotionState {
    fn default() -> Self {
        Self {
            is_grounded: false,
            is_on_slope: false,
            is_on_unclimbable_slope: false,
            slope_angle: 0.0,
            slope_normal: up(),
            landed: false,
            velocity_before_landing: Vec3::zeros(),
            is_jumping: false,
            brake_requested: false,
            horizontal_rotation_input: 0.0,
        }
    }
}

impl LocomotionState {
    /// Grounded on a slope the character may walk up.
    #[inline]
    pub fn is_on_climbable_slope(&self) -> bool {
        self.is_on_slope && !self.is_on_unclimbable_slope
    }
}
