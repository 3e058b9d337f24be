//! Presentation-rate smoothing of movement direction for an animator.
//!
//! The animator itself is external. [`AnimationDirectionSmoother::update`] is
//! polled once per rendered frame and produces an [`AnimationFrame`]; the frame
//! can be flattened into named parameters with [`AnimationFrame::parameters`].

use serde::{Deserialize, Serialize};

use crate::constants::ANIMATION_SPEED;
use crate::error::SettingsError;
use crate::types::Vec2;

/// Read-only controller signals the view polls once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationSignals {
    /// 0 at rest, 1 while moving horizontally.
    pub normalized_speed: f32,
    pub is_jumping: bool,
    pub signed_slope_angle: f32,
    pub is_grounded: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Direction units per second.
    pub animation_speed: f32,
    pub direction_x_param: String,
    pub direction_z_param: String,
    pub move_speed_param: String,
    pub jump_param: String,
    pub slope_angle_param: String,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            animation_speed: ANIMATION_SPEED,
            direction_x_param: "dir_x".into(),
            direction_z_param: "dir_z".into(),
            move_speed_param: "move_speed".into(),
            jump_param: "is_jump".into(),
            slope_angle_param: "slope_angle".into(),
        }
    }
}

impl AnimationSettings {
    pub fn from_ron_str(text: &str) -> Result<Self, SettingsError> {
        ron::from_str(text).map_err(|e| SettingsError::Ron(e.to_string()))
    }
}

/// A value written to one animator parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimatorValue {
    Float(f32),
    Bool(bool),
}

/// Everything an animator needs for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnimationFrame {
    pub direction_x: f32,
    pub direction_z: f32,
    pub move_speed: f32,
    pub is_jumping: bool,
    pub slope_angle: f32,
}

impl AnimationFrame {
    pub fn parameters<'a>(&self, settings: &'a AnimationSettings) -> [(&'a str, AnimatorValue); 5] {
        [
            (
                settings.direction_x_param.as_str(),
                AnimatorValue::Float(self.direction_x),
            ),
            (
                settings.direction_z_param.as_str(),
                AnimatorValue::Float(self.direction_z),
            ),
            (
                settings.move_speed_param.as_str(),
                AnimatorValue::Float(self.move_speed),
            ),
            (
                settings.slope_angle_param.as_str(),
                AnimatorValue::Float(self.slope_angle),
            ),
            (
                settings.jump_param.as_str(),
                AnimatorValue::Bool(self.is_jumping),
            ),
        ]
    }
}

/// Eases the displayed direction toward the latest requested one, one axis at a
/// time, at a constant rate.
#[derive(Clone, Debug, Default)]
pub struct AnimationDirectionSmoother {
    current: Vec2,
    previous: Vec2,
    next: Vec2,
    settings: AnimationSettings,
}

impl AnimationDirectionSmoother {
    pub fn new(settings: AnimationSettings) -> Self {
        Self {
            current: Vec2::zeros(),
            previous: Vec2::zeros(),
            next: Vec2::zeros(),
            settings,
        }
    }

    #[inline]
    pub fn settings(&self) -> &AnimationSettings {
        &self.settings
    }

    pub fn set_movement_direction(&mut self, input: Vec2) {
        self.next = input;
    }

    #[inline]
    pub fn current_direction(&self) -> Vec2 {
        self.current
    }

    pub fn update(&mut self, dt: f32, signals: &AnimationSignals) -> AnimationFrame {
        let step = dt.max(0.0) * self.settings.animation_speed;

        for axis in 0..2 {
            (self.current[axis], self.previous[axis]) = ease_axis(
                self.current[axis],
                self.previous[axis],
                self.next[axis],
                step,
            );
        }

        AnimationFrame {
            direction_x: self.current.x,
            direction_z: self.current.y,
            move_speed: signals.normalized_speed,
            is_jumping: signals.is_jumping,
            slope_angle: signals.signed_slope_angle,
        }
    }
}

/// Move `current` by `step` from `previous` toward `next`, clamped to the span
/// between them. Once `next` is reached it becomes the new `previous`.
fn ease_axis(current: f32, previous: f32, next: f32, step: f32) -> (f32, f32) {
    if next > previous {
        let current = (current + step).clamp(previous, next);
        let previous = if current >= next { next } else { previous };
        (current, previous)
    } else if next < previous {
        let current = (current - step).clamp(next, previous);
        let previous = if current <= next { next } else { previous };
        (current, previous)
    } else {
        (current, previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle() -> AnimationSignals {
        AnimationSignals::default()
    }

    #[test]
    fn eases_toward_new_direction_at_configured_rate() {
        let mut smoother = AnimationDirectionSmoother::new(AnimationSettings::default());
        smoother.set_movement_direction(Vec2::new(1.0, 0.0));

        let frame = smoother.update(0.1, &idle());
        assert!((frame.direction_x - 0.4).abs() < 1.0e-6);
        assert_eq!(frame.direction_z, 0.0);

        let frame = smoother.update(0.1, &idle());
        assert!((frame.direction_x - 0.8).abs() < 1.0e-6);

        let frame = smoother.update(0.1, &idle());
        assert_eq!(frame.direction_x, 1.0);
    }

    #[test]
    fn reversal_passes_through_zero() {
        let mut smoother = AnimationDirectionSmoother::new(AnimationSettings::default());
        smoother.set_movement_direction(Vec2::new(0.0, 1.0));
        smoother.update(1.0, &idle());
        assert_eq!(smoother.current_direction(), Vec2::new(0.0, 1.0));

        smoother.set_movement_direction(Vec2::new(0.0, -1.0));
        let frame = smoother.update(0.25, &idle());
        assert!(frame.direction_z.abs() < 1.0e-6);

        let frame = smoother.update(0.25, &idle());
        assert_eq!(frame.direction_z, -1.0);

        // Settled; further frames hold the value.
        let frame = smoother.update(1.0, &idle());
        assert_eq!(frame.direction_z, -1.0);
    }

    #[test]
    fn axes_ease_independently() {
        let mut smoother = AnimationDirectionSmoother::new(AnimationSettings {
            animation_speed: 2.0,
            ..AnimationSettings::default()
        });
        smoother.set_movement_direction(Vec2::new(0.5, -1.0));

        let frame = smoother.update(0.25, &idle());
        assert_eq!(frame.direction_x, 0.5);
        assert!((frame.direction_z + 0.5).abs() < 1.0e-6);
    }

    #[test]
    fn signals_pass_through() {
        let mut smoother = AnimationDirectionSmoother::default();
        let signals = AnimationSignals {
            normalized_speed: 1.0,
            is_jumping: true,
            signed_slope_angle: -20.0,
            is_grounded: false,
        };

        let frame = smoother.update(0.016, &signals);
        assert_eq!(frame.move_speed, 1.0);
        assert!(frame.is_jumping);
        assert_eq!(frame.slope_angle, -20.0);
    }

    #[test]
    fn parameters_use_configured_names() {
        let settings = AnimationSettings::from_ron_str(r#"(jump_param: "airborne")"#).unwrap();
        assert_eq!(settings.animation_speed, ANIMATION_SPEED);

        let frame = AnimationFrame {
            direction_x: 0.25,
            is_jumping: true,
            ..AnimationFrame::default()
        };
        let params = frame.parameters(&settings);

        assert_eq!(params[0], ("dir_x", AnimatorValue::Float(0.25)));
        assert!(params.contains(&("airborne", AnimatorValue::Bool(true))));
    }
}
