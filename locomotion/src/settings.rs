/*!
Locomotion controller settings.

One `LocomotionSettings` value configures one controller and stays fixed for the
lifetime of that controller (call `LocomotionController::reconfigure` to swap it).

Notes
- Distances are in meters, time in seconds, angles in degrees.
- Defaults come from `crate::constants`; settings files only need to name the
  fields they override.
- Settings files are RON, e.g.

```ron
(
    jump_height: 12.0,
    max_slope_angle: 40.0,
    ground_layers: 1,
    rotation_sensitivity: Some(120.0),
)
```
*/

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    AIR_CONTROL_MULTIPLIER, BRAKE_MULTIPLIER, DOWNHILL_SLIDE_THRESHOLD, GRAVITY_SCALE,
    GROUND_PROBE_DISTANCE, GROUND_PROBE_OFFSET_Y, GROUNDED_DRAG, JUMP_HEIGHT,
    JUMP_SPEED_MULTIPLIER, MAX_FLOOR_DISTANCE, MAX_JUMP_ASSIST_VELOCITY, MAX_SLOPE_ANGLE_DEG,
};
use crate::error::SettingsError;
use crate::layers::{LayerMask, default_ground_layers};
use crate::types::Vec3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionSettings {
    /// Offset from the body origin where the ground probe starts.
    pub ground_probe_offset: [f32; 3],
    /// Length of the downward ground probe.
    pub ground_probe_distance: f32,
    /// Effective fall acceleration as a multiple of engine gravity.
    pub gravity_scale: f32,
    pub jump_height: f32,
    pub jump_speed_multiplier: f32,
    /// Cap on the current speed carried into the jump impulse (m/s).
    pub max_jump_assist_velocity: f32,
    /// Fraction of the current velocity removed by one brake impulse.
    pub brake_multiplier: f32,
    /// Linear drag while grounded; airborne drag is always zero.
    pub grounded_drag: f32,
    /// Movement force multiplier while airborne (grounded uses 1).
    pub air_control_multiplier: f32,
    /// Reach of the forward slope probe.
    pub max_floor_distance: f32,
    /// Steepest climbable slope (degrees from vertical).
    pub max_slope_angle: f32,
    /// Vertical velocity below which the slope angle is reported as negative.
    pub downhill_slide_threshold: f32,
    /// Layers the ground probe accepts.
    pub ground_layers: LayerMask,
    /// Yaw degrees per second per unit of rotation input, supplied by the camera.
    ///
    /// `None` leaves the controller disabled.
    pub rotation_sensitivity: Option<f32>,
}

impl Default for LocomotionSettings {
    fn default() -> Self {
        Self {
            ground_probe_offset: [0.0, GROUND_PROBE_OFFSET_Y, 0.0],
            ground_probe_distance: GROUND_PROBE_DISTANCE,
            gravity_scale: GRAVITY_SCALE,
            jump_height: JUMP_HEIGHT,
            jump_speed_multiplier: JUMP_SPEED_MULTIPLIER,
            max_jump_assist_velocity: MAX_JUMP_ASSIST_VELOCITY,
            brake_multiplier: BRAKE_MULTIPLIER,
            grounded_drag: GROUNDED_DRAG,
            air_control_multiplier: AIR_CONTROL_MULTIPLIER,
            max_floor_distance: MAX_FLOOR_DISTANCE,
            max_slope_angle: MAX_SLOPE_ANGLE_DEG,
            downhill_slide_threshold: DOWNHILL_SLIDE_THRESHOLD,
            ground_layers: default_ground_layers(),
            rotation_sensitivity: None,
        }
    }
}

impl LocomotionSettings {
    /// Attach the camera's rotation sensitivity.
    pub fn with_rotation_sensitivity(mut self, sensitivity: f32) -> Self {
        self.rotation_sensitivity = Some(sensitivity);
        self
    }

    #[inline]
    pub fn ground_probe_offset(&self) -> Vec3 {
        Vec3::from(self.ground_probe_offset)
    }

    /// Parse settings from RON text. Missing fields take their defaults.
    pub fn from_ron_str(text: &str) -> Result<Self, SettingsError> {
        ron::from_str(text).map_err(|e| SettingsError::Ron(e.to_string()))
    }

    /// Read and parse a RON settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    /// Check every value a controller relies on.
    ///
    /// Gravity scale may be below 1 (lighter than engine gravity) but not negative.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (i, v) in self.ground_probe_offset.iter().enumerate() {
            let field = ["ground_probe_offset.x", "ground_probe_offset.y", "ground_probe_offset.z"][i];
            finite(field, *v)?;
        }

        non_negative("ground_probe_distance", self.ground_probe_distance)?;
        non_negative("gravity_scale", self.gravity_scale)?;
        non_negative("jump_height", self.jump_height)?;
        non_negative("jump_speed_multiplier", self.jump_speed_multiplier)?;
        non_negative("max_jump_assist_velocity", self.max_jump_assist_velocity)?;
        non_negative("brake_multiplier", self.brake_multiplier)?;
        non_negative("grounded_drag", self.grounded_drag)?;
        non_negative("air_control_multiplier", self.air_control_multiplier)?;
        non_negative("max_floor_distance", self.max_floor_distance)?;
        finite("downhill_slide_threshold", self.downhill_slide_threshold)?;

        finite("max_slope_angle", self.max_slope_angle)?;
        if !(0.0..=90.0).contains(&self.max_slope_angle) {
            return Err(SettingsError::SlopeAngleOutOfRange(self.max_slope_angle));
        }

        match self.rotation_sensitivity {
            Some(s) => finite("rotation_sensitivity", s),
            None => Err(SettingsError::MissingRotationSensitivity),
        }
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::NotFinite { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), SettingsError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(SettingsError::Negative { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::CollisionLayer;

    #[test]
    fn defaults_match_tuning_constants() {
        let s = LocomotionSettings::default();
        assert_eq!(s.ground_probe_offset(), Vec3::new(0.0, 0.001, 0.0));
        assert_eq!(s.jump_height, 10.0);
        assert_eq!(s.jump_speed_multiplier, 0.75);
        assert_eq!(s.max_slope_angle, 45.0);
        assert_eq!(s.downhill_slide_threshold, -3.0);
        assert!(s.ground_layers.has(CollisionLayer::Ground));
    }

    #[test]
    fn default_without_sensitivity_is_rejected() {
        let err = LocomotionSettings::default().validate().unwrap_err();
        assert!(matches!(err, SettingsError::MissingRotationSensitivity));

        assert!(
            LocomotionSettings::default()
                .with_rotation_sensitivity(90.0)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn validate_rejects_bad_values() {
        let base = LocomotionSettings::default().with_rotation_sensitivity(1.0);

        let mut s = base.clone();
        s.ground_probe_distance = -0.1;
        assert!(matches!(
            s.validate(),
            Err(SettingsError::Negative { field: "ground_probe_distance", .. })
        ));

        let mut s = base.clone();
        s.max_slope_angle = 120.0;
        assert!(matches!(s.validate(), Err(SettingsError::SlopeAngleOutOfRange(_))));

        let mut s = base.clone();
        s.jump_height = f32::NAN;
        assert!(matches!(
            s.validate(),
            Err(SettingsError::NotFinite { field: "jump_height", .. })
        ));

        let mut s = base;
        s.ground_probe_offset[1] = f32::INFINITY;
        assert!(matches!(
            s.validate(),
            Err(SettingsError::NotFinite { field: "ground_probe_offset.y", .. })
        ));
    }

    #[test]
    fn partial_ron_overrides_only_named_fields() {
        let text = r#"(
            jump_height: 12.0,
            max_slope_angle: 30.0,
            ground_layers: 5,
            rotation_sensitivity: Some(120.0),
        )"#;
        let s = LocomotionSettings::from_ron_str(text).unwrap();
        assert_eq!(s.jump_height, 12.0);
        assert_eq!(s.max_slope_angle, 30.0);
        assert_eq!(s.rotation_sensitivity, Some(120.0));
        assert!(s.ground_layers.has(CollisionLayer::Prop));
        assert_eq!(s.brake_multiplier, BRAKE_MULTIPLIER);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn malformed_ron_is_reported() {
        let err = LocomotionSettings::from_ron_str("( jump_height: \"high\" )").unwrap_err();
        assert!(matches!(err, SettingsError::Ron(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = LocomotionSettings::load("/definitely/not/here/locomotion.ron").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
