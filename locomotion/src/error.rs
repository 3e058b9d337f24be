/// Reasons a [`crate::settings::LocomotionSettings`] or
/// [`crate::animation::AnimationSettings`] cannot be used.
///
/// None of these are fatal to the simulation: a controller handed bad settings
/// disables itself until it is reconfigured.
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("I/O while reading settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(String),
    #[error("'{field}' must be finite (got {value})")]
    NotFinite { field: &'static str, value: f32 },
    #[error("'{field}' must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("'max_slope_angle' must be within [0, 90] degrees (got {0})")]
    SlopeAngleOutOfRange(f32),
    #[error("no rotation sensitivity source was provided")]
    MissingRotationSensitivity,
}
