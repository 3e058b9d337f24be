use crate::animation::AnimationSignals;
use crate::body::CharacterBody;
use crate::request::MovementRequest;
use crate::settings::LocomotionSettings;
use crate::state::LocomotionState;
use crate::tick::{self, TickInput};
use crate::types::Vec3;
use crate::utils::{horizontal, is_moving_horizontally};

/// Drives one rigid body from movement intents.
///
/// The controller does not own its body; every call that touches physics takes
/// the body explicitly. Use one controller per body.
///
/// A controller built with settings that fail [`LocomotionSettings::validate`]
/// (including a missing rotation sensitivity) is disabled: ticks, jumps and
/// brakes do nothing until [`LocomotionController::reconfigure`] succeeds.
#[derive(Clone, Debug)]
pub struct LocomotionController {
    settings: LocomotionSettings,
    state: LocomotionState,
    request: MovementRequest,
    enabled: bool,
}

impl LocomotionController {
    pub fn new(settings: LocomotionSettings) -> Self {
        let mut controller = Self {
            settings: LocomotionSettings::default(),
            state: LocomotionState::default(),
            request: MovementRequest::INVALID,
            enabled: false,
        };
        controller.reconfigure(settings);
        controller
    }

    /// Swap settings. Returns whether the controller is enabled afterwards.
    pub fn reconfigure(&mut self, settings: LocomotionSettings) -> bool {
        self.enabled = match settings.validate() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("locomotion controller disabled: {e}");
                false
            }
        };
        self.settings = settings;
        self.enabled
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn settings(&self) -> &LocomotionSettings {
        &self.settings
    }

    #[inline]
    pub fn state(&self) -> &LocomotionState {
        &self.state
    }

    /// Initial ground probe, run once when the body enters the world.
    ///
    /// Does not latch a landing.
    pub fn start<B: CharacterBody + ?Sized>(&mut self, body: &B) {
        if !self.enabled {
            return;
        }

        let origin = body.position() + self.settings.ground_probe_offset();
        self.state.is_grounded = body
            .probe_ground(
                origin,
                self.settings.ground_probe_distance,
                self.settings.ground_layers,
            )
            .is_some();
    }

    /// Run one fixed physics tick and apply its commands to `body`.
    pub fn fixed_tick<B: CharacterBody + ?Sized>(&mut self, body: &mut B, dt: f32) {
        let Some(rotation_sensitivity) = self.active_sensitivity() else {
            return;
        };

        let input = TickInput {
            request: self.request,
            rotation_sensitivity,
            dt,
            body: body.snapshot(),
        };
        let outcome = tick::advance_tick(self.state, &self.settings, input, &*body);

        self.state = outcome.state;
        for command in outcome.commands {
            command.apply(body);
        }
    }

    pub fn set_movement_request(&mut self, request: MovementRequest) {
        self.request = request;
    }

    #[inline]
    pub fn movement_request(&self) -> MovementRequest {
        self.request
    }

    /// Latest yaw rate; persists until overwritten.
    pub fn set_rotation_input(&mut self, yaw_rate: f32) {
        self.state.horizontal_rotation_input = yaw_rate;
    }

    /// Ask for one brake impulse on the next grounded tick.
    pub fn request_brake(&mut self) {
        self.state.brake_requested = true;
    }

    /// Jump now if grounded and not already jumping. Returns whether it jumped.
    pub fn jump<B: CharacterBody + ?Sized>(&mut self, body: &mut B) -> bool {
        if !self.enabled {
            return false;
        }

        match tick::jump(&mut self.state, &self.settings, &body.snapshot()) {
            Some(command) => {
                command.apply(body);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.state.is_grounded
    }

    #[inline]
    pub fn is_jumping(&self) -> bool {
        self.state.is_jumping
    }

    /// Magnitude of the normalized horizontal velocity: 0 at rest, 1 otherwise.
    pub fn normalized_horizontal_speed<B: CharacterBody + ?Sized>(&self, body: &B) -> f32 {
        if self.has_horizontal_movement(body) {
            1.0
        } else {
            0.0
        }
    }

    pub fn has_horizontal_movement<B: CharacterBody + ?Sized>(&self, body: &B) -> bool {
        is_moving_horizontally(body.velocity())
    }

    /// The last slope angle, negated while falling faster than the downhill threshold.
    pub fn signed_slope_angle<B: CharacterBody + ?Sized>(&self, body: &B) -> f32 {
        if body.velocity().y < self.settings.downhill_slide_threshold {
            -self.state.slope_angle
        } else {
            self.state.slope_angle
        }
    }

    /// Horizontal velocity (world space) of `body`.
    pub fn horizontal_velocity<B: CharacterBody + ?Sized>(&self, body: &B) -> Vec3 {
        horizontal(body.velocity())
    }

    pub fn animation_signals<B: CharacterBody + ?Sized>(&self, body: &B) -> AnimationSignals {
        AnimationSignals {
            normalized_speed: self.normalized_horizontal_speed(body),
            is_jumping: self.is_jumping(),
            signed_slope_angle: self.signed_slope_angle(body),
            is_grounded: self.is_grounded(),
        }
    }

    fn active_sensitivity(&self) -> Option<f32> {
        if self.enabled {
            self.settings.rotation_sensitivity
        } else {
            None
        }
    }
}
