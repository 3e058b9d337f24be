//! Headless locomotion sandbox.
//!
//! Builds a small Rapier scene, drives one character through a scripted input
//! timeline at the fixed physics rate and polls the animation smoother at an
//! uneven presentation rate. Run with `RUST_LOG=info` (or `debug` for landing,
//! jump and brake events). An optional first argument names a RON settings file.

mod scene;
mod timeline;

use std::process::ExitCode;

use locomotion::constants::DEFAULT_ROTATION_SENSITIVITY;
use locomotion::{
    AnimationDirectionSmoother, AnimationSettings, CharacterBody, LocomotionController,
    LocomotionSettings, PHYSICS_TICK_HZ, Vec2,
};

use crate::timeline::{Action, Timeline};

/// Presentation frame times cycled through to mimic an unsteady frame rate.
const FRAME_TIMES: [f32; 4] = [1.0 / 45.0, 1.0 / 72.0, 1.0 / 30.0, 1.0 / 60.0];

/// Seconds between status lines.
const REPORT_INTERVAL: f32 = 0.5;

/// Extra simulated time after the last scripted action.
const SETTLE_TIME: f32 = 2.0;

fn load_settings() -> Result<LocomotionSettings, locomotion::SettingsError> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading settings from {path}");
            LocomotionSettings::load(path)
        }
        None => Ok(LocomotionSettings::default()
            .with_rotation_sensitivity(DEFAULT_ROTATION_SENSITIVITY)),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("failed to load settings: {e}");
            return ExitCode::FAILURE;
        }
    };

    let dt = 1.0 / PHYSICS_TICK_HZ as f32;
    let mut world = scene::build(dt);
    let handle = world.spawn_character(scene::character());

    let mut controller = LocomotionController::new(settings);
    if !controller.is_enabled() {
        log::error!("controller disabled; check the settings file");
        return ExitCode::FAILURE;
    }
    if let Some(body) = world.body(handle) {
        controller.start(&body);
    }

    let mut smoother = AnimationDirectionSmoother::new(AnimationSettings::default());
    let mut timeline = Timeline::demo();
    let end = timeline.duration() + SETTLE_TIME;

    let mut sim_time = 0.0_f32;
    let mut accumulator = 0.0_f32;
    let mut next_report = 0.0_f32;
    let mut frame_index = 0_usize;

    while sim_time < end {
        let frame_dt = FRAME_TIMES[frame_index % FRAME_TIMES.len()];
        frame_index += 1;
        accumulator += frame_dt;

        while accumulator >= dt {
            let mut jump_requested = false;
            for (at, action) in timeline.due(sim_time) {
                log::info!("t={at:.2}s {action:?}");
                if let Some(request) = action.movement_request() {
                    controller.set_movement_request(request);
                    let direction = if request.is_valid() {
                        request.direction()
                    } else {
                        Vec2::zeros()
                    };
                    smoother.set_movement_direction(direction);
                }
                match action {
                    Action::Turn(rate) => controller.set_rotation_input(*rate),
                    Action::Brake => controller.request_brake(),
                    Action::Jump => jump_requested = true,
                    Action::Move { .. } | Action::Stop => {}
                }
            }

            let Some(mut body) = world.body(handle) else {
                log::error!("character body is gone");
                return ExitCode::FAILURE;
            };
            controller.fixed_tick(&mut body, dt);
            // Jumps land between the controller tick and the physics step.
            if jump_requested && !controller.jump(&mut body) {
                log::info!("jump ignored: not grounded or already jumping");
            }
            world.step();

            sim_time += dt;
            accumulator -= dt;
        }

        let Some(body) = world.body(handle) else {
            log::error!("character body is gone");
            return ExitCode::FAILURE;
        };
        let signals = controller.animation_signals(&body);
        let frame = smoother.update(frame_dt, &signals);

        if sim_time >= next_report {
            next_report += REPORT_INTERVAL;
            let p = body.position();
            let planar = controller.horizontal_velocity(&body);
            log::info!(
                "t={sim_time:5.2}s pos=({:6.2}, {:5.2}, {:6.2}) planar=({:5.2}, {:5.2}) vy={:5.2} grounded={} slope={:.1}",
                p.x,
                p.y,
                p.z,
                planar.x,
                planar.z,
                body.velocity().y,
                signals.is_grounded,
                signals.signed_slope_angle,
            );
            for (name, value) in frame.parameters(smoother.settings()) {
                log::debug!("  {name} = {value:?}");
            }
        }
    }

    log::info!("done after {sim_time:.2}s");
    ExitCode::SUCCESS
}
