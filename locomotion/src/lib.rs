pub mod animation;
pub mod bitmask_flags;
pub mod body;
pub mod constants;
pub mod controller;
pub mod error;
pub mod layers;
pub mod rapier_world;
pub mod request;
pub mod settings;
pub mod state;
pub mod tick;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use animation::{
    AnimationDirectionSmoother, AnimationFrame, AnimationSettings, AnimationSignals,
    AnimatorValue,
};
pub use body::{BodyCommand, CharacterBody, SurfaceSensor};
pub use constants::{PHYSICS_TICK_HZ, STANDARD_GRAVITY};
pub use controller::LocomotionController;
pub use error::SettingsError;
pub use layers::{CollisionLayer, LayerMask};
pub use rapier_world::{CharacterSpec, ColliderShapeDef, RapierBody, RapierWorld, WorldStaticDef};
pub use request::MovementRequest;
pub use settings::LocomotionSettings;
pub use state::LocomotionState;
pub use tick::{TickInput, TickOutcome, advance_tick};
pub use types::{BodySnapshot, ForceMode, Quat, SurfaceHit, Vec2, Vec3};
