use locomotion::{CharacterSpec, ColliderShapeDef, Quat, RapierWorld, Vec3, WorldStaticDef};
use nalgebra::Vector3;

/// Slope of the ramp the character can walk up (degrees).
pub const GENTLE_RAMP_DEG: f32 = 25.0;
/// Slope of the ramp that is too steep to climb (degrees).
pub const STEEP_RAMP_DEG: f32 = 60.0;

fn ramp(id: u32, center: Vec3, yaw_deg: f32, tilt_deg: f32) -> WorldStaticDef {
    // Tilt about X so the surface rises toward +Z, then yaw into place.
    let rotation = Quat::from_axis_angle(&Vector3::y_axis(), yaw_deg.to_radians())
        * Quat::from_axis_angle(&Vector3::x_axis(), -tilt_deg.to_radians());

    WorldStaticDef::ground(
        id,
        center,
        rotation,
        ColliderShapeDef::Cuboid {
            half_extents: Vec3::new(2.0, 0.1, 4.0),
        },
    )
}

/// Flat floor, a gentle ramp straight ahead and a steep ramp off to the right.
pub fn build(dt: f32) -> RapierWorld {
    let statics = vec![
        WorldStaticDef::ground(
            0,
            Vec3::zeros(),
            Quat::identity(),
            ColliderShapeDef::Plane {
                offset_along_normal: 0.0,
            },
        ),
        ramp(1, Vec3::new(0.0, 0.0, 12.0), 0.0, GENTLE_RAMP_DEG),
        ramp(2, Vec3::new(10.0, 0.0, 4.0), 90.0, STEEP_RAMP_DEG),
    ];

    RapierWorld::build(statics, dt)
}

pub fn character() -> CharacterSpec {
    CharacterSpec {
        position: Vec3::new(0.0, 0.0, 0.0),
        ..CharacterSpec::default()
    }
}
