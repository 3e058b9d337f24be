use locomotion::rapier_world::rapier3d::prelude::RigidBodyHandle;
use locomotion::{
    CharacterBody, CharacterSpec, ColliderShapeDef, LocomotionController, LocomotionSettings,
    MovementRequest, Quat, RapierWorld, Vec2, Vec3, WorldStaticDef,
};

fn flat_world() -> RapierWorld {
    RapierWorld::build_default(vec![WorldStaticDef::ground(
        0,
        Vec3::zeros(),
        Quat::identity(),
        ColliderShapeDef::Plane {
            offset_along_normal: 0.0,
        },
    )])
}

fn settings() -> LocomotionSettings {
    LocomotionSettings::default().with_rotation_sensitivity(90.0)
}

fn run(world: &mut RapierWorld, handle: RigidBodyHandle, controller: &mut LocomotionController, ticks: usize) {
    let dt = world.dt();
    for _ in 0..ticks {
        if let Some(mut body) = world.body(handle) {
            controller.fixed_tick(&mut body, dt);
        }
        world.step();
    }
}

fn position(world: &mut RapierWorld, handle: RigidBodyHandle) -> Vec3 {
    world.body(handle).map(|b| b.position()).unwrap_or_default()
}

#[test]
fn character_walks_forward_on_flat_ground() {
    let mut world = flat_world();
    let handle = world.spawn_character(CharacterSpec::default());
    let mut controller = LocomotionController::new(settings());
    controller.start(&world.body(handle).unwrap());
    assert!(controller.is_grounded());

    controller.set_movement_request(MovementRequest::new(Vec2::new(0.0, 1.0), 3.0, 20.0));
    run(&mut world, handle, &mut controller, 120);

    let pos = position(&mut world, handle);
    assert!(controller.is_grounded());
    assert!(pos.z > 0.5, "moved to {pos:?}");
    assert!(pos.x.abs() < 0.05, "drifted sideways to {pos:?}");

    let body = world.body(handle).unwrap();
    assert_eq!(controller.normalized_horizontal_speed(&body), 1.0);
}

#[test]
fn jump_leaves_the_ground_and_lands() {
    let mut world = flat_world();
    let handle = world.spawn_character(CharacterSpec::default());
    let mut controller = LocomotionController::new(settings());
    controller.start(&world.body(handle).unwrap());
    run(&mut world, handle, &mut controller, 5);

    // Jump between the controller tick and the physics step, like input would.
    assert!(controller.jump(&mut world.body(handle).unwrap()));
    world.step();
    run(&mut world, handle, &mut controller, 10);
    assert!(!controller.is_grounded());
    assert!(controller.is_jumping());
    assert!(position(&mut world, handle).y > 0.3);

    run(&mut world, handle, &mut controller, 180);
    assert!(controller.is_grounded());
    assert!(!controller.is_jumping());
}

#[test]
fn rotation_input_turns_heading() {
    let mut world = flat_world();
    let handle = world.spawn_character(CharacterSpec::default());
    let mut controller = LocomotionController::new(settings());
    controller.start(&world.body(handle).unwrap());

    // 90 deg/s for one second.
    controller.set_rotation_input(1.0);
    run(&mut world, handle, &mut controller, 60);
    controller.set_rotation_input(0.0);

    let body = world.body(handle).unwrap();
    let forward = body.orientation() * Vec3::z();
    assert!((forward - Vec3::x()).norm() < 0.05, "forward {forward:?}");
}

#[test]
fn disabled_controller_leaves_body_to_physics() {
    let mut world = flat_world();
    let handle = world.spawn_character(CharacterSpec::default());
    let mut controller = LocomotionController::new(LocomotionSettings::default());
    assert!(!controller.is_enabled());

    controller.set_movement_request(MovementRequest::new(Vec2::new(0.0, 1.0), 3.0, 20.0));
    run(&mut world, handle, &mut controller, 60);

    let pos = position(&mut world, handle);
    assert!(pos.z.abs() < 1.0e-3, "moved to {pos:?}");
}

#[test]
fn steep_ramp_stops_forward_progress() {
    // A 60 degree ramp whose walking surface meets the floor near z = 2.9.
    let ramp = WorldStaticDef::ground(
        1,
        Vec3::new(0.0, 0.0, 3.0),
        Quat::from_axis_angle(&Vec3::x_axis(), (-60.0_f32).to_radians()),
        ColliderShapeDef::Cuboid {
            half_extents: Vec3::new(2.0, 0.1, 3.0),
        },
    );
    let mut world = RapierWorld::build_default(vec![
        WorldStaticDef::ground(
            0,
            Vec3::zeros(),
            Quat::identity(),
            ColliderShapeDef::Plane {
                offset_along_normal: 0.0,
            },
        ),
        ramp,
    ]);
    let handle = world.spawn_character(CharacterSpec::default());
    let mut controller = LocomotionController::new(settings());
    controller.start(&world.body(handle).unwrap());

    controller.set_movement_request(MovementRequest::new(Vec2::new(0.0, 1.0), 3.0, 10.0));
    run(&mut world, handle, &mut controller, 240);

    let pos = position(&mut world, handle);
    assert!(pos.z < 3.0, "climbed past the foot of the ramp to {pos:?}");
    assert!(pos.y < 0.5, "lifted onto the ramp to {pos:?}");
}
