//! Rapier-backed physics world for locomotion.
//!
//! Static geometry comes in as [`WorldStaticDef`]s and is inserted as fixed
//! bodies. Characters are dynamic, rotation-locked capsules whose origin sits at
//! the feet. [`RapierWorld::body`] hands out a [`RapierBody`] binding that
//! implements [`CharacterBody`] for one of them.
//!
//! Determinism
//! - Statics are sorted by `id` before insertion.
//! - User forces are cleared after every [`RapierWorld::step`], so a force pushed
//!   by the controller acts for exactly one step.

// Re-export Rapier so the sandbox and tests can name its types without a direct
// dependency.
pub use rapier3d;

use rapier3d::prelude::*;

use crate::body::{CharacterBody, SurfaceSensor};
use crate::constants::{PHYSICS_TICK_HZ, STANDARD_GRAVITY};
use crate::layers::{CollisionLayer, LayerMask};
use crate::types::{ForceMode, Quat, SurfaceHit, Vec3};
use crate::utils::normalize_or_zero;

/// Probes start this far (meters) behind their requested origin.
const PROBE_SKIN: f32 = 0.02;

/// Definition of one immutable world collider.
///
/// Conventions
/// - Units are meters.
/// - The collider shares the pose of its fixed parent body.
#[derive(Clone, Debug)]
pub struct WorldStaticDef {
    /// Stable unique identifier; fixes insertion order.
    pub id: u32,
    pub translation: Vec3,
    pub rotation: Quat,
    pub shape: ColliderShapeDef,
    /// Layers this collider belongs to.
    pub layers: LayerMask,
}

impl WorldStaticDef {
    /// A ground-layer static.
    pub fn ground(id: u32, translation: Vec3, rotation: Quat, shape: ColliderShapeDef) -> Self {
        Self {
            id,
            translation,
            rotation,
            shape,
            layers: CollisionLayer::Ground.as_mask(),
        }
    }
}

/// Supported static collider shapes.
#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Infinite half-space whose outward normal is the pose's local +Y.
    Plane {
        /// Offset of the surface along the normal (meters).
        offset_along_normal: f32,
    },

    /// Oriented box, used for ramps and walls.
    Cuboid { half_extents: Vec3 },
}

/// Shape and placement of a character body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CharacterSpec {
    /// World position of the feet.
    pub position: Vec3,
    pub orientation: Quat,
    pub capsule_radius: f32,
    pub capsule_half_height: f32,
    /// Total mass (kg).
    pub mass: f32,
}

impl Default for CharacterSpec {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            orientation: Quat::identity(),
            capsule_radius: 0.4,
            capsule_half_height: 0.5,
            mass: 1.0,
        }
    }
}

/// Everything Rapier needs to simulate and query one scene.
pub struct RapierWorld {
    gravity: Vector<Real>,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl RapierWorld {
    /// Build a world from static collider definitions, stepping at `dt` seconds.
    ///
    /// Queries work immediately; no step is needed first.
    pub fn build(mut defs: Vec<WorldStaticDef>, dt: f32) -> Self {
        defs.sort_by_key(|d| d.id);

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();
        let mut inserted = Vec::with_capacity(defs.len());

        for def in &defs {
            let rb = RigidBodyBuilder::fixed()
                .translation(def.translation)
                .rotation(def.rotation.scaled_axis())
                .build();
            let rb_handle = bodies.insert(rb);

            let collider = collider_from_def(def);
            inserted.push(colliders.insert_with_parent(collider, rb_handle, &mut bodies));
        }

        let mut world = Self {
            gravity: vector![0.0, -STANDARD_GRAVITY, 0.0],
            params: IntegrationParameters {
                dt,
                ..IntegrationParameters::default()
            },
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies,
            colliders,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        };
        world.refresh_broad_phase(&inserted);

        log::debug!("built rapier world with {} statics", inserted.len());
        world
    }

    /// Build with the default fixed rate.
    pub fn build_default(defs: Vec<WorldStaticDef>) -> Self {
        Self::build(defs, 1.0 / PHYSICS_TICK_HZ as f32)
    }

    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    #[inline]
    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    #[inline]
    pub fn dt(&self) -> f32 {
        self.params.dt
    }

    /// Insert a character and return its body handle.
    pub fn spawn_character(&mut self, spec: CharacterSpec) -> RigidBodyHandle {
        let rb = RigidBodyBuilder::dynamic()
            .translation(spec.position)
            .rotation(spec.orientation.scaled_axis())
            .lock_rotations()
            .can_sleep(false)
            .build();
        let handle = self.bodies.insert(rb);

        // Lift the capsule so the body origin sits at its bottom.
        let lift = spec.capsule_half_height + spec.capsule_radius;
        let collider = ColliderBuilder::capsule_y(spec.capsule_half_height, spec.capsule_radius)
            .translation(vector![0.0, lift, 0.0])
            .mass(spec.mass)
            .friction(0.0)
            .collision_groups(groups_for(CollisionLayer::Character.as_mask()))
            .build();
        let co_handle = self
            .colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.recompute_mass_properties_from_colliders(&self.colliders);
        }
        self.refresh_broad_phase(&[co_handle]);

        log::debug!("spawned character at {:?}", spec.position);
        handle
    }

    /// Advance one fixed step, then drop accumulated user forces.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );

        for (_, rb) in self.bodies.iter_mut() {
            if rb.is_dynamic() {
                rb.reset_forces(false);
            }
        }
    }

    /// Borrowed query view over the current scene.
    pub fn query_pipeline<'a>(&'a self, filter: QueryFilter<'a>) -> QueryPipeline<'a> {
        self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            filter,
        )
    }

    /// Bind a character for the controller. `None` if the handle is not a body here.
    pub fn body(&mut self, handle: RigidBodyHandle) -> Option<RapierBody<'_>> {
        self.bodies.contains(handle).then_some(RapierBody {
            world: self,
            handle,
        })
    }

    fn refresh_broad_phase(&mut self, modified: &[ColliderHandle]) {
        let mut events = Vec::new();
        self.broad_phase.update(
            &self.params,
            &self.colliders,
            &self.bodies,
            modified,
            &[],
            &mut events,
        );
    }

    /// Cast against everything except `exclude`, keeping only colliders whose
    /// memberships intersect `layers`.
    fn cast(
        &self,
        exclude: RigidBodyHandle,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<SurfaceHit> {
        let dir = normalize_or_zero(direction);
        if dir == Vec3::zeros() {
            return None;
        }

        let accept = |_: ColliderHandle, co: &Collider| {
            LayerMask::new(co.collision_groups().memberships.bits()).intersects(layers)
        };
        let filter = QueryFilter::default()
            .exclude_rigid_body(exclude)
            .predicate(&accept);
        let pipeline = self.query_pipeline(filter);

        // Start a little behind the origin so a slightly sunk body still gets a
        // surface normal instead of an inside hit.
        let ray = Ray::new(Point::from(origin - dir * PROBE_SKIN), dir);
        let (_, hit) =
            pipeline.cast_ray_and_get_normal(&ray, max_distance.max(0.0) + PROBE_SKIN, true)?;

        Some(SurfaceHit {
            point: ray.point_at(hit.time_of_impact).coords,
            normal: hit.normal,
            distance: (hit.time_of_impact - PROBE_SKIN).max(0.0),
        })
    }
}

/// One character body inside a [`RapierWorld`].
pub struct RapierBody<'a> {
    world: &'a mut RapierWorld,
    handle: RigidBodyHandle,
}

impl RapierBody<'_> {
    #[inline]
    pub fn handle(&self) -> RigidBodyHandle {
        self.handle
    }

    fn rb(&self) -> &RigidBody {
        &self.world.bodies[self.handle]
    }

    fn rb_mut(&mut self) -> &mut RigidBody {
        &mut self.world.bodies[self.handle]
    }
}

impl SurfaceSensor for RapierBody<'_> {
    fn probe_ground(
        &self,
        origin: Vec3,
        max_distance: f32,
        layers: LayerMask,
    ) -> Option<SurfaceHit> {
        self.world
            .cast(self.handle, origin, -Vec3::y(), max_distance, layers)
    }

    fn probe_slope(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<SurfaceHit> {
        self.world
            .cast(self.handle, origin, direction, max_distance, LayerMask::all())
    }
}

impl CharacterBody for RapierBody<'_> {
    fn position(&self) -> Vec3 {
        *self.rb().translation()
    }

    fn velocity(&self) -> Vec3 {
        *self.rb().linvel()
    }

    fn orientation(&self) -> Quat {
        *self.rb().rotation()
    }

    fn mass(&self) -> f32 {
        self.rb().mass()
    }

    fn gravity(&self) -> Vec3 {
        self.world.gravity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.rb_mut().set_linvel(velocity, true);
    }

    fn set_orientation(&mut self, orientation: Quat) {
        self.rb_mut().set_rotation(orientation, true);
    }

    fn apply_force(&mut self, force: Vec3, mode: ForceMode) {
        let rb = self.rb_mut();
        match mode {
            ForceMode::Force => rb.add_force(force, true),
            ForceMode::Impulse => rb.apply_impulse(force, true),
        }
    }

    fn set_linear_drag(&mut self, drag: f32) {
        self.rb_mut().set_linear_damping(drag);
    }

    fn set_gravity_enabled(&mut self, enabled: bool) {
        let scale = if enabled { 1.0 } else { 0.0 };
        self.rb_mut().set_gravity_scale(scale, true);
    }
}

/// Memberships from `layers`; interacts with everything.
fn groups_for(layers: LayerMask) -> InteractionGroups {
    InteractionGroups {
        memberships: Group::from_bits_truncate(layers.bits),
        filter: Group::ALL,
        ..InteractionGroups::all()
    }
}

/// Build the collider for a static. The parent body carries the pose, so the
/// collider sits at identity relative to it (planes are shifted along +Y).
fn collider_from_def(def: &WorldStaticDef) -> Collider {
    let builder = match &def.shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => ColliderBuilder::halfspace(Vector::y_axis())
            .translation(vector![0.0, *offset_along_normal, 0.0]),

        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }
    };

    builder.collision_groups(groups_for(def.layers)).build()
}
