//! Rapier-backed physics world for the arena and the cars driving on it.
//!
//! Both the client and the tests build one of these: immutable arena geometry is inserted
//! once through [`PhysicsWorld::insert_static`], each car gets a dynamic body from
//! [`PhysicsWorld::spawn_vehicle`], and [`PhysicsWorld::vehicle_body`] hands out the
//! [`VehicleBody`] view a motion model drives.
//!
//! Conventions
//! - Units are meters, kilograms, seconds.
//! - One call to [`PhysicsWorld::step`] advances exactly one fixed tick of `dt`.
//! - User forces last for one step; they are cleared after every step.

// Re-export Rapier so the client can name handles without depending on `rapier3d` directly.
pub use rapier3d;

use rapier3d::na::{Translation3, UnitQuaternion};
use rapier3d::prelude::*;

use crate::{
    body::VehicleBody,
    constants::GRAVITY_MPS2,
    error::VehicleError,
    types::{Iso, Quat, Vec3},
};

/// Canonical definition of an immutable arena collider.
///
/// Conventions
/// - Units are meters.
/// - Rotation is a unit quaternion.
/// - For planes the normal is `rotation * +Y`, shifted by `offset_along_normal`.
#[derive(Clone, Debug)]
pub struct StaticDef {
    /// Stable unique identifier used to ensure deterministic insertion order.
    pub id: u32,
    /// World-space translation.
    pub translation: Vector<f32>,
    /// World-space rotation (unit quaternion).
    pub rotation: UnitQuaternion<f32>,
    pub shape: ColliderShapeDef,
}

/// Supported static collider shapes.
#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Infinite plane (half-space).
    ///
    /// In Rapier a plane is infinite. Any "X/Z size" a renderer shows is purely visual.
    Plane {
        /// Offset along the plane normal (meters).
        offset_along_normal: f32,
    },

    /// Oriented cuboid with given half-extents (meters).
    Cuboid { half_extents: Vector<f32> },
}

/// Shape and placement of a car chassis.
#[derive(Clone, Copy, Debug)]
pub struct VehicleBodySpec {
    pub translation: Vector<f32>,
    /// Heading about +Y in radians; zero faces -Z.
    pub yaw: f32,
    pub half_extents: Vector<f32>,
    /// Chassis density (kg/m^3). Mass follows from the box volume.
    pub density: f32,
}

impl Default for VehicleBodySpec {
    fn default() -> Self {
        Self {
            translation: Vector::new(0.0, 0.6, 0.0),
            yaw: 0.0,
            half_extents: Vector::new(0.9, 0.5, 2.0),
            density: 100.0,
        }
    }
}

/// Every Rapier structure needed to simulate the arena.
pub struct PhysicsWorld {
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    gravity: Vector<f32>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    /// An empty world stepping at a fixed `dt` (seconds) under standard gravity.
    pub fn new(dt: f32) -> Self {
        Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            gravity: Vector::new(0.0, -GRAVITY_MPS2, 0.0),
            integration_parameters: IntegrationParameters {
                dt,
                ..IntegrationParameters::default()
            },
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    /// Build a world and insert the arena statics, sorted by `id` for a stable layout.
    pub fn with_statics(dt: f32, mut defs: Vec<StaticDef>) -> Self {
        defs.sort_by_key(|d| d.id);

        let mut world = Self::new(dt);
        for def in defs {
            world.insert_static(def);
        }
        world
    }

    pub fn dt(&self) -> f32 {
        self.integration_parameters.dt
    }

    /// Insert one static as a fixed rigid-body with its collider attached.
    pub fn insert_static(&mut self, def: StaticDef) -> RigidBodyHandle {
        let iso = Isometry::from_parts(Translation3::from(def.translation), def.rotation);
        let rb = RigidBodyBuilder::fixed().pose(iso).build();
        let handle = self.bodies.insert(rb);

        let collider = collider_from_def(&def.shape);
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Insert a dynamic car chassis and return its handle.
    pub fn spawn_vehicle(&mut self, spec: VehicleBodySpec) -> RigidBodyHandle {
        let iso = Isometry::from_parts(
            Translation3::from(spec.translation),
            UnitQuaternion::from_axis_angle(&Vector::y_axis(), spec.yaw),
        );
        let rb = RigidBodyBuilder::dynamic()
            .pose(iso)
            .ccd_enabled(true)
            .build();
        let handle = self.bodies.insert(rb);

        let he = spec.half_extents;
        let collider = ColliderBuilder::cuboid(he.x, he.y, he.z)
            .density(spec.density)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        if let Some(rb) = self.bodies.get_mut(handle) {
            rb.recompute_mass_properties_from_colliders(&self.colliders);
        }

        log::debug!("spawned vehicle body {handle:?}");
        handle
    }

    /// Remove a car and everything attached to it.
    pub fn remove_vehicle(&mut self, handle: RigidBodyHandle) -> Result<(), VehicleError> {
        self.bodies
            .remove(
                handle,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .map(|_| ())
            .ok_or(VehicleError::MissingBody)
    }

    /// Borrow a car's body through the [`VehicleBody`] capability.
    pub fn vehicle_body(&mut self, handle: RigidBodyHandle) -> Result<RapierBody<'_>, VehicleError> {
        let body = self
            .bodies
            .get_mut(handle)
            .ok_or(VehicleError::MissingBody)?;
        Ok(RapierBody {
            body,
            colliders: &mut self.colliders,
        })
    }

    /// World pose of a body, for render sync.
    pub fn pose(&self, handle: RigidBodyHandle) -> Option<Iso> {
        self.bodies
            .get(handle)
            .map(|rb| Iso::from_parts(Translation3::from(*rb.translation()), *rb.rotation()))
    }

    /// Advance the simulation by one fixed tick, then clear the forces applied for it.
    pub fn step(&mut self) {
        // Using default hooks/events (none).
        let hooks = ();
        let events = ();

        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &hooks,
            &events,
        );

        for (_, rb) in self.bodies.iter_mut() {
            rb.reset_forces(false);
        }
    }
}

/// Build a Rapier collider for a static shape.
///
/// The pose lives on the parent rigid-body, so the collider keeps an identity local
/// transform (apart from a plane's offset along its normal).
fn collider_from_def(shape: &ColliderShapeDef) -> Collider {
    match shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => ColliderBuilder::halfspace(Vector::y_axis())
            .translation(Vector::y() * *offset_along_normal)
            .build(),

        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build()
        }
    }
}

/// A car's rigid-body and the collider set it draws its colliders from.
pub struct RapierBody<'a> {
    body: &'a mut RigidBody,
    colliders: &'a mut ColliderSet,
}

impl VehicleBody for RapierBody<'_> {
    fn translation(&self) -> Vec3 {
        *self.body.translation()
    }

    fn linear_velocity(&self) -> Vec3 {
        *self.body.linvel()
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.body.set_linvel(velocity, true);
    }

    fn rotation(&self) -> Quat {
        *self.body.rotation()
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.body.set_rotation(rotation, true);
    }

    fn mass(&self) -> f32 {
        self.body.mass()
    }

    fn add_force(&mut self, force: Vec3) {
        self.body.add_force(force, true);
    }

    fn lock_tilt(&mut self) {
        self.body.set_enabled_rotations(false, true, false, true);
    }

    fn set_center_of_mass(&mut self, offset: Vec3) {
        for handle in self.body.colliders() {
            if let Some(collider) = self.colliders.get_mut(*handle) {
                let props = collider.mass_properties();
                collider.set_mass_properties(MassProperties::new(
                    Point::from(offset),
                    props.mass(),
                    props.principal_inertia(),
                ));
            }
        }
        self.body
            .recompute_mass_properties_from_colliders(&*self.colliders);
    }

    fn set_damping(&mut self, linear: f32, angular: f32) {
        self.body.set_linear_damping(linear);
        self.body.set_angular_damping(angular);
    }

    fn set_frictionless_colliders(&mut self) {
        for handle in self.body.colliders() {
            if let Some(collider) = self.colliders.get_mut(*handle) {
                collider.set_friction(0.0);
                collider.set_friction_combine_rule(CoefficientCombineRule::Min);
            }
        }
    }
}
