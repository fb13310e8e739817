use crate::types::{Quat, Vec3};

/// The slice of a physics rigid-body a vehicle motion model is allowed to touch.
///
/// The physics engine owns the body; implementors are thin handles that forward
/// reads and commands to it. Everything is in world space and SI units.
///
/// Forces added through [`VehicleBody::add_force`] act for the next physics step only.
pub trait VehicleBody {
    /// World-space position of the body origin. Read-only for collaborators.
    fn translation(&self) -> Vec3;

    fn linear_velocity(&self) -> Vec3;

    fn set_linear_velocity(&mut self, velocity: Vec3);

    fn rotation(&self) -> Quat;

    fn set_rotation(&mut self, rotation: Quat);

    /// Body mass in kilograms. May be zero if the engine has not computed it yet.
    fn mass(&self) -> f32;

    fn add_force(&mut self, force: Vec3);

    /// Freeze rotation about the roll and pitch axes, leaving yaw free.
    fn lock_tilt(&mut self);

    /// Move the center of mass to `offset` in body-local coordinates.
    fn set_center_of_mass(&mut self, offset: Vec3);

    fn set_damping(&mut self, linear: f32, angular: f32);

    /// Give every collider attached to this body a zero-friction contact material.
    fn set_frictionless_colliders(&mut self);
}
