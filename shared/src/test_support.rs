use crate::{
    body::VehicleBody,
    types::{Quat, Vec3},
};

/// In-memory stand-in for a physics body.
///
/// Records every command it receives. [`FakeBody::integrate`] plays the role of the
/// physics step: it applies the pending force and linear damping, then clears the force.
#[derive(Debug, Clone)]
pub struct FakeBody {
    pub translation: Vec3,
    pub velocity: Vec3,
    pub rotation: Quat,
    pub mass: f32,
    pub pending_force: Vec3,
    pub force_calls: usize,
    pub tilt_locked: bool,
    pub center_of_mass: Option<Vec3>,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub frictionless: bool,
}

impl Default for FakeBody {
    fn default() -> Self {
        Self {
            translation: Vec3::zeros(),
            velocity: Vec3::zeros(),
            rotation: Quat::identity(),
            mass: 1200.0,
            pending_force: Vec3::zeros(),
            force_calls: 0,
            tilt_locked: false,
            center_of_mass: None,
            linear_damping: 0.0,
            angular_damping: 0.0,
            frictionless: false,
        }
    }
}

impl FakeBody {
    pub fn moving(velocity: Vec3) -> Self {
        Self {
            velocity,
            ..Default::default()
        }
    }

    /// Semi-implicit Euler step with Rapier's damping law.
    pub fn integrate(&mut self, dt: f32) {
        if self.mass > 0.0 {
            self.velocity += self.pending_force / self.mass * dt;
        }
        self.velocity *= 1.0 / (1.0 + dt * self.linear_damping);
        self.translation += self.velocity * dt;
        self.pending_force = Vec3::zeros();
    }
}

impl VehicleBody for FakeBody {
    fn translation(&self) -> Vec3 {
        self.translation
    }

    fn linear_velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn mass(&self) -> f32 {
        self.mass
    }

    fn add_force(&mut self, force: Vec3) {
        self.pending_force += force;
        self.force_calls += 1;
    }

    fn lock_tilt(&mut self) {
        self.tilt_locked = true;
    }

    fn set_center_of_mass(&mut self, offset: Vec3) {
        self.center_of_mass = Some(offset);
    }

    fn set_damping(&mut self, linear: f32, angular: f32) {
        self.linear_damping = linear;
        self.angular_damping = angular;
    }

    fn set_frictionless_colliders(&mut self) {
        self.frictionless = true;
    }
}
