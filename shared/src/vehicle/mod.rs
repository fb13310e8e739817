//! Arcade vehicle motion model.
//!
//! A [`VehicleController`] latches driver inputs between ticks and, once per fixed
//! simulation step, turns them into steering and velocity commands on a [`VehicleBody`].
//!
//! Tick order
//! 1. Read velocity and orientation from the body; cache the horizontal speed.
//! 2. Yaw the body if steering and moving faster than [`MOVE_EPS`].
//! 3. Derive the horizontal heading from the (possibly new) orientation.
//! 4. Resolve [`DriveState`] and let the [`MotionStrategy`] command the body.
//! 5. Cache the resulting horizontal speed for [`VehicleController::speed`].
//!
//! The vertical velocity component belongs to gravity and the solver and is never changed.

mod drive;

pub use drive::{DirectDrive, DriveContext, DriveState, ForceDrive, MotionStrategy};

use crate::{
    body::VehicleBody,
    constants::{CENTER_OF_MASS_OFFSET, MOVE_EPS, TURN_EPS},
    error::VehicleError,
    input::DriverInputs,
    tuning::VehicleTuning,
    types::{Vec3, horizontal_forward, horizontal_speed, yaw_rotation},
};

#[derive(Debug)]
pub struct VehicleController {
    tuning: VehicleTuning,
    strategy: Box<dyn MotionStrategy>,
    accelerate: bool,
    brake: bool,
    /// Always within [-1, 1].
    turn: f32,
    current_speed: f32,
    last_state: DriveState,
}

impl VehicleController {
    /// Bind a controller to `body` using the strategy named by `tuning.mode`.
    pub fn attach(body: &mut dyn VehicleBody, tuning: VehicleTuning) -> Result<Self, VehicleError> {
        Self::with_strategy(body, tuning, tuning.mode.strategy())
    }

    /// Bind a controller to `body` with an explicit strategy.
    ///
    /// Validates the tuning, then configures the body for arcade handling: tilt locked,
    /// low center of mass, damping, and optionally frictionless colliders.
    pub fn with_strategy(
        body: &mut dyn VehicleBody,
        tuning: VehicleTuning,
        strategy: Box<dyn MotionStrategy>,
    ) -> Result<Self, VehicleError> {
        tuning.validate()?;

        body.lock_tilt();
        body.set_center_of_mass(Vec3::from(CENTER_OF_MASS_OFFSET));
        body.set_damping(tuning.body_linear_damping(), tuning.angular_damping);
        if tuning.frictionless_colliders {
            body.set_frictionless_colliders();
        }

        log::debug!("vehicle attached with {strategy:?}");

        Ok(Self {
            tuning,
            strategy,
            accelerate: false,
            brake: false,
            turn: 0.0,
            current_speed: horizontal_speed(&body.linear_velocity()),
            last_state: DriveState::Idle,
        })
    }

    pub fn set_accelerate(&mut self, active: bool) {
        self.accelerate = active;
    }

    pub fn set_brake(&mut self, active: bool) {
        self.brake = active;
    }

    /// Latch a steering command. Out-of-range values are clamped, NaN counts as centered.
    pub fn set_turn(&mut self, direction: f32) {
        self.turn = if direction.is_nan() {
            0.0
        } else {
            direction.clamp(-1.0, 1.0)
        };
    }

    pub fn stop_turn(&mut self) {
        self.turn = 0.0;
    }

    /// Horizontal speed (m/s) as of the last tick.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.current_speed
    }

    pub fn inputs(&self) -> DriverInputs {
        DriverInputs {
            accelerate: self.accelerate,
            brake: self.brake,
            steer: self.turn,
        }
    }

    pub fn tuning(&self) -> &VehicleTuning {
        &self.tuning
    }

    pub fn last_drive_state(&self) -> DriveState {
        self.last_state
    }

    /// Advance the motion model by one fixed step of `dt` seconds.
    ///
    /// A non-positive or non-finite `dt` only refreshes the cached speed.
    pub fn fixed_tick(&mut self, body: &mut dyn VehicleBody, dt: f32) -> DriveState {
        let velocity = body.linear_velocity();
        self.current_speed = horizontal_speed(&velocity);

        if !dt.is_finite() || dt <= 0.0 {
            return self.last_state;
        }

        let mut rotation = body.rotation();
        if self.turn.abs() > TURN_EPS && self.current_speed > MOVE_EPS {
            // Positive steering turns right, which is a negative yaw about +Y.
            let yaw = -self.turn * self.tuning.turn_rate.to_radians() * dt;
            rotation = yaw_rotation(yaw) * rotation;
            body.set_rotation(rotation);
        }

        let state = DriveState::resolve(self.accelerate, self.brake);
        let Some(forward) = horizontal_forward(&rotation) else {
            log::debug!("vehicle heading is vertical, skipping drive");
            self.last_state = state;
            return state;
        };

        let ctx = DriveContext {
            state,
            forward,
            velocity,
            tuning: &self.tuning,
            dt,
        };
        self.current_speed = self.strategy.drive(&ctx, body).max(0.0);
        self.last_state = state;
        state
    }
}
