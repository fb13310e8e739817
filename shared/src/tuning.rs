use serde::Deserialize;

use crate::error::VehicleError;

/// Which integration scheme drives horizontal motion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionMode {
    /// Push the body with mass-scaled forces and let the solver integrate them.
    #[default]
    Force,
    /// Integrate horizontal speed directly and overwrite the body's velocity.
    Direct,
}

/// Gameplay tuning for a single car.
///
/// Keep this separate from runtime configuration (tick rate, window, key bindings).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct VehicleTuning {
    /// Forward acceleration in meters per second squared.
    pub acceleration: f32,

    /// Horizontal speed cap in meters per second.
    pub max_speed: f32,

    /// Yaw rate at full steering lock, in degrees per second.
    pub turn_rate: f32,

    /// Braking deceleration in meters per second squared.
    pub brake_deceleration: f32,

    /// Passive linear drag coefficient (1/s). Zero lets an idle car coast forever.
    pub drag: f32,

    /// Angular damping applied to the body for stability.
    pub angular_damping: f32,

    pub mode: MotionMode,

    /// Give every collider on the car a zero-friction contact material.
    pub frictionless_colliders: bool,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            acceleration: 15.0,
            max_speed: 20.0,
            turn_rate: 100.0,
            brake_deceleration: 25.0,
            drag: 0.1,
            angular_damping: 0.1,
            mode: MotionMode::Force,
            frictionless_colliders: true,
        }
    }
}

impl VehicleTuning {
    /// Reject values the motion model cannot work with.
    pub fn validate(&self) -> Result<(), VehicleError> {
        let non_negative = [
            ("acceleration", self.acceleration),
            ("turn_rate", self.turn_rate),
            ("brake_deceleration", self.brake_deceleration),
            ("drag", self.drag),
            ("angular_damping", self.angular_damping),
        ];

        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(VehicleError::InvalidTuning { field, value });
            }
        }

        if !self.max_speed.is_finite() || self.max_speed <= 0.0 {
            return Err(VehicleError::InvalidTuning {
                field: "max_speed",
                value: self.max_speed,
            });
        }

        Ok(())
    }

    /// Linear damping the body should carry for this tuning.
    ///
    /// Direct integration applies drag itself, so the solver must not apply it a second time.
    pub fn body_linear_damping(&self) -> f32 {
        match self.mode {
            MotionMode::Force => self.drag,
            MotionMode::Direct => 0.0,
        }
    }
}
