use std::fmt;

use crate::{
    body::VehicleBody,
    constants::MOVE_EPS,
    tuning::{MotionMode, VehicleTuning},
    types::{Vec3, horizontal, horizontal_speed, with_vertical},
};

/// What the car is doing this tick. Re-resolved from the latched inputs every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DriveState {
    Accelerating,
    Braking,
    #[default]
    Idle,
}

impl DriveState {
    /// Accelerate wins over brake; neither means idle.
    #[inline]
    pub fn resolve(accelerate: bool, brake: bool) -> Self {
        if accelerate {
            DriveState::Accelerating
        } else if brake {
            DriveState::Braking
        } else {
            DriveState::Idle
        }
    }
}

/// Everything a strategy needs for one tick, already derived from the body.
#[derive(Debug, Clone, Copy)]
pub struct DriveContext<'a> {
    pub state: DriveState,
    /// Unit horizontal heading after this tick's steering.
    pub forward: Vec3,
    /// Body velocity at the start of the tick.
    pub velocity: Vec3,
    pub tuning: &'a VehicleTuning,
    pub dt: f32,
}

impl DriveContext<'_> {
    fn speed(&self) -> f32 {
        horizontal_speed(&self.velocity)
    }

    /// Direction of horizontal travel, or the heading when stopped.
    fn travel_dir(&self) -> Vec3 {
        horizontal(&self.velocity)
            .try_normalize(f32::EPSILON)
            .unwrap_or(self.forward)
    }

    /// Zero horizontal velocity, carrying vertical through untouched.
    fn hard_stop(&self, body: &mut dyn VehicleBody) {
        body.set_linear_velocity(with_vertical(Vec3::zeros(), self.velocity.y));
    }
}

/// How a resolved [`DriveState`] turns into commands on the body.
///
/// Implementations must never write the vertical velocity component other than by
/// copying it from [`DriveContext::velocity`].
pub trait MotionStrategy: fmt::Debug + Send + Sync {
    /// Apply one tick and return the resulting horizontal speed.
    fn drive(&self, ctx: &DriveContext<'_>, body: &mut dyn VehicleBody) -> f32;
}

impl MotionMode {
    pub fn strategy(self) -> Box<dyn MotionStrategy> {
        match self {
            MotionMode::Force => Box::new(ForceDrive),
            MotionMode::Direct => Box::new(DirectDrive),
        }
    }
}

/// Mass-scaled forces plus a hard velocity clamp at the speed cap.
///
/// Each push is limited to what one step needs to reach the cap (accelerating) or zero
/// (braking). Idle decay comes from the body's linear damping, configured on attach.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForceDrive;

impl ForceDrive {
    fn usable_mass(body: &dyn VehicleBody) -> Option<f32> {
        let mass = body.mass();
        if mass.is_finite() && mass > 0.0 {
            Some(mass)
        } else {
            log::debug!("skipping drive force, body mass is {mass}");
            None
        }
    }
}

impl MotionStrategy for ForceDrive {
    fn drive(&self, ctx: &DriveContext<'_>, body: &mut dyn VehicleBody) -> f32 {
        let speed = ctx.speed();
        let tuning = ctx.tuning;

        match ctx.state {
            DriveState::Accelerating => {
                if speed < tuning.max_speed {
                    if let Some(mass) = Self::usable_mass(body) {
                        // Never ask for more than one step's worth of the remaining headroom.
                        let accel = tuning
                            .acceleration
                            .min((tuning.max_speed - speed) / ctx.dt);
                        body.add_force(ctx.forward * accel * mass);
                    }
                }

                if speed > tuning.max_speed {
                    let clamped = ctx.travel_dir() * tuning.max_speed;
                    body.set_linear_velocity(with_vertical(clamped, ctx.velocity.y));
                    return tuning.max_speed;
                }

                speed
            }
            DriveState::Braking => {
                if speed > MOVE_EPS {
                    if let Some(mass) = Self::usable_mass(body) {
                        // Capped so one step cannot reverse the direction of travel.
                        let decel = tuning.brake_deceleration.min(speed / ctx.dt);
                        body.add_force(-ctx.travel_dir() * decel * mass);
                    }
                    speed
                } else {
                    ctx.hard_stop(body);
                    0.0
                }
            }
            DriveState::Idle => {
                if speed > MOVE_EPS {
                    speed
                } else {
                    ctx.hard_stop(body);
                    0.0
                }
            }
        }
    }
}

const BRAKE_RESIDUE: f32 = 1.0e-3;

/// Integrates horizontal speed itself and overwrites the body's horizontal velocity.
///
/// Braking subtracts `b * dt` per tick and floors the result at zero. A car already at or
/// below [`MOVE_EPS`] when the tick starts is stopped outright. With `b * dt > MOVE_EPS`,
/// braking from `s` therefore reaches zero after exactly `ceil(s / (b * dt))` ticks.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectDrive;

impl MotionStrategy for DirectDrive {
    fn drive(&self, ctx: &DriveContext<'_>, body: &mut dyn VehicleBody) -> f32 {
        let speed = ctx.speed();
        let tuning = ctx.tuning;
        let dt = ctx.dt;

        let (new_speed, dir) = match ctx.state {
            DriveState::Accelerating => {
                let s = (speed + tuning.acceleration * dt).min(tuning.max_speed);
                (s, ctx.forward)
            }
            DriveState::Braking => {
                let s = if speed <= MOVE_EPS {
                    0.0
                } else {
                    let s = (speed - tuning.brake_deceleration * dt).max(0.0);
                    // Float residue after an exact number of steps.
                    if s < BRAKE_RESIDUE { 0.0 } else { s }
                };
                (s, ctx.travel_dir())
            }
            DriveState::Idle => {
                // Same damping law Rapier applies to bodies.
                let s = if speed <= MOVE_EPS {
                    0.0
                } else {
                    speed / (1.0 + tuning.drag * dt)
                };
                (s, ctx.travel_dir())
            }
        };

        body.set_linear_velocity(with_vertical(dir * new_speed, ctx.velocity.y));
        new_speed
    }
}
