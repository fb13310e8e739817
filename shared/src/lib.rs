pub mod body;
pub mod constants;
pub mod error;
pub mod hud;
pub mod input;
pub mod physics;
pub mod tuning;
pub mod types;
pub mod vehicle;

#[cfg(test)]
mod test_support;

pub use body::VehicleBody;
pub use constants::{FIXED_DT, FIXED_HZ, MOVE_EPS, STEER_DEADZONE, TURN_EPS};
pub use error::VehicleError;
pub use hud::{RaceTimer, SpeedUnit, format_race_time, format_speed};
pub use input::{DriverInputs, PlayerSlot, apply_driver_inputs};
pub use physics::{ColliderShapeDef, PhysicsWorld, RapierBody, StaticDef, VehicleBodySpec};
pub use tuning::{MotionMode, VehicleTuning};
pub use types::{Iso, Quat, Vec3};
pub use vehicle::{DirectDrive, DriveState, ForceDrive, MotionStrategy, VehicleController};
