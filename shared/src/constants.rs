/// Fixed simulation rate for the vehicle motion model and physics stepping (Hz).
pub const FIXED_HZ: f64 = 60.0;

/// Duration of one fixed simulation tick in seconds.
pub const FIXED_DT: f32 = 1.0 / 60.0;

/// Minimum absolute steering input that produces a rotation.
pub const TURN_EPS: f32 = 0.01;

/// Horizontal speed (m/s) at or below which a vehicle counts as stopped.
///
/// - Turning is ignored at or below this speed.
/// - Braking and idle ticks zero the horizontal velocity at or below this speed.
pub const MOVE_EPS: f32 = 0.1;

/// Analog steering dead-zone applied by the input dispatcher before calling `set_turn`.
pub const STEER_DEADZONE: f32 = 0.01;

/// Local center-of-mass offset applied on attach (meters). Low to resist tipping.
pub const CENTER_OF_MASS_OFFSET: [f32; 3] = [0.0, -0.5, 0.0];

/// Gravity magnitude in meters per second squared (positive value).
pub const GRAVITY_MPS2: f32 = 9.81;

/// Conversion factor from meters per second to kilometers per hour.
pub const KMH_PER_MPS: f32 = 3.6;
