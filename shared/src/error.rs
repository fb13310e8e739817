use std::fmt;

/// Failures surfaced while binding a motion model to a physics body.
///
/// Ticking never fails; every error here happens at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum VehicleError {
    /// The physics handle does not refer to a live rigid-body.
    MissingBody,
    /// A tuning value is out of range (negative, non-finite, or a zero speed cap).
    InvalidTuning { field: &'static str, value: f32 },
}

impl fmt::Display for VehicleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleError::MissingBody => write!(f, "vehicle has no physics body"),
            VehicleError::InvalidTuning { field, value } => {
                write!(f, "invalid vehicle tuning: {field} = {value}")
            }
        }
    }
}

impl std::error::Error for VehicleError {}
