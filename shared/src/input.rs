use crate::{constants::STEER_DEADZONE, vehicle::VehicleController};

/// Which of the two local drivers an input source or car belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSlot {
    One,
    Two,
}

impl PlayerSlot {
    pub const ALL: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    /// Zero-based index, handy for viewport and HUD placement.
    pub fn index(self) -> usize {
        match self {
            PlayerSlot::One => 0,
            PlayerSlot::Two => 1,
        }
    }
}

/// One frame's worth of driver controls, already read from the device layer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriverInputs {
    pub accelerate: bool,
    pub brake: bool,
    /// Steering axis, nominally in [-1, 1]. Positive steers right.
    pub steer: f32,
}

/// Forward a frame of driver controls to a car's latched inputs.
///
/// Steering inside the dead-zone (or NaN) releases the wheel instead of latching a tiny turn.
pub fn apply_driver_inputs(controller: &mut VehicleController, inputs: DriverInputs) {
    controller.set_accelerate(inputs.accelerate);
    controller.set_brake(inputs.brake);

    if inputs.steer.abs() > STEER_DEADZONE {
        controller.set_turn(inputs.steer.clamp(-1.0, 1.0));
    } else {
        controller.stop_turn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test_support::FakeBody, tuning::VehicleTuning};

    fn controller() -> VehicleController {
        let mut body = FakeBody::default();
        VehicleController::attach(&mut body, VehicleTuning::default()).unwrap()
    }

    #[test]
    fn buttons_latch_and_release() {
        let mut car = controller();

        apply_driver_inputs(
            &mut car,
            DriverInputs {
                accelerate: true,
                brake: true,
                steer: 0.0,
            },
        );
        assert!(car.inputs().accelerate);
        assert!(car.inputs().brake);

        apply_driver_inputs(&mut car, DriverInputs::default());
        assert!(!car.inputs().accelerate);
        assert!(!car.inputs().brake);
    }

    #[test]
    fn steering_inside_deadzone_releases_wheel() {
        let mut car = controller();
        car.set_turn(0.8);

        apply_driver_inputs(
            &mut car,
            DriverInputs {
                steer: 0.005,
                ..Default::default()
            },
        );

        assert_eq!(car.inputs().steer, 0.0);
    }

    #[test]
    fn steering_is_clamped() {
        let mut car = controller();

        apply_driver_inputs(
            &mut car,
            DriverInputs {
                steer: -1.7,
                ..Default::default()
            },
        );

        assert_eq!(car.inputs().steer, -1.0);
    }

    #[test]
    fn nan_steering_releases_wheel() {
        let mut car = controller();
        car.set_turn(0.5);

        apply_driver_inputs(
            &mut car,
            DriverInputs {
                steer: f32::NAN,
                ..Default::default()
            },
        );

        assert_eq!(car.inputs().steer, 0.0);
    }

    #[test]
    fn player_slots_have_distinct_indices() {
        assert_eq!(PlayerSlot::One.index(), 0);
        assert_eq!(PlayerSlot::Two.index(), 1);
    }
}
