use bevy::prelude::*;
use leafwing_input_manager::prelude::*;
use shared::{DriverInputs, PlayerSlot, apply_driver_inputs};

use crate::car::Car;

/// Per-car driving controls. Each car entity carries its own `InputMap`.
#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DriveAction {
    Accelerate,
    Brake,
    /// Positive steers right.
    #[actionlike(Axis)]
    Steer,
}

/// Controls shared by both players, held as a global resource.
#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RaceAction {
    RestartTimer,
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        InputManagerPlugin::<DriveAction>::default(),
        InputManagerPlugin::<RaceAction>::default(),
    ));

    app.register_type::<DriveAction>();
    app.register_type::<RaceAction>();

    let mut race_map = InputMap::<RaceAction>::default();
    race_map.insert(RaceAction::RestartTimer, KeyCode::KeyR);
    app.insert_resource(race_map);
    app.insert_resource(ActionState::<RaceAction>::default());

    app.add_systems(Update, read_driver_inputs);
}

/// Player one drives with WASD, player two with the arrow keys.
pub fn driver_input_map(slot: PlayerSlot) -> InputMap<DriveAction> {
    match slot {
        PlayerSlot::One => InputMap::new([
            (DriveAction::Accelerate, KeyCode::KeyW),
            (DriveAction::Brake, KeyCode::KeyS),
        ])
        .with_axis(DriveAction::Steer, VirtualAxis::ad()),
        PlayerSlot::Two => InputMap::new([
            (DriveAction::Accelerate, KeyCode::ArrowUp),
            (DriveAction::Brake, KeyCode::ArrowDown),
        ])
        .with_axis(DriveAction::Steer, VirtualAxis::horizontal_arrow_keys()),
    }
}

/// Snapshot one car's action state into plain driver controls.
pub fn driver_inputs(actions: &ActionState<DriveAction>) -> DriverInputs {
    DriverInputs {
        accelerate: actions.pressed(&DriveAction::Accelerate),
        brake: actions.pressed(&DriveAction::Brake),
        steer: actions.value(&DriveAction::Steer),
    }
}

fn read_driver_inputs(mut cars: Query<(&ActionState<DriveAction>, &mut Car)>) {
    for (actions, mut car) in &mut cars {
        apply_driver_inputs(&mut car.controller, driver_inputs(actions));
    }
}
