//! The two player cars: spawning, and handing each fixed tick to their controllers.

use bevy::{ecs::error::Result, prelude::*};
use leafwing_input_manager::prelude::ActionState;
use shared::{PlayerSlot, VehicleBodySpec, VehicleController};

use crate::{
    config::GameConfig,
    input::{DriveAction, driver_input_map},
    physics::{Physics, PhysicsBody, PhysicsSet, to_na_vector, transform_from_iso},
};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_cars);
    app.add_systems(FixedUpdate, drive_cars.in_set(PhysicsSet::Drive));
}

/// Distance between the two starting grid slots (meters).
const GRID_SPACING: f32 = 6.0;

#[derive(Component, Debug)]
pub struct Car {
    pub slot: PlayerSlot,
    pub controller: VehicleController,
}

/// Chassis placement for a player, side by side and facing -Z.
pub fn grid_spec(slot: PlayerSlot) -> VehicleBodySpec {
    let x = match slot {
        PlayerSlot::One => -GRID_SPACING * 0.5,
        PlayerSlot::Two => GRID_SPACING * 0.5,
    };
    let defaults = VehicleBodySpec::default();
    VehicleBodySpec {
        translation: to_na_vector(Vec3::new(x, defaults.translation.y, 0.0)),
        ..defaults
    }
}

fn car_color(slot: PlayerSlot) -> Color {
    match slot {
        PlayerSlot::One => Color::srgb_u8(220, 60, 50),
        PlayerSlot::Two => Color::srgb_u8(50, 110, 220),
    }
}

pub(crate) fn spawn_cars(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut physics: ResMut<Physics>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) -> Result {
    for slot in PlayerSlot::ALL {
        let spec = grid_spec(slot);
        let handle = physics.spawn_vehicle(spec);
        let controller = {
            let mut body = physics.vehicle_body(handle)?;
            VehicleController::attach(&mut body, config.vehicle)?
        };
        let transform = physics
            .pose(handle)
            .map(|pose| transform_from_iso(&pose))
            .unwrap_or_default();
        let size = Vec3::new(
            spec.half_extents.x,
            spec.half_extents.y,
            spec.half_extents.z,
        ) * 2.0;

        commands.spawn((
            Name::new(format!("Car {}", slot.index() + 1)),
            Car { slot, controller },
            PhysicsBody(handle),
            driver_input_map(slot),
            ActionState::<DriveAction>::default(),
            Mesh3d(meshes.add(Cuboid::from_size(size))),
            MeshMaterial3d(materials.add(car_color(slot))),
            transform,
        ));

        info!("Spawned car for player {} ({:?})", slot.index() + 1, config.vehicle.mode);
    }

    Ok(())
}

fn drive_cars(mut physics: ResMut<Physics>, mut cars: Query<(&mut Car, &PhysicsBody)>) {
    let dt = physics.dt();
    for (mut car, body) in &mut cars {
        match physics.vehicle_body(body.0) {
            Ok(mut rb) => {
                car.controller.fixed_tick(&mut rb, dt);
            }
            Err(err) => warn!("Car {:?} skipped this tick: {err}", car.slot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{DriveState, FIXED_DT, PhysicsWorld};

    fn app_with_car() -> (App, Entity) {
        let mut app = App::new();
        let mut world = PhysicsWorld::new(FIXED_DT);
        let handle = world.spawn_vehicle(grid_spec(PlayerSlot::One));
        let controller = {
            let mut body = world.vehicle_body(handle).unwrap();
            VehicleController::attach(&mut body, Default::default()).unwrap()
        };
        app.insert_resource(Physics(world));
        app.add_systems(Update, drive_cars);

        let entity = app
            .world_mut()
            .spawn((
                Car {
                    slot: PlayerSlot::One,
                    controller,
                },
                PhysicsBody(handle),
            ))
            .id();
        (app, entity)
    }

    #[test]
    fn grid_slots_sit_apart_facing_forward() {
        let one = grid_spec(PlayerSlot::One);
        let two = grid_spec(PlayerSlot::Two);

        assert_eq!(two.translation.x - one.translation.x, GRID_SPACING);
        assert_eq!(one.yaw, 0.0);
        assert!(one.translation.y > one.half_extents.y);
    }

    #[test]
    fn drive_system_ticks_each_controller() {
        let (mut app, entity) = app_with_car();
        app.world_mut()
            .get_mut::<Car>(entity)
            .unwrap()
            .controller
            .set_accelerate(true);

        app.update();

        let car = app.world().get::<Car>(entity).unwrap();
        assert_eq!(car.controller.last_drive_state(), DriveState::Accelerating);
    }

    #[test]
    fn missing_body_is_skipped() {
        let (mut app, entity) = app_with_car();
        let handle = app.world().get::<PhysicsBody>(entity).unwrap().0;
        app.world_mut()
            .resource_mut::<Physics>()
            .remove_vehicle(handle)
            .unwrap();

        app.update();

        let car = app.world().get::<Car>(entity).unwrap();
        assert_eq!(car.controller.last_drive_state(), DriveState::Idle);
    }
}
