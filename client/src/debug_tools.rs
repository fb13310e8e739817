//! Dev-only overlays: the perf UI plus per-car drive gizmos.
//!
//! Gated behind `dev_native` in `main.rs`. Press F3 to toggle the car gizmos.

use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin, SystemInformationDiagnosticsPlugin,
};
use bevy::prelude::*;
use bevy::render::diagnostic::RenderDiagnosticsPlugin;
use iyes_perf_ui::prelude::*;
use shared::{DriveState, VehicleBody};

use crate::{
    car::Car,
    physics::{Physics, PhysicsBody, to_bevy_quat, to_bevy_vec3},
};

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        FrameTimeDiagnosticsPlugin::default(),
        EntityCountDiagnosticsPlugin::default(),
        SystemInformationDiagnosticsPlugin::default(),
        RenderDiagnosticsPlugin,
        PerfUiPlugin,
    ));

    app.init_resource::<DriveGizmos>();
    app.add_systems(Startup, spawn_perf_ui);
    app.add_systems(
        Update,
        (
            toggle_drive_gizmos,
            draw_drive_gizmos.run_if(|gizmos: Res<DriveGizmos>| gizmos.0),
        ),
    );
}

#[derive(Resource, Debug, Default)]
struct DriveGizmos(bool);

fn spawn_perf_ui(mut commands: Commands) {
    commands.spawn(PerfUiAllEntries::default());
}

fn toggle_drive_gizmos(keys: Res<ButtonInput<KeyCode>>, mut gizmos: ResMut<DriveGizmos>) {
    if keys.just_pressed(KeyCode::F3) {
        gizmos.0 = !gizmos.0;
        debug!("Drive gizmos {}", if gizmos.0 { "on" } else { "off" });
    }
}

fn state_color(state: DriveState) -> Color {
    match state {
        DriveState::Accelerating => Color::srgb(0.2, 0.9, 0.2),
        DriveState::Braking => Color::srgb(0.9, 0.2, 0.2),
        DriveState::Idle => Color::srgb(0.8, 0.8, 0.8),
    }
}

/// Heading arrow colored by drive state, plus the body's velocity.
///
/// Both start at the rapier pose rather than the synced `Transform`. The velocity arrow is
/// three meters long at the car's top speed.
fn draw_drive_gizmos(
    mut gizmos: Gizmos,
    mut physics: ResMut<Physics>,
    cars: Query<(&Car, &PhysicsBody)>,
) {
    for (car, body) in &cars {
        let Ok(rb) = physics.vehicle_body(body.0) else {
            continue;
        };
        let origin = to_bevy_vec3(&rb.translation()) + Vec3::Y;
        let heading = to_bevy_quat(&rb.rotation()) * Vec3::NEG_Z;
        let velocity = to_bevy_vec3(&rb.linear_velocity());

        gizmos.arrow(
            origin,
            origin + heading * 3.0,
            state_color(car.controller.last_drive_state()),
        );

        let max_speed = car.controller.tuning().max_speed;
        gizmos.arrow(
            origin,
            origin + velocity * (3.0 / max_speed),
            Color::srgb(0.2, 0.6, 1.0),
        );
    }
}
