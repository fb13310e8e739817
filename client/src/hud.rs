//! Per-player speedometer and the shared race clock.

use bevy::{prelude::*, ui::UiTargetCamera};
use leafwing_input_manager::prelude::ActionState;
use shared::{RaceTimer, format_race_time, format_speed};

use crate::{
    camera::{FollowCamera, spawn_cameras},
    car::Car,
    config::{GameConfig, HudSettings},
    input::RaceAction,
};

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<RaceClock>();

    app.add_systems(Startup, (start_clock, spawn_hud.after(spawn_cameras)));
    app.add_systems(
        Update,
        (
            restart_clock,
            tick_clock.run_if(clock_running),
            (update_speed_text, update_time_text),
        )
            .chain(),
    );
}

#[derive(Resource, Debug, Default, Deref, DerefMut)]
pub struct RaceClock(pub RaceTimer);

#[derive(Component, Debug)]
struct SpeedText {
    car: Entity,
}

#[derive(Component, Debug)]
struct TimeText;

fn start_clock(mut clock: ResMut<RaceClock>) {
    clock.reset();
    clock.start();
}

fn restart_clock(actions: Res<ActionState<RaceAction>>, mut clock: ResMut<RaceClock>) {
    if actions.just_pressed(&RaceAction::RestartTimer) {
        clock.reset();
        clock.start();
        info!("Race timer restarted");
    }
}

fn clock_running(clock: Res<RaceClock>) -> bool {
    clock.is_running()
}

fn tick_clock(time: Res<Time>, mut clock: ResMut<RaceClock>) {
    clock.tick(time.delta_secs_f64());
}

/// Overlay one HUD onto each player's viewport.
pub(crate) fn spawn_hud(
    mut commands: Commands,
    config: Res<GameConfig>,
    cameras: Query<(Entity, &FollowCamera)>,
) {
    let initial_speed = speed_label(0.0, &config.hud);
    for (camera, rig) in &cameras {
        commands
            .spawn((
                Name::new(format!("HUD {}", rig.slot.index() + 1)),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(12.0),
                    left: Val::Px(12.0),
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(4.0),
                    ..default()
                },
                UiTargetCamera(camera),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text::new(initial_speed.clone()),
                    TextFont {
                        font_size: 28.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                    SpeedText { car: rig.target },
                ));
                parent.spawn((
                    Text::new(format_race_time(0.0)),
                    TextFont {
                        font_size: 22.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.9, 0.9, 0.6)),
                    TimeText,
                ));
            });
    }
}

fn speed_label(speed_mps: f32, settings: &HudSettings) -> String {
    format_speed(speed_mps, settings.unit, settings.decimal_places)
}

fn update_speed_text(
    config: Res<GameConfig>,
    cars: Query<&Car>,
    mut texts: Query<(&SpeedText, &mut Text)>,
) {
    for (label, mut text) in &mut texts {
        let Ok(car) = cars.get(label.car) else {
            continue;
        };
        let next = speed_label(car.controller.speed(), &config.hud);
        if text.0 != next {
            text.0 = next;
        }
    }
}

fn update_time_text(clock: Res<RaceClock>, mut texts: Query<&mut Text, With<TimeText>>) {
    let next = format_race_time(clock.elapsed());
    for mut text in &mut texts {
        if text.0 != next {
            text.0.clone_from(&next);
        }
    }
}
