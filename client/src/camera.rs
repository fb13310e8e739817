//! Split-screen chase cameras, one per player.
//!
//! Conventions
//! - Player one renders to the left half of the window, player two to the right.
//! - Position follows with `smooth_nudge` at `follow_speed`.
//! - Rotation slerps toward its goal with `t = min(speed * dt, 1)`.

use bevy::{
    camera::Viewport,
    prelude::*,
    window::{PrimaryWindow, WindowResized},
};
use shared::PlayerSlot;

use crate::{
    car::{Car, spawn_cars},
    config::{CameraSettings, GameConfig},
};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_cameras.after(spawn_cars));
    app.add_systems(Update, fit_viewports);
    app.add_systems(PostUpdate, follow_targets);
}

#[derive(Component, Debug, Clone, Copy)]
pub struct FollowCamera {
    pub target: Entity,
    pub slot: PlayerSlot,
    pub settings: CameraSettings,
}

/// Where the camera wants to be this frame.
pub fn desired_position(target: &Transform, current: Vec3, settings: &CameraSettings) -> Vec3 {
    let offset = Vec3::from_array(settings.offset);
    let offset = if settings.rotate_with_target {
        target.rotation * offset
    } else {
        offset
    };

    let mut desired = target.translation + offset;
    if settings.lock_x {
        desired.x = current.x;
    }
    if settings.lock_y {
        desired.y = current.y;
    }
    if settings.lock_z {
        desired.z = current.z;
    }
    desired
}

/// Goal orientation and the rate to approach it at, or `None` to leave rotation alone.
///
/// A rig that rotates with its target always approaches at `rotation_follow_speed`, aiming at
/// the look-at point with the offset in the target's frame when `look_at_target` is set. A rig
/// that only looks at its target uses `look_speed` and a world-space offset.
pub fn desired_rotation(
    target: &Transform,
    camera_position: Vec3,
    settings: &CameraSettings,
) -> Option<(Quat, f32)> {
    let offset = Vec3::from_array(settings.look_at_offset);

    if settings.rotate_with_target {
        let goal = if settings.look_at_target {
            look_rotation(camera_position, target.translation + target.rotation * offset)
                .unwrap_or(target.rotation)
        } else {
            target.rotation
        };
        Some((goal, settings.rotation_follow_speed))
    } else if settings.look_at_target {
        look_rotation(camera_position, target.translation + offset)
            .map(|goal| (goal, settings.look_speed))
    } else {
        None
    }
}

/// Orientation facing `focus` from `from`, or `None` when the two coincide.
fn look_rotation(from: Vec3, focus: Vec3) -> Option<Quat> {
    if (focus - from).length_squared() <= f32::EPSILON {
        return None;
    }
    Some(Transform::from_translation(from).looking_at(focus, Vec3::Y).rotation)
}

/// Physical position and size of a player's half of the window.
pub fn split_viewport(window_size: UVec2, slot: PlayerSlot) -> (UVec2, UVec2) {
    let half_width = window_size.x / 2;
    let size = UVec2::new(half_width, window_size.y);
    let position = UVec2::new(half_width * slot.index() as u32, 0);
    (position, size)
}

pub(crate) fn spawn_cameras(
    mut commands: Commands,
    config: Res<GameConfig>,
    cars: Query<(Entity, &Car, &Transform)>,
) {
    let settings = config.camera;
    for (entity, car, car_transform) in &cars {
        let position = desired_position(car_transform, car_transform.translation, &settings);
        let mut transform = Transform::from_translation(position);
        if let Some((rotation, _)) = desired_rotation(car_transform, position, &settings) {
            transform.rotation = rotation;
        }

        commands.spawn((
            Name::new(format!("Camera {}", car.slot.index() + 1)),
            Camera3d::default(),
            Camera {
                order: car.slot.index() as isize,
                ..default()
            },
            transform,
            FollowCamera {
                target: entity,
                slot: car.slot,
                settings,
            },
        ));
    }
}

fn fit_viewports(
    mut resized: MessageReader<WindowResized>,
    window: Single<&Window, With<PrimaryWindow>>,
    added: Query<(), Added<FollowCamera>>,
    mut cameras: Query<(&FollowCamera, &mut Camera)>,
) {
    let window_changed = resized.read().count() > 0;
    if !window_changed && added.is_empty() {
        return;
    }

    let window_size = window.physical_size();
    if window_size.x < 2 || window_size.y == 0 {
        // Minimized; keep the last layout.
        return;
    }

    for (rig, mut camera) in &mut cameras {
        let (physical_position, physical_size) = split_viewport(window_size, rig.slot);
        camera.viewport = Some(Viewport {
            physical_position,
            physical_size,
            ..default()
        });
    }
}

fn follow_targets(
    time: Res<Time>,
    targets: Query<&Transform, (With<Car>, Without<FollowCamera>)>,
    mut cameras: Query<(&FollowCamera, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (rig, mut cam_tf) in &mut cameras {
        let Ok(target) = targets.get(rig.target) else {
            continue;
        };

        let desired = desired_position(target, cam_tf.translation, &rig.settings);
        cam_tf
            .translation
            .smooth_nudge(&desired, rig.settings.follow_speed, dt);

        if let Some((goal, speed)) = desired_rotation(target, cam_tf.translation, &rig.settings) {
            let t = (speed * dt).min(1.0);
            cam_tf.rotation = cam_tf.rotation.slerp(goal, t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> CameraSettings {
        CameraSettings::default()
    }

    #[test]
    fn default_offset_sits_behind_and_above() {
        let target = Transform::from_xyz(1.0, 0.5, -4.0);
        let pos = desired_position(&target, Vec3::ZERO, &settings());

        assert_eq!(pos, Vec3::new(1.0, 6.5, 4.0));
        // Behind means opposite to the car's forward (-Z).
        assert!(pos.z > target.translation.z);
    }

    #[test]
    fn offset_turns_with_the_target() {
        // Facing +X after a quarter turn to the right.
        let target = Transform::from_rotation(Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2));
        let pos = desired_position(&target, Vec3::ZERO, &settings());

        assert!((pos - Vec3::new(-8.0, 6.0, 0.0)).length() < 1.0e-4);
    }

    #[test]
    fn world_offset_ignores_target_heading() {
        let target = Transform::from_rotation(Quat::from_rotation_y(1.0));
        let s = CameraSettings {
            rotate_with_target: false,
            ..settings()
        };

        assert_eq!(desired_position(&target, Vec3::ZERO, &s), Vec3::new(0.0, 6.0, 8.0));
    }

    #[test]
    fn locked_axes_keep_current_coordinates() {
        let s = CameraSettings {
            lock_y: true,
            lock_z: true,
            ..settings()
        };
        let current = Vec3::new(9.0, 3.0, -2.0);

        let pos = desired_position(&Transform::default(), current, &s);

        assert_eq!(pos, Vec3::new(0.0, 3.0, -2.0));
    }

    fn facing(rotation: Quat) -> Vec3 {
        rotation * Vec3::NEG_Z
    }

    #[test]
    fn rotating_look_at_aims_at_rotated_offset_at_follow_speed() {
        // Facing +X; an offset one meter ahead of the car ends up at +X.
        let target = Transform::from_rotation(Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2));
        let s = CameraSettings {
            look_at_offset: [0.0, 0.0, -1.0],
            ..settings()
        };
        let camera = Vec3::new(-8.0, 6.0, 0.0);

        let (rotation, speed) = desired_rotation(&target, camera, &s).unwrap();

        let expected = (Vec3::new(1.0, 0.0, 0.0) - camera).normalize();
        assert!((facing(rotation) - expected).length() < 1.0e-4);
        assert_eq!(speed, s.rotation_follow_speed);
    }

    #[test]
    fn rotating_without_look_at_copies_target_rotation() {
        let target = Transform::from_rotation(Quat::from_rotation_y(0.7));
        let s = CameraSettings {
            look_at_target: false,
            ..settings()
        };

        let (rotation, speed) = desired_rotation(&target, Vec3::new(3.0, 6.0, 8.0), &s).unwrap();

        assert_eq!(rotation, target.rotation);
        assert_eq!(speed, s.rotation_follow_speed);
    }

    #[test]
    fn look_only_uses_world_offset_at_look_speed() {
        let target = Transform::from_rotation(Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2));
        let s = CameraSettings {
            rotate_with_target: false,
            look_at_offset: [0.0, 0.0, -1.0],
            ..settings()
        };
        let camera = Vec3::new(0.0, 6.0, 8.0);

        let (rotation, speed) = desired_rotation(&target, camera, &s).unwrap();

        let expected = (Vec3::new(0.0, 0.0, -1.0) - camera).normalize();
        assert!((facing(rotation) - expected).length() < 1.0e-4);
        assert_eq!(speed, s.look_speed);
    }

    #[test]
    fn free_camera_leaves_rotation_alone() {
        let s = CameraSettings {
            look_at_target: false,
            rotate_with_target: false,
            ..settings()
        };
        assert!(desired_rotation(&Transform::default(), Vec3::ONE, &s).is_none());
    }

    #[test]
    fn zero_look_direction_falls_back_to_target_rotation_when_rotating() {
        let target = Transform::from_rotation(Quat::from_rotation_y(0.4));
        let camera = target.translation + Vec3::from_array(settings().look_at_offset);

        let (rotation, _) = desired_rotation(&target, camera, &settings()).unwrap();

        assert_eq!(rotation, target.rotation);
    }

    #[test]
    fn zero_look_direction_leaves_look_only_camera_alone() {
        let s = CameraSettings {
            rotate_with_target: false,
            ..settings()
        };
        let camera = Vec3::from_array(s.look_at_offset);

        assert!(desired_rotation(&Transform::default(), camera, &s).is_none());
    }

    #[test]
    fn viewports_split_the_window_in_half() {
        let size = UVec2::new(1280, 720);

        assert_eq!(
            split_viewport(size, PlayerSlot::One),
            (UVec2::ZERO, UVec2::new(640, 720))
        );
        assert_eq!(
            split_viewport(size, PlayerSlot::Two),
            (UVec2::new(640, 0), UVec2::new(640, 720))
        );
    }
}
