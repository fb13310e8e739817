//! Rapier world owned by the app, stepped on `FixedUpdate`.
//!
//! Conventions
//! - `PhysicsSet::Drive` runs the car controllers, `Step` advances rapier by one tick and
//!   `Sync` copies body poses into `Transform`s, in that order.
//! - Rapier uses nalgebra types; the helpers here convert to and from glam at the boundary.

use bevy::prelude::*;
use nalgebra as na;
use shared::{FIXED_DT, Iso, PhysicsWorld, physics::rapier3d::prelude::RigidBodyHandle};

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(Physics(PhysicsWorld::new(FIXED_DT)));

    app.configure_sets(
        FixedUpdate,
        (PhysicsSet::Drive, PhysicsSet::Step, PhysicsSet::Sync).chain(),
    );
    app.add_systems(
        FixedUpdate,
        (
            step_world.in_set(PhysicsSet::Step),
            sync_transforms.in_set(PhysicsSet::Sync),
        ),
    );
}

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicsSet {
    Drive,
    Step,
    Sync,
}

#[derive(Resource, Deref, DerefMut)]
pub struct Physics(pub PhysicsWorld);

/// Links an entity to the rapier body that drives its `Transform`.
#[derive(Component, Debug, Clone, Copy)]
pub struct PhysicsBody(pub RigidBodyHandle);

fn step_world(mut physics: ResMut<Physics>) {
    physics.step();
}

fn sync_transforms(physics: Res<Physics>, mut bodies: Query<(&PhysicsBody, &mut Transform)>) {
    for (body, mut transform) in &mut bodies {
        let Some(pose) = physics.pose(body.0) else {
            continue;
        };
        *transform = transform_from_iso(&pose);
    }
}

pub fn to_bevy_vec3(v: &na::Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

pub fn to_na_vector(v: Vec3) -> na::Vector3<f32> {
    na::Vector3::new(v.x, v.y, v.z)
}

pub fn to_bevy_quat(q: &na::UnitQuaternion<f32>) -> Quat {
    // nalgebra stores quaternion coordinates as (i, j, k, w).
    let c = q.coords;
    Quat::from_xyzw(c.x, c.y, c.z, c.w)
}

pub fn to_na_quat(q: Quat) -> na::UnitQuaternion<f32> {
    na::UnitQuaternion::new_normalize(na::Quaternion::new(q.w, q.x, q.y, q.z))
}

pub fn transform_from_iso(iso: &Iso) -> Transform {
    Transform {
        translation: to_bevy_vec3(&iso.translation.vector),
        rotation: to_bevy_quat(&iso.rotation),
        ..default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quaternions_agree_on_rotated_vectors() {
        let na_q = na::UnitQuaternion::from_axis_angle(&na::Vector3::y_axis(), 0.7);
        let bevy_q = to_bevy_quat(&na_q);

        let v = na::Vector3::new(0.3, -1.2, 2.5);
        let expected = to_bevy_vec3(&(na_q * v));
        let actual = bevy_q * to_bevy_vec3(&v);

        assert!((expected - actual).length() < 1.0e-5);
    }

    #[test]
    fn quaternion_conversion_round_trips() {
        let q = Quat::from_euler(EulerRot::YXZ, 1.1, 0.2, -0.3);
        let back = to_bevy_quat(&to_na_quat(q));
        assert!(q.angle_between(back) < 1.0e-5);
    }

    #[test]
    fn iso_maps_onto_transform() {
        let iso = Iso::from_parts(
            na::Translation3::new(1.0, 2.0, 3.0),
            na::UnitQuaternion::from_axis_angle(&na::Vector3::y_axis(), std::f32::consts::FRAC_PI_2),
        );

        let transform = transform_from_iso(&iso);

        assert_eq!(transform.translation, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.scale, Vec3::ONE);
        // Quarter turn left: local forward (-Z) now points along -X.
        let forward = transform.rotation * Vec3::NEG_Z;
        assert!((forward - Vec3::NEG_X).length() < 1.0e-5);
    }

    #[test]
    fn fixed_step_moves_synced_transform() {
        let mut app = App::new();
        app.insert_resource(Physics(PhysicsWorld::new(FIXED_DT)));
        app.add_systems(Update, (step_world, sync_transforms).chain());

        let handle = app
            .world_mut()
            .resource_mut::<Physics>()
            .spawn_vehicle(shared::VehicleBodySpec::default());
        let entity = app
            .world_mut()
            .spawn((PhysicsBody(handle), Transform::default()))
            .id();

        app.update();

        let transform = app.world().get::<Transform>(entity).unwrap();
        // No ground: the chassis falls under gravity from its spawn height.
        assert!(transform.translation.y < 0.6);
    }
}
