use bevy::prelude::*;
use shared::{ColliderShapeDef, StaticDef};

use crate::physics::{Physics, to_na_quat, to_na_vector};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, setup);
}

/// Side length of the square driving surface (meters).
pub const ARENA_SIZE: f32 = 80.0;
const WALL_HEIGHT: f32 = 2.0;
const WALL_THICKNESS: f32 = 1.0;

/// A boundary wall as center plus half-extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub center: Vec3,
    pub half_extents: Vec3,
}

/// The four walls fencing in the ground, inner faces flush with its edges.
pub fn boundary_walls(size: f32) -> [Wall; 4] {
    let half = size * 0.5;
    let t = WALL_THICKNESS * 0.5;
    let h = WALL_HEIGHT * 0.5;
    let along_x = Vec3::new(half + WALL_THICKNESS, h, t);
    let along_z = Vec3::new(t, h, half + WALL_THICKNESS);

    [
        Wall {
            center: Vec3::new(0.0, h, -(half + t)),
            half_extents: along_x,
        },
        Wall {
            center: Vec3::new(0.0, h, half + t),
            half_extents: along_x,
        },
        Wall {
            center: Vec3::new(-(half + t), h, 0.0),
            half_extents: along_z,
        },
        Wall {
            center: Vec3::new(half + t, h, 0.0),
            half_extents: along_z,
        },
    ]
}

/// Collider definitions for the ground plane followed by the walls.
pub fn arena_statics(size: f32) -> Vec<StaticDef> {
    let ground = StaticDef {
        id: 0,
        translation: to_na_vector(Vec3::ZERO),
        rotation: to_na_quat(Quat::IDENTITY),
        shape: ColliderShapeDef::Plane {
            offset_along_normal: 0.0,
        },
    };

    std::iter::once(ground)
        .chain(
            boundary_walls(size)
                .into_iter()
                .zip(1..)
                .map(|(wall, id)| StaticDef {
                    id,
                    translation: to_na_vector(wall.center),
                    rotation: to_na_quat(Quat::IDENTITY),
                    shape: ColliderShapeDef::Cuboid {
                        half_extents: to_na_vector(wall.half_extents),
                    },
                }),
        )
        .collect()
}

fn setup(
    mut commands: Commands,
    mut physics: ResMut<Physics>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for def in arena_statics(ARENA_SIZE) {
        physics.insert_static(def);
    }

    commands.spawn((
        Name::new("Ground"),
        Transform::default(),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(ARENA_SIZE, ARENA_SIZE).build())),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::linear_rgb(0.2, 0.3, 0.25),
            perceptual_roughness: 1.0,
            metallic: 0.0,
            ..default()
        })),
    ));

    let wall_material = materials.add(Color::srgb_u8(180, 180, 190));
    for wall in boundary_walls(ARENA_SIZE) {
        commands.spawn((
            Name::new("Wall"),
            Mesh3d(meshes.add(Cuboid::from_size(wall.half_extents * 2.0))),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_translation(wall.center),
        ));
    }

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 30.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    info!("Arena ready: {ARENA_SIZE}m square");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walls_enclose_the_ground() {
        let half = ARENA_SIZE * 0.5;
        for wall in boundary_walls(ARENA_SIZE) {
            let inner_x = wall.center.x.abs() - wall.half_extents.x;
            let inner_z = wall.center.z.abs() - wall.half_extents.z;
            // One of the two axes is the wall's thin side, flush with the ground edge.
            let flush = (inner_x - half).abs() < 1.0e-5 || (inner_z - half).abs() < 1.0e-5;
            assert!(flush, "{wall:?}");
            assert_eq!(wall.center.y, wall.half_extents.y);
        }
    }

    #[test]
    fn statics_list_ground_first_with_unique_ids() {
        let statics = arena_statics(ARENA_SIZE);

        assert_eq!(statics.len(), 5);
        assert!(matches!(statics[0].shape, ColliderShapeDef::Plane { .. }));
        let mut ids: Vec<u32> = statics.iter().map(|d| d.id).collect();
        ids.dedup();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }
}
