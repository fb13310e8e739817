/*!
Math aliases and small vector helpers shared by the vehicle modules.

Conventions
- Right-handed, +Y up (matches Bevy and Rapier).
- A vehicle's local forward axis is -Z.
- "Horizontal" means the XZ plane; the Y component is left to gravity and the solver.
*/

use nalgebra as na;

pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;
pub type Iso = na::Isometry3<f32>;

/// Local forward axis of a vehicle body.
#[inline]
pub fn local_forward() -> Vec3 {
    -Vec3::z()
}

/// Drop the vertical component.
#[inline]
pub fn horizontal(v: &Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Magnitude of the XZ part of `v` (m/s when `v` is a velocity).
#[inline]
pub fn horizontal_speed(v: &Vec3) -> f32 {
    (v.x * v.x + v.z * v.z).sqrt()
}

/// Horizontal unit direction the rotation faces, or `None` when it points straight up/down.
pub fn horizontal_forward(rotation: &Quat) -> Option<Vec3> {
    let forward = horizontal(&(rotation * local_forward()));
    forward.try_normalize(f32::EPSILON)
}

/// Yaw-only rotation about world +Y by `radians` (positive = counter-clockwise seen from above).
#[inline]
pub fn yaw_rotation(radians: f32) -> Quat {
    Quat::from_axis_angle(&Vec3::y_axis(), radians)
}

/// Rebuild a velocity from a horizontal vector and the untouched vertical component.
#[inline]
pub fn with_vertical(horizontal: Vec3, vertical: f32) -> Vec3 {
    Vec3::new(horizontal.x, vertical, horizontal.z)
}
