use crate::constants::REST_SPEED_EPS;
use crate::types::{Quat, Vec3, up};
use nalgebra as na;

/// Drop the vertical component of a world-space vector.
#[inline]
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Planar (XZ) speed of a world-space velocity (m/s).
#[inline]
pub fn horizontal_speed(v: Vec3) -> f32 {
    (v.x * v.x + v.z * v.z).sqrt()
}

/// True when the horizontal part of `v` is above the rest threshold.
#[inline]
pub fn is_moving_horizontally(v: Vec3) -> bool {
    horizontal_speed(v) > REST_SPEED_EPS
}

/// Angle in degrees between world up and `normal`.
///
/// Returns 0 for a zero-length normal.
pub fn angle_from_up_deg(normal: Vec3) -> f32 {
    let len = normal.norm();
    if len <= f32::EPSILON {
        return 0.0;
    }
    let cos = (normal.dot(&up()) / len).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Remove the component of `v` along `normal`, leaving the part that lies in the plane.
pub fn project_on_plane(v: Vec3, normal: Vec3) -> Vec3 {
    let len_sq = normal.norm_squared();
    if len_sq <= 1.0e-12 {
        return v;
    }
    v - normal * (v.dot(&normal) / len_sq)
}

/// Normalize `v`, or return zero for a degenerate vector.
#[inline]
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    v.try_normalize(1.0e-6).unwrap_or_else(Vec3::zeros)
}

/// Yaw-only rotation of `degrees` about world up.
#[inline]
pub fn yaw_rotation_deg(degrees: f32) -> Quat {
    na::UnitQuaternion::from_axis_angle(&na::Vector3::y_axis(), degrees.to_radians())
}

/// The body's right (+X) and forward (+Z) axes in world space.
#[inline]
pub fn right_forward(orientation: &Quat) -> (Vec3, Vec3) {
    (orientation * Vec3::x(), orientation * Vec3::z())
}
