//! Exponential smoothing helpers.
//!
//! Every blend is `lerp(current, target, rate * dt)` with the factor clamped
//! to [0, 1], so a large rate or a long frame snaps to the target instead of
//! overshooting.

use std::f64::consts::{PI, TAU};

use glam::DVec3;

use skirmish_core::types::Velocity;

/// Horizontal direction vectors shorter than this have no facing.
const MIN_FACING_LENGTH_SQ: f64 = 1e-12;

/// Interpolation factor for one step.
pub fn smoothing_factor(rate: f64, dt: f64) -> f64 {
    (rate * dt).clamp(0.0, 1.0)
}

/// Blend the horizontal (x/z) part of `current` toward a target horizontal
/// velocity. The vertical component is returned untouched.
pub fn blend_horizontal(current: Velocity, target_x: f64, target_z: f64, rate: f64, dt: f64) -> Velocity {
    let from = DVec3::new(current.x, 0.0, current.z);
    let to = DVec3::new(target_x, 0.0, target_z);
    let next = from.lerp(to, smoothing_factor(rate, dt));
    Velocity::new(next.x, current.y, next.z)
}

/// Yaw (radians about +y, 0 facing +z) of a horizontal direction, or `None`
/// for a degenerate direction.
pub fn yaw_towards(dx: f64, dz: f64) -> Option<f64> {
    if dx * dx + dz * dz < MIN_FACING_LENGTH_SQ {
        return None;
    }
    Some(dx.atan2(dz))
}

/// Wrap an angle into [-PI, PI).
pub fn wrap_angle(angle: f64) -> f64 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Turn `current` toward `target` along the shorter arc.
pub fn blend_yaw(current: f64, target: f64, rate: f64, dt: f64) -> f64 {
    let diff = wrap_angle(target - current);
    wrap_angle(current + diff * smoothing_factor(rate, dt))
}
