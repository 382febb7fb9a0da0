//! Proximity chase finite state machine.
//!
//! Pure functions that classify a chaser's follow state from its live
//! distance to the target and compute the next blended velocity.
//! No ECS dependency; operates on plain data.

use glam::DVec3;

use skirmish_core::components::MoveTuning;
use skirmish_core::enums::FollowState;
use skirmish_core::types::{Position, Velocity};

use crate::blend::{blend_horizontal, yaw_towards};

/// Input to the chase FSM for a single entity.
pub struct ChaseContext {
    pub position: Position,
    pub velocity: Velocity,
    /// Target position, `None` when the target is unavailable.
    pub target: Option<Position>,
    pub tuning: MoveTuning,
    pub previous: FollowState,
    pub dt: f64,
}

/// Output from the chase FSM.
pub struct ChaseUpdate {
    pub follow_state: FollowState,
    pub new_velocity: Velocity,
    pub distance: Option<f64>,
    pub state_changed: bool,
}

/// Classify the follow state. A missing or non-finite distance counts as
/// out of range.
pub fn classify(distance: Option<f64>, detection_range: f64, stop_distance: f64) -> FollowState {
    match distance {
        Some(d) if d.is_finite() && d <= detection_range => {
            if d > stop_distance {
                FollowState::Following
            } else {
                FollowState::Stopping
            }
        }
        _ => FollowState::Idle,
    }
}

/// Evaluate one fixed tick for a chaser.
pub fn evaluate(ctx: &ChaseContext) -> ChaseUpdate {
    let distance = ctx.target.map(|t| ctx.position.distance_to(&t));
    let follow_state = classify(distance, ctx.tuning.detection_range, ctx.tuning.stop_distance);

    let new_velocity = match (follow_state, ctx.target) {
        (FollowState::Following, Some(target)) => {
            let wish = pursuit_velocity(&ctx.position, &target, ctx.tuning.move_speed);
            blend_horizontal(ctx.velocity, wish.x, wish.z, ctx.tuning.acceleration, ctx.dt)
        }
        _ => blend_horizontal(ctx.velocity, 0.0, 0.0, ctx.tuning.deceleration, ctx.dt),
    };

    ChaseUpdate {
        follow_state,
        new_velocity,
        distance,
        state_changed: follow_state != ctx.previous,
    }
}

/// Desired horizontal velocity: unit direction to the target times speed.
/// Zero when the target is straight above or below.
pub fn pursuit_velocity(position: &Position, target: &Position, move_speed: f64) -> DVec3 {
    let to_target = DVec3::from(*target) - DVec3::from(*position);
    DVec3::new(to_target.x, 0.0, to_target.z).normalize_or_zero() * move_speed
}

/// Yaw that faces `target` from `position` in the horizontal plane.
pub fn facing(position: &Position, target: &Position) -> Option<f64> {
    yaw_towards(target.x - position.x, target.z - position.z)
}
