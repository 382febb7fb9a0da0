//! Position integration.

use skirmish_core::components::{ChaseState, Identity, PlayerMotor};
use skirmish_core::enums::MotionMode;
use skirmish_core::types::{Position, Velocity};

use crate::context::SimContext;

/// `position += velocity * dt` for every active, running mover. The
/// vertical component is integrated as given; nothing here changes it.
pub fn run(ctx: &mut SimContext, dt: f64) {
    let registry = &ctx.registry;
    for (_entity, (identity, pos, vel, chase, motor)) in ctx.world.query_mut::<(
        &Identity,
        &mut Position,
        &Velocity,
        Option<&ChaseState>,
        Option<&PlayerMotor>,
    )>() {
        let frozen = chase.map_or(false, |c| c.mode == MotionMode::Frozen)
            || motor.map_or(false, |m| m.mode == MotionMode::Frozen);
        if frozen || !registry.is_active(identity.id) {
            continue;
        }
        pos.x += vel.x * dt;
        pos.y += vel.y * dt;
        pos.z += vel.z * dt;
    }
}
