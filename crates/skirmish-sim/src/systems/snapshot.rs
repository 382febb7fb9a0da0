//! Snapshot system: builds a `SimSnapshot` from the world.
//!
//! Read-only; never modifies the world.

use hecs::Entity;

use skirmish_core::components::*;
use skirmish_core::enums::MotionMode;
use skirmish_core::events::CombatEvent;
use skirmish_core::state::*;
use skirmish_core::types::{EntityId, Position, Velocity};

use crate::context::SimContext;

/// One view per registered entity, in id order.
pub fn build(ctx: &SimContext, events: Vec<CombatEvent>) -> SimSnapshot {
    let entities = ctx
        .registry
        .ids()
        .filter_map(|id| {
            let handle = ctx.registry.resolve(id).ok()?;
            view(ctx, id, handle)
        })
        .collect();

    SimSnapshot {
        time: ctx.time,
        entities,
        events,
    }
}

/// View of a single entity, `None` if it has no identity in the world.
pub fn view(ctx: &SimContext, id: EntityId, handle: Entity) -> Option<EntityView> {
    let entity = ctx.world.entity(handle).ok()?;
    let identity = entity.get::<&Identity>()?;

    let chase = entity.get::<&ChaseState>().map(|c| *c);
    let motor = entity.get::<&PlayerMotor>().map(|m| *m);
    let frozen = chase.is_some_and(|c| c.mode == MotionMode::Frozen)
        || motor.is_some_and(|m| m.mode == MotionMode::Frozen);

    Some(EntityView {
        id,
        label: ctx.registry.label(id).ok()?.to_string(),
        role: identity.role,
        active: ctx.registry.is_active(id),
        position: entity.get::<&Position>().map(|p| *p).unwrap_or_default(),
        velocity: entity.get::<&Velocity>().map(|v| *v).unwrap_or_default(),
        yaw: entity.get::<&Orientation>().map_or(0.0, |o| o.yaw),
        health: entity.get::<&Health>().map(|h| HealthView {
            current: h.current,
            max: h.max,
            state: h.state,
        }),
        attack: entity.get::<&AttackTiming>().map(|t| AttackView {
            phase: t.phase,
            cooldown_remaining: t.cooldown_remaining,
            hitbox: t.hitbox,
        }),
        follow_state: chase.map(|c| c.follow),
        motion: if frozen { MotionMode::Frozen } else { MotionMode::Running },
    })
}
