//! Proximity chase system.
//!
//! Each fixed tick, every running chaser measures the straight-line
//! distance to its target, reclassifies its follow state and blends its
//! horizontal velocity. Target positions are read from a snapshot taken
//! before any chaser is updated.

use std::collections::HashMap;

use hecs::World;
use log::debug;

use skirmish_chase::fsm::{self, ChaseContext};
use skirmish_core::components::{ChaseState, Health, Identity, MoveTuning};
use skirmish_core::enums::{LifeState, MotionMode, Topic};
use skirmish_core::types::{EntityId, Position, Velocity};

use crate::bus::{EventBus, Stage, Subscription};
use crate::context::SimContext;

/// Positions of every living entity. Dead or despawned entities are not
/// valid targets.
pub fn target_positions(world: &World) -> HashMap<EntityId, Position> {
    world
        .query::<(&Identity, &Position, Option<&Health>)>()
        .iter()
        .filter(|(_, (_, _, health))| health.map_or(true, |h| h.state == LifeState::Alive))
        .map(|(_, (identity, pos, _))| (identity.id, *pos))
        .collect()
}

/// Resolve a chaser's target: its explicit target, else the current
/// player. A chaser never targets itself.
pub fn resolve_target(
    chaser: EntityId,
    chase: &ChaseState,
    player: Option<EntityId>,
    targets: &HashMap<EntityId, Position>,
) -> Option<Position> {
    chase
        .target
        .or(player)
        .filter(|target| *target != chaser)
        .and_then(|target| targets.get(&target).copied())
}

/// Run the chase FSM for all running, active chasers.
pub fn run(ctx: &mut SimContext, dt: f64) {
    let targets = target_positions(&ctx.world);
    let player = ctx.registry.player();
    let registry = &ctx.registry;

    for (_entity, (identity, pos, vel, chase, tuning)) in ctx
        .world
        .query_mut::<(&Identity, &Position, &mut Velocity, &mut ChaseState, &MoveTuning)>()
    {
        if chase.mode == MotionMode::Frozen || !registry.is_active(identity.id) {
            continue;
        }

        let update = fsm::evaluate(&ChaseContext {
            position: *pos,
            velocity: *vel,
            target: resolve_target(identity.id, chase, player, &targets),
            tuning: *tuning,
            previous: chase.follow,
            dt,
        });

        if update.state_changed {
            debug!(
                "{} follow state {:?} -> {:?}",
                identity.id, chase.follow, update.follow_state
            );
        }

        chase.follow = update.follow_state;
        chase.last_distance = update.distance;
        *vel = update.new_velocity;
    }
}

/// On the owner's death: freeze the controller and shed horizontal speed.
pub fn wire(bus: &mut EventBus, id: EntityId) -> Subscription {
    bus.subscribe_entity(Topic::Died, Stage::Core, id, move |_event, cx| {
        let Some(ctx) = cx.ctx_mut() else {
            return;
        };
        let Ok(handle) = ctx.registry.resolve(id) else {
            return;
        };
        if let Ok((chase, vel)) = ctx
            .world
            .query_one_mut::<(&mut ChaseState, &mut Velocity)>(handle)
        {
            chase.mode = MotionMode::Frozen;
            vel.x = 0.0;
            vel.z = 0.0;
            debug!("{id} chase frozen");
        }
    })
}
