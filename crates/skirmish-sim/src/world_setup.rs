//! Agent spawn factories.
//!
//! Builds the component bundle for a player or an enemy, registers the
//! entity and wires its own subsystems to the event bus. The returned
//! subscription tokens must live exactly as long as the entity.

use std::f64::consts::TAU;

use hecs::EntityBuilder;
use log::{info, warn};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::*;
use skirmish_core::config::SpawnConfig;
use skirmish_core::enums::Role;
use skirmish_core::error::{SimError, SimResult};
use skirmish_core::types::{EntityId, Position, Velocity};

use crate::bus::{EventBus, Subscription};
use crate::context::SimContext;
use crate::systems::{attack, chase, cleanup, health, motor, speed};

/// Spawn one agent from `config`. Malformed values are clamped (and
/// logged) rather than rejected.
pub fn spawn_agent(
    ctx: &mut SimContext,
    bus: &mut EventBus,
    config: &SpawnConfig,
) -> SimResult<(EntityId, Vec<Subscription>)> {
    let (cfg, adjustments) = config.sanitized();
    for adjustment in &adjustments {
        warn!("spawn config for '{}': {adjustment}", cfg.label);
    }

    let id = ctx.registry.allocate();
    let tuning = MoveTuning {
        move_speed: cfg.move_speed,
        acceleration: cfg.acceleration,
        deceleration: cfg.deceleration,
        rotation_speed: cfg.rotation_speed,
        detection_range: cfg.detection_range,
        stop_distance: cfg.stop_distance,
    };

    let mut builder = EntityBuilder::new();
    builder.add_bundle((
        Identity { id, role: cfg.role },
        cfg.position,
        Velocity::default(),
        Orientation::default(),
        health::full_health(cfg.max_health),
        attack::new_timing(cfg.attack_cooldown_duration, cfg.damage_amount),
        tuning,
    ));
    match cfg.role {
        Role::Player => {
            builder
                .add(PlayerMotor::default())
                .add(speed::new_modulation(cfg.attack_speed_reduction_factor, &tuning));
        }
        Role::Enemy => {
            builder.add(ChaseState::default());
        }
    }
    let handle = ctx.world.spawn(builder.build());
    ctx.registry.bind(id, handle, cfg.label.clone());

    let mut subscriptions = vec![cleanup::wire(bus, id), attack::wire(bus, id)];
    match cfg.role {
        Role::Player => {
            ctx.registry.set_player(id)?;
            subscriptions.push(motor::wire(bus, id));
            subscriptions.extend(speed::wire(bus, id));
        }
        Role::Enemy => subscriptions.push(chase::wire(bus, id)),
    }

    info!(
        "spawned {:?} {id} '{}' at ({:.1}, {:.1}, {:.1})",
        cfg.role, cfg.label, cfg.position.x, cfg.position.y, cfg.position.z
    );
    Ok((id, subscriptions))
}

/// Spawn `count` copies of `template` at random bearings around `center`,
/// each between `inner` and `outer` units away on the horizontal plane.
/// Labels are numbered from 1. Non-finite radii are rejected.
#[allow(clippy::too_many_arguments)]
pub fn spawn_enemy_ring(
    ctx: &mut SimContext,
    bus: &mut EventBus,
    rng: &mut ChaCha8Rng,
    template: &SpawnConfig,
    count: usize,
    center: Position,
    inner: f64,
    outer: f64,
) -> SimResult<Vec<(EntityId, Vec<Subscription>)>> {
    if !(inner.is_finite() && outer.is_finite()) {
        return Err(SimError::InvalidConfig(format!(
            "enemy ring radii must be finite, got {inner}..{outer}"
        )));
    }
    let inner = inner.max(0.0);
    let outer = outer.max(inner);

    let mut spawned = Vec::with_capacity(count);
    for i in 0..count {
        let bearing: f64 = rng.gen_range(0.0..TAU);
        let radius: f64 = if outer > inner {
            rng.gen_range(inner..outer)
        } else {
            inner
        };

        // Bearing 0 points down +z; yaw uses the same convention.
        let position = Position::new(
            center.x + radius * bearing.sin(),
            center.y,
            center.z + radius * bearing.cos(),
        );
        let config = SpawnConfig {
            label: format!("{} {}", template.label, i + 1),
            role: Role::Enemy,
            position,
            ..template.clone()
        };
        spawned.push(spawn_agent(ctx, bus, &config)?);
    }
    Ok(spawned)
}
