//! Attack timing controller.
//!
//! Gating is `Idle` ↔ `OnCooldown`, driven by a polled-down counter. The
//! hitbox window is an orthogonal `Open`/`Closed` flag that only a living
//! attacker can open.

use hecs::World;
use log::debug;

use skirmish_core::components::AttackTiming;
use skirmish_core::constants::COOLDOWN_EPSILON;
use skirmish_core::enums::{AttackPhase, HitboxState, Topic};
use skirmish_core::events::CombatEvent;
use skirmish_core::types::EntityId;

use crate::bus::{EventBus, Stage, Subscription};

pub fn new_timing(cooldown_duration: f64, damage_amount: f64) -> AttackTiming {
    AttackTiming {
        phase: AttackPhase::Idle,
        cooldown_remaining: 0.0,
        cooldown_duration,
        hitbox: HitboxState::Closed,
        swing_in_progress: false,
        damage_amount,
        contacts: Vec::new(),
    }
}

/// Start the cooldown and a swing. Returns false while on cooldown.
pub fn trigger(timing: &mut AttackTiming) -> bool {
    if timing.phase == AttackPhase::OnCooldown {
        return false;
    }
    timing.phase = AttackPhase::OnCooldown;
    timing.cooldown_remaining = timing.cooldown_duration;
    timing.swing_in_progress = true;
    true
}

/// Mark a swing as started by the animation. Returns false if one is
/// already in progress.
pub fn begin_swing(timing: &mut AttackTiming) -> bool {
    !std::mem::replace(&mut timing.swing_in_progress, true)
}

pub fn end_swing(timing: &mut AttackTiming) {
    timing.swing_in_progress = false;
}

/// Returns true if the window was closed and is now open.
pub fn open_hitbox(timing: &mut AttackTiming) -> bool {
    if timing.hitbox == HitboxState::Open {
        return false;
    }
    timing.hitbox = HitboxState::Open;
    true
}

/// Returns true if the window was open. Clears the window's contacts.
pub fn close_hitbox(timing: &mut AttackTiming) -> bool {
    if timing.hitbox == HitboxState::Closed {
        return false;
    }
    timing.hitbox = HitboxState::Closed;
    timing.contacts.clear();
    true
}

/// Change the cooldown length. A running cooldown never waits longer than
/// the new duration.
pub fn set_duration(timing: &mut AttackTiming, secs: f64) {
    timing.cooldown_duration = secs;
    timing.cooldown_remaining = timing.cooldown_remaining.min(secs);
}

/// Count the cooldown down. Recovery to `Idle` is silent.
pub fn advance(timing: &mut AttackTiming, dt: f64) {
    if timing.phase != AttackPhase::OnCooldown {
        return;
    }
    timing.cooldown_remaining = (timing.cooldown_remaining - dt).max(0.0);
    if timing.cooldown_remaining <= COOLDOWN_EPSILON {
        timing.cooldown_remaining = 0.0;
        timing.phase = AttackPhase::Idle;
    }
}

/// 1.0 when ready, rising from 0.0 right after a trigger.
pub fn cooldown_progress(timing: &AttackTiming) -> f64 {
    match timing.phase {
        AttackPhase::Idle => 1.0,
        AttackPhase::OnCooldown => {
            (1.0 - timing.cooldown_remaining / timing.cooldown_duration).clamp(0.0, 1.0)
        }
    }
}

/// Advance every attacker's cooldown by one fixed tick.
pub fn run(world: &mut World, dt: f64) {
    for (_entity, timing) in world.query_mut::<&mut AttackTiming>() {
        advance(timing, dt);
    }
}

/// On the owner's death: close the window (announcing it) and drop the swing.
pub fn wire(bus: &mut EventBus, id: EntityId) -> Subscription {
    bus.subscribe_entity(Topic::Died, Stage::Core, id, move |_event, cx| {
        let Some(ctx) = cx.ctx_mut() else {
            return;
        };
        let Ok(handle) = ctx.registry.resolve(id) else {
            return;
        };
        let closed = match ctx.world.get::<&mut AttackTiming>(handle) {
            Ok(mut timing) => {
                end_swing(&mut timing);
                close_hitbox(&mut timing)
            }
            Err(_) => false,
        };
        if closed {
            debug!("{id} died with an open hitbox; closing it");
            cx.emit(CombatEvent::HitboxDeactivated { entity: id });
        }
    })
}
