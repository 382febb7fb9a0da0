//! Speed-modulation coordinator for the controlled agent.
//!
//! While the agent's own attack is in progress its move and rotation speed
//! are scaled down by the configured factor. The pre-reduction values are
//! captured on entry and restored exactly on exit; repeated start or end
//! notifications are no-ops.

use log::debug;

use skirmish_core::components::{MoveTuning, SpeedModulation};
use skirmish_core::enums::Topic;
use skirmish_core::types::EntityId;

use crate::bus::{EventBus, Stage, Subscription};

pub fn new_modulation(factor: f64, tuning: &MoveTuning) -> SpeedModulation {
    SpeedModulation {
        factor,
        reduced: false,
        base_move_speed: tuning.move_speed,
        base_rotation_speed: tuning.rotation_speed,
    }
}

/// Enter the reduced state. Returns false if already reduced.
pub fn reduce(modulation: &mut SpeedModulation, tuning: &mut MoveTuning) -> bool {
    if modulation.reduced {
        return false;
    }
    modulation.base_move_speed = tuning.move_speed;
    modulation.base_rotation_speed = tuning.rotation_speed;
    tuning.move_speed = modulation.base_move_speed * modulation.factor;
    tuning.rotation_speed = modulation.base_rotation_speed * modulation.factor;
    modulation.reduced = true;
    true
}

/// Leave the reduced state. Returns false if not reduced.
pub fn restore(modulation: &mut SpeedModulation, tuning: &mut MoveTuning) -> bool {
    if !modulation.reduced {
        return false;
    }
    tuning.move_speed = modulation.base_move_speed;
    tuning.rotation_speed = modulation.base_rotation_speed;
    modulation.reduced = false;
    true
}

/// Change the reduction factor. An active reduction keeps its current
/// speeds; the new factor applies from the next `reduce`. Values above 1 are
/// capped at 1. Returns false (and changes nothing) for a non-positive or
/// non-finite factor.
pub fn set_factor(modulation: &mut SpeedModulation, factor: f64) -> bool {
    if !(factor > 0.0 && factor.is_finite()) {
        return false;
    }
    modulation.factor = factor.min(1.0);
    true
}

/// A tuning write that lands while reduced updates the base; the effective
/// value stays scaled.
pub fn set_base_move_speed(modulation: &mut SpeedModulation, tuning: &mut MoveTuning, value: f64) {
    modulation.base_move_speed = value;
    tuning.move_speed = if modulation.reduced { value * modulation.factor } else { value };
}

pub fn set_base_rotation_speed(modulation: &mut SpeedModulation, tuning: &mut MoveTuning, value: f64) {
    modulation.base_rotation_speed = value;
    tuning.rotation_speed = if modulation.reduced { value * modulation.factor } else { value };
}

/// Subscribe the coordinator to the owner's attack start/end events.
pub fn wire(bus: &mut EventBus, id: EntityId) -> Vec<Subscription> {
    let started = bus.subscribe_entity(Topic::AttackStarted, Stage::Core, id, move |_event, cx| {
        let Some(ctx) = cx.ctx_mut() else {
            return;
        };
        let Ok(handle) = ctx.registry.resolve(id) else {
            return;
        };
        if let Ok((modulation, tuning)) = ctx
            .world
            .query_one_mut::<(&mut SpeedModulation, &mut MoveTuning)>(handle)
        {
            if reduce(modulation, tuning) {
                debug!("{id} speed reduced to {}", tuning.move_speed);
            }
        }
    });
    let ended = bus.subscribe_entity(Topic::AttackEnded, Stage::Core, id, move |_event, cx| {
        let Some(ctx) = cx.ctx_mut() else {
            return;
        };
        let Ok(handle) = ctx.registry.resolve(id) else {
            return;
        };
        if let Ok((modulation, tuning)) = ctx
            .world
            .query_one_mut::<(&mut SpeedModulation, &mut MoveTuning)>(handle)
        {
            if restore(modulation, tuning) {
                debug!("{id} speed restored to {}", tuning.move_speed);
            }
        }
    });
    vec![started, ended]
}
