//! Health state machine: `Alive` → `Dead` (terminal).
//!
//! Transitions are pure functions on a `Health` record. The engine
//! publishes `Damaged`/`Died` from their outcomes, so this module never
//! reaches into other subsystems.

use skirmish_core::components::Health;
use skirmish_core::enums::LifeState;
use skirmish_core::outcomes::{DamageOutcome, HealOutcome, MaxHealthOutcome};

pub fn full_health(max: f64) -> Health {
    Health {
        current: max,
        max,
        state: LifeState::Alive,
    }
}

/// Reduce health. Non-positive amounts and dead targets are no-ops.
/// `Killed` is returned exactly once per record.
pub fn apply_damage(health: &mut Health, amount: f64) -> DamageOutcome {
    if !(amount > 0.0) {
        return DamageOutcome::Rejected;
    }
    if health.state == LifeState::Dead {
        return DamageOutcome::AlreadyDead;
    }

    health.current = (health.current - amount).max(0.0);
    if health.current > 0.0 {
        return DamageOutcome::Damaged {
            remaining: health.current,
        };
    }

    health.state = LifeState::Dead;
    DamageOutcome::Killed
}

pub fn heal(health: &mut Health, amount: f64) -> HealOutcome {
    if health.state == LifeState::Dead {
        return HealOutcome::Dead;
    }
    if !(amount > 0.0) {
        return HealOutcome::Rejected;
    }
    health.current = (health.current + amount).min(health.max);
    HealOutcome::Healed {
        current: health.current,
    }
}

/// Set a new maximum and reset current health to it. A dead record keeps
/// zero health.
pub fn set_max(health: &mut Health, new_max: f64) -> MaxHealthOutcome {
    if !(new_max > 0.0 && new_max.is_finite()) {
        return MaxHealthOutcome::Rejected;
    }
    health.max = new_max;
    if health.state == LifeState::Dead {
        return MaxHealthOutcome::DeadUnchanged;
    }
    health.current = new_max;
    MaxHealthOutcome::Reset { current: new_max }
}

/// Current health as a fraction of max.
pub fn fraction(health: &Health) -> f64 {
    health.current / health.max
}
