//! Hitbox contact bookkeeping.
//!
//! The external collision layer reports overlap-enter and overlap-exit for
//! (attacker hitbox, victim hurt-volume) pairs. A pair deals damage once per
//! enter while the window is open; repeated enters without an exit, e.g. a
//! physics step re-reporting the same overlap, are ignored. Contacts reset
//! whenever the window closes.

use skirmish_core::components::AttackTiming;
use skirmish_core::enums::HitboxState;
use skirmish_core::types::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactCheck {
    /// New contact: damage should be applied.
    Fresh,
    Duplicate,
    WindowClosed,
}

pub fn enter(timing: &mut AttackTiming, victim: EntityId) -> ContactCheck {
    if timing.hitbox == HitboxState::Closed {
        return ContactCheck::WindowClosed;
    }
    if timing.contacts.contains(&victim) {
        return ContactCheck::Duplicate;
    }
    timing.contacts.push(victim);
    ContactCheck::Fresh
}

/// Returns true if the pair was in contact.
pub fn exit(timing: &mut AttackTiming, victim: EntityId) -> bool {
    let before = timing.contacts.len();
    timing.contacts.retain(|c| *c != victim);
    timing.contacts.len() != before
}
