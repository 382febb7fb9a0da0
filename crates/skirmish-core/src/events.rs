//! Notifications published on the event bus.

use serde::{Deserialize, Serialize};

use crate::enums::Topic;
use crate::types::EntityId;

/// An immutable, fire-and-forget combat notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// Health was reduced.
    Damaged {
        entity: EntityId,
        amount: f64,
        /// Health left after the hit.
        remaining: f64,
    },
    /// Health reached zero. Published at most once per entity.
    Died { entity: EntityId },
    /// An attack swing began.
    AttackStarted { entity: EntityId },
    /// An attack swing finished.
    AttackEnded { entity: EntityId },
    /// The attacker's damage window opened.
    HitboxActivated { entity: EntityId },
    /// The attacker's damage window closed.
    HitboxDeactivated { entity: EntityId },
}

impl CombatEvent {
    pub fn topic(&self) -> Topic {
        match self {
            CombatEvent::Damaged { .. } => Topic::Damaged,
            CombatEvent::Died { .. } => Topic::Died,
            CombatEvent::AttackStarted { .. } => Topic::AttackStarted,
            CombatEvent::AttackEnded { .. } => Topic::AttackEnded,
            CombatEvent::HitboxActivated { .. } => Topic::HitboxActivated,
            CombatEvent::HitboxDeactivated { .. } => Topic::HitboxDeactivated,
        }
    }

    /// The entity the event is about.
    pub fn entity(&self) -> EntityId {
        match *self {
            CombatEvent::Damaged { entity, .. }
            | CombatEvent::Died { entity }
            | CombatEvent::AttackStarted { entity }
            | CombatEvent::AttackEnded { entity }
            | CombatEvent::HitboxActivated { entity }
            | CombatEvent::HitboxDeactivated { entity } => entity,
        }
    }
}
