//! Simulation snapshot: the complete observable state after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::CombatEvent;
use crate::types::{EntityId, Position, SimTime, Velocity};

/// State broadcast to collaborators after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub time: SimTime,
    /// One view per registered entity, ordered by id.
    pub entities: Vec<EntityView>,
    /// Events published since the previous snapshot, in delivery order.
    pub events: Vec<CombatEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub label: String,
    pub role: Role,
    pub active: bool,
    pub position: Position,
    pub velocity: Velocity,
    pub yaw: f64,
    pub health: Option<HealthView>,
    pub attack: Option<AttackView>,
    /// Present for chasers only.
    pub follow_state: Option<FollowState>,
    pub motion: MotionMode,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HealthView {
    pub current: f64,
    pub max: f64,
    pub state: LifeState,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AttackView {
    pub phase: AttackPhase,
    pub cooldown_remaining: f64,
    pub hitbox: HitboxState,
}

impl SimSnapshot {
    pub fn entity(&self, id: EntityId) -> Option<&EntityView> {
        self.entities.iter().find(|view| view.id == id)
    }
}
