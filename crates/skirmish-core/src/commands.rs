//! Commands sent by the surrounding application to the simulation.
//!
//! Commands are queued and applied at the next tick boundary, before any
//! system runs.

use serde::{Deserialize, Serialize};

use crate::enums::TuningParam;
use crate::types::{EntityId, MoveInput, Position};

/// All external mutations the simulation accepts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    // --- Health ---
    ApplyDamage { entity: EntityId, amount: f64 },
    Heal { entity: EntityId, amount: f64 },
    SetMaxHealth { entity: EntityId, value: f64 },
    SetDamageAmount { entity: EntityId, value: f64 },

    // --- Attack hooks ---
    TriggerAttack { entity: EntityId },
    ActivateHitbox { entity: EntityId },
    DeactivateHitbox { entity: EntityId },
    AttackAnimationStart { entity: EntityId },
    AttackAnimationEnd { entity: EntityId },
    SetAttackCooldown { entity: EntityId, secs: f64 },
    SetAttackSpeedReduction { entity: EntityId, factor: f64 },

    // --- Collision layer ---
    /// An open hitbox started overlapping a hurt-volume.
    OverlapEnter { attacker: EntityId, victim: EntityId },
    /// The overlap ended.
    OverlapExit { attacker: EntityId, victim: EntityId },

    // --- Movement ---
    SetMoveInput { entity: EntityId, input: MoveInput },
    SetTuning {
        entity: EntityId,
        param: TuningParam,
        value: f64,
    },
    SetPosition { entity: EntityId, position: Position },
    /// Point a chaser at a specific target (`None` follows the player).
    SetChaseTarget {
        entity: EntityId,
        target: Option<EntityId>,
    },

    // --- Lifecycle ---
    SetActive { entity: EntityId, active: bool },
    Reset { entity: EntityId },
    Despawn { entity: EntityId },
}
