//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{EntityId, MoveInput};

/// Links a hecs entity back to its registry identity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Identity {
    pub id: EntityId,
    pub role: Role,
}

/// Mortality record. `current` stays within `[0, max]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
    pub state: LifeState,
}

/// Attached on death; the cleanup system despawns the entity once the
/// grace period has passed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Corpse {
    pub died_at_secs: f64,
}

/// Per-attacker cooldown and hitbox window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttackTiming {
    pub phase: AttackPhase,
    /// Seconds until the next attack is allowed (0 when idle).
    pub cooldown_remaining: f64,
    /// Cooldown started by each trigger.
    pub cooldown_duration: f64,
    pub hitbox: HitboxState,
    /// Set between attack start and attack end.
    pub swing_in_progress: bool,
    /// Damage dealt to each victim per overlap-enter.
    pub damage_amount: f64,
    /// Victims already hit during the current window.
    pub contacts: Vec<EntityId>,
}

/// Movement tunables shared by chasers and the player motor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveTuning {
    pub move_speed: f64,
    pub acceleration: f64,
    pub deceleration: f64,
    /// Yaw smoothing rate (per second).
    pub rotation_speed: f64,
    pub detection_range: f64,
    pub stop_distance: f64,
}

/// Facing about the vertical axis, radians. 0 faces +z.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub yaw: f64,
}

/// Proximity-driven pursuit state of a chaser.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ChaseState {
    pub follow: FollowState,
    pub mode: MotionMode,
    /// Explicit target; `None` tracks the registry's current player.
    pub target: Option<EntityId>,
    /// Distance measured on the last fixed tick (`None` if no target).
    pub last_distance: Option<f64>,
}

/// Input-driven movement of the controlled agent.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerMotor {
    pub input: MoveInput,
    pub mode: MotionMode,
}

/// Attack slow-down bookkeeping for the controlled agent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpeedModulation {
    /// Multiplier in (0, 1].
    pub factor: f64,
    pub reduced: bool,
    /// Speeds captured when the reduction was applied.
    pub base_move_speed: f64,
    pub base_rotation_speed: f64,
}
