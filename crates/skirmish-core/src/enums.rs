//! Enumeration types used throughout the simulation.
//!
//! Every subsystem state machine is an explicit enum here; "enabled" or
//! "disabled" views elsewhere are derived from these.

use serde::{Deserialize, Serialize};

/// Which side an agent fights for. Hitboxes only hurt the other side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// The controlled agent.
    Player,
    /// An autonomous chaser.
    #[default]
    Enemy,
}

/// Mortality state. `Dead` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeState {
    #[default]
    Alive,
    Dead,
}

/// Attack gating state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackPhase {
    /// Ready to attack.
    #[default]
    Idle,
    /// Waiting for the cooldown to run out.
    OnCooldown,
}

/// Damage window of an attacker's hitbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitboxState {
    #[default]
    Closed,
    Open,
}

/// Chaser behaviour derived from distance to its target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FollowState {
    /// Target out of detection range or unavailable.
    #[default]
    Idle,
    /// Closing in on the target.
    Following,
    /// Inside stop distance, braking.
    Stopping,
}

/// Whether a movement controller still produces updates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionMode {
    #[default]
    Running,
    /// Owner died; no further velocity, orientation or position updates.
    Frozen,
}

/// Event bus topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    Damaged,
    Died,
    AttackStarted,
    AttackEnded,
    HitboxActivated,
    HitboxDeactivated,
}

impl Topic {
    pub const ALL: [Topic; 6] = [
        Topic::Damaged,
        Topic::Died,
        Topic::AttackStarted,
        Topic::AttackEnded,
        Topic::HitboxActivated,
        Topic::HitboxDeactivated,
    ];
}

/// Movement tunables that can be changed at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TuningParam {
    MoveSpeed,
    DetectionRange,
    StopDistance,
    RotationSpeed,
    Acceleration,
    Deceleration,
}
