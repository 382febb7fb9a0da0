//! Results of tolerant simulation operations.
//!
//! Each enum separates the state change that happened from the expected
//! no-op cases, so callers can tell them apart without an error path.

use serde::{Deserialize, Serialize};

/// Result of applying damage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DamageOutcome {
    /// Amount was not a positive number.
    Rejected,
    /// Target was already dead.
    AlreadyDead,
    /// Health dropped and the target survived.
    Damaged { remaining: f64 },
    /// Health reached zero on this hit.
    Killed,
}

/// Result of healing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HealOutcome {
    Rejected,
    Dead,
    Healed { current: f64 },
}

/// Result of changing maximum health.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MaxHealthOutcome {
    Rejected,
    /// Current health was reset to the new maximum.
    Reset { current: f64 },
    /// Maximum updated, but the entity stays dead at zero health.
    DeadUnchanged,
}

/// Result of an attack trigger or animation-start hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackOutcome {
    /// `AttackStarted` was published.
    Started,
    /// Blocked by the cooldown.
    OnCooldown,
    /// A swing is already in progress.
    AlreadyInProgress,
    Dead,
    Inactive,
}

/// Result of opening or closing a hitbox window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitboxOutcome {
    Opened,
    Closed,
    /// Window was already in the requested state.
    Unchanged,
    /// Dead attackers cannot open a window.
    Dead,
}

/// Result of an overlap-enter notification from the collision layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ContactOutcome {
    /// First contact for this window; damage was applied.
    Hit(DamageOutcome),
    /// The pair is already in contact during this window.
    Duplicate,
    /// The attacker's hitbox is closed.
    WindowClosed,
    /// Attacker and victim are on the same side, or are the same entity.
    SameSide,
    /// Attacker or victim is dead or inactive.
    Ignored,
}
