//! Spawn-time configuration for agents.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::Role;
use crate::error::SimError;
use crate::types::Position;

/// Everything needed to spawn one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub label: String,
    pub role: Role,
    pub position: Position,
    /// Must be > 0.
    pub max_health: f64,
    /// Damage this agent's hitbox deals per overlap-enter.
    pub damage_amount: f64,
    pub move_speed: f64,
    pub detection_range: f64,
    /// Must not exceed `detection_range`.
    pub stop_distance: f64,
    pub rotation_speed: f64,
    pub acceleration: f64,
    pub deceleration: f64,
    /// Must be > 0.
    pub attack_cooldown_duration: f64,
    /// In (0, 1]. Only used for the player.
    pub attack_speed_reduction_factor: f64,
}

/// A field that `sanitized` had to change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfigAdjustment {
    pub field: &'static str,
    pub from: f64,
    pub to: f64,
}

impl fmt::Display for ConfigAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} adjusted from {} to {}", self.field, self.from, self.to)
    }
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self::enemy("Enemy")
    }
}

impl SpawnConfig {
    /// Chaser with the stock enemy tunables.
    pub fn enemy(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            role: Role::Enemy,
            position: Position::default(),
            max_health: DEFAULT_MAX_HEALTH,
            damage_amount: DEFAULT_DAMAGE_AMOUNT,
            move_speed: ENEMY_MOVE_SPEED,
            detection_range: ENEMY_DETECTION_RANGE,
            stop_distance: ENEMY_STOP_DISTANCE,
            rotation_speed: ENEMY_ROTATION_SPEED,
            acceleration: ENEMY_ACCELERATION,
            deceleration: ENEMY_DECELERATION,
            attack_cooldown_duration: DEFAULT_ATTACK_COOLDOWN_SECS,
            attack_speed_reduction_factor: DEFAULT_ATTACK_SPEED_REDUCTION,
        }
    }

    /// Controlled agent with the stock player tunables.
    pub fn player(label: impl Into<String>) -> Self {
        Self {
            role: Role::Player,
            move_speed: PLAYER_MOVE_SPEED,
            rotation_speed: PLAYER_ROTATION_SPEED,
            acceleration: PLAYER_ACCELERATION,
            deceleration: PLAYER_DECELERATION,
            ..Self::enemy(label)
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Layer a partial JSON object over `base`. Fields missing from
    /// `overrides` keep the base value.
    pub fn with_overrides(base: SpawnConfig, overrides: &serde_json::Value) -> Result<Self, SimError> {
        let mut merged = serde_json::to_value(&base).map_err(|e| SimError::InvalidConfig(e.to_string()))?;
        match (merged.as_object_mut(), overrides) {
            (Some(target), serde_json::Value::Object(fields)) => {
                for (key, value) in fields {
                    target.insert(key.clone(), value.clone());
                }
            }
            (_, serde_json::Value::Null) => {}
            _ => {
                return Err(SimError::InvalidConfig(
                    "spawn overrides must be a JSON object".to_string(),
                ))
            }
        }
        serde_json::from_value(merged).map_err(|e| SimError::InvalidConfig(e.to_string()))
    }

    /// Clamp malformed values into range, reporting every change.
    ///
    /// Non-positive `max_health` or cooldown fall back to the defaults,
    /// negative or non-finite tunables become 0, `stop_distance` is capped at
    /// `detection_range`, and the reduction factor is kept within (0, 1].
    pub fn sanitized(&self) -> (SpawnConfig, Vec<ConfigAdjustment>) {
        let mut cfg = self.clone();
        let mut adjustments = Vec::new();

        let mut fix = |field: &'static str, value: &mut f64, to: f64| {
            adjustments.push(ConfigAdjustment {
                field,
                from: *value,
                to,
            });
            *value = to;
        };

        if !(cfg.max_health > 0.0 && cfg.max_health.is_finite()) {
            fix("max_health", &mut cfg.max_health, DEFAULT_MAX_HEALTH);
        }
        if !(cfg.attack_cooldown_duration > 0.0 && cfg.attack_cooldown_duration.is_finite()) {
            fix(
                "attack_cooldown_duration",
                &mut cfg.attack_cooldown_duration,
                DEFAULT_ATTACK_COOLDOWN_SECS,
            );
        }

        for (field, value) in [
            ("damage_amount", &mut cfg.damage_amount),
            ("move_speed", &mut cfg.move_speed),
            ("detection_range", &mut cfg.detection_range),
            ("stop_distance", &mut cfg.stop_distance),
            ("rotation_speed", &mut cfg.rotation_speed),
            ("acceleration", &mut cfg.acceleration),
            ("deceleration", &mut cfg.deceleration),
        ] {
            if !(*value >= 0.0 && value.is_finite()) {
                fix(field, value, 0.0);
            }
        }

        if cfg.stop_distance > cfg.detection_range {
            let to = cfg.detection_range;
            fix("stop_distance", &mut cfg.stop_distance, to);
        }

        let factor = cfg.attack_speed_reduction_factor;
        if !(factor > 0.0 && factor.is_finite()) {
            fix(
                "attack_speed_reduction_factor",
                &mut cfg.attack_speed_reduction_factor,
                DEFAULT_ATTACK_SPEED_REDUCTION,
            );
        } else if factor > 1.0 {
            fix("attack_speed_reduction_factor", &mut cfg.attack_speed_reduction_factor, 1.0);
        }

        (cfg, adjustments)
    }
}
