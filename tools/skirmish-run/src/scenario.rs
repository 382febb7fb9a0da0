//! Scenario files for the headless runner.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use skirmish_core::commands::SimCommand;
use skirmish_core::config::SpawnConfig;
use skirmish_core::types::MoveInput;

/// A scripted fight: one player, a ring of enemies, and a timeline.
///
/// `player` and `enemy` are partial spawn configs layered over the stock
/// tunables, so a scenario only has to name what it changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub seed: u64,
    pub ticks: u64,
    pub grace_period_secs: f64,
    pub player: serde_json::Value,
    pub enemy: serde_json::Value,
    pub enemy_count: usize,
    pub ring_inner_radius: f64,
    pub ring_outer_radius: f64,
    /// Held for the whole run.
    pub player_input: MoveInput,
    /// Hurt-volumes within this distance of an open hitbox are hit.
    pub melee_reach: f64,
    /// Let enemies in stopping range swing back at the player.
    pub enemies_attack: bool,
    pub attacks: Vec<ScriptedAttack>,
    pub commands: Vec<TimedCommand>,
}

/// A player swing: trigger at `at_tick`, hitbox open for `swing_ticks`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScriptedAttack {
    pub at_tick: u64,
    #[serde(default = "default_swing_ticks")]
    pub swing_ticks: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimedCommand {
    pub at_tick: u64,
    pub command: SimCommand,
}

fn default_swing_ticks() -> u64 {
    10
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ticks: 500,
            grace_period_secs: skirmish_core::constants::DEATH_GRACE_SECS,
            player: serde_json::Value::Null,
            enemy: serde_json::Value::Null,
            enemy_count: 4,
            ring_inner_radius: 3.0,
            ring_outer_radius: 8.0,
            player_input: MoveInput::default(),
            melee_reach: 2.0,
            enemies_attack: true,
            attacks: (0..8)
                .map(|i| ScriptedAttack {
                    at_tick: 100 + i * 40,
                    swing_ticks: default_swing_ticks(),
                })
                .collect(),
            commands: Vec::new(),
        }
    }
}

impl ScenarioConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }

    pub fn player_config(&self) -> Result<SpawnConfig> {
        Ok(SpawnConfig::with_overrides(SpawnConfig::player("Player"), &self.player)?)
    }

    pub fn enemy_config(&self) -> Result<SpawnConfig> {
        Ok(SpawnConfig::with_overrides(SpawnConfig::enemy("Enemy"), &self.enemy)?)
    }
}
