//! skirmish-run: headless scenario runner.
//!
//! Spawns a player and a seeded ring of enemies, plays a scripted attack
//! timeline against them and logs every event the simulation publishes.
//! The runner also stands in for the collision layer: an open hitbox hits
//! every opposing hurt-volume within `melee_reach`.
//!
//! Usage:
//!   skirmish-run [SCENARIO.json] [--ticks N] [--seed N] [--json] [--verbose]

mod logging;
mod scenario;

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{debug, info};

use skirmish_core::constants::DT;
use skirmish_core::enums::{FollowState, LifeState, Role};
use skirmish_core::events::CombatEvent;
use skirmish_core::outcomes::AttackOutcome;
use skirmish_core::state::SimSnapshot;
use skirmish_core::types::EntityId;
use skirmish_sim::{SimConfig, SimulationEngine};

use scenario::ScenarioConfig;

/// Run a combat scenario without a renderer.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario file (JSON). Uses the built-in demo when omitted.
    scenario: Option<PathBuf>,

    /// Override the number of ticks to run
    #[arg(long)]
    ticks: Option<u64>,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the final snapshot as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let mut scenario = match &args.scenario {
        Some(path) => ScenarioConfig::load(path)?,
        None => ScenarioConfig::default(),
    };
    if let Some(ticks) = args.ticks {
        scenario.ticks = ticks;
    }
    if let Some(seed) = args.seed {
        scenario.seed = seed;
    }

    let last = run(&scenario)?;
    summarize(&last);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&last)?);
    }
    Ok(())
}

fn run(scenario: &ScenarioConfig) -> Result<SimSnapshot> {
    let mut engine = SimulationEngine::new(SimConfig {
        seed: scenario.seed,
        grace_period_secs: scenario.grace_period_secs,
    });

    let player = engine.spawn(&scenario.player_config()?)?;
    let enemies = engine.spawn_enemy_ring(
        &scenario.enemy_config()?,
        scenario.enemy_count,
        scenario.ring_inner_radius,
        scenario.ring_outer_radius,
    )?;
    engine.set_move_input(player, scenario.player_input)?;
    info!(
        "scenario: seed {}, {} enemies, {} ticks",
        scenario.seed,
        enemies.len(),
        scenario.ticks
    );

    // Swing end tick per attacker.
    let mut swings: HashMap<EntityId, u64> = HashMap::new();
    let mut last = engine.snapshot();

    for tick in 0..scenario.ticks {
        engine.queue_commands(
            scenario
                .commands
                .iter()
                .filter(|c| c.at_tick == tick)
                .map(|c| c.command.clone()),
        );

        finish_swings(&mut engine, &mut swings, tick)?;

        for attack in scenario.attacks.iter().filter(|a| a.at_tick == tick) {
            if engine.registry().contains(player) {
                swing(&mut engine, &mut swings, player, tick + attack.swing_ticks, scenario.melee_reach)?;
            }
        }

        if scenario.enemies_attack {
            for &enemy in &enemies {
                let in_range = engine.registry().contains(enemy)
                    && engine.follow_state(enemy)? == FollowState::Stopping
                    && !swings.contains_key(&enemy);
                if in_range {
                    swing(&mut engine, &mut swings, enemy, tick + 5, scenario.melee_reach)?;
                }
            }
        }

        let snapshot = engine.tick();
        engine.frame(DT);
        for event in &snapshot.events {
            log_event(&snapshot, event);
        }
        last = snapshot;
    }

    Ok(last)
}

/// Trigger an attack and, if it starts, open the hitbox and hit everything
/// in reach.
fn swing(
    engine: &mut SimulationEngine,
    swings: &mut HashMap<EntityId, u64>,
    attacker: EntityId,
    until_tick: u64,
    reach: f64,
) -> Result<()> {
    if engine.trigger_attack(attacker)? != AttackOutcome::Started {
        return Ok(());
    }
    engine.activate_hitbox(attacker)?;
    swings.insert(attacker, until_tick);

    let origin = engine.position(attacker)?;
    let victims: Vec<EntityId> = engine.registry().ids().filter(|id| *id != attacker).collect();
    for victim in victims {
        if engine.position(victim)?.distance_to(&origin) <= reach {
            let outcome = engine.hitbox_overlap_enter(attacker, victim)?;
            debug!("{attacker} -> {victim}: {outcome:?}");
        }
    }
    Ok(())
}

fn finish_swings(engine: &mut SimulationEngine, swings: &mut HashMap<EntityId, u64>, tick: u64) -> Result<()> {
    let done: Vec<EntityId> = swings
        .iter()
        .filter(|(_, until)| **until <= tick)
        .map(|(id, _)| *id)
        .collect();
    for attacker in done {
        swings.remove(&attacker);
        if engine.registry().contains(attacker) {
            engine.on_attack_animation_end(attacker)?;
        }
    }
    Ok(())
}

fn log_event(snapshot: &SimSnapshot, event: &CombatEvent) {
    let label = snapshot
        .entity(event.entity())
        .map(|view| view.label.as_str())
        .unwrap_or("?");
    info!(
        "[{:>6.2}s] {} ({}) {:?}",
        snapshot.time.elapsed_secs,
        event.entity(),
        label,
        event.topic()
    );
    if let CombatEvent::Damaged { amount, remaining, .. } = event {
        debug!("    -{amount} hp, {remaining} left");
    }
}

fn summarize(snapshot: &SimSnapshot) {
    let alive = |role: Role| {
        snapshot
            .entities
            .iter()
            .filter(|view| view.role == role)
            .filter(|view| view.health.is_some_and(|h| h.state == LifeState::Alive))
            .count()
    };
    info!(
        "finished at tick {} ({:.2}s): {} player(s) and {} enemies alive, {} entities registered",
        snapshot.time.tick,
        snapshot.time.elapsed_secs,
        alive(Role::Player),
        alive(Role::Enemy),
        snapshot.entities.len()
    );
}
