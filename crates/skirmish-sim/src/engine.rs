//! Simulation engine: the entry point for the surrounding application.
//!
//! `SimulationEngine` owns the simulation context (ECS world, entity
//! registry, clock) and the event bus. It exposes every health, attack and
//! movement entry point, queues `SimCommand`s for the next tick boundary,
//! runs the systems at a fixed rate and produces `SimSnapshot`s. Completely
//! headless, enabling deterministic testing.

use std::collections::{HashMap, VecDeque};

use hecs::Component;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::commands::SimCommand;
use skirmish_core::components::*;
use skirmish_core::config::SpawnConfig;
use skirmish_core::constants::{DEATH_GRACE_SECS, DT};
use skirmish_core::enums::{
    AttackPhase, FollowState, HitboxState, LifeState, MotionMode, Role, Topic, TuningParam,
};
use skirmish_core::error::{SimError, SimResult};
use skirmish_core::events::CombatEvent;
use skirmish_core::outcomes::*;
use skirmish_core::state::{EntityView, SimSnapshot};
use skirmish_core::types::{EntityId, MoveInput, Position, SimTime, Velocity};

use crate::bus::{EventBus, HandlerCx, Subscription};
use crate::context::SimContext;
use crate::registry::EntityRegistry;
use crate::systems::{self, attack, contact, health, speed};
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Seconds a dead entity lingers before it is despawned.
    pub grace_period_secs: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            grace_period_secs: DEATH_GRACE_SECS,
        }
    }
}

/// The simulation engine. Owns the context, the bus and all per-entity
/// subscription tokens.
pub struct SimulationEngine {
    ctx: SimContext,
    bus: EventBus,
    config: SimConfig,
    rng: ChaCha8Rng,
    command_queue: VecDeque<SimCommand>,
    despawn_buffer: Vec<EntityId>,
    subscriptions: HashMap<EntityId, Vec<Subscription>>,
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        Self {
            ctx: SimContext::new(),
            bus: EventBus::new(),
            config,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            subscriptions: HashMap::new(),
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    pub fn spawn(&mut self, config: &SpawnConfig) -> SimResult<EntityId> {
        let (id, subscriptions) = world_setup::spawn_agent(&mut self.ctx, &mut self.bus, config)?;
        self.subscriptions.insert(id, subscriptions);
        Ok(id)
    }

    /// Spawn a ring of enemies around the player (or the origin when there
    /// is no player) using the engine's seeded RNG.
    pub fn spawn_enemy_ring(
        &mut self,
        template: &SpawnConfig,
        count: usize,
        inner_radius: f64,
        outer_radius: f64,
    ) -> SimResult<Vec<EntityId>> {
        let center = match self.ctx.registry.player() {
            Some(player) => self.position(player)?,
            None => Position::default(),
        };
        let spawned = world_setup::spawn_enemy_ring(
            &mut self.ctx,
            &mut self.bus,
            &mut self.rng,
            template,
            count,
            center,
            inner_radius,
            outer_radius,
        )?;
        Ok(spawned
            .into_iter()
            .map(|(id, subscriptions)| {
                self.subscriptions.insert(id, subscriptions);
                id
            })
            .collect())
    }

    /// Remove an entity immediately. Its subscriptions are released and its
    /// id is retired.
    pub fn despawn(&mut self, id: EntityId) -> SimResult<()> {
        let handle = self.ctx.registry.release(id)?;
        if self.ctx.world.despawn(handle).is_err() {
            warn!("{id} was registered but missing from the world");
        }
        self.subscriptions.remove(&id);
        self.bus.collect_released();
        info!("despawned {id}");
        Ok(())
    }

    /// Returns the previous flag. Inactive entities neither move nor take
    /// hits.
    pub fn set_active(&mut self, id: EntityId, active: bool) -> SimResult<bool> {
        let previous = self.ctx.registry.set_active(id, active)?;
        if previous != active {
            debug!("{id} active = {active}");
        }
        Ok(previous)
    }

    /// Restore a live entity to full health and re-activate it. Returns
    /// false for a dead entity, which stays dead.
    pub fn reset(&mut self, id: EntityId) -> SimResult<bool> {
        let revived = self.with_component::<Health, _>(id, "Health", |h| {
            if h.state == LifeState::Dead {
                return false;
            }
            h.current = h.max;
            true
        })?;
        if revived {
            self.ctx.registry.set_active(id, true)?;
        }
        Ok(revived)
    }

    // ------------------------------------------------------------------
    // Health
    // ------------------------------------------------------------------

    /// Publishes `Damaged` for every accepted hit, then `Died` on the hit
    /// that empties the pool.
    pub fn apply_damage(&mut self, id: EntityId, amount: f64) -> SimResult<DamageOutcome> {
        let outcome = self.with_component::<Health, _>(id, "Health", |h| health::apply_damage(h, amount))?;

        match outcome {
            DamageOutcome::Damaged { remaining } => {
                self.publish(CombatEvent::Damaged {
                    entity: id,
                    amount,
                    remaining,
                });
            }
            DamageOutcome::Killed => {
                self.publish(CombatEvent::Damaged {
                    entity: id,
                    amount,
                    remaining: 0.0,
                });
                let handle = self.ctx.registry.resolve(id)?;
                let died_at_secs = self.ctx.time.elapsed_secs;
                self.ctx
                    .world
                    .insert_one(handle, Corpse { died_at_secs })
                    .map_err(|_| SimError::EntityNotFound(id))?;
                self.publish(CombatEvent::Died { entity: id });
            }
            DamageOutcome::Rejected | DamageOutcome::AlreadyDead => {
                debug!("damage {amount} on {id} ignored: {outcome:?}");
            }
        }
        Ok(outcome)
    }

    pub fn heal(&mut self, id: EntityId, amount: f64) -> SimResult<HealOutcome> {
        self.with_component::<Health, _>(id, "Health", |h| health::heal(h, amount))
    }

    /// Sets the maximum and refills to it. A dead entity keeps zero health.
    pub fn set_max_health(&mut self, id: EntityId, value: f64) -> SimResult<MaxHealthOutcome> {
        self.with_component::<Health, _>(id, "Health", |h| health::set_max(h, value))
    }

    /// Returns false (and changes nothing) for a negative or non-finite value.
    pub fn set_damage_amount(&mut self, id: EntityId, value: f64) -> SimResult<bool> {
        self.with_component::<AttackTiming, _>(id, "AttackTiming", |t| {
            if !(value >= 0.0 && value.is_finite()) {
                return false;
            }
            t.damage_amount = value;
            true
        })
    }

    pub fn current_health(&self, id: EntityId) -> SimResult<f64> {
        self.read_component::<Health, _>(id, "Health", |h| h.current)
    }

    pub fn max_health(&self, id: EntityId) -> SimResult<f64> {
        self.read_component::<Health, _>(id, "Health", |h| h.max)
    }

    pub fn health_fraction(&self, id: EntityId) -> SimResult<f64> {
        self.read_component::<Health, _>(id, "Health", health::fraction)
    }

    pub fn is_alive(&self, id: EntityId) -> SimResult<bool> {
        self.read_component::<Health, _>(id, "Health", |h| h.state == LifeState::Alive)
    }

    // ------------------------------------------------------------------
    // Attack timing
    // ------------------------------------------------------------------

    /// Start an attack if the cooldown allows it.
    pub fn trigger_attack(&mut self, id: EntityId) -> SimResult<AttackOutcome> {
        if let Some(blocked) = self.attack_blocked(id)? {
            return Ok(blocked);
        }
        if !self.with_component::<AttackTiming, _>(id, "AttackTiming", attack::trigger)? {
            return Ok(AttackOutcome::OnCooldown);
        }
        self.publish(CombatEvent::AttackStarted { entity: id });
        Ok(AttackOutcome::Started)
    }

    /// Animation-boundary hook: the swing began. Does not touch the cooldown.
    pub fn on_attack_animation_start(&mut self, id: EntityId) -> SimResult<AttackOutcome> {
        if let Some(blocked) = self.attack_blocked(id)? {
            return Ok(blocked);
        }
        if !self.with_component::<AttackTiming, _>(id, "AttackTiming", attack::begin_swing)? {
            return Ok(AttackOutcome::AlreadyInProgress);
        }
        self.publish(CombatEvent::AttackStarted { entity: id });
        Ok(AttackOutcome::Started)
    }

    /// Animation-boundary hook: the swing ended. Always publishes
    /// `AttackEnded`, then force-closes the hitbox in case the deactivate
    /// hook was skipped.
    pub fn on_attack_animation_end(&mut self, id: EntityId) -> SimResult<HitboxOutcome> {
        self.with_component::<AttackTiming, _>(id, "AttackTiming", attack::end_swing)?;
        self.publish(CombatEvent::AttackEnded { entity: id });
        self.deactivate_hitbox(id)
    }

    pub fn activate_hitbox(&mut self, id: EntityId) -> SimResult<HitboxOutcome> {
        if !self.is_alive(id)? {
            return Ok(HitboxOutcome::Dead);
        }
        if !self.with_component::<AttackTiming, _>(id, "AttackTiming", attack::open_hitbox)? {
            return Ok(HitboxOutcome::Unchanged);
        }
        self.publish(CombatEvent::HitboxActivated { entity: id });
        Ok(HitboxOutcome::Opened)
    }

    pub fn deactivate_hitbox(&mut self, id: EntityId) -> SimResult<HitboxOutcome> {
        if !self.with_component::<AttackTiming, _>(id, "AttackTiming", attack::close_hitbox)? {
            return Ok(HitboxOutcome::Unchanged);
        }
        self.publish(CombatEvent::HitboxDeactivated { entity: id });
        Ok(HitboxOutcome::Closed)
    }

    /// Returns false (and changes nothing) unless `secs` is positive and
    /// finite. A running cooldown is cut short to the new duration.
    pub fn set_attack_cooldown(&mut self, id: EntityId, secs: f64) -> SimResult<bool> {
        self.with_component::<AttackTiming, _>(id, "AttackTiming", |t| {
            if !(secs > 0.0 && secs.is_finite()) {
                return false;
            }
            attack::set_duration(t, secs);
            true
        })
    }

    /// True while the cooldown is running.
    pub fn is_attacking(&self, id: EntityId) -> SimResult<bool> {
        self.read_component::<AttackTiming, _>(id, "AttackTiming", |t| {
            t.phase == AttackPhase::OnCooldown
        })
    }

    pub fn cooldown_remaining(&self, id: EntityId) -> SimResult<f64> {
        self.read_component::<AttackTiming, _>(id, "AttackTiming", |t| t.cooldown_remaining)
    }

    /// 0 right after a trigger, 1 when ready.
    pub fn cooldown_progress(&self, id: EntityId) -> SimResult<f64> {
        self.read_component::<AttackTiming, _>(id, "AttackTiming", attack::cooldown_progress)
    }

    pub fn is_hitbox_active(&self, id: EntityId) -> SimResult<bool> {
        self.read_component::<AttackTiming, _>(id, "AttackTiming", |t| {
            t.hitbox == HitboxState::Open
        })
    }

    fn attack_blocked(&self, id: EntityId) -> SimResult<Option<AttackOutcome>> {
        if !self.is_alive(id)? {
            return Ok(Some(AttackOutcome::Dead));
        }
        if !self.ctx.registry.is_active(id) {
            return Ok(Some(AttackOutcome::Inactive));
        }
        Ok(None)
    }

    // ------------------------------------------------------------------
    // Collision layer
    // ------------------------------------------------------------------

    /// `attacker`'s open hitbox started overlapping `victim`'s hurt-volume.
    /// Deals the attacker's damage at most once per pair per window.
    pub fn hitbox_overlap_enter(&mut self, attacker: EntityId, victim: EntityId) -> SimResult<ContactOutcome> {
        let attacker_role = self.role(attacker)?;
        let victim_role = self.role(victim)?;
        if attacker == victim || attacker_role == victim_role {
            return Ok(ContactOutcome::SameSide);
        }
        if !self.is_alive(attacker)?
            || !self.ctx.registry.is_active(attacker)
            || !self.ctx.registry.is_active(victim)
        {
            return Ok(ContactOutcome::Ignored);
        }

        let (check, damage) = self.with_component::<AttackTiming, _>(attacker, "AttackTiming", |t| {
            (contact::enter(t, victim), t.damage_amount)
        })?;
        match check {
            contact::ContactCheck::WindowClosed => Ok(ContactOutcome::WindowClosed),
            contact::ContactCheck::Duplicate => Ok(ContactOutcome::Duplicate),
            contact::ContactCheck::Fresh => {
                debug!("{attacker} hit {victim} for {damage}");
                Ok(ContactOutcome::Hit(self.apply_damage(victim, damage)?))
            }
        }
    }

    /// Returns true if the pair was in contact.
    pub fn hitbox_overlap_exit(&mut self, attacker: EntityId, victim: EntityId) -> SimResult<bool> {
        self.with_component::<AttackTiming, _>(attacker, "AttackTiming", |t| contact::exit(t, victim))
    }

    // ------------------------------------------------------------------
    // Movement
    // ------------------------------------------------------------------

    /// Negative or non-finite values are clamped to 0. `stop_distance` never
    /// exceeds `detection_range`; lowering the range drags it down too.
    /// Speed writes on a slowed player update the pre-reduction base.
    pub fn set_tuning(&mut self, id: EntityId, param: TuningParam, value: f64) -> SimResult<()> {
        let value = if value >= 0.0 && value.is_finite() {
            value
        } else {
            warn!("{id} {param:?} = {value} clamped to 0");
            0.0
        };

        let handle = self.ctx.registry.resolve(id)?;
        let (tuning, modulation) = self
            .ctx
            .world
            .query_one_mut::<(&mut MoveTuning, Option<&mut SpeedModulation>)>(handle)
            .map_err(|_| SimError::MissingComponent {
                entity: id,
                component: "MoveTuning",
            })?;

        match (param, modulation) {
            (TuningParam::MoveSpeed, Some(m)) => speed::set_base_move_speed(m, tuning, value),
            (TuningParam::MoveSpeed, None) => tuning.move_speed = value,
            (TuningParam::RotationSpeed, Some(m)) => speed::set_base_rotation_speed(m, tuning, value),
            (TuningParam::RotationSpeed, None) => tuning.rotation_speed = value,
            (TuningParam::Acceleration, _) => tuning.acceleration = value,
            (TuningParam::Deceleration, _) => tuning.deceleration = value,
            (TuningParam::DetectionRange, _) => {
                tuning.detection_range = value;
                if tuning.stop_distance > value {
                    warn!("{id} stop distance {} lowered to detection range {value}", tuning.stop_distance);
                    tuning.stop_distance = value;
                }
            }
            (TuningParam::StopDistance, _) => {
                if value > tuning.detection_range {
                    warn!(
                        "{id} stop distance {value} clamped to detection range {}",
                        tuning.detection_range
                    );
                }
                tuning.stop_distance = value.min(tuning.detection_range);
            }
        }
        Ok(())
    }

    pub fn set_move_speed(&mut self, id: EntityId, value: f64) -> SimResult<()> {
        self.set_tuning(id, TuningParam::MoveSpeed, value)
    }

    pub fn set_detection_range(&mut self, id: EntityId, value: f64) -> SimResult<()> {
        self.set_tuning(id, TuningParam::DetectionRange, value)
    }

    pub fn set_stop_distance(&mut self, id: EntityId, value: f64) -> SimResult<()> {
        self.set_tuning(id, TuningParam::StopDistance, value)
    }

    pub fn set_rotation_speed(&mut self, id: EntityId, value: f64) -> SimResult<()> {
        self.set_tuning(id, TuningParam::RotationSpeed, value)
    }

    pub fn set_acceleration(&mut self, id: EntityId, value: f64) -> SimResult<()> {
        self.set_tuning(id, TuningParam::Acceleration, value)
    }

    pub fn set_deceleration(&mut self, id: EntityId, value: f64) -> SimResult<()> {
        self.set_tuning(id, TuningParam::Deceleration, value)
    }

    /// Effective tunables, including any active speed reduction.
    pub fn tuning(&self, id: EntityId) -> SimResult<MoveTuning> {
        self.read_component::<MoveTuning, _>(id, "MoveTuning", |t| *t)
    }

    /// Returns false if the motor is frozen; the input is dropped.
    pub fn set_move_input(&mut self, id: EntityId, input: MoveInput) -> SimResult<bool> {
        self.with_component::<PlayerMotor, _>(id, "PlayerMotor", |m| {
            if m.mode == MotionMode::Frozen {
                return false;
            }
            m.input = input;
            true
        })
    }

    pub fn move_input(&self, id: EntityId) -> SimResult<MoveInput> {
        self.read_component::<PlayerMotor, _>(id, "PlayerMotor", |m| m.input)
    }

    /// True while the move input clears the deadzone.
    pub fn is_moving(&self, id: EntityId) -> SimResult<bool> {
        self.read_component::<PlayerMotor, _>(id, "PlayerMotor", |m| {
            skirmish_chase::motor::has_input(m.input)
        })
    }

    /// Factor applied to move and rotation speed during the next attack.
    /// Capped at 1; returns false for a non-positive or non-finite factor.
    pub fn set_attack_speed_reduction(&mut self, id: EntityId, factor: f64) -> SimResult<bool> {
        let accepted = self.with_component::<SpeedModulation, _>(id, "SpeedModulation", |m| {
            speed::set_factor(m, factor)
        })?;
        if !accepted {
            warn!("{id} attack speed reduction {factor} rejected");
        } else if factor > 1.0 {
            warn!("{id} attack speed reduction {factor} capped at 1");
        }
        Ok(accepted)
    }

    /// True while an attack has the agent's speed scaled down.
    pub fn is_speed_reduced(&self, id: EntityId) -> SimResult<bool> {
        self.read_component::<SpeedModulation, _>(id, "SpeedModulation", |m| m.reduced)
    }

    /// Teleport, e.g. when the surrounding physics resolves a collision.
    pub fn set_position(&mut self, id: EntityId, position: Position) -> SimResult<()> {
        self.with_component::<Position, _>(id, "Position", |p| *p = position)
    }

    /// `None` makes the chaser follow whoever is the player.
    pub fn set_chase_target(&mut self, id: EntityId, target: Option<EntityId>) -> SimResult<()> {
        self.with_component::<ChaseState, _>(id, "ChaseState", |c| c.target = target)
    }

    pub fn follow_state(&self, id: EntityId) -> SimResult<FollowState> {
        self.read_component::<ChaseState, _>(id, "ChaseState", |c| c.follow)
    }

    /// Distance measured on the last tick, `None` while the target is
    /// unavailable.
    pub fn distance_to_target(&self, id: EntityId) -> SimResult<Option<f64>> {
        self.read_component::<ChaseState, _>(id, "ChaseState", |c| c.last_distance)
    }

    pub fn is_following(&self, id: EntityId) -> SimResult<bool> {
        Ok(self.follow_state(id)? == FollowState::Following)
    }

    pub fn position(&self, id: EntityId) -> SimResult<Position> {
        self.read_component::<Position, _>(id, "Position", |p| *p)
    }

    pub fn velocity(&self, id: EntityId) -> SimResult<Velocity> {
        self.read_component::<Velocity, _>(id, "Velocity", |v| *v)
    }

    pub fn yaw(&self, id: EntityId) -> SimResult<f64> {
        self.read_component::<Orientation, _>(id, "Orientation", |o| o.yaw)
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Subscribe a collaborator. The handler lives as long as the token.
    pub fn subscribe(
        &mut self,
        topic: Topic,
        handler: impl FnMut(&CombatEvent, &mut HandlerCx<'_>) + 'static,
    ) -> Subscription {
        self.bus.subscribe(topic, handler)
    }

    /// Subscribe a collaborator whose lifetime is tied to `owner`: the
    /// handler is released when `owner` is despawned.
    pub fn subscribe_for(
        &mut self,
        owner: EntityId,
        topic: Topic,
        handler: impl FnMut(&CombatEvent, &mut HandlerCx<'_>) + 'static,
    ) -> SimResult<()> {
        if !self.ctx.registry.contains(owner) {
            return Err(SimError::EntityNotFound(owner));
        }
        let subscription = self.bus.subscribe(topic, handler);
        self.subscriptions.entry(owner).or_default().push(subscription);
        Ok(())
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.bus.subscriber_count(topic)
    }

    fn publish(&mut self, event: CombatEvent) {
        self.bus.publish(event, &mut self.ctx);
    }

    // ------------------------------------------------------------------
    // Commands and the tick loop
    // ------------------------------------------------------------------

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply one command now.
    pub fn apply_command(&mut self, command: SimCommand) -> SimResult<()> {
        match command {
            SimCommand::ApplyDamage { entity, amount } => {
                self.apply_damage(entity, amount)?;
            }
            SimCommand::Heal { entity, amount } => {
                self.heal(entity, amount)?;
            }
            SimCommand::SetMaxHealth { entity, value } => {
                self.set_max_health(entity, value)?;
            }
            SimCommand::SetDamageAmount { entity, value } => {
                self.set_damage_amount(entity, value)?;
            }
            SimCommand::TriggerAttack { entity } => {
                self.trigger_attack(entity)?;
            }
            SimCommand::ActivateHitbox { entity } => {
                self.activate_hitbox(entity)?;
            }
            SimCommand::DeactivateHitbox { entity } => {
                self.deactivate_hitbox(entity)?;
            }
            SimCommand::AttackAnimationStart { entity } => {
                self.on_attack_animation_start(entity)?;
            }
            SimCommand::AttackAnimationEnd { entity } => {
                self.on_attack_animation_end(entity)?;
            }
            SimCommand::SetAttackCooldown { entity, secs } => {
                self.set_attack_cooldown(entity, secs)?;
            }
            SimCommand::SetAttackSpeedReduction { entity, factor } => {
                self.set_attack_speed_reduction(entity, factor)?;
            }
            SimCommand::OverlapEnter { attacker, victim } => {
                self.hitbox_overlap_enter(attacker, victim)?;
            }
            SimCommand::OverlapExit { attacker, victim } => {
                self.hitbox_overlap_exit(attacker, victim)?;
            }
            SimCommand::SetMoveInput { entity, input } => {
                self.set_move_input(entity, input)?;
            }
            SimCommand::SetTuning { entity, param, value } => self.set_tuning(entity, param, value)?,
            SimCommand::SetPosition { entity, position } => self.set_position(entity, position)?,
            SimCommand::SetChaseTarget { entity, target } => self.set_chase_target(entity, target)?,
            SimCommand::SetActive { entity, active } => {
                self.set_active(entity, active)?;
            }
            SimCommand::Reset { entity } => {
                self.reset(entity)?;
            }
            SimCommand::Despawn { entity } => self.despawn(entity)?,
        }
        Ok(())
    }

    /// Advance the simulation by one fixed tick and return the resulting
    /// snapshot.
    pub fn tick(&mut self) -> SimSnapshot {
        self.process_commands();
        self.run_systems();
        self.ctx.time.advance();
        self.cleanup();

        let events = self.bus.drain_journal();
        systems::snapshot::build(&self.ctx, events)
    }

    /// Advance cosmetic state (orientation) by a variable frame step.
    pub fn frame(&mut self, dt: f64) {
        if dt > 0.0 && dt.is_finite() {
            systems::orientation::run(&mut self.ctx, dt);
        }
    }

    /// Snapshot of the current state without advancing time. Events stay
    /// queued for the next tick's snapshot.
    pub fn snapshot(&self) -> SimSnapshot {
        systems::snapshot::build(&self.ctx, Vec::new())
    }

    pub fn view(&self, id: EntityId) -> SimResult<EntityView> {
        let handle = self.ctx.registry.resolve(id)?;
        systems::snapshot::view(&self.ctx, id, handle).ok_or(SimError::MissingComponent {
            entity: id,
            component: "Identity",
        })
    }

    pub fn player(&self) -> Option<EntityId> {
        self.ctx.registry.player()
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.ctx.registry
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &hecs::World {
        &self.ctx.world
    }

    pub fn time(&self) -> SimTime {
        self.ctx.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(err) = self.apply_command(command.clone()) {
                warn!("command {command:?} failed: {err}");
            }
        }
    }

    /// Run all fixed-step systems in order.
    fn run_systems(&mut self) {
        // 1. Attack cooldowns
        attack::run(&mut self.ctx.world, DT);
        // 2. Chase decisions and velocity
        systems::chase::run(&mut self.ctx, DT);
        // 3. Player motor
        systems::motor::run(&mut self.ctx, DT);
        // 4. Position integration
        systems::kinematics::run(&mut self.ctx, DT);
    }

    /// Despawn corpses whose grace period has run out.
    fn cleanup(&mut self) {
        self.despawn_buffer = systems::cleanup::expired(&self.ctx, self.config.grace_period_secs);
        for id in std::mem::take(&mut self.despawn_buffer) {
            if let Err(err) = self.despawn(id) {
                warn!("cleanup could not despawn {id}: {err}");
            }
        }
    }

    fn role(&self, id: EntityId) -> SimResult<Role> {
        self.read_component::<Identity, _>(id, "Identity", |i| i.role)
    }

    fn with_component<T: Component, R>(
        &mut self,
        id: EntityId,
        name: &'static str,
        f: impl FnOnce(&mut T) -> R,
    ) -> SimResult<R> {
        let handle = self.ctx.registry.resolve(id)?;
        let mut component = self
            .ctx
            .world
            .get::<&mut T>(handle)
            .map_err(|_| SimError::MissingComponent { entity: id, component: name })?;
        Ok(f(&mut *component))
    }

    fn read_component<T: Component, R>(
        &self,
        id: EntityId,
        name: &'static str,
        f: impl FnOnce(&T) -> R,
    ) -> SimResult<R> {
        let handle = self.ctx.registry.resolve(id)?;
        let component = self
            .ctx
            .world
            .get::<&T>(handle)
            .map_err(|_| SimError::MissingComponent { entity: id, component: name })?;
        Ok(f(&*component))
    }
}
