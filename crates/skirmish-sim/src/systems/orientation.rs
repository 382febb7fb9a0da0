//! Variable-step yaw smoothing.
//!
//! Runs on the frame clock rather than the fixed tick. Chasers turn toward
//! their target only while `Following`; the player turns toward its move
//! input while the input is outside the deadzone.

use skirmish_chase::blend::blend_yaw;
use skirmish_chase::{fsm, motor};
use skirmish_core::components::{ChaseState, Identity, MoveTuning, Orientation, PlayerMotor};
use skirmish_core::enums::{FollowState, MotionMode};
use skirmish_core::types::Position;

use crate::context::SimContext;
use crate::systems::chase;

pub fn run(ctx: &mut SimContext, dt: f64) {
    let targets = chase::target_positions(&ctx.world);
    let player = ctx.registry.player();
    let registry = &ctx.registry;

    for (_entity, (identity, pos, orientation, tuning, chase_state)) in ctx
        .world
        .query_mut::<(&Identity, &Position, &mut Orientation, &MoveTuning, &ChaseState)>()
    {
        if chase_state.mode == MotionMode::Frozen
            || chase_state.follow != FollowState::Following
            || !registry.is_active(identity.id)
        {
            continue;
        }
        let desired = chase::resolve_target(identity.id, chase_state, player, &targets)
            .and_then(|target| fsm::facing(pos, &target));
        if let Some(yaw) = desired {
            orientation.yaw = blend_yaw(orientation.yaw, yaw, tuning.rotation_speed, dt);
        }
    }

    for (_entity, (identity, orientation, tuning, motor_state)) in ctx
        .world
        .query_mut::<(&Identity, &mut Orientation, &MoveTuning, &PlayerMotor)>()
    {
        if motor_state.mode == MotionMode::Frozen || !registry.is_active(identity.id) {
            continue;
        }
        if let Some(yaw) = motor::heading(motor_state.input) {
            orientation.yaw = blend_yaw(orientation.yaw, yaw, tuning.rotation_speed, dt);
        }
    }
}
