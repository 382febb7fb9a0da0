//! Input-driven motor for the controlled agent.

use skirmish_core::components::MoveTuning;
use skirmish_core::constants::MOVE_INPUT_DEADZONE;
use skirmish_core::types::{MoveInput, Velocity};

use crate::blend::{blend_horizontal, yaw_towards};

/// Next velocity for one fixed tick. With input the horizontal velocity
/// accelerates toward `input * move_speed`; without input it decelerates
/// toward rest.
pub fn drive(velocity: Velocity, input: MoveInput, tuning: &MoveTuning, dt: f64) -> Velocity {
    if has_input(input) {
        blend_horizontal(
            velocity,
            input.x * tuning.move_speed,
            input.z * tuning.move_speed,
            tuning.acceleration,
            dt,
        )
    } else {
        blend_horizontal(velocity, 0.0, 0.0, tuning.deceleration, dt)
    }
}

/// Yaw the agent should turn toward, if the input is strong enough.
pub fn heading(input: MoveInput) -> Option<f64> {
    if has_input(input) {
        yaw_towards(input.x, input.z)
    } else {
        None
    }
}

/// True when the input clears the deadzone.
pub fn has_input(input: MoveInput) -> bool {
    input.magnitude() > MOVE_INPUT_DEADZONE
}
