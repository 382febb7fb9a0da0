use std::f64::consts::{FRAC_PI_2, PI};

use approx::assert_relative_eq;
use rstest::rstest;

use skirmish_core::components::MoveTuning;
use skirmish_core::constants::DT;
use skirmish_core::enums::FollowState;
use skirmish_core::types::{MoveInput, Position, Velocity};

use crate::blend::{blend_horizontal, blend_yaw, smoothing_factor, wrap_angle, yaw_towards};
use crate::fsm::{classify, evaluate, facing, ChaseContext};
use crate::motor::{drive, heading};

fn enemy_tuning() -> MoveTuning {
    MoveTuning {
        move_speed: 3.0,
        acceleration: 6.0,
        deceleration: 8.0,
        rotation_speed: 5.0,
        detection_range: 5.0,
        stop_distance: 1.5,
    }
}

fn make_context(distance: Option<f64>, velocity: Velocity) -> ChaseContext {
    ChaseContext {
        position: Position::new(0.0, 0.0, 0.0),
        velocity,
        target: distance.map(|d| Position::new(0.0, 0.0, d)),
        tuning: enemy_tuning(),
        previous: FollowState::Idle,
        dt: DT,
    }
}

// ---- Classification ----

#[rstest]
#[case(Some(10.0), FollowState::Idle)]
#[case(Some(3.0), FollowState::Following)]
#[case(Some(1.0), FollowState::Stopping)]
#[case(Some(5.0), FollowState::Following)]
#[case(Some(1.5), FollowState::Stopping)]
#[case(None, FollowState::Idle)]
#[case(Some(f64::INFINITY), FollowState::Idle)]
fn test_classify(#[case] distance: Option<f64>, #[case] expected: FollowState) {
    assert_eq!(classify(distance, 5.0, 1.5), expected);
}

// ---- Evaluate ----

#[test]
fn test_following_accelerates_toward_target() {
    let ctx = make_context(Some(3.0), Velocity::default());
    let update = evaluate(&ctx);
    assert_eq!(update.follow_state, FollowState::Following);
    assert!(update.state_changed);
    // lerp(0, 3, 6 * 0.02) along +z
    assert_relative_eq!(update.new_velocity.z, 3.0 * 6.0 * DT, epsilon = 1e-12);
    assert_relative_eq!(update.new_velocity.x, 0.0);
    assert_relative_eq!(update.distance.unwrap(), 3.0);
}

#[test]
fn test_following_converges_to_move_speed() {
    let mut ctx = make_context(Some(4.0), Velocity::default());
    for _ in 0..500 {
        let update = evaluate(&ctx);
        ctx.velocity = update.new_velocity;
        ctx.previous = update.follow_state;
    }
    assert_relative_eq!(ctx.velocity.horizontal_speed(), 3.0, epsilon = 1e-6);
}

#[test]
fn test_stopping_decelerates() {
    let ctx = make_context(Some(1.0), Velocity::new(2.0, 0.0, 0.0));
    let update = evaluate(&ctx);
    assert_eq!(update.follow_state, FollowState::Stopping);
    assert_relative_eq!(update.new_velocity.x, 2.0 * (1.0 - 8.0 * DT), epsilon = 1e-12);
}

#[test]
fn test_idle_decelerates_without_target() {
    let ctx = make_context(None, Velocity::new(0.0, 0.0, 4.0));
    let update = evaluate(&ctx);
    assert_eq!(update.follow_state, FollowState::Idle);
    assert!(update.distance.is_none());
    assert!(!update.state_changed);
    assert!(update.new_velocity.z < 4.0);
}

#[test]
fn test_vertical_velocity_is_never_touched() {
    for distance in [Some(10.0), Some(3.0), Some(1.0), None] {
        let ctx = make_context(distance, Velocity::new(1.0, -9.81, 1.0));
        let update = evaluate(&ctx);
        assert_relative_eq!(update.new_velocity.y, -9.81);
    }
}

#[test]
fn test_pursuit_ignores_height_difference() {
    let mut ctx = make_context(None, Velocity::default());
    ctx.target = Some(Position::new(3.0, 2.0, 0.0));
    let update = evaluate(&ctx);
    assert_eq!(update.follow_state, FollowState::Following);
    assert!(update.new_velocity.x > 0.0);
    assert_relative_eq!(update.new_velocity.y, 0.0);
}

// ---- Blending ----

#[test]
fn test_smoothing_factor_clamps() {
    assert_relative_eq!(smoothing_factor(6.0, 0.02), 0.12);
    assert_relative_eq!(smoothing_factor(100.0, 1.0), 1.0);
    assert_relative_eq!(smoothing_factor(-1.0, 0.02), 0.0);
}

#[test]
fn test_blend_horizontal_keeps_vertical() {
    let v = blend_horizontal(Velocity::new(0.0, 5.0, 0.0), 10.0, 0.0, 50.0, 1.0);
    assert_relative_eq!(v.x, 10.0);
    assert_relative_eq!(v.y, 5.0);
}

#[test]
fn test_yaw_helpers() {
    assert_relative_eq!(yaw_towards(0.0, 1.0).unwrap(), 0.0);
    assert_relative_eq!(yaw_towards(1.0, 0.0).unwrap(), FRAC_PI_2);
    assert!(yaw_towards(0.0, 0.0).is_none());
    assert_relative_eq!(wrap_angle(FRAC_PI_2 + 2.0 * PI), FRAC_PI_2, epsilon = 1e-12);
    assert!(facing(&Position::new(0.0, 0.0, 0.0), &Position::new(0.0, 5.0, 0.0)).is_none());
}

#[test]
fn test_blend_yaw_takes_short_arc() {
    // From just below +PI to just above -PI: the short way crosses PI.
    let current = PI - 0.1;
    let target = -PI + 0.1;
    let next = blend_yaw(current, target, 1.0, 0.5);
    assert_relative_eq!(wrap_angle(next - current), 0.1, epsilon = 1e-12);
}

// ---- Motor ----

#[test]
fn test_motor_accelerates_with_input() {
    let tuning = MoveTuning {
        move_speed: 10.0,
        acceleration: 12.0,
        deceleration: 12.0,
        ..enemy_tuning()
    };
    let v = drive(Velocity::default(), MoveInput::new(1.0, 0.0), &tuning, DT);
    assert_relative_eq!(v.x, 10.0 * 12.0 * DT, epsilon = 1e-12);
    assert_relative_eq!(v.z, 0.0);
}

#[test]
fn test_motor_deadzone_decelerates() {
    let tuning = enemy_tuning();
    let v = drive(Velocity::new(2.0, 0.0, 0.0), MoveInput::new(0.05, 0.0), &tuning, DT);
    assert!(v.x < 2.0);
    assert!(heading(MoveInput::new(0.05, 0.05)).is_none());
    assert_relative_eq!(heading(MoveInput::new(0.0, -1.0)).unwrap().abs(), PI);
}
