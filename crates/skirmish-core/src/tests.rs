#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use serde_json::json;

    use crate::commands::SimCommand;
    use crate::config::SpawnConfig;
    use crate::enums::*;
    use crate::error::SimError;
    use crate::events::CombatEvent;
    use crate::types::{EntityId, MoveInput, Position, SimTime, Velocity};

    #[test]
    fn test_entity_id_display() {
        assert_eq!(EntityId(7).to_string(), "#7");
    }

    #[test]
    fn test_position_distance() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 0.0, 4.0);
        assert_relative_eq!(a.distance_to(&b), 5.0);
        let c = Position::new(3.0, 12.0, 4.0);
        assert_relative_eq!(a.horizontal_distance_to(&c), 5.0);
        assert_relative_eq!(a.distance_to(&c), 13.0);
    }

    #[test]
    fn test_velocity_horizontal_speed_ignores_vertical() {
        let v = Velocity::new(3.0, -9.81, 4.0);
        assert_relative_eq!(v.horizontal_speed(), 5.0);
    }

    #[test]
    fn test_move_input_magnitude() {
        assert_relative_eq!(MoveInput::new(0.6, 0.8).magnitude(), 1.0);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..50 {
            time.advance();
        }
        assert_eq!(time.tick, 50);
        assert_relative_eq!(time.elapsed_secs, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_event_topic_and_entity() {
        let event = CombatEvent::Damaged {
            entity: EntityId(3),
            amount: 25.0,
            remaining: 75.0,
        };
        assert_eq!(event.topic(), Topic::Damaged);
        assert_eq!(event.entity(), EntityId(3));
        assert_eq!(
            CombatEvent::HitboxDeactivated { entity: EntityId(9) }.topic(),
            Topic::HitboxDeactivated
        );
    }

    #[test]
    fn test_event_serde_is_tagged() {
        let event = CombatEvent::Died { entity: EntityId(2) };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json, json!({ "type": "Died", "entity": 2 }));
        let back: CombatEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_command_serde_round_trip() {
        let commands = vec![
            SimCommand::ApplyDamage {
                entity: EntityId(1),
                amount: 10.0,
            },
            SimCommand::OverlapEnter {
                attacker: EntityId(1),
                victim: EntityId(2),
            },
            SimCommand::SetTuning {
                entity: EntityId(2),
                param: TuningParam::StopDistance,
                value: 1.0,
            },
            SimCommand::SetChaseTarget {
                entity: EntityId(2),
                target: None,
            },
        ];
        for cmd in &commands {
            let text = serde_json::to_string(cmd).unwrap();
            let back: SimCommand = serde_json::from_str(&text).unwrap();
            assert_eq!(text, serde_json::to_string(&back).unwrap());
        }
    }

    #[test]
    fn test_player_config_overrides_enemy_defaults() {
        let player = SpawnConfig::player("Hero");
        assert_eq!(player.role, Role::Player);
        assert_relative_eq!(player.move_speed, 10.0);
        assert_relative_eq!(player.rotation_speed, 12.0);
        // Health and attack timing share the stock values.
        assert_relative_eq!(player.max_health, 100.0);
        assert_relative_eq!(player.attack_cooldown_duration, 0.5);
        assert_relative_eq!(player.attack_speed_reduction_factor, 0.2);
    }

    #[test]
    fn test_sanitized_accepts_valid_config() {
        let (cfg, adjustments) = SpawnConfig::enemy("Grunt").sanitized();
        assert!(adjustments.is_empty());
        assert_eq!(cfg, SpawnConfig::enemy("Grunt"));
    }

    #[test]
    fn test_sanitized_clamps_stop_distance_to_detection_range() {
        let cfg = SpawnConfig {
            detection_range: 4.0,
            stop_distance: 6.0,
            ..SpawnConfig::enemy("Grunt")
        };
        let (fixed, adjustments) = cfg.sanitized();
        assert_relative_eq!(fixed.stop_distance, 4.0);
        assert_eq!(adjustments.len(), 1);
        assert_eq!(adjustments[0].field, "stop_distance");
    }

    #[test]
    fn test_sanitized_repairs_invalid_values() {
        let cfg = SpawnConfig {
            max_health: 0.0,
            move_speed: -2.0,
            attack_cooldown_duration: -1.0,
            attack_speed_reduction_factor: 3.0,
            ..SpawnConfig::enemy("Broken")
        };
        let (fixed, adjustments) = cfg.sanitized();
        assert_relative_eq!(fixed.max_health, 100.0);
        assert_relative_eq!(fixed.move_speed, 0.0);
        assert_relative_eq!(fixed.attack_cooldown_duration, 0.5);
        assert_relative_eq!(fixed.attack_speed_reduction_factor, 1.0);
        assert_eq!(adjustments.len(), 4);
    }

    #[test]
    fn test_sanitized_treats_infinity_as_malformed() {
        let cfg = SpawnConfig {
            move_speed: f64::INFINITY,
            rotation_speed: f64::NAN,
            damage_amount: f64::INFINITY,
            ..SpawnConfig::enemy("Runaway")
        };
        let (fixed, adjustments) = cfg.sanitized();
        assert_relative_eq!(fixed.move_speed, 0.0);
        assert_relative_eq!(fixed.rotation_speed, 0.0);
        assert_relative_eq!(fixed.damage_amount, 0.0);
        assert_relative_eq!(fixed.detection_range, 5.0);
        assert_eq!(adjustments.len(), 3);
    }

    #[test]
    fn test_overrides_keep_base_values() {
        let cfg = SpawnConfig::with_overrides(
            SpawnConfig::player("Hero"),
            &json!({ "label": "Knight", "max_health": 150.0 }),
        )
        .unwrap();
        assert_eq!(cfg.label, "Knight");
        assert_eq!(cfg.role, Role::Player);
        assert_relative_eq!(cfg.max_health, 150.0);
        assert_relative_eq!(cfg.move_speed, 10.0);
    }

    #[test]
    fn test_overrides_reject_non_objects() {
        let err = SpawnConfig::with_overrides(SpawnConfig::default(), &json!([1, 2])).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfig(_)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SimError::EntityNotFound(EntityId(4)).to_string(),
            "entity #4 not found"
        );
        assert_eq!(
            SimError::MissingComponent {
                entity: EntityId(4),
                component: "Health"
            }
            .to_string(),
            "entity #4 has no Health component"
        );
    }
}
