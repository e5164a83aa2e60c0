use gun_runner::compute::{config_for, init_state};
use gun_runner::entities::*;

#[test]
fn entity_enums_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(Difficulty::Normal, Difficulty::Normal);
    assert_ne!(Difficulty::Normal, Difficulty::Boss);
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::Lost);
    assert_eq!(EnemyKind::Sword, EnemyKind::Sword);
    assert_ne!(EnemyKind::Sword, EnemyKind::Boss);
    assert_eq!(FallPolicy::Lose, FallPolicy::Lose);
    assert_ne!(FallPolicy::Lose, FallPolicy::Respawn);

    // Clone must produce an equal value
    let kind = EnemyKind::Boss;
    assert_eq!(kind.clone(), EnemyKind::Boss);
}

#[test]
fn input_snapshot_default_has_no_presses() {
    let input = InputSnapshot::default();
    assert!(!input.left);
    assert!(!input.right);
    assert!(!input.jump_held);
    assert!(!input.shoot);
    assert!(!input.auto_shoot);
    assert!(!input.auto_run);
    // A zero default would read as "jump pressed at t=0"; it must be
    // infinitely far in the past instead.
    assert_eq!(input.jump_pressed_at, f32::NEG_INFINITY);
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(config_for(Difficulty::Normal), 960.0);
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.hp = 0;
    cloned.enemies.clear();
    cloned.bullets.push(Bullet {
        x: 1.0,
        y: 2.0,
        w: 10.0,
        h: 3.0,
        vx: 800.0,
        age: 0.0,
        dead: false,
    });

    assert_eq!(original.player.hp, 3);
    assert_eq!(original.enemies.len(), 40);
    assert!(original.bullets.is_empty());
}
