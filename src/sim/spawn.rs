//! Level start, enemy spawning and full resets

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::level::Level;
use super::state::{Enemy, GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::tuning::Tuning;

/// Clear the field and spawn every enemy of level `index`
pub fn start_level(state: &mut GameState, index: usize) {
    let Some(level) = state.tuning.levels.get(index) else {
        log::warn!("Level {} does not exist ({} defined)", index, state.tuning.levels.len());
        return;
    };

    state.level_index = index;
    state.enemies_remaining = level.enemy_count;
    state.enemies.clear();
    state.bullets.clear();
    state.power_ups.clear();

    for _ in 0..level.enemy_count {
        let enemy = spawn_enemy(&mut state.rng, &state.tuning, level);
        state.enemies.push(enemy);
    }

    log::info!(
        "Level {} \"{}\": {} enemies at speed {}",
        index + 1,
        level.name,
        level.enemy_count,
        level.enemy_speed
    );
    state.events.push(GameEvent::LevelStarted { index });
}

/// Create one enemy just off-screen on a random playfield edge
pub fn spawn_enemy(rng: &mut Pcg32, tuning: &Tuning, level: &Level) -> Enemy {
    let size = if level.boss {
        tuning.boss_size
    } else {
        rng.random_range(tuning.enemy_min_size..tuning.enemy_max_size)
    };

    // Pick left/right or top/bottom, then a side, then a spot along it
    let pos = if rng.random_bool(0.5) {
        let x = if rng.random_bool(0.5) {
            -size
        } else {
            PLAYFIELD_WIDTH + size
        };
        Vec2::new(x, rng.random::<f32>() * PLAYFIELD_HEIGHT)
    } else {
        let x = rng.random::<f32>() * PLAYFIELD_WIDTH;
        let y = if rng.random_bool(0.5) {
            -size
        } else {
            PLAYFIELD_HEIGHT + size
        };
        Vec2::new(x, y)
    };

    Enemy {
        pos,
        size,
        speed: level.enemy_speed,
        hp: level.enemy_hp(),
        is_boss: level.boss,
    }
}

/// Start a fresh run: score, level and player back to their initial values
pub fn reset_game(state: &mut GameState) {
    state.score = 0;
    state.player.reset();
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::Restarted);
    log::info!("Game restarted");
    start_level(state, 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn off_screen(enemy: &Enemy) -> bool {
        enemy.aabb().is_outside(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT)
            || enemy.pos.x + enemy.size <= 0.0
            || enemy.pos.y + enemy.size <= 0.0
    }

    #[test]
    fn test_spawned_enemies_start_off_screen() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1234);
        for level in &tuning.levels {
            for _ in 0..200 {
                let enemy = spawn_enemy(&mut rng, &tuning, level);
                assert!(off_screen(&enemy), "enemy spawned on field: {:?}", enemy.pos);
            }
        }
    }

    #[test]
    fn test_normal_enemy_size_range() {
        let tuning = Tuning::default();
        let level = &tuning.levels[0];
        let mut rng = Pcg32::seed_from_u64(99);
        for _ in 0..500 {
            let enemy = spawn_enemy(&mut rng, &tuning, level);
            assert!(enemy.size >= 20.0 && enemy.size < 40.0);
            assert_eq!(enemy.hp, 1);
            assert!(!enemy.is_boss);
            assert_eq!(enemy.speed, 1.2);
        }
    }

    #[test]
    fn test_boss_spawn() {
        let tuning = Tuning::default();
        let level = &tuning.levels[3];
        let mut rng = Pcg32::seed_from_u64(5);
        let boss = spawn_enemy(&mut rng, &tuning, level);
        assert!(boss.is_boss);
        assert_eq!(boss.size, 80.0);
        assert_eq!(boss.hp, 10);
    }

    #[test]
    fn test_start_level_clears_field() {
        let mut state = GameState::new(3);
        state.bullets.push(super::super::state::Bullet {
            pos: Vec2::new(10.0, 10.0),
            vel: Vec2::ZERO,
            size: 5.0,
        });
        start_level(&mut state, 2);
        assert_eq!(state.level_index, 2);
        assert_eq!(state.enemies.len(), 8);
        assert_eq!(state.enemies_remaining, 8);
        assert!(state.bullets.is_empty());
        assert!(state.power_ups.is_empty());
        assert!(state.events.contains(&GameEvent::LevelStarted { index: 2 }));
    }

    #[test]
    fn test_start_missing_level_is_ignored() {
        let mut state = GameState::new(3);
        start_level(&mut state, 42);
        assert_eq!(state.level_index, 0);
        assert_eq!(state.enemies.len(), 3);
    }

    #[test]
    fn test_reset_game() {
        let mut state = GameState::new(11);
        start_level(&mut state, 3);
        state.score = 250;
        state.player.health = -10;
        state.player.pos = Vec2::new(0.0, 0.0);
        state.phase = GamePhase::GameOver;

        reset_game(&mut state);

        assert_eq!(state.score, 0);
        assert_eq!(state.level_index, 0);
        assert_eq!(state.player.health, state.player.max_health);
        assert_eq!(state.player.pos, Vec2::new(375.0, 275.0));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.enemies.len(), 3);
        assert_eq!(state.enemies_remaining, 3);
    }
}
