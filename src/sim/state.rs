//! Game state and core simulation types
//!
//! Everything the simulation step reads or writes lives in `GameState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::level::Level;
use super::spawn::start_level;
use crate::consts::*;
use crate::tuning::{Tuning, TuningError};

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player health ran out
    GameOver,
    /// Boss defeated (or campaign exhausted)
    Win,
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Side length of the square hitbox
    pub size: f32,
    /// Movement per tick on each held axis
    pub speed: f32,
    pub health: i32,
    pub max_health: i32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Self::spawn_point(tuning.player_size),
            size: tuning.player_size,
            speed: tuning.player_speed,
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
        }
    }

    /// Centre of the playfield, adjusted for the hitbox
    fn spawn_point(size: f32) -> Vec2 {
        Vec2::new(
            PLAYFIELD_WIDTH / 2.0 - size / 2.0,
            PLAYFIELD_HEIGHT / 2.0 - size / 2.0,
        )
    }

    /// Restore full health and return to the spawn point
    pub fn reset(&mut self) {
        self.health = self.max_health;
        self.pos = Self::spawn_point(self.size);
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.aabb().center()
    }

    /// Heal, capped at max health
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Health in [0, 1] for the HUD bar
    pub fn health_fraction(&self) -> f32 {
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

/// An enemy cat chasing the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub size: f32,
    pub speed: f32,
    pub hp: u32,
    pub is_boss: bool,
}

impl Enemy {
    pub fn aabb(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }

    /// Step toward `target` (both top-left corners) at this enemy's speed.
    /// An enemy already sitting on the target stays put.
    pub fn seek(&mut self, target: Vec2) {
        let dir = (target - self.pos).normalize_or_zero();
        self.pos += dir * self.speed;
    }
}

/// A player projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    /// Displacement per tick, fixed at launch
    pub vel: Vec2,
    pub size: f32,
}

impl Bullet {
    pub fn aabb(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Heal,
}

/// A pickup dropped by a defeated enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub size: f32,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn aabb(&self) -> Aabb {
        Aabb::square(self.pos, self.size)
    }
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { index: usize },
    BulletFired,
    EnemyKilled { pos: Vec2 },
    BossDefeated,
    PlayerHit { health: i32 },
    PowerUpDropped { pos: Vec2 },
    PowerUpCollected { kind: PowerUpKind },
    GameOver,
    Victory,
    Restarted,
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Source of all gameplay randomness
    pub rng: Pcg32,
    /// Balance values this run was started with
    pub tuning: Tuning,
    /// Index into `tuning.levels`
    pub level_index: usize,
    /// Enemies of the current level not yet killed or crashed into the player
    pub enemies_remaining: u32,
    pub score: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub power_ups: Vec<PowerUp>,
    /// Simulated seconds spent in play (monotonic across restarts)
    pub time: f64,
    /// Earliest `time` at which the next shot may fire
    pub next_fire_time: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the stock tuning, starting at level 0
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a new game with custom tuning, starting at level 0.
    /// The tuning is validated first; nothing is spawned if it is rejected.
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    /// `tuning` must already satisfy `Tuning::validate`
    fn build(seed: u64, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(&tuning),
            tuning,
            level_index: 0,
            enemies_remaining: 0,
            score: 0,
            phase: GamePhase::Playing,
            enemies: Vec::new(),
            bullets: Vec::new(),
            power_ups: Vec::new(),
            time: 0.0,
            next_fire_time: 0.0,
            time_ticks: 0,
            events: Vec::new(),
        };

        start_level(&mut state, 0);

        state
    }

    /// Descriptor of the level being played
    pub fn current_level(&self) -> &Level {
        &self.tuning.levels[self.level_index]
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_starts_level_zero() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level_index, 0);
        assert_eq!(state.enemies.len(), 3);
        assert_eq!(state.enemies_remaining, 3);
        assert_eq!(state.player.health, 100);
        assert_eq!(state.player.pos, Vec2::new(375.0, 275.0));
        assert_eq!(state.current_level().name, "Level 1");
    }

    #[test]
    fn test_with_tuning_rejects_invalid_tuning() {
        let no_levels = Tuning {
            levels: Vec::new(),
            ..Tuning::default()
        };
        assert!(matches!(
            GameState::with_tuning(1, no_levels),
            Err(TuningError::NoLevels)
        ));

        let inverted_sizes = Tuning {
            enemy_min_size: 40.0,
            enemy_max_size: 20.0,
            ..Tuning::default()
        };
        assert!(matches!(
            GameState::with_tuning(1, inverted_sizes),
            Err(TuningError::InvalidValue {
                field: "enemy_max_size"
            })
        ));
    }

    #[test]
    fn test_with_tuning_accepts_valid_tuning() {
        let tuning = Tuning {
            player_speed: 8.0,
            ..Tuning::default()
        };
        let state = GameState::with_tuning(77, tuning).unwrap();
        assert_eq!(state.seed, 77);
        assert_eq!(state.player.speed, 8.0);
        assert_eq!(state.enemies.len(), 3);
    }

    #[test]
    fn test_heal_is_capped() {
        let mut player = Player::new(&Tuning::default());
        player.health = 90;
        player.heal(30);
        assert_eq!(player.health, 100);
        player.health = 40;
        player.heal(30);
        assert_eq!(player.health, 70);
    }

    #[test]
    fn test_health_fraction_clamps() {
        let mut player = Player::new(&Tuning::default());
        player.health = 50;
        assert_eq!(player.health_fraction(), 0.5);
        player.health = -20;
        assert_eq!(player.health_fraction(), 0.0);
    }

    #[test]
    fn test_enemy_seeks_target() {
        let mut enemy = Enemy {
            pos: Vec2::new(0.0, 0.0),
            size: 30.0,
            speed: 2.0,
            hp: 1,
            is_boss: false,
        };
        enemy.seek(Vec2::new(10.0, 0.0));
        assert_eq!(enemy.pos, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_enemy_on_target_stays_finite() {
        let mut enemy = Enemy {
            pos: Vec2::new(100.0, 100.0),
            size: 30.0,
            speed: 1.5,
            hp: 1,
            is_boss: false,
        };
        enemy.seek(Vec2::new(100.0, 100.0));
        assert!(enemy.pos.is_finite());
        assert_eq!(enemy.pos, Vec2::new(100.0, 100.0));
    }
}
