//! Data-driven game balance
//!
//! `Tuning::default()` reproduces the stock campaign. A JSON document can
//! override any subset of fields; missing fields keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::sim::level::{Level, default_levels};

/// Errors raised while loading or validating a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tuning must define at least one level")]
    NoLevels,

    #[error("level {index} spawns no enemies")]
    EmptyLevel { index: usize },

    #[error("boss level {index} needs a positive hp")]
    MissingBossHp { index: usize },

    #[error("invalid value for `{field}`")]
    InvalidValue { field: &'static str },
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player movement per tick (pixels)
    pub player_speed: f32,
    /// Player square side length
    pub player_size: f32,
    pub player_max_health: i32,
    /// Health lost when an enemy touches the player
    pub contact_damage: i32,

    /// Bullet travel per tick (pixels)
    pub bullet_speed: f32,
    pub bullet_size: f32,
    /// Minimum time between shots (seconds)
    pub fire_cooldown: f32,

    pub power_up_size: f32,
    /// Chance a normal enemy drops a heal on death (0-1)
    pub power_up_drop_chance: f32,
    pub heal_amount: i32,

    pub kill_score: u64,
    pub boss_score: u64,
    pub boss_size: f32,
    /// Normal enemy size is uniform in [min, max)
    pub enemy_min_size: f32,
    pub enemy_max_size: f32,

    /// Ordered campaign; the boss level is normally last
    pub levels: Vec<Level>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: 5.0,
            player_size: 50.0,
            player_max_health: 100,
            contact_damage: 20,

            bullet_speed: 7.0,
            bullet_size: 5.0,
            fire_cooldown: 0.2,

            power_up_size: 15.0,
            power_up_drop_chance: 0.1,
            heal_amount: 30,

            kill_score: 10,
            boss_score: 100,
            boss_size: 80.0,
            enemy_min_size: 20.0,
            enemy_max_size: 40.0,

            levels: default_levels(),
        }
    }
}

impl Tuning {
    /// Parse a JSON document and validate the result
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.levels.is_empty() {
            return Err(TuningError::NoLevels);
        }
        for (index, level) in self.levels.iter().enumerate() {
            if level.enemy_count == 0 {
                return Err(TuningError::EmptyLevel { index });
            }
            if level.boss && level.hp.unwrap_or(0) == 0 {
                return Err(TuningError::MissingBossHp { index });
            }
            if !(level.enemy_speed > 0.0) {
                return Err(TuningError::InvalidValue {
                    field: "levels.enemy_speed",
                });
            }
        }

        let positive = [
            ("player_speed", self.player_speed),
            ("bullet_speed", self.bullet_speed),
            ("bullet_size", self.bullet_size),
            ("power_up_size", self.power_up_size),
            ("boss_size", self.boss_size),
            ("enemy_min_size", self.enemy_min_size),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::InvalidValue { field });
            }
        }

        if !(self.player_size > 0.0
            && self.player_size < PLAYFIELD_WIDTH
            && self.player_size < PLAYFIELD_HEIGHT)
        {
            return Err(TuningError::InvalidValue {
                field: "player_size",
            });
        }
        if self.player_max_health <= 0 {
            return Err(TuningError::InvalidValue {
                field: "player_max_health",
            });
        }
        if !(self.enemy_max_size > self.enemy_min_size) {
            return Err(TuningError::InvalidValue {
                field: "enemy_max_size",
            });
        }
        if !(0.0..=1.0).contains(&self.power_up_drop_chance) {
            return Err(TuningError::InvalidValue {
                field: "power_up_drop_chance",
            });
        }
        if !(self.fire_cooldown >= 0.0) {
            return Err(TuningError::InvalidValue {
                field: "fire_cooldown",
            });
        }

        Ok(())
    }
}
