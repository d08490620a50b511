//! Level descriptors
//!
//! A level is a static wave description: how many enemies spawn at its
//! start and how fast they chase the player.

use serde::{Deserialize, Serialize};

/// One stage of the campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Shown centred in the HUD
    pub name: String,
    pub enemy_count: u32,
    /// Enemy movement per tick (pixels)
    pub enemy_speed: f32,
    /// Boss levels spawn large multi-hit enemies; killing one wins the game
    #[serde(default)]
    pub boss: bool,
    /// Boss hit points (ignored for normal levels)
    #[serde(default)]
    pub hp: Option<u32>,
}

impl Level {
    pub fn new(name: &str, enemy_count: u32, enemy_speed: f32) -> Self {
        Self {
            name: name.to_string(),
            enemy_count,
            enemy_speed,
            boss: false,
            hp: None,
        }
    }

    pub fn boss(name: &str, enemy_count: u32, enemy_speed: f32, hp: u32) -> Self {
        Self {
            name: name.to_string(),
            enemy_count,
            enemy_speed,
            boss: true,
            hp: Some(hp),
        }
    }

    /// Hit points for an enemy spawned on this level
    pub fn enemy_hp(&self) -> u32 {
        if self.boss { self.hp.unwrap_or(1).max(1) } else { 1 }
    }
}

/// The stock four-stage campaign ending in a boss fight
pub fn default_levels() -> Vec<Level> {
    vec![
        Level::new("Level 1", 3, 1.2),
        Level::new("Level 2", 5, 1.5),
        Level::new("Level 3", 8, 1.8),
        Level::boss("Boss Fight!", 1, 1.0, 10),
    ]
}
