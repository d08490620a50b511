//! Cat Siege - A top-down arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, levels)
//! - `renderer`: Draw-list generation and the Canvas 2D backend
//! - `tuning`: Data-driven game balance

pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one animation frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Largest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Restart button on the end screen
    pub const RESTART_BUTTON_WIDTH: f32 = 200.0;
    pub const RESTART_BUTTON_HEIGHT: f32 = 50.0;
    pub const RESTART_BUTTON_X: f32 = PLAYFIELD_WIDTH / 2.0 - RESTART_BUTTON_WIDTH / 2.0;
    pub const RESTART_BUTTON_Y: f32 = PLAYFIELD_HEIGHT / 2.0 + 50.0;

    /// HUD health bar
    pub const HEALTH_BAR_X: f32 = 20.0;
    pub const HEALTH_BAR_Y: f32 = 60.0;
    pub const HEALTH_BAR_WIDTH: f32 = 200.0;
    pub const HEALTH_BAR_HEIGHT: f32 = 20.0;
}

use glam::Vec2;

/// Point-in-rectangle test with open bounds (edges don't count)
#[inline]
pub fn point_in_rect_open(point: Vec2, min: Vec2, size: Vec2) -> bool {
    point.x > min.x && point.x < min.x + size.x && point.y > min.y && point.y < min.y + size.y
}

/// True if `point` lands on the end-screen restart button
#[inline]
pub fn hits_restart_button(point: Vec2) -> bool {
    use consts::*;
    point_in_rect_open(
        point,
        Vec2::new(RESTART_BUTTON_X, RESTART_BUTTON_Y),
        Vec2::new(RESTART_BUTTON_WIDTH, RESTART_BUTTON_HEIGHT),
    )
}
