//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed tick per animation frame
//! - Seeded RNG only
//! - Stable iteration order (newest entity first when resolving hits)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod frame;
pub mod level;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::Aabb;
pub use frame::{RenderFrame, Sprite, SpriteKind};
pub use level::{Level, default_levels};
pub use spawn::{reset_game, spawn_enemy, start_level};
pub use state::{
    Bullet, Enemy, GameEvent, GamePhase, GameState, Player, PowerUp, PowerUpKind,
};
pub use tick::{TickInput, tick};
