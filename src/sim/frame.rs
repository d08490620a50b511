//! Per-frame snapshot handed to the renderer
//!
//! The renderer only ever sees a `RenderFrame`; it never touches `GameState`.

use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::state::{GamePhase, GameState, PowerUpKind};

/// What a sprite depicts (decides its colours)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    Player,
    Enemy,
    Boss,
    Bullet,
    PowerUp(PowerUpKind),
}

impl SpriteKind {
    /// Body fill colour (CSS)
    pub fn color(&self) -> &'static str {
        match self {
            SpriteKind::Player => "#967969",
            SpriteKind::Enemy => "#808080",
            SpriteKind::Boss => "#404040",
            SpriteKind::Bullet => "yellow",
            SpriteKind::PowerUp(PowerUpKind::Heal) => "lime",
        }
    }

    /// Ear colour and radius as a fraction of width, for cat-shaped sprites
    pub fn ears(&self) -> Option<(&'static str, f32)> {
        match self {
            SpriteKind::Player => Some(("#7c6151", 0.2)),
            SpriteKind::Enemy => Some(("#606060", 0.25)),
            SpriteKind::Boss => Some(("#202020", 0.25)),
            _ => None,
        }
    }
}

/// A rectangle to draw and what it is
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub rect: Aabb,
    pub kind: SpriteKind,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub phase: GamePhase,
    pub score: u64,
    pub level_name: String,
    /// Player health in [0, 1]
    pub health_fraction: f32,
    pub player: Sprite,
    pub enemies: Vec<Sprite>,
    pub bullets: Vec<Sprite>,
    pub power_ups: Vec<Sprite>,
}

impl RenderFrame {
    pub fn capture(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            score: state.score,
            level_name: state.current_level().name.clone(),
            health_fraction: state.player.health_fraction(),
            player: Sprite {
                rect: state.player.aabb(),
                kind: SpriteKind::Player,
            },
            enemies: state
                .enemies
                .iter()
                .map(|e| Sprite {
                    rect: e.aabb(),
                    kind: if e.is_boss {
                        SpriteKind::Boss
                    } else {
                        SpriteKind::Enemy
                    },
                })
                .collect(),
            bullets: state
                .bullets
                .iter()
                .map(|b| Sprite {
                    rect: b.aabb(),
                    kind: SpriteKind::Bullet,
                })
                .collect(),
            power_ups: state
                .power_ups
                .iter()
                .map(|p| Sprite {
                    rect: p.aabb(),
                    kind: SpriteKind::PowerUp(p.kind),
                })
                .collect(),
        }
    }

    /// True when the end screen (and its restart button) should show
    pub fn show_end_screen(&self) -> bool {
        self.phase != GamePhase::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_mirrors_state() {
        let mut state = GameState::new(21);
        state.score = 30;
        state.player.health = 25;
        start_boss_level(&mut state);

        let frame = RenderFrame::capture(&state);
        assert_eq!(frame.score, 30);
        assert_eq!(frame.level_name, "Boss Fight!");
        assert_eq!(frame.health_fraction, 0.25);
        assert_eq!(frame.enemies.len(), 1);
        assert_eq!(frame.enemies[0].kind, SpriteKind::Boss);
        assert_eq!(frame.player.rect, state.player.aabb());
        assert!(!frame.show_end_screen());
    }

    fn start_boss_level(state: &mut GameState) {
        super::super::spawn::start_level(state, 3);
    }

    #[test]
    fn test_end_screen_flag() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::GameOver;
        assert!(RenderFrame::capture(&state).show_end_screen());
        state.phase = GamePhase::Win;
        assert!(RenderFrame::capture(&state).show_end_screen());
    }
}
