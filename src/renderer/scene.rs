//! Draw-list generation for a single frame
//!
//! Turns a `RenderFrame` into backend-agnostic primitives. Draw order is
//! back to front: power-ups, bullets, enemies, player, HUD, end screen.

use glam::Vec2;

use crate::consts::*;
use crate::sim::collision::Aabb;
use crate::sim::frame::{RenderFrame, Sprite};
use crate::sim::state::GamePhase;

const HUD_FONT: &str = "24px Arial";
const BUTTON_FONT: &str = "30px Arial";
const END_OVERLAY: &str = "rgba(255, 255, 255, 0.7)";
const BUTTON_COLOR: &str = "#4CAF50";

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Start,
    Center,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Start => "start",
            TextAlign::Center => "center",
        }
    }
}

/// A single drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// Wipe the whole playfield
    Clear,
    FillRect {
        rect: Aabb,
        color: &'static str,
    },
    StrokeRect {
        rect: Aabb,
        color: &'static str,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: &'static str,
    },
    Text {
        text: String,
        pos: Vec2,
        font: &'static str,
        align: TextAlign,
        color: &'static str,
    },
}

/// Build the full draw list for a frame
pub fn build_scene(frame: &RenderFrame) -> Vec<DrawCmd> {
    let mut cmds = Vec::with_capacity(
        8 + frame.power_ups.len() + frame.bullets.len() + frame.enemies.len() * 3,
    );
    cmds.push(DrawCmd::Clear);

    for sprite in frame.power_ups.iter().chain(&frame.bullets) {
        push_sprite(&mut cmds, sprite);
    }
    for sprite in &frame.enemies {
        push_sprite(&mut cmds, sprite);
    }
    push_sprite(&mut cmds, &frame.player);

    push_hud(&mut cmds, frame);

    if frame.show_end_screen() {
        push_end_screen(&mut cmds, frame);
    }

    cmds
}

/// Body rectangle plus, for cats, two ears on the top edge
fn push_sprite(cmds: &mut Vec<DrawCmd>, sprite: &Sprite) {
    cmds.push(DrawCmd::FillRect {
        rect: sprite.rect,
        color: sprite.kind.color(),
    });

    if let Some((color, radius_frac)) = sprite.kind.ears() {
        let Aabb { min, size } = sprite.rect;
        let radius = size.x * radius_frac;
        for offset in [0.25, 0.75] {
            cmds.push(DrawCmd::FillCircle {
                center: Vec2::new(min.x + size.x * offset, min.y),
                radius,
                color,
            });
        }
    }
}

fn push_hud(cmds: &mut Vec<DrawCmd>, frame: &RenderFrame) {
    cmds.push(DrawCmd::Text {
        text: format!("Score: {}", frame.score),
        pos: Vec2::new(20.0, 40.0),
        font: HUD_FONT,
        align: TextAlign::Start,
        color: "black",
    });
    cmds.push(DrawCmd::Text {
        text: frame.level_name.clone(),
        pos: Vec2::new(PLAYFIELD_WIDTH / 2.0, 40.0),
        font: HUD_FONT,
        align: TextAlign::Center,
        color: "black",
    });

    let bar_min = Vec2::new(HEALTH_BAR_X, HEALTH_BAR_Y);
    cmds.push(DrawCmd::FillRect {
        rect: Aabb::new(bar_min, Vec2::new(HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT)),
        color: "#555",
    });
    cmds.push(DrawCmd::FillRect {
        rect: Aabb::new(
            bar_min,
            Vec2::new(frame.health_fraction * HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT),
        ),
        color: "lime",
    });
    cmds.push(DrawCmd::StrokeRect {
        rect: Aabb::new(bar_min, Vec2::new(HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT)),
        color: "black",
    });
}

fn push_end_screen(cmds: &mut Vec<DrawCmd>, frame: &RenderFrame) {
    let mid = Vec2::new(PLAYFIELD_WIDTH / 2.0, PLAYFIELD_HEIGHT / 2.0);
    cmds.push(DrawCmd::FillRect {
        rect: Aabb::new(Vec2::ZERO, Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT)),
        color: END_OVERLAY,
    });

    let score_font = match frame.phase {
        GamePhase::GameOver => {
            cmds.push(DrawCmd::Text {
                text: "Game Over".to_string(),
                pos: mid - Vec2::new(0.0, 60.0),
                font: "60px Arial",
                align: TextAlign::Center,
                color: "black",
            });
            "30px Arial"
        }
        _ => "50px Arial",
    };
    cmds.push(DrawCmd::Text {
        text: format!("Final Score: {}", frame.score),
        pos: mid,
        font: score_font,
        align: TextAlign::Center,
        color: "black",
    });

    cmds.push(DrawCmd::FillRect {
        rect: Aabb::new(
            Vec2::new(RESTART_BUTTON_X, RESTART_BUTTON_Y),
            Vec2::new(RESTART_BUTTON_WIDTH, RESTART_BUTTON_HEIGHT),
        ),
        color: BUTTON_COLOR,
    });
    cmds.push(DrawCmd::Text {
        text: "Restart".to_string(),
        pos: Vec2::new(mid.x, RESTART_BUTTON_Y + 35.0),
        font: BUTTON_FONT,
        align: TextAlign::Center,
        color: "white",
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    fn texts(cmds: &[DrawCmd]) -> Vec<&str> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCmd::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_playing_scene() {
        let state = GameState::new(5);
        let frame = RenderFrame::capture(&state);
        let cmds = build_scene(&frame);

        assert_eq!(cmds[0], DrawCmd::Clear);
        assert_eq!(texts(&cmds), vec!["Score: 0", "Level 1"]);
        // 3 enemies + player, each with two ears
        let ears = cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::FillCircle { .. }))
            .count();
        assert_eq!(ears, 8);
        assert!(!cmds.iter().any(|c| matches!(
            c,
            DrawCmd::FillRect { color: BUTTON_COLOR, .. }
        )));
    }

    #[test]
    fn test_player_ears() {
        let state = GameState::new(6);
        let frame = RenderFrame::capture(&state);
        let cmds = build_scene(&frame);
        assert!(cmds.contains(&DrawCmd::FillCircle {
            center: Vec2::new(375.0 + 12.5, 275.0),
            radius: 10.0,
            color: "#7c6151",
        }));
    }

    #[test]
    fn test_health_bar_width() {
        let mut state = GameState::new(7);
        state.player.health = 40;
        let cmds = build_scene(&RenderFrame::capture(&state));
        assert!(cmds.contains(&DrawCmd::FillRect {
            rect: Aabb::new(Vec2::new(20.0, 60.0), Vec2::new(80.0, 20.0)),
            color: "lime",
        }));
    }

    #[test]
    fn test_game_over_screen() {
        let mut state = GameState::new(8);
        state.score = 70;
        state.phase = GamePhase::GameOver;
        let cmds = build_scene(&RenderFrame::capture(&state));
        let labels = texts(&cmds);
        assert!(labels.contains(&"Game Over"));
        assert!(labels.contains(&"Final Score: 70"));
        assert!(labels.contains(&"Restart"));
    }

    #[test]
    fn test_win_screen() {
        let mut state = GameState::new(9);
        state.score = 400;
        state.phase = GamePhase::Win;
        let cmds = build_scene(&RenderFrame::capture(&state));
        let labels = texts(&cmds);
        assert!(!labels.contains(&"Game Over"));
        assert!(labels.contains(&"Final Score: 400"));
        assert!(cmds.contains(&DrawCmd::FillRect {
            rect: Aabb::new(Vec2::new(300.0, 350.0), Vec2::new(200.0, 50.0)),
            color: BUTTON_COLOR,
        }));
    }
}
