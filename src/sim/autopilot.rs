//! Idle/demo mode - the game plays itself
//!
//! Produces a `TickInput` from the current state: aim at the nearest enemy,
//! keep firing, and back away from anything that gets too close.

use glam::Vec2;

use super::state::GameState;
use super::tick::TickInput;
use crate::consts::*;

/// Enemies closer than this (centre to centre) make the player retreat
const DANGER_RADIUS: f32 = 160.0;
/// How close to the field centre counts as "home" when idling
const HOME_DEADZONE: f32 = 12.0;
/// Distance from a wall at which retreating turns back toward the centre
const WALL_MARGIN: f32 = 40.0;

/// Compute the input an attentive player would give this tick
pub fn autopilot_input(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    if !state.is_playing() {
        return input;
    }

    let me = state.player.center();
    let nearest = state
        .enemies
        .iter()
        .map(|e| e.aabb().center())
        .min_by(|a, b| {
            a.distance_squared(me)
                .partial_cmp(&b.distance_squared(me))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(target) = nearest else {
        return input;
    };

    input.pointer = target;
    input.fire = true;

    let home = Vec2::new(PLAYFIELD_WIDTH / 2.0, PLAYFIELD_HEIGHT / 2.0);
    let steer = if me.distance(target) < DANGER_RADIUS {
        let mut away = me - target;
        // Pinned against a wall: slide back toward the middle on that axis
        let half = state.player.size / 2.0;
        if me.x - half < WALL_MARGIN || me.x + half > PLAYFIELD_WIDTH - WALL_MARGIN {
            away.x = home.x - me.x;
        }
        if me.y - half < WALL_MARGIN || me.y + half > PLAYFIELD_HEIGHT - WALL_MARGIN {
            away.y = home.y - me.y;
        }
        away
    } else {
        let to_home = home - me;
        if to_home.length() < HOME_DEADZONE {
            Vec2::ZERO
        } else {
            to_home
        }
    };

    input.left = steer.x < -0.5;
    input.right = steer.x > 0.5;
    input.up = steer.y < -0.5;
    input.down = steer.y > 0.5;

    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;
    use crate::sim::tick::tick;

    #[test]
    fn test_aims_at_nearest_enemy() {
        let mut state = GameState::new(1);
        state.enemies.truncate(2);
        state.enemies[0].pos = Vec2::new(700.0, 280.0);
        state.enemies[0].size = 40.0;
        state.enemies[1].pos = Vec2::new(20.0, 20.0);
        state.enemies[1].size = 40.0;

        let input = autopilot_input(&state);
        assert!(input.fire);
        assert_eq!(input.pointer, Vec2::new(720.0, 300.0));
        // Threat is far and we're home: stand still
        assert!(!input.left && !input.right && !input.up && !input.down);
    }

    #[test]
    fn test_retreats_from_close_enemy() {
        let mut state = GameState::new(2);
        state.enemies.truncate(1);
        state.enemies[0].pos = Vec2::new(300.0, 285.0);
        state.enemies[0].size = 30.0;

        let input = autopilot_input(&state);
        assert!(input.right);
        assert!(!input.left);
    }

    #[test]
    fn test_idle_on_end_screen() {
        let mut state = GameState::new(3);
        state.phase = GamePhase::GameOver;
        let input = autopilot_input(&state);
        assert!(!input.fire);
    }

    #[test]
    fn test_autopilot_makes_progress() {
        let mut state = GameState::new(2024);
        for _ in 0..60 * 30 {
            if !state.is_playing() {
                break;
            }
            let input = autopilot_input(&state);
            tick(&mut state, &input, crate::consts::SIM_DT);
        }
        assert!(state.score > 0 || state.phase != GamePhase::Playing);
    }
}
