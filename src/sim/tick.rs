//! Fixed timestep simulation tick
//!
//! Core game loop that advances the world by one frame. Movement speeds are
//! expressed per tick; `dt` only drives the fire cooldown clock.

use glam::Vec2;
use rand::Rng;

use super::frame::RenderFrame;
use super::spawn::{reset_game, start_level};
use super::state::{Bullet, GameEvent, GamePhase, GameState, PowerUp, PowerUpKind};
use crate::consts::*;
use crate::hits_restart_button;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement keys
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire toward `pointer` (one-shot, subject to cooldown)
    pub fire: bool,
    /// Last known pointer position in playfield coordinates
    pub pointer: Vec2,
    /// Pointer click this tick (only used by the end screen)
    pub click: Option<Vec2>,
}

/// Advance the game state by one tick and return what to draw
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> RenderFrame {
    state.events.clear();

    // End screen: only the restart button does anything
    if state.phase != GamePhase::Playing {
        if input.click.is_some_and(hits_restart_button) {
            reset_game(state);
        }
        return RenderFrame::capture(state);
    }

    state.time_ticks += 1;
    state.time += dt as f64;

    if input.fire {
        fire(state, input.pointer);
    }

    move_player(state, input);
    move_bullets(state);
    collect_power_ups(state);
    resolve_enemies(state);
    advance_level(state);

    RenderFrame::capture(state)
}

/// Launch a bullet from the player's centre toward `target`
fn fire(state: &mut GameState, target: Vec2) {
    if state.time < state.next_fire_time {
        return;
    }

    let origin = state.player.center();
    let dir = (target - origin).normalize_or_zero();
    if dir == Vec2::ZERO {
        // Aiming at our own centre has no direction; don't burn the cooldown
        return;
    }

    let size = state.tuning.bullet_size;
    state.bullets.push(Bullet {
        pos: origin - Vec2::splat(size / 2.0),
        vel: dir * state.tuning.bullet_speed,
        size,
    });
    state.next_fire_time = state.time + state.tuning.fire_cooldown as f64;
    state.events.push(GameEvent::BulletFired);
}

/// Apply held movement keys, keeping the player fully on the field
fn move_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    let max = Vec2::new(PLAYFIELD_WIDTH - player.size, PLAYFIELD_HEIGHT - player.size);

    if input.up && player.pos.y > 0.0 {
        player.pos.y = (player.pos.y - player.speed).max(0.0);
    }
    if input.down && player.pos.y < max.y {
        player.pos.y = (player.pos.y + player.speed).min(max.y);
    }
    if input.left && player.pos.x > 0.0 {
        player.pos.x = (player.pos.x - player.speed).max(0.0);
    }
    if input.right && player.pos.x < max.x {
        player.pos.x = (player.pos.x + player.speed).min(max.x);
    }
}

fn move_bullets(state: &mut GameState) {
    for bullet in &mut state.bullets {
        bullet.pos += bullet.vel;
    }
    state
        .bullets
        .retain(|b| !b.aabb().is_outside(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT));
}

fn collect_power_ups(state: &mut GameState) {
    let player_box = state.player.aabb();
    let mut collected = Vec::new();
    state.power_ups.retain(|p| {
        let touching = p.aabb().overlaps(&player_box);
        if touching {
            collected.push(p.kind);
        }
        !touching
    });

    for kind in collected {
        match kind {
            PowerUpKind::Heal => state.player.heal(state.tuning.heal_amount),
        }
        log::debug!("Picked up {:?}, health {}", kind, state.player.health);
        state.events.push(GameEvent::PowerUpCollected { kind });
    }
}

/// Chase the player, then resolve enemy/player and enemy/bullet contacts.
///
/// Enemies and bullets are walked newest-first. Removals are recorded in
/// masks and applied once at the end so indices stay valid during the walk.
fn resolve_enemies(state: &mut GameState) {
    let target = state.player.pos;
    let mut enemy_dead = vec![false; state.enemies.len()];
    let mut bullet_spent = vec![false; state.bullets.len()];
    let mut drops: Vec<Vec2> = Vec::new();

    'enemies: for i in (0..state.enemies.len()).rev() {
        state.enemies[i].seek(target);
        let enemy_box = state.enemies[i].aabb();

        // Contact with the player: both take the hit, bullets are skipped
        if enemy_box.overlaps(&state.player.aabb()) {
            state.player.health -= state.tuning.contact_damage;
            enemy_dead[i] = true;
            state.enemies_remaining = state.enemies_remaining.saturating_sub(1);
            state.events.push(GameEvent::PlayerHit {
                health: state.player.health,
            });
            log::debug!("Player hit, health {}", state.player.health);

            if state.player.is_dead() && state.phase == GamePhase::Playing {
                state.phase = GamePhase::GameOver;
                state.events.push(GameEvent::GameOver);
                log::info!(
                    "Game over on level {} with score {}",
                    state.level_index + 1,
                    state.score
                );
            }
            continue;
        }

        for j in (0..state.bullets.len()).rev() {
            if bullet_spent[j] || !state.bullets[j].aabb().overlaps(&enemy_box) {
                continue;
            }
            bullet_spent[j] = true;

            let enemy = &mut state.enemies[i];
            enemy.hp = enemy.hp.saturating_sub(1);
            if enemy.hp == 0 {
                if enemy.is_boss {
                    state.score += state.tuning.boss_score;
                    state.phase = GamePhase::Win;
                    state.events.push(GameEvent::BossDefeated);
                    state.events.push(GameEvent::Victory);
                    log::info!("Boss defeated! Final score {}", state.score);
                    // Nothing else is processed once the run is won
                    break 'enemies;
                }

                let pos = enemy.pos;
                enemy_dead[i] = true;
                state.score += state.tuning.kill_score;
                state.enemies_remaining = state.enemies_remaining.saturating_sub(1);
                state.events.push(GameEvent::EnemyKilled { pos });
                log::debug!("Enemy down, {} remaining", state.enemies_remaining);

                if state.rng.random::<f32>() < state.tuning.power_up_drop_chance {
                    drops.push(pos);
                }
            }
            break;
        }
    }

    let mut idx = 0;
    state.enemies.retain(|_| {
        let keep = !enemy_dead[idx];
        idx += 1;
        keep
    });
    let mut idx = 0;
    state.bullets.retain(|_| {
        let keep = !bullet_spent[idx];
        idx += 1;
        keep
    });

    let size = state.tuning.power_up_size;
    for pos in drops {
        state.power_ups.push(PowerUp {
            pos,
            size,
            kind: PowerUpKind::Heal,
        });
        state.events.push(GameEvent::PowerUpDropped { pos });
    }
}

/// Move to the next level once every enemy of this one is gone
fn advance_level(state: &mut GameState) {
    if state.phase != GamePhase::Playing || state.enemies_remaining > 0 {
        return;
    }

    let next = state.level_index + 1;
    if next < state.tuning.levels.len() {
        start_level(state, next);
    } else {
        // Last level emptied without a boss kill (a boss that crashes into
        // the player, or a campaign with no boss): no boss bonus
        state.phase = GamePhase::Win;
        state.events.push(GameEvent::Victory);
        log::info!("Campaign cleared! Final score {}", state.score);
    }
}
