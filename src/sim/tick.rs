//! Simulation tick
//!
//! Core game loop that advances the world by one step. The pipeline order is
//! fixed: clock, victory check, player movement, spawning, enemies, weapons,
//! projectiles, orbs.

use glam::Vec2;

use super::state::{GameEvent, GamePhase, GameState};
use super::{combat, progression, spawner};
use crate::consts::*;
use crate::direction_to;

/// Enemies closer than this push the autopilot away
pub const AUTOPILOT_DANGER_RADIUS: f32 = 220.0;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Movement intent; longer than 1 is clamped to unit length
    pub direction: Vec2,
    /// Start / restart (edge-triggered, only honoured outside play)
    pub confirm: bool,
    /// Idle/demo mode - the autopilot steers the player
    pub autopilot: bool,
}

/// Advance the game state by one step of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if input.confirm && state.phase.accepts_confirm() {
        state.start_run();
        return;
    }

    // Start screen, level-up choice and finished runs don't simulate
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    state.elapsed += dt;

    if state.elapsed >= SURVIVAL_TARGET_SECS {
        state.set_phase(GamePhase::Victory);
        state.events.push(GameEvent::Victory);
        log::info!(
            "Survived {:.0}s! Level {}, {} kills",
            state.elapsed,
            state.player.level,
            state.kills
        );
        return;
    }

    let direction = if input.autopilot {
        autopilot_direction(state)
    } else {
        input.direction.clamp_length_max(1.0)
    };
    state.player.pos += direction * PLAYER_SPEED * state.stats.speed * dt;

    spawner::update_spawns(state, dt);

    if combat::update_enemies(state, dt) {
        return;
    }
    combat::fire_weapons(state);
    combat::update_projectiles(state);
    progression::update_orbs(state);
}

/// Steering for idle/demo mode.
///
/// Flees nearby enemies (closer ones weigh more); when nothing is close,
/// heads for the nearest orb.
pub fn autopilot_direction(state: &GameState) -> Vec2 {
    let pos = state.player.pos;

    let flee = state
        .enemies
        .iter()
        .filter_map(|enemy| {
            let away = pos - enemy.pos;
            let dist = away.length();
            (dist > 0.0 && dist < AUTOPILOT_DANGER_RADIUS).then(|| away / (dist * dist))
        })
        .fold(Vec2::ZERO, |acc, push| acc + push);
    if flee != Vec2::ZERO {
        return flee.normalize_or_zero();
    }

    state
        .orbs
        .iter()
        .min_by(|a, b| {
            a.pos
                .distance_squared(pos)
                .partial_cmp(&b.pos.distance_squared(pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|orb| direction_to(pos, orb.pos))
        .unwrap_or(Vec2::ZERO)
}
