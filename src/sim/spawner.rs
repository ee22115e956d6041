//! Enemy spawning
//!
//! Enemies appear on a ring around the player. The tier pool, enemy hp, spawn
//! rate and batch size all grow with elapsed time.

use rand::Rng;

use super::catalog::ENEMY_TIERS;
use super::state::{Enemy, GameState};
use crate::consts::*;
use crate::polar_to_cartesian;

/// Highest tier index selectable at `elapsed` seconds
pub fn max_tier_index(elapsed: f32) -> usize {
    let unlocked = (elapsed.max(0.0) / TIER_UNLOCK_SECS).floor() as usize;
    unlocked.min(ENEMY_TIERS.len() - 1)
}

/// Hp multiplier applied to enemies spawned at `elapsed` seconds
pub fn hp_multiplier(elapsed: f32) -> f32 {
    1.0 + elapsed.max(0.0) / HP_SCALE_SECS
}

/// Milliseconds between spawns at `elapsed` seconds
pub fn spawn_interval_ms(elapsed: f32) -> f32 {
    (SPAWN_INTERVAL_START_MS - elapsed.max(0.0) * SPAWN_INTERVAL_DECAY).max(SPAWN_INTERVAL_MIN_MS)
}

/// Enemies created per spawn interval at `elapsed` seconds
pub fn spawn_batch_size(elapsed: f32) -> u32 {
    let extra = (elapsed.max(0.0) / SPAWN_BATCH_STEP_SECS).floor() as u32;
    (1 + extra).min(SPAWN_BATCH_MAX)
}

/// Create one enemy around the player, scaled for the current time.
///
/// The enemy is pushed onto `state.enemies` and its ID returned.
pub fn spawn_enemy(state: &mut GameState) -> u32 {
    let elapsed = state.elapsed;
    let tier_index = state.rng.random_range(0..=max_tier_index(elapsed));
    let tier = &ENEMY_TIERS[tier_index];

    let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
    let distance = state.rng.random_range(SPAWN_RING_MIN..SPAWN_RING_MAX);
    let pos = state.player.pos + polar_to_cartesian(distance, angle);

    let id = state.next_entity_id();
    let enemy = Enemy::from_tier(id, tier_index, tier, pos, hp_multiplier(elapsed));
    log::debug!(
        "Spawned {} #{} (hp {:.0}) at ({:.0}, {:.0})",
        tier.name,
        id,
        enemy.hp,
        pos.x,
        pos.y
    );
    state.enemies.push(enemy);
    id
}

/// Advance the spawn clock by `dt` and spawn any batches that came due.
///
/// Returns the number of enemies created.
pub fn update_spawns(state: &mut GameState, dt: f32) -> u32 {
    state.spawn_clock_ms += dt * 1000.0;

    let mut spawned = 0;
    let mut intervals = 0;
    loop {
        let interval = spawn_interval_ms(state.elapsed);
        if state.spawn_clock_ms < interval {
            break;
        }
        if intervals >= MAX_SPAWNS_PER_TICK {
            // Drop the backlog rather than flooding the arena after a stall
            state.spawn_clock_ms = 0.0;
            break;
        }
        state.spawn_clock_ms -= interval;
        intervals += 1;
        for _ in 0..spawn_batch_size(state.elapsed) {
            spawn_enemy(state);
            spawned += 1;
        }
    }
    spawned
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        state.start_run();
        state
    }

    #[test]
    fn test_tier_pool_grows_with_time() {
        assert_eq!(max_tier_index(0.0), 0);
        assert_eq!(max_tier_index(29.9), 0);
        assert_eq!(max_tier_index(30.0), 1);
        assert_eq!(max_tier_index(95.0), 3);
        assert_eq!(max_tier_index(10_000.0), ENEMY_TIERS.len() - 1);
    }

    #[test]
    fn test_spawn_interval_has_floor() {
        assert_eq!(spawn_interval_ms(0.0), 1000.0);
        assert_eq!(spawn_interval_ms(100.0), 700.0);
        assert_eq!(spawn_interval_ms(299.0), SPAWN_INTERVAL_MIN_MS);
    }

    #[test]
    fn test_batch_size_is_capped() {
        assert_eq!(spawn_batch_size(0.0), 1);
        assert_eq!(spawn_batch_size(120.0), 2);
        assert_eq!(spawn_batch_size(1000.0), SPAWN_BATCH_MAX);
    }

    #[test]
    fn test_spawn_on_ring_around_player() {
        let mut state = playing_state(42);
        state.player.pos = Vec2::new(1000.0, -250.0);
        for _ in 0..200 {
            spawn_enemy(&mut state);
        }
        for enemy in &state.enemies {
            let dist = enemy.pos.distance(state.player.pos);
            assert!(dist >= SPAWN_RING_MIN - 0.01 && dist < SPAWN_RING_MAX + 0.01, "dist {dist}");
            assert_eq!(enemy.tier, 0);
            assert_eq!(enemy.hp, enemy.max_hp);
        }
    }

    #[test]
    fn test_spawned_hp_scales_with_time() {
        let mut state = playing_state(5);
        state.elapsed = 60.0;
        spawn_enemy(&mut state);
        let enemy = &state.enemies[0];
        let base = ENEMY_TIERS[enemy.tier].hp;
        assert!((enemy.max_hp - base * 2.0).abs() < 1e-3);
        assert!(enemy.tier <= 2);
    }

    #[test]
    fn test_update_spawns_waits_for_interval() {
        let mut state = playing_state(9);
        assert_eq!(update_spawns(&mut state, 0.5), 0);
        assert_eq!(update_spawns(&mut state, 0.5), 1);
        assert_eq!(state.enemies.len(), 1);
        assert!(state.spawn_clock_ms.abs() < 1e-3);
    }

    #[test]
    fn test_update_spawns_bounded_after_stall() {
        let mut state = playing_state(9);
        let spawned = update_spawns(&mut state, 60.0);
        assert_eq!(spawned, MAX_SPAWNS_PER_TICK);
        assert_eq!(state.spawn_clock_ms, 0.0);
    }

    #[test]
    fn test_spawn_ids_unique() {
        let mut state = playing_state(11);
        let a = spawn_enemy(&mut state);
        let b = spawn_enemy(&mut state);
        assert_ne!(a, b);
    }
}
