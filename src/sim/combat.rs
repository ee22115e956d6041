//! Combat resolution
//!
//! Three passes per tick, run in order by the tick pipeline:
//! 1. enemies chase the player and deal contact damage
//! 2. ready weapons fire volleys at the nearest enemy
//! 3. projectiles advance and resolve hits against enemies
//!
//! Enemy and projectile speeds are per-tick magnitudes; only contact damage
//! scales with `dt`.

use glam::Vec2;

use super::state::{Enemy, GameEvent, GamePhase, GameState, Projectile, XpOrb};
use crate::consts::*;
use crate::direction_to;

/// Distance below which an enemy touches the player
pub const CONTACT_DISTANCE: f32 = PLAYER_SIZE / 2.0 + ENEMY_SIZE / 2.0;

/// Move every enemy toward the player and apply contact damage.
///
/// Returns true if the player died this tick (phase becomes `GameOver`).
pub fn update_enemies(state: &mut GameState, dt: f32) -> bool {
    let target = state.player.pos;
    let mut contact_damage = 0.0;

    for enemy in &mut state.enemies {
        let dist = enemy.pos.distance(target);
        if dist < CONTACT_DISTANCE {
            contact_damage += enemy.damage * dt;
        }
        // Coincident positions give a zero direction, so no displacement
        enemy.pos += direction_to(enemy.pos, target) * enemy.speed;
    }

    if contact_damage > 0.0 && state.player.take_damage(contact_damage) {
        state.set_phase(GamePhase::GameOver);
        state.events.push(GameEvent::GameOver);
        log::info!(
            "Player defeated at {:.1}s (level {}, {} kills)",
            state.elapsed,
            state.player.level,
            state.kills
        );
        return true;
    }
    false
}

/// Index of the nearest enemy strictly inside `radius` of `origin`.
///
/// Ties keep the earliest enemy in collection order.
pub fn find_nearest_enemy(enemies: &[Enemy], origin: Vec2, radius: f32) -> Option<usize> {
    let mut nearest = None;
    let mut nearest_dist = f32::INFINITY;
    for (idx, enemy) in enemies.iter().enumerate() {
        let dist = enemy.pos.distance(origin);
        if dist < nearest_dist && dist < radius {
            nearest_dist = dist;
            nearest = Some(idx);
        }
    }
    nearest
}

/// Angle offsets for a volley of `count` projectiles, centred on zero
pub fn spread_offsets(count: u32) -> Vec<f32> {
    if count <= 1 {
        return vec![0.0; count as usize];
    }
    let mid = (count - 1) as f32 / 2.0;
    (0..count)
        .map(|i| (i as f32 - mid) * PROJECTILE_SPREAD)
        .collect()
}

/// Fire every weapon whose cooldown has elapsed and that has a target.
///
/// Returns the number of projectiles created.
pub fn fire_weapons(state: &mut GameState) -> u32 {
    let now = state.now_ms();
    let origin = state.player.pos;
    let damage_mult = state.stats.damage;
    let cooldown_mult = state.stats.cooldown;

    let Some(target_idx) = find_nearest_enemy(&state.enemies, origin, ACQUISITION_RADIUS) else {
        // No target: nothing fires and cooldowns are left untouched
        return 0;
    };
    let target = state.enemies[target_idx].pos;
    let offset = target - origin;
    let aim = offset.y.atan2(offset.x);

    let mut fired = 0;
    for widx in 0..state.weapons.len() {
        if !state.weapons[widx].ready(now, cooldown_mult) {
            continue;
        }

        let weapon = state.weapons[widx].clone();
        let count = weapon.projectile_count();
        for angle_offset in spread_offsets(count) {
            let angle = aim + angle_offset;
            let id = state.next_entity_id();
            state.projectiles.push(Projectile {
                id,
                weapon: weapon.id,
                pos: origin,
                vel: Vec2::new(angle.cos(), angle.sin()) * PROJECTILE_SPEED,
                damage: weapon.base_damage() * damage_mult,
                pierce: weapon.pierce(),
                hit_enemies: Vec::new(),
                icon: weapon.def().icon.to_string(),
                size: weapon.projectile_size(),
            });
        }

        state.weapons[widx].last_fired_ms = Some(now);
        state.events.push(GameEvent::WeaponFired {
            weapon: weapon.id,
            projectiles: count,
        });
        log::debug!("{} Lv.{} fired {} projectile(s)", weapon.def().name, weapon.level, count);
        fired += count;
    }
    fired
}

/// Advance projectiles, cull distant ones and resolve hits.
///
/// Dead enemies are removed in the same pass and leave an orb behind.
/// Returns the number of enemies killed.
pub fn update_projectiles(state: &mut GameState) -> u32 {
    let anchor = state.player.pos;
    let enemy_radius = ENEMY_SIZE / 2.0;

    for proj in &mut state.projectiles {
        proj.pos += proj.vel;
    }
    state
        .projectiles
        .retain(|p| p.pos.distance(anchor) <= PROJECTILE_MAX_DISTANCE);

    for proj in &mut state.projectiles {
        let hit_radius = proj.size / 2.0 + enemy_radius;
        for enemy in &mut state.enemies {
            if proj.is_spent() {
                break;
            }
            if enemy.is_dead() || proj.has_hit(enemy.id) {
                continue;
            }
            if proj.pos.distance(enemy.pos) < hit_radius {
                enemy.hp -= proj.damage;
                proj.hit_enemies.push(enemy.id);
            }
        }
    }
    state.projectiles.retain(|p| !p.is_spent());

    let mut killed = 0;
    let mut survivors = Vec::with_capacity(state.enemies.len());
    for enemy in std::mem::take(&mut state.enemies) {
        if !enemy.is_dead() {
            survivors.push(enemy);
            continue;
        }
        killed += 1;
        let orb_id = state.next_entity_id();
        state.orbs.push(XpOrb {
            id: orb_id,
            pos: enemy.pos,
            value: enemy.xp_value,
        });
        state.events.push(GameEvent::EnemyKilled {
            enemy_id: enemy.id,
            pos: enemy.pos,
            xp_value: enemy.xp_value,
        });
    }
    state.enemies = survivors;
    state.kills += killed;
    killed
}
