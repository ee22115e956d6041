//! Read-only view of the world for renderers
//!
//! Built after a tick completes. Nothing here can reach back into the
//! simulation.

use glam::Vec2;
use serde::Serialize;

use crate::format_time;
use crate::sim::{
    Enemy, GameEvent, GamePhase, GameState, OwnedWeapon, Player, Projectile, StatMultipliers,
    UpgradeOption, XpOrb,
};

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub elapsed: f32,
    /// Elapsed time as `m:ss`
    pub clock: String,
    pub kills: u32,
    /// Camera focus (the player position)
    pub camera: Vec2,
    pub player: Player,
    /// hp / max_hp in [0, 1]
    pub hp_fraction: f32,
    /// xp / xp_to_next, clamped to [0, 1]
    pub xp_fraction: f32,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub orbs: Vec<XpOrb>,
    pub weapons: Vec<OwnedWeapon>,
    pub stats: StatMultipliers,
    /// Non-empty only during level-up
    pub upgrade_options: Vec<UpgradeOption>,
    /// Events from the tick that produced this snapshot
    pub events: Vec<GameEvent>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = state.player.clone();
        let hp_fraction = if player.max_hp > 0.0 {
            (player.hp / player.max_hp).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let xp_fraction = if player.xp_to_next > 0 {
            (player.xp as f32 / player.xp_to_next as f32).clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            phase: state.phase,
            elapsed: state.elapsed,
            clock: format_time(state.elapsed),
            kills: state.kills,
            camera: state.camera(),
            player,
            hp_fraction,
            xp_fraction,
            enemies: state.enemies.clone(),
            projectiles: state.projectiles.clone(),
            orbs: state.orbs.clone(),
            weapons: state.weapons.clone(),
            stats: state.stats,
            upgrade_options: if state.phase == GamePhase::LevelUp {
                state.upgrade_options.clone()
            } else {
                Vec::new()
            },
            events: state.events.clone(),
        }
    }

    /// Serialize for an out-of-process renderer
    pub fn to_json(&self) -> Option<String> {
        match serde_json::to_string(self) {
            Ok(json) => Some(json),
            Err(e) => {
                log::warn!("Failed to serialize snapshot: {}", e);
                None
            }
        }
    }

    /// One-line HUD summary for logs
    pub fn summary(&self) -> String {
        format!(
            "[{}] {:?} Lv.{} HP {:.0}/{:.0} XP {}/{} kills {} enemies {} weapons {}",
            self.clock,
            self.phase,
            self.player.level,
            self.player.hp,
            self.player.max_hp,
            self.player.xp,
            self.player.xp_to_next,
            self.kills,
            self.enemies.len(),
            self.weapons
                .iter()
                .map(|w| format!("{}:{}", w.id.as_str(), w.level))
                .collect::<Vec<_>>()
                .join(",")
        )
    }

    /// Position relative to the camera, for drawing
    pub fn to_screen(&self, world: Vec2, viewport: Vec2) -> Vec2 {
        world - self.camera + viewport / 2.0
    }
}
