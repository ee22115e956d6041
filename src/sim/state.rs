//! Game state and core simulation types
//!
//! Everything a run mutates lives in [`GameState`]; subsystems take it by
//! `&mut` and nothing is shared outside a tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::catalog::{EnemyTier, WeaponDef, WeaponId};
use super::progression::UpgradeOption;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the confirm input
    Start,
    /// Active gameplay
    Playing,
    /// Paused while the player picks an upgrade
    LevelUp,
    /// Player died
    GameOver,
    /// Survived the full run
    Victory,
}

impl GamePhase {
    /// Phases in which confirm starts a fresh run
    pub fn accepts_confirm(&self) -> bool {
        matches!(self, GamePhase::Start | GamePhase::GameOver | GamePhase::Victory)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            hp: PLAYER_START_HP,
            max_hp: PLAYER_START_HP,
            level: 1,
            xp: 0,
            xp_to_next: PLAYER_START_XP_TO_NEXT,
        }
    }
}

impl Player {
    /// Apply damage, flooring hp at zero. Returns true if the player is dead.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        self.hp = (self.hp - amount).clamp(0.0, self.max_hp);
        self.hp <= 0.0
    }

    /// Restore hp without exceeding max
    pub fn heal(&mut self, amount: f32) {
        self.hp = (self.hp + amount).clamp(0.0, self.max_hp);
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    /// Units moved per tick
    pub speed: f32,
    /// Contact damage per second
    pub damage: f32,
    pub xp_value: u32,
    pub tier: usize,
    pub icon: String,
}

impl Enemy {
    /// Build an enemy from a tier with hp scaled by `hp_scale`
    pub fn from_tier(id: u32, tier_index: usize, tier: &EnemyTier, pos: Vec2, hp_scale: f32) -> Self {
        let hp = tier.hp * hp_scale;
        Self {
            id,
            pos,
            hp,
            max_hp: hp,
            speed: tier.speed,
            damage: tier.damage,
            xp_value: tier.xp_value,
            tier: tier_index,
            icon: tier.icon.to_string(),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }
}

/// A weapon projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub weapon: WeaponId,
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub damage: f32,
    /// Extra enemies this projectile may damage beyond the first
    pub pierce: u32,
    /// Enemy IDs already damaged (no duplicates)
    pub hit_enemies: Vec<u32>,
    pub icon: String,
    /// Visual and collision diameter
    pub size: f32,
}

impl Projectile {
    /// True once the pierce budget is exhausted
    pub fn is_spent(&self) -> bool {
        self.hit_enemies.len() as u32 > self.pierce
    }

    pub fn has_hit(&self, enemy_id: u32) -> bool {
        self.hit_enemies.contains(&enemy_id)
    }
}

/// An experience orb dropped by a dead enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XpOrb {
    pub id: u32,
    pub pos: Vec2,
    pub value: u32,
}

/// A weapon the player owns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedWeapon {
    pub id: WeaponId,
    pub level: u32,
    /// Simulation time (ms) of the last volley, `None` until the first one
    pub last_fired_ms: Option<f64>,
}

impl OwnedWeapon {
    pub fn new(id: WeaponId) -> Self {
        Self {
            id,
            level: 1,
            last_fired_ms: None,
        }
    }

    pub fn def(&self) -> &'static WeaponDef {
        self.id.def()
    }

    /// Whether the (multiplier-adjusted) cooldown has elapsed at `now_ms`
    pub fn ready(&self, now_ms: f64, cooldown_mult: f32) -> bool {
        match self.last_fired_ms {
            None => true,
            Some(last) => now_ms - last >= (self.def().cooldown_ms / cooldown_mult) as f64,
        }
    }

    /// Projectiles per volley
    pub fn projectile_count(&self) -> u32 {
        self.def().projectile_count + self.level / 2
    }

    /// Per-projectile damage before the global multiplier
    pub fn base_damage(&self) -> f32 {
        self.def().damage + self.level as f32 * 3.0
    }

    pub fn pierce(&self) -> u32 {
        self.def().pierce + self.level / 3
    }

    pub fn projectile_size(&self) -> f32 {
        PROJECTILE_BASE_SIZE + self.level as f32 * PROJECTILE_SIZE_PER_LEVEL
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= WEAPON_MAX_LEVEL
    }
}

/// Run-wide stat multipliers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatMultipliers {
    pub damage: f32,
    pub speed: f32,
    /// Divides weapon cooldowns (higher is faster)
    pub cooldown: f32,
    pub pickup_range: f32,
    /// Tracks max hp upgrades taken (+0.2 each)
    pub max_hp: f32,
}

impl Default for StatMultipliers {
    fn default() -> Self {
        Self {
            damage: 1.0,
            speed: 1.0,
            cooldown: 1.0,
            pickup_range: 1.0,
            max_hp: 1.0,
        }
    }
}

/// Things that happened during the last tick, for renderer effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    WeaponFired { weapon: WeaponId, projectiles: u32 },
    EnemyKilled { enemy_id: u32, pos: Vec2, xp_value: u32 },
    OrbCollected { value: u32 },
    LevelUp { level: u32 },
    UpgradeApplied { option: UpgradeOption },
    GameOver,
    Victory,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG driving spawns and upgrade shuffles
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Seconds survived in the current run
    pub elapsed: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub kills: u32,
    pub player: Player,
    /// Active enemies (in spawn order)
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub orbs: Vec<XpOrb>,
    /// Owned weapons (in acquisition order)
    pub weapons: Vec<OwnedWeapon>,
    pub stats: StatMultipliers,
    /// Choices offered while in `LevelUp`
    pub upgrade_options: Vec<UpgradeOption>,
    /// Milliseconds accumulated toward the next spawn
    pub spawn_clock_ms: f32,
    /// Events produced by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed, waiting on the start screen
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            elapsed: 0.0,
            time_ticks: 0,
            kills: 0,
            player: Player::default(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            orbs: Vec::new(),
            weapons: Vec::new(),
            stats: StatMultipliers::default(),
            upgrade_options: Vec::new(),
            spawn_clock_ms: 0.0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Reset the world to the initial run conditions and begin playing.
    ///
    /// The RNG keeps its stream so consecutive runs differ.
    pub fn start_run(&mut self) {
        self.phase = GamePhase::Playing;
        self.elapsed = 0.0;
        self.time_ticks = 0;
        self.kills = 0;
        self.player = Player::default();
        self.enemies.clear();
        self.projectiles.clear();
        self.orbs.clear();
        self.weapons = vec![OwnedWeapon::new(WeaponId::Book)];
        self.stats = StatMultipliers::default();
        self.upgrade_options.clear();
        self.spawn_clock_ms = 0.0;
        self.events.push(GameEvent::RunStarted);
        log::info!("Run started (seed {})", self.seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Simulation clock in milliseconds, used for weapon cooldowns
    pub fn now_ms(&self) -> f64 {
        self.elapsed as f64 * 1000.0
    }

    /// Camera focus (always the player)
    pub fn camera(&self) -> Vec2 {
        self.player.pos
    }

    /// Switch phase, cancelling the spawn timer whenever play stops
    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase == phase {
            return;
        }
        log::info!("Phase {:?} -> {:?}", self.phase, phase);
        if phase != GamePhase::Playing {
            self.spawn_clock_ms = 0.0;
        }
        self.phase = phase;
    }

    pub fn weapon(&self, id: WeaponId) -> Option<&OwnedWeapon> {
        self.weapons.iter().find(|w| w.id == id)
    }

    pub fn weapon_mut(&mut self, id: WeaponId) -> Option<&mut OwnedWeapon> {
        self.weapons.iter_mut().find(|w| w.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_waits_on_start() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Start);
        assert!(state.weapons.is_empty());
        assert_eq!(state.player.hp, PLAYER_START_HP);
    }

    #[test]
    fn test_start_run_resets_world() {
        let mut state = GameState::new(7);
        state.start_run();
        state.kills = 12;
        state.elapsed = 45.0;
        state.player.hp = 3.0;
        state.stats.damage = 2.0;
        state.weapons.push(OwnedWeapon::new(WeaponId::Laptop));
        let id = state.next_entity_id();
        state.orbs.push(XpOrb { id, pos: Vec2::ONE, value: 5 });
        state.set_phase(GamePhase::GameOver);

        state.start_run();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.kills, 0);
        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.player.hp, PLAYER_START_HP);
        assert_eq!(state.stats, StatMultipliers::default());
        assert!(state.orbs.is_empty());
        assert_eq!(state.weapons.len(), 1);
        assert_eq!(state.weapons[0].id, WeaponId::Book);
        assert_eq!(state.weapons[0].level, 1);
    }

    #[test]
    fn test_player_damage_floors_at_zero() {
        let mut player = Player::default();
        assert!(!player.take_damage(30.0));
        assert_eq!(player.hp, 70.0);
        assert!(player.take_damage(500.0));
        assert_eq!(player.hp, 0.0);
        player.heal(1000.0);
        assert_eq!(player.hp, player.max_hp);
    }

    #[test]
    fn test_weapon_scaling_by_level() {
        let mut w = OwnedWeapon::new(WeaponId::Book);
        assert_eq!(w.projectile_count(), 1);
        assert_eq!(w.pierce(), 1);
        assert_eq!(w.base_damage(), 13.0);
        w.level = 6;
        assert_eq!(w.projectile_count(), 4);
        assert_eq!(w.pierce(), 3);
        assert_eq!(w.projectile_size(), 37.0);
    }

    #[test]
    fn test_weapon_ready_respects_multiplier() {
        let mut w = OwnedWeapon::new(WeaponId::Book);
        assert!(w.ready(0.0, 1.0));
        w.last_fired_ms = Some(1000.0);
        assert!(!w.ready(2000.0, 1.0));
        assert!(w.ready(2200.0, 1.0));
        // 1200 / 1.2 = 1000ms
        assert!(w.ready(2000.0, 1.2));
    }

    #[test]
    fn test_leaving_playing_cancels_spawn_clock() {
        let mut state = GameState::new(3);
        state.start_run();
        state.spawn_clock_ms = 850.0;
        state.set_phase(GamePhase::LevelUp);
        assert_eq!(state.spawn_clock_ms, 0.0);
    }
}
