//! Campus Survivors - A top-down auto-shooter survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, combat, progression, game state)
//! - `input`: Held-key tracking and input intents
//! - `snapshot`: Read-only view of the world for renderers
//! - `driver`: Frame driver that feeds fixed timesteps into the simulation
//! - `settings`: Run configuration

pub mod driver;
pub mod input;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use driver::Driver;
pub use input::{InputState, Key};
pub use settings::Settings;
pub use snapshot::Snapshot;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, per-tick speeds are tuned for it)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta the driver accepts (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Survive this long to win (seconds)
    pub const SURVIVAL_TARGET_SECS: f32 = 300.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_START_HP: f32 = 100.0;
    pub const PLAYER_START_XP_TO_NEXT: u32 = 10;
    /// Movement speed in units per second (4 units per 60 Hz frame)
    pub const PLAYER_SPEED: f32 = 240.0;

    /// Enemy body size (collision diameter)
    pub const ENEMY_SIZE: f32 = 35.0;

    /// Experience orbs
    pub const XP_ORB_SIZE: f32 = 15.0;
    pub const PICKUP_RANGE: f32 = 50.0;
    pub const MAGNET_RANGE: f32 = 150.0;
    /// Orb pull per tick while inside the magnet radius
    pub const MAGNET_STEP: f32 = 5.0;

    /// Weapons and projectiles
    pub const ACQUISITION_RADIUS: f32 = 500.0;
    pub const PROJECTILE_SPEED: f32 = 8.0;
    pub const PROJECTILE_SPREAD: f32 = 0.3;
    pub const PROJECTILE_BASE_SIZE: f32 = 25.0;
    pub const PROJECTILE_SIZE_PER_LEVEL: f32 = 2.0;
    pub const PROJECTILE_MAX_DISTANCE: f32 = 600.0;
    pub const WEAPON_MAX_LEVEL: u32 = 8;

    /// Spawning
    pub const SPAWN_RING_MIN: f32 = 400.0;
    pub const SPAWN_RING_MAX: f32 = 500.0;
    pub const SPAWN_INTERVAL_START_MS: f32 = 1000.0;
    pub const SPAWN_INTERVAL_MIN_MS: f32 = 200.0;
    /// Interval shrink per elapsed second (ms)
    pub const SPAWN_INTERVAL_DECAY: f32 = 3.0;
    pub const SPAWN_BATCH_MAX: u32 = 3;
    /// Elapsed seconds per extra enemy in a spawn batch
    pub const SPAWN_BATCH_STEP_SECS: f32 = 120.0;
    /// Cap on spawn intervals drained in a single tick
    pub const MAX_SPAWNS_PER_TICK: u32 = 4;
    /// Elapsed seconds per newly unlocked enemy tier
    pub const TIER_UNLOCK_SECS: f32 = 30.0;
    /// Enemy hp grows by 1x per this many elapsed seconds
    pub const HP_SCALE_SECS: f32 = 60.0;

    /// Progression
    pub const XP_GROWTH: f64 = 1.2;
    pub const LEVEL_UP_HEAL: f32 = 10.0;
    pub const UPGRADE_CHOICES: usize = 3;
    pub const MAX_HP_UPGRADE: f32 = 20.0;
}

/// Unit vector from `from` toward `to`, or zero when the points coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Format elapsed seconds as `m:ss` for HUD display
pub fn format_time(seconds: f32) -> String {
    let total = seconds.max(0.0).floor() as u32;
    format!("{}:{:02}", total / 60, total % 60)
}
