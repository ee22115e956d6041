//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (collections keep insertion order, IDs never reused)
//! - No rendering or platform dependencies

pub mod catalog;
pub mod combat;
pub mod progression;
pub mod spawner;
pub mod state;
pub mod tick;

pub use catalog::{ENEMY_TIERS, EnemyTier, WEAPONS, WeaponDef, WeaponId};
pub use progression::{StatUpgrade, UpgradeKind, UpgradeOption, apply_upgrade};
pub use state::{
    Enemy, GameEvent, GamePhase, GameState, OwnedWeapon, Player, Projectile, StatMultipliers, XpOrb,
};
pub use tick::{TickInput, tick};
