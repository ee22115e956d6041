//! Experience, leveling and upgrades

use std::str::FromStr;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::catalog::WeaponId;
use super::state::{GameEvent, GamePhase, GameState, OwnedWeapon};
use crate::consts::*;
use crate::direction_to;

/// Stat upgrades always present in the upgrade pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatUpgrade {
    Damage,
    Speed,
    MaxHp,
    Cooldown,
    PickupRange,
}

impl StatUpgrade {
    pub const ALL: [StatUpgrade; 5] = [
        StatUpgrade::Damage,
        StatUpgrade::Speed,
        StatUpgrade::MaxHp,
        StatUpgrade::Cooldown,
        StatUpgrade::PickupRange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatUpgrade::Damage => "damage",
            StatUpgrade::Speed => "speed",
            StatUpgrade::MaxHp => "maxHp",
            StatUpgrade::Cooldown => "cooldown",
            StatUpgrade::PickupRange => "pickupRange",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatUpgrade::Damage => "Damage +10%",
            StatUpgrade::Speed => "Move Speed +10%",
            StatUpgrade::MaxHp => "Max HP +20",
            StatUpgrade::Cooldown => "Cooldown -10%",
            StatUpgrade::PickupRange => "Pickup Range +20%",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            StatUpgrade::Damage => "⚔️",
            StatUpgrade::Speed => "👟",
            StatUpgrade::MaxHp => "❤️",
            StatUpgrade::Cooldown => "⏱️",
            StatUpgrade::PickupRange => "🧲",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StatUpgrade::Damage => "All weapons deal more damage",
            StatUpgrade::Speed => "Move faster",
            StatUpgrade::MaxHp => "Raise the health cap",
            StatUpgrade::Cooldown => "Weapons fire more often",
            StatUpgrade::PickupRange => "Collect experience from farther away",
        }
    }
}

impl FromStr for StatUpgrade {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatUpgrade::ALL
            .into_iter()
            .find(|stat| stat.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// What an upgrade option does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "lowercase")]
pub enum UpgradeKind {
    /// Level up an owned weapon, or acquire it at level 1
    Weapon(WeaponId),
    Stat(StatUpgrade),
}

impl UpgradeKind {
    /// Parse the `(type, id)` pair an external UI sends back
    pub fn from_parts(kind: &str, id: &str) -> Option<Self> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "weapon" => id.parse::<WeaponId>().ok().map(UpgradeKind::Weapon),
            "stat" => id.parse::<StatUpgrade>().ok().map(UpgradeKind::Stat),
            _ => None,
        }
    }
}

/// A choice offered on level-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeOption {
    pub kind: UpgradeKind,
    pub name: String,
    pub icon: String,
    pub description: String,
}

impl UpgradeOption {
    fn weapon_level_up(weapon: &OwnedWeapon) -> Self {
        let def = weapon.def();
        Self {
            kind: UpgradeKind::Weapon(weapon.id),
            name: format!("{} Lv.{}", def.name, weapon.level + 1),
            icon: def.icon.to_string(),
            description: format!("Power up the {}!", def.name),
        }
    }

    fn weapon_acquire(id: WeaponId) -> Self {
        let def = id.def();
        Self {
            kind: UpgradeKind::Weapon(id),
            name: def.name.to_string(),
            icon: def.icon.to_string(),
            description: def.description.to_string(),
        }
    }

    fn stat(stat: StatUpgrade) -> Self {
        Self {
            kind: UpgradeKind::Stat(stat),
            name: stat.name().to_string(),
            icon: stat.icon().to_string(),
            description: stat.description().to_string(),
        }
    }
}

/// Pull orbs inside the magnet radius and collect those in pickup range.
///
/// Collection stops at the first level-up so each level gets its own choice.
/// Returns true if a level-up happened (phase becomes `LevelUp`).
pub fn update_orbs(state: &mut GameState) -> bool {
    let player_pos = state.player.pos;
    let pickup = PICKUP_RANGE * state.stats.pickup_range;
    let magnet = MAGNET_RANGE * state.stats.pickup_range;

    let mut idx = 0;
    while idx < state.orbs.len() {
        let dist = state.orbs[idx].pos.distance(player_pos);

        if dist < pickup {
            let orb = state.orbs.remove(idx);
            state.events.push(GameEvent::OrbCollected { value: orb.value });
            if gain_xp(state, orb.value) {
                enter_level_up(state);
                return true;
            }
            continue;
        }

        if dist < magnet {
            let orb = &mut state.orbs[idx];
            orb.pos += direction_to(orb.pos, player_pos) * MAGNET_STEP;
        }
        idx += 1;
    }
    false
}

/// Add experience and evaluate a single level-up.
///
/// Leftover xp is not cascaded into further levels. Returns true on level-up.
pub fn gain_xp(state: &mut GameState, value: u32) -> bool {
    let player = &mut state.player;
    player.xp += value;
    if player.xp < player.xp_to_next {
        return false;
    }

    player.level += 1;
    player.xp -= player.xp_to_next;
    player.xp_to_next = (player.xp_to_next as f64 * XP_GROWTH).floor() as u32;
    player.heal(LEVEL_UP_HEAL);
    if player.xp >= player.xp_to_next {
        log::debug!(
            "Level {} reached with {} xp already past the next threshold {}",
            player.level,
            player.xp,
            player.xp_to_next
        );
    }
    true
}

/// Pause for an upgrade choice with freshly rolled options
pub fn enter_level_up(state: &mut GameState) {
    state.upgrade_options = generate_upgrade_options(state);
    state.set_phase(GamePhase::LevelUp);
    state.events.push(GameEvent::LevelUp {
        level: state.player.level,
    });
    log::info!(
        "Level up! Now level {} (next at {} xp)",
        state.player.level,
        state.player.xp_to_next
    );
}

/// Every option currently eligible, before shuffling
pub fn upgrade_pool(state: &GameState) -> Vec<UpgradeOption> {
    let mut pool: Vec<UpgradeOption> = state
        .weapons
        .iter()
        .filter(|w| !w.is_max_level())
        .map(UpgradeOption::weapon_level_up)
        .collect();

    pool.extend(
        WeaponId::ALL
            .into_iter()
            .filter(|id| state.weapon(*id).is_none())
            .map(UpgradeOption::weapon_acquire),
    );
    pool.extend(StatUpgrade::ALL.into_iter().map(UpgradeOption::stat));
    pool
}

/// Shuffle the eligible pool and keep the first few
pub fn generate_upgrade_options(state: &mut GameState) -> Vec<UpgradeOption> {
    let mut pool = upgrade_pool(state);
    pool.shuffle(&mut state.rng);
    pool.truncate(UPGRADE_CHOICES);
    pool
}

/// Apply the offered option at `index` and resume play.
///
/// Outside `LevelUp`, or with an index that was not offered, nothing happens
/// and false is returned.
pub fn apply_upgrade(state: &mut GameState, index: usize) -> bool {
    if state.phase != GamePhase::LevelUp {
        log::warn!("Ignoring upgrade selection outside level-up ({:?})", state.phase);
        return false;
    }
    let Some(option) = state.upgrade_options.get(index).cloned() else {
        log::warn!(
            "Ignoring upgrade selection {} ({} offered)",
            index,
            state.upgrade_options.len()
        );
        return false;
    };

    if !apply_upgrade_kind(state, option.kind) {
        log::warn!("Upgrade {:?} had no effect", option.kind);
    }
    state.upgrade_options.clear();
    state.set_phase(GamePhase::Playing);
    state.events.push(GameEvent::UpgradeApplied { option });
    true
}

/// Apply an upgrade's effect to weapons or stats. Returns false for a no-op.
pub fn apply_upgrade_kind(state: &mut GameState, kind: UpgradeKind) -> bool {
    match kind {
        UpgradeKind::Weapon(id) => match state.weapon_mut(id) {
            Some(weapon) if weapon.is_max_level() => false,
            Some(weapon) => {
                weapon.level += 1;
                log::info!("{} upgraded to Lv.{}", id.def().name, weapon.level);
                true
            }
            None => {
                state.weapons.push(OwnedWeapon::new(id));
                log::info!("Acquired {}", id.def().name);
                true
            }
        },
        UpgradeKind::Stat(stat) => {
            let stats = &mut state.stats;
            match stat {
                StatUpgrade::Damage => stats.damage *= 1.1,
                StatUpgrade::Speed => stats.speed *= 1.1,
                StatUpgrade::Cooldown => stats.cooldown *= 1.1,
                StatUpgrade::PickupRange => stats.pickup_range *= 1.2,
                StatUpgrade::MaxHp => {
                    stats.max_hp += 0.2;
                    state.player.max_hp += MAX_HP_UPGRADE;
                    state.player.heal(MAX_HP_UPGRADE);
                }
            }
            true
        }
    }
}
