//! Static weapon and enemy definitions
//!
//! Pure data. Lookup is by id for weapons and by tier index for enemies.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Weapon identifiers, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponId {
    Book,
    Pencil,
    Coffee,
    Laptop,
    Eraser,
}

impl WeaponId {
    /// Every weapon in catalog iteration order
    pub const ALL: [WeaponId; 5] = [
        WeaponId::Book,
        WeaponId::Pencil,
        WeaponId::Coffee,
        WeaponId::Laptop,
        WeaponId::Eraser,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponId::Book => "book",
            WeaponId::Pencil => "pencil",
            WeaponId::Coffee => "coffee",
            WeaponId::Laptop => "laptop",
            WeaponId::Eraser => "eraser",
        }
    }

    /// Catalog entry for this weapon
    pub fn def(&self) -> &'static WeaponDef {
        match self {
            WeaponId::Book => &WEAPONS[0],
            WeaponId::Pencil => &WEAPONS[1],
            WeaponId::Coffee => &WEAPONS[2],
            WeaponId::Laptop => &WEAPONS[3],
            WeaponId::Eraser => &WEAPONS[4],
        }
    }
}

impl FromStr for WeaponId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeaponId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

/// Weapon base stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponDef {
    pub id: WeaponId,
    pub name: &'static str,
    pub icon: &'static str,
    pub damage: f32,
    /// Milliseconds between volleys at cooldown multiplier 1.0
    pub cooldown_ms: f32,
    pub projectile_count: u32,
    /// Extra enemies a projectile may damage beyond the first
    pub pierce: u32,
    pub description: &'static str,
}

pub const WEAPONS: [WeaponDef; 5] = [
    WeaponDef {
        id: WeaponId::Book,
        name: "Textbook",
        icon: "📚",
        damage: 10.0,
        cooldown_ms: 1200.0,
        projectile_count: 1,
        pierce: 1,
        description: "Hurls a heavy major textbook",
    },
    WeaponDef {
        id: WeaponId::Pencil,
        name: "Pencil",
        icon: "✏️",
        damage: 5.0,
        cooldown_ms: 400.0,
        projectile_count: 2,
        pierce: 0,
        description: "Rapid-fire sharpened pencils",
    },
    WeaponDef {
        id: WeaponId::Coffee,
        name: "Coffee",
        icon: "☕",
        damage: 15.0,
        cooldown_ms: 2000.0,
        projectile_count: 1,
        pierce: 3,
        description: "Scalding coffee that pierces",
    },
    WeaponDef {
        id: WeaponId::Laptop,
        name: "Laptop",
        icon: "💻",
        damage: 25.0,
        cooldown_ms: 3000.0,
        projectile_count: 1,
        pierce: 5,
        description: "A heavy laptop! High damage",
    },
    WeaponDef {
        id: WeaponId::Eraser,
        name: "Eraser",
        icon: "🧽",
        damage: 8.0,
        cooldown_ms: 800.0,
        projectile_count: 3,
        pierce: 0,
        description: "Three erasers at once",
    },
];

/// An enemy difficulty class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyTier {
    pub name: &'static str,
    pub icon: &'static str,
    pub hp: f32,
    /// Units moved per tick
    pub speed: f32,
    /// Contact damage per second of overlap
    pub damage: f32,
    pub xp_value: u32,
}

/// Enemy tiers, weakest first
pub const ENEMY_TIERS: [EnemyTier; 6] = [
    EnemyTier { name: "Teaching Assistant", icon: "🧑‍🏫", hp: 20.0, speed: 1.2, damage: 10.0, xp_value: 10 },
    EnemyTier { name: "Professor", icon: "👨‍🏫", hp: 40.0, speed: 1.0, damage: 15.0, xp_value: 20 },
    EnemyTier { name: "Professor", icon: "👩‍🏫", hp: 40.0, speed: 1.0, damage: 15.0, xp_value: 20 },
    EnemyTier { name: "Department Head", icon: "🤓", hp: 60.0, speed: 0.8, damage: 20.0, xp_value: 30 },
    EnemyTier { name: "Demon Professor", icon: "😈", hp: 100.0, speed: 1.5, damage: 25.0, xp_value: 50 },
    EnemyTier { name: "President", icon: "👿", hp: 150.0, speed: 0.6, damage: 30.0, xp_value: 80 },
];

/// Look up an enemy tier by index
pub fn enemy_tier(index: usize) -> Option<&'static EnemyTier> {
    ENEMY_TIERS.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_defs_match_ids() {
        for id in WeaponId::ALL {
            assert_eq!(id.def().id, id);
        }
    }

    #[test]
    fn test_weapon_id_from_str() {
        assert_eq!("book".parse::<WeaponId>(), Ok(WeaponId::Book));
        assert_eq!("Laptop".parse::<WeaponId>(), Ok(WeaponId::Laptop));
        assert!("stapler".parse::<WeaponId>().is_err());
    }

    #[test]
    fn test_enemy_tiers_ordered() {
        assert_eq!(ENEMY_TIERS.len(), 6);
        assert!(ENEMY_TIERS.first().unwrap().hp < ENEMY_TIERS.last().unwrap().hp);
        assert!(enemy_tier(6).is_none());
    }
}
