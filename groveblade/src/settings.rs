//! Static game configuration: stat tables and tuning constants.
//!
//! Everything here is read-only once a level is built. The defaults are the
//! shipped balance; [`GameConfig::from_json`] and
//! [`GameConfig::load_from_file`] let a data file override them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::LevelError;
use crate::math::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonsterKind {
    Bamboo,
    Spirit,
    Raccoon,
    Squid,
}

impl MonsterKind {
    pub const ALL: [MonsterKind; 4] = [
        MonsterKind::Bamboo,
        MonsterKind::Spirit,
        MonsterKind::Raccoon,
        MonsterKind::Squid,
    ];

    pub fn as_token(self) -> &'static str {
        match self {
            Self::Bamboo => "bamboo",
            Self::Spirit => "spirit",
            Self::Raccoon => "raccoon",
            Self::Squid => "squid",
        }
    }
}

impl fmt::Display for MonsterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl FromStr for MonsterKind {
    type Err = LevelError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_token() == token)
            .ok_or_else(|| LevelError::UnknownMonster {
                token: token.to_string(),
            })
    }
}

/// Flavour of a monster's attack, forwarded with the damage it deals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    Slash,
    Claw,
    Thunder,
    LeafAttack,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonsterStats {
    pub health: f32,
    pub exp: u32,
    pub damage: f32,
    pub attack_type: AttackKind,
    pub speed: f32,
    /// Multiplier on `speed` while being knocked back.
    pub resistance: f32,
    pub attack_radius: f32,
    pub notice_radius: f32,
    /// Visual bounds size in pixels.
    #[serde(default = "default_sprite_size")]
    pub size: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponKind {
    Sword,
    Lance,
    Axe,
    Rapier,
    Sai,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeaponStats {
    /// Added on top of the base attack cooldown.
    pub cooldown_ms: u64,
    pub damage: f32,
    /// Reach along the facing direction.
    pub length: f32,
    /// Extent across the facing direction.
    pub width: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MagicKind {
    Flame,
    Heal,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MagicStats {
    pub strength: f32,
    /// Energy spent per cast.
    pub cost: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub health: f32,
    pub energy: f32,
    pub attack: f32,
    pub magic: f32,
    pub speed: f32,
    #[serde(default = "default_sprite_size")]
    pub size: Vec2,
    /// Vertical inset of the hitbox inside the visual bounds.
    pub hitbox_inset: f32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            health: 100.0,
            energy: 60.0,
            attack: 10.0,
            magic: 4.0,
            speed: 5.0,
            size: default_sprite_size(),
            hitbox_inset: 26.0,
        }
    }
}

/// Cooldown lengths in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timings {
    pub player_attack_ms: u64,
    pub player_invulnerability_ms: u64,
    pub switch_ms: u64,
    pub enemy_attack_ms: u64,
    pub enemy_invulnerability_ms: u64,
}

impl Timings {
    pub fn player_attack(&self) -> Duration {
        Duration::from_millis(self.player_attack_ms)
    }

    pub fn player_invulnerability(&self) -> Duration {
        Duration::from_millis(self.player_invulnerability_ms)
    }

    pub fn switch(&self) -> Duration {
        Duration::from_millis(self.switch_ms)
    }

    pub fn enemy_attack(&self) -> Duration {
        Duration::from_millis(self.enemy_attack_ms)
    }

    pub fn enemy_invulnerability(&self) -> Duration {
        Duration::from_millis(self.enemy_invulnerability_ms)
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            player_attack_ms: 400,
            player_invulnerability_ms: 500,
            switch_ms: 200,
            enemy_attack_ms: 400,
            enemy_invulnerability_ms: 300,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub animation_speed: f32,
    /// Vertical hitbox inset for monsters.
    pub enemy_hitbox_inset: f32,
    pub player: PlayerStats,
    pub timings: Timings,
    pub monsters: BTreeMap<MonsterKind, MonsterStats>,
    /// Cycled in key order by the weapon switch input.
    pub weapons: BTreeMap<WeaponKind, WeaponStats>,
    pub magic: BTreeMap<MagicKind, MagicStats>,
}

impl GameConfig {
    /// Parse a config from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("parsing game config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file.
    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading game config {}", path.display()))?;
        Self::from_json(&json)
    }

    /// Serialize this config to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        if self.weapons.is_empty() {
            return Err(LevelError::NoWeapons);
        }
        if self.magic.is_empty() {
            return Err(LevelError::NoMagic);
        }
        Ok(())
    }

    /// Stat block for a monster kind, or a load-time error if it is missing.
    pub fn monster(&self, kind: MonsterKind) -> Result<&MonsterStats, LevelError> {
        self.monsters
            .get(&kind)
            .ok_or_else(|| LevelError::MissingMonsterStats {
                kind: kind.to_string(),
            })
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        let monsters = BTreeMap::from([
            (
                MonsterKind::Squid,
                MonsterStats {
                    health: 100.0,
                    exp: 100,
                    damage: 20.0,
                    attack_type: AttackKind::Slash,
                    speed: 3.0,
                    resistance: 3.0,
                    attack_radius: 80.0,
                    notice_radius: 360.0,
                    size: default_sprite_size(),
                },
            ),
            (
                MonsterKind::Raccoon,
                MonsterStats {
                    health: 300.0,
                    exp: 250,
                    damage: 40.0,
                    attack_type: AttackKind::Claw,
                    speed: 2.0,
                    resistance: 3.0,
                    attack_radius: 120.0,
                    notice_radius: 400.0,
                    size: Vec2::new(128.0, 128.0),
                },
            ),
            (
                MonsterKind::Spirit,
                MonsterStats {
                    health: 100.0,
                    exp: 110,
                    damage: 8.0,
                    attack_type: AttackKind::Thunder,
                    speed: 4.0,
                    resistance: 3.0,
                    attack_radius: 60.0,
                    notice_radius: 350.0,
                    size: default_sprite_size(),
                },
            ),
            (
                MonsterKind::Bamboo,
                MonsterStats {
                    health: 70.0,
                    exp: 120,
                    damage: 6.0,
                    attack_type: AttackKind::LeafAttack,
                    speed: 3.0,
                    resistance: 3.0,
                    attack_radius: 50.0,
                    notice_radius: 300.0,
                    size: default_sprite_size(),
                },
            ),
        ]);

        let weapons = BTreeMap::from([
            (WeaponKind::Sword, WeaponStats { cooldown_ms: 100, damage: 15.0, length: 40.0, width: 20.0 }),
            (WeaponKind::Lance, WeaponStats { cooldown_ms: 400, damage: 30.0, length: 60.0, width: 16.0 }),
            (WeaponKind::Axe, WeaponStats { cooldown_ms: 300, damage: 20.0, length: 44.0, width: 24.0 }),
            (WeaponKind::Rapier, WeaponStats { cooldown_ms: 50, damage: 8.0, length: 48.0, width: 12.0 }),
            (WeaponKind::Sai, WeaponStats { cooldown_ms: 80, damage: 10.0, length: 32.0, width: 16.0 }),
        ]);

        let magic = BTreeMap::from([
            (MagicKind::Flame, MagicStats { strength: 5.0, cost: 20.0 }),
            (MagicKind::Heal, MagicStats { strength: 20.0, cost: 10.0 }),
        ]);

        Self {
            animation_speed: crate::render::ANIMATION_SPEED,
            enemy_hitbox_inset: 10.0,
            player: PlayerStats::default(),
            timings: Timings::default(),
            monsters,
            weapons,
            magic,
        }
    }
}

fn default_sprite_size() -> Vec2 {
    Vec2::new(64.0, 64.0)
}
