//! Per-tick outbox for effects that cross entity boundaries.
//!
//! Entities never hold references to each other or to the level. They push
//! events here during their update; the level drains the queue once every
//! entity has been updated and applies the effects in push order.

use crate::math::Vec2;
use crate::settings::{AttackKind, MagicKind, MonsterKind, WeaponKind};
use crate::world::EntityId;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameEvent {
    /// An enemy finished an attack animation in range of the player.
    PlayerHit {
        source: EntityId,
        amount: f32,
        attack_type: AttackKind,
    },
    /// The player's weapon landed on an enemy that was vulnerable.
    EnemyHit {
        target: EntityId,
        amount: f32,
        weapon: WeaponKind,
    },
    EnemyDefeated {
        id: EntityId,
        kind: MonsterKind,
        position: Vec2,
        exp: u32,
    },
    SceneryDestroyed {
        id: EntityId,
        position: Vec2,
    },
    /// The player cast a spell; the visual effect is someone else's job.
    SpellCast {
        magic: MagicKind,
        strength: f32,
        position: Vec2,
    },
}

#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    pending: Vec<FrameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: FrameEvent) {
        self.pending.push(event);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FrameEvent> {
        self.pending.iter()
    }

    /// Drain events collected since the last drain.
    pub fn drain(&mut self) -> Vec<FrameEvent> {
        std::mem::take(&mut self.pending)
    }
}
