use serde::{Deserialize, Serialize};

use crate::math::Rect;
use crate::render::TextureHandle;

/// Unique identifier for a live entity in a level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Get the underlying integer ID (useful for debugging or serialization).
    pub fn to_u32(self) -> u32 {
        self.0
    }
}

/// Hands out entity ids in ascending order, starting at 1.
#[derive(Clone, Debug)]
pub struct EntityIds {
    next_id: u32,
}

impl EntityIds {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }
}

impl Default for EntityIds {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneryKind {
    /// Invisible map edge.
    Boundary,
    /// Solid decoration such as a rock or tree.
    Object,
    /// Walk-through foliage that a weapon can cut down.
    Grass,
}

impl SceneryKind {
    pub fn blocks_movement(self) -> bool {
        matches!(self, Self::Boundary | Self::Object)
    }

    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Boundary)
    }

    pub fn is_destructible(self) -> bool {
        matches!(self, Self::Grass)
    }

    pub fn asset_key(self) -> &'static str {
        match self {
            Self::Boundary => "tiles/boundary",
            Self::Object => "tiles/object",
            Self::Grass => "tiles/grass",
        }
    }
}

/// A static map tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scenery {
    pub id: EntityId,
    pub kind: SceneryKind,
    pub bounds: Rect,
    pub hitbox: Rect,
    /// `None` for invisible tiles.
    pub texture: Option<TextureHandle>,
}

impl Scenery {
    /// Vertical hitbox inset applied to every tile.
    pub const HITBOX_INSET: f32 = 10.0;

    pub fn new(id: EntityId, kind: SceneryKind, bounds: Rect, texture: Option<TextureHandle>) -> Self {
        Self {
            id,
            kind,
            bounds,
            hitbox: bounds.inflate(0.0, -Self::HITBOX_INSET),
            texture,
        }
    }
}
