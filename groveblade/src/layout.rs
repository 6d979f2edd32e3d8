//! Layered tile layout a level is built from.
//!
//! Four equally sized grids of integer tokens: `boundary`, `grass`,
//! `objects` and `entities`. `-1` marks an empty cell; any other value in the
//! first three layers places a tile of that layer. The entities layer holds
//! spawn markers.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::LevelError;
use crate::grid::{Grid, GridCoord};
use crate::settings::MonsterKind;
use crate::world::SceneryKind;

pub const EMPTY: i32 = -1;

/// Tile edge in pixels when a layout file does not give one.
pub const TILE_SIZE: f32 = 64.0;

pub const PLAYER_MARKER: i32 = 394;
pub const BAMBOO_MARKER: i32 = 390;
pub const SPIRIT_MARKER: i32 = 391;
pub const RACCOON_MARKER: i32 = 392;
pub const SQUID_MARKER: i32 = 393;

// Token written by `from_ascii` into the tile layers.
const TILE: i32 = 0;

/// What an entities-layer marker spawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Spawn {
    Player,
    Monster(MonsterKind),
}

impl Spawn {
    pub fn from_marker(marker: i32, coord: GridCoord) -> Result<Self, LevelError> {
        match marker {
            PLAYER_MARKER => Ok(Self::Player),
            BAMBOO_MARKER => Ok(Self::Monster(MonsterKind::Bamboo)),
            SPIRIT_MARKER => Ok(Self::Monster(MonsterKind::Spirit)),
            RACCOON_MARKER => Ok(Self::Monster(MonsterKind::Raccoon)),
            SQUID_MARKER => Ok(Self::Monster(MonsterKind::Squid)),
            _ => Err(LevelError::UnknownMarker {
                marker,
                x: coord.x,
                y: coord.y,
            }),
        }
    }

    pub fn marker(self) -> i32 {
        match self {
            Self::Player => PLAYER_MARKER,
            Self::Monster(MonsterKind::Bamboo) => BAMBOO_MARKER,
            Self::Monster(MonsterKind::Spirit) => SPIRIT_MARKER,
            Self::Monster(MonsterKind::Raccoon) => RACCOON_MARKER,
            Self::Monster(MonsterKind::Squid) => SQUID_MARKER,
        }
    }
}

/// On-disk form of a layout.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct LayoutFile {
    #[serde(default = "default_tile_size")]
    tile_size: f32,
    boundary: Vec<Vec<i32>>,
    grass: Vec<Vec<i32>>,
    objects: Vec<Vec<i32>>,
    entities: Vec<Vec<i32>>,
}

fn default_tile_size() -> f32 {
    TILE_SIZE
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LayoutFile", into = "LayoutFile")]
pub struct MapLayout {
    boundary: Grid<i32>,
    grass: Grid<i32>,
    objects: Grid<i32>,
    entities: Grid<i32>,
}

impl TryFrom<LayoutFile> for MapLayout {
    type Error = LevelError;

    fn try_from(file: LayoutFile) -> Result<Self, Self::Error> {
        let tile = file.tile_size;
        Self::new(
            Grid::from_rows("boundary", file.boundary, tile)?,
            Grid::from_rows("grass", file.grass, tile)?,
            Grid::from_rows("objects", file.objects, tile)?,
            Grid::from_rows("entities", file.entities, tile)?,
        )
    }
}

impl From<MapLayout> for LayoutFile {
    fn from(layout: MapLayout) -> Self {
        Self {
            tile_size: layout.tile_size(),
            boundary: layout.boundary.rows(),
            grass: layout.grass.rows(),
            objects: layout.objects.rows(),
            entities: layout.entities.rows(),
        }
    }
}

impl MapLayout {
    /// Combine four layers; they must all have the boundary layer's size.
    pub fn new(
        boundary: Grid<i32>,
        grass: Grid<i32>,
        objects: Grid<i32>,
        entities: Grid<i32>,
    ) -> Result<Self, LevelError> {
        let expected = (boundary.width(), boundary.height());
        for (name, layer) in [("grass", &grass), ("objects", &objects), ("entities", &entities)] {
            let found = (layer.width(), layer.height());
            if found != expected {
                return Err(LevelError::LayerSizeMismatch {
                    layer: name.to_string(),
                    expected,
                    found,
                });
            }
        }
        Ok(Self {
            boundary,
            grass,
            objects,
            entities,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("parsing map layout")
    }

    pub fn load_from_file(path: &std::path::Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading map layout {}", path.display()))?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Build a layout from character rows, one character per tile.
    ///
    /// `#` invisible boundary, `x` object, `g` grass, `p` player,
    /// `b`/`s`/`r`/`q` bamboo/spirit/raccoon/squid, `.` or space empty.
    /// Short rows are padded with empty cells.
    pub fn from_ascii(rows: &[&str], tile_size: f32) -> Result<Self, LevelError> {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let height = rows.len();
        let mut boundary = Grid::new(width, height, tile_size, EMPTY);
        let mut grass = Grid::new(width, height, tile_size, EMPTY);
        let mut objects = Grid::new(width, height, tile_size, EMPTY);
        let mut entities = Grid::new(width, height, tile_size, EMPTY);

        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let coord = GridCoord::new(x as i32, y as i32);
                match ch {
                    '.' | ' ' => {}
                    '#' => {
                        boundary.set(coord, TILE);
                    }
                    'x' => {
                        objects.set(coord, TILE);
                    }
                    'g' => {
                        grass.set(coord, TILE);
                    }
                    'p' => {
                        entities.set(coord, PLAYER_MARKER);
                    }
                    'b' => {
                        entities.set(coord, BAMBOO_MARKER);
                    }
                    's' => {
                        entities.set(coord, SPIRIT_MARKER);
                    }
                    'r' => {
                        entities.set(coord, RACCOON_MARKER);
                    }
                    'q' => {
                        entities.set(coord, SQUID_MARKER);
                    }
                    _ => return Err(LevelError::UnknownTile { ch, x, y }),
                }
            }
        }

        Self::new(boundary, grass, objects, entities)
    }

    pub fn width(&self) -> usize {
        self.boundary.width()
    }

    pub fn height(&self) -> usize {
        self.boundary.height()
    }

    pub fn tile_size(&self) -> f32 {
        self.boundary.cell_size()
    }

    pub fn boundary(&self) -> &Grid<i32> {
        &self.boundary
    }

    pub fn grass(&self) -> &Grid<i32> {
        &self.grass
    }

    pub fn objects(&self) -> &Grid<i32> {
        &self.objects
    }

    pub fn entities(&self) -> &Grid<i32> {
        &self.entities
    }

    /// Every placed tile, layer by layer (boundary, grass, objects), each
    /// row-major. This is the load order scenery ids are assigned in.
    pub fn tiles(&self) -> impl Iterator<Item = (SceneryKind, GridCoord)> + '_ {
        let layers = [
            (SceneryKind::Boundary, &self.boundary),
            (SceneryKind::Grass, &self.grass),
            (SceneryKind::Object, &self.objects),
        ];
        layers.into_iter().flat_map(|(kind, layer)| {
            layer
                .iter()
                .filter(|(_, token)| **token != EMPTY)
                .map(move |(coord, _)| (kind, coord))
        })
    }

    /// Decode every spawn marker in row-major order.
    pub fn spawns(&self) -> Result<Vec<(Spawn, GridCoord)>, LevelError> {
        self.entities
            .iter()
            .filter(|(_, marker)| **marker != EMPTY)
            .map(|(coord, marker)| Spawn::from_marker(*marker, coord).map(|spawn| (spawn, coord)))
            .collect()
    }
}
