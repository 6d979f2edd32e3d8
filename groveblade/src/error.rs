use thiserror::Error;

/// Configuration problems detected while building a level.
///
/// All of these are asset/config mismatches. They are reported once, at load
/// time, and never papered over while the simulation runs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LevelError {
    #[error("no animation registered for `{key}`")]
    MissingAnimation { key: String },

    #[error("animation `{key}` has no frames")]
    EmptyAnimation { key: String },

    #[error("no texture registered for `{key}`")]
    MissingTexture { key: String },

    #[error("unknown monster `{token}`")]
    UnknownMonster { token: String },

    #[error("no stat block configured for monster `{kind}`")]
    MissingMonsterStats { kind: String },

    #[error("unknown entity marker {marker} at column {x}, row {y}")]
    UnknownMarker { marker: i32, x: i32, y: i32 },

    #[error("unknown map character `{ch}` at column {x}, row {y}")]
    UnknownTile { ch: char, x: usize, y: usize },

    #[error("layout has no player spawn marker")]
    MissingPlayerSpawn,

    #[error("layout has more than one player spawn marker")]
    DuplicatePlayerSpawn,

    #[error("layer `{layer}` row {row} has {found} cells, expected {expected}")]
    RaggedLayer {
        layer: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("layer `{layer}` is {found:?} cells, expected {expected:?}")]
    LayerSizeMismatch {
        layer: String,
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("no weapons configured")]
    NoWeapons,

    #[error("no magic configured")]
    NoMagic,
}
