//! Groveblade - simulation core for a top-down action game.
//!
//! Movement with axis-separated collision, status-driven animation for the
//! player and monsters, distance-based monster AI, and a depth-sorted draw
//! list. Asset decoding, windowing and audio live outside this crate.

pub mod assets;
pub mod camera;
pub mod collision;
pub mod enemy;
pub mod error;
pub mod events;
pub mod grid;
pub mod input;
pub mod layout;
pub mod level;
pub mod math;
pub mod motion;
pub mod player;
pub mod render;
pub mod settings;
pub mod status;
pub mod timer;
pub mod world;

pub use crate::assets::AssetManager;
pub use crate::camera::Camera2D;
pub use crate::collision::{Axis, Obstacle, ObstacleId, ObstacleSet};
pub use crate::enemy::Enemy;
pub use crate::error::LevelError;
pub use crate::events::{EventQueue, FrameEvent};
pub use crate::grid::{Grid, GridCoord};
pub use crate::input::{Action, ControlState, InputState, Keymap};
pub use crate::layout::{MapLayout, Spawn};
pub use crate::level::Level;
pub use crate::math::{Rect, Vec2};
pub use crate::motion::{Actor, Body};
pub use crate::player::{HitVolume, Player};
pub use crate::render::{DrawCommand, DrawLayer, DrawList, TextureHandle};
pub use crate::settings::{AttackKind, GameConfig, MagicKind, MonsterKind, WeaponKind};
pub use crate::status::{EnemyStatus, Facing, Phase, PlayerStatus};
pub use crate::timer::{Clock, Cooldown};
pub use crate::world::{EntityId, Scenery, SceneryKind};
pub use winit::keyboard::KeyCode;
