//! Shared fixtures for the level scenarios.

use groveblade::assets::{monster_animation_key, player_animation_key};
use groveblade::layout::TILE_SIZE;
use groveblade::{
    AssetManager, EnemyStatus, Facing, GameConfig, Level, MapLayout, MonsterKind, Phase,
    PlayerStatus, TextureHandle, Vec2,
};

pub const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

/// Registry with four-frame animations for every player and monster status
/// plus the visible tile textures.
#[allow(dead_code)]
pub fn full_assets() -> AssetManager {
    let mut assets = AssetManager::new();
    let mut next = 0u32;
    let mut frames = |count: u32| {
        let handles = (next..next + count).map(TextureHandle).collect::<Vec<_>>();
        next += count;
        handles
    };

    for facing in Facing::ALL {
        for phase in Phase::ALL {
            let key = player_animation_key(PlayerStatus::new(facing, phase));
            assets
                .register_animation(key, frames(4))
                .expect("non-empty player animation");
        }
    }
    for kind in MonsterKind::ALL {
        for status in EnemyStatus::ALL {
            assets
                .register_animation(monster_animation_key(kind, status), frames(4))
                .expect("non-empty monster animation");
        }
    }
    assets.register_texture("tiles/object", TextureHandle(9000));
    assets.register_texture("tiles/grass", TextureHandle(9001));
    assets
}

#[allow(dead_code)]
pub fn level_from_ascii(rows: &[&str], config: GameConfig) -> Level {
    let layout = MapLayout::from_ascii(rows, TILE_SIZE).expect("valid ascii layout");
    Level::new(&layout, config, &full_assets(), VIEWPORT).expect("level builds")
}
