//! Runs a small level without a window, feeding it random key presses, and
//! logs what happens. `RUST_LOG=debug` shows every status change and hit.
//!
//! Usage: `headless_run [ticks] [config.json]`

use std::path::Path;

use anyhow::{Context, Result};
use groveblade::assets::{monster_animation_key, player_animation_key};
use groveblade::layout::TILE_SIZE;
use groveblade::{
    AssetManager, ControlState, EnemyStatus, Facing, FrameEvent, GameConfig, InputState, KeyCode,
    Keymap, Level, MapLayout, MonsterKind, Phase, PlayerStatus, TextureHandle, Vec2,
};

const MAP: &[&str] = &[
    "################",
    "#..............#",
    "#..p....gg..x..#",
    "#.......gg.....#",
    "#..x.........q.#",
    "#.....b........#",
    "#..gg......r...#",
    "#..gg..x.......#",
    "#.........s....#",
    "################",
];

const MOVE_KEYS: [KeyCode; 4] = [
    KeyCode::ArrowUp,
    KeyCode::ArrowDown,
    KeyCode::ArrowLeft,
    KeyCode::ArrowRight,
];

/// Stand-in for the image loader: every frame gets a fresh handle.
fn placeholder_assets() -> Result<AssetManager> {
    let mut assets = AssetManager::new();
    let mut next = 1u32;
    let mut frames = |count: u32| {
        let handles: Vec<TextureHandle> = (next..next + count).map(TextureHandle).collect();
        next += count;
        handles
    };

    for facing in Facing::ALL {
        for phase in Phase::ALL {
            assets.register_animation(player_animation_key(PlayerStatus::new(facing, phase)), frames(4))?;
        }
    }
    for kind in MonsterKind::ALL {
        for status in EnemyStatus::ALL {
            assets.register_animation(monster_animation_key(kind, status), frames(4))?;
        }
    }
    for key in ["tiles/object", "tiles/grass", "floor"] {
        assets.register_texture(key, frames(1)[0]);
    }
    Ok(assets)
}

/// Hold a random movement key for a while, tapping attack now and then.
struct Wanderer {
    held: Option<KeyCode>,
    hold_ticks: u32,
}

impl Wanderer {
    fn new() -> Self {
        Self {
            held: None,
            hold_ticks: 0,
        }
    }

    fn drive(&mut self, input: &mut InputState) {
        input.release(KeyCode::Space);
        input.release(KeyCode::ControlLeft);

        if self.hold_ticks == 0 {
            if let Some(key) = self.held.take() {
                input.release(key);
            }
            if fastrand::bool() {
                let key = MOVE_KEYS[fastrand::usize(..MOVE_KEYS.len())];
                input.press(key);
                self.held = Some(key);
            }
            self.hold_ticks = fastrand::u32(10..60);
        }
        self.hold_ticks -= 1;

        if fastrand::u8(..) < 8 {
            input.press(KeyCode::Space);
        }
        if fastrand::u8(..) < 2 {
            input.press(KeyCode::ControlLeft);
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let ticks: u64 = match args.next() {
        Some(raw) => raw.parse().with_context(|| format!("invalid tick count `{raw}`"))?,
        None => 600,
    };
    let config = match args.next() {
        Some(path) => GameConfig::load_from_file(Path::new(&path))?,
        None => GameConfig::default(),
    };

    let layout = MapLayout::from_ascii(MAP, TILE_SIZE)?;
    let assets = placeholder_assets()?;
    let mut level = Level::new(&layout, config, &assets, Vec2::new(1280.0, 720.0))?;

    let keymap = Keymap::default();
    let mut input = InputState::new();
    let mut wanderer = Wanderer::new();

    let mut hits_taken = 0u32;
    let mut hits_dealt = 0u32;
    let mut defeated = 0u32;
    let mut grass_cut = 0u32;
    let mut spells = 0u32;

    for _ in 0..ticks {
        wanderer.drive(&mut input);
        level.update(&ControlState::capture(&input, &keymap));

        for event in level.last_events() {
            match event {
                FrameEvent::PlayerHit { .. } => hits_taken += 1,
                FrameEvent::EnemyHit { .. } => hits_dealt += 1,
                FrameEvent::EnemyDefeated { kind, exp, .. } => {
                    defeated += 1;
                    log::info!("defeated a {kind} for {exp} exp");
                }
                FrameEvent::SceneryDestroyed { .. } => grass_cut += 1,
                FrameEvent::SpellCast { magic, .. } => {
                    spells += 1;
                    log::debug!("cast {magic:?}");
                }
            }
        }

        if !level.player().is_alive() {
            log::warn!("player fell after {} ticks", level.ticks());
            break;
        }
    }

    let player = level.player();
    log::info!(
        "ran {} ticks ({:?}): health {:.0}, energy {:.1}, exp {}",
        level.ticks(),
        level.now(),
        player.health(),
        player.energy(),
        player.exp()
    );
    log::info!(
        "hits taken {hits_taken}, hits dealt {hits_dealt}, defeated {defeated}, grass cut {grass_cut}, spells {spells}"
    );
    log::info!(
        "{} enemies left, last frame drew {} sprites",
        level.enemies().count(),
        level.draw().len()
    );

    Ok(())
}
