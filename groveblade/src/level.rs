//! Level orchestration: owns every live entity and steps them once per tick.
//!
//! Tick order: player, then each enemy (status, actions, update) in id order,
//! then the player's weapon is resolved against attackable entities, then the
//! event queue is drained, and finally the camera follows the player. Drawing
//! reads the result and never mutates simulation state.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use crate::assets::AssetManager;
use crate::camera::Camera2D;
use crate::collision::ObstacleSet;
use crate::enemy::Enemy;
use crate::error::LevelError;
use crate::events::{EventQueue, FrameEvent};
use crate::input::ControlState;
use crate::layout::{MapLayout, Spawn};
use crate::math::{Rect, Vec2};
use crate::motion::Actor;
use crate::player::Player;
use crate::render::{depth_sort, DrawCommand, DrawLayer, DrawList, FloorLayer};
use crate::settings::GameConfig;
use crate::timer::Clock;
use crate::world::{EntityId, EntityIds, Scenery};

/// Asset key of the optional ground image.
pub const FLOOR_TEXTURE: &str = "floor";

pub struct Level {
    config: GameConfig,
    clock: Clock,
    camera: Camera2D,
    world_size: Vec2,
    floor: Option<FloorLayer>,

    player: Player,
    enemies: BTreeMap<EntityId, Enemy>,
    scenery: BTreeMap<EntityId, Scenery>,
    obstacles: ObstacleSet,
    attackable: BTreeSet<EntityId>,

    events: EventQueue,
    last_events: Vec<FrameEvent>,
}

impl Level {
    /// Instantiate every tile and spawn marker in `layout`.
    ///
    /// Fails on the first asset or config mismatch; nothing is substituted.
    pub fn new(
        layout: &MapLayout,
        config: GameConfig,
        assets: &AssetManager,
        viewport: Vec2,
    ) -> Result<Self, LevelError> {
        config.validate()?;
        let tile = layout.tile_size();
        let tile_size = Vec2::new(tile, tile);
        let mut ids = EntityIds::new();

        let mut scenery = BTreeMap::new();
        let mut attackable = BTreeSet::new();
        for (kind, coord) in layout.tiles() {
            let top_left = layout.boundary().grid_to_world_top_left(coord);
            let texture = if kind.is_visible() {
                Some(assets.texture(kind.asset_key())?)
            } else {
                None
            };
            let id = ids.allocate();
            scenery.insert(id, Scenery::new(id, kind, Rect::from_top_left(top_left, tile_size), texture));
            if kind.is_destructible() {
                attackable.insert(id);
            }
        }

        let obstacles = ObstacleSet::new(
            scenery
                .values()
                .filter(|tile| tile.kind.blocks_movement())
                .map(|tile| tile.hitbox),
        );

        let mut player = None;
        let mut enemies = BTreeMap::new();
        for (spawn, coord) in layout.spawns()? {
            let top_left = layout.entities().grid_to_world_top_left(coord);
            match spawn {
                Spawn::Player => {
                    if player.is_some() {
                        return Err(LevelError::DuplicatePlayerSpawn);
                    }
                    let animations = assets.player_animations()?;
                    player = Some(Player::new(ids.allocate(), top_left, &config, animations)?);
                }
                Spawn::Monster(kind) => {
                    let animations = assets.monster_animations(kind)?;
                    let id = ids.allocate();
                    enemies.insert(id, Enemy::new(id, kind, top_left, &config, animations)?);
                    attackable.insert(id);
                }
            }
        }
        let player = player.ok_or(LevelError::MissingPlayerSpawn)?;

        let floor = assets.texture(FLOOR_TEXTURE).ok().map(|texture| FloorLayer {
            texture,
            origin: Vec2::ZERO,
        });

        let mut camera = Camera2D::new(viewport);
        camera.follow(player.center());

        log::info!(
            "built {}x{} level: {} enemies, {} scenery tiles, {} obstacles",
            layout.width(),
            layout.height(),
            enemies.len(),
            scenery.len(),
            obstacles.len()
        );

        Ok(Self {
            config,
            clock: Clock::new(),
            camera,
            world_size: Vec2::new(layout.width() as f32 * tile, layout.height() as f32 * tile),
            floor,
            player,
            enemies,
            scenery,
            obstacles,
            attackable,
            events: EventQueue::new(),
            last_events: Vec::new(),
        })
    }

    /// Advance the simulation by one tick.
    pub fn update(&mut self, controls: &ControlState) {
        let now = self.clock.advance();

        self.player.update(controls, now, &self.obstacles, &mut self.events);

        let target = self.player.center();
        for enemy in self.enemies.values_mut() {
            enemy.get_status(target);
            enemy.actions(target, now);
            enemy.update(now, &self.obstacles, &mut self.events);
        }

        self.resolve_attacks();
        self.apply_events(now);
        self.camera.follow(self.player.center());
    }

    /// Test the player's live weapon volume against every attackable id.
    ///
    /// Grass under the volume is destroyed; enemies take damage and are
    /// removed once their health runs out. An attackable id whose entity is
    /// already gone is dropped without effect.
    pub fn resolve_attacks(&mut self) {
        let Some(volume) = self.player.weapon_volume().copied() else {
            return;
        };
        let now = self.clock.now();
        let source = self.player.center();
        let targets: Vec<EntityId> = self.attackable.iter().copied().collect();

        for id in targets {
            if let Some(tile) = self.scenery.get(&id) {
                if tile.kind.is_destructible() && tile.bounds.intersects(&volume.hitbox) {
                    let position = tile.bounds.center();
                    self.scenery.remove(&id);
                    self.attackable.remove(&id);
                    self.events.push(FrameEvent::SceneryDestroyed { id, position });
                    log::debug!("destroyed scenery {id:?}");
                }
                continue;
            }

            let Some(enemy) = self.enemies.get_mut(&id) else {
                log::warn!("attackable id {id:?} has no entity, dropping it");
                self.attackable.remove(&id);
                continue;
            };
            if !enemy.bounds().intersects(&volume.hitbox) {
                continue;
            }
            if enemy.take_damage(volume.damage, now, source) {
                self.events.push(FrameEvent::EnemyHit {
                    target: id,
                    amount: volume.damage,
                    weapon: volume.weapon,
                });
            }
            if enemy.is_dead() {
                self.defeat(id);
            }
        }
    }

    fn defeat(&mut self, id: EntityId) {
        self.attackable.remove(&id);
        let Some(enemy) = self.enemies.remove(&id) else {
            return;
        };
        let exp = enemy.stats().exp;
        self.player.grant_exp(exp);
        self.events.push(FrameEvent::EnemyDefeated {
            id,
            kind: enemy.kind(),
            position: enemy.center(),
            exp,
        });
        log::info!("{} {id:?} defeated, player exp {}", enemy.kind(), self.player.exp());
    }

    fn apply_events(&mut self, now: Duration) {
        let events = self.events.drain();
        for event in &events {
            if let FrameEvent::PlayerHit {
                source,
                amount,
                attack_type,
            } = *event
            {
                if self.player.take_damage(amount, attack_type, now) && !self.player.is_alive() {
                    log::info!("player defeated by {source:?}");
                }
            }
        }
        self.last_events = events;
    }

    /// Painter's-order draw list for the current state.
    pub fn draw(&self) -> DrawList {
        let offset = self.camera.offset;
        let now = self.clock.now();

        let mut entities = Vec::with_capacity(self.scenery.len() + self.enemies.len() + 1);
        for tile in self.scenery.values() {
            if let Some(texture) = tile.texture {
                entities.push(DrawCommand {
                    layer: DrawLayer::Entity(tile.id),
                    texture,
                    position: tile.bounds.top_left() - offset,
                    bounds: tile.bounds,
                    alpha: 255,
                });
            }
        }
        entities.extend(self.player.draw_command(now, offset));
        entities.extend(
            self.enemies
                .values()
                .filter_map(|enemy| enemy.draw_command(now, offset)),
        );

        // Load order breaks depth ties.
        entities.sort_by_key(|command| match command.layer {
            DrawLayer::Entity(id) => Some(id),
            DrawLayer::Floor => None,
        });
        depth_sort(&mut entities);

        let mut commands = Vec::with_capacity(entities.len() + 1);
        if let Some(floor) = self.floor {
            commands.push(DrawCommand {
                layer: DrawLayer::Floor,
                texture: floor.texture,
                position: floor.origin - offset,
                bounds: Rect::from_top_left(floor.origin, self.world_size),
                alpha: 255,
            });
        }
        commands.extend(entities);

        DrawList {
            camera_offset: offset,
            commands,
        }
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.camera.set_viewport(viewport);
        self.camera.follow(self.player.center());
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn ticks(&self) -> u64 {
        self.clock.ticks()
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    /// Size of the map in world pixels.
    pub fn world_size(&self) -> Vec2 {
        self.world_size
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.values()
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.get(&id)
    }

    pub fn scenery(&self) -> impl Iterator<Item = &Scenery> {
        self.scenery.values()
    }

    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    pub fn is_attackable(&self, id: EntityId) -> bool {
        self.attackable.contains(&id)
    }

    pub fn attackable_count(&self) -> usize {
        self.attackable.len()
    }

    /// Events drained during the last [`Level::update`].
    pub fn last_events(&self) -> &[FrameEvent] {
        &self.last_events
    }
}
