//! Input-driven player controller.
//!
//! Per tick: read controls, expire cooldowns, settle the status, advance the
//! animation, then move. Attacks and casts share one gate: while `attacking`
//! is set all input is ignored and the player stands still.

use std::time::Duration;

use crate::collision::ObstacleSet;
use crate::error::LevelError;
use crate::events::{EventQueue, FrameEvent};
use crate::input::ControlState;
use crate::math::{Rect, Vec2};
use crate::motion::{move_body, Actor, Body};
use crate::render::{AnimationSet, Animator, TextureHandle};
use crate::settings::{AttackKind, GameConfig, MagicKind, MagicStats, PlayerStats, WeaponKind, WeaponStats};
use crate::status::{Facing, Phase, PlayerStatus};
use crate::timer::Cooldown;
use crate::world::EntityId;

/// Short-lived collision rectangle representing a swing's reach.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitVolume {
    pub owner: EntityId,
    pub hitbox: Rect,
    pub damage: f32,
    pub weapon: WeaponKind,
}

/// Rectangle a weapon covers when swung from `bounds` towards `facing`.
///
/// Horizontal swings sit slightly below the sprite's mid-line and vertical
/// ones slightly left of center, lining up with where the character's hand is
/// drawn.
pub fn weapon_hitbox(bounds: Rect, facing: Facing, weapon: &WeaponStats) -> Rect {
    let horizontal = Vec2::new(weapon.length, weapon.width);
    let vertical = Vec2::new(weapon.width, weapon.length);
    match facing {
        Facing::Right => {
            let anchor = bounds.mid_right() + Vec2::new(0.0, 16.0);
            Rect::from_top_left(anchor - Vec2::new(0.0, weapon.width * 0.5), horizontal)
        }
        Facing::Left => {
            let anchor = bounds.mid_left() + Vec2::new(0.0, 16.0);
            Rect::from_top_left(anchor - Vec2::new(weapon.length, weapon.width * 0.5), horizontal)
        }
        Facing::Down => {
            let anchor = bounds.mid_bottom() + Vec2::new(-10.0, 0.0);
            Rect::from_top_left(anchor - Vec2::new(weapon.width * 0.5, 0.0), vertical)
        }
        Facing::Up => {
            let anchor = bounds.mid_top() + Vec2::new(-10.0, 0.0);
            Rect::from_top_left(anchor - Vec2::new(weapon.width * 0.5, weapon.length), vertical)
        }
    }
}

pub struct Player {
    id: EntityId,
    body: Body,
    animator: Animator,
    animations: AnimationSet<PlayerStatus>,
    status: PlayerStatus,
    stats: PlayerStats,

    health: f32,
    energy: f32,
    exp: u32,

    attacking: bool,
    base_attack_cooldown: Duration,
    attack_cooldown: Cooldown,
    weapon_volume: Option<HitVolume>,

    vulnerable: bool,
    hurt_cooldown: Cooldown,

    weapons: Vec<(WeaponKind, WeaponStats)>,
    weapon_index: usize,
    can_switch_weapon: bool,
    weapon_switch: Cooldown,

    magic: Vec<(MagicKind, MagicStats)>,
    magic_index: usize,
    can_switch_magic: bool,
    magic_switch: Cooldown,
}

impl Player {
    /// Spawn a player whose visual bounds start at `top_left`.
    pub fn new(
        id: EntityId,
        top_left: Vec2,
        config: &GameConfig,
        animations: AnimationSet<PlayerStatus>,
    ) -> Result<Self, LevelError> {
        config.validate()?;
        let stats = config.player;
        let timings = config.timings;
        let bounds = Rect::from_top_left(top_left, stats.size);

        Ok(Self {
            id,
            body: Body::new(bounds, stats.hitbox_inset),
            animator: Animator::new(config.animation_speed),
            animations,
            status: PlayerStatus::new(Facing::Down, Phase::Idle),
            stats,
            health: stats.health,
            energy: stats.energy,
            exp: 0,
            attacking: false,
            base_attack_cooldown: timings.player_attack(),
            attack_cooldown: Cooldown::new(timings.player_attack()),
            weapon_volume: None,
            vulnerable: true,
            hurt_cooldown: Cooldown::new(timings.player_invulnerability()),
            weapons: config.weapons.iter().map(|(k, v)| (*k, *v)).collect(),
            weapon_index: 0,
            can_switch_weapon: true,
            weapon_switch: Cooldown::new(timings.switch()),
            magic: config.magic.iter().map(|(k, v)| (*k, *v)).collect(),
            magic_index: 0,
            can_switch_magic: true,
            magic_switch: Cooldown::new(timings.switch()),
        })
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn exp(&self) -> u32 {
        self.exp
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn weapon(&self) -> WeaponKind {
        self.weapons[self.weapon_index].0
    }

    fn weapon_stats(&self) -> WeaponStats {
        self.weapons[self.weapon_index].1
    }

    pub fn magic(&self) -> MagicKind {
        self.magic[self.magic_index].0
    }

    fn magic_stats(&self) -> MagicStats {
        self.magic[self.magic_index].1
    }

    /// Damage dealt by a weapon hit: base attack plus the weapon's damage.
    pub fn weapon_damage(&self) -> f32 {
        self.stats.attack + self.weapon_stats().damage
    }

    /// The live weapon hit-volume, present from the swing until the attack
    /// cooldown ends.
    pub fn weapon_volume(&self) -> Option<&HitVolume> {
        self.weapon_volume.as_ref()
    }

    pub fn grant_exp(&mut self, exp: u32) {
        self.exp = self.exp.saturating_add(exp);
    }

    /// Apply incoming damage. Returns whether it landed.
    ///
    /// While the hurt window is open, or once health is gone, this is a no-op.
    pub fn take_damage(&mut self, amount: f32, attack_type: AttackKind, now: Duration) -> bool {
        if !self.vulnerable || !self.is_alive() {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        self.vulnerable = false;
        self.hurt_cooldown.stamp(now);
        log::debug!("player took {amount} {attack_type:?} damage, health {}", self.health);
        true
    }

    /// One simulation tick.
    pub fn update(
        &mut self,
        controls: &ControlState,
        now: Duration,
        obstacles: &ObstacleSet,
        events: &mut EventQueue,
    ) {
        self.input(controls, now, events);
        self.cooldowns(now);
        self.settle_status();
        self.animate();
        move_body(&mut self.body, self.stats.speed, obstacles);
        self.recover_energy();
    }

    fn input(&mut self, controls: &ControlState, now: Duration, events: &mut EventQueue) {
        if self.attacking {
            return;
        }

        if controls.up {
            self.body.direction.y = -1.0;
            self.status = PlayerStatus::new(Facing::Up, Phase::Moving);
        } else if controls.down {
            self.body.direction.y = 1.0;
            self.status = PlayerStatus::new(Facing::Down, Phase::Moving);
        } else {
            self.body.direction.y = 0.0;
        }

        if controls.right {
            self.body.direction.x = 1.0;
            self.status = PlayerStatus::new(Facing::Right, Phase::Moving);
        } else if controls.left {
            self.body.direction.x = -1.0;
            self.status = PlayerStatus::new(Facing::Left, Phase::Moving);
        } else {
            self.body.direction.x = 0.0;
        }

        if controls.attack {
            self.start_attack(now);
            let weapon = self.weapon_stats();
            self.weapon_volume = Some(HitVolume {
                owner: self.id,
                hitbox: weapon_hitbox(self.body.bounds, self.status.facing, &weapon),
                damage: self.weapon_damage(),
                weapon: self.weapon(),
            });
        }

        if controls.cast {
            self.start_attack(now);
            self.cast(events);
        }

        if controls.switch_weapon && self.can_switch_weapon {
            self.can_switch_weapon = false;
            self.weapon_switch.stamp(now);
            self.weapon_index = (self.weapon_index + 1) % self.weapons.len();
            log::debug!("switched weapon to {:?}", self.weapon());
        }

        if controls.switch_magic && self.can_switch_magic {
            self.can_switch_magic = false;
            self.magic_switch.stamp(now);
            self.magic_index = (self.magic_index + 1) % self.magic.len();
            log::debug!("switched magic to {:?}", self.magic());
        }
    }

    fn start_attack(&mut self, now: Duration) {
        self.attacking = true;
        let extra = Duration::from_millis(self.weapon_stats().cooldown_ms);
        self.attack_cooldown.set_duration(self.base_attack_cooldown + extra);
        self.attack_cooldown.stamp(now);
    }

    fn cast(&mut self, events: &mut EventQueue) {
        let kind = self.magic();
        let spell = self.magic_stats();
        if self.energy < spell.cost {
            log::trace!("not enough energy for {kind:?}");
            return;
        }
        self.energy -= spell.cost;
        let strength = self.stats.magic + spell.strength;
        if kind == MagicKind::Heal {
            self.health = (self.health + strength).min(self.stats.health);
        }
        events.push(FrameEvent::SpellCast {
            magic: kind,
            strength,
            position: self.body.center(),
        });
    }

    fn cooldowns(&mut self, now: Duration) {
        if self.attacking && self.attack_cooldown.has_elapsed(now) {
            self.attacking = false;
            self.weapon_volume = None;
        }
        if !self.can_switch_weapon && self.weapon_switch.has_elapsed(now) {
            self.can_switch_weapon = true;
        }
        if !self.can_switch_magic && self.magic_switch.has_elapsed(now) {
            self.can_switch_magic = true;
        }
        if !self.vulnerable && self.hurt_cooldown.has_elapsed(now) {
            self.vulnerable = true;
        }
    }

    fn settle_status(&mut self) {
        let (status, direction) = self.status.settle(self.body.direction, self.attacking);
        self.status = status;
        self.body.direction = direction;
    }

    fn animate(&mut self) {
        if let Some(animation) = self.animations.get(&self.status) {
            self.animator.advance(animation.len());
        }
        self.body.recenter_bounds();
    }

    fn recover_energy(&mut self) {
        if self.energy < self.stats.energy {
            self.energy = (self.energy + 0.01 * self.stats.magic).min(self.stats.energy);
        } else {
            self.energy = self.stats.energy;
        }
    }
}

impl Actor for Player {
    fn id(&self) -> EntityId {
        self.id
    }

    fn body(&self) -> &Body {
        &self.body
    }

    fn texture(&self) -> Option<TextureHandle> {
        self.animations.texture(&self.status, self.animator.frame())
    }

    fn is_vulnerable(&self) -> bool {
        self.vulnerable
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::assets::AssetManager;
    use crate::status::{Facing, Phase};
    use approx::assert_relative_eq;

    pub(crate) fn player_assets() -> AssetManager {
        let mut assets = AssetManager::new();
        for facing in Facing::ALL {
            for phase in Phase::ALL {
                let key = crate::assets::player_animation_key(PlayerStatus::new(facing, phase));
                assets
                    .register_animation(key, vec![TextureHandle(1), TextureHandle(2), TextureHandle(3), TextureHandle(4)])
                    .unwrap();
            }
        }
        assets
    }

    fn spawn(config: &GameConfig) -> Player {
        let animations = player_assets().player_animations().unwrap();
        Player::new(crate::world::EntityIds::new().allocate(), Vec2::new(0.0, 0.0), config, animations).unwrap()
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn tick(player: &mut Player, controls: ControlState, now: Duration) -> EventQueue {
        let mut events = EventQueue::new();
        player.update(&controls, now, &ObstacleSet::default(), &mut events);
        events
    }

    #[test]
    fn starts_facing_down_idle() {
        let player = spawn(&GameConfig::default());
        assert_eq!(player.status().as_token(), "down_idle");
        assert_eq!(player.body().hitbox.h, 38.0);
    }

    #[test]
    fn arrow_keys_set_facing_and_direction() {
        let mut player = spawn(&GameConfig::default());
        tick(&mut player, ControlState { left: true, ..ControlState::idle() }, ms(16));
        assert_eq!(player.status().as_token(), "left");
        assert!(player.center().x < 32.0);

        tick(&mut player, ControlState::idle(), ms(32));
        assert_eq!(player.status().as_token(), "left_idle");
    }

    #[test]
    fn releasing_keys_keeps_the_last_facing() {
        let mut player = spawn(&GameConfig::default());
        tick(&mut player, ControlState { up: true, ..ControlState::idle() }, ms(16));
        tick(&mut player, ControlState::idle(), ms(32));
        assert_eq!(player.status(), PlayerStatus::new(Facing::Up, Phase::Idle));
    }

    #[test]
    fn attack_round_trip_returns_to_idle() {
        let config = GameConfig::default();
        let mut player = spawn(&config);
        tick(&mut player, ControlState { left: true, ..ControlState::idle() }, ms(0));
        tick(&mut player, ControlState::idle(), ms(16));
        assert_eq!(player.status().as_token(), "left_idle");

        tick(&mut player, ControlState { attack: true, ..ControlState::idle() }, ms(100));
        assert_eq!(player.status().as_token(), "left_attack");
        assert!(player.weapon_volume().is_some());

        // Base 400 ms plus the sword's 100 ms.
        tick(&mut player, ControlState::idle(), ms(600));
        assert_eq!(player.status().as_token(), "left_attack");
        tick(&mut player, ControlState::idle(), ms(601));
        assert_eq!(player.status().as_token(), "left_idle");
        assert!(player.weapon_volume().is_none());
    }

    #[test]
    fn attacking_freezes_movement_and_ignores_input() {
        let mut player = spawn(&GameConfig::default());
        tick(&mut player, ControlState { attack: true, ..ControlState::idle() }, ms(0));
        let center = player.center();
        tick(&mut player, ControlState { right: true, ..ControlState::idle() }, ms(16));
        assert_eq!(player.center(), center);
        assert_eq!(player.status().facing, Facing::Down);
    }

    #[test]
    fn weapon_volume_sits_beside_the_player() {
        let weapon = GameConfig::default().weapons[&WeaponKind::Sword];
        let bounds = Rect::new(0.0, 0.0, 64.0, 64.0);
        let right = weapon_hitbox(bounds, Facing::Right, &weapon);
        assert_eq!(right.left(), 64.0);
        assert_eq!(right.center().y, 48.0);
        let up = weapon_hitbox(bounds, Facing::Up, &weapon);
        assert_eq!(up.bottom(), 0.0);
        assert_eq!(up.center().x, 22.0);
        let left = weapon_hitbox(bounds, Facing::Left, &weapon);
        assert_eq!(left.right(), 0.0);
        let down = weapon_hitbox(bounds, Facing::Down, &weapon);
        assert_eq!(down.top(), 64.0);
    }

    #[test]
    fn damage_is_gated_by_the_hurt_window() {
        let mut player = spawn(&GameConfig::default());
        assert!(player.take_damage(20.0, AttackKind::Slash, ms(0)));
        assert!(!player.take_damage(20.0, AttackKind::Thunder, ms(100)));
        assert_relative_eq!(player.health(), 80.0);

        tick(&mut player, ControlState::idle(), ms(501));
        assert!(player.is_vulnerable());
        assert!(player.take_damage(20.0, AttackKind::Claw, ms(502)));
        assert_relative_eq!(player.health(), 60.0);
    }

    #[test]
    fn alpha_flickers_only_while_hurt() {
        let mut player = spawn(&GameConfig::default());
        assert_eq!(player.alpha(ms(5)), 255);
        player.take_damage(1.0, AttackKind::LeafAttack, ms(0));
        let alphas: Vec<u8> = (0..10).map(|t| player.alpha(ms(t))).collect();
        assert!(alphas.contains(&0));
        assert!(alphas.contains(&255));
    }

    #[test]
    fn cast_spends_energy_and_emits_event() {
        let mut player = spawn(&GameConfig::default());
        let events = tick(&mut player, ControlState { cast: true, ..ControlState::idle() }, ms(0));
        assert!(player.is_attacking());
        assert!(player.weapon_volume().is_none());
        assert!(matches!(
            events.iter().next(),
            Some(FrameEvent::SpellCast { magic: MagicKind::Flame, .. })
        ));
        // 60 - 20, plus one tick of recovery.
        assert_relative_eq!(player.energy(), 40.04, epsilon = 1e-4);
    }

    #[test]
    fn cast_without_energy_still_locks_the_player() {
        let mut config = GameConfig::default();
        config.player.energy = 5.0;
        let mut player = spawn(&config);
        let events = tick(&mut player, ControlState { cast: true, ..ControlState::idle() }, ms(0));
        assert!(player.is_attacking());
        assert!(events.is_empty());
    }

    #[test]
    fn weapon_switch_is_rate_limited() {
        let mut player = spawn(&GameConfig::default());
        let held = ControlState { switch_weapon: true, ..ControlState::idle() };
        tick(&mut player, held, ms(0));
        assert_eq!(player.weapon(), WeaponKind::Lance);
        tick(&mut player, held, ms(100));
        assert_eq!(player.weapon(), WeaponKind::Lance);
        // Re-enabled at the end of this tick, used on the next.
        tick(&mut player, held, ms(201));
        assert_eq!(player.weapon(), WeaponKind::Lance);
        tick(&mut player, held, ms(217));
        assert_eq!(player.weapon(), WeaponKind::Axe);
    }

    #[test]
    fn weapon_damage_adds_base_attack() {
        let player = spawn(&GameConfig::default());
        assert_relative_eq!(player.weapon_damage(), 25.0);
    }
}
