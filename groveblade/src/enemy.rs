use std::time::Duration;

use crate::collision::ObstacleSet;
use crate::error::LevelError;
use crate::events::{EventQueue, FrameEvent};
use crate::math::{Rect, Vec2};
use crate::motion::{move_body, Actor, Body};
use crate::render::{AnimationSet, Animator, TextureHandle};
use crate::settings::{GameConfig, MonsterKind, MonsterStats};
use crate::status::EnemyStatus;
use crate::timer::Cooldown;
use crate::world::EntityId;

/// Monster that idles, chases the player inside its notice radius and
/// attacks inside its attack radius.
pub struct Enemy {
    id: EntityId,
    kind: MonsterKind,
    stats: MonsterStats,
    body: Body,
    animator: Animator,
    animations: AnimationSet<EnemyStatus>,
    status: EnemyStatus,
    health: f32,

    can_attack: bool,
    attack_cooldown: Cooldown,

    vulnerable: bool,
    hit_cooldown: Cooldown,
    knockback: Vec2,
}

impl Enemy {
    pub fn new(
        id: EntityId,
        kind: MonsterKind,
        top_left: Vec2,
        config: &GameConfig,
        animations: AnimationSet<EnemyStatus>,
    ) -> Result<Self, LevelError> {
        let stats = *config.monster(kind)?;
        let bounds = Rect::from_top_left(top_left, stats.size);
        Ok(Self {
            id,
            kind,
            stats,
            body: Body::new(bounds, config.enemy_hitbox_inset),
            animator: Animator::new(config.animation_speed),
            animations,
            status: EnemyStatus::Idle,
            health: stats.health,
            can_attack: true,
            attack_cooldown: Cooldown::new(config.timings.enemy_attack()),
            vulnerable: true,
            hit_cooldown: Cooldown::new(config.timings.enemy_invulnerability()),
            knockback: Vec2::ZERO,
        })
    }

    pub fn kind(&self) -> MonsterKind {
        self.kind
    }

    pub fn stats(&self) -> &MonsterStats {
        &self.stats
    }

    pub fn status(&self) -> EnemyStatus {
        self.status
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn can_attack(&self) -> bool {
        self.can_attack
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Re-evaluate the status from the distance to the player.
    pub fn get_status(&mut self, player_center: Vec2) {
        let distance = self.center().distance(player_center);
        let next = EnemyStatus::for_distance(
            distance,
            self.stats.attack_radius,
            self.stats.notice_radius,
            self.can_attack,
        );
        if next == EnemyStatus::Attack && self.status != EnemyStatus::Attack {
            self.animator.reset();
        }
        if next != self.status {
            log::debug!("{} {:?}: {} -> {}", self.kind, self.id, self.status, next);
        }
        self.status = next;
    }

    /// Turn the current status into intent for this tick.
    pub fn actions(&mut self, player_center: Vec2, now: Duration) {
        match self.status {
            EnemyStatus::Attack => {
                self.attack_cooldown.stamp(now);
                self.body.direction = Vec2::ZERO;
            }
            EnemyStatus::Move => {
                self.body.direction = self.center().direction_to(player_center);
            }
            EnemyStatus::Idle => {
                self.body.direction = Vec2::ZERO;
            }
        }
    }

    /// Knockback, move, animate, then expire cooldowns.
    pub fn update(&mut self, now: Duration, obstacles: &ObstacleSet, events: &mut EventQueue) {
        let speed = if self.vulnerable {
            self.stats.speed
        } else {
            self.body.direction = self.knockback;
            self.stats.speed * self.stats.resistance
        };
        move_body(&mut self.body, speed, obstacles);
        self.animate(events);
        self.cooldowns(now);
    }

    fn animate(&mut self, events: &mut EventQueue) {
        let Some(animation) = self.animations.get(&self.status) else {
            return;
        };
        let wrapped = self.animator.advance(animation.len());
        if wrapped && self.status == EnemyStatus::Attack {
            self.can_attack = false;
            events.push(FrameEvent::PlayerHit {
                source: self.id,
                amount: self.stats.damage,
                attack_type: self.stats.attack_type,
            });
        }
        self.body.recenter_bounds();
    }

    fn cooldowns(&mut self, now: Duration) {
        if !self.can_attack && self.attack_cooldown.has_elapsed(now) {
            self.can_attack = true;
        }
        if !self.vulnerable && self.hit_cooldown.has_elapsed(now) {
            self.vulnerable = true;
            self.knockback = Vec2::ZERO;
        }
    }

    /// Apply a hit coming from `from`. Returns whether it landed.
    pub fn take_damage(&mut self, amount: f32, now: Duration, from: Vec2) -> bool {
        if !self.vulnerable || self.is_dead() {
            return false;
        }
        self.health -= amount;
        self.vulnerable = false;
        self.hit_cooldown.stamp(now);
        self.knockback = from.direction_to(self.center());
        log::debug!("{} {:?} took {amount} damage, health {}", self.kind, self.id, self.health);
        true
    }
}

impl Actor for Enemy {
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
    use approx::assert_relative_eq;
    use rstest::rstest;

    pub(crate) fn register_monster(assets: &mut AssetManager, kind: MonsterKind, frames: usize) {
        for status in EnemyStatus::ALL {
            let handles = (0..frames as u32).map(TextureHandle).collect();
            assets
                .register_animation(crate::assets::monster_animation_key(kind, status), handles)
                .unwrap();
        }
    }

    fn squid_at(center: Vec2, config: &GameConfig) -> Enemy {
        let mut assets = AssetManager::new();
        register_monster(&mut assets, MonsterKind::Squid, 4);
        let animations = assets.monster_animations(MonsterKind::Squid).unwrap();
        let top_left = center - Vec2::new(32.0, 32.0);
        Enemy::new(
            crate::world::EntityIds::new().allocate(),
            MonsterKind::Squid,
            top_left,
            config,
            animations,
        )
        .unwrap()
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[rstest]
    #[case(300.0, EnemyStatus::Idle)]
    #[case(150.0, EnemyStatus::Move)]
    #[case(20.0, EnemyStatus::Attack)]
    fn status_follows_player_distance(#[case] distance: f32, #[case] expected: EnemyStatus) {
        let mut config = GameConfig::default();
        let stats = config.monsters.get_mut(&MonsterKind::Squid).unwrap();
        stats.attack_radius = 40.0;
        stats.notice_radius = 200.0;
        let mut enemy = squid_at(Vec2::ZERO, &config);
        enemy.get_status(Vec2::new(distance, 0.0));
        assert_eq!(enemy.status(), expected);
    }

    #[test]
    fn moving_enemy_heads_for_the_player() {
        let config = GameConfig::default();
        let mut enemy = squid_at(Vec2::ZERO, &config);
        let player = Vec2::new(200.0, 0.0);
        enemy.get_status(player);
        enemy.actions(player, ms(0));
        enemy.update(ms(0), &ObstacleSet::default(), &mut EventQueue::new());
        assert_relative_eq!(enemy.center().x, 3.0);
        assert_relative_eq!(enemy.center().y, 0.0);
    }

    #[test]
    fn entering_attack_resets_the_frame_cursor() {
        let config = GameConfig::default();
        let mut enemy = squid_at(Vec2::ZERO, &config);
        let far = Vec2::new(200.0, 0.0);
        for _ in 0..10 {
            enemy.get_status(far);
            enemy.actions(far, ms(0));
            enemy.update(ms(0), &ObstacleSet::default(), &mut EventQueue::new());
        }
        assert!(enemy.animator().frame_index > 0.0);

        let near = enemy.center() + Vec2::new(10.0, 0.0);
        enemy.get_status(near);
        assert_eq!(enemy.status(), EnemyStatus::Attack);
        assert_eq!(enemy.animator().frame_index, 0.0);
    }

    #[test]
    fn completed_attack_emits_one_hit_and_closes_the_gate() {
        let config = GameConfig::default();
        let mut enemy = squid_at(Vec2::ZERO, &config);
        let player = Vec2::new(10.0, 0.0);
        let mut events = EventQueue::new();

        // Four frames at 0.15 per tick wrap on the 27th tick.
        let mut now = ms(0);
        for tick in 0..27u64 {
            now = ms(tick * 16);
            enemy.get_status(player);
            enemy.actions(player, now);
            enemy.update(now, &ObstacleSet::default(), &mut events);
        }
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events.iter().next(),
            Some(FrameEvent::PlayerHit { amount, .. }) if *amount == 20.0
        ));
        assert!(!enemy.can_attack());

        enemy.get_status(player);
        assert_eq!(enemy.status(), EnemyStatus::Move);

        let later = now + ms(401);
        enemy.update(later, &ObstacleSet::default(), &mut events);
        assert!(enemy.can_attack());
    }

    #[test]
    fn hits_open_an_invulnerability_window() {
        let config = GameConfig::default();
        let mut enemy = squid_at(Vec2::ZERO, &config);
        assert!(enemy.take_damage(30.0, ms(0), Vec2::new(-50.0, 0.0)));
        assert!(!enemy.take_damage(30.0, ms(100), Vec2::new(-50.0, 0.0)));
        assert_relative_eq!(enemy.health(), 70.0);

        enemy.update(ms(301), &ObstacleSet::default(), &mut EventQueue::new());
        assert!(enemy.is_vulnerable());
        assert!(enemy.take_damage(30.0, ms(302), Vec2::new(-50.0, 0.0)));
    }

    #[test]
    fn knockback_pushes_away_from_the_hit() {
        let config = GameConfig::default();
        let mut enemy = squid_at(Vec2::ZERO, &config);
        let player = Vec2::new(-100.0, 0.0);
        enemy.take_damage(10.0, ms(0), player);

        enemy.get_status(player);
        enemy.actions(player, ms(16));
        enemy.update(ms(16), &ObstacleSet::default(), &mut EventQueue::new());
        // speed 3 * resistance 3, away from the player despite chasing it.
        assert_relative_eq!(enemy.center().x, 9.0);
    }

    #[test]
    fn lethal_damage_marks_the_enemy_dead() {
        let config = GameConfig::default();
        let mut enemy = squid_at(Vec2::ZERO, &config);
        enemy.take_damage(150.0, ms(0), Vec2::ZERO);
        assert!(enemy.is_dead());
        assert!(!enemy.take_damage(1.0, ms(400), Vec2::ZERO));
    }

    #[test]
    fn missing_stat_block_fails_construction() {
        let mut config = GameConfig::default();
        config.monsters.remove(&MonsterKind::Squid);
        let mut assets = AssetManager::new();
        register_monster(&mut assets, MonsterKind::Squid, 1);
        let result = Enemy::new(
            crate::world::EntityIds::new().allocate(),
            MonsterKind::Squid,
            Vec2::ZERO,
            &config,
            assets.monster_animations(MonsterKind::Squid).unwrap(),
        );
        assert!(matches!(result, Err(LevelError::MissingMonsterStats { .. })));
    }
}
