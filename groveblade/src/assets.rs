use std::collections::HashMap;
use std::hash::Hash;

use crate::error::LevelError;
use crate::render::{Animation, AnimationSet, TextureHandle};
use crate::settings::MonsterKind;
use crate::status::{EnemyStatus, Facing, Phase, PlayerStatus};

/// Registry of images supplied by the external asset loader.
///
/// The loader decodes files and hands over opaque [`TextureHandle`]s keyed by
/// the same paths the original art is organised under, e.g.
/// `player/down_idle` or `monsters/squid/attack`. Lookups that fail are
/// configuration errors and surface while a level is being built.
#[derive(Clone, Debug, Default)]
pub struct AssetManager {
    animations: HashMap<String, Animation>,
    textures: HashMap<String, TextureHandle>,
}

impl AssetManager {
    /// Create a new asset manager with no registered assets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the frame sequence for `key`, replacing any previous one.
    pub fn register_animation(
        &mut self,
        key: impl Into<String>,
        frames: Vec<TextureHandle>,
    ) -> Result<(), LevelError> {
        let key = key.into();
        let animation = Animation::new(&key, frames)?;
        self.animations.insert(key, animation);
        Ok(())
    }

    /// Register a single still image for `key`.
    pub fn register_texture(&mut self, key: impl Into<String>, texture: TextureHandle) {
        self.textures.insert(key.into(), texture);
    }

    pub fn animation(&self, key: &str) -> Result<&Animation, LevelError> {
        self.animations
            .get(key)
            .ok_or_else(|| LevelError::MissingAnimation { key: key.to_string() })
    }

    pub fn texture(&self, key: &str) -> Result<TextureHandle, LevelError> {
        self.textures
            .get(key)
            .copied()
            .ok_or_else(|| LevelError::MissingTexture { key: key.to_string() })
    }

    /// Collect the animation of every status in `statuses`, failing on the
    /// first one that is not registered.
    pub fn animation_set<S, I, F>(&self, statuses: I, key: F) -> Result<AnimationSet<S>, LevelError>
    where
        S: Copy + Eq + Hash,
        I: IntoIterator<Item = S>,
        F: Fn(S) -> String,
    {
        let mut by_status = HashMap::new();
        for status in statuses {
            let animation = self.animation(&key(status))?;
            by_status.insert(status, animation.clone());
        }
        Ok(AnimationSet::new(by_status))
    }

    pub fn player_animations(&self) -> Result<AnimationSet<PlayerStatus>, LevelError> {
        let statuses = Facing::ALL
            .into_iter()
            .flat_map(|facing| Phase::ALL.into_iter().map(move |phase| PlayerStatus::new(facing, phase)));
        self.animation_set(statuses, player_animation_key)
    }

    pub fn monster_animations(&self, kind: MonsterKind) -> Result<AnimationSet<EnemyStatus>, LevelError> {
        self.animation_set(EnemyStatus::ALL, |status| monster_animation_key(kind, status))
    }
}

pub fn player_animation_key(status: PlayerStatus) -> String {
    format!("player/{status}")
}

pub fn monster_animation_key(kind: MonsterKind, status: EnemyStatus) -> String {
    format!("monsters/{kind}/{status}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_follow_asset_folders() {
        assert_eq!(
            player_animation_key(PlayerStatus::new(Facing::Left, Phase::Attacking)),
            "player/left_attack"
        );
        assert_eq!(
            monster_animation_key(MonsterKind::Raccoon, EnemyStatus::Move),
            "monsters/raccoon/move"
        );
    }

    #[test]
    fn empty_sequences_are_rejected_on_registration() {
        let mut assets = AssetManager::new();
        assert!(matches!(
            assets.register_animation("player/up", Vec::new()),
            Err(LevelError::EmptyAnimation { .. })
        ));
    }

    #[test]
    fn missing_player_animation_is_reported_by_key() {
        let mut assets = AssetManager::new();
        for facing in Facing::ALL {
            for phase in Phase::ALL {
                let key = player_animation_key(PlayerStatus::new(facing, phase));
                if key != "player/right_attack" {
                    assets.register_animation(key, vec![TextureHandle(1)]).unwrap();
                }
            }
        }
        assert_eq!(
            assets.player_animations().err(),
            Some(LevelError::MissingAnimation { key: "player/right_attack".into() })
        );
    }
}
