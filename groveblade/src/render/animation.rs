use std::collections::HashMap;
use std::hash::Hash;

use crate::error::LevelError;

use super::sprite::TextureHandle;

/// Frames advanced per tick.
pub const ANIMATION_SPEED: f32 = 0.15;

/// Ordered, non-empty frame sequence for one status.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    frames: Vec<TextureHandle>,
}

impl Animation {
    /// Fails with [`LevelError::EmptyAnimation`] when `frames` is empty, so an
    /// asset mismatch is reported at load time instead of mid-frame.
    pub fn new(key: &str, frames: Vec<TextureHandle>) -> Result<Self, LevelError> {
        if frames.is_empty() {
            return Err(LevelError::EmptyAnimation { key: key.to_string() });
        }
        Ok(Self { frames })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Image for a frame cursor, clamped to the last frame.
    pub fn frame(&self, index: usize) -> TextureHandle {
        let last = self.frames.len().saturating_sub(1);
        self.frames[index.min(last)]
    }

    pub fn frames(&self) -> &[TextureHandle] {
        &self.frames
    }
}

/// Animations for every status an entity can be in.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationSet<S: Eq + Hash> {
    by_status: HashMap<S, Animation>,
}

impl<S: Eq + Hash> AnimationSet<S> {
    pub fn new(by_status: HashMap<S, Animation>) -> Self {
        Self { by_status }
    }

    pub fn get(&self, status: &S) -> Option<&Animation> {
        self.by_status.get(status)
    }

    /// Image for `status` at `frame`, if that status has an animation.
    pub fn texture(&self, status: &S, frame: usize) -> Option<TextureHandle> {
        self.get(status).map(|animation| animation.frame(frame))
    }
}

/// Fractional frame cursor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animator {
    pub frame_index: f32,
    pub speed: f32,
}

impl Animator {
    pub fn new(speed: f32) -> Self {
        Self {
            frame_index: 0.0,
            speed,
        }
    }

    /// Advance by one tick through a sequence of `len` frames.
    ///
    /// Returns true on the tick the cursor runs off the end and wraps to 0,
    /// which callers use as the "animation completed" edge.
    pub fn advance(&mut self, len: usize) -> bool {
        self.frame_index += self.speed;
        if self.frame_index >= len as f32 {
            self.frame_index = 0.0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.frame_index = 0.0;
    }

    pub fn frame(&self) -> usize {
        self.frame_index.floor() as usize
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(ANIMATION_SPEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_animation_is_rejected() {
        let err = Animation::new("player/down_idle", Vec::new()).unwrap_err();
        assert_eq!(
            err,
            LevelError::EmptyAnimation {
                key: "player/down_idle".into()
            }
        );
    }

    #[test]
    fn cursor_wraps_and_reports_completion() {
        let mut animator = Animator::new(0.5);
        assert!(!animator.advance(2));
        assert_eq!(animator.frame(), 0);
        assert!(!animator.advance(2));
        assert_eq!(animator.frame(), 1);
        assert!(!animator.advance(2));
        assert_eq!(animator.frame(), 1);
        assert!(animator.advance(2));
        assert_eq!(animator.frame(), 0);
    }

    #[test]
    fn frame_lookup_clamps_to_last() {
        let animation = Animation::new("tiles/grass", vec![TextureHandle(3), TextureHandle(4)]).unwrap();
        assert_eq!(animation.len(), 2);
        assert!(!animation.is_empty());
        assert_eq!(animation.frame(1), TextureHandle(4));
        assert_eq!(animation.frame(9), TextureHandle(4));
    }
}
