//! Kinematic movement shared by the player and enemies.

use std::time::Duration;

use crate::collision::{sweep, ObstacleSet};
use crate::math::{Rect, Vec2};
use crate::render::{DrawCommand, DrawLayer, TextureHandle};
use crate::world::EntityId;

/// Position, collision and visual bounds of a moving entity.
///
/// `hitbox` is authoritative. `bounds` (what gets drawn) is recentered on the
/// hitbox after every move and is never used to derive the hitbox.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub hitbox: Rect,
    pub bounds: Rect,
    /// Unit or zero vector. Zero means no intent to move this tick.
    pub direction: Vec2,
}

impl Body {
    /// Build a body whose hitbox is `bounds` shrunk vertically by `inset`
    /// pixels around the same center.
    pub fn new(bounds: Rect, inset: f32) -> Self {
        Self {
            hitbox: bounds.inflate(0.0, -inset),
            bounds,
            direction: Vec2::ZERO,
        }
    }

    /// World position used for distance checks and as the draw anchor.
    pub fn center(&self) -> Vec2 {
        self.hitbox.center()
    }

    pub fn recenter_bounds(&mut self) {
        self.bounds.set_center(self.hitbox.center());
    }
}

/// Move `body` by `speed` pixels along its direction, colliding with
/// `obstacles` one axis at a time.
///
/// A nonzero direction is normalized first so diagonal speed matches axial
/// speed; the normalized direction is kept on the body.
pub fn move_body(body: &mut Body, speed: f32, obstacles: &ObstacleSet) {
    if body.direction.length() != 0.0 {
        body.direction = body.direction.normalized();
    }
    sweep(&mut body.hitbox, body.direction, speed, obstacles);
    body.recenter_bounds();
}

/// Capabilities shared by every simulated entity: it has a position, it
/// collides, and it is drawn from an animation.
pub trait Actor {
    fn id(&self) -> EntityId;

    fn body(&self) -> &Body;

    /// Frame of the animation currently playing, if one is loaded.
    fn texture(&self) -> Option<TextureHandle>;

    fn is_vulnerable(&self) -> bool;

    fn center(&self) -> Vec2 {
        self.body().center()
    }

    fn hitbox(&self) -> Rect {
        self.body().hitbox
    }

    fn bounds(&self) -> Rect {
        self.body().bounds
    }

    /// Draw alpha: flickers while the invulnerability window is open.
    fn alpha(&self, now: Duration) -> u8 {
        if self.is_vulnerable() || (now.as_millis() as f32).sin() >= 0.0 {
            255
        } else {
            0
        }
    }

    /// Entity-layer draw command positioned relative to `camera_offset`.
    fn draw_command(&self, now: Duration, camera_offset: Vec2) -> Option<DrawCommand> {
        let texture = self.texture()?;
        let bounds = self.bounds();
        Some(DrawCommand {
            layer: DrawLayer::Entity(self.id()),
            texture,
            position: bounds.top_left() - camera_offset,
            bounds,
            alpha: self.alpha(now),
        })
    }
}
