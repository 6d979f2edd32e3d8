//! Axis-separated rectangle collision against a static obstacle set.
//!
//! A mover is displaced along one axis, clamped against everything it now
//! overlaps, and only then displaced along the other axis. Resolving the axes
//! one at a time keeps diagonal movers from tunnelling through corners and
//! lets them slide along walls.

use crate::math::{Rect, Vec2};

/// Stable identifier of an obstacle, assigned in load order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObstacleId(u32);

impl ObstacleId {
    pub fn to_u32(self) -> u32 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub hitbox: Rect,
}

/// Immutable set of static obstacle bounds shared by every mover.
///
/// Iteration is always in ascending [`ObstacleId`] order, so when several
/// obstacles overlap a mover on the same axis the clamps are applied in a
/// reproducible sequence and the highest id wins.
#[derive(Clone, Debug, Default)]
pub struct ObstacleSet {
    obstacles: Vec<Obstacle>,
}

impl ObstacleSet {
    pub fn new<I>(hitboxes: I) -> Self
    where
        I: IntoIterator<Item = Rect>,
    {
        let obstacles = hitboxes
            .into_iter()
            .enumerate()
            .map(|(index, hitbox)| Obstacle {
                id: ObstacleId(index as u32),
                hitbox,
            })
            .collect();
        Self { obstacles }
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.get(id.0 as usize)
    }

    /// True if `hitbox` overlaps any obstacle.
    pub fn overlaps(&self, hitbox: &Rect) -> bool {
        self.obstacles.iter().any(|o| o.hitbox.intersects(hitbox))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Clamp `hitbox` out of every obstacle it overlaps on `axis`.
///
/// The side it is pushed to depends on the sign of the movement `direction`
/// along that axis. A mover with no motion on the axis is left untouched.
pub fn resolve_axis(hitbox: &mut Rect, direction: Vec2, axis: Axis, obstacles: &ObstacleSet) {
    for obstacle in obstacles.iter() {
        if !obstacle.hitbox.intersects(hitbox) {
            continue;
        }
        match axis {
            Axis::Horizontal => {
                if direction.x > 0.0 {
                    hitbox.set_right(obstacle.hitbox.left());
                } else if direction.x < 0.0 {
                    hitbox.set_left(obstacle.hitbox.right());
                }
            }
            Axis::Vertical => {
                if direction.y > 0.0 {
                    hitbox.set_bottom(obstacle.hitbox.top());
                } else if direction.y < 0.0 {
                    hitbox.set_top(obstacle.hitbox.bottom());
                }
            }
        }
    }
}

/// Displace `hitbox` by `direction * speed`, horizontal first, resolving each
/// axis before the next is applied.
pub fn sweep(hitbox: &mut Rect, direction: Vec2, speed: f32, obstacles: &ObstacleSet) {
    hitbox.x += direction.x * speed;
    resolve_axis(hitbox, direction, Axis::Horizontal, obstacles);
    hitbox.y += direction.y * speed;
    resolve_axis(hitbox, direction, Axis::Vertical, obstacles);
}
