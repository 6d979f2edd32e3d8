//! Depth-sorted draw list.
//!
//! The renderer itself is an external collaborator. The simulation hands it a
//! [`DrawList`] in painter's order: the floor first, then entities sorted by
//! the vertical center of their visual bounds so that things lower on screen
//! are drawn over things higher up.

use crate::math::{Rect, Vec2};
use crate::world::EntityId;

use super::sprite::TextureHandle;

/// Static ground image drawn beneath everything else.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloorLayer {
    pub texture: TextureHandle,
    /// World position of the image's top-left corner.
    pub origin: Vec2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawLayer {
    Floor,
    Entity(EntityId),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    pub layer: DrawLayer,
    pub texture: TextureHandle,
    /// Screen-space top-left, camera offset already applied.
    pub position: Vec2,
    /// Visual bounds in world space; the sort key is their center y.
    pub bounds: Rect,
    /// 0 is invisible, 255 is opaque.
    pub alpha: u8,
}

impl DrawCommand {
    pub fn depth(&self) -> f32 {
        self.bounds.center().y
    }
}

/// Sort commands ascending by [`DrawCommand::depth`]. The sort is stable, so
/// equal depths keep their insertion order. A NaN depth sorts after every
/// finite one.
pub fn depth_sort(commands: &mut [DrawCommand]) {
    commands.sort_by(|a, b| a.depth().total_cmp(&b.depth()));
}

/// Everything to draw for one frame, in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    pub camera_offset: Vec2,
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    /// Entity ids in draw order, skipping the floor.
    pub fn entity_order(&self) -> Vec<EntityId> {
        self.commands
            .iter()
            .filter_map(|command| match command.layer {
                DrawLayer::Entity(id) => Some(id),
                DrawLayer::Floor => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::EntityIds;

    fn command(id: EntityId, y: f32) -> DrawCommand {
        DrawCommand {
            layer: DrawLayer::Entity(id),
            texture: TextureHandle(0),
            position: Vec2::ZERO,
            bounds: Rect::from_center(Vec2::new(0.0, y), Vec2::new(10.0, 10.0)),
            alpha: 255,
        }
    }

    #[test]
    fn sorts_by_vertical_center_regardless_of_insertion() {
        let mut ids = EntityIds::new();
        let (a, b, c) = (ids.allocate(), ids.allocate(), ids.allocate());
        let mut commands = vec![command(a, 10.0), command(b, 50.0), command(c, 30.0)];
        depth_sort(&mut commands);
        let depths: Vec<f32> = commands.iter().map(DrawCommand::depth).collect();
        assert_eq!(depths, vec![10.0, 30.0, 50.0]);
    }

    #[test]
    fn equal_depths_keep_insertion_order() {
        let mut ids = EntityIds::new();
        let (a, b) = (ids.allocate(), ids.allocate());
        let mut commands = vec![command(b, 20.0), command(a, 20.0)];
        depth_sort(&mut commands);
        let list = DrawList {
            camera_offset: Vec2::ZERO,
            commands,
        };
        assert_eq!(list.entity_order(), vec![b, a]);
    }

    #[test]
    fn nan_depth_sorts_last() {
        let mut ids = EntityIds::new();
        let (a, b, c) = (ids.allocate(), ids.allocate(), ids.allocate());
        let mut commands = vec![command(a, f32::NAN), command(b, 40.0), command(c, -5.0)];
        depth_sort(&mut commands);
        let list = DrawList {
            camera_offset: Vec2::ZERO,
            commands,
        };
        assert_eq!(list.entity_order(), vec![c, b, a]);
    }
}
