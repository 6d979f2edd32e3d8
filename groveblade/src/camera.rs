//! Hard-follow camera centred on the player.

use glam::Mat4;

use crate::math::Vec2;

/// Camera tracking a world position with no smoothing or dead zone.
///
/// `offset` is the world position of the viewport's top-left corner, so
/// drawing anything at `world - offset` puts the followed target at the
/// middle of the screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera2D {
    pub offset: Vec2,
    pub viewport: Vec2,
}

impl Camera2D {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            offset: Vec2::ZERO,
            viewport,
        }
    }

    pub fn half_viewport(&self) -> Vec2 {
        self.viewport * 0.5
    }

    /// Recompute the offset so `target` sits at the viewport center.
    pub fn follow(&mut self, target: Vec2) {
        self.offset = target - self.half_viewport();
    }

    pub fn set_viewport(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }

    /// Converts world coordinates to screen coordinates using this camera.
    pub fn world_to_screen(&self, world_pos: Vec2) -> Vec2 {
        world_pos - self.offset
    }

    /// Converts screen coordinates to world coordinates using this camera.
    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vec2 {
        screen_pos + self.offset
    }

    /// Orthographic view-projection for GPU backends, y pointing down.
    pub fn view_projection(&self) -> Mat4 {
        let projection =
            Mat4::orthographic_rh_gl(0.0, self.viewport.x, self.viewport.y, 0.0, -1.0, 1.0);
        let translation = Mat4::from_translation((-self.offset).to_glam().extend(0.0));
        projection * translation
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new(Vec2::new(1280.0, 720.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec3;

    #[test]
    fn follow_centres_target() {
        let mut camera = Camera2D::new(Vec2::new(1280.0, 720.0));
        camera.follow(Vec2::new(1000.0, 500.0));
        assert_eq!(camera.offset, Vec2::new(360.0, 140.0));
        assert_eq!(camera.world_to_screen(Vec2::new(1000.0, 500.0)), Vec2::new(640.0, 360.0));
        assert_eq!(camera.screen_to_world(Vec2::new(640.0, 360.0)), Vec2::new(1000.0, 500.0));
    }

    #[test]
    fn follow_has_no_lag() {
        let mut camera = Camera2D::new(Vec2::new(100.0, 100.0));
        camera.follow(Vec2::new(0.0, 0.0));
        camera.follow(Vec2::new(500.0, 0.0));
        assert_eq!(camera.offset, Vec2::new(450.0, -50.0));
    }

    #[test]
    fn view_projection_maps_target_to_clip_center() {
        let mut camera = Camera2D::new(Vec2::new(800.0, 600.0));
        camera.follow(Vec2::new(250.0, 125.0));
        let clip = camera.view_projection().project_point3(Vec3::new(250.0, 125.0, 0.0));
        assert_relative_eq!(clip.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(clip.y, 0.0, epsilon = 1e-5);
    }
}
