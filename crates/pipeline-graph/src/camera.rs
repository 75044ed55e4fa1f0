//! Pan/zoom camera with world-to-screen coordinate transforms.
//!
//! Camera state is UI-only, polled each frame. Transforms are immediate,
//! with no easing: the view lands exactly where the gesture puts it.

use egui::{Pos2, Rect, Vec2};

/// Wheel-up multiplies zoom by this; wheel-down divides.
pub const ZOOM_STEP: f32 = 1.0 / 0.9;

/// 2D camera with pan and zoom.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Center of the view in world coordinates.
    center: Pos2,
    /// Zoom level, 1.0 = 100%.
    zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            center: Pos2::new(300.0, 250.0),
            zoom: 1.0,
            min_zoom: 0.1,
            max_zoom: 2.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn center(&self) -> Pos2 {
        self.center
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Pan by delta in screen coordinates.
    pub fn pan(&mut self, screen_delta: Vec2) {
        self.center -= screen_delta / self.zoom;
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Zoom by factor, keeping `screen_pos` fixed in view.
    pub fn zoom_at(&mut self, factor: f32, screen_pos: Pos2, screen_rect: Rect) {
        let old_zoom = self.zoom;
        let new_zoom = (old_zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - old_zoom).abs() < 0.0001 {
            return;
        }

        // Keep the world point under the cursor stationary through the zoom.
        let offset_from_center = screen_pos - screen_rect.center();
        let world_offset_old = offset_from_center / old_zoom;
        let world_offset_new = offset_from_center / new_zoom;

        self.center += world_offset_old - world_offset_new;
        self.zoom = new_zoom;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // =========================================================================
    // COORDINATE TRANSFORMS
    // =========================================================================

    pub fn world_to_screen(&self, world_pos: Pos2, screen_rect: Rect) -> Pos2 {
        screen_rect.center() + (world_pos - self.center) * self.zoom
    }

    pub fn screen_to_world(&self, screen_pos: Pos2, screen_rect: Rect) -> Pos2 {
        self.center + (screen_pos - screen_rect.center()) / self.zoom
    }

    /// Visible world bounds for the current screen rect.
    pub fn visible_bounds(&self, screen_rect: Rect) -> Rect {
        Rect::from_center_size(self.center, screen_rect.size() / self.zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))
    }

    #[test]
    fn transforms_round_trip() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(37.0, -12.0));
        camera.set_zoom(1.4);

        let world = Pos2::new(123.0, 456.0);
        let screen_pos = camera.world_to_screen(world, screen());
        let back = camera.screen_to_world(screen_pos, screen());
        assert!((back - world).length() < 0.001);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut camera = Camera::new();
        camera.set_zoom(9.0);
        assert_eq!(camera.zoom(), 2.0);
        camera.set_zoom(0.0001);
        assert_eq!(camera.zoom(), 0.1);
    }

    #[test]
    fn zoom_at_keeps_cursor_point_stationary() {
        let mut camera = Camera::new();
        let cursor = Pos2::new(600.0, 150.0);
        let world_before = camera.screen_to_world(cursor, screen());

        camera.zoom_at(ZOOM_STEP, cursor, screen());

        let world_after = camera.screen_to_world(cursor, screen());
        assert!((world_after - world_before).length() < 0.01);
    }

    #[test]
    fn zoom_at_clamp_boundary_does_not_drift() {
        let mut camera = Camera::new();
        camera.set_zoom(2.0);
        let center_before = camera.center();
        camera.zoom_at(ZOOM_STEP, Pos2::new(700.0, 500.0), screen());
        assert_eq!(camera.center(), center_before);
    }

    #[test]
    fn pan_moves_opposite_to_screen_delta() {
        let mut camera = Camera::new();
        let before = camera.center();
        camera.pan(Vec2::new(100.0, 0.0));
        assert!(camera.center().x < before.x);
    }
}
