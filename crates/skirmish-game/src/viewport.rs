//! The main camera viewport the camera systems steer

use skirmish_core::{EntityId, Rect, Vec2};

/// Scroll, zoom and follow state of the on-screen view.
///
/// `scroll_x`/`scroll_y` is the world position of the view's top-left corner
/// at zoom 1; zooming scales around the view center.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub scroll_x: f32,
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
    zoom: f32,
    follow: Option<EntityId>,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_x: 0.0,
            scroll_y: 0.0,
            width,
            height,
            zoom: 1.0,
            follow: None,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom > 0.0 {
            self.zoom = zoom;
        }
    }

    pub fn scroll(&self) -> Vec2 {
        Vec2::new(self.scroll_x, self.scroll_y)
    }

    pub fn scroll_by(&mut self, dx: f32, dy: f32) {
        self.scroll_x += dx;
        self.scroll_y += dy;
    }

    /// Scroll so that `point` sits in the middle of the view
    pub fn center_on(&mut self, point: Vec2) {
        self.scroll_x = point.x - self.width / 2.0;
        self.scroll_y = point.y - self.height / 2.0;
    }

    /// Follow `target`, centering on `point` (its current body center)
    pub fn follow(&mut self, target: EntityId, point: Vec2) {
        if self.follow != Some(target) {
            log::debug!("viewport following {}", target);
        }
        self.follow = Some(target);
        self.center_on(point);
    }

    pub fn stop_follow(&mut self) {
        if let Some(target) = self.follow.take() {
            log::debug!("viewport stopped following {}", target);
        }
    }

    pub fn following(&self) -> Option<EntityId> {
        self.follow
    }

    pub fn midpoint(&self) -> Vec2 {
        Vec2::new(
            self.scroll_x + self.width / 2.0,
            self.scroll_y + self.height / 2.0,
        )
    }

    /// World-space rectangle currently visible
    pub fn world_view(&self) -> Rect {
        Rect::from_center(self.midpoint(), self.width / self.zoom, self.height / self.zoom)
    }
}
