use egui::{Pos2, Rect, Vec2};

#[derive(Clone, Debug)]
pub(crate) struct Bounds {
    min: Pos2,
    max: Pos2,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            min: Pos2::new(f32::MAX, f32::MAX),
            max: Pos2::new(f32::MIN, f32::MIN),
        }
    }
}

impl Bounds {
    pub fn compute_next(&mut self, loc: Pos2) {
        if loc.x < self.min.x {
            self.min.x = loc.x;
        }
        if loc.x > self.max.x {
            self.max.x = loc.x;
        }
        if loc.y < self.min.y {
            self.min.y = loc.y;
        }
        if loc.y > self.max.y {
            self.max.y = loc.y;
        }
    }

    /// Bounding rect, `None` if no location was processed.
    pub fn rect(&self) -> Option<Rect> {
        if self.min.x > self.max.x || self.min.y > self.max.y {
            return None;
        }
        Some(Rect::from_min_max(self.min, self.max))
    }
}

/// Zoom and pan mapping graph (canvas) coordinates to screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Current zoom factor
    pub zoom: f32,
    /// Current pan offset
    pub pan: Vec2,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            zoom: 1.,
            pan: Vec2::default(),
        }
    }
}

impl Frame {
    /// Frame showing `bounds` plus `padding` on every side centered in `canvas`.
    pub fn fit(bounds: Rect, padding: f32, canvas: Rect) -> Self {
        let mut diag = bounds.max - bounds.min + Vec2::splat(2. * padding);
        if !diag.x.is_finite() || !diag.y.is_finite() || diag.x <= 0. || diag.y <= 0. {
            diag = Vec2::new(1., 1.);
        }

        // minimum of the two factors keeps the aspect ratio
        let canvas_size = canvas.size();
        let mut zoom = (canvas_size.x / diag.x).min(canvas_size.y / diag.y).abs();
        if !zoom.is_finite() || zoom <= 0. {
            zoom = 1.;
        }

        let graph_center = bounds.center().to_vec2();
        Self {
            zoom,
            pan: canvas.center().to_vec2() - graph_center * zoom,
        }
    }

    pub fn canvas_to_screen_pos(&self, pos: Pos2) -> Pos2 {
        (pos.to_vec2() * self.zoom + self.pan).to_pos2()
    }

    pub fn canvas_to_screen_size(&self, size: f32) -> f32 {
        size * self.zoom
    }

    pub fn screen_to_canvas_pos(&self, pos: Pos2) -> Pos2 {
        ((pos.to_vec2() - self.pan) / self.zoom).to_pos2()
    }
}
