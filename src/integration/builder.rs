//! Builder for creating Detection points from detector outputs.

use crate::tracker::Detection;

/// Builder for creating a point `Detection` from a bounding box, a pixel
/// position or a normalized landmark.
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    x: f32,
    y: f32,
}

impl DetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the position directly in pixels.
    pub fn point(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Use the center of a TLBR bounding box (x1, y1, x2, y2).
    pub fn tlbr_center(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.x = (x1 + x2) / 2.0;
        self.y = (y1 + y2) / 2.0;
        self
    }

    /// Use the top-center of a TLBR bounding box, roughly where a head is.
    pub fn tlbr_top_center(mut self, x1: f32, y1: f32, x2: f32, _y2: f32) -> Self {
        self.x = (x1 + x2) / 2.0;
        self.y = y1;
        self
    }

    /// Convert a landmark in normalized `[0, 1]` coordinates to whole pixels
    /// of a `width` x `height` frame.
    pub fn normalized(mut self, nx: f32, ny: f32, width: u32, height: u32) -> Self {
        self.x = (nx * width as f32).trunc();
        self.y = (ny * height as f32).trunc();
        self
    }

    /// Build the final `Detection`.
    pub fn build(self) -> Detection {
        Detection::new(self.x, self.y)
    }
}
