//! Click-versus-drag detection in screen space

/// Tracks one pointer gesture. A gesture that travels further than the
/// threshold is a drag (camera orbit) and must not place a block.
#[derive(Debug, Clone)]
pub struct DragDetector {
    threshold_px: f32,
    origin: Option<(f32, f32)>,
    dragging: bool,
}

impl DragDetector {
    pub fn new(threshold_px: f32) -> Self {
        Self {
            threshold_px,
            origin: None,
            dragging: false,
        }
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.dragging = false;
        self.origin = Some((x, y));
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        let Some((ox, oy)) = self.origin else {
            return;
        };
        let (dx, dy) = (x - ox, y - oy);
        if (dx * dx + dy * dy).sqrt() > self.threshold_px {
            self.dragging = true;
        }
    }

    /// Ends the gesture. The drag flag stays set until the next press so
    /// the click that follows release can still see it.
    pub fn pointer_up(&mut self) {
        self.origin = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

impl Default for DragDetector {
    fn default() -> Self {
        Self::new(5.0)
    }
}
