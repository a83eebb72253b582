/// Axis-aligned bar rectangle in pixel coordinates
///
/// `x`/`y` is the top-left pixel; `width`/`height` count pixels, so the
/// rectangle covers `x..=right()` and `y..=bottom()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bar {
    /// Left column
    pub x: usize,
    /// Top row
    pub y: usize,
    /// Width in pixels (at least 1 for a real bar)
    pub width: usize,
    /// Height in pixels (at least 1 for a real bar)
    pub height: usize,
}

impl Bar {
    /// Create a new bar
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a bar from inclusive corner coordinates
    pub fn from_corners(min_x: usize, min_y: usize, max_x: usize, max_y: usize) -> Self {
        Self {
            x: min_x,
            y: min_y,
            width: max_x.saturating_sub(min_x) + 1,
            height: max_y.saturating_sub(min_y) + 1,
        }
    }

    /// Last column covered by the bar
    pub fn right(&self) -> usize {
        (self.x + self.width).saturating_sub(1)
    }

    /// Last row covered by the bar
    pub fn bottom(&self) -> usize {
        (self.y + self.height).saturating_sub(1)
    }

    /// Shift the bar by a non-negative offset
    pub fn translate(&self, dx: usize, dy: usize) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

}
