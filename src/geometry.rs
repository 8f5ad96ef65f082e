//! Geometric primitives for figure layout.
//!
//! Layout happens on the pixel grid: cell rectangles, panel subregions,
//! and margin arithmetic all use [`Rect`].

/// An axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: u32,
    /// Y coordinate of the top-left corner.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// X coordinate one past the right edge.
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Y coordinate one past the bottom edge.
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Horizontal center.
    #[must_use]
    pub const fn center_x(&self) -> u32 {
        self.x + self.width / 2
    }

    /// Vertical center.
    #[must_use]
    pub const fn center_y(&self) -> u32 {
        self.y + self.height / 2
    }

    /// Shrink by per-side margins, saturating to an empty rectangle.
    #[must_use]
    pub fn inset(&self, left: u32, top: u32, right: u32, bottom: u32) -> Self {
        let width = self.width.saturating_sub(left + right);
        let height = self.height.saturating_sub(top + bottom);
        Self::new(self.x + left, self.y + top, width, height)
    }

    /// Check if a pixel coordinate is inside the rectangle.
    #[must_use]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0
            && y >= 0
            && (x as u32) >= self.x
            && (x as u32) < self.right()
            && (y as u32) >= self.y
            && (y as u32) < self.bottom()
    }

    /// True when either side has zero length.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10, 20, 30, 40);
        assert_eq!(rect.right(), 40);
        assert_eq!(rect.bottom(), 60);
        assert_eq!(rect.center_x(), 25);
        assert_eq!(rect.center_y(), 40);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(5, 5, 10, 10);
        assert!(rect.contains(5, 5));
        assert!(rect.contains(14, 14));
        assert!(!rect.contains(15, 5));
        assert!(!rect.contains(4, 5));
        assert!(!rect.contains(-1, -1));
    }

    #[test]
    fn test_rect_inset() {
        let rect = Rect::new(0, 0, 100, 80);
        let inner = rect.inset(10, 5, 10, 5);
        assert_eq!(inner, Rect::new(10, 5, 80, 70));
    }

    #[test]
    fn test_rect_inset_saturates() {
        let rect = Rect::new(0, 0, 10, 10);
        let inner = rect.inset(8, 8, 8, 8);
        assert!(inner.is_empty());
    }
}
