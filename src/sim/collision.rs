//! Axis-aligned rectangle overlap
//!
//! The only collision shape in the game is the AABB; overlap is binary with
//! no near-miss tolerance.

use glam::Vec2;

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Standard AABB overlap test: opposite edges must interleave on both
    /// axes. Touching edges do not count as overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_hit() {
        // Bullet-sized rect inside an object-sized rect
        let bullet = Rect::new(100.0, 50.0, 5.0, 10.0);
        let object = Rect::new(98.0, 55.0, 30.0, 30.0);
        assert!(bullet.overlaps(&object));
        assert!(object.overlaps(&bullet));
    }

    #[test]
    fn test_overlap_miss_horizontal() {
        let a = Rect::new(0.0, 0.0, 5.0, 10.0);
        let b = Rect::new(50.0, 0.0, 30.0, 30.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_overlap_miss_vertical() {
        let a = Rect::new(10.0, 0.0, 5.0, 10.0);
        let b = Rect::new(10.0, 100.0, 30.0, 30.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        // b starts exactly where a ends on the x axis
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_bottom_edge() {
        let r = Rect::new(0.0, 570.0, 30.0, 30.0);
        assert_eq!(r.bottom(), 600.0);
    }
}
