#![forbid(unsafe_code)]

//! Geometric primitives.

/// A point in host coordinates (origin at top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Displacement from `origin` to `self`.
    #[inline]
    pub fn delta_from(self, origin: Point) -> Delta {
        Delta {
            dx: self.x - origin.x,
            dy: self.y - origin.y,
        }
    }
}

/// A 2D displacement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Delta {
    /// Horizontal displacement (negative = leftward).
    pub dx: f32,
    /// Vertical displacement (negative = upward).
    pub dy: f32,
}

impl Delta {
    /// Create a new displacement.
    #[inline]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Whether horizontal movement strictly dominates vertical movement.
    #[inline]
    pub fn is_horizontal(self) -> bool {
        self.dx.abs() > self.dy.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_from_origin() {
        let d = Point::new(40.0, 105.0).delta_from(Point::new(100.0, 100.0));
        assert_eq!(d, Delta::new(-60.0, 5.0));
    }

    #[test]
    fn horizontal_dominance_is_strict() {
        assert!(Delta::new(-60.0, 5.0).is_horizontal());
        assert!(!Delta::new(-60.0, 80.0).is_horizontal());
        assert!(!Delta::new(10.0, -10.0).is_horizontal());
    }
}
