//! Geometric types for canvas regions and coordinates
//!
//! Everything here is in canvas space: the origin is the top-left pixel of
//! the captured backdrop and one unit is one logical pixel.

use serde::{Deserialize, Serialize};

/// A point in canvas coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Angle in radians of the vector from `self` to `other`
    pub fn angle_to(self, other: Point) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }

    /// Offset by a vector
    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Size of the captured canvas
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The whole canvas as a rectangle anchored at the origin
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Clamp a point into the canvas
    pub fn clamp(self, p: Point) -> Point {
        Point::new(
            clamp_axis(p.x, 0.0, self.width),
            clamp_axis(p.y, 0.0, self.height),
        )
    }
}

/// Axis-aligned rectangle with non-negative size
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle from origin and size
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Zero-sized rectangle at a point
    pub fn at(p: Point) -> Self {
        Self::new(p.x, p.y, 0.0, 0.0)
    }

    /// Axis-aligned box spanned by two arbitrary corners
    ///
    /// On each axis the smaller coordinate becomes the origin and the size is
    /// the absolute difference, so the result does not depend on drag
    /// direction.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let (left, right) = if a.x <= b.x { (a.x, b.x) } else { (b.x, a.x) };
        let (top, bottom) = if a.y <= b.y { (a.y, b.y) } else { (b.y, a.y) };
        Self::new(left, top, right - left, bottom - top)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// True when both dimensions are finite and non-negative
    pub fn is_valid(&self) -> bool {
        [self.left, self.top, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
    }

    /// True when the rectangle encloses some area
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Calculate the intersection of two rectangles
    pub fn intersect(&self, other: Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if left < right && top < bottom {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }

    /// Grow the rectangle by `margin` on every side
    pub fn inflate(&self, margin: f64) -> Rect {
        Rect::new(
            self.left - margin,
            self.top - margin,
            self.width + margin * 2.0,
            self.height + margin * 2.0,
        )
    }

    /// Check if this rectangle contains a point (edges inclusive)
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right() && p.y >= self.top && p.y <= self.bottom()
    }
}

/// Clamp a value into `[min, max]`, tolerating an inverted range
#[inline]
pub fn clamp_axis(v: f64, min: f64, max: f64) -> f64 {
    if max < min { min } else { v.clamp(min, max) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_is_direction_independent() {
        let a = Rect::from_corners(Point::new(10.0, 10.0), Point::new(50.0, 80.0));
        let b = Rect::from_corners(Point::new(50.0, 80.0), Point::new(10.0, 10.0));
        assert_eq!(a, b);
        assert_eq!(a, Rect::new(10.0, 10.0, 40.0, 70.0));

        let c = Rect::from_corners(Point::new(50.0, 10.0), Point::new(10.0, 80.0));
        assert_eq!(a, c);
    }

    #[test]
    fn test_intersect() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        assert_eq!(a.intersect(b), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
        assert_eq!(a.intersect(Rect::new(200.0, 0.0, 10.0, 10.0)), None);
    }

    #[test]
    fn test_contains_point_edges_inclusive() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains_point(Point::new(10.0, 30.0)));
        assert!(!r.contains_point(Point::new(9.9, 15.0)));
    }

    #[test]
    fn test_point_math() {
        let a = Point::new(0.0, 0.0);
        assert_eq!(a.distance(Point::new(3.0, 4.0)), 5.0);
        assert_eq!(a.offset(-2.0, 1.5), Point::new(-2.0, 1.5));
        assert!((a.angle_to(Point::new(0.0, 1.0)) - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_canvas_clamp() {
        let canvas = CanvasSize::new(100.0, 50.0);
        assert_eq!(canvas.clamp(Point::new(-5.0, 70.0)), Point::new(0.0, 50.0));
    }
}
