//! Integer lattice points and input segments.
//!
//! - `Point`: exact `(x, y)` pair; equality and hashing are structural.
//! - `Segment`: one input record `x1 y1 x2 y2`, endpoints kept in input order.
//! - `distance`: Euclidean length of the step between two points.

use std::fmt;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Immutable lattice point. Coordinates are compared exactly; there is no
/// tolerance-based merging anywhere in the crate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

/// One input segment. `a` and `b` keep the order in which they were read.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    #[inline]
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// A segment whose endpoints coincide. Legal input; it counts twice
    /// towards the degree of its single coordinate.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.a == self.b
    }

    #[inline]
    pub fn length(&self) -> f64 {
        distance(self.a, self.b)
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} -- {:?}", self.a, self.b)
    }
}

impl From<(i64, i64, i64, i64)> for Segment {
    fn from((x1, y1, x2, y2): (i64, i64, i64, i64)) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x2, y2))
    }
}

/// Euclidean distance. Deltas are taken in `f64`, so any pair of `i64`
/// coordinates is valid.
#[inline]
pub fn distance(p: Point, q: Point) -> f64 {
    let d = Vector2::new(q.x as f64 - p.x as f64, q.y as f64 - p.y as f64);
    d.norm()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pythagorean_triple_is_exact() {
        assert_eq!(distance(Point::new(0, 0), Point::new(3, 4)), 5.0);
        assert_eq!(distance(Point::new(3, 4), Point::new(0, 0)), 5.0);
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let (lo, hi) = (Point::new(i64::MIN, 0), Point::new(i64::MAX, 0));
        let d = distance(lo, hi);
        assert!(d.is_finite());
        assert!((d - 2f64.powi(64)).abs() / 2f64.powi(64) < 1e-12);
        assert_eq!(distance(hi, lo), d);
        let diag = distance(Point::new(i64::MIN, i64::MIN), Point::new(i64::MAX, i64::MAX));
        assert!(diag > d);
    }

    #[test]
    fn tuple_conversions_keep_input_order() {
        let s = Segment::from((2, 0, 1, 0));
        assert_eq!(s.a, Point::new(2, 0));
        assert_eq!(s.b, Point::new(1, 0));
        assert!(!s.is_degenerate());
        assert!(Segment::from((5, 5, 5, 5)).is_degenerate());
    }
}
