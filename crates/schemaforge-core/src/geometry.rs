//! Geometric primitives for scene layout and feasibility testing.
//!
//! This module provides the small geometry kernel the placement engine is
//! built on: points, axis-aligned rectangles, and the pure predicates used to
//! decide whether a candidate placement is legal.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in canvas space
//! - [`Rect`] - An axis-aligned rectangle defined by minimum and maximum corners
//! - [`bounding_box`] - Padded box enclosing a set of points
//! - [`overlaps`] - Separating-axis overlap test with a tolerance gap
//! - [`clamp`] - Range clamp for sampled coordinates
//!
//! # Coordinate System
//!
//! Scenes use the circuitikz (TikZ) convention, measured in centimetres:
//!
//! ```text
//!    +Y
//!     ▲
//!     │
//!     │
//!     │
//!   (0,0) ────────► +X
//! ```
//!
//! - **Origin**: Center of the default canvas
//! - **X-axis**: Increases rightward
//! - **Y-axis**: Increases upward
//!
//! Exporters that target a y-down space (such as SVG) flip the axis themselves.

use serde::{Serialize, Serializer};

/// A 2D point in canvas coordinate space.
///
/// Points serialize as a two-element `[x, y]` array so that ground-truth
/// records stay compact and language-neutral.
///
/// # Examples
///
/// ```
/// # use schemaforge_core::geometry::Point;
/// let p1 = Point::new(1.0, 2.0);
/// let p2 = Point::new(3.0, -2.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 2.0);
/// assert_eq!(mid.y(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns a copy of this point moved by `(dx, dy)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use schemaforge_core::geometry::Point;
    /// let anchor = Point::new(2.0, 3.0);
    /// let lead_end = anchor.offset(-1.2, 0.0);
    /// assert_eq!(lead_end, Point::new(0.8, 3.0));
    /// ```
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.x, self.y).serialize(serializer)
    }
}

/// An axis-aligned rectangle with minimum and maximum corners.
///
/// Used both for the canvas (`view_bounds`) and for the occupied regions the
/// placement engine tests candidates against. Serializes as
/// `[min_x, min_y, max_x, max_y]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Rect {
    /// Creates a rectangle from its corner coordinates.
    ///
    /// The coordinates are normalized so that the minimum corner is always
    /// below and to the left of the maximum corner.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    /// Creates a square of the given half-extent centered on `center`
    pub fn from_center(center: Point, half_extent: f64) -> Self {
        Self {
            min_x: center.x - half_extent,
            min_y: center.y - half_extent,
            max_x: center.x + half_extent,
            max_y: center.y + half_extent,
        }
    }

    /// Returns the minimum x-coordinate of the rectangle
    pub fn min_x(self) -> f64 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the rectangle
    pub fn min_y(self) -> f64 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the rectangle
    pub fn max_x(self) -> f64 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the rectangle
    pub fn max_y(self) -> f64 {
        self.max_y
    }

    /// Returns the width of the rectangle
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the height of the rectangle
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns the center point of the rectangle
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Returns the rectangle grown by `amount` on every side.
    ///
    /// A negative amount shrinks the rectangle. Shrinking past the center
    /// produces an inverted rectangle (`min > max`); callers that sample from
    /// the result must check [`Rect::is_inverted`] first.
    pub fn expand(self, amount: f64) -> Self {
        Self {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }

    /// Returns the rectangle shrunk by `amount` on every side
    pub fn shrink(self, amount: f64) -> Self {
        self.expand(-amount)
    }

    /// True when shrinking has pushed a minimum past its maximum
    pub fn is_inverted(self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Inclusive point containment test.
    ///
    /// # Examples
    ///
    /// ```
    /// # use schemaforge_core::geometry::{Point, Rect};
    /// let canvas = Rect::new(-10.0, -8.0, 10.0, 8.0);
    /// assert!(canvas.contains_point(Point::new(10.0, -8.0)));
    /// assert!(!canvas.contains_point(Point::new(10.1, 0.0)));
    /// ```
    pub fn contains_point(self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Inclusive rectangle containment test
    pub fn contains_rect(self, other: Rect) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    /// Clamps a point into this rectangle
    pub fn clamp_point(self, point: Point) -> Point {
        Point::new(
            clamp(point.x, self.min_x, self.max_x),
            clamp(point.y, self.min_y, self.max_y),
        )
    }
}

impl Serialize for Rect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.min_x, self.min_y, self.max_x, self.max_y).serialize(serializer)
    }
}

/// Computes the axis-aligned box enclosing `points`, grown by `padding` on
/// every side.
///
/// An empty point set yields a box of side `2 * padding` around the origin.
///
/// # Examples
///
/// ```
/// # use schemaforge_core::geometry::{bounding_box, Point, Rect};
/// let bb = bounding_box(&[Point::new(0.0, 0.0), Point::new(2.0, 1.0)], 0.5);
/// assert_eq!(bb, Rect::new(-0.5, -0.5, 2.5, 1.5));
/// ```
pub fn bounding_box(points: &[Point], padding: f64) -> Rect {
    let Some((first, rest)) = points.split_first() else {
        return Rect::from_center(Point::default(), padding);
    };

    let tight = rest.iter().fold(
        Rect::new(first.x, first.y, first.x, first.y),
        |acc, p| Rect {
            min_x: acc.min_x.min(p.x),
            min_y: acc.min_y.min(p.y),
            max_x: acc.max_x.max(p.x),
            max_y: acc.max_y.max(p.y),
        },
    );
    tight.expand(padding)
}

/// Returns `true` unless `a` and `b` are separated by more than `tolerance`
/// along at least one axis.
///
/// The test is symmetric in its rectangle arguments. Boxes whose gap is
/// exactly `tolerance` still count as overlapping.
///
/// # Examples
///
/// ```
/// # use schemaforge_core::geometry::{overlaps, Rect};
/// let a = Rect::new(0.0, 0.0, 1.0, 1.0);
/// let b = Rect::new(1.2, 0.0, 2.0, 1.0);
///
/// assert!(!overlaps(a, b, 0.15));
/// assert!(overlaps(a, b, 0.25));
/// ```
pub fn overlaps(a: Rect, b: Rect, tolerance: f64) -> bool {
    !(a.max_x + tolerance < b.min_x
        || b.max_x + tolerance < a.min_x
        || a.max_y + tolerance < b.min_y
        || b.max_y + tolerance < a.min_y)
}

/// Standard range clamp: `max(lo, min(hi, v))`
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    lo.max(hi.min(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_new_normalizes_corners() {
        let rect = Rect::new(4.0, 5.0, -1.0, 2.0);
        assert_eq!(rect.min_x(), -1.0);
        assert_eq!(rect.min_y(), 2.0);
        assert_eq!(rect.max_x(), 4.0);
        assert_eq!(rect.max_y(), 5.0);
        assert_eq!(rect.width(), 5.0);
        assert_eq!(rect.height(), 3.0);
    }

    #[test]
    fn test_shrink_and_inversion() {
        let canvas = Rect::new(-10.0, -8.0, 10.0, 8.0);
        let inner = canvas.shrink(1.2);
        assert!((inner.min_x() + 8.8).abs() < 1e-12);
        assert!((inner.max_y() - 6.8).abs() < 1e-12);
        assert!(!inner.is_inverted());

        // Shrinking past the half height inverts the y-range only
        let collapsed = canvas.shrink(9.0);
        assert!(collapsed.is_inverted());
        assert!(collapsed.min_x() < collapsed.max_x());
    }

    #[test]
    fn test_bounding_box_encloses_points_with_padding() {
        let points = [
            Point::new(1.0, 1.0),
            Point::new(3.0, 1.0),
            Point::new(0.2, 1.0),
            Point::new(3.8, 1.0),
        ];
        let bb = bounding_box(&points, 0.85);
        assert_eq!(bb.min_x(), 0.2 - 0.85);
        assert_eq!(bb.max_x(), 3.8 + 0.85);
        assert_eq!(bb.min_y(), 1.0 - 0.85);
        assert_eq!(bb.max_y(), 1.0 + 0.85);
    }

    #[test]
    fn test_bounding_box_empty_points() {
        let bb = bounding_box(&[], 1.0);
        assert_eq!(bb, Rect::new(-1.0, -1.0, 1.0, 1.0));
    }

    #[test]
    fn test_overlaps_separated_boxes() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let far_right = Rect::new(5.0, 0.0, 6.0, 1.0);
        let far_above = Rect::new(0.0, 5.0, 1.0, 6.0);
        assert!(!overlaps(a, far_right, 0.15));
        assert!(!overlaps(a, far_above, 0.15));
    }

    #[test]
    fn test_overlaps_touching_and_nested_boxes() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let nested = Rect::new(0.5, 0.5, 1.0, 1.0);
        let touching = Rect::new(2.0, 0.0, 3.0, 1.0);
        assert!(overlaps(a, nested, 0.0));
        assert!(overlaps(a, touching, 0.0));
    }

    #[test]
    fn test_overlaps_gap_equal_to_tolerance_counts_as_overlap() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(1.5, 0.0, 2.0, 1.0);
        assert!(overlaps(a, b, 0.5));
        assert!(!overlaps(a, b, 0.49));
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
    }

    #[test]
    fn test_clamp_point_into_rect() {
        let rect = Rect::new(-1.0, -1.0, 1.0, 1.0);
        assert_eq!(
            rect.clamp_point(Point::new(3.0, -0.5)),
            Point::new(1.0, -0.5)
        );
    }

    #[test]
    fn test_point_and_rect_serialize_as_arrays() {
        let point = serde_json::to_string(&Point::new(1.5, -2.0)).unwrap();
        assert_eq!(point, "[1.5,-2.0]");

        let rect = serde_json::to_string(&Rect::new(0.0, 1.0, 2.0, 3.0)).unwrap();
        assert_eq!(rect, "[0.0,1.0,2.0,3.0]");
    }
}

#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-20.0f64..20.0, -20.0f64..20.0, 0.0f64..8.0, 0.0f64..8.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, x + w, y + h))
    }

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-20.0f64..20.0, -20.0f64..20.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn tolerance_strategy() -> impl Strategy<Value = f64> {
        0.0f64..2.0
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Overlap is symmetric in its rectangle arguments.
    fn check_overlaps_is_symmetric(a: Rect, b: Rect, tol: f64) -> Result<(), TestCaseError> {
        prop_assert_eq!(overlaps(a, b, tol), overlaps(b, a, tol));
        Ok(())
    }

    /// Every rectangle overlaps itself regardless of tolerance.
    fn check_overlaps_self(a: Rect, tol: f64) -> Result<(), TestCaseError> {
        prop_assert!(overlaps(a, a, tol));
        Ok(())
    }

    /// A larger tolerance never turns an overlap into a separation.
    fn check_tolerance_is_monotonic(a: Rect, b: Rect, tol: f64) -> Result<(), TestCaseError> {
        if overlaps(a, b, tol) {
            prop_assert!(overlaps(a, b, tol + 0.5));
        }
        Ok(())
    }

    /// The padded bounding box contains every input point with `padding` to spare.
    fn check_bounding_box_contains_points(
        points: Vec<Point>,
        padding: f64,
    ) -> Result<(), TestCaseError> {
        let bb = bounding_box(&points, padding);
        let inner = bb.shrink(padding).expand(1e-9);
        for p in points {
            prop_assert!(inner.contains_point(p));
        }
        Ok(())
    }

    /// Clamped values always land inside the range and leave in-range values untouched.
    fn check_clamp_bounds(v: f64, lo: f64, width: f64) -> Result<(), TestCaseError> {
        let hi = lo + width;
        let clamped = clamp(v, lo, hi);
        prop_assert!(clamped >= lo && clamped <= hi);
        if v >= lo && v <= hi {
            prop_assert!(approx_eq!(f64, clamped, v));
        }
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn overlaps_is_symmetric(a in rect_strategy(), b in rect_strategy(), tol in tolerance_strategy()) {
            check_overlaps_is_symmetric(a, b, tol)?;
        }

        #[test]
        fn overlaps_self(a in rect_strategy(), tol in tolerance_strategy()) {
            check_overlaps_self(a, tol)?;
        }

        #[test]
        fn tolerance_is_monotonic(a in rect_strategy(), b in rect_strategy(), tol in tolerance_strategy()) {
            check_tolerance_is_monotonic(a, b, tol)?;
        }

        #[test]
        fn bounding_box_contains_points(
            points in prop::collection::vec(point_strategy(), 1..8),
            padding in 0.0f64..2.0,
        ) {
            check_bounding_box_contains_points(points, padding)?;
        }

        #[test]
        fn clamp_bounds(v in -50.0f64..50.0, lo in -10.0f64..10.0, width in 0.0f64..10.0) {
            check_clamp_bounds(v, lo, width)?;
        }
    }
}
