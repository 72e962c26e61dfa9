//! Backend-neutral drawing instructions.
//!
//! A scene is drawn as an ordered list of [`Primitive`]s. The list is the
//! only thing exporters consume, so every primitive must be expressible in
//! each output format (circuitikz source, SVG preview).

use crate::geometry::{Point, Rect};

/// One renderable drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Declares the fixed drawing extent of the scene.
    ViewBounds(Rect),

    /// A two-terminal symbol body drawn between its terminals.
    Bipole {
        from: Point,
        to: Point,
        element: &'static str,
        label: &'static str,
    },

    /// A multi-terminal symbol drawn as a named node anchored at one point.
    Node {
        at: Point,
        element: &'static str,
        name: &'static str,
    },

    /// A straight wire.
    Segment { from: Point, to: Point },

    /// A filled junction dot, radius given in typographic points.
    Dot { center: Point, radius_pt: f64 },

    /// A cubic hop bridging a gap in a wire, bulging `height` upward.
    Hump { from: Point, to: Point, height: f64 },
}

impl Primitive {
    /// Convenience constructor for a straight wire
    pub fn segment(from: Point, to: Point) -> Self {
        Self::Segment { from, to }
    }

    /// All coordinates this primitive references.
    ///
    /// For a [`Primitive::Hump`] this includes the apex of the hop. Used to
    /// verify that drawn geometry stays inside the canvas.
    pub fn points(&self) -> Vec<Point> {
        match *self {
            Self::ViewBounds(rect) => vec![
                Point::new(rect.min_x(), rect.min_y()),
                Point::new(rect.max_x(), rect.max_y()),
            ],
            Self::Bipole { from, to, .. } | Self::Segment { from, to } => vec![from, to],
            Self::Node { at, .. } => vec![at],
            Self::Dot { center, .. } => vec![center],
            Self::Hump { from, to, height } => {
                vec![from, to, from.midpoint(to).offset(0.0, height)]
            }
        }
    }

    /// True when the primitive is a straight wire touching `point` at either end
    pub fn is_segment_ending_at(&self, point: Point, tolerance: f64) -> bool {
        match *self {
            Self::Segment { from, to } => {
                from.distance(point) <= tolerance || to.distance(point) <= tolerance
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hump_points_include_apex() {
        let hump = Primitive::Hump {
            from: Point::new(-0.3, 1.0),
            to: Point::new(0.3, 1.0),
            height: 0.3,
        };
        let points = hump.points();
        assert_eq!(points.len(), 3);
        assert_eq!(points[2].x(), 0.0);
        assert!((points[2].y() - 1.3).abs() < 1e-12);
    }

    #[test]
    fn test_segment_ending_at() {
        let wire = Primitive::segment(Point::new(0.0, 0.0), Point::new(2.0, 0.0));
        assert!(wire.is_segment_ending_at(Point::new(2.0, 0.0), 1e-9));
        assert!(wire.is_segment_ending_at(Point::new(0.0, 0.0), 1e-9));
        assert!(!wire.is_segment_ending_at(Point::new(1.0, 0.0), 1e-9));

        let dot = Primitive::Dot {
            center: Point::new(0.0, 0.0),
            radius_pt: 1.7,
        };
        assert!(!dot.is_segment_ending_at(Point::new(0.0, 0.0), 1e-9));
    }
}
