//! Per-element feasibility rules and randomized placement sampling.
//!
//! Every element is placed by rejection sampling: draw a candidate from the
//! element's parameter space, reject it if its region overlaps an occupied
//! one, and give up after a fixed number of attempts. The search itself is the
//! [`search`] combinator; the element-specific parts are the samplers on
//! [`PlacementPolicy`].
//!
//! All randomness comes from the generator passed in by the caller, so a
//! seeded generator reproduces the exact same sequence of candidates.

use log::{debug, trace};
use rand::{Rng, seq::IndexedRandom};

use schemaforge_core::{
    catalogue::CatalogueEntry,
    draw::Primitive,
    geometry::{Point, Rect, bounding_box, clamp},
    ground_truth::{
        ComponentAttrs, ComponentRecord, Orientation, TransformerAttrs, TwoTerminalAttrs,
    },
};

use super::{Infeasible, OccupiedRegions};
use crate::config::{AppConfig, PlacementConfig, TRANSFORMER_ANCHOR_X};

/// Half extents of the transformer body; its ground-truth corners sit here.
const TRANSFORMER_BODY_HALF: (f64, f64) = (1.6, 1.9);

const TRANSFORMER_ANCHOR_Y: f64 = 1.0;

/// Anchors A1, A2, B1, B2 as `(dx, dy, lead direction)`.
///
/// These approximate the terminals of the circuitikz `transformer` node at its
/// default size. Leads are emitted as absolute segments starting here rather
/// than from the node's named anchors, so the rendered glyph's terminals can
/// sit slightly off the lead start if circuitikz changes its default
/// geometry. Ground truth always records these offsets.
const TRANSFORMER_ANCHORS: [(f64, f64, f64); 4] = [
    (-TRANSFORMER_ANCHOR_X, TRANSFORMER_ANCHOR_Y, -1.0),
    (-TRANSFORMER_ANCHOR_X, -TRANSFORMER_ANCHOR_Y, -1.0),
    (TRANSFORMER_ANCHOR_X, TRANSFORMER_ANCHOR_Y, 1.0),
    (TRANSFORMER_ANCHOR_X, -TRANSFORMER_ANCHOR_Y, 1.0),
];

/// Bounded retry combinator.
///
/// Calls `attempt` up to `max_attempts` times and returns the first `Some`.
/// `None` means the candidate was rejected.
///
/// # Errors
///
/// Returns [`Infeasible`] naming `subject` when every attempt is rejected.
///
/// # Examples
///
/// ```
/// # use schemaforge::layout::policy::search;
/// let mut n = 0;
/// let found = search(10, "demo", || {
///     n += 1;
///     (n == 3).then_some(n)
/// });
/// assert_eq!(found, Ok(3));
///
/// let failed = search(5, "demo", || None::<()>);
/// assert_eq!(failed.unwrap_err().attempts(), 5);
/// ```
pub fn search<T>(
    max_attempts: usize,
    subject: &str,
    mut attempt: impl FnMut() -> Option<T>,
) -> Result<T, Infeasible> {
    for n in 1..=max_attempts {
        if let Some(found) = attempt() {
            trace!(subject, attempts = n; "Candidate accepted");
            return Ok(found);
        }
    }
    Err(Infeasible::new(subject, max_attempts))
}

/// Uniform sample from the closed interval `[lo, hi]`.
///
/// Returns `None` for an inverted interval instead of panicking.
pub fn uniform<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> Option<f64> {
    if lo.is_nan() || hi.is_nan() || lo > hi {
        return None;
    }
    Some(clamp(rng.random_range(lo..=hi), lo, hi))
}

/// Uniform sample of a point inside `area`, or `None` if `area` is inverted
pub fn uniform_point<R: Rng>(rng: &mut R, area: Rect) -> Option<Point> {
    let x = uniform(rng, area.min_x(), area.max_x())?;
    let y = uniform(rng, area.min_y(), area.max_y())?;
    Some(Point::new(x, y))
}

/// Uniform choice from a discrete option set, `None` if the set is empty
pub(crate) fn pick<R: Rng, T: Copy>(rng: &mut R, options: &[T]) -> Option<T> {
    options.choose(rng).copied()
}

/// A committed placement: ground truth plus the instructions that draw it.
#[derive(Debug, Clone)]
pub struct Placement {
    record: ComponentRecord,
    primitives: Vec<Primitive>,
}

impl Placement {
    pub fn record(&self) -> &ComponentRecord {
        &self.record
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn into_parts(self) -> (ComponentRecord, Vec<Primitive>) {
        (self.record, self.primitives)
    }
}

struct TwoTerminalCandidate {
    orientation: Orientation,
    lead: f64,
    p1: Point,
    p2: Point,
    w1: Point,
    w2: Point,
    region: Rect,
}

/// Placement rules for catalogue elements.
///
/// The policy is stateless; the occupied-region accumulator is owned by the
/// caller and passed into every placement.
pub struct PlacementPolicy<'a> {
    area: Rect,
    placement: &'a PlacementConfig,
}

impl<'a> PlacementPolicy<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self {
            area: config.canvas().placement_area(),
            placement: config.placement(),
        }
    }

    /// Places a two-terminal element and commits its region.
    ///
    /// Each attempt samples orientation, body length, lead length and then
    /// the center, in that order. The center range keeps the body and both
    /// leads inside the placement area.
    ///
    /// # Errors
    ///
    /// Returns [`Infeasible`] when the attempt budget is exhausted. The
    /// accumulator is left untouched in that case.
    pub fn place_two_terminal<R: Rng>(
        &self,
        rng: &mut R,
        occupied: &mut OccupiedRegions,
        entry: &CatalogueEntry,
    ) -> Result<Placement, Infeasible> {
        let tolerance = self.placement.tolerance();
        let candidate = search(self.placement.max_attempts(), entry.cid(), || {
            let candidate = self.sample_two_terminal(rng)?;
            (!occupied.collides(candidate.region, tolerance)).then_some(candidate)
        })?;
        occupied.commit(candidate.region);

        debug!(
            cid = entry.cid(),
            orientation:? = candidate.orientation,
            occupied = occupied.len();
            "Placed two-terminal element"
        );

        let TwoTerminalCandidate {
            orientation,
            lead,
            p1,
            p2,
            w1,
            w2,
            region,
        } = candidate;

        let primitives = vec![
            Primitive::Bipole {
                from: p1,
                to: p2,
                element: entry.element(),
                label: entry.label(),
            },
            Primitive::segment(w1, p1),
            Primitive::segment(p2, w2),
        ];
        let record = ComponentRecord::new(
            entry.cid(),
            entry.ctype(),
            (p1, p2),
            orientation,
            region,
            ComponentAttrs::TwoTerminal(TwoTerminalAttrs {
                label: entry.label(),
                element: entry.element(),
                lead_len: lead,
                lead_end_1: w1,
                lead_end_2: w2,
            }),
        );

        Ok(Placement { record, primitives })
    }

    fn sample_two_terminal<R: Rng>(&self, rng: &mut R) -> Option<TwoTerminalCandidate> {
        let orientation = pick(rng, &[Orientation::Horizontal, Orientation::Vertical])?;
        let body = pick(rng, self.placement.body_lengths())?;
        let lead = pick(rng, self.placement.lead_lengths())?;

        let reach = body / 2.0 + lead;
        let area = self.area;
        let (center, (ax, ay)) = match orientation {
            Orientation::Vertical => {
                let cx = uniform(rng, area.min_x(), area.max_x())?;
                let cy = uniform(rng, area.min_y() + reach, area.max_y() - reach)?;
                (Point::new(cx, cy), (0.0, 1.0))
            }
            _ => {
                let cx = uniform(rng, area.min_x() + reach, area.max_x() - reach)?;
                let cy = uniform(rng, area.min_y(), area.max_y())?;
                (Point::new(cx, cy), (1.0, 0.0))
            }
        };

        let half = body / 2.0;
        let p1 = center.offset(-half * ax, -half * ay);
        let p2 = center.offset(half * ax, half * ay);
        let w1 = p1.offset(-lead * ax, -lead * ay);
        let w2 = p2.offset(lead * ax, lead * ay);
        let region = bounding_box(&[p1, p2, w1, w2], self.placement.padding());

        Some(TwoTerminalCandidate {
            orientation,
            lead,
            p1,
            p2,
            w1,
            w2,
            region,
        })
    }

    /// Places the fixed-footprint transformer and commits its region.
    ///
    /// The anchor is kept an extra `transformer_edge` away from the canvas
    /// edges. The lead length is drawn once, after the anchor is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`Infeasible`] when the attempt budget is exhausted or no lead
    /// length is configured. The accumulator is left untouched in both cases.
    pub fn place_transformer<R: Rng>(
        &self,
        rng: &mut R,
        occupied: &mut OccupiedRegions,
        entry: &CatalogueEntry,
    ) -> Result<Placement, Infeasible> {
        let half_extent = self.placement.transformer_half_extent();
        let tolerance = self.placement.tolerance();
        let anchor_area = self.area.shrink(self.placement.transformer_edge());

        let (at, region) = search(self.placement.max_attempts(), entry.cid(), || {
            let at = uniform_point(rng, anchor_area)?;
            let region = Rect::from_center(at, half_extent);
            (!occupied.collides(region, tolerance)).then_some((at, region))
        })?;
        let lead = pick(rng, self.placement.transformer_lead_lengths())
            .ok_or_else(|| Infeasible::new(entry.cid(), 0))?;
        occupied.commit(region);

        debug!(cid = entry.cid(), x = at.x(), y = at.y(), lead; "Placed transformer");

        let mut primitives = vec![Primitive::Node {
            at,
            element: entry.element(),
            name: entry.cid(),
        }];
        let lead_ends = TRANSFORMER_ANCHORS.map(|(dx, dy, dir)| {
            let anchor = at.offset(dx, dy);
            let end = anchor.offset(dir * lead, 0.0);
            primitives.push(Primitive::segment(anchor, end));
            end
        });

        let (hx, hy) = TRANSFORMER_BODY_HALF;
        let record = ComponentRecord::new(
            entry.cid(),
            entry.ctype(),
            (at.offset(-hx, hy), at.offset(hx, -hy)),
            Orientation::NotApplicable,
            region,
            ComponentAttrs::Transformer(TransformerAttrs {
                label: entry.label(),
                element: entry.element(),
                lead_len: lead,
                lead_ends,
            }),
        );

        Ok(Placement { record, primitives })
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use rand::{SeedableRng, rngs::StdRng};

    use schemaforge_core::catalogue::{catalogue, fixed_elements};

    use super::*;

    fn entry(cid: &str) -> &'static CatalogueEntry {
        catalogue()
            .iter()
            .find(|e| e.cid() == cid)
            .expect("catalogue entry exists")
    }

    #[test]
    fn test_search_stops_at_first_success() {
        let mut calls = 0;
        let result = search(100, "x", || {
            calls += 1;
            (calls == 7).then_some("ok")
        });
        assert_eq!(result, Ok("ok"));
        assert_eq!(calls, 7);
    }

    #[test]
    fn test_search_exhausts_budget() {
        let mut calls = 0;
        let result: Result<(), _> = search(25, "R1", || {
            calls += 1;
            None
        });
        let err = result.unwrap_err();
        assert_eq!(calls, 25);
        assert_eq!(err.subject(), "R1");
        assert_eq!(err.attempts(), 25);
    }

    #[test]
    fn test_uniform_rejects_inverted_interval() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(uniform(&mut rng, 2.0, 1.0), None);
        assert_eq!(uniform(&mut rng, 1.5, 1.5), Some(1.5));

        for _ in 0..100 {
            let v = uniform(&mut rng, -1.0, 1.0).unwrap();
            assert!((-1.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_two_terminal_geometry() {
        let config = AppConfig::default();
        let policy = PlacementPolicy::new(&config);
        let mut rng = StdRng::seed_from_u64(7);
        let area = config.canvas().placement_area();

        for _ in 0..50 {
            let mut occupied = OccupiedRegions::new();
            let placement = policy
                .place_two_terminal(&mut rng, &mut occupied, entry("R1"))
                .expect("empty canvas always has room");
            let record = placement.record();

            assert_eq!(occupied.len(), 1);
            assert_ne!(record.p1(), record.p2());
            assert_eq!(placement.primitives().len(), 3);

            let lead = record.attrs().lead_len();
            let ends = record.attrs().lead_ends();
            assert!(approx_eq!(f64, ends[0].distance(record.p1()), lead, epsilon = 1e-9));
            assert!(approx_eq!(f64, ends[1].distance(record.p2()), lead, epsilon = 1e-9));

            match record.orientation() {
                Orientation::Horizontal => assert_eq!(record.p1().y(), record.p2().y()),
                Orientation::Vertical => assert_eq!(record.p1().x(), record.p2().x()),
                Orientation::NotApplicable => panic!("two-terminal elements are oriented"),
            }

            for point in record.points() {
                assert!(area.expand(1e-9).contains_point(point));
            }
            assert!(record.bbox().contains_point(record.p1()));
        }
    }

    #[test]
    fn test_full_canvas_is_infeasible() {
        let config = AppConfig::default()
            .with_placement(PlacementConfig::default().with_max_attempts(30));
        let policy = PlacementPolicy::new(&config);
        let mut rng = StdRng::seed_from_u64(3);

        let mut occupied = OccupiedRegions::new();
        occupied.commit(config.canvas().view_bounds());

        let err = policy
            .place_two_terminal(&mut rng, &mut occupied, entry("C1"))
            .unwrap_err();
        assert_eq!(err.subject(), "C1");
        assert_eq!(err.attempts(), 30);
        assert_eq!(occupied.len(), 1, "failed search must not commit");
    }

    #[test]
    fn test_transformer_footprint_and_leads() {
        let config = AppConfig::default();
        let policy = PlacementPolicy::new(&config);
        let mut rng = StdRng::seed_from_u64(11);
        let mut occupied = OccupiedRegions::new();

        let transformer = fixed_elements().next().unwrap();
        let placement = policy
            .place_transformer(&mut rng, &mut occupied, transformer)
            .unwrap();
        let record = placement.record();

        assert_eq!(record.cid(), "T1");
        assert_eq!(record.orientation(), Orientation::NotApplicable);
        assert!(approx_eq!(f64, record.bbox().width(), 4.4, epsilon = 1e-9));
        // Node plus four leads
        assert_eq!(placement.primitives().len(), 5);
        assert!(matches!(placement.primitives()[0], Primitive::Node { .. }));

        let ends = record.attrs().lead_ends();
        assert_eq!(ends.len(), 4);
        for end in ends {
            assert!(record.bbox().expand(1e-9).contains_point(end));
        }
        assert!(config.canvas().view_bounds().contains_rect(record.bbox()));
    }

    #[test]
    fn test_transformer_leads_start_at_anchor_offsets() {
        let config = AppConfig::default();
        let policy = PlacementPolicy::new(&config);
        let mut rng = StdRng::seed_from_u64(5);
        let mut occupied = OccupiedRegions::new();

        let transformer = fixed_elements().next().unwrap();
        let placement = policy
            .place_transformer(&mut rng, &mut occupied, transformer)
            .unwrap();
        let Primitive::Node { at, .. } = placement.primitives()[0] else {
            panic!("transformer starts with its node");
        };
        let lead = placement.record().attrs().lead_len();

        let leads = placement.primitives()[1..].iter().zip(TRANSFORMER_ANCHORS);
        for (primitive, (dx, dy, dir)) in leads {
            let Primitive::Segment { from, to } = *primitive else {
                panic!("transformer leads are segments");
            };
            assert!(approx_eq!(f64, from.x(), at.x() + dx, epsilon = 1e-9));
            assert!(approx_eq!(f64, from.y(), at.y() + dy, epsilon = 1e-9));
            assert!(approx_eq!(f64, to.x(), from.x() + dir * lead, epsilon = 1e-9));
            assert!(approx_eq!(f64, to.y(), from.y(), epsilon = 1e-9));
        }
    }

    #[test]
    fn test_transformer_without_lead_lengths_commits_nothing() {
        let config = AppConfig::default().with_placement(
            PlacementConfig::default().with_transformer_lead_lengths(Vec::new()),
        );
        let policy = PlacementPolicy::new(&config);
        let mut rng = StdRng::seed_from_u64(11);
        let mut occupied = OccupiedRegions::new();

        let transformer = fixed_elements().next().unwrap();
        let err = policy
            .place_transformer(&mut rng, &mut occupied, transformer)
            .unwrap_err();
        assert_eq!(err.subject(), "T1");
        assert!(occupied.is_empty(), "failed placement must not commit");
    }

    #[test]
    fn test_placement_is_deterministic_for_seed() {
        let config = AppConfig::default();
        let policy = PlacementPolicy::new(&config);

        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut occupied = OccupiedRegions::new();
            policy
                .place_two_terminal(&mut rng, &mut occupied, entry("D1"))
                .unwrap()
                .into_parts()
                .0
        };

        assert_eq!(run(42), run(42));
    }
}
