//! Single-attempt scene assembly.
//!
//! The assembler places the catalogue in a fixed order against one shared
//! accumulator of occupied regions, then appends the two forced motifs:
//!
//! 1. the transformer, whose large footprint is the hardest to fit;
//! 2. every two-terminal element, in catalogue order;
//! 3. a junction: three wires meeting at a dotted point;
//! 4. a wire jump: a continuous vertical wire crossed by a broken horizontal
//!    wire that hops over it.
//!
//! Catalogue elements never overlap each other. The motifs stand for drawing
//! idioms that routinely sit on top of other geometry, so by default they skip
//! the occupied-region check entirely. Setting `motifs.motif_tolerance`
//! makes them avoid catalogue regions instead.

use log::debug;
use rand::Rng;

use schemaforge_core::{
    catalogue::{fixed_elements, two_terminal_elements},
    draw::Primitive,
    geometry::{Point, Rect, bounding_box},
    ground_truth::MarkerRecord,
};

use super::{
    Infeasible, OccupiedRegions, Scene,
    policy::{PlacementPolicy, pick, search, uniform_point},
};
use crate::config::{AppConfig, MotifConfig};

const JUNCTION_ID: &str = "JUNC1";
const JUMP_ID: &str = "JUMP1";
const JUNCTION_MIN_DEGREE: u32 = 3;

/// Builds one scene attempt from a fresh accumulator.
pub struct SceneAssembler<'a> {
    config: &'a AppConfig,
    policy: PlacementPolicy<'a>,
}

impl<'a> SceneAssembler<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self {
            config,
            policy: PlacementPolicy::new(config),
        }
    }

    /// Assembles a complete scene or reports the first element that did not fit.
    ///
    /// # Errors
    ///
    /// Returns [`Infeasible`] from the first placement whose search budget
    /// ran out. Nothing of the partial scene survives.
    pub fn assemble<R: Rng>(&self, rng: &mut R) -> Result<Scene, Infeasible> {
        let canvas = self.config.canvas().view_bounds();
        let line_width = pick(rng, self.config.render().line_widths())
            .ok_or_else(|| Infeasible::new("line width", 0))?;

        let mut occupied = OccupiedRegions::new();
        let mut primitives = vec![Primitive::ViewBounds(canvas)];
        let mut components = Vec::new();

        for entry in fixed_elements() {
            let placement = self.policy.place_transformer(rng, &mut occupied, entry)?;
            let (record, drawn) = placement.into_parts();
            components.push(record);
            primitives.extend(drawn);
        }

        for entry in two_terminal_elements() {
            let placement = self
                .policy
                .place_two_terminal(rng, &mut occupied, entry)?;
            let (record, drawn) = placement.into_parts();
            components.push(record);
            primitives.extend(drawn);
        }

        let (junction, junction_drawn) = self.place_junction(rng, &occupied)?;
        primitives.extend(junction_drawn);
        let (jump, jump_drawn) = self.place_wire_jump(rng, &occupied)?;
        primitives.extend(jump_drawn);

        debug!(
            components = components.len(),
            primitives = primitives.len(),
            line_width;
            "Scene assembled"
        );

        Ok(Scene::new(
            canvas,
            line_width,
            primitives,
            components,
            vec![junction, jump],
        ))
    }

    fn motifs(&self) -> &MotifConfig {
        self.config.motifs()
    }

    /// Samples a motif center inside `area`.
    ///
    /// Without a motif tolerance this is a single unconditional draw. With
    /// one, the motif's footprint must clear every occupied region and the
    /// usual attempt budget applies. Motif footprints are never committed.
    fn sample_motif_center<R: Rng>(
        &self,
        rng: &mut R,
        subject: &str,
        area: Rect,
        occupied: &OccupiedRegions,
        footprint: impl Fn(Point) -> Rect,
    ) -> Result<Point, Infeasible> {
        match self.motifs().motif_tolerance() {
            None => search(1, subject, || uniform_point(rng, area)),
            Some(tolerance) => search(
                self.config.placement().max_attempts(),
                subject,
                || {
                    let center = uniform_point(rng, area)?;
                    (!occupied.collides(footprint(center), tolerance)).then_some(center)
                },
            ),
        }
    }

    fn place_junction<R: Rng>(
        &self,
        rng: &mut R,
        occupied: &OccupiedRegions,
    ) -> Result<(MarkerRecord, Vec<Primitive>), Infeasible> {
        let motifs = self.motifs();
        let arm = motifs.junction_arm();
        let area = self
            .config
            .canvas()
            .placement_area()
            .shrink(motifs.junction_margin());

        let arms = move |j: Point| [j.offset(-arm, 0.0), j.offset(arm, 0.0), j.offset(0.0, arm)];
        let center = self.sample_motif_center(rng, JUNCTION_ID, area, occupied, |j| {
            bounding_box(&arms(j), 0.0)
        })?;

        let [west, east, north] = arms(center);
        let primitives = vec![
            Primitive::segment(west, center),
            Primitive::segment(center, east),
            Primitive::segment(center, north),
            Primitive::Dot {
                center,
                radius_pt: motifs.dot_radius_pt(),
            },
        ];

        debug!(x = center.x(), y = center.y(); "Placed junction");
        Ok((
            MarkerRecord::junction(JUNCTION_ID, center, JUNCTION_MIN_DEGREE, arm),
            primitives,
        ))
    }

    fn place_wire_jump<R: Rng>(
        &self,
        rng: &mut R,
        occupied: &OccupiedRegions,
    ) -> Result<(MarkerRecord, Vec<Primitive>), Infeasible> {
        let motifs = self.motifs();
        let gap = motifs.jump_gap();
        let hump = motifs.jump_hump_height();
        let vertical = motifs.jump_vertical_half();
        let horizontal = motifs.jump_horizontal_half();
        let area = self
            .config
            .canvas()
            .placement_area()
            .shrink(motifs.jump_margin());

        let center = self.sample_motif_center(rng, JUMP_ID, area, occupied, |c| {
            bounding_box(
                &[
                    c.offset(0.0, -vertical),
                    c.offset(0.0, vertical),
                    c.offset(-horizontal, 0.0),
                    c.offset(horizontal, 0.0),
                ],
                0.0,
            )
        })?;

        let primitives = vec![
            Primitive::segment(center.offset(0.0, -vertical), center.offset(0.0, vertical)),
            Primitive::segment(center.offset(-horizontal, 0.0), center.offset(-gap, 0.0)),
            Primitive::Hump {
                from: center.offset(-gap, 0.0),
                to: center.offset(gap, 0.0),
                height: hump,
            },
            Primitive::segment(center.offset(gap, 0.0), center.offset(horizontal, 0.0)),
        ];

        debug!(x = center.x(), y = center.y(), gap; "Placed wire jump");
        Ok((MarkerRecord::wire_jump(JUMP_ID, center, gap, hump), primitives))
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use schemaforge_core::{catalogue::ComponentType, ground_truth::MarkerKind};

    use super::*;
    use crate::config::PlacementConfig;

    fn assemble_until_success(config: &AppConfig, seed: u64) -> Scene {
        let assembler = SceneAssembler::new(config);
        let mut rng = StdRng::seed_from_u64(seed);
        (0..80)
            .find_map(|_| assembler.assemble(&mut rng).ok())
            .expect("default configuration assembles within 80 attempts")
    }

    #[test]
    fn test_scene_order_and_counts() {
        let config = AppConfig::default();
        let scene = assemble_until_success(&config, 20260128);

        assert_eq!(scene.components().len(), 11);
        assert_eq!(scene.components()[0].ctype(), ComponentType::Transformer);
        assert_eq!(scene.markers().len(), 2);
        assert_eq!(scene.markers()[0].mtype(), MarkerKind::Junction);
        assert_eq!(scene.markers()[1].mtype(), MarkerKind::WireJump);
        assert!(matches!(scene.primitives()[0], Primitive::ViewBounds(_)));
        assert!(config.render().line_widths().contains(&scene.line_width()));
    }

    #[test]
    fn test_primitive_count_matches_scene_shape() {
        let scene = assemble_until_success(&AppConfig::default(), 5);
        // bounds + transformer (1 + 4) + 10 bipoles * 3 + junction 4 + jump 4
        assert_eq!(scene.primitives().len(), 1 + 5 + 30 + 4 + 4);
    }

    #[test]
    fn test_motif_tolerance_keeps_motifs_clear() {
        let config = AppConfig::default()
            .with_motifs(MotifConfig::default().with_motif_tolerance(Some(0.0)));
        let assembler = SceneAssembler::new(&config);
        let mut rng = StdRng::seed_from_u64(99);

        // Motifs may legitimately fail to find room; only successes are checked.
        for _ in 0..40 {
            let Ok(scene) = assembler.assemble(&mut rng) else {
                continue;
            };
            let junction = scene.markers()[0].center();
            for component in scene.components() {
                assert!(!component.bbox().contains_point(junction));
            }
        }
    }

    #[test]
    fn test_unconstrained_motifs_ignore_full_occupancy() {
        let config = AppConfig::default();
        let assembler = SceneAssembler::new(&config);
        let mut rng = StdRng::seed_from_u64(1);

        let mut occupied = OccupiedRegions::new();
        occupied.commit(config.canvas().view_bounds());

        assert!(assembler.place_junction(&mut rng, &occupied).is_ok());
        assert!(assembler.place_wire_jump(&mut rng, &occupied).is_ok());
    }

    #[test]
    fn test_constrained_motifs_fail_on_full_occupancy() {
        let config = AppConfig::default()
            .with_motifs(MotifConfig::default().with_motif_tolerance(Some(0.15)))
            .with_placement(PlacementConfig::default().with_max_attempts(20));
        let assembler = SceneAssembler::new(&config);
        let mut rng = StdRng::seed_from_u64(1);

        let mut occupied = OccupiedRegions::new();
        occupied.commit(config.canvas().view_bounds());

        let err = assembler.place_junction(&mut rng, &occupied).unwrap_err();
        assert_eq!(err.subject(), "JUNC1");
        assert_eq!(err.attempts(), 20);
    }
}
