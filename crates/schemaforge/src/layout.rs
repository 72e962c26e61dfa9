//! Constrained random layout of circuit-diagram scenes.
//!
//! Layout happens in three nested stages:
//!
//! ```text
//! SceneBuilder      retries whole scenes (bounded)
//!   └─ SceneAssembler   places the catalogue in order, then the forced motifs
//!        └─ PlacementPolicy   rejection-samples one element (bounded)
//! ```
//!
//! A failed element search surfaces as [`Infeasible`], which the builder
//! treats as a signal to discard the partial scene and start over. Only when
//! the builder's own budget is spent does layout fail with [`LayoutError`].

pub mod assembler;
pub mod builder;
pub mod policy;

pub use assembler::SceneAssembler;
pub use builder::SceneBuilder;
pub use policy::PlacementPolicy;

use thiserror::Error;

use schemaforge_core::{
    draw::Primitive,
    geometry::{Rect, overlaps},
    ground_truth::{ComponentRecord, MarkerRecord},
};

/// A bounded search ran out of attempts without finding a legal placement.
///
/// This is recoverable: the scene builder restarts the scene from scratch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not place {subject} without overlap after {attempts} attempts")]
pub struct Infeasible {
    subject: String,
    attempts: usize,
}

impl Infeasible {
    pub fn new(subject: impl Into<String>, attempts: usize) -> Self {
        Self {
            subject: subject.into(),
            attempts,
        }
    }

    /// Identifier of the element that could not be placed
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Attempts spent before giving up
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

/// Fatal layout failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error(
        "scene placement failed after {attempts} attempts; consider enlarging the canvas or reducing padding"
    )]
    SceneInfeasible {
        attempts: usize,
        #[source]
        last: Infeasible,
    },
}

/// Append-only set of regions claimed by already placed catalogue elements.
///
/// One instance lives for exactly one scene attempt and is dropped with it.
#[derive(Debug, Default, Clone)]
pub struct OccupiedRegions {
    regions: Vec<Rect>,
}

impl OccupiedRegions {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `candidate` overlaps any committed region at `tolerance`
    pub fn collides(&self, candidate: Rect, tolerance: f64) -> bool {
        self.regions
            .iter()
            .any(|region| overlaps(candidate, *region, tolerance))
    }

    /// Records a region. Regions are never removed.
    pub fn commit(&mut self, region: Rect) {
        self.regions.push(region);
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        self.regions.iter()
    }
}

/// A fully placed scene.
///
/// Scenes are produced atomically by [`SceneBuilder::build`]: every catalogue
/// element and both forced motifs are present, or no scene exists at all.
#[derive(Debug, Clone)]
pub struct Scene {
    canvas: Rect,
    line_width: f64,
    primitives: Vec<Primitive>,
    components: Vec<ComponentRecord>,
    markers: Vec<MarkerRecord>,
}

impl Scene {
    pub(crate) fn new(
        canvas: Rect,
        line_width: f64,
        primitives: Vec<Primitive>,
        components: Vec<ComponentRecord>,
        markers: Vec<MarkerRecord>,
    ) -> Self {
        Self {
            canvas,
            line_width,
            primitives,
            components,
            markers,
        }
    }

    /// The fixed drawing extent
    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    /// Stroke width in points
    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    /// Drawing instructions in render order; the first is always the view bounds
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Ground truth of placed components, transformer first
    pub fn components(&self) -> &[ComponentRecord] {
        &self.components
    }

    /// Ground truth of the forced motifs, junction first
    pub fn markers(&self) -> &[MarkerRecord] {
        &self.markers
    }
}
