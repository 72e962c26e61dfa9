//! Ground-truth records describing every placed element of a scene.
//!
//! Records are created once at placement time and never mutated afterwards.
//! They serialize to the JSON schema consumed by training pipelines:
//!
//! ```text
//! ComponentRecord { cid, ctype, p1, p2, orientation, bbox, attrs }
//! MarkerRecord    { mid, mtype, center, attrs }
//! ```
//!
//! Attribute payloads are typed per element kind and serialize as flat maps.

use serde::Serialize;

use crate::{
    catalogue::ComponentType,
    geometry::{Point, Rect},
};

/// Orientation tag of a placed component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Orientation {
    #[serde(rename = "h")]
    Horizontal,
    #[serde(rename = "v")]
    Vertical,
    #[serde(rename = "na")]
    NotApplicable,
}

/// Attributes of a two-terminal element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwoTerminalAttrs {
    pub label: &'static str,
    pub element: &'static str,
    pub lead_len: f64,
    pub lead_end_1: Point,
    pub lead_end_2: Point,
}

/// Attributes of the transformer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformerAttrs {
    pub label: &'static str,
    pub element: &'static str,
    pub lead_len: f64,
    /// Lead endpoints in anchor order A1, A2, B1, B2
    pub lead_ends: [Point; 4],
}

/// Per-kind component attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ComponentAttrs {
    TwoTerminal(TwoTerminalAttrs),
    Transformer(TransformerAttrs),
}

impl ComponentAttrs {
    /// Lead length used when the component was drawn
    pub fn lead_len(&self) -> f64 {
        match self {
            Self::TwoTerminal(attrs) => attrs.lead_len,
            Self::Transformer(attrs) => attrs.lead_len,
        }
    }

    /// Every lead endpoint recorded for the component
    pub fn lead_ends(&self) -> Vec<Point> {
        match self {
            Self::TwoTerminal(attrs) => vec![attrs.lead_end_1, attrs.lead_end_2],
            Self::Transformer(attrs) => attrs.lead_ends.to_vec(),
        }
    }
}

/// Ground truth for one placed electrical symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentRecord {
    cid: &'static str,
    ctype: ComponentType,
    p1: Point,
    p2: Point,
    orientation: Orientation,
    bbox: Rect,
    attrs: ComponentAttrs,
}

impl ComponentRecord {
    /// Creates a new component record.
    ///
    /// `bbox` is the occupied region committed for the component during
    /// placement.
    pub fn new(
        cid: &'static str,
        ctype: ComponentType,
        (p1, p2): (Point, Point),
        orientation: Orientation,
        bbox: Rect,
        attrs: ComponentAttrs,
    ) -> Self {
        Self {
            cid,
            ctype,
            p1,
            p2,
            orientation,
            bbox,
            attrs,
        }
    }

    pub fn cid(&self) -> &'static str {
        self.cid
    }

    pub fn ctype(&self) -> ComponentType {
        self.ctype
    }

    pub fn p1(&self) -> Point {
        self.p1
    }

    pub fn p2(&self) -> Point {
        self.p2
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Occupied region committed for this component
    pub fn bbox(&self) -> Rect {
        self.bbox
    }

    pub fn attrs(&self) -> &ComponentAttrs {
        &self.attrs
    }

    /// Both terminals followed by every lead endpoint
    pub fn points(&self) -> Vec<Point> {
        let mut points = vec![self.p1, self.p2];
        points.extend(self.attrs.lead_ends());
        points
    }
}

/// Kind of a forced topological motif.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Junction,
    WireJump,
}

/// Per-kind marker attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MarkerAttrs {
    Junction { min_degree: u32, arm_len: f64 },
    WireJump { gap: f64, hump_h: f64 },
}

/// Ground truth for one forced motif.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerRecord {
    mid: &'static str,
    mtype: MarkerKind,
    center: Point,
    attrs: MarkerAttrs,
}

impl MarkerRecord {
    /// Junction marker: three or more wires meeting at `center`
    pub fn junction(mid: &'static str, center: Point, min_degree: u32, arm_len: f64) -> Self {
        Self {
            mid,
            mtype: MarkerKind::Junction,
            center,
            attrs: MarkerAttrs::Junction {
                min_degree,
                arm_len,
            },
        }
    }

    /// Wire-jump marker: a hop bridging a gap of half-width `gap` around `center`
    pub fn wire_jump(mid: &'static str, center: Point, gap: f64, hump_h: f64) -> Self {
        Self {
            mid,
            mtype: MarkerKind::WireJump,
            center,
            attrs: MarkerAttrs::WireJump { gap, hump_h },
        }
    }

    pub fn mid(&self) -> &'static str {
        self.mid
    }

    pub fn mtype(&self) -> MarkerKind {
        self.mtype
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn attrs(&self) -> &MarkerAttrs {
        &self.attrs
    }
}
