//! SVG preview export.
//!
//! The preview is a schematic sketch of the scene for eyeballing layouts
//! without a TeX toolchain: elements are drawn as labelled boxes rather than
//! circuit symbols. Scene coordinates are centimetres with y pointing up;
//! the document uses pixels with y pointing down.

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use schemaforge_core::{
    draw::Primitive,
    geometry::{Point, Rect},
};

use crate::{
    export::{self, Exporter},
    layout::Scene,
};

/// Pixels per scene unit (centimetre).
const PX_PER_CM: f64 = 40.0;

/// TeX points per centimetre.
const PT_PER_CM: f64 = 28.4528;

/// Half thickness of the box standing in for a two-terminal symbol.
const BIPOLE_HALF_WIDTH: f64 = 0.3;

/// Half extents of the transformer symbol; the coils meet the lead anchors.
const NODE_HALF: (f64, f64) = (0.9, 1.0);

/// Half distance between the two transformer coils.
const COIL_GAP: f64 = 0.3;

/// Writes an SVG preview of a scene.
pub struct SvgExporter {
    path: PathBuf,
}

impl SvgExporter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Writes an SVG document to the exporter's path
    fn write_document(&self, doc: Document) -> Result<(), export::Error> {
        info!(path:? = self.path; "Creating SVG preview");
        let f = match File::create(&self.path) {
            Ok(file) => file,
            Err(err) => {
                error!(path:? = self.path, err:err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        if let Err(err) = write!(&f, "{doc}") {
            error!(path:? = self.path, err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }
}

impl Exporter for SvgExporter {
    fn export_scene(&mut self, scene: &Scene) -> Result<(), export::Error> {
        let doc = render_scene(scene);
        debug!("SVG document rendered");

        self.write_document(doc)
    }
}

/// Maps scene coordinates onto the SVG pixel grid.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    canvas: Rect,
}

impl Viewport {
    fn x(&self, point: Point) -> f64 {
        (point.x() - self.canvas.min_x()) * PX_PER_CM
    }

    fn y(&self, point: Point) -> f64 {
        (self.canvas.max_y() - point.y()) * PX_PER_CM
    }

    fn length(&self, cm: f64) -> f64 {
        cm * PX_PER_CM
    }

    fn rect(&self, rect: Rect) -> svg_element::Rectangle {
        let top_left = Point::new(rect.min_x(), rect.max_y());
        svg_element::Rectangle::new()
            .set("x", self.x(top_left))
            .set("y", self.y(top_left))
            .set("width", self.length(rect.width()))
            .set("height", self.length(rect.height()))
    }

    fn label(&self, at: Point, content: &str) -> svg_element::Text {
        svg_element::Text::new(content)
            .set("x", self.x(at))
            .set("y", self.y(at))
            .set("font-size", 12)
            .set("font-family", "sans-serif")
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
    }
}

/// Renders `scene` into an SVG document sized to its canvas.
pub fn render_scene(scene: &Scene) -> Document {
    let canvas = scene.canvas();
    let view = Viewport { canvas };
    let width = view.length(canvas.width());
    let height = view.length(canvas.height());
    let stroke_width = view.length(scene.line_width() / PT_PER_CM);

    let mut group = svg_element::Group::new()
        .set("stroke", "black")
        .set("stroke-width", stroke_width)
        .set("fill", "none");
    for primitive in scene.primitives() {
        group = render_primitive(&view, group, primitive);
    }

    Document::new()
        .set("viewBox", format!("0 0 {width} {height}"))
        .set("width", width)
        .set("height", height)
        .add(
            svg_element::Rectangle::new()
                .set("width", width)
                .set("height", height)
                .set("fill", "white"),
        )
        .add(group)
}

fn render_primitive(
    view: &Viewport,
    group: svg_element::Group,
    primitive: &Primitive,
) -> svg_element::Group {
    match *primitive {
        // The document already spans the canvas.
        Primitive::ViewBounds(_) => group,
        Primitive::Bipole {
            from, to, label, ..
        } => {
            let half = BIPOLE_HALF_WIDTH;
            let body = if from.y() == to.y() {
                Rect::new(from.x(), from.y() - half, to.x(), to.y() + half)
            } else {
                Rect::new(from.x() - half, from.y(), to.x() + half, to.y())
            };
            group
                .add(view.rect(body).set("fill", "white"))
                .add(
                    view.label(from.midpoint(to), label)
                        .set("stroke", "none")
                        .set("fill", "black"),
                )
        }
        Primitive::Node { at, name, .. } => {
            let (hx, hy) = NODE_HALF;
            let primary = Rect::new(at.x() - hx, at.y() - hy, at.x() - COIL_GAP, at.y() + hy);
            let secondary = Rect::new(at.x() + COIL_GAP, at.y() - hy, at.x() + hx, at.y() + hy);
            group.add(view.rect(primary)).add(view.rect(secondary)).add(
                view.label(at, name)
                    .set("stroke", "none")
                    .set("fill", "black"),
            )
        }
        Primitive::Segment { from, to } => group.add(
            svg_element::Line::new()
                .set("x1", view.x(from))
                .set("y1", view.y(from))
                .set("x2", view.x(to))
                .set("y2", view.y(to)),
        ),
        Primitive::Dot { center, radius_pt } => group.add(
            svg_element::Circle::new()
                .set("cx", view.x(center))
                .set("cy", view.y(center))
                .set("r", view.length(radius_pt / PT_PER_CM))
                .set("fill", "black"),
        ),
        Primitive::Hump { from, to, height } => {
            let c1 = from.offset(0.0, height);
            let c2 = to.offset(0.0, height);
            let data = format!(
                "M {} {} C {} {}, {} {}, {} {}",
                view.x(from),
                view.y(from),
                view.x(c1),
                view.y(c1),
                view.x(c2),
                view.y(c2),
                view.x(to),
                view.y(to)
            );
            group.add(svg_element::Path::new().set("d", data))
        }
    }
}
