//! circuitikz source export.
//!
//! Produces a `standalone` LaTeX document whose single `circuitikz`
//! environment draws every primitive of the scene. The first instruction
//! pins the bounding box to the canvas so every sample renders at the same
//! extent regardless of where elements landed.

use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use log::{debug, error};

use schemaforge_core::draw::Primitive;

use crate::{
    export::{self, Exporter},
    layout::Scene,
};

/// Writes a scene as a circuitikz document.
pub struct TexExporter {
    path: PathBuf,
}

impl TexExporter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Exporter for TexExporter {
    fn export_scene(&mut self, scene: &Scene) -> Result<(), export::Error> {
        let document = render_document(scene);
        debug!(path:? = self.path, bytes = document.len(); "Writing circuitikz source");

        fs::write(&self.path, document).map_err(|err| {
            error!(path:? = self.path, err:err; "Failed to write circuitikz source");
            export::Error::Io(err)
        })
    }
}

/// Renders the full document for `scene`.
pub fn render_document(scene: &Scene) -> String {
    let mut doc = String::new();
    doc.push_str(&preamble(scene.line_width()));
    for primitive in scene.primitives() {
        doc.push_str(&render_primitive(primitive));
        doc.push('\n');
    }
    doc.push_str(POSTAMBLE);
    doc
}

fn preamble(line_width: f64) -> String {
    format!(
        "\n\\documentclass[tikz,border=2pt]{{standalone}}\n\
         \\usepackage[american]{{circuitikz}}\n\
         \\begin{{document}}\n\
         \\begin{{circuitikz}}[line width={line_width}pt]\n"
    )
}

const POSTAMBLE: &str = "\\end{circuitikz}\n\\end{document}\n";

/// Renders a single primitive as one TikZ statement.
///
/// # Examples
///
/// ```
/// # use schemaforge::export::tex::render_primitive;
/// # use schemaforge_core::{draw::Primitive, geometry::Point};
/// let wire = Primitive::segment(Point::new(0.0, 1.5), Point::new(2.0, 1.5));
/// assert_eq!(render_primitive(&wire), r"\draw (0,1.5) -- (2,1.5);");
/// ```
pub fn render_primitive(primitive: &Primitive) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = match *primitive {
        Primitive::ViewBounds(rect) => write!(
            out,
            r"\path[use as bounding box] ({},{}) rectangle ({},{});",
            rect.min_x(),
            rect.min_y(),
            rect.max_x(),
            rect.max_y()
        ),
        Primitive::Bipole {
            from,
            to,
            element,
            label,
        } => write!(
            out,
            r"\draw ({},{}) to[{element},l_={label}] ({},{});",
            from.x(),
            from.y(),
            to.x(),
            to.y()
        ),
        Primitive::Node { at, element, name } => write!(
            out,
            r"\draw ({},{}) node[{element}] ({name}) {{}};",
            at.x(),
            at.y()
        ),
        Primitive::Segment { from, to } => write!(
            out,
            r"\draw ({},{}) -- ({},{});",
            from.x(),
            from.y(),
            to.x(),
            to.y()
        ),
        Primitive::Dot { center, radius_pt } => write!(
            out,
            r"\fill[black] ({},{}) circle ({radius_pt}pt);",
            center.x(),
            center.y()
        ),
        Primitive::Hump { from, to, height } => {
            let (x1, y) = (from.x(), from.y());
            let x2 = to.x();
            let top = y + height;
            write!(
                out,
                r"\draw ({x1},{y}) .. controls ({x1},{top}) and ({x2},{top}) .. ({x2},{y});"
            )
        }
    };
    out
}
