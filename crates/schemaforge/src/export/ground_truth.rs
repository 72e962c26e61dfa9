//! Ground-truth JSON export.
//!
//! One document per sample, next to the image it describes. Artifact paths
//! are stored as bare file names so a dataset directory can be moved as a
//! whole.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, error};
use serde::Serialize;

use schemaforge_core::ground_truth::{ComponentRecord, MarkerRecord};

use crate::{
    SampleFiles,
    export::{self, Exporter},
    layout::Scene,
};

/// Layout mode tag carried in every document.
pub const MODE: &str = "scatter_components_with_leads_no_skeleton";

/// Run-level facts recorded alongside each sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meta {
    seed: u64,
    dpi: u32,
    mode: &'static str,
    guaranteed_components: bool,
    guaranteed_junction: bool,
    guaranteed_wire_jump: bool,
}

impl Meta {
    /// Every exported scene is complete, so the guarantees always hold.
    pub fn new(seed: u64, dpi: u32) -> Self {
        Self {
            seed,
            dpi,
            mode: MODE,
            guaranteed_components: true,
            guaranteed_junction: true,
            guaranteed_wire_jump: true,
        }
    }
}

#[derive(Serialize)]
struct Document<'a> {
    image: &'a str,
    tex: &'a str,
    pdf: &'a str,
    components: &'a [ComponentRecord],
    markers: &'a [MarkerRecord],
    meta: &'a Meta,
}

/// Writes the ground-truth document of one sample.
pub struct GroundTruthExporter {
    path: PathBuf,
    image: String,
    tex: String,
    pdf: String,
    meta: Meta,
}

impl GroundTruthExporter {
    pub fn new(files: &SampleFiles, meta: Meta) -> Self {
        Self {
            path: files.json().to_path_buf(),
            image: file_name(files.png()),
            tex: file_name(files.tex()),
            pdf: file_name(files.pdf()),
            meta,
        }
    }

    /// Serializes the document for `scene` with two-space indentation.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Json`] if serialization fails.
    pub fn render(&self, scene: &Scene) -> Result<String, export::Error> {
        let document = Document {
            image: &self.image,
            tex: &self.tex,
            pdf: &self.pdf,
            components: scene.components(),
            markers: scene.markers(),
            meta: &self.meta,
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

impl Exporter for GroundTruthExporter {
    fn export_scene(&mut self, scene: &Scene) -> Result<(), export::Error> {
        let json = self.render(scene)?;
        debug!(path:? = self.path, components = scene.components().len(); "Writing ground truth");

        fs::write(&self.path, json).map_err(|err| {
            error!(path:? = self.path, err:err; "Failed to write ground truth");
            export::Error::Io(err)
        })
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
