//! SchemaForge - synthetic circuit-diagram samples with exact ground truth.
//!
//! Every sample is a randomly laid out scene containing each catalogue symbol
//! exactly once plus a junction and a wire jump. Scenes are written as
//! circuitikz source, optionally rendered to PNG, and labelled with a JSON
//! document describing where everything landed.

pub mod config;
pub mod export;
pub mod layout;
pub mod render;

mod error;

pub use schemaforge_core::{catalogue, draw, geometry, ground_truth};

pub use error::SchemaForgeError;

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};
use rand::{Rng, SeedableRng, rngs::StdRng};

use config::AppConfig;
use export::{
    Exporter,
    ground_truth::{GroundTruthExporter, Meta},
    svg::SvgExporter,
    tex::TexExporter,
};
use layout::{Scene, SceneBuilder};
use render::{Renderer, TexRenderer};

/// Output paths of one sample, all sharing the `sample_NNNNN` stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleFiles {
    tex: PathBuf,
    pdf: PathBuf,
    png: PathBuf,
    svg: PathBuf,
    json: PathBuf,
}

impl SampleFiles {
    /// Paths for sample `index` inside `out_dir`.
    ///
    /// # Examples
    ///
    /// ```
    /// use schemaforge::SampleFiles;
    ///
    /// let files = SampleFiles::for_index("out", 42);
    /// assert!(files.json().ends_with("sample_00042.json"));
    /// ```
    pub fn for_index(out_dir: impl AsRef<Path>, index: usize) -> Self {
        let base = out_dir.as_ref().join(format!("sample_{index:05}"));
        Self {
            tex: base.with_extension("tex"),
            pdf: base.with_extension("pdf"),
            png: base.with_extension("png"),
            svg: base.with_extension("svg"),
            json: base.with_extension("json"),
        }
    }

    pub fn tex(&self) -> &Path {
        &self.tex
    }

    pub fn pdf(&self) -> &Path {
        &self.pdf
    }

    pub fn png(&self) -> &Path {
        &self.png
    }

    pub fn svg(&self) -> &Path {
        &self.svg
    }

    pub fn json(&self) -> &Path {
        &self.json
    }
}

/// Summary of one generated sample.
#[derive(Debug, Clone)]
pub struct SampleReport {
    index: usize,
    files: SampleFiles,
    components: usize,
    markers: usize,
    rendered: bool,
}

impl SampleReport {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn files(&self) -> &SampleFiles {
        &self.files
    }

    /// Number of component records written
    pub fn components(&self) -> usize {
        self.components
    }

    /// Number of marker records written
    pub fn markers(&self) -> usize {
        self.markers
    }

    /// Whether the PDF and PNG were produced
    pub fn rendered(&self) -> bool {
        self.rendered
    }
}

/// Builder for generating circuit-diagram samples.
///
/// # Examples
///
/// ```rust,no_run
/// use schemaforge::{SampleGenerator, config::{AppConfig, RenderConfig}};
///
/// let config = AppConfig::default()
///     .with_render(RenderConfig::default().with_enabled(false));
/// let generator = SampleGenerator::new(config);
///
/// let reports = generator.generate_batch(3, "out")
///     .expect("Failed to generate samples");
/// assert_eq!(reports.len(), 3);
/// ```
#[derive(Default)]
pub struct SampleGenerator {
    config: AppConfig,
}

impl SampleGenerator {
    /// Create a new generator with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Lay out one complete scene from `rng`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaForgeError::Config` if the configuration is invalid and
    /// `SchemaForgeError::Layout` if no scene could be placed within the retry
    /// budget.
    pub fn build_scene<R: Rng>(&self, rng: &mut R) -> Result<Scene, SchemaForgeError> {
        self.config.validate()?;
        let scene = SceneBuilder::new(&self.config).build(rng)?;
        Ok(scene)
    }

    /// Generate sample `index` into `out_dir`.
    ///
    /// The TeX source is written first, then the optional SVG preview, then
    /// the render. The ground-truth JSON is written last, so a sample whose
    /// layout or render failed never gets one.
    ///
    /// # Errors
    ///
    /// Returns `SchemaForgeError` for layout, export, or render failures.
    pub fn generate<R: Rng>(
        &self,
        rng: &mut R,
        index: usize,
        out_dir: impl AsRef<Path>,
    ) -> Result<SampleReport, SchemaForgeError> {
        let scene = self.build_scene(rng)?;
        let files = SampleFiles::for_index(out_dir, index);
        let render = self.config.render();

        TexExporter::new(files.tex()).export_scene(&scene)?;
        if render.svg_preview() {
            SvgExporter::new(files.svg()).export_scene(&scene)?;
        }

        if render.enabled() {
            TexRenderer::from_config(render).render(files.tex(), files.png())?;
        } else {
            debug!(index; "Rendering disabled, skipping PDF and PNG");
        }

        let meta = Meta::new(self.config.seed(), render.dpi());
        GroundTruthExporter::new(&files, meta).export_scene(&scene)?;

        info!(
            index,
            components = scene.components().len(),
            markers = scene.markers().len();
            "Sample generated"
        );

        Ok(SampleReport {
            index,
            components: scene.components().len(),
            markers: scene.markers().len(),
            rendered: render.enabled(),
            files,
        })
    }

    /// Generate samples `0..count` into `out_dir` from the configured seed.
    ///
    /// All samples draw from one random stream, so sample `i` depends on
    /// every sample before it.
    ///
    /// # Errors
    ///
    /// Returns `SchemaForgeError` on the first sample that fails.
    pub fn generate_batch(
        &self,
        count: usize,
        out_dir: impl AsRef<Path>,
    ) -> Result<Vec<SampleReport>, SchemaForgeError> {
        let out_dir = out_dir.as_ref();
        self.config.validate()?;
        fs::create_dir_all(out_dir)?;

        info!(count, seed = self.config.seed(), out_dir:? = out_dir; "Generating samples");
        let mut rng = StdRng::seed_from_u64(self.config.seed());

        (0..count)
            .map(|index| self.generate(&mut rng, index, out_dir))
            .collect()
    }
}
