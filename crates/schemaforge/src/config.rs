//! Configuration types for SchemaForge scene generation.
//!
//! This module provides the configuration structures that control canvas
//! geometry, placement sampling, forced motifs and rendering. All types
//! implement [`serde::Deserialize`] so they can be loaded from TOML; every
//! field falls back to the reference defaults when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`CanvasConfig`] - View bounds and placement margin.
//! - [`PlacementConfig`] - Sampling option sets, padding, tolerance and retry budgets.
//! - [`MotifConfig`] - Geometry of the junction and wire-jump motifs.
//! - [`RenderConfig`] - External tool invocation and output options.
//!
//! # Example
//!
//! ```
//! # use schemaforge::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.seed(), 20260128);
//! assert!(config.validate().is_ok());
//! ```

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use schemaforge_core::geometry::Rect;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Seed of the random stream shared by a whole generation run.
    #[serde(default = "default_seed")]
    seed: u64,

    #[serde(default)]
    canvas: CanvasConfig,

    #[serde(default)]
    placement: PlacementConfig,

    #[serde(default)]
    motifs: MotifConfig,

    #[serde(default)]
    render: RenderConfig,
}

fn default_seed() -> u64 {
    20260128
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            canvas: CanvasConfig::default(),
            placement: PlacementConfig::default(),
            motifs: MotifConfig::default(),
            render: RenderConfig::default(),
        }
    }
}

impl AppConfig {
    /// Returns the seed of the run-wide random stream.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the canvas configuration.
    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Returns the placement configuration.
    pub fn placement(&self) -> &PlacementConfig {
        &self.placement
    }

    /// Returns the motif configuration.
    pub fn motifs(&self) -> &MotifConfig {
        &self.motifs
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Replaces the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replaces the canvas section.
    pub fn with_canvas(mut self, canvas: CanvasConfig) -> Self {
        self.canvas = canvas;
        self
    }

    /// Replaces the placement section.
    pub fn with_placement(mut self, placement: PlacementConfig) -> Self {
        self.placement = placement;
        self
    }

    /// Replaces the motif section.
    pub fn with_motifs(mut self, motifs: MotifConfig) -> Self {
        self.motifs = motifs;
        self
    }

    /// Replaces the render section.
    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    /// Checks that the configuration can produce a scene at all.
    ///
    /// This rejects empty option sets, non-positive budgets, non-finite
    /// values and margins that leave no room to sample the largest footprint.
    /// It also rejects sizes that would let the transformer or a motif reach
    /// past the view bounds. It does not guarantee
    /// that placement succeeds; a valid but crowded configuration still fails
    /// with a layout error once its retry budget is spent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let placement = &self.placement;
        let motifs = &self.motifs;

        check_choices("placement.body_lengths", &placement.body_lengths)?;
        check_choices("placement.lead_lengths", &placement.lead_lengths)?;
        check_choices(
            "placement.transformer_lead_lengths",
            &placement.transformer_lead_lengths,
        )?;
        check_choices("render.line_widths", &self.render.line_widths)?;

        if placement.max_attempts == 0 {
            return invalid("placement.max_attempts must be at least 1");
        }
        if placement.scene_retries == 0 {
            return invalid("placement.scene_retries must be at least 1");
        }
        check_non_negative("placement.padding", placement.padding)?;
        check_non_negative("placement.tolerance", placement.tolerance)?;

        let canvas = self.canvas.view_bounds();
        if !is_positive(canvas.width()) || !is_positive(canvas.height()) {
            return invalid("canvas.view_bounds must have a positive area");
        }
        check_non_negative("canvas.margin", self.canvas.margin)?;

        // Two-terminal elements must fit along either axis.
        let reach = max_of(&placement.body_lengths) / 2.0 + max_of(&placement.lead_lengths);
        if self.canvas.placement_area().shrink(reach).is_inverted() {
            return invalid("canvas is too small for the longest two-terminal element");
        }

        check_non_negative("placement.transformer_edge", placement.transformer_edge)?;
        let transformer_reach =
            TRANSFORMER_ANCHOR_X + max_of(&placement.transformer_lead_lengths);
        if !placement.transformer_half_extent.is_finite()
            || placement.transformer_half_extent < transformer_reach
        {
            return invalid(format!(
                "placement.transformer_half_extent must cover its leads (>= {transformer_reach})"
            ));
        }
        // The footprint may reach past the anchor area into the margin, never
        // past the view bounds.
        if self.canvas.margin + placement.transformer_edge < placement.transformer_half_extent {
            return invalid(
                "canvas.margin + placement.transformer_edge must be at least \
                 placement.transformer_half_extent",
            );
        }
        if self
            .canvas
            .placement_area()
            .shrink(placement.transformer_edge)
            .is_inverted()
        {
            return invalid("canvas is too small for the transformer footprint");
        }

        check_non_negative("motifs.junction_margin", motifs.junction_margin)?;
        check_non_negative("motifs.jump_margin", motifs.jump_margin)?;
        check_non_negative("motifs.jump_hump_height", motifs.jump_hump_height)?;
        check_non_negative("motifs.dot_radius_pt", motifs.dot_radius_pt)?;
        check_non_negative("motifs.jump_vertical_half", motifs.jump_vertical_half)?;
        check_non_negative("motifs.jump_horizontal_half", motifs.jump_horizontal_half)?;
        if !is_positive(motifs.jump_gap) {
            return invalid("motifs.jump_gap must be strictly positive");
        }
        if motifs.jump_gap >= motifs.jump_horizontal_half {
            return invalid("motifs.jump_gap must be smaller than motifs.jump_horizontal_half");
        }
        if !is_positive(motifs.junction_arm) {
            return invalid("motifs.junction_arm must be strictly positive");
        }
        if motifs.junction_arm > motifs.junction_margin {
            return invalid("motifs.junction_arm must not exceed motifs.junction_margin");
        }
        let jump_reach = motifs
            .jump_vertical_half
            .max(motifs.jump_horizontal_half)
            .max(motifs.jump_hump_height);
        if !jump_reach.is_finite() || jump_reach > motifs.jump_margin {
            return invalid(
                "motifs.jump_vertical_half and motifs.jump_horizontal_half must not exceed \
                 motifs.jump_margin",
            );
        }
        if self
            .canvas
            .placement_area()
            .shrink(motifs.junction_margin)
            .is_inverted()
            || self
                .canvas
                .placement_area()
                .shrink(motifs.jump_margin)
                .is_inverted()
        {
            return invalid("canvas is too small for the forced motifs");
        }
        if let Some(tolerance) = motifs.motif_tolerance {
            check_non_negative("motifs.motif_tolerance", tolerance)?;
        }

        Ok(())
    }
}

/// Horizontal offset of the transformer terminal anchors from its center.
pub(crate) const TRANSFORMER_ANCHOR_X: f64 = 0.9;

fn invalid(message: impl Into<String>) -> Result<(), ConfigError> {
    Err(ConfigError::Validation(message.into()))
}

fn check_choices(name: &str, choices: &[f64]) -> Result<(), ConfigError> {
    if choices.is_empty() {
        return invalid(format!("{name} must not be empty"));
    }
    if choices.iter().any(|v| !v.is_finite() || *v <= 0.0) {
        return invalid(format!("{name} must only contain positive values"));
    }
    Ok(())
}

/// Rejects negative values and NaN alike.
fn check_non_negative(name: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return invalid(format!("{name} must be a finite, non-negative number"));
    }
    Ok(())
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn max_of(choices: &[f64]) -> f64 {
    choices.iter().copied().fold(0.0, f64::max)
}

/// Canvas geometry.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// `[x1, y1, x2, y2]` of the drawing extent.
    view_bounds: [f64; 4],

    /// Distance kept clear between placed geometry and the canvas edge.
    margin: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            view_bounds: [-10.0, -8.0, 10.0, 8.0],
            margin: 1.2,
        }
    }
}

impl CanvasConfig {
    /// Creates a canvas section from explicit bounds and margin.
    pub fn new(view_bounds: Rect, margin: f64) -> Self {
        Self {
            view_bounds: [
                view_bounds.min_x(),
                view_bounds.min_y(),
                view_bounds.max_x(),
                view_bounds.max_y(),
            ],
            margin,
        }
    }

    /// Returns the drawing extent.
    pub fn view_bounds(&self) -> Rect {
        let [x1, y1, x2, y2] = self.view_bounds;
        Rect::new(x1, y1, x2, y2)
    }

    /// Returns the margin kept clear along every canvas edge.
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// The view bounds shrunk by the margin; all placed geometry lives here.
    pub fn placement_area(&self) -> Rect {
        self.view_bounds().shrink(self.margin)
    }
}

/// Sampling options and budgets for catalogue placement.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    body_lengths: Vec<f64>,
    lead_lengths: Vec<f64>,
    padding: f64,
    tolerance: f64,
    max_attempts: usize,
    scene_retries: usize,
    transformer_half_extent: f64,
    transformer_edge: f64,
    transformer_lead_lengths: Vec<f64>,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            body_lengths: vec![1.6, 1.8, 2.0, 2.2],
            lead_lengths: vec![0.8, 1.0, 1.2],
            padding: 0.85,
            tolerance: 0.15,
            max_attempts: 4000,
            scene_retries: 80,
            transformer_half_extent: 2.2,
            transformer_edge: 2.0,
            transformer_lead_lengths: vec![0.9, 1.1, 1.3],
        }
    }
}

impl PlacementConfig {
    /// Body length options for two-terminal elements.
    pub fn body_lengths(&self) -> &[f64] {
        &self.body_lengths
    }

    /// Lead stub length options for two-terminal elements.
    pub fn lead_lengths(&self) -> &[f64] {
        &self.lead_lengths
    }

    /// Padding added around a two-terminal element's points to form its region.
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Minimum gap required between occupied regions.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Attempt budget of one element's rejection-sampling search.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Number of whole-scene attempts before giving up.
    pub fn scene_retries(&self) -> usize {
        self.scene_retries
    }

    /// Half side length of the transformer's square footprint.
    pub fn transformer_half_extent(&self) -> f64 {
        self.transformer_half_extent
    }

    /// Extra margin reserved near the canvas edges for the transformer anchor.
    pub fn transformer_edge(&self) -> f64 {
        self.transformer_edge
    }

    /// Lead length options for the transformer.
    pub fn transformer_lead_lengths(&self) -> &[f64] {
        &self.transformer_lead_lengths
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_scene_retries(mut self, scene_retries: usize) -> Self {
        self.scene_retries = scene_retries;
        self
    }

    pub fn with_body_lengths(mut self, body_lengths: Vec<f64>) -> Self {
        self.body_lengths = body_lengths;
        self
    }

    pub fn with_transformer_lead_lengths(mut self, lead_lengths: Vec<f64>) -> Self {
        self.transformer_lead_lengths = lead_lengths;
        self
    }
}

/// Geometry of the forced topological motifs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MotifConfig {
    junction_margin: f64,
    junction_arm: f64,
    dot_radius_pt: f64,
    jump_margin: f64,
    jump_gap: f64,
    jump_hump_height: f64,
    jump_vertical_half: f64,
    jump_horizontal_half: f64,
    /// When set, motifs avoid catalogue regions by this gap instead of
    /// overlapping freely.
    motif_tolerance: Option<f64>,
}

impl Default for MotifConfig {
    fn default() -> Self {
        Self {
            junction_margin: 2.5,
            junction_arm: 2.0,
            dot_radius_pt: 1.7,
            jump_margin: 3.0,
            jump_gap: 0.30,
            jump_hump_height: 0.30,
            jump_vertical_half: 2.2,
            jump_horizontal_half: 2.4,
            motif_tolerance: None,
        }
    }
}

impl MotifConfig {
    /// Extra margin inside the placement area for the junction center.
    pub fn junction_margin(&self) -> f64 {
        self.junction_margin
    }

    /// Length of each of the three junction wires.
    pub fn junction_arm(&self) -> f64 {
        self.junction_arm
    }

    /// Radius of the junction dot in typographic points.
    pub fn dot_radius_pt(&self) -> f64 {
        self.dot_radius_pt
    }

    /// Extra margin inside the placement area for the wire-jump center.
    pub fn jump_margin(&self) -> f64 {
        self.jump_margin
    }

    /// Half-width of the break in the horizontal wire.
    pub fn jump_gap(&self) -> f64 {
        self.jump_gap
    }

    /// Height of the hop drawn over the break.
    pub fn jump_hump_height(&self) -> f64 {
        self.jump_hump_height
    }

    /// Half length of the continuous vertical wire.
    pub fn jump_vertical_half(&self) -> f64 {
        self.jump_vertical_half
    }

    /// Half length of the broken horizontal wire.
    pub fn jump_horizontal_half(&self) -> f64 {
        self.jump_horizontal_half
    }

    /// Overlap tolerance applied to motifs, or `None` for unconstrained placement.
    pub fn motif_tolerance(&self) -> Option<f64> {
        self.motif_tolerance
    }

    pub fn with_junction_arm(mut self, junction_arm: f64) -> Self {
        self.junction_arm = junction_arm;
        self
    }

    pub fn with_jump_vertical_half(mut self, jump_vertical_half: f64) -> Self {
        self.jump_vertical_half = jump_vertical_half;
        self
    }

    pub fn with_motif_tolerance(mut self, tolerance: Option<f64>) -> Self {
        self.motif_tolerance = tolerance;
        self
    }
}

/// Output and external tool options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Run the typesetter and rasterizer after writing the source.
    enabled: bool,
    /// Also write an SVG preview of each scene.
    svg_preview: bool,
    dpi: u32,
    latex_engine: String,
    rasterizer: String,
    /// Stroke width options in points, one sampled per scene.
    line_widths: Vec<f64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            svg_preview: false,
            dpi: 220,
            latex_engine: "pdflatex".to_string(),
            rasterizer: "pdftoppm".to_string(),
            line_widths: vec![0.8, 1.0, 1.2],
        }
    }
}

impl RenderConfig {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn svg_preview(&self) -> bool {
        self.svg_preview
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn latex_engine(&self) -> &str {
        &self.latex_engine
    }

    pub fn rasterizer(&self) -> &str {
        &self.rasterizer
    }

    pub fn line_widths(&self) -> &[f64] {
        &self.line_widths
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_svg_preview(mut self, svg_preview: bool) -> Self {
        self.svg_preview = svg_preview;
        self
    }
}
