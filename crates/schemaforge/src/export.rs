//! Export functionality for generated scenes.
//!
//! This module provides the [`Exporter`] trait that defines the interface for
//! writing a placed scene to an output format. It is the last stage owned by
//! this crate; turning the circuitikz source into pixels is delegated to the
//! external tools driven by [`crate::render`].
//!
//! # Pipeline Position
//!
//! ```text
//! Seeded RNG
//!     ↓ layout
//! Scene (primitives + ground truth)
//!     ↓ export (this module)
//! .tex / .svg / .json
//!     ↓ render
//! .pdf / .png
//! ```
//!
//! # Available Backends
//!
//! - [`tex`]: circuitikz standalone document via [`tex::TexExporter`]
//! - [`svg`]: SVG preview via [`svg::SvgExporter`]
//! - [`ground_truth`]: JSON labels via [`ground_truth::GroundTruthExporter`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering I/O and serialization
//! failures. [`Error`] converts into [`SchemaForgeError::Export`] at the crate
//! boundary.
//!
//! [`SchemaForgeError::Export`]: crate::SchemaForgeError::Export

pub mod ground_truth;
pub mod svg;
pub mod tex;

use crate::layout::Scene;

/// Abstraction for scene export backends.
pub trait Exporter {
    /// Exports a scene to the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if writing the output fails, or [`Error::Json`]
    /// if serialization fails.
    fn export_scene(&mut self, scene: &Scene) -> Result<(), Error>;
}

/// Errors that can occur during scene export.
#[derive(Debug)]
pub enum Error {
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
    /// Ground truth could not be serialized.
    Json(serde_json::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Json(err) => write!(f, "Serialization error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
