//! Error types for SchemaForge operations.
//!
//! This module provides the main error type [`SchemaForgeError`] which wraps
//! the per-layer errors that can occur while generating a sample.

use std::io;

use thiserror::Error;

use crate::{config::ConfigError, export, layout::LayoutError, render::RenderError};

/// The main error type for SchemaForge operations.
#[derive(Debug, Error)]
pub enum SchemaForgeError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Export error: {0}")]
    Export(#[from] export::Error),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}
