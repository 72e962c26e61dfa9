//! SchemaForge CLI library
//!
//! This module contains the core CLI logic for the SchemaForge sample
//! generator.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use config::CONFIG_ENV;
pub use error_adapter::ErrorAdapter;

use log::info;

use schemaforge::{SampleGenerator, SampleReport, SchemaForgeError};

/// Run the SchemaForge CLI application
///
/// Loads and validates the configuration, applies command-line overrides,
/// and generates `args.count` samples into `args.output_dir`.
///
/// # Errors
///
/// Returns `SchemaForgeError` for:
/// - Configuration loading or validation errors
/// - Layout errors
/// - Export and rendering errors
/// - File I/O errors
pub fn run(args: &Args) -> Result<Vec<SampleReport>, SchemaForgeError> {
    info!(
        count = args.count,
        output_dir:? = args.output_dir;
        "Generating circuit samples"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let app_config = config::apply_overrides(app_config, args);

    SampleGenerator::new(app_config).generate_batch(args.count, &args.output_dir)
}
