//! Command-line argument definitions for the SchemaForge CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control how many samples are generated and where
//! they go, which configuration file is used, and logging verbosity.

use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments for the SchemaForge sample generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Number of samples to generate
    #[arg(short = 'n', long, default_value_t = 5)]
    pub count: usize,

    /// Directory receiving the generated samples
    #[arg(short, long, default_value = "out")]
    pub output_dir: PathBuf,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seed for the random stream, overriding the configuration
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip PDF and PNG rendering; only TeX source and ground truth are written
    #[arg(long)]
    pub no_render: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["schemaforge"]);
        assert_eq!(args.count, 5);
        assert_eq!(args.output_dir, PathBuf::from("out"));
        assert!(args.config.is_none());
        assert!(args.seed.is_none());
        assert!(!args.no_render);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "schemaforge",
            "-n",
            "12",
            "-o",
            "dataset",
            "--seed",
            "9",
            "--no-render",
        ]);
        assert_eq!(args.count, 12);
        assert_eq!(args.output_dir, PathBuf::from("dataset"));
        assert_eq!(args.seed, Some(9));
        assert!(args.no_render);
    }
}
