//! SchemaForge CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info, warn};

use schemaforge::SchemaForgeError;
use schemaforge_cli::{Args, ErrorAdapter};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logging(&args.log_level);
    debug!(args:?; "Parsed arguments");

    match schemaforge_cli::run(&args) {
        Ok(reports) => {
            let rendered = reports.iter().filter(|report| report.rendered()).count();
            info!(
                samples = reports.len(),
                rendered,
                output_dir:? = args.output_dir;
                "Dataset written"
            );
        }
        Err(err) => {
            report(&err);
            process::exit(1);
        }
    }
}

/// `RUST_LOG` still refines the level chosen with `--log-level`.
fn init_logging(level: &str) {
    let parsed = LevelFilter::from_str(level).ok();
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(parsed.unwrap_or(LevelFilter::Warn))
        .init();

    if parsed.is_none() {
        warn!(log_level = level; "Unknown log level, falling back to warn");
    }
}

fn report(err: &SchemaForgeError) {
    let mut rendered = String::new();
    let written = miette::GraphicalReportHandler::new()
        .render_report(&mut rendered, &ErrorAdapter(err));

    match written {
        Ok(()) => error!("Generation failed\n{rendered}"),
        Err(_) => error!(err:% = err; "Generation failed"),
    }
}
