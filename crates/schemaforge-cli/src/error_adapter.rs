//! Error adapter for converting SchemaForgeError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use schemaforge::{SchemaForgeError, config::ConfigError, render::RenderError};

/// Adapter giving a [`SchemaForgeError`] a diagnostic code and help text.
pub struct ErrorAdapter<'a>(pub &'a SchemaForgeError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            SchemaForgeError::Io(_) => "schemaforge::io",
            SchemaForgeError::Config(_) => "schemaforge::config",
            SchemaForgeError::Layout(_) => "schemaforge::layout",
            SchemaForgeError::Export(_) => "schemaforge::export",
            SchemaForgeError::Render(_) => "schemaforge::render",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            SchemaForgeError::Config(ConfigError::MissingFile(_)) => {
                "check the path passed with --config"
            }
            SchemaForgeError::Config(_) => "fix the configuration value named above",
            SchemaForgeError::Layout(_) => {
                "enlarge canvas.view_bounds or reduce placement.padding"
            }
            SchemaForgeError::Render(RenderError::Spawn { .. }) => {
                "install circuitikz and poppler-utils, or pass --no-render"
            }
            SchemaForgeError::Render(_) => "inspect the tool output above; the .tex file is kept",
            SchemaForgeError::Io(_) | SchemaForgeError::Export(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
