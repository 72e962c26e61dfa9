//! Rasterization through external TeX tools.
//!
//! The circuitikz source is compiled to PDF by a LaTeX engine and the PDF is
//! rasterized to PNG by poppler's `pdftoppm`. Both tools run in a private
//! temporary directory so their auxiliary files never reach the output
//! directory; only the PDF and PNG are copied out.

use std::{
    ffi::OsStr,
    fs, io,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use log::{debug, error, info};
use tempfile::TempDir;
use thiserror::Error;

use crate::config::RenderConfig;

/// Errors raised while driving the external renderer.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to start `{tool}`; is it installed and on PATH?")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// The tool ran but did not leave the expected file behind.
    #[error("`{tool}` did not produce {expected}\nSTDOUT:\n{stdout}\nSTDERR:\n{stderr}")]
    NoOutput {
        tool: String,
        expected: String,
        stdout: String,
        stderr: String,
    },

    #[error("I/O error during rendering: {0}")]
    Io(#[from] io::Error),
}

/// Turns a TeX source file into a raster image.
pub trait Renderer {
    /// Renders `tex_path` to `png_path`.
    ///
    /// The intermediate PDF is kept next to the PNG with a `.pdf` extension.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if a tool cannot be started, produces no
    /// output, or the results cannot be copied into place.
    fn render(&self, tex_path: &Path, png_path: &Path) -> Result<(), RenderError>;
}

/// Renderer backed by a LaTeX engine and `pdftoppm`.
#[derive(Debug, Clone)]
pub struct TexRenderer {
    latex_engine: String,
    rasterizer: String,
    dpi: u32,
}

impl TexRenderer {
    pub fn new(latex_engine: impl Into<String>, rasterizer: impl Into<String>, dpi: u32) -> Self {
        Self {
            latex_engine: latex_engine.into(),
            rasterizer: rasterizer.into(),
            dpi,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.latex_engine(), config.rasterizer(), config.dpi())
    }

    /// Runs `tool` inside `workdir`, capturing its output.
    fn run<I, S>(&self, tool: &str, args: I, workdir: &Path) -> Result<Output, RenderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        debug!(tool, workdir:? = workdir; "Running external tool");
        Command::new(tool)
            .args(args)
            .current_dir(workdir)
            .output()
            .map_err(|source| {
                error!(tool, err:% = source; "Failed to start external tool");
                RenderError::Spawn {
                    tool: tool.to_string(),
                    source,
                }
            })
    }

    /// Checks that `expected` exists after running `tool`.
    fn expect_output(tool: &str, expected: &Path, output: &Output) -> Result<(), RenderError> {
        if expected.exists() {
            return Ok(());
        }
        error!(tool, expected:? = expected, status:? = output.status; "External tool produced no output");
        Err(RenderError::NoOutput {
            tool: tool.to_string(),
            expected: expected.display().to_string(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl Renderer for TexRenderer {
    fn render(&self, tex_path: &Path, png_path: &Path) -> Result<(), RenderError> {
        let workdir = TempDir::new()?;
        let stem = tex_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("sample"));

        let tex_name = format!("{stem}.tex");
        let pdf_name = format!("{stem}.pdf");
        fs::copy(tex_path, workdir.path().join(&tex_name))?;

        let output = self.run(
            &self.latex_engine,
            ["-interaction=nonstopmode", tex_name.as_str()],
            workdir.path(),
        )?;
        let pdf = workdir.path().join(&pdf_name);
        Self::expect_output(&self.latex_engine, &pdf, &output)?;

        let dpi = self.dpi.to_string();
        let output = self.run(
            &self.rasterizer,
            ["-r", dpi.as_str(), "-png", pdf_name.as_str(), stem.as_str()],
            workdir.path(),
        )?;
        let png = workdir.path().join(format!("{stem}-1.png"));
        Self::expect_output(&self.rasterizer, &png, &output)?;

        let pdf_path: PathBuf = png_path.with_extension("pdf");
        fs::copy(&pdf, &pdf_path)?;
        fs::copy(&png, png_path)?;

        info!(png:? = png_path, dpi = self.dpi; "Sample rendered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tex_file(dir: &Path) -> PathBuf {
        let path = dir.join("sample_00000.tex");
        fs::write(&path, "\\documentclass{article}\n").unwrap();
        path
    }

    #[test]
    fn test_missing_engine_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let tex = tex_file(dir.path());
        let renderer = TexRenderer::new("schemaforge-no-such-latex", "pdftoppm", 220);

        let err = renderer
            .render(&tex, &dir.path().join("sample_00000.png"))
            .unwrap_err();

        match err {
            RenderError::Spawn { tool, .. } => assert_eq!(tool, "schemaforge-no-such-latex"),
            other => panic!("expected spawn error, got {other:?}"),
        }
        assert!(!dir.path().join("sample_00000.png").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_silent_engine_is_no_output_error() {
        let dir = tempfile::tempdir().unwrap();
        let tex = tex_file(dir.path());
        // `true` exits successfully without writing a PDF.
        let renderer = TexRenderer::new("true", "pdftoppm", 220);

        let err = renderer
            .render(&tex, &dir.path().join("sample_00000.png"))
            .unwrap_err();

        match err {
            RenderError::NoOutput { tool, expected, .. } => {
                assert_eq!(tool, "true");
                assert!(expected.ends_with("sample_00000.pdf"));
            }
            other => panic!("expected missing output, got {other:?}"),
        }
    }

    #[test]
    fn test_from_config_uses_configured_tools() {
        let renderer = TexRenderer::from_config(&RenderConfig::default());
        assert_eq!(renderer.latex_engine, "pdflatex");
        assert_eq!(renderer.rasterizer, "pdftoppm");
        assert_eq!(renderer.dpi, 220);
    }
}
