//! Configuration discovery for the CLI
//!
//! A run reads at most one TOML file. The first location that applies wins:
//!
//! 1. the `--config` argument;
//! 2. the file named by `SCHEMAFORGE_CONFIG`;
//! 3. `schemaforge/config.toml` below the working directory;
//! 4. `config.toml` in the platform configuration directory.
//!
//! Without any of these the defaults are used. Whatever is loaded is
//! validated here, so a bad canvas or budget is reported against the file it
//! came from before any output directory is created.

use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};

use schemaforge::{
    SchemaForgeError,
    config::{AppConfig, ConfigError},
};

use crate::Args;

/// Environment variable naming a configuration file
pub const CONFIG_ENV: &str = "SCHEMAFORGE_CONFIG";

/// Where the configuration of a run comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ConfigSource {
    /// Named explicitly; the file must exist.
    Explicit(PathBuf),
    /// Named by [`CONFIG_ENV`]; the file must exist.
    Environment(PathBuf),
    /// Found next to the working directory or in the platform directory.
    Discovered(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) => write!(f, "--config {}", path.display()),
            Self::Environment(path) => write!(f, "{CONFIG_ENV}={}", path.display()),
            Self::Discovered(path) => write!(f, "{}", path.display()),
            Self::Defaults => f.write_str("built-in defaults"),
        }
    }
}

/// Find, load and validate the configuration of a run
///
/// # Errors
///
/// Returns error if:
/// - An explicit or environment path is given but the file doesn't exist
/// - The file cannot be read or parsed
/// - The loaded values fail [`AppConfig::validate`]
pub fn load_config(explicit_path: Option<&PathBuf>) -> Result<AppConfig, SchemaForgeError> {
    let from_env = env::var_os(CONFIG_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from);
    let source = locate(explicit_path.cloned(), from_env, discovered_paths());
    load_from(&source)
}

/// Applies `--seed` and `--no-render` on top of the loaded configuration
pub fn apply_overrides(mut config: AppConfig, args: &Args) -> AppConfig {
    if let Some(seed) = args.seed {
        debug!(seed, configured = config.seed(); "Seed overridden from command line");
        config = config.with_seed(seed);
    }
    if args.no_render {
        let render = config.render().clone().with_enabled(false);
        config = config.with_render(render);
    }
    config
}

/// Candidate files checked when neither `--config` nor the environment names one
fn discovered_paths() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from("schemaforge/config.toml")];
    match ProjectDirs::from("com", "schemaforge", "schemaforge") {
        Some(proj_dirs) => candidates.push(proj_dirs.config_dir().join("config.toml")),
        None => debug!("Could not determine platform-specific config directory"),
    }
    candidates
}

fn locate(
    explicit: Option<PathBuf>,
    from_env: Option<PathBuf>,
    candidates: Vec<PathBuf>,
) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path);
    }
    if let Some(path) = from_env {
        return ConfigSource::Environment(path);
    }
    for path in candidates {
        if path.exists() {
            return ConfigSource::Discovered(path);
        }
        debug!(path = path.display().to_string(); "Configuration file not found");
    }
    ConfigSource::Defaults
}

fn load_from(source: &ConfigSource) -> Result<AppConfig, SchemaForgeError> {
    let config = match source {
        ConfigSource::Explicit(path)
        | ConfigSource::Environment(path)
        | ConfigSource::Discovered(path) => {
            info!(source:% = source; "Loading configuration");
            load_config_file(path)?
        }
        ConfigSource::Defaults => {
            debug!("No configuration file found, using default configuration");
            AppConfig::default()
        }
    };

    config.validate().map_err(|err| match err {
        ConfigError::Validation(message) => {
            ConfigError::Validation(format!("{message} (from {source})"))
        }
        other => other,
    })?;
    Ok(config)
}

fn load_config_file(path: &Path) -> Result<AppConfig, SchemaForgeError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config = toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    Ok(config)
}
