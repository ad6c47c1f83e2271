//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, working directory, system directory).
//!
//! ```toml
//! [output]
//! indent_width = 2
//! use_tabs = false
//! line_ending = "crlf"
//!
//! [parse]
//! max_nesting_depth = 32
//!
//! [diagnostics]
//! fail_on = "warning"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

use reprgen::{GeneratorConfig, ParseConfig, Severity};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG: &str = "reprgen.toml";

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Everything a configuration file can set. Missing sections and keys keep
/// their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Layout of generated sources.
    pub output: GeneratorConfig,
    pub parse: ParseSection,
    pub diagnostics: DiagnosticsSection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseSection {
    pub max_nesting_depth: usize,
}

impl Default for ParseSection {
    fn default() -> Self {
        Self {
            max_nesting_depth: ParseConfig::DEFAULT.max_nesting_depth,
        }
    }
}

impl ParseSection {
    pub fn to_parse_config(self) -> ParseConfig {
        ParseConfig::new().with_max_nesting_depth(self.max_nesting_depth)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticsSection {
    pub fail_on: FailOn,
}

/// Lowest diagnostic severity that makes the run fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailOn {
    Never,
    Warning,
    #[default]
    Error,
}

impl FailOn {
    pub fn fails(&self, severity: Severity) -> bool {
        match self {
            FailOn::Never => false,
            FailOn::Warning => severity >= Severity::Warning,
            FailOn::Error => severity >= Severity::Error,
        }
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. `reprgen.toml` in the working directory
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be read or parsed
/// - A value is out of range
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ConfigError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new(LOCAL_CONFIG);
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("io", "reprgen", "reprgen") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load and validate one TOML configuration file.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config(&content)
}

const MAX_INDENT_WIDTH: usize = 16;
const MAX_NESTING_DEPTH: usize = 1024;

fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    if !(1..=MAX_NESTING_DEPTH).contains(&config.parse.max_nesting_depth) {
        return Err(ConfigError::Validation(format!(
            "parse.max_nesting_depth must be between 1 and {MAX_NESTING_DEPTH}"
        )));
    }
    if config.output.indent_width == 0 && !config.output.use_tabs {
        return Err(ConfigError::Validation(
            "output.indent_width must be at least 1 unless output.use_tabs is set".to_owned(),
        ));
    }
    if config.output.indent_width > MAX_INDENT_WIDTH {
        return Err(ConfigError::Validation(format!(
            "output.indent_width must be at most {MAX_INDENT_WIDTH}"
        )));
    }

    Ok(config)
}
