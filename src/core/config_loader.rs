//! # Config Loader
//!
//! Builds the effective `ToolConfig` from three layers, lowest priority first:
//! built-in defaults, `config.toml` (`$TEST3_CONFIG` or the per-user config
//! directory), and environment overrides for the build tool.
use crate::{
    constants::{BUILD_TOOL_ENV, CONFIG_PATH_ENV, DEFAULT_BUILD_TOOL, DOTNET_HOST_PATH_ENV},
    core::paths::{self, PathError},
    models::ToolConfig,
};
use std::{env, fs, path::Path};
use thiserror::Error;

/// Failures while building the effective configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists (or was named explicitly) but could not be read.
    #[error("Configuration file '{path}' could not be read: {source}")]
    Read {
        /// Path of the file.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML or does not fit the schema.
    #[error("Configuration file '{path}' is invalid: {source}")]
    Parse {
        /// Path of the file.
        path: String,
        /// The TOML error, with line and column.
        #[source]
        source: toml::de::Error,
    },
    /// The `TEST3_CONFIG` value could not be expanded.
    #[error(transparent)]
    Path(#[from] PathError),
    /// An environment variable holds an unbalanced command line.
    #[error("{var} could not be parsed as a command line: '{value}'")]
    CommandParse {
        /// Name of the variable.
        var: &'static str,
        /// Its value.
        value: String,
    },
    /// An environment variable holds only whitespace.
    #[error("{0} is set but names no program.")]
    EmptyCommand(&'static str),
    /// A required setting is present but empty.
    #[error("The '{0}' setting must not be empty.")]
    EmptySetting(&'static str),
}

/// The program and leading arguments the build tool is invoked with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildToolCommand {
    /// Program to spawn.
    pub program: String,
    /// Arguments placed before the target switch.
    pub args: Vec<String>,
}

/// Loads the configuration for this process, reading the real environment.
pub fn load_config() -> Result<ToolConfig, ConfigError> {
    load_config_with(|key| env::var(key).ok())
}

/// Same as [`load_config`], with environment lookups routed through `lookup`.
pub fn load_config_with(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ToolConfig, ConfigError> {
    let config = match lookup(CONFIG_PATH_ENV) {
        // An explicitly named file must exist.
        Some(template) => {
            let path = paths::expand_config_path(&template)?;
            read_config_file(&path)?
        }
        None => match paths::get_default_config_path() {
            Some(path) if path.is_file() => read_config_file(&path)?,
            _ => {
                log::debug!("No configuration file found, using defaults.");
                ToolConfig::default()
            }
        },
    };

    validate(&config)?;
    Ok(config)
}

/// Parses a `config.toml`. Missing keys take their default values.
pub fn read_config_file(path: &Path) -> Result<ToolConfig, ConfigError> {
    log::debug!("Loading configuration from '{}'", path.display());
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

fn validate(config: &ToolConfig) -> Result<(), ConfigError> {
    if config.target.trim().is_empty() {
        return Err(ConfigError::EmptySetting("target"));
    }
    if config.project_patterns.is_empty() {
        return Err(ConfigError::EmptySetting("project_patterns"));
    }
    if let Some(program) = &config.build_tool.program
        && program.trim().is_empty()
    {
        return Err(ConfigError::EmptySetting("build_tool.program"));
    }
    Ok(())
}

/// Decides which program runs the build.
///
/// Precedence: `TEST3_BUILD_TOOL` (a full command line, replacing the configured
/// arguments too), then `build_tool.program`, then `DOTNET_HOST_PATH`, then `dotnet`.
pub fn resolve_build_tool(
    config: &ToolConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<BuildToolCommand, ConfigError> {
    if let Some(command_line) = lookup(BUILD_TOOL_ENV) {
        let mut parts = shlex::split(&command_line)
            .ok_or_else(|| ConfigError::CommandParse {
                var: BUILD_TOOL_ENV,
                value: command_line.clone(),
            })?
            .into_iter();
        let program = parts.next().ok_or(ConfigError::EmptyCommand(BUILD_TOOL_ENV))?;
        return Ok(BuildToolCommand {
            program,
            args: parts.collect(),
        });
    }

    let program = config
        .build_tool
        .program
        .clone()
        .or_else(|| lookup(DOTNET_HOST_PATH_ENV).filter(|p| !p.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_BUILD_TOOL.to_string());

    Ok(BuildToolCommand {
        program: expand_program(&program),
        args: config.build_tool.args.clone(),
    })
}

// Only path-looking programs get `~` expanded; bare names are left for PATH lookup.
fn expand_program(program: &str) -> String {
    if program.starts_with('~') {
        paths::expand_home(program)
    } else {
        program.to_string()
    }
}
