// src/models.rs

//! Data passed between the translation, resolution and execution steps, plus the
//! `config.toml` schema.

use crate::constants::{
    DEFAULT_BUILD_TOOL_ARGS, DEFAULT_PROJECT_PATTERNS, DEFAULT_TARGET, PROPERTY_SWITCH_PREFIX,
};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

// --- FORWARDING MODELS ---

/// A single MSBuild property assignment produced from a recognized flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildProperty {
    /// Property name, one of the `PROP_*` constants.
    pub name: &'static str,
    /// Value exactly as it goes after `=`.
    pub value: String,
}

impl BuildProperty {
    /// Pairs a property name with its value.
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

impl fmt::Display for BuildProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}={}", PROPERTY_SWITCH_PREFIX, self.name, self.value)
    }
}

/// Where the project handed to the build tool came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectSource {
    /// Given on the command line; forwarded verbatim.
    Explicit,
    /// Found by scanning the working directory.
    Discovered,
}

/// The project file handed to the build tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProject {
    /// Path as given, or the discovered file inside the working directory.
    pub path: PathBuf,
    /// How the path was obtained.
    pub source: ProjectSource,
}

/// Everything needed to spawn the build tool once.
#[derive(Debug, Clone)]
pub struct ForwardInvocation {
    /// Program to spawn.
    pub program: String,
    /// Every argument after the program, in order.
    pub args: Vec<OsString>,
    /// Working directory of the child.
    pub cwd: PathBuf,
}

impl ForwardInvocation {
    /// Renders the invocation as a shell-quoted command line, for display only.
    pub fn command_line(&self) -> String {
        let parts: Vec<String> = std::iter::once(self.program.clone())
            .chain(self.args.iter().map(|a| a.to_string_lossy().into_owned()))
            .collect();
        shlex::try_join(parts.iter().map(String::as_str)).unwrap_or_else(|_| parts.join(" "))
    }
}

// --- CONFIGURATION MODELS (FOR TOML) ---
// These mirror `config.toml`. Every field has a default so an empty file is valid.

/// Top-level `config.toml` table.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// MSBuild target to invoke (`/t:<target>`).
    pub target: String,
    /// Glob patterns identifying project files, matched against file names.
    pub project_patterns: Vec<String>,
    /// The `[build_tool]` table.
    pub build_tool: BuildToolConfig,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            project_patterns: DEFAULT_PROJECT_PATTERNS
                .iter()
                .map(|p| p.to_string())
                .collect(),
            build_tool: BuildToolConfig::default(),
        }
    }
}

/// How the build tool is invoked.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BuildToolConfig {
    /// Program to spawn. `None` defers to `DOTNET_HOST_PATH`, then `dotnet`.
    pub program: Option<String>,
    /// Arguments placed before the target switch.
    pub args: Vec<String>,
}

impl Default for BuildToolConfig {
    fn default() -> Self {
        Self {
            program: None,
            args: DEFAULT_BUILD_TOOL_ARGS
                .iter()
                .map(|a| a.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_property_renders_as_msbuild_switch() {
        let prop = BuildProperty::new("VSTestPlatform", "x64");
        assert_eq!(prop.to_string(), "/p:VSTestPlatform=x64");
    }

    #[test]
    fn test_command_line_quotes_arguments_with_spaces() {
        let invocation = ForwardInvocation {
            program: "dotnet".to_string(),
            args: vec![
                OsString::from("msbuild"),
                OsString::from("/p:VSTestTestCaseFilter=Priority = 1"),
            ],
            cwd: PathBuf::from("."),
        };
        let line = invocation.command_line();
        assert!(line.starts_with("dotnet msbuild "));
        assert_eq!(
            shlex::split(&line).unwrap(),
            vec!["dotnet", "msbuild", "/p:VSTestTestCaseFilter=Priority = 1"]
        );
    }

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config: ToolConfig = toml::from_str("").unwrap();
        assert_eq!(config, ToolConfig::default());
        assert_eq!(config.target, "VSTest");
        assert_eq!(config.build_tool.args, vec!["msbuild".to_string()]);
        assert!(config.build_tool.program.is_none());
    }
}
