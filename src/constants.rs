// src/constants.rs

//! Fixed names shared across the crate.

/// Name of the per-user configuration directory (inside the system config dir).
pub const APP_DIR_NAME: &str = "dotnet-test3";

/// Name of the configuration file (inside `APP_DIR_NAME`).
pub const CONFIG_FILENAME: &str = "config.toml";

/// Name shown in usage and help output.
pub const COMMAND_NAME: &str = "dotnet test3";

/// MSBuild target invoked when the configuration does not name one.
pub const DEFAULT_TARGET: &str = "VSTest";

/// Build tool used when neither the configuration nor the environment names one.
pub const DEFAULT_BUILD_TOOL: &str = "dotnet";

/// Arguments placed before everything else when running the default build tool.
pub const DEFAULT_BUILD_TOOL_ARGS: &[&str] = &["msbuild"];

/// Glob patterns a file name must match to count as a project file.
pub const DEFAULT_PROJECT_PATTERNS: &[&str] = &["*.*proj"];

/// Prefix of an MSBuild target switch (`/t:<target>`).
pub const TARGET_SWITCH_PREFIX: &str = "/t:";

/// Prefix of an MSBuild property assignment (`/p:<name>=<value>`).
pub const PROPERTY_SWITCH_PREFIX: &str = "/p:";

/// First argument that makes the command wait for a debugger.
pub const DEBUG_SWITCH: &str = "--debug";

// --- Environment variables ---

/// Path of an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "TEST3_CONFIG";

/// Full build-tool command line, replacing the configured program and arguments.
pub const BUILD_TOOL_ENV: &str = "TEST3_BUILD_TOOL";

/// Path of the running `dotnet` host, exported by the muxer to its subcommands.
pub const DOTNET_HOST_PATH_ENV: &str = "DOTNET_HOST_PATH";

/// When truthy, the forwarded command line is printed before it runs.
pub const VERBOSE_ENV: &str = "DOTNET_CLI_CONTEXT_VERBOSE";

// --- MSBuild properties understood by the VSTest target ---

/// Run settings file (`--settings`).
pub const PROP_SETTINGS: &str = "VSTestSetting";
/// Test names to run (`--tests`).
pub const PROP_TESTS: &str = "VSTestTests";
/// Custom adapter folder (`--testAdapterPath`).
pub const PROP_TEST_ADAPTER_PATH: &str = "VSTestTestAdapterPath";
/// Target platform (`--platform`).
pub const PROP_PLATFORM: &str = "VSTestPlatform";
/// Target framework (`--framework`).
pub const PROP_FRAMEWORK: &str = "VSTestFramework";
/// Test case filter expression (`--testCaseFilter`).
pub const PROP_TEST_CASE_FILTER: &str = "VSTestTestCaseFilter";
/// Result loggers (`--logger`).
pub const PROP_LOGGER: &str = "VSTestLogger";
/// List instead of run (`--listTests`).
pub const PROP_LIST_TESTS: &str = "VSTestListTests";
/// Parent process ID (`--parentProcessId`).
pub const PROP_PARENT_PROCESS_ID: &str = "VSTestParentProcessId";
/// Event socket port (`--port`).
pub const PROP_PORT: &str = "VSTestPort";
