//! Command-line surface of `dotnet test3`: the clap definition, the debug switch and
//! the command handler.

use crate::constants::COMMAND_NAME;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

pub mod debug;
pub mod handlers;

/// The `dotnet test3` command line.
///
/// Only the options declared here are recognized. Every other token is left for
/// the build tool, so this struct is parsed from the *recognized* part of the
/// arguments (see `core::arg_translator`), never from the raw argv.
#[derive(Parser, Debug, Default, Clone, PartialEq, Eq)]
#[command(
    name = COMMAND_NAME,
    bin_name = COMMAND_NAME,
    version,
    about = t!("cli.about"),
    long_about = t!("cli.long_about"),
    after_help = t!("cli.after_help"),
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Project file to test.
    #[arg(value_name = "PROJECT", help = t!("cli.arg.project"))]
    pub project: Option<PathBuf>,

    /// Run settings file.
    #[arg(long = "settings", value_name = "SettingsFile", help = t!("cli.arg.settings"))]
    pub settings: Option<String>,

    /// Tests to run, comma separated.
    #[arg(long = "tests", value_name = "TestNames", help = t!("cli.arg.tests"))]
    pub tests: Option<String>,

    /// Folder searched for custom test adapters.
    #[arg(
        long = "testAdapterPath",
        value_name = "AdapterPath",
        help = t!("cli.arg.test_adapter_path")
    )]
    pub test_adapter_path: Option<String>,

    /// Target platform architecture.
    #[arg(long = "platform", value_name = "PlatformType", help = t!("cli.arg.platform"))]
    pub platform: Option<String>,

    /// Target .NET framework version.
    #[arg(long = "framework", value_name = "FrameworkVersion", help = t!("cli.arg.framework"))]
    pub framework: Option<String>,

    /// Filter expression selecting the tests to run.
    #[arg(
        long = "testCaseFilter",
        value_name = "Expression",
        help = t!("cli.arg.test_case_filter")
    )]
    pub test_case_filter: Option<String>,

    /// Loggers for test results. Repeatable; every value ends up in one property.
    #[arg(
        long = "logger",
        value_name = "LoggerUri/FriendlyName",
        action = ArgAction::Append,
        help = t!("cli.arg.logger")
    )]
    pub logger: Vec<String>,

    /// List the discovered tests instead of running them.
    #[arg(
        long = "listTests",
        visible_alias = "lt",
        action = ArgAction::SetTrue,
        help = t!("cli.arg.list_tests")
    )]
    pub list_tests: bool,

    /// Process ID of the parent process responsible for launching this one.
    #[arg(
        long = "parentProcessId",
        value_name = "ParentProcessId",
        help = t!("cli.arg.parent_process_id")
    )]
    pub parent_process_id: Option<u32>,

    /// Port for the socket connection used to receive event messages.
    #[arg(long = "port", value_name = "Port", help = t!("cli.arg.port"))]
    pub port: Option<u16>,
}
