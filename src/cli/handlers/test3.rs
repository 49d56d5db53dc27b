// EN: src/cli/handlers/test3.rs

//! The `dotnet test3` command: parse, load configuration, plan, forward.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::{env, ffi::OsString, path::Path};

use crate::{
    cli::Cli,
    constants::{TARGET_SWITCH_PREFIX, VERBOSE_ENV},
    core::{
        arg_translator::{self, OptionTable, TranslatedArgs},
        config_loader::{self, BuildToolCommand},
        project_resolver::{self, ProjectMatcher},
        properties,
    },
    models::{ForwardInvocation, ToolConfig},
    system::executor,
};

/// The command line after translation and clap validation.
#[derive(Debug, Clone)]
pub struct ParsedArgs {
    /// The recognized options, typed.
    pub cli: Cli,
    /// The raw split, whose pass-through part is forwarded as is.
    pub translated: TranslatedArgs,
}

/// The main handler for `dotnet test3`.
/// Translates `args` (argv without the program name), runs the build tool, and returns
/// the exit code to terminate with.
pub fn handle(args: Vec<OsString>) -> Result<i32> {
    // 1. Parse before touching the configuration, so `--help` and usage errors never
    //    depend on it.
    let parsed = parse_args(&args)?;

    // 2. Load configuration and pick the build tool.
    let config = config_loader::load_config()?;
    let build_tool = config_loader::resolve_build_tool(&config, |key| env::var(key).ok())?;
    let cwd = env::current_dir()?;

    // 3. Plan and run.
    let invocation = plan_invocation(parsed, &config, &build_tool, &cwd)?;

    if is_verbose(env::var(VERBOSE_ENV).ok().as_deref()) {
        println!(
            "{}",
            format!(t!("run.verbose"), command = invocation.command_line()).dimmed()
        );
    }

    Ok(executor::forward(&invocation)?)
}

/// Splits `args` into recognized options and pass-through, and validates the former.
pub fn parse_args(args: &[OsString]) -> Result<ParsedArgs> {
    let translated = arg_translator::translate(args, &OptionTable::for_cli())?;
    let cli = Cli::try_parse_from(translated.clap_argv())?;
    log::debug!("CLI args parsed: {:?}", cli);
    Ok(ParsedArgs { cli, translated })
}

/// Builds the invocation without running anything:
///
/// `<tool args> /t:<target> <properties> <project> <pass-through>`
pub fn plan_invocation(
    parsed: ParsedArgs,
    config: &ToolConfig,
    build_tool: &BuildToolCommand,
    cwd: &Path,
) -> Result<ForwardInvocation> {
    let ParsedArgs { cli, translated } = parsed;
    let matcher = ProjectMatcher::new(config.project_patterns.as_slice())?;
    arg_translator::ensure_single_project(&translated, &matcher)?;

    let project = project_resolver::resolve_project(cli.project.as_deref(), cwd, &matcher)?;
    log::debug!("Resolved project: {:?}", project);

    let mut forwarded: Vec<OsString> = build_tool.args.iter().map(OsString::from).collect();
    forwarded.push(format!("{}{}", TARGET_SWITCH_PREFIX, config.target).into());
    forwarded.extend(
        properties::build_properties(&cli)
            .iter()
            .map(|p| OsString::from(p.to_string())),
    );
    forwarded.push(project.path.into_os_string());
    forwarded.extend(translated.passthrough);

    Ok(ForwardInvocation {
        program: build_tool.program.clone(),
        args: forwarded,
        cwd: cwd.to_path_buf(),
    })
}

fn is_verbose(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("true" | "1")
    )
}
