// src/core/arg_translator.rs

//! Separates the options `dotnet test3` understands from the tokens it forwards.

use crate::{cli::Cli, constants::COMMAND_NAME, core::project_resolver::ProjectMatcher};
use clap::CommandFactory;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::ffi::OsString;
use thiserror::Error;

lazy_static! {
    // `/p:Name=Value`, `/v:m`, `/nologo`: switches meant for the build tool.
    static ref BUILD_SWITCH_RE: Regex = Regex::new(r"^/[A-Za-z][A-Za-z0-9]*(?::.*)?$").unwrap();
}

/// Argument combinations that cannot be forwarded.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TranslateError {
    /// A second project-like token showed up after the positional project.
    #[error("Only one project can be specified at a time. Got '{project}' and '{extra}'.")]
    ExtraProject {
        /// The positional project.
        project: String,
        /// The token that also names a project.
        extra: String,
    },
    /// A project-like token showed up where only pass-through is expected.
    #[error(
        "Project '{extra}' can't be forwarded to the build tool. \
         Pass it as the first argument instead."
    )]
    MisplacedProject {
        /// The offending token.
        extra: String,
    },
    /// A recognized option whose inline value is not valid Unicode.
    #[error("Option '{token}' has a value that is not valid Unicode.")]
    NonUnicodeOption {
        /// The token, with invalid sequences replaced for display.
        token: String,
    },
}

/// How a recognized option is written when handed to clap, and whether it consumes a value.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OptionShape {
    canonical: String,
    takes_value: bool,
}

/// Every name (long, alias, short) under which `Cli` accepts an option.
#[derive(Debug, Clone, Default)]
pub struct OptionTable {
    long: HashMap<String, OptionShape>,
    short: HashMap<char, OptionShape>,
}

impl OptionTable {
    /// The table for the `dotnet test3` command line, including clap's `--help`/`--version`.
    pub fn for_cli() -> Self {
        let mut command = Cli::command();
        command.build();
        Self::from_command(&command)
    }

    /// Collects named arguments from a built `clap::Command`. Positionals are skipped.
    pub fn from_command(command: &clap::Command) -> Self {
        let mut table = Self::default();

        for arg in command.get_arguments().filter(|a| !a.is_positional()) {
            let takes_value = arg.get_action().takes_values();
            let canonical = match (arg.get_long(), arg.get_short()) {
                (Some(long), _) => format!("--{}", long),
                (None, Some(short)) => format!("-{}", short),
                (None, None) => continue,
            };
            let shape = OptionShape {
                canonical,
                takes_value,
            };

            let longs = arg
                .get_long()
                .into_iter()
                .chain(arg.get_all_aliases().unwrap_or_default());
            for name in longs {
                table.long.insert(name.to_string(), shape.clone());
            }
            let shorts = arg
                .get_short()
                .into_iter()
                .chain(arg.get_all_short_aliases().unwrap_or_default());
            for c in shorts {
                table.short.insert(c, shape.clone());
            }
        }

        table
    }
}

/// The raw arguments split into what `dotnet test3` understands and what it forwards.
///
/// Tokens are kept as `OsString` so pass-through arguments and the project reach the
/// build tool byte for byte, even when they are not valid Unicode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslatedArgs {
    /// Recognized options, normalized to `--name` or `--name=value`.
    pub recognized: Vec<OsString>,
    /// The positional project argument, if one was given.
    pub project: Option<OsString>,
    /// Everything else, in original order.
    pub passthrough: Vec<OsString>,
}

impl TranslatedArgs {
    /// The argv to feed `Cli::try_parse_from`. The project goes after `--` so clap never
    /// mistakes it for an option.
    pub fn clap_argv(&self) -> Vec<OsString> {
        let mut argv = Vec::with_capacity(self.recognized.len() + 3);
        argv.push(OsString::from(COMMAND_NAME));
        argv.extend(self.recognized.iter().cloned());
        if let Some(project) = &self.project {
            argv.push(OsString::from("--"));
            argv.push(project.clone());
        }
        argv
    }
}

#[derive(Debug)]
enum Token<'a> {
    Known {
        shape: &'a OptionShape,
        inline: Option<&'a str>,
    },
    Unknown,
    Bare,
}

/// Splits raw command-line tokens into recognized options, the project, and pass-through.
///
/// # Logic:
/// - `--name`, `--name=value` and `--name:value` are looked up among long names and aliases.
///   `-x` is looked up among short names, `-xy` (e.g. `-lt`) among long names.
/// - A recognized option that takes a value and has no inline value consumes the next token.
/// - The first bare token is the project; later bare tokens are pass-through.
/// - Unrecognized options and build-tool switches (`/p:...`) are pass-through, unchanged.
/// - `--` is dropped and everything after it is pass-through.
///
/// Fails only for a recognized option whose inline value is not valid Unicode. A consumed
/// value that is not valid Unicode is left for clap to reject.
pub fn translate(raw: &[OsString], table: &OptionTable) -> Result<TranslatedArgs, TranslateError> {
    let mut translated = TranslatedArgs::default();
    let mut tokens = raw.iter();

    while let Some(token) = tokens.next() {
        if token == "--" {
            translated.passthrough.extend(tokens.by_ref().cloned());
            break;
        }

        // Option names are ASCII, so a lossy view classifies every token correctly.
        let text = token.to_string_lossy();
        match classify(&text, table) {
            Token::Known { shape, inline } => {
                if token.to_str().is_none() {
                    return Err(TranslateError::NonUnicodeOption {
                        token: token.to_string_lossy().into_owned(),
                    });
                }
                let value = match inline {
                    Some(v) => Some(OsString::from(v)),
                    None if shape.takes_value => tokens.next().cloned(),
                    None => None,
                };
                // A missing value is left for clap to report.
                let mut normalized = OsString::from(&shape.canonical);
                if let Some(v) = value {
                    normalized.push("=");
                    normalized.push(v);
                }
                translated.recognized.push(normalized);
            }
            Token::Unknown => translated.passthrough.push(token.clone()),
            Token::Bare => {
                if translated.project.is_none() {
                    translated.project = Some(token.clone());
                } else {
                    translated.passthrough.push(token.clone());
                }
            }
        }
    }

    log::debug!("Translated args: {:?}", translated);
    Ok(translated)
}

fn classify<'a>(token: &'a str, table: &'a OptionTable) -> Token<'a> {
    let (body, long_only) = if let Some(body) = token.strip_prefix("--") {
        (body, true)
    } else if let Some(body) = token.strip_prefix('-')
        && !body.is_empty()
    {
        (body, false)
    } else if BUILD_SWITCH_RE.is_match(token) {
        return Token::Unknown;
    } else {
        return Token::Bare;
    };

    let (name, inline) = split_inline_value(body);
    let mut chars = name.chars();
    let shape = match (long_only, chars.next(), chars.next()) {
        (false, Some(c), None) => table.short.get(&c),
        _ => table.long.get(name),
    };

    match shape {
        Some(shape) => Token::Known { shape, inline },
        None => Token::Unknown,
    }
}

/// `settings=a.runsettings` -> (`settings`, Some(`a.runsettings`)). `:` works like `=`.
fn split_inline_value(body: &str) -> (&str, Option<&str>) {
    match body.find(['=', ':']) {
        Some(idx) => {
            let (name, rest) = body.split_at(idx);
            (name, rest.get(1..))
        }
        None => (body, None),
    }
}

fn is_bare(token: &str) -> bool {
    !token.starts_with('-') && !BUILD_SWITCH_RE.is_match(token)
}

/// Fails if a pass-through token names a project file, since MSBuild takes only one.
pub fn ensure_single_project(
    translated: &TranslatedArgs,
    matcher: &ProjectMatcher,
) -> Result<(), TranslateError> {
    let extra = translated
        .passthrough
        .iter()
        .map(|token| token.to_string_lossy())
        .find(|token| is_bare(token) && matcher.matches(token));

    match (extra, &translated.project) {
        (None, _) => Ok(()),
        (Some(extra), Some(project)) => Err(TranslateError::ExtraProject {
            project: project.to_string_lossy().into_owned(),
            extra: extra.into_owned(),
        }),
        (Some(extra), None) => Err(TranslateError::MisplacedProject {
            extra: extra.into_owned(),
        }),
    }
}
