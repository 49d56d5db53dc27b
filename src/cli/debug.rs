// src/cli/debug.rs

//! The leading `--debug` switch, which pauses until a debugger is attached.

use crate::constants::DEBUG_SWITCH;
use colored::Colorize;
use std::ffi::OsString;
use std::io::{self, BufRead, Write};

/// Honors a leading `--debug`: removes it and blocks until ENTER is pressed,
/// giving a debugger time to attach to this process.
pub fn handle_debug_switch(args: &mut Vec<OsString>) -> io::Result<()> {
    if !strip_debug_switch(args) {
        return Ok(());
    }
    let stdin = io::stdin();
    let stdout = io::stdout();
    wait_for_debugger(&mut stdin.lock(), &mut stdout.lock(), std::process::id())
}

/// Removes `--debug` when it is the first argument. Later occurrences are left alone,
/// since they may belong to the build tool.
pub fn strip_debug_switch(args: &mut Vec<OsString>) -> bool {
    if args.first().is_some_and(|first| first == DEBUG_SWITCH) {
        args.remove(0);
        true
    } else {
        false
    }
}

/// Prints the process ID to `output` and blocks until a line is read from `input`.
pub fn wait_for_debugger(
    input: &mut impl BufRead,
    output: &mut impl Write,
    pid: u32,
) -> io::Result<()> {
    writeln!(output, "{}", t!("debug.waiting").yellow())?;
    writeln!(output, "{}", format!(t!("debug.process_id"), pid = pid).dimmed())?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    log::debug!("Debugger wait released.");
    Ok(())
}
