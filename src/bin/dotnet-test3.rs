// EN: src/bin/dotnet-test3.rs

use colored::*;
use dotnet_test3::{
    cli::{debug, handlers},
    t,
};
use std::{env, ffi::OsString};

/// The main entry point of `dotnet test3`.
/// It sets up logging, honors the debug switch, runs the handler, and performs
/// centralized error handling. The exit code is the build tool's own.
fn main() {
    env_logger::init();

    // Kept as `OsString` so forwarded arguments reach the build tool unchanged.
    let mut args: Vec<OsString> = env::args_os().skip(1).collect();
    log::debug!("Raw args: {:?}", args);

    if let Err(e) = debug::handle_debug_switch(&mut args) {
        log::warn!("Could not wait for debugger: {}", e);
    }

    match handlers::test3::handle(args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            // --- Centralized Error Handling ---
            // clap renders its own output: help and version exit 0, usage errors exit 2.
            if let Some(clap_err) = e.downcast_ref::<clap::Error>() {
                clap_err.exit();
            }

            eprintln!("{}: {}", t!("error.label").red().bold(), e);
            std::process::exit(1);
        }
    }
}
