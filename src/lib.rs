//! `dotnet test3`: a thin test driver that turns test-run flags into MSBuild
//! properties, finds the project to test, and forwards to the build tool.

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod system;
