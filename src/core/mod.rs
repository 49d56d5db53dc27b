// src/core/mod.rs

//! The logic of `dotnet test3`, independent of the process it runs in.

pub mod arg_translator;
pub mod commons;
pub mod config_loader;
pub mod paths;
pub mod project_resolver;
pub mod properties;
