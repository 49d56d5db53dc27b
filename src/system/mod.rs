//! # System Interaction Layer
//!
//! The boundary between `dotnet test3` and the operating system.
//!
//! ## Modules
//!
//! - **`executor`**: spawns the build tool with inherited stdio, waits for it, and turns its
//!   exit status into this command's exit code.

pub mod executor;
