// EN: src/cli/handlers/mod.rs

//! One handler per command. `dotnet test3` has exactly one.

pub mod test3;
