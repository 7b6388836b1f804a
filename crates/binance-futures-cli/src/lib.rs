/*
[INPUT]:  Module declarations
[OUTPUT]: Public CLI library surface (arguments, configuration, commands)
[POS]:    Crate root - shared by the binary and integration tests
[UPDATE]: When adding modules
*/

pub mod cli;
pub mod commands;
pub mod config;

pub use cli::{Cli, Command, ListenKeyAction};
pub use commands::execute;
pub use config::CliConfig;
