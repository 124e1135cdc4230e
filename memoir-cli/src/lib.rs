//! # memoir-cli
//!
//! Command-line front end: argument parsing and command handlers over
//! [`memoir_runtime::Assistant`].

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands, JournalCommand, MemoryCommand, SettingsCommand};
pub use commands::run;
