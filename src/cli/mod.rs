//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, enums, and subcommand handlers.

mod args;
mod commands;
mod enums;

pub use args::{Args, CacheAction, Command, ConfigAction};
pub use commands::{generate, handle_cache_action, handle_config_action};
pub use enums::{OutputFormat, Sample};
