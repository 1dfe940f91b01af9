//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod completions;
mod config;
mod rules;
mod transform;
pub mod utils;

pub use completions::handle_completions;
pub use config::handle_config;
pub use rules::handle_rules;
pub use transform::handle_transform;
