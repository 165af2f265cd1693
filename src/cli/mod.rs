//! CLI module
//!
//! Command-line interface for decoding request bodies offline.
//!
//! # Commands
//!
//! - `decode` - Decode a body for a content type and print it as JSON
//! - `types` - List content types with a registered decoder

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
