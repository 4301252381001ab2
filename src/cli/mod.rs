//! Command line interface for mac_app_bundler.
//!
//! Parses flags, environment variables and an optional manifest into a
//! [`BundleConfig`](crate::bundler::BundleConfig), then runs the assembler.

mod args;
mod bundle;
pub mod manifest;
mod output;

pub use args::Args;
pub use bundle::execute_bundle;
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point
pub fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute_bundle(&args)
}
