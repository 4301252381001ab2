//! # mac_app_bundler
//!
//! Assembles a prebuilt executable into a macOS application bundle.
//!
//! Given a binary and a handful of identity values, it produces
//!
//! ```text
//! dist/<AppName>.app/Contents/
//! ├── Info.plist
//! ├── PkgInfo
//! ├── MacOS/<executable>
//! └── Resources/[icon]
//! ```
//!
//! ## Features
//!
//! - **Full replacement**: a rerun removes the previous bundle before writing
//! - **Deterministic output**: identical input gives byte-identical trees
//! - **Best-effort icon**: a missing icon is logged and skipped, a missing binary is fatal
//!
//! ## Usage
//!
//! ```bash
//! mac_app_bundler --binary target/release/foldex --app-name Foldex \
//!     --bundle-id com.khai.foldex --executable-name foldex
//! mac_app_bundler --manifest bundle.toml --ui-element true
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export main types for public API
pub use bundler::{AppBundle, AssemblyError, BundleConfig, BundleConfigBuilder, assemble};
pub use cli::Args;
pub use error::{BundlerError, CliError, ManifestError, Result};
