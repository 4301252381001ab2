//! Error types for mac_app_bundler operations.
//!
//! This module defines the top-level error with actionable messages and recovery suggestions.

use crate::bundler::AssemblyError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mac_app_bundler operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all mac_app_bundler operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// Bundle assembly errors
    #[error("Assembly error: {0}")]
    Assembly(#[from] AssemblyError),

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// Manifest loading errors
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Terminal output errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Required value given neither as a flag, an environment variable nor in the manifest
    #[error("Missing required value for --{flag}")]
    MissingValue {
        /// Flag name without leading dashes
        flag: &'static str,
    },
}

/// Manifest file errors
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest could not be read
    #[error("Failed to read manifest {path}: {source}")]
    Read {
        /// Manifest path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Manifest is not valid TOML or has unknown keys
    #[error("Failed to parse manifest {path}: {source}")]
    Parse {
        /// Manifest path
        path: PathBuf,
        /// Underlying TOML error
        #[source]
        source: toml::de::Error,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            BundlerError::Assembly(AssemblyError::MissingBinary { path }) => vec![
                format!("Build the executable first so that {} exists", path.display()),
                "Check the --binary path (relative paths resolve from the current directory)"
                    .to_string(),
            ],
            BundlerError::Assembly(AssemblyError::IoFailure { path, .. }) => vec![
                format!("Check permissions and free space for {}", path.display()),
                "Re-run the command; assembly always starts from a clean bundle".to_string(),
            ],
            BundlerError::Assembly(AssemblyError::InvalidConfig { field, .. }) => {
                let mut suggestions = vec![format!("Fix the value of `{field}`")];
                if *field == "bundle_identifier" {
                    suggestions.push(
                        "Use a reverse-DNS identifier such as com.example.myapp".to_string(),
                    );
                }
                suggestions
            }
            BundlerError::Cli(CliError::MissingValue { flag }) => vec![
                format!("Pass --{flag} or set it in the [bundle] table of a --manifest file"),
            ],
            BundlerError::Assembly(AssemblyError::Descriptor(_)) => vec![
                "Check that bundle values contain only characters valid in XML".to_string(),
            ],
            BundlerError::Manifest(ManifestError::Parse { .. }) => vec![
                "Check the manifest against the documented [bundle] keys".to_string(),
            ],
            BundlerError::Manifest(ManifestError::Read { path, .. }) => vec![
                format!("Check that the manifest {} exists and is readable", path.display()),
                "Pass --manifest with a path relative to the current directory".to_string(),
            ],
            BundlerError::Io(_) => vec![
                "Check that stdout is writable, or pass --quiet".to_string(),
            ],
        }
    }
}
