//! Error types for bundle assembly.
//!
//! Every failure names the path or configuration field it concerns, so the
//! CLI can print a diagnostic without further lookups.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use mac_app_bundler::bundler::{ErrorExt, Result};
//!
//! fn create_contents(path: &Path) -> Result<()> {
//!     std::fs::create_dir_all(path)
//!         .fs_context("creating Contents directory", path)?;
//!     Ok(())
//! }
//! ```

use std::{io, path::PathBuf};
use thiserror::Error as DeriveError;

/// Errors returned by the bundle assembler.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum AssemblyError {
    /// The source executable does not exist or is not a regular file.
    ///
    /// Raised before the destination is touched, so a previous bundle
    /// survives a failed run.
    #[error("source binary not found: {path}")]
    MissingBinary {
        /// Path that was expected to hold the executable
        path: PathBuf,
    },

    /// A filesystem step failed.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {source}")]
    IoFailure {
        /// Operation that failed (e.g., "copying binary")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A configuration field is empty or malformed.
    #[error("invalid configuration field `{field}`: {reason}")]
    InvalidConfig {
        /// Name of the offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// The Info.plist document could not be serialized.
    #[error("failed to serialize Info.plist: {0}")]
    Descriptor(#[from] plist::Error),
}

impl AssemblyError {
    /// Shorthand for [`AssemblyError::InvalidConfig`].
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, AssemblyError>;

/// Extension trait for filesystem operations with automatic path context.
///
/// Wraps I/O errors into [`AssemblyError::IoFailure`] carrying the path.
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the operation,
    /// e.g., "reading file", "creating directory", "copying binary".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|source| AssemblyError::IoFailure {
            context,
            path: path.into(),
            source,
        })
    }
}
