//! macOS application bundle assembler.
//!
//! Packages a prebuilt executable into `<AppName>.app` with a generated
//! `Info.plist`, an optional icon and a `PkgInfo` file.
//!
//! # Integration
//!
//! ```no_run
//! use mac_app_bundler::bundler::{BundleConfig, assemble};
//!
//! let config = BundleConfig::builder()
//!     .binary("target/release/mac-uploader")
//!     .app_name("Mac Uploader")
//!     .bundle_identifier("com.example.macuploader")
//!     .executable_name("mac-uploader")
//!     .ui_element(true)
//!     .icon("assets/AppIcon.icns")
//!     .build()?;
//!
//! let bundle = assemble(&config)?;
//! println!("Created {} ({} bytes)", bundle.path.display(), bundle.size);
//! println!("SHA256: {}", bundle.checksum);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Assembly is synchronous and assumes exclusive access to the destination
//! while it runs.

#![warn(missing_docs)]

mod error;
pub mod macos;
mod settings;
mod utils;

// Public re-exports
pub use error::{AssemblyError, ErrorExt, Result};
pub use macos::app::assemble;
pub use macos::info_plist::{ICON_KEYS, InfoPlist, MANDATORY_KEYS};
pub use settings::{
    BundleConfig, BundleConfigBuilder, DEFAULT_BUILD_VERSION, DEFAULT_DESTINATION,
    DEFAULT_SHORT_VERSION, validate_bundle_identifier,
};

use std::path::PathBuf;

/// An assembled application bundle.
///
/// # Fields
///
/// - `path`: the `.app` directory
/// - `size`: total bytes of regular files in the bundle
/// - `checksum`: SHA-256 over relative paths and contents, stable across
///   reruns with identical input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppBundle {
    /// Path to the `.app` directory.
    pub path: PathBuf,

    /// Path to the copied executable in `Contents/MacOS`.
    pub executable: PathBuf,

    /// Path to the generated `Contents/Info.plist`.
    pub info_plist: PathBuf,

    /// Path to the copied icon, if the icon step ran.
    pub icon: Option<PathBuf>,

    /// Total size of the bundle contents in bytes.
    pub size: u64,

    /// SHA-256 checksum of the bundle tree.
    pub checksum: String,
}
