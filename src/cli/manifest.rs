//! Bundle manifest loading.
//!
//! ```toml
//! [bundle]
//! binary = "target/release/mac-uploader"
//! app_name = "Mac Uploader"
//! bundle_id = "com.example.macuploader"
//! executable_name = "mac-uploader"
//! ui_element = true
//! icon = "assets/AppIcon.icns"
//! ```
//!
//! Relative paths are resolved against the directory holding the manifest.

use crate::error::ManifestError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Top-level manifest document.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// The `[bundle]` table
    #[serde(default)]
    pub bundle: ManifestBundle,
}

/// Values of the `[bundle]` table. Every key is optional; flags fill the gaps.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestBundle {
    /// Path to the prebuilt executable
    pub binary: Option<PathBuf>,
    /// Display name
    pub app_name: Option<String>,
    /// Bundle identifier
    pub bundle_id: Option<String>,
    /// Executable name inside the bundle
    pub executable_name: Option<String>,
    /// Marketing version
    pub short_version: Option<String>,
    /// Build number
    pub build_version: Option<String>,
    /// Background-app flag
    pub ui_element: Option<bool>,
    /// Retina flag
    pub high_resolution: Option<bool>,
    /// Icon file
    pub icon: Option<PathBuf>,
    /// Destination directory
    pub dest: Option<PathBuf>,
}

impl Manifest {
    /// Reads and parses the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut manifest = Self::parse(&contents).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        manifest.bundle.resolve_paths(base);
        log::debug!("Loaded manifest {}", path.display());
        Ok(manifest)
    }

    /// Parses manifest text without touching the filesystem.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

impl ManifestBundle {
    fn resolve_paths(&mut self, base: &Path) {
        for path in [&mut self.binary, &mut self.icon, &mut self.dest]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
