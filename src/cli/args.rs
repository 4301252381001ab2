//! Command line argument parsing and validation.
//!
//! Every bundle field can come from a flag, an environment variable or the
//! `[bundle]` table of a manifest, in that order of precedence.

use crate::bundler::{BundleConfig, DEFAULT_BUILD_VERSION, DEFAULT_DESTINATION, DEFAULT_SHORT_VERSION};
use crate::cli::manifest::{Manifest, ManifestBundle};
use crate::error::{CliError, Result};
use clap::Parser;
use std::path::PathBuf;

/// Package a prebuilt executable as a macOS .app bundle
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "mac_app_bundler",
    version,
    about = "Package a prebuilt executable as a macOS .app bundle",
    long_about = "Create <AppName>.app with Contents/MacOS, Contents/Resources and a generated Info.plist.

Usage:
  mac_app_bundler --binary target/release/mac-uploader --app-name \"Mac Uploader\" \\
      --bundle-id com.example.macuploader --executable-name mac-uploader --ui-element true
  mac_app_bundler --manifest bundle.toml
  mac_app_bundler --manifest bundle.toml --short-version 1.2.0 --build-version 42"
)]
pub struct Args {
    /// Path to the prebuilt executable
    #[arg(long, env = "BUNDLE_BINARY", value_name = "PATH")]
    pub binary: Option<PathBuf>,

    /// Application display name (CFBundleName, bundle directory name)
    #[arg(long, env = "BUNDLE_APP_NAME", value_name = "NAME")]
    pub app_name: Option<String>,

    /// Reverse-DNS bundle identifier (CFBundleIdentifier)
    #[arg(long, env = "BUNDLE_ID", value_name = "ID")]
    pub bundle_id: Option<String>,

    /// Executable name inside Contents/MacOS (CFBundleExecutable)
    #[arg(long, env = "BUNDLE_EXECUTABLE_NAME", value_name = "NAME")]
    pub executable_name: Option<String>,

    /// Marketing version (CFBundleShortVersionString) [default: 1.0.0]
    #[arg(long, env = "BUNDLE_SHORT_VERSION", value_name = "VERSION")]
    pub short_version: Option<String>,

    /// Build number (CFBundleVersion) [default: 1]
    #[arg(long, env = "BUNDLE_BUILD_VERSION", value_name = "VERSION")]
    pub build_version: Option<String>,

    /// Hide the app from the Dock (LSUIElement) [default: false]
    #[arg(long, env = "BUNDLE_UI_ELEMENT", value_name = "BOOL")]
    pub ui_element: Option<bool>,

    /// Opt into Retina rendering (NSHighResolutionCapable) [default: true]
    #[arg(long, env = "BUNDLE_HIGH_RESOLUTION", value_name = "BOOL")]
    pub high_resolution: Option<bool>,

    /// Icon file copied into Contents/Resources (skipped if missing)
    #[arg(long, env = "BUNDLE_ICON", value_name = "PATH")]
    pub icon: Option<PathBuf>,

    /// Destination directory for the bundle [default: dist]
    #[arg(long, env = "BUNDLE_DEST", value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// TOML manifest with a [bundle] table supplying any of the values above
    #[arg(long, env = "BUNDLE_MANIFEST", value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Show each resolved setting
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Load the manifest (if any) and merge it under the command line values.
    pub fn resolve(&self) -> Result<BundleConfig> {
        let manifest = match &self.manifest {
            Some(path) => Manifest::load(path)?.bundle,
            None => ManifestBundle::default(),
        };
        self.merge(manifest)
    }

    /// Merge `manifest` values under the command line values and build the config.
    pub fn merge(&self, manifest: ManifestBundle) -> Result<BundleConfig> {
        let binary = self
            .binary
            .clone()
            .or(manifest.binary)
            .ok_or(CliError::MissingValue { flag: "binary" })?;
        let app_name = self
            .app_name
            .clone()
            .or(manifest.app_name)
            .ok_or(CliError::MissingValue { flag: "app-name" })?;
        let bundle_id = self
            .bundle_id
            .clone()
            .or(manifest.bundle_id)
            .ok_or(CliError::MissingValue { flag: "bundle-id" })?;
        let executable_name = self
            .executable_name
            .clone()
            .or(manifest.executable_name)
            .ok_or(CliError::MissingValue {
                flag: "executable-name",
            })?;

        let config = BundleConfig::builder()
            .binary(binary)
            .app_name(app_name)
            .bundle_identifier(bundle_id)
            .executable_name(executable_name)
            .short_version(
                self.short_version
                    .clone()
                    .or(manifest.short_version)
                    .unwrap_or_else(|| DEFAULT_SHORT_VERSION.to_string()),
            )
            .build_version(
                self.build_version
                    .clone()
                    .or(manifest.build_version)
                    .unwrap_or_else(|| DEFAULT_BUILD_VERSION.to_string()),
            )
            .ui_element(self.ui_element.or(manifest.ui_element).unwrap_or(false))
            .high_resolution(
                self.high_resolution
                    .or(manifest.high_resolution)
                    .unwrap_or(true),
            )
            .icon_opt(self.icon.clone().or(manifest.icon))
            .destination(
                self.dest
                    .clone()
                    .or(manifest.dest)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DESTINATION)),
            )
            .build()?;

        Ok(config)
    }
}
