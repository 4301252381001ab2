//! Bundle configuration.
//!
//! [`BundleConfig`] is an immutable value object. It is built through
//! [`BundleConfigBuilder`], which applies defaults and validates every field
//! before the assembler ever sees it.

use crate::bundler::error::{AssemblyError, Result};
use std::path::{Path, PathBuf};

/// Default `CFBundleShortVersionString`.
pub const DEFAULT_SHORT_VERSION: &str = "1.0.0";

/// Default `CFBundleVersion`.
pub const DEFAULT_BUILD_VERSION: &str = "1";

/// Default destination root for assembled bundles.
pub const DEFAULT_DESTINATION: &str = "dist";

/// Everything needed to assemble one `.app` bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleConfig {
    binary: PathBuf,
    destination: PathBuf,
    app_name: String,
    bundle_identifier: String,
    executable_name: String,
    short_version: String,
    build_version: String,
    ui_element: bool,
    high_resolution: bool,
    icon: Option<PathBuf>,
}

impl BundleConfig {
    /// Starts a new builder.
    pub fn builder() -> BundleConfigBuilder {
        BundleConfigBuilder::new()
    }

    /// Path of the prebuilt executable to package.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// Directory the `.app` bundle is created in.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Display name, also the bundle directory name.
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Reverse-DNS bundle identifier.
    pub fn bundle_identifier(&self) -> &str {
        &self.bundle_identifier
    }

    /// File name of the executable inside `Contents/MacOS`.
    pub fn executable_name(&self) -> &str {
        &self.executable_name
    }

    /// Marketing version (`CFBundleShortVersionString`).
    pub fn short_version(&self) -> &str {
        &self.short_version
    }

    /// Build number (`CFBundleVersion`).
    pub fn build_version(&self) -> &str {
        &self.build_version
    }

    /// Whether the app runs without a Dock icon (`LSUIElement`).
    pub fn ui_element(&self) -> bool {
        self.ui_element
    }

    /// Whether the app opts into Retina rendering (`NSHighResolutionCapable`).
    pub fn high_resolution(&self) -> bool {
        self.high_resolution
    }

    /// Optional icon file copied into `Contents/Resources`.
    pub fn icon(&self) -> Option<&Path> {
        self.icon.as_deref()
    }

    /// Full path of the bundle this config produces.
    pub fn bundle_path(&self) -> PathBuf {
        self.destination.join(format!("{}.app", self.app_name))
    }
}

/// Builder for constructing [`BundleConfig`].
///
/// # Examples
///
/// ```no_run
/// use mac_app_bundler::bundler::BundleConfig;
///
/// # fn example() -> mac_app_bundler::bundler::Result<()> {
/// let config = BundleConfig::builder()
///     .binary("target/release/foldex")
///     .app_name("Foldex")
///     .bundle_identifier("com.khai.foldex")
///     .executable_name("foldex")
///     .ui_element(false)
///     .build()?;
/// assert_eq!(config.short_version(), "1.0.0");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default, Clone)]
pub struct BundleConfigBuilder {
    binary: Option<PathBuf>,
    destination: Option<PathBuf>,
    app_name: Option<String>,
    bundle_identifier: Option<String>,
    executable_name: Option<String>,
    short_version: Option<String>,
    build_version: Option<String>,
    ui_element: Option<bool>,
    high_resolution: Option<bool>,
    icon: Option<PathBuf>,
}

impl BundleConfigBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the source executable.
    ///
    /// # Required
    pub fn binary<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.binary = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the destination root.
    ///
    /// Default: `dist`
    pub fn destination<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.destination = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the display name.
    ///
    /// # Required
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Sets the bundle identifier.
    ///
    /// # Required
    pub fn bundle_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.bundle_identifier = Some(identifier.into());
        self
    }

    /// Sets the executable name inside `Contents/MacOS`.
    ///
    /// # Required
    pub fn executable_name(mut self, name: impl Into<String>) -> Self {
        self.executable_name = Some(name.into());
        self
    }

    /// Sets the marketing version.
    ///
    /// Default: `1.0.0`
    pub fn short_version(mut self, version: impl Into<String>) -> Self {
        self.short_version = Some(version.into());
        self
    }

    /// Sets the build number.
    ///
    /// Default: `1`
    pub fn build_version(mut self, version: impl Into<String>) -> Self {
        self.build_version = Some(version.into());
        self
    }

    /// Sets the background-app flag.
    ///
    /// # Required
    ///
    /// There is no default: hiding an app from the Dock must be an explicit choice.
    pub fn ui_element(mut self, ui_element: bool) -> Self {
        self.ui_element = Some(ui_element);
        self
    }

    /// Sets the high-resolution flag.
    ///
    /// Default: `true`
    pub fn high_resolution(mut self, high_resolution: bool) -> Self {
        self.high_resolution = Some(high_resolution);
        self
    }

    /// Sets the optional icon file.
    pub fn icon<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.icon = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets or clears the optional icon file.
    pub fn icon_opt(mut self, path: Option<PathBuf>) -> Self {
        self.icon = path;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::InvalidConfig`] naming the first missing or
    /// malformed field.
    pub fn build(self) -> Result<BundleConfig> {
        let binary = self
            .binary
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| AssemblyError::invalid_config("binary", "is required"))?;
        let app_name = required("app_name", self.app_name)?;
        let bundle_identifier = required("bundle_identifier", self.bundle_identifier)?;
        let executable_name = required("executable_name", self.executable_name)?;
        let ui_element = self
            .ui_element
            .ok_or_else(|| AssemblyError::invalid_config("ui_element", "must be set explicitly"))?;

        let short_version = self
            .short_version
            .unwrap_or_else(|| DEFAULT_SHORT_VERSION.to_string());
        let build_version = self
            .build_version
            .unwrap_or_else(|| DEFAULT_BUILD_VERSION.to_string());

        validate_file_name("app_name", &app_name)?;
        validate_file_name("executable_name", &executable_name)?;
        validate_bundle_identifier(&bundle_identifier)?;
        if short_version.trim().is_empty() {
            return Err(AssemblyError::invalid_config("short_version", "must not be empty"));
        }
        if build_version.trim().is_empty() {
            return Err(AssemblyError::invalid_config("build_version", "must not be empty"));
        }

        Ok(BundleConfig {
            binary,
            destination: self
                .destination
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DESTINATION)),
            app_name,
            bundle_identifier,
            executable_name,
            short_version,
            build_version,
            ui_element,
            high_resolution: self.high_resolution.unwrap_or(true),
            icon: self.icon.filter(|p| !p.as_os_str().is_empty()),
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(AssemblyError::invalid_config(field, "must not be empty")),
        None => Err(AssemblyError::invalid_config(field, "is required")),
    }
}

/// Names that become a single path component inside the bundle.
fn validate_file_name(field: &'static str, value: &str) -> Result<()> {
    if value.contains('/') || value.contains('\\') {
        return Err(AssemblyError::invalid_config(
            field,
            format!("'{value}' must not contain a path separator"),
        ));
    }
    if value == "." || value == ".." {
        return Err(AssemblyError::invalid_config(
            field,
            format!("'{value}' is not a valid file name"),
        ));
    }
    Ok(())
}

/// Checks that `identifier` is a dot-separated sequence of non-empty tokens.
///
/// Tokens may contain ASCII alphanumerics, `-` and `_`.
pub fn validate_bundle_identifier(identifier: &str) -> Result<()> {
    if identifier.is_empty() {
        return Err(AssemblyError::invalid_config(
            "bundle_identifier",
            "must not be empty",
        ));
    }

    for token in identifier.split('.') {
        if token.is_empty() {
            return Err(AssemblyError::invalid_config(
                "bundle_identifier",
                format!("'{identifier}' contains an empty segment"),
            ));
        }
        if let Some(c) = token
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(AssemblyError::invalid_config(
                "bundle_identifier",
                format!("'{identifier}' contains invalid character '{c}'"),
            ));
        }
    }

    Ok(())
}
