//! Info.plist generation.
//!
//! [`InfoPlist`] accumulates keys in a fixed order and serializes the whole
//! document once, so a failure part-way through never leaves a truncated
//! descriptor on disk.

use crate::bundler::{
    error::Result,
    settings::BundleConfig,
    utils::fs,
};
use plist::{Dictionary, Value};
use std::path::Path;

/// `CFBundlePackageType` for applications.
pub const PACKAGE_TYPE_APPL: &str = "APPL";

/// Keys present in every generated descriptor, in emission order.
pub const MANDATORY_KEYS: [&str; 8] = [
    "CFBundleName",
    "CFBundleIdentifier",
    "CFBundleShortVersionString",
    "CFBundleVersion",
    "CFBundleExecutable",
    "CFBundlePackageType",
    "LSUIElement",
    "NSHighResolutionCapable",
];

/// Keys added only when an icon was copied into `Resources/`.
pub const ICON_KEYS: [&str; 2] = ["CFBundleIconFile", "CFBundleIconName"];

/// Ordered key/value builder for a bundle's `Info.plist`.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoPlist {
    dict: Dictionary,
}

impl InfoPlist {
    /// Descriptor with the mandatory key set for `config`.
    pub fn for_config(config: &BundleConfig) -> Self {
        let mut dict = Dictionary::new();

        dict.insert("CFBundleName".into(), config.app_name().into());
        dict.insert(
            "CFBundleIdentifier".into(),
            config.bundle_identifier().into(),
        );
        dict.insert(
            "CFBundleShortVersionString".into(),
            config.short_version().into(),
        );
        dict.insert("CFBundleVersion".into(), config.build_version().into());
        dict.insert(
            "CFBundleExecutable".into(),
            config.executable_name().into(),
        );
        dict.insert("CFBundlePackageType".into(), PACKAGE_TYPE_APPL.into());
        dict.insert("LSUIElement".into(), config.ui_element().into());
        dict.insert(
            "NSHighResolutionCapable".into(),
            config.high_resolution().into(),
        );

        Self { dict }
    }

    /// Adds the icon references.
    ///
    /// `base_name` is the icon file name without its extension; both keys
    /// point at it so the system resolves either the `.icns` or an asset
    /// catalog entry of the same name.
    pub fn with_icon(mut self, base_name: &str) -> Self {
        self.dict.insert("CFBundleIconFile".into(), base_name.into());
        self.dict.insert("CFBundleIconName".into(), base_name.into());
        self
    }

    /// Key names in emission order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.dict.keys().map(String::as_str)
    }

    #[cfg(test)]
    fn get(&self, key: &str) -> Option<&Value> {
        self.dict.get(key)
    }

    /// Serializes the descriptor as an XML property list.
    ///
    /// The output carries the XML declaration, the Apple DOCTYPE and a single
    /// root `<dict>`; identical input gives identical bytes.
    pub fn to_xml_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        Value::Dictionary(self.dict.clone()).to_writer_xml(&mut buffer)?;
        Ok(buffer)
    }

    /// Writes the descriptor to `path`.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let bytes = self.to_xml_bytes()?;
        fs::write_file(path, &bytes, "writing Info.plist")
    }
}
