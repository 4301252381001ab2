//! macOS application bundle (.app) creation.

use crate::bundler::{
    AppBundle,
    error::{AssemblyError, Result},
    macos::info_plist::{InfoPlist, PACKAGE_TYPE_APPL},
    settings::BundleConfig,
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Assembles `config` into `<destination>/<app_name>.app`.
///
/// Any bundle already at that path is removed first, so reruns never mix
/// artifacts from different configurations. The source binary is checked
/// before anything is removed.
pub fn assemble(config: &BundleConfig) -> Result<AppBundle> {
    let app_bundle_path = config.bundle_path();

    log::info!(
        "Bundling {}.app at {}",
        config.app_name(),
        app_bundle_path.display()
    );

    let binary = config.binary();
    if !binary.is_file() {
        return Err(AssemblyError::MissingBinary {
            path: binary.to_path_buf(),
        });
    }

    fs::create_dir_all(config.destination(), "creating destination directory")?;

    // Remove old bundle if it exists
    fs::remove_path(&app_bundle_path)?;

    let contents_dir = app_bundle_path.join("Contents");
    let macos_dir = contents_dir.join("MacOS");
    let resources_dir = contents_dir.join("Resources");

    fs::create_dir_all(&macos_dir, "creating MacOS directory")?;
    fs::create_dir_all(&resources_dir, "creating Resources directory")?;

    let executable = copy_binary(binary, &macos_dir, config.executable_name())?;

    let mut info_plist = InfoPlist::for_config(config);
    let icon = match copy_icon(config.icon(), &resources_dir)? {
        Some((icon_path, base_name)) => {
            info_plist = info_plist.with_icon(&base_name);
            Some(icon_path)
        }
        None => None,
    };

    let info_plist_path = contents_dir.join("Info.plist");
    info_plist.write_to(&info_plist_path)?;
    log::debug!("Wrote {}", info_plist_path.display());

    write_pkg_info(&contents_dir)?;

    let digest = fs::directory_digest(&app_bundle_path)?;
    log::info!(
        "Assembled {} ({} bytes, sha256 {})",
        app_bundle_path.display(),
        digest.size,
        digest.sha256
    );

    Ok(AppBundle {
        path: app_bundle_path,
        executable,
        info_plist: info_plist_path,
        icon,
        size: digest.size,
        checksum: digest.sha256,
    })
}

/// Copies the binary into `MacOS/` and sets executable permissions.
fn copy_binary(binary: &Path, macos_dir: &Path, executable_name: &str) -> Result<PathBuf> {
    let dst = macos_dir.join(executable_name);
    fs::copy_file(binary, &dst, "copying binary")?;
    fs::set_executable(&dst)?;
    log::debug!("Copied {} to {}", binary.display(), dst.display());
    Ok(dst)
}

/// Copies the icon into `Resources/` unchanged.
///
/// Returns the copied path and the base name used for the Info.plist keys, or
/// `None` if no icon was configured or the file is missing.
fn copy_icon(icon: Option<&Path>, resources_dir: &Path) -> Result<Option<(PathBuf, String)>> {
    let Some(icon) = icon else {
        return Ok(None);
    };

    if !icon.is_file() {
        log::warn!("Icon {} not found, skipping", icon.display());
        return Ok(None);
    }

    let (Some(file_name), Some(stem)) = (icon.file_name(), icon.file_stem()) else {
        log::warn!("Icon path {} has no file name, skipping", icon.display());
        return Ok(None);
    };

    let dst = resources_dir.join(file_name);
    fs::copy_file(icon, &dst, "copying icon")?;
    log::debug!("Copied icon {} to {}", icon.display(), dst.display());

    Ok(Some((dst, stem.to_string_lossy().into_owned())))
}

/// Writes `Contents/PkgInfo` (package type followed by a wildcard creator code).
fn write_pkg_info(contents_dir: &Path) -> Result<()> {
    let pkg_info = contents_dir.join("PkgInfo");
    let contents = format!("{PACKAGE_TYPE_APPL}????");
    fs::write_file(&pkg_info, contents.as_bytes(), "writing PkgInfo")
}
