//! File system utilities for bundling.
//!
//! Thin wrappers over `std::fs` that attach the offending path to every
//! error, plus the tree digest used to describe an assembled bundle.

use crate::bundler::error::{AssemblyError, ErrorExt, Result};
use sha2::{Digest, Sha256};
use std::{
    fs,
    io::{self, Read},
    path::Path,
};

/// Creates all of the directories of the specified path.
pub fn create_dir_all(path: &Path, context: &'static str) -> Result<()> {
    fs::create_dir_all(path).fs_context(context, path)
}

/// Removes whatever sits at `path`: a directory tree, a file or a symlink.
///
/// Symlinks are removed themselves and never followed. A missing path is not
/// an error.
pub fn remove_path(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e).fs_context("inspecting previous bundle", path),
    };

    log::debug!("Removing {}", path.display());
    if metadata.is_dir() {
        fs::remove_dir_all(path).fs_context("removing previous bundle", path)
    } else {
        fs::remove_file(path).fs_context("removing previous bundle", path)
    }
}

/// Copies a regular file, creating parent directories of the destination as
/// needed.
///
/// Failures are reported against the destination path; callers check the
/// source before copying.
pub fn copy_file(from: &Path, to: &Path, context: &'static str) -> Result<()> {
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir).fs_context("creating parent directory", dest_dir)?;
    }
    fs::copy(from, to).fs_context(context, to)?;
    Ok(())
}

/// Writes `contents` to `path`, replacing any existing file.
pub fn write_file(path: &Path, contents: &[u8], context: &'static str) -> Result<()> {
    fs::write(path, contents).fs_context(context, path)
}

/// Marks `path` as executable (`rwxr-xr-x`).
///
/// `fs::copy` keeps the source mode on Unix, which may lack the execute bit.
#[cfg(unix)]
pub fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .fs_context("setting executable permissions", path)
}

/// No execute bit to set on this platform.
#[cfg(not(unix))]
pub fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Size and content hash of a directory tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeDigest {
    /// Sum of the sizes of every regular file, in bytes.
    pub size: u64,
    /// Hex-encoded SHA-256 over sorted relative paths and file contents.
    pub sha256: String,
}

/// Hashes every regular file under `dir_path`.
///
/// Each file contributes its relative path and its contents, both prefixed
/// with their length, so renames change the digest and no two trees share a
/// byte stream. Timestamps and permissions are not included.
pub fn directory_digest(dir_path: &Path) -> Result<TreeDigest> {
    let mut entries = Vec::new();
    for entry in walkdir::WalkDir::new(dir_path).follow_links(false) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir_path).to_path_buf();
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
            AssemblyError::IoFailure {
                context: "walking bundle tree",
                path,
                source,
            }
        })?;
        if entry.file_type().is_file() {
            entries.push(entry.into_path());
        }
    }

    // Sort by path for deterministic ordering
    entries.sort();

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];
    let mut size = 0u64;

    for path in entries {
        let rel_path = path.strip_prefix(dir_path).unwrap_or(&path);
        let rel_path = rel_path.to_string_lossy();
        hasher.update((rel_path.len() as u64).to_le_bytes());
        hasher.update(rel_path.as_bytes());

        let mut file = fs::File::open(&path).fs_context("opening file for hashing", &path)?;
        let len = file
            .metadata()
            .fs_context("reading file metadata", &path)?
            .len();
        hasher.update(len.to_le_bytes());
        loop {
            let n = file
                .read(&mut buffer)
                .fs_context("reading file for hash calculation", &path)?;
            if n == 0 {
                break;
            }
            size += n as u64;
            hasher.update(&buffer[..n]);
        }
    }

    Ok(TreeDigest {
        size,
        sha256: format!("{:x}", hasher.finalize()),
    })
}
