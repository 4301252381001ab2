use mac_app_bundler::bundler::{
    AssemblyError, BundleConfig, BundleConfigBuilder, ICON_KEYS, MANDATORY_KEYS, assemble,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
    binary: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let binary = dir.path().join("bin/app");
        fs::create_dir_all(binary.parent().unwrap()).unwrap();
        fs::write(&binary, b"\xcf\xfa\xed\xfe fake mach-o").unwrap();
        Self { dir, binary }
    }

    fn dest(&self) -> PathBuf {
        self.dir.path().join("dist")
    }

    fn builder(&self) -> BundleConfigBuilder {
        BundleConfig::builder()
            .binary(&self.binary)
            .destination(self.dest())
            .app_name("Foldex")
            .bundle_identifier("com.khai.foldex")
            .executable_name("foldex")
            .ui_element(false)
    }
}

fn read_plist(path: &Path) -> plist::Dictionary {
    plist::Value::from_file(path)
        .unwrap()
        .into_dictionary()
        .unwrap()
}

fn relative_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = walkdir::WalkDir::new(root)
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
        .collect();
    files.sort();
    files
}

#[test]
fn test_foldex_example_layout() {
    let fx = Fixture::new();
    let config = fx.builder().build().unwrap();

    let bundle = assemble(&config).unwrap();

    let app = fx.dest().join("Foldex.app");
    assert_eq!(bundle.path, app);
    assert_eq!(bundle.executable, app.join("Contents/MacOS/foldex"));
    assert!(app.join("Contents/MacOS/foldex").is_file());
    assert!(app.join("Contents/Resources").is_dir());
    assert_eq!(fs::read_dir(app.join("Contents/Resources")).unwrap().count(), 0);
    assert!(bundle.icon.is_none());

    let dict = read_plist(&app.join("Contents/Info.plist"));
    let get = |k: &str| dict.get(k).and_then(plist::Value::as_string).map(str::to_owned);
    assert_eq!(get("CFBundleName").as_deref(), Some("Foldex"));
    assert_eq!(get("CFBundleIdentifier").as_deref(), Some("com.khai.foldex"));
    assert_eq!(get("CFBundleExecutable").as_deref(), Some("foldex"));
    assert_eq!(get("CFBundlePackageType").as_deref(), Some("APPL"));
    for key in ICON_KEYS {
        assert!(!dict.contains_key(key), "unexpected {key}");
    }

    assert_eq!(
        fs::read(app.join("Contents/PkgInfo")).unwrap(),
        b"APPL????"
    );
}

#[cfg(unix)]
#[test]
fn test_executable_bit_set() {
    use std::os::unix::fs::PermissionsExt;

    let fx = Fixture::new();
    fs::set_permissions(&fx.binary, fs::Permissions::from_mode(0o600)).unwrap();

    let bundle = assemble(&fx.builder().build().unwrap()).unwrap();
    let mode = fs::metadata(&bundle.executable).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
}

#[test]
fn test_descriptor_has_exact_mandatory_keys() {
    let fx = Fixture::new();
    let bundle = assemble(&fx.builder().ui_element(true).build().unwrap()).unwrap();

    let dict = read_plist(&bundle.info_plist);
    let keys: Vec<_> = dict.keys().map(String::as_str).collect();
    assert_eq!(keys, MANDATORY_KEYS);
    assert_eq!(
        dict.get("LSUIElement").and_then(plist::Value::as_boolean),
        Some(true)
    );
    assert_eq!(
        dict.get("NSHighResolutionCapable")
            .and_then(plist::Value::as_boolean),
        Some(true)
    );
}

#[test]
fn test_descriptor_document_header() {
    let fx = Fixture::new();
    let bundle = assemble(&fx.builder().build().unwrap()).unwrap();

    let xml = fs::read_to_string(&bundle.info_plist).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\""));
    assert!(xml.contains("<plist version=\"1.0\">"));
}

#[test]
fn test_icon_copied_and_referenced() {
    let fx = Fixture::new();
    let icon = fx.dir.path().join("assets/AppIcon.icns");
    fs::create_dir_all(icon.parent().unwrap()).unwrap();
    fs::write(&icon, b"icns-bytes").unwrap();

    let bundle = assemble(&fx.builder().icon(&icon).build().unwrap()).unwrap();

    let copied = bundle.path.join("Contents/Resources/AppIcon.icns");
    assert_eq!(bundle.icon.as_deref(), Some(copied.as_path()));
    assert_eq!(fs::read(&copied).unwrap(), b"icns-bytes");

    let dict = read_plist(&bundle.info_plist);
    assert_eq!(dict.len(), MANDATORY_KEYS.len() + ICON_KEYS.len());
    for key in ICON_KEYS {
        assert_eq!(
            dict.get(key).and_then(plist::Value::as_string),
            Some("AppIcon")
        );
    }
}

#[test]
fn test_missing_icon_is_skipped() {
    let fx = Fixture::new();
    let config = fx
        .builder()
        .icon(fx.dir.path().join("assets/missing.icns"))
        .build()
        .unwrap();

    let bundle = assemble(&config).unwrap();

    assert!(bundle.icon.is_none());
    let dict = read_plist(&bundle.info_plist);
    assert_eq!(dict.len(), MANDATORY_KEYS.len());
    for key in ICON_KEYS {
        assert!(!dict.contains_key(key));
    }
    assert_eq!(
        fs::read_dir(bundle.path.join("Contents/Resources"))
            .unwrap()
            .count(),
        0
    );
}

#[test]
fn test_missing_binary_leaves_previous_bundle() {
    let fx = Fixture::new();
    let first = assemble(&fx.builder().build().unwrap()).unwrap();
    let marker = first.path.join("Contents/Resources/marker.txt");
    fs::write(&marker, b"keep me").unwrap();

    let config = fx
        .builder()
        .binary(fx.dir.path().join("bin/missing"))
        .build()
        .unwrap();
    let err = assemble(&config).unwrap_err();

    match err {
        AssemblyError::MissingBinary { path } => {
            assert_eq!(path, fx.dir.path().join("bin/missing"))
        }
        other => panic!("expected MissingBinary, got {other:?}"),
    }
    assert!(marker.is_file());
    assert!(first.executable.is_file());
}

#[test]
fn test_directory_as_binary_is_missing() {
    let fx = Fixture::new();
    let config = fx
        .builder()
        .binary(fx.dir.path().join("bin"))
        .build()
        .unwrap();
    assert!(matches!(
        assemble(&config),
        Err(AssemblyError::MissingBinary { .. })
    ));
    assert!(!fx.dest().join("Foldex.app").exists());
}

#[test]
fn test_rerun_is_idempotent() {
    let fx = Fixture::new();
    let icon = fx.dir.path().join("AppIcon.icns");
    fs::write(&icon, b"icns").unwrap();
    let config = fx.builder().icon(&icon).build().unwrap();

    let first = assemble(&config).unwrap();
    let first_files = relative_files(&first.path);
    let first_plist = fs::read(&first.info_plist).unwrap();

    let second = assemble(&config).unwrap();

    assert_eq!(first.checksum, second.checksum);
    assert_eq!(first.size, second.size);
    assert_eq!(first_files, relative_files(&second.path));
    assert_eq!(first_plist, fs::read(&second.info_plist).unwrap());
}

#[test]
fn test_rerun_replaces_stale_files() {
    let fx = Fixture::new();
    let app = fx.dest().join("Foldex.app");
    fs::create_dir_all(app.join("Contents/MacOS")).unwrap();
    fs::write(app.join("Contents/MacOS/old-binary"), b"old").unwrap();
    fs::write(app.join("stale.txt"), b"stale").unwrap();

    assemble(&fx.builder().build().unwrap()).unwrap();

    assert_eq!(
        relative_files(&app),
        vec![
            PathBuf::from("Contents/Info.plist"),
            PathBuf::from("Contents/MacOS/foldex"),
            PathBuf::from("Contents/PkgInfo"),
        ]
    );
}

#[test]
fn test_different_config_changes_checksum() {
    let fx = Fixture::new();
    let a = assemble(&fx.builder().build().unwrap()).unwrap();
    let b = assemble(&fx.builder().build_version("2").build().unwrap()).unwrap();
    assert_ne!(a.checksum, b.checksum);
}

#[test]
fn test_invalid_bundle_identifier_rejected() {
    let fx = Fixture::new();
    let err = fx.builder().bundle_identifier("com..foldex").build().unwrap_err();
    assert!(matches!(
        err,
        AssemblyError::InvalidConfig {
            field: "bundle_identifier",
            ..
        }
    ));
}

#[test]
fn test_file_at_bundle_path_is_replaced() {
    let fx = Fixture::new();
    fs::create_dir_all(fx.dest()).unwrap();
    let app = fx.dest().join("Foldex.app");
    fs::write(&app, b"not a bundle").unwrap();

    let bundle = assemble(&fx.builder().build().unwrap()).unwrap();

    assert!(app.is_dir());
    assert!(bundle.executable.is_file());
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_at_bundle_path_is_replaced() {
    let fx = Fixture::new();
    fs::create_dir_all(fx.dest()).unwrap();
    let app = fx.dest().join("Foldex.app");
    std::os::unix::fs::symlink(fx.dir.path().join("gone"), &app).unwrap();

    let bundle = assemble(&fx.builder().build().unwrap()).unwrap();

    assert!(!fs::symlink_metadata(&app).unwrap().file_type().is_symlink());
    assert!(bundle.info_plist.is_file());
    assert!(!fx.dir.path().join("gone").exists());
}

#[cfg(unix)]
#[test]
fn test_symlinked_bundle_leaves_target_untouched() {
    let fx = Fixture::new();
    fs::create_dir_all(fx.dest()).unwrap();
    let elsewhere = fx.dir.path().join("elsewhere");
    fs::create_dir_all(&elsewhere).unwrap();
    fs::write(elsewhere.join("keep.txt"), b"keep").unwrap();
    std::os::unix::fs::symlink(&elsewhere, fx.dest().join("Foldex.app")).unwrap();

    assemble(&fx.builder().build().unwrap()).unwrap();

    assert!(elsewhere.join("keep.txt").is_file());
    assert!(!elsewhere.join("Contents").exists());
}

#[test]
fn test_destination_that_is_a_file_fails_with_path() {
    let fx = Fixture::new();
    let dest = fx.dir.path().join("dist-file");
    fs::write(&dest, b"occupied").unwrap();

    let config = fx.builder().destination(&dest).build().unwrap();
    let err = assemble(&config).unwrap_err();

    match err {
        AssemblyError::IoFailure { path, .. } => assert_eq!(path, dest),
        other => panic!("expected IoFailure, got {other:?}"),
    }
    assert_eq!(fs::read(&dest).unwrap(), b"occupied");
}
