//! Bundle command execution.

use crate::bundler::{self, AppBundle, BundleConfig};
use crate::cli::{Args, OutputManager};
use crate::error::{BundlerError, Result};
use std::io;

/// Resolve the configuration, assemble the bundle and report the outcome.
///
/// Configuration and output errors are returned to the caller. Assembly
/// errors are printed here with recovery suggestions and mapped to exit code 1.
pub fn execute_bundle(args: &Args) -> Result<i32> {
    let output = OutputManager::new(args.verbose, args.quiet);
    let config = args.resolve()?;

    describe_config(&output, &config)?;
    output.info(&format!(
        "Assembling {}.app in {}",
        config.app_name(),
        config.destination().display()
    ))?;

    match bundler::assemble(&config) {
        Ok(bundle) => {
            report_bundle(&output, &config, &bundle)?;
            Ok(0)
        }
        Err(e) => {
            let e = BundlerError::from(e);
            output.error(&format!("Bundling failed: {e}"));
            for suggestion in e.recovery_suggestions() {
                output.error_detail(&suggestion);
            }
            Ok(1)
        }
    }
}

fn describe_config(output: &OutputManager, config: &BundleConfig) -> io::Result<()> {
    output.verbose(&format!("binary: {}", config.binary().display()))?;
    output.verbose(&format!("bundle identifier: {}", config.bundle_identifier()))?;
    output.verbose(&format!("executable: {}", config.executable_name()))?;
    output.verbose(&format!(
        "version: {} ({})",
        config.short_version(),
        config.build_version()
    ))?;
    output.verbose(&format!("ui element: {}", config.ui_element()))?;
    output.verbose(&format!("high resolution: {}", config.high_resolution()))?;
    if let Some(icon) = config.icon() {
        output.verbose(&format!("icon: {}", icon.display()))?;
    }
    Ok(())
}

fn report_bundle(output: &OutputManager, config: &BundleConfig, bundle: &AppBundle) -> io::Result<()> {
    if let (Some(icon), None) = (config.icon(), &bundle.icon) {
        output.warn(&format!(
            "Icon {} not found; bundle has no icon",
            icon.display()
        ))?;
    }

    output.success(&format!("Created {}", bundle.path.display()))?;
    output.indent(&format!("executable: {}", bundle.executable.display()))?;
    output.indent(&format!("descriptor: {}", bundle.info_plist.display()))?;
    if let Some(icon) = &bundle.icon {
        output.indent(&format!("icon: {}", icon.display()))?;
    }
    output.indent(&format!("size: {} bytes", bundle.size))?;
    output.indent(&format!("sha256: {}", bundle.checksum))
}
