//! mac_app_bundler - package a prebuilt executable as a macOS .app bundle.
//!
//! Exit code 0 on success, 1 on any fatal error.

use mac_app_bundler::cli;
use mac_app_bundler::cli::OutputManager;
use std::process;

fn main() {
    env_logger::init();

    match cli::run() {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            // Never quiet for fatal errors
            let output = OutputManager::new(false, false);
            output.error(&format!("Fatal error: {e}"));

            for suggestion in e.recovery_suggestions() {
                output.error_detail(&suggestion);
            }

            process::exit(1);
        }
    }
}
