//! macOS application bundle support.
//!
//! # Layout
//!
//! ```text
//! <AppName>.app/
//! └── Contents/
//!     ├── Info.plist
//!     ├── PkgInfo
//!     ├── MacOS/<executable>
//!     └── Resources/[icon]
//! ```
//!
//! - [`app`] assembles the directory tree.
//! - [`info_plist`] builds the descriptor document.

pub mod app;
pub mod info_plist;
