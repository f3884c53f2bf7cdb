// apkrename - rename an Android app's display name inside its resources,
// then rebuild and resign the package.
//
// This is the library crate containing the pipeline logic and data structures.
// The binary crate (main.rs) provides the CLI entry point.

pub mod cli;
pub mod logging;
pub mod models;
pub mod services;
pub mod status;

// Re-export commonly used types for convenience
pub use models::{PackageSession, Toolchain};
pub use services::{EditError, ResourceEditor};
pub use status::StatusLevel;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
