//! Data models for the rename pipeline.
//!
//! - [`PackageSession`]: Paths of one in-flight edit - the input APK, its
//!   decompiled tree, the resource files inside it, and the most recently
//!   produced artifact. Created only by a successful decompile and owned by a
//!   single pipeline run.
//! - [`Toolchain`]: Locations of the two external jars (apktool, apksigner)
//!   with flag-or-default resolution.

pub mod session;
pub mod toolchain;

pub use session::PackageSession;
pub use toolchain::Toolchain;
