//! Services module - the pipeline logic for editing a package.
//!
//! - [`runner`]: Runs one external command and captures its exit status,
//!   stdout and stderr. Success is the exit status; stderr is diagnostics,
//!   never the failure signal (tools are free to warn on stderr).
//!
//! - [`ResourceEditor`]: Sequences the four pipeline stages against the
//!   external toolchain:
//!   decompile -> rename the display name -> rebuild -> sign.
//!   Each stage returns `Result<_, EditError>` and the driver short-circuits
//!   on the first error; nothing inside the services layer terminates the
//!   process.
//!
//! The services are framework-agnostic: no CLI parsing, no interactive
//! prompts, only subprocess execution and file I/O, which keeps them testable
//! against scratch directories.

pub mod editor;
pub mod runner;

pub use editor::{APP_NAME_MARKER, EditError, ResourceEditor};
pub use runner::CommandOutput;
