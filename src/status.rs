//! Console status lines.
//!
//! Every user-facing message goes through here as an `identifier: value` pair
//! with a level-specific colored glyph:
//!
//! ```text
//! 14:03:21 [#] Command: java -jar apktool.jar d app.apk -f
//! 14:03:40 [$] Status: Package decompiled
//! 14:03:41 [!] Rename: No values replaced!
//! ```
//!
//! Info and success lines go to stdout, error lines to stderr. The formatting
//! itself is pure - [`format_line`] returns the rendered string, the level
//! helpers print it and hand it back for inspection. Diagnostic detail that is
//! not meant for the console belongs in the `tracing` log instead.

use chrono::Local;
use colored::Colorize;
use std::str::FromStr;
use thiserror::Error;

/// Severity of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

/// Returned when a textual level name is not one of `info`, `success`, `error`.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown status level \"{0}\", expected \"info\", \"success\" or \"error\"")]
pub struct ParseLevelError(String);

impl FromStr for StatusLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            other => Err(ParseLevelError(other.to_string())),
        }
    }
}

impl StatusLevel {
    fn glyph(self) -> &'static str {
        match self {
            Self::Info => "#",
            Self::Success => "$",
            Self::Error => "!",
        }
    }
}

/// Render one status line without printing it.
pub fn format_line(level: StatusLevel, identifier: &str, value: &str) -> String {
    let time = Local::now().format("%H:%M:%S");

    match level {
        StatusLevel::Info => format!(
            "{time} [{}] {}: {value}",
            level.glyph().yellow(),
            identifier.yellow()
        ),
        StatusLevel::Success => format!(
            "{time} [{}] {}: {value}",
            level.glyph().green(),
            identifier.green()
        ),
        StatusLevel::Error => format!(
            "{time} [{}] {}: {}",
            level.glyph().red(),
            identifier.red(),
            value.red()
        ),
    }
}

pub fn info(identifier: &str, value: &str) -> String {
    let line = format_line(StatusLevel::Info, identifier, value);
    println!("{line}");
    line
}

pub fn success(identifier: &str, value: &str) -> String {
    let line = format_line(StatusLevel::Success, identifier, value);
    println!("{line}");
    line
}

pub fn error(identifier: &str, value: &str) -> String {
    let line = format_line(StatusLevel::Error, identifier, value);
    eprintln!("{line}");
    line
}
