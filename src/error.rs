// Centralized error handling module
// Faults raised by one intake run, plus bad-input errors

use std::fmt;
use std::io;
use std::path::PathBuf;

/// A failure of one intake run.
///
/// Faults never take the process down: the run is abandoned, the fault is
/// logged, and the user can resubmit.
#[derive(Debug)]
pub enum Fault {
    /// The file could not be read into memory
    HashRead { path: PathBuf, source: io::Error },
    /// The hash worker reported an error or went away
    HashCompute { reason: String },
    /// The service answered with a non-2xx status
    HttpStatus { status: u16, reason: String },
    /// The request never produced a response (connect, TLS, timeout, ...)
    Transport { url: String, reason: String },
    /// The response body was not JSON
    Decode { reason: String },
}

/// The four fault families reported to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    HashRead,
    HashCompute,
    Transport,
    Decode,
}

impl Fault {
    pub fn kind(&self) -> FaultKind {
        match self {
            Fault::HashRead { .. } => FaultKind::HashRead,
            Fault::HashCompute { .. } => FaultKind::HashCompute,
            Fault::HttpStatus { .. } | Fault::Transport { .. } => FaultKind::Transport,
            Fault::Decode { .. } => FaultKind::Decode,
        }
    }

    /// One-line description for the status bar.
    pub fn summary(&self) -> String {
        match self {
            Fault::HashRead { path, source } => {
                format!("Cannot read {}: {}", path.display(), source)
            }
            Fault::HashCompute { reason } => format!("Checksum failed: {}", reason),
            Fault::HttpStatus { status, reason } => format!("API error: {} {}", status, reason),
            Fault::Transport { reason, .. } => format!("Service unreachable: {}", reason),
            Fault::Decode { reason } => format!("Unreadable API response: {}", reason),
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Fault::HashRead { path, source } => {
                write!(f, "Error reading file for checksum calculation: {}: {}\n", path.display(), source)?;
                write!(f, "Suggestion: Check that the file still exists and is readable")
            }
            Fault::HashCompute { reason } => {
                write!(f, "Error calculating checksum: {}\n", reason)?;
                write!(f, "Suggestion: Try submitting the file again")
            }
            Fault::HttpStatus { status, reason } => {
                write!(f, "API error: {} {}\n", status, reason)?;
                write!(f, "Suggestion: Check the selected module and the service base URL")
            }
            Fault::Transport { url, reason } => {
                write!(f, "Error sending data to API at {}: {}\n", url, reason)?;
                write!(f, "Suggestion: Check network connectivity and the configured base URL")
            }
            Fault::Decode { reason } => {
                write!(f, "API response is not valid JSON: {}\n", reason)?;
                write!(f, "Suggestion: Check that the base URL points at a validation service")
            }
        }
    }
}

impl std::error::Error for Fault {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Fault::HashRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Bad user input: arguments, config file, selected paths
#[derive(Debug)]
pub enum InputError {
    UnknownModule { module: String },
    InvalidBaseUrl { url: String, reason: String },
    ConfigFile { path: PathBuf, reason: String },
    NotAFile { path: PathBuf },
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InputError::UnknownModule { module } => {
                write!(f, "Unknown validation module: {}\n", module)?;
                write!(f, "Suggestion: Use --list-modules to see available modules (names are case-sensitive)")
            }
            InputError::InvalidBaseUrl { url, reason } => {
                write!(f, "Invalid API base URL '{}': {}\n", url, reason)?;
                write!(f, "Suggestion: Use an absolute http(s) URL, e.g. https://jhove-rs.openpreservation.org/")
            }
            InputError::ConfigFile { path, reason } => {
                write!(f, "Error parsing config {}: {}\n", path.display(), reason)?;
                write!(f, "Suggestion: Check the TOML syntax and field names")
            }
            InputError::NotAFile { path } => {
                write!(f, "Not a regular file: {}\n", path.display())?;
                write!(f, "Suggestion: Select a single file, not a directory")
            }
            InputError::Io { path, source } => {
                write!(f, "I/O error on {}: {}\n", path.display(), source)?;
                write!(f, "Suggestion: Check that the path exists and is readable")
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
