//! Error taxonomy for the scaffolding pipeline.
//!
//! Only [`ScaffoldError::Extraction`] is recoverable, and only at module
//! granularity: the discoverer skips the module with a warning and carries on.
//! Every other variant aborts the running command.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Why extracting methods or registration info for a module failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionFailure {
    /// No `*_grpc.pb.go` file exists for the module
    NoInterfaceFiles {
        /// Directory that was searched
        dir: PathBuf,
    },
    /// Interface files were found but no unary method matched
    NoMethods,
    /// The directory name cannot be turned into a Go package
    InvalidModuleName {
        /// Reason reported by the identifier validator
        reason: String,
    },
    /// The per-module marker file exists but cannot be read
    UnreadableMarker {
        /// Marker file path
        path: PathBuf,
        /// Underlying I/O error text
        message: String,
    },
}

impl fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionFailure::NoInterfaceFiles { dir } => {
                write!(f, "no matching interface files in {}", dir.display())
            }
            ExtractionFailure::NoMethods => write!(f, "no methods found"),
            ExtractionFailure::InvalidModuleName { reason } => {
                write!(f, "invalid module name: {reason}")
            }
            ExtractionFailure::UnreadableMarker { path, message } => {
                write!(f, "cannot read {}: {message}", path.display())
            }
        }
    }
}

/// Errors raised by discovery, extraction, generation and persistence
#[derive(Debug)]
pub enum ScaffoldError {
    /// Project marker missing/unreadable, or module root directory absent
    Discovery {
        /// Human-readable description
        message: String,
        /// Underlying I/O error, if any
        source: Option<io::Error>,
    },
    /// Recoverable per-module failure
    Extraction {
        /// Module the failure belongs to
        module: String,
        /// What went wrong
        failure: ExtractionFailure,
    },
    /// Text synthesis could not proceed (invalid identifier, collision, template error)
    Generation {
        /// Human-readable description
        message: String,
    },
    /// File creation or write failure
    Write {
        /// Target path
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
    /// An external tool could not be started or exited unsuccessfully
    Tool {
        /// The command line that was run
        command: String,
        /// Exit status or spawn error, plus captured stderr
        message: String,
    },
    /// `rpcscaffold.toml` exists but cannot be read or parsed
    Config {
        /// Config file path
        path: PathBuf,
        /// Parser or I/O error text
        message: String,
    },
}

impl ScaffoldError {
    pub(crate) fn discovery(message: impl Into<String>) -> Self {
        ScaffoldError::Discovery {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn discovery_io(message: impl Into<String>, source: io::Error) -> Self {
        ScaffoldError::Discovery {
            message: message.into(),
            source: Some(source),
        }
    }

    pub(crate) fn extraction(module: impl Into<String>, failure: ExtractionFailure) -> Self {
        ScaffoldError::Extraction {
            module: module.into(),
            failure,
        }
    }

    pub(crate) fn generation(message: impl Into<String>) -> Self {
        ScaffoldError::Generation {
            message: message.into(),
        }
    }

    pub(crate) fn write(path: &Path, source: io::Error) -> Self {
        ScaffoldError::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether the failure only affects a single module
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ScaffoldError::Extraction { .. })
    }
}

impl fmt::Display for ScaffoldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaffoldError::Discovery { message, .. } => write!(f, "discovery failed: {message}"),
            ScaffoldError::Extraction { module, failure } => {
                write!(f, "module '{module}': {failure}")
            }
            ScaffoldError::Generation { message } => write!(f, "generation failed: {message}"),
            ScaffoldError::Write { path, source } => {
                write!(f, "failed to write {}: {source}", path.display())
            }
            ScaffoldError::Tool { command, message } => {
                write!(f, "`{command}` failed: {message}")
            }
            ScaffoldError::Config { path, message } => {
                write!(f, "invalid config {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for ScaffoldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScaffoldError::Discovery {
                source: Some(source),
                ..
            } => Some(source),
            ScaffoldError::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<askama::Error> for ScaffoldError {
    fn from(err: askama::Error) -> Self {
        ScaffoldError::generation(format!("template rendering failed: {err}"))
    }
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_extraction_is_recoverable() {
        let extraction = ScaffoldError::extraction("course", ExtractionFailure::NoMethods);
        assert!(extraction.is_recoverable());
        assert!(!ScaffoldError::discovery("go.mod missing").is_recoverable());
        assert!(!ScaffoldError::generation("bad").is_recoverable());
        let write = ScaffoldError::write(Path::new("x.go"), io::Error::other("disk full"));
        assert!(!write.is_recoverable());
    }

    #[test]
    fn test_display_messages() {
        let err = ScaffoldError::extraction("course", ExtractionFailure::NoMethods);
        assert_eq!(err.to_string(), "module 'course': no methods found");

        let err = ScaffoldError::write(Path::new("app/rpc/server.go"), io::Error::other("denied"));
        assert_eq!(err.to_string(), "failed to write app/rpc/server.go: denied");
    }

    #[test]
    fn test_write_error_exposes_source() {
        use std::error::Error as _;
        let err = ScaffoldError::write(Path::new("a.go"), io::Error::other("boom"));
        assert!(err.source().is_some());
        assert!(ScaffoldError::generation("x").source().is_none());
    }
}
