//! Error types for comparison modes
//!
//! Provides error handling for:
//! - Discovery (no files for a role, unreadable directory)
//! - Configuration loading
//! - Figure rendering
//!
//! Per-file parse failures are not errors here: they are collected as
//! [`SkippedFile`](crate::orchestrator::SkippedFile) entries and the mode
//! carries on with the remaining files.

use crate::role::FileRole;
use rescue_scene::ParseError;
use std::path::PathBuf;

/// Errors from the plotting surface
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Drawing backend failed
    #[error("backend error: {0}")]
    Backend(String),

    /// Output directory could not be prepared
    #[error("io error preparing {path}: {source}")]
    Io {
        /// Output directory
        path: PathBuf,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    /// Wrap any backend error
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Errors that abort a single visualization mode
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// No files matched the role's name pattern
    #[error("no {role} files found")]
    NotFound {
        /// Role with no files
        role: FileRole,
    },

    /// Files were found but none of them parsed
    #[error("none of the {skipped} {role} files could be parsed")]
    NothingParsed {
        /// Role whose files all failed
        role: FileRole,
        /// Number of files skipped
        skipped: usize,
    },

    /// The single file a mode depends on failed to parse
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File that failed
        path: PathBuf,
        /// The underlying error
        #[source]
        source: ParseError,
    },

    /// IO error while scanning the data directory
    #[error("io error reading {path}: {source}")]
    Io {
        /// Directory being scanned
        path: PathBuf,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),

    /// Plotting surface failed
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}

impl CompareError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the mode simply had nothing to show
    #[inline]
    #[must_use]
    pub fn is_empty_selection(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NothingParsed { .. })
    }
}

/// Result type alias for comparison operations
pub type CompareResult<T> = Result<T, CompareError>;
