//! Error types for scene parsing
//!
//! A parse error is always local to one file. Callers decide whether to
//! skip the file or surface the error.

use std::path::PathBuf;

/// Errors while turning a snapshot file into a [`Scene`](crate::Scene)
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File that could not be read
        path: PathBuf,
        /// The underlying error
        #[source]
        source: std::io::Error,
    },

    /// Block header declared more records than lines remain
    #[error(
        "truncated {block} block at line {line_number}: \
         declared {declared} records, {available} lines remain"
    )]
    Truncated {
        /// Header tag of the block
        block: &'static str,
        /// 1-based line of the header
        line_number: usize,
        /// Record count the header declared
        declared: usize,
        /// Lines left after the header
        available: usize,
    },

    /// Token could not be converted to the expected number, or wrong arity
    #[error("malformed line {line_number}: '{raw_text}'")]
    Malformed {
        /// 1-based line number
        line_number: usize,
        /// The line as read
        raw_text: String,
    },
}

impl ParseError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create malformed-line error (1-based line number)
    pub fn malformed(line_number: usize, raw_text: impl Into<String>) -> Self {
        Self::Malformed {
            line_number,
            raw_text: raw_text.into(),
        }
    }

    /// Line the error points at, if any
    #[inline]
    #[must_use]
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Self::Io { .. } => None,
            Self::Truncated { line_number, .. } | Self::Malformed { line_number, .. } => {
                Some(*line_number)
            }
        }
    }
}

/// Result type alias for parse operations
pub type ParseResult<T> = Result<T, ParseError>;
