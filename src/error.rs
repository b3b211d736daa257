//! Configuration errors.
//!
//! The simulation itself never fails: rejected shots, hyperspace and running
//! out of lives are ordinary state transitions. Errors only come from loading
//! or validating a [`crate::Tuning`].

use std::fmt;

/// Failure while loading or validating a tuning document.
#[derive(Debug)]
pub enum TuningError {
    /// The tuning file could not be read.
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The document is not valid JSON for [`crate::Tuning`].
    Parse(serde_json::Error),
    /// A value is outside the range the simulation can work with.
    Invalid {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable description of the accepted range.
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read tuning file {path}: {source}"),
            Self::Parse(err) => write!(f, "invalid tuning document: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning value `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
