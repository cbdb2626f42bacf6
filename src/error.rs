//! Error types for host-side phasor set management and configuration parsing.
//!
//! The geometry and drawing code never fails: out-of-range parameters simply
//! produce degenerate pictures.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhasorError {
    /// Adding would exceed the maximum set size.
    #[error("phasor set is full ({max} phasors)")]
    SetFull { max: usize },

    /// Removing would leave the set empty.
    #[error("cannot remove the last phasor")]
    LastPhasor,

    #[error("no phasor named '{0}'")]
    NotFound(String),

    #[error("a phasor named '{0}' already exists")]
    DuplicateName(String),

    #[error("phasor name cannot be empty")]
    EmptyName,

    /// A set was built from too few or too many records.
    #[error("phasor set must hold between {min} and {max} phasors, got {count}")]
    InvalidCount { count: usize, min: usize, max: usize },

    #[error("invalid color '{0}', expected #rgb or #rrggbb")]
    InvalidColor(String),

    /// A `name:amplitude:frequency:phase[:color]` spec did not parse.
    #[error("invalid phasor spec '{spec}': {reason}")]
    InvalidSpec { spec: String, reason: String },
}

impl PhasorError {
    pub fn invalid_spec(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            spec: spec.into(),
            reason: reason.into(),
        }
    }
}
