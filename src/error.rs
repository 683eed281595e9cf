//! Error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building, reading or writing netlists
#[derive(Debug, Error)]
pub enum Error {
    /// Required nodes were not connected when instantiating a template
    #[error("missing nodes for {template}: {}", names.join(", "))]
    MissingNodes {
        /// Name of the template
        template: String,
        /// Missing node names, sorted
        names: Vec<String>,
    },

    /// Required parameters were not given when instantiating a template
    #[error("missing parameters for {template}: {}", names.join(", "))]
    MissingParams {
        /// Name of the template
        template: String,
        /// Missing parameter names, sorted
        names: Vec<String>,
    },

    /// A positional binding does not match the number of declared entries
    #[error("{template} declares {expected} {kind}, got {found}")]
    Arity {
        /// Name of the template
        template: String,
        /// Either "nodes" or "params"
        kind: &'static str,
        /// Number of declared entries
        expected: usize,
        /// Number of supplied values
        found: usize,
    },

    /// A value in a rows file is not a number
    #[error("{}:{line}: invalid number {token:?}", path.display())]
    Parse {
        /// File being read
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Offending token
        token: String,
    },

    /// A row of a rows file has fewer values than required
    #[error("{}:{line}: expected {expected} values, found {found}", path.display())]
    ShortRow {
        /// File being read
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// Number of values required
        expected: usize,
        /// Number of values present
        found: usize,
    },

    /// The resolution of a digital to analog converter is out of range
    #[error("DAC resolution must be between 1 and 63 bits, got {0}")]
    Resolution(u32),

    /// No writer is registered for this file extension
    #[error("unknown netlist format {0:?}")]
    UnknownFormat(String),

    /// The circuit has no output path
    #[error("no output path set for the circuit")]
    NoPath,

    /// File IO failure
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Encoding failure
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
