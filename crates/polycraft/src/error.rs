//! Error types for reading segments and running a decomposition.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

use crate::geom::Point;

/// Malformed or unreadable coordinate input. Never recovered inside the crate.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: expected 4 coordinates, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: invalid coordinate {token:?}: {source}")]
    BadNumber {
        line: usize,
        token: String,
        #[source]
        source: ParseIntError,
    },

    /// A record error inside a named file.
    #[error("{}: {source}", .path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<InputError>,
    },
}

impl InputError {
    /// 1-based line of a record error, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            InputError::FieldCount { line, .. } | InputError::BadNumber { line, .. } => Some(*line),
            InputError::InFile { source, .. } => source.line(),
            InputError::Io { .. } => None,
        }
    }
}

/// The registry and the pool disagree. Each variant is an invariant violation;
/// the engine stops instead of returning a truncated result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecomposeError {
    #[error("no unconsumed edge continues from {point} (remaining uses {remaining})")]
    Stuck { point: Point, remaining: u32 },

    #[error("edge {edge} has endpoint {point} that is not in the vertex registry")]
    UnregisteredEndpoint { edge: usize, point: Point },

    #[error("vertex {point} was spent with no remaining uses")]
    Overspent { point: Point },
}
