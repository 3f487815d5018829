//! Error types for the game core.

use std::fmt;
use std::io;

/// Errors raised while building the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// No container is mounted under the requested selector.
    ContainerNotFound {
        /// The selector that failed to resolve.
        selector: String,
    },
    /// The board side length must be at least one cell.
    InvalidBoardSize(u16),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContainerNotFound { selector } => {
                write!(f, "element with selector \"{selector}\" not found on the page")
            }
            Self::InvalidBoardSize(side) => {
                write!(f, "invalid board size: {side} (minimum 1)")
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// Errors raised by a key-value store.
#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    Io(io::Error),
    /// The backing file does not hold a JSON object of strings.
    Json(serde_json::Error),
    /// The store refuses all access.
    Unavailable,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "store I/O error: {e}"),
            Self::Json(e) => write!(f, "store contents are not valid JSON: {e}"),
            Self::Unavailable => write!(f, "store is unavailable"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Unavailable => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
