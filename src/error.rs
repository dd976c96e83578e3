use thiserror::Error;

use crate::types::Position;

/// Errors raised by the engine.
///
/// "Textobject not found" is not an error: searches return `Ok(None)` for
/// it. Everything here means the specification itself cannot be used and is
/// surfaced to the caller without retrying.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid find pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },
    #[error("composed pattern has no elements")]
    EmptyPattern,
    #[error("alternative list at position {position} is empty")]
    EmptyAlternatives { position: usize },
    #[error("balanced pair needs distinct delimiters, got '{0}' twice")]
    SameDelimiters(char),
    #[error("last pattern carries {0} capture marks, expected 0, 2 or 4")]
    CaptureMarks(usize),
    #[error("provider returned malformed region {from:?}..{to:?}")]
    MalformedRegion {
        from: Position,
        to: Option<Position>,
    },
    #[error("finder returned {start}..{end} for search from {init} in text of length {len}")]
    NonProgressing {
        init: usize,
        start: usize,
        end: usize,
        len: usize,
    },
    #[error("no textobject is defined for '{0}'")]
    UnknownTextobject(char),
}

pub type Result<T> = std::result::Result<T, Error>;
