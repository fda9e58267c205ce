// ⚠️ Error types
// Every failure here is recoverable; the caller decides how to report it.

use thiserror::Error;

/// Why a well-formed record was rejected by the agency
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("duplicate movie: {0}")]
    DuplicateMovie(String),

    #[error("sale for unknown movie: {0}")]
    UnknownMovie(String),
}

impl LoadError {
    /// The record name reported back to the user
    pub fn into_name(self) -> String {
        match self {
            LoadError::DuplicateMovie(name) | LoadError::UnknownMovie(name) => name,
        }
    }
}

/// Query target is not a registered talent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("talent not found: {0}")]
    TalentNotFound(String),
}

/// Revenue does not fit in a u128
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RevenueError {
    #[error("revenue overflow for movie: {0}")]
    MovieOverflow(String),

    #[error("revenue overflow for talent: {0}")]
    TalentOverflow(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid export path: {0}")]
    InvalidPath(String),

    #[error(transparent)]
    Revenue(#[from] RevenueError),

    #[error("failed to write export file")]
    Write(#[from] csv::Error),

    #[error("failed to write export file")]
    Io(#[from] std::io::Error),
}
