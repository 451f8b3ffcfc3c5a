//! Error taxonomy for content loading and rendering

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or rendering blog content.
///
/// All variants are caught at the request boundary (listing or detail
/// generation) and converted to an empty result or a localized message;
/// none propagate to the output layer as a hard failure.
#[derive(Debug, Error)]
pub enum BlogError {
    /// The posts directory is unreadable or contains no records
    #[error("failed to load content from {path:?}: {reason}")]
    ContentLoad { path: PathBuf, reason: String },

    /// A record is missing a required front-matter key
    #[error("invalid record {slug:?}: missing required key `{missing}`")]
    InvalidRecord { slug: String, missing: &'static str },

    /// No file exists for the requested slug
    #[error("no post found for slug {0:?}")]
    ContentNotFound(String),

    /// The rendered fragment could not be parsed back into a node tree
    #[error("failed to parse rendered markup: {0}")]
    MarkupParse(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BlogError>;
