//! Error types for memory-card.

use thiserror::Error;

/// Result type alias using CardError.
pub type Result<T> = std::result::Result<T, CardError>;

/// Errors raised by the collaborator-facing parts of the crate.
///
/// Widget operations themselves (`flip`, `flop`, setters) never fail;
/// they degrade and log instead.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("invalid color {value:?}, expected #RRGGBB or #RRGGBBAA")]
    InvalidColor { value: String },

    #[error("invalid card style: {reason}")]
    InvalidStyle { reason: String },

    #[error("unknown view {name:?}")]
    UnknownView { name: String },

    #[error("unknown attribute {attribute:?} for view {view}")]
    UnknownAttribute { view: String, attribute: String },

    #[error("failed to load image {path}: {source}")]
    ImageLoad {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to load font {name:?}: {reason}")]
    FontLoad { name: String, reason: String },
}
