//! Error taxonomy of the transmittance engine.
use thiserror::Error;

/// Errors surfaced by aperture construction and overlap evaluation.
///
/// Both variants are input errors: nothing in the engine retries or recovers from them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApertureError {
    /// Unrecognized aperture kind.
    #[error("Unsupported aperture kind: {0}")]
    InvalidShapeKind(String),

    /// Non-positive dimension, degenerate triangle or zero-size raster shape.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, ApertureError>;
