//! Error types for the grassfield core.

use thiserror::Error;

/// Errors produced while parsing inputs or generating a scene.
#[derive(Debug, Error)]
pub enum GrassError {
    /// A color literal did not match the `#rrggbb` pattern.
    #[error("invalid color format: {0}")]
    Format(String),

    /// A parameter violated a generation precondition (zero segments,
    /// non-finite range bounds, reversed clamp bounds).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Width or height was zero when creating a raster surface.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A parameter existed but had the wrong JSON type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// Writing rendered output failed.
    #[error("i/o error: {0}")]
    Io(String),
}
