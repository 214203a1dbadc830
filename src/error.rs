//! Error types for the renderer

use thiserror::Error;

/// Result type for render operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Renderer errors
///
/// A fatal error discards the in-progress document; the transform is pure,
/// so the same input always fails the same way.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("unexpected node kind at type position: {kind}")]
    UnexpectedNode { kind: &'static str },

    #[error("unexpected node kind at statement position: {kind}")]
    UnexpectedStatement { kind: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
