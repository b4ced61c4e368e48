//! Errors raised while assembling a scene.

use thiserror::Error;

/// A scene that cannot be rendered.
///
/// These are all configuration mistakes and are reported before any ray is
/// traced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    #[error("Invalid primitive #{index}: {reason}")]
    InvalidPrimitive { index: usize, reason: String },

    #[error("Invalid material on primitive #{index}: {reason}")]
    InvalidMaterial { index: usize, reason: String },

    #[error("Invalid light #{index}: {reason}")]
    InvalidLight { index: usize, reason: String },
}

pub type SceneResult<T> = Result<T, SceneError>;
