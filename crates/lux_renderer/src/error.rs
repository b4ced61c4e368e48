//! Render errors.

use lux_core::SceneError;
use thiserror::Error;

/// Anything that stops a render from producing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("Failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Sample {0} produced no result")]
    MissingSample(usize),

    #[error("Sample {0} is outside the render")]
    SampleOutOfRange(usize),

    #[error("Sample {0} was published twice")]
    DuplicateSample(usize),

    #[error("Sample {index} has {got} pixels, expected {expected}")]
    SampleSize {
        index: usize,
        got: usize,
        expected: usize,
    },
}

pub type RenderResult<T> = Result<T, RenderError>;
