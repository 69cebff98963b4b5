//! Error types for the generator.

use propwatch_analysis::InternalError;
use propwatch_render::RenderError;
use thiserror::Error;

/// Failures of the generator itself. User errors are diagnostics, not these.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("analysis invariant violated: {0}")]
    Internal(#[from] InternalError),
    #[error("rendering failed: {0}")]
    Render(#[from] RenderError),
}

/// Result type for generator runs.
pub type Result<T> = std::result::Result<T, GeneratorError>;
