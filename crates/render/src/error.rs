//! Error types for rendering.

use propwatch_core::TypeId;
use thiserror::Error;

/// Errors raised while rendering a plan.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A type referenced by the plan has no declaration data.
    #[error("type {ty} has no declaration data")]
    UnknownType { ty: TypeId },
}

impl RenderError {
    /// Creates an unknown-type error.
    pub fn unknown_type(ty: TypeId) -> Self {
        RenderError::UnknownType { ty }
    }
}

/// Result type for rendering.
pub type Result<T> = core::result::Result<T, RenderError>;
