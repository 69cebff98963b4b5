//! Error types for the analysis pass.

use alloc::string::String;
use propwatch_core::{MemberId, Span, TypeId};
use thiserror::Error;

/// Why a single expression could not become a chain.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RejectReason {
    /// The argument references an expression instead of spelling it inline.
    #[error("expression must be an inline lambda")]
    ExpressionNotInline,
    /// The walk ended at something other than the lambda's own parameter.
    #[error("chain must start at the lambda parameter, found {found}")]
    ChainNotRootedAtParameter { found: &'static str },
    /// The walk met a node that is not a property or field access.
    #[error("only property and field access is allowed, found {node}")]
    UnsupportedChainShape { node: &'static str },
    /// The host could not resolve a member.
    #[error("member {member} could not be resolved")]
    UnresolvedMember { member: MemberId },
}

impl RejectReason {
    /// Creates a not-rooted rejection.
    pub fn not_rooted(found: &'static str) -> Self {
        RejectReason::ChainNotRootedAtParameter { found }
    }

    /// Creates an unsupported-shape rejection.
    pub fn unsupported(node: &'static str) -> Self {
        RejectReason::UnsupportedChainShape { node }
    }
}

/// A rejected expression argument.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("`{raw_text}`: {reason}")]
pub struct ExtractionError {
    /// Argument text
    pub raw_text: String,
    /// Argument location
    pub span: Option<Span>,
    /// What went wrong
    pub reason: RejectReason,
}

impl ExtractionError {
    /// Creates an extraction error.
    pub fn new(raw_text: impl Into<String>, span: Option<Span>, reason: RejectReason) -> Self {
        Self {
            raw_text: raw_text.into(),
            span,
            reason,
        }
    }
}

/// A member of an N-ary request failed; the whole combinator is dropped.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("combined expression {position}: {source}")]
pub struct CombinatorMemberError {
    /// Zero-based argument position
    pub position: usize,
    /// The member's own failure
    pub source: ExtractionError,
}

/// Invariant violations inside the pass. Never caused by user input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InternalError {
    /// A chain landed in zero or several groups.
    #[error("chain `{raw_key}` was placed in {groups} groups")]
    AmbiguousGrouping { raw_key: String, groups: usize },
    /// A combined expression's result type disagrees with the combiner's
    /// type argument at its position.
    #[error("combined expression {position} `{raw_key}` yields {found}, combiner expects {expected:?}")]
    MemberTypeMismatch {
        position: usize,
        raw_key: String,
        expected: Option<TypeId>,
        found: TypeId,
    },
}

/// Any error produced while analyzing a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    CombinatorMember(#[from] CombinatorMemberError),
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl AnalysisError {
    /// Returns the underlying extraction failure, if this is one.
    pub fn extraction(&self) -> Option<&ExtractionError> {
        match self {
            AnalysisError::Extraction(err) => Some(err),
            AnalysisError::CombinatorMember(err) => Some(&err.source),
            AnalysisError::Internal(_) => None,
        }
    }
}
