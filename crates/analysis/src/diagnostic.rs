//! User-facing diagnostics.

use crate::error::{AnalysisError, ExtractionError, RejectReason};
use alloc::string::{String, ToString};
use core::fmt;
use propwatch_core::Span;

/// Stable diagnostic identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticCode {
    /// PW0001
    ExpressionNotInline,
    /// PW0002
    ChainNotRootedAtParameter,
    /// PW0003
    UnsupportedChainShape,
    /// PW0004
    UnresolvedMember,
}

impl DiagnosticCode {
    /// Returns the code's textual id.
    pub fn id(self) -> &'static str {
        match self {
            DiagnosticCode::ExpressionNotInline => "PW0001",
            DiagnosticCode::ChainNotRootedAtParameter => "PW0002",
            DiagnosticCode::UnsupportedChainShape => "PW0003",
            DiagnosticCode::UnresolvedMember => "PW0004",
        }
    }

    /// Returns the code's default severity.
    pub fn severity(self) -> Severity {
        match self {
            DiagnosticCode::UnresolvedMember => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl From<&RejectReason> for DiagnosticCode {
    fn from(reason: &RejectReason) -> Self {
        match reason {
            RejectReason::ExpressionNotInline => DiagnosticCode::ExpressionNotInline,
            RejectReason::ChainNotRootedAtParameter { .. } => {
                DiagnosticCode::ChainNotRootedAtParameter
            }
            RejectReason::UnsupportedChainShape { .. } => DiagnosticCode::UnsupportedChainShape,
            RejectReason::UnresolvedMember { .. } => DiagnosticCode::UnresolvedMember,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
}

/// One reported problem with a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub message: String,
    /// Offending argument text
    pub raw_text: String,
    pub span: Option<Span>,
    /// Argument position inside a combined request
    pub position: Option<usize>,
}

impl Diagnostic {
    /// Builds a diagnostic from an extraction failure.
    pub fn from_extraction(err: &ExtractionError, position: Option<usize>) -> Self {
        let code = DiagnosticCode::from(&err.reason);
        Self {
            code,
            severity: code.severity(),
            message: err.reason.to_string(),
            raw_text: err.raw_text.clone(),
            span: err.span,
            position,
        }
    }

    /// Builds a diagnostic from an analysis error.
    ///
    /// Internal errors are not user diagnostics and yield `None`.
    pub fn from_error(err: &AnalysisError) -> Option<Self> {
        match err {
            AnalysisError::Extraction(e) => Some(Self::from_extraction(e, None)),
            AnalysisError::CombinatorMember(e) => {
                Some(Self::from_extraction(&e.source, Some(e.position)))
            }
            AnalysisError::Internal(_) => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} (`{}`)", self.code, self.message, self.raw_text)
    }
}
