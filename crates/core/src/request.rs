//! Observation requests as discovered in the host compilation.
//!
//! One `Invocation` is one call site of the observe operation. A single-chain
//! request carries one expression argument; an N-ary request carries N
//! arguments plus a `CombinerSignature`.

use crate::error::{Error, Result};
use crate::expr::Expr;
use crate::symbol::{ParamId, TypeId};
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

/// Byte range of a node in its source file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Creates a span.
    #[inline]
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

/// An expression argument written inline as a lambda.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineExpression {
    /// Lambda body text exactly as the host prints it, e.g. `x.Child.Value`
    pub raw_text: String,
    /// The lambda's declared parameter
    pub root_param: ParamId,
    /// The lambda body
    pub body: Expr,
    /// Location of the argument, if known
    pub span: Option<Span>,
}

/// One expression argument of an invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExpressionArgument {
    /// A lambda literal that can be analyzed.
    Inline(InlineExpression),
    /// A reference to an expression built elsewhere (a variable, a call result).
    NotInline { raw_text: String, span: Option<Span> },
}

impl ExpressionArgument {
    /// Creates an inline argument without location.
    pub fn inline(raw_text: impl Into<String>, root_param: ParamId, body: Expr) -> Self {
        ExpressionArgument::Inline(InlineExpression {
            raw_text: raw_text.into(),
            root_param,
            body,
            span: None,
        })
    }

    /// Creates a not-inline argument without location.
    pub fn not_inline(raw_text: impl Into<String>) -> Self {
        ExpressionArgument::NotInline {
            raw_text: raw_text.into(),
            span: None,
        }
    }

    /// Attaches a source location.
    pub fn with_span(mut self, at: Span) -> Self {
        match &mut self {
            ExpressionArgument::Inline(inline) => inline.span = Some(at),
            ExpressionArgument::NotInline { span, .. } => *span = Some(at),
        }
        self
    }

    /// Returns the argument's source text.
    pub fn raw_text(&self) -> &str {
        match self {
            ExpressionArgument::Inline(inline) => &inline.raw_text,
            ExpressionArgument::NotInline { raw_text, .. } => raw_text,
        }
    }

    /// Returns the argument's location.
    pub fn span(&self) -> Option<Span> {
        match self {
            ExpressionArgument::Inline(inline) => inline.span,
            ExpressionArgument::NotInline { span, .. } => *span,
        }
    }
}

/// Type arguments of an N-ary observation's combining function.
///
/// `Func<T1, .., Tn, TResult>` applied to the latest values of N chains
/// rooted at `root_type`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CombinerSignature {
    /// Receiver type the N chains are rooted at
    pub root_type: TypeId,
    /// Result type of each member chain, in argument order
    pub member_types: Vec<TypeId>,
    /// Result type of the combining function
    pub output_type: TypeId,
}

impl CombinerSignature {
    /// Creates a signature.
    pub fn new(root_type: TypeId, member_types: Vec<TypeId>, output_type: TypeId) -> Self {
        Self {
            root_type,
            member_types,
            output_type,
        }
    }

    /// Returns the number of combined chains.
    #[inline]
    pub fn arity(&self) -> usize {
        self.member_types.len()
    }

    /// Returns every type argument: root, members, output.
    pub fn type_arguments(&self) -> impl Iterator<Item = TypeId> + '_ {
        core::iter::once(self.root_type)
            .chain(self.member_types.iter().copied())
            .chain(core::iter::once(self.output_type))
    }
}

/// One call site of the observe operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    /// Display name of the container the invoked method is bound to
    pub container: String,
    /// Receiver type, the root type of every chain in this invocation
    pub root_type: TypeId,
    /// Expression arguments in source order
    pub arguments: Vec<ExpressionArgument>,
    /// Present for N-ary requests
    pub combiner: Option<CombinerSignature>,
}

impl Invocation {
    /// Creates a single-chain request.
    pub fn single(
        container: impl Into<String>,
        root_type: TypeId,
        argument: ExpressionArgument,
    ) -> Self {
        Self {
            container: container.into(),
            root_type,
            arguments: alloc::vec![argument],
            combiner: None,
        }
    }

    /// Creates an N-ary request.
    ///
    /// Fails when fewer than two arguments are given or when the argument
    /// count does not match the combiner's arity.
    pub fn combined(
        container: impl Into<String>,
        arguments: Vec<ExpressionArgument>,
        combiner: CombinerSignature,
    ) -> Result<Self> {
        if arguments.len() < 2 {
            return Err(Error::invalid_request(format!(
                "a combined observation needs at least two expressions, got {}",
                arguments.len()
            )));
        }
        if arguments.len() != combiner.arity() {
            return Err(Error::invalid_request(format!(
                "{} expressions for a combiner of arity {}",
                arguments.len(),
                combiner.arity()
            )));
        }
        Ok(Self {
            container: container.into(),
            root_type: combiner.root_type,
            arguments,
            combiner: Some(combiner),
        })
    }

    /// Returns true for N-ary requests.
    #[inline]
    pub fn is_combined(&self) -> bool {
        self.combiner.is_some()
    }
}
