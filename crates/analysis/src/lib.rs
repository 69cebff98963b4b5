//! Propwatch Analysis - Turns observation requests into a synthesis plan.
//!
//! The pass runs in two phases:
//!
//! 1. every expression argument is extracted into a [`Chain`] and classified
//!    by visibility, collecting failures instead of stopping at the first;
//! 2. if nothing failed, chains are grouped by root and result type and each
//!    group is assigned one [`SynthesisUnit`].
//!
//! # Example
//!
//! ```rust
//! use propwatch_analysis::{AnalysisPass, UnitKind};
//! use propwatch_core::{Expr, ExpressionArgument, Invocation, SymbolTable, TypeDecl, Visibility};
//!
//! let mut symbols = SymbolTable::new();
//! let string = symbols.add_type(TypeDecl::new("string")).unwrap();
//! let host = symbols.add_type(TypeDecl::new("Host")).unwrap();
//! let name = symbols.add_member(host, "Name", string, Visibility::Public).unwrap();
//! let x = symbols.add_param("x", host).unwrap();
//!
//! let body = Expr::param(x).member(name);
//! let request = Invocation::single(
//!     "NotifyPropertyChangedExtensions",
//!     host,
//!     ExpressionArgument::inline("x.Name", x, body),
//! );
//!
//! let outcome = AnalysisPass::new(&symbols, "NotifyPropertyChangedExtensions")
//!     .run(&[request])
//!     .unwrap();
//! let plan = outcome.plan.unwrap();
//! assert_eq!(plan.units().next().unwrap().kind(), UnitKind::Direct);
//! ```

#![no_std]

extern crate alloc;

pub mod chain;
pub mod classify;
pub mod combinator;
pub mod diagnostic;
mod error;
pub mod extract;
pub mod group;
pub mod pass;
pub mod unit;

pub use chain::{Chain, Link};
pub use classify::touches_restricted_scope;
pub use combinator::{CombinatorRequest, CombinatorResolver};
pub use diagnostic::{Diagnostic, DiagnosticCode, Severity};
pub use error::{
    AnalysisError, CombinatorMemberError, ExtractionError, InternalError, RejectReason,
};
pub use extract::{extract, walk};
pub use group::{GroupingEngine, ResultTypeGroup, RootTypeGroup, SurfacePlan, SynthesisPlan};
pub use pass::{AnalysisPass, Collected, PassOutcome, PassStats};
pub use unit::{
    CombinatorUnit, DestinationSurface, DirectUnit, DispatchUnit, SynthesisUnit, UnitKind,
};
