//! The two-phase analysis pass.
//!
//! Phase 1 turns every expression argument of every invocation into a
//! `Result` without deciding anything. Phase 2 (grouping and combinator
//! resolution) runs only when phase 1 produced no error at all; otherwise the
//! pass plans nothing and returns the collected diagnostics.

use crate::chain::Chain;
use crate::combinator::{CombinatorRequest, CombinatorResolver};
use crate::diagnostic::Diagnostic;
use crate::error::{
    AnalysisError, CombinatorMemberError, ExtractionError, InternalError, RejectReason,
};
use crate::extract::extract;
use crate::group::{GroupingEngine, SynthesisPlan};
use alloc::string::String;
use alloc::vec::Vec;
use propwatch_core::{CombinerSignature, ExpressionArgument, Invocation, SymbolOracle, TypeId};
use tracing::{debug, warn};

/// Counters reported by a pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Invocations handed to the pass
    pub invocations: usize,
    /// Invocations bound to another container
    pub skipped: usize,
    /// Expression arguments that became chains
    pub accepted: usize,
    /// Expression arguments that were rejected
    pub rejected: usize,
}

/// Output of phase 1.
#[derive(Clone, Debug, Default)]
pub struct Collected {
    /// Chains taking part in single-chain grouping
    pub singles: Vec<Chain>,
    /// Fully extracted N-ary requests
    pub combinators: Vec<CombinatorRequest>,
    pub errors: Vec<AnalysisError>,
    pub stats: PassStats,
}

impl Collected {
    /// Returns true if phase 2 may run.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Result of a full pass.
#[derive(Clone, Debug, Default)]
pub struct PassOutcome {
    /// `None` when the validity gate tripped
    pub plan: Option<SynthesisPlan>,
    pub diagnostics: Vec<Diagnostic>,
    pub stats: PassStats,
}

impl PassOutcome {
    /// Returns true if a plan was produced.
    pub fn is_valid(&self) -> bool {
        self.plan.is_some()
    }
}

/// Runs extraction, classification and grouping over one snapshot.
pub struct AnalysisPass<'a, O: SymbolOracle + ?Sized> {
    oracle: &'a O,
    bound_container: String,
}

impl<'a, O: SymbolOracle + ?Sized> AnalysisPass<'a, O> {
    /// Creates a pass that analyzes invocations bound to `bound_container`.
    pub fn new(oracle: &'a O, bound_container: impl Into<String>) -> Self {
        Self {
            oracle,
            bound_container: bound_container.into(),
        }
    }

    /// Returns the container name invocations must be bound to.
    pub fn bound_container(&self) -> &str {
        &self.bound_container
    }

    fn extract_argument(
        &self,
        root_type: TypeId,
        argument: &ExpressionArgument,
    ) -> Result<Chain, ExtractionError> {
        match argument {
            ExpressionArgument::NotInline { raw_text, span } => Err(ExtractionError::new(
                raw_text.as_str(),
                *span,
                RejectReason::ExpressionNotInline,
            )),
            ExpressionArgument::Inline(inline) => extract(
                inline.root_param,
                root_type,
                &inline.raw_text,
                &inline.body,
                self.oracle,
            )
            .map_err(|reason| {
                ExtractionError::new(inline.raw_text.as_str(), inline.span, reason)
            }),
        }
    }

    fn collect_combined(
        &self,
        invocation: &Invocation,
        signature: &CombinerSignature,
        out: &mut Collected,
    ) {
        let mut members = Vec::with_capacity(invocation.arguments.len());
        let mut failed = false;

        for (position, argument) in invocation.arguments.iter().enumerate() {
            match self.extract_argument(signature.root_type, argument) {
                Ok(chain) => {
                    out.stats.accepted += 1;
                    let expected = signature.member_types.get(position).copied();
                    if expected != Some(chain.result_type()) {
                        failed = true;
                        out.errors.push(
                            InternalError::MemberTypeMismatch {
                                position,
                                raw_key: chain.raw_key().into(),
                                expected,
                                found: chain.result_type(),
                            }
                            .into(),
                        );
                    }
                    members.push(chain);
                }
                Err(source) => {
                    out.stats.rejected += 1;
                    failed = true;
                    out.errors
                        .push(CombinatorMemberError { position, source }.into());
                }
            }
        }

        if failed {
            return;
        }

        let request = CombinatorRequest::new(signature.clone(), members);
        if !request.is_restricted_only() {
            out.singles.extend(request.members.iter().cloned());
        }
        out.combinators.push(request);
    }

    /// Phase 1: extracts every argument, collecting chains and errors.
    pub fn collect(&self, invocations: &[Invocation]) -> Collected {
        let mut out = Collected::default();
        out.stats.invocations = invocations.len();

        for invocation in invocations {
            if invocation.container != self.bound_container {
                warn!(
                    container = %invocation.container,
                    expected = %self.bound_container,
                    "skipping invocation bound to another container"
                );
                out.stats.skipped += 1;
                continue;
            }

            match &invocation.combiner {
                Some(signature) => self.collect_combined(invocation, signature, &mut out),
                None => {
                    for argument in &invocation.arguments {
                        match self.extract_argument(invocation.root_type, argument) {
                            Ok(chain) => {
                                out.stats.accepted += 1;
                                out.singles.push(chain);
                            }
                            Err(err) => {
                                out.stats.rejected += 1;
                                out.errors.push(err.into());
                            }
                        }
                    }
                }
            }
        }

        debug!(
            invocations = out.stats.invocations,
            skipped = out.stats.skipped,
            accepted = out.stats.accepted,
            rejected = out.stats.rejected,
            "collected requests"
        );
        out
    }

    /// Phase 2: plans units from a valid phase-1 result.
    pub fn plan(&self, collected: Collected) -> Result<SynthesisPlan, InternalError> {
        let units = CombinatorResolver::new(self.oracle).resolve(collected.combinators);
        GroupingEngine::new(self.oracle).plan(collected.singles, units)
    }

    /// Runs both phases.
    ///
    /// Only invariant violations are returned as `Err`, among them a combined
    /// expression whose result type disagrees with its combiner signature.
    /// User errors are reported through `PassOutcome::diagnostics`.
    pub fn run(&self, invocations: &[Invocation]) -> Result<PassOutcome, InternalError> {
        let collected = self.collect(invocations);
        let stats = collected.stats;

        let internal = collected.errors.iter().find_map(|err| match err {
            AnalysisError::Internal(internal) => Some(internal.clone()),
            _ => None,
        });
        if let Some(err) = internal {
            warn!(error = %err, "host data violates a pass invariant");
            return Err(err);
        }

        if !collected.is_valid() {
            let diagnostics: Vec<Diagnostic> = collected
                .errors
                .iter()
                .filter_map(Diagnostic::from_error)
                .collect();
            warn!(
                errors = collected.errors.len(),
                "pass is invalid, nothing will be generated"
            );
            return Ok(PassOutcome {
                plan: None,
                diagnostics,
                stats,
            });
        }

        let plan = self.plan(collected)?;
        Ok(PassOutcome {
            plan: Some(plan),
            diagnostics: Vec::new(),
            stats,
        })
    }
}
