//! The generator driver.

use crate::config::GeneratorConfig;
use crate::error::Result;
use propwatch_analysis::{AnalysisPass, Diagnostic, PassStats};
use propwatch_core::{Invocation, SymbolOracle};
use propwatch_render::{Artifact, Renderer, StubArtifact};
use tracing::{debug, instrument};

/// Everything one run produced.
#[derive(Clone, Debug, Default)]
pub struct GeneratorOutput {
    /// Generated files, in stable order
    pub artifacts: Vec<Artifact>,
    /// Throwing declarations of the extension container, emitted on every run
    pub stub: StubArtifact,
    /// Problems with the requests; non-empty means no artifacts
    pub diagnostics: Vec<Diagnostic>,
    pub stats: PassStats,
}

impl GeneratorOutput {
    /// Returns true if every request was accepted.
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Turns a snapshot of observation requests into source artifacts.
#[derive(Clone, Debug, Default)]
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    /// Creates a generator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator with a custom configuration.
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Analyzes `invocations` and renders the result.
    ///
    /// If any request is rejected, no artifacts are produced and every
    /// rejection is returned as a diagnostic.
    #[instrument(level = "debug", skip_all, fields(invocations = invocations.len()))]
    pub fn run<O>(&self, oracle: &O, invocations: &[Invocation]) -> Result<GeneratorOutput>
    where
        O: SymbolOracle + ?Sized,
    {
        let outcome =
            AnalysisPass::new(oracle, self.config.bound_container.as_str()).run(invocations)?;
        let renderer = Renderer::with_config(oracle, self.config.render.clone());
        let stub = renderer.render_stub();

        let Some(plan) = outcome.plan else {
            return Ok(GeneratorOutput {
                artifacts: Vec::new(),
                stub,
                diagnostics: outcome.diagnostics,
                stats: outcome.stats,
            });
        };

        let artifacts = renderer.render(&plan)?;
        debug!(
            units = plan.units().count(),
            artifacts = artifacts.len(),
            "generation finished"
        );

        Ok(GeneratorOutput {
            artifacts,
            stub,
            diagnostics: outcome.diagnostics,
            stats: outcome.stats,
        })
    }
}
