//! Plan rendering.
//!
//! Each `SurfacePlan` becomes one artifact. Ordinals count artifacts of the
//! same surface kind in plan order, which is already stable.

use crate::config::RenderConfig;
use crate::error::{RenderError, Result};
use crate::template::{RxTemplate, SyntaxTemplate};
use crate::view::{
    AccessorView, ChainView, CombinatorView, ContainerView, HopView, PartialTypeView,
    PositionView, TableView,
};
use crate::writer::SourceWriter;
use alloc::string::String;
use alloc::vec::Vec;
use propwatch_analysis::{
    Chain, CombinatorUnit, DestinationSurface, SurfacePlan, SynthesisPlan, SynthesisUnit,
};
use propwatch_core::{SymbolOracle, TypeId, TypeInfo, Visibility};
use tracing::{debug, trace};

/// Stable identity of an artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ArtifactKey {
    pub root_type: TypeId,
    pub surface: DestinationSurface,
    /// Position among artifacts of the same surface kind
    pub ordinal: usize,
}

/// One generated source file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub key: ArtifactKey,
    pub file_name: String,
    pub source: String,
}

/// The extension container declared with throwing bodies.
///
/// Produced on every run, even when requests were rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StubArtifact {
    pub file_name: String,
    pub source: String,
}

/// Renders synthesis plans through a `SyntaxTemplate`.
pub struct Renderer<'a, O: SymbolOracle + ?Sized, T: SyntaxTemplate = RxTemplate> {
    oracle: &'a O,
    template: T,
    config: RenderConfig,
}

impl<'a, O: SymbolOracle + ?Sized> Renderer<'a, O, RxTemplate> {
    /// Creates a renderer with the default template and configuration.
    pub fn new(oracle: &'a O) -> Self {
        Self::with_config(oracle, RenderConfig::default())
    }

    /// Creates a renderer with the default template.
    pub fn with_config(oracle: &'a O, config: RenderConfig) -> Self {
        Self::with_template(oracle, RxTemplate, config)
    }
}

impl<'a, O: SymbolOracle + ?Sized, T: SyntaxTemplate> Renderer<'a, O, T> {
    /// Creates a renderer with a custom template.
    pub fn with_template(oracle: &'a O, template: T, config: RenderConfig) -> Self {
        Self {
            oracle,
            template,
            config,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Renders the stub container.
    pub fn render_stub(&self) -> StubArtifact {
        let mut w = SourceWriter::new(self.config.indent.as_str());
        self.template.file_prelude(&mut w, &self.config);
        self.template.stub_container(&mut w, &self.config);
        let file_name = self.template.stub_file_name(&self.config);
        trace!(file = %file_name, arity = self.config.stub_arity, "rendered stub");
        StubArtifact {
            file_name,
            source: w.finish(),
        }
    }

    /// Renders every surface of `plan`, in plan order.
    pub fn render(&self, plan: &SynthesisPlan) -> Result<Vec<Artifact>> {
        let mut public = 0;
        let mut injected = 0;
        let mut artifacts = Vec::with_capacity(plan.surfaces.len());

        for surface in &plan.surfaces {
            let counter = match surface.surface {
                DestinationSurface::Public => &mut public,
                DestinationSurface::ScopeInjected => &mut injected,
            };
            let ordinal = *counter;
            *counter += 1;
            artifacts.push(self.render_surface(surface, ordinal)?);
        }

        debug!(
            artifacts = artifacts.len(),
            public, injected, "rendered plan"
        );
        Ok(artifacts)
    }

    /// Renders one surface as the `ordinal`-th artifact of its kind.
    pub fn render_surface(&self, surface: &SurfacePlan, ordinal: usize) -> Result<Artifact> {
        let root = self.info(surface.root_type)?;
        let mut w = SourceWriter::new(self.config.indent.as_str());

        self.template.file_prelude(&mut w, &self.config);
        let container = match surface.surface {
            DestinationSurface::Public => {
                self.template.open_extension_container(&mut w, &self.config);
                None
            }
            DestinationSurface::ScopeInjected => {
                let container = self.container_view(surface.root_type)?;
                self.template.open_partial_type(&mut w, &container);
                Some(container)
            }
        };

        for (i, unit) in surface.units.iter().enumerate() {
            if i > 0 {
                w.blank();
            }
            self.render_unit(&mut w, unit);
        }

        match &container {
            None => self.template.close_extension_container(&mut w),
            Some(container) => self.template.close_partial_type(&mut w, container),
        }

        let file_name =
            self.template
                .artifact_file_name(&self.config, &root.name, surface.surface, ordinal);
        trace!(file = %file_name, units = surface.units.len(), "rendered artifact");

        Ok(Artifact {
            key: ArtifactKey {
                root_type: surface.root_type,
                surface: surface.surface,
                ordinal,
            },
            file_name,
            source: w.finish(),
        })
    }

    fn render_unit(&self, w: &mut SourceWriter, unit: &SynthesisUnit) {
        match unit {
            SynthesisUnit::Direct(direct) => {
                let accessor = self.accessor(
                    direct.access,
                    direct.surface,
                    direct.root_type,
                    direct.result_type,
                );
                let chain = self.chain_view(&direct.chain);
                self.template
                    .single_accessor(w, &self.config, &accessor, &chain);
            }
            SynthesisUnit::Dispatch(dispatch) => {
                let table = TableView {
                    name: dispatch.table_name.clone(),
                    root: self.display(dispatch.root_type),
                    result: self.display(dispatch.result_type),
                    entries: dispatch.entries.iter().map(|c| self.chain_view(c)).collect(),
                };
                self.template.dispatch_table(w, &table);
                w.blank();
                let accessor = self.accessor(
                    dispatch.access,
                    dispatch.surface,
                    dispatch.root_type,
                    dispatch.result_type,
                );
                self.template
                    .dispatch_accessor(w, &self.config, &accessor, &dispatch.table_name);
            }
            SynthesisUnit::Combinator(combinator) => {
                let view = self.combinator_view(combinator);
                self.template.combinator_method(w, &self.config, &view);
            }
        }
    }

    fn info(&self, ty: TypeId) -> Result<&TypeInfo> {
        self.oracle
            .type_info(ty)
            .ok_or_else(|| RenderError::unknown_type(ty))
    }

    fn display(&self, ty: TypeId) -> String {
        self.oracle.type_display(ty)
    }

    fn accessor(
        &self,
        access: Visibility,
        surface: DestinationSurface,
        root: TypeId,
        result: TypeId,
    ) -> AccessorView {
        AccessorView {
            access,
            surface,
            root: self.display(root),
            result: self.display(result),
        }
    }

    /// Resolves a chain's hops to display text.
    pub fn chain_view(&self, chain: &Chain) -> ChainView {
        let mut input = self.display(chain.root_type());
        let hops = chain
            .links()
            .iter()
            .map(|link| {
                let output = self.display(link.result);
                HopView {
                    input: core::mem::replace(&mut input, output.clone()),
                    member: link.name.clone(),
                    output,
                }
            })
            .collect();

        ChainView {
            raw_key: chain.raw_key().into(),
            root: self.display(chain.root_type()),
            result: self.display(chain.result_type()),
            hops,
        }
    }

    fn combinator_view(&self, unit: &CombinatorUnit) -> CombinatorView {
        let signature = &unit.signature;
        let root = self.display(signature.root_type);

        let positions = unit
            .positions
            .iter()
            .enumerate()
            .map(|(i, chains)| match chains.as_slice() {
                [only] => PositionView::Inline(self.chain_view(only)),
                _ => PositionView::Table(TableView {
                    name: unit.position_table_name(i),
                    root: root.clone(),
                    result: signature
                        .member_types
                        .get(i)
                        .map(|ty| self.display(*ty))
                        .unwrap_or_default(),
                    entries: chains.iter().map(|c| self.chain_view(c)).collect(),
                }),
            })
            .collect();

        CombinatorView {
            access: unit.access,
            surface: unit.surface,
            root,
            member_types: signature
                .member_types
                .iter()
                .map(|ty| self.display(*ty))
                .collect(),
            output: self.display(signature.output_type),
            positions,
        }
    }

    /// Resolves the namespace and enclosing types of `root`.
    pub fn container_view(&self, root: TypeId) -> Result<ContainerView> {
        let info = self.info(root)?;
        let target = PartialTypeView {
            name: info.name.clone(),
            access: info.visibility,
        };

        let mut enclosing = Vec::new();
        let mut current = info.containing;
        while let Some(outer) = current {
            let outer_info = self.info(outer)?;
            enclosing.push(PartialTypeView {
                name: outer_info.name.clone(),
                access: outer_info.visibility,
            });
            current = outer_info.containing;
        }
        enclosing.reverse();

        Ok(ContainerView {
            namespace: info.namespace.clone(),
            enclosing,
            target,
        })
    }
}
