//! Request grouping.
//!
//! Validated chains are split by their own restricted flag first, then
//! partitioned by root type and by result type. Each result group becomes one
//! synthesis unit:
//!
//! ```text
//! public   Host ─┬─ string ── { x.Name }              => Direct
//!                └─ int ───── { x.Age, x.Child.Age }  => Dispatch (__generatedHostIntMap)
//! injected Host ─── string ── { x.Secret }            => Direct
//! ```
//!
//! A public chain never shares a unit with a restricted one.
//!
//! All maps are ordered by display name first and handle second, so output
//! never depends on the order chains were discovered in.

use crate::chain::Chain;
use crate::error::InternalError;
use crate::unit::{
    CombinatorUnit, DestinationSurface, DirectUnit, DispatchUnit, SynthesisUnit, UnitKind,
};
use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use propwatch_core::{SymbolOracle, TypeId, Visibility};
use tracing::{debug, trace};

/// Sort key for a type: display name, then handle.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct TypeKey {
    display: String,
    id: TypeId,
}

impl TypeKey {
    pub(crate) fn of<O: SymbolOracle + ?Sized>(oracle: &O, id: TypeId) -> Self {
        Self {
            display: oracle.type_display(id),
            id,
        }
    }
}

/// Returns the flattened identifier fragment of a type.
pub(crate) fn variable_name<O: SymbolOracle + ?Sized>(oracle: &O, id: TypeId) -> String {
    oracle
        .type_info(id)
        .map(|info| info.variable_name())
        .unwrap_or_else(|| id.to_string())
}

/// Returns a type's declared visibility, treating unknown types as public.
pub(crate) fn visibility_of<O: SymbolOracle + ?Sized>(oracle: &O, id: TypeId) -> Visibility {
    oracle.type_visibility(id).unwrap_or_default()
}

/// Chains of one root type sharing a result type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultTypeGroup {
    pub result_type: TypeId,
    /// Distinct chains, ordered by raw key
    pub chains: Vec<Chain>,
}

impl ResultTypeGroup {
    /// Returns the number of distinct raw keys.
    #[inline]
    pub fn distinct_keys(&self) -> usize {
        self.chains.len()
    }

    /// Returns the unit shape this group renders as.
    pub fn unit_kind(&self) -> UnitKind {
        if self.distinct_keys() == 1 {
            UnitKind::Direct
        } else {
            UnitKind::Dispatch
        }
    }

}

/// Chains sharing a root type and a destination surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RootTypeGroup {
    pub root_type: TypeId,
    /// `ScopeInjected` exactly when every chain here touches restricted scope
    pub surface: DestinationSurface,
    /// Result groups, ordered by result type
    pub result_groups: Vec<ResultTypeGroup>,
}

impl RootTypeGroup {
    /// Returns the total number of chains in this group.
    pub fn chain_count(&self) -> usize {
        self.result_groups.iter().map(|g| g.chains.len()).sum()
    }
}

/// Units destined for one generated artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SurfacePlan {
    pub root_type: TypeId,
    pub surface: DestinationSurface,
    /// Single-chain units in result-type order, then combinators
    pub units: Vec<SynthesisUnit>,
}

/// Everything phase 2 decided, ready for rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SynthesisPlan {
    pub root_groups: Vec<RootTypeGroup>,
    /// Ordered by root type, then `Public` before `ScopeInjected`
    pub surfaces: Vec<SurfacePlan>,
}

impl SynthesisPlan {
    /// Returns every unit in rendering order.
    pub fn units(&self) -> impl Iterator<Item = &SynthesisUnit> + '_ {
        self.surfaces.iter().flat_map(|s| s.units.iter())
    }

    /// Returns true if nothing needs to be generated.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

/// Partitions chains and chooses a code shape per partition.
pub struct GroupingEngine<'a, O: SymbolOracle + ?Sized> {
    oracle: &'a O,
}

impl<'a, O: SymbolOracle + ?Sized> GroupingEngine<'a, O> {
    /// Creates a grouping engine.
    pub fn new(oracle: &'a O) -> Self {
        Self { oracle }
    }

    /// Partitions chains into root groups and result groups.
    ///
    /// Chains are split by surface before grouping, so the surface of a
    /// chain depends on its own restricted flag only. Chains with the same
    /// root type and raw key collapse to one.
    pub fn partition<I>(&self, chains: I) -> Result<Vec<RootTypeGroup>, InternalError>
    where
        I: IntoIterator<Item = Chain>,
    {
        let mut tree: BTreeMap<
            (TypeKey, DestinationSurface),
            BTreeMap<TypeKey, BTreeMap<String, Chain>>,
        > = BTreeMap::new();

        for chain in chains {
            let root = TypeKey::of(self.oracle, chain.root_type());
            let surface = DestinationSurface::for_restricted(chain.touches_restricted_scope());
            let result = TypeKey::of(self.oracle, chain.result_type());
            tree.entry((root, surface))
                .or_default()
                .entry(result)
                .or_default()
                .entry(chain.raw_key().to_string())
                .or_insert(chain);
        }

        let groups: Vec<RootTypeGroup> = tree
            .into_iter()
            .map(|((root, surface), results)| RootTypeGroup {
                root_type: root.id,
                surface,
                result_groups: results
                    .into_iter()
                    .map(|(result, chains)| ResultTypeGroup {
                        result_type: result.id,
                        chains: chains.into_values().collect(),
                    })
                    .collect(),
            })
            .collect();

        Self::check_placement(&groups)?;
        Ok(groups)
    }

    /// Every (root, raw key) identity must sit in exactly one result group.
    fn check_placement(groups: &[RootTypeGroup]) -> Result<(), InternalError> {
        let mut placements: BTreeMap<(TypeId, &str), usize> = BTreeMap::new();
        for group in groups {
            for result in &group.result_groups {
                for chain in &result.chains {
                    *placements
                        .entry((group.root_type, chain.raw_key()))
                        .or_default() += 1;
                }
            }
        }

        match placements.into_iter().find(|(_, count)| *count != 1) {
            Some(((_, raw_key), groups)) => Err(InternalError::AmbiguousGrouping {
                raw_key: raw_key.to_string(),
                groups,
            }),
            None => Ok(()),
        }
    }

    /// Chooses the unit for one result group of `root`.
    pub fn unit_for(&self, root: &RootTypeGroup, group: &ResultTypeGroup) -> SynthesisUnit {
        let root_type = root.root_type;
        let surface = root.surface;
        let access = visibility_of(self.oracle, root_type)
            .least(visibility_of(self.oracle, group.result_type));

        let unit = match group.unit_kind() {
            UnitKind::Direct => SynthesisUnit::Direct(DirectUnit {
                root_type,
                result_type: group.result_type,
                access,
                surface,
                chain: group.chains[0].clone(),
            }),
            _ => SynthesisUnit::Dispatch(DispatchUnit {
                root_type,
                result_type: group.result_type,
                access,
                surface,
                table_name: format!(
                    "__generated{}{}Map",
                    variable_name(self.oracle, root_type),
                    variable_name(self.oracle, group.result_type)
                ),
                entries: group.chains.clone(),
            }),
        };

        trace!(
            root = %root_type,
            result = %group.result_type,
            kind = ?unit.kind(),
            surface = surface.as_str(),
            "chose unit"
        );
        unit
    }

    /// Groups single chains, attaches combinator units and orders the result.
    pub fn plan(
        &self,
        chains: Vec<Chain>,
        combinators: Vec<CombinatorUnit>,
    ) -> Result<SynthesisPlan, InternalError> {
        let root_groups = self.partition(chains)?;

        let mut surfaces: BTreeMap<(TypeKey, DestinationSurface), Vec<SynthesisUnit>> =
            BTreeMap::new();

        for group in &root_groups {
            for result in &group.result_groups {
                let unit = self.unit_for(group, result);
                surfaces
                    .entry((TypeKey::of(self.oracle, group.root_type), group.surface))
                    .or_default()
                    .push(unit);
            }
        }

        for unit in combinators {
            let root = TypeKey::of(self.oracle, unit.signature.root_type);
            surfaces
                .entry((root, unit.surface))
                .or_default()
                .push(SynthesisUnit::Combinator(unit));
        }

        let surfaces: Vec<SurfacePlan> = surfaces
            .into_iter()
            .map(|((root, surface), units)| SurfacePlan {
                root_type: root.id,
                surface,
                units,
            })
            .collect();

        debug!(
            root_groups = root_groups.len(),
            surfaces = surfaces.len(),
            "grouping finished"
        );

        Ok(SynthesisPlan {
            root_groups,
            surfaces,
        })
    }
}
