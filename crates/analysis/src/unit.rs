//! Synthesis units: the three code shapes the renderer knows how to emit.

use crate::chain::Chain;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use propwatch_core::{CombinerSignature, TypeId, Visibility};

/// Where generated code is placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DestinationSurface {
    /// Attached as an extension-style operation, usable wherever the root type is.
    Public,
    /// Injected as a member of the root type itself.
    ScopeInjected,
}

impl DestinationSurface {
    /// Picks the surface for a restricted flag.
    #[inline]
    pub fn for_restricted(restricted: bool) -> Self {
        if restricted {
            DestinationSurface::ScopeInjected
        } else {
            DestinationSurface::Public
        }
    }

    /// Returns a short stable name.
    pub fn as_str(self) -> &'static str {
        match self {
            DestinationSurface::Public => "public",
            DestinationSurface::ScopeInjected => "scope-injected",
        }
    }
}

/// Discriminant of `SynthesisUnit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UnitKind {
    Direct,
    Dispatch,
    Combinator,
}

/// A (root, result) pair observed through exactly one chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectUnit {
    pub root_type: TypeId,
    pub result_type: TypeId,
    /// Modifier of the generated accessor
    pub access: Visibility,
    pub surface: DestinationSurface,
    pub chain: Chain,
}

/// A (root, result) pair observed through several distinct chains.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchUnit {
    pub root_type: TypeId,
    pub result_type: TypeId,
    pub access: Visibility,
    pub surface: DestinationSurface,
    /// Name of the lookup table, unique per (root, result) pair
    pub table_name: String,
    /// Table entries, ordered by raw key
    pub entries: Vec<Chain>,
}

/// N chains merged through a combining function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombinatorUnit {
    pub signature: CombinerSignature,
    pub access: Visibility,
    pub surface: DestinationSurface,
    /// Identifier fragment shared by every positional table of this unit
    pub name_stem: String,
    /// Distinct chains seen at each argument position, ordered by raw key
    pub positions: Vec<Vec<Chain>>,
}

impl CombinatorUnit {
    /// Returns the number of combined chains.
    #[inline]
    pub fn arity(&self) -> usize {
        self.positions.len()
    }

    /// Returns the lookup table name for a position holding several chains.
    pub fn position_table_name(&self, position: usize) -> String {
        format!("__generated{}Arg{}Map", self.name_stem, position + 1)
    }
}

/// One unit of generated code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SynthesisUnit {
    Direct(DirectUnit),
    Dispatch(DispatchUnit),
    Combinator(CombinatorUnit),
}

impl SynthesisUnit {
    /// Returns the unit's kind tag.
    pub fn kind(&self) -> UnitKind {
        match self {
            SynthesisUnit::Direct(_) => UnitKind::Direct,
            SynthesisUnit::Dispatch(_) => UnitKind::Dispatch,
            SynthesisUnit::Combinator(_) => UnitKind::Combinator,
        }
    }

    /// Returns the type generated code attaches to.
    pub fn root_type(&self) -> TypeId {
        match self {
            SynthesisUnit::Direct(unit) => unit.root_type,
            SynthesisUnit::Dispatch(unit) => unit.root_type,
            SynthesisUnit::Combinator(unit) => unit.signature.root_type,
        }
    }

    /// Returns where the unit is generated.
    pub fn surface(&self) -> DestinationSurface {
        match self {
            SynthesisUnit::Direct(unit) => unit.surface,
            SynthesisUnit::Dispatch(unit) => unit.surface,
            SynthesisUnit::Combinator(unit) => unit.surface,
        }
    }

    /// Returns every chain the unit renders.
    pub fn chains(&self) -> Vec<&Chain> {
        match self {
            SynthesisUnit::Direct(unit) => alloc::vec![&unit.chain],
            SynthesisUnit::Dispatch(unit) => unit.entries.iter().collect(),
            SynthesisUnit::Combinator(unit) => unit.positions.iter().flatten().collect(),
        }
    }
}
