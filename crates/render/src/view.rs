//! Resolved, text-only views of synthesis units.
//!
//! Templates never see handles. The renderer resolves every type and member
//! to display text first, so a template is a pure function of these views.

use alloc::string::String;
use alloc::vec::Vec;
use propwatch_analysis::DestinationSurface;
use propwatch_core::Visibility;

/// One hop of a chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HopView {
    /// Type the member is read from
    pub input: String,
    pub member: String,
    /// Type the member evaluates to
    pub output: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainView {
    pub raw_key: String,
    pub root: String,
    pub result: String,
    /// Root to leaf, never empty
    pub hops: Vec<HopView>,
}

/// Signature data of a generated accessor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessorView {
    pub access: Visibility,
    pub surface: DestinationSurface,
    pub root: String,
    pub result: String,
}

/// A lookup table from raw key to subscription factory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableView {
    pub name: String,
    pub root: String,
    pub result: String,
    /// Ordered by raw key
    pub entries: Vec<ChainView>,
}

/// How one argument position of a combinator is observed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PositionView {
    /// The only chain seen at this position, rendered in place.
    Inline(ChainView),
    /// Several chains, selected by the caller's expression text.
    Table(TableView),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombinatorView {
    pub access: Visibility,
    pub surface: DestinationSurface,
    pub root: String,
    pub member_types: Vec<String>,
    pub output: String,
    pub positions: Vec<PositionView>,
}

/// A type declaration a scope-injected member is nested in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartialTypeView {
    pub name: String,
    pub access: Visibility,
}

/// Where scope-injected members are written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerView {
    pub namespace: Option<String>,
    /// Enclosing types, outermost first
    pub enclosing: Vec<PartialTypeView>,
    /// The root type itself
    pub target: PartialTypeView,
}
