//! Validated access chains.

use alloc::string::String;
use alloc::vec::Vec;
use propwatch_core::{MemberId, TypeId};

/// One hop of a chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    /// Member name
    pub name: String,
    /// Member handle the hop was resolved from
    pub member: MemberId,
    /// Declaring type of the member
    pub owner: TypeId,
    /// Type the hop evaluates to
    pub result: TypeId,
}

/// A validated observation request: a non-empty path from a root object to a
/// terminal value.
///
/// Chains are created by the extractor and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chain {
    links: Vec<Link>,
    raw_key: String,
    root_type: TypeId,
    touches_restricted_scope: bool,
}

impl Chain {
    /// Assembles a chain. Returns `None` for an empty link sequence.
    pub(crate) fn new(
        links: Vec<Link>,
        raw_key: String,
        root_type: TypeId,
        touches_restricted_scope: bool,
    ) -> Option<Self> {
        if links.is_empty() {
            return None;
        }
        Some(Self {
            links,
            raw_key,
            root_type,
            touches_restricted_scope,
        })
    }

    /// Returns the hops from root to terminal value.
    #[inline]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Returns the lambda body text used as de-duplication identity.
    #[inline]
    pub fn raw_key(&self) -> &str {
        &self.raw_key
    }

    /// Returns the type of the root parameter.
    #[inline]
    pub fn root_type(&self) -> TypeId {
        self.root_type
    }

    /// Returns the type of the terminal value.
    #[inline]
    pub fn result_type(&self) -> TypeId {
        // Non-empty by construction.
        self.links[self.links.len() - 1].result
    }

    /// Returns the number of hops.
    #[inline]
    pub fn depth(&self) -> usize {
        self.links.len()
    }

    /// Returns whether any root-owned hop (or the root itself) is scope-limited.
    #[inline]
    pub fn touches_restricted_scope(&self) -> bool {
        self.touches_restricted_scope
    }

    /// Returns the member names in order.
    pub fn link_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.links.iter().map(|link| link.name.as_str())
    }
}
