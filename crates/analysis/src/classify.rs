//! Visibility classification.
//!
//! A chain must be generated inside its root type when any part of it can
//! only be reached from there. Visibility is judged relative to the root:
//!
//! 1. a scope-limited root type restricts the whole chain;
//! 2. otherwise only hops declared on the root type itself are inspected, and
//!    a scope-limited member among them restricts the chain.
//!
//! Hops declared on other intermediate types are not re-checked, so a private
//! member several hops deep on a different owner does not restrict the chain.

use crate::chain::Link;
use propwatch_core::{SymbolOracle, TypeId};
use tracing::trace;

/// Returns whether a chain rooted at `root_type` touches restricted scope.
pub fn touches_restricted_scope<O>(root_type: TypeId, links: &[Link], oracle: &O) -> bool
where
    O: SymbolOracle + ?Sized,
{
    if oracle
        .type_visibility(root_type)
        .is_some_and(|v| v.is_scope_limited())
    {
        trace!(root = %root_type, "root type is scope-limited");
        return true;
    }

    for link in links.iter().rev() {
        if link.owner != root_type {
            continue;
        }
        let restricted = oracle
            .resolve(link.member)
            .is_some_and(|member| member.visibility.is_scope_limited());
        if restricted {
            trace!(member = %link.name, "root-owned member is scope-limited");
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use propwatch_core::{MemberId, SymbolTable, TypeDecl, Visibility};

    struct Fixture {
        table: SymbolTable,
        host: TypeId,
    }

    fn links(table: &SymbolTable, members: &[MemberId]) -> Vec<Link> {
        members
            .iter()
            .map(|&m| {
                let info = table.resolve(m).unwrap();
                Link {
                    name: info.name.to_string(),
                    member: m,
                    owner: info.owner,
                    result: info.result,
                }
            })
            .collect()
    }

    fn fixture(host_visibility: Visibility) -> Fixture {
        let mut table = SymbolTable::new();
        table.add_type(TypeDecl::new("string")).unwrap();
        let host = table
            .add_type(TypeDecl::new("Host").visibility(host_visibility))
            .unwrap();
        Fixture { table, host }
    }

    #[test]
    fn test_public_chain_not_restricted() {
        let mut f = fixture(Visibility::Public);
        let string = f.table.type_id("string").unwrap();
        let value = f
            .table
            .add_member(f.host, "Value", string, Visibility::Public)
            .unwrap();
        let l = links(&f.table, &[value]);
        assert!(!touches_restricted_scope(f.host, &l, &f.table));
    }

    #[test]
    fn test_private_root_type_restricts() {
        let mut f = fixture(Visibility::Private);
        let string = f.table.type_id("string").unwrap();
        let value = f
            .table
            .add_member(f.host, "Value", string, Visibility::Public)
            .unwrap();
        let l = links(&f.table, &[value]);
        assert!(touches_restricted_scope(f.host, &l, &f.table));
    }

    #[test]
    fn test_protected_root_member_restricts() {
        let mut f = fixture(Visibility::Public);
        let string = f.table.type_id("string").unwrap();
        let child = f
            .table
            .add_member(f.host, "Child", f.host, Visibility::Protected)
            .unwrap();
        let value = f
            .table
            .add_member(f.host, "Value", string, Visibility::Public)
            .unwrap();
        let l = links(&f.table, &[child, value]);
        assert!(touches_restricted_scope(f.host, &l, &f.table));
    }

    #[test]
    fn test_internal_member_not_restricted() {
        let mut f = fixture(Visibility::Internal);
        let string = f.table.type_id("string").unwrap();
        let value = f
            .table
            .add_member(f.host, "Value", string, Visibility::Internal)
            .unwrap();
        let l = links(&f.table, &[value]);
        assert!(!touches_restricted_scope(f.host, &l, &f.table));
    }

    #[test]
    fn test_private_member_on_other_owner_not_rechecked() {
        let mut f = fixture(Visibility::Public);
        let string = f.table.type_id("string").unwrap();
        let other = f.table.add_type(TypeDecl::new("Other")).unwrap();
        let child = f
            .table
            .add_member(f.host, "Other", other, Visibility::Public)
            .unwrap();
        let secret = f
            .table
            .add_member(other, "Secret", string, Visibility::Private)
            .unwrap();
        let l = links(&f.table, &[child, secret]);
        assert!(!touches_restricted_scope(f.host, &l, &f.table));
    }
}
