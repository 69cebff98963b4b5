//! Combinator resolution.
//!
//! Requests sharing a `CombinerSignature` merge into one unit. Each argument
//! position keeps the distinct chains seen there across all merged requests.

use crate::chain::Chain;
use crate::group::{variable_name, visibility_of, TypeKey};
use crate::unit::{CombinatorUnit, DestinationSurface};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use propwatch_core::{CombinerSignature, SymbolOracle, Visibility};
use tracing::trace;

/// One validated N-ary request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombinatorRequest {
    pub signature: CombinerSignature,
    /// One chain per argument position
    pub members: Vec<Chain>,
}

impl CombinatorRequest {
    /// Creates a request.
    pub fn new(signature: CombinerSignature, members: Vec<Chain>) -> Self {
        Self { signature, members }
    }

    /// Returns true if every member chain touches restricted scope.
    pub fn is_restricted_only(&self) -> bool {
        self.members.iter().all(Chain::touches_restricted_scope)
    }

    /// Returns true if any member chain touches restricted scope.
    pub fn touches_restricted_scope(&self) -> bool {
        self.members.iter().any(Chain::touches_restricted_scope)
    }
}

struct Merged {
    signature: CombinerSignature,
    surface: DestinationSurface,
    positions: Vec<BTreeMap<String, Chain>>,
}

/// Turns combinator requests into units.
pub struct CombinatorResolver<'a, O: SymbolOracle + ?Sized> {
    oracle: &'a O,
}

impl<'a, O: SymbolOracle + ?Sized> CombinatorResolver<'a, O> {
    /// Creates a resolver.
    pub fn new(oracle: &'a O) -> Self {
        Self { oracle }
    }

    /// Returns the least visibility among the signature's type arguments.
    pub fn access(&self, signature: &CombinerSignature) -> Visibility {
        signature
            .type_arguments()
            .map(|ty| visibility_of(self.oracle, ty))
            .fold(Visibility::Public, Visibility::least)
    }

    /// Picks the surface for one request.
    pub fn surface(&self, request: &CombinatorRequest) -> DestinationSurface {
        let restricted_type = request
            .signature
            .type_arguments()
            .any(|ty| visibility_of(self.oracle, ty).is_scope_limited());
        DestinationSurface::for_restricted(restricted_type || request.touches_restricted_scope())
    }

    fn name_stem(&self, signature: &CombinerSignature) -> String {
        signature
            .type_arguments()
            .map(|ty| variable_name(self.oracle, ty))
            .collect()
    }

    /// Merges requests by signature, ordered by the signature's type names.
    pub fn resolve<I>(&self, requests: I) -> Vec<CombinatorUnit>
    where
        I: IntoIterator<Item = CombinatorRequest>,
    {
        let mut merged: BTreeMap<Vec<TypeKey>, Merged> = BTreeMap::new();

        for request in requests {
            let surface = self.surface(&request);
            let key: Vec<TypeKey> = request
                .signature
                .type_arguments()
                .map(|ty| TypeKey::of(self.oracle, ty))
                .collect();

            let entry = merged.entry(key).or_insert_with(|| Merged {
                signature: request.signature.clone(),
                surface,
                positions: (0..request.signature.arity())
                    .map(|_| BTreeMap::new())
                    .collect(),
            });
            entry.surface = entry.surface.max(surface);

            for (slot, chain) in entry.positions.iter_mut().zip(request.members) {
                slot.entry(chain.raw_key().to_string()).or_insert(chain);
            }
        }

        merged
            .into_values()
            .map(|m| {
                let unit = CombinatorUnit {
                    access: self.access(&m.signature),
                    name_stem: self.name_stem(&m.signature),
                    surface: m.surface,
                    positions: m
                        .positions
                        .into_iter()
                        .map(|slot| slot.into_values().collect())
                        .collect(),
                    signature: m.signature,
                };
                trace!(
                    stem = %unit.name_stem,
                    arity = unit.arity(),
                    surface = unit.surface.as_str(),
                    "resolved combinator"
                );
                unit
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract;
    use alloc::vec;
    use propwatch_core::{Expr, MemberId, ParamId, SymbolTable, TypeDecl, TypeId};

    struct Fixture {
        table: SymbolTable,
        host: TypeId,
        string: TypeId,
        int: TypeId,
        x: ParamId,
    }

    fn fixture() -> Fixture {
        let mut table = SymbolTable::new();
        let string = table.add_type(TypeDecl::new("string")).unwrap();
        let int = table.add_type(TypeDecl::new("int")).unwrap();
        let host = table.add_type(TypeDecl::new("Host")).unwrap();
        let x = table.add_param("x", host).unwrap();
        Fixture {
            table,
            host,
            string,
            int,
            x,
        }
    }

    fn chain(f: &Fixture, member: MemberId) -> Chain {
        let body = Expr::param(f.x).member(member);
        let raw = f.table.expr_text(&body);
        extract(f.x, f.host, &raw, &body, &f.table).unwrap()
    }

    #[test]
    fn test_same_signature_merges() {
        let mut f = fixture();
        let first = f
            .table
            .add_member(f.host, "First", f.string, Visibility::Public)
            .unwrap();
        let last = f
            .table
            .add_member(f.host, "Last", f.string, Visibility::Public)
            .unwrap();
        let age = f
            .table
            .add_member(f.host, "Age", f.int, Visibility::Public)
            .unwrap();
        let sig = CombinerSignature::new(f.host, vec![f.string, f.int], f.string);

        let requests = vec![
            CombinatorRequest::new(sig.clone(), vec![chain(&f, first), chain(&f, age)]),
            CombinatorRequest::new(sig.clone(), vec![chain(&f, last), chain(&f, age)]),
        ];
        let units = CombinatorResolver::new(&f.table).resolve(requests);

        assert_eq!(units.len(), 1);
        let unit = &units[0];
        assert_eq!(unit.name_stem, "HostStringIntString");
        assert_eq!(unit.positions[0].len(), 2);
        assert_eq!(unit.positions[1].len(), 1);
        assert_eq!(unit.positions[0][0].raw_key(), "x.First");
        assert_eq!(unit.surface, DestinationSurface::Public);
    }

    #[test]
    fn test_distinct_signatures_stay_apart() {
        let mut f = fixture();
        let name = f
            .table
            .add_member(f.host, "Name", f.string, Visibility::Public)
            .unwrap();
        let age = f
            .table
            .add_member(f.host, "Age", f.int, Visibility::Public)
            .unwrap();

        let requests = vec![
            CombinatorRequest::new(
                CombinerSignature::new(f.host, vec![f.string, f.int], f.string),
                vec![chain(&f, name), chain(&f, age)],
            ),
            CombinatorRequest::new(
                CombinerSignature::new(f.host, vec![f.int, f.string], f.string),
                vec![chain(&f, age), chain(&f, name)],
            ),
        ];
        let units = CombinatorResolver::new(&f.table).resolve(requests);
        assert_eq!(units.len(), 2);
        assert_ne!(units[0].name_stem, units[1].name_stem);
    }

    #[test]
    fn test_restricted_member_injects() {
        let mut f = fixture();
        let name = f
            .table
            .add_member(f.host, "Name", f.string, Visibility::Public)
            .unwrap();
        let secret = f
            .table
            .add_member(f.host, "Secret", f.int, Visibility::Private)
            .unwrap();
        let request = CombinatorRequest::new(
            CombinerSignature::new(f.host, vec![f.string, f.int], f.string),
            vec![chain(&f, name), chain(&f, secret)],
        );

        assert!(request.touches_restricted_scope());
        assert!(!request.is_restricted_only());
        let resolver = CombinatorResolver::new(&f.table);
        assert_eq!(
            resolver.surface(&request),
            DestinationSurface::ScopeInjected
        );
    }

    #[test]
    fn test_access_is_least_over_type_arguments() {
        let mut f = fixture();
        let token = f
            .table
            .add_type(TypeDecl::new("Token").visibility(Visibility::Internal))
            .unwrap();
        let sig = CombinerSignature::new(f.host, vec![f.string, token], f.int);
        let resolver = CombinatorResolver::new(&f.table);
        assert_eq!(resolver.access(&sig), Visibility::Internal);
    }
}
