//! Chain extraction.
//!
//! Walks a lambda body from the outermost member access inward, collecting
//! one `Link` per hop, and accepts the result only when the walk bottoms out
//! at the lambda's own parameter.

use crate::chain::{Chain, Link};
use crate::classify::touches_restricted_scope;
use crate::error::RejectReason;
use alloc::string::ToString;
use alloc::vec::Vec;
use propwatch_core::{Expr, ParamId, SymbolOracle, TypeId};
use tracing::trace;

/// Walks `body` and returns its hops in root-to-leaf order.
///
/// - the bare parameter with no hops is `UnsupportedChainShape`
/// - a leaf other than `root_param` is `ChainNotRootedAtParameter`
/// - any operation node is `UnsupportedChainShape`
pub fn walk<O>(root_param: ParamId, body: &Expr, oracle: &O) -> Result<Vec<Link>, RejectReason>
where
    O: SymbolOracle + ?Sized,
{
    let mut links = Vec::with_capacity(body.member_depth());
    let mut current = body;

    loop {
        match current {
            Expr::MemberAccess { target, member } => {
                let info = oracle
                    .resolve(*member)
                    .ok_or(RejectReason::UnresolvedMember { member: *member })?;
                links.push(Link {
                    name: info.name.to_string(),
                    member: *member,
                    owner: info.owner,
                    result: info.result,
                });
                current = target;
            }
            Expr::Parameter(param) if *param == root_param => break,
            Expr::Parameter(_) | Expr::Identifier(_) | Expr::Literal(_) => {
                return Err(RejectReason::not_rooted(current.kind_name()));
            }
            Expr::ConditionalAccess { .. }
            | Expr::Invocation { .. }
            | Expr::ElementAccess { .. }
            | Expr::Cast { .. }
            | Expr::Coalesce { .. } => {
                return Err(RejectReason::unsupported(current.kind_name()));
            }
        }
    }

    if links.is_empty() {
        return Err(RejectReason::unsupported("parameter without member access"));
    }

    links.reverse();
    Ok(links)
}

/// Extracts and classifies one inline expression.
pub fn extract<O>(
    root_param: ParamId,
    root_type: TypeId,
    raw_text: &str,
    body: &Expr,
    oracle: &O,
) -> Result<Chain, RejectReason>
where
    O: SymbolOracle + ?Sized,
{
    let links = walk(root_param, body, oracle)?;
    let restricted = touches_restricted_scope(root_type, &links, oracle);
    trace!(raw = raw_text, depth = links.len(), restricted, "extracted chain");

    Chain::new(links, raw_text.to_string(), root_type, restricted)
        .ok_or(RejectReason::unsupported("parameter without member access"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use propwatch_core::{MemberId, SymbolTable, TypeDecl, Visibility};

    struct Host {
        table: SymbolTable,
        host: TypeId,
        int: TypeId,
        child: MemberId,
        value: MemberId,
        x: ParamId,
    }

    fn host() -> Host {
        let mut table = SymbolTable::new();
        let int = table.add_type(TypeDecl::new("int")).unwrap();
        let host = table.add_type(TypeDecl::new("Host")).unwrap();
        let child = table
            .add_member(host, "Child", host, Visibility::Public)
            .unwrap();
        let value = table
            .add_member(host, "Value", int, Visibility::Public)
            .unwrap();
        let x = table.add_param("x", host).unwrap();
        Host {
            table,
            host,
            int,
            child,
            value,
            x,
        }
    }

    #[test]
    fn test_depth_one() {
        let h = host();
        let body = Expr::param(h.x).member(h.value);
        let chain = extract(h.x, h.host, "x.Value", &body, &h.table).unwrap();

        assert_eq!(chain.depth(), 1);
        assert_eq!(chain.root_type(), h.host);
        assert_eq!(chain.result_type(), h.int);
        assert_eq!(chain.links()[0].name, "Value");
        assert_eq!(chain.links()[0].owner, h.host);
    }

    #[test]
    fn test_depth_n_order() {
        let h = host();
        let body = Expr::param(h.x)
            .member(h.child)
            .member(h.child)
            .member(h.value);
        let chain = extract(h.x, h.host, "x.Child.Child.Value", &body, &h.table).unwrap();

        assert_eq!(
            chain.link_names().collect::<Vec<_>>(),
            vec!["Child", "Child", "Value"]
        );
        assert_eq!(chain.links()[0].result, h.host);
        assert_eq!(chain.result_type(), h.int);
    }

    #[test]
    fn test_other_parameter_not_rooted() {
        let mut h = host();
        let y = h.table.add_param("x", h.host).unwrap();
        // Same name, different parameter: identity decides.
        let body = Expr::param(y).member(h.value);
        assert_eq!(
            walk(h.x, &body, &h.table),
            Err(RejectReason::not_rooted("parameter"))
        );
    }

    #[test]
    fn test_literal_and_identifier_not_rooted() {
        let h = host();
        let body = Expr::Identifier("field".into()).member(h.value);
        assert_eq!(
            walk(h.x, &body, &h.table),
            Err(RejectReason::not_rooted("identifier"))
        );

        let body = Expr::Literal("null".into()).member(h.value);
        assert_eq!(
            walk(h.x, &body, &h.table),
            Err(RejectReason::not_rooted("literal"))
        );
    }

    #[test]
    fn test_unsupported_nodes() {
        let h = host();
        let cases = vec![
            Expr::param(h.x).member(h.child).call(vec![]).member(h.value),
            Expr::param(h.x)
                .index(Expr::Literal("0".into()))
                .member(h.value),
            Expr::param(h.x).cast(h.host).member(h.value),
            Expr::param(h.x).conditional(h.child).member(h.value),
            Expr::param(h.x)
                .member(h.child)
                .coalesce(Expr::Identifier("fallback".into()))
                .member(h.value),
        ];

        for body in cases {
            assert!(matches!(
                walk(h.x, &body, &h.table),
                Err(RejectReason::UnsupportedChainShape { .. })
            ));
        }
    }

    #[test]
    fn test_bare_parameter_rejected() {
        let h = host();
        assert!(matches!(
            extract(h.x, h.host, "x", &Expr::param(h.x), &h.table),
            Err(RejectReason::UnsupportedChainShape { .. })
        ));
    }

    #[test]
    fn test_unresolved_member() {
        let h = host();
        let ghost = MemberId::from_index(42);
        let body = Expr::param(h.x).member(ghost);
        assert_eq!(
            walk(h.x, &body, &h.table),
            Err(RejectReason::UnresolvedMember { member: ghost })
        );
    }
}
