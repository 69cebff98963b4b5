//! Symbolic expression tree for lambda bodies.
//!
//! The host compiler hands over each observation argument as an `Expr`. Only
//! `Parameter` and `MemberAccess` can form a valid chain; the remaining node
//! kinds exist so that invalid shapes can be represented and rejected.

use crate::symbol::{MemberId, ParamId, TypeId};
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

/// Expression node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// Reference to a lambda parameter.
    Parameter(ParamId),

    /// Reference to a local, field or type name that is not a parameter.
    Identifier(String),

    /// Literal constant, kept as source text.
    Literal(String),

    /// `target.member`
    MemberAccess { target: Box<Expr>, member: MemberId },

    /// `target?.member`
    ConditionalAccess { target: Box<Expr>, member: MemberId },

    /// `target(args)`
    Invocation { target: Box<Expr>, args: Vec<Expr> },

    /// `target[index]`
    ElementAccess { target: Box<Expr>, index: Box<Expr> },

    /// `(ty)operand`
    Cast { ty: TypeId, operand: Box<Expr> },

    /// `left ?? right`
    Coalesce { left: Box<Expr>, right: Box<Expr> },
}

impl Expr {
    /// Creates a parameter reference.
    #[inline]
    pub fn param(param: ParamId) -> Self {
        Expr::Parameter(param)
    }

    /// Wraps this expression in a member access.
    pub fn member(self, member: MemberId) -> Self {
        Expr::MemberAccess {
            target: Box::new(self),
            member,
        }
    }

    /// Wraps this expression in a conditional member access.
    pub fn conditional(self, member: MemberId) -> Self {
        Expr::ConditionalAccess {
            target: Box::new(self),
            member,
        }
    }

    /// Invokes this expression.
    pub fn call(self, args: Vec<Expr>) -> Self {
        Expr::Invocation {
            target: Box::new(self),
            args,
        }
    }

    /// Indexes into this expression.
    pub fn index(self, index: Expr) -> Self {
        Expr::ElementAccess {
            target: Box::new(self),
            index: Box::new(index),
        }
    }

    /// Casts this expression.
    pub fn cast(self, ty: TypeId) -> Self {
        Expr::Cast {
            ty,
            operand: Box::new(self),
        }
    }

    /// Null-coalesces this expression with `right`.
    pub fn coalesce(self, right: Expr) -> Self {
        Expr::Coalesce {
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    /// Returns a short name for the node kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Parameter(_) => "parameter",
            Expr::Identifier(_) => "identifier",
            Expr::Literal(_) => "literal",
            Expr::MemberAccess { .. } => "member access",
            Expr::ConditionalAccess { .. } => "conditional access",
            Expr::Invocation { .. } => "invocation",
            Expr::ElementAccess { .. } => "element access",
            Expr::Cast { .. } => "cast",
            Expr::Coalesce { .. } => "null-coalescing operator",
        }
    }

    /// Returns true for leaf nodes.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Expr::Parameter(_) | Expr::Identifier(_) | Expr::Literal(_)
        )
    }

    /// Returns the number of member-access hops above the first non-member node.
    pub fn member_depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Expr::MemberAccess { target, .. } = current {
            depth += 1;
            current = target;
        }
        depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_builder_shape() {
        let expr = Expr::param(ParamId::from_index(0))
            .member(MemberId::from_index(1))
            .member(MemberId::from_index(2));

        match &expr {
            Expr::MemberAccess { target, member } => {
                assert_eq!(*member, MemberId::from_index(2));
                assert!(matches!(**target, Expr::MemberAccess { .. }));
            }
            _ => panic!("expected member access"),
        }
        assert_eq!(expr.member_depth(), 2);
    }

    #[test]
    fn test_member_depth_stops_at_operation() {
        let expr = Expr::param(ParamId::from_index(0))
            .member(MemberId::from_index(1))
            .call(vec![])
            .member(MemberId::from_index(2));
        assert_eq!(expr.member_depth(), 1);
    }

    #[test]
    fn test_kind_name() {
        assert_eq!(Expr::Literal("1".into()).kind_name(), "literal");
        assert_eq!(
            Expr::param(ParamId::from_index(0))
                .index(Expr::Literal("0".into()))
                .kind_name(),
            "element access"
        );
        assert!(Expr::Identifier("local".into()).is_leaf());
        assert!(!Expr::param(ParamId::from_index(0))
            .cast(TypeId::from_index(0))
            .is_leaf());
    }
}
