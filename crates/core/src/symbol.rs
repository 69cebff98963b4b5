//! Interned symbol handles and the symbol oracle.
//!
//! Types, members and parameters are identified by small copyable handles.
//! Equality and ordering are defined on the handle, never on the name, so two
//! same-named declarations in different scopes never merge. Display text is
//! kept alongside and only used for output and stable-sort tie-breaking.

use crate::error::{Error, Result};
use crate::expr::Expr;
use crate::visibility::Visibility;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use hashbrown::HashMap;

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl $name {
            /// Builds a handle from a raw table index, or `None` when the
            /// index does not fit a handle.
            #[inline]
            pub fn try_from_index(index: usize) -> Option<Self> {
                u32::try_from(index).ok().map(Self)
            }

            /// Builds a handle from a raw table index.
            ///
            /// # Panics
            ///
            /// Panics if `index` exceeds `u32::MAX`.
            #[inline]
            pub fn from_index(index: usize) -> Self {
                match Self::try_from_index(index) {
                    Some(handle) => handle,
                    None => panic!(concat!(stringify!($name), " index out of range")),
                }
            }

            /// Returns the raw table index.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

handle!(
    /// Handle of a declared type.
    TypeId,
    "t"
);
handle!(
    /// Handle of a declared property or field.
    MemberId,
    "m"
);
handle!(
    /// Handle of a lambda parameter.
    ParamId,
    "p"
);

/// Declaration data for a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeInfo {
    /// Simple name, e.g. `Child`
    pub name: String,
    /// Namespace the outermost enclosing type lives in
    pub namespace: Option<String>,
    /// Directly enclosing type for nested declarations
    pub containing: Option<TypeId>,
    /// Declared visibility
    pub visibility: Visibility,
    /// Fully qualified display name, e.g. `App.Outer.Child`
    pub display: String,
}

impl TypeInfo {
    /// Returns the display name flattened into an identifier fragment.
    ///
    /// `App.Outer.Child` becomes `AppOuterChild`, `List<int>` becomes `ListInt`.
    pub fn variable_name(&self) -> String {
        let mut out = String::with_capacity(self.display.len());
        let mut upper = true;
        for ch in self.display.chars() {
            if ch.is_alphanumeric() || ch == '_' {
                if upper {
                    out.extend(ch.to_uppercase());
                } else {
                    out.push(ch);
                }
                upper = false;
            } else {
                upper = true;
            }
        }
        out
    }
}

/// Builder for a type declaration.
#[derive(Clone, Debug)]
pub struct TypeDecl {
    name: String,
    namespace: Option<String>,
    containing: Option<TypeId>,
    visibility: Visibility,
}

impl TypeDecl {
    /// Starts a public, top-level declaration with no namespace.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            containing: None,
            visibility: Visibility::Public,
        }
    }

    /// Places the type in a namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Nests the type inside another type.
    pub fn nested_in(mut self, containing: TypeId) -> Self {
        self.containing = Some(containing);
        self
    }

    /// Sets the declared visibility.
    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }
}

/// Declaration data for a property or field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberInfo {
    /// Member name as written in source
    pub name: String,
    /// Declaring type
    pub owner: TypeId,
    /// Type the member evaluates to
    pub result: TypeId,
    /// Declared visibility
    pub visibility: Visibility,
}

/// Declaration data for a lambda parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamInfo {
    /// Parameter name as written in source
    pub name: String,
    /// Declared parameter type
    pub ty: TypeId,
}

/// Symbol resolution services supplied by the host compiler.
pub trait SymbolOracle {
    /// Resolves a member-access node to its declaration.
    fn resolve(&self, member: MemberId) -> Option<&MemberInfo>;

    /// Returns the declaration data of a type.
    fn type_info(&self, ty: TypeId) -> Option<&TypeInfo>;

    /// Returns the declared visibility of a type.
    fn type_visibility(&self, ty: TypeId) -> Option<Visibility> {
        self.type_info(ty).map(|info| info.visibility)
    }

    /// Returns the display name of a type, or its handle text if unknown.
    fn type_display(&self, ty: TypeId) -> String {
        self.type_info(ty)
            .map(|info| info.display.clone())
            .unwrap_or_else(|| ty.to_string())
    }
}

/// Interning symbol table.
///
/// Handles are dense indices into the table's vectors; the table is the only
/// thing that can mint them.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    types: Vec<TypeInfo>,
    type_index: HashMap<String, TypeId>,
    members: Vec<MemberInfo>,
    member_index: HashMap<(TypeId, String), MemberId>,
    params: Vec<ParamInfo>,
}

impl SymbolTable {
    /// Creates an empty symbol table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a type and returns its handle.
    pub fn add_type(&mut self, decl: TypeDecl) -> Result<TypeId> {
        let (display, namespace) = match decl.containing {
            Some(outer) => {
                let outer_info = self.info(outer)?;
                (
                    alloc::format!("{}.{}", outer_info.display, decl.name),
                    outer_info.namespace.clone(),
                )
            }
            None => match &decl.namespace {
                Some(ns) => (alloc::format!("{}.{}", ns, decl.name), decl.namespace.clone()),
                None => (decl.name.clone(), None),
            },
        };

        if self.type_index.contains_key(&display) {
            return Err(Error::duplicate_type(display));
        }

        let id = TypeId::try_from_index(self.types.len())
            .ok_or_else(|| Error::capacity_exceeded("type"))?;
        self.type_index.insert(display.clone(), id);
        self.types.push(TypeInfo {
            name: decl.name,
            namespace,
            containing: decl.containing,
            visibility: decl.visibility,
            display,
        });
        Ok(id)
    }

    /// Declares a property or field on `owner` and returns its handle.
    pub fn add_member(
        &mut self,
        owner: TypeId,
        name: impl Into<String>,
        result: TypeId,
        visibility: Visibility,
    ) -> Result<MemberId> {
        let name = name.into();
        let owner_display = self.info(owner)?.display.clone();
        self.info(result)?;

        let key = (owner, name.clone());
        if self.member_index.contains_key(&key) {
            return Err(Error::duplicate_member(owner_display, name));
        }

        let id = MemberId::try_from_index(self.members.len())
            .ok_or_else(|| Error::capacity_exceeded("member"))?;
        self.member_index.insert(key, id);
        self.members.push(MemberInfo {
            name,
            owner,
            result,
            visibility,
        });
        Ok(id)
    }

    /// Declares a lambda parameter of type `ty`.
    ///
    /// Parameters are never deduplicated: two lambdas both naming their
    /// parameter `x` get distinct handles.
    pub fn add_param(&mut self, name: impl Into<String>, ty: TypeId) -> Result<ParamId> {
        self.info(ty)?;
        let id = ParamId::try_from_index(self.params.len())
            .ok_or_else(|| Error::capacity_exceeded("parameter"))?;
        self.params.push(ParamInfo {
            name: name.into(),
            ty,
        });
        Ok(id)
    }

    /// Looks up a type by its display name.
    pub fn type_id(&self, display: &str) -> Option<TypeId> {
        self.type_index.get(display).copied()
    }

    /// Looks up a member by owner and name.
    pub fn member_id(&self, owner: TypeId, name: &str) -> Option<MemberId> {
        self.member_index.get(&(owner, name.to_string())).copied()
    }

    /// Returns parameter data.
    pub fn param(&self, id: ParamId) -> Option<&ParamInfo> {
        self.params.get(id.index())
    }

    /// Returns the enclosing types of `ty`, innermost first.
    pub fn enclosing_types(&self, ty: TypeId) -> Vec<TypeId> {
        let mut out = Vec::new();
        let mut current = self.types.get(ty.index()).and_then(|t| t.containing);
        while let Some(outer) = current {
            out.push(outer);
            current = self.types.get(outer.index()).and_then(|t| t.containing);
        }
        out
    }

    /// Renders an expression the way the host prints a lambda body.
    pub fn expr_text(&self, expr: &Expr) -> String {
        let mut out = String::new();
        self.write_expr(expr, &mut out);
        out
    }

    /// Returns the number of declared types.
    #[inline]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    fn info(&self, ty: TypeId) -> Result<&TypeInfo> {
        self.types
            .get(ty.index())
            .ok_or_else(|| Error::unknown_type(ty))
    }

    fn member_name(&self, member: MemberId) -> &str {
        self.members
            .get(member.index())
            .map(|m| m.name.as_str())
            .unwrap_or("?")
    }

    fn write_expr(&self, expr: &Expr, out: &mut String) {
        match expr {
            Expr::Parameter(p) => match self.param(*p) {
                Some(info) => out.push_str(&info.name),
                None => out.push_str(&p.to_string()),
            },
            Expr::Identifier(name) | Expr::Literal(name) => out.push_str(name),
            Expr::MemberAccess { target, member } => {
                self.write_expr(target, out);
                out.push('.');
                out.push_str(self.member_name(*member));
            }
            Expr::ConditionalAccess { target, member } => {
                self.write_expr(target, out);
                out.push_str("?.");
                out.push_str(self.member_name(*member));
            }
            Expr::Invocation { target, args } => {
                self.write_expr(target, out);
                out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_expr(arg, out);
                }
                out.push(')');
            }
            Expr::ElementAccess { target, index } => {
                self.write_expr(target, out);
                out.push('[');
                self.write_expr(index, out);
                out.push(']');
            }
            Expr::Cast { ty, operand } => {
                out.push('(');
                out.push_str(&self.type_display(*ty));
                out.push(')');
                self.write_expr(operand, out);
            }
            Expr::Coalesce { left, right } => {
                self.write_expr(left, out);
                out.push_str(" ?? ");
                self.write_expr(right, out);
            }
        }
    }
}

impl SymbolOracle for SymbolTable {
    fn resolve(&self, member: MemberId) -> Option<&MemberInfo> {
        self.members.get(member.index())
    }

    fn type_info(&self, ty: TypeId) -> Option<&TypeInfo> {
        self.types.get(ty.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_add_type_display() {
        let mut table = SymbolTable::new();
        let outer = table
            .add_type(TypeDecl::new("Outer").namespace("App"))
            .unwrap();
        let inner = table
            .add_type(
                TypeDecl::new("Inner")
                    .nested_in(outer)
                    .visibility(Visibility::Private),
            )
            .unwrap();

        let info = table.type_info(inner).unwrap();
        assert_eq!(info.display, "App.Outer.Inner");
        assert_eq!(info.namespace.as_deref(), Some("App"));
        assert_eq!(table.type_visibility(inner), Some(Visibility::Private));
        assert_eq!(table.type_id("App.Outer.Inner"), Some(inner));
    }

    #[test]
    fn test_duplicate_type() {
        let mut table = SymbolTable::new();
        table.add_type(TypeDecl::new("Host")).unwrap();
        assert_eq!(
            table.add_type(TypeDecl::new("Host")),
            Err(Error::duplicate_type("Host"))
        );
    }

    #[test]
    fn test_same_name_distinct_handles() {
        let mut table = SymbolTable::new();
        let a = table.add_type(TypeDecl::new("Host").namespace("A")).unwrap();
        let b = table.add_type(TypeDecl::new("Host").namespace("B")).unwrap();
        assert_ne!(a, b);
        assert_eq!(table.type_info(a).unwrap().name, table.type_info(b).unwrap().name);
    }

    #[test]
    fn test_add_member() {
        let mut table = SymbolTable::new();
        let string = table.add_type(TypeDecl::new("string")).unwrap();
        let host = table.add_type(TypeDecl::new("Host")).unwrap();
        let m = table
            .add_member(host, "Value", string, Visibility::Protected)
            .unwrap();

        let info = table.resolve(m).unwrap();
        assert_eq!(info.name, "Value");
        assert_eq!(info.owner, host);
        assert_eq!(info.result, string);
        assert_eq!(table.member_id(host, "Value"), Some(m));

        assert!(matches!(
            table.add_member(host, "Value", string, Visibility::Public),
            Err(Error::DuplicateMember { .. })
        ));
        assert!(matches!(
            table.add_member(TypeId::from_index(99), "X", string, Visibility::Public),
            Err(Error::UnknownType { .. })
        ));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_handle_index_bounds() {
        let last = u32::MAX as usize;
        assert_eq!(TypeId::try_from_index(last).map(TypeId::index), Some(last));
        assert_eq!(MemberId::try_from_index(last + 1), None);
        assert_eq!(ParamId::try_from_index(usize::MAX), None);
        assert_eq!(TypeId::from_index(3), TypeId::try_from_index(3).unwrap());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    #[should_panic(expected = "TypeId index out of range")]
    fn test_from_index_rejects_wide_index() {
        let _ = TypeId::from_index(u32::MAX as usize + 1);
    }

    #[test]
    fn test_enclosing_types() {
        let mut table = SymbolTable::new();
        let a = table.add_type(TypeDecl::new("A")).unwrap();
        let b = table.add_type(TypeDecl::new("B").nested_in(a)).unwrap();
        let c = table.add_type(TypeDecl::new("C").nested_in(b)).unwrap();

        assert_eq!(table.enclosing_types(c), vec![b, a]);
        assert!(table.enclosing_types(a).is_empty());
    }

    #[test]
    fn test_variable_name() {
        let mut table = SymbolTable::new();
        let host = table
            .add_type(TypeDecl::new("host").namespace("my.app"))
            .unwrap();
        let list = table.add_type(TypeDecl::new("List<int>")).unwrap();
        assert_eq!(table.type_info(host).unwrap().variable_name(), "MyAppHost");
        assert_eq!(table.type_info(list).unwrap().variable_name(), "ListInt");
    }

    #[test]
    fn test_expr_text() {
        let mut table = SymbolTable::new();
        let int = table.add_type(TypeDecl::new("int")).unwrap();
        let host = table.add_type(TypeDecl::new("Host")).unwrap();
        let child = table.add_member(host, "Child", host, Visibility::Public).unwrap();
        let value = table.add_member(host, "Value", int, Visibility::Public).unwrap();
        let x = table.add_param("x", host).unwrap();

        let body = Expr::param(x).member(child).member(value);
        assert_eq!(table.expr_text(&body), "x.Child.Value");

        let call = Expr::param(x).member(child).call(vec![]).member(value);
        assert_eq!(table.expr_text(&call), "x.Child().Value");

        let coalesce = Expr::param(x)
            .conditional(child)
            .coalesce(Expr::Literal("null".into()));
        assert_eq!(table.expr_text(&coalesce), "x?.Child ?? null");
    }
}
