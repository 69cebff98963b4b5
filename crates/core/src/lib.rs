//! Propwatch Core - Shared vocabulary for the propwatch generator.
//!
//! This crate provides the types every other propwatch crate speaks in:
//!
//! - `TypeId` / `MemberId` / `ParamId`: interned, comparable symbol handles
//! - `Visibility`: ordered declared accessibility
//! - `Expr`: the symbolic expression tree handed over by the host compiler
//! - `Invocation`: one observation request (one or more expression arguments)
//! - `SymbolOracle`: the resolution contract, with `SymbolTable` as the
//!   interning implementation
//! - `Error`: errors raised while building a symbol table
//!
//! # Example
//!
//! ```rust
//! use propwatch_core::{Expr, SymbolOracle, SymbolTable, TypeDecl, Visibility};
//!
//! let mut symbols = SymbolTable::new();
//! let string = symbols.add_type(TypeDecl::new("string")).unwrap();
//! let host = symbols
//!     .add_type(TypeDecl::new("Host").namespace("App"))
//!     .unwrap();
//! let value = symbols
//!     .add_member(host, "Value", string, Visibility::Public)
//!     .unwrap();
//! let x = symbols.add_param("x", host).unwrap();
//!
//! let body = Expr::param(x).member(value);
//! assert_eq!(symbols.expr_text(&body), "x.Value");
//! assert_eq!(symbols.resolve(value).unwrap().owner, host);
//! ```

#![no_std]

extern crate alloc;

mod error;
pub mod expr;
pub mod request;
pub mod symbol;
mod visibility;

pub use error::{Error, Result};
pub use expr::Expr;
pub use request::{CombinerSignature, ExpressionArgument, InlineExpression, Invocation, Span};
pub use symbol::{
    MemberId, MemberInfo, ParamId, ParamInfo, SymbolOracle, SymbolTable, TypeDecl, TypeId,
    TypeInfo,
};
pub use visibility::Visibility;
