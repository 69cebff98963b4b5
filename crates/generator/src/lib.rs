//! Propwatch Generator - Property-chain observation code generator.
//!
//! This crate is the entry point: hand it a symbol oracle and the observation
//! requests found in a compilation, get back generated source files or the
//! diagnostics explaining why none were produced.
//!
//! # Crates
//!
//! - `propwatch-core`: symbol handles, expression trees and requests
//! - `propwatch-analysis`: extraction, classification and grouping
//! - `propwatch-render`: source text templates
//! - `propwatch-reactive`: a reference runtime executing the same protocol
//!
//! # Example
//!
//! ```rust
//! use propwatch_generator::Generator;
//! use propwatch_core::{Expr, ExpressionArgument, Invocation, SymbolTable, TypeDecl, Visibility};
//!
//! let mut symbols = SymbolTable::new();
//! let int = symbols.add_type(TypeDecl::new("int")).unwrap();
//! let host = symbols.add_type(TypeDecl::new("Host").namespace("App")).unwrap();
//! let child = symbols.add_member(host, "Child", host, Visibility::Public).unwrap();
//! let value = symbols.add_member(host, "Value", int, Visibility::Public).unwrap();
//! let x = symbols.add_param("x", host).unwrap();
//!
//! let body = Expr::param(x).member(child).member(value);
//! let request = Invocation::single(
//!     "NotifyPropertyChangedExtensions",
//!     host,
//!     ExpressionArgument::inline(symbols.expr_text(&body), x, body),
//! );
//!
//! let output = Generator::new().run(&symbols, &[request]).unwrap();
//! assert!(output.is_success());
//! assert_eq!(output.artifacts[0].file_name, "WhenChanged.Host0.g.cs");
//! assert!(output.artifacts[0].source.contains(".Switch();"));
//! assert_eq!(output.stub.file_name, "NotifyPropertyChangedExtensions.g.cs");
//! ```

pub mod config;
mod error;
pub mod generator;

pub use config::GeneratorConfig;
pub use error::{GeneratorError, Result};
pub use generator::{Generator, GeneratorOutput};

pub use propwatch_analysis::{Diagnostic, DiagnosticCode, PassStats, Severity};
pub use propwatch_render::{Artifact, ArtifactKey, RenderConfig, StubArtifact};
