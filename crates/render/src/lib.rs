//! Propwatch Render - Turns a synthesis plan into source artifacts.
//!
//! The renderer walks a `SynthesisPlan` surface by surface. For every unit it
//! resolves handles into text-only views and hands them to a
//! [`SyntaxTemplate`]; the shipped [`RxTemplate`] writes System.Reactive
//! wiring:
//!
//! - Direct units become one accessor observing a chain inline
//! - Dispatch units become a named lookup table plus one accessor
//! - Combinator units become N positional observations merged with
//!   `CombineLatest`
//!
//! Public surfaces are written into the configured extension container,
//! scope-injected surfaces as partial members of the root type. The container
//! itself is also declared once as a stub whose generic overloads throw.

#![no_std]

extern crate alloc;

pub mod config;
mod error;
pub mod renderer;
pub mod template;
pub mod view;
pub mod writer;

pub use config::RenderConfig;
pub use error::{RenderError, Result};
pub use renderer::{Artifact, ArtifactKey, Renderer, StubArtifact};
pub use template::{RxTemplate, SyntaxTemplate};
pub use view::{
    AccessorView, ChainView, CombinatorView, ContainerView, HopView, PartialTypeView,
    PositionView, TableView,
};
pub use writer::SourceWriter;
