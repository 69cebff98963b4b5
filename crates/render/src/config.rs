//! Rendering configuration.

use alloc::string::String;

/// Configuration for the source renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Static class public extensions are rendered into
    /// (default: `NotifyPropertyChangedExtensions`)
    pub extension_container: String,
    /// Name of every generated accessor (default: `WhenChanged`)
    pub method_name: String,
    /// One indentation step (default: four spaces)
    pub indent: String,
    /// Emit the auto-generated banner at the top of each artifact (default: true)
    pub emit_header: bool,
    /// Largest combined overload declared by the stub container (default: 12)
    pub stub_arity: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            extension_container: "NotifyPropertyChangedExtensions".into(),
            method_name: "WhenChanged".into(),
            indent: "    ".into(),
            emit_header: true,
            stub_arity: 12,
        }
    }
}

impl RenderConfig {
    /// Sets the extension container name.
    pub fn with_extension_container(mut self, name: impl Into<String>) -> Self {
        self.extension_container = name.into();
        self
    }

    /// Sets the accessor name.
    pub fn with_method_name(mut self, name: impl Into<String>) -> Self {
        self.method_name = name.into();
        self
    }

    /// Sets the indentation step.
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Enables or disables the auto-generated banner.
    pub fn with_header(mut self, emit: bool) -> Self {
        self.emit_header = emit;
        self
    }

    /// Sets the largest combined overload the stub container declares.
    pub fn with_stub_arity(mut self, arity: usize) -> Self {
        self.stub_arity = arity;
        self
    }
}
