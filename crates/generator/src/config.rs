//! Generator configuration.

use propwatch_render::RenderConfig;

/// Configuration for a generator run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Invocations bound to any other container are ignored
    /// (default: the render config's extension container)
    pub bound_container: String,
    /// Output shape (default: `RenderConfig::default()`)
    pub render: RenderConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let render = RenderConfig::default();
        Self {
            bound_container: render.extension_container.clone(),
            render,
        }
    }
}

impl GeneratorConfig {
    /// Binds to `name` and renders public extensions into it.
    pub fn for_container(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            bound_container: name.clone(),
            render: RenderConfig::default().with_extension_container(name),
        }
    }

    /// Sets the container invocations must be bound to.
    pub fn with_bound_container(mut self, name: impl Into<String>) -> Self {
        self.bound_container = name.into();
        self
    }

    /// Sets the render configuration.
    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }
}
