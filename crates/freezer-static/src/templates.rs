//! Template engine for rendering app templates offline.

use std::path::Path;

use minijinja::{path_loader, AutoEscape, Environment};

use crate::context::MockContext;

/// Errors from loading or rendering a single template.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("failed to load template {name}: {source}")]
    Load {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("failed to render template {name}: {source}")]
    Render {
        name: String,
        #[source]
        source: minijinja::Error,
    },
}

/// Template engine using minijinja with a filesystem loader.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create an engine loading from `templates_dir` with the mock globals installed.
    pub fn new(templates_dir: impl AsRef<Path>, context: &MockContext) -> Self {
        let mut env = Environment::new();

        env.set_loader(path_loader(templates_dir.as_ref()));
        env.set_auto_escape_callback(auto_escape_for);
        // Flask templates lean on Python methods like `dict.get` and `dict.items`.
        env.set_unknown_method_callback(minijinja_contrib::pycompat::unknown_method_callback);
        context.register(&mut env);

        Self { env }
    }

    /// Render a template by name. All data comes from the registered globals.
    pub fn render(&self, name: &str) -> Result<String, TemplateError> {
        let tmpl = self
            .env
            .get_template(name)
            .map_err(|source| TemplateError::Load {
                name: name.to_string(),
                source,
            })?;

        tmpl.render(()).map_err(|source| TemplateError::Render {
            name: name.to_string(),
            source,
        })
    }
}

/// HTML escaping for markup templates, nothing for anything else.
fn auto_escape_for(name: &str) -> AutoEscape {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    match ext {
        "html" | "htm" | "xml" => AutoEscape::Html,
        _ => AutoEscape::None,
    }
}
