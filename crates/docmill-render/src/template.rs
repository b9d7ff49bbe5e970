use std::sync::{PoisonError, RwLock};

use tera::Tera;

use crate::error::RenderError;

/// I/O seam for template sources. Production serves templates compiled into
/// the binary; tests inject loaders that count reads or return bad syntax.
pub trait TemplateLoader: Send + Sync {
    fn load(&self, key: &str) -> Result<String, RenderError>;
}

/// Serves the two document templates embedded at build time.
pub struct EmbeddedTemplates;

/// Template key for the invoice document.
pub const INVOICE_TEMPLATE: &str = "invoice";
/// Template key for the tabular report document.
pub const TABLE_TEMPLATE: &str = "table";

impl TemplateLoader for EmbeddedTemplates {
    fn load(&self, key: &str) -> Result<String, RenderError> {
        match key {
            INVOICE_TEMPLATE => Ok(include_str!("../templates/invoice.html").to_string()),
            TABLE_TEMPLATE => Ok(include_str!("../templates/table.html").to_string()),
            other => Err(RenderError::TemplateNotFound(other.to_string())),
        }
    }
}

/// Compiled-template cache. Each key is loaded and compiled on first use and
/// retained for the lifetime of the process; the template set is small and
/// fixed, so there is no eviction.
///
/// Constructed explicitly and injected at the composition root so tests can
/// use a fresh cache per test. Concurrent first-use races are tolerated:
/// compilation is idempotent and a lost race never installs a partial
/// artifact.
pub struct TemplateCache {
    loader: Box<dyn TemplateLoader>,
    tera: RwLock<Tera>,
}

impl TemplateCache {
    pub fn new(loader: Box<dyn TemplateLoader>) -> Self {
        Self {
            loader,
            tera: RwLock::new(Tera::default()),
        }
    }

    /// Compile `key` if it is not already in the registry.
    ///
    /// Malformed template syntax is `RenderError::TemplateCompile`, surfaced
    /// on first use and never retried.
    pub fn get_or_compile(&self, key: &str) -> Result<(), RenderError> {
        {
            let tera = self.tera.read().unwrap_or_else(PoisonError::into_inner);
            if tera.get_template(key).is_ok() {
                return Ok(());
            }
        }

        // Load outside the write lock; a concurrent compile of the same key
        // just wins the race below.
        let source = self.loader.load(key)?;

        let mut tera = self.tera.write().unwrap_or_else(PoisonError::into_inner);
        if tera.get_template(key).is_ok() {
            return Ok(());
        }
        tera.add_raw_template(key, &source)
            .map_err(|e| RenderError::TemplateCompile {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        tracing::debug!(key, "template compiled");
        Ok(())
    }

    /// Render `key` with `context`, compiling the template on first use.
    pub fn render(&self, key: &str, context: &tera::Context) -> Result<String, RenderError> {
        self.get_or_compile(key)?;
        let tera = self.tera.read().unwrap_or_else(PoisonError::into_inner);
        tera.render(key, context)
            .map_err(|e| RenderError::TemplateRender(e.to_string()))
    }
}
