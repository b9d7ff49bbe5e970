use std::path::PathBuf;
use std::time::Duration;

use jiff::Zoned;

use crate::engine::{self, HeaderFooterSpec, PageGeometry};
use crate::error::RenderError;
use crate::html::{self, AssetPaths};
use crate::models::{BillData, ReportData};
use crate::persist::{self, RenderedDocument};
use crate::template::{EmbeddedTemplates, TemplateCache};

/// Pipeline configuration. Defaults mirror production: scratch files under
/// `<cwd>/temp`, a 30-second content-settle bound, repo-local branding
/// images.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub scratch_dir: PathBuf,
    pub settle_timeout: Duration,
    pub assets: AssetPaths,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            scratch_dir: PathBuf::from("temp"),
            settle_timeout: Duration::from_secs(30),
            assets: AssetPaths::default(),
        }
    }
}

/// Composition root for document generation.
///
/// One instance is shared across requests. The template cache is the only
/// shared mutable state; every render gets its own engine instance, so
/// requests run concurrently without coordination.
pub struct Pipeline {
    cache: TemplateCache,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_cache(TemplateCache::new(Box::new(EmbeddedTemplates)), config)
    }

    /// Inject a custom cache (tests use fresh caches with counting loaders).
    pub fn with_cache(cache: TemplateCache, config: PipelineConfig) -> Self {
        Self { cache, config }
    }

    /// Render a bill to a paginated A4 invoice PDF and persist it.
    pub async fn invoice_pdf(&self, bill: &BillData) -> Result<RenderedDocument, RenderError> {
        let html = html::render_invoice_html(&self.cache, bill)?;
        let geometry = PageGeometry::a4_margin_mm(20.0);
        let buffer = self
            .capture(html, geometry, HeaderFooterSpec::default(), &bill.order_id)
            .await?;
        persist::persist(buffer, "invoice", &bill.order_id, &self.config.scratch_dir).await
    }

    /// Render the tabular report to HTML only. Serves the preview route; no
    /// engine instance is involved.
    pub async fn report_html(&self, report: &ReportData) -> Result<String, RenderError> {
        html::render_report_html(&self.cache, report, &self.config.assets, &Zoned::now()).await
    }

    /// Render the tabular report to a PDF with a page-numbered footer and
    /// persist it.
    pub async fn report_pdf(&self, report: &ReportData) -> Result<RenderedDocument, RenderError> {
        let now = Zoned::now();
        let html = html::render_report_html(&self.cache, report, &self.config.assets, &now).await?;
        let geometry = PageGeometry::a4_margins_px(100.0, 60.0, 30.0);
        let header_footer = report_header_footer(&report.report_title, &now);
        let buffer = self
            .capture(html, geometry, header_footer, &report.order_id)
            .await?;
        persist::persist(buffer, "report", &report.order_id, &self.config.scratch_dir).await
    }

    /// Run the blocking engine work off the async runtime.
    async fn capture(
        &self,
        html: String,
        geometry: PageGeometry,
        header_footer: HeaderFooterSpec,
        doc_id: &str,
    ) -> Result<Vec<u8>, RenderError> {
        let settle_timeout = self.config.settle_timeout;
        let id = doc_id.to_string();
        let join_id = id.clone();
        tokio::task::spawn_blocking(move || {
            engine::render_to_pdf(&html, &geometry, &header_footer, &id, settle_timeout)
        })
        .await
        .map_err(|e| {
            tracing::error!(doc_id = %join_id, error = %e, "render task aborted");
            RenderError::RenderFailed { doc_id: join_id }
        })?
    }
}

/// Report header and footer bands, with the engine's live page-number and
/// total-page-count placeholders in the footer.
fn report_header_footer(title: &str, now: &Zoned) -> HeaderFooterSpec {
    let header = format!(
        concat!(
            "<div style=\"font-size: 10px; color: #6c757d; width: 100%; ",
            "padding: 0 30px; box-sizing: border-box; ",
            "border-bottom: 1px solid #000;\">{}</div>"
        ),
        title
    );

    let footer = format!(
        concat!(
            "<div style=\"font-size: 10px; color: #6c757d; width: 100%; ",
            "display: flex; justify-content: space-between; ",
            "padding: 0 30px; box-sizing: border-box;\">",
            "<span>Generated: {}</span>",
            "<span>Page <span class=\"pageNumber\"></span> of ",
            "<span class=\"totalPages\"></span></span>",
            "</div>"
        ),
        now.strftime("%Y-%m-%d %H:%M:%S")
    );

    HeaderFooterSpec {
        header: Some(header),
        footer: Some(footer),
    }
}
