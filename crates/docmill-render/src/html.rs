use std::path::{Path, PathBuf};

use jiff::Zoned;
use tera::Context;

use crate::assets::EmbeddedAsset;
use crate::error::RenderError;
use crate::models::{BillData, ReportData};
use crate::template::{INVOICE_TEMPLATE, TABLE_TEMPLATE, TemplateCache};

/// Branding images embedded into report documents.
#[derive(Debug, Clone)]
pub struct AssetPaths {
    pub logo: PathBuf,
    pub content_image: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            logo: PathBuf::from("assets/images/logo.svg"),
            content_image: PathBuf::from("assets/images/content.svg"),
        }
    }
}

/// Bind an invoice record into the invoice template.
pub fn render_invoice_html(cache: &TemplateCache, bill: &BillData) -> Result<String, RenderError> {
    let context = Context::from_serialize(bill)?;
    cache.render(INVOICE_TEMPLATE, &context)
}

/// Bind a report record, its branding assets, and derived fields into the
/// table template.
///
/// Deterministic given identical inputs: `now` is injected so callers that
/// need reproducible output can pass a fixed clock.
pub async fn render_report_html(
    cache: &TemplateCache,
    report: &ReportData,
    assets: &AssetPaths,
    now: &Zoned,
) -> Result<String, RenderError> {
    let mut context = Context::from_serialize(report)?;

    let logo = resolve_asset(&assets.logo).await;
    let content = resolve_asset(&assets.content_image).await;
    context.insert("logo_image", &logo.map(|a| a.data_uri()).unwrap_or_default());
    context.insert(
        "content_image",
        &content.map(|a| a.data_uri()).unwrap_or_default(),
    );
    context.insert("year", &now.year());
    context.insert("generated_at", &now.strftime("%Y-%m-%d %H:%M:%S").to_string());

    cache.render(TABLE_TEMPLATE, &context)
}

/// Resolve an image to an embeddable asset, degrading to `None` on any
/// failure. The template treats an absent asset as "render without it".
async fn resolve_asset(path: &Path) -> Option<EmbeddedAsset> {
    match EmbeddedAsset::from_file(path).await {
        Ok(asset) => Some(asset),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "asset unavailable, rendering without it");
            None
        }
    }
}
