use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use headless_chrome::{Browser, LaunchOptions, Tab};
use thiserror::Error;
use uuid::Uuid;

pub use headless_chrome::types::PrintToPdfOptions;

use crate::error::RenderError;

/// Captured buffers below this size are empty shells from a failed capture,
/// not real PDFs.
pub const MIN_PDF_BYTES: usize = 100;

const A4_WIDTH_IN: f64 = 8.27;
const A4_HEIGHT_IN: f64 = 11.69;
const MM_PER_INCH: f64 = 25.4;
const PX_PER_INCH: f64 = 96.0;

/// Physical page geometry. All dimensions in inches, the engine's native
/// print unit.
#[derive(Debug, Clone)]
pub struct PageGeometry {
    pub paper_width: f64,
    pub paper_height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub print_background: bool,
}

impl PageGeometry {
    /// A4 with a uniform margin given in millimetres.
    pub fn a4_margin_mm(margin: f64) -> Self {
        let margin = margin / MM_PER_INCH;
        Self {
            paper_width: A4_WIDTH_IN,
            paper_height: A4_HEIGHT_IN,
            margin_top: margin,
            margin_bottom: margin,
            margin_left: margin,
            margin_right: margin,
            print_background: true,
        }
    }

    /// A4 with margins given in CSS pixels, asymmetric vertically to leave
    /// room for header and footer bands.
    pub fn a4_margins_px(top: f64, bottom: f64, horizontal: f64) -> Self {
        Self {
            paper_width: A4_WIDTH_IN,
            paper_height: A4_HEIGHT_IN,
            margin_top: top / PX_PER_INCH,
            margin_bottom: bottom / PX_PER_INCH,
            margin_left: horizontal / PX_PER_INCH,
            margin_right: horizontal / PX_PER_INCH,
            print_background: true,
        }
    }
}

/// Optional header/footer HTML fragments. During pagination the engine
/// substitutes `<span class="pageNumber">` and `<span class="totalPages">`
/// live, independent of the main content's page breaks.
#[derive(Debug, Clone, Default)]
pub struct HeaderFooterSpec {
    pub header: Option<String>,
    pub footer: Option<String>,
}

impl HeaderFooterSpec {
    pub fn enabled(&self) -> bool {
        self.header.is_some() || self.footer.is_some()
    }
}

/// Internal session failures; [`render_with_session`] maps these onto the
/// public error surface.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("content did not settle in time")]
    Timeout,

    #[error("{0}")]
    Engine(String),
}

/// One rendering-engine surface for one invocation.
///
/// `load` and `capture` correspond to the ContentLoaded and Captured
/// transitions; `close` is the Closed transition and must run exactly once
/// per session on every exit path. Leaked engine instances exhaust system
/// resources under sustained load.
pub trait EngineSession {
    fn load(&mut self, html: &str) -> Result<(), SessionError>;
    fn capture(&mut self, options: PrintToPdfOptions) -> Result<Vec<u8>, SessionError>;
    fn close(&mut self);
}

/// Render `html` to PDF bytes with a freshly launched engine instance.
///
/// Blocking; callers on an async runtime run this inside `spawn_blocking`.
pub fn render_to_pdf(
    html: &str,
    geometry: &PageGeometry,
    header_footer: &HeaderFooterSpec,
    doc_id: &str,
    settle_timeout: Duration,
) -> Result<Vec<u8>, RenderError> {
    let session = ChromeSession::launch(settle_timeout)?;
    render_with_session(session, html, geometry, header_footer, doc_id, settle_timeout)
}

/// Drive a session through load → paginate → capture → close.
///
/// `close` runs on every exit path, including capture-validation failure.
/// Internal engine errors are logged with the originating document id and
/// surfaced as the opaque `RenderError::RenderFailed`.
pub fn render_with_session<S: EngineSession>(
    mut session: S,
    html: &str,
    geometry: &PageGeometry,
    header_footer: &HeaderFooterSpec,
    doc_id: &str,
    settle_timeout: Duration,
) -> Result<Vec<u8>, RenderError> {
    let result = drive(&mut session, html, geometry, header_footer, doc_id, settle_timeout);
    session.close();
    result
}

fn drive<S: EngineSession>(
    session: &mut S,
    html: &str,
    geometry: &PageGeometry,
    header_footer: &HeaderFooterSpec,
    doc_id: &str,
    settle_timeout: Duration,
) -> Result<Vec<u8>, RenderError> {
    session.load(html).map_err(|e| match e {
        SessionError::Timeout => {
            tracing::error!(doc_id, "page content never settled");
            RenderError::ContentLoadTimeout(settle_timeout)
        }
        SessionError::Engine(detail) => {
            tracing::error!(doc_id, error = %detail, "content load failed");
            RenderError::RenderFailed {
                doc_id: doc_id.to_string(),
            }
        }
    })?;

    let buffer = session
        .capture(print_options(geometry, header_footer))
        .map_err(|e| {
            tracing::error!(doc_id, error = %e, "PDF capture failed");
            RenderError::RenderFailed {
                doc_id: doc_id.to_string(),
            }
        })?;

    if buffer.len() < MIN_PDF_BYTES {
        tracing::error!(doc_id, size = buffer.len(), "capture produced an invalid buffer");
        return Err(RenderError::InvalidRenderOutput { size: buffer.len() });
    }

    Ok(buffer)
}

/// Build the engine's print options from page geometry and header/footer
/// configuration.
pub fn print_options(geometry: &PageGeometry, header_footer: &HeaderFooterSpec) -> PrintToPdfOptions {
    PrintToPdfOptions {
        print_background: Some(geometry.print_background),
        paper_width: Some(geometry.paper_width),
        paper_height: Some(geometry.paper_height),
        margin_top: Some(geometry.margin_top),
        margin_bottom: Some(geometry.margin_bottom),
        margin_left: Some(geometry.margin_left),
        margin_right: Some(geometry.margin_right),
        display_header_footer: Some(header_footer.enabled()),
        header_template: header_footer.header.clone(),
        footer_template: header_footer.footer.clone(),
        ..Default::default()
    }
}

/// A headless Chromium instance plus one tab.
///
/// Each invocation gets its own isolated instance; requests never share a
/// browser. The child process is killed when the `Browser` drops, so teardown
/// survives panics between `launch` and `close`.
pub struct ChromeSession {
    _browser: Browser,
    tab: Arc<Tab>,
    content_file: Option<PathBuf>,
    settle_timeout: Duration,
    closed: bool,
}

impl ChromeSession {
    /// Launch an isolated engine instance (Launching → PageReady). Launch
    /// failure is fatal for this invocation; retry happens at a higher level
    /// if at all.
    pub fn launch(settle_timeout: Duration) -> Result<Self, RenderError> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .args(vec![OsStr::new("--disable-setuid-sandbox")])
            .build()
            .map_err(|e| RenderError::EngineLaunch(e.to_string()))?;

        let browser = Browser::new(options).map_err(|e| RenderError::EngineLaunch(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| RenderError::EngineLaunch(e.to_string()))?;
        tab.set_default_timeout(settle_timeout);

        Ok(Self {
            _browser: browser,
            tab,
            content_file: None,
            settle_timeout,
            closed: false,
        })
    }
}

impl EngineSession for ChromeSession {
    fn load(&mut self, html: &str) -> Result<(), SessionError> {
        // The document is served from a scratch file rather than a data URL;
        // every sub-resource is an inline data URI, so navigation settling
        // means the page is fully rendered.
        let path = std::env::temp_dir().join(format!("docmill-{}.html", Uuid::new_v4()));
        std::fs::write(&path, html).map_err(|e| SessionError::Engine(e.to_string()))?;
        self.content_file = Some(path.clone());

        let url = format!("file://{}", path.display());
        self.tab
            .navigate_to(&url)
            .map_err(|e| SessionError::Engine(e.to_string()))?;

        let started = Instant::now();
        if let Err(e) = self.tab.wait_until_navigated() {
            if started.elapsed() >= self.settle_timeout {
                return Err(SessionError::Timeout);
            }
            return Err(SessionError::Engine(e.to_string()));
        }
        Ok(())
    }

    fn capture(&mut self, options: PrintToPdfOptions) -> Result<Vec<u8>, SessionError> {
        self.tab
            .print_to_pdf(Some(options))
            .map_err(|e| SessionError::Engine(e.to_string()))
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Some(path) = self.content_file.take() {
            let _ = std::fs::remove_file(&path);
        }
        // The chromium child itself dies when `_browser` drops.
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        self.close();
    }
}
