use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Fatal pipeline errors. Each one aborts the current render request; there
/// are no automatic retries anywhere in the pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template compile error in '{key}': {message}")]
    TemplateCompile { key: String, message: String },

    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("failed to launch rendering engine: {0}")]
    EngineLaunch(String),

    #[error("page content did not settle within {0:?}")]
    ContentLoadTimeout(Duration),

    #[error("engine produced an empty or invalid buffer ({size} bytes)")]
    InvalidRenderOutput { size: usize },

    #[error("PDF rendering failed for document '{doc_id}'")]
    RenderFailed { doc_id: String },

    #[error("failed to write '{path}' to scratch storage: {source}")]
    PersistWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<tera::Error> for RenderError {
    fn from(e: tera::Error) -> Self {
        RenderError::TemplateRender(e.to_string())
    }
}

/// Recoverable asset failures. The HTML renderer logs these and binds an
/// absent asset instead; they never cross the pipeline boundary. A missing
/// logo must not block invoice delivery.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("unsupported image type: .{extension}")]
    Unsupported { extension: String },

    #[error("failed to read asset '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
