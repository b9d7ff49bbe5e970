use std::path::{Path, PathBuf};

use jiff::Timestamp;

use crate::error::RenderError;

/// A generated document: the PDF bytes plus the scratch path they were
/// written to. Returned by value; the pipeline keeps no reference.
#[derive(Debug)]
pub struct RenderedDocument {
    pub buffer: Vec<u8>,
    pub path: PathBuf,
}

/// Write `buffer` under `scratch_dir` as `<kind>-<identifier>-<epoch-ms>.pdf`.
///
/// The directory create is idempotent; the epoch-millisecond suffix keeps
/// names collision-resistant across concurrent requests. Write failures are
/// fatal for the call and leave no partial file referenced.
pub async fn persist(
    buffer: Vec<u8>,
    kind: &str,
    identifier: &str,
    scratch_dir: &Path,
) -> Result<RenderedDocument, RenderError> {
    tokio::fs::create_dir_all(scratch_dir)
        .await
        .map_err(|source| RenderError::PersistWrite {
            path: scratch_dir.to_path_buf(),
            source,
        })?;

    let file_name = format!(
        "{kind}-{identifier}-{}.pdf",
        Timestamp::now().as_millisecond()
    );
    let path = scratch_dir.join(file_name);

    tokio::fs::write(&path, &buffer)
        .await
        .map_err(|source| RenderError::PersistWrite {
            path: path.clone(),
            source,
        })?;

    tracing::info!(path = %path.display(), bytes = buffer.len(), "PDF persisted");
    Ok(RenderedDocument { buffer, path })
}
