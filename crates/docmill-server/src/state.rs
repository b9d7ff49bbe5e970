use std::sync::Arc;

use docmill_render::pipeline::Pipeline;

use crate::sample::{DataSource, StorageUploader};

/// Shared application state, injected into route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub data: Arc<dyn DataSource>,
    pub uploader: Arc<dyn StorageUploader>,
}
