use std::env;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use docmill_render::pipeline::{Pipeline, PipelineConfig};
use docmill_server::app;
use docmill_server::sample::{MockCdnUploader, SampleDataSource};
use docmill_server::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let state = AppState {
        pipeline: Arc::new(Pipeline::new(PipelineConfig::default())),
        data: Arc::new(SampleDataSource::new()),
        uploader: Arc::new(MockCdnUploader),
    };

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "docmill server listening");
    axum::serve(listener, app(state)).await?;
    Ok(())
}
