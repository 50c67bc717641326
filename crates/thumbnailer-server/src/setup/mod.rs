//! Application setup

pub mod routes;
pub mod server;

use crate::state::AppState;
use axum::Router;
use std::sync::Arc;
use thumbnailer_core::Config;
use thumbnailer_processing::ThumbnailPipeline;
use thumbnailer_storage::create_storage;

/// Build the store handle, the pipeline and the router.
pub async fn initialize_app(config: &Config) -> Result<(Arc<AppState>, Router), anyhow::Error> {
    let storage = create_storage(&config.storage).await?;
    let pipeline = ThumbnailPipeline::from_config(storage, config)?;

    tracing::info!(
        backend = %config.storage.backend,
        max_width = config.thumbnail.max_width,
        max_height = config.thumbnail.max_height,
        allow_enlargement = config.thumbnail.allow_enlargement,
        prefix = %config.thumbnail_prefix,
        "Thumbnail pipeline initialized"
    );

    let state = Arc::new(AppState::new(pipeline));
    let router = routes::setup_routes(state.clone());
    Ok((state, router))
}
