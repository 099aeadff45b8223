//! Shared application state.

use std::sync::Arc;

use clipdock_core::store::VideoStore;
use clipdock_core::Config;
use clipdock_processing::VideoIngestPipeline;
use clipdock_storage::Storage;

/// State shared across handlers. Everything is behind an `Arc`, so the
/// state clones per-request without copying components.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub video_store: Arc<dyn VideoStore>,
    /// Local-disk backend thumbnails are written to.
    pub asset_storage: Arc<dyn Storage>,
    pub pipeline: Arc<VideoIngestPipeline>,
}
