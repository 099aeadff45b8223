use std::sync::Arc;

use clipdock_api::state::AppState;
use clipdock_api::video_store_impl::MemoryVideoStore;
use clipdock_api::{routes, server};
use clipdock_core::store::VideoStore;
use clipdock_core::Config;
use clipdock_processing::{FfmpegRemuxer, FfprobeInspector, VideoIngestPipeline};
use clipdock_storage::{LocalStorage, S3Storage, Storage};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(
            |_| tracing_subscriber::EnvFilter::new("clipdock=info,tower_http=info"),
        ))
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env()?);

    let asset_storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(config.assets_root.clone(), config.assets_base_url.clone()).await?,
    );

    let object_storage: Arc<dyn Storage> = Arc::new(
        S3Storage::new(
            config.s3_bucket.clone(),
            config.s3_region.clone(),
            config.s3_endpoint.clone(),
            Some(config.s3_distribution_host.clone()),
        )
        .await?,
    );

    let video_store: Arc<dyn VideoStore> = Arc::new(MemoryVideoStore::new());

    let pipeline = Arc::new(VideoIngestPipeline::new(
        Arc::new(FfprobeInspector::new(
            config.ffprobe_path.clone(),
            config.tool_timeout,
        )),
        Arc::new(FfmpegRemuxer::new(
            config.ffmpeg_path.clone(),
            config.tool_timeout,
        )),
        object_storage,
        video_store.clone(),
    ));

    let state = AppState {
        config: config.clone(),
        video_store,
        asset_storage,
        pipeline,
    };

    let app = routes::build_router(state);

    server::start_server(&config, app).await
}
