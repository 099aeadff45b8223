//! Test helpers: build AppState and a TestServer with fake media tools
//! and tempdir-backed storage. No real ffmpeg/ffprobe or S3 involved.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum_test::TestServer;
use clipdock_api::state::AppState;
use clipdock_api::video_store_impl::MemoryVideoStore;
use clipdock_api::{auth, routes};
use clipdock_core::models::Video;
use clipdock_core::store::VideoStore;
use clipdock_core::Config;
use clipdock_processing::{
    MediaInspector, MediaRemuxer, ProcessingError, RemuxedFile, VideoIngestPipeline,
    VideoStreamInfo,
};
use clipdock_storage::LocalStorage;
use tempfile::TempDir;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "test-secret-test-secret-test-secret!";

pub const TEST_MAX_THUMBNAIL_BYTES: usize = 256 * 1024;
pub const TEST_MAX_VIDEO_BYTES: usize = 1024 * 1024;

/// Test application: server plus the owned fixtures behind it.
pub struct TestApp {
    pub server: TestServer,
    pub video_store: Arc<dyn VideoStore>,
    pub assets_root: TempDir,
    pub object_root: TempDir,
}

impl TestApp {
    pub fn assets_file_count(&self) -> usize {
        count_files(self.assets_root.path())
    }

    pub fn object_file_count(&self) -> usize {
        count_files(self.object_root.path())
    }
}

fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| {
                    if e.path().is_dir() {
                        count_files(&e.path())
                    } else {
                        1
                    }
                })
                .sum()
        })
        .unwrap_or(0)
}

/// Inspector fake: reports fixed dimensions, or fails like a file with no
/// video stream.
pub struct FakeInspector {
    result: Option<VideoStreamInfo>,
}

#[async_trait]
impl MediaInspector for FakeInspector {
    async fn probe(&self, _path: &Path) -> Result<VideoStreamInfo, ProcessingError> {
        self.result.ok_or(ProcessingError::NoVideoStream)
    }
}

/// Remuxer fake: copies the input to the sibling output path.
pub struct FakeRemuxer;

#[async_trait]
impl MediaRemuxer for FakeRemuxer {
    async fn remux(&self, input: &Path) -> Result<RemuxedFile, ProcessingError> {
        let mut os = input.as_os_str().to_os_string();
        os.push(".faststart.mp4");
        let output = std::path::PathBuf::from(os);
        tokio::fs::copy(input, &output).await?;
        Ok(RemuxedFile::from_path(output))
    }
}

fn test_config() -> Config {
    Config {
        server_port: 8080,
        environment: "test".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        assets_root: "./assets".into(),
        assets_base_url: "http://localhost:8080/assets".to_string(),
        s3_bucket: "clipdock-test".to_string(),
        s3_region: "us-east-1".to_string(),
        s3_endpoint: None,
        s3_distribution_host: "cdn.test".to_string(),
        max_thumbnail_size_bytes: TEST_MAX_THUMBNAIL_BYTES,
        max_video_size_bytes: TEST_MAX_VIDEO_BYTES,
        ffmpeg_path: "ffmpeg".to_string(),
        ffprobe_path: "ffprobe".to_string(),
        tool_timeout: Duration::from_secs(5),
    }
}

/// Standard app: probe reports 1920x1080.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(Some(VideoStreamInfo {
        width: 1920,
        height: 1080,
    }))
    .await
}

/// App with a configurable probe result (`None` = probe failure).
pub async fn setup_test_app_with(probe_result: Option<VideoStreamInfo>) -> TestApp {
    let assets_root = TempDir::new().expect("assets tempdir");
    let object_root = TempDir::new().expect("object tempdir");

    let mut config = test_config();
    config.assets_root = assets_root.path().to_path_buf();
    let config = Arc::new(config);

    let asset_storage = Arc::new(
        LocalStorage::new(assets_root.path(), config.assets_base_url.clone())
            .await
            .expect("asset storage"),
    );

    // stands in for the S3 bucket; synthesizes the same CDN-style URLs
    let object_storage = Arc::new(
        LocalStorage::new(
            object_root.path(),
            format!("https://{}", config.s3_distribution_host),
        )
        .await
        .expect("object storage"),
    );

    let video_store: Arc<dyn VideoStore> = Arc::new(MemoryVideoStore::new());

    let pipeline = Arc::new(VideoIngestPipeline::new(
        Arc::new(FakeInspector {
            result: probe_result,
        }),
        Arc::new(FakeRemuxer),
        object_storage,
        video_store.clone(),
    ));

    let state = AppState {
        config,
        video_store: video_store.clone(),
        asset_storage,
        pipeline,
    };

    let server = TestServer::new(routes::build_router(state)).expect("test server");

    TestApp {
        server,
        video_store,
        assets_root,
        object_root,
    }
}

/// Authorization header value for `user_id`.
pub fn bearer(user_id: Uuid) -> String {
    let token = auth::issue_token(user_id, TEST_JWT_SECRET, Duration::from_secs(3600))
        .expect("issue token");
    format!("Bearer {}", token)
}

/// Create a video record owned by `user_id` through the API.
pub async fn create_video(app: &TestApp, user_id: Uuid) -> Video {
    let response = app
        .server
        .post("/api/videos")
        .add_header("Authorization", bearer(user_id))
        .json(&serde_json::json!({ "title": "test clip" }))
        .await;

    assert_eq!(response.status_code(), 201);
    response.json::<Video>()
}
