//! Route table.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{thumbnail_upload, video_upload, videos};
use crate::state::AppState;

/// Allowance for multipart framing on top of the payload ceilings. The
/// exact payload limit is enforced again by the staging copy.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let thumbnail_limit = state.config.max_thumbnail_size_bytes + MULTIPART_OVERHEAD;
    let video_limit = state.config.max_video_size_bytes + MULTIPART_OVERHEAD;

    Router::new()
        .route(
            "/api/videos",
            post(videos::create_video).get(videos::list_videos),
        )
        .route(
            "/api/videos/{video_id}",
            get(videos::get_video).delete(videos::delete_video),
        )
        .route(
            "/api/thumbnail_upload/{video_id}",
            post(thumbnail_upload::upload_thumbnail)
                .layer(DefaultBodyLimit::max(thumbnail_limit)),
        )
        .route(
            "/api/video_upload/{video_id}",
            post(video_upload::upload_video).layer(DefaultBodyLimit::max(video_limit)),
        )
        .nest_service(
            "/assets",
            ServeDir::new(state.config.assets_root.clone()),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
