//! Video upload handler.
//!
//! Thin HTTP shell over the ingest pipeline: authenticate, verify
//! ownership, locate the `video` form field, stage its bytes to disk,
//! then hand off. The staged file's lifecycle belongs to the pipeline
//! from the hand-off on.

use axum::{
    extract::{Multipart, Path, State},
    http::HeaderMap,
    Json,
};
use clipdock_core::models::Video;
use clipdock_core::{constants, AppError};
use clipdock_processing::StagingSink;
use uuid::Uuid;

use crate::auth;
use crate::error::HttpAppError;
use crate::handlers::videos::get_owned_video;
use crate::state::AppState;

#[tracing::instrument(skip_all, fields(video_id = %video_id))]
pub async fn upload_video(
    State(state): State<AppState>,
    Path(video_id): Path<Uuid>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<Video>, HttpAppError> {
    let user_id = auth::authenticate(&headers, &state.config.jwt_secret)?;

    // ownership verified before any body bytes are consumed beyond
    // locating the form field
    let video = get_owned_video(&state, video_id, user_id).await?;

    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(constants::VIDEO_FIELD) {
            continue;
        }

        let media_type = clipdock_processing::validate_media_type(
            field.content_type(),
            constants::VIDEO_CONTENT_TYPES,
        )?;

        let mut sink = StagingSink::create(state.config.max_video_size_bytes as u64).await?;
        while let Some(chunk) = field.chunk().await? {
            sink.write_chunk(&chunk).await?;
        }
        let staged = sink.finish().await?;

        let updated = state.pipeline.ingest(video, staged, &media_type).await?;
        return Ok(Json(updated));
    }

    Err(AppError::BadRequest(format!(
        "Missing '{}' field in multipart form",
        constants::VIDEO_FIELD
    ))
    .into())
}
