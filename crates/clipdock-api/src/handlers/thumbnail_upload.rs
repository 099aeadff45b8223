//! Thumbnail upload handler.
//!
//! Thumbnails are small enough to buffer: validate, name, write straight
//! to the asset root, then record the served URL. No staging, no
//! external tools.

use axum::{
    extract::{Multipart, Path, State},
    http::HeaderMap,
    Json,
};
use clipdock_core::models::Video;
use clipdock_core::store::VideoStore;
use clipdock_core::{constants, AppError};
use clipdock_storage::{keys, Storage};
use uuid::Uuid;

use crate::auth;
use crate::error::HttpAppError;
use crate::handlers::videos::get_owned_video;
use crate::state::AppState;

#[tracing::instrument(skip_all, fields(video_id = %video_id))]
pub async fn upload_thumbnail(
    State(state): State<AppState>,
    Path(video_id): Path<Uuid>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<Video>, HttpAppError> {
    let user_id = auth::authenticate(&headers, &state.config.jwt_secret)?;

    // ownership verified before anything is written
    let mut video = get_owned_video(&state, video_id, user_id).await?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(constants::THUMBNAIL_FIELD) {
            continue;
        }

        let media_type = clipdock_processing::validate_media_type(
            field.content_type(),
            constants::THUMBNAIL_CONTENT_TYPES,
        )?;

        let data = field.bytes().await?;
        clipdock_processing::validate_size(data.len(), state.config.max_thumbnail_size_bytes)?;

        let key = keys::new_asset_key(&media_type)?;
        let url = state
            .asset_storage
            .upload(&key, &media_type, data.to_vec())
            .await?;

        video.thumbnail_url = Some(url);
        let updated = state.video_store.update_video(video).await?;

        tracing::info!(key = %key, "thumbnail stored");
        return Ok(Json(updated));
    }

    Err(AppError::BadRequest(format!(
        "Missing '{}' field in multipart form",
        constants::THUMBNAIL_FIELD
    ))
    .into())
}
