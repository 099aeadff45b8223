//! Video metadata CRUD handlers.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use clipdock_core::models::{NewVideo, Video};
use clipdock_core::store::VideoStore;
use clipdock_core::AppError;
use uuid::Uuid;

use crate::auth;
use crate::error::HttpAppError;
use crate::state::AppState;

/// Fetch a record and verify the caller owns it.
pub(crate) async fn get_owned_video(
    state: &AppState,
    video_id: Uuid,
    user_id: Uuid,
) -> Result<Video, HttpAppError> {
    let video = state.video_store.get_video(video_id).await?;
    if video.user_id != user_id {
        return Err(AppError::Forbidden("You do not own this video".to_string()).into());
    }
    Ok(video)
}

#[tracing::instrument(skip_all)]
pub async fn create_video(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(new): Json<NewVideo>,
) -> Result<(StatusCode, Json<Video>), HttpAppError> {
    let user_id = auth::authenticate(&headers, &state.config.jwt_secret)?;

    if new.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title must not be empty".to_string()).into());
    }

    let video = state
        .video_store
        .create_video(Video::new(user_id, new))
        .await?;

    tracing::info!(video_id = %video.id, "video record created");
    Ok((StatusCode::CREATED, Json(video)))
}

#[tracing::instrument(skip_all)]
pub async fn list_videos(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Video>>, HttpAppError> {
    let user_id = auth::authenticate(&headers, &state.config.jwt_secret)?;
    let videos = state.video_store.list_videos(user_id).await?;
    Ok(Json(videos))
}

#[tracing::instrument(skip_all, fields(video_id = %video_id))]
pub async fn get_video(
    State(state): State<AppState>,
    Path(video_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<Video>, HttpAppError> {
    let user_id = auth::authenticate(&headers, &state.config.jwt_secret)?;
    let video = get_owned_video(&state, video_id, user_id).await?;
    Ok(Json(video))
}

#[tracing::instrument(skip_all, fields(video_id = %video_id))]
pub async fn delete_video(
    State(state): State<AppState>,
    Path(video_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<StatusCode, HttpAppError> {
    let user_id = auth::authenticate(&headers, &state.config.jwt_secret)?;
    get_owned_video(&state, video_id, user_id).await?;

    state.video_store.delete_video(video_id).await?;
    tracing::info!(video_id = %video_id, "video record deleted");
    Ok(StatusCode::NO_CONTENT)
}
