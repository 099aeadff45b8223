//! Metadata-store collaborator trait.
//!
//! The service does not own video metadata persistence; it talks to the
//! record store through this trait. Implementations are expected to
//! serialize conflicting writes to the same record themselves.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Video;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("video {0} not found")]
    NotFound(Uuid),

    #[error("metadata store error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Video metadata record store.
#[async_trait]
pub trait VideoStore: Send + Sync {
    async fn create_video(&self, video: Video) -> StoreResult<Video>;

    async fn get_video(&self, id: Uuid) -> StoreResult<Video>;

    /// List records owned by `user_id`, newest first.
    async fn list_videos(&self, user_id: Uuid) -> StoreResult<Vec<Video>>;

    /// Replace the stored record with `video`, refreshing `updated_at`.
    async fn update_video(&self, video: Video) -> StoreResult<Video>;

    async fn delete_video(&self, id: Uuid) -> StoreResult<()>;
}
