//! In-process implementation of the `VideoStore` collaborator.
//!
//! The metadata store is an external system in this service's design;
//! this implementation keeps records in memory behind the same trait so
//! the binary runs self-contained and tests need no infrastructure.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use clipdock_core::models::Video;
use clipdock_core::store::{StoreError, StoreResult, VideoStore};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryVideoStore {
    videos: RwLock<HashMap<Uuid, Video>>,
}

impl MemoryVideoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoStore for MemoryVideoStore {
    async fn create_video(&self, video: Video) -> StoreResult<Video> {
        let mut videos = self.videos.write().await;
        videos.insert(video.id, video.clone());
        Ok(video)
    }

    async fn get_video(&self, id: Uuid) -> StoreResult<Video> {
        let videos = self.videos.read().await;
        videos.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn list_videos(&self, user_id: Uuid) -> StoreResult<Vec<Video>> {
        let videos = self.videos.read().await;
        let mut owned: Vec<Video> = videos
            .values()
            .filter(|v| v.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn update_video(&self, mut video: Video) -> StoreResult<Video> {
        let mut videos = self.videos.write().await;
        if !videos.contains_key(&video.id) {
            return Err(StoreError::NotFound(video.id));
        }
        video.updated_at = Utc::now();
        videos.insert(video.id, video.clone());
        Ok(video)
    }

    async fn delete_video(&self, id: Uuid) -> StoreResult<()> {
        let mut videos = self.videos.write().await;
        videos.remove(&id).map(|_| ()).ok_or(StoreError::NotFound(id))
    }
}
