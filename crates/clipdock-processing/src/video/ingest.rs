//! Video ingest pipeline: stage → classify → remux → commit → metadata.
//!
//! The pipeline is linear with no back-edges. Any stage failure aborts
//! the whole request; the client re-submits to retry. Temp files are
//! owned by RAII guards, so every abort path cleans up.

use std::sync::Arc;

use clipdock_core::models::Video;
use clipdock_core::store::{StoreError, VideoStore};
use clipdock_storage::{keys, Storage, StorageError};

use super::classify::AspectBucket;
use super::faststart::MediaRemuxer;
use super::probe::MediaInspector;
use super::ProcessingError;
use crate::staging::StagedFile;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error(transparent)]
    Processing(#[from] ProcessingError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The object is already committed when this fires; the orphan is
    /// accepted rather than compensated (see DESIGN.md).
    #[error("metadata update failed: {0}")]
    Metadata(#[source] StoreError),
}

/// Orchestrates the ingestion of one staged video upload.
pub struct VideoIngestPipeline {
    inspector: Arc<dyn MediaInspector>,
    remuxer: Arc<dyn MediaRemuxer>,
    storage: Arc<dyn Storage>,
    video_store: Arc<dyn VideoStore>,
}

impl VideoIngestPipeline {
    pub fn new(
        inspector: Arc<dyn MediaInspector>,
        remuxer: Arc<dyn MediaRemuxer>,
        storage: Arc<dyn Storage>,
        video_store: Arc<dyn VideoStore>,
    ) -> Self {
        Self {
            inspector,
            remuxer,
            storage,
            video_store,
        }
    }

    /// Run the pipeline for a staged upload and return the updated
    /// record. Consumes the staged file; both it and the remux output
    /// are gone by the time this returns, success or not.
    #[tracing::instrument(skip_all, fields(video_id = %video.id))]
    pub async fn ingest(
        &self,
        mut video: Video,
        staged: StagedFile,
        content_type: &str,
    ) -> Result<Video, IngestError> {
        let info = self.inspector.probe(staged.path()).await?;
        let bucket = AspectBucket::from_dimensions(info.width, info.height);
        tracing::info!(
            width = info.width,
            height = info.height,
            bucket = %bucket,
            "video classified"
        );

        let remuxed = self.remuxer.remux(staged.path()).await?;
        // only the remuxed file proceeds past this point
        drop(staged);

        let key = keys::prefixed_key(bucket.as_str(), &keys::new_asset_key(content_type)?);

        let committed = async {
            let file = tokio::fs::File::open(remuxed.path())
                .await
                .map_err(StorageError::IoError)?;
            self.storage
                .upload_stream(&key, content_type, Box::pin(file))
                .await
        }
        .await;

        // remux output is removed whether or not the commit landed
        drop(remuxed);
        let url = committed?;

        video.video_url = Some(url);
        let updated = self
            .video_store
            .update_video(video)
            .await
            .map_err(IngestError::Metadata)?;

        tracing::info!(key = %key, "video ingest completed");
        Ok(updated)
    }
}
