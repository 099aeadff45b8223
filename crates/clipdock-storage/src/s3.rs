use crate::traits::{Storage, StorageBackend, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{
    Attribute, Attributes, ObjectStore, ObjectStoreExt, PutOptions, PutPayload,
    Result as ObjectResult,
};
use std::pin::Pin;
use tokio::io::AsyncRead;

/// S3 object storage for committed videos.
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
    region: String,
    endpoint_url: Option<String>,
    /// Distribution host public URLs are synthesized from, when fronted
    /// by a CDN (`https://{host}/{key}`).
    distribution_host: Option<String>,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible
    ///   providers (e.g., "http://localhost:9000" for MinIO)
    /// * `distribution_host` - Optional CDN distribution host used for
    ///   public URLs instead of direct bucket URLs
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        distribution_host: Option<String>,
    ) -> StorageResult<Self> {
        // Build AmazonS3 object store from environment and explicit settings.
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region.clone())
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage {
            store,
            bucket,
            region,
            endpoint_url,
            distribution_host,
        })
    }

    fn put_options(content_type: &str) -> PutOptions {
        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        PutOptions {
            attributes,
            ..Default::default()
        }
    }

    async fn put_bytes(
        &self,
        storage_key: &str,
        content_type: &str,
        bytes: Bytes,
    ) -> StorageResult<String> {
        let size = bytes.len() as u64;
        let location = Path::from(storage_key.to_string());

        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self
            .store
            .put_opts(
                &location,
                PutPayload::from(bytes),
                Self::put_options(content_type),
            )
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %storage_key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(self.public_url(storage_key))
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn upload(
        &self,
        storage_key: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String> {
        self.put_bytes(storage_key, content_type, Bytes::from(data))
            .await
    }

    async fn upload_stream(
        &self,
        storage_key: &str,
        content_type: &str,
        mut reader: Pin<Box<dyn AsyncRead + Send + Unpin>>,
    ) -> StorageResult<String> {
        // Read the stream fully and upload in a single put. Less optimal
        // for very large files, but keeps the commit a single atomic
        // operation against the backend.
        let mut buffer = Vec::new();
        let mut temp_buf = vec![0u8; 64 * 1024];

        loop {
            let bytes_read = tokio::io::AsyncReadExt::read(&mut reader, &mut temp_buf)
                .await
                .map_err(|e| {
                    StorageError::UploadFailed(format!("Failed to read from stream: {}", e))
                })?;

            if bytes_read == 0 {
                break;
            }

            buffer.extend_from_slice(&temp_buf[..bytes_read]);
        }

        self.put_bytes(storage_key, content_type, Bytes::from(buffer))
            .await
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let location = Path::from(storage_key.to_string());

        match self.store.delete(&location).await {
            Ok(()) | Err(ObjectStoreError::NotFound { .. }) => {
                tracing::info!(bucket = %self.bucket, key = %storage_key, "S3 delete successful");
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %storage_key,
                    "S3 delete failed"
                );
                Err(StorageError::DeleteFailed(e.to_string()))
            }
        }
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let location = Path::from(storage_key.to_string());
        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    /// Public URL for a committed object.
    ///
    /// Prefers the CDN distribution host; falls back to the custom
    /// endpoint (path-style) and then the standard AWS S3 URL format.
    fn public_url(&self, storage_key: &str) -> String {
        if let Some(ref host) = self.distribution_host {
            return format!("https://{}/{}", host, storage_key);
        }

        if let Some(ref endpoint) = self.endpoint_url {
            let base_url = endpoint.trim_end_matches('/');
            return format!("{}/{}/{}", base_url, self.bucket, storage_key);
        }

        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket, self.region, storage_key
        )
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store(distribution_host: Option<&str>, endpoint: Option<&str>) -> S3Storage {
        S3Storage::new(
            "clipdock-videos".to_string(),
            "us-east-1".to_string(),
            endpoint.map(String::from),
            distribution_host.map(String::from),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_public_url_prefers_distribution_host() {
        let storage = test_store(Some("d111111abcdef8.cloudfront.net"), None).await;
        assert_eq!(
            storage.public_url("landscape/abc.mp4"),
            "https://d111111abcdef8.cloudfront.net/landscape/abc.mp4"
        );
    }

    #[tokio::test]
    async fn test_public_url_path_style_for_custom_endpoint() {
        let storage = test_store(None, Some("http://localhost:9000/")).await;
        assert_eq!(
            storage.public_url("other/abc.mp4"),
            "http://localhost:9000/clipdock-videos/other/abc.mp4"
        );
    }

    #[tokio::test]
    async fn test_public_url_standard_aws_format() {
        let storage = test_store(None, None).await;
        assert_eq!(
            storage.public_url("portrait/abc.mp4"),
            "https://clipdock-videos.s3.us-east-1.amazonaws.com/portrait/abc.mp4"
        );
    }
}
