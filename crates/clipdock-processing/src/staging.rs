//! Temp staging for video uploads.
//!
//! A [`StagedFile`] owns a uniquely named temporary file holding the raw
//! uploaded bytes. Removal happens on drop, so the file cannot outlive
//! the request whatever path the pipeline takes. Uploads arrive either as
//! an `AsyncRead` ([`stage`]) or chunk by chunk ([`StagingSink`], for
//! multipart fields); both enforce the same byte ceiling.

use std::path::Path;

use tempfile::NamedTempFile;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};

const STAGING_PREFIX: &str = "clipdock-upload-";
const COPY_BUF_SIZE: usize = 64 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    #[error("upload exceeds maximum size of {max} bytes")]
    TooLarge { max: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Exclusive handle to a staged upload on local disk. The backing file is
/// removed when the handle drops.
#[derive(Debug)]
pub struct StagedFile {
    inner: NamedTempFile,
}

impl StagedFile {
    pub fn path(&self) -> &Path {
        self.inner.path()
    }
}

/// Incremental writer for staging an upload chunk by chunk. Dropping the
/// sink without [`finish`](Self::finish) removes the partial file.
#[derive(Debug)]
pub struct StagingSink {
    tmp: NamedTempFile,
    file: tokio::fs::File,
    copied: u64,
    max_bytes: u64,
}

impl StagingSink {
    /// Allocate a fresh staging file in the system temp directory.
    pub async fn create(max_bytes: u64) -> Result<Self, StagingError> {
        Self::create_in(&std::env::temp_dir(), max_bytes).await
    }

    /// As [`create`](Self::create), into an explicit directory.
    pub async fn create_in(dir: &Path, max_bytes: u64) -> Result<Self, StagingError> {
        // Random-suffixed name; concurrent stagings never collide. The
        // .mp4 suffix keeps external tools happy about the container.
        let tmp = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .suffix(".mp4")
            .tempfile_in(dir)?;

        let file = tokio::fs::File::from_std(tmp.reopen()?);

        Ok(StagingSink {
            tmp,
            file,
            copied: 0,
            max_bytes,
        })
    }

    /// Append a chunk, failing once the ceiling is crossed.
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), StagingError> {
        self.copied += chunk.len() as u64;
        if self.copied > self.max_bytes {
            return Err(StagingError::TooLarge {
                max: self.max_bytes,
            });
        }

        self.file.write_all(chunk).await?;
        Ok(())
    }

    /// Seal the staged upload.
    pub async fn finish(mut self) -> Result<StagedFile, StagingError> {
        self.file.flush().await?;

        tracing::debug!(
            path = %self.tmp.path().display(),
            size_bytes = self.copied,
            "upload staged"
        );

        Ok(StagedFile { inner: self.tmp })
    }
}

/// Buffer an upload stream to a staged temp file, copying at most
/// `max_bytes`. On any failure (including the size ceiling) the partial
/// file is removed before returning.
pub async fn stage<R>(reader: R, max_bytes: u64) -> Result<StagedFile, StagingError>
where
    R: AsyncRead + Unpin,
{
    stage_in(&std::env::temp_dir(), reader, max_bytes).await
}

/// As [`stage`], into an explicit directory.
pub async fn stage_in<R>(
    dir: &Path,
    mut reader: R,
    max_bytes: u64,
) -> Result<StagedFile, StagingError>
where
    R: AsyncRead + Unpin,
{
    let mut sink = StagingSink::create_in(dir, max_bytes).await?;
    let mut buf = vec![0u8; COPY_BUF_SIZE];

    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        sink.write_chunk(&buf[..n]).await?;
    }

    sink.finish().await
}
