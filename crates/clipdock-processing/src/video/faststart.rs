//! Fast-start remux via ffmpeg.
//!
//! Rewrites an MP4 so the moov atom precedes the media data, enabling
//! playback before the full file downloads. Streams are copied, never
//! re-encoded; the input file is not modified.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempPath;
use tokio::process::Command;

use super::{run_tool, ProcessingError};

const FASTSTART_SUFFIX: &str = ".faststart.mp4";

/// Handle to a remux output file. The caller owns its lifecycle from the
/// moment the remux call returns; the file is removed on drop.
#[derive(Debug)]
pub struct RemuxedFile {
    path: TempPath,
}

impl RemuxedFile {
    /// Take ownership of an existing file as a remux output.
    pub fn from_path(path: PathBuf) -> Self {
        RemuxedFile {
            path: TempPath::from_path(path),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Remux capability. Implementations produce a sibling output file and
/// leave the input untouched.
#[async_trait]
pub trait MediaRemuxer: Send + Sync {
    async fn remux(&self, input: &Path) -> Result<RemuxedFile, ProcessingError>;
}

/// ffmpeg-backed remuxer.
pub struct FfmpegRemuxer {
    ffmpeg_path: String,
    timeout: Duration,
}

impl FfmpegRemuxer {
    pub fn new(ffmpeg_path: String, timeout: Duration) -> Self {
        Self {
            ffmpeg_path,
            timeout,
        }
    }

    /// Output path: the input path plus a fixed suffix. The input is a
    /// uniquely named staged file, so the derived name is unique too.
    fn output_path(input: &Path) -> PathBuf {
        let mut os: OsString = input.as_os_str().to_os_string();
        os.push(FASTSTART_SUFFIX);
        PathBuf::from(os)
    }

    /// Stream-copy remux arguments: no re-encode, index atom up front.
    fn build_args(input: &Path, output: &Path) -> Vec<OsString> {
        let mut args = vec![OsString::from("-i"), input.as_os_str().to_os_string()];
        args.extend(
            ["-c", "copy", "-movflags", "faststart", "-f", "mp4"]
                .into_iter()
                .map(OsString::from),
        );
        args.push(output.as_os_str().to_os_string());
        args
    }
}

#[async_trait]
impl MediaRemuxer for FfmpegRemuxer {
    #[tracing::instrument(skip(self), fields(tool = "ffmpeg"))]
    async fn remux(&self, input: &Path) -> Result<RemuxedFile, ProcessingError> {
        let output_path = Self::output_path(input);

        let mut command = Command::new(&self.ffmpeg_path);
        command
            .args(Self::build_args(input, &output_path))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        match run_tool("ffmpeg", &mut command, self.timeout).await {
            Ok(_) => {
                tracing::info!(
                    input = %input.display(),
                    output = %output_path.display(),
                    "fast-start remux completed"
                );
                Ok(RemuxedFile::from_path(output_path))
            }
            Err(e) => {
                // a failed or killed run may leave a partial output behind
                let _ = tokio::fs::remove_file(&output_path).await;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_is_sibling_with_suffix() {
        let input = Path::new("/tmp/clipdock-upload-abc123.mp4");
        assert_eq!(
            FfmpegRemuxer::output_path(input),
            PathBuf::from("/tmp/clipdock-upload-abc123.mp4.faststart.mp4")
        );
    }

    #[test]
    fn test_args_are_stream_copy_with_faststart() {
        let input = Path::new("/tmp/in.mp4");
        let output = Path::new("/tmp/in.mp4.faststart.mp4");
        let args: Vec<String> = FfmpegRemuxer::build_args(input, output)
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            args,
            vec![
                "-i",
                "/tmp/in.mp4",
                "-c",
                "copy",
                "-movflags",
                "faststart",
                "-f",
                "mp4",
                "/tmp/in.mp4.faststart.mp4",
            ]
        );
        // stream-copy only: no codec selection, no scaling
        assert!(!args.iter().any(|a| a == "libx264" || a == "-vf"));
    }

    #[tokio::test]
    async fn test_remuxed_file_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.faststart.mp4");
        tokio::fs::write(&path, b"mp4").await.unwrap();

        let remuxed = RemuxedFile::from_path(path.clone());
        assert!(path.exists());

        drop(remuxed);
        assert!(!path.exists());
    }
}
