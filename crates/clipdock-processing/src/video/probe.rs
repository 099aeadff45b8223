//! Stream inspection via ffprobe.
//!
//! `MediaInspector` is the capability seam: the pipeline and its tests
//! depend on the trait, and only production wiring constructs the
//! ffprobe-backed implementation.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use super::{run_tool, ProcessingError};

/// Dimensions of the first video stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoStreamInfo {
    pub width: u32,
    pub height: u32,
}

/// Read-only media inspection capability.
#[async_trait]
pub trait MediaInspector: Send + Sync {
    /// Inspect the file at `path` and return the first video stream's
    /// dimensions. Must not modify the file.
    async fn probe(&self, path: &Path) -> Result<VideoStreamInfo, ProcessingError>;
}

/// ffprobe-backed inspector.
pub struct FfprobeInspector {
    ffprobe_path: String,
    timeout: Duration,
}

impl FfprobeInspector {
    pub fn new(ffprobe_path: String, timeout: Duration) -> Self {
        Self {
            ffprobe_path,
            timeout,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
}

/// Parse ffprobe's `-of json -show_streams` output into stream info.
fn parse_probe_output(stdout: &[u8]) -> Result<VideoStreamInfo, ProcessingError> {
    let output: ProbeOutput =
        serde_json::from_slice(stdout).map_err(|e| ProcessingError::ParseFailed {
            tool: "ffprobe",
            detail: e.to_string(),
        })?;

    let stream = output.streams.first().ok_or(ProcessingError::NoVideoStream)?;

    if stream.width == 0 || stream.height == 0 {
        return Err(ProcessingError::InvalidDimensions {
            width: stream.width,
            height: stream.height,
        });
    }

    Ok(VideoStreamInfo {
        width: stream.width,
        height: stream.height,
    })
}

#[async_trait]
impl MediaInspector for FfprobeInspector {
    #[tracing::instrument(skip(self), fields(tool = "ffprobe"))]
    async fn probe(&self, path: &Path) -> Result<VideoStreamInfo, ProcessingError> {
        let mut command = Command::new(&self.ffprobe_path);
        command
            .args([
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-show_streams",
                "-of",
                "json",
            ])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = run_tool("ffprobe", &mut command, self.timeout).await?;
        let info = parse_probe_output(&output.stdout)?;

        tracing::info!(
            path = %path.display(),
            width = info.width,
            height = info.height,
            "video probe completed"
        );

        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_probe_output() {
        let stdout = br#"{"streams":[{"index":0,"codec_name":"h264","width":1920,"height":1080}]}"#;
        let info = parse_probe_output(stdout).unwrap();
        assert_eq!(
            info,
            VideoStreamInfo {
                width: 1920,
                height: 1080
            }
        );
    }

    #[test]
    fn test_parse_uses_first_stream_only() {
        let stdout = br#"{"streams":[{"width":640,"height":480},{"width":1920,"height":1080}]}"#;
        let info = parse_probe_output(stdout).unwrap();
        assert_eq!(info.width, 640);
        assert_eq!(info.height, 480);
    }

    #[test]
    fn test_no_streams_is_an_error_not_a_default() {
        let result = parse_probe_output(br#"{"streams":[]}"#);
        assert!(matches!(result, Err(ProcessingError::NoVideoStream)));

        let result = parse_probe_output(br#"{}"#);
        assert!(matches!(result, Err(ProcessingError::NoVideoStream)));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let result = parse_probe_output(br#"{"streams":[{"width":0,"height":1080}]}"#);
        assert!(matches!(
            result,
            Err(ProcessingError::InvalidDimensions {
                width: 0,
                height: 1080
            })
        ));

        // audio-only stream objects carry no dimensions at all
        let result = parse_probe_output(br#"{"streams":[{"codec_type":"audio"}]}"#);
        assert!(matches!(
            result,
            Err(ProcessingError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_unparseable_output_rejected() {
        let result = parse_probe_output(b"not json at all");
        assert!(matches!(result, Err(ProcessingError::ParseFailed { .. })));
    }
}
