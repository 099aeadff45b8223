//! Video pipeline stages: probing, classification, fast-start remux, and
//! the ingest orchestrator.

pub mod classify;
pub mod faststart;
pub mod ingest;
pub mod probe;

use std::process::Output;
use std::time::Duration;

use tokio::process::Command;

/// External tool and pipeline stage failures.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("failed to launch {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed: {stderr}")]
    ToolFailed {
        tool: &'static str,
        stderr: String,
    },

    #[error("{tool} timed out after {seconds}s")]
    Timeout { tool: &'static str, seconds: u64 },

    #[error("failed to parse {tool} output: {detail}")]
    ParseFailed {
        tool: &'static str,
        detail: String,
    },

    #[error("no video stream found in file")]
    NoVideoStream,

    #[error("invalid video dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run an external tool with captured output and a hard timeout. The
/// child is killed if the timeout elapses (`kill_on_drop`).
pub(crate) async fn run_tool(
    tool: &'static str,
    command: &mut Command,
    timeout: Duration,
) -> Result<Output, ProcessingError> {
    let start = std::time::Instant::now();

    let output = tokio::time::timeout(timeout, command.kill_on_drop(true).output())
        .await
        .map_err(|_| ProcessingError::Timeout {
            tool,
            seconds: timeout.as_secs(),
        })?
        .map_err(|source| ProcessingError::Spawn { tool, source })?;

    tracing::debug!(
        tool,
        status = %output.status,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "external tool finished"
    );

    if !output.status.success() {
        return Err(ProcessingError::ToolFailed {
            tool,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    Ok(output)
}
