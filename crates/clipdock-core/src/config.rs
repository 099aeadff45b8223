//! Configuration module
//!
//! One `Config` is built from the environment at startup, validated, and
//! passed into each component. No ambient global state.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8080;
const MAX_THUMBNAIL_SIZE_MB: usize = 10;
const MAX_VIDEO_SIZE_MB: usize = 1024;
const TOOL_TIMEOUT_SECS: u64 = 120;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub jwt_secret: String,
    /// Root directory thumbnails are written to and served from.
    pub assets_root: PathBuf,
    /// Public base URL for files under `assets_root`.
    pub assets_base_url: String,
    // Object storage (videos)
    pub s3_bucket: String,
    pub s3_region: String,
    /// Custom endpoint for S3-compatible providers (MinIO, Spaces, ...).
    pub s3_endpoint: Option<String>,
    /// Distribution host committed video URLs are synthesized from.
    pub s3_distribution_host: String,
    // Upload ceilings, enforced at the transport layer and again in staging
    pub max_thumbnail_size_bytes: usize,
    pub max_video_size_bytes: usize,
    // External tools
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    pub tool_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let server_port = env::var("PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?;

        let assets_base_url = env::var("ASSETS_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}/assets", server_port));

        let config = Config {
            server_port,
            environment,
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            assets_root: env::var("ASSETS_ROOT")
                .unwrap_or_else(|_| "./assets".to_string())
                .into(),
            assets_base_url,
            s3_bucket: env::var("S3_BUCKET")
                .map_err(|_| anyhow::anyhow!("S3_BUCKET must be set"))?,
            s3_region: env::var("S3_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .map_err(|_| anyhow::anyhow!("S3_REGION or AWS_REGION must be set"))?,
            s3_endpoint: env::var("S3_ENDPOINT").ok().filter(|s| !s.is_empty()),
            s3_distribution_host: env::var("S3_CF_DISTRIBUTION")
                .map_err(|_| anyhow::anyhow!("S3_CF_DISTRIBUTION must be set"))?,
            max_thumbnail_size_bytes: env::var("MAX_THUMBNAIL_SIZE_MB")
                .unwrap_or_else(|_| MAX_THUMBNAIL_SIZE_MB.to_string())
                .parse::<usize>()
                .unwrap_or(MAX_THUMBNAIL_SIZE_MB)
                * 1024
                * 1024,
            max_video_size_bytes: env::var("MAX_VIDEO_SIZE_MB")
                .unwrap_or_else(|_| MAX_VIDEO_SIZE_MB.to_string())
                .parse::<usize>()
                .unwrap_or(MAX_VIDEO_SIZE_MB)
                * 1024
                * 1024,
            ffmpeg_path: env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string()),
            ffprobe_path: env::var("FFPROBE_PATH").unwrap_or_else(|_| "ffprobe".to_string()),
            tool_timeout: Duration::from_secs(
                env::var("TOOL_TIMEOUT_SECS")
                    .unwrap_or_else(|_| TOOL_TIMEOUT_SECS.to_string())
                    .parse()
                    .unwrap_or(TOOL_TIMEOUT_SECS),
            ),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.jwt_secret.len() < 32 {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least 32 characters long"
            ));
        }

        if self.s3_distribution_host.contains("://") {
            return Err(anyhow::anyhow!(
                "S3_CF_DISTRIBUTION must be a bare host, not a URL"
            ));
        }

        if self.max_thumbnail_size_bytes == 0 || self.max_video_size_bytes == 0 {
            return Err(anyhow::anyhow!("upload size ceilings must be non-zero"));
        }

        if self.tool_timeout.is_zero() {
            return Err(anyhow::anyhow!("TOOL_TIMEOUT_SECS must be non-zero"));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server_port: 8080,
            environment: "development".to_string(),
            jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
            assets_root: "./assets".into(),
            assets_base_url: "http://localhost:8080/assets".to_string(),
            s3_bucket: "clipdock-videos".to_string(),
            s3_region: "us-east-1".to_string(),
            s3_endpoint: None,
            s3_distribution_host: "d111111abcdef8.cloudfront.net".to_string(),
            max_thumbnail_size_bytes: 10 * 1024 * 1024,
            max_video_size_bytes: 1024 * 1024 * 1024,
            ffmpeg_path: "ffmpeg".to_string(),
            ffprobe_path: "ffprobe".to_string(),
            tool_timeout: Duration::from_secs(120),
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_short_jwt_secret() {
        let mut config = test_config();
        config.jwt_secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_distribution_url() {
        let mut config = test_config();
        config.s3_distribution_host = "https://cdn.example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_is_production() {
        let mut config = test_config();
        assert!(!config.is_production());
        config.environment = "Production".to_string();
        assert!(config.is_production());
    }
}
