//! Video metadata record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A video metadata record. The ingestion pipeline's only mutation right
/// is setting the URL fields after a successful storage commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub title: String,
    pub description: Option<String>,
    /// Owner. Upload handlers must verify this against the authenticated
    /// user before staging bytes or mutating the record.
    pub user_id: Uuid,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
}

/// Fields required to create a video record.
#[derive(Debug, Clone, Deserialize)]
pub struct NewVideo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Video {
    pub fn new(user_id: Uuid, new: NewVideo) -> Self {
        let now = Utc::now();
        Video {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            title: new.title,
            description: new.description,
            user_id,
            thumbnail_url: None,
            video_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_video_has_no_urls() {
        let video = Video::new(
            Uuid::new_v4(),
            NewVideo {
                title: "boots highlights".to_string(),
                description: None,
            },
        );
        assert!(video.thumbnail_url.is_none());
        assert!(video.video_url.is_none());
        assert_eq!(video.created_at, video.updated_at);
    }

    #[test]
    fn test_video_serializes_url_fields() {
        let mut video = Video::new(
            Uuid::new_v4(),
            NewVideo {
                title: "t".to_string(),
                description: Some("d".to_string()),
            },
        );
        video.video_url = Some("https://cdn.example.com/landscape/abc.mp4".to_string());

        let json = serde_json::to_value(&video).expect("serialize");
        assert_eq!(
            json.get("video_url").and_then(|v| v.as_str()),
            Some("https://cdn.example.com/landscape/abc.mp4")
        );
        assert!(json.get("thumbnail_url").is_some_and(|v| v.is_null()));
    }
}
