//! Fixed media-type allowlists. These are contract, not configuration:
//! the thumbnail and video endpoints accept exactly these types.

/// Content types accepted by the thumbnail upload endpoint.
pub const THUMBNAIL_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Content types accepted by the video upload endpoint. The remux stage
/// always emits an MP4 container, so nothing else is accepted in.
pub const VIDEO_CONTENT_TYPES: &[&str] = &["video/mp4"];

/// Multipart field names for the upload endpoints.
pub const THUMBNAIL_FIELD: &str = "thumbnail";
pub const VIDEO_FIELD: &str = "video";
