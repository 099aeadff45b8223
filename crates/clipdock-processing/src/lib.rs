//! Media processing for clipdock: upload validation, temp staging, the
//! ffprobe/ffmpeg capability wrappers, aspect-ratio classification, and
//! the video ingest pipeline that sequences them.

pub mod staging;
pub mod validator;
pub mod video;

pub use staging::{stage, StagedFile, StagingError, StagingSink};
pub use validator::{validate_media_type, validate_size, ValidationError};
pub use video::classify::AspectBucket;
pub use video::faststart::{FfmpegRemuxer, MediaRemuxer, RemuxedFile};
pub use video::ingest::{IngestError, VideoIngestPipeline};
pub use video::probe::{FfprobeInspector, MediaInspector, VideoStreamInfo};
pub use video::ProcessingError;
