//! Storage backends for persisted media.
//!
//! Videos go to an object store (`S3Storage`); thumbnails go to a local
//! asset root (`LocalStorage`). Both implement the [`Storage`] trait so
//! the ingestion pipeline and tests stay backend-agnostic. Storage keys
//! are generated by [`keys`], never derived from client input.

pub mod keys;
mod local;
mod s3;
mod traits;

pub use local::LocalStorage;
pub use s3::S3Storage;
pub use traits::{Storage, StorageBackend, StorageError, StorageResult};
