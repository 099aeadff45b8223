//! Core types for the clipdock media service: configuration, error
//! taxonomy, the video record model, and the metadata-store trait the
//! ingestion pipeline writes through.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod store;

pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
