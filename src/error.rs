//! Error types for the Scale3x pipeline

use std::io;
use thiserror::Error;

/// Error returned by the decode/upscale/encode pipeline.
///
/// The classifier itself cannot fail; every variant comes from the codec
/// or the filesystem around it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Scale3xError {
    /// Input could not be read or decoded
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    /// Output could not be encoded or written
    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
    /// Filesystem error around the codec (e.g. creating output directories)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
