//! Scale3x - edge-preserving 3x upscaling for pixel art
//!
//! This library provides functionality to:
//! - Classify a 3x3 pixel neighborhood into its 3x3 Scale3x output block
//! - Upscale whole images of any `image` pixel layout, in parallel
//! - Decode, upscale and re-encode image files and byte buffers

pub mod classify;
pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod output;
pub mod upscale;

pub use classify::{classify, Neighborhood, OutputBlock};
pub use codec::{upscale_bytes, upscale_file, OutputFormat, UpscaleSummary};
pub use error::Scale3xError;
pub use upscale::{scale3x, upscale, FallbackFilter, UpscaleOptions};
