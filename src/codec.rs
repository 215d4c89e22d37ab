//! Decode/encode wrappers and the full file pipeline
//!
//! Decoding and encoding are delegated to the `image` crate; this module only
//! maps its errors onto [`Scale3xError`] and ties the steps together.

use crate::error::Scale3xError;
use crate::output::ensure_parent_dir;
use crate::upscale::{fallback_factor, upscale, UpscaleOptions};
use clap::ValueEnum;
use image::{DynamicImage, ImageFormat};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Encodable output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// PNG (lossless, default)
    #[default]
    Png,
    /// Windows bitmap
    Bmp,
    /// Truevision TGA
    Tga,
    /// TIFF
    Tiff,
    /// GIF (palette-quantized by the encoder)
    Gif,
    /// JPEG (lossy, no alpha)
    Jpeg,
}

impl OutputFormat {
    /// File extension used when generating output names.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Tga => "tga",
            OutputFormat::Tiff => "tiff",
            OutputFormat::Gif => "gif",
            OutputFormat::Jpeg => "jpg",
        }
    }

    /// Match a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "bmp" => Some(OutputFormat::Bmp),
            "tga" => Some(OutputFormat::Tga),
            "tif" | "tiff" => Some(OutputFormat::Tiff),
            "gif" => Some(OutputFormat::Gif),
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            _ => None,
        }
    }

    /// Format to write for `path`: its own extension if encodable, else PNG.
    pub fn for_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .unwrap_or_default()
    }
}

impl From<OutputFormat> for ImageFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Bmp => ImageFormat::Bmp,
            OutputFormat::Tga => ImageFormat::Tga,
            OutputFormat::Tiff => ImageFormat::Tiff,
            OutputFormat::Gif => ImageFormat::Gif,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Sizes involved in one upscale run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpscaleSummary {
    /// Decoded input size
    pub source: (u32, u32),
    /// Pre-scale factor applied to a too-small input, if any
    pub prescale: Option<u32>,
    /// Size of the written image
    pub output: (u32, u32),
}

/// Decode an in-memory image, guessing the format from its contents.
pub fn decode_bytes(bytes: &[u8]) -> Result<DynamicImage, Scale3xError> {
    image::load_from_memory(bytes).map_err(Scale3xError::Decode)
}

/// Open and decode an image file.
pub fn decode_file(path: &Path) -> Result<DynamicImage, Scale3xError> {
    image::open(path).map_err(Scale3xError::Decode)
}

/// Encode an image into a byte vector.
pub fn encode_to_vec(image: &DynamicImage, format: OutputFormat) -> Result<Vec<u8>, Scale3xError> {
    let mut cursor = Cursor::new(Vec::new());
    image.write_to(&mut cursor, ImageFormat::from(format)).map_err(Scale3xError::Encode)?;
    Ok(cursor.into_inner())
}

/// Save an image, creating parent directories as needed.
///
/// The image is fully encoded before anything touches the filesystem, so an
/// encode failure leaves no file (or directory) behind.
pub fn save_image(
    image: &DynamicImage,
    path: &Path,
    format: OutputFormat,
) -> Result<(), Scale3xError> {
    let bytes = encode_to_vec(image, format)?;
    ensure_parent_dir(path)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Decode `bytes`, upscale, and encode the result as `format`.
pub fn upscale_bytes(
    bytes: &[u8],
    options: &UpscaleOptions,
    format: OutputFormat,
) -> Result<Vec<u8>, Scale3xError> {
    let decoded = decode_bytes(bytes)?;
    encode_to_vec(&upscale(&decoded, options), format)
}

/// Decode `input`, upscale, and write the result to `output`.
///
/// Nothing is written if decoding or encoding fails.
pub fn upscale_file(
    input: &Path,
    output: &Path,
    options: &UpscaleOptions,
    format: OutputFormat,
) -> Result<UpscaleSummary, Scale3xError> {
    let decoded = decode_file(input)?;
    let source = (decoded.width(), decoded.height());
    let prescale = if options.fallback { fallback_factor(source.0, source.1) } else { None };

    let upscaled = upscale(&decoded, options);
    debug!(
        "{}: {}x{} -> {}x{}",
        input.display(),
        source.0,
        source.1,
        upscaled.width(),
        upscaled.height()
    );

    save_image(&upscaled, output, format)?;
    Ok(UpscaleSummary { source, prescale, output: (upscaled.width(), upscaled.height()) })
}
