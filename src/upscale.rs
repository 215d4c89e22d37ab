//! Scale3x image driver.
//!
//! Tiles a decoded image into clamp-to-edge neighborhoods, runs the
//! [`classify`](crate::classify::classify) rule once per source pixel and
//! writes every resulting block into a single pre-sized output buffer.
//!
//! Images with fewer than nine pixels are first pre-scaled with a smooth
//! filter so that at least one real 3x3 neighborhood exists.
//!
//! # Example
//!
//! ```
//! use image::{DynamicImage, Rgba, RgbaImage};
//! use scale3x::upscale::{upscale, UpscaleOptions};
//!
//! let input = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255])));
//! let output = upscale(&input, &UpscaleOptions::default());
//! assert_eq!((output.width(), output.height()), (12, 12));
//! ```

use crate::classify::{classify, Neighborhood};
use clap::ValueEnum;
use image::imageops::FilterType;
use image::{DynamicImage, ImageBuffer, Pixel};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Pixel count below which the small-image pre-scale kicks in.
pub const MIN_PIXELS: u64 = 9;

/// Smooth resampling filter used for the small-image pre-scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FallbackFilter {
    /// Nearest-neighbor (no smoothing)
    Nearest,
    /// Linear filter
    Triangle,
    /// Cubic filter
    #[serde(rename = "catmullrom")]
    #[value(name = "catmullrom")]
    CatmullRom,
    /// Gaussian filter
    Gaussian,
    /// Lanczos with window 3 (default)
    #[default]
    Lanczos3,
}

impl From<FallbackFilter> for FilterType {
    fn from(filter: FallbackFilter) -> Self {
        match filter {
            FallbackFilter::Nearest => FilterType::Nearest,
            FallbackFilter::Triangle => FilterType::Triangle,
            FallbackFilter::CatmullRom => FilterType::CatmullRom,
            FallbackFilter::Gaussian => FilterType::Gaussian,
            FallbackFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl std::fmt::Display for FallbackFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackFilter::Nearest => write!(f, "nearest"),
            FallbackFilter::Triangle => write!(f, "triangle"),
            FallbackFilter::CatmullRom => write!(f, "catmullrom"),
            FallbackFilter::Gaussian => write!(f, "gaussian"),
            FallbackFilter::Lanczos3 => write!(f, "lanczos3"),
        }
    }
}

/// Options for a Scale3x run.
#[derive(Debug, Clone)]
pub struct UpscaleOptions {
    /// Pre-scale images smaller than one neighborhood before classifying.
    pub fallback: bool,
    /// Filter used by the pre-scale.
    pub filter: FallbackFilter,
    /// Fill output bands on the rayon thread pool.
    pub parallel: bool,
}

impl Default for UpscaleOptions {
    fn default() -> Self {
        Self { fallback: true, filter: FallbackFilter::default(), parallel: true }
    }
}

impl UpscaleOptions {
    /// Plain Scale3x: no pre-scale, tiny images rely on edge clamping alone.
    pub fn pure() -> Self {
        Self { fallback: false, ..Self::default() }
    }

    /// Same as the defaults but filled on the calling thread.
    pub fn sequential() -> Self {
        Self { parallel: false, ..Self::default() }
    }
}

/// Integer pre-scale factor for an image of `width x height`.
///
/// Returns the smallest `k` with `width * height * k * k >= 9`, or `None`
/// when the image already has enough pixels (or has none at all).
pub fn fallback_factor(width: u32, height: u32) -> Option<u32> {
    let pixels = width as u64 * height as u64;
    if pixels == 0 || pixels >= MIN_PIXELS {
        return None;
    }

    let mut k = 2u64;
    while pixels * k * k < MIN_PIXELS {
        k += 1;
    }
    Some(k as u32)
}

/// Final output size for a `width x height` source.
///
/// Computed in `u64`: a header-only inspection can name sizes whose 3x
/// output no longer fits a `u32`.
pub fn output_dimensions(width: u32, height: u32, fallback: bool) -> (u64, u64) {
    let k = if fallback { fallback_factor(width, height).unwrap_or(1) } else { 1 };
    (width as u64 * k as u64 * 3, height as u64 * k as u64 * 3)
}

/// Pre-scale a too-small image with `filter`.
///
/// Returns `None` when no pre-scale is needed. The pixel layout of the
/// image is preserved.
pub fn prescale_small(image: &DynamicImage, filter: FallbackFilter) -> Option<DynamicImage> {
    let (width, height) = (image.width(), image.height());
    let k = fallback_factor(width, height)?;

    debug!(
        "pre-scaling {}x{} image by {} to {}x{} ({})",
        width,
        height,
        k,
        width * k,
        height * k,
        filter
    );
    Some(image.resize_exact(width * k, height * k, filter.into()))
}

/// Upscale a decoded image by 3x.
///
/// Applies the small-image pre-scale when enabled, then dispatches on the
/// pixel layout so the output keeps the input's channels and bit depth.
pub fn upscale(image: &DynamicImage, options: &UpscaleOptions) -> DynamicImage {
    let prescaled =
        if options.fallback { prescale_small(image, options.filter) } else { None };
    let source = prescaled.as_ref().unwrap_or(image);
    let parallel = options.parallel;

    debug!(
        "scale3x {}x{} {:?} (parallel: {})",
        source.width(),
        source.height(),
        source.color(),
        parallel
    );

    match source {
        DynamicImage::ImageLuma8(buf) => DynamicImage::ImageLuma8(scale3x_with(buf, parallel)),
        DynamicImage::ImageLumaA8(buf) => DynamicImage::ImageLumaA8(scale3x_with(buf, parallel)),
        DynamicImage::ImageRgb8(buf) => DynamicImage::ImageRgb8(scale3x_with(buf, parallel)),
        DynamicImage::ImageRgba8(buf) => DynamicImage::ImageRgba8(scale3x_with(buf, parallel)),
        DynamicImage::ImageLuma16(buf) => DynamicImage::ImageLuma16(scale3x_with(buf, parallel)),
        DynamicImage::ImageLumaA16(buf) => {
            DynamicImage::ImageLumaA16(scale3x_with(buf, parallel))
        }
        DynamicImage::ImageRgb16(buf) => DynamicImage::ImageRgb16(scale3x_with(buf, parallel)),
        DynamicImage::ImageRgba16(buf) => DynamicImage::ImageRgba16(scale3x_with(buf, parallel)),
        DynamicImage::ImageRgb32F(buf) => DynamicImage::ImageRgb32F(scale3x_with(buf, parallel)),
        DynamicImage::ImageRgba32F(buf) => {
            DynamicImage::ImageRgba32F(scale3x_with(buf, parallel))
        }
        // Layouts added to `image` later: widest lossless representation
        other => DynamicImage::ImageRgba32F(scale3x_with(&other.to_rgba32f(), parallel)),
    }
}

/// Scale a typed buffer by 3x, filling output bands in parallel.
pub fn scale3x<P>(input: &ImageBuffer<P, Vec<P::Subpixel>>) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + PartialEq + Send + Sync,
    P::Subpixel: Send + Sync,
{
    scale3x_with(input, true)
}

/// Scale a typed buffer by 3x, optionally on the rayon pool.
///
/// Each source row owns the band of three output rows below `3 * y`, so
/// bands are disjoint and need no synchronization.
pub fn scale3x_with<P>(
    input: &ImageBuffer<P, Vec<P::Subpixel>>,
    parallel: bool,
) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + PartialEq + Send + Sync,
    P::Subpixel: Send + Sync,
{
    let (width, height) = input.dimensions();
    let mut output: ImageBuffer<P, Vec<P::Subpixel>> = ImageBuffer::new(width * 3, height * 3);
    if width == 0 || height == 0 {
        return output;
    }

    let band_len = width as usize * 9 * P::CHANNEL_COUNT as usize;
    let fill = |(y, band): (usize, &mut [P::Subpixel])| fill_band(input, y as u32, band);

    if parallel {
        output.par_chunks_mut(band_len).enumerate().for_each(fill);
    } else {
        output.chunks_mut(band_len).enumerate().for_each(fill);
    }

    output
}

/// Write the three output rows produced by source row `y`.
fn fill_band<P>(input: &ImageBuffer<P, Vec<P::Subpixel>>, y: u32, band: &mut [P::Subpixel])
where
    P: Pixel + PartialEq,
{
    let width = input.width() as usize;
    let channels = P::CHANNEL_COUNT as usize;
    let row_len = width * 3 * channels;

    for x in 0..width {
        let block = classify(neighborhood_at(input, x as u32, y));
        for (row, pixels) in block.rows().iter().enumerate() {
            let start = row * row_len + x * 3 * channels;
            for (col, pixel) in pixels.iter().enumerate() {
                let offset = start + col * channels;
                band[offset..offset + channels].copy_from_slice(pixel.channels());
            }
        }
    }
}

/// Build the clamp-to-edge neighborhood of `(x, y)`.
///
/// # Panics
///
/// Panics if the image has no pixels.
pub fn neighborhood_at<P>(img: &ImageBuffer<P, Vec<P::Subpixel>>, x: u32, y: u32) -> Neighborhood<P>
where
    P: Pixel,
{
    let (x, y) = (x as i64, y as i64);
    let at = |dx: i64, dy: i64| get_pixel_clamped(img, x + dx, y + dy);

    Neighborhood {
        a: at(-1, -1),
        b: at(0, -1),
        c: at(1, -1),
        d: at(-1, 0),
        e: at(0, 0),
        f: at(1, 0),
        g: at(-1, 1),
        h: at(0, 1),
        i: at(1, 1),
    }
}

/// Get a pixel with clamped coordinates.
fn get_pixel_clamped<P: Pixel>(img: &ImageBuffer<P, Vec<P::Subpixel>>, x: i64, y: i64) -> P {
    let (w, h) = img.dimensions();
    let cx = x.clamp(0, w as i64 - 1) as u32;
    let cy = y.clamp(0, h as i64 - 1) as u32;
    *img.get_pixel(cx, cy)
}
