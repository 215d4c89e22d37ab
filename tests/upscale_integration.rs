//! Integration tests for the Scale3x pipeline
//!
//! # Test Categories
//!
//! 1. **Algorithm Correctness** - Output characteristics on known patterns
//! 2. **Structural Properties** - Size law, center identity, mirror symmetry
//! 3. **Determinism** - SHA256 comparison of parallel and sequential output
//! 4. **Codec Pipeline** - Byte-level decode/upscale/encode round trips

use image::imageops::{flip_horizontal, flip_vertical};
use image::{DynamicImage, GrayImage, Luma, LumaA, Rgb, Rgba, RgbaImage};
use scale3x::codec::{decode_bytes, encode_to_vec};
use scale3x::upscale::scale3x_with;
use scale3x::{scale3x, upscale, upscale_bytes, OutputFormat, Scale3xError, UpscaleOptions};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

// ============================================================================
// Test Utilities
// ============================================================================

/// Calculate SHA256 hash of image pixels for deterministic verification.
fn hash_image(image: &RgbaImage) -> String {
    let mut hasher = Sha256::new();
    hasher.update(image.as_raw());
    format!("{:x}", hasher.finalize())
}

/// Create a checkerboard pattern image.
///
/// Layout:
/// ```text
/// [W][B][W][B]
/// [B][W][B][W]
/// [W][B][W][B]
/// [B][W][B][W]
/// ```
fn create_checkerboard_image() -> RgbaImage {
    let white = Rgba([255, 255, 255, 255]);
    let black = Rgba([0, 0, 0, 255]);
    RgbaImage::from_fn(4, 4, |x, y| if (x + y) % 2 == 0 { white } else { black })
}

/// Create a diagonal line image.
///
/// Layout:
/// ```text
/// [X][_][_][_]
/// [_][X][_][_]
/// [_][_][X][_]
/// [_][_][_][X]
/// ```
fn create_diagonal_image() -> RgbaImage {
    let foreground = Rgba([255, 128, 0, 255]);
    let background = Rgba([0, 0, 0, 0]);
    RgbaImage::from_fn(4, 4, |x, y| if x == y { foreground } else { background })
}

/// Irregular three-color pattern with plenty of edges.
fn create_noise_image(width: u32, height: u32) -> RgbaImage {
    let palette = [Rgba([200, 40, 40, 255]), Rgba([40, 200, 40, 255]), Rgba([40, 40, 200, 255])];
    RgbaImage::from_fn(width, height, |x, y| palette[((x * 7 + y * 13 + x * y) % 3) as usize])
}

// ============================================================================
// Algorithm Correctness
// ============================================================================

#[test]
fn test_checkerboard_interior_is_flat() {
    let input = create_checkerboard_image();
    let output = scale3x(&input);

    // Interior pixels have B == H and D == F, so every block is a flat copy
    for y in 1..3 {
        for x in 1..3 {
            let expected = *input.get_pixel(x, y);
            for dy in 0..3 {
                for dx in 0..3 {
                    assert_eq!(*output.get_pixel(x * 3 + dx, y * 3 + dy), expected);
                }
            }
        }
    }
}

#[test]
fn test_diagonal_line_is_thickened() {
    let input = create_diagonal_image();
    let foreground = *input.get_pixel(0, 0);
    let background = *input.get_pixel(1, 0);

    let output = scale3x(&input);

    // Pixel (2,1) gains a foreground bottom-left corner, (1,2) a top-right one
    assert_eq!(*output.get_pixel(6, 5), foreground);
    assert_eq!(*output.get_pixel(5, 6), foreground);
    assert_eq!(*output.get_pixel(7, 5), background);
    assert_eq!(*output.get_pixel(8, 3), background);

    // Line pixels themselves are flat copies
    for d in 3..6 {
        assert_eq!(*output.get_pixel(d, d), foreground);
    }
}

#[test]
fn test_uniform_image_stays_uniform() {
    let color = Rgb([12u8, 34, 56]);
    let input = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(5, 3, color));

    let output = upscale(&input, &UpscaleOptions::default());

    assert_eq!((output.width(), output.height()), (15, 9));
    assert!(output.as_rgb8().unwrap().pixels().all(|p| *p == color));
}

#[test]
fn test_one_pixel_without_fallback_is_uniform() {
    let color = LumaA([77u8, 200]);
    let input = DynamicImage::ImageLumaA8(image::ImageBuffer::from_pixel(1, 1, color));

    let output = upscale(&input, &UpscaleOptions::pure());

    assert_eq!((output.width(), output.height()), (3, 3));
    assert!(output.as_luma_alpha8().unwrap().pixels().all(|p| *p == color));
}

#[test]
fn test_small_image_fallback_sizes() {
    let cases = [((2, 2), (12, 12)), ((1, 1), (9, 9)), ((2, 1), (18, 9)), ((3, 1), (18, 6))];
    for ((w, h), expected) in cases {
        let input = DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([9, 9, 9, 255])));
        let output = upscale(&input, &UpscaleOptions::default());
        assert_eq!((output.width(), output.height()), expected, "input {}x{}", w, h);
    }
}

// ============================================================================
// Structural Properties
// ============================================================================

#[test]
fn test_size_law() {
    for (w, h) in [(3, 3), (1, 9), (10, 1), (17, 5)] {
        let output = scale3x(&create_noise_image(w, h));
        assert_eq!(output.dimensions(), (w * 3, h * 3));
    }
}

#[test]
fn test_center_identity_over_image() {
    let input = create_noise_image(9, 6);
    let output = scale3x(&input);

    for (x, y, pixel) in input.enumerate_pixels() {
        assert_eq!(output.get_pixel(x * 3 + 1, y * 3 + 1), pixel);
    }
}

#[test]
fn test_no_new_colors() {
    let input = create_noise_image(8, 8);
    let output = scale3x(&input);

    let palette: HashSet<_> = input.pixels().map(|p| p.0).collect();
    assert!(output.pixels().all(|p| palette.contains(&p.0)));
}

#[test]
fn test_mirror_symmetry() {
    let input = create_noise_image(7, 5);

    assert_eq!(scale3x(&flip_horizontal(&input)), flip_horizontal(&scale3x(&input)));
    assert_eq!(scale3x(&flip_vertical(&input)), flip_vertical(&scale3x(&input)));
}

#[test]
fn test_grayscale_layout_roundtrip() {
    let mut input = GrayImage::from_pixel(4, 4, Luma([10]));
    input.put_pixel(1, 1, Luma([250]));

    let output = upscale(&DynamicImage::ImageLuma8(input), &UpscaleOptions::default());

    assert_eq!(output.color(), image::ColorType::L8);
    assert_eq!(output.as_luma8().unwrap().get_pixel(4, 4), &Luma([250]));
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_parallel_and_sequential_hashes_match() {
    let input = create_noise_image(31, 17);

    let parallel = scale3x_with(&input, true);
    let sequential = scale3x_with(&input, false);

    assert_eq!(hash_image(&parallel), hash_image(&sequential));
}

#[test]
fn test_repeated_runs_are_identical() {
    let input = create_diagonal_image();
    assert_eq!(hash_image(&scale3x(&input)), hash_image(&scale3x(&input)));
}

// ============================================================================
// Codec Pipeline
// ============================================================================

#[test]
fn test_upscale_bytes_png_roundtrip() {
    let input = create_noise_image(6, 4);
    let bytes =
        encode_to_vec(&DynamicImage::ImageRgba8(input.clone()), OutputFormat::Png).unwrap();

    let out = upscale_bytes(&bytes, &UpscaleOptions::default(), OutputFormat::Png).unwrap();
    let decoded = decode_bytes(&out).unwrap().to_rgba8();

    assert_eq!(decoded, scale3x(&input));
}

#[test]
fn test_upscale_bytes_bmp_output() {
    let input = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(3, 3, Rgb([1, 2, 3])));
    let bytes = encode_to_vec(&input, OutputFormat::Png).unwrap();

    let out = upscale_bytes(&bytes, &UpscaleOptions::default(), OutputFormat::Bmp).unwrap();

    assert_eq!(&out[..2], b"BM");
    let decoded = decode_bytes(&out).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (9, 9));
}

#[test]
fn test_upscale_bytes_corrupt_input() {
    let result = upscale_bytes(b"\x00\x01\x02", &UpscaleOptions::default(), OutputFormat::Png);
    assert!(matches!(result, Err(Scale3xError::Decode(_))));
}
