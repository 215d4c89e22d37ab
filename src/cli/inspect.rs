//! Inspect command implementation

use image::ColorType;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_SUCCESS};
use crate::codec::decode_file;
use crate::config::Scale3xConfig;
use crate::upscale::{fallback_factor, output_dimensions};

/// What an upscale of one image would do.
#[derive(Debug, Serialize, PartialEq)]
struct ImageReport {
    file: String,
    width: u32,
    height: u32,
    color_type: String,
    channels: u8,
    prescale: Option<u32>,
    output_width: u64,
    output_height: u64,
}

fn build_report(
    file: &Path,
    (width, height): (u32, u32),
    color: ColorType,
    fallback: bool,
) -> ImageReport {
    let (output_width, output_height) = output_dimensions(width, height, fallback);

    ImageReport {
        file: file.display().to_string(),
        width,
        height,
        color_type: format!("{:?}", color),
        channels: color.channel_count(),
        prescale: if fallback { fallback_factor(width, height) } else { None },
        output_width,
        output_height,
    }
}

/// Print dimensions, pixel layout and the planned output size of an image.
pub fn run_inspect(input: &Path, json: bool, config: &Scale3xConfig) -> ExitCode {
    let image = match decode_file(input) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Error: Cannot open input file '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let report = build_report(
        input,
        (image.width(), image.height()),
        image.color(),
        config.upscale.fallback,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report).expect("JSON value serialization"));
    } else {
        println!("File:     {}", report.file);
        println!("Size:     {}x{}", report.width, report.height);
        println!("Layout:   {} ({} channels)", report.color_type, report.channels);
        match report.prescale {
            Some(k) => println!(
                "Prescale: x{} to {}x{}",
                k,
                report.width * k,
                report.height * k
            ),
            None => println!("Prescale: none"),
        }
        println!("Output:   {}x{}", report.output_width, report.output_height);
    }

    ExitCode::from(EXIT_SUCCESS)
}
