//! Upscale command implementation

use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::codec::{upscale_file, OutputFormat};
use crate::config::Scale3xConfig;
use crate::output::{find_image_files, generate_output_path};

/// Whether `path` looks like an output of an earlier run with `suffix`.
fn is_generated_output(path: &Path, suffix: &str) -> bool {
    path.file_stem().and_then(|s| s.to_str()).is_some_and(|stem| stem.ends_with(suffix))
}

/// Expand directory arguments into the image files they contain.
///
/// Files found in a directory whose stem already ends with `suffix` are
/// skipped. Explicitly named files are always kept.
fn collect_inputs(inputs: &[PathBuf], suffix: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let found = find_image_files(input);
            if found.is_empty() {
                warn!("no image files found in {}", input.display());
            }
            for file in found {
                if is_generated_output(&file, suffix) {
                    debug!("skipping {}: already upscaled", file.display());
                } else {
                    files.push(file);
                }
            }
        } else {
            files.push(input.clone());
        }
    }
    files
}

/// Pick the output format: configured, else from the explicit output file, else the input's.
fn resolve_format(
    configured: Option<OutputFormat>,
    input: &Path,
    output: Option<&Path>,
    is_single_input: bool,
) -> OutputFormat {
    if let Some(format) = configured {
        return format;
    }
    match output {
        Some(out) if is_single_input && !out.is_dir() && out.extension().is_some() => {
            OutputFormat::for_path(out)
        }
        _ => OutputFormat::for_path(input),
    }
}

/// Upscale every input image and write the results.
///
/// Keeps going after a failed image; the exit code reports whether any failed.
pub fn run_upscale(inputs: &[PathBuf], output: Option<&Path>, config: &Scale3xConfig) -> ExitCode {
    let files = collect_inputs(inputs, &config.output.suffix);
    if files.is_empty() {
        eprintln!("Error: No input images found");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let is_single_input = files.len() == 1;
    let options = config.upscale.options();
    let mut failed = 0usize;

    for file in &files {
        let format = resolve_format(config.output.format, file, output, is_single_input);
        let output_path = generate_output_path(
            file,
            output,
            &config.output.suffix,
            format.extension(),
            is_single_input,
        );

        match upscale_file(file, &output_path, &options, format) {
            Ok(summary) => {
                if let Some(k) = summary.prescale {
                    info!(
                        "{}: {}x{} is below 3x3, pre-scaled by {}",
                        file.display(),
                        summary.source.0,
                        summary.source.1,
                        k
                    );
                }
                info!(
                    "{} ({}x{}) -> {} ({}x{})",
                    file.display(),
                    summary.source.0,
                    summary.source.1,
                    output_path.display(),
                    summary.output.0,
                    summary.output.1
                );
                println!("Saved: {}", output_path.display());
            }
            Err(e) => {
                eprintln!("Error: '{}': {}", file.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        if !is_single_input {
            eprintln!("Error: {} of {} images failed", failed, files.len());
        }
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}
