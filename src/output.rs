//! Input discovery and output path generation

use glob::{glob_with, MatchOptions, Pattern};
use std::io;
use std::path::{Path, PathBuf};

/// Default suffix appended to the input stem.
pub const DEFAULT_SUFFIX: &str = "_3x";

/// Extensions the decoder is asked to try when scanning directories.
pub const INPUT_EXTENSIONS: &[&str] = &[
    "png", "bmp", "gif", "jpg", "jpeg", "tga", "tif", "tiff", "webp", "ico", "pnm", "ppm", "pgm",
    "pbm", "pam", "qoi",
];

/// Check if a path has a decodable image extension.
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| INPUT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Find all image files in a directory (recursively), sorted by path.
pub fn find_image_files(dir: &Path) -> Vec<PathBuf> {
    let dir_str = Pattern::escape(&dir.display().to_string());
    let options = MatchOptions { case_sensitive: false, ..MatchOptions::new() };
    let mut files = Vec::new();

    for ext in INPUT_EXTENSIONS {
        if let Ok(paths) = glob_with(&format!("{}/**/*.{}", dir_str, ext), options) {
            files.extend(paths.filter_map(Result::ok));
        }
    }

    files.sort();
    files.dedup();
    files
}

/// Create the parent directories of `path` if they don't exist.
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Generate the output path for an upscaled image.
///
/// # Output Naming Rules
///
/// | Scenario | Output |
/// |----------|--------|
/// | No `-o` | `{input_stem}{suffix}.{ext}` next to the input |
/// | `-o out.png`, single input | `out.png` |
/// | `-o out.png`, several inputs | `out_{input_stem}.{ext}` |
/// | `-o dir/` | `dir/{input_stem}{suffix}.{ext}` |
///
/// # Arguments
///
/// * `input` - The input image path
/// * `output_arg` - The `-o` argument value, if provided
/// * `suffix` - Suffix appended to the input stem
/// * `extension` - Extension of the output format
/// * `is_single_input` - Whether only one image is being processed
pub fn generate_output_path(
    input: &Path,
    output_arg: Option<&Path>,
    suffix: &str,
    extension: &str,
    is_single_input: bool,
) -> PathBuf {
    let input_stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");

    match output_arg {
        Some(output) => {
            // Check if output is a directory (ends with / or is existing directory)
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();

            if is_dir {
                output.join(format!("{}{}.{}", input_stem, suffix, extension))
            } else if is_single_input {
                output.to_path_buf()
            } else {
                let stem = output.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
                join_parent(output, format!("{}_{}.{}", stem, input_stem, extension))
            }
        }
        None => join_parent(input, format!("{}{}.{}", input_stem, suffix, extension)),
    }
}

fn join_parent(sibling: &Path, name: String) -> PathBuf {
    match sibling.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(name),
        _ => PathBuf::from(name),
    }
}
