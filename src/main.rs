//! Scale3x - Command-line tool for upscaling pixel art by 3x

use std::process::ExitCode;

use scale3x::cli;

fn main() -> ExitCode {
    cli::run()
}
