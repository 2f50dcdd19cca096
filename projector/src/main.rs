//! Projector binary entrypoint.
//!
//! Parses CLI arguments and dispatches to command handlers in the
//! `projector` crate. The binary is intentionally a thin wrapper: argument
//! parsing and dispatch happen here, while the real work (file reading,
//! encoding, framing and network I/O) is performed by the command
//! implementations found in `projector::commands`.
//!
//! Examples
//!
//! Print the frames of an image for piping into a QR renderer, sized so no
//! frame exceeds 800 characters:
//!
//! $ projector beam stdout -f photo.avif --budget 800 | qrencode-each
//!
//! The command above will:
//! 1. Read `photo.avif` and base64-encode it.
//! 2. Split the encoded text into frames that fit the budget, envelope
//!    included.
//! 3. Print one payload per blank-line separated block on stdout.
//!
//! Post the frames of two images straight to a receiver, as a dry run
//! without a camera in the loop:
//!
//! $ projector beam http --src-files photo.avif,scan.avif \
//!     -u http://127.0.0.1:8080/ --parts 10 --delay 500
//!
//! This will:
//! 1. Read each file and frame it under its own transfer id.
//! 2. POST each frame to the url with Content-Type: text/plain, sleeping
//!    500ms between requests.
//!
//! See `projector::commands::base::Cli` and `projector::commands::beam` for
//! more configuration options and available subcommands.

use clap::Parser;

fn main() -> projector::error::Result<()> {
    env_logger::init();

    // Parse command-line arguments and execute the selected operation.
    projector::commands::base::Cli::parse().handle()
}
