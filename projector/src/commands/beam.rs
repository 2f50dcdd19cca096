/*!
Beaming subcommands for the projector CLI.

This module contains concrete command implementations for emitting framed
payloads. Two emit targets are provided:

- stdout: print payloads for piping into a QR renderer, one per block.
- HTTP: post payloads straight to a receiver endpoint, for dry runs
  without a camera in the loop.

Each command type implements `CommandHandler` and performs its work when
`handle()` is invoked by the top-level CLI dispatch.
*/

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::encoder;
use crate::CommandHandler;

/// Stdout-based beaming subcommand arguments.
///
/// The command reads the file, encodes it as base64, frames the encoded
/// text and prints each payload as a blank-line separated block, ready to
/// pipe into a QR renderer or into the receiver's paste mode.
#[derive(Debug, Clone, Args)]
#[command(name = "stdout")]
pub struct StdoutBeamSubCommand {
    /// Image file to beam
    #[arg(short = 'f', long = "src-file", required = true)]
    file_path: PathBuf,

    /// Number of frames to split the payload into
    #[arg(
        long = "parts",
        required = false,
        default_value_t = 10,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    parts: u16,

    /// Per-frame character budget; overrides --parts when set
    #[arg(
        long = "budget",
        required = false,
        value_parser = clap::value_parser!(u32).range(64..)
    )]
    budget: Option<u32>,
}

impl CommandHandler for StdoutBeamSubCommand {
    /// Execute the stdout beaming flow.
    ///
    /// Progress goes to the log (stderr); stdout carries nothing but the
    /// payload blocks so the output stays pipeable.
    fn handle(self) -> crate::error::Result<()> {
        log::info!("Reading file {}", self.file_path.to_string_lossy());
        let file_bytes = encoder::buffered_read_file(&self.file_path)?;
        let encoded = encoder::encode_image(&file_bytes);
        let transfer_id = encoder::new_transfer_id();
        log::info!(
            "Transfer {} is {} encoded chars",
            transfer_id,
            encoded.len()
        );

        let payloads = match self.budget {
            Some(budget) => {
                encoder::frame_payloads_with_budget(&encoded, &transfer_id, budget as usize)?
            }
            None => encoder::frame_payloads(&encoded, &transfer_id, self.parts as usize)?,
        };

        log::info!("Emitting {} payload frames", payloads.len());
        for payload in payloads {
            println!("{}", payload);
            println!();
        }

        Ok(())
    }
}

/// HTTP-based beaming subcommand arguments.
///
/// The command reads each file, frames its encoded payload and sends each
/// frame as the text/plain body of an HTTP POST request to the specified
/// url, pausing between frames like a camera operator would.
#[derive(Debug, Clone, Args)]
#[command(name = "http")]
pub struct HTTPBeamSubCommand {
    /// Image files to beam
    #[arg(long = "src-files", required = true, value_delimiter = ',', num_args = 1..)]
    files_path: Vec<PathBuf>,

    /// Receiver endpoint for the payload frames
    #[arg(short = 'u', long = "url", required = true)]
    url: String,

    /// Delay between each frame sent (in milliseconds)
    #[arg(
        long = "delay",
        required = false,
        default_value_t = 500,
        value_parser = clap::value_parser!(u32).range(50..)
    )]
    delay: u32,

    /// Number of frames to split each payload into
    #[arg(
        long = "parts",
        required = false,
        default_value_t = 10,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    parts: u16,

    /// Per-frame character budget; overrides --parts when set
    #[arg(
        long = "budget",
        required = false,
        value_parser = clap::value_parser!(u32).range(64..)
    )]
    budget: Option<u32>,
}

impl CommandHandler for HTTPBeamSubCommand {
    /// Execute the HTTP beaming flow.
    ///
    /// For each provided `files_path`:
    /// 1. Read the file and encode it as base64.
    /// 2. Frame the encoded text under a fresh transfer id, so concurrent
    ///    files land in separate sessions on the receiver.
    /// 3. POST each frame to the configured `url` with Content-Type
    ///    `text/plain`.
    /// 4. Sleep for `delay` milliseconds between requests.
    fn handle(self) -> crate::error::Result<()> {
        let client = reqwest::blocking::Client::new();

        for file_path in &self.files_path {
            println!("[*] Reading file {}", file_path.to_string_lossy());

            let file_bytes = encoder::buffered_read_file(file_path)?;
            let encoded = encoder::encode_image(&file_bytes);
            let transfer_id = encoder::new_transfer_id();
            println!(
                "[*] Beaming transfer {} ({} encoded chars)",
                transfer_id,
                encoded.len()
            );

            let payloads = match self.budget {
                Some(budget) => {
                    encoder::frame_payloads_with_budget(&encoded, &transfer_id, budget as usize)?
                }
                None => encoder::frame_payloads(&encoded, &transfer_id, self.parts as usize)?,
            };

            for payload in payloads {
                println!("[*] Sending frame: {}", payload);
                client
                    .post(&self.url)
                    .body(payload)
                    .header("Content-Type", "text/plain")
                    .send()?;
                std::thread::sleep(std::time::Duration::from_millis(self.delay as u64));
            }
        }

        Ok(())
    }
}

/// Wrapper struct for the `beam` subcommand family.
///
/// This struct delegates to a chosen `EmitType` subcommand (stdout or HTTP)
/// parsed via `clap`. It implements `CommandHandler` to perform the dispatch.
#[derive(Debug, Args)]
pub struct BeamSubCommandArgs {
    #[command(subcommand)]
    emit_type: EmitType,
}

impl CommandHandler for BeamSubCommandArgs {
    /// Execute the selected beaming variant.
    fn handle(self) -> crate::error::Result<()> {
        match self.emit_type {
            EmitType::Stdout(stdout_subcmd) => stdout_subcmd.handle(),
            EmitType::HTTP(http_subcmd) => http_subcmd.handle(),
        }
    }
}

/// Supported emit targets.
///
/// Each enum variant wraps the concrete argument struct for that target.
#[derive(Debug, Subcommand)]
pub enum EmitType {
    Stdout(StdoutBeamSubCommand),
    HTTP(HTTPBeamSubCommand),
}
