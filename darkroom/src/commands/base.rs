use tokio::sync::mpsc::Sender;

use crate::Config;

/// CLI entrypoint and argument definitions for the `darkroom` application.
///
/// `Cli` is the top-level clap parser used to select where scanned payloads
/// come from (an HTTP endpoint or pasted text) and to configure common
/// options such as the directory where developed images are stored.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub struct Cli {
    /// The payload source to launch.
    #[command(subcommand)]
    pub source_type: SourceType,

    /// Directory to store developed images
    #[arg(long = "output-dir", default_value = "developed")]
    pub output_directory: String,

    /// Shortest bare payload accepted as base64 without chunk framing
    #[arg(long = "min-plain-len", default_value_t = 100)]
    pub min_plain_payload_len: usize,

    /// Characters of an unrecognized payload echoed in diagnostics
    #[arg(long = "preview-len", default_value_t = 80)]
    pub diagnostic_preview_len: usize,

    /// Content type stamped on developed images
    #[arg(long = "content-type", default_value = "image/avif")]
    pub expected_content_type: String,
}

impl Cli {
    /// Classifier and decoder settings carried by the common flags.
    pub fn config(&self) -> Config {
        Config {
            min_plain_payload_len: self.min_plain_payload_len,
            diagnostic_preview_len: self.diagnostic_preview_len,
            expected_content_type: self.expected_content_type.clone(),
        }
    }

    /// Execute the configured subcommand and start the selected payload
    /// source.
    ///
    /// This method forwards the provided `transfer_channel` to the source
    /// implementation. Sources use that channel to hand raw payload text to
    /// the background processor.
    pub async fn handle(self, transfer_channel: Sender<String>) -> std::io::Result<()> {
        match self.source_type {
            SourceType::HTTP(http_sub_cmd) => http_sub_cmd.handle(transfer_channel).await,
            SourceType::Paste(paste_sub_cmd) => paste_sub_cmd.handle(transfer_channel).await,
        }
    }
}

#[derive(Debug, clap::Subcommand)]
pub enum SourceType {
    /// Launch an HTTP server that scanners post payloads to.
    #[command(name = "http-server")]
    HTTP(super::http::HTTPServerTypeSubCommand),

    /// Read payloads pasted on standard input or from a file.
    #[command(name = "paste")]
    Paste(super::paste::PasteSubCommand),
}
