// TODO! Cap the session table so a stream of unique ids cannot grow it without bound

use crate::artifact;
use crate::decode;
use crate::engine::ReassemblyEngine;
use crate::payload::{self, Classification};
use crate::session::SessionStatus;
use crate::Config;

/// Background event handler that processes scanned payloads and develops
/// finished images into the output directory.
///
/// Runs continuously, consuming raw payload text from the provided channel.
/// A single `ReassemblyEngine` lives inside the loop, so session state is
/// touched from exactly one place and payloads are ingested one at a time
/// no matter how many producers feed the channel.
///
/// ## Processing Flow
///
/// Each payload is classified once, in probe order:
///
/// 1. Chunk frames go to the reassembly engine. Progress, duplicates and
///    total mismatches are reported; when the last part arrives the
///    assembled text moves on to decoding.
/// 2. Bare base64 payloads go straight to decoding.
/// 3. Anything else is reported with a short preview and skipped.
///
/// Decoded artifacts are written into `output_directory`, created on first
/// use. Decode and write failures are logged and the loop keeps running;
/// one bad payload never takes the processor down.
pub async fn handle_received_payloads(
    mut rx: tokio::sync::mpsc::Receiver<String>,
    output_directory: String,
    config: Config,
) {
    let mut engine = ReassemblyEngine::new();

    while let Some(raw_payload) = rx.recv().await {
        match payload::classify(&raw_payload, &config) {
            Classification::Chunk(chunk) => {
                let session_id = chunk.session_id.clone();
                let part_index = chunk.part_index;

                match engine.ingest(chunk) {
                    SessionStatus::Accepted { received, expected } => log::info!(
                        "Part {} for session {} received ({} of {})!",
                        part_index,
                        session_id,
                        received,
                        expected
                    ),
                    SessionStatus::DuplicateIgnored {
                        part_index,
                        received,
                        expected,
                    } => log::info!(
                        "Duplicate part {} for session {} ignored ({} of {} held)",
                        part_index,
                        session_id,
                        received,
                        expected
                    ),
                    SessionStatus::TotalMismatch { declared, expected } => log::warn!(
                        "Session {} expects {} parts but a chunk declared {}. Chunk dropped.",
                        session_id,
                        expected,
                        declared
                    ),
                    SessionStatus::IndexOutOfRange {
                        part_index,
                        expected,
                    } => log::warn!(
                        "Part index {} outside 1..={} for session {}. Chunk dropped.",
                        part_index,
                        expected,
                        session_id
                    ),
                    SessionStatus::Completed { assembled } => {
                        log::info!(
                            "All parts for session {} received. Developing image...",
                            session_id
                        );
                        develop_artifact(&assembled, Some(&session_id), &output_directory, &config);
                    }
                }
            }
            Classification::Plain(text) => {
                log::info!(
                    "Bare base64 payload received ({} chars). Developing image...",
                    text.len()
                );
                develop_artifact(&text, None, &output_directory, &config);
            }
            Classification::Unrecognized {
                preview,
                chunk_error,
            } => match chunk_error {
                Some(field_error) => {
                    log::warn!("Broken chunk frame ({}): {}", field_error, preview)
                }
                None => log::warn!(
                    "Unrecognized payload ({} chars): {}",
                    raw_payload.len(),
                    preview
                ),
            },
        }
    }
}

fn develop_artifact(text: &str, session_label: Option<&str>, output_directory: &str, config: &Config) {
    match decode::decode(text, config) {
        Ok(decoded) => {
            let emitted = artifact::emit(decoded, session_label);
            write_artifact(emitted, output_directory);
        }
        Err(err) => log::error!("Payload did not decode: {}", err),
    }
}

fn write_artifact(emitted: artifact::EmittedArtifact, output_directory: &str) {
    let output_directory = std::path::Path::new(output_directory);
    if !output_directory.exists() {
        log::info!(
            "Output directory not found. Creating at {}",
            output_directory.to_string_lossy()
        );
        if let Err(err) = std::fs::create_dir_all(output_directory) {
            log::error!(
                "Error creating output directory {}: {}",
                output_directory.to_string_lossy(),
                err
            );
            return;
        }
    }

    let artifact_path = output_directory.join(&emitted.file_name);
    match std::fs::write(&artifact_path, &emitted.bytes) {
        Ok(_) => log::info!(
            "Developed {} in {}",
            emitted.summary(),
            output_directory.to_string_lossy()
        ),
        Err(err) => log::error!(
            "Error writing to file {}: {}",
            artifact_path.to_string_lossy(),
            err
        ),
    }
}
