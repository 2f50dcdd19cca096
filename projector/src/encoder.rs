use std::{io::Read, path::PathBuf};

use base64::Engine;

use crate::error::ProjectorError;
use crate::frame::ChunkFrame;

/// Widest part count the budget solver considers. Nine digits of parts is
/// already far beyond anything a human will sit through scanning.
const MAX_TOTAL_DIGITS: u32 = 9;

/// Reads an entire file into memory as raw bytes.
///
/// Loads the complete file content into a byte vector using buffered I/O.
/// Images meant for frame-by-frame beaming are small enough to sit in
/// memory whole.
///
/// # Arguments
/// * `filepath` - Path to the image file to be beamed.
///
/// # Returns
/// A vector of bytes containing the complete unmodified file contents.
///
/// # Errors
/// Returns an error if the file cannot be opened or read.
pub fn buffered_read_file(filepath: &PathBuf) -> crate::error::Result<Vec<u8>> {
    let mut opened_file = std::fs::File::open(filepath)?;
    let mut file_buffer: Vec<u8> = Vec::new();
    opened_file.read_to_end(&mut file_buffer)?;

    Ok(file_buffer)
}

/// A fresh 4-byte transfer id, hex-encoded. Shared by every frame of one
/// transfer so the receiver can tell interleaved transfers apart.
pub fn new_transfer_id() -> String {
    let id_bytes: [u8; 4] = urandom::new().random_bytes();

    hex::encode(id_bytes)
}

/// Standard padded base64, the same form a browser's `FileReader` hands out.
/// The receiving side decodes padded and unpadded text alike.
pub fn encode_image(bytes: &[u8]) -> String {
    base64::prelude::BASE64_STANDARD.encode(bytes)
}

/// Frame an encoded payload into a fixed number of parts.
///
/// With one part the payload is emitted bare: a single scan needs no
/// envelope, and the receiver takes bare base64 directly. With more parts
/// the encoded text is split into near-equal fragments and each is wrapped
/// in a `ChunkFrame`.
///
/// # Arguments
/// * `encoded` - The base64 text of the whole image.
/// * `transfer_id` - Id shared by every frame of this transfer.
/// * `parts` - How many frames to produce.
///
/// # Returns
/// One ready-to-render payload string per frame.
pub fn frame_payloads(
    encoded: &str,
    transfer_id: &str,
    parts: usize,
) -> crate::error::Result<Vec<String>> {
    if encoded.is_empty() {
        return Err(ProjectorError::validation_error("nothing to send: file is empty"));
    }

    if parts <= 1 {
        return Ok(vec![encoded.to_owned()]);
    }

    frames_from(split_encoded(encoded, parts), transfer_id)
}

/// Frame an encoded payload under a per-frame character budget.
///
/// QR capacity bounds how much text fits in one scannable frame, so the
/// budget is the driving constraint and the part count falls out of it.
/// The envelope grows with the width of the printed indexes, which in turn
/// depends on the part count; the solver widens the assumed index width
/// until the implied part count fits it.
///
/// # Arguments
/// * `encoded` - The base64 text of the whole image.
/// * `transfer_id` - Id shared by every frame of this transfer.
/// * `budget` - Maximum characters of any emitted payload.
///
/// # Returns
/// One payload string per frame, each no longer than `budget`. The whole
/// payload is emitted bare when it fits the budget on its own.
pub fn frame_payloads_with_budget(
    encoded: &str,
    transfer_id: &str,
    budget: usize,
) -> crate::error::Result<Vec<String>> {
    if encoded.is_empty() {
        return Err(ProjectorError::validation_error("nothing to send: file is empty"));
    }

    if encoded.len() <= budget {
        return Ok(vec![encoded.to_owned()]);
    }

    for digits in 1..=MAX_TOTAL_DIGITS {
        let overhead = envelope_overhead(transfer_id, digits)?;
        if overhead >= budget {
            continue;
        }

        let capacity = budget - overhead;
        let parts = encoded.len().div_ceil(capacity);
        if decimal_digits(parts) <= digits {
            return frames_from(split_encoded(encoded, parts), transfer_id);
        }
    }

    Err(ProjectorError::validation_error(
        "frame budget too small for the chunk envelope",
    ))
}

/// Split encoded text into near-equal fragments. Base64 is pure ASCII, so
/// byte-level splitting never lands inside a character.
fn split_encoded(encoded: &str, parts: usize) -> Vec<&str> {
    encoded
        .as_bytes()
        .chunks(encoded.len().div_ceil(parts))
        .filter_map(|fragment| std::str::from_utf8(fragment).ok())
        .collect()
}

fn frames_from(fragments: Vec<&str>, transfer_id: &str) -> crate::error::Result<Vec<String>> {
    let total = fragments.len() as u32;

    fragments
        .into_iter()
        .enumerate()
        .map(|(index, fragment)| {
            ChunkFrame {
                id: transfer_id,
                part: index as u32 + 1,
                total,
                data: fragment,
            }
            .to_json()
        })
        .collect()
}

/// Serialized frame length with no payload and the widest indexes that fit
/// `digits`. Hex ids and base64 data need no JSON escaping, so a frame's
/// length is exactly this overhead plus its fragment length.
fn envelope_overhead(transfer_id: &str, digits: u32) -> crate::error::Result<usize> {
    let widest_index = 10u32.pow(digits) - 1;
    let probe = ChunkFrame {
        id: transfer_id,
        part: widest_index,
        total: widest_index,
        data: "",
    };

    Ok(probe.to_json()?.len())
}

fn decimal_digits(value: usize) -> u32 {
    let mut digits = 1;
    let mut remainder = value / 10;
    while remainder > 0 {
        digits += 1;
        remainder /= 10;
    }

    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_ids_are_four_hex_bytes() {
        let id = new_transfer_id();

        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn single_part_payload_stays_bare() {
        let payloads = frame_payloads("QUJDREVG", "cafef00d", 1).expect("framing succeeds");

        assert_eq!(payloads, vec!["QUJDREVG".to_owned()]);
    }

    #[test]
    fn split_is_near_equal() {
        let fragments = split_encoded("0123456789", 3);

        assert_eq!(fragments, vec!["0123", "4567", "89"]);
    }

    #[test]
    fn frames_carry_sequential_indexes_and_a_shared_id() {
        let encoded = "A".repeat(100);
        let payloads = frame_payloads(&encoded, "cafef00d", 4).expect("framing succeeds");

        assert_eq!(payloads.len(), 4);
        for (index, payload) in payloads.iter().enumerate() {
            let value: serde_json::Value = serde_json::from_str(payload).expect("frame is json");
            assert_eq!(value["id"], "cafef00d");
            assert_eq!(value["part"], index as u64 + 1);
            assert_eq!(value["total"], 4u64);
        }
    }

    #[test]
    fn whole_payload_within_budget_stays_bare() {
        let payloads =
            frame_payloads_with_budget("QUJDREVG", "cafef00d", 200).expect("framing succeeds");

        assert_eq!(payloads, vec!["QUJDREVG".to_owned()]);
    }

    #[test]
    fn budget_bounds_every_frame() {
        let encoded = "A".repeat(3000);
        let budget = 120;
        let payloads =
            frame_payloads_with_budget(&encoded, "cafef00d", budget).expect("framing succeeds");

        assert!(payloads.len() > 1);
        for payload in &payloads {
            assert!(
                payload.len() <= budget,
                "frame of {} chars exceeds budget {}",
                payload.len(),
                budget
            );
        }

        let reassembled: String = payloads
            .iter()
            .map(|payload| {
                let value: serde_json::Value =
                    serde_json::from_str(payload).expect("frame is json");
                value["data"].as_str().expect("data is a string").to_owned()
            })
            .collect();
        assert_eq!(reassembled, encoded);
    }

    #[test]
    fn budget_smaller_than_the_envelope_is_rejected() {
        let encoded = "A".repeat(3000);

        let outcome = frame_payloads_with_budget(&encoded, "cafef00d", 20);

        assert!(outcome.is_err());
    }

    #[test]
    fn empty_payload_is_rejected() {
        assert!(frame_payloads("", "cafef00d", 4).is_err());
        assert!(frame_payloads_with_budget("", "cafef00d", 120).is_err());
    }

    #[test]
    fn frames_round_trip_through_the_receiver() {
        let original: Vec<u8> = (0u16..400).map(|i| (i % 251) as u8).collect();
        let encoded = encode_image(&original);
        let transfer_id = new_transfer_id();
        let payloads = frame_payloads(&encoded, &transfer_id, 4).expect("framing succeeds");

        let config = darkroom::Config {
            min_plain_payload_len: 4,
            ..darkroom::Config::default()
        };
        let mut engine = darkroom::ReassemblyEngine::new();
        let mut assembled = None;

        for payload in &payloads {
            match darkroom::payload::classify(payload, &config) {
                darkroom::Classification::Chunk(chunk) => {
                    if let darkroom::SessionStatus::Completed { assembled: text } =
                        engine.ingest(chunk)
                    {
                        assembled = Some(text);
                    }
                }
                other => panic!("frame did not classify as a chunk: {:?}", other),
            }
        }

        let assembled = assembled.expect("transfer completed");
        let artifact =
            darkroom::decode::decode(&assembled, &config).expect("assembled text decodes");
        assert_eq!(artifact.bytes, original);
    }

    #[test]
    fn budget_frames_round_trip_through_the_receiver() {
        let original: Vec<u8> = (0u16..900).map(|i| (i % 241) as u8).collect();
        let encoded = encode_image(&original);
        let payloads =
            frame_payloads_with_budget(&encoded, "deadbeef", 150).expect("framing succeeds");

        let config = darkroom::Config {
            min_plain_payload_len: 4,
            ..darkroom::Config::default()
        };
        let mut engine = darkroom::ReassemblyEngine::new();
        let mut assembled = None;

        for payload in &payloads {
            match darkroom::payload::classify(payload, &config) {
                darkroom::Classification::Chunk(chunk) => {
                    if let darkroom::SessionStatus::Completed { assembled: text } =
                        engine.ingest(chunk)
                    {
                        assembled = Some(text);
                    }
                }
                other => panic!("frame did not classify as a chunk: {:?}", other),
            }
        }

        let assembled = assembled.expect("transfer completed");
        let artifact =
            darkroom::decode::decode(&assembled, &config).expect("assembled text decodes");
        assert_eq!(artifact.bytes, original);
    }
}
