pub mod chunk;

pub use chunk::{ChunkFieldError, PayloadChunk};

use crate::Config;
use chunk::ChunkParseError;

/// What a scanned payload turned out to be.
///
/// Probes run in a fixed order, chunk frame first and bare base64 second,
/// and the first match wins. A payload is never treated as two things at
/// once, and anything matching no probe lands in `Unrecognized`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// One frame of a multi-part transfer.
    Chunk(PayloadChunk),
    /// A bare base64 payload, ready to decode as-is.
    Plain(String),
    /// Neither of the above. Carries a short preview for diagnostics and,
    /// when the payload at least looked like a chunk frame, the field
    /// error that disqualified it.
    Unrecognized {
        preview: String,
        chunk_error: Option<ChunkFieldError>,
    },
}

/// Decide what a scanned payload is. Pure: no session state is touched,
/// the same text always classifies the same way.
pub fn classify(raw: &str, config: &Config) -> Classification {
    let text = raw.trim();

    let chunk_error = match PayloadChunk::try_from(text) {
        Ok(chunk) => return Classification::Chunk(chunk),
        Err(ChunkParseError::Malformed(field_error)) => Some(field_error),
        Err(ChunkParseError::NotChunkShaped) => None,
    };

    if is_likely_base64(text, config.min_plain_payload_len) {
        return Classification::Plain(text.to_owned());
    }

    Classification::Unrecognized {
        preview: preview(text, config.diagnostic_preview_len),
        chunk_error,
    }
}

/// Cheap shape test, not validation: long enough, and nothing outside the
/// standard base64 alphabet, padding or whitespace. Short reads and texts
/// with foreign characters are scanner noise; whether the payload really
/// decodes is decided downstream.
fn is_likely_base64(text: &str, min_len: usize) -> bool {
    if text.len() < min_len {
        return false;
    }

    text.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '=') || c.is_whitespace())
}

/// First `max_chars` characters, cut on a character boundary.
fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_min(min_plain_payload_len: usize) -> Config {
        Config {
            min_plain_payload_len,
            ..Config::default()
        }
    }

    #[test]
    fn chunk_frame_wins_first_probe() {
        let classification = classify(
            r#"{"id":"s1","part":1,"total":2,"data":"QUJD"}"#,
            &Config::default(),
        );

        match classification {
            Classification::Chunk(chunk) => {
                assert_eq!(chunk.session_id, "s1");
                assert_eq!(chunk.data, "QUJD");
            }
            other => panic!("expected chunk, got {:?}", other),
        }
    }

    #[test]
    fn length_threshold_is_exact() {
        let config = config_with_min(100);
        let at_threshold = "A".repeat(100);
        let below_threshold = "A".repeat(99);

        assert_eq!(
            classify(&at_threshold, &config),
            Classification::Plain(at_threshold.clone())
        );
        assert!(matches!(
            classify(&below_threshold, &config),
            Classification::Unrecognized { .. }
        ));
    }

    #[test]
    fn internal_whitespace_is_tolerated() {
        let config = config_with_min(20);
        let payload = "QUJD REVG\nSElK TE1O\tUFFS";

        assert_eq!(
            classify(payload, &config),
            Classification::Plain(payload.to_owned())
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_before_probing() {
        let config = config_with_min(8);

        assert_eq!(
            classify("  QUJDREVG\n", &config),
            Classification::Plain("QUJDREVG".to_owned())
        );
    }

    #[test]
    fn broken_chunk_falls_through_with_diagnostic() {
        let classification = classify(r#"{"part":1,"data":"x"}"#, &Config::default());

        match classification {
            Classification::Unrecognized { preview, chunk_error } => {
                assert_eq!(preview, r#"{"part":1,"data":"x"}"#);
                assert_eq!(chunk_error, Some(ChunkFieldError::MissingField("id")));
            }
            other => panic!("expected unrecognized, got {:?}", other),
        }
    }

    #[test]
    fn garbage_is_unrecognized_without_diagnostic() {
        let classification = classify("!!!not-base64!!!", &Config::default());

        match classification {
            Classification::Unrecognized { chunk_error, .. } => assert_eq!(chunk_error, None),
            other => panic!("expected unrecognized, got {:?}", other),
        }
    }

    #[test]
    fn digits_pass_the_base64_probe_not_the_json_probe() {
        // A bare number parses as JSON but is not an object, so it falls
        // through to the base64 probe and classifies as plain.
        let config = config_with_min(10);
        let payload = "1234567890123456";

        assert_eq!(
            classify(payload, &config),
            Classification::Plain(payload.to_owned())
        );
    }

    #[test]
    fn preview_respects_char_boundaries() {
        let config = Config {
            diagnostic_preview_len: 4,
            ..Config::default()
        };

        match classify("héllo wörld", &config) {
            Classification::Unrecognized { preview, .. } => assert_eq!(preview, "héll"),
            other => panic!("expected unrecognized, got {:?}", other),
        }
    }
}
