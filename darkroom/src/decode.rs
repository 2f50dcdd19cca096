use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

use crate::artifact::DecodedArtifact;
use crate::error::app::DecodeError;
use crate::Config;

/// Standard-alphabet engine that accepts payloads the way browsers emit
/// them: padded or unpadded, it decodes either.
const FORGIVING_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &base64::alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Drop whitespace and any character outside the base64 alphabet. Scanned
/// text picks up line breaks and stray punctuation; the payload itself is
/// pure base64, so everything else is noise.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
        .collect()
}

/// Decode one payload into artifact bytes.
///
/// Normalizes first, rejects anything still shorter than the configured
/// minimum, then decodes. The artifact is stamped with the configured
/// content type; decoding is read-only on the input, so running it twice
/// on the same text yields the same artifact.
pub fn decode(text: &str, config: &Config) -> Result<DecodedArtifact, DecodeError> {
    let normalized = normalize(text);

    if normalized.len() < config.min_plain_payload_len {
        return Err(DecodeError::TooShort {
            len: normalized.len(),
            min: config.min_plain_payload_len,
        });
    }

    let bytes = FORGIVING_STANDARD.decode(&normalized)?;

    Ok(DecodedArtifact {
        bytes,
        content_type: config.expected_content_type.clone(),
    })
}
