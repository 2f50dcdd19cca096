//! Receiving side of a frame-by-frame image transfer: payloads scanned from a
//! stream of QR frames are classified, reassembled per session, decoded from
//! base64 and written out as image files.

pub mod artifact;
pub mod commands;
pub mod decode;
pub mod engine;
pub mod error;
pub mod event_handler;
pub mod payload;
pub mod session;

pub use engine::{CompletionPolicy, ReassemblyEngine};
pub use payload::Classification;
pub use session::SessionStatus;

/// Tuning knobs shared by the classifier, the decoder and diagnostics.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shortest bare payload accepted as base64 without chunk framing.
    /// Anything shorter is treated as scanner noise.
    pub min_plain_payload_len: usize,
    /// How many characters of an unrecognized payload are echoed back
    /// in diagnostics.
    pub diagnostic_preview_len: usize,
    /// Content type stamped on every decoded artifact.
    pub expected_content_type: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_plain_payload_len: 100,
            diagnostic_preview_len: 80,
            expected_content_type: String::from("image/avif"),
        }
    }
}
