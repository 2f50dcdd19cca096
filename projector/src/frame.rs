use serde::Serialize;

/// One frame of a multi-part transfer, as the receiving side expects it: a
/// JSON object carrying the transfer id, this frame's 1-based index, the
/// declared total and its slice of the base64 payload.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChunkFrame<'a> {
    pub id: &'a str,
    pub part: u32,
    pub total: u32,
    pub data: &'a str,
}

impl ChunkFrame<'_> {
    /// Render the frame as the single-line JSON text placed in one QR code.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
