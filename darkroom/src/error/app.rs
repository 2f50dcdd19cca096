/// Why a payload failed base64 decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Normalized text is shorter than the configured minimum. Almost
    /// always a stray scan, not a real payload.
    TooShort { len: usize, min: usize },
    /// Normalized text is not valid base64.
    InvalidEncoding(base64::DecodeError),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DecodeError::TooShort { len, min } => write!(
                f,
                "payload too short after normalization: {} chars, minimum is {}",
                len, min
            ),
            DecodeError::InvalidEncoding(source) => {
                write!(f, "payload is not valid base64: {}", source)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<base64::DecodeError> for DecodeError {
    fn from(source: base64::DecodeError) -> Self {
        DecodeError::InvalidEncoding(source)
    }
}
