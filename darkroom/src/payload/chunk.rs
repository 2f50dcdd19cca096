use serde_json::Value;

/// Keys a JSON object must carry at least one of before a field-level
/// parse failure is worth reporting. Objects without any of them are
/// ordinary JSON, not a broken chunk frame.
const FRAMING_KEYS: [&str; 4] = ["id", "part", "total", "data"];

/// One frame of a multi-part transfer: a JSON object with `id`, `part`,
/// `total` and `data` fields.
///
/// Indexes are 1-based. Parsing guarantees a non-empty `session_id` and
/// `1 <= part_index <= total_parts`. Senders are loose about field types
/// (`"2"` vs `2`, a numeric id), so parsing coerces where it can instead
/// of insisting on exact JSON types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadChunk {
    pub session_id: String,
    pub part_index: u32,
    pub total_parts: u32,
    pub data: String,
}

/// Why a chunk-shaped JSON object failed field validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkFieldError {
    MissingField(&'static str),
    InvalidId,
    InvalidIndex(&'static str),
    IndexBeyondTotal { part: u32, total: u32 },
    DataNotAString,
}

impl std::fmt::Display for ChunkFieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ChunkFieldError::MissingField(field) => write!(f, "missing `{}` field", field),
            ChunkFieldError::InvalidId => {
                write!(f, "`id` field is not a non-empty string or number")
            }
            ChunkFieldError::InvalidIndex(field) => {
                write!(f, "`{}` field is not a positive integer", field)
            }
            ChunkFieldError::IndexBeyondTotal { part, total } => {
                write!(f, "`part` {} exceeds declared total {}", part, total)
            }
            ChunkFieldError::DataNotAString => write!(f, "`data` field is not a string"),
        }
    }
}

impl std::error::Error for ChunkFieldError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkParseError {
    /// The text is not a JSON object at all, or carries none of the
    /// framing keys. Nothing to report; the payload is simply not a chunk.
    NotChunkShaped,
    /// A JSON object that looks like a chunk frame but fails field
    /// validation. Worth surfacing to whoever is pointing the camera.
    Malformed(ChunkFieldError),
}

impl std::fmt::Display for ChunkParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ChunkParseError::NotChunkShaped => write!(f, "payload is not a chunk frame"),
            ChunkParseError::Malformed(field_error) => {
                write!(f, "malformed chunk frame: {}", field_error)
            }
        }
    }
}

impl std::error::Error for ChunkParseError {}

impl TryFrom<&str> for PayloadChunk {
    type Error = ChunkParseError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        let value: Value =
            serde_json::from_str(text).map_err(|_| ChunkParseError::NotChunkShaped)?;

        let fields = match value {
            Value::Object(fields) => fields,
            _ => return Err(ChunkParseError::NotChunkShaped),
        };

        if !FRAMING_KEYS.iter().any(|key| fields.contains_key(*key)) {
            return Err(ChunkParseError::NotChunkShaped);
        }

        let id_value = fields
            .get("id")
            .ok_or(ChunkParseError::Malformed(ChunkFieldError::MissingField("id")))?;
        let session_id = match coerce_id(id_value) {
            Some(id) if !id.is_empty() => id,
            _ => return Err(ChunkParseError::Malformed(ChunkFieldError::InvalidId)),
        };

        let part_index = require_index(&fields, "part")?;
        let total_parts = require_index(&fields, "total")?;
        if part_index > total_parts {
            return Err(ChunkParseError::Malformed(ChunkFieldError::IndexBeyondTotal {
                part: part_index,
                total: total_parts,
            }));
        }

        let data = match fields.get("data") {
            None => return Err(ChunkParseError::Malformed(ChunkFieldError::MissingField("data"))),
            Some(Value::String(data)) => data.clone(),
            Some(_) => return Err(ChunkParseError::Malformed(ChunkFieldError::DataNotAString)),
        };

        Ok(PayloadChunk {
            session_id,
            part_index,
            total_parts,
            data,
        })
    }
}

fn require_index(
    fields: &serde_json::Map<String, Value>,
    name: &'static str,
) -> Result<u32, ChunkParseError> {
    let value = fields
        .get(name)
        .ok_or(ChunkParseError::Malformed(ChunkFieldError::MissingField(name)))?;

    match coerce_index(value) {
        Some(index) if index >= 1 => Ok(index),
        _ => Err(ChunkParseError::Malformed(ChunkFieldError::InvalidIndex(name))),
    }
}

/// `id` may arrive as a string or as a bare number.
fn coerce_id(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// `part`/`total` may arrive as an integer, an integral float (`2.0`)
/// or a numeric string (`"2"`).
fn coerce_index(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => match number.as_u64() {
            Some(int) => u32::try_from(int).ok(),
            None => number
                .as_f64()
                .filter(|float| float.fract() == 0.0 && *float >= 0.0 && *float <= f64::from(u32::MAX))
                .map(|float| float as u32),
        },
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_frame() {
        let chunk = PayloadChunk::try_from(r#"{"id":"s1","part":1,"total":2,"data":"QUJD"}"#)
            .expect("canonical frame should parse");

        assert_eq!(chunk.session_id, "s1");
        assert_eq!(chunk.part_index, 1);
        assert_eq!(chunk.total_parts, 2);
        assert_eq!(chunk.data, "QUJD");
    }

    #[test]
    fn coerces_loose_field_types() {
        let chunk =
            PayloadChunk::try_from(r#"{"id":42,"part":"2","total":3.0,"data":"REVG"}"#)
                .expect("coercible frame should parse");

        assert_eq!(chunk.session_id, "42");
        assert_eq!(chunk.part_index, 2);
        assert_eq!(chunk.total_parts, 3);
    }

    #[test]
    fn missing_id_is_malformed() {
        let outcome = PayloadChunk::try_from(r#"{"part":1,"data":"x"}"#);

        assert_eq!(
            outcome,
            Err(ChunkParseError::Malformed(ChunkFieldError::MissingField("id")))
        );
    }

    #[test]
    fn zero_part_is_malformed() {
        let outcome = PayloadChunk::try_from(r#"{"id":"s1","part":0,"total":2,"data":"x"}"#);

        assert_eq!(
            outcome,
            Err(ChunkParseError::Malformed(ChunkFieldError::InvalidIndex("part")))
        );
    }

    #[test]
    fn part_beyond_total_is_malformed() {
        let outcome = PayloadChunk::try_from(r#"{"id":"s1","part":3,"total":2,"data":"x"}"#);

        assert_eq!(
            outcome,
            Err(ChunkParseError::Malformed(ChunkFieldError::IndexBeyondTotal {
                part: 3,
                total: 2,
            }))
        );
    }

    #[test]
    fn non_string_data_is_malformed() {
        let outcome = PayloadChunk::try_from(r#"{"id":"s1","part":1,"total":1,"data":7}"#);

        assert_eq!(
            outcome,
            Err(ChunkParseError::Malformed(ChunkFieldError::DataNotAString))
        );
    }

    #[test]
    fn plain_text_is_not_chunk_shaped() {
        assert_eq!(
            PayloadChunk::try_from("definitely not json"),
            Err(ChunkParseError::NotChunkShaped)
        );
        assert_eq!(
            PayloadChunk::try_from(r#"["id","part"]"#),
            Err(ChunkParseError::NotChunkShaped)
        );
    }

    #[test]
    fn object_without_framing_keys_is_not_chunk_shaped() {
        assert_eq!(
            PayloadChunk::try_from(r#"{"kind":"ping","seq":9}"#),
            Err(ChunkParseError::NotChunkShaped)
        );
    }
}
