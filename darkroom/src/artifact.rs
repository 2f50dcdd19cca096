/// Decoded payload bytes plus the content type they were decoded under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedArtifact {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl DecodedArtifact {
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }
}

/// An artifact bound to the file name it is saved under. Owns the bytes;
/// emitting is the end of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedArtifact {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub file_name: String,
}

impl EmittedArtifact {
    /// One-line description for progress reporting.
    pub fn summary(&self) -> String {
        format!(
            "{} ({} bytes, {})",
            self.file_name,
            self.bytes.len(),
            self.content_type
        )
    }
}

/// Bind an artifact to its download name: `photo.<ext>` for a bare payload,
/// `photo-<session>.<ext>` for one assembled from a session.
pub fn emit(artifact: DecodedArtifact, session_label: Option<&str>) -> EmittedArtifact {
    let extension = extension_for(&artifact.content_type);
    let file_name = match session_label {
        Some(label) => format!("photo-{}.{}", sanitize_label(label), extension),
        None => format!("photo.{}", extension),
    };

    EmittedArtifact {
        bytes: artifact.bytes,
        content_type: artifact.content_type,
        file_name,
    }
}

fn extension_for(content_type: &str) -> String {
    let subtype = content_type.split('/').nth(1).unwrap_or_default();
    let extension: String = subtype
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if extension.is_empty() {
        String::from("bin")
    } else {
        extension
    }
}

/// Session ids come straight out of scanned payloads. Only filesystem-safe
/// characters make it into a file name, and overlong ids are cut.
fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .take(64)
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(content_type: &str) -> DecodedArtifact {
        DecodedArtifact {
            bytes: vec![1, 2, 3],
            content_type: content_type.to_owned(),
        }
    }

    #[test]
    fn bare_payload_gets_the_plain_name() {
        let emitted = emit(artifact("image/avif"), None);

        assert_eq!(emitted.file_name, "photo.avif");
        assert_eq!(emitted.bytes, vec![1, 2, 3]);
    }

    #[test]
    fn session_artifact_carries_its_label() {
        let emitted = emit(artifact("image/jpeg"), Some("s1"));

        assert_eq!(emitted.file_name, "photo-s1.jpeg");
    }

    #[test]
    fn unparseable_content_type_falls_back_to_bin() {
        let emitted = emit(artifact("data"), None);

        assert_eq!(emitted.file_name, "photo.bin");
    }

    #[test]
    fn hostile_session_label_cannot_escape_the_directory() {
        let emitted = emit(artifact("image/avif"), Some("../../etc/passwd"));

        assert!(!emitted.file_name.contains('/'));
        assert_eq!(emitted.file_name, "photo-.._.._etc_passwd.avif");
    }

    #[test]
    fn summary_names_size_and_type() {
        let emitted = emit(artifact("image/avif"), None);

        assert_eq!(emitted.summary(), "photo.avif (3 bytes, image/avif)");
    }
}
