use tracing::{debug, info, warn};

/// Candidate encodings tried during negotiation, most-preferred first.
///
/// Richest/most broadly-decodable formats lead; narrowly-supported ones
/// trail. The upload service accepts any of these.
pub const CANDIDATE_FORMATS: &[&str] = &[
    "audio/webm;codecs=opus",
    "audio/webm",
    "audio/ogg",
    "audio/mp4",
    "audio/mpeg",
    "audio/wav",
];

/// Secondary format tried when encoder construction rejects the
/// negotiated one. Some devices report support for a format and then
/// refuse to bind an encoder to it.
pub const FALLBACK_FORMAT: &str = "audio/webm";

/// Pick the first candidate the capture backend reports as supported.
///
/// Returns `None` when no candidate is supported, meaning "let the
/// platform pick its own default" — a normal outcome, not an error.
pub fn negotiate_format(supports: impl Fn(&str) -> bool) -> Option<&'static str> {
    for candidate in CANDIDATE_FORMATS {
        if supports(candidate) {
            debug!("Negotiated capture format: {}", candidate);
            return Some(candidate);
        }
    }
    info!("No candidate format supported; deferring to platform default");
    None
}

/// Map a format tag to the clip filename extension.
pub fn extension_for(format: &str) -> &'static str {
    if format.contains("ogg") {
        "ogg"
    } else if format.contains("mp4") {
        "mp4"
    } else if format.contains("mpeg") {
        "mp3"
    } else if format.contains("wav") {
        "wav"
    } else {
        "webm"
    }
}

/// One assembled capture: the encoded audio bytes plus the format tag
/// they were recorded under. Never mutated after assembly.
#[derive(Debug, Clone)]
pub struct AudioClip {
    data: Vec<u8>,
    format: String,
}

impl AudioClip {
    /// Concatenate buffered chunks, in arrival order, into one clip.
    ///
    /// Zero-length chunks are discarded. A capture with no format tag
    /// (platform-default recording) is tagged with [`FALLBACK_FORMAT`]
    /// so the upload always carries a usable type.
    pub fn assemble(chunks: &[Vec<u8>], format: Option<&str>) -> Self {
        let total: usize = chunks.iter().map(Vec::len).sum();
        let mut data = Vec::with_capacity(total);
        for chunk in chunks {
            if !chunk.is_empty() {
                data.extend_from_slice(chunk);
            }
        }

        let format = match format {
            Some(f) if !f.is_empty() => f.to_string(),
            _ => {
                warn!(
                    "Capture has no format tag; substituting {}",
                    FALLBACK_FORMAT
                );
                FALLBACK_FORMAT.to_string()
            }
        };

        Self { data, format }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn extension(&self) -> &'static str {
        extension_for(&self.format)
    }

    /// Filename used for the multipart upload field.
    pub fn upload_filename(&self) -> String {
        format!("speech.{}", self.extension())
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }
}
