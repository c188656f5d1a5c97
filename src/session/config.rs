use std::time::Duration;

/// Tunables for a capture session
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Input-language hint sent with the upload ("auto" = detect)
    pub language: String,

    /// Desired answer language ("same" = match the input)
    pub output_language: String,

    /// Pause between the stop signal and reading the chunk buffer.
    /// The encoder may deliver trailing fragments asynchronously after
    /// finalize; assembling too early truncates the clip.
    pub settle_delay: Duration,

    /// Clips below this size are treated as silence and never uploaded
    pub min_clip_bytes: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            output_language: "same".to_string(),
            settle_delay: Duration::from_millis(250),
            min_clip_bytes: 800,
        }
    }
}
