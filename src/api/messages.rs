use serde::{Deserialize, Serialize};

/// Response from the transcription/answer endpoint.
///
/// Every field is optional; absence degrades to placeholder text on the
/// display, never to a failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListenResponse {
    /// The transcript of the spoken question
    #[serde(default)]
    pub question: Option<String>,

    /// The generated answer
    #[serde(default)]
    pub answer: Option<String>,

    /// Language code detected from the speech (e.g. "en")
    #[serde(default)]
    pub detected_language: Option<String>,

    /// Language the answer was written in
    #[serde(default)]
    pub output_language: Option<String>,
}

/// Request body for the text-mode answer endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub question: String,
    pub job_role: String,
    pub background: String,
}

/// Response from the text-mode and regeneration endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerResponse {
    #[serde(default)]
    pub answer: Option<String>,
}

/// Map a language code to its display name. Unknown codes pass through.
pub fn language_name(code: &str) -> &str {
    match code {
        "en" => "English",
        "my" => "Burmese",
        "ja" => "Japanese",
        "ko" => "Korean",
        "zh" => "Chinese",
        "es" => "Spanish",
        "hi" => "Hindi",
        other => other,
    }
}
