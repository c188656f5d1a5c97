use anyhow::Result;

use super::messages::{AnswerRequest, AnswerResponse, ListenResponse};
use crate::encoding::AudioClip;

/// Remote interview-assistant service contract.
///
/// The session only depends on this seam, so tests can drive it with a
/// scripted implementation and no network.
#[async_trait::async_trait]
pub trait AnswerService: Send + Sync {
    /// Upload a captured clip for transcription and answer generation.
    ///
    /// `language` is the input-language hint (`"auto"` when unset) and
    /// `output_language` the desired answer language (`"same"` when
    /// unset).
    async fn transcribe(
        &self,
        clip: &AudioClip,
        language: &str,
        output_language: &str,
    ) -> Result<ListenResponse>;

    /// Generate an answer for a typed question.
    async fn answer(&self, request: &AnswerRequest) -> Result<AnswerResponse>;

    /// Rewrite an existing answer.
    async fn regenerate(&self, text: &str) -> Result<AnswerResponse>;
}
