use anyhow::{anyhow, Context, Result};
use serde_json::json;
use tracing::info;

use super::messages::{AnswerRequest, AnswerResponse, ListenResponse};
use super::service::AnswerService;
use crate::encoding::AudioClip;

/// HTTP client for the interview-assistant service.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("API error {}: {}", status, body));
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl AnswerService for ApiClient {
    async fn transcribe(
        &self,
        clip: &AudioClip,
        language: &str,
        output_language: &str,
    ) -> Result<ListenResponse> {
        let part = reqwest::multipart::Part::bytes(clip.bytes().to_vec())
            .file_name(clip.upload_filename())
            .mime_str(clip.format())
            .context("invalid clip format tag")?;

        let form = reqwest::multipart::Form::new()
            .part("audio", part)
            .text("language", language.to_string())
            .text("output_language", output_language.to_string());

        info!(
            "Uploading {} byte clip as {}",
            clip.len(),
            clip.upload_filename()
        );

        let response = self
            .http
            .post(self.url("/interview_listen"))
            .multipart(form)
            .send()
            .await
            .context("failed to reach transcription endpoint")?;

        Self::check(response)
            .await?
            .json()
            .await
            .context("failed to parse transcription response")
    }

    async fn answer(&self, request: &AnswerRequest) -> Result<AnswerResponse> {
        let response = self
            .http
            .post(self.url("/interview_answer"))
            .json(request)
            .send()
            .await
            .context("failed to reach answer endpoint")?;

        Self::check(response)
            .await?
            .json()
            .await
            .context("failed to parse answer response")
    }

    async fn regenerate(&self, text: &str) -> Result<AnswerResponse> {
        let response = self
            .http
            .post(self.url("/interview_regen"))
            .json(&json!({ "text": text }))
            .send()
            .await
            .context("failed to reach regeneration endpoint")?;

        Self::check(response)
            .await?
            .json()
            .await
            .context("failed to parse regeneration response")
    }
}
