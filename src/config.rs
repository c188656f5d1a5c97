use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;

use crate::session::SessionOptions;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub audio: AudioConfig,
    pub languages: LanguageConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the interview-assistant service
    pub base_url: String,
}

#[derive(Debug, Deserialize)]
pub struct AudioConfig {
    /// Capture device name; unset = platform default input
    pub device: Option<String>,
    /// Settling delay after the stop signal, in milliseconds
    pub settle_ms: u64,
    /// Minimum clip size before upload, in bytes
    pub min_clip_bytes: usize,
}

#[derive(Debug, Deserialize)]
pub struct LanguageConfig {
    /// Input-language hint ("auto" = detect)
    pub input: String,
    /// Desired answer language ("same" = match the input)
    pub output: String,
}

impl Config {
    /// Load configuration, falling back to built-in defaults when the
    /// file is absent.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.base_url", "http://127.0.0.1:5000")?
            .set_default("audio.settle_ms", 250_i64)?
            .set_default("audio.min_clip_bytes", 800_i64)?
            .set_default("languages.input", "auto")?
            .set_default("languages.output", "same")?
            .add_source(config::File::with_name(path).required(false))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            language: self.languages.input.clone(),
            output_language: self.languages.output.clone(),
            settle_delay: Duration::from_millis(self.audio.settle_ms),
            min_clip_bytes: self.audio.min_clip_bytes,
        }
    }
}
