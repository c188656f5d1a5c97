use anyhow::Result;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::config::SessionOptions;
use crate::api::{language_name, AnswerService};
use crate::capture::{CaptureBackend, Chunk};
use crate::encoding::{negotiate_format, AudioClip, FALLBACK_FORMAT};
use crate::ui::{SessionStatus, Ui};

pub const NO_TEXT_PLACEHOLDER: &str = "(no text)";
pub const NO_ANSWER_PLACEHOLDER: &str = "(no answer)";
pub const NO_AUDIO_QUESTION: &str = "(no audio)";
pub const NO_AUDIO_ANSWER: &str = "No audio detected.";
pub const SERVER_ERROR_QUESTION: &str = "(server error)";
pub const SERVER_ERROR_ANSWER: &str = "Could not connect to the server.";

/// Where a capture attempt currently is.
///
/// Every error edge converges back on `Idle`; errors are surfaced as
/// status messages, not as a state of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    RequestingDevice,
    Capturing,
    Finalizing,
    Uploading,
}

/// One recording attempt: encoder, chunk buffer, and lifecycle.
///
/// The session owns its backend exclusively, so "a capture is already
/// active" is an explicit, checkable condition rather than ambient
/// shared state. Starting while active is a logged no-op, as is
/// stopping while idle.
pub struct CaptureSession {
    backend: Box<dyn CaptureBackend>,
    service: Arc<dyn AnswerService>,
    ui: Arc<dyn Ui>,
    options: SessionOptions,
    state: SessionState,
    active: Option<ActiveCapture>,
}

struct ActiveCapture {
    /// Negotiated format tag; `None` means the platform picked its own
    format: Option<&'static str>,
    buffer: Arc<Mutex<Vec<Chunk>>>,
    collector: JoinHandle<()>,
}

impl CaptureSession {
    pub fn new(
        backend: Box<dyn CaptureBackend>,
        service: Arc<dyn AnswerService>,
        ui: Arc<dyn Ui>,
        options: SessionOptions,
    ) -> Self {
        Self {
            backend,
            service,
            ui,
            options,
            state: SessionState::Idle,
            active: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        self.active.is_some()
    }

    /// Begin a capture attempt.
    ///
    /// All failure outcomes are reported through the UI status line and
    /// leave the session idle and retryable; `Err` is reserved for
    /// internal faults.
    pub async fn start(&mut self) -> Result<()> {
        if self.active.is_some() {
            warn!("Capture already active; ignoring start");
            return Ok(());
        }

        self.ui.clear_results();
        self.ui.set_listening(true);
        self.ui.set_status(SessionStatus::Listening);
        self.state = SessionState::RequestingDevice;

        if let Err(e) = self.backend.acquire().await {
            warn!("Capture device unavailable: {:#}", e);
            self.reset_to(SessionStatus::MicBlocked);
            return Ok(());
        }

        let negotiated = negotiate_format(|f| self.backend.supports(f));

        // The capability probe and the encoder can disagree; retry once
        // with the hard-coded secondary before giving up.
        let (format, chunk_rx) = match self.backend.start(negotiated).await {
            Ok(rx) => (negotiated, rx),
            Err(e) => {
                warn!(
                    "Encoder rejected negotiated format ({:#}); retrying with {}",
                    e, FALLBACK_FORMAT
                );
                match self.backend.start(Some(FALLBACK_FORMAT)).await {
                    Ok(rx) => (Some(FALLBACK_FORMAT), rx),
                    Err(e) => {
                        error!("Encoder construction failed: {:#}", e);
                        self.reset_to(SessionStatus::Unsupported);
                        return Ok(());
                    }
                }
            }
        };

        let buffer = Arc::new(Mutex::new(Vec::new()));
        let collector = tokio::spawn(collect_chunks(chunk_rx, Arc::clone(&buffer)));

        self.active = Some(ActiveCapture {
            format,
            buffer,
            collector,
        });
        self.state = SessionState::Capturing;

        info!(
            "Capture started on {} ({})",
            self.backend.name(),
            format.unwrap_or("platform default")
        );

        Ok(())
    }

    /// Finalize the capture, assemble the clip, and upload it.
    pub async fn stop(&mut self) -> Result<()> {
        self.ui.set_listening(false);
        self.ui.set_status(SessionStatus::Processing);

        let Some(active) = self.active.take() else {
            self.ui.set_status(SessionStatus::Idle);
            self.state = SessionState::Idle;
            return Ok(());
        };

        self.state = SessionState::Finalizing;
        if let Err(e) = self.backend.finalize().await {
            warn!("Encoder finalize reported an error: {:#}", e);
        }

        // Trailing fragments arrive asynchronously after the stop
        // signal; assembling too early truncates the clip.
        tokio::time::sleep(self.options.settle_delay).await;

        if let Err(e) = active.collector.await {
            error!("Chunk collector task panicked: {}", e);
        }

        let chunks = {
            let mut buffer = active.buffer.lock().await;
            std::mem::take(&mut *buffer)
        };
        let clip = AudioClip::assemble(&chunks, active.format);
        info!(
            "Assembled {} chunks into a {} byte clip",
            chunks.len(),
            clip.len()
        );

        if clip.len() < self.options.min_clip_bytes {
            info!(
                "Clip below {} byte threshold; treating as silence",
                self.options.min_clip_bytes
            );
            self.ui.show_results(NO_AUDIO_QUESTION, NO_AUDIO_ANSWER);
            self.ui.set_detected_language(None);
            self.ui.set_status(SessionStatus::NoAudio);
            self.state = SessionState::Idle;
            return Ok(());
        }

        self.state = SessionState::Uploading;
        let outcome = self
            .service
            .transcribe(&clip, &self.options.language, &self.options.output_language)
            .await;

        match outcome {
            Ok(response) => {
                let question = response
                    .question
                    .as_deref()
                    .filter(|s| !s.is_empty())
                    .unwrap_or(NO_TEXT_PLACEHOLDER);
                let answer = response
                    .answer
                    .as_deref()
                    .filter(|s| !s.is_empty())
                    .unwrap_or(NO_ANSWER_PLACEHOLDER);
                self.ui.show_results(question, answer);
                self.ui
                    .set_detected_language(response.detected_language.as_deref().map(language_name));
                self.ui.set_status(SessionStatus::Idle);
            }
            Err(e) => {
                warn!("Upload failed: {:#}", e);
                self.ui.show_results(SERVER_ERROR_QUESTION, SERVER_ERROR_ANSWER);
                self.ui.set_detected_language(None);
                self.ui.set_status(SessionStatus::Idle);
            }
        }

        self.state = SessionState::Idle;
        Ok(())
    }

    fn reset_to(&mut self, status: SessionStatus) {
        self.ui.set_listening(false);
        self.ui.set_status(status);
        self.state = SessionState::Idle;
    }
}

/// Append chunks to the buffer in arrival order until the encoder
/// closes the channel. Zero-length fragments are silently discarded.
async fn collect_chunks(mut rx: mpsc::UnboundedReceiver<Chunk>, buffer: Arc<Mutex<Vec<Chunk>>>) {
    while let Some(chunk) = rx.recv().await {
        if chunk.is_empty() {
            continue;
        }
        buffer.lock().await.push(chunk);
    }
}
