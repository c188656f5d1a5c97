use std::io::Write;

/// Status line shown while a capture attempt progresses.
///
/// Errors have no state of their own: every failure path lands back on
/// an idle-capable status with a distinct message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Listening,
    Processing,
    MicBlocked,
    Unsupported,
    NoAudio,
}

impl SessionStatus {
    pub fn message(&self) -> &'static str {
        match self {
            SessionStatus::Idle => "Ready.",
            SessionStatus::Listening => "Listening...",
            SessionStatus::Processing => "Processing...",
            SessionStatus::MicBlocked => "Microphone blocked. Allow access and try again.",
            SessionStatus::Unsupported => "Recording is not supported on this device.",
            SessionStatus::NoAudio => "No audio detected.",
        }
    }
}

/// Display surface the session reports into.
///
/// The session never renders anything itself; all visible state flows
/// through this seam so the binary's console view and the test fakes
/// observe identical transitions.
pub trait Ui: Send + Sync {
    /// Update the status line.
    fn set_status(&self, status: SessionStatus);

    /// Flip the start/stop affordances.
    fn set_listening(&self, listening: bool);

    /// Clear transcript, answer, and detected-language annotation so
    /// stale results never linger into a new attempt.
    fn clear_results(&self);

    /// Show the transcript and generated answer.
    fn show_results(&self, question: &str, answer: &str);

    /// Replace the detected-language annotation; `None` clears it.
    fn set_detected_language(&self, label: Option<&str>);
}

/// Console view used by the binary.
#[derive(Default)]
pub struct ConsoleUi;

impl Ui for ConsoleUi {
    fn set_status(&self, status: SessionStatus) {
        print!("\r\x1b[2K[{}]", status.message());
        let _ = std::io::stdout().flush();
    }

    fn set_listening(&self, listening: bool) {
        if listening {
            println!("\n(press Enter to stop)");
        }
    }

    fn clear_results(&self) {}

    fn show_results(&self, question: &str, answer: &str) {
        println!("\nQ: {}", question);
        println!("A: {}", answer);
    }

    fn set_detected_language(&self, label: Option<&str>) {
        if let Some(label) = label {
            println!("\n[detected language: {}]", label);
        }
    }
}
