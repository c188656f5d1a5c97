pub mod api;
pub mod capture;
pub mod config;
pub mod encoding;
pub mod session;
pub mod ui;

pub use api::{
    language_name, AnswerRequest, AnswerResponse, AnswerService, ApiClient, ListenResponse,
};
pub use capture::{CaptureBackend, Chunk, MicBackend};
pub use config::Config;
pub use encoding::{
    extension_for, negotiate_format, AudioClip, CANDIDATE_FORMATS, FALLBACK_FORMAT,
};
pub use session::{CaptureSession, SessionOptions, SessionState};
pub use ui::{ConsoleUi, SessionStatus, Ui};
