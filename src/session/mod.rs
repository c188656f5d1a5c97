pub mod config;
pub mod session;

pub use config::SessionOptions;
pub use session::{
    CaptureSession, SessionState, NO_ANSWER_PLACEHOLDER, NO_AUDIO_ANSWER, NO_AUDIO_QUESTION,
    NO_TEXT_PLACEHOLDER, SERVER_ERROR_ANSWER, SERVER_ERROR_QUESTION,
};
