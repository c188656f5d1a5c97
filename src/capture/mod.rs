pub mod backend;
pub mod mic;

pub use backend::{CaptureBackend, Chunk};
pub use mic::MicBackend;
