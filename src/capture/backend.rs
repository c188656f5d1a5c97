use anyhow::Result;
use tokio::sync::mpsc;

/// Encoded audio fragment emitted by a capture backend. Opaque to the
/// session; assembly is order-preserving concatenation.
pub type Chunk = Vec<u8>;

/// Audio capture backend trait
///
/// Owns the platform device and encoder for one capture at a time.
/// Implementations:
/// - Microphone: cpal input stream + WAV encoding
/// - Scripted: in-memory fake for tests
#[async_trait::async_trait]
pub trait CaptureBackend: Send + Sync {
    /// Whether the backend can encode into the given format tag.
    ///
    /// A pure capability query. A `true` here does not guarantee that
    /// [`CaptureBackend::start`] will accept the format — devices are
    /// known to reject formats they report as supported.
    fn supports(&self, format: &str) -> bool;

    /// Acquire the capture device.
    ///
    /// Fails when the device is missing or access is denied; the caller
    /// treats this as recoverable (the user can retry).
    async fn acquire(&mut self) -> Result<()>;

    /// Construct an encoder for the acquired device and begin capture.
    ///
    /// `format` of `None` asks for the backend's own default encoding.
    /// Returns the channel on which encoded chunks arrive, in capture
    /// order. The channel closes once the encoder has flushed.
    async fn start(&mut self, format: Option<&str>) -> Result<mpsc::UnboundedReceiver<Chunk>>;

    /// Signal the encoder to finalize and flush trailing chunks.
    ///
    /// Resolves once the encoder has emitted everything it will emit;
    /// trailing chunks may still be in flight on the channel when this
    /// returns, which is why the session waits a settling delay before
    /// reading its buffer.
    async fn finalize(&mut self) -> Result<()>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}
