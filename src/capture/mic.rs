use anyhow::{anyhow, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, StreamConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, info};

use super::backend::{CaptureBackend, Chunk};

/// Microphone capture backend built on cpal.
///
/// The cpal stream lives on a dedicated thread (cpal streams are not
/// `Send`); the backend communicates with it through a stop flag and a
/// pair of oneshot channels. Incoming samples are converted to 16-bit
/// PCM and encoded into a single WAV clip when the encoder finalizes,
/// mirroring platform encoders that flush on stop.
pub struct MicBackend {
    preferred_device: Option<String>,
    device_name: Option<String>,
    active: Option<ActiveEncoder>,
}

struct ActiveEncoder {
    stop: Arc<AtomicBool>,
    done_rx: oneshot::Receiver<()>,
}

impl MicBackend {
    pub fn new(preferred_device: Option<String>) -> Self {
        Self {
            preferred_device,
            device_name: None,
            active: None,
        }
    }

    /// List input device names so the CLI can expose a selector.
    pub fn list_devices() -> Result<Vec<String>> {
        let host = cpal::default_host();
        let devices = host.input_devices().context("no input devices available")?;
        let mut names = Vec::new();
        for device in devices {
            if let Ok(name) = device.name() {
                names.push(name);
            }
        }
        Ok(names)
    }
}

#[async_trait::async_trait]
impl CaptureBackend for MicBackend {
    fn supports(&self, format: &str) -> bool {
        // The microphone encoder produces PCM-in-WAV only.
        format.contains("wav")
    }

    async fn acquire(&mut self) -> Result<()> {
        let device = resolve_device(self.preferred_device.as_deref())?;
        let name = device
            .name()
            .unwrap_or_else(|_| "unknown input device".to_string());
        info!("Using capture device: {}", name);
        self.device_name = Some(name);
        Ok(())
    }

    async fn start(&mut self, format: Option<&str>) -> Result<mpsc::UnboundedReceiver<Chunk>> {
        if let Some(f) = format {
            if !self.supports(f) {
                return Err(anyhow!("encoder does not accept format '{f}'"));
            }
        }

        let (chunk_tx, chunk_rx) = mpsc::unbounded_channel();
        let (ready_tx, ready_rx) = oneshot::channel();
        let (done_tx, done_rx) = oneshot::channel();
        let stop = Arc::new(AtomicBool::new(false));

        let preferred = self.preferred_device.clone();
        let stop_flag = stop.clone();
        std::thread::spawn(move || {
            capture_thread(preferred, chunk_tx, stop_flag, ready_tx, done_tx);
        });

        match ready_rx.await {
            Ok(Ok(())) => {
                self.active = Some(ActiveEncoder { stop, done_rx });
                Ok(chunk_rx)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(anyhow!("capture thread exited before starting")),
        }
    }

    async fn finalize(&mut self) -> Result<()> {
        let Some(active) = self.active.take() else {
            return Ok(());
        };
        active.stop.store(true, Ordering::SeqCst);
        // Wait for the encoder thread to flush the clip.
        let _ = active.done_rx.await;
        Ok(())
    }

    fn name(&self) -> &str {
        self.device_name.as_deref().unwrap_or("microphone")
    }
}

fn resolve_device(preferred: Option<&str>) -> Result<cpal::Device> {
    let host = cpal::default_host();
    match preferred {
        Some(name) => {
            let mut devices = host.input_devices().context("no input devices available")?;
            devices
                .find(|d| d.name().map(|n| n == name).unwrap_or(false))
                .ok_or_else(|| anyhow!("input device '{name}' not found"))
        }
        None => host
            .default_input_device()
            .context("no default input device available"),
    }
}

fn capture_thread(
    preferred: Option<String>,
    chunks: mpsc::UnboundedSender<Chunk>,
    stop: Arc<AtomicBool>,
    ready: oneshot::Sender<Result<()>>,
    done: oneshot::Sender<()>,
) {
    let samples = Arc::new(Mutex::new(Vec::<i16>::new()));

    let setup = build_stream(preferred.as_deref(), samples.clone());
    let (stream, sample_rate, channels) = match setup {
        Ok(parts) => {
            let _ = ready.send(Ok(()));
            parts
        }
        Err(e) => {
            let _ = ready.send(Err(e));
            return;
        }
    };

    while !stop.load(Ordering::SeqCst) {
        std::thread::sleep(Duration::from_millis(50));
    }

    if let Err(e) = stream.pause() {
        error!("Failed to pause input stream: {}", e);
    }
    drop(stream);

    let captured = match samples.lock() {
        Ok(buf) => buf.clone(),
        Err(_) => {
            error!("Sample buffer lock poisoned; dropping capture");
            let _ = done.send(());
            return;
        }
    };

    match encode_wav(&captured, sample_rate, channels) {
        Ok(clip) if !clip.is_empty() => {
            let _ = chunks.send(clip);
        }
        Ok(_) => {}
        Err(e) => error!("Failed to encode WAV clip: {}", e),
    }

    let _ = done.send(());
    // chunk sender drops here, closing the channel
}

fn build_stream(
    preferred: Option<&str>,
    samples: Arc<Mutex<Vec<i16>>>,
) -> Result<(cpal::Stream, u32, u16)> {
    let device = resolve_device(preferred)?;
    let supported = device
        .default_input_config()
        .context("failed to query input config")?;
    let sample_format = supported.sample_format();
    let config: StreamConfig = supported.into();
    let sample_rate = config.sample_rate.0;
    let channels = config.channels;

    let err_fn = |err| error!("Input stream error: {}", err);

    // Convert every supported sample type to i16 up front so encoding
    // stays format-agnostic.
    let stream = match sample_format {
        SampleFormat::F32 => {
            let samples = samples.clone();
            device.build_input_stream(
                &config,
                move |data: &[f32], _| {
                    append_samples(&samples, data, |s| {
                        (s.clamp(-1.0, 1.0) * 32_767.0) as i16
                    });
                },
                err_fn,
                None,
            )?
        }
        SampleFormat::I16 => {
            let samples = samples.clone();
            device.build_input_stream(
                &config,
                move |data: &[i16], _| {
                    append_samples(&samples, data, |s| s);
                },
                err_fn,
                None,
            )?
        }
        SampleFormat::U16 => {
            let samples = samples.clone();
            device.build_input_stream(
                &config,
                move |data: &[u16], _| {
                    append_samples(&samples, data, |s| (s as i32 - 32_768) as i16);
                },
                err_fn,
                None,
            )?
        }
        other => return Err(anyhow!("unsupported sample format: {other:?}")),
    };

    stream.play().context("failed to start input stream")?;

    Ok((stream, sample_rate, channels))
}

fn append_samples<T: Copy>(
    buffer: &Arc<Mutex<Vec<i16>>>,
    data: &[T],
    convert: impl Fn(T) -> i16,
) {
    if data.is_empty() {
        return;
    }
    if let Ok(mut buf) = buffer.lock() {
        buf.extend(data.iter().copied().map(convert));
    }
}

fn encode_wav(samples: &[i16], sample_rate: u32, channels: u16) -> Result<Vec<u8>> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = std::io::Cursor::new(Vec::new());
    let mut writer =
        hound::WavWriter::new(&mut cursor, spec).context("failed to create WAV encoder")?;
    for &sample in samples {
        writer
            .write_sample(sample)
            .context("failed to encode sample")?;
    }
    writer.finalize().context("failed to finalize WAV clip")?;

    Ok(cursor.into_inner())
}
