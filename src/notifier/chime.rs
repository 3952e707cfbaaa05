//! Completion chime synthesized on the default audio output via cpal

use std::{
    sync::{
        mpsc::{self, Sender},
        Arc, Mutex,
    },
    thread,
    time::{Duration, Instant},
};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Total length of a chime in seconds
pub const TONE_SECS: f32 = 0.8;
const PEAK_GAIN: f32 = 0.2;
const FLOOR_GAIN: f32 = 0.0001;
const ATTACK_SECS: f32 = 0.01;
const DECAY_END_SECS: f32 = 0.7;
/// Give up waiting on a device that stops pulling samples
const DRAIN_GRACE: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum ChimeError {
    #[error("no default audio output device")]
    NoDevice,
    #[error("audio device configuration failed: {0}")]
    Config(String),
    #[error("audio stream failed: {0}")]
    Stream(String),
    #[error("failed to start audio thread: {0}")]
    Thread(#[from] std::io::Error),
    #[error("audio thread is gone")]
    Closed,
}

/// Opens the audio output and returns the queue chime requests go to
pub type AudioOpener = Box<dyn FnMut() -> Result<Sender<f32>, ChimeError> + Send>;

/// Gain of the chime envelope at `t` seconds
///
/// Linear attack up to the peak, exponential decay down to the floor, then
/// held at the floor until the tone stops.
pub fn envelope(t: f32) -> f32 {
    if t < ATTACK_SECS {
        PEAK_GAIN * (t / ATTACK_SECS)
    } else if t < DECAY_END_SECS {
        let progress = (t - ATTACK_SECS) / (DECAY_END_SECS - ATTACK_SECS);
        PEAK_GAIN * (FLOOR_GAIN / PEAK_GAIN).powf(progress)
    } else {
        FLOOR_GAIN
    }
}

/// Mono samples of an enveloped sine tone
pub fn synthesize_tone(frequency_hz: f32, sample_rate: u32) -> Vec<f32> {
    let total = (TONE_SECS * sample_rate as f32).round() as usize;
    (0..total)
        .map(|n| {
            let t = n as f32 / sample_rate as f32;
            (2.0 * std::f32::consts::PI * frequency_hz * t).sin() * envelope(t)
        })
        .collect()
}

/// Lazily opened audio output that plays chimes off the caller's thread
///
/// Opening is synchronous on first use; playback is not.
pub struct Chime {
    muted: bool,
    opener: AudioOpener,
    requests: Option<Sender<f32>>,
}

impl std::fmt::Debug for Chime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chime")
            .field("muted", &self.muted)
            .field("open", &self.requests.is_some())
            .finish()
    }
}

impl Chime {
    pub fn new(muted: bool) -> Self {
        Self::with_opener(muted, Box::new(spawn_audio_thread))
    }

    pub fn with_opener(muted: bool, opener: AudioOpener) -> Self {
        Self {
            muted,
            opener,
            requests: None,
        }
    }

    /// Queue a chime at the given pitch
    ///
    /// The audio output is opened on first use; if that fails the error is
    /// returned and opening is attempted again on the next call.
    pub fn play(&mut self, frequency_hz: f32) -> Result<(), ChimeError> {
        if self.muted {
            debug!("Chime muted");
            return Ok(());
        }

        let requests = match self.requests.take() {
            Some(tx) => tx,
            None => (self.opener)()?,
        };

        match requests.send(frequency_hz) {
            Ok(()) => {
                self.requests = Some(requests);
                Ok(())
            }
            Err(_) => Err(ChimeError::Closed),
        }
    }
}

fn spawn_audio_thread() -> Result<Sender<f32>, ChimeError> {
    let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<(), ChimeError>>(1);
    let (tx, rx) = mpsc::channel::<f32>();

    thread::Builder::new()
        .name("chime-audio".to_string())
        .spawn(move || {
            let output = match AudioOutput::open() {
                Ok(output) => {
                    let _ = ready_tx.send(Ok(()));
                    output
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };

            for frequency_hz in rx {
                if let Err(e) = output.play(frequency_hz) {
                    warn!("Unable to play notification sound: {}", e);
                }
            }
            debug!("Chime audio thread exiting");
        })?;

    ready_rx.recv().map_err(|_| ChimeError::Closed)??;
    Ok(tx)
}

struct AudioOutput {
    device: cpal::Device,
    config: cpal::StreamConfig,
}

impl AudioOutput {
    fn open() -> Result<Self, ChimeError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(ChimeError::NoDevice)?;
        let config = device
            .default_output_config()
            .map_err(|e| ChimeError::Config(e.to_string()))?
            .config();

        let device_name = device
            .description()
            .map(|d| d.name().to_owned())
            .unwrap_or_else(|_| "<unknown>".into());
        info!(
            "Opened audio output for chimes: {} ({} Hz, {} channels)",
            device_name, config.sample_rate, config.channels
        );

        Ok(Self { device, config })
    }

    /// Play one tone, blocking until the device has consumed it
    fn play(&self, frequency_hz: f32) -> Result<(), ChimeError> {
        let samples = synthesize_tone(frequency_hz, self.config.sample_rate);
        let channels = usize::from(self.config.channels.max(1));
        let buffer = Arc::new(Mutex::new(PlaybackBuffer::new(samples)));
        let buffer_clone = Arc::clone(&buffer);

        let stream = self
            .device
            .build_output_stream(
                &self.config,
                move |data: &mut [f32], _info: &cpal::OutputCallbackInfo| {
                    if let Ok(mut buf) = buffer_clone.lock() {
                        buf.fill(data, channels);
                    }
                },
                move |err| {
                    error!("Chime output stream error: {}", err);
                },
                None,
            )
            .map_err(|e| ChimeError::Stream(e.to_string()))?;

        stream
            .play()
            .map_err(|e| ChimeError::Stream(e.to_string()))?;

        // Wait for playback to finish
        let deadline = Instant::now() + Duration::from_secs_f32(TONE_SECS) + DRAIN_GRACE;
        loop {
            thread::sleep(Duration::from_millis(10));
            let finished = buffer
                .lock()
                .map_err(|e| ChimeError::Stream(format!("playback buffer lock poisoned: {e}")))?
                .finished;
            if finished {
                break;
            }
            if Instant::now() >= deadline {
                warn!("Audio device stopped pulling samples, cutting chime short");
                break;
            }
        }

        drop(stream);
        Ok(())
    }
}

/// Internal buffer for tracking playback progress
struct PlaybackBuffer {
    samples: Vec<f32>,
    position: usize,
    finished: bool,
}

impl PlaybackBuffer {
    fn new(samples: Vec<f32>) -> Self {
        Self {
            samples,
            position: 0,
            finished: false,
        }
    }

    /// Write the next frames into `data`, padding with silence once the
    /// tone is exhausted
    fn fill(&mut self, data: &mut [f32], channels: usize) {
        for frame in data.chunks_mut(channels) {
            let sample = match self.samples.get(self.position) {
                Some(&s) => {
                    self.position += 1;
                    s
                }
                None => {
                    self.finished = true;
                    0.0
                }
            };
            frame.fill(sample);
        }
    }
}
