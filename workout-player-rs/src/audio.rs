//! Alert cue playback through rodio.
//!
//! A cue is either a sound file from the config or, when none is
//! configured, a synthesized sine beep padded with silence to one tick.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use rodio::source::{SineWave, Source};
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use tracing::debug;

use crate::config::AudioConfig;
use crate::error::PlaybackError;

const DRAIN_POLL: Duration = Duration::from_millis(50);

/// Plays the "switching soon" alert. Returns once the cue has finished.
#[async_trait(?Send)]
pub trait CuePlayer {
    async fn play_alert(&self) -> Result<(), PlaybackError>;
}

enum Cue {
    File(PathBuf),
    Beep { hz: f32, length: Duration },
}

pub struct RodioCuePlayer {
    // Kept alive for the process lifetime; dropping it silences the sink.
    stream: OutputStream,
    cue: Cue,
    volume: f32,
    tick: Duration,
}

impl RodioCuePlayer {
    /// Open the default output device. `tick` is the length a synthesized
    /// beep is padded to.
    pub fn new(config: &AudioConfig, tick: Duration) -> Result<Self, PlaybackError> {
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlaybackError::Device(e.to_string()))?;
        stream.log_on_drop(false);

        let cue = match &config.alert_sound {
            Some(path) => Cue::File(path.clone()),
            None => Cue::Beep {
                hz: config.beep_hz,
                length: Duration::from_millis(config.beep_ms).min(tick),
            },
        };

        Ok(Self {
            stream,
            cue,
            volume: config.volume,
            tick,
        })
    }

    async fn drain(sink: &Sink) {
        while !sink.empty() {
            tokio::time::sleep(DRAIN_POLL).await;
        }
    }
}

#[async_trait(?Send)]
impl CuePlayer for RodioCuePlayer {
    async fn play_alert(&self) -> Result<(), PlaybackError> {
        let started = Instant::now();
        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.volume);

        match &self.cue {
            Cue::File(path) => {
                let file = File::open(path).map_err(|source| PlaybackError::Open {
                    path: path.clone(),
                    source,
                })?;
                let source = Decoder::new(BufReader::new(file))
                    .map_err(|e| PlaybackError::Decode(e.to_string()))?;
                sink.append(source);
                Self::drain(&sink).await;
            }
            Cue::Beep { hz, length } => {
                sink.append(SineWave::new(*hz).take_duration(*length));
                Self::drain(&sink).await;
                let elapsed = started.elapsed();
                if elapsed < self.tick {
                    tokio::time::sleep(self.tick - elapsed).await;
                }
            }
        }

        debug!("Alert played in {}ms", started.elapsed().as_millis());
        Ok(())
    }
}

/// Player used with `--mute` or when no audio device is available.
/// Waits one tick so countdown timing is unchanged.
pub struct SilentCuePlayer {
    tick: Duration,
}

impl SilentCuePlayer {
    pub fn new(tick: Duration) -> Self {
        Self { tick }
    }
}

#[async_trait(?Send)]
impl CuePlayer for SilentCuePlayer {
    async fn play_alert(&self) -> Result<(), PlaybackError> {
        tokio::time::sleep(self.tick).await;
        Ok(())
    }
}
