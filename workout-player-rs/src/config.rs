//! Configuration management for workout-player-rs.
//!
//! Loads config from YAML files in standard locations. Every section
//! falls back to its defaults, so an empty file is a valid config.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub interval_length_secs: u64,
    pub switch_alert_threshold: u64,
    pub get_ready: bool,
    pub get_ready_ticks: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            interval_length_secs: 1,
            switch_alert_threshold: 3,
            get_ready: true,
            get_ready_ticks: 3,
        }
    }
}

impl PlayerConfig {
    /// Length of one countdown tick. Never shorter than one second.
    pub fn interval_length(&self) -> Duration {
        Duration::from_secs(self.interval_length_secs.max(1))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Sound file played as the switch alert. When unset a beep is synthesized.
    pub alert_sound: Option<PathBuf>,
    pub beep_hz: f32,
    pub beep_ms: u64,
    pub volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            alert_sound: None,
            beep_hz: 880.0,
            beep_ms: 250,
            volume: 0.3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    pub enabled: bool,
    pub command: String,
    pub rate: u32,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            command: "espeak".into(),
            rate: 180,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkoutsConfig {
    pub samples_dir: PathBuf,
}

impl Default for WorkoutsConfig {
    fn default() -> Self {
        Self {
            samples_dir: PathBuf::from("sample_workouts"),
        }
    }
}

impl WorkoutsConfig {
    /// Locate the samples directory. A relative path is tried against the
    /// working directory, the executable's directory, then the source
    /// checkout the binary was built from.
    pub fn resolve_samples_dir(&self) -> PathBuf {
        let bases = [
            std::env::current_dir().ok(),
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf)),
            Path::new(env!("CARGO_MANIFEST_DIR")).parent().map(Path::to_path_buf),
        ];
        resolve_relative(&self.samples_dir, bases.into_iter().flatten())
    }
}

fn resolve_relative(path: &Path, bases: impl IntoIterator<Item = PathBuf>) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    bases
        .into_iter()
        .map(|base| base.join(path))
        .find(|candidate| candidate.is_dir())
        .unwrap_or_else(|| path.to_path_buf())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    pub notifications: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub player: PlayerConfig,
    pub audio: AudioConfig,
    pub narration: NarrationConfig,
    pub workouts: WorkoutsConfig,
    pub feedback: FeedbackConfig,
}

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// Searches standard locations if no path is provided:
    /// 1. ./workout-player.yaml
    /// 2. ~/.config/workout-player/config.yaml
    pub fn load(path: Option<&Path>) -> Self {
        let resolved = path.map(PathBuf::from).or_else(|| {
            let candidates = [
                std::env::current_dir()
                    .ok()
                    .map(|d| d.join("workout-player.yaml")),
                dirs::home_dir().map(|h| h.join(".config/workout-player/config.yaml")),
            ];
            candidates.into_iter().flatten().find(|p| p.exists())
        });

        let Some(config_path) = resolved else {
            info!("No config file found, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse {}: {e}, using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(
                    "Failed to read {}: {e}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    pub fn parse(contents: &str) -> Result<Self, serde_yml::Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(contents)
    }
}
