//! Spoken set announcements.
//!
//! Shells out to a speech program (`espeak` by default) and waits for it
//! to finish. Failures are logged and never stop the workout.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::NarrationConfig;

#[async_trait(?Send)]
pub trait Narrator {
    async fn say(&self, text: &str);
}

pub struct CommandNarrator {
    command: String,
    rate: u32,
}

impl CommandNarrator {
    pub fn new(config: &NarrationConfig) -> Self {
        Self {
            command: config.command.clone(),
            rate: config.rate,
        }
    }

    /// Text goes after `--` so a leading `-` is not read as an option.
    fn args(&self, text: &str) -> Vec<String> {
        vec![
            "-s".into(),
            self.rate.to_string(),
            "--".into(),
            text.to_string(),
        ]
    }
}

#[async_trait(?Send)]
impl Narrator for CommandNarrator {
    async fn say(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        debug!("Speaking: {text}");
        match Command::new(&self.command).args(self.args(text)).status().await {
            Ok(status) if status.success() => {}
            Ok(status) => warn!("{} exited with {status}", self.command),
            Err(e) => warn!("Failed to run {}: {e}", self.command),
        }
    }
}

pub struct SilentNarrator;

#[async_trait(?Send)]
impl Narrator for SilentNarrator {
    async fn say(&self, _text: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_args_carry_rate_and_text() {
        let narrator = CommandNarrator::new(&NarrationConfig::default());
        assert_eq!(narrator.args("Squats"), vec!["-s", "180", "--", "Squats"]);
    }

    #[test]
    fn test_dash_leading_text_follows_separator() {
        let narrator = CommandNarrator::new(&NarrationConfig::default());
        let args = narrator.args("-10 reps");
        let separator = args.iter().position(|a| a == "--").unwrap();
        assert_eq!(args[separator + 1..], ["-10 reps"]);
    }

    #[tokio::test]
    async fn test_missing_program_is_not_fatal() {
        let narrator = CommandNarrator::new(&NarrationConfig {
            enabled: true,
            command: "definitely-not-a-speech-program".into(),
            rate: 180,
        });
        narrator.say("hello").await;
    }
}
