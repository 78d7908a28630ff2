//! Countdown playback of a loaded workout.
//!
//! Each set prints one description line and then counts down one tick per
//! `interval`. Ticks wait silently until the last `switch_alert_threshold`
//! ticks of the set, which play the alert cue instead of waiting.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::{style, Attribute, Color, ContentStyle, Stylize};
use crossterm::terminal::{Clear, ClearType};
use tracing::{debug, info, warn};

use crate::audio::CuePlayer;
use crate::config::Config;
use crate::narrator::Narrator;
use crate::workout::{AlertMotif, Side, WorkoutSet};

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    Silent,
    Alert,
}

/// Number of whole ticks in a set.
pub fn num_intervals(duration_secs: u32, interval: Duration) -> u64 {
    u64::from(duration_secs) / interval.as_secs().max(1)
}

/// Tick `i` of `num_intervals` alerts once `remaining <= threshold`.
pub fn tick_kind(i: u64, num_intervals: u64, threshold: u64) -> TickKind {
    let remaining = num_intervals.saturating_sub(i);
    if remaining > threshold {
        TickKind::Silent
    } else {
        TickKind::Alert
    }
}

pub fn tick_plan(duration_secs: u32, interval: Duration, threshold: u64) -> Vec<TickKind> {
    let n = num_intervals(duration_secs, interval);
    (0..n).map(|i| tick_kind(i, n, threshold)).collect()
}

/// `"<order>/<total>"`, using the set's own order value.
pub fn progress_label(set: &WorkoutSet, total: usize) -> String {
    format!("{}/{}", set.order, total)
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub interval: Duration,
    pub switch_alert_threshold: u64,
    /// Zero disables the get-ready phase.
    pub get_ready_ticks: u64,
    pub narrate: bool,
}

impl RenderOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            interval: config.player.interval_length(),
            switch_alert_threshold: config.player.switch_alert_threshold,
            get_ready_ticks: if config.player.get_ready {
                config.player.get_ready_ticks
            } else {
                0
            },
            narrate: config.narration.enabled,
        }
    }
}

pub struct Renderer<'a, W: Write> {
    out: W,
    player: &'a dyn CuePlayer,
    narrator: &'a dyn Narrator,
    options: RenderOptions,
    audio_failed: bool,
}

impl<'a, W: Write> Renderer<'a, W> {
    pub fn new(
        out: W,
        player: &'a dyn CuePlayer,
        narrator: &'a dyn Narrator,
        options: RenderOptions,
    ) -> Self {
        Self {
            out,
            player,
            narrator,
            options,
            audio_failed: false,
        }
    }

    /// Play every set in order. Returns after the last countdown.
    pub async fn render(&mut self, sets: &[WorkoutSet]) -> io::Result<()> {
        if self.options.get_ready_ticks > 0 {
            self.get_ready().await?;
        }

        let total = sets.len();
        for set in sets {
            self.render_set(set, total).await?;
        }

        info!("Workout finished: {total} sets");
        Ok(())
    }

    async fn get_ready(&mut self) -> io::Result<()> {
        let ticks = self.options.get_ready_ticks;
        writeln!(
            self.out,
            "{}",
            style("Get ready!").with(Color::Yellow).attribute(Attribute::Bold)
        )?;

        for i in 0..ticks {
            self.draw_tick("⏱", "READY", i, ticks)?;
            self.alert().await;
        }
        self.finish_countdown()
    }

    async fn render_set(&mut self, set: &WorkoutSet, total: usize) -> io::Result<()> {
        let motif = set.motif();
        writeln!(self.out, "{}", description_line(set, total))?;
        self.out.flush()?;

        if self.options.narrate {
            self.narrator.say(&set.announcement()).await;
        }

        let plan = tick_plan(
            set.duration,
            self.options.interval,
            self.options.switch_alert_threshold,
        );
        let n = plan.len() as u64;
        debug!("Set {}: {} ({n} ticks, {motif:?})", set.order, set.name);

        for (i, kind) in (0..n).zip(plan) {
            self.draw_tick(motif.icon(), motif.label(), i, n)?;
            match kind {
                TickKind::Silent => tokio::time::sleep(self.options.interval).await,
                TickKind::Alert => self.alert().await,
            }
        }
        self.finish_countdown()
    }

    /// Play the alert. A failed cue falls back to a silent tick so the
    /// interval keeps its length.
    async fn alert(&mut self) {
        if let Err(e) = self.player.play_alert().await {
            if self.audio_failed {
                debug!("Alert playback failed: {e}");
            } else {
                warn!("Alert playback failed, continuing without sound: {e}");
                self.audio_failed = true;
            }
            tokio::time::sleep(self.options.interval).await;
        }
    }

    fn draw_tick(&mut self, icon: &str, label: &str, i: u64, n: u64) -> io::Result<()> {
        let remaining = (n - i) * self.options.interval.as_secs();
        let filled = if n == 0 {
            BAR_WIDTH
        } else {
            (i as usize * BAR_WIDTH) / n as usize
        };

        queue!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        write!(
            self.out,
            "{icon} {label:<5} {remaining:>4}s [{}{}]",
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled)
        )?;
        self.out.flush()
    }

    fn finish_countdown(&mut self) -> io::Result<()> {
        queue!(self.out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        self.out.flush()
    }
}

pub fn progress_style() -> ContentStyle {
    ContentStyle::new().with(Color::Cyan)
}

pub fn name_style(motif: AlertMotif) -> ContentStyle {
    let color = match motif {
        AlertMotif::Rest => Color::Green,
        AlertMotif::Active => Color::Magenta,
    };
    ContentStyle::new().with(color).attribute(Attribute::Bold)
}

/// Styled line announcing a set: progress and name as separate spans.
pub fn description_line(set: &WorkoutSet, total: usize) -> String {
    let progress = format!("{} ", progress_label(set, total));
    let name = format!("{} ", set.name);

    let mut line = format!(
        "{}{}: {}",
        progress_style().apply(progress),
        name_style(set.motif()).apply(name),
        set.description
    );
    if set.side != Side::Both {
        line.push_str(&format!(" [{}]", set.side));
    }
    line
}
