//! play-workout: terminal workout countdown player.

mod audio;
mod config;
mod error;
mod loader;
mod narrator;
mod notifier;
mod renderer;
mod selector;
mod workout;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::audio::{CuePlayer, RodioCuePlayer, SilentCuePlayer};
use crate::config::Config;
use crate::error::AppError;
use crate::narrator::{CommandNarrator, Narrator, SilentNarrator};
use crate::notifier::Notifier;
use crate::renderer::{RenderOptions, Renderer};
use crate::workout::{format_duration, total_duration, WorkoutSet};

const TITLE: &str = "workout-player";
const TAGLINE: &str = "Small program to play workout set countdown on terminal";

#[derive(Parser, Debug)]
#[command(name = "play-workout", about = "Play a workout set countdown on the terminal")]
struct Args {
    /// Path to a workout file; prompts for a sample workout when omitted
    #[arg(short, long)]
    workout: Option<PathBuf>,

    /// Path to config.yaml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Count down without sound
    #[arg(long)]
    mute: bool,

    /// Skip the get-ready countdown
    #[arg(long)]
    no_get_ready: bool,

    /// Speak each set's name and description
    #[arg(long)]
    narrate: bool,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the countdown line.
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = Config::load(args.config.as_deref());

    let (path, sets) = match prepare(&args, &config) {
        Ok(prepared) => prepared,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    tokio::select! {
        result = play(&args, &config, &path, &sets) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            println!();
            println!("Workout interrupted");
            ExitCode::from(130)
        }
    }
}

/// Resolve and load the workout before anything is played.
fn prepare(args: &Args, config: &Config) -> Result<(PathBuf, Vec<WorkoutSet>), AppError> {
    print_banner();

    let path = match &args.workout {
        Some(path) => path.clone(),
        None => {
            let stdin = io::stdin();
            let samples_dir = config.workouts.resolve_samples_dir();
            selector::prompt_selection(&samples_dir, stdin.lock(), io::stdout())?
        }
    };

    let sets = loader::load(&path)?;
    info!("Loaded workout {} ({} sets)", path.display(), sets.len());
    Ok((path, sets))
}

async fn play(
    args: &Args,
    config: &Config,
    path: &Path,
    sets: &[WorkoutSet],
) -> Result<(), AppError> {
    let mut options = RenderOptions::from_config(config);
    if args.no_get_ready {
        options.get_ready_ticks = 0;
    }
    if args.narrate {
        options.narrate = true;
    }

    let player = build_player(args, config, options.interval);
    let narrator: Box<dyn Narrator> = if options.narrate {
        Box::new(CommandNarrator::new(&config.narration))
    } else {
        Box::new(SilentNarrator)
    };

    print_summary(path, sets)?;

    Renderer::new(io::stdout(), player.as_ref(), narrator.as_ref(), options)
        .render(sets)
        .await?;

    let title = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Workout".into());
    Notifier::new(config.feedback.notifications).workout_complete(&title, sets);
    Ok(())
}

fn build_player(args: &Args, config: &Config, tick: std::time::Duration) -> Box<dyn CuePlayer> {
    if args.mute {
        return Box::new(SilentCuePlayer::new(tick));
    }

    match RodioCuePlayer::new(&config.audio, tick) {
        Ok(player) => Box::new(player),
        Err(e) => {
            warn!("{e}, continuing without sound");
            Box::new(SilentCuePlayer::new(tick))
        }
    }
}

fn print_banner() {
    println!("{TITLE}");
    println!("{}", "=".repeat(TITLE.len()));
    println!("{TAGLINE}");
}

fn print_summary(path: &Path, sets: &[WorkoutSet]) -> io::Result<()> {
    let total = total_duration(sets);
    let finish = Local::now()
        + chrono::Duration::from_std(total).unwrap_or_else(|_| chrono::Duration::zero());

    let mut out = io::stdout();
    writeln!(out)?;
    writeln!(
        out,
        "{}: {} sets, {} (done around {})",
        path.display(),
        sets.len(),
        format_duration(total),
        finish.format("%H:%M")
    )?;
    writeln!(out)?;
    out.flush()
}
