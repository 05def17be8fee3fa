use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use handtune::config::{CameraOverrides, PipelineConfig};
use handtune::engine::{PipelineSession, ScriptedSource};
use handtune::gesture::{Landmark, RawHand, RawHandedness};
use handtune::midi::{Emotion, Preset};

#[derive(Parser, Debug)]
#[command(
    name = "handtune_cli",
    about = "Offline MIDI generation and deterministic pipeline runs for HandTune"
)]
struct Cli {
    /// Override path to the pipeline settings file
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a MIDI timeline for an emotion code
    Generate {
        /// Emotion code 1-5; out-of-range codes select the neutral preset
        #[arg(long, default_value_t = 3)]
        emotion: i32,
        /// Write a .mid file here instead of streaming events to stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Dump the emotion -> preset table as JSON
    Presets,
    /// Run the pipeline over a synthetic gesture script and stream state
    Simulate {
        /// Number of synthetic frames to play
        #[arg(long, default_value_t = 30)]
        frames: usize,
        /// Disable the horizontal mirroring of role assignment
        #[arg(long)]
        no_flip: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli
        .config
        .map(PipelineConfig::load_from_file)
        .unwrap_or_else(PipelineConfig::load);

    match cli.command {
        Commands::Generate { emotion, output } => run_generate(config, emotion, output),
        Commands::Presets => run_presets(),
        Commands::Simulate { frames, no_flip } => run_simulate(config, frames, no_flip),
    }
}

fn run_generate(config: PipelineConfig, emotion: i32, output: Option<PathBuf>) -> Result<ExitCode> {
    let session = PipelineSession::new(config);

    match output {
        Some(path) => {
            let timeline = session
                .write_midi(emotion, &path)
                .with_context(|| format!("writing MIDI for emotion code {}", emotion))?;
            println!(
                "Wrote {} events ({:.2}s at {} bpm) to {}",
                timeline.events.len(),
                timeline.duration(),
                timeline.tempo,
                path.display()
            );
            if timeline.skipped_notes > 0 || timeline.invalid_rhythm_tokens > 0 {
                println!(
                    "Diagnostics: {} skipped notes, {} invalid rhythm tokens",
                    timeline.skipped_notes, timeline.invalid_rhythm_tokens
                );
            }
        }
        None => {
            let timeline = session
                .generate_timeline(emotion)
                .with_context(|| format!("generating timeline for emotion code {}", emotion))?;
            for event in &timeline.events {
                println!("{}", serde_json::to_string(event)?);
            }
        }
    }

    Ok(ExitCode::from(0))
}

fn run_presets() -> Result<ExitCode> {
    for emotion in Emotion::all() {
        let preset = Preset::for_emotion(emotion);
        println!(
            "{}",
            serde_json::json!({
                "code": emotion.code(),
                "emotion": emotion,
                "preset": preset,
            })
        );
    }
    Ok(ExitCode::from(0))
}

/// Deterministic gesture script: one hand sweeping across the frame while
/// slowly closing the thumb-index pinch
fn synthetic_frames(count: usize) -> Vec<Vec<RawHand>> {
    use handtune::gesture::landmark_index;

    (0..count)
        .map(|i| {
            let t = i as f32 / count.max(1) as f32;
            let mut landmarks = vec![Landmark::default(); 21];
            landmarks[landmark_index::WRIST] = Landmark::new(0.2 + 0.6 * t, 0.5, 0.0);
            landmarks[landmark_index::THUMB_TIP] = Landmark::new(0.5, 0.5, 0.0);
            landmarks[landmark_index::INDEX_FINGER_TIP] =
                Landmark::new(0.5 + 0.3 * (1.0 - t), 0.5, 0.0);
            vec![RawHand::new(RawHandedness::Right, landmarks)]
        })
        .collect()
}

fn run_simulate(mut config: PipelineConfig, frames: usize, no_flip: bool) -> Result<ExitCode> {
    if no_flip {
        CameraOverrides {
            flip_horizontal: Some(false),
            ..CameraOverrides::default()
        }
        .apply(&mut config.camera);
    }

    let mut session = PipelineSession::new(config);
    let mut source = ScriptedSource::new(synthetic_frames(frames));

    let mut lines = Vec::new();
    session
        .run(&mut source, &mut |state| {
            lines.push(serde_json::to_string(state).unwrap_or_default());
        })
        .context("running the pipeline over the synthetic script")?;

    for line in lines {
        println!("{}", line);
    }

    Ok(ExitCode::from(0))
}
