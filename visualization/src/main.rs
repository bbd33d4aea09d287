//! `lapse` - replay optimizer trajectories as a time-lapse
//!
//! ```text
//! lapse --preset 0 --title "SD/CG variants, no noise" \
//!       -l SD -l "CG(FR)" cgsd.out cgfr.out
//! lapse --request noisy_split.json --output frames.jsonl --unpaced
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use lapse_core::{AnimationScheduler, FrameSink, PlaybackRequest, PlaybackSummary, Preset};
use lapse_visualization::{init_logger_with_level, JsonLinesSink, LogSink};
use log::{info, LevelFilter};

#[derive(Parser, Debug)]
#[command(name = "lapse", version)]
#[command(about = "Replay optimizer trajectories recorded in step-by-step logs")]
struct Args {
    /// JSON playback request holding title, preset and series
    #[arg(short, long, conflicts_with_all = ["files", "labels", "title"])]
    request: Option<PathBuf>,

    /// Optimizer log files, one per series (at most 6)
    files: Vec<PathBuf>,

    /// Display label of each log file, in the same order (defaults to the file stems)
    #[arg(short, long = "label")]
    labels: Vec<String>,

    /// Title shown above the playback
    #[arg(short, long, default_value = "Optimizer trajectories")]
    title: String,

    /// Playback preset: 0/cg, 1/sgd, 2/noisy-split, 3/noisy-adam
    #[arg(short, long, default_value = "0")]
    preset: Preset,

    /// Write the frames as JSON lines to this file instead of logging them
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render every frame immediately instead of at the preset interval
    #[arg(long)]
    unpaced: bool,

    /// Log every frame computation
    #[arg(short, long)]
    verbose: bool,
}

fn build_request(args: &Args) -> Result<PlaybackRequest> {
    if let Some(path) = &args.request {
        return PlaybackRequest::from_file(path)
            .with_context(|| format!("loading request {}", path.display()));
    }

    let labels = if args.labels.is_empty() {
        args.files.iter().map(|path| file_stem(path)).collect()
    } else {
        args.labels.clone()
    };
    Ok(PlaybackRequest::from_parts(
        args.title.clone(),
        args.preset,
        args.files.clone(),
        labels,
    )?)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

async fn play<S: FrameSink>(
    scheduler: &AnimationScheduler,
    sink: S,
    unpaced: bool,
) -> Result<PlaybackSummary> {
    let summary = if unpaced {
        scheduler.run_unpaced(sink)?
    } else {
        scheduler.run(sink).await?
    };
    Ok(summary)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logger_with_level(if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    let request = build_request(&args)?;
    info!("Preset {} for '{}'", request.preset, request.title);
    let scheduler = request.scheduler()?;

    let stop = scheduler.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stop.stop();
        }
    });

    let summary = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            let summary = play(&scheduler, JsonLinesSink::new(BufWriter::new(file)), args.unpaced).await?;
            info!("Wrote {} frames to {}", summary.frames_rendered, path.display());
            summary
        }
        None => play(&scheduler, LogSink::default(), args.unpaced).await?,
    };

    if summary.stopped_early {
        info!(
            "Stopped after {} of {} frames",
            summary.frames_rendered, summary.frame_count
        );
    }
    Ok(())
}
