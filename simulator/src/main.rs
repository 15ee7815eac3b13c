use anyhow::Context;
use athletehub_core::model::ProgressEvent;
use athletehub_core::AnalysisKind;
use capture::clip::VideoClip;
use clap::Parser;
use detection::DetectionProbe;
use log::info;
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod bridge;
mod capture;
mod detection;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "AthleteHub video analysis driver")]
struct Args {
    /// freekick, cricket-bowling or cricket-batting
    #[arg(long, default_value = "freekick")]
    kind: AnalysisKind,
    /// Analyze a recorded clip from disk
    #[arg(long)]
    video: Option<PathBuf>,
    /// Analyze a synthetic clip of `--demo-size` bytes
    #[arg(long, default_value_t = false)]
    offline: bool,
    #[arg(long, default_value_t = 2_500_000)]
    demo_size: u64,
    /// Load a workflow config from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    /// Persist results as JSON files in this directory
    #[arg(long)]
    store_dir: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    /// Skip the scripted step delays
    #[arg(long, default_value_t = false)]
    instant: bool,
    /// Print the results page for a session id
    #[arg(long)]
    lookup: Option<String>,
    /// Write the export document of the analyzed or looked-up session here
    #[arg(long)]
    export: Option<PathBuf>,
    /// Check the live-detection service
    #[arg(long, default_value_t = false)]
    probe: bool,
    #[arg(long)]
    detection_url: Option<String>,
    /// Keep the results bridge alive until Ctrl+C
    #[arg(long, default_value_t = false)]
    serve: bool,
    #[arg(long)]
    bind: Option<SocketAddr>,
}

impl Args {
    fn workflow_config(&self) -> anyhow::Result<WorkflowConfig> {
        let mut config = match &self.workflow {
            Some(path) => WorkflowConfig::load(path)?,
            None => WorkflowConfig::from_args(self.store_dir.clone(), 1.0, self.seed),
        };
        if self.store_dir.is_some() {
            config.store_dir = self.store_dir.clone();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.instant {
            config.pace_scale = 0.0;
        }
        if let Some(url) = &self.detection_url {
            config.detection_url = Some(url.clone());
        }
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        Ok(config)
    }
}

fn print_progress(event: &ProgressEvent) {
    println!("[{:>3}%] {:<10} {}", event.progress, event.stage, event.message);
}

async fn analyze_clip(runner: &Runner, args: &Args, clip: VideoClip) -> anyhow::Result<String> {
    let cancel = CancellationToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let outcome = runner
        .analyze(args.kind, &clip, print_progress, &cancel)
        .await;
    watcher.abort();
    let result = outcome?;

    println!(
        "Analysis {} -> max {:.1} km/h, avg {:.1} km/h, {} points, accuracy {}%, ball detected: {}",
        result.session_id,
        result.max_speed,
        result.avg_speed,
        result.trajectory_points,
        result.accuracy,
        result.ball_detected
    );
    Ok(result.session_id)
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = args.workflow_config()?;
    let runner = Runner::new(&config)?;

    let mut session_id = args.lookup.clone();

    let clip = if let Some(path) = &args.video {
        Some(VideoClip::from_path(path).with_context(|| format!("accepting {}", path.display()))?)
    } else if args.offline {
        Some(VideoClip::synthetic(args.demo_size))
    } else {
        None
    };
    if let Some(clip) = clip {
        session_id = Some(analyze_clip(&runner, &args, clip).await?);
    }

    if let Some(id) = &args.lookup {
        let lookup = runner.lookup_any(id)?;
        if lookup.is_demo() {
            println!("No stored analysis for {}; showing demo record.", id);
        }
        println!("{}", serde_json::to_string_pretty(lookup.result())?);
    }

    if let Some(path) = &args.export {
        let id = session_id
            .as_deref()
            .context("--export needs --lookup, --video or --offline")?;
        let (export, demo) = runner.export(id)?;
        let target = if path.is_dir() {
            path.join(export.file_name())
        } else {
            path.clone()
        };
        fs::write(&target, export.to_json_pretty()?)
            .with_context(|| format!("writing export {}", target.display()))?;
        println!(
            "Exported {}{} to {}",
            id,
            if demo { " (demo)" } else { "" },
            target.display()
        );
    }

    if args.probe {
        let url = config
            .detection_url
            .as_deref()
            .context("--probe needs --detection-url or detection_url in the workflow config")?;
        let probe = DetectionProbe::new(url)?;
        let status = probe.check().await;
        if status.reachable {
            println!("Live detection reachable; feed at {}", probe.video_feed_url());
        } else {
            println!(
                "Live detection unreachable at {}. Start the detection service and retry.",
                status.url
            );
        }
    }

    if args.serve {
        println!("HTTP bridge on {} (Ctrl+C to stop)...", config.bind);
        bridge::serve(Arc::new(runner.clone()), config.bind, async {
            let _ = signal::ctrl_c().await;
        })
        .await?;
    }

    let metrics = runner.metrics();
    info!(
        "runs completed={} failed={} cancelled={} fallbacks={}",
        metrics.completed, metrics.failed, metrics.cancelled, metrics.fallbacks
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let runtime = TokioBuilder::new_multi_thread()
        .enable_all()
        .build()
        .context("creating tokio runtime")?;
    runtime.block_on(run(args))
}
