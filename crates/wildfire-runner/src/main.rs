//! Headless runner for the wildfire cellular automaton.

mod telemetry;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use wildfire_core::{RunnerConfig, StepReport};
use wildfire_runner::{GridView, Session, StepObserver};
use wildfire_world::Grid;

/// Wildfire spread simulation on a toroidal grid
#[derive(Parser, Debug)]
#[command(name = "wildfire")]
#[command(about = "Wildfire spread cellular automaton", long_about = None)]
struct Args {
    /// Grid side length
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    size: Option<i32>,

    /// Number of trees to plant
    #[arg(short = 'z', long, allow_hyphen_values = true)]
    trees: Option<i64>,

    /// Random seed for reproducible forests and ignitions
    #[arg(short, long)]
    seed: Option<u64>,

    /// Delay between automatic steps in milliseconds
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// Stop the automatic run after this many steps
    #[arg(short, long)]
    max_steps: Option<u64>,

    /// Take exactly this many single steps instead of running automatically
    #[arg(long)]
    steps: Option<u64>,

    /// JSON configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print one JSON step report per line on stdout
    #[arg(long)]
    json: bool,

    /// Print the grid after every step
    #[arg(short, long, conflicts_with = "json")]
    render: bool,

    /// Use ANSI colors when rendering
    #[arg(long)]
    color: bool,
}

impl Args {
    fn load_config(&self) -> Result<RunnerConfig> {
        let mut config = match &self.config {
            Some(path) => RunnerConfig::from_json_file(path)?,
            None => RunnerConfig::default(),
        };

        if let Some(size) = self.size {
            config.forest.size = size;
        }
        if let Some(trees) = self.trees {
            config.forest.tree_count = trees;
        }
        if let Some(seed) = self.seed {
            config.forest.seed = Some(seed);
        }
        if let Some(interval_ms) = self.interval_ms {
            config.run.step_interval_ms = interval_ms;
        }
        if let Some(max_steps) = self.max_steps {
            config.run.max_steps = Some(max_steps);
        }

        config.validate()?;
        Ok(config)
    }

    fn observer(&self) -> Option<StepObserver> {
        if !self.json && !self.render {
            return None;
        }
        let json = self.json;
        let color = self.color;

        Some(Arc::new(move |report: &StepReport, grid: &Grid| {
            if json {
                match serde_json::to_string(report) {
                    Ok(line) => println!("{}", line),
                    Err(e) => warn!("Failed to encode step report: {}", e),
                }
            } else {
                println!("t={}", report.time_step);
                print!("{}", GridView::new(grid).colored(color));
            }
        }))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    telemetry::init_telemetry()?;

    let config = args.load_config()?;
    info!(
        size = config.forest.size,
        trees = config.forest.tree_count,
        interval_ms = config.run.step_interval_ms,
        "Starting wildfire simulation"
    );

    let mut session = Session::new(config.run.clone());
    if let Some(observer) = args.observer() {
        session = session.with_observer(observer);
    }

    session.generate(&config.forest).await?;

    if args.render {
        print!("{}", GridView::new(&session.snapshot()?).colored(args.color));
    }

    if session.ignite()?.is_none() {
        warn!("Forest has no trees; nothing to burn");
        return Ok(());
    }

    if let Some(steps) = args.steps {
        for _ in 0..steps {
            session.step()?;
        }
    } else {
        session.start_run()?;

        // Ctrl-C cancels the loop between steps
        if let Some(token) = session.run_cancellation() {
            tokio::spawn(async move {
                shutdown_signal().await;
                token.cancel();
            });
        }

        if let Some(outcome) = session.wait_for_run().await {
            info!(?outcome, "Run finished");
        }
    }

    let history = session.history()?;
    if let Some(last) = history.last() {
        info!(
            steps = history.len(),
            trees_remaining = last.trees_remaining,
            trees_burned = last.trees_burned,
            burning = session.has_active_fire()?,
            "Simulation summary"
        );
        if !args.json {
            println!(
                "After {} steps: {} trees left, {} trees burned",
                last.time_step, last.trees_remaining, last.trees_burned
            );
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
