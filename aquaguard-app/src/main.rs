use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::time::Duration;
use workflow::HistorySource;

mod config;
mod plotting;
mod workflow;

#[derive(Parser)]
#[command(name = "aquaguard", version, about = "Ammonia risk dashboard for aquaculture ponds")]
struct Cli {
    /// Dashboard configuration file.
    #[arg(long, global = true)]
    config: Option<String>,

    /// Model artifact to load instead of the configured one.
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Predict ammonia for one manual pH/temperature reading.
    Predict {
        #[arg(long, allow_negative_numbers = true)]
        ph: f64,
        #[arg(long, allow_negative_numbers = true)]
        temperature: f64,
        /// Print the assessment as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Run the simulated real-time sensor feed.
    Monitor {
        #[arg(long, default_value_t = 10)]
        ticks: usize,
        /// Overrides `realtime_interval_ms` from the configuration.
        #[arg(long)]
        interval_ms: Option<u64>,
    },
    /// Render the dashboard charts from simulated history or a reading log.
    Chart {
        /// A readings CSV written by an earlier session.
        #[arg(long)]
        from: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    println!("--- AquaGuard Ammonia Risk Dashboard ---");

    let mut config = config::load(cli.config.as_deref())?;
    if let Some(model) = cli.model {
        config.model_path = Some(model);
    }

    let output_dir = format!(
        "{}/run_{}",
        config.output_root,
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir))?;

    let history = match &cli.command {
        Command::Chart { from: Some(path) } => HistorySource::Log(path),
        _ => HistorySource::Simulated,
    };
    let mut session = workflow::start_session(&config, &output_dir, history)?;

    match cli.command {
        Command::Predict { ph, temperature, json } => {
            workflow::run_manual_prediction(&mut session, ph, temperature, json)?;
        }
        Command::Monitor { ticks, interval_ms } => {
            let interval = Duration::from_millis(interval_ms.unwrap_or(config.realtime_interval_ms));
            workflow::run_realtime(&mut session, ticks, interval)?;
        }
        Command::Chart { .. } => {}
    }

    workflow::render_dashboard(&session, &output_dir, config.chart_window)?;

    println!("\nSession complete. Results are in '{}'", output_dir);
    Ok(())
}
