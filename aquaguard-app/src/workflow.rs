use crate::plotting;
use anyhow::{Context, Result};
use aquaguard_core::{
    logger,
    prediction::PredictionProvider,
    session::{MonitoringSession, SessionBuilder},
    simulation::SensorSimulator,
};
use aquaguard_schemas::{
    file_formats::DashboardConfig,
    reading::Reading,
    risk::{Assessment, DashboardView},
};
use std::{fs, path::Path, time::Duration};

/// Where the history of a fresh session comes from.
pub enum HistorySource<'a> {
    Simulated,
    Log(&'a str),
}

/// Loads the model once and builds a session writing into `output_dir`.
pub fn start_session(
    config: &DashboardConfig,
    output_dir: &str,
    history: HistorySource<'_>,
) -> Result<MonitoringSession> {
    println!("\n--- [Workflow] Starting Monitoring Session ---");

    let provider = match &config.model_path {
        Some(path) => PredictionProvider::load(path),
        None => PredictionProvider::surrogate(),
    };
    match provider.model_summary() {
        Some(summary) => println!("Prediction model: {}", summary),
        None => println!(
            "Warning: prediction model unavailable ({}). Predictions will be refused.",
            provider.unavailable_reason().unwrap_or("unknown reason")
        ),
    }

    let history: Vec<Reading> = match history {
        HistorySource::Simulated => SensorSimulator::from_entropy()
            .generate_history(config.history_days, chrono::Utc::now()),
        HistorySource::Log(path) => logger::read_history(path)
            .with_context(|| format!("Failed to load reading history from {}", path))?,
    };
    println!("Seeded session with {} historical readings.", history.len());

    let log_path = Path::new(output_dir).join("readings.csv");
    let session = SessionBuilder::new()
        .with_provider(provider)
        .with_capacity(config.series_capacity)
        .with_input_policy(config.input_policy)
        .with_history(history)
        .with_reading_log(log_path.to_str().context("Output path is not valid UTF-8")?)
        .build()?;
    println!("Input policy: {:?}", session.provider().input_policy());

    Ok(session)
}

/// Runs one manual prediction and reports the outcome to the operator.
///
/// A failed prediction is reported, not propagated: the session stays usable.
pub fn run_manual_prediction(session: &mut MonitoringSession, ph: f64, temperature: f64, json: bool) -> Result<()> {
    println!("\n--- [Workflow] Manual Prediction ---");
    match session.predict(ph, temperature) {
        Ok(assessment) if json => println!("{}", serde_json::to_string_pretty(&assessment)?),
        Ok(assessment) => print_assessment(&assessment),
        Err(e) => println!("Prediction did not occur: {}", e),
    }
    Ok(())
}

/// Drives the session from the simulated sensor feed for `ticks` updates.
pub fn run_realtime(session: &mut MonitoringSession, ticks: usize, interval: Duration) -> Result<()> {
    println!(
        "\n--- [Workflow] Real-time Mode ({} updates every {:.1}s) ---",
        ticks,
        interval.as_secs_f64()
    );
    session.enable_realtime(interval, SensorSimulator::from_entropy())?;

    for tick in 1..=ticks {
        match session.next_realtime_tick() {
            Ok(Some(assessment)) => {
                let r = &assessment.reading;
                println!(
                    "  [{:>3}] {} pH {:.2} | {:.2}°C | NH3 {:.4} mg/L | {} risk",
                    tick,
                    r.timestamp.format("%H:%M:%S"),
                    r.ph,
                    r.temperature,
                    r.ammonia,
                    assessment.tier
                );
            }
            Ok(None) => {
                log::warn!("Sensor feed ended after {} updates", tick - 1);
                break;
            }
            Err(e) => println!("  [{:>3}] Prediction did not occur: {}", tick, e),
        }
    }

    session.disable_realtime();
    if let Some(latest) = session.latest() {
        print_assessment(latest);
    }
    Ok(())
}

/// Prints the summary and renders the charts for the current session state.
pub fn render_dashboard(session: &MonitoringSession, output_dir: &str, chart_window: usize) -> Result<()> {
    let view = session.dashboard(chart_window);

    print_summary_report(&view, session.store().len(), session.store().capacity());
    plotting::generate_all_plots(output_dir, &view.recent)?;

    let summary_path = Path::new(output_dir).join("dashboard.json");
    fs::write(&summary_path, serde_json::to_string_pretty(&view)?)
        .with_context(|| format!("Failed to write {}", summary_path.display()))?;

    if let Some(path) = session.log_path() {
        println!("Session readings logged to '{}'.", path);
    }
    Ok(())
}

fn print_assessment(assessment: &Assessment) {
    let r = &assessment.reading;

    println!("\n--- [Prediction Result] ---");
    println!("  Predicted Ammonia: {:.4} mg/L", r.ammonia);
    println!("  pH Input:          {:.2}", r.ph);
    println!("  Temperature:       {:.2}°C", r.temperature);
    println!("  Risk Level:        {}", assessment.tier);

    println!("\nPrescriptive Recommendations:");
    for entry in &assessment.advice {
        println!("  [{}] {}", entry.priority, entry.message);
        println!("         Action: {}", entry.action);
    }
}

fn print_summary_report(view: &DashboardView, retained: usize, capacity: usize) {
    println!("\n\n--- [Dashboard Summary] ---");
    println!("========================================");

    match &view.latest {
        Some(latest) => println!(
            "Latest Reading: {:.4} mg/L ammonia ({} risk) at {}",
            latest.reading.ammonia,
            latest.tier,
            latest.reading.timestamp.format("%Y-%m-%d %H:%M:%S")
        ),
        None => println!("Latest Reading: none this session"),
    }
    println!("Readings Retained: {} / {}", retained, capacity);
    println!("----------------------------------------");

    match &view.stats {
        Some(stats) => {
            println!("  - Avg pH:         {:.2}", stats.mean_ph);
            println!("  - Avg Temp:       {:.2}°C", stats.mean_temperature);
            println!("  - Avg Ammonia:    {:.3} mg/L", stats.mean_ammonia);
            println!("  - Peak Ammonia:   {:.3} mg/L", stats.max_ammonia);
        }
        None => println!("  No readings yet."),
    }

    println!("========================================");
}
