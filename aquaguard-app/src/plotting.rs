//! This module renders the dashboard charts from the session's reading window.

use anyhow::Result;
use aquaguard_core::risk::{AMMONIA_HIGH_MG_L, AMMONIA_MODERATE_MG_L};
use aquaguard_schemas::reading::Reading;
use plotters::prelude::*;

const PH_COLOR: RGBColor = RGBColor(59, 130, 246);
const TEMPERATURE_COLOR: RGBColor = RGBColor(249, 115, 22);
const AMMONIA_COLOR: RGBColor = RGBColor(139, 92, 246);
const AMMONIA_FILL: RGBColor = RGBColor(196, 181, 253);

const SAFE_BAND: RGBColor = RGBColor(74, 222, 128);
const MODERATE_BAND: RGBColor = RGBColor(250, 204, 21);
const HIGH_BAND: RGBColor = RGBColor(248, 113, 113);

/// Generates and saves both dashboard charts for the given readings.
pub fn generate_all_plots(output_dir: &str, readings: &[Reading]) -> Result<()> {
    println!("[Plotting] Generating charts from {} readings...", readings.len());

    if readings.is_empty() {
        println!("[Plotting] Warning: No data to plot.");
        return Ok(());
    }

    let labels = time_labels(readings);
    plot_historical_trends(output_dir, readings, &labels)?;
    plot_ammonia_timeline(output_dir, readings, &labels)?;

    println!("[Plotting] Charts have been saved to '{}'.", output_dir);
    Ok(())
}

/// Axis labels: calendar days when the window spans more than a day,
/// otherwise clock times.
fn time_labels(readings: &[Reading]) -> Vec<String> {
    let span = match (readings.first(), readings.last()) {
        (Some(first), Some(last)) => last.timestamp - first.timestamp,
        _ => chrono::Duration::zero(),
    };
    let format = if span > chrono::Duration::days(1) { "%b %d" } else { "%H:%M" };

    readings
        .iter()
        .map(|r| r.timestamp.format(format).to_string())
        .collect()
}

/// Line chart of pH and temperature, with ammonia on a secondary axis.
fn plot_historical_trends(output_dir: &str, data: &[Reading], labels: &[String]) -> Result<()> {
    let path = format!("{}/1_historical_trends.png", output_dir);
    let root = BitMapBackend::new(&path, (1024, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_x = data.len().saturating_sub(1).max(1);
    let max_value = data
        .iter()
        .map(|r| r.ph.max(r.temperature))
        .fold(0.0, f64::max);
    let max_ammonia = data
        .iter()
        .map(|r| r.ammonia)
        .fold(AMMONIA_HIGH_MG_L, f64::max);

    let mut chart = ChartBuilder::on(&root)
        .caption("Historical Trends", ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .right_y_label_area_size(60)
        .build_cartesian_2d(0usize..max_x, 0f64..max_value * 1.1)?
        .set_secondary_coord(0usize..max_x, 0f64..max_ammonia * 1.1);

    chart
        .configure_mesh()
        .x_labels(labels.len().min(10))
        .x_label_formatter(&|idx| labels.get(*idx).cloned().unwrap_or_default())
        .x_desc("Time")
        .y_desc("pH / Temperature (°C)")
        .draw()?;

    chart
        .configure_secondary_axes()
        .y_desc("Ammonia (mg/L)")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            data.iter().enumerate().map(|(i, r)| (i, r.ph)),
            PH_COLOR.stroke_width(2),
        ))?
        .label("pH Level")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], PH_COLOR.filled()));

    chart
        .draw_series(LineSeries::new(
            data.iter().enumerate().map(|(i, r)| (i, r.temperature)),
            TEMPERATURE_COLOR.stroke_width(2),
        ))?
        .label("Temperature (°C)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], TEMPERATURE_COLOR.filled()));

    chart
        .draw_secondary_series(LineSeries::new(
            data.iter().enumerate().map(|(i, r)| (i, r.ammonia)),
            AMMONIA_COLOR.stroke_width(2),
        ))?
        .label("Ammonia (mg/L)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], AMMONIA_COLOR.filled()));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

/// Area chart of ammonia over time on top of the three risk bands.
fn plot_ammonia_timeline(output_dir: &str, data: &[Reading], labels: &[String]) -> Result<()> {
    let path = format!("{}/2_ammonia_risk_timeline.png", output_dir);
    let root = BitMapBackend::new(&path, (1024, 500)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_x = data.len().saturating_sub(1).max(1);
    let max_ammonia = data
        .iter()
        .map(|r| r.ammonia)
        .fold(AMMONIA_HIGH_MG_L, f64::max)
        * 1.25;

    let mut chart = ChartBuilder::on(&root)
        .caption("Ammonia Risk Timeline", ("sans-serif", 40).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0usize..max_x, 0f64..max_ammonia)?;

    chart
        .configure_mesh()
        .x_labels(labels.len().min(10))
        .x_label_formatter(&|idx| labels.get(*idx).cloned().unwrap_or_default())
        .x_desc("Time")
        .y_desc("Ammonia (mg/L)")
        .draw()?;

    let bands = [
        (0.0, AMMONIA_MODERATE_MG_L, SAFE_BAND, "Safe (<0.2)"),
        (AMMONIA_MODERATE_MG_L, AMMONIA_HIGH_MG_L, MODERATE_BAND, "Moderate (0.2-0.4)"),
        (AMMONIA_HIGH_MG_L, max_ammonia, HIGH_BAND, "High (>0.4)"),
    ];
    for (low, high, color, name) in bands {
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(0, low), (max_x, high)],
                color.mix(0.2).filled(),
            )))?
            .label(name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));
    }

    chart
        .draw_series(
            AreaSeries::new(
                data.iter().enumerate().map(|(i, r)| (i, r.ammonia)),
                0.0,
                AMMONIA_FILL.mix(0.7).filled(),
            )
            .border_style(AMMONIA_COLOR.stroke_width(2)),
        )?
        .label("Ammonia (mg/L)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], AMMONIA_COLOR.filled()));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}
