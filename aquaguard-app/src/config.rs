use anyhow::{bail, Context, Result};
use aquaguard_schemas::file_formats::DashboardConfig;
use std::{fs, path::Path};

/// Used when `--config` is not given and the file exists.
pub const DEFAULT_CONFIG_PATH: &str = "aquaguard-app/dashboard.yaml";

/// Loads the dashboard configuration.
///
/// An explicitly requested file must exist. Without one, the default path is
/// tried and built-in defaults are used if it is absent.
pub fn load(path: Option<&str>) -> Result<DashboardConfig> {
    let path = match path {
        Some(explicit) => explicit,
        None if Path::new(DEFAULT_CONFIG_PATH).is_file() => DEFAULT_CONFIG_PATH,
        None => {
            println!("No dashboard configuration found, using defaults.");
            return Ok(DashboardConfig::default());
        }
    };

    println!("Loading dashboard configuration from '{}'...", path);
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dashboard configuration: {}", path))?;
    let config = parse(&content).with_context(|| format!("Invalid dashboard configuration: {}", path))?;

    Ok(config)
}

fn parse(content: &str) -> Result<DashboardConfig> {
    let config: DashboardConfig =
        serde_yaml::from_str(content).context("Failed to parse dashboard YAML")?;

    if config.series_capacity == 0 {
        bail!("series_capacity must be at least 1");
    }
    if config.chart_window == 0 {
        bail!("chart_window must be at least 1");
    }
    if config.realtime_interval_ms == 0 {
        bail!("realtime_interval_ms must be at least 1");
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquaguard_schemas::file_formats::InputPolicy;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = parse("series_capacity: 200\ninput_policy: reject\n").unwrap();
        assert_eq!(config.series_capacity, 200);
        assert_eq!(config.input_policy, InputPolicy::Reject);
        assert_eq!(config.chart_window, 30);
        assert_eq!(config.realtime_interval_ms, 3000);
        assert!(config.model_path.is_none());
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert!(parse("series_capacity: 0\n").is_err());
        assert!(parse("chart_window: 0\n").is_err());
        assert!(parse("realtime_interval_ms: 0\n").is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        assert!(load(Some("/nonexistent/dashboard.yaml")).is_err());
    }
}
