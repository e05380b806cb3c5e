use serde::{Deserialize, Serialize};

/// How out-of-range sensor values are treated before prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputPolicy {
    /// Pull the value back to the nearest bound and carry on.
    #[default]
    Clamp,
    Reject,
}

/// The `dashboard.yaml` file read by the operator shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Path to a model artifact. `None` selects the built-in linear surrogate.
    pub model_path: Option<String>,
    pub series_capacity: usize,
    /// Number of most recent readings drawn on the charts.
    pub chart_window: usize,
    pub realtime_interval_ms: u64,
    pub input_policy: InputPolicy,
    /// Days of simulated history used to seed a fresh session.
    pub history_days: u32,
    pub output_root: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            series_capacity: 50,
            chart_window: 30,
            realtime_interval_ms: 3000,
            input_policy: InputPolicy::Clamp,
            history_days: 30,
            output_root: "./data/runs".to_string(),
        }
    }
}
