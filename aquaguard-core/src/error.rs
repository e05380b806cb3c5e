use thiserror::Error;

#[derive(Debug, Error)]
pub enum AquaError {
    #[error("Prediction model is unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Model artifact is malformed: {0}")]
    MalformedModel(String),

    #[error("Prediction did not complete: {0}")]
    PredictionFailure(String),

    #[error("Invalid {parameter} input: {value}")]
    InvalidInput { parameter: &'static str, value: f64 },

    #[error("Manual prediction is disabled while real-time mode is active")]
    RealTimeActive,

    #[error("Reading at {0} is older than the latest stored reading")]
    OutOfOrderReading(chrono::DateTime<chrono::Utc>),

    #[error("A prediction provider must be supplied to start a session")]
    ProviderNotDefined,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to parse YAML from '{0}': {1}")]
    YamlParsing(String, #[source] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Line {1} of '{0}' is not a valid reading: {2}")]
    InvalidLogRecord(String, usize, #[source] Box<AquaError>),

    #[error("Failed to process CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}
