use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart data validation failed for \"{chart_id}\": {message}")]
    InvalidChartData { chart_id: String, message: String },

    #[error("unknown chart type: {0}")]
    UnknownChartKind(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
