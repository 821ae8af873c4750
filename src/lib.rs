#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod ir;
pub mod layout;
pub mod render;
pub mod scale;
pub mod svg;
pub mod telemetry;
pub mod theme;
pub mod validate;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, RenderConfig, load_config};
pub use dataset::{ChartDataSet, FinancialData, FinancialSnapshot, build_chart_data, derive_risk_score};
pub use error::{ChartError, ChartResult};
pub use ir::{ChartConfig, ChartData, ChartKind, RawDatum, ValidationResult};
pub use render::{ChartRenderer, RenderedCharts, render_chart, render_dataset};
pub use theme::Theme;
pub use validate::{extract_year, sort_chronologically, validate_chart_data, validate_chart_data_or_throw};
