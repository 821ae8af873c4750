use crate::config::{Config, load_config};
use crate::dataset::{FinancialSnapshot, build_chart_data};
use crate::ir::ChartConfig;
use crate::render::{ChartRenderer, write_output_png, write_output_svg};
use crate::telemetry::init_default_tracing;
use crate::validate::validate_chart_data_or_throw;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "vchart", version, about = "Valuation report chart renderer")]
pub struct Args {
    /// Financial data JSON file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file, or directory for a full report. Single SVG charts go to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme name, themeVariables, canvas)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Render only this report chart
    #[arg(long = "chart", value_enum)]
    pub chart: Option<ReportChart>,

    /// Render a single chart config JSON file instead of a report
    #[arg(long = "chart-config", conflicts_with_all = ["chart", "dump_data"])]
    pub chart_config: Option<PathBuf>,

    /// Fail on chart validation errors instead of drawing a placeholder
    #[arg(long = "strict")]
    pub strict: bool,

    /// Print the assembled chart data as JSON and exit
    #[arg(long = "dump-data")]
    pub dump_data: bool,

    /// Canvas width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f64>,

    /// Canvas height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f64>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportChart {
    RevenueTrend,
    SdeEbitdaTrend,
    ValuationComparison,
    RiskGauge,
    ProfitabilityTrend,
}

impl ReportChart {
    fn stem(self) -> &'static str {
        match self {
            ReportChart::RevenueTrend => "revenue-trend",
            ReportChart::SdeEbitdaTrend => "sde-ebitda-trend",
            ReportChart::ValuationComparison => "valuation-comparison",
            ReportChart::RiskGauge => "risk-gauge",
            ReportChart::ProfitabilityTrend => "profitability-trend",
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let _ = init_default_tracing();

    let mut config = load_config(args.config.as_deref())?;
    apply_canvas_overrides(&mut config, args.width, args.height);
    let renderer = ChartRenderer::new(config.theme.clone());

    if let Some(path) = args.chart_config.as_deref() {
        let chart: ChartConfig = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        if args.strict {
            validate_chart_data_or_throw(&chart)?;
        }
        let svg = renderer.render_chart(&chart);
        return write_single(&svg, &args, &config);
    }

    let input = read_input(args.input.as_deref())?;
    let snapshot: FinancialSnapshot = serde_json::from_str(&input)?;
    let data = build_chart_data(&snapshot);

    if args.dump_data {
        let json = serde_json::to_string_pretty(&data)?;
        return write_output_svg(&json, args.output.as_deref());
    }

    let charts = renderer.render_dataset(&data);
    if let Some(chart) = args.chart {
        let svg = charts
            .get(chart.stem())
            .ok_or_else(|| anyhow::anyhow!("Unknown report chart {}", chart.stem()))?;
        return write_single(svg, &args, &config);
    }

    let outputs = resolve_report_outputs(args.output.as_deref(), args.output_format)?;
    for ((stem, svg), (_, path)) in charts.entries().into_iter().zip(&outputs) {
        match args.output_format {
            OutputFormat::Svg => write_output_svg(svg, Some(path.as_path()))?,
            OutputFormat::Png => write_output_png(svg, path, &config.render)?,
        }
        info!(chart = stem, path = %path.display(), "wrote chart");
    }
    Ok(())
}

fn apply_canvas_overrides(config: &mut Config, width: Option<f64>, height: Option<f64>) {
    let canvas = &mut config.theme.canvas;
    if let Some(width) = width.filter(|w| w.is_finite() && *w > 0.0) {
        canvas.width = width;
    }
    if let Some(height) = height.filter(|h| h.is_finite() && *h > 0.0) {
        canvas.height = height;
    }
    config.render.width = canvas.width as f32;
    config.render.height = canvas.height as f32;
}

fn write_single(svg: &str, args: &Args, config: &Config) -> Result<()> {
    match args.output_format {
        OutputFormat::Svg => write_output_svg(svg, args.output.as_deref()),
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_output_png(svg, &output, &config.render)
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

const REPORT_STEMS: [&str; 5] = [
    "revenue-trend",
    "sde-ebitda-trend",
    "valuation-comparison",
    "risk-gauge",
    "profitability-trend",
];

/// One path per report chart. A directory (or an extensionless path, which is
/// created) receives `<chart>.<ext>`; a file path becomes `<stem>-<chart>.<ext>`.
fn resolve_report_outputs(
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<Vec<(&'static str, PathBuf)>> {
    let ext = format.extension();
    let base = output.ok_or_else(|| anyhow::anyhow!("Output path required for a full report"))?;
    if base.is_dir() || base.extension().is_none() {
        std::fs::create_dir_all(base)?;
        return Ok(REPORT_STEMS
            .iter()
            .map(|chart| (*chart, base.join(format!("{chart}.{ext}"))))
            .collect());
    }
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("report");
    let parent = base.parent().unwrap_or_else(|| Path::new("."));
    Ok(REPORT_STEMS
        .iter()
        .map(|chart| (*chart, parent.join(format!("{stem}-{chart}.{ext}"))))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_outputs_follow_file_stem() {
        let outputs =
            resolve_report_outputs(Some(Path::new("out/acme.svg")), OutputFormat::Svg).unwrap();
        assert_eq!(outputs.len(), 5);
        assert_eq!(outputs[0].1, PathBuf::from("out/acme-revenue-trend.svg"));
        assert_eq!(outputs[3].1, PathBuf::from("out/acme-risk-gauge.svg"));
    }

    #[test]
    fn report_outputs_fill_a_directory() {
        let dir = std::env::temp_dir().join(format!("vchart-cli-{}", std::process::id()));
        let outputs = resolve_report_outputs(Some(&dir), OutputFormat::Png).unwrap();
        assert!(dir.is_dir());
        assert_eq!(outputs[1].1, dir.join("sde-ebitda-trend.png"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn report_requires_output() {
        assert!(resolve_report_outputs(None, OutputFormat::Svg).is_err());
    }

    #[test]
    fn report_stems_match_rendered_charts() {
        let charts = ChartRenderer::default().render_dataset(&build_chart_data(
            &FinancialSnapshot::default(),
        ));
        let stems: Vec<&str> = charts.entries().iter().map(|(stem, _)| *stem).collect();
        assert_eq!(stems, REPORT_STEMS);
        for chart in [
            ReportChart::RevenueTrend,
            ReportChart::SdeEbitdaTrend,
            ReportChart::ValuationComparison,
            ReportChart::RiskGauge,
            ReportChart::ProfitabilityTrend,
        ] {
            assert!(charts.get(chart.stem()).is_some());
        }
    }

    #[test]
    fn parses_report_flags() {
        let args = Args::try_parse_from([
            "vchart", "-i", "data.json", "-o", "charts", "-e", "png", "--chart", "risk-gauge",
        ])
        .unwrap();
        assert_eq!(args.output_format, OutputFormat::Png);
        assert_eq!(args.chart, Some(ReportChart::RiskGauge));
        assert!(!args.strict);
    }
}
