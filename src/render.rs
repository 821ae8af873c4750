use crate::config::RenderConfig;
use crate::dataset::ChartDataSet;
use crate::ir::{ChartConfig, ChartKind, Series};
use crate::layout::{
    BenchmarkLine, ChartOptions, NO_DATA_MESSAGE, generate_bar_chart, generate_grouped_bar_chart,
    generate_line_chart, generate_placeholder_chart, generate_profitability_trend_chart,
    generate_revenue_trend_chart, generate_risk_gauge_chart, generate_sde_ebitda_trend_chart,
    generate_valuation_comparison_chart,
};
use crate::theme::Theme;
use crate::validate::{sort_chronologically, validate_chart_data};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

pub const REVENUE_TREND_TITLE: &str = "Revenue Trend";
pub const SDE_EBITDA_TITLE: &str = "SDE & EBITDA Trend";
pub const VALUATION_COMPARISON_TITLE: &str = "Valuation Comparison";
pub const RISK_GAUGE_TITLE: &str = "Risk Assessment";
pub const PROFITABILITY_TITLE: &str = "Profitability Trend";

/// SVG documents for one valuation report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedCharts {
    pub revenue_trend: String,
    pub sde_ebitda_trend: String,
    pub valuation_comparison: String,
    pub risk_gauge: String,
    pub profitability_trend: String,
}

impl RenderedCharts {
    /// `(file stem, svg)` pairs in report order.
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("revenue-trend", &self.revenue_trend),
            ("sde-ebitda-trend", &self.sde_ebitda_trend),
            ("valuation-comparison", &self.valuation_comparison),
            ("risk-gauge", &self.risk_gauge),
            ("profitability-trend", &self.profitability_trend),
        ]
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries()
            .into_iter()
            .find(|(stem, _)| *stem == name)
            .map(|(_, svg)| svg)
    }
}

/// Renders charts against one injected theme.
#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    theme: Theme,
}

impl ChartRenderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn render_chart(&self, config: &ChartConfig) -> String {
        render_chart(config, &self.theme)
    }

    pub fn render_dataset(&self, data: &ChartDataSet) -> RenderedCharts {
        render_dataset(data, &self.theme)
    }
}

fn options_for(config: &ChartConfig) -> ChartOptions {
    let axis = config.axis.clone().unwrap_or_default();
    let benchmark = config.benchmark.as_ref().and_then(|b| {
        b.value.as_finite().map(|value| BenchmarkLine {
            value,
            label: b.label.clone().unwrap_or_else(|| "Benchmark".to_string()),
            style: b.style,
        })
    });
    ChartOptions {
        title: Some(config.title.clone()).filter(|t| !t.trim().is_empty()),
        unit: axis.unit,
        max: axis.max,
        benchmark,
        fill_area: config.kind == ChartKind::Area,
        legend: Vec::new(),
    }
}

/// Validates `config` and draws it, substituting a placeholder card that
/// names the first validation error when the data is unusable.
pub fn render_chart(config: &ChartConfig, theme: &Theme) -> String {
    let validation = validate_chart_data(config);
    if !validation.valid {
        let reason = validation
            .errors
            .first()
            .map(String::as_str)
            .unwrap_or("Invalid chart data");
        warn!(
            chart = %config.id,
            errors = validation.errors.len(),
            reason,
            "rendering placeholder for invalid chart data"
        );
        return generate_placeholder_chart(&config.title, reason, None, None, theme);
    }
    for warning in &validation.warnings {
        warn!(chart = %config.id, "{warning}");
    }

    let mut series = config
        .data
        .as_ref()
        .map(|data| data.to_series())
        .unwrap_or_default();
    if config.axis.as_ref().is_some_and(|axis| axis.chronological) {
        let sorted = sort_chronologically(&series.labels, &series.values, series.values2.as_deref());
        series = Series {
            labels: sorted.labels,
            values: sorted.values,
            values2: sorted.values2,
        };
    }

    let options = options_for(config);
    debug!(chart = %config.id, kind = ?config.kind, points = series.labels.len(), "dispatching chart");
    match config.kind {
        ChartKind::Bar => generate_bar_chart(&series.labels, &series.values, &options, theme),
        ChartKind::Line | ChartKind::Area => generate_line_chart(
            &series.labels,
            &series.values,
            series.values2.as_deref(),
            &options,
            theme,
        ),
        ChartKind::Gauge => {
            let score = series.values.first().copied().unwrap_or(f64::NAN);
            generate_risk_gauge_chart(score, theme)
        }
        ChartKind::Range => {
            let final_value = options.benchmark.as_ref().map(|b| b.value).unwrap_or(f64::NAN);
            generate_valuation_comparison_chart(&series.labels, &series.values, final_value, theme)
        }
        ChartKind::GroupedBar => match series.values2.as_deref() {
            Some(values2) => {
                generate_grouped_bar_chart(&series.labels, &series.values, values2, &options, theme)
            }
            None => {
                warn!(chart = %config.id, "grouped bar chart without values2");
                generate_placeholder_chart(
                    &config.title,
                    "Grouped bars need a second value series",
                    None,
                    None,
                    theme,
                )
            }
        },
    }
}

fn no_data(title: &str, theme: &Theme) -> String {
    warn!(chart = title, "no data for report chart");
    generate_placeholder_chart(title, NO_DATA_MESSAGE, None, None, theme)
}

/// Renders the report charts for an assembled dataset. Empty series become
/// placeholder cards of the same size.
pub fn render_dataset(data: &ChartDataSet, theme: &Theme) -> RenderedCharts {
    let revenue = &data.revenue_trend;
    let revenue_trend = if revenue.is_empty() {
        no_data(REVENUE_TREND_TITLE, theme)
    } else {
        generate_revenue_trend_chart(&revenue.labels, &revenue.values, theme)
    };

    // The period axis comes from whichever series has reported history,
    // preferring SDE.
    let (sde, ebitda) = (&data.sde_trend, &data.ebitda_trend);
    let periods = if sde.has_history() || (!ebitda.has_history() && !sde.is_empty()) {
        &sde.labels
    } else {
        &ebitda.labels
    };
    let sde_ebitda_trend = if periods.is_empty() {
        no_data(SDE_EBITDA_TITLE, theme)
    } else {
        generate_sde_ebitda_trend_chart(
            periods,
            &sde.aligned_to(periods),
            &ebitda.aligned_to(periods),
            theme,
        )
    };

    let comparison = &data.valuation_comparison;
    let valuation_comparison = if comparison.labels.is_empty() {
        no_data(VALUATION_COMPARISON_TITLE, theme)
    } else {
        generate_valuation_comparison_chart(
            &comparison.labels,
            &comparison.values,
            comparison.final_value,
            theme,
        )
    };

    let risk_gauge = generate_risk_gauge_chart(f64::from(data.risk_score.score), theme);

    let margins = &data.profitability_trend;
    let profitability_trend = if margins.is_empty() {
        no_data(PROFITABILITY_TITLE, theme)
    } else {
        generate_profitability_trend_chart(
            &margins.labels,
            margins.gross_margin.as_deref(),
            margins.sde_margin.as_deref(),
            margins.ebitda_margin.as_deref(),
            theme,
        )
    };

    RenderedCharts {
        revenue_trend,
        sde_ebitda_trend,
        valuation_comparison,
        risk_gauge,
        profitability_trend,
    }
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "Inter".to_string();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height)
        .ok_or_else(|| anyhow::anyhow!("Invalid raster size"))?;

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}
