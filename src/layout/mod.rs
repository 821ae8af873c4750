//! Chart layouts.
//!
//! Every chart function is pure: it takes plain labels/values plus a theme and
//! returns one complete SVG document built through [`svg_wrapper`]. Empty or
//! mismatched input never panics; it yields a "no data" placeholder instead.

mod bar;
mod comparison;
mod gauge;
mod grouped;
mod placeholder;
mod text;
mod trend;

pub use bar::{generate_bar_chart, generate_revenue_trend_chart};
pub use comparison::generate_valuation_comparison_chart;
pub use gauge::{generate_risk_gauge_chart, risk_label};
pub use grouped::{generate_benchmark_comparison_chart, generate_grouped_bar_chart};
pub use placeholder::{NO_DATA_MESSAGE, generate_no_data_chart, generate_placeholder_chart};
pub use trend::{
    LineSeries, generate_line_chart, generate_profitability_trend_chart,
    generate_sde_ebitda_trend_chart,
};

use crate::ir::LineStyle;
use crate::scale::{Tick, Unit, generate_y_axis_labels, nice_max};
use crate::svg::{Anchor, Style, grid_lines, svg_wrapper, text, x_axis, y_axis};
use crate::theme::{Canvas, Theme};

const TICK_COUNT: usize = 5;

/// Horizontal reference line drawn across a value plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkLine {
    pub value: f64,
    pub label: String,
    pub style: LineStyle,
}

/// Per-chart knobs shared by the Cartesian layouts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartOptions {
    pub title: Option<String>,
    pub unit: Option<Unit>,
    /// Explicit value-axis maximum; ignored unless finite and positive.
    pub max: Option<f64>,
    pub benchmark: Option<BenchmarkLine>,
    /// Fill the area under the first line series.
    pub fill_area: bool,
    pub legend: Vec<String>,
}

impl ChartOptions {
    pub fn with_unit(unit: Unit) -> Self {
        Self {
            unit: Some(unit),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PlotArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn from_canvas(canvas: &Canvas, has_title: bool) -> Self {
        let title_offset = if has_title { 18.0 } else { 0.0 };
        Self {
            x: canvas.padding.left,
            y: canvas.padding.top + title_offset,
            width: canvas.plot_width(),
            height: (canvas.plot_height() - title_offset).max(1.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Screen y of `value` on a `0..=max` scale, clamped to the plot.
    pub fn y_for(&self, value: f64, max: f64) -> f64 {
        if !value.is_finite() || max <= 0.0 {
            return self.bottom();
        }
        let ratio = (value / max).clamp(0.0, 1.0);
        self.bottom() - ratio * self.height
    }
}

/// Value axis running from zero to a rounded maximum.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValueScale {
    pub max: f64,
    pub ticks: Vec<Tick>,
    pub unit: Option<Unit>,
}

impl ValueScale {
    pub fn new(observed_max: f64, options: &ChartOptions) -> Self {
        let base = match options.max {
            Some(max) if max.is_finite() && max > 0.0 => max,
            _ => nice_max(observed_max),
        };
        let ticks = generate_y_axis_labels(0.0, base, options.unit, TICK_COUNT);
        let max = ticks.last().map(|t| t.value).unwrap_or(base).max(base);
        Self {
            max,
            ticks,
            unit: options.unit,
        }
    }
}

/// Largest finite, positive value across all series; `0` when there is none.
pub(crate) fn positive_max<'a>(series: impl IntoIterator<Item = &'a [f64]>) -> f64 {
    series
        .into_iter()
        .flat_map(|values| values.iter().copied())
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold(0.0, f64::max)
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Evenly spaced x positions; a single point sits in the middle of the plot.
pub(crate) fn x_positions(count: usize, plot: &PlotArea) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![plot.x + plot.width / 2.0],
        _ => {
            let inset = (plot.width * 0.05).min(20.0);
            let span = plot.width - inset * 2.0;
            let step = span / (count - 1) as f64;
            (0..count).map(|i| plot.x + inset + step * i as f64).collect()
        }
    }
}

pub(crate) fn title_markup(options: &ChartOptions, theme: &Theme) -> String {
    match options.title.as_deref() {
        Some(title) if !title.trim().is_empty() => text(
            theme.canvas.width / 2.0,
            theme.canvas.padding.top / 2.0 + theme.title_font_size / 2.0,
            title,
            &Style::text(&theme.text_color, theme.title_font_size, Anchor::Middle).bold(),
        ),
        _ => String::new(),
    }
}

/// Grid, axis lines and tick labels for a vertical value axis.
pub(crate) fn value_axis_markup(plot: &PlotArea, scale: &ValueScale, theme: &Theme) -> String {
    let mut out = String::new();
    let intervals = scale.ticks.len().saturating_sub(1) as i32;
    out.push_str(&grid_lines(
        intervals,
        plot.x,
        plot.right(),
        plot.y,
        plot.bottom(),
        theme,
    ));
    let label_style = Style::text(&theme.muted_text_color, theme.axis_font_size, Anchor::End);
    for tick in &scale.ticks {
        let y = plot.y_for(tick.value, scale.max);
        out.push_str(&text(
            plot.x - 8.0,
            y + theme.axis_font_size / 3.0,
            &tick.label,
            &label_style,
        ));
    }
    out.push_str(&y_axis(plot.x, plot.y, plot.bottom(), theme));
    out.push_str(&x_axis(plot.x, plot.right(), plot.bottom(), theme));
    out
}

/// Category labels centered under each x position.
pub(crate) fn category_labels_markup<S: AsRef<str>>(
    labels: &[S],
    xs: &[f64],
    slot_width: f64,
    plot: &PlotArea,
    theme: &Theme,
) -> String {
    let style = Style::text(&theme.text_color, theme.label_font_size, Anchor::Middle);
    labels
        .iter()
        .zip(xs)
        .map(|(label, x)| {
            let fitted = text::fit_label(label.as_ref(), slot_width.max(1.0), theme.label_font_size);
            text(*x, plot.bottom() + 16.0, &fitted, &style)
        })
        .collect()
}

/// Legend row centered beneath the plot: a short colored swatch then the name.
pub(crate) fn legend_markup(items: &[(&str, &str)], theme: &Theme) -> String {
    if items.is_empty() {
        return String::new();
    }
    let swatch = 14.0;
    let gap = 20.0;
    let widths: Vec<f64> = items
        .iter()
        .map(|(name, _)| swatch + 6.0 + text::text_width(name, theme.legend_font_size))
        .collect();
    let total = widths.iter().sum::<f64>() + gap * (items.len() - 1) as f64;
    let y = theme.canvas.height - 12.0;
    let mut x = (theme.canvas.width - total) / 2.0;
    let mut out = String::new();
    for ((name, color), width) in items.iter().zip(&widths) {
        out.push_str(&crate::svg::line(
            x,
            y - theme.legend_font_size / 3.0,
            x + swatch,
            y - theme.legend_font_size / 3.0,
            &Style::stroke(color, 3.0),
        ));
        out.push_str(&text(
            x + swatch + 6.0,
            y,
            name,
            &Style::text(&theme.text_color, theme.legend_font_size, Anchor::Start),
        ));
        x += width + gap;
    }
    out
}

pub(crate) fn finish(content: &str, theme: &Theme) -> String {
    svg_wrapper(theme.canvas.width, theme.canvas.height, content, theme)
}
