use tracing::debug;

use crate::scale::{Unit, format_y_axis_label};
use crate::svg::{Anchor, Style, line, rect, text};
use crate::theme::Theme;

use super::placeholder::generate_no_data_chart;
use super::{
    ChartOptions, PlotArea, ValueScale, category_labels_markup, finish, finite_or_zero,
    positive_max, title_markup, value_axis_markup,
};

/// Vertical bars of revenue per period, labeled in currency.
pub fn generate_revenue_trend_chart<S: AsRef<str>>(
    labels: &[S],
    values: &[f64],
    theme: &Theme,
) -> String {
    generate_bar_chart(labels, values, &ChartOptions::with_unit(Unit::Currency), theme)
}

pub fn generate_bar_chart<S: AsRef<str>>(
    labels: &[S],
    values: &[f64],
    options: &ChartOptions,
    theme: &Theme,
) -> String {
    if labels.is_empty() || values.is_empty() || labels.len() != values.len() {
        return generate_no_data_chart(theme);
    }

    let plot = PlotArea::from_canvas(&theme.canvas, options.title.is_some());
    let benchmark = options
        .benchmark
        .as_ref()
        .filter(|b| b.value.is_finite());
    let benchmark_values: Vec<f64> = benchmark.iter().map(|b| b.value).collect();
    let scale = ValueScale::new(positive_max([values, &benchmark_values[..]]), options);

    let count = values.len();
    let slot = plot.width / count as f64;
    let bar_width = theme.bar_width.min(slot * 0.8);
    debug!(bars = count, scale_max = scale.max, "laying out bar chart");

    let mut out = title_markup(options, theme);
    out.push_str(&value_axis_markup(&plot, &scale, theme));

    let bar_style = Style::fill(&theme.primary_color).with_radius(2.0);
    let value_style = Style::text(&theme.text_color, theme.value_font_size, Anchor::Middle).bold();
    let mut centers = Vec::with_capacity(count);
    for (idx, value) in values.iter().enumerate() {
        let value = finite_or_zero(*value);
        let center = plot.x + slot * idx as f64 + slot / 2.0;
        let top = plot.y_for(value, scale.max);
        out.push_str(&rect(
            center - bar_width / 2.0,
            top,
            bar_width,
            plot.bottom() - top,
            &bar_style,
        ));
        out.push_str(&text(
            center,
            top - 5.0,
            &format_y_axis_label(value, scale.unit),
            &value_style,
        ));
        centers.push(center);
    }
    out.push_str(&category_labels_markup(labels, &centers, slot, &plot, theme));

    if let Some(benchmark) = benchmark {
        let y = plot.y_for(benchmark.value, scale.max);
        let mut style = Style::stroke(&theme.accent_color, 1.5);
        if let Some(dash) = benchmark.style.dasharray() {
            style = style.with_dasharray(dash);
        }
        out.push_str(&line(plot.x, y, plot.right(), y, &style));
        let caption = if benchmark.label.is_empty() {
            format_y_axis_label(benchmark.value, scale.unit)
        } else {
            format!(
                "{}: {}",
                benchmark.label,
                format_y_axis_label(benchmark.value, scale.unit)
            )
        };
        out.push_str(&text(
            plot.right(),
            y - 4.0,
            &caption,
            &Style::text(&theme.accent_color, theme.value_font_size, Anchor::End),
        ));
    }

    finish(&out, theme)
}
