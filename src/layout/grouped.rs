use tracing::debug;

use crate::scale::{Unit, format_y_axis_label};
use crate::svg::{Anchor, Style, rect, text};
use crate::theme::Theme;

use super::placeholder::generate_no_data_chart;
use super::{
    ChartOptions, PlotArea, ValueScale, category_labels_markup, finish, finite_or_zero,
    legend_markup, positive_max, title_markup, value_axis_markup,
};

const BAR_GAP: f64 = 4.0;

/// Company KPIs next to industry benchmarks, as percentages.
pub fn generate_benchmark_comparison_chart<S: AsRef<str>>(
    labels: &[S],
    company: &[f64],
    benchmark: &[f64],
    theme: &Theme,
) -> String {
    let options = ChartOptions {
        unit: Some(Unit::Percentage),
        legend: vec!["Company".to_string(), "Industry".to_string()],
        ..Default::default()
    };
    generate_grouped_bar_chart(labels, company, benchmark, &options, theme)
}

pub fn generate_grouped_bar_chart<S: AsRef<str>>(
    labels: &[S],
    company: &[f64],
    benchmark: &[f64],
    options: &ChartOptions,
    theme: &Theme,
) -> String {
    if labels.is_empty() || company.len() != labels.len() || benchmark.len() != labels.len() {
        return generate_no_data_chart(theme);
    }

    let plot = PlotArea::from_canvas(&theme.canvas, options.title.is_some());
    let scale = ValueScale::new(positive_max([company, benchmark]), options);
    let count = labels.len();
    let slot = plot.width / count as f64;
    let bar_width = (theme.bar_width / 2.0).min((slot * 0.8 - BAR_GAP) / 2.0).max(1.0);
    debug!(groups = count, scale_max = scale.max, "laying out grouped bar chart");

    let mut out = title_markup(options, theme);
    out.push_str(&value_axis_markup(&plot, &scale, theme));

    let value_style = Style::text(&theme.text_color, theme.value_font_size, Anchor::Middle);
    let mut centers = Vec::with_capacity(count);
    for idx in 0..count {
        let center = plot.x + slot * idx as f64 + slot / 2.0;
        let bars = [
            (
                center - BAR_GAP / 2.0 - bar_width,
                company[idx],
                &theme.primary_color,
            ),
            (center + BAR_GAP / 2.0, benchmark[idx], &theme.muted_text_color),
        ];
        for (x, value, color) in bars {
            let value = finite_or_zero(value);
            let top = plot.y_for(value, scale.max);
            out.push_str(&rect(
                x,
                top,
                bar_width,
                plot.bottom() - top,
                &Style::fill(color).with_radius(1.5),
            ));
            out.push_str(&text(
                x + bar_width / 2.0,
                top - 4.0,
                &format_y_axis_label(value, scale.unit),
                &value_style,
            ));
        }
        centers.push(center);
    }
    out.push_str(&category_labels_markup(labels, &centers, slot, &plot, theme));

    let company_name = options.legend.first().map(String::as_str).unwrap_or("Company");
    let benchmark_name = options.legend.get(1).map(String::as_str).unwrap_or("Benchmark");
    out.push_str(&legend_markup(
        &[
            (company_name, theme.primary_color.as_str()),
            (benchmark_name, theme.muted_text_color.as_str()),
        ],
        theme,
    ));

    finish(&out, theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_two_bars_per_category() {
        let theme = Theme::professional();
        let svg = generate_benchmark_comparison_chart(
            &["Gross Margin", "EBITDA Margin"],
            &[42.0, 18.0],
            &[38.0, 15.0],
            &theme,
        );
        assert_eq!(svg.matches("<rect").count(), 1 + 4);
        assert!(svg.contains(">42%</text>"));
        assert!(svg.contains(">38%</text>"));
        assert!(svg.contains(">Industry</text>"));
    }

    #[test]
    fn groups_never_overlap() {
        let theme = Theme::professional();
        let labels: Vec<String> = (0..12).map(|i| format!("KPI {i}")).collect();
        let values = vec![50.0; 12];
        let svg = generate_benchmark_comparison_chart(&labels, &values, &values, &theme);
        let slot = theme.canvas.plot_width() / 12.0;
        let bar_width = (theme.bar_width / 2.0).min((slot * 0.8 - BAR_GAP) / 2.0);
        assert!(bar_width * 2.0 + BAR_GAP < slot);
        assert_eq!(svg.matches("<rect").count(), 1 + 24);
    }

    #[test]
    fn mismatched_benchmarks_render_no_data() {
        let theme = Theme::professional();
        let svg = generate_benchmark_comparison_chart(&["A", "B"], &[1.0, 2.0], &[1.0], &theme);
        assert!(svg.contains("No data available"));
    }
}
