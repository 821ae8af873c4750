use tracing::{debug, warn};

use crate::scale::Unit;
use crate::svg::{Style, circle, path, points_to_path};
use crate::theme::Theme;

use super::placeholder::generate_no_data_chart;
use super::{
    ChartOptions, PlotArea, ValueScale, category_labels_markup, finish, finite_or_zero,
    legend_markup, positive_max, title_markup, value_axis_markup, x_positions,
};

/// One named polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSeries<'a> {
    pub name: &'a str,
    pub values: &'a [f64],
    pub color: &'a str,
}

/// SDE and EBITDA per period as two lines on a shared currency scale.
pub fn generate_sde_ebitda_trend_chart<S: AsRef<str>>(
    labels: &[S],
    sde: &[f64],
    ebitda: &[f64],
    theme: &Theme,
) -> String {
    if labels.is_empty() || sde.len() != labels.len() || ebitda.len() != labels.len() {
        return generate_no_data_chart(theme);
    }
    let series = [
        LineSeries {
            name: "SDE",
            values: sde,
            color: &theme.primary_color,
        },
        LineSeries {
            name: "EBITDA",
            values: ebitda,
            color: &theme.accent_color,
        },
    ];
    multi_line_chart(
        labels,
        &series,
        &ChartOptions::with_unit(Unit::Currency),
        theme,
    )
}

/// Gross, SDE and EBITDA margins (0-100) per period. Any series may be absent;
/// a series whose length does not match `labels` is dropped.
pub fn generate_profitability_trend_chart<S: AsRef<str>>(
    labels: &[S],
    gross_margin: Option<&[f64]>,
    sde_margin: Option<&[f64]>,
    ebitda_margin: Option<&[f64]>,
    theme: &Theme,
) -> String {
    if labels.is_empty() {
        return generate_no_data_chart(theme);
    }
    let candidates = [
        ("Gross Margin", gross_margin, theme.success_color.as_str()),
        ("SDE Margin", sde_margin, theme.primary_color.as_str()),
        ("EBITDA Margin", ebitda_margin, theme.accent_color.as_str()),
    ];
    let mut series = Vec::new();
    for (name, values, color) in candidates {
        match values {
            Some(values) if values.len() == labels.len() => series.push(LineSeries {
                name,
                values,
                color,
            }),
            Some(values) => warn!(
                series = name,
                expected = labels.len(),
                actual = values.len(),
                "dropping margin series with mismatched length"
            ),
            None => {}
        }
    }
    if series.is_empty() {
        return generate_no_data_chart(theme);
    }
    multi_line_chart(
        labels,
        &series,
        &ChartOptions::with_unit(Unit::Percentage),
        theme,
    )
}

/// General one- or two-series line chart. `values2`, when present, must match
/// `labels` in length; the legend names come from `options.legend`.
pub fn generate_line_chart<S: AsRef<str>>(
    labels: &[S],
    values: &[f64],
    values2: Option<&[f64]>,
    options: &ChartOptions,
    theme: &Theme,
) -> String {
    if labels.is_empty() || values.len() != labels.len() {
        return generate_no_data_chart(theme);
    }
    let name = |idx: usize, fallback: &'static str| -> String {
        options
            .legend
            .get(idx)
            .cloned()
            .unwrap_or_else(|| fallback.to_string())
    };
    let primary_name = name(0, "Value");
    let secondary_name = name(1, "Comparison");
    let mut series = vec![LineSeries {
        name: &primary_name,
        values,
        color: &theme.primary_color,
    }];
    match values2 {
        Some(values2) if values2.len() == labels.len() => series.push(LineSeries {
            name: &secondary_name,
            values: values2,
            color: &theme.secondary_color,
        }),
        Some(_) => return generate_no_data_chart(theme),
        None => {}
    }
    multi_line_chart(labels, &series, options, theme)
}

fn multi_line_chart<S: AsRef<str>>(
    labels: &[S],
    series: &[LineSeries<'_>],
    options: &ChartOptions,
    theme: &Theme,
) -> String {
    let plot = PlotArea::from_canvas(&theme.canvas, options.title.is_some());
    let scale = ValueScale::new(positive_max(series.iter().map(|s| s.values)), options);
    let xs = x_positions(labels.len(), &plot);
    debug!(
        points = labels.len(),
        series = series.len(),
        scale_max = scale.max,
        "laying out line chart"
    );

    let mut out = title_markup(options, theme);
    out.push_str(&value_axis_markup(&plot, &scale, theme));

    for (idx, line) in series.iter().enumerate() {
        let points: Vec<(f64, f64)> = xs
            .iter()
            .zip(line.values)
            .map(|(x, value)| (*x, plot.y_for(finite_or_zero(*value), scale.max)))
            .collect();
        if idx == 0 && options.fill_area && points.len() > 1 {
            let mut d = points_to_path(&points);
            if let (Some(first), Some(last)) = (points.first(), points.last()) {
                d.push_str(&format!(
                    " L {} {} L {} {} Z",
                    crate::svg::num(last.0),
                    crate::svg::num(plot.bottom()),
                    crate::svg::num(first.0),
                    crate::svg::num(plot.bottom())
                ));
            }
            out.push_str(&path(&d, &Style::fill(line.color).with_opacity(0.15)));
        }
        let stroke = Style {
            linecap: Some("round".to_string()),
            ..Style::stroke(line.color, theme.line_width)
        }
        .with_fill("none");
        out.push_str(&path(&points_to_path(&points), &stroke));
        let marker = Style {
            stroke: Some(theme.background.clone()),
            stroke_width: Some(1.5),
            ..Style::fill(line.color)
        };
        for (x, y) in &points {
            out.push_str(&circle(*x, *y, theme.marker_radius, &marker));
        }
    }

    let slot = if labels.len() > 1 {
        plot.width / labels.len() as f64
    } else {
        plot.width
    };
    out.push_str(&category_labels_markup(labels, &xs, slot, &plot, theme));

    let legend: Vec<(&str, &str)> = series.iter().map(|s| (s.name, s.color)).collect();
    out.push_str(&legend_markup(&legend, theme));

    finish(&out, theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dual_line_draws_two_paths_and_markers() {
        let theme = Theme::professional();
        let svg = generate_sde_ebitda_trend_chart(
            &["2022", "2023", "2024"],
            &[300_000.0, 340_000.0, 390_000.0],
            &[220_000.0, 250_000.0, 310_000.0],
            &theme,
        );
        assert_eq!(svg.matches("<path").count(), 2);
        assert_eq!(svg.matches("<circle").count(), 6);
        assert!(svg.contains(">SDE</text>"));
        assert!(svg.contains(">EBITDA</text>"));
    }

    #[test]
    fn non_positive_series_fall_back_to_default_scale() {
        let theme = Theme::professional();
        let svg = generate_sde_ebitda_trend_chart(&["2023"], &[-5.0], &[0.0], &theme);
        assert!(svg.contains(">$100</text>"));
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn single_point_is_centered_in_the_plot() {
        let theme = Theme::professional();
        let svg = generate_sde_ebitda_trend_chart(&["Current"], &[10.0], &[5.0], &theme);
        let plot = PlotArea::from_canvas(&theme.canvas, false);
        let center = crate::svg::num(plot.x + plot.width / 2.0);
        assert!(svg.contains(&format!("cx=\"{center}\"")));
    }

    #[test]
    fn mismatched_series_render_no_data() {
        let theme = Theme::professional();
        let svg = generate_sde_ebitda_trend_chart(&["2023", "2024"], &[1.0, 2.0], &[1.0], &theme);
        assert!(svg.contains("No data available"));
    }

    #[test]
    fn margins_skip_absent_series() {
        let theme = Theme::professional();
        let svg = generate_profitability_trend_chart(
            &["2023", "2024"],
            None,
            Some(&[18.0, 21.0][..]),
            Some(&[12.0, 15.0][..]),
            &theme,
        );
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(!svg.contains("Gross Margin"));
        assert!(svg.contains(">30%</text>"));
    }

    #[test]
    fn margins_without_any_series_render_no_data() {
        let theme = Theme::professional();
        let svg = generate_profitability_trend_chart(&["2024"], None, None, None, &theme);
        assert!(svg.contains("No data available"));
        let svg =
            generate_profitability_trend_chart(&["2024"], Some(&[1.0, 2.0][..]), None, None, &theme);
        assert!(svg.contains("No data available"));
    }

    #[test]
    fn area_fill_adds_closed_path() {
        let theme = Theme::professional();
        let options = ChartOptions {
            fill_area: true,
            legend: vec!["Revenue".to_string()],
            ..Default::default()
        };
        let svg = generate_line_chart(&["2023", "2024"], &[1.0, 2.0], None, &options, &theme);
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains(" Z\""));
        assert!(svg.contains(">Revenue</text>"));
    }
}
