use tracing::debug;

use crate::scale::{Unit, format_y_axis_label, nice_max};
use crate::svg::{Anchor, Style, line, rect, text};
use crate::theme::Theme;

use super::placeholder::generate_no_data_chart;
use super::text::fit_label;
use super::{finish, finite_or_zero, positive_max};

const LABEL_MARGIN_RATIO: f64 = 0.3;
const VALUE_TEXT_ROOM: f64 = 56.0;
const MAX_BAR_THICKNESS: f64 = 28.0;

/// Horizontal bars for each valuation approach with a dashed rule at the
/// concluded `final_value`.
pub fn generate_valuation_comparison_chart<S: AsRef<str>>(
    labels: &[S],
    values: &[f64],
    final_value: f64,
    theme: &Theme,
) -> String {
    if labels.is_empty() || values.is_empty() || labels.len() != values.len() {
        return generate_no_data_chart(theme);
    }

    let canvas = &theme.canvas;
    let label_margin = canvas.width * LABEL_MARGIN_RATIO;
    let plot_x = label_margin;
    let plot_y = canvas.padding.top;
    let plot_width = (canvas.width - label_margin - canvas.padding.right - VALUE_TEXT_ROOM).max(1.0);
    let plot_height = (canvas.height - canvas.padding.top - canvas.padding.bottom / 2.0).max(1.0);

    let final_value = final_value.is_finite().then_some(final_value);
    let final_values: Vec<f64> = final_value.into_iter().collect();
    let scale_max = nice_max(positive_max([values, &final_values[..]]));
    let x_for = |value: f64| plot_x + (finite_or_zero(value).max(0.0) / scale_max).min(1.0) * plot_width;

    let count = values.len();
    let slot = plot_height / count as f64;
    let thickness = MAX_BAR_THICKNESS.min(slot * 0.6);
    debug!(bars = count, scale_max, "laying out valuation comparison");

    let palette = [
        theme.primary_color.as_str(),
        theme.secondary_color.as_str(),
        theme.success_color.as_str(),
    ];
    let label_style = Style::text(&theme.text_color, theme.label_font_size, Anchor::End);
    let value_style = Style::text(&theme.text_color, theme.value_font_size, Anchor::Start).bold();

    let mut out = String::new();
    out.push_str(&line(
        plot_x,
        plot_y,
        plot_x,
        plot_y + plot_height,
        &Style::stroke(&theme.axis_color, 1.0),
    ));
    for (idx, (label, value)) in labels.iter().zip(values).enumerate() {
        let center = plot_y + slot * idx as f64 + slot / 2.0;
        let end = x_for(*value);
        out.push_str(&rect(
            plot_x,
            center - thickness / 2.0,
            end - plot_x,
            thickness,
            &Style::fill(palette[idx % palette.len()]).with_radius(2.0),
        ));
        let fitted = fit_label(label.as_ref(), label_margin - 14.0, theme.label_font_size);
        out.push_str(&text(
            plot_x - 8.0,
            center + theme.label_font_size / 3.0,
            &fitted,
            &label_style,
        ));
        out.push_str(&text(
            end + 6.0,
            center + theme.value_font_size / 3.0,
            &format_y_axis_label(finite_or_zero(*value), Some(Unit::Currency)),
            &value_style,
        ));
    }

    if let Some(final_value) = final_value.filter(|v| *v > 0.0) {
        let x = x_for(final_value);
        out.push_str(&line(
            x,
            plot_y - 6.0,
            x,
            plot_y + plot_height,
            &Style::stroke(&theme.accent_color, 2.0).with_dasharray("5,4"),
        ));
        out.push_str(&text(
            x,
            plot_y - 12.0,
            &format!(
                "Final Value: {}",
                format_y_axis_label(final_value, Some(Unit::Currency))
            ),
            &Style::text(&theme.accent_color, theme.value_font_size, Anchor::Middle).bold(),
        ));
    }

    finish(&out, theme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_bars_and_final_marker() {
        let theme = Theme::professional();
        let svg = generate_valuation_comparison_chart(
            &["Income Approach", "Market Approach", "Asset Approach"],
            &[1_200_000.0, 1_450_000.0, 900_000.0],
            1_300_000.0,
            &theme,
        );
        assert_eq!(svg.matches("<rect").count(), 1 + 3);
        assert!(svg.contains("Final Value: $1.3M"));
        assert!(svg.contains("stroke-dasharray=\"5,4\""));
        assert!(svg.contains(">Income Approach</text>"));
    }

    #[test]
    fn final_marker_spans_full_plot_height() {
        let theme = Theme::professional();
        let svg = generate_valuation_comparison_chart(&["Income Approach"], &[100.0], 150.0, &theme);
        let bottom = theme.canvas.height - theme.canvas.padding.bottom / 2.0;
        let expected = format!("y2=\"{}\" stroke=\"{}\"", crate::svg::num(bottom), theme.accent_color);
        assert!(svg.contains(&expected));
    }

    #[test]
    fn missing_final_value_skips_marker() {
        let theme = Theme::professional();
        let svg = generate_valuation_comparison_chart(&["Market Approach"], &[100.0], f64::NAN, &theme);
        assert!(!svg.contains("Final Value"));
        assert!(!svg.contains("NaN"));
    }

    #[test]
    fn empty_input_renders_no_data() {
        let theme = Theme::professional();
        let labels: Vec<String> = Vec::new();
        let svg = generate_valuation_comparison_chart(&labels, &[], 1.0, &theme);
        assert!(svg.contains("No data available"));
    }
}
