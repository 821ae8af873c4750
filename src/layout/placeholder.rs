use crate::svg::{Anchor, Style, circle, rect, svg_wrapper, text};
use crate::theme::Theme;

pub const NO_DATA_MESSAGE: &str = "No data available";
const INSUFFICIENT_DATA_HEADLINE: &str = "Insufficient Data for Visualization";

/// Minimal stand-in for a chart whose input was empty.
pub fn generate_no_data_chart(theme: &Theme) -> String {
    let width = theme.canvas.width;
    let height = theme.canvas.height;
    let content = text(
        width / 2.0,
        height / 2.0,
        NO_DATA_MESSAGE,
        &Style::text(&theme.muted_text_color, theme.label_font_size, Anchor::Middle),
    );
    svg_wrapper(width, height, &content, theme)
}

/// Framed "insufficient data" card used in place of a chart that failed
/// validation. Defaults to the theme canvas so it can replace a chart in place.
pub fn generate_placeholder_chart(
    title: &str,
    reason: &str,
    width: Option<f64>,
    height: Option<f64>,
    theme: &Theme,
) -> String {
    let width = width
        .filter(|w| w.is_finite() && *w > 0.0)
        .unwrap_or(theme.canvas.width);
    let height = height
        .filter(|h| h.is_finite() && *h > 0.0)
        .unwrap_or(theme.canvas.height);
    let cx = width / 2.0;
    let cy = height / 2.0;

    let mut content = String::new();
    content.push_str(&rect(
        4.0,
        4.0,
        width - 8.0,
        height - 8.0,
        &Style {
            stroke: Some(theme.placeholder_border.clone()),
            stroke_width: Some(1.0),
            dasharray: Some("6,4".to_string()),
            ..Style::fill(&theme.placeholder_background)
        }
        .with_radius(6.0),
    ));
    content.push_str(&text(
        cx,
        24.0 + theme.title_font_size / 2.0,
        title,
        &Style::text(&theme.text_color, theme.title_font_size, Anchor::Middle).bold(),
    ));
    content.push_str(&circle(
        cx,
        cy - 14.0,
        12.0,
        &Style::stroke(&theme.muted_text_color, 1.5).with_fill("none"),
    ));
    content.push_str(&text(
        cx,
        cy - 14.0 + theme.label_font_size / 3.0,
        "!",
        &Style::text(&theme.muted_text_color, theme.label_font_size, Anchor::Middle).bold(),
    ));
    content.push_str(&text(
        cx,
        cy + 16.0,
        INSUFFICIENT_DATA_HEADLINE,
        &Style::text(&theme.text_color, theme.label_font_size, Anchor::Middle),
    ));
    content.push_str(&text(
        cx,
        cy + 16.0 + theme.label_font_size + 6.0,
        reason,
        &Style::text(&theme.muted_text_color, theme.value_font_size, Anchor::Middle),
    ));
    svg_wrapper(width, height, &content, theme)
}
