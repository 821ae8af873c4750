use std::f64::consts::PI;

use tracing::debug;

use crate::svg::{Anchor, Style, circle, num, path, polygon, text};
use crate::theme::Theme;

use super::finish;
use super::placeholder::generate_no_data_chart;

const SEGMENTS: usize = 10;
const MIN_SCORE: f64 = 1.0;
const MAX_SCORE: f64 = 10.0;

/// Risk band for a 1-10 score.
pub fn risk_label(score: f64) -> &'static str {
    let score = score.clamp(MIN_SCORE, MAX_SCORE);
    if score <= 3.0 {
        "Low Risk"
    } else if score <= 6.0 {
        "Moderate Risk"
    } else {
        "High Risk"
    }
}

/// Angle of `score` on the dial: pi at 1, zero at 10.
fn score_angle(score: f64) -> f64 {
    PI - (score - MIN_SCORE) / (MAX_SCORE - MIN_SCORE) * PI
}

fn polar(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    (cx + r * angle.cos(), cy - r * angle.sin())
}

/// Semicircular dial with ten colored segments and a needle at the clamped score.
pub fn generate_risk_gauge_chart(score: f64, theme: &Theme) -> String {
    if !score.is_finite() {
        return generate_no_data_chart(theme);
    }
    let score = score.clamp(MIN_SCORE, MAX_SCORE);
    let canvas = &theme.canvas;
    let cx = canvas.width / 2.0;
    let cy = canvas.height - canvas.padding.bottom - 10.0;
    let outer = (canvas.width / 2.0 - 40.0)
        .min(cy - canvas.padding.top / 2.0)
        .max(10.0);
    let inner = outer * 0.65;
    debug!(score, "laying out risk gauge");

    let mut out = String::new();
    let sweep = PI / SEGMENTS as f64;
    for idx in 0..SEGMENTS {
        let start = PI - sweep * idx as f64;
        let end = start - sweep;
        let (ox0, oy0) = polar(cx, cy, outer, start);
        let (ox1, oy1) = polar(cx, cy, outer, end);
        let (ix1, iy1) = polar(cx, cy, inner, end);
        let (ix0, iy0) = polar(cx, cy, inner, start);
        let d = format!(
            "M {} {} A {r} {r} 0 0 1 {} {} L {} {} A {ir} {ir} 0 0 0 {} {} Z",
            num(ox0),
            num(oy0),
            num(ox1),
            num(oy1),
            num(ix1),
            num(iy1),
            num(ix0),
            num(iy0),
            r = num(outer),
            ir = num(inner),
        );
        let style = Style {
            stroke: Some(theme.background.clone()),
            stroke_width: Some(1.5),
            ..Style::fill(theme.gauge_segment_color(idx))
        };
        out.push_str(&path(&d, &style));
    }

    let angle = score_angle(score);
    let tip = polar(cx, cy, outer * 0.92, angle);
    let base_left = polar(cx, cy, 6.0, angle + PI / 2.0);
    let base_right = polar(cx, cy, 6.0, angle - PI / 2.0);
    out.push_str(&polygon(
        &[tip, base_left, base_right],
        &Style::fill(&theme.text_color),
    ));
    out.push_str(&circle(cx, cy, 8.0, &Style::fill(&theme.text_color)));

    let end_style = Style::text(&theme.muted_text_color, theme.axis_font_size, Anchor::Middle);
    out.push_str(&text(
        cx - (outer + inner) / 2.0,
        cy + 16.0,
        "Low",
        &end_style,
    ));
    out.push_str(&text(
        cx + (outer + inner) / 2.0,
        cy + 16.0,
        "High",
        &end_style,
    ));

    let band_color = if score <= 3.0 {
        &theme.success_color
    } else if score <= 6.0 {
        &theme.warning_color
    } else {
        &theme.danger_color
    };
    out.push_str(&text(
        cx,
        cy + 30.0,
        &format!("{}/10", num(score)),
        &Style::text(&theme.text_color, theme.title_font_size, Anchor::Middle).bold(),
    ));
    out.push_str(&text(
        cx,
        cy + 30.0 + theme.title_font_size + 2.0,
        risk_label(score),
        &Style::text(band_color, theme.label_font_size, Anchor::Middle).bold(),
    ));

    finish(&out, theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn score_maps_across_the_half_circle() {
        assert_relative_eq!(score_angle(1.0), PI);
        assert_relative_eq!(score_angle(10.0), 0.0);
        assert_relative_eq!(score_angle(5.5), PI / 2.0);
    }

    #[test]
    fn risk_bands_follow_thresholds() {
        assert_eq!(risk_label(1.0), "Low Risk");
        assert_eq!(risk_label(3.0), "Low Risk");
        assert_eq!(risk_label(4.0), "Moderate Risk");
        assert_eq!(risk_label(6.0), "Moderate Risk");
        assert_eq!(risk_label(7.0), "High Risk");
        assert_eq!(risk_label(42.0), "High Risk");
        assert_eq!(risk_label(-3.0), "Low Risk");
    }

    #[test]
    fn draws_ten_segments_and_a_needle() {
        let theme = Theme::professional();
        let svg = generate_risk_gauge_chart(7.0, &theme);
        assert_eq!(svg.matches("<path").count(), 10);
        assert_eq!(svg.matches("<polygon").count(), 1);
        assert!(svg.contains(">7/10</text>"));
        assert!(svg.contains(">High Risk</text>"));
        assert!(svg.contains(&format!("fill=\"{}\"", theme.danger_color)));
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        let theme = Theme::professional();
        assert!(generate_risk_gauge_chart(0.0, &theme).contains(">1/10</text>"));
        assert!(generate_risk_gauge_chart(25.0, &theme).contains(">10/10</text>"));
    }

    #[test]
    fn non_finite_score_renders_no_data() {
        let theme = Theme::professional();
        assert!(generate_risk_gauge_chart(f64::NAN, &theme).contains("No data available"));
    }
}
