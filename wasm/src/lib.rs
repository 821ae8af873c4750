use serde::Deserialize;
use valuation_charts::config::parse_config;
use valuation_charts::{ChartConfig, ChartRenderer, FinancialSnapshot, Theme, build_chart_data};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    width: Option<f64>,
    height: Option<f64>,
    /// Full config document, as accepted by `vchart --configFile`.
    config: Option<serde_json::Value>,
}

fn build_theme(options: ChartRenderOptions) -> Result<Theme, String> {
    let mut theme = match options.config {
        Some(config) => parse_config(&config.to_string())
            .map_err(|error| error.to_string())?
            .theme,
        None => match options.theme.as_deref() {
            Some(name) => Theme::from_name(name).ok_or_else(|| format!("unknown theme \"{name}\""))?,
            None => Theme::professional(),
        },
    };

    if let Some(font_family) = options.font_family {
        theme.font_family = font_family;
    }
    if let Some(width) = options.width.filter(|w| w.is_finite() && *w > 0.0) {
        theme.canvas.width = width;
    }
    if let Some(height) = options.height.filter(|h| h.is_finite() && *h > 0.0) {
        theme.canvas.height = height;
    }
    Ok(theme)
}

fn renderer_for(options_json: Option<String>) -> Result<ChartRenderer, String> {
    let options = match options_json {
        Some(raw) => serde_json::from_str::<ChartRenderOptions>(&raw).map_err(|e| e.to_string())?,
        None => ChartRenderOptions::default(),
    };
    Ok(ChartRenderer::new(build_theme(options)?))
}

fn report_charts_json(data_json: &str, options_json: Option<String>) -> Result<String, String> {
    let renderer = renderer_for(options_json)?;
    let snapshot: FinancialSnapshot = serde_json::from_str(data_json).map_err(|e| e.to_string())?;
    let charts = renderer.render_dataset(&build_chart_data(&snapshot));
    serde_json::to_string(&charts).map_err(|e| e.to_string())
}

fn chart_svg(config_json: &str, options_json: Option<String>) -> Result<String, String> {
    let renderer = renderer_for(options_json)?;
    let config: ChartConfig = serde_json::from_str(config_json).map_err(|e| e.to_string())?;
    Ok(renderer.render_chart(&config))
}

/// Renders every report chart for a financial snapshot and returns a JSON
/// object of SVG strings keyed by chart name.
#[wasm_bindgen]
pub fn render_report_charts(data_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    report_charts_json(data_json, options_json).map_err(|error| JsValue::from_str(&error))
}

/// Validates and renders one chart config; invalid data yields a placeholder SVG.
#[wasm_bindgen]
pub fn render_chart_svg(config_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    chart_svg(config_json, options_json).map_err(|error| JsValue::from_str(&error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_report_object() {
        let data = r#"{
            "revenueByYear": [{"period": "2023", "value": 900000}, {"period": "2022", "value": 800000}],
            "sdeByYear": [{"period": "2022", "value": 150000}, {"period": "2023", "value": 170000}],
            "currentRatio": 1.8,
            "incomeApproachValue": 650000,
            "finalValue": 640000
        }"#;
        let json = report_charts_json(data, Some(r#"{"theme": "classic", "width": 600}"#.to_string()))
            .expect("report should render");
        let charts: serde_json::Value = serde_json::from_str(&json).unwrap();
        for key in [
            "revenueTrend",
            "sdeEbitdaTrend",
            "valuationComparison",
            "riskGauge",
            "profitabilityTrend",
        ] {
            let svg = charts[key].as_str().unwrap();
            assert!(svg.starts_with("<svg"), "{key}");
            assert!(svg.contains("width=\"600\""), "{key}");
        }
    }

    #[test]
    fn rejects_unknown_theme() {
        assert!(renderer_for(Some(r#"{"theme": "neon"}"#.to_string())).is_err());
    }

    #[test]
    fn renders_chart_config() {
        let svg = chart_svg(
            r#"{"id": "r", "title": "Revenue", "type": "bar", "data": {"labels": ["2024"], "values": [null]}}"#,
            None,
        )
        .unwrap();
        assert!(svg.contains("Insufficient Data for Visualization"));
    }
}
