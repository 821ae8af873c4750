use crate::error::ChartError;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 300.0,
            background: "#FFFFFF".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub render: RenderConfig,
}

impl Config {
    fn from_theme(theme: Theme) -> Self {
        let render = RenderConfig {
            width: theme.canvas.width as f32,
            height: theme.canvas.height as f32,
            background: theme.background.clone(),
        };
        Self { theme, render }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_theme(Theme::professional())
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    title_font_size: Option<f64>,
    label_font_size: Option<f64>,
    value_font_size: Option<f64>,
    axis_font_size: Option<f64>,
    legend_font_size: Option<f64>,
    primary_color: Option<String>,
    secondary_color: Option<String>,
    accent_color: Option<String>,
    success_color: Option<String>,
    success_light_color: Option<String>,
    warning_color: Option<String>,
    caution_color: Option<String>,
    danger_color: Option<String>,
    text_color: Option<String>,
    muted_text_color: Option<String>,
    axis_color: Option<String>,
    grid_color: Option<String>,
    background: Option<String>,
    placeholder_background: Option<String>,
    placeholder_border: Option<String>,
    bar_width: Option<f64>,
    line_width: Option<f64>,
    marker_radius: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct CanvasConfigFile {
    width: Option<f64>,
    height: Option<f64>,
    padding_top: Option<f64>,
    padding_right: Option<f64>,
    padding_bottom: Option<f64>,
    padding_left: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    canvas: Option<CanvasConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Parses a config document. Strict JSON is tried first, then JSON5 so
/// hand-edited files may carry comments and trailing commas.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = match serde_json::from_str(contents) {
        Ok(parsed) => parsed,
        Err(json_err) => json5::from_str(contents)
            .map_err(|_| ChartError::InvalidConfig(json_err.to_string()))?,
    };
    apply_config_file(parsed)
}

fn apply_config_file(parsed: ConfigFile) -> anyhow::Result<Config> {
    let theme = match parsed.theme.as_deref() {
        Some(name) => Theme::from_name(name)
            .ok_or_else(|| ChartError::InvalidConfig(format!("unknown theme \"{name}\"")))?,
        None => Theme::professional(),
    };
    let mut config = Config::from_theme(theme);

    if let Some(vars) = parsed.theme_variables {
        apply_theme_variables(&mut config.theme, vars);
    }

    if let Some(canvas) = parsed.canvas {
        let target = &mut config.theme.canvas;
        let positive = |v: Option<f64>| v.filter(|v| v.is_finite() && *v > 0.0);
        let non_negative = |v: Option<f64>| v.filter(|v| v.is_finite() && *v >= 0.0);
        if let Some(v) = positive(canvas.width) {
            target.width = v;
        }
        if let Some(v) = positive(canvas.height) {
            target.height = v;
        }
        if let Some(v) = non_negative(canvas.padding_top) {
            target.padding.top = v;
        }
        if let Some(v) = non_negative(canvas.padding_right) {
            target.padding.right = v;
        }
        if let Some(v) = non_negative(canvas.padding_bottom) {
            target.padding.bottom = v;
        }
        if let Some(v) = non_negative(canvas.padding_left) {
            target.padding.left = v;
        }
    }

    config.render.width = config.theme.canvas.width as f32;
    config.render.height = config.theme.canvas.height as f32;
    config.render.background = config.theme.background.clone();
    Ok(config)
}

fn apply_theme_variables(theme: &mut Theme, vars: ThemeVariables) {
    let colors = [
        (vars.primary_color, &mut theme.primary_color),
        (vars.secondary_color, &mut theme.secondary_color),
        (vars.accent_color, &mut theme.accent_color),
        (vars.success_color, &mut theme.success_color),
        (vars.success_light_color, &mut theme.success_light_color),
        (vars.warning_color, &mut theme.warning_color),
        (vars.caution_color, &mut theme.caution_color),
        (vars.danger_color, &mut theme.danger_color),
        (vars.text_color, &mut theme.text_color),
        (vars.muted_text_color, &mut theme.muted_text_color),
        (vars.axis_color, &mut theme.axis_color),
        (vars.grid_color, &mut theme.grid_color),
        (vars.background, &mut theme.background),
        (vars.placeholder_background, &mut theme.placeholder_background),
        (vars.placeholder_border, &mut theme.placeholder_border),
        (vars.font_family, &mut theme.font_family),
    ];
    for (value, slot) in colors {
        if let Some(v) = value {
            *slot = v;
        }
    }

    let sizes = [
        (vars.title_font_size, &mut theme.title_font_size),
        (vars.label_font_size, &mut theme.label_font_size),
        (vars.value_font_size, &mut theme.value_font_size),
        (vars.axis_font_size, &mut theme.axis_font_size),
        (vars.legend_font_size, &mut theme.legend_font_size),
        (vars.bar_width, &mut theme.bar_width),
        (vars.line_width, &mut theme.line_width),
        (vars.marker_radius, &mut theme.marker_radius),
    ];
    for (value, slot) in sizes {
        if let Some(v) = value.filter(|v| v.is_finite() && *v > 0.0) {
            *slot = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_professional_theme() {
        let config = load_config(None).unwrap();
        assert_eq!(config.theme, Theme::professional());
        assert_eq!(config.render.width, 500.0);
        assert_eq!(config.render.background, "#FFFFFF");
    }

    #[test]
    fn applies_theme_variables_and_canvas() {
        let config = parse_config(
            r##"{
                "theme": "classic",
                "themeVariables": {"primaryColor": "#112233", "barWidth": 30, "titleFontSize": -4},
                "canvas": {"width": 640, "paddingLeft": 90}
            }"##,
        )
        .unwrap();
        assert_eq!(config.theme.primary_color, "#112233");
        assert_eq!(config.theme.bar_width, 30.0);
        assert_eq!(config.theme.title_font_size, Theme::classic().title_font_size);
        assert_eq!(config.theme.canvas.width, 640.0);
        assert_eq!(config.theme.canvas.padding.left, 90.0);
        assert_eq!(config.render.width, 640.0);
        assert_eq!(config.render.background, Theme::classic().background);
    }

    #[test]
    fn accepts_json5_documents() {
        let config = parse_config(
            r##"{
                // report palette
                themeVariables: { accentColor: '#AA8800', },
            }"##,
        )
        .unwrap();
        assert_eq!(config.theme.accent_color, "#AA8800");
    }

    #[test]
    fn rejects_unknown_theme() {
        let err = parse_config(r#"{"theme": "neon"}"#).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ChartError>(),
            Some(ChartError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(parse_config("{ theme: ").is_err());
    }
}
