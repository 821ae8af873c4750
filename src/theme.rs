use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Canvas size of a single chart and the padding that surrounds its plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
}

impl Canvas {
    pub fn plot_width(&self) -> f64 {
        (self.width - self.padding.left - self.padding.right).max(1.0)
    }

    pub fn plot_height(&self) -> f64 {
        (self.height - self.padding.top - self.padding.bottom).max(1.0)
    }
}

/// Immutable visual configuration shared by every primitive and chart layout.
///
/// Colors are referenced by role, so swapping the palette re-skins all charts
/// without touching any layout code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub title_font_size: f64,
    pub label_font_size: f64,
    pub value_font_size: f64,
    pub axis_font_size: f64,
    pub legend_font_size: f64,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub success_color: String,
    pub success_light_color: String,
    pub warning_color: String,
    pub caution_color: String,
    pub danger_color: String,
    pub text_color: String,
    pub muted_text_color: String,
    pub axis_color: String,
    pub grid_color: String,
    pub background: String,
    pub placeholder_background: String,
    pub placeholder_border: String,
    pub bar_width: f64,
    pub line_width: f64,
    pub marker_radius: f64,
    pub canvas: Canvas,
}

impl Theme {
    pub fn professional() -> Self {
        Self {
            font_family: "Inter, Segoe UI, Helvetica, Arial, sans-serif".to_string(),
            title_font_size: 14.0,
            label_font_size: 10.0,
            value_font_size: 9.0,
            axis_font_size: 9.0,
            legend_font_size: 10.0,
            primary_color: "#1E3A5F".to_string(),
            secondary_color: "#3B82F6".to_string(),
            accent_color: "#C9A227".to_string(),
            success_color: "#15803D".to_string(),
            success_light_color: "#84CC16".to_string(),
            warning_color: "#F59E0B".to_string(),
            caution_color: "#EA580C".to_string(),
            danger_color: "#DC2626".to_string(),
            text_color: "#1F2937".to_string(),
            muted_text_color: "#6B7280".to_string(),
            axis_color: "#9CA3AF".to_string(),
            grid_color: "#E5E7EB".to_string(),
            background: "#FFFFFF".to_string(),
            placeholder_background: "#F9FAFB".to_string(),
            placeholder_border: "#D1D5DB".to_string(),
            bar_width: 48.0,
            line_width: 2.5,
            marker_radius: 4.0,
            canvas: Canvas {
                width: 500.0,
                height: 300.0,
                padding: Padding {
                    top: 40.0,
                    right: 30.0,
                    bottom: 50.0,
                    left: 70.0,
                },
            },
        }
    }

    pub fn classic() -> Self {
        Self {
            font_family: "Georgia, \"Times New Roman\", serif".to_string(),
            title_font_size: 15.0,
            label_font_size: 11.0,
            value_font_size: 10.0,
            axis_font_size: 10.0,
            legend_font_size: 11.0,
            primary_color: "#0B3D2E".to_string(),
            secondary_color: "#8C6D31".to_string(),
            accent_color: "#7A1F2B".to_string(),
            success_color: "#2E7D32".to_string(),
            success_light_color: "#9CCC65".to_string(),
            warning_color: "#FFB300".to_string(),
            caution_color: "#F57C00".to_string(),
            danger_color: "#C62828".to_string(),
            text_color: "#212121".to_string(),
            muted_text_color: "#616161".to_string(),
            axis_color: "#757575".to_string(),
            grid_color: "#EEEEEE".to_string(),
            background: "#FFFDF7".to_string(),
            placeholder_background: "#FAF7EF".to_string(),
            placeholder_border: "#BDB5A0".to_string(),
            bar_width: 40.0,
            line_width: 2.0,
            marker_radius: 3.5,
            canvas: Canvas {
                width: 520.0,
                height: 320.0,
                padding: Padding {
                    top: 45.0,
                    right: 30.0,
                    bottom: 55.0,
                    left: 75.0,
                },
            },
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "professional" | "default" => Some(Self::professional()),
            "classic" => Some(Self::classic()),
            _ => None,
        }
    }

    /// Fill color of gauge segment `index` (0..10), low risk to high risk.
    pub fn gauge_segment_color(&self, index: usize) -> &str {
        match index {
            0..=2 => &self.success_color,
            3..=4 => &self.success_light_color,
            5..=6 => &self.warning_color,
            7..=8 => &self.caution_color,
            _ => &self.danger_color,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::professional()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauge_segments_walk_from_green_to_red() {
        let theme = Theme::professional();
        assert_eq!(theme.gauge_segment_color(0), theme.success_color);
        assert_eq!(theme.gauge_segment_color(3), theme.success_light_color);
        assert_eq!(theme.gauge_segment_color(6), theme.warning_color);
        assert_eq!(theme.gauge_segment_color(8), theme.caution_color);
        assert_eq!(theme.gauge_segment_color(9), theme.danger_color);
    }

    #[test]
    fn plot_area_excludes_padding() {
        let canvas = Theme::professional().canvas;
        assert_eq!(canvas.plot_width(), 400.0);
        assert_eq!(canvas.plot_height(), 210.0);
    }

    #[test]
    fn unknown_theme_name_is_rejected() {
        assert!(Theme::from_name("classic").is_some());
        assert!(Theme::from_name("neon").is_none());
    }
}
