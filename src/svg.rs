//! Primitive drawing library.
//!
//! Each primitive is modeled as an [`Element`] value and serialized in one
//! place; [`escape_xml`] is the only function that turns untrusted text into
//! markup. The free functions are thin shorthands returning one fragment.

use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Optional presentation attributes. Unset fields are omitted from the markup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub dasharray: Option<String>,
    pub opacity: Option<f64>,
    pub radius: Option<f64>,
    pub font_size: Option<f64>,
    pub font_weight: Option<String>,
    pub anchor: Option<Anchor>,
    pub linecap: Option<String>,
}

impl Style {
    pub fn fill(color: &str) -> Self {
        Self {
            fill: Some(color.to_string()),
            ..Default::default()
        }
    }

    pub fn stroke(color: &str, width: f64) -> Self {
        Self {
            stroke: Some(color.to_string()),
            stroke_width: Some(width),
            ..Default::default()
        }
    }

    pub fn text(color: &str, font_size: f64, anchor: Anchor) -> Self {
        Self {
            fill: Some(color.to_string()),
            font_size: Some(font_size),
            anchor: Some(anchor),
            ..Default::default()
        }
    }

    pub fn with_fill(mut self, color: &str) -> Self {
        self.fill = Some(color.to_string());
        self
    }

    pub fn with_dasharray(mut self, dasharray: &str) -> Self {
        self.dasharray = Some(dasharray.to_string());
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn bold(mut self) -> Self {
        self.font_weight = Some("bold".to_string());
        self
    }

    fn write_attrs(&self, out: &mut String, with_radius: bool) {
        if with_radius {
            if let Some(r) = self.radius {
                let r = num(r);
                out.push_str(&format!(" rx=\"{r}\" ry=\"{r}\""));
            }
        }
        if let Some(fill) = &self.fill {
            out.push_str(&format!(" fill=\"{}\"", escape_xml(fill)));
        }
        if let Some(stroke) = &self.stroke {
            out.push_str(&format!(" stroke=\"{}\"", escape_xml(stroke)));
        }
        if let Some(width) = self.stroke_width {
            out.push_str(&format!(" stroke-width=\"{}\"", num(width)));
        }
        if let Some(dash) = &self.dasharray {
            out.push_str(&format!(" stroke-dasharray=\"{}\"", escape_xml(dash)));
        }
        if let Some(cap) = &self.linecap {
            out.push_str(&format!(" stroke-linecap=\"{}\"", escape_xml(cap)));
        }
        if let Some(opacity) = self.opacity {
            out.push_str(&format!(" opacity=\"{}\"", num(opacity.clamp(0.0, 1.0))));
        }
        if let Some(size) = self.font_size {
            out.push_str(&format!(" font-size=\"{}\"", num(size)));
        }
        if let Some(weight) = &self.font_weight {
            out.push_str(&format!(" font-weight=\"{}\"", escape_xml(weight)));
        }
        if let Some(anchor) = self.anchor {
            out.push_str(&format!(" text-anchor=\"{}\"", anchor.as_str()));
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        style: Style,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        style: Style,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        style: Style,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        style: Style,
    },
    Path {
        d: String,
        style: Style,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        style: Style,
    },
}

impl Element {
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        match self {
            Element::Rect {
                x,
                y,
                width,
                height,
                style,
            } => {
                out.push_str(&format!(
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
                    num(*x),
                    num(*y),
                    num(width.max(0.0)),
                    num(height.max(0.0))
                ));
                style.write_attrs(&mut out, true);
                out.push_str("/>");
            }
            Element::Line {
                x1,
                y1,
                x2,
                y2,
                style,
            } => {
                out.push_str(&format!(
                    "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"",
                    num(*x1),
                    num(*y1),
                    num(*x2),
                    num(*y2)
                ));
                style.write_attrs(&mut out, false);
                out.push_str("/>");
            }
            Element::Text {
                x,
                y,
                content,
                style,
            } => {
                out.push_str(&format!("<text x=\"{}\" y=\"{}\"", num(*x), num(*y)));
                style.write_attrs(&mut out, false);
                out.push('>');
                out.push_str(&escape_xml(content));
                out.push_str("</text>");
            }
            Element::Circle { cx, cy, r, style } => {
                out.push_str(&format!(
                    "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"",
                    num(*cx),
                    num(*cy),
                    num(r.max(0.0))
                ));
                style.write_attrs(&mut out, false);
                out.push_str("/>");
            }
            Element::Path { d, style } => {
                out.push_str(&format!("<path d=\"{}\"", escape_xml(d)));
                style.write_attrs(&mut out, false);
                out.push_str("/>");
            }
            Element::Polygon { points, style } => {
                let points = points
                    .iter()
                    .map(|(x, y)| format!("{},{}", num(*x), num(*y)))
                    .collect::<Vec<_>>()
                    .join(" ");
                out.push_str(&format!("<polygon points=\"{points}\""));
                style.write_attrs(&mut out, false);
                out.push_str("/>");
            }
        }
        out
    }
}

/// Formats a coordinate with at most two decimals. Non-finite values become `0`.
pub fn num(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value * 100.0).round() / 100.0;
    let text = format!("{rounded:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" || text.is_empty() {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Escapes markup characters and drops characters XML 1.0 does not allow.
pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\t' | '\n' | '\r' => out.push(ch),
            c if (c as u32) < 0x20 => {}
            '\u{FFFE}' | '\u{FFFF}' => {}
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn rect(x: f64, y: f64, width: f64, height: f64, style: &Style) -> String {
    Element::Rect {
        x,
        y,
        width,
        height,
        style: style.clone(),
    }
    .to_svg()
}

pub fn line(x1: f64, y1: f64, x2: f64, y2: f64, style: &Style) -> String {
    Element::Line {
        x1,
        y1,
        x2,
        y2,
        style: style.clone(),
    }
    .to_svg()
}

pub fn text(x: f64, y: f64, content: &str, style: &Style) -> String {
    Element::Text {
        x,
        y,
        content: content.to_string(),
        style: style.clone(),
    }
    .to_svg()
}

pub fn circle(cx: f64, cy: f64, r: f64, style: &Style) -> String {
    Element::Circle {
        cx,
        cy,
        r,
        style: style.clone(),
    }
    .to_svg()
}

pub fn path(d: &str, style: &Style) -> String {
    Element::Path {
        d: d.to_string(),
        style: style.clone(),
    }
    .to_svg()
}

pub fn polygon(points: &[(f64, f64)], style: &Style) -> String {
    Element::Polygon {
        points: points.to_vec(),
        style: style.clone(),
    }
    .to_svg()
}

/// `M x y L x y ...` for a polyline through `points`.
pub fn points_to_path(points: &[(f64, f64)]) -> String {
    let mut d = String::new();
    for (idx, (x, y)) in points.iter().enumerate() {
        if idx > 0 {
            d.push(' ');
        }
        let cmd = if idx == 0 { 'M' } else { 'L' };
        d.push_str(&format!("{cmd} {} {}", num(*x), num(*y)));
    }
    d
}

pub fn y_axis(x: f64, y_top: f64, y_bottom: f64, theme: &Theme) -> String {
    line(x, y_top, x, y_bottom, &Style::stroke(&theme.axis_color, 1.0))
}

pub fn x_axis(x_start: f64, x_end: f64, y: f64, theme: &Theme) -> String {
    line(x_start, y, x_end, y, &Style::stroke(&theme.axis_color, 1.0))
}

/// `count + 1` evenly spaced dashed horizontal lines from `y_start` to `y_end`.
pub fn grid_lines(
    count: i32,
    x_start: f64,
    x_end: f64,
    y_start: f64,
    y_end: f64,
    theme: &Theme,
) -> String {
    if count <= 0 {
        return String::new();
    }
    let style = Style::stroke(&theme.grid_color, 1.0).with_dasharray("3,3");
    let step = (y_end - y_start) / count as f64;
    (0..=count)
        .map(|i| {
            let y = y_start + step * i as f64;
            line(x_start, y, x_end, y, &style)
        })
        .collect()
}

/// Wraps chart content into a standalone SVG document.
pub fn svg_wrapper(width: f64, height: f64, content: &str, theme: &Theme) -> String {
    let width = num(width.max(1.0));
    let height = num(height.max(1.0));
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\" font-family=\"{}\"><rect width=\"100%\" height=\"100%\" fill=\"{}\"/>{content}</svg>",
        escape_xml(&theme.font_family),
        escape_xml(&theme.background)
    )
}
