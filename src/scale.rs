//! Axis scaling and number formatting.
//!
//! Everything here is a pure function of its inputs. Non-finite or degenerate
//! inputs resolve to fixed fallbacks so that `NaN` never reaches the markup.

use serde::Serialize;

/// Upper bound used when a series has no positive maximum.
pub const FALLBACK_MAX: f64 = 100.0;

/// Unit affix applied to formatted axis and value labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Currency,
    Percentage,
    Multiplier,
    Ratio,
    Count,
}

impl Unit {
    /// Unit named by a config token; unrecognized tokens yield `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "$" | "currency" => Some(Self::Currency),
            "%" | "percentage" | "percent" => Some(Self::Percentage),
            "x" | "multiplier" => Some(Self::Multiplier),
            "ratio" => Some(Self::Ratio),
            "count" => Some(Self::Count),
            _ => None,
        }
    }
}

/// A tick value paired with its display label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

/// Rounds `max_value` up to a readable axis bound.
pub fn nice_max(max_value: f64) -> f64 {
    if !max_value.is_finite() || max_value <= 0.0 {
        return FALLBACK_MAX;
    }
    let magnitude = 10f64.powf(max_value.log10().floor());
    let normalized = max_value / magnitude;
    let nice = if normalized <= 1.2 {
        1.5
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 3.0 {
        3.0
    } else if normalized <= 5.0 {
        5.0
    } else if normalized <= 7.5 {
        8.0
    } else {
        10.0
    };
    let bound = nice * magnitude;
    if !bound.is_finite() {
        return max_value;
    }
    bound.max(max_value)
}

fn nice_step(range: f64, tick_count: usize) -> f64 {
    let rough = range / tick_count.max(1) as f64;
    let magnitude = 10f64.powf(rough.log10().floor());
    let normalized = rough / magnitude;
    let snapped = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 2.5 {
        2.5
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    snapped * magnitude
}

/// Evenly stepped tick values covering `[data_min, data_max]`.
pub fn generate_y_axis_ticks(data_min: f64, data_max: f64, tick_count: usize) -> Vec<f64> {
    if !data_min.is_finite() || !data_max.is_finite() || data_max <= data_min {
        return vec![0.0];
    }
    let range = data_max - data_min;
    if !range.is_finite() {
        return vec![data_min, data_max];
    }
    let step = nice_step(range, tick_count);
    if !step.is_finite() || step <= 0.0 {
        return vec![data_min, data_max];
    }
    let first = (data_min / step).floor();
    let last = (data_max / step).ceil();
    let steps = (last - first).round() as i64;
    (0..=steps)
        .map(|i| {
            let tick = (first + i as f64) * step;
            // Only the outermost tick can overshoot the representable range.
            if tick.is_finite() {
                clean_float(tick)
            } else {
                f64::MAX.copysign(tick)
            }
        })
        .collect()
}

// Strips accumulated binary noise such as 0.30000000000000004.
fn clean_float(value: f64) -> f64 {
    let scaled = value * 1e10;
    if !scaled.is_finite() {
        return value;
    }
    let cleaned = scaled.round() / 1e10;
    if cleaned == 0.0 { 0.0 } else { cleaned }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn trim_decimal(value: f64, decimals: i32) -> String {
    let text = format!("{:.*}", decimals as usize, round_to(value, decimals));
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Compact magnitude formatting: `1.5B`, `2.3M`, `500K`, `42`, `0.25`.
pub fn format_compact(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let body = if abs >= 1e9 {
        format!("{}B", trim_decimal(abs / 1e9, 1))
    } else if abs >= 1e6 {
        format!("{}M", trim_decimal(abs / 1e6, 1))
    } else if abs >= 1e3 {
        format!("{}K", trim_decimal(abs / 1e3, 1))
    } else if abs >= 1.0 || round_to(abs, 2) == 0.0 {
        format!("{}", abs.round())
    } else {
        format!("{:.2}", round_to(abs, 2))
    };
    if body == "0" {
        return body;
    }
    format!("{sign}{body}")
}

/// Formats an axis value with its unit affix. Unknown units format as a bare number.
pub fn format_y_axis_label(value: f64, unit: Option<Unit>) -> String {
    let compact = format_compact(value);
    match unit {
        Some(Unit::Currency) => match compact.strip_prefix('-') {
            Some(rest) => format!("-${rest}"),
            None => format!("${compact}"),
        },
        Some(Unit::Percentage) => format!("{compact}%"),
        Some(Unit::Multiplier) => format!("{compact}x"),
        Some(Unit::Ratio) | Some(Unit::Count) | None => compact,
    }
}

pub fn generate_y_axis_labels(
    min: f64,
    max: f64,
    unit: Option<Unit>,
    tick_count: usize,
) -> Vec<Tick> {
    generate_y_axis_ticks(min, max, tick_count)
        .into_iter()
        .map(|value| Tick {
            value,
            label: format_y_axis_label(value, unit),
        })
        .collect()
}
