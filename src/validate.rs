//! Chart data validation and chronological ordering.
//!
//! Validation collects every problem it can find in one pass. It only stops
//! early when the data object or one of the required arrays is missing.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::ir::{ChartConfig, RawDatum, ValidationResult};

const PLACEHOLDER_LABELS: [&str; 3] = ["N/A", "undefined", "null"];

static FOUR_DIGIT_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(19|20)\d{2}").expect("valid regex"));
static APOSTROPHE_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"['\u{2019}](\d{2})\b").expect("valid regex"));
static FISCAL_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bFY(\d{2})\b").expect("valid regex"));
static TWO_DIGIT_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{2})\b").expect("valid regex"));

fn is_placeholder(label: &str) -> bool {
    PLACEHOLDER_LABELS.contains(&label.trim())
}

pub fn validate_chart_data(config: &ChartConfig) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let Some(data) = config.data.as_ref() else {
        return ValidationResult::from_parts(vec!["Chart data is missing".to_string()], warnings);
    };

    if data.labels.is_none() {
        errors.push("Labels array is missing".to_string());
    }
    if data.values.is_none() {
        errors.push("Values array is missing".to_string());
    }
    let (Some(labels), Some(values)) = (data.labels.as_deref(), data.values.as_deref()) else {
        return ValidationResult::from_parts(errors, warnings);
    };

    if labels.is_empty() {
        errors.push("Labels array is empty".to_string());
    }
    if values.is_empty() {
        errors.push("Values array is empty".to_string());
    }

    if labels.len() != values.len() {
        errors.push(format!(
            "Labels and values arrays have different lengths ({} vs {})",
            labels.len(),
            values.len()
        ));
    }
    if let Some(values2) = data.values2.as_deref() {
        if values2.len() != labels.len() {
            errors.push(format!(
                "Labels and values2 arrays have different lengths ({} vs {})",
                labels.len(),
                values2.len()
            ));
        }
    }

    check_values("Value", values, &mut errors);
    if let Some(values2) = data.values2.as_deref() {
        check_values("Values2 entry", values2, &mut errors);
    }

    for (idx, label) in labels.iter().enumerate() {
        match label {
            RawDatum::Text(text) if is_placeholder(text) => warnings.push(format!(
                "Label at index {idx} is a placeholder value (\"{}\")",
                text.trim()
            )),
            RawDatum::Text(_) => {}
            other => errors.push(format!(
                "Label at index {idx} is not a string (got {})",
                other.type_name()
            )),
        }
    }

    let all_placeholders = !labels.is_empty()
        && labels.iter().all(|label| {
            label
                .as_text()
                .is_some_and(|text| text.trim().is_empty() || is_placeholder(text))
        });
    if all_placeholders {
        errors.push("No valid data: every label is a placeholder or empty".to_string());
    }

    if let Some(benchmark) = config.benchmark.as_ref() {
        if benchmark.value.as_finite().is_none() {
            warnings.push("Benchmark value is not a finite number and will be ignored".to_string());
        }
    }

    debug!(
        chart = %config.id,
        errors = errors.len(),
        warnings = warnings.len(),
        "validated chart data"
    );
    ValidationResult::from_parts(errors, warnings)
}

fn check_values(name: &str, values: &[RawDatum], errors: &mut Vec<String>) {
    for (idx, value) in values.iter().enumerate() {
        match value {
            RawDatum::Null => errors.push(format!("{name} at index {idx} is null or undefined")),
            RawDatum::Number(v) if v.is_nan() => {
                errors.push(format!("{name} at index {idx} is NaN"))
            }
            RawDatum::Number(v) if !v.is_finite() => {
                errors.push(format!("{name} at index {idx} is not finite"))
            }
            RawDatum::Number(_) => {}
            other => errors.push(format!(
                "{name} at index {idx} is not a number (got {})",
                other.type_name()
            )),
        }
    }
}

/// Fails with every validation error joined into one message.
pub fn validate_chart_data_or_throw(config: &ChartConfig) -> ChartResult<ValidationResult> {
    let result = validate_chart_data(config);
    if !result.valid {
        return Err(ChartError::InvalidChartData {
            chart_id: config.id.clone(),
            message: result.errors.join("; "),
        });
    }
    Ok(result)
}

/// Best-effort year extracted from a period label; `0` means no year was found.
///
/// Bare two-digit numbers are read as years too, so labels containing
/// unrelated two-digit figures can produce a spurious year.
pub fn extract_year<'a>(label: impl Into<Option<&'a str>>) -> i32 {
    let Some(label) = label.into() else {
        return 0;
    };
    let label = label.trim();
    if label.is_empty() {
        return 0;
    }
    if let Some(m) = FOUR_DIGIT_YEAR_RE.find(label) {
        return m.as_str().parse().unwrap_or(0);
    }
    let two_digit = [&*APOSTROPHE_YEAR_RE, &*FISCAL_YEAR_RE, &*TWO_DIGIT_YEAR_RE]
        .iter()
        .find_map(|re| re.captures(label))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i32>().ok());
    match two_digit {
        Some(n) if n < 50 => 2000 + n,
        Some(n) => 1900 + n,
        None => 0,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortedSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub values2: Option<Vec<f64>>,
}

/// Returns copies of the parallel arrays ordered by the year in each label.
///
/// Labels with equal years (including `0`) keep their input order. Arrays of
/// unequal length are truncated to the shortest one.
pub fn sort_chronologically(
    labels: &[String],
    values: &[f64],
    values2: Option<&[f64]>,
) -> SortedSeries {
    let len = match values2 {
        Some(values2) => labels.len().min(values.len()).min(values2.len()),
        None => labels.len().min(values.len()),
    };
    let mut order: Vec<(i32, usize)> = labels[..len]
        .iter()
        .enumerate()
        .map(|(idx, label)| (extract_year(label.as_str()), idx))
        .collect();
    order.sort_by_key(|(year, _)| *year);

    SortedSeries {
        labels: order.iter().map(|(_, idx)| labels[*idx].clone()).collect(),
        values: order.iter().map(|(_, idx)| values[*idx]).collect(),
        values2: values2.map(|values2| order.iter().map(|(_, idx)| values2[*idx]).collect()),
    }
}
