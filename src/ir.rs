use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ChartError;
use crate::scale::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    Line,
    Bar,
    Area,
    Gauge,
    Range,
    GroupedBar,
}

impl ChartKind {
    pub fn from_token(token: &str) -> Result<Self, ChartError> {
        match token.trim() {
            "line" => Ok(Self::Line),
            "bar" => Ok(Self::Bar),
            "area" => Ok(Self::Area),
            "gauge" => Ok(Self::Gauge),
            "range" => Ok(Self::Range),
            "grouped-bar" => Ok(Self::GroupedBar),
            other => Err(ChartError::UnknownChartKind(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for ChartKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        ChartKind::from_token(&token).map_err(serde::de::Error::custom)
    }
}

// Unknown unit tokens format as bare numbers instead of rejecting the config.
fn deserialize_unit<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Unit>, D::Error> {
    let token = Option::<String>::deserialize(deserializer)?;
    Ok(token.as_deref().and_then(Unit::from_token))
}

/// One untrusted cell of chart input, as it arrived from JSON or a caller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum RawDatum {
    Number(f64),
    Text(String),
    Null,
    Other(serde_json::Value),
}

impl RawDatum {
    pub fn as_finite(&self) -> Option<f64> {
        match self {
            RawDatum::Number(value) if value.is_finite() => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            RawDatum::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            RawDatum::Number(_) => "number",
            RawDatum::Text(_) => "string",
            RawDatum::Null => "null",
            RawDatum::Other(serde_json::Value::Bool(_)) => "boolean",
            RawDatum::Other(serde_json::Value::Array(_)) => "array",
            RawDatum::Other(_) => "object",
        }
    }
}

impl From<serde_json::Value> for RawDatum {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => RawDatum::Null,
            serde_json::Value::String(text) => RawDatum::Text(text),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(v) => RawDatum::Number(v),
                None => RawDatum::Other(serde_json::Value::Number(n)),
            },
            other => RawDatum::Other(other),
        }
    }
}

impl From<f64> for RawDatum {
    fn from(value: f64) -> Self {
        RawDatum::Number(value)
    }
}

impl From<&str> for RawDatum {
    fn from(value: &str) -> Self {
        RawDatum::Text(value.to_string())
    }
}

impl From<String> for RawDatum {
    fn from(value: String) -> Self {
        RawDatum::Text(value)
    }
}

impl Serialize for RawDatum {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RawDatum::Number(v) => serializer.serialize_f64(*v),
            RawDatum::Text(t) => serializer.serialize_str(t),
            RawDatum::Null => serializer.serialize_unit(),
            RawDatum::Other(v) => v.serialize(serializer),
        }
    }
}

/// Parallel label/value arrays as supplied to the validator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Option<Vec<RawDatum>>,
    pub values: Option<Vec<RawDatum>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values2: Option<Vec<RawDatum>>,
}

impl ChartData {
    pub fn from_series(labels: &[&str], values: &[f64]) -> Self {
        Self {
            labels: Some(labels.iter().map(|l| RawDatum::from(*l)).collect()),
            values: Some(values.iter().map(|v| RawDatum::from(*v)).collect()),
            values2: None,
        }
    }

    pub fn with_values2(mut self, values2: &[f64]) -> Self {
        self.values2 = Some(values2.iter().map(|v| RawDatum::from(*v)).collect());
        self
    }

    /// Typed view of already validated data. Non-string labels render as
    /// empty, non-finite values as zero.
    pub fn to_series(&self) -> Series {
        let labels = self
            .labels
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|l| l.as_text().unwrap_or_default().to_string())
            .collect();
        let to_numbers = |values: &[RawDatum]| -> Vec<f64> {
            values.iter().map(|v| v.as_finite().unwrap_or(0.0)).collect()
        };
        Series {
            labels,
            values: to_numbers(self.values.as_deref().unwrap_or_default()),
            values2: self.values2.as_deref().map(to_numbers),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values2: Option<Vec<f64>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisConfig {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_unit")]
    pub unit: Option<Unit>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    #[serde(default)]
    pub chronological: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    #[default]
    Dashed,
    Dotted,
}

impl LineStyle {
    pub fn dasharray(self) -> Option<&'static str> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some("6,4"),
            LineStyle::Dotted => Some("2,3"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub value: RawDatum,
    pub label: Option<String>,
    #[serde(default)]
    pub style: LineStyle,
}

/// Validation-time envelope for one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: Option<ChartData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<AxisConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<Benchmark>,
}

impl ChartConfig {
    pub fn new(id: &str, title: &str, kind: ChartKind, data: ChartData) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            kind,
            data: Some(data),
            axis: None,
            benchmark: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub(crate) fn from_parts(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_datum_deserializes_each_json_shape() {
        let cells: Vec<RawDatum> =
            serde_json::from_str(r#"[1.5, "FY2024", null, true, {"a": 1}]"#).unwrap();
        assert_eq!(cells[0], RawDatum::Number(1.5));
        assert_eq!(cells[1], RawDatum::Text("FY2024".to_string()));
        assert_eq!(cells[2], RawDatum::Null);
        assert_eq!(cells[3].type_name(), "boolean");
        assert_eq!(cells[4].type_name(), "object");
    }

    #[test]
    fn chart_config_reads_type_tag() {
        let config: ChartConfig = serde_json::from_str(
            r#"{
                "id": "kpi",
                "title": "KPIs",
                "type": "grouped-bar",
                "data": {"labels": ["A"], "values": [1], "values2": [2]},
                "axis": {"unit": "percentage", "chronological": false}
            }"#,
        )
        .unwrap();
        assert_eq!(config.kind, ChartKind::GroupedBar);
        assert_eq!(config.axis.unwrap().unit, Some(Unit::Percentage));
    }

    #[test]
    fn to_series_zeroes_invalid_cells() {
        let data = ChartData {
            labels: Some(vec!["2023".into(), RawDatum::Null]),
            values: Some(vec![RawDatum::Number(f64::NAN), 4.0.into()]),
            values2: None,
        };
        let series = data.to_series();
        assert_eq!(series.labels, vec!["2023".to_string(), String::new()]);
        assert_eq!(series.values, vec![0.0, 4.0]);
        assert!(series.values2.is_none());
    }

    #[test]
    fn axis_unit_accepts_symbols() {
        let axis: AxisConfig = serde_json::from_str(r#"{"unit": "$", "max": 5000}"#).unwrap();
        assert_eq!(axis.unit, Some(Unit::Currency));
        assert!(!axis.chronological);
        let axis: AxisConfig = serde_json::from_str(r#"{"unit": "%"}"#).unwrap();
        assert_eq!(axis.unit, Some(Unit::Percentage));
    }

    #[test]
    fn unknown_unit_formats_as_bare_number() {
        let axis: AxisConfig =
            serde_json::from_str(r#"{"unit": "furlongs", "chronological": true}"#).unwrap();
        assert_eq!(axis.unit, None);
        assert!(axis.chronological);
        let axis: AxisConfig = serde_json::from_str(r#"{"unit": null}"#).unwrap();
        assert_eq!(axis.unit, None);
        let axis: AxisConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(axis.unit, None);
    }

    #[test]
    fn unknown_kind_is_an_error() {
        assert!(matches!(
            ChartKind::from_token("pie"),
            Err(ChartError::UnknownChartKind(_))
        ));
        assert_eq!(ChartKind::from_token("range").unwrap(), ChartKind::Range);

        let err = serde_json::from_str::<ChartConfig>(
            r#"{"id": "p", "title": "Pie", "type": "pie", "data": null}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown chart type: pie"));
    }
}
