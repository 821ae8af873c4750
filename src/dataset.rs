//! Assembles renderer-ready series from a financial-data accessor.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::layout::risk_label;
use crate::validate::sort_chronologically;

const CURRENT_PERIOD_LABEL: &str = "Current";
const BASE_RISK_SCORE: i32 = 5;

/// One reported figure for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodValue {
    pub period: String,
    pub value: f64,
}

impl PeriodValue {
    pub fn new(period: &str, value: f64) -> Self {
        Self {
            period: period.to_string(),
            value,
        }
    }
}

/// Read-only view of a business's financials. Ratio getters return `None`
/// when the figure is not available.
pub trait FinancialData {
    fn revenue_by_year(&self) -> Vec<PeriodValue>;
    fn sde_by_year(&self) -> Vec<PeriodValue>;
    fn ebitda_by_year(&self) -> Vec<PeriodValue>;

    fn revenue(&self) -> Option<f64>;
    fn sde(&self) -> Option<f64>;
    fn ebitda(&self) -> Option<f64>;
    fn gross_profit(&self) -> Option<f64>;

    fn current_ratio(&self) -> Option<f64>;
    fn debt_to_equity(&self) -> Option<f64>;
    /// Net profit margin as a percentage.
    fn profit_margin(&self) -> Option<f64>;

    fn income_approach_value(&self) -> Option<f64>;
    fn market_approach_value(&self) -> Option<f64>;
    fn asset_approach_value(&self) -> Option<f64>;
    fn final_value(&self) -> Option<f64>;
}

/// Plain-data accessor, deserializable from camelCase JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FinancialSnapshot {
    pub revenue_by_year: Vec<PeriodValue>,
    pub sde_by_year: Vec<PeriodValue>,
    pub ebitda_by_year: Vec<PeriodValue>,
    pub revenue: Option<f64>,
    pub sde: Option<f64>,
    pub ebitda: Option<f64>,
    pub gross_profit: Option<f64>,
    pub current_ratio: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub profit_margin: Option<f64>,
    pub income_approach_value: Option<f64>,
    pub market_approach_value: Option<f64>,
    pub asset_approach_value: Option<f64>,
    pub final_value: Option<f64>,
}

impl FinancialData for FinancialSnapshot {
    fn revenue_by_year(&self) -> Vec<PeriodValue> {
        self.revenue_by_year.clone()
    }

    fn sde_by_year(&self) -> Vec<PeriodValue> {
        self.sde_by_year.clone()
    }

    fn ebitda_by_year(&self) -> Vec<PeriodValue> {
        self.ebitda_by_year.clone()
    }

    fn revenue(&self) -> Option<f64> {
        self.revenue
    }

    fn sde(&self) -> Option<f64> {
        self.sde
    }

    fn ebitda(&self) -> Option<f64> {
        self.ebitda
    }

    fn gross_profit(&self) -> Option<f64> {
        self.gross_profit
    }

    fn current_ratio(&self) -> Option<f64> {
        self.current_ratio
    }

    fn debt_to_equity(&self) -> Option<f64> {
        self.debt_to_equity
    }

    fn profit_margin(&self) -> Option<f64> {
        self.profit_margin
    }

    fn income_approach_value(&self) -> Option<f64> {
        self.income_approach_value
    }

    fn market_approach_value(&self) -> Option<f64> {
        self.market_approach_value
    }

    fn asset_approach_value(&self) -> Option<f64> {
        self.asset_approach_value
    }

    fn final_value(&self) -> Option<f64> {
        self.final_value
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrendSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl TrendSeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn value_for(&self, label: &str) -> Option<f64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .and_then(|idx| self.values.get(idx).copied())
    }

    /// True when the series holds reported periods rather than only the
    /// synthesized current-period point.
    pub fn has_history(&self) -> bool {
        !self.is_empty() && !(self.labels.len() == 1 && self.labels[0] == CURRENT_PERIOD_LABEL)
    }

    /// Values aligned to `labels`; periods missing from this series are zero.
    pub fn aligned_to(&self, labels: &[String]) -> Vec<f64> {
        labels
            .iter()
            .map(|label| self.value_for(label).unwrap_or(0.0))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationComparison {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub final_value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskScore {
    pub score: u8,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilityTrend {
    pub labels: Vec<String>,
    pub gross_margin: Option<Vec<f64>>,
    pub sde_margin: Option<Vec<f64>>,
    pub ebitda_margin: Option<Vec<f64>>,
}

impl ProfitabilityTrend {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
            || (self.gross_margin.is_none() && self.sde_margin.is_none() && self.ebitda_margin.is_none())
    }
}

/// The six series a valuation report charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataSet {
    pub revenue_trend: TrendSeries,
    pub sde_trend: TrendSeries,
    pub ebitda_trend: TrendSeries,
    pub valuation_comparison: ValuationComparison,
    pub risk_score: RiskScore,
    pub profitability_trend: ProfitabilityTrend,
}

/// Ratio inputs to the risk heuristic; any subset may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RiskInputs {
    pub current_ratio: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub profit_margin: Option<f64>,
    /// Fractional revenue change from the first to the last period.
    pub revenue_change: Option<f64>,
}

impl RiskInputs {
    pub fn from_data(data: &dyn FinancialData, revenue: &TrendSeries) -> Self {
        let revenue_change = match (revenue.values.first(), revenue.values.last()) {
            (Some(first), Some(last)) if revenue.values.len() > 1 && *first != 0.0 => {
                Some((last - first) / first.abs())
            }
            _ => None,
        };
        Self {
            current_ratio: data.current_ratio(),
            debt_to_equity: data.debt_to_equity(),
            profit_margin: data.profit_margin(),
            revenue_change,
        }
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// 1-10 risk score: a base of 5 adjusted by liquidity, leverage, margin health
/// and revenue direction. Missing inputs contribute nothing.
pub fn derive_risk_score(inputs: &RiskInputs) -> u8 {
    let mut score = BASE_RISK_SCORE;

    if let Some(ratio) = finite(inputs.current_ratio) {
        score += if ratio < 1.0 {
            2
        } else if ratio < 1.5 {
            1
        } else if ratio >= 2.0 {
            -1
        } else {
            0
        };
    }

    if let Some(leverage) = finite(inputs.debt_to_equity) {
        score += if leverage < 0.0 || leverage > 2.0 {
            2
        } else if leverage > 1.0 {
            1
        } else if leverage < 0.5 {
            -1
        } else {
            0
        };
    }

    if let Some(margin) = finite(inputs.profit_margin) {
        score += if margin < 0.0 {
            2
        } else if margin < 5.0 {
            1
        } else if margin > 15.0 {
            -1
        } else {
            0
        };
    }

    if let Some(change) = finite(inputs.revenue_change) {
        score += if change < -0.05 {
            1
        } else if change > 0.05 {
            -1
        } else {
            0
        };
    }

    score.clamp(1, 10) as u8
}

fn trend_series(name: &str, points: Vec<PeriodValue>, current: Option<f64>) -> TrendSeries {
    let (labels, values): (Vec<String>, Vec<f64>) = points
        .into_iter()
        .filter(|point| {
            let keep = point.value.is_finite();
            if !keep {
                warn!(series = name, period = %point.period, "skipping non-finite value");
            }
            keep
        })
        .map(|point| (point.period, point.value))
        .unzip();

    if labels.is_empty() {
        return match finite(current).filter(|v| *v != 0.0) {
            Some(value) => TrendSeries {
                labels: vec![CURRENT_PERIOD_LABEL.to_string()],
                values: vec![value],
            },
            None => TrendSeries::default(),
        };
    }

    let sorted = sort_chronologically(&labels, &values, None);
    TrendSeries {
        labels: sorted.labels,
        values: sorted.values,
    }
}

fn valuation_comparison(data: &dyn FinancialData) -> ValuationComparison {
    let approaches = [
        ("Income Approach", data.income_approach_value()),
        ("Market Approach", data.market_approach_value()),
        ("Asset Approach", data.asset_approach_value()),
    ];
    let mut comparison = ValuationComparison {
        final_value: finite(data.final_value()).unwrap_or(0.0),
        ..Default::default()
    };
    for (label, value) in approaches {
        if let Some(value) = finite(value).filter(|v| *v > 0.0) {
            comparison.labels.push(label.to_string());
            comparison.values.push(value);
        }
    }
    comparison
}

fn margin(metric: f64, revenue: f64) -> f64 {
    if revenue == 0.0 {
        0.0
    } else {
        metric / revenue * 100.0
    }
}

fn profitability_trend(
    data: &dyn FinancialData,
    revenue: &TrendSeries,
    sde: &TrendSeries,
    ebitda: &TrendSeries,
) -> ProfitabilityTrend {
    let labels = revenue.labels.clone();
    let margins = |series: &TrendSeries| -> Option<Vec<f64>> {
        if series.is_empty() {
            return None;
        }
        Some(
            series
                .aligned_to(&labels)
                .into_iter()
                .zip(&revenue.values)
                .map(|(metric, rev)| margin(metric, *rev))
                .collect(),
        )
    };
    let sde_margin = margins(sde);
    let ebitda_margin = margins(ebitda);

    // Historical gross margin is not available, so the current ratio is
    // applied to every period.
    let current_revenue = finite(data.revenue()).or_else(|| revenue.values.last().copied());
    let gross_margin = match (finite(data.gross_profit()), current_revenue) {
        (Some(gross), Some(rev)) if rev != 0.0 && !labels.is_empty() => {
            Some(vec![margin(gross, rev); labels.len()])
        }
        _ => None,
    };

    ProfitabilityTrend {
        labels,
        gross_margin,
        sde_margin,
        ebitda_margin,
    }
}

pub fn build_chart_data(data: &dyn FinancialData) -> ChartDataSet {
    let revenue_trend = trend_series("revenue", data.revenue_by_year(), data.revenue());
    let sde_trend = trend_series("sde", data.sde_by_year(), data.sde());
    let ebitda_trend = trend_series("ebitda", data.ebitda_by_year(), data.ebitda());

    let score = derive_risk_score(&RiskInputs::from_data(data, &revenue_trend));
    let risk_score = RiskScore {
        score,
        label: risk_label(f64::from(score)).to_string(),
    };
    let valuation_comparison = valuation_comparison(data);
    let profitability_trend = profitability_trend(data, &revenue_trend, &sde_trend, &ebitda_trend);

    debug!(
        revenue_periods = revenue_trend.labels.len(),
        sde_periods = sde_trend.labels.len(),
        ebitda_periods = ebitda_trend.labels.len(),
        approaches = valuation_comparison.labels.len(),
        risk = score,
        "assembled chart data"
    );

    ChartDataSet {
        revenue_trend,
        sde_trend,
        ebitda_trend,
        valuation_comparison,
        risk_score,
        profitability_trend,
    }
}
