use proptest::prelude::*;
use valuation_charts::dataset::RiskInputs;
use valuation_charts::layout::generate_revenue_trend_chart;
use valuation_charts::scale::{Unit, format_y_axis_label, generate_y_axis_ticks, nice_max};
use valuation_charts::{Theme, derive_risk_score, extract_year, sort_chronologically};

fn period_label() -> impl Strategy<Value = String> {
    prop_oneof![
        (1990u32..2040).prop_map(|year| year.to_string()),
        (1990u32..2040).prop_map(|year| format!("FY{year}")),
        (1990u32..2040, 1u32..5).prop_map(|(year, q)| format!("Q{q} {year}")),
        (0u32..100).prop_map(|yy| format!("'{yy:02}")),
        (0u32..100).prop_map(|yy| format!("FY{yy:02}")),
        "[A-Za-z ]{0,8}",
    ]
}

fn optional_ratio() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        Just(None),
        (-50.0f64..50.0).prop_map(Some),
        Just(Some(f64::NAN)),
        Just(Some(f64::INFINITY)),
    ]
}

proptest! {
    #[test]
    fn ticks_cover_the_data_range(
        data_min in -1_000_000.0f64..1_000_000.0,
        span in 0.01f64..2_000_000.0,
        tick_count in 1usize..12
    ) {
        let data_max = data_min + span;
        let ticks = generate_y_axis_ticks(data_min, data_max, tick_count);
        let tolerance = 1e-9 * data_min.abs().max(data_max.abs()).max(1.0);
        prop_assert!(ticks.len() >= 2);
        prop_assert!(ticks[0] <= data_min + tolerance);
        prop_assert!(ticks[ticks.len() - 1] >= data_max - tolerance);
        prop_assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn degenerate_range_yields_single_zero_tick(value in -1e9f64..1e9, tick_count in 0usize..10) {
        prop_assert_eq!(generate_y_axis_ticks(value, value, tick_count), vec![0.0]);
    }

    #[test]
    fn nice_max_never_shrinks(value in 1e-6f64..f64::MAX) {
        let max = nice_max(value);
        prop_assert!(max.is_finite());
        prop_assert!(max >= value);
        prop_assert!(max <= value * 1.7);
    }

    #[test]
    fn huge_ranges_keep_ticks_finite(data_max in 1e290f64..f64::MAX, tick_count in 1usize..12) {
        let ticks = generate_y_axis_ticks(0.0, data_max, tick_count);
        prop_assert!(ticks.iter().all(|t| t.is_finite()));
        prop_assert!(ticks[0] <= 0.0);
        prop_assert!(ticks[ticks.len() - 1] >= data_max * (1.0 - 1e-12));
        prop_assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn labels_never_leak_non_finite_text(value in any::<f64>()) {
        for unit in [None, Some(Unit::Currency), Some(Unit::Percentage), Some(Unit::Multiplier), Some(Unit::Count)] {
            let label = format_y_axis_label(value, unit);
            prop_assert!(!label.contains("NaN"));
            prop_assert!(!label.contains("inf"));
        }
    }

    #[test]
    fn chronological_sort_is_a_stable_permutation(labels in prop::collection::vec(period_label(), 0..16)) {
        let values: Vec<f64> = (0..labels.len()).map(|idx| idx as f64).collect();
        let sorted = sort_chronologically(&labels, &values, Some(values.as_slice()));

        let years: Vec<i32> = sorted.labels.iter().map(|label| extract_year(label.as_str())).collect();
        prop_assert!(years.windows(2).all(|w| w[0] <= w[1]));

        let mut pairs: Vec<(String, f64)> = sorted.labels.iter().cloned().zip(sorted.values.iter().copied()).collect();
        let mut original: Vec<(String, f64)> = labels.iter().cloned().zip(values.iter().copied()).collect();
        pairs.sort_by(|a, b| a.1.total_cmp(&b.1));
        original.sort_by(|a, b| a.1.total_cmp(&b.1));
        prop_assert_eq!(pairs, original);

        // Equal years keep input order.
        for window in sorted.labels.iter().zip(&sorted.values).collect::<Vec<_>>().windows(2) {
            let (a_label, a_idx) = window[0];
            let (b_label, b_idx) = window[1];
            if extract_year(a_label.as_str()) == extract_year(b_label.as_str()) {
                prop_assert!(a_idx < b_idx);
            }
        }
        prop_assert_eq!(sorted.values2.as_deref(), Some(sorted.values.as_slice()));
    }

    #[test]
    fn risk_score_stays_in_range(
        current_ratio in optional_ratio(),
        debt_to_equity in optional_ratio(),
        profit_margin in optional_ratio(),
        revenue_change in optional_ratio()
    ) {
        let score = derive_risk_score(&RiskInputs {
            current_ratio,
            debt_to_equity,
            profit_margin,
            revenue_change,
        });
        prop_assert!((1..=10).contains(&score));
    }

    #[test]
    fn revenue_chart_is_always_a_document(values in prop::collection::vec(any::<f64>(), 0..8)) {
        let labels: Vec<String> = (0..values.len()).map(|idx| format!("FY{}", 2015 + idx)).collect();
        let svg = generate_revenue_trend_chart(&labels, &values, &Theme::professional());
        prop_assert!(svg.starts_with("<svg"));
        prop_assert!(svg.ends_with("</svg>"));
        prop_assert!(!svg.contains("NaN"));
        prop_assert!(!svg.contains("inf"));
    }
}

#[test]
fn absent_risk_inputs_score_five() {
    assert_eq!(derive_risk_score(&RiskInputs::default()), 5);
}
