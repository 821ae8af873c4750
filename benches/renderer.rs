use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use valuation_charts::dataset::{FinancialSnapshot, PeriodValue, build_chart_data};
use valuation_charts::ir::{ChartConfig, ChartData, ChartKind};
use valuation_charts::layout::{generate_revenue_trend_chart, generate_sde_ebitda_trend_chart};
use valuation_charts::render::{ChartRenderer, render_chart};
use valuation_charts::theme::Theme;
use valuation_charts::validate::{sort_chronologically, validate_chart_data};

fn yearly_series(years: usize, base: f64, growth: f64) -> Vec<PeriodValue> {
    // Reverse order so assembly has sorting work to do.
    (0..years)
        .rev()
        .map(|idx| PeriodValue::new(&format!("FY{}", 2000 + idx), base * growth.powi(idx as i32)))
        .collect()
}

fn snapshot(years: usize) -> FinancialSnapshot {
    FinancialSnapshot {
        revenue_by_year: yearly_series(years, 1_000_000.0, 1.08),
        sde_by_year: yearly_series(years, 180_000.0, 1.1),
        ebitda_by_year: yearly_series(years, 120_000.0, 1.12),
        revenue: Some(1_500_000.0),
        gross_profit: Some(600_000.0),
        current_ratio: Some(1.6),
        debt_to_equity: Some(0.9),
        profit_margin: Some(11.0),
        income_approach_value: Some(1_200_000.0),
        market_approach_value: Some(1_350_000.0),
        asset_approach_value: Some(700_000.0),
        final_value: Some(1_250_000.0),
        ..Default::default()
    }
}

fn labels(points: usize) -> Vec<String> {
    (0..points).map(|idx| format!("FY{}", 2000 + idx)).collect()
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    for points in [5usize, 50, 500] {
        let names = labels(points);
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let values: Vec<f64> = (0..points).map(|idx| idx as f64 * 10.0).collect();
        let config = ChartConfig::new(
            "bench",
            "Bench",
            ChartKind::Bar,
            ChartData::from_series(&refs, &values),
        );
        group.bench_with_input(BenchmarkId::from_parameter(points), &config, |b, data| {
            b.iter(|| {
                let result = validate_chart_data(black_box(data));
                black_box(result.valid);
            });
        });
    }
    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_chronologically");
    for points in [5usize, 50, 500] {
        let mut names = labels(points);
        names.reverse();
        let values: Vec<f64> = (0..points).map(|idx| idx as f64).collect();
        group.bench_with_input(BenchmarkId::from_parameter(points), &names, |b, data| {
            b.iter(|| {
                let sorted = sort_chronologically(black_box(data), &values, Some(values.as_slice()));
                black_box(sorted.labels.len());
            });
        });
    }
    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    let theme = Theme::professional();
    for points in [3usize, 10, 40] {
        let names = labels(points);
        let values: Vec<f64> = (0..points).map(|idx| 1_000.0 + idx as f64 * 75.0).collect();
        group.bench_with_input(BenchmarkId::new("bar", points), &values, |b, data| {
            b.iter(|| {
                let svg = generate_revenue_trend_chart(&names, black_box(data), &theme);
                black_box(svg.len());
            });
        });
        group.bench_with_input(BenchmarkId::new("dual_line", points), &values, |b, data| {
            b.iter(|| {
                let svg = generate_sde_ebitda_trend_chart(&names, black_box(data), data, &theme);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let renderer = ChartRenderer::new(Theme::professional());
    for years in [1usize, 5, 15] {
        let data = snapshot(years);
        group.bench_with_input(BenchmarkId::new("report", years), &data, |b, data| {
            b.iter(|| {
                let charts = renderer.render_dataset(&build_chart_data(black_box(data)));
                black_box(charts.risk_gauge.len());
            });
        });
    }

    let config: ChartConfig = serde_json::from_str(include_str!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/charts/revenue_bar.json"
    )))
    .expect("fixture parse failed");
    group.bench_function("chart_config", |b| {
        b.iter(|| {
            let svg = render_chart(black_box(&config), renderer.theme());
            black_box(svg.len());
        });
    });
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_validate, bench_sort, bench_layout, bench_end_to_end
);
criterion_main!(benches);
