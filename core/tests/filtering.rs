//! Filter semantics: equality selectors, inclusive date window,
//! composition, and the empty-result path through every view.

use chrono::NaiveDate;
use sales_core::{
    config::GeneratorConfig,
    correlation::CorrelationMatrix,
    dashboard::{DashboardViews, FilteredView},
    dataset::Dataset,
    filter::{FilterSpec, Selector},
    generator::SalesGenerator,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn dataset(seed: u64, n: usize) -> Dataset {
    let config = GeneratorConfig::default()
        .with_seed(seed)
        .with_record_count(n);
    Dataset::from_records(SalesGenerator::new(config).unwrap().generate())
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ids(rows: &[&sales_core::record::SalesRecord]) -> Vec<String> {
    rows.iter().map(|r| r.order_id.clone()).collect()
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn default_filter_keeps_everything() {
    let ds = dataset(42, 2_000);
    let spec = FilterSpec::for_dataset(&ds);
    assert_eq!(spec.apply(ds.records()).len(), ds.len());

    let (min, max) = ds.date_bounds().unwrap();
    assert_eq!((spec.start, spec.end), (min, max));
    assert_eq!(spec.category, Selector::All);
}

#[test]
fn category_then_city_equals_city_then_category() {
    let ds = dataset(42, 5_000);
    let base = FilterSpec::for_dataset(&ds);

    let by_cat = base.clone().with_category("Electronics");
    let by_city = base.clone().with_city("Mumbai");

    let cat_then_city = by_city.refine(&by_cat.apply(ds.records()));
    let city_then_cat = by_cat.refine(&by_city.apply(ds.records()));
    let combined = base.with_category("Electronics").with_city("Mumbai").apply(ds.records());

    assert!(!combined.is_empty(), "Expected some Electronics orders in Mumbai");
    assert_eq!(ids(&cat_then_city), ids(&city_then_cat));
    assert_eq!(ids(&cat_then_city), ids(&combined));
}

#[test]
fn field_filters_match_by_equality() {
    let ds = dataset(3, 3_000);
    let spec = FilterSpec::for_dataset(&ds)
        .with_category("Books")
        .with_segment("Prime");
    let rows = spec.apply(ds.records());
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|r| r.category == "Books" && r.customer_segment == "Prime"));

    let expected = ds
        .records()
        .iter()
        .filter(|r| r.category == "Books" && r.customer_segment == "Prime")
        .count();
    assert_eq!(rows.len(), expected);
}

#[test]
fn date_window_is_inclusive_on_both_ends() {
    let ds = dataset(5, 5_000);
    let day = date(2023, 3, 15);
    let spec = FilterSpec::for_dataset(&ds).with_dates(day, day);
    let rows = spec.apply(ds.records());
    let expected = ds.records().iter().filter(|r| r.order_date == day).count();
    assert!(expected > 0, "Seed should place some orders on {day}");
    assert_eq!(rows.len(), expected);
}

#[test]
fn unknown_value_matches_nothing() {
    let ds = dataset(5, 1_000);
    let rows = FilterSpec::for_dataset(&ds).with_city("Atlantis").apply(ds.records());
    assert!(rows.is_empty());
}

/// start > end is a valid filter with an empty result, and no view
/// panics or divides by zero over it.
#[test]
fn inverted_dates_yield_empty_views() {
    let ds = dataset(42, 2_000);
    let spec = FilterSpec::for_dataset(&ds).with_dates(date(2023, 6, 1), date(2023, 5, 1));
    let view = FilteredView::build(&ds, spec);

    assert!(view.rows.is_empty());
    let v = &view.views;
    assert!(v.is_empty());
    assert_eq!(v.kpis.total_sales, 0.0);
    assert_eq!(v.kpis.total_orders, 0);
    assert_eq!(v.kpis.avg_order_value, None);
    assert_eq!(v.kpis.avg_rating, None);
    assert_eq!(v.kpis.return_rate_pct, None);

    assert!(v.sales_overview.sales_by_category.is_empty());
    assert!(v.sales_overview.payment_methods.is_empty());
    assert!(v.sales_overview.daily_sales.is_empty());
    assert!(v.product_analysis.top_subcategories.is_empty());
    assert!(v.product_analysis.rating_by_category.is_empty());
    assert!(v.product_analysis.discount_by_category.is_empty());
    assert!(v.customer_insights.top_cities.is_empty());
    assert!(v.customer_insights.rating_distribution.is_empty());
    assert!(v.delivery_analytics.delivery_days_histogram.is_empty());
    assert!(v.trends_patterns.monthly_sales.is_empty());
    assert!(v.trends_patterns.weekday_sales.is_empty());
    assert!(v.kpis.total_sales.is_sign_positive(), "empty total must be +0.0, not -0.0");

    let m = &v.trends_patterns.correlation;
    assert!(m.values.iter().flatten().all(Option::is_none));

    assert_eq!(v.insights.top_category_by_sales, None);
    assert_eq!(v.insights.avg_delivery_days, None);
    assert_eq!(v.insights.on_time_rate_pct, None);
    assert_eq!(v.insights.top_payment_method, None);
}

#[test]
fn empty_dataset_gets_an_open_filter() {
    let ds = Dataset::from_records(Vec::new());
    let spec = FilterSpec::for_dataset(&ds);
    assert!(spec.start <= spec.end);
    assert_eq!(DashboardViews::compute(&spec.apply(ds.records())).row_count, 0);
    assert!(CorrelationMatrix::compute(&[]).is_symmetric());
}

#[test]
fn preview_is_capped() {
    let ds = dataset(42, 500);
    let view = FilteredView::build(&ds, FilterSpec::for_dataset(&ds));
    assert_eq!(view.preview(100).len(), 100);
    assert_eq!(view.preview(10_000).len(), 500);
    assert_eq!(view.preview(100)[0].order_id, ds.records()[0].order_id);
}
