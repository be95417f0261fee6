//! Count distributions, box summaries, and the delivery-days histogram.

use crate::{record::SalesRecord, stats::quantile};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountBucket {
    pub key: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingCount {
    pub rating: u8,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBin {
    pub days: u32,
    pub count: usize,
}

/// Five-number summary plus Tukey whiskers for one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSummary {
    pub group: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest value within q1 - 1.5 IQR.
    pub lower_whisker: f64,
    /// Largest value within q3 + 1.5 IQR.
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

/// Value counts, most frequent first; ties keep first-appearance order.
fn value_counts<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<CountBucket> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<CountBucket> = Vec::new();
    for k in keys {
        match index.get(k) {
            Some(&i) => buckets[i].count += 1,
            None => {
                index.insert(k, buckets.len());
                buckets.push(CountBucket {
                    key: k.to_string(),
                    count: 1,
                });
            }
        }
    }
    buckets.sort_by(|a, b| b.count.cmp(&a.count));
    buckets
}

pub fn payment_method_counts(records: &[&SalesRecord]) -> Vec<CountBucket> {
    value_counts(records.iter().map(|r| r.payment_method.as_str()))
}

pub fn delivery_status_counts(records: &[&SalesRecord]) -> Vec<CountBucket> {
    value_counts(records.iter().map(|r| r.delivery_status.label()))
}

/// Counts per rating value, ascending by rating. Unseen ratings are absent.
pub fn rating_counts(records: &[&SalesRecord]) -> Vec<RatingCount> {
    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    for r in records {
        *counts.entry(r.customer_rating).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(rating, count)| RatingCount { rating, count })
        .collect()
}

/// One bin per observed whole-day delivery time, ascending.
/// Bins are sparse, so an outlying day count costs one entry.
pub fn delivery_days_histogram(records: &[&SalesRecord]) -> Vec<DayBin> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for r in records {
        *counts.entry(r.delivery_days).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(days, count)| DayBin { days, count })
        .collect()
}

pub fn box_summary(group: &str, values: &[f64]) -> Option<BoxSummary> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let q1 = quantile(&sorted, 0.25)?;
    let median = quantile(&sorted, 0.5)?;
    let q3 = quantile(&sorted, 0.75)?;
    let iqr = q3 - q1;
    let lower_fence = q1 - 1.5 * iqr;
    let upper_fence = q3 + 1.5 * iqr;

    let fences = lower_fence..=upper_fence;
    let (inside, outliers): (Vec<f64>, Vec<f64>) =
        sorted.iter().copied().partition(|v| fences.contains(v));
    let lower_whisker = inside.first().copied().unwrap_or(q1);
    let upper_whisker = inside.last().copied().unwrap_or(q3);

    Some(BoxSummary {
        group: group.to_string(),
        count: sorted.len(),
        min: sorted[0],
        q1,
        median,
        q3,
        max: sorted[sorted.len() - 1],
        lower_whisker,
        upper_whisker,
        outliers,
    })
}

/// Discount percent box summary per category, categories in
/// first-appearance order.
pub fn discount_box_by_category(records: &[&SalesRecord]) -> Vec<BoxSummary> {
    let mut order: Vec<&str> = Vec::new();
    let mut values: HashMap<&str, Vec<f64>> = HashMap::new();
    for r in records {
        let group = values.entry(r.category.as_str()).or_insert_with(|| {
            order.push(r.category.as_str());
            Vec::new()
        });
        group.push(f64::from(r.discount_percent));
    }
    order
        .into_iter()
        .filter_map(|cat| box_summary(cat, values.get(cat).map(Vec::as_slice).unwrap_or(&[])))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_summary_flags_outliers() {
        let values = [0.0, 5.0, 5.0, 10.0, 10.0, 10.0, 15.0, 100.0];
        let b = box_summary("Books", &values).unwrap();
        assert_eq!(b.min, 0.0);
        assert_eq!(b.max, 100.0);
        assert_eq!(b.median, 10.0);
        assert_eq!(b.outliers, vec![100.0]);
        assert_eq!(b.upper_whisker, 15.0);
        assert_eq!(b.count, 8);
    }

    #[test]
    fn histogram_bins_only_observed_days() {
        let base = crate::config::GeneratorConfig::default().with_record_count(2);
        let mut records = crate::generator::SalesGenerator::new(base).unwrap().generate();
        records[0].delivery_days = 2;
        records[1].delivery_days = 4_000_000_000;
        let rows: Vec<&SalesRecord> = records.iter().collect();
        let bins = delivery_days_histogram(&rows);
        assert_eq!(
            bins,
            vec![
                DayBin { days: 2, count: 1 },
                DayBin { days: 4_000_000_000, count: 1 },
            ]
        );
    }

    #[test]
    fn box_summary_of_nothing() {
        assert_eq!(box_summary("Books", &[]), None);
    }

    #[test]
    fn single_value_box_collapses() {
        let b = box_summary("Books", &[20.0]).unwrap();
        assert_eq!((b.min, b.q1, b.median, b.q3, b.max), (20.0, 20.0, 20.0, 20.0, 20.0));
        assert!(b.outliers.is_empty());
    }
}
