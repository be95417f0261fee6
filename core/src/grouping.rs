//! Grouped sums and means over a filtered record set.
//!
//! Groups are discovered in first-appearance order; each view then
//! applies its own ordering (by value, by calendar, or fixed week order).

use crate::{
    record::{day_name, SalesRecord, WEEK_ORDER},
    stats::mean,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub const TOP_N: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupValue {
    pub key: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatedValue {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthValue {
    pub month: u32,
    pub value: f64,
}

/// Per-group collected values, in first-appearance order.
struct Groups<'a> {
    index: HashMap<&'a str, usize>,
    entries: Vec<(&'a str, Vec<f64>)>,
}

impl<'a> Groups<'a> {
    fn collect(
        records: &[&'a SalesRecord],
        key: impl Fn(&'a SalesRecord) -> &'a str,
        value: impl Fn(&SalesRecord) -> f64,
    ) -> Self {
        let mut groups = Groups {
            index: HashMap::new(),
            entries: Vec::new(),
        };
        for &r in records {
            let k = key(r);
            let slot = *groups.index.entry(k).or_insert_with(|| {
                groups.entries.push((k, Vec::new()));
                groups.entries.len() - 1
            });
            groups.entries[slot].1.push(value(r));
        }
        groups
    }

    fn sums(self) -> Vec<GroupValue> {
        self.entries
            .into_iter()
            .map(|(k, vs)| GroupValue {
                key: k.to_string(),
                value: vs.iter().fold(0.0, |acc, v| acc + v),
            })
            .collect()
    }

    fn means(self) -> Vec<GroupValue> {
        self.entries
            .into_iter()
            .filter_map(|(k, vs)| {
                mean(vs).map(|value| GroupValue {
                    key: k.to_string(),
                    value,
                })
            })
            .collect()
    }
}

/// Descending by value; ties keep first-appearance order.
fn sort_descending(mut groups: Vec<GroupValue>) -> Vec<GroupValue> {
    groups.sort_by(|a, b| b.value.total_cmp(&a.value));
    groups
}

fn top(groups: Vec<GroupValue>, n: usize) -> Vec<GroupValue> {
    let mut sorted = sort_descending(groups);
    sorted.truncate(n);
    sorted
}

pub fn sales_by_category(records: &[&SalesRecord]) -> Vec<GroupValue> {
    sort_descending(Groups::collect(records, |r| r.category.as_str(), |r| r.final_price).sums())
}

pub fn top_subcategories(records: &[&SalesRecord], n: usize) -> Vec<GroupValue> {
    top(
        Groups::collect(records, |r| r.subcategory.as_str(), |r| r.final_price).sums(),
        n,
    )
}

pub fn top_cities(records: &[&SalesRecord], n: usize) -> Vec<GroupValue> {
    top(Groups::collect(records, |r| r.city.as_str(), |r| r.final_price).sums(), n)
}

pub fn sales_by_segment(records: &[&SalesRecord]) -> Vec<GroupValue> {
    sort_descending(
        Groups::collect(records, |r| r.customer_segment.as_str(), |r| r.final_price).sums(),
    )
}

pub fn profit_by_category(records: &[&SalesRecord]) -> Vec<GroupValue> {
    sort_descending(Groups::collect(records, |r| r.category.as_str(), |r| r.profit_margin).sums())
}

pub fn rating_by_category(records: &[&SalesRecord]) -> Vec<GroupValue> {
    sort_descending(
        Groups::collect(
            records,
            |r| r.category.as_str(),
            |r| f64::from(r.customer_rating),
        )
        .means(),
    )
}

pub fn delivery_days_by_category(records: &[&SalesRecord]) -> Vec<GroupValue> {
    sort_descending(
        Groups::collect(
            records,
            |r| r.category.as_str(),
            |r| f64::from(r.delivery_days),
        )
        .means(),
    )
}

/// Daily sales, ascending by date. Days without orders are absent.
pub fn daily_sales(records: &[&SalesRecord]) -> Vec<DatedValue> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for r in records {
        *by_day.entry(r.order_date).or_insert(0.0) += r.final_price;
    }
    by_day
        .into_iter()
        .map(|(date, value)| DatedValue { date, value })
        .collect()
}

/// Sales by calendar month, ascending. Months without orders are absent.
pub fn monthly_sales(records: &[&SalesRecord]) -> Vec<MonthValue> {
    let mut by_month: BTreeMap<u32, f64> = BTreeMap::new();
    for r in records {
        *by_month.entry(r.month()).or_insert(0.0) += r.final_price;
    }
    by_month
        .into_iter()
        .map(|(month, value)| MonthValue { month, value })
        .collect()
}

/// Sales by weekday, Monday first. A non-empty set always yields seven
/// entries, with 0 for weekdays without orders; an empty set yields none.
pub fn weekday_sales(records: &[&SalesRecord]) -> Vec<GroupValue> {
    if records.is_empty() {
        return Vec::new();
    }
    let mut totals = [0.0f64; 7];
    for r in records {
        totals[r.day_of_week() as usize] += r.final_price;
    }
    WEEK_ORDER
        .iter()
        .zip(totals)
        .map(|(day, value)| GroupValue {
            key: day_name(*day).to_string(),
            value,
        })
        .collect()
}

pub fn total_sales(records: &[&SalesRecord]) -> f64 {
    records.iter().fold(0.0, |acc, r| acc + r.final_price)
}
