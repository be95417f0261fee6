use crate::{
    grouping::total_sales,
    record::SalesRecord,
    stats::{mean, percentage},
};
use serde::Serialize;

/// Headline metrics. Averages and rates are `None` over an empty set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub total_sales: f64,
    pub avg_order_value: Option<f64>,
    pub total_orders: usize,
    pub avg_rating: Option<f64>,
    pub return_rate_pct: Option<f64>,
}

impl Kpis {
    pub fn compute(records: &[&SalesRecord]) -> Self {
        let returned = records.iter().filter(|r| r.returned).count();
        Self {
            total_sales: total_sales(records),
            avg_order_value: mean(records.iter().map(|r| r.final_price)),
            total_orders: records.len(),
            avg_rating: mean(records.iter().map(|r| f64::from(r.customer_rating))),
            return_rate_pct: percentage(returned, records.len()),
        }
    }
}
