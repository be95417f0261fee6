//! Headline text insights.
//!
//! Every "top" pick breaks ties toward the alphabetically first key,
//! so the same filtered set always names the same winner.

use crate::{
    distribution::payment_method_counts,
    grouping::{profit_by_category, rating_by_category, sales_by_category, GroupValue},
    record::{DeliveryStatus, SalesRecord},
    stats::{mean, percentage},
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Insights {
    pub top_category_by_sales: Option<String>,
    pub top_category_by_profit: Option<String>,
    pub top_category_by_rating: Option<String>,
    pub avg_delivery_days: Option<f64>,
    pub on_time_rate_pct: Option<f64>,
    pub top_payment_method: Option<String>,
}

impl Insights {
    pub fn compute(records: &[&SalesRecord]) -> Self {
        let on_time = records
            .iter()
            .filter(|r| r.delivery_status == DeliveryStatus::OnTime)
            .count();
        let top_payment_method = argmax(
            payment_method_counts(records)
                .into_iter()
                .map(|b| (b.key, b.count as f64)),
        );
        Self {
            top_category_by_sales: argmax_group(sales_by_category(records)),
            top_category_by_profit: argmax_group(profit_by_category(records)),
            top_category_by_rating: argmax_group(rating_by_category(records)),
            avg_delivery_days: mean(records.iter().map(|r| f64::from(r.delivery_days))),
            on_time_rate_pct: percentage(on_time, records.len()),
            top_payment_method,
        }
    }
}

fn argmax_group(groups: Vec<GroupValue>) -> Option<String> {
    argmax(groups.into_iter().map(|g| (g.key, g.value)))
}

fn argmax(candidates: impl Iterator<Item = (String, f64)>) -> Option<String> {
    candidates
        .reduce(|best, next| {
            let better = next.1 > best.1 || (next.1 == best.1 && next.0 < best.0);
            if better {
                next
            } else {
                best
            }
        })
        .map(|(key, _)| key)
}
