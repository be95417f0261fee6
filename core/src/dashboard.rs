//! The full set of dashboard views for one filtered record set.
//!
//! RULE: Views are only ever built together, through
//! `DashboardViews::compute`. A caller holds either the previous
//! complete set or the new complete set, never a mix.
//!
//! TABS (fixed order):
//!   1. Sales Overview
//!   2. Product Analysis
//!   3. Customer Insights
//!   4. Delivery Analytics
//!   5. Trends & Patterns

use crate::{
    correlation::CorrelationMatrix,
    dataset::Dataset,
    distribution::{self, BoxSummary, CountBucket, DayBin, RatingCount},
    filter::FilterSpec,
    grouping::{self, DatedValue, GroupValue, MonthValue, TOP_N},
    insight::Insights,
    kpi::Kpis,
    record::SalesRecord,
};
use serde::Serialize;

/// Rows shown in the raw-data preview.
pub const PREVIEW_ROWS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesOverview {
    pub sales_by_category: Vec<GroupValue>,
    pub payment_methods: Vec<CountBucket>,
    pub daily_sales: Vec<DatedValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductAnalysis {
    pub top_subcategories: Vec<GroupValue>,
    pub rating_by_category: Vec<GroupValue>,
    pub discount_by_category: Vec<BoxSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerInsights {
    pub sales_by_segment: Vec<GroupValue>,
    pub top_cities: Vec<GroupValue>,
    pub rating_distribution: Vec<RatingCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryAnalytics {
    pub delivery_status: Vec<CountBucket>,
    pub delivery_days_by_category: Vec<GroupValue>,
    pub delivery_days_histogram: Vec<DayBin>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendsPatterns {
    pub monthly_sales: Vec<MonthValue>,
    pub weekday_sales: Vec<GroupValue>,
    pub correlation: CorrelationMatrix,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardViews {
    pub row_count: usize,
    pub kpis: Kpis,
    pub sales_overview: SalesOverview,
    pub product_analysis: ProductAnalysis,
    pub customer_insights: CustomerInsights,
    pub delivery_analytics: DeliveryAnalytics,
    pub trends_patterns: TrendsPatterns,
    pub insights: Insights,
}

impl DashboardViews {
    pub fn compute(records: &[&SalesRecord]) -> Self {
        let views = Self {
            row_count: records.len(),
            kpis: Kpis::compute(records),
            sales_overview: SalesOverview {
                sales_by_category: grouping::sales_by_category(records),
                payment_methods: distribution::payment_method_counts(records),
                daily_sales: grouping::daily_sales(records),
            },
            product_analysis: ProductAnalysis {
                top_subcategories: grouping::top_subcategories(records, TOP_N),
                rating_by_category: grouping::rating_by_category(records),
                discount_by_category: distribution::discount_box_by_category(records),
            },
            customer_insights: CustomerInsights {
                sales_by_segment: grouping::sales_by_segment(records),
                top_cities: grouping::top_cities(records, TOP_N),
                rating_distribution: distribution::rating_counts(records),
            },
            delivery_analytics: DeliveryAnalytics {
                delivery_status: distribution::delivery_status_counts(records),
                delivery_days_by_category: grouping::delivery_days_by_category(records),
                delivery_days_histogram: distribution::delivery_days_histogram(records),
            },
            trends_patterns: TrendsPatterns {
                monthly_sales: grouping::monthly_sales(records),
                weekday_sales: grouping::weekday_sales(records),
                correlation: CorrelationMatrix::compute(records),
            },
            insights: Insights::compute(records),
        };
        log::debug!("recomputed dashboard views over {} rows", views.row_count);
        views
    }

    /// No rows survived the filter; every chart should show "no data".
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}

/// A dataset viewed through one filter: the rows and their views,
/// produced in a single step.
pub struct FilteredView<'a> {
    pub filter: FilterSpec,
    pub rows: Vec<&'a SalesRecord>,
    pub views: DashboardViews,
}

impl<'a> FilteredView<'a> {
    pub fn build(dataset: &'a Dataset, filter: FilterSpec) -> Self {
        let rows = filter.apply(dataset.records());
        let views = DashboardViews::compute(&rows);
        Self {
            filter,
            rows,
            views,
        }
    }

    /// First `limit` filtered rows.
    pub fn preview(&self, limit: usize) -> &[&'a SalesRecord] {
        &self.rows[..self.rows.len().min(limit)]
    }
}
