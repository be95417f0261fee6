//! Plain-text rendering of the dashboard views.
//!
//! Nothing here computes: every number comes from `DashboardViews`.
//! Empty views print "no data" instead of a chart.

use sales_core::{
    dashboard::{DashboardViews, FilteredView},
    dataset::Dataset,
    distribution::{BoxSummary, CountBucket},
    grouping::GroupValue,
    record::SalesRecord,
};
use std::io::{self, Write};

const BAR_WIDTH: usize = 32;
const SPARK_WIDTH: usize = 72;
const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const NO_DATA: &str = "no data";

pub fn report(out: &mut impl Write, dataset: &Dataset, view: &FilteredView) -> io::Result<()> {
    let f = &view.filter;
    writeln!(out, "=== RETAIL SALES ANALYSIS DASHBOARD ===")?;
    writeln!(
        out,
        "  filters: category={} city={} segment={} dates={}..{}",
        f.category.label(),
        f.city.label(),
        f.segment.label(),
        f.start,
        f.end
    )?;
    writeln!(out, "  rows:    {} of {}", view.rows.len(), dataset.len())?;
    writeln!(out)?;

    kpis(out, &view.views)?;
    if view.views.is_empty() {
        writeln!(out)?;
        writeln!(out, "No orders match the current filters.")?;
        return Ok(());
    }

    let v = &view.views;

    section(out, "SALES OVERVIEW")?;
    amount_bars(out, "Sales by Category", &v.sales_overview.sales_by_category)?;
    count_bars(out, "Payment Methods", &v.sales_overview.payment_methods)?;
    let daily: Vec<f64> = v.sales_overview.daily_sales.iter().map(|d| d.value).collect();
    writeln!(out, "  Daily Sales Trend ({} days)", daily.len())?;
    if let (Some(first), Some(last)) = (
        v.sales_overview.daily_sales.first(),
        v.sales_overview.daily_sales.last(),
    ) {
        writeln!(out, "    {} .. {}", first.date, last.date)?;
    }
    for line in sparkline(&daily) {
        writeln!(out, "    {line}")?;
    }
    writeln!(out)?;

    section(out, "PRODUCT ANALYSIS")?;
    amount_bars(out, "Top 10 Subcategories by Sales", &v.product_analysis.top_subcategories)?;
    value_bars(out, "Average Rating by Category", &v.product_analysis.rating_by_category, 2)?;
    boxes(out, "Discount Percent by Category", &v.product_analysis.discount_by_category)?;

    section(out, "CUSTOMER INSIGHTS")?;
    amount_bars(out, "Sales by Customer Segment", &v.customer_insights.sales_by_segment)?;
    amount_bars(out, "Top 10 Cities by Sales", &v.customer_insights.top_cities)?;
    let ratings: Vec<CountBucket> = v
        .customer_insights
        .rating_distribution
        .iter()
        .map(|r| CountBucket {
            key: format!("{} star", r.rating),
            count: r.count,
        })
        .collect();
    count_bars(out, "Customer Rating Distribution", &ratings)?;

    section(out, "DELIVERY ANALYTICS")?;
    count_bars(out, "Delivery Status", &v.delivery_analytics.delivery_status)?;
    value_bars(
        out,
        "Average Delivery Days by Category",
        &v.delivery_analytics.delivery_days_by_category,
        1,
    )?;
    let days: Vec<CountBucket> = v
        .delivery_analytics
        .delivery_days_histogram
        .iter()
        .map(|b| CountBucket {
            key: format!("{} days", b.days),
            count: b.count,
        })
        .collect();
    count_bars(out, "Delivery Days Distribution", &days)?;

    section(out, "TRENDS & PATTERNS")?;
    let months: Vec<GroupValue> = v
        .trends_patterns
        .monthly_sales
        .iter()
        .map(|m| GroupValue {
            key: month_name(m.month).to_string(),
            value: m.value,
        })
        .collect();
    amount_bars(out, "Sales by Month", &months)?;
    amount_bars(out, "Sales by Day of Week", &v.trends_patterns.weekday_sales)?;
    correlation(out, v)?;

    insights(out, v)
}

fn section(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "=== {title} ===")
}

fn kpis(out: &mut impl Write, v: &DashboardViews) -> io::Result<()> {
    let k = &v.kpis;
    section(out, "KEY PERFORMANCE INDICATORS")?;
    writeln!(out, "  Total Sales:      {}", rupees(k.total_sales))?;
    writeln!(out, "  Avg Order Value:  {}", or_no_data(k.avg_order_value, rupees))?;
    writeln!(out, "  Total Orders:     {}", thousands(k.total_orders as f64))?;
    writeln!(out, "  Avg Rating:       {}", or_no_data(k.avg_rating, |x| format!("{x:.2}")))?;
    writeln!(
        out,
        "  Return Rate:      {}",
        or_no_data(k.return_rate_pct, |x| format!("{x:.1}%"))
    )?;
    writeln!(out)
}

fn insights(out: &mut impl Write, v: &DashboardViews) -> io::Result<()> {
    let i = &v.insights;
    let name = |x: &Option<String>| x.clone().unwrap_or_else(|| NO_DATA.to_string());
    section(out, "KEY INSIGHTS")?;
    writeln!(out, "  Sales:")?;
    writeln!(out, "    Highest selling category: {}", name(&i.top_category_by_sales))?;
    writeln!(out, "    Most profitable category: {}", name(&i.top_category_by_profit))?;
    writeln!(out, "    Best rated category:      {}", name(&i.top_category_by_rating))?;
    writeln!(out, "  Operations:")?;
    writeln!(
        out,
        "    Average delivery time:    {}",
        or_no_data(i.avg_delivery_days, |x| format!("{x:.1} days"))
    )?;
    writeln!(
        out,
        "    On-time delivery rate:    {}",
        or_no_data(i.on_time_rate_pct, |x| format!("{x:.1}%"))
    )?;
    writeln!(out, "    Most popular payment:     {}", name(&i.top_payment_method))
}

fn amount_bars(out: &mut impl Write, title: &str, groups: &[GroupValue]) -> io::Result<()> {
    bars(out, title, groups.iter().map(|g| (g.key.as_str(), g.value)), rupees)
}

fn value_bars(out: &mut impl Write, title: &str, groups: &[GroupValue], dp: usize) -> io::Result<()> {
    bars(out, title, groups.iter().map(|g| (g.key.as_str(), g.value)), |x| {
        format!("{x:.dp$}")
    })
}

fn count_bars(out: &mut impl Write, title: &str, buckets: &[CountBucket]) -> io::Result<()> {
    bars(
        out,
        title,
        buckets.iter().map(|b| (b.key.as_str(), b.count as f64)),
        thousands,
    )
}

fn bars<'a>(
    out: &mut impl Write,
    title: &str,
    rows: impl Iterator<Item = (&'a str, f64)>,
    fmt: impl Fn(f64) -> String,
) -> io::Result<()> {
    let rows: Vec<(&str, f64)> = rows.collect();
    writeln!(out, "  {title}")?;
    if rows.is_empty() {
        writeln!(out, "    ({NO_DATA})")?;
        return writeln!(out);
    }
    let max = rows.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    let label_width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    for (key, value) in &rows {
        let len = if max > 0.0 {
            ((value / max) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };
        writeln!(
            out,
            "    {key:<label_width$}  {:<BAR_WIDTH$}  {}",
            "█".repeat(len),
            fmt(*value)
        )?;
    }
    writeln!(out)
}

fn boxes(out: &mut impl Write, title: &str, summaries: &[BoxSummary]) -> io::Result<()> {
    writeln!(out, "  {title}")?;
    if summaries.is_empty() {
        writeln!(out, "    ({NO_DATA})")?;
        return writeln!(out);
    }
    writeln!(
        out,
        "    {:<20} {:>6} {:>6} {:>6} {:>6} {:>6} {:>8}",
        "group", "min", "q1", "median", "q3", "max", "outliers"
    )?;
    for b in summaries {
        writeln!(
            out,
            "    {:<20} {:>6.1} {:>6.1} {:>6.1} {:>6.1} {:>6.1} {:>8}",
            b.group,
            b.min,
            b.q1,
            b.median,
            b.q3,
            b.max,
            b.outliers.len()
        )?;
    }
    writeln!(out)
}

fn correlation(out: &mut impl Write, v: &DashboardViews) -> io::Result<()> {
    let m = &v.trends_patterns.correlation;
    writeln!(out, "  Correlation Matrix")?;
    write!(out, "    {:<17}", "")?;
    for field in &m.fields {
        write!(out, " {:>8}", abbreviate(field))?;
    }
    writeln!(out)?;
    for (field, row) in m.fields.iter().zip(&m.values) {
        write!(out, "    {field:<17}")?;
        for cell in row {
            match cell {
                Some(r) => write!(out, " {r:>8.2}")?,
                None => write!(out, " {:>8}", "-")?,
            }
        }
        writeln!(out)?;
    }
    writeln!(out)
}

/// Raw-data preview: the first rows of the filtered set.
pub fn preview(out: &mut impl Write, rows: &[&SalesRecord]) -> io::Result<()> {
    section(out, "DATA PREVIEW")?;
    if rows.is_empty() {
        return writeln!(out, "  ({NO_DATA})");
    }
    writeln!(
        out,
        "  {:<9} {:<10} {:<18} {:<20} {:>12} {:>3} {:>3} {:>12} {:<10} {:<10}",
        "order", "date", "category", "subcategory", "price", "qty", "disc", "final", "segment", "city"
    )?;
    for r in rows {
        writeln!(
            out,
            "  {:<9} {:<10} {:<18} {:<20} {:>12.2} {:>3} {:>3} {:>12.2} {:<10} {:<10}",
            r.order_id,
            r.order_date,
            r.category,
            r.subcategory,
            r.product_price,
            r.quantity,
            r.discount_percent,
            r.final_price,
            r.customer_segment,
            r.city
        )?;
    }
    writeln!(out)
}

fn or_no_data(value: Option<f64>, fmt: impl Fn(f64) -> String) -> String {
    value.map(fmt).unwrap_or_else(|| NO_DATA.to_string())
}

fn rupees(x: f64) -> String {
    format!("₹{}", thousands(x))
}

/// Whole-number formatting with comma separators.
fn thousands(x: f64) -> String {
    let rounded = x.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Values scaled into block characters, wrapped every SPARK_WIDTH.
fn sparkline(values: &[f64]) -> Vec<String> {
    let max = values.iter().copied().fold(0.0, f64::max);
    let glyphs: Vec<char> = values
        .iter()
        .map(|v| {
            if max <= 0.0 {
                SPARKS[0]
            } else {
                let level = ((v / max) * (SPARKS.len() - 1) as f64).round() as usize;
                SPARKS[level.min(SPARKS.len() - 1)]
            }
        })
        .collect();
    glyphs
        .chunks(SPARK_WIDTH)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

fn abbreviate(column: &str) -> String {
    column
        .split('_')
        .map(|part| part.chars().take(4).collect::<String>())
        .collect::<Vec<_>>()
        .join("_")
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_groups_digits() {
        assert_eq!(thousands(0.0), "0");
        assert_eq!(thousands(999.4), "999");
        assert_eq!(thousands(1234567.0), "1,234,567");
        assert_eq!(thousands(-1000.0), "-1,000");
    }

    #[test]
    fn sparkline_wraps() {
        let values = vec![1.0; SPARK_WIDTH + 3];
        let lines = sparkline(&values);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].chars().count(), 3);
    }
}
