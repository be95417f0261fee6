//! The transaction record and its CSV row shape.
//!
//! RULE: Derived date fields (delivery date, month, weekday, quarter,
//! day name) are never stored on a record. They are computed from the
//! order date on demand and only materialised when a row is written.

use crate::types::{Amount, OrderId};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Column names of the dataset file, in file order.
pub const CSV_COLUMNS: [&str; 23] = [
    "Order_ID",
    "Order_Date",
    "Delivery_Date",
    "Category",
    "Subcategory",
    "Product_Price",
    "Quantity",
    "Discount_Percent",
    "Discount_Amount",
    "Final_Price",
    "Payment_Method",
    "Customer_Segment",
    "City",
    "Customer_Rating",
    "Review_Length",
    "Delivery_Days",
    "Delivery_Status",
    "Returned",
    "Profit_Margin",
    "Order_Month",
    "Order_DayOfWeek",
    "Order_Quarter",
    "Order_DayName",
];

/// Monday-first week, the fixed order for weekday views.
pub const WEEK_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewLength {
    Short,
    Medium,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryStatus {
    #[serde(rename = "On Time")]
    OnTime,
    Delayed,
    Early,
}

impl DeliveryStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::OnTime => "On Time",
            Self::Delayed => "Delayed",
            Self::Early => "Early",
        }
    }
}

/// One retail transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub order_id: OrderId,
    pub order_date: NaiveDate,
    pub category: String,
    pub subcategory: String,
    pub product_price: Amount,
    pub quantity: u32,
    pub discount_percent: u32,
    pub discount_amount: Amount,
    pub final_price: Amount,
    pub payment_method: String,
    pub customer_segment: String,
    pub city: String,
    pub customer_rating: u8,
    pub review_length: ReviewLength,
    pub delivery_days: u32,
    pub delivery_status: DeliveryStatus,
    pub returned: bool,
    pub profit_margin: Amount,
}

impl SalesRecord {
    /// Order date plus delivery days, saturating at the last
    /// representable date.
    pub fn delivery_date(&self) -> NaiveDate {
        self.order_date
            .checked_add_days(Days::new(u64::from(self.delivery_days)))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Calendar month of the order, 1–12.
    pub fn month(&self) -> u32 {
        self.order_date.month()
    }

    pub fn weekday(&self) -> Weekday {
        self.order_date.weekday()
    }

    /// 0 = Monday … 6 = Sunday.
    pub fn day_of_week(&self) -> u32 {
        self.weekday().num_days_from_monday()
    }

    pub fn day_name(&self) -> &'static str {
        day_name(self.weekday())
    }

    /// Calendar quarter of the order, 1–4.
    pub fn quarter(&self) -> u32 {
        (self.month() - 1) / 3 + 1
    }
}

pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Round to paise.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// One row of the dataset file.
///
/// Derived columns are written from the record's accessors and
/// ignored on read; a file that omits them still loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CsvRow {
    #[serde(rename = "Order_ID")]
    order_id: String,
    #[serde(rename = "Order_Date")]
    order_date: NaiveDate,
    #[serde(rename = "Delivery_Date", default)]
    delivery_date: Option<NaiveDate>,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Subcategory")]
    subcategory: String,
    #[serde(rename = "Product_Price")]
    product_price: f64,
    #[serde(rename = "Quantity")]
    quantity: u32,
    #[serde(rename = "Discount_Percent")]
    discount_percent: u32,
    #[serde(rename = "Discount_Amount")]
    discount_amount: f64,
    #[serde(rename = "Final_Price")]
    final_price: f64,
    #[serde(rename = "Payment_Method")]
    payment_method: String,
    #[serde(rename = "Customer_Segment")]
    customer_segment: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "Customer_Rating")]
    customer_rating: u8,
    #[serde(rename = "Review_Length")]
    review_length: ReviewLength,
    #[serde(rename = "Delivery_Days")]
    delivery_days: u32,
    #[serde(rename = "Delivery_Status")]
    delivery_status: DeliveryStatus,
    #[serde(rename = "Returned", with = "yes_no")]
    returned: bool,
    #[serde(rename = "Profit_Margin")]
    profit_margin: f64,
    #[serde(rename = "Order_Month", default)]
    order_month: Option<u32>,
    #[serde(rename = "Order_DayOfWeek", default)]
    order_day_of_week: Option<u32>,
    #[serde(rename = "Order_Quarter", default)]
    order_quarter: Option<u32>,
    #[serde(rename = "Order_DayName", default)]
    order_day_name: Option<String>,
}

impl From<&SalesRecord> for CsvRow {
    fn from(r: &SalesRecord) -> Self {
        Self {
            order_id: r.order_id.clone(),
            order_date: r.order_date,
            delivery_date: Some(r.delivery_date()),
            category: r.category.clone(),
            subcategory: r.subcategory.clone(),
            product_price: r.product_price,
            quantity: r.quantity,
            discount_percent: r.discount_percent,
            discount_amount: r.discount_amount,
            final_price: r.final_price,
            payment_method: r.payment_method.clone(),
            customer_segment: r.customer_segment.clone(),
            city: r.city.clone(),
            customer_rating: r.customer_rating,
            review_length: r.review_length,
            delivery_days: r.delivery_days,
            delivery_status: r.delivery_status,
            returned: r.returned,
            profit_margin: r.profit_margin,
            order_month: Some(r.month()),
            order_day_of_week: Some(r.day_of_week()),
            order_quarter: Some(r.quarter()),
            order_day_name: Some(r.day_name().to_string()),
        }
    }
}

impl From<CsvRow> for SalesRecord {
    fn from(row: CsvRow) -> Self {
        Self {
            order_id: row.order_id,
            order_date: row.order_date,
            category: row.category,
            subcategory: row.subcategory,
            product_price: row.product_price,
            quantity: row.quantity,
            discount_percent: row.discount_percent,
            discount_amount: row.discount_amount,
            final_price: row.final_price,
            payment_method: row.payment_method,
            customer_segment: row.customer_segment,
            city: row.city,
            customer_rating: row.customer_rating,
            review_length: row.review_length,
            delivery_days: row.delivery_days,
            delivery_status: row.delivery_status,
            returned: row.returned,
            profit_margin: row.profit_margin,
        }
    }
}

/// `Returned` is written as Yes/No rather than true/false.
mod yes_no {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(if *value { "Yes" } else { "No" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(d)?;
        match raw.as_str() {
            "Yes" => Ok(true),
            "No" => Ok(false),
            other => Err(D::Error::custom(format!("expected Yes or No, got '{other}'"))),
        }
    }
}
