//! Filter specification: field equality selectors AND an inclusive
//! order-date window.

use crate::{
    dataset::Dataset,
    error::{SalesError, SalesResult},
    record::SalesRecord,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const ALL: &str = "All";

/// A single-choice selector. Serialized as the plain value, with
/// `"All"` meaning no constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selector {
    #[default]
    All,
    Only(String),
}

impl Selector {
    pub fn only(value: impl Into<String>) -> Self {
        Self::Only(value.into())
    }

    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Only(v) => v,
        }
    }
}

impl From<String> for Selector {
    fn from(value: String) -> Self {
        if value == ALL {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl From<&str> for Selector {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<Selector> for String {
    fn from(selector: Selector) -> Self {
        selector.label().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub category: Selector,
    #[serde(default)]
    pub city: Selector,
    #[serde(default)]
    pub segment: Selector,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FilterSpec {
    /// All selectors open, dates spanning the dataset's order dates.
    /// An empty dataset gets the widest representable window.
    pub fn for_dataset(dataset: &Dataset) -> Self {
        let (start, end) = dataset
            .date_bounds()
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        Self {
            category: Selector::All,
            city: Selector::All,
            segment: Selector::All,
            start,
            end,
        }
    }

    pub fn with_category(mut self, category: impl Into<Selector>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_city(mut self, city: impl Into<Selector>) -> Self {
        self.city = city.into();
        self
    }

    pub fn with_segment(mut self, segment: impl Into<Selector>) -> Self {
        self.segment = segment.into();
        self
    }

    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn matches(&self, record: &SalesRecord) -> bool {
        self.category.matches(&record.category)
            && self.city.matches(&record.city)
            && self.segment.matches(&record.customer_segment)
            && self.start <= record.order_date
            && record.order_date <= self.end
    }

    /// Matching records, by reference, in dataset order.
    /// `start > end` yields an empty set.
    pub fn apply<'a>(&self, records: &'a [SalesRecord]) -> Vec<&'a SalesRecord> {
        let filtered: Vec<&SalesRecord> = records.iter().filter(|r| self.matches(r)).collect();
        log::debug!(
            "filter category={} city={} segment={} {}..={} kept {}/{}",
            self.category.label(),
            self.city.label(),
            self.segment.label(),
            self.start,
            self.end,
            filtered.len(),
            records.len()
        );
        filtered
    }

    /// Narrow an already-filtered view further.
    pub fn refine<'a>(&self, records: &[&'a SalesRecord]) -> Vec<&'a SalesRecord> {
        records.iter().copied().filter(|r| self.matches(r)).collect()
    }
}

/// Parse a `YYYY-MM-DD` date from user input.
pub fn parse_date(value: &str) -> SalesResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| SalesError::InvalidDate {
        value: value.to_string(),
    })
}
