//! The loaded dataset and its explicit, caller-owned cache.
//!
//! A `Dataset` is immutable once built. `DatasetSource` holds the file
//! path plus at most one loaded copy; callers pass the handle it returns
//! into every filter and view. There is no process-global cache.

use crate::{error::SalesResult, record::SalesRecord, store};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where the generator writes and the dashboard reads by default.
pub const DEFAULT_DATASET_PATH: &str = "amazon_sales_data.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<SalesRecord>,
}

impl Dataset {
    pub fn from_records(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    pub fn load(path: &Path) -> SalesResult<Self> {
        let records = store::read_records_from_path(path)?;
        log::info!("loaded {} records from {}", records.len(), path.display());
        Ok(Self { records })
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest order date, `None` for an empty dataset.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.order_date).min()?;
        let max = self.records.iter().map(|r| r.order_date).max()?;
        Some((min, max))
    }

    /// Distinct categories in first-appearance order.
    pub fn categories(&self) -> Vec<&str> {
        distinct(self.records.iter().map(|r| r.category.as_str()))
    }

    pub fn cities(&self) -> Vec<&str> {
        distinct(self.records.iter().map(|r| r.city.as_str()))
    }

    pub fn segments(&self) -> Vec<&str> {
        distinct(self.records.iter().map(|r| r.customer_segment.as_str()))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}

/// Load-once handle over the dataset file.
pub struct DatasetSource {
    path: PathBuf,
    cached: Option<Arc<Dataset>>,
}

impl DatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.cached.is_some()
    }

    /// Return the cached dataset, reading the file on first use.
    /// A failed load leaves the cache empty so the next call retries.
    pub fn get(&mut self) -> SalesResult<Arc<Dataset>> {
        if let Some(dataset) = &self.cached {
            return Ok(Arc::clone(dataset));
        }
        let dataset = Arc::new(Dataset::load(&self.path)?);
        self.cached = Some(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Drop the cached copy and read the file again.
    pub fn reload(&mut self) -> SalesResult<Arc<Dataset>> {
        self.cached = None;
        log::debug!("reloading dataset from {}", self.path.display());
        self.get()
    }
}
