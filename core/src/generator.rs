//! Synthetic sales generation.
//!
//! Records are independent draws: no record depends on an earlier one.
//! Within a record, each field group reads only its own RNG stream, so
//! the stream layout in rng.rs fully determines the output for a seed.

use crate::{
    config::{CategoryConfig, GeneratorConfig},
    error::SalesResult,
    record::{round2, SalesRecord},
    rng::{RngBank, StreamRng, StreamSlot},
    store,
};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::path::Path;

pub struct SalesGenerator {
    config: GeneratorConfig,
    rng_bank: RngBank,
}

/// One RNG stream per field group, alive for a whole run.
struct FieldStreams {
    catalog: StreamRng,
    pricing: StreamRng,
    feedback: StreamRng,
    fulfilment: StreamRng,
    customer: StreamRng,
    calendar: StreamRng,
    margin: StreamRng,
}

impl FieldStreams {
    fn new(bank: &RngBank) -> Self {
        Self {
            catalog: bank.for_stream(StreamSlot::Catalog),
            pricing: bank.for_stream(StreamSlot::Pricing),
            feedback: bank.for_stream(StreamSlot::Feedback),
            fulfilment: bank.for_stream(StreamSlot::Fulfilment),
            customer: bank.for_stream(StreamSlot::Customer),
            calendar: bank.for_stream(StreamSlot::Calendar),
            margin: bank.for_stream(StreamSlot::Margin),
        }
    }
}

impl SalesGenerator {
    pub fn new(config: GeneratorConfig) -> SalesResult<Self> {
        config.validate()?;
        let rng_bank = RngBank::new(config.seed);
        Ok(Self { config, rng_bank })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Produce exactly `config.record_count` records.
    /// Calling this twice yields identical output.
    pub fn generate(&self) -> Vec<SalesRecord> {
        let mut streams = FieldStreams::new(&self.rng_bank);
        let records: Vec<SalesRecord> = (0..self.config.record_count)
            .map(|i| self.generate_record(i as u64, &mut streams))
            .collect();
        log::info!(
            "generated {} records (seed={})",
            records.len(),
            self.rng_bank.master_seed()
        );
        records
    }

    /// Generate and write the dataset file, replacing it wholesale.
    pub fn generate_to_path(&self, path: &Path) -> SalesResult<Vec<SalesRecord>> {
        let records = self.generate();
        store::write_records_to_path(path, &records)?;
        log::info!("dataset written to {}", path.display());
        Ok(records)
    }

    fn generate_record(&self, index: u64, s: &mut FieldStreams) -> SalesRecord {
        let cfg = &self.config;

        let category: &CategoryConfig = s.catalog.pick(&cfg.categories);
        let subcategory = s.catalog.pick(&category.subcategories).clone();
        let product_price = round2(s.catalog.uniform(category.price_min, category.price_max));
        let (q_lo, q_hi) = cfg.quantity_range;
        let quantity = s.catalog.int_inclusive(u64::from(q_lo), u64::from(q_hi)) as u32;

        let discount_percent = *s.pricing.weighted(&cfg.discount_weights);
        let gross = product_price * f64::from(quantity);
        let discount_amount = round2(gross * f64::from(discount_percent) / 100.0);
        let final_price = round2(gross - discount_amount).max(0.0);

        let customer_rating = *s.feedback.weighted(&cfg.rating_weights);
        let review_length = *s.feedback.weighted(&cfg.review_length_weights);

        let (d_lo, d_hi) = cfg.delivery_days_range;
        let delivery_days = s.fulfilment.int_inclusive(u64::from(d_lo), u64::from(d_hi)) as u32;
        // Sampled independently of delivery_days.
        let delivery_status = *s.fulfilment.weighted(&cfg.delivery_status_weights);
        let returned = s.fulfilment.chance(cfg.return_probability);

        let customer_segment = s.customer.pick(&cfg.segments).clone();
        let payment_method = s.customer.pick(&cfg.payment_methods).clone();
        let city = s.customer.pick(&cfg.cities).clone();

        let offset = s.calendar.int_inclusive(0, u64::from(cfg.order_span_days));
        let order_date = cfg.epoch_start + Duration::days(offset as i64);

        let (f_lo, f_hi) = cfg.profit_factor_range;
        let profit_margin = round2(final_price * s.margin.uniform(f_lo, f_hi));

        SalesRecord {
            order_id: format!("{}{}", cfg.order_id_prefix, cfg.order_id_offset + index),
            order_date,
            category: category.name.clone(),
            subcategory,
            product_price,
            quantity,
            discount_percent,
            discount_amount,
            final_price,
            payment_method,
            customer_segment,
            city,
            customer_rating,
            review_length,
            delivery_days,
            delivery_status,
            returned,
            profit_margin,
        }
    }
}

/// What the generator CLI prints after a run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationSummary {
    pub rows: usize,
    pub columns: usize,
    pub first_order_date: Option<NaiveDate>,
    pub last_order_date: Option<NaiveDate>,
    /// (category, count), in catalog order.
    pub category_counts: Vec<(String, usize)>,
}

impl GenerationSummary {
    pub fn new(config: &GeneratorConfig, records: &[SalesRecord]) -> Self {
        let category_counts = config
            .categories
            .iter()
            .map(|c| {
                let count = records.iter().filter(|r| r.category == c.name).count();
                (c.name.clone(), count)
            })
            .collect();
        Self {
            rows: records.len(),
            columns: crate::record::CSV_COLUMNS.len(),
            first_order_date: records.iter().map(|r| r.order_date).min(),
            last_order_date: records.iter().map(|r| r.order_date).max(),
            category_counts,
        }
    }
}
