use crate::{
    error::{SalesError, SalesResult},
    record::{DeliveryStatus, ReviewLength},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryConfig {
    pub name: String,
    pub subcategories: Vec<String>,
    pub price_min: f64,
    pub price_max: f64,
}

impl CategoryConfig {
    fn new(name: &str, subcategories: &[&str], price_min: f64, price_max: f64) -> Self {
        Self {
            name: name.into(),
            subcategories: subcategories.iter().map(|s| s.to_string()).collect(),
            price_min,
            price_max,
        }
    }
}

/// Everything the generator draws from.
///
/// Every key is optional in a config file; missing keys fall back to
/// the built-in catalog below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub record_count: usize,
    pub seed: u64,
    pub order_id_prefix: String,
    pub order_id_offset: u64,
    pub epoch_start: NaiveDate,
    /// Order dates fall in [epoch_start, epoch_start + order_span_days].
    pub order_span_days: u32,
    pub categories: Vec<CategoryConfig>,
    pub payment_methods: Vec<String>,
    pub segments: Vec<String>,
    pub cities: Vec<String>,
    pub quantity_range: (u32, u32),
    pub discount_weights: Vec<(u32, f64)>,
    pub rating_weights: Vec<(u8, f64)>,
    pub review_length_weights: Vec<(ReviewLength, f64)>,
    pub delivery_days_range: (u32, u32),
    pub delivery_status_weights: Vec<(DeliveryStatus, f64)>,
    pub return_probability: f64,
    pub profit_factor_range: (f64, f64),
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let strings = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            record_count: 10_000,
            seed: 42,
            order_id_prefix: "ORD".into(),
            order_id_offset: 10_000,
            epoch_start: NaiveDate::from_ymd_opt(2023, 1, 1).expect("valid epoch"),
            order_span_days: 365,
            categories: vec![
                CategoryConfig::new(
                    "Electronics",
                    &["Smartphones", "Laptops", "Headphones", "Tablets", "Cameras", "Smart Watches"],
                    500.0,
                    150_000.0,
                ),
                CategoryConfig::new(
                    "Clothing",
                    &["Men's Fashion", "Women's Fashion", "Kids' Fashion", "Shoes", "Accessories"],
                    200.0,
                    5_000.0,
                ),
                CategoryConfig::new(
                    "Books",
                    &["Fiction", "Non-Fiction", "Educational", "Children's Books", "Comics"],
                    100.0,
                    2_000.0,
                ),
                CategoryConfig::new(
                    "Home & Kitchen",
                    &["Furniture", "Kitchen Appliances", "Decor", "Bedding", "Cookware"],
                    300.0,
                    30_000.0,
                ),
                CategoryConfig::new(
                    "Sports & Outdoors",
                    &["Fitness Equipment", "Camping Gear", "Sports Apparel", "Outdoor Recreation"],
                    500.0,
                    20_000.0,
                ),
            ],
            payment_methods: strings(&[
                "Credit Card",
                "Debit Card",
                "UPI",
                "Net Banking",
                "Cash on Delivery",
                "Amazon Pay",
            ]),
            segments: strings(&["New", "Regular", "Prime", "Premium"]),
            cities: strings(&[
                "Mumbai",
                "Delhi",
                "Bangalore",
                "Chennai",
                "Kolkata",
                "Pune",
                "Hyderabad",
                "Ahmedabad",
            ]),
            quantity_range: (1, 5),
            discount_weights: vec![
                (0, 0.30),
                (5, 0.20),
                (10, 0.15),
                (15, 0.10),
                (20, 0.10),
                (25, 0.08),
                (30, 0.07),
            ],
            rating_weights: vec![(1, 0.02), (2, 0.03), (3, 0.15), (4, 0.40), (5, 0.40)],
            review_length_weights: vec![
                (ReviewLength::Short, 0.3),
                (ReviewLength::Medium, 0.5),
                (ReviewLength::Long, 0.2),
            ],
            delivery_days_range: (1, 10),
            delivery_status_weights: vec![
                (DeliveryStatus::OnTime, 0.7),
                (DeliveryStatus::Delayed, 0.2),
                (DeliveryStatus::Early, 0.1),
            ],
            return_probability: 0.08,
            profit_factor_range: (0.2, 0.4),
        }
    }
}

impl GeneratorConfig {
    /// Load a JSON config file. Keys absent from the file keep their
    /// built-in values.
    pub fn load(path: &str) -> SalesResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: GeneratorConfig = serde_json::from_str(&content)?;
        config.validate()?;
        log::info!(
            "loaded generator config from {path}: {} categories, {} cities",
            config.categories.len(),
            config.cities.len()
        );
        Ok(config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_record_count(mut self, record_count: usize) -> Self {
        self.record_count = record_count;
        self
    }

    /// Reject catalogs the generator cannot draw from.
    pub fn validate(&self) -> SalesResult<()> {
        let invalid = |reason: String| Err(SalesError::InvalidConfig { reason });

        if self.categories.is_empty() {
            return invalid("no categories".into());
        }
        for cat in &self.categories {
            if cat.subcategories.is_empty() {
                return invalid(format!("category '{}' has no subcategories", cat.name));
            }
            if !(cat.price_min > 0.0 && cat.price_min <= cat.price_max && cat.price_max.is_finite()) {
                return invalid(format!(
                    "category '{}' price range {}..{} must be positive, finite and ordered",
                    cat.name, cat.price_min, cat.price_max
                ));
            }
        }
        for (label, list) in [
            ("payment_methods", &self.payment_methods),
            ("segments", &self.segments),
            ("cities", &self.cities),
        ] {
            if list.is_empty() {
                return invalid(format!("{label} is empty"));
            }
        }

        let (q_lo, q_hi) = self.quantity_range;
        if q_lo == 0 || q_lo > q_hi {
            return invalid(format!("quantity_range {q_lo}..={q_hi} must start at 1 or more"));
        }
        let (d_lo, d_hi) = self.delivery_days_range;
        if d_lo > d_hi {
            return invalid(format!("delivery_days_range {d_lo}..={d_hi} is empty"));
        }
        let (p_lo, p_hi) = self.profit_factor_range;
        if !((0.0..=p_hi).contains(&p_lo) && p_hi.is_finite()) {
            return invalid(format!(
                "profit_factor_range {p_lo}..{p_hi} must be non-negative, finite and ordered"
            ));
        }
        if !(0.0..=1.0).contains(&self.return_probability) {
            return invalid(format!("return_probability {} outside [0, 1]", self.return_probability));
        }
        if self.discount_weights.iter().any(|(pct, _)| *pct > 100) {
            return invalid("discount percent above 100".into());
        }

        check_weights("discount_weights", &self.discount_weights)?;
        check_weights("rating_weights", &self.rating_weights)?;
        check_weights("review_length_weights", &self.review_length_weights)?;
        check_weights("delivery_status_weights", &self.delivery_status_weights)?;
        Ok(())
    }
}

fn check_weights<T>(label: &str, weights: &[(T, f64)]) -> SalesResult<()> {
    let total: f64 = weights.iter().map(|(_, w)| w).sum();
    if weights.iter().any(|(_, w)| !w.is_finite() || *w < 0.0) || total <= 0.0 {
        return Err(SalesError::InvalidConfig {
            reason: format!("{label} must be non-negative with a positive total"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let config = GeneratorConfig::default();
        config.validate().unwrap();
        assert_eq!(config.categories.len(), 5);
        assert_eq!(config.payment_methods.len(), 6);
        assert_eq!(config.segments.len(), 4);
        assert_eq!(config.cities.len(), 8);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{ "seed": 7, "cities": ["Mumbai", "Delhi"] }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.cities, vec!["Mumbai".to_string(), "Delhi".to_string()]);
        assert_eq!(config.categories, GeneratorConfig::default().categories);
    }

    #[test]
    fn rejects_inverted_price_range() {
        let mut config = GeneratorConfig::default();
        config.categories[0].price_min = 10.0;
        config.categories[0].price_max = 5.0;
        assert!(matches!(config.validate(), Err(SalesError::InvalidConfig { .. })));
    }

    #[test]
    fn rejects_unbounded_ranges() {
        let mut config = GeneratorConfig::default();
        config.categories[1].price_max = f64::INFINITY;
        assert!(matches!(config.validate(), Err(SalesError::InvalidConfig { .. })));

        let mut config = GeneratorConfig::default();
        config.profit_factor_range = (0.2, f64::INFINITY);
        assert!(matches!(config.validate(), Err(SalesError::InvalidConfig { .. })));

        let mut config = GeneratorConfig::default();
        config.categories[0].price_min = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_all_zero_weights() {
        let mut config = GeneratorConfig::default();
        config.rating_weights = vec![(5, 0.0)];
        assert!(config.validate().is_err());
    }
}
