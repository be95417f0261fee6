//! Pairwise Pearson correlation over the numeric columns.

use crate::{record::SalesRecord, stats::pearson};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NumericField {
    ProductPrice,
    Quantity,
    DiscountPercent,
    FinalPrice,
    CustomerRating,
    DeliveryDays,
    ProfitMargin,
}

impl NumericField {
    pub const ALL: [NumericField; 7] = [
        Self::ProductPrice,
        Self::Quantity,
        Self::DiscountPercent,
        Self::FinalPrice,
        Self::CustomerRating,
        Self::DeliveryDays,
        Self::ProfitMargin,
    ];

    /// Dataset column name.
    pub fn column(&self) -> &'static str {
        match self {
            Self::ProductPrice => "Product_Price",
            Self::Quantity => "Quantity",
            Self::DiscountPercent => "Discount_Percent",
            Self::FinalPrice => "Final_Price",
            Self::CustomerRating => "Customer_Rating",
            Self::DeliveryDays => "Delivery_Days",
            Self::ProfitMargin => "Profit_Margin",
        }
    }

    pub fn value(&self, r: &SalesRecord) -> f64 {
        match self {
            Self::ProductPrice => r.product_price,
            Self::Quantity => f64::from(r.quantity),
            Self::DiscountPercent => f64::from(r.discount_percent),
            Self::FinalPrice => r.final_price,
            Self::CustomerRating => f64::from(r.customer_rating),
            Self::DeliveryDays => f64::from(r.delivery_days),
            Self::ProfitMargin => r.profit_margin,
        }
    }
}

/// Square, symmetric matrix indexed in `NumericField::ALL` order.
/// A cell is `None` when either column has no variance or there are
/// fewer than two rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub fields: Vec<&'static str>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn compute(records: &[&SalesRecord]) -> Self {
        let columns: Vec<Vec<f64>> = NumericField::ALL
            .iter()
            .map(|f| records.iter().map(|r| f.value(r)).collect())
            .collect();

        let n = NumericField::ALL.len();
        let mut values = vec![vec![None; n]; n];
        for i in 0..n {
            // Self-correlation is exactly 1 wherever it is defined.
            values[i][i] = pearson(&columns[i], &columns[i]).map(|_| 1.0);
            for j in (i + 1)..n {
                let r = pearson(&columns[i], &columns[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Self {
            fields: NumericField::ALL.iter().map(|f| f.column()).collect(),
            values,
        }
    }

    pub fn get(&self, a: NumericField, b: NumericField) -> Option<f64> {
        let i = NumericField::ALL.iter().position(|f| *f == a)?;
        let j = NumericField::ALL.iter().position(|f| *f == b)?;
        self.values[i][j]
    }

    pub fn is_symmetric(&self) -> bool {
        let n = self.values.len();
        (0..n).all(|i| (0..n).all(|j| self.values[i][j] == self.values[j][i]))
    }
}
