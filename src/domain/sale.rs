use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::Totals;

/// One purchased line, as it stood when the sale was committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleLine {
    pub product_id: u64,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

/// Immutable receipt of a completed checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: u64,
    pub created_at: DateTime<Utc>,
    pub items: Vec<SaleLine>,
    pub tax_rate: Decimal,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Payload for recording a sale. Totals are derived from the lines.
#[derive(Debug, Clone)]
pub struct SaleCreate {
    pub items: Vec<SaleLine>,
    pub tax_rate: Decimal,
}

impl SaleRecord {
    pub fn totals(&self) -> Totals {
        Totals {
            subtotal: self.subtotal,
            tax: self.tax,
            total: self.total,
        }
    }

    pub fn units_sold(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}
