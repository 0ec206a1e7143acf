use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{Product, SaleRecord};

/// Headline numbers for the back-office dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub product_count: usize,
    pub units_in_stock: u64,
    pub low_stock: Vec<Product>,
    pub sale_count: usize,
    pub revenue: Decimal,
}

impl DashboardSummary {
    pub fn build(catalog: &[Product], sales: &[SaleRecord], low_stock_threshold: u32) -> Self {
        Self {
            product_count: catalog.len(),
            units_in_stock: catalog.iter().map(|p| u64::from(p.stock)).sum(),
            low_stock: catalog
                .iter()
                .filter(|p| p.is_low_stock(low_stock_threshold))
                .cloned()
                .collect(),
            sale_count: sales.len(),
            revenue: sales.iter().map(|s| s.total).sum(),
        }
    }
}
