use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a product in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
    pub category: String,
}

/// Payload for creating a new product.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
    pub category: String,
}

/// Payload for editing an existing product. `None` leaves the field as is.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<u32>,
    pub category: Option<String>,
}

impl Product {
    #[cfg(test)]
    pub fn new(
        id: u64,
        name: impl Into<String>,
        price: Decimal,
        stock: u32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock,
            category: category.into(),
        }
    }

    pub fn is_low_stock(&self, threshold: u32) -> bool {
        self.stock < threshold
    }
}

impl ProductCreate {
    pub fn new(name: impl Into<String>, price: Decimal, stock: u32, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
            category: category.into(),
        }
    }
}

/// The catalog a fresh till starts with.
pub fn demo_catalog() -> Vec<ProductCreate> {
    vec![
        ProductCreate::new("Pastel Notebook", Decimal::new(1250, 2), 45, "Stationery"),
        ProductCreate::new("Gel Pen Set", Decimal::new(800, 2), 12, "Stationery"),
        ProductCreate::new("Desk Lamp", Decimal::new(3500, 2), 8, "Electronics"),
        ProductCreate::new("Ceramic Mug", Decimal::new(1500, 2), 24, "Home"),
        ProductCreate::new("Planner 2025", Decimal::new(2200, 2), 5, "Stationery"),
        ProductCreate::new("Cotton T-Shirt", Decimal::new(1800, 2), 30, "Cloths"),
        ProductCreate::new("Energy Bar", Decimal::new(350, 2), 60, "Food"),
    ]
}
