use rust_decimal::Decimal;

/// Custom actions for Product entities.
///
/// These actions represent stock operations that go beyond plain catalog edits.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Moves stock by a signed amount (restock or manual correction).
    ///
    /// # Errors
    /// Fails if the stock would drop below zero or overflow.
    AdjustStock(i64),
    /// Takes units out of stock for a sale.
    ///
    /// # Errors
    /// Fails if the requested amount exceeds available stock.
    ReserveStock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    StockLevel(u32),
    Adjusted(u32),
    Reserved(StockReservation),
}

/// Snapshot of a product taken at the moment its stock was reserved.
#[derive(Debug, Clone, PartialEq)]
pub struct StockReservation {
    pub product_id: u64,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub remaining: u32,
}
