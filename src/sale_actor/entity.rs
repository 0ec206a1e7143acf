use chrono::Utc;
use rust_decimal::Decimal;

use crate::actor_framework::Entity;
use crate::domain::{SaleCreate, SaleRecord, Totals};
use super::error::SaleError;

impl Entity for SaleRecord {
    type Id = u64;
    type CreateParams = SaleCreate;
    type Patch = ();
    type Action = ();
    type ActionResult = ();
    type Error = SaleError;

    const KIND: &'static str = "sale";

    fn id(&self) -> &u64 { &self.id }

    /// Stamps the sale with the current time and derives its totals from the lines.
    ///
    /// # Errors
    /// A sale needs at least one line with a positive quantity, a tax rate
    /// that is not negative, and totals that fit in a `Decimal`.
    fn from_create_params(id: u64, params: SaleCreate) -> Result<Self, SaleError> {
        if params.items.is_empty() {
            return Err(SaleError::ValidationError("Sale has no items".to_string()));
        }
        if params.items.iter().any(|item| item.quantity == 0) {
            return Err(SaleError::ValidationError("Sale line with zero quantity".to_string()));
        }
        if params.tax_rate < Decimal::ZERO {
            return Err(SaleError::ValidationError(format!("Negative tax rate: {}", params.tax_rate)));
        }

        let Totals { subtotal, tax, total } = Totals::compute(
            params.items.iter().map(|item| (item.unit_price, item.quantity)),
            params.tax_rate,
        )
        .ok_or_else(|| SaleError::ValidationError("Sale total is too large to compute".to_string()))?;

        Ok(Self {
            id,
            created_at: Utc::now(),
            items: params.items,
            tax_rate: params.tax_rate,
            subtotal,
            tax,
            total,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), SaleError> {
        Err(SaleError::Immutable(self.id))
    }

    fn on_delete(&self) -> Result<(), SaleError> {
        Err(SaleError::Immutable(self.id))
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), SaleError> {
        Ok(())
    }
}
