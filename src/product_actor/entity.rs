use rust_decimal::Decimal;

use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductPatch};
use super::actions::{ProductAction, ProductActionResult, StockReservation};
use super::error::ProductError;

impl Entity for Product {
    type Id = u64;
    type CreateParams = ProductCreate;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Error = ProductError;

    const KIND: &'static str = "product";

    fn id(&self) -> &u64 { &self.id }

    /// Creates a new Product from creation parameters.
    ///
    /// # Errors
    /// Rejects an empty name or a negative price.
    fn from_create_params(id: u64, params: ProductCreate) -> Result<Self, ProductError> {
        validate_name(&params.name)?;
        validate_price(params.price)?;
        Ok(Self {
            id,
            name: params.name,
            price: params.price,
            stock: params.stock,
            category: params.category,
        })
    }

    /// Applies a catalog edit. Validation runs before any field changes.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), ProductError> {
        if let Some(name) = &patch.name {
            validate_name(name)?;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
        }

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        Ok(())
    }

    /// Handles stock actions.
    ///
    /// # Errors
    /// `ReserveStock` fails with `InsufficientStock` when the amount exceeds the
    /// current level; `AdjustStock` fails when the result would leave `0..=u32::MAX`.
    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::StockLevel(self.stock)),
            ProductAction::AdjustStock(delta) => {
                let adjusted = i64::from(self.stock)
                    .checked_add(delta)
                    .and_then(|level| u32::try_from(level).ok())
                    .ok_or(ProductError::InvalidAdjustment {
                        product_id: self.id,
                        delta,
                        available: self.stock,
                    })?;
                self.stock = adjusted;
                Ok(ProductActionResult::Adjusted(adjusted))
            }
            ProductAction::ReserveStock(quantity) => {
                if quantity > self.stock {
                    return Err(ProductError::InsufficientStock {
                        product_id: self.id,
                        requested: quantity,
                        available: self.stock,
                    });
                }
                self.stock -= quantity;
                Ok(ProductActionResult::Reserved(StockReservation {
                    product_id: self.id,
                    name: self.name.clone(),
                    unit_price: self.price,
                    quantity,
                    remaining: self.stock,
                }))
            }
        }
    }
}

fn validate_name(name: &str) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::ValidationError("Name required".to_string()));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<(), ProductError> {
    if price < Decimal::ZERO {
        return Err(ProductError::ValidationError(format!("Price must not be negative: {price}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn lamp() -> Product {
        Product::new(3, "Desk Lamp", dec!(35.00), 8, "Electronics")
    }

    #[test]
    fn test_create_rejects_negative_price_and_blank_name() {
        let negative = ProductCreate::new("Mug", dec!(-1.00), 1, "Home");
        assert!(matches!(
            Product::from_create_params(1, negative),
            Err(ProductError::ValidationError(_))
        ));
        let blank = ProductCreate::new("  ", dec!(1.00), 1, "Home");
        assert!(Product::from_create_params(1, blank).is_err());
        let free = ProductCreate::new("Sticker", dec!(0), 100, "Stationery");
        assert!(Product::from_create_params(1, free).is_ok());
    }

    #[test]
    fn test_invalid_patch_changes_nothing() {
        let mut product = lamp();
        let patch = ProductPatch {
            stock: Some(1),
            price: Some(dec!(-5)),
            ..ProductPatch::default()
        };
        assert!(product.on_update(patch).is_err());
        assert_eq!(product, lamp());
    }

    #[test]
    fn test_reserve_stock() {
        let mut product = lamp();
        let result = product.handle_action(ProductAction::ReserveStock(3)).unwrap();
        match result {
            ProductActionResult::Reserved(reservation) => {
                assert_eq!(reservation.quantity, 3);
                assert_eq!(reservation.remaining, 5);
                assert_eq!(reservation.unit_price, dec!(35.00));
            }
            other => panic!("Unexpected result: {:?}", other),
        }
        assert_eq!(
            product.handle_action(ProductAction::ReserveStock(6)),
            Err(ProductError::InsufficientStock { product_id: 3, requested: 6, available: 5 })
        );
        assert_eq!(product.stock, 5);
    }

    #[test]
    fn test_adjust_stock_never_goes_negative() {
        let mut product = lamp();
        assert_eq!(
            product.handle_action(ProductAction::AdjustStock(-2)),
            Ok(ProductActionResult::Adjusted(6))
        );
        assert!(product.handle_action(ProductAction::AdjustStock(-7)).is_err());
        assert_eq!(
            product.handle_action(ProductAction::AdjustStock(10)),
            Ok(ProductActionResult::Adjusted(16))
        );
    }
}
