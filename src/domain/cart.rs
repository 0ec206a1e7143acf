//! The in-progress checkout cart and its stock reconciliation rules.
//!
//! Every mutation is checked against the stock level the caller passes in,
//! which should be a fresh read from the inventory service. A rejected
//! mutation leaves the cart untouched.

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::Product;

/// Errors raised by cart mutations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("{name} is out of stock")]
    OutOfStock { product_id: u64, name: String },
    #[error("Not enough stock for product {product_id}: requested {requested}, available {available}")]
    NotEnoughStock { product_id: u64, requested: u32, available: u32 },
    #[error("Product {0} is not in the cart")]
    NotInCart(u64),
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Cart is locked for review")]
    Locked,
    #[error("Cart total is too large to compute")]
    AmountOverflow,
}

/// One product-quantity pair in an in-progress cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: u64,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

/// Subtotal, tax, and grand total of a set of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl Totals {
    /// Totals for `(unit price, quantity)` pairs at the given tax rate.
    ///
    /// Returns `None` if any step overflows `Decimal`.
    pub fn compute(lines: impl IntoIterator<Item = (Decimal, u32)>, tax_rate: Decimal) -> Option<Self> {
        let subtotal = lines.into_iter().try_fold(Decimal::ZERO, |acc, (price, quantity)| {
            acc.checked_add(price.checked_mul(Decimal::from(quantity))?)
        })?;
        let tax = subtotal.checked_mul(tax_rate)?;
        Some(Self {
            subtotal,
            tax,
            total: subtotal.checked_add(tax)?,
        })
    }
}

impl fmt::Display for Totals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "subtotal {} tax {} total {}",
            format_money(self.subtotal),
            format_money(self.tax),
            format_money(self.total)
        )
    }
}

/// Two-decimal display form of an amount, e.g. `36.30`.
pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, product_id: u64) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    pub fn quantity_of(&self, product_id: u64) -> u32 {
        self.line(product_id).map_or(0, |line| line.quantity)
    }

    /// Adds one unit of `product`, whose `stock` is taken as the current level.
    ///
    /// Returns the line's new quantity.
    pub fn add_item(&mut self, product: &Product) -> Result<u32, CartError> {
        if product.stock == 0 {
            return Err(CartError::OutOfStock {
                product_id: product.id,
                name: product.name.clone(),
            });
        }

        let requested = self.quantity_of(product.id) + 1;
        if requested > product.stock {
            return Err(CartError::NotEnoughStock {
                product_id: product.id,
                requested,
                available: product.stock,
            });
        }

        match self.lines.iter_mut().find(|line| line.product_id == product.id) {
            Some(line) => {
                line.quantity = requested;
                line.name.clone_from(&product.name);
                line.unit_price = product.price;
            }
            None => self.lines.push(CartLine {
                product_id: product.id,
                name: product.name.clone(),
                unit_price: product.price,
                quantity: 1,
            }),
        }
        Ok(requested)
    }

    /// Deletes the line for `product_id`, returning it if there was one.
    pub fn remove_item(&mut self, product_id: u64) -> Option<CartLine> {
        let index = self.lines.iter().position(|line| line.product_id == product_id)?;
        Some(self.lines.remove(index))
    }

    /// Moves a line's quantity by `delta`, never below 1.
    ///
    /// Returns the line's new quantity.
    pub fn change_quantity(&mut self, product_id: u64, delta: i64, current_stock: u32) -> Result<u32, CartError> {
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
            .ok_or(CartError::NotInCart(product_id))?;

        let wanted = i64::from(line.quantity).saturating_add(delta).max(1);
        let requested = u32::try_from(wanted).unwrap_or(u32::MAX);
        if requested > current_stock {
            return Err(CartError::NotEnoughStock {
                product_id,
                requested,
                available: current_stock,
            });
        }

        line.quantity = requested;
        Ok(requested)
    }

    pub fn totals(&self, tax_rate: Decimal) -> Result<Totals, CartError> {
        Totals::compute(
            self.lines.iter().map(|line| (line.unit_price, line.quantity)),
            tax_rate,
        )
        .ok_or(CartError::AmountOverflow)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
