use thiserror::Error;

use crate::domain::CartError;
use crate::product_actor::ProductError;
use crate::sale_actor::SaleError;

/// Errors that can occur while building or submitting a cart.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CheckoutError {
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Product(#[from] ProductError),
    #[error(transparent)]
    Sale(#[from] SaleError),
}
