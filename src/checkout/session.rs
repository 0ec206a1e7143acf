use rust_decimal::Decimal;
use tracing::{debug, error, info, instrument, warn};

use crate::actor_framework::Entity;
use crate::clients::{ProductClient, SaleClient};
use crate::domain::{format_money, Cart, CartError, CartLine, SaleCreate, SaleLine, SaleRecord, Totals};
use crate::product_actor::{ProductError, StockReservation};
use super::error::CheckoutError;

/// Which mutations the cart currently accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartStage {
    /// Lines can be added, removed, and changed.
    Building,
    /// The cart is read-only while the customer reviews it.
    Review,
}

/// Owns one till's cart and talks to the inventory and sale services.
///
/// Every cart mutation reads the live stock level first, and checkout
/// re-checks all lines against stock in a single transaction.
pub struct CheckoutSession {
    cart: Cart,
    stage: CartStage,
    tax_rate: Decimal,
    products: ProductClient,
    sales: SaleClient,
}

impl CheckoutSession {
    pub fn new(products: ProductClient, sales: SaleClient, tax_rate: Decimal) -> Self {
        Self {
            cart: Cart::new(),
            stage: CartStage::Building,
            tax_rate,
            products,
            sales,
        }
    }

    #[cfg(test)]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[cfg(test)]
    pub fn stage(&self) -> CartStage {
        self.stage
    }

    /// Adds one unit of `product_id`, checked against its current stock.
    #[instrument(skip(self))]
    pub async fn add_item(&mut self, product_id: u64) -> Result<u32, CheckoutError> {
        self.ensure_editable()?;
        let product = self
            .products
            .get_product(product_id)
            .await?
            .ok_or_else(|| ProductError::NotFound(product_id.to_string()))?;

        let quantity = self.cart.add_item(&product).map_err(rejected)?;
        debug!(quantity, "Item added");
        Ok(quantity)
    }

    #[instrument(skip(self))]
    pub fn remove_item(&mut self, product_id: u64) -> Result<Option<CartLine>, CheckoutError> {
        self.ensure_editable()?;
        Ok(self.cart.remove_item(product_id))
    }

    /// Moves a line by `delta` units; the result is clamped to at least 1.
    #[instrument(skip(self))]
    pub async fn change_quantity(&mut self, product_id: u64, delta: i64) -> Result<u32, CheckoutError> {
        self.ensure_editable()?;
        if self.cart.line(product_id).is_none() {
            return Err(rejected(CartError::NotInCart(product_id)).into());
        }

        let stock = self.products.check_stock(product_id).await?;
        let quantity = self.cart.change_quantity(product_id, delta, stock).map_err(rejected)?;
        debug!(quantity, "Quantity changed");
        Ok(quantity)
    }

    /// Locks the cart for review and returns what the customer will pay.
    pub fn begin_review(&mut self) -> Result<Totals, CheckoutError> {
        if self.cart.is_empty() {
            return Err(rejected(CartError::EmptyCart).into());
        }
        let totals = self.cart.totals(self.tax_rate).map_err(rejected)?;
        self.stage = CartStage::Review;
        Ok(totals)
    }

    pub fn resume_editing(&mut self) {
        self.stage = CartStage::Building;
    }

    /// Commits stock for every line, records the sale, and clears the cart.
    ///
    /// Stock is re-checked at commit time; if any line no longer fits, nothing
    /// is taken out of stock and the cart is left as it was.
    #[instrument(skip(self))]
    pub async fn checkout(&mut self) -> Result<SaleRecord, CheckoutError> {
        if self.cart.is_empty() {
            return Err(rejected(CartError::EmptyCart).into());
        }

        let lines = self
            .cart
            .lines()
            .iter()
            .map(|line| (line.product_id, line.quantity))
            .collect();
        let reservations = self.products.commit_stock(lines).await?;
        info!(lines = reservations.len(), "Stock committed");

        let params = SaleCreate {
            items: reservations.iter().map(sale_line).collect(),
            tax_rate: self.tax_rate,
        };
        let sale_id = match self.sales.record_sale(params.clone()).await {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "Recording sale failed, returning stock");
                self.restock(&reservations).await;
                return Err(e.into());
            }
        };

        self.cart.clear();
        self.stage = CartStage::Building;

        // The sale is final from here on; a failed read falls back to a local copy.
        let sale = match self.sales.get_sale(sale_id).await {
            Ok(Some(sale)) => sale,
            Ok(None) => {
                warn!(sale_id, "Recorded sale not found on read-back");
                SaleRecord::from_create_params(sale_id, params)?
            }
            Err(e) => {
                warn!(sale_id, error = %e, "Reading recorded sale failed");
                SaleRecord::from_create_params(sale_id, params)?
            }
        };
        info!(sale_id, total = %format_money(sale.total), "Checkout complete");
        Ok(sale)
    }

    fn ensure_editable(&self) -> Result<(), CartError> {
        match self.stage {
            CartStage::Building => Ok(()),
            CartStage::Review => Err(rejected(CartError::Locked)),
        }
    }

    async fn restock(&self, reservations: &[StockReservation]) {
        for reservation in reservations {
            let delta = i64::from(reservation.quantity);
            if let Err(e) = self.products.adjust_stock(reservation.product_id, delta).await {
                error!(product_id = reservation.product_id, error = %e, "Restock failed");
            }
        }
    }
}

fn sale_line(reservation: &StockReservation) -> SaleLine {
    SaleLine {
        product_id: reservation.product_id,
        name: reservation.name.clone(),
        unit_price: reservation.unit_price,
        quantity: reservation.quantity,
    }
}

/// Surfaces a rejected cart mutation to the operator.
fn rejected(err: CartError) -> CartError {
    warn!(error = %err, "Cart mutation rejected");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::FrameworkError;
    use crate::domain::{Product, SaleRecord};
    use crate::mock_framework::{create_mock_client, expect_action, expect_create, expect_get, expect_transaction};
    use crate::product_actor::{ProductAction, ProductActionResult};
    use crate::sale_actor::SaleError;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_failed_sale_record_returns_stock() {
        let (product_inner, mut product_rx) = create_mock_client::<Product>(10);
        let (sale_inner, mut sale_rx) = create_mock_client::<SaleRecord>(10);
        let mut session = CheckoutSession::new(
            ProductClient::new(product_inner),
            SaleClient::new(sale_inner),
            dec!(0.10),
        );

        let task = tokio::spawn(async move {
            session.add_item(1).await?;
            let result = session.checkout().await;
            Ok::<_, CheckoutError>((result, session.cart().lines().len()))
        });

        // Add reads the product first.
        let (id, responder) = expect_get(&mut product_rx).await.expect("Expected Product Get");
        assert_eq!(id, 1);
        let notebook = Product::new(1, "Pastel Notebook", dec!(12.50), 45, "Stationery");
        responder.send(Ok(Some(notebook))).unwrap();

        // Checkout commits stock for the single line.
        let (actions, responder) = expect_transaction(&mut product_rx).await.expect("Expected Transaction");
        assert!(matches!(actions.as_slice(), [(1, ProductAction::ReserveStock(1))]));
        responder
            .send(Ok(vec![ProductActionResult::Reserved(StockReservation {
                product_id: 1,
                name: "Pastel Notebook".into(),
                unit_price: dec!(12.50),
                quantity: 1,
                remaining: 44,
            })]))
            .unwrap();

        // The sale service refuses the record.
        let (params, responder) = expect_create(&mut sale_rx).await.expect("Expected Sale Create");
        assert_eq!(params.items.len(), 1);
        assert_eq!(params.tax_rate, dec!(0.10));
        let refusal = SaleError::ValidationError("ledger full".into());
        responder.send(Err(FrameworkError::Entity(refusal.clone()))).unwrap();

        // The committed unit goes back on the shelf.
        let (id, action, responder) = expect_action(&mut product_rx).await.expect("Expected Restock");
        assert_eq!(id, 1);
        assert!(matches!(action, ProductAction::AdjustStock(1)));
        responder.send(Ok(ProductActionResult::Adjusted(45))).unwrap();

        let (result, lines_left) = task.await.unwrap().unwrap();
        assert_eq!(result, Err(CheckoutError::Sale(refusal)));
        assert_eq!(lines_left, 1);
    }

    #[tokio::test]
    async fn test_recorded_sale_survives_failed_read_back() {
        let (product_inner, mut product_rx) = create_mock_client::<Product>(10);
        let (sale_inner, mut sale_rx) = create_mock_client::<SaleRecord>(10);
        let mut session = CheckoutSession::new(
            ProductClient::new(product_inner),
            SaleClient::new(sale_inner),
            dec!(0.10),
        );

        let task = tokio::spawn(async move {
            session.add_item(1).await?;
            let result = session.checkout().await;
            Ok::<_, CheckoutError>((result, session.cart().is_empty(), session.stage()))
        });

        let (_, responder) = expect_get(&mut product_rx).await.expect("Expected Product Get");
        let notebook = Product::new(1, "Pastel Notebook", dec!(12.50), 45, "Stationery");
        responder.send(Ok(Some(notebook))).unwrap();

        let (_, responder) = expect_transaction(&mut product_rx).await.expect("Expected Transaction");
        responder
            .send(Ok(vec![ProductActionResult::Reserved(StockReservation {
                product_id: 1,
                name: "Pastel Notebook".into(),
                unit_price: dec!(12.50),
                quantity: 1,
                remaining: 44,
            })]))
            .unwrap();

        let (_, responder) = expect_create(&mut sale_rx).await.expect("Expected Sale Create");
        responder.send(Ok(1001)).unwrap();

        // The sale is stored, but reading it back fails.
        let (id, responder) = expect_get(&mut sale_rx).await.expect("Expected Sale Get");
        assert_eq!(id, 1001);
        responder.send(Err(FrameworkError::ActorDropped)).unwrap();

        let (result, cart_empty, stage) = task.await.unwrap().unwrap();
        let sale = result.unwrap();
        assert_eq!(sale.id, 1001);
        assert_eq!(sale.items[0].unit_price, dec!(12.50));
        assert_eq!(sale.total, dec!(13.75));
        assert!(cart_empty);
        assert_eq!(stage, CartStage::Building);

        // No restock was attempted for a completed sale.
        assert!(product_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_review_of_overflowing_cart_is_refused() {
        let (product_inner, mut product_rx) = create_mock_client::<Product>(10);
        let (sale_inner, _sale_rx) = create_mock_client::<SaleRecord>(10);
        let mut session = CheckoutSession::new(
            ProductClient::new(product_inner),
            SaleClient::new(sale_inner),
            dec!(0.10),
        );

        let task = tokio::spawn(async move {
            session.add_item(3).await?;
            let review = session.begin_review();
            Ok::<_, CheckoutError>((review, session.stage()))
        });

        let (_, responder) = expect_get(&mut product_rx).await.expect("Expected Product Get");
        let jewel = Product::new(3, "Crown Jewel", Decimal::MAX, 5, "Luxury");
        responder.send(Ok(Some(jewel))).unwrap();

        let (review, stage) = task.await.unwrap().unwrap();
        assert_eq!(review, Err(CheckoutError::Cart(CartError::AmountOverflow)));
        assert_eq!(stage, CartStage::Building);
    }

    #[tokio::test]
    async fn test_review_locks_the_cart() {
        let (product_inner, _product_rx) = create_mock_client::<Product>(10);
        let (sale_inner, _sale_rx) = create_mock_client::<SaleRecord>(10);
        let mut session = CheckoutSession::new(
            ProductClient::new(product_inner),
            SaleClient::new(sale_inner),
            dec!(0.10),
        );

        assert_eq!(session.begin_review(), Err(CheckoutError::Cart(CartError::EmptyCart)));
        assert_eq!(session.stage(), CartStage::Building);

        session.stage = CartStage::Review;
        assert_eq!(session.add_item(1).await, Err(CheckoutError::Cart(CartError::Locked)));
        assert_eq!(session.remove_item(1), Err(CheckoutError::Cart(CartError::Locked)));
        assert_eq!(session.change_quantity(1, 1).await, Err(CheckoutError::Cart(CartError::Locked)));

        session.resume_editing();
        assert_eq!(session.remove_item(1), Ok(None));
    }

    #[tokio::test]
    async fn test_empty_checkout_sends_nothing() {
        let (product_inner, mut product_rx) = create_mock_client::<Product>(10);
        let (sale_inner, _sale_rx) = create_mock_client::<SaleRecord>(10);
        let mut session = CheckoutSession::new(
            ProductClient::new(product_inner),
            SaleClient::new(sale_inner),
            dec!(0.10),
        );

        assert_eq!(session.checkout().await, Err(CheckoutError::Cart(CartError::EmptyCart)));
        drop(session);
        assert!(product_rx.recv().await.is_none());
    }
}
