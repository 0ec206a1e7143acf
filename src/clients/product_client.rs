use tracing::{debug, info, instrument, warn};
use crate::domain::{Product, ProductCreate, ProductPatch};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError, StockReservation};
use crate::actor_framework::ResourceClient;

/// Client for the inventory service.
///
/// `fetch_catalog` and `adjust_stock` are the two operations the till relies
/// on; the rest is catalog editing.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product);

impl ProductClient {
    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<u64, ProductError> {
        debug!("Sending request");
        let id = self.inner.create(params).await?;
        info!(product_id = id, "Product created");
        Ok(id)
    }

    #[instrument(skip(self))]
    pub async fn update_product(&self, id: u64, patch: ProductPatch) -> Result<Product, ProductError> {
        debug!("Sending request");
        Ok(self.inner.update(id, patch).await?)
    }

    /// The whole catalog, ordered by id.
    #[instrument(skip(self))]
    pub async fn fetch_catalog(&self) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        Ok(self.inner.list().await?)
    }

    /// Products whose stock is strictly below `threshold`.
    #[instrument(skip(self))]
    pub async fn low_stock(&self, threshold: u32) -> Result<Vec<Product>, ProductError> {
        let catalog = self.fetch_catalog().await?;
        Ok(catalog.into_iter().filter(|p| p.is_low_stock(threshold)).collect())
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: u64) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::CheckStock).await? {
            ProductActionResult::StockLevel(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Moves stock by `delta` and returns the new level.
    #[instrument(skip(self))]
    pub async fn adjust_stock(&self, id: u64, delta: i64) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::AdjustStock(delta)).await? {
            ProductActionResult::Adjusted(level) => {
                info!(level, "Stock adjusted");
                Ok(level)
            }
            other => Err(unexpected(other)),
        }
    }

    /// Takes every `(product, quantity)` out of stock, or none of them.
    ///
    /// Each line is re-checked against the stock level at commit time.
    #[instrument(skip(self, lines), fields(line_count = lines.len()))]
    pub async fn commit_stock(&self, lines: Vec<(u64, u32)>) -> Result<Vec<StockReservation>, ProductError> {
        debug!("Sending request");
        let actions = lines
            .into_iter()
            .map(|(id, quantity)| (id, ProductAction::ReserveStock(quantity)))
            .collect();

        let results = self.inner.perform_transaction(actions).await.map_err(|e| {
            let e = ProductError::from(e);
            warn!(error = %e, "Stock commit rejected");
            e
        })?;

        results
            .into_iter()
            .map(|result| match result {
                ProductActionResult::Reserved(reservation) => Ok(reservation),
                other => Err(unexpected(other)),
            })
            .collect()
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("Unexpected result: {:?}", result))
}
