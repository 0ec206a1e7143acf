use tracing::{debug, info, instrument};
use crate::domain::{SaleCreate, SaleRecord};
use crate::sale_actor::SaleError;
use crate::actor_framework::ResourceClient;

/// Client for the sale history service.
#[derive(Clone)]
pub struct SaleClient {
    inner: ResourceClient<SaleRecord>,
}

impl_basic_client!(SaleClient, SaleRecord, SaleError, sale);

impl SaleClient {
    #[instrument(skip(self, params), fields(items = params.items.len()))]
    pub async fn record_sale(&self, params: SaleCreate) -> Result<u64, SaleError> {
        debug!("Sending request");
        let id = self.inner.create(params).await?;
        info!(sale_id = id, "Sale recorded");
        Ok(id)
    }

    /// Every recorded sale, oldest first.
    #[instrument(skip(self))]
    pub async fn sale_history(&self) -> Result<Vec<SaleRecord>, SaleError> {
        debug!("Sending request");
        Ok(self.inner.list().await?)
    }
}
