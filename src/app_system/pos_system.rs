use tracing::{info, error, instrument};
use crate::checkout::CheckoutSession;
use crate::clients::{ProductClient, SaleClient};
use crate::actor_framework::ResourceActor;
use crate::config::AppConfig;
use crate::domain::{demo_catalog, DashboardSummary, Product, SaleRecord};
use crate::product_actor::ProductError;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// The point-of-sale system: the inventory and sale history actors plus
/// the settings every till shares.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct PosSystem {
    pub product_client: ProductClient,
    pub sale_client: SaleClient,
    config: AppConfig,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl PosSystem {
    pub fn new(config: AppConfig) -> Self {
        // 1. Inventory service
        let product_id_counter = Arc::new(AtomicU64::new(1));
        let next_product_id = move || product_id_counter.fetch_add(1, Ordering::SeqCst);

        let (product_actor, product_resource_client) =
            ResourceActor::<Product>::new(config.channel_buffer, next_product_id);
        let product_client = ProductClient::new(product_resource_client);
        let product_handle = tokio::spawn(product_actor.run());

        // 2. Sale history service
        let sale_id_counter = Arc::new(AtomicU64::new(config.first_sale_id));
        let next_sale_id = move || sale_id_counter.fetch_add(1, Ordering::SeqCst);

        let (sale_actor, sale_resource_client) =
            ResourceActor::<SaleRecord>::new(config.channel_buffer, next_sale_id);
        let sale_client = SaleClient::new(sale_resource_client);
        let sale_handle = tokio::spawn(sale_actor.run());

        info!(tax_rate = %config.tax_rate, "POS system started");

        Self {
            product_client,
            sale_client,
            config,
            handles: vec![product_handle, sale_handle],
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Loads the demo catalog into the inventory. Returns the new product ids.
    #[instrument(skip(self))]
    pub async fn seed_catalog(&self) -> Result<Vec<u64>, ProductError> {
        let mut ids = Vec::new();
        for params in demo_catalog() {
            ids.push(self.product_client.create_product(params).await?);
        }
        info!(products = ids.len(), "Catalog seeded");
        Ok(ids)
    }

    /// Opens a new till with an empty cart.
    pub fn open_session(&self) -> CheckoutSession {
        CheckoutSession::new(
            self.product_client.clone(),
            self.sale_client.clone(),
            self.config.tax_rate,
        )
    }

    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> anyhow::Result<DashboardSummary> {
        let catalog = self.product_client.fetch_catalog().await?;
        let sales = self.sale_client.sale_history().await?;
        Ok(DashboardSummary::build(&catalog, &sales, self.config.low_stock_threshold))
    }

    /// Drops the system's client handles and waits for the actors to stop.
    ///
    /// Actors keep running while any session still holds a client clone.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        info!("Shutting down system...");

        drop(self.product_client);
        drop(self.sale_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                anyhow::bail!("Actor task failed: {:?}", e);
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
