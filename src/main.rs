//! # POS Till
//!
//! A point-of-sale engine over an actor-backed inventory.
//!
//! - **Inventory service** - `ResourceActor<Product>` behind [`ProductClient`](clients::ProductClient)
//! - **Sale history** - `ResourceActor<SaleRecord>` behind [`SaleClient`](clients::SaleClient)
//! - **Till** - [`CheckoutSession`](checkout::CheckoutSession) owns one cart and
//!   reconciles every change against live stock
//! - **System** - [`PosSystem`](app_system::PosSystem) starts the actors and shuts them down
//!
//! ```bash
//! # Demo run
//! cargo run
//!
//! # With debug logging
//! RUST_LOG=debug cargo run
//! ```

mod domain;
mod clients;
mod checkout;
mod config;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod product_actor;
mod sale_actor;

use tracing::{info, warn, Instrument};
use crate::app_system::{setup_tracing, PosSystem};
use crate::config::AppConfig;
use crate::domain::format_money;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    // Setup tracing once for the entire application
    setup_tracing(&config.log_filter);

    info!("Starting point-of-sale demo");

    let system = PosSystem::new(config);
    if system.config().seed_catalog {
        system.seed_catalog().await?;
    }

    let catalog = system.product_client.fetch_catalog().await?;
    info!(products = catalog.len(), "Catalog loaded");

    let mut session = system.open_session();

    let span = tracing::info_span!("billing");
    let sale = async {
        // Two notebooks and a pen set, then an attempt to oversell the planner.
        for product_id in [1, 1, 2] {
            session.add_item(product_id).await?;
        }
        session.add_item(5).await?;
        if let Err(e) = session.change_quantity(5, 10).await {
            warn!(error = %e, "Quantity change refused");
        }
        session.remove_item(5)?;

        let totals = session.begin_review()?;
        info!(%totals, "Reviewing cart");
        session.checkout().await
    }
    .instrument(span)
    .await?;

    info!(sale_id = sale.id, units = sale.units_sold(), totals = %sale.totals(), "Sale completed");
    info!(receipt = %serde_json::to_string(&sale)?, "Receipt");

    // Restock the lamp shelf.
    system.product_client.adjust_stock(3, 12).await?;

    let summary = system.dashboard().await?;
    info!(
        products = summary.product_count,
        low_stock = summary.low_stock.len(),
        sales = summary.sale_count,
        revenue = %format_money(summary.revenue),
        "Dashboard"
    );
    for product in system.product_client.low_stock(system.config().low_stock_threshold).await? {
        warn!(product = %product.name, stock = product.stock, "Low stock");
    }

    // Shutdown system gracefully
    drop(session);
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
