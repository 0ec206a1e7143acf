use std::env;
use std::str::FromStr;

use anyhow::{ensure, Context};
use rust_decimal::Decimal;

/// Runtime settings, read from `POS_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub tax_rate: Decimal,
    pub low_stock_threshold: u32,
    pub channel_buffer: usize,
    pub first_sale_id: u64,
    pub seed_catalog: bool,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(10, 2),
            low_stock_threshold: 10,
            channel_buffer: 32,
            first_sale_id: 1001,
            seed_catalog: true,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let config = Self {
            tax_rate: parse_or(&lookup, "POS_TAX_RATE", defaults.tax_rate)?,
            low_stock_threshold: parse_or(&lookup, "POS_LOW_STOCK_THRESHOLD", defaults.low_stock_threshold)?,
            channel_buffer: parse_or(&lookup, "POS_CHANNEL_BUFFER", defaults.channel_buffer)?,
            first_sale_id: parse_or(&lookup, "POS_FIRST_SALE_ID", defaults.first_sale_id)?,
            seed_catalog: parse_or(&lookup, "POS_SEED_CATALOG", defaults.seed_catalog)?,
            log_filter: lookup("POS_LOG").unwrap_or(defaults.log_filter),
        };

        ensure!(
            config.tax_rate >= Decimal::ZERO && config.tax_rate <= Decimal::ONE,
            "POS_TAX_RATE must be between 0 and 1, got {}",
            config.tax_rate
        );
        ensure!(config.channel_buffer > 0, "POS_CHANNEL_BUFFER must be positive");
        Ok(config)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        None => Ok(default),
    }
}
