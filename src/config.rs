//! Marketplace configuration.
//!
//! Parsed from the command line and the environment (a `.env` file is loaded
//! first when present). Every field has a default, so `MarketplaceConfig::default()`
//! is a complete in-memory configuration for tests.

use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::time::Duration;

/// Where the status engine's progress goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StatusPersistenceMode {
    /// Progress lives only in the tracker.
    #[default]
    Ephemeral,
    /// Each step is also recorded in the order log.
    OrderLog,
}

/// FoodSaaS marketplace configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "foodsaas", about = "FoodSaaS order lifecycle demo", long_about = None)]
pub struct MarketplaceConfig {
    /// Directory holding one JSON document per namespace; in-memory when unset
    #[arg(long, env = "FOODSAAS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Milliseconds between status advances
    #[arg(
        long,
        env = "FOODSAAS_STATUS_INTERVAL_MS",
        default_value_t = 5000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub status_interval_ms: u64,

    /// Delivery fee charged when a restaurant publishes none
    #[arg(long, env = "FOODSAAS_FALLBACK_FEE", default_value = "5.00")]
    pub fallback_delivery_fee: Decimal,

    /// Whether status changes are written back to the order log
    #[arg(long, env = "FOODSAAS_STATUS_PERSISTENCE", value_enum, default_value_t = StatusPersistenceMode::Ephemeral)]
    pub status_persistence: StatusPersistenceMode,

    /// Request buffer of each actor's channel
    #[arg(
        long,
        env = "FOODSAAS_CHANNEL_CAPACITY",
        default_value_t = 32,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub channel_capacity: usize,
}

impl MarketplaceConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub fn status_interval(&self) -> Duration {
        Duration::from_millis(self.status_interval_ms)
    }
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            status_interval_ms: 5000,
            fallback_delivery_fee: Decimal::new(500, 2),
            status_persistence: StatusPersistenceMode::Ephemeral,
            channel_capacity: 32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_match_default() {
        let parsed = MarketplaceConfig::try_parse_from(["foodsaas"]).unwrap();
        let default = MarketplaceConfig::default();

        assert_eq!(parsed.status_interval(), default.status_interval());
        assert_eq!(parsed.fallback_delivery_fee, default.fallback_delivery_fee);
        assert_eq!(parsed.status_persistence, default.status_persistence);
        assert_eq!(parsed.channel_capacity, default.channel_capacity);
    }

    #[test]
    fn test_cli_overrides() {
        let parsed = MarketplaceConfig::try_parse_from([
            "foodsaas",
            "--data-dir",
            "/tmp/foodsaas",
            "--status-interval-ms",
            "250",
            "--status-persistence",
            "order-log",
        ])
        .unwrap();

        assert_eq!(parsed.data_dir, Some(PathBuf::from("/tmp/foodsaas")));
        assert_eq!(parsed.status_interval(), Duration::from_millis(250));
        assert_eq!(parsed.status_persistence, StatusPersistenceMode::OrderLog);
    }

    #[test]
    fn test_zero_interval_and_capacity_rejected() {
        for flag in ["--status-interval-ms", "--channel-capacity"] {
            let result = MarketplaceConfig::try_parse_from(["foodsaas", flag, "0"]);
            assert!(result.is_err(), "{flag} 0 should be rejected");
        }

        let parsed =
            MarketplaceConfig::try_parse_from(["foodsaas", "--channel-capacity", "1"]).unwrap();
        assert_eq!(parsed.channel_capacity, 1);
    }
}
