use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::errors::ConfigError;

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 8080);
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_PRICE_API_BASE_URL: &str = "https://financialmodelingprep.com";
const DEFAULT_PRICE_API_KEY: &str = "demo";
const DEFAULT_PRICE_API_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TICKER_LIST: &str = "resources/tickers.json";
const DEFAULT_INGESTION_DAYS: u32 = 3;
const DEFAULT_INGESTION_INTERVAL_SECS: u64 = 50;

/// When the ingestion job fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestionSchedule {
    /// Fixed delay between ticks
    Interval(Duration),
    /// Six-field cron expression (sec min hour day month weekday)
    Cron(String),
}

impl std::fmt::Display for IngestionSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestionSchedule::Interval(every) => write!(f, "every {}s", every.as_secs()),
            IngestionSchedule::Cron(expr) => write!(f, "cron '{}'", expr),
        }
    }
}

/// Remote price provider settings
#[derive(Debug, Clone)]
pub struct PriceApiConfig {
    /// Scheme and host of the provider, without trailing path
    pub base_url: String,
    /// Access credential appended as the `apikey` query parameter
    pub api_key: String,
    /// Upper bound for a single request, connect through body
    pub timeout: Duration,
}

/// Ingestion job settings
#[derive(Debug, Clone)]
pub struct IngestionConfig {
    pub enabled: bool,
    /// Trading days requested (and persisted) per ticker
    pub days: u32,
    pub schedule: IngestionSchedule,
}

/// Process-wide configuration, read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// PostgreSQL URL; `None` selects the in-memory store
    pub database_url: Option<String>,
    pub db_pool_max_size: u32,
    pub price_api: PriceApiConfig,
    /// Path of the ticker list resource
    pub ticker_list: PathBuf,
    pub ingestion: IngestionConfig,
}

impl AppConfig {
    /// Build the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = parse_or("BIND_ADDR", get("BIND_ADDR"), || {
            SocketAddr::from(DEFAULT_BIND_ADDR)
        })?;

        let db_pool_max_size = parse_or("DB_POOL_MAX_SIZE", get("DB_POOL_MAX_SIZE"), || {
            DEFAULT_POOL_SIZE
        })?;

        let timeout_secs = parse_or(
            "PRICE_API_TIMEOUT_SECS",
            get("PRICE_API_TIMEOUT_SECS"),
            || DEFAULT_PRICE_API_TIMEOUT_SECS,
        )?;

        let days = parse_or("INGESTION_DAYS", get("INGESTION_DAYS"), || {
            DEFAULT_INGESTION_DAYS
        })?;
        if days == 0 {
            return Err(ConfigError::InvalidValue {
                key: "INGESTION_DAYS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let interval_secs = parse_or(
            "INGESTION_INTERVAL_SECS",
            get("INGESTION_INTERVAL_SECS"),
            || DEFAULT_INGESTION_INTERVAL_SECS,
        )?;
        if interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "INGESTION_INTERVAL_SECS",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let schedule = match get("INGESTION_CRON") {
            Some(expr) => IngestionSchedule::Cron(expr.trim().to_string()),
            None => IngestionSchedule::Interval(Duration::from_secs(interval_secs)),
        };

        Ok(Self {
            bind_addr,
            database_url: get("DATABASE_URL"),
            db_pool_max_size,
            price_api: PriceApiConfig {
                base_url: get("PRICE_API_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_PRICE_API_BASE_URL.to_string())
                    .trim_end_matches('/')
                    .to_string(),
                api_key: get("PRICE_API_KEY").unwrap_or_else(|| DEFAULT_PRICE_API_KEY.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
            ticker_list: get("TICKER_LIST")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TICKER_LIST)),
            ingestion: IngestionConfig {
                enabled: parse_or("INGESTION_ENABLED", get("INGESTION_ENABLED"), || false)?,
                days,
                schedule,
            },
        })
    }
}

fn parse_or<T, D>(key: &'static str, raw: Option<String>, default: D) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    D: FnOnce() -> T,
{
    let Some(value) = raw else {
        return Ok(default());
    };

    match value.trim().parse::<T>() {
        Ok(parsed) => Ok(parsed),
        Err(e) => Err(ConfigError::InvalidValue {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert!(config.database_url.is_none());
        assert_eq!(config.db_pool_max_size, 10);
        assert_eq!(config.price_api.base_url, "https://financialmodelingprep.com");
        assert_eq!(config.price_api.timeout, Duration::from_secs(10));
        assert_eq!(config.ticker_list, PathBuf::from("resources/tickers.json"));
        assert!(!config.ingestion.enabled);
        assert_eq!(config.ingestion.days, 3);
        assert_eq!(
            config.ingestion.schedule,
            IngestionSchedule::Interval(Duration::from_secs(50))
        );
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("BIND_ADDR", "0.0.0.0:9000"),
            ("DATABASE_URL", "postgres://localhost/stocks"),
            ("PRICE_API_BASE_URL", "http://localhost:1234/"),
            ("PRICE_API_KEY", "secret"),
            ("INGESTION_ENABLED", "true"),
            ("INGESTION_DAYS", "5"),
            ("INGESTION_CRON", "0 */5 * * * *"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/stocks"));
        assert_eq!(config.price_api.base_url, "http://localhost:1234");
        assert_eq!(config.price_api.api_key, "secret");
        assert!(config.ingestion.enabled);
        assert_eq!(config.ingestion.days, 5);
        assert_eq!(
            config.ingestion.schedule,
            IngestionSchedule::Cron("0 */5 * * * *".to_string())
        );
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("DATABASE_URL", "  "), ("INGESTION_DAYS", "")]).unwrap();

        assert!(config.database_url.is_none());
        assert_eq!(config.ingestion.days, 3);
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let err = config_from(&[("INGESTION_DAYS", "three")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "INGESTION_DAYS", .. }
        ));
    }

    #[test]
    fn test_zero_days_is_rejected() {
        let err = config_from(&[("INGESTION_DAYS", "0")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "INGESTION_DAYS", .. }
        ));
    }
}
