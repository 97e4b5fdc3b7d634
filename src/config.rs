//! Runtime configuration from environment variables
//!
//! `.env` is loaded by the binary before this runs.

use std::env;
use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    /// How long hotel rates and seasons stay cached
    pub rate_cache_ttl: Duration,
    /// How often the cache warmer refreshes
    pub cache_warm_interval: Duration,
}

impl Config {
    /// Read configuration from the environment
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
        let defaults = Self::default();

        Ok(Self {
            database_url,
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", defaults.db_max_connections)?,
            rate_cache_ttl: positive_secs(
                "RATE_CACHE_TTL_SECS",
                parse_or("RATE_CACHE_TTL_SECS", defaults.rate_cache_ttl.as_secs())?,
            )?,
            cache_warm_interval: positive_secs(
                "CACHE_WARM_INTERVAL_SECS",
                parse_or("CACHE_WARM_INTERVAL_SECS", defaults.cache_warm_interval.as_secs())?,
            )?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            bind_addr: "0.0.0.0:3000".to_string(),
            db_max_connections: 5,
            rate_cache_ttl: Duration::from_secs(10 * 60),
            cache_warm_interval: Duration::from_secs(10 * 60),
        }
    }
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {}={:?}: {}", key, raw, e)),
        Err(_) => Ok(default),
    }
}

/// Durations of zero seconds are rejected; the cache warmer cannot tick at 0.
fn positive_secs(key: &str, secs: u64) -> anyhow::Result<Duration> {
    if secs == 0 {
        anyhow::bail!("{} must be at least 1 second", key);
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_or_default_when_unset() {
        let value: u32 = parse_or("SAFARI_QUOTE_TEST_UNSET_VAR", 7).unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.rate_cache_ttl, Duration::from_secs(600));
    }

    #[test]
    fn test_positive_secs_rejects_zero() {
        assert!(positive_secs("CACHE_WARM_INTERVAL_SECS", 0).is_err());
        assert_eq!(
            positive_secs("CACHE_WARM_INTERVAL_SECS", 30).unwrap(),
            Duration::from_secs(30)
        );
    }
}
