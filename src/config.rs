use chrono_tz::Tz;
use ibge_phillips::services::{Endpoints, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

// Per-IP rate limit for the dashboard route: `per_second` requests per
// second on average, up to `burst_size` at once
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// Milliseconds between two refills of one request slot
    pub fn replenish_interval_ms(&self) -> u64 {
        (1000 / self.per_second.max(1)).max(1)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_second: 10,
            burst_size: 20,
        }
    }
}

// YAML-serializable configuration structure; every key is optional
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ConfigYaml {
    pub node_name: Option<String>,
    pub environment: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub fetch_timeout_secs: Option<u64>,
    pub inflation_url: Option<String>,
    pub unemployment_url: Option<String>,
    pub rate_limit_per_second: Option<u64>,
    pub rate_limit_burst: Option<u32>,
    pub report_timezone: Option<String>,
}

// Holds application-wide settings
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub node_name: String,
    pub environment: String,
    pub host: IpAddr,
    pub port: u16,
    pub fetch_timeout: Duration,
    pub endpoints: Endpoints,
    pub rate_limit: Option<RateLimitConfig>,
    pub report_timezone: Tz,
}

impl AppConfig {
    // Load configuration from YAML file or environment variables
    pub fn load() -> anyhow::Result<Self> {
        if let Ok(config_file) = env::var("CONFIG_FILE") {
            Self::from_yaml(&config_file)
        } else {
            Self::from_env()
        }
    }

    pub fn from_yaml(file_path: &str) -> anyhow::Result<Self> {
        let yaml_content = fs::read_to_string(file_path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file {}: {}", file_path, e))?;
        Self::from_yaml_str(&yaml_content)
    }

    pub fn from_yaml_str(yaml_content: &str) -> anyhow::Result<Self> {
        let yaml_config: ConfigYaml = serde_yaml::from_str(yaml_content)
            .map_err(|e| anyhow::anyhow!("Failed to parse YAML config: {}", e))?;
        Self::from_parts(yaml_config)
    }

    // Load all configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_parts(ConfigYaml {
            node_name: lookup("NODE_NAME"),
            environment: lookup("ENVIRONMENT"),
            host: lookup("HOST"),
            port: parse_var(&lookup, "PORT")?,
            fetch_timeout_secs: parse_var(&lookup, "FETCH_TIMEOUT_SECS")?,
            inflation_url: lookup("INFLATION_URL"),
            unemployment_url: lookup("UNEMPLOYMENT_URL"),
            rate_limit_per_second: parse_var(&lookup, "RATE_LIMIT_PER_SECOND")?,
            rate_limit_burst: parse_var(&lookup, "RATE_LIMIT_BURST")?,
            report_timezone: lookup("REPORT_TIMEZONE"),
        })
    }

    fn from_parts(raw: ConfigYaml) -> anyhow::Result<Self> {
        let host_text = raw.host.unwrap_or_else(|| "127.0.0.1".to_string());
        let host: IpAddr = host_text
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid HOST {}: {}", host_text, e))?;

        let defaults = Endpoints::default();
        let endpoints = Endpoints {
            inflation: raw.inflation_url.unwrap_or(defaults.inflation),
            unemployment: raw.unemployment_url.unwrap_or(defaults.unemployment),
        };

        let default_limit = RateLimitConfig::default();
        let rate_limit = match raw.rate_limit_per_second.unwrap_or(default_limit.per_second) {
            0 => None, // 0 disables rate limiting
            per_second => Some(RateLimitConfig {
                per_second,
                burst_size: raw.rate_limit_burst.unwrap_or(default_limit.burst_size).max(1),
            }),
        };

        let timezone_name = raw
            .report_timezone
            .unwrap_or_else(|| "America/Sao_Paulo".to_string());
        let report_timezone = timezone_name.parse::<Tz>().unwrap_or_else(|e| {
            tracing::warn!("Failed to parse timezone '{}': {}, using UTC", timezone_name, e);
            chrono_tz::UTC
        });

        Ok(Self {
            node_name: raw
                .node_name
                .unwrap_or_else(|| "ibge-phillips-dashboard".to_string()),
            environment: raw.environment.unwrap_or_else(|| "development".to_string()),
            host,
            port: raw.port.unwrap_or(8050),
            fetch_timeout: raw
                .fetch_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
            endpoints,
            rate_limit,
            report_timezone,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// Missing means default; present but unparsable is an error, like a bad HOST
fn parse_var<T, F>(lookup: &F, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid {} {}: {}", key, raw, e))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = from_map(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8050");
        assert_eq!(config.fetch_timeout, Duration::from_secs(15));
        assert_eq!(config.endpoints, Endpoints::default());
        assert_eq!(config.rate_limit, Some(RateLimitConfig::default()));
        assert_eq!(config.report_timezone, chrono_tz::America::Sao_Paulo);
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_environment_overrides() {
        let config = from_map(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("FETCH_TIMEOUT_SECS", "5"),
            ("RATE_LIMIT_PER_SECOND", "0"),
            ("INFLATION_URL", "http://mirror/ipca"),
            ("REPORT_TIMEZONE", "Not/AZone"),
        ])
        .unwrap();
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:9000");
        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
        assert_eq!(config.rate_limit, None);
        assert_eq!(config.endpoints.inflation, "http://mirror/ipca");
        assert_eq!(config.endpoints.unemployment, Endpoints::default().unemployment);
        assert_eq!(config.report_timezone, chrono_tz::UTC);
    }

    #[test]
    fn test_invalid_host_is_rejected() {
        assert!(from_map(&[("HOST", "not-an-ip")]).is_err());
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        for (key, value) in [
            ("PORT", "80a"),
            ("FETCH_TIMEOUT_SECS", "fifteen"),
            ("RATE_LIMIT_PER_SECOND", "-1"),
            ("RATE_LIMIT_BURST", "1.5"),
        ] {
            let err = from_map(&[(key, value)]).unwrap_err();
            assert!(err.to_string().contains(key), "{}", err);
        }
        assert_eq!(from_map(&[("PORT", " 9001 ")]).unwrap().port, 9001);
    }

    #[test]
    fn test_replenish_interval_from_rate() {
        assert_eq!(RateLimitConfig::default().replenish_interval_ms(), 100);
        let fast = RateLimitConfig { per_second: 5000, burst_size: 1 };
        assert_eq!(fast.replenish_interval_ms(), 1);
    }

    #[test]
    fn test_yaml_config() {
        let config = AppConfig::from_yaml_str(
            "node_name: dash-1\nport: 8080\nrate_limit_per_second: 2\nrate_limit_burst: 4\n",
        )
        .unwrap();
        assert_eq!(config.node_name, "dash-1");
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.rate_limit,
            Some(RateLimitConfig { per_second: 2, burst_size: 4 })
        );
        assert!(AppConfig::from_yaml_str("port: [").is_err());
    }
}
