use std::env;
use std::time::Duration;

/// Default cap on captured request bodies (1 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,
    /// Base used when handing out capture URLs; derived from the Host header when unset
    pub public_base_url: Option<String>,

    // Capture
    pub max_body_bytes: usize,
    /// 0 keeps `expires_at` advisory; anything else enables the sweeper
    pub sweep_interval_secs: u64,

    // Logging
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if exists

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            // Server
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT"))?,
            public_base_url: lookup("PUBLIC_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),

            // Capture
            max_body_bytes: match lookup("MAX_BODY_BYTES") {
                Some(v) => v.parse().map_err(|_| ConfigError::Invalid("MAX_BODY_BYTES"))?,
                None => DEFAULT_MAX_BODY_BYTES,
            },
            sweep_interval_secs: lookup("SWEEP_INTERVAL_SECS")
                .unwrap_or_else(|| "0".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("SWEEP_INTERVAL_SECS"))?,

            // Logging
            log_format: match lookup("LOG_FORMAT").as_deref() {
                None | Some("text") => LogFormat::Text,
                Some("json") => LogFormat::Json,
                Some(_) => return Err(ConfigError::Invalid("LOG_FORMAT")),
            },
        })
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Sweep period, or `None` when expiry is advisory
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_secs > 0).then(|| Duration::from_secs(self.sweep_interval_secs))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid environment variable: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.public_base_url, None);
        assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
        assert_eq!(config.sweep_interval(), None);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("PUBLIC_BASE_URL", "https://hooks.example.com/"),
            ("MAX_BODY_BYTES", "2048"),
            ("SWEEP_INTERVAL_SECS", "300"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();

        assert_eq!(config.server_addr(), "127.0.0.1:9000");
        assert_eq!(
            config.public_base_url.as_deref(),
            Some("https://hooks.example.com")
        );
        assert_eq!(config.max_body_bytes, 2048);
        assert_eq!(config.sweep_interval(), Some(Duration::from_secs(300)));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config_from(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid("PORT"))
        ));
        assert!(matches!(
            config_from(&[("SWEEP_INTERVAL_SECS", "-1")]),
            Err(ConfigError::Invalid("SWEEP_INTERVAL_SECS"))
        ));
        assert!(matches!(
            config_from(&[("LOG_FORMAT", "xml")]),
            Err(ConfigError::Invalid("LOG_FORMAT"))
        ));
    }
}
