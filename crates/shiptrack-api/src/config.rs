//! Proxy configuration, read from the environment at start-up.
//!
//! | variable               | default                  |
//! |------------------------|--------------------------|
//! | `SHIPTRACK_ADDR`       | `0.0.0.0:8787`           |
//! | `CARRIER_TRACK_URL`    | DTDC `getTrackDetails`   |
//! | `CARRIER_ACCESS_TOKEN` | unset                    |
//! | `CARRIER_COOKIE`       | unset                    |
//! | `CARRIER_TIMEOUT_SECS` | `15`                     |
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8787";
pub const DEFAULT_CARRIER_URL: &str =
    "https://blktracksvc.dtdc.com/dtdc-api/rest/JSONCnTrk/getTrackDetails";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("CONFIG/{key}: invalid value {value:?}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierConfig {
    pub url: String,
    /// Sent as `x-access-token`
    pub access_token: Option<String>,
    /// Sent as `Cookie`
    pub cookie: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyConfig {
    pub addr: String,
    pub carrier: CarrierConfig,
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let addr = get("SHIPTRACK_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        if !addr.contains(':') {
            return Err(ConfigError::InvalidValue {
                key: "SHIPTRACK_ADDR",
                value: addr,
                reason: "expected host:port".to_string(),
            });
        }

        let url = get("CARRIER_TRACK_URL").unwrap_or_else(|| DEFAULT_CARRIER_URL.to_string());
        if let Err(e) = reqwest::Url::parse(&url) {
            return Err(ConfigError::InvalidValue {
                key: "CARRIER_TRACK_URL",
                value: url,
                reason: e.to_string(),
            });
        }

        let timeout = match get("CARRIER_TIMEOUT_SECS") {
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                Ok(_) => {
                    return Err(ConfigError::InvalidValue {
                        key: "CARRIER_TIMEOUT_SECS",
                        value: raw,
                        reason: "must be greater than zero".to_string(),
                    })
                }
                Err(e) => {
                    return Err(ConfigError::InvalidValue {
                        key: "CARRIER_TIMEOUT_SECS",
                        value: raw,
                        reason: e.to_string(),
                    })
                }
            },
        };

        Ok(Self {
            addr,
            carrier: CarrierConfig {
                url,
                access_token: get("CARRIER_ACCESS_TOKEN"),
                cookie: get("CARRIER_COOKIE"),
                timeout,
            },
        })
    }
}
