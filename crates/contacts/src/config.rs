//! Configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `ROLODEX_LATENCY_MIN_MS` - Lower bound of simulated backend latency
//!   (default: 300)
//! - `ROLODEX_LATENCY_MAX_MS` - Upper bound of simulated backend latency
//!   (default: 700)
//! - `RANDOM_USER_URL` - Base URL of the random-person source
//!   (default: `https://randomuser.me/api`)

use thiserror::Error;
use url::Url;

use crate::backend::memory::LatencyProfile;
use crate::backend::random_user::DEFAULT_BASE_URL;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Contact library configuration.
#[derive(Debug, Clone)]
pub struct ContactsConfig {
    /// Simulated latency bounds for the in-memory backend.
    pub latency: LatencyProfile,
    /// Base URL of the random-person source.
    pub random_user_url: Url,
}

impl ContactsConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when a variable is present but unparseable, or
    /// when the latency bounds are inverted.
    pub fn from_env() -> Result<Self, ConfigError> {
        let min = get_millis_or_default("ROLODEX_LATENCY_MIN_MS", 300)?;
        let max = get_millis_or_default("ROLODEX_LATENCY_MAX_MS", 700)?;

        if min > max {
            return Err(ConfigError::InvalidEnvVar(
                "ROLODEX_LATENCY_MAX_MS".to_owned(),
                format!("upper bound {max} is below lower bound {min}"),
            ));
        }

        let raw_url = get_env_or_default("RANDOM_USER_URL", DEFAULT_BASE_URL);
        let random_user_url = Url::parse(&raw_url).map_err(|e| {
            ConfigError::InvalidEnvVar("RANDOM_USER_URL".to_owned(), e.to_string())
        })?;

        Ok(Self {
            latency: LatencyProfile::from_millis(min, max),
            random_user_url,
        })
    }
}

impl Default for ContactsConfig {
    fn default() -> Self {
        // The constant is a valid URL; parsing it cannot fail.
        #[allow(clippy::unwrap_used)]
        let random_user_url = Url::parse(DEFAULT_BASE_URL).unwrap();

        Self {
            latency: LatencyProfile::default(),
            random_user_url,
        }
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_millis_or_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ContactsConfig::default();
        assert_eq!(config.latency, LatencyProfile::from_millis(300, 700));
        assert_eq!(config.random_user_url.as_str(), "https://randomuser.me/api");
    }

    #[test]
    fn test_get_millis_or_default_absent() {
        assert_eq!(
            get_millis_or_default("ROLODEX_TEST_UNSET_VAR", 42).unwrap(),
            42
        );
    }
}
