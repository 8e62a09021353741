//! Application configuration loaded from environment variables.
//!
//! A missing Gemini API key is not a startup failure: the server still comes
//! up and only the model-backed routes report a configuration error.

use ring::rand::{SecureRandom, SystemRandom};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
/// Base URL for the Generative Language API.
pub const DEFAULT_GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_SESSION_IDLE_MINUTES: u64 = 240;
const SESSION_KEY_LEN: usize = 32;

/// Application configuration, loaded once at startup.
#[derive(Clone)]
pub struct Config {
    /// Gemini API key; `None` disables model-backed routes
    pub gemini_api_key: Option<String>,
    /// Model name passed to `generateContent`
    pub gemini_model: String,
    /// API base URL (overridable for proxies)
    pub gemini_api_base_url: String,
    /// Frontend URL for CORS and cookie attributes
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// HMAC key for session cookies (raw bytes)
    pub session_signing_key: Vec<u8>,
    /// Largest decoded photo accepted for analysis
    pub max_image_bytes: usize,
    /// Sessions idle longer than this are dropped
    pub session_idle_minutes: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("gemini_model", &self.gemini_model)
            .field("gemini_api_base_url", &self.gemini_api_base_url)
            .field("frontend_url", &self.frontend_url)
            .field("port", &self.port)
            .field("max_image_bytes", &self.max_image_bytes)
            .field("session_idle_minutes", &self.session_idle_minutes)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Config for tests: no API key, fixed signing key.
    pub fn test_default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_base_url: DEFAULT_GEMINI_API_BASE_URL.to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            session_signing_key: b"test_session_key_32_bytes_min!!!".to_vec(),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            session_idle_minutes: DEFAULT_SESSION_IDLE_MINUTES,
        }
    }

    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let gemini_api_key = env::var("GEMINI_API_KEY")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let session_signing_key = match env::var("SESSION_SIGNING_KEY") {
            Ok(key) if !key.trim().is_empty() => key.trim().as_bytes().to_vec(),
            _ => {
                tracing::warn!("SESSION_SIGNING_KEY not set, sessions will not survive a restart");
                random_key()?
            }
        };

        Ok(Self {
            gemini_api_key,
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_api_base_url: env::var("GEMINI_API_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE_URL.to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: parse_var("PORT", 8080)?,
            session_signing_key,
            max_image_bytes: parse_var("MAX_IMAGE_BYTES", DEFAULT_MAX_IMAGE_BYTES)?,
            session_idle_minutes: parse_var("SESSION_IDLE_MINUTES", DEFAULT_SESSION_IDLE_MINUTES)?,
        })
    }

    /// Idle time after which a session is dropped. Saturates for huge values.
    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_minutes.saturating_mul(60))
    }

    /// Whether cookies should carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        !(self.frontend_url.starts_with("http://localhost")
            || self.frontend_url.starts_with("http://127.0.0.1"))
    }
}

/// Read an optional variable, falling back to `default` when unset.
fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value: raw.clone(),
        }),
        Err(_) => Ok(default),
    }
}

fn random_key() -> Result<Vec<u8>, ConfigError> {
    let mut key = vec![0u8; SESSION_KEY_LEN];
    SystemRandom::new()
        .fill(&mut key)
        .map_err(|_| ConfigError::Random)?;
    Ok(key)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error("System random number generator unavailable")]
    Random,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_default_and_invalid() {
        env::remove_var("STUDENTFIT_TEST_UNSET");
        assert_eq!(parse_var("STUDENTFIT_TEST_UNSET", 42u16).unwrap(), 42);

        env::set_var("STUDENTFIT_TEST_BAD_PORT", "eighty");
        assert!(matches!(
            parse_var::<u16>("STUDENTFIT_TEST_BAD_PORT", 8080),
            Err(ConfigError::Invalid { name: "STUDENTFIT_TEST_BAD_PORT", .. })
        ));

        env::set_var("STUDENTFIT_TEST_GOOD_PORT", " 9000 ");
        assert_eq!(parse_var::<u16>("STUDENTFIT_TEST_GOOD_PORT", 8080).unwrap(), 9000);
    }

    #[test]
    fn test_secure_cookies() {
        let mut config = Config::test_default();
        assert!(!config.secure_cookies());

        config.frontend_url = "https://studentfit.example".to_string();
        assert!(config.secure_cookies());
    }

    #[test]
    fn test_session_idle_timeout() {
        let mut config = Config::test_default();
        assert_eq!(config.session_idle_timeout(), Duration::from_secs(240 * 60));

        config.session_idle_minutes = u64::MAX;
        assert_eq!(config.session_idle_timeout(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_negative_idle_minutes_rejected() {
        env::set_var("STUDENTFIT_TEST_NEG_IDLE", "-5");
        assert!(matches!(
            parse_var::<u64>("STUDENTFIT_TEST_NEG_IDLE", DEFAULT_SESSION_IDLE_MINUTES),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut config = Config::test_default();
        config.gemini_api_key = Some("super-secret".to_string());
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_random_key_length() {
        assert_eq!(random_key().unwrap().len(), SESSION_KEY_LEN);
    }
}
