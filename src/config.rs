//! Environment-driven configuration.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Default location of the persisted admin token, relative to the working
/// directory. Override with `TOKEN_PATH`.
const DEFAULT_TOKEN_PATH: &str = ".harfa/adminToken.json";

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Base URL of the external admin API, without a trailing slash.
    pub api_base: String,
    /// Destination number for WhatsApp enquiry links.
    pub whatsapp_number: Option<String>,
    pub token_path: PathBuf,
}

#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("API_URL is not set")]
    MissingApiUrl,
}

impl AppConfig {
    /// Reads configuration from the environment, loading `.env` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let api_base = env::var("API_URL").map_err(|_| ConfigError::MissingApiUrl)?;
        Ok(Self {
            api_base: normalize_base(&api_base),
            whatsapp_number: env::var("WHATSAPP_NUMBER").ok(),
            token_path: env::var("TOKEN_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_TOKEN_PATH)),
        })
    }
}

/// Endpoint paths are joined with plain string formatting, so the base must
/// not end in a slash.
fn normalize_base(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_strips_trailing_slash() {
        assert_eq!(normalize_base("https://api.harfa.example/"), "https://api.harfa.example");
        assert_eq!(normalize_base("https://api.harfa.example"), "https://api.harfa.example");
    }
}
