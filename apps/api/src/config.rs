use std::str::FromStr;

use anyhow::{Context, Result};

use crate::ingestion::TextSource;

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TAVILY_API_URL: &str = "https://api.tavily.com";

/// Application configuration loaded from environment variables.
/// Built once at startup and handed to the components that need it.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    /// Optional: the search feature reports a configuration error when absent.
    pub tavily_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_url: String,
    pub tavily_api_url: String,
    pub pdftoppm_path: String,
    pub raster_dpi: u32,
    pub raster_timeout_secs: u64,
    pub text_source: TextSource,
    pub session_capacity: usize,
    pub http_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            google_api_key: require_env("GOOGLE_API_KEY")?,
            tavily_api_key: optional_env("TAVILY_API_KEY"),
            gemini_model: env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            gemini_api_url: env_or("GEMINI_API_URL", DEFAULT_GEMINI_API_URL),
            tavily_api_url: env_or("TAVILY_API_URL", DEFAULT_TAVILY_API_URL),
            pdftoppm_path: env_or("PDFTOPPM_PATH", "pdftoppm"),
            raster_dpi: parse_env("RASTER_DPI", 150)?,
            raster_timeout_secs: parse_env("RASTER_TIMEOUT_SECS", 60)?,
            text_source: parse_env("RESUME_TEXT_SOURCE", TextSource::Ocr)?,
            session_capacity: parse_env("SESSION_CAPACITY", 256)?,
            http_timeout_secs: parse_env("HTTP_TIMEOUT_SECS", 120)?,
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            google_api_key: "test-key".to_string(),
            tavily_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_api_url: DEFAULT_GEMINI_API_URL.to_string(),
            tavily_api_url: DEFAULT_TAVILY_API_URL.to_string(),
            pdftoppm_path: "pdftoppm".to_string(),
            raster_dpi: 150,
            raster_timeout_secs: 60,
            text_source: TextSource::Ocr,
            session_capacity: 8,
            http_timeout_secs: 5,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Treats an empty value the same as an unset one.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{key} has an invalid value '{raw}': {e}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let port: u16 = parse_env("RESAI_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("RESAI_TEST_BAD_DPI", "lots");
        let result: Result<u32> = parse_env("RESAI_TEST_BAD_DPI", 150);
        assert!(result.is_err());
        std::env::remove_var("RESAI_TEST_BAD_DPI");
    }

    #[test]
    fn test_optional_env_treats_blank_as_missing() {
        std::env::set_var("RESAI_TEST_BLANK_KEY", "   ");
        assert!(optional_env("RESAI_TEST_BLANK_KEY").is_none());
        std::env::remove_var("RESAI_TEST_BLANK_KEY");
    }
}
