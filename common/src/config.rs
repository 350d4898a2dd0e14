//! 接続先設定

use crate::error::{Error, Result};
use crate::transport::Endpoint;

/// バックエンドの既定アドレス
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// クライアント設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(Error::Config("API base URL is empty".to_string()));
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(Error::Config(format!(
                "API base URL must start with http:// or https://: {}",
                trimmed
            )));
        }
        Ok(Self {
            base_url: trimmed.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), "http://127.0.0.1:8000");
        assert_eq!(
            config.endpoint_url(Endpoint::AnalyzeText),
            "http://127.0.0.1:8000/analyze-text"
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ClientConfig::new(" https://legal.example.com/api/ ").expect("設定失敗");
        assert_eq!(
            config.endpoint_url(Endpoint::AskQuestion),
            "https://legal.example.com/api/ask-question"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(ClientConfig::new(""), Err(Error::Config(_))));
        assert!(matches!(ClientConfig::new("ftp://host"), Err(Error::Config(_))));
        assert!(matches!(ClientConfig::new("127.0.0.1:8000"), Err(Error::Config(_))));
    }
}
