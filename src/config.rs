use crate::error::{LegalEaseError, Result};
use legalease_common::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_url: Option<String>,
    /// 未設定ならタイムアウトなし（ブラウザ版と同じ挙動）
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| LegalEaseError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("legalease").join("config.json"))
    }

    /// 接続先を決定（引数/環境変数 > 設定ファイル > 既定値）
    pub fn client_config(&self, api_url_override: Option<&str>) -> Result<ClientConfig> {
        match api_url_override.or(self.api_url.as_deref()) {
            Some(url) => Ok(ClientConfig::new(url)?),
            None => Ok(ClientConfig::default()),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    pub fn set_api_url(&mut self, url: String) -> Result<()> {
        // 保存前に形式だけ確認
        ClientConfig::new(&url)?;
        self.api_url = Some(url);
        self.save()
    }
}
