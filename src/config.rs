use crate::error::{RecipeFinderError, Result};
use recipe_finder_common::selection::DEFAULT_MEAT_OPTIONS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// バックエンドURLを上書きする環境変数
pub const SERVER_ENV_VAR: &str = "RECIPE_FINDER_SERVER";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    /// 0ならタイムアウトなし
    pub timeout_seconds: u64,
    pub meat_options: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:5000".into(),
            timeout_seconds: 0,
            meat_options: DEFAULT_MEAT_OPTIONS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| RecipeFinderError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("recipe-finder").join("config.json"))
    }

    /// 使用するバックエンドURL
    ///
    /// 優先順位: 引数 > 環境変数 > 設定ファイル
    pub fn resolve_server(&self, cli_override: Option<&str>) -> Result<String> {
        let url = match cli_override {
            Some(url) => url.to_string(),
            None => std::env::var(SERVER_ENV_VAR).unwrap_or_else(|_| self.server_url.clone()),
        };

        let url = url.trim().trim_end_matches('/').to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(RecipeFinderError::Config(format!(
                "URLは http:// または https:// で始めてください: {}",
                url
            )));
        }
        Ok(url)
    }

    pub fn set_server(&mut self, url: String) -> Result<()> {
        self.server_url = url;
        self.save()
    }
}
