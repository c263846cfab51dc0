//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    /// 2xx以外のステータス
    #[error("Network response was not ok ({status}): {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Transport(String),

    /// 食材が未検出のまま推薦を要求した
    #[error("Please upload images of ingredients first!")]
    NoIngredients,

    #[error("Unknown meat option: {0}")]
    UnknownChip(String),

    #[error("A recommendation request is already in progress")]
    Busy,

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// HTTPレスポンスのステータスからエラーを作る
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Error::Http {
            status,
            body: body.into(),
        }
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
