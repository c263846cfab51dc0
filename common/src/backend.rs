//! バックエンド呼び出しの抽象
//!
//! CLIはreqwest、WASMはfetchで実装する。

use crate::error::Result;
use crate::types::{RecommendRequest, RecommendResponse};

/// `/upload` と `/recommend` を提供するバックエンド
#[allow(async_fn_in_trait)]
pub trait RecipeBackend {
    /// プラットフォームごとの画像ハンドル
    type Image;

    /// 画像をまとめて送り、検出された食材名を返す（1リクエスト）
    async fn detect_ingredients(&self, images: &[Self::Image]) -> Result<Vec<String>>;

    /// 食材と肉フィルターからレシピを推薦してもらう
    async fn recommend(&self, request: &RecommendRequest) -> Result<RecommendResponse>;
}
