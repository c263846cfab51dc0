//! バックエンドとの送受信データ型
//!
//! - UploadResponse: `POST /upload` の応答
//! - RecommendRequest: `POST /recommend` の送信ボディ
//! - RecommendResponse: `POST /recommend` の応答（新旧2形式）
//! - Recommendation: 描画前に正規化した推薦結果

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 一致なしを表す旧形式の `recommendedDish`
pub const NO_MATCH_DISH: &str = "No matching recipes found.";

/// `POST /upload` の応答
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub detected_ingredients: Vec<String>,
}

impl UploadResponse {
    /// 応答ボディをパース。`detectedIngredients` がなければ失敗
    pub fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| Error::Parse(format!("invalid upload response: {}", e)))
    }
}

/// `POST /recommend` の送信ボディ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub ingredients: Vec<String>,
    pub meat: Vec<String>,
}

/// 手順は文字列または文字列配列で届く
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InstructionText {
    Text(String),
    Steps(Vec<String>),
}

impl InstructionText {
    pub fn into_text(self) -> String {
        match self {
            InstructionText::Text(t) => t,
            InstructionText::Steps(steps) => steps
                .iter()
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// 新形式 `recommended[]` の1件
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeRecord {
    #[serde(alias = "title")]
    pub recipe_title: String,
    /// `null` も空として受ける
    pub ingredients: Option<Vec<String>>,
    #[serde(alias = "directions")]
    pub instructions: Option<InstructionText>,
    pub image: Option<String>,
    /// 整数以外（`1.0` など）も受けて表示時に丸める
    pub score: Option<f64>,
}

/// 旧形式の `details`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeDetails {
    pub ingredients: Option<Vec<String>>,
    #[serde(alias = "directions")]
    pub instructions: Option<InstructionText>,
}

/// `POST /recommend` の応答（両形式のフィールドを合わせ持つ）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendResponse {
    /// 1件ずつ `RecipeRecord` に変換する（壊れた件だけ捨てる）
    pub recommended: Option<Vec<serde_json::Value>>,
    #[serde(rename = "recommendedDish")]
    pub recommended_dish: Option<String>,
    pub details: Option<RecipeDetails>,
    pub image: Option<String>,
    pub detected: Option<Vec<String>>,
    pub message: Option<String>,
}

impl RecommendResponse {
    /// 応答ボディをパース
    ///
    /// JSONとして不正なら失敗。想定外の形のJSONは空の応答（=一致なし）として扱う。
    pub fn parse(body: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        Ok(Self::from_value(value))
    }

    pub fn from_value(value: serde_json::Value) -> Self {
        match serde_json::from_value(value) {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("unexpected recommend response shape: {}", e);
                Self::default()
            }
        }
    }

    /// 新旧どちらの形式も同じ `Recommendation` に正規化する
    pub fn into_recommendation(self) -> Recommendation {
        let detected = self.detected.unwrap_or_default();

        let recipes: Vec<Recipe> = self
            .recommended
            .unwrap_or_default()
            .into_iter()
            .filter_map(decode_record)
            .map(Recipe::from)
            .collect();
        if !recipes.is_empty() {
            return Recommendation::Recipes { recipes, detected };
        }

        match self.recommended_dish {
            Some(dish) if !dish.trim().is_empty() && dish != NO_MATCH_DISH => {
                let details = self.details.unwrap_or_default();
                let recipe = Recipe {
                    title: dish,
                    ingredients: details.ingredients.unwrap_or_default(),
                    instructions: details.instructions.map(InstructionText::into_text),
                    image: self.image.filter(|i| !i.is_empty()),
                    score: None,
                };
                Recommendation::Recipes {
                    recipes: vec![recipe],
                    detected,
                }
            }
            _ => Recommendation::NoMatch {
                message: self.message.filter(|m| !m.trim().is_empty()),
            },
        }
    }
}

fn decode_record(value: serde_json::Value) -> Option<RecipeRecord> {
    match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::debug!("skipping malformed recipe record: {}", e);
            None
        }
    }
}

/// 描画用のレシピ
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub image: Option<String>,
    /// 一致した食材数
    pub score: Option<u32>,
}

impl From<RecipeRecord> for Recipe {
    fn from(record: RecipeRecord) -> Self {
        Self {
            title: record.recipe_title,
            ingredients: record.ingredients.unwrap_or_default(),
            instructions: record.instructions.map(InstructionText::into_text),
            image: record.image.filter(|i| !i.is_empty()),
            score: record
                .score
                .filter(|s| s.is_finite() && *s >= 0.0)
                .map(|s| s.round() as u32),
        }
    }
}

/// 正規化済みの推薦結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Recipes {
        recipes: Vec<Recipe>,
        /// サーバーが照合に使った食材
        detected: Vec<String>,
    },
    NoMatch {
        message: Option<String>,
    },
}
