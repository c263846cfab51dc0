//! 推薦ボタンと結果パネルの表示状態

use crate::types::Recommendation;

/// 推薦ボタンの通常ラベル
pub const RECOMMEND_LABEL: &str = "Show Recommendation";
/// リクエスト中のラベル
pub const RECOMMEND_BUSY_LABEL: &str = "Finding Recipes...";

pub const PLACEHOLDER_TEXT: &str = "Your food recommendation will appear here...";
pub const SEARCHING_TITLE: &str = "Finding Your Perfect Recipe";
pub const SEARCHING_TEXT: &str = "Analyzing your ingredients and finding the perfect recipe...";
pub const NO_RESULTS_TITLE: &str = "No Recipe Found";
pub const NO_RESULTS_TEXT: &str = "We couldn't find a recipe matching your ingredients.";
pub const NO_RESULTS_HINT: &str =
    "Try uploading different ingredients or selecting different meat options.";
pub const ERROR_TITLE: &str = "Error";
pub const ERROR_TEXT: &str = "Unable to get recommendation. Please try again.";

/// 推薦ボタンの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendTrigger {
    enabled: bool,
}

impl Default for RecommendTrigger {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl RecommendTrigger {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn label(&self) -> &'static str {
        if self.enabled {
            RECOMMEND_LABEL
        } else {
            RECOMMEND_BUSY_LABEL
        }
    }

    pub(crate) fn engage(&mut self) {
        self.enabled = false;
    }

    pub(crate) fn release(&mut self) {
        self.enabled = true;
    }
}

/// スコープを抜けるとボタンを必ず元に戻す
pub(crate) struct TriggerGuard<'a>(&'a mut RecommendTrigger);

impl<'a> TriggerGuard<'a> {
    pub(crate) fn new(trigger: &'a mut RecommendTrigger) -> Self {
        Self(trigger)
    }
}

impl Drop for TriggerGuard<'_> {
    fn drop(&mut self) {
        self.0.release();
    }
}

/// 結果パネルの状態
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultPanel {
    #[default]
    Placeholder,
    Searching,
    Ready(Recommendation),
    /// 通信エラー（メッセージ付き）
    Failed(String),
}

impl ResultPanel {
    pub fn is_searching(&self) -> bool {
        matches!(self, ResultPanel::Searching)
    }
}
