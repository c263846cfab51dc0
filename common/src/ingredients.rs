//! 検出食材の状態

use serde::{Deserialize, Serialize};

/// 検出器が「食材なし」を返したときの1枚ごとのマーカー
const NOT_DETECTED_MARKERS: &[&str] = &["no ingredient detected", "not ingredient"];

/// 食材検出の状態
///
/// 表示用の文字列と実データを取り違えないよう、状態ごとに分ける。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DetectionStatus {
    /// 画像未選択
    #[default]
    Idle,
    Detecting,
    Detected(Vec<String>),
    /// 検出は成功したが食材がなかった
    Empty,
    Error(String),
}

impl DetectionStatus {
    /// アップロード応答の食材一覧から状態を作る
    ///
    /// 1枚ごとの「検出なし」マーカーと空文字は除外し、順序は保つ。
    pub fn from_detected(ingredients: Vec<String>) -> Self {
        let ingredients: Vec<String> = ingredients
            .into_iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty() && !is_not_detected_marker(i))
            .collect();

        if ingredients.is_empty() {
            DetectionStatus::Empty
        } else {
            DetectionStatus::Detected(ingredients)
        }
    }

    /// 推薦リクエストに使える食材一覧
    pub fn ingredients(&self) -> Option<&[String]> {
        match self {
            DetectionStatus::Detected(list) => Some(list),
            _ => None,
        }
    }

    pub fn is_detecting(&self) -> bool {
        matches!(self, DetectionStatus::Detecting)
    }

    /// 画面表示用テキスト
    pub fn display_text(&self) -> String {
        match self {
            DetectionStatus::Idle => "—".to_string(),
            DetectionStatus::Detecting => "Detecting ingredients...".to_string(),
            DetectionStatus::Detected(list) => list.join(", "),
            DetectionStatus::Empty => "No ingredients detected".to_string(),
            DetectionStatus::Error(_) => "Error detecting ingredients".to_string(),
        }
    }
}

fn is_not_detected_marker(ingredient: &str) -> bool {
    let lower = ingredient.to_lowercase();
    NOT_DETECTED_MARKERS.contains(&lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_detected_keeps_order() {
        let status = DetectionStatus::from_detected(vec!["egg".into(), "onion".into()]);
        assert_eq!(
            status,
            DetectionStatus::Detected(vec!["egg".to_string(), "onion".to_string()])
        );
    }

    #[test]
    fn test_from_detected_empty() {
        assert_eq!(DetectionStatus::from_detected(vec![]), DetectionStatus::Empty);
    }

    #[test]
    fn test_from_detected_drops_markers() {
        let status = DetectionStatus::from_detected(vec![
            "No ingredient detected".into(),
            "tomato".into(),
            "not ingredient".into(),
            " ".into(),
        ]);
        assert_eq!(status, DetectionStatus::Detected(vec!["tomato".to_string()]));
    }

    #[test]
    fn test_from_detected_only_markers_is_empty() {
        let status = DetectionStatus::from_detected(vec!["No ingredient detected".into()]);
        assert_eq!(status, DetectionStatus::Empty);
    }

    #[test]
    fn test_ingredients_only_when_detected() {
        assert!(DetectionStatus::Idle.ingredients().is_none());
        assert!(DetectionStatus::Detecting.ingredients().is_none());
        assert!(DetectionStatus::Empty.ingredients().is_none());
        assert!(DetectionStatus::Error("boom".into()).ingredients().is_none());

        let status = DetectionStatus::Detected(vec!["garlic".into()]);
        assert_eq!(status.ingredients(), Some(&["garlic".to_string()][..]));
    }

    #[test]
    fn test_display_text() {
        assert_eq!(DetectionStatus::Idle.display_text(), "—");
        assert_eq!(DetectionStatus::Detecting.display_text(), "Detecting ingredients...");
        assert_eq!(DetectionStatus::Empty.display_text(), "No ingredients detected");
        assert_eq!(
            DetectionStatus::Error("timeout".into()).display_text(),
            "Error detecting ingredients"
        );
        assert_eq!(
            DetectionStatus::Detected(vec!["egg".into(), "onion".into()]).display_text(),
            "egg, onion"
        );
    }
}
