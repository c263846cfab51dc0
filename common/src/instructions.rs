//! 調理手順テキストの整形
//!
//! 手順は1段落ずつの `Vec<String>` として返し、描画側で改行や `<p>` に変換する。

use lazy_static::lazy_static;
use regex::Regex;

/// 手順がないときの表示
pub const NO_INSTRUCTIONS: &str = "No instructions available.";

lazy_static! {
    // "1." "12." など。直後が数字なら小数なので別途除外する
    static ref STEP_MARKER: Regex = Regex::new(r"\b\d+\.").unwrap();
}

/// 整形済みの手順
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instructions {
    Missing,
    Paragraphs(Vec<String>),
}

impl Instructions {
    /// 表示用の段落。手順がなければ固定メッセージ1段落
    pub fn paragraphs(&self) -> Vec<String> {
        match self {
            Instructions::Missing => vec![NO_INSTRUCTIONS.to_string()],
            Instructions::Paragraphs(p) => p.clone(),
        }
    }

    /// 空行区切りのプレーンテキスト
    pub fn to_text(&self) -> String {
        self.paragraphs().join("\n\n")
    }
}

/// 手順テキストを段落に分ける
///
/// - 番号付き（"1." など）: 各番号の直前で区切る
/// - 番号なし: ピリオドで区切り、各文末にピリオドを1つ付け直す
pub fn format_instructions(text: Option<&str>) -> Instructions {
    let text = match text {
        Some(t) if !t.trim().is_empty() => t,
        _ => return Instructions::Missing,
    };

    let markers = step_marker_positions(text);
    let paragraphs: Vec<String> = if markers.is_empty() {
        text.split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("{}.", s))
            .collect()
    } else {
        let mut bounds = markers;
        if bounds[0] != 0 {
            bounds.insert(0, 0);
        }
        bounds.push(text.len());
        bounds
            .windows(2)
            .map(|w| text[w[0]..w[1]].trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    };

    if paragraphs.is_empty() {
        Instructions::Missing
    } else {
        Instructions::Paragraphs(paragraphs)
    }
}

fn step_marker_positions(text: &str) -> Vec<usize> {
    STEP_MARKER
        .find_iter(text)
        .filter(|m| {
            !text[m.end()..]
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit())
        })
        .map(|m| m.start())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_instructions() {
        assert_eq!(format_instructions(None), Instructions::Missing);
        assert_eq!(format_instructions(Some("")), Instructions::Missing);
        assert_eq!(format_instructions(Some("   ")), Instructions::Missing);
        assert_eq!(format_instructions(None).to_text(), NO_INSTRUCTIONS);
    }

    #[test]
    fn test_numbered_steps() {
        let result = format_instructions(Some("1. Boil water. 2. Add rice."));
        assert_eq!(
            result,
            Instructions::Paragraphs(vec![
                "1. Boil water.".to_string(),
                "2. Add rice.".to_string(),
            ])
        );
    }

    #[test]
    fn test_numbered_steps_with_leading_text() {
        let result = format_instructions(Some("Prep first.\n1. Chop onion.\n\n2. Fry."));
        assert_eq!(
            result.paragraphs(),
            vec!["Prep first.", "1. Chop onion.", "2. Fry."]
        );
    }

    #[test]
    fn test_decimal_is_not_a_step_marker() {
        let result = format_instructions(Some("1. Add 1.5 cups flour. 2. Mix."));
        assert_eq!(
            result.paragraphs(),
            vec!["1. Add 1.5 cups flour.", "2. Mix."]
        );
    }

    #[test]
    fn test_sentences_without_numbers() {
        let result = format_instructions(Some("Boil water. Add rice."));
        assert_eq!(
            result,
            Instructions::Paragraphs(vec!["Boil water.".to_string(), "Add rice.".to_string()])
        );
        for p in result.paragraphs() {
            assert!(p.ends_with('.'));
            assert!(!p.ends_with(".."));
        }
    }

    #[test]
    fn test_sentences_skip_blank_fragments() {
        let result = format_instructions(Some("Stir well... Serve hot"));
        assert_eq!(result.paragraphs(), vec!["Stir well.", "Serve hot."]);
    }

    #[test]
    fn test_only_periods_is_missing() {
        assert_eq!(format_instructions(Some(" . . ")), Instructions::Missing);
    }

    #[test]
    fn test_to_text_uses_blank_line() {
        let result = format_instructions(Some("Boil water. Add rice."));
        assert_eq!(result.to_text(), "Boil water.\n\nAdd rice.");
    }
}
