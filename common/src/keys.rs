//! キーボード操作

/// キー入力から導かれる操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// 画面全体のリセット
    Reset,
    /// チップのクリックと同じ
    Activate,
}

impl KeyCommand {
    /// ドキュメント全体で受けるキー
    pub fn from_document_key(key: &str) -> Option<Self> {
        match key {
            "Escape" => Some(KeyCommand::Reset),
            _ => None,
        }
    }

    /// チップにフォーカスがあるときのキー
    pub fn from_chip_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | " " | "Spacebar" => Some(KeyCommand::Activate),
            _ => None,
        }
    }
}
