//! 肉フィルターチップの選択状態
//!
//! 選択中のチップは常に1つ以上。予約ラベル "None" は「フィルターなし」を表し、
//! 他のチップとは同時に選択されない。

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// 「フィルターなし」を表す予約ラベル
pub const NONE_LABEL: &str = "None";

/// 既定の肉チップ（"None"を除く）
pub const DEFAULT_MEAT_OPTIONS: &[&str] = &["Chicken", "Beef", "Pork", "Fish", "Shrimp"];

/// チップ1つの表示状態
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chip {
    pub label: String,
    pub selected: bool,
}

/// 1回の状態遷移でUIに反映すべき変更（選択表示とaria-pressed）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipChange {
    pub label: String,
    pub selected: bool,
}

impl ChipChange {
    /// aria-pressed属性の値
    pub fn aria_pressed(&self) -> &'static str {
        if self.selected {
            "true"
        } else {
            "false"
        }
    }
}

/// 肉フィルターの選択状態マシン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeatSelection {
    chips: Vec<Chip>,
    /// 選択順の肉ラベル（"None"は含まない）
    filters: Vec<String>,
}

impl Default for MeatSelection {
    fn default() -> Self {
        Self::new(DEFAULT_MEAT_OPTIONS.iter().copied())
    }
}

impl MeatSelection {
    /// チップ一覧から作成し、"None"を選択した初期状態にする
    ///
    /// "None"が含まれていなければ末尾に追加する。重複と空ラベルは無視する。
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut chips: Vec<Chip> = Vec::new();
        for label in labels {
            let label = label.into();
            let label = label.trim();
            if label.is_empty() || chips.iter().any(|c| c.label == label) {
                continue;
            }
            chips.push(Chip {
                label: label.to_string(),
                selected: label == NONE_LABEL,
            });
        }
        if !chips.iter().any(|c| c.label == NONE_LABEL) {
            chips.push(Chip {
                label: NONE_LABEL.to_string(),
                selected: true,
            });
        }

        Self {
            chips,
            filters: Vec::new(),
        }
    }

    pub fn chips(&self) -> &[Chip] {
        &self.chips
    }

    /// 選択中の肉ラベル（選択順）。フィルターなしなら空
    pub fn filters(&self) -> &[String] {
        &self.filters
    }

    /// 選択中のラベル。フィルターなしなら `["None"]`
    pub fn selected_labels(&self) -> Vec<String> {
        if self.filters.is_empty() {
            vec![NONE_LABEL.to_string()]
        } else {
            self.filters.clone()
        }
    }

    pub fn is_selected(&self, label: &str) -> bool {
        self.chips
            .iter()
            .any(|c| c.label == label && c.selected)
    }

    /// チップをクリック（またはEnter/Space）したときの遷移
    ///
    /// 選択中の"None"を再度押しても何も起きない。
    pub fn toggle(&mut self, label: &str) -> Result<Vec<ChipChange>> {
        if !self.chips.iter().any(|c| c.label == label) {
            return Err(Error::UnknownChip(label.to_string()));
        }

        let mut changes = Vec::new();

        if label == NONE_LABEL {
            if !self.is_selected(NONE_LABEL) {
                self.deselect_all(&mut changes);
                self.set(NONE_LABEL, true, &mut changes);
                self.filters.clear();
            }
            return Ok(changes);
        }

        self.set(NONE_LABEL, false, &mut changes);

        if self.is_selected(label) {
            self.set(label, false, &mut changes);
            self.filters.retain(|m| m != label);
        } else {
            self.set(label, true, &mut changes);
            self.filters.push(label.to_string());
        }

        if self.filters.is_empty() {
            self.set(NONE_LABEL, true, &mut changes);
        }

        Ok(changes)
    }

    /// 全チップを解除して"None"のみ選択
    pub fn reset(&mut self) -> Vec<ChipChange> {
        let mut changes = Vec::new();
        let labels: Vec<String> = self.chips.iter().map(|c| c.label.clone()).collect();
        for label in labels {
            let selected = label == NONE_LABEL;
            self.set(&label, selected, &mut changes);
        }
        self.filters.clear();
        changes
    }

    fn deselect_all(&mut self, changes: &mut Vec<ChipChange>) {
        let selected: Vec<String> = self
            .chips
            .iter()
            .filter(|c| c.selected)
            .map(|c| c.label.clone())
            .collect();
        for label in selected {
            self.set(&label, false, changes);
        }
    }

    /// 状態が変わるときだけ変更を記録する
    fn set(&mut self, label: &str, selected: bool, changes: &mut Vec<ChipChange>) {
        if let Some(chip) = self.chips.iter_mut().find(|c| c.label == label) {
            if chip.selected != selected {
                chip.selected = selected;
                changes.push(ChipChange {
                    label: label.to_string(),
                    selected,
                });
            }
        }
    }
}
