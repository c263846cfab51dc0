//! 肉フィルターの指定（引数または対話式）

use crate::error::Result;
use dialoguer::MultiSelect;
use recipe_finder_common::{Error as CommonError, Session, NONE_LABEL};

/// 大文字小文字を無視してチップのラベルに合わせる
fn canonical_label<I>(session: &Session<I>, wanted: &str) -> Option<String> {
    session
        .meat()
        .chips()
        .iter()
        .find(|c| c.label.eq_ignore_ascii_case(wanted.trim()))
        .map(|c| c.label.clone())
}

/// 指定された肉だけが選ばれた状態にする
///
/// チップのトグル操作として適用するので、"None"の排他は状態マシン側で保たれる。
/// 空、または"None"のみの指定はフィルターなし。
pub fn apply_meat_choice<I>(session: &mut Session<I>, wanted: &[String]) -> Result<()> {
    let mut labels = Vec::new();
    for w in wanted {
        let label = canonical_label(session, w)
            .ok_or_else(|| CommonError::UnknownChip(w.clone()))?;
        if label != NONE_LABEL && !labels.contains(&label) {
            labels.push(label);
        }
    }

    if labels.is_empty() {
        session.toggle_meat(NONE_LABEL)?;
        return Ok(());
    }

    for label in &labels {
        if !session.meat().is_selected(label) {
            session.toggle_meat(label)?;
        }
    }

    let unwanted: Vec<String> = session
        .meat()
        .filters()
        .iter()
        .filter(|m| !labels.contains(m))
        .cloned()
        .collect();
    for label in unwanted {
        session.toggle_meat(&label)?;
    }

    Ok(())
}

/// MultiSelectで肉を選ぶ
pub fn select_meats_interactive<I>(session: &mut Session<I>) -> Result<()> {
    let chips = session.meat().chips().to_vec();
    let labels: Vec<&str> = chips.iter().map(|c| c.label.as_str()).collect();
    let defaults: Vec<bool> = chips.iter().map(|c| c.selected).collect();

    let picked = MultiSelect::new()
        .with_prompt("肉の種類を選択 (Spaceで切替、Enterで確定)")
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    let wanted: Vec<String> = picked.into_iter().map(|i| chips[i].label.clone()).collect();
    apply_meat_choice(session, &wanted)
}
